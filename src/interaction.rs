use crate::{
    data::{building::BuildingType, resource::ResourceType},
    feedback::FeedbackMessage,
    state::{
        player::{NearbyKind, Player},
        world::World,
    },
};

/// What the interact key was aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InteractionTarget {
    Nothing,
    Resource(ResourceType),
    Building(BuildingType),
}

impl From<Option<NearbyKind>> for InteractionTarget {
    fn from(value: Option<NearbyKind>) -> Self {
        match value {
            None => Self::Nothing,
            Some(NearbyKind::Resource(r)) => Self::Resource(r),
            Some(NearbyKind::Building(b)) => Self::Building(b),
        }
    }
}

/// Interact with whatever is nearest to the player and describe how it went.
///
/// Returns `None` only for a deposit reporting success, which the player's interaction
/// model never does.
pub fn resolve(player: &mut Player, world: &mut World) -> Option<FeedbackMessage> {
    let target = InteractionTarget::from(player.nearby_objects.first().map(|o| o.kind));

    // Nothing to interact with, leave everything as it is
    if target == InteractionTarget::Nothing {
        return outcome(target, false);
    }

    let success = player.interact(world);
    log::debug!("Interaction with {target:?}: {success}");
    outcome(target, success)
}

/// The feedback for an interaction attempt
pub fn outcome(target: InteractionTarget, success: bool) -> Option<FeedbackMessage> {
    match target {
        InteractionTarget::Nothing => Some(FeedbackMessage::info("nothing nearby")),
        InteractionTarget::Resource(resource) => {
            if success {
                // Deposits can't be collected directly
                log::warn!("Interaction with a {resource} deposit reported success");
                None
            } else {
                Some(FeedbackMessage::error(format!(
                    "need a building for {resource}"
                )))
            }
        }
        InteractionTarget::Building(building) => Some(building_outcome(building, success)),
    }
}

fn building_outcome(building: BuildingType, success: bool) -> FeedbackMessage {
    use BuildingType::*;
    match (building, success) {
        (Market, true) => FeedbackMessage::success("resources sold"),
        (Market, false) => FeedbackMessage::warning("no resources to sell"),
        (Refinery, true) => FeedbackMessage::success("oil processed to fuel"),
        (Refinery, false) => FeedbackMessage::warning("need oil in cargo"),
        (OilPlatform, true) => FeedbackMessage::success("oil collected"),
        (OilPlatform, false) => FeedbackMessage::warning("cargo full"),
        (CobaltEnrichment, true) => FeedbackMessage::success("cobalt processed"),
        (CobaltEnrichment, false) => FeedbackMessage::warning("need cobalt in cargo"),
        (Warehouse, true) => FeedbackMessage::success(format!("interacted with {building}")),
        (Warehouse, false) => FeedbackMessage::error("interaction not possible"),
    }
}

#[cfg(test)]
mod tests {
    use super::{InteractionTarget, outcome, resolve};
    use crate::{
        data::{building::BuildingType, resource::ResourceType},
        feedback::Severity,
        math::WorldPos,
        state::{player::Player, world::World},
    };

    fn check(target: InteractionTarget, success: bool, text: &str, severity: Severity) {
        let message = outcome(target, success).unwrap();
        assert_eq!(message.text, text, "{target:?} / {success}");
        assert_eq!(message.severity, severity, "{target:?} / {success}");
    }

    #[test]
    fn test_outcome_table() {
        use BuildingType::*;
        use InteractionTarget::*;
        use Severity::*;

        check(Nothing, false, "nothing nearby", Info);
        check(Resource(ResourceType::Oil), false, "need a building for Oil", Error);
        check(Resource(ResourceType::Cobalt), false, "need a building for Cobalt", Error);
        check(Building(Market), true, "resources sold", Success);
        check(Building(Market), false, "no resources to sell", Warning);
        check(Building(Refinery), true, "oil processed to fuel", Success);
        check(Building(Refinery), false, "need oil in cargo", Warning);
        check(Building(OilPlatform), true, "oil collected", Success);
        check(Building(OilPlatform), false, "cargo full", Warning);
        check(Building(CobaltEnrichment), true, "cobalt processed", Success);
        check(Building(CobaltEnrichment), false, "need cobalt in cargo", Warning);
        check(Building(Warehouse), true, "interacted with Warehouse", Success);
        check(Building(Warehouse), false, "interaction not possible", Error);
    }

    #[test]
    fn test_resource_success_is_unreachable() {
        assert!(outcome(InteractionTarget::Resource(ResourceType::Oil), true).is_none());
    }

    #[test]
    fn test_resolve_with_nothing_nearby_leaves_state() {
        let mut world = World::new(1000.);
        let mut player = Player::new(WorldPos::new(500., 1.8, 500.), 15., 1.);
        player.ship_mut().cargo[ResourceType::Oil] = 4;
        player.refresh_nearby(&world);

        let message = resolve(&mut player, &mut world).unwrap();
        assert_eq!(message.text, "nothing nearby");
        assert_eq!(message.severity, Severity::Info);
        assert_eq!(player.ship().cargo[ResourceType::Oil], 4);
        assert_eq!(player.credits, 0);
    }

    #[test]
    fn test_resolve_uses_nearest() {
        let mut world = World::new(1000.);
        world.spawn_building(BuildingType::Market, WorldPos::on_plane(510., 500.));
        world.spawn_building(BuildingType::Refinery, WorldPos::on_plane(504., 500.));
        let mut player = Player::new(WorldPos::new(500., 1.8, 500.), 15., 1.);
        player.ship_mut().cargo[ResourceType::Oil] = 4;
        player.refresh_nearby(&world);

        let message = resolve(&mut player, &mut world).unwrap();
        assert_eq!(message.text, "oil processed to fuel");
        assert_eq!(player.ship().cargo[ResourceType::Fuel], 4);
    }

    #[test]
    fn test_resolve_deposit() {
        let mut world = World::new(1000.);
        world.spawn_deposit(ResourceType::Oil, WorldPos::on_plane(502., 500.));
        let mut player = Player::new(WorldPos::new(500., 1.8, 500.), 15., 1.);
        player.refresh_nearby(&world);

        let message = resolve(&mut player, &mut world).unwrap();
        assert_eq!(message.text, "need a building for Oil");
        assert_eq!(message.severity, Severity::Error);
    }
}
