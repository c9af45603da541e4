use std::{f32::consts::FRAC_PI_2, time::Duration};

use cgmath::{Angle, InnerSpace, Rad, Vector3};
use enum_map::EnumMap;
use hecs::Entity;
use itertools::Itertools;

use crate::{
    data::{
        building::BuildingType,
        resource::ResourceType,
        ship::{SHIP_DATA, ShipType},
    },
    input::MovementInput,
    math::WorldPos,
    state::world::World,
};

/// Eye height above the water
pub const EYE_HEIGHT: f32 = 1.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NearbyKind {
    Resource(ResourceType),
    Building(BuildingType),
}

/// Something close enough to the player to interact with
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyObject {
    pub kind: NearbyKind,
    pub handle: Entity,
    pub distance: f32,
}

#[derive(Debug, Clone)]
pub struct Ship {
    pub ship_type: ShipType,
    pub cargo: EnumMap<ResourceType, u32>,
}

impl Ship {
    pub fn new(ship_type: ShipType) -> Self {
        Self {
            ship_type,
            cargo: EnumMap::default(),
        }
    }

    pub fn cargo_total(&self) -> u32 {
        self.cargo.values().sum()
    }

    pub fn free_capacity(&self) -> u32 {
        self.ship_type
            .data()
            .cargo_capacity
            .saturating_sub(self.cargo_total())
    }

    /// Swap every unit of `from` for the same amount of `to`. Returns how many were converted
    fn convert(&mut self, from: ResourceType, to: ResourceType) -> u32 {
        let count = std::mem::take(&mut self.cargo[from]);
        self.cargo[to] += count;
        count
    }
}

/// Information about the player
pub struct Player {
    pub position: WorldPos,
    pub yaw: Rad<f32>,
    pub pitch: Rad<f32>,
    pub ships: Vec<Ship>,
    pub active_ship: usize,
    pub credits: u32,
    /// Rebuilt every tick, nearest first
    pub nearby_objects: Vec<NearbyObject>,
    pub interaction_radius: f32,
    turn_speed: f32,
}

impl Player {
    pub fn new(position: WorldPos, interaction_radius: f32, turn_speed: f32) -> Self {
        assert!(interaction_radius >= 0.);
        assert!(turn_speed >= 0.);

        Self {
            position,
            yaw: Rad(0.),
            pitch: Rad(0.),
            ships: SHIP_DATA.iter().map(|s| Ship::new(s.ship_type)).collect(),
            active_ship: 0,
            credits: 0,
            nearby_objects: vec![],
            interaction_radius,
            turn_speed,
        }
    }

    pub fn ship(&self) -> &Ship {
        &self.ships[self.active_ship]
    }

    pub fn ship_mut(&mut self) -> &mut Ship {
        &mut self.ships[self.active_ship]
    }

    /// Change the active ship. Slots without a ship are ignored
    pub fn switch_ship(&mut self, index: usize) {
        let Some(ship_type) = ShipType::from_slot(index).filter(|_| index < self.ships.len())
        else {
            log::debug!("No ship in slot {index}");
            return;
        };
        if index != self.active_ship {
            log::info!("Switched to {ship_type:?}");
        }
        self.active_ship = index;
    }

    /// Direction the player is facing, flattened onto the water
    pub fn forward(&self) -> Vector3<f32> {
        let (z, x) = self.yaw.sin_cos();
        Vector3::new(x, 0., z)
    }

    /// Turn the camera. delta is in normalised screen coordinates
    pub fn handle_mouse_movement(&mut self, delta: (f32, f32)) {
        self.yaw = (self.yaw + Rad(self.turn_speed * delta.0)).normalize();

        self.pitch -= Rad(self.turn_speed * delta.1);
        // Clip just under fully vertical
        self.pitch.0 = self.pitch.0.clamp(-FRAC_PI_2 * 0.99, FRAC_PI_2 * 0.99);
    }

    /// Move with the held keys at the active ship's speed, staying inside the world
    pub fn move_player(&mut self, dt: Duration, movement: &MovementInput, world_size: f32) {
        let forward = self.forward();
        let right = forward.cross(Vector3::unit_y()).normalize();

        let mut movement_vector = Vector3::new(0., 0., 0.);
        match (movement.left, movement.right) {
            (true, false) => movement_vector -= right,
            (false, true) => movement_vector += right,
            _ => {}
        }
        match (movement.forward, movement.backwards) {
            (true, false) => movement_vector += forward,
            (false, true) => movement_vector -= forward,
            _ => {}
        }
        if movement_vector.magnitude2() == 0. {
            return;
        }

        let speed = self.ship().ship_type.data().speed;
        movement_vector = movement_vector.normalize_to(speed * dt.as_secs_f32());

        let pos = &mut self.position.0;
        *pos += movement_vector;
        pos.x = pos.x.clamp(0., world_size);
        pos.z = pos.z.clamp(0., world_size);
    }

    /// Recompute everything within interaction range, nearest first. Equal distances keep
    /// the world's enumeration order, buildings before deposits.
    pub fn refresh_nearby(&mut self, world: &World) {
        let buildings = world
            .buildings()
            .map(|(e, b, pos)| (e, NearbyKind::Building(b), pos));
        let deposits = world
            .deposits()
            .map(|(e, r, pos)| (e, NearbyKind::Resource(r), pos));

        self.nearby_objects = buildings
            .chain(deposits)
            .map(|(handle, kind, pos)| NearbyObject {
                kind,
                handle,
                distance: self.position.planar_distance(&pos),
            })
            .filter(|o| o.distance < self.interaction_radius)
            .sorted_by(|a, b| a.distance.total_cmp(&b.distance))
            .collect();
    }

    /// Interact with the nearest object. Returns whether anything happened
    pub fn interact(&mut self, world: &mut World) -> bool {
        let Some(target) = self.nearby_objects.first().copied() else {
            return false;
        };

        match target.kind {
            // Deposits need a building to be worked
            NearbyKind::Resource(_) => false,
            NearbyKind::Building(building_type) => {
                self.interact_with_building(building_type, target.handle, world)
            }
        }
    }

    fn interact_with_building(
        &mut self,
        building_type: BuildingType,
        building: Entity,
        world: &mut World,
    ) -> bool {
        use BuildingType::*;
        match building_type {
            Market => {
                let ship = self.ship_mut();
                let earned = ship
                    .cargo
                    .iter_mut()
                    .map(|(resource, count)| resource.data().price * std::mem::take(count))
                    .sum::<u32>();
                self.credits += earned;
                earned > 0
            }
            Refinery => self.ship_mut().convert(ResourceType::Oil, ResourceType::Fuel) > 0,
            CobaltEnrichment => {
                self.ship_mut()
                    .convert(ResourceType::Cobalt, ResourceType::RefinedCobalt)
                    > 0
            }
            OilPlatform => {
                let free = self.ship().free_capacity();
                let Some(mut storage) = world.storage_mut(building) else {
                    return false;
                };
                let taken = storage.items[ResourceType::Oil].min(free);
                storage.items[ResourceType::Oil] -= taken;
                drop(storage);

                self.ship_mut().cargo[ResourceType::Oil] += taken;
                taken > 0
            }
            Warehouse => {
                let Some(mut storage) = world.storage_mut(building) else {
                    return false;
                };
                let mut stored = 0;
                self.ships[self.active_ship]
                    .cargo
                    .iter_mut()
                    .for_each(|(resource, count)| {
                        storage.items[resource] += *count;
                        stored += std::mem::take(count);
                    });
                stored > 0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use cgmath::Rad;

    use super::{NearbyKind, Player};
    use crate::{
        data::{building::BuildingType, resource::ResourceType},
        input::MovementInput,
        math::WorldPos,
        state::world::World,
    };

    fn player_at(x: f32, z: f32) -> Player {
        Player::new(WorldPos::new(x, 1.8, z), 15., 1.)
    }

    #[test]
    fn test_switch_ship_ignores_empty_slots() {
        let mut player = player_at(0., 0.);
        player.switch_ship(2);
        assert_eq!(player.active_ship, 2);
        player.switch_ship(7);
        assert_eq!(player.active_ship, 2);
    }

    #[test]
    fn test_nearby_sorted_and_filtered() {
        let mut world = World::new(1000.);
        let far = world.spawn_building(BuildingType::Market, WorldPos::on_plane(520., 500.));
        let near = world.spawn_building(BuildingType::Refinery, WorldPos::on_plane(505., 500.));
        let deposit = world.spawn_deposit(ResourceType::Oil, WorldPos::on_plane(500., 508.));

        let mut player = player_at(500., 500.);
        player.refresh_nearby(&world);

        let handles = player.nearby_objects.iter().map(|o| o.handle).collect::<Vec<_>>();
        assert_eq!(handles, [near, deposit]);
        assert!(!handles.contains(&far));
        assert_eq!(player.nearby_objects[1].kind, NearbyKind::Resource(ResourceType::Oil));
    }

    #[test]
    fn test_market_sells_cargo() {
        let mut world = World::new(1000.);
        world.spawn_building(BuildingType::Market, WorldPos::on_plane(505., 500.));
        let mut player = player_at(500., 500.);
        player.ship_mut().cargo[ResourceType::Oil] = 10;
        player.ship_mut().cargo[ResourceType::Fuel] = 1;
        player.refresh_nearby(&world);

        assert!(player.interact(&mut world));
        assert_eq!(player.credits, 10 * 4 + 10);
        assert_eq!(player.ship().cargo_total(), 0);

        assert!(!player.interact(&mut world));
    }

    #[test]
    fn test_refinery_converts_oil() {
        let mut world = World::new(1000.);
        world.spawn_building(BuildingType::Refinery, WorldPos::on_plane(505., 500.));
        let mut player = player_at(500., 500.);
        player.refresh_nearby(&world);

        assert!(!player.interact(&mut world));

        player.ship_mut().cargo[ResourceType::Oil] = 5;
        assert!(player.interact(&mut world));
        assert_eq!(player.ship().cargo[ResourceType::Oil], 0);
        assert_eq!(player.ship().cargo[ResourceType::Fuel], 5);
    }

    #[test]
    fn test_oil_platform_fills_free_capacity() {
        let mut world = World::new(1000.);
        let platform =
            world.spawn_building(BuildingType::OilPlatform, WorldPos::on_plane(505., 500.));
        world.storage_mut(platform).unwrap().items[ResourceType::Oil] = 50;

        let mut player = player_at(500., 500.);
        // Scout holds 20
        player.ship_mut().cargo[ResourceType::Cobalt] = 5;
        player.refresh_nearby(&world);

        assert!(player.interact(&mut world));
        assert_eq!(player.ship().cargo[ResourceType::Oil], 15);
        assert_eq!(world.storage(platform).unwrap().items[ResourceType::Oil], 35);

        // Hold is full now
        assert!(!player.interact(&mut world));
    }

    #[test]
    fn test_warehouse_stores_everything() {
        let mut world = World::new(1000.);
        let warehouse =
            world.spawn_building(BuildingType::Warehouse, WorldPos::on_plane(505., 500.));
        let mut player = player_at(500., 500.);
        player.ship_mut().cargo[ResourceType::Cobalt] = 3;
        player.refresh_nearby(&world);

        assert!(player.interact(&mut world));
        assert_eq!(world.storage(warehouse).unwrap().total(), 3);
        assert_eq!(player.ship().cargo_total(), 0);
    }

    #[test]
    fn test_deposits_never_succeed() {
        let mut world = World::new(1000.);
        world.spawn_deposit(ResourceType::Cobalt, WorldPos::on_plane(503., 500.));
        let mut player = player_at(500., 500.);
        player.refresh_nearby(&world);

        assert!(!player.interact(&mut world));
    }

    #[test]
    fn test_move_forward_at_ship_speed() {
        let mut player = player_at(500., 500.);
        player.yaw = Rad(0.);
        let movement = MovementInput {
            forward: true,
            ..Default::default()
        };

        player.move_player(Duration::from_secs(1), &movement, 1000.);
        assert!((player.position.0.x - 540.).abs() < 1e-3);
        assert!((player.position.0.z - 500.).abs() < 1e-3);
        assert_eq!(player.position.0.y, 1.8);
    }

    #[test]
    fn test_move_clamped_to_world() {
        let mut player = player_at(995., 500.);
        let movement = MovementInput {
            forward: true,
            ..Default::default()
        };

        player.move_player(Duration::from_secs(1), &movement, 1000.);
        assert_eq!(player.position.0.x, 1000.);
    }

    #[test]
    fn test_pitch_is_clamped() {
        let mut player = player_at(0., 0.);
        player.handle_mouse_movement((0., -100.));
        assert!(player.pitch.0 < std::f32::consts::FRAC_PI_2);
    }
}
