use crate::{
    data::building::BuildingType,
    feedback::FeedbackMessage,
    math::WorldPos,
    state::{session::UiFlags, world::World},
};

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlacementPhase {
    #[default]
    Idle,
    /// A type has been picked, waiting for a click
    Selecting(BuildingType),
    /// A click is being checked against the world. Only held inside `click`, which always
    /// settles back to `Selecting` or `Idle` before returning
    Confirming {
        building_type: BuildingType,
        pos: WorldPos,
    },
}

impl From<&UiFlags> for PlacementPhase {
    fn from(ui: &UiFlags) -> Self {
        match (ui.building_mode, ui.pending_building_type) {
            (true, Some(building_type)) => Self::Selecting(building_type),
            _ => Self::Idle,
        }
    }
}

/// The placement related flags at one point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacementSnapshot {
    pub building_mode: bool,
    pub pending_building_type: Option<BuildingType>,
}

impl From<&UiFlags> for PlacementSnapshot {
    fn from(ui: &UiFlags) -> Self {
        Self {
            building_mode: ui.building_mode,
            pending_building_type: ui.pending_building_type,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementOutcome {
    Placed(BuildingType),
    Rejected,
}

impl PlacementOutcome {
    /// Work out what a click did from the flags before and after it.
    ///
    /// Only a full exit from placement mode counts as a placement: the flag must have
    /// dropped AND the pending type must be gone. Anything half-cleared is a rejection.
    pub fn infer(before: PlacementSnapshot, after: PlacementSnapshot) -> Self {
        match before {
            PlacementSnapshot {
                building_mode: true,
                pending_building_type: Some(building_type),
            } if !after.building_mode && after.pending_building_type.is_none() => {
                Self::Placed(building_type)
            }
            _ => Self::Rejected,
        }
    }

    pub fn feedback(&self) -> FeedbackMessage {
        match self {
            Self::Placed(building_type) => {
                FeedbackMessage::success(format!("{building_type} placed"))
            }
            Self::Rejected => FeedbackMessage::error("cannot place building here"),
        }
    }
}

/// Drives building placement: pick a type, then click to put it down
#[derive(Debug, Default)]
pub struct PlacementController {
    phase: PlacementPhase,
}

impl PlacementController {
    pub fn phase(&self) -> PlacementPhase {
        self.phase
    }

    /// Enter placement mode for a type picked from the build menu
    pub fn select(&mut self, ui: &mut UiFlags, building_type: BuildingType) {
        log::debug!("Selected {building_type} for placement");
        ui.building_mode = true;
        ui.pending_building_type = Some(building_type);
        ui.building_menu_open = false;
        self.phase = PlacementPhase::from(&*ui);
    }

    /// Leave placement mode without placing anything. Returns whether it was active
    pub fn cancel(&mut self, ui: &mut UiFlags) -> bool {
        let was_active = ui.building_mode;
        ui.building_mode = false;
        ui.pending_building_type = None;
        self.phase = PlacementPhase::Idle;
        was_active
    }

    /// Try to put the pending building down at `pos`.
    ///
    /// The result of the world's placement call is cross-checked against the flag changes
    /// it caused. If they disagree the click counts as rejected.
    pub fn click(
        &mut self,
        ui: &mut UiFlags,
        world: &mut World,
        pos: WorldPos,
    ) -> PlacementOutcome {
        let before = PlacementSnapshot::from(&*ui);

        let reported = match PlacementPhase::from(&*ui) {
            PlacementPhase::Selecting(building_type) => {
                self.phase = PlacementPhase::Confirming { building_type, pos };
                if world.place_building(building_type, pos) {
                    ui.building_mode = false;
                    ui.pending_building_type = None;
                    PlacementOutcome::Placed(building_type)
                } else {
                    PlacementOutcome::Rejected
                }
            }
            _ => PlacementOutcome::Rejected,
        };

        let inferred = PlacementOutcome::infer(before, PlacementSnapshot::from(&*ui));
        self.phase = PlacementPhase::from(&*ui);

        if inferred != reported {
            log::warn!("Placement reported {reported:?} but flags say {inferred:?}");
            return PlacementOutcome::Rejected;
        }
        reported
    }
}
