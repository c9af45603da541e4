use hecs::Entity;

use crate::{CursorCapture, GameMode, data::building::BuildingType};

/// Which panels are open. These toggle independently of each other
#[derive(Debug, Default, Clone, PartialEq)]
pub struct UiFlags {
    pub building_menu_open: bool,
    /// Pointer clicks place a building instead of reaching the world
    pub building_mode: bool,
    /// Chosen from the build menu but not placed yet
    pub pending_building_type: Option<BuildingType>,
    pub ship_inventory_open: bool,
    /// The building whose interaction panel is open
    pub building_interaction: Option<Entity>,
}

impl UiFlags {
    pub fn building_interaction_open(&self) -> bool {
        self.building_interaction.is_some()
    }

    /// Whether some panel wants pointer clicks
    pub fn any_panel_active(&self) -> bool {
        self.building_menu_open
            || self.building_mode
            || self.ship_inventory_open
            || self.building_interaction_open()
    }

    /// Open panels stop the mouse from turning the camera. Placement mode doesn't
    pub fn blocks_camera_look(&self) -> bool {
        self.building_menu_open || self.ship_inventory_open || self.building_interaction_open()
    }
}

/// Mode and panel state for one game session
#[derive(Debug, Default)]
pub struct SessionState {
    pub mode: GameMode,
    pub ui: UiFlags,
}

impl SessionState {
    pub fn cursor(&self) -> CursorCapture {
        self.mode.cursor()
    }

    pub fn playing(&self) -> bool {
        self.mode == GameMode::Playing
    }

    /// Whether mouse motion should reach the camera
    pub fn camera_look_enabled(&self) -> bool {
        self.playing() && !self.ui.blocks_camera_look()
    }
}
