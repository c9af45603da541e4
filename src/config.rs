use std::time::Duration;

use typed_builder::TypedBuilder;

/// Tunables for a game session
#[derive(Debug, Clone, TypedBuilder)]
pub struct GameConfig {
    /// Side length of the square world, in distance units
    #[builder(default = 1000.)]
    pub world_size: f32,
    /// How far the "nearby building" key looks for a building
    #[builder(default = 50.)]
    pub building_menu_radius: f32,
    /// How far away objects count as nearby for the interact key
    #[builder(default = 15.)]
    pub interaction_radius: f32,
    #[builder(default = Duration::from_secs(3))]
    pub feedback_lifetime: Duration,
    /// Maximum number of feedback messages shown at once, oldest are dropped first
    #[builder(default = Some(8))]
    pub feedback_capacity: Option<usize>,
    #[builder(default = 60)]
    pub target_fps: u32,
    /// Upper bound for a single frame's delta time
    #[builder(default = Duration::from_millis(250))]
    pub max_frame_delta: Duration,
    /// Radians of turn per normalised screen width of mouse travel
    #[builder(default = std::f32::consts::PI)]
    pub mouse_sensitivity: f32,
    /// Pixels per distance unit on the map view
    #[builder(default = 2.)]
    pub map_scale: f32,
    #[builder(default = 0xF1E1D)]
    pub world_seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl GameConfig {
    /// Minimum time between two frames
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs(1) / self.target_fps.max(1)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::GameConfig;

    #[test]
    fn test_defaults() {
        let config = GameConfig::default();
        assert_eq!(config.building_menu_radius, 50.);
        assert_eq!(config.feedback_lifetime, Duration::from_secs(3));
        assert_eq!(config.target_fps, 60);
    }

    #[test]
    fn test_frame_interval() {
        let config = GameConfig::builder().target_fps(50).build();
        assert_eq!(config.frame_interval(), Duration::from_millis(20));
    }
}
