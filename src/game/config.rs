// Match configuration - one set of tuning values shared by every match

use crate::core::color::{Color, BLUE, RED, YELLOW};
use crate::engine::renderer::CameraSettings;

use super::error::GameError;

/// Tuning values for a match
///
/// World units are pixels; a level cell is `Platform::SIZE` wide.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchConfig {
    // Physics
    /// Vertical gravity (px/s²)
    pub gravity: f32,
    /// Fixed physics step (seconds)
    pub physics_timestep: f32,

    // Level
    /// Anything below this height is dead
    pub death_y: f32,
    /// How far past the camera's right edge terrain must already exist
    pub populate_padding: f32,

    // Camera
    pub camera: CameraSettings,

    // Players
    /// One player per colour, in order
    pub player_colors: &'static [Color],
    /// Vertical spacing between the initial runners
    pub spawn_spacing: f32,

    /// RNG seed for level generation; `None` draws from entropy
    pub seed: Option<u64>,
}

/// The values the game ships with
pub const BASE_CONFIG: MatchConfig = MatchConfig {
    gravity: -500.0,
    physics_timestep: 1.0 / 80.0,

    death_y: -80.0,
    populate_padding: 50.0,

    camera: CameraSettings {
        start_left: -200.0,
        start_bottom: -32.0,
        width: 900.0,
        height: 480.0,
        scroll_delay: 2.0,
        scroll_rate: 10.0,
        scroll_acceleration: 0.4,
        drop_line_start: -150.0,
    },

    player_colors: &[RED, BLUE, YELLOW],
    spawn_spacing: 50.0,

    seed: None,
};

impl Default for MatchConfig {
    fn default() -> Self {
        BASE_CONFIG
    }
}

impl MatchConfig {
    /// Same config with a fixed level seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), GameError> {
        let invalid = |msg: &str| Err(GameError::InvalidConfig(msg.to_string()));

        if !(self.physics_timestep > 0.0) {
            return invalid("physics timestep must be positive");
        }
        if self.camera.width <= 0.0 || self.camera.height <= 0.0 {
            return invalid("camera size must be positive");
        }
        if self.camera.scroll_delay < 0.0 {
            return invalid("scroll delay cannot be negative");
        }
        if self.populate_padding < 0.0 {
            return invalid("populate padding cannot be negative");
        }
        if self.player_colors.is_empty() {
            return invalid("at least one player is required");
        }
        if self.camera.drop_line_start >= self.camera.start_left + self.camera.width {
            return invalid("drop line must start inside or behind the view");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(MatchConfig::default().validate(), Ok(()));
        assert_eq!(MatchConfig::default().player_colors.len(), 3);
    }

    #[test]
    fn test_with_seed() {
        assert_eq!(MatchConfig::default().with_seed(9).seed, Some(9));
    }

    #[test]
    fn test_rejects_zero_timestep() {
        let mut config = MatchConfig::default();
        config.physics_timestep = 0.0;
        assert!(matches!(
            config.validate(),
            Err(GameError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_rejects_no_players() {
        let mut config = MatchConfig::default();
        config.player_colors = &[];
        assert!(config.validate().is_err());
    }
}
