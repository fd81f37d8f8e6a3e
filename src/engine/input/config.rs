// Per-player key tables

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Key table of one player
///
/// Several keys may trigger the same action, but a key triggers at most one.
#[derive(Debug, Clone)]
pub struct InputConfig {
    player_id: usize,
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// Create a config holding this player's default key table
    pub fn with_defaults(player_id: usize) -> Self {
        Self {
            player_id,
            bindings: default_bindings(player_id).into_iter().collect(),
        }
    }

    pub fn player_id(&self) -> usize {
        self.player_id
    }

    pub fn get_action(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }
}

/// Key tables for every player sharing the keyboard
#[derive(Debug)]
pub struct InputConfigManager {
    configs: Vec<InputConfig>,
}

impl InputConfigManager {
    /// Create a config manager with the default table for `players` players
    pub fn new(players: usize) -> Self {
        Self {
            configs: (0..players).map(InputConfig::with_defaults).collect(),
        }
    }

    /// First player (lowest id) whose bindings claim `source`, with the action
    pub fn resolve(&self, source: InputSource) -> Option<(usize, Action)> {
        self.configs
            .iter()
            .find_map(|config| config.get_action(source).map(|a| (config.player_id(), a)))
    }
}

impl Default for InputConfigManager {
    fn default() -> Self {
        Self::new(super::action::DEFAULT_PLAYER_COUNT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winit::keyboard::KeyCode;

    #[test]
    fn test_default_table() {
        let config = InputConfig::with_defaults(1);
        assert_eq!(config.player_id(), 1);
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyW)),
            Some(Action::Jump)
        );
        assert_eq!(
            config.get_action(InputSource::key(KeyCode::KeyS)),
            Some(Action::Freeze)
        );
        assert_eq!(config.get_action(InputSource::key(KeyCode::ArrowUp)), None);
    }

    #[test]
    fn test_slot_without_table_binds_nothing() {
        let config = InputConfig::with_defaults(5);
        assert_eq!(config.get_action(InputSource::key(KeyCode::KeyA)), None);
    }

    #[test]
    fn test_manager_resolves_player() {
        let manager = InputConfigManager::default();
        assert_eq!(
            manager.resolve(InputSource::key(KeyCode::ArrowDown)),
            Some((0, Action::Freeze))
        );
        assert_eq!(
            manager.resolve(InputSource::key(KeyCode::KeyL)),
            Some((2, Action::MoveRight))
        );
        assert_eq!(manager.resolve(InputSource::key(KeyCode::KeyZ)), None);
    }

    #[test]
    fn test_fewer_players_leave_keys_unclaimed() {
        let manager = InputConfigManager::new(1);
        assert_eq!(
            manager.resolve(InputSource::key(KeyCode::ArrowLeft)),
            Some((0, Action::MoveLeft))
        );
        assert_eq!(manager.resolve(InputSource::key(KeyCode::KeyA)), None);
    }
}
