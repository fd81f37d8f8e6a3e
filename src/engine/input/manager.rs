// Input manager - turns raw key events into per-player actions

use super::action::{Action, InputSource};
use super::config::InputConfigManager;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// A key press or release already routed to one player
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub player_id: usize,
    pub action: Action,
    pub pressed: bool,
}

/// Routes keyboard input to the player whose bindings claim the key
pub struct InputManager {
    config: InputConfigManager,
}

impl InputManager {
    /// Create an input manager with default bindings for `players` players
    pub fn new(players: usize) -> Self {
        Self {
            config: InputConfigManager::new(players),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&self, event: &KeyEvent) -> Option<InputEvent> {
        // Only process physical key presses
        match event.physical_key {
            PhysicalKey::Code(key_code) => self.process_key(key_code, event.state, event.repeat),
            PhysicalKey::Unidentified(_) => None,
        }
    }

    /// Route a single key transition. Key repeats are dropped.
    pub fn process_key(
        &self,
        key_code: KeyCode,
        state: ElementState,
        repeat: bool,
    ) -> Option<InputEvent> {
        if repeat {
            return None;
        }

        let (player_id, action) = self.config.resolve(InputSource::key(key_code))?;
        Some(InputEvent {
            player_id,
            action,
            pressed: state == ElementState::Pressed,
        })
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(super::action::DEFAULT_PLAYER_COUNT)
    }
}
