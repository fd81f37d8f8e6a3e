// Game action definitions and mappings

use winit::keyboard::KeyCode;

/// Represents all possible in-game actions for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
    /// Turn the active runner into a checkpoint and split off a fresh one
    Freeze,
}

/// Represents an input source
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InputSource {
    Keyboard(KeyCode),
}

impl InputSource {
    /// Create a keyboard input source
    pub fn key(code: KeyCode) -> Self {
        Self::Keyboard(code)
    }
}

/// Number of players that share the keyboard by default
pub const DEFAULT_PLAYER_COUNT: usize = 3;

/// Default keyboard bindings for a player slot
///
/// Player 1 uses the arrow keys, player 2 WASD and player 3 IJKL. Up jumps,
/// down freezes. Slots past the third have no local bindings.
pub fn default_bindings(player_id: usize) -> Vec<(InputSource, Action)> {
    let keys = match player_id {
        0 => [
            KeyCode::ArrowLeft,
            KeyCode::ArrowRight,
            KeyCode::ArrowUp,
            KeyCode::ArrowDown,
        ],
        1 => [KeyCode::KeyA, KeyCode::KeyD, KeyCode::KeyW, KeyCode::KeyS],
        2 => [KeyCode::KeyJ, KeyCode::KeyL, KeyCode::KeyI, KeyCode::KeyK],
        _ => return Vec::new(),
    };

    let [left, right, jump, freeze] = keys;
    vec![
        (InputSource::key(left), Action::MoveLeft),
        (InputSource::key(right), Action::MoveRight),
        (InputSource::key(jump), Action::Jump),
        (InputSource::key(freeze), Action::Freeze),
    ]
}
