// Input handling system
//
// Maps keyboard input to per-player game actions.
//
// ## Architecture
//
// - `action`: Defines game actions and the default key table
// - `config`: Per-player default key tables
// - `manager`: Routes winit key events to the player that owns the key
//
// ## Usage Example
//
// ```rust
// let input = InputManager::default();
//
// // In your event loop, process keyboard events
// if let Some(event) = input.process_keyboard_event(&key_event) {
//     session.handle_input(event.player_id, event.action, event.pressed)?;
// }
// ```

pub mod action;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use action::Action;
pub use manager::InputManager;
