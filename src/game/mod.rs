// Game modules: entities, collision bookkeeping, level streaming and the match session
//
// ## Architecture
//
// - `entity`: Physics body + sprite shared by runners and platforms
// - `runner` / `platform`: The two kinds of entity
// - `entities`: Id-keyed store; colliders map back to entities through it
// - `collision_policy`: Applies contact events to runner support state
// - `chunk` / `streamer`: Level patterns and the chunk queue
// - `session`: The per-match context driven by the host loop

pub mod chunk;
pub mod collision_policy;
pub mod config;
pub mod entities;
pub mod entity;
pub mod error;
pub mod platform;
pub mod player;
pub mod runner;
pub mod session;
pub mod streamer;

// Re-export commonly used types
pub use config::MatchConfig;
pub use session::{GameSession, MatchStatus, Score};
