// Engine modules: physics, input, frame timing and render-facing state

pub mod game_loop;
pub mod input;
pub mod physics;
pub mod renderer;
