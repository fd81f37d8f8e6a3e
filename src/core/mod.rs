// Core utilities shared by the engine and game layers

pub mod color;
pub mod math;
