// Render-facing state: camera, sprites and per-instance data
//
// Drawing itself lives outside the game core. This module only produces what
// a renderer consumes each frame.

mod camera;
mod sprite;

pub use camera::{CameraSettings, ScrollingCamera};
pub use sprite::{Sprite, SpriteInstance};
