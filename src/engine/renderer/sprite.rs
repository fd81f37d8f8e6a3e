// Renderable sprite state handed to the renderer

use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec4};

/// A 2D sprite for rendering
///
/// Game objects write their transform and colour here; the renderer reads it
/// each frame and never touches the simulation.
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    /// Center position in world space
    pub position: Vec2,
    /// Rotation in radians
    pub rotation: f32,
    /// Size in world units (width, height)
    pub size: Vec2,
    /// Color tint (RGBA, 1.0 = full color)
    pub color: Vec4,
}

impl Sprite {
    /// Create a new untinted sprite
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            rotation: 0.0,
            size,
            color: Vec4::ONE,
        }
    }

    /// Packed per-instance data for instanced drawing
    pub fn instance(&self) -> SpriteInstance {
        SpriteInstance {
            position: self.position.to_array(),
            size: self.size.to_array(),
            rotation: self.rotation,
            color: self.color.to_array(),
        }
    }
}

/// Per-instance vertex data for one sprite
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct SpriteInstance {
    pub position: [f32; 2],
    pub size: [f32; 2],
    pub rotation: f32,
    pub color: [f32; 4],
}
