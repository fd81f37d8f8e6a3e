// RGB colour arithmetic for runner and platform tints

use glam::{Vec3, Vec4};

/// Linear RGB colour, one `f32` per channel (1.0 = full intensity)
///
/// Channels are not clamped here: tints can push a platform outside the
/// 0..1 range and clamping is left to whoever draws it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(Vec3);

pub const WHITE: Color = Color::new(1.0, 1.0, 1.0);
pub const RED: Color = Color::new(1.0, 0.25, 0.25);
pub const BLUE: Color = Color::new(0.25, 0.25, 1.0);
pub const YELLOW: Color = Color::new(1.0, 1.0, 0.25);

impl Color {
    pub const fn new(red: f32, green: f32, blue: f32) -> Self {
        Self(Vec3::new(red, green, blue))
    }

    /// Grey colour with the same value in every channel
    pub const fn grey(brightness: f32) -> Self {
        Self::new(brightness, brightness, brightness)
    }

    pub fn red(&self) -> f32 {
        self.0.x
    }

    pub fn green(&self) -> f32 {
        self.0.y
    }

    pub fn blue(&self) -> f32 {
        self.0.z
    }

    /// `1 - channel` for every channel
    pub fn invert(&self) -> Self {
        Self(Vec3::ONE - self.0)
    }

    /// Shift every channel by the same amount (positive brightens)
    pub fn fade(&self, amount: f32) -> Self {
        Self(self.0 + Vec3::splat(amount))
    }

    /// Channel-wise subtraction
    pub fn subtract(&self, other: Color) -> Self {
        Self(self.0 - other.0)
    }

    /// RGBA with the given alpha, as consumed by the renderer
    pub fn to_rgba(&self, alpha: f32) -> Vec4 {
        self.0.extend(alpha)
    }
}

impl Default for Color {
    fn default() -> Self {
        WHITE
    }
}
