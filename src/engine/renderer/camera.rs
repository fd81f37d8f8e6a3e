// Scrolling camera and drop line

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2};

/// Camera parameters at the start of a match
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// World x of the left edge when the match starts
    pub start_left: f32,
    /// World y of the bottom edge
    pub start_bottom: f32,
    /// Logical view width in world units
    pub width: f32,
    /// Logical view height in world units
    pub height: f32,
    /// Seconds before the camera starts moving
    pub scroll_delay: f32,
    /// Initial scroll speed (units/second)
    pub scroll_rate: f32,
    /// Scroll speed gained per second of scrolling
    pub scroll_acceleration: f32,
    /// World x of the drop line when the match starts
    pub drop_line_start: f32,
}

/// 2D orthographic camera that pans right at an accelerating rate
///
/// The drop line moves with the camera; anything behind it is released to
/// fall out of the level.
#[derive(Debug, Clone)]
pub struct ScrollingCamera {
    /// Bottom-left corner of the view in world space
    pub position: Vec2,
    width: f32,
    height: f32,
    scroll_delay: f32,
    scroll_rate: f32,
    scroll_acceleration: f32,
    drop_line: f32,
}

impl ScrollingCamera {
    pub fn new(settings: CameraSettings) -> Self {
        Self {
            position: Vec2::new(settings.start_left, settings.start_bottom),
            width: settings.width,
            height: settings.height,
            scroll_delay: settings.scroll_delay,
            scroll_rate: settings.scroll_rate,
            scroll_acceleration: settings.scroll_acceleration,
            drop_line: settings.drop_line_start,
        }
    }

    /// Advance the camera by one frame, returning the distance scrolled
    ///
    /// While the start delay runs down nothing moves; the part of `dt` that
    /// overshoots the delay is scrolled in the same frame.
    pub fn scroll(&mut self, dt: f32) -> f32 {
        let dscroll = if self.scroll_delay > 0.0 {
            self.scroll_delay -= dt;
            (-self.scroll_delay).max(0.0)
        } else {
            dt
        };

        self.scroll_rate += self.scroll_acceleration * dscroll;

        let distance = dscroll * self.scroll_rate;
        self.position.x += distance;
        self.drop_line += distance;
        distance
    }

    pub fn left(&self) -> f32 {
        self.position.x
    }

    pub fn right(&self) -> f32 {
        self.position.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.position.y
    }

    pub fn top(&self) -> f32 {
        self.position.y + self.height
    }

    /// World x behind which runners and platforms are released
    pub fn drop_line(&self) -> f32 {
        self.drop_line
    }

    pub fn scroll_rate(&self) -> f32 {
        self.scroll_rate
    }

    /// Whether the start delay is still running
    pub fn is_waiting(&self) -> bool {
        self.scroll_delay > 0.0
    }

    /// Orthographic view-projection matrix for the current view
    pub fn view_proj_matrix(&self) -> Mat4 {
        Mat4::orthographic_rh(
            self.left(),
            self.right(),
            self.bottom(),
            self.top(),
            -100.0, // Near plane
            100.0,  // Far plane
        )
    }

    /// Get the viewport bounds in world coordinates
    pub fn viewport_bounds(&self) -> Viewport {
        Viewport {
            min: Vec2::new(self.left(), self.bottom()),
            max: Vec2::new(self.right(), self.top()),
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj_matrix().to_cols_array_2d(),
        }
    }
}

/// Viewport bounds in world coordinates
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub min: Vec2,
    pub max: Vec2,
}

impl Viewport {
    /// Check if a rectangle intersects the viewport
    pub fn intersects_rect(&self, center: Vec2, half_size: Vec2) -> bool {
        let rect_min = center - half_size;
        let rect_max = center + half_size;

        rect_max.x >= self.min.x
            && rect_min.x <= self.max.x
            && rect_max.y >= self.min.y
            && rect_min.y <= self.max.y
    }
}

/// Camera uniform for GPU
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn settings() -> CameraSettings {
        CameraSettings {
            start_left: -200.0,
            start_bottom: -32.0,
            width: 900.0,
            height: 480.0,
            scroll_delay: 2.0,
            scroll_rate: 10.0,
            scroll_acceleration: 0.4,
            drop_line_start: -150.0,
        }
    }

    #[test]
    fn test_initial_bounds() {
        let camera = ScrollingCamera::new(settings());
        assert_eq!(camera.left(), -200.0);
        assert_eq!(camera.right(), 700.0);
        assert_eq!(camera.top(), 448.0);
        assert_eq!(camera.drop_line(), -150.0);
    }

    #[test]
    fn test_no_scroll_during_delay() {
        let mut camera = ScrollingCamera::new(settings());
        assert_eq!(camera.scroll(1.0), 0.0);
        assert_eq!(camera.left(), -200.0);
        assert!(camera.is_waiting());
    }

    #[test]
    fn test_delay_overshoot_scrolls() {
        let mut camera = ScrollingCamera::new(settings());
        camera.scroll(1.5);
        // 0.5s of delay left, 1.0s frame: 0.5s of it scrolls
        let moved = camera.scroll(1.0);
        let rate = 10.0 + 0.4 * 0.5;
        assert_relative_eq!(moved, 0.5 * rate, epsilon = 1e-4);
        assert_relative_eq!(camera.drop_line(), -150.0 + 0.5 * rate, epsilon = 1e-4);
        assert!(!camera.is_waiting());
    }

    #[test]
    fn test_scroll_accelerates() {
        let mut settings = settings();
        settings.scroll_delay = 0.0;
        let mut camera = ScrollingCamera::new(settings);

        let first = camera.scroll(1.0);
        let second = camera.scroll(1.0);
        assert!(second > first);
        assert_relative_eq!(camera.scroll_rate(), 10.8, epsilon = 1e-4);
    }

    #[test]
    fn test_drop_line_keeps_pace_with_camera() {
        let mut settings = settings();
        settings.scroll_delay = 0.0;
        let mut camera = ScrollingCamera::new(settings);
        for _ in 0..100 {
            camera.scroll(0.016);
        }
        assert_relative_eq!(camera.drop_line() - camera.left(), 50.0, epsilon = 1e-2);
    }

    #[test]
    fn test_viewport_culls_offscreen_rects() {
        let camera = ScrollingCamera::new(settings());
        let viewport = camera.viewport_bounds();
        let half = Vec2::splat(16.0);
        assert!(viewport.intersects_rect(Vec2::new(0.0, 0.0), half));
        assert!(!viewport.intersects_rect(Vec2::new(-300.0, 0.0), half));
    }

    #[test]
    fn test_uniform_maps_view_to_clip_space() {
        let camera = ScrollingCamera::new(settings());
        let view_proj = Mat4::from_cols_array_2d(&camera.uniform().view_proj);

        let bottom_left = view_proj.project_point3(glam::Vec3::new(-200.0, -32.0, 0.0));
        assert_relative_eq!(bottom_left.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(bottom_left.y, -1.0, epsilon = 1e-5);

        let top_right = view_proj.project_point3(glam::Vec3::new(700.0, 448.0, 0.0));
        assert_relative_eq!(top_right.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(top_right.y, 1.0, epsilon = 1e-5);
    }
}
