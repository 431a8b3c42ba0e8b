//! 2D orthographic camera for the oscillator scenes

use glam::{Mat4, Vec2, Vec3};

/// 2D orthographic camera.
///
/// `zoom` is the half-height of the visible area in world units.
#[derive(Debug, Clone)]
pub struct Camera2D {
    pub position: Vec3,
    pub zoom: f32,
    pub aspect_ratio: f32,
}

impl Camera2D {
    pub fn new(aspect_ratio: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            zoom: 1.0,
            aspect_ratio,
        }
    }

    /// Get the view-projection matrix
    pub fn view_projection(&self) -> Mat4 {
        let half_width = self.zoom * self.aspect_ratio;
        let half_height = self.zoom;

        let projection = Mat4::orthographic_rh(
            -half_width,
            half_width,
            -half_height,
            half_height,
            -1.0,
            1.0,
        );

        let view = Mat4::from_translation(-self.position);

        projection * view
    }

    pub fn update_aspect_ratio(&mut self, aspect_ratio: f32) {
        self.aspect_ratio = aspect_ratio;
    }

    /// Center on the box `[min, max]` and zoom out until it fits with `margin`
    /// world units to spare on every side.
    pub fn frame(&mut self, min: Vec2, max: Vec2, margin: f32) {
        let center = (min + max) * 0.5;
        let half = (max - min) * 0.5 + Vec2::splat(margin);
        self.position = center.extend(0.0);
        self.zoom = half.y.max(half.x / self.aspect_ratio.max(f32::EPSILON));
    }
}

/// Camera uniform data for shaders
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

impl CameraUniform {
    pub fn from_camera_2d(camera: &Camera2D) -> Self {
        Self {
            view_proj: camera.view_projection().to_cols_array_2d(),
            position: [camera.position.x, camera.position.y, camera.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_fits_tall_box() {
        let mut camera = Camera2D::new(2.0);
        camera.frame(Vec2::new(-10.0, -500.0), Vec2::new(10.0, 0.0), 20.0);
        assert_eq!(camera.position, Vec3::new(0.0, -250.0, 0.0));
        assert_eq!(camera.zoom, 270.0);
    }

    #[test]
    fn test_frame_fits_wide_box() {
        let mut camera = Camera2D::new(1.0);
        camera.frame(Vec2::new(-600.0, -10.0), Vec2::new(600.0, 10.0), 0.0);
        assert_eq!(camera.zoom, 600.0);
    }

    #[test]
    fn test_projection_maps_frame_to_clip_space() {
        let mut camera = Camera2D::new(1.0);
        camera.frame(Vec2::new(-100.0, -100.0), Vec2::new(100.0, 100.0), 0.0);
        let corner = camera.view_projection().project_point3(Vec3::new(100.0, 100.0, 0.0));
        assert!((corner.x - 1.0).abs() < 1e-5);
        assert!((corner.y - 1.0).abs() < 1e-5);
    }
}
