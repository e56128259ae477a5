use glam::{Mat4, Vec3};

pub const FOV_Y_DEGREES: f32 = 75.0;
pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 1000.0;
pub const STANDOFF: f32 = 5.0;

/// Perspective camera looking at the origin from a fixed standoff on +z.
///
/// Only the aspect ratio ever changes after construction; it must track the
/// render surface exactly so the projection stays non-distorted through
/// resizes.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub aspect: f32,
}

impl Camera {
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, STANDOFF),
            aspect: if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 },
        }
    }

    /// Track a new surface extent. Zero extents are ignored (minimized
    /// windows report them).
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn view_proj(&self) -> Mat4 {
        let proj = Mat4::perspective_rh(
            FOV_Y_DEGREES.to_radians(),
            self.aspect,
            NEAR_PLANE,
            FAR_PLANE,
        );
        let view = Mat4::look_at_rh(self.position, Vec3::ZERO, Vec3::Y);
        proj * view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn camera_stands_off_on_z() {
        let camera = Camera::new(16.0 / 9.0);
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
    }

    #[test]
    fn viewport_updates_aspect() {
        let mut camera = Camera::new(1.0);
        camera.set_viewport(1920, 1080);
        assert!((camera.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn zero_viewport_is_ignored() {
        let mut camera = Camera::new(2.0);
        camera.set_viewport(0, 600);
        camera.set_viewport(800, 0);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn origin_projects_to_screen_center() {
        let camera = Camera::new(1.5);
        let clip = camera.view_proj() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;
        assert!(ndc_x.abs() < 1e-5);
        assert!(ndc_y.abs() < 1e-5);
    }

    #[test]
    fn point_behind_far_plane_clips() {
        let camera = Camera::new(1.0);
        let clip = camera.view_proj() * Vec4::new(0.0, 0.0, -2000.0, 1.0);
        assert!(clip.z > clip.w);
    }
}
