use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::systems::picking::Ray;

/// Perspective camera with a position and a look-at point.
/// Uses OpenGL clip conventions (NDC z in [-1, 1]) to match the host's WebGL
/// renderer.
#[derive(Debug, Clone)]
pub struct PerspectiveCamera {
    /// Eye position in world space.
    pub position: Vec3,
    /// Point the camera is aimed at.
    look_target: Vec3,
    /// Vertical field of view in degrees.
    pub fovy_degrees: f32,
    /// Viewport width / height.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

/// GPU-side uniform data for the camera.
/// Wire format (20 floats): column-major view-projection matrix, then eye xyz + pad.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub eye: [f32; 4],
}

impl CameraUniform {
    pub const FLOATS: usize = 20;
}

impl PerspectiveCamera {
    pub fn new(fovy_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            position: Vec3::Z,
            look_target: Vec3::ZERO,
            fovy_degrees,
            aspect,
            near,
            far,
        }
    }

    /// Update the aspect ratio after the render surface changed size.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }

    /// Aim the camera at a world-space point.
    pub fn look_at(&mut self, target: Vec3) {
        self.look_target = target;
    }

    pub fn look_target(&self) -> Vec3 {
        self.look_target
    }

    /// Unit viewing direction. Falls back to -Z when eye and target coincide.
    pub fn forward(&self) -> Vec3 {
        let dir = (self.look_target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            Vec3::NEG_Z
        } else {
            dir
        }
    }

    /// World up, except when looking straight along Y: then the screen's up
    /// is -Z looking down and +Z looking up.
    fn up(&self) -> Vec3 {
        let forward = self.forward();
        if forward.cross(Vec3::Y).length_squared() < 1e-10 {
            Vec3::new(0.0, 0.0, forward.y.signum())
        } else {
            Vec3::Y
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_to_rh(self.position, self.forward(), self.up())
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(self.fovy_degrees.to_radians(), self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Project a world point to normalized device coordinates.
    pub fn world_to_ndc(&self, point: Vec3) -> Vec3 {
        self.view_projection().project_point3(point)
    }

    /// Build the picking ray through a point given in normalized device
    /// coordinates (x right, y up, both in [-1, 1]).
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let through = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, through - self.position)
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_projection().to_cols_array_2d(),
            eye: [self.position.x, self.position.y, self.position.z, 1.0],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn top_down() -> PerspectiveCamera {
        let mut cam = PerspectiveCamera::new(75.0, 1.5, 0.1, 2000.0);
        cam.position = Vec3::new(0.0, 100.0, 0.0);
        cam.look_at(Vec3::ZERO);
        cam
    }

    #[test]
    fn look_target_projects_to_center() {
        let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 2000.0);
        cam.position = Vec3::new(27.0, 5.0, 5.0);
        cam.look_at(Vec3::new(22.0, 0.0, 0.0));
        let ndc = cam.world_to_ndc(Vec3::new(22.0, 0.0, 0.0));
        assert!(ndc.x.abs() < 1e-4 && ndc.y.abs() < 1e-4, "ndc = {ndc:?}");
    }

    #[test]
    fn top_down_view_has_x_right_and_neg_z_up() {
        let cam = top_down();
        let right = cam.world_to_ndc(Vec3::new(10.0, 0.0, 0.0));
        let up = cam.world_to_ndc(Vec3::new(0.0, 0.0, -10.0));
        assert!(right.x > 0.0 && right.y.abs() < 1e-4);
        assert!(up.y > 0.0 && up.x.abs() < 1e-4);
        assert!(cam.view_matrix().is_finite());
    }

    #[test]
    fn center_ray_points_at_target() {
        let cam = top_down();
        let ray = cam.ray_from_ndc(Vec2::ZERO);
        assert_eq!(ray.origin, cam.position);
        assert!((ray.direction - Vec3::NEG_Y).length() < 1e-4);
    }

    #[test]
    fn ray_passes_through_projected_point() {
        let cam = top_down();
        let world = Vec3::new(22.0, 0.0, 0.0);
        let ndc = cam.world_to_ndc(world);
        let ray = cam.ray_from_ndc(Vec2::new(ndc.x, ndc.y));
        let t = (world - ray.origin).length();
        assert!((ray.at(t) - world).length() < 1e-2);
    }

    #[test]
    fn set_viewport_updates_aspect() {
        let mut cam = top_down();
        cam.set_viewport(1920.0, 1080.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
        cam.set_viewport(100.0, 0.0);
        assert!((cam.aspect - 1920.0 / 1080.0).abs() < 1e-6);
    }

    #[test]
    fn uniform_carries_eye() {
        let u = top_down().uniform();
        assert_eq!(u.eye, [0.0, 100.0, 0.0, 1.0]);
        assert_eq!(std::mem::size_of::<CameraUniform>(), CameraUniform::FLOATS * 4);
    }
}
