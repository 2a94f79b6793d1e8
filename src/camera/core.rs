use glam::{Mat4, Vec3};

/// Perspective camera defined by eye position, target, and projection
/// parameters.
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

/// GPU uniform buffer holding the view and projection matrices.
///
/// The matrices stay separate because the disc billboard pass offsets
/// vertices in view space, between the two transforms.
#[repr(C)]
#[derive(Debug, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct CameraUniform {
    /// World-to-view transform.
    pub view: [[f32; 4]; 4],
    /// View-to-clip transform.
    pub projection: [[f32; 4]; 4],
}

impl Camera {
    /// Build the world-to-view matrix.
    pub fn build_view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    /// Build the view-to-clip matrix.
    pub fn build_projection(&self) -> Mat4 {
        // perspective_rh already uses [0,1] depth range (wgpu/Vulkan
        // convention)
        Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        )
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraUniform {
    /// Create a new camera uniform with identity matrices.
    pub fn new() -> Self {
        Self {
            view: Mat4::IDENTITY.to_cols_array_2d(),
            projection: Mat4::IDENTITY.to_cols_array_2d(),
        }
    }

    /// Update both matrices from the given camera's current state.
    pub fn update(&mut self, camera: &Camera) {
        self.view = camera.build_view().to_cols_array_2d();
        self.projection = camera.build_projection().to_cols_array_2d();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn test_camera() -> Camera {
        Camera {
            eye: Vec3::new(0.0, 0.0, 15.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: 16.0 / 9.0,
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
        }
    }

    #[test]
    fn view_matrix_maps_eye_to_origin() {
        let camera = test_camera();
        let view = camera.build_view();

        let eye_in_view = view * camera.eye.extend(1.0);
        assert!(eye_in_view.truncate().length() < 1e-5);
    }

    #[test]
    fn target_projects_to_ndc_center() {
        let camera = test_camera();
        let clip = camera.build_projection()
            * camera.build_view()
            * camera.target.extend(1.0);
        let ndc = clip / clip.w;

        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn uniform_carries_separate_matrices() {
        let camera = test_camera();
        let mut uniform = CameraUniform::new();
        uniform.update(&camera);

        let view = Mat4::from_cols_array_2d(&uniform.view);
        let projection = Mat4::from_cols_array_2d(&uniform.projection);

        // Composing the uploaded matrices must match composing the
        // camera's own transforms.
        let expected =
            camera.build_projection() * camera.build_view() * Vec4::ONE;
        let actual = projection * view * Vec4::ONE;
        assert!((expected - actual).length() < 1e-4);

        // And they must not be pre-multiplied into one another.
        assert_ne!(uniform.view, uniform.projection);
    }
}
