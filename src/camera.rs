use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Quat, Vec3};

/// Per-draw camera block: where the eye sits and how world space maps to
/// clip space. Immutable for the duration of a draw call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub view_proj: Mat4,
}

impl Camera {
    /// Uniform bind layout for the camera block, bound once per draw.
    pub const BIND_LAYOUT: wgpu::BindGroupLayoutDescriptor<'static> =
        wgpu::BindGroupLayoutDescriptor {
            label: Some("camera-bind-layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        };

    /// Builds a perspective camera from an eye transform. `fovy` is the
    /// vertical field of view in degrees; the projection targets wgpu's
    /// zero-to-one depth range.
    pub fn perspective(
        position: Vec3,
        rotation: Quat,
        aspect: f32,
        fovy: f32,
        znear: f32,
        zfar: f32,
    ) -> Self {
        let view = (Mat4::from_translation(position) * Mat4::from_quat(rotation)).inverse();
        let proj = Mat4::perspective_rh(fovy.to_radians(), aspect, znear, zfar);
        Self {
            position,
            view_proj: proj * view,
        }
    }

    /// Packs the block for upload.
    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_proj: self.view_proj.to_cols_array_2d(),
            position: self.position.extend(1.0).into(),
        }
    }
}

/// Wire layout of the camera block.
#[repr(C)]
#[derive(Debug, Clone, Copy, Pod, Zeroable)]
pub struct CameraUniform {
    pub view_proj: [[f32; 4]; 4],
    pub position: [f32; 4],
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    #[test]
    fn forward_point_lands_in_front_of_the_camera() {
        let camera = Camera::perspective(Vec3::ZERO, Quat::IDENTITY, 1.0, 60.0, 0.1, 100.0);
        // -Z is forward for an identity rotation.
        let clip = camera.view_proj * Vec4::new(0.0, 0.0, -5.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(clip.w > 0.0);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
        assert!(ndc.x.abs() < 1e-5 && ndc.y.abs() < 1e-5);
    }

    #[test]
    fn uniform_carries_position_with_unit_w() {
        let camera = Camera::perspective(Vec3::new(1.0, 2.0, 3.0), Quat::IDENTITY, 1.0, 45.0, 0.1, 10.0);
        let uniform = camera.uniform();
        assert_eq!(uniform.position, [1.0, 2.0, 3.0, 1.0]);
    }

    #[test]
    fn translated_camera_recenters_the_world() {
        let camera =
            Camera::perspective(Vec3::new(0.0, 0.0, 5.0), Quat::IDENTITY, 1.0, 60.0, 0.1, 100.0);
        let clip = camera.view_proj * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0, "origin should sit in front of the camera");
    }
}
