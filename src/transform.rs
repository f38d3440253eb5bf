use glam::{Mat3, Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position, rotation and scale of a single drawable instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Composes the model matrix as translation * rotation * scale.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(self.position)
            * Mat4::from_quat(self.rotation)
            * Mat4::from_scale(self.scale)
    }

    /// Inverse-transpose of the model's upper 3x3, so normals stay
    /// perpendicular under non-uniform scale. Degenerate matrices are the
    /// producer's responsibility; no validation happens here.
    pub fn normal_matrix(&self) -> Mat3 {
        Mat3::from_mat4(self.matrix()).inverse().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_transform_is_identity_matrix() {
        assert_eq!(Transform::default().matrix(), Mat4::IDENTITY);
        assert_eq!(Transform::default().normal_matrix(), Mat3::IDENTITY);
    }

    #[test]
    fn matrix_applies_translation_after_scale() {
        let transform = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::splat(2.0),
        };
        let moved = transform.matrix().transform_point3(Vec3::ONE);
        assert_eq!(moved, Vec3::new(3.0, 4.0, 5.0));
    }

    #[test]
    fn normal_matrix_counters_non_uniform_scale() {
        let transform = Transform {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        // A surface running along +X with normal +Y keeps its normal
        // direction when only X is stretched.
        let normal = (transform.normal_matrix() * Vec3::Y).normalize();
        assert!((normal - Vec3::Y).length() < 1e-6);

        // A 45 degree normal tilts toward Y once X is stretched.
        let tilted = (transform.normal_matrix() * Vec3::new(1.0, 1.0, 0.0)).normalize();
        assert!(tilted.y > tilted.x);
    }
}
