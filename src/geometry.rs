//! Vertex-stage transformer shared by the mesh and shape pipelines.
//!
//! Matrices arrive as the packed column vectors of the per-instance wire
//! layout; malformed matrices are the producer's responsibility and are not
//! validated here.

use glam::{Mat3, Mat4, Vec2, Vec3, Vec4};

use crate::vertex::Vertex;

/// Rebuilds a model matrix from its four packed columns.
pub fn model_matrix(columns: &[[f32; 4]; 4]) -> Mat4 {
    Mat4::from_cols_array_2d(columns)
}

/// Rebuilds a normal matrix from its three packed columns. Rotation and
/// scale only, no translation.
pub fn normal_matrix(columns: &[[f32; 3]; 3]) -> Mat3 {
    Mat3::from_cols_array_2d(columns)
}

/// Vertex output of the lit mesh program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LitVertex {
    pub clip_position: Vec4,
    pub tex_coords: Vec2,
    pub world_position: Vec3,
    pub world_normal: Vec3,
}

/// Vertex output of the flat shape program.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVertex {
    pub clip_position: Vec4,
    pub tex_coords: Vec2,
}

/// Transforms one vertex of lit geometry: clip position through the camera,
/// world position through the model matrix, normal through the normal
/// matrix (re-normalized; a zero-length input maps to zero).
pub fn transform_lit(
    vertex: &Vertex,
    view_proj: Mat4,
    model: &[[f32; 4]; 4],
    normal: &[[f32; 3]; 3],
) -> LitVertex {
    let model = model_matrix(model);
    let world_position = model * Vec3::from(vertex.position).extend(1.0);
    let world_normal = (normal_matrix(normal) * Vec3::from(vertex.normal)).normalize_or_zero();
    LitVertex {
        clip_position: view_proj * world_position,
        tex_coords: vertex.tex_coords.into(),
        world_position: world_position.truncate(),
        world_normal,
    }
}

/// Transforms one vertex of flat geometry. UI quads carry a model matrix
/// that already lands in clip space, so callers pass an identity
/// view-projection there.
pub fn transform_flat(vertex: &Vertex, view_proj: Mat4, model: &[[f32; 4]; 4]) -> FlatVertex {
    let position = model_matrix(model) * Vec3::from(vertex.position).extend(1.0);
    FlatVertex {
        clip_position: view_proj * position,
        tex_coords: vertex.tex_coords.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;
    use glam::Quat;

    fn vertex(position: [f32; 3], normal: [f32; 3]) -> Vertex {
        Vertex {
            position,
            tex_coords: [0.25, 0.75],
            normal,
        }
    }

    #[test]
    fn identity_instance_passes_positions_through() {
        let raw = crate::instance::MeshInstanceRaw::from_transform(&Transform::default());
        let out = transform_lit(
            &vertex([1.0, 2.0, 3.0], [0.0, 1.0, 0.0]),
            Mat4::IDENTITY,
            &raw.model,
            &raw.normal,
        );
        assert_eq!(out.world_position, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(out.world_normal, Vec3::Y);
        assert_eq!(out.clip_position, Vec4::new(1.0, 2.0, 3.0, 1.0));
        assert_eq!(out.tex_coords, Vec2::new(0.25, 0.75));
    }

    #[test]
    fn normals_renormalize_under_non_uniform_scale() {
        let transform = Transform {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::new(4.0, 1.0, 1.0),
        };
        let raw = crate::instance::MeshInstanceRaw::from_transform(&transform);
        let out = transform_lit(
            &vertex([0.0, 0.0, 0.0], [1.0, 1.0, 0.0]),
            Mat4::IDENTITY,
            &raw.model,
            &raw.normal,
        );
        assert!((out.world_normal.length() - 1.0).abs() < 1e-6);
        // Stretching X squeezes the normal toward Y.
        assert!(out.world_normal.y > out.world_normal.x);
    }

    #[test]
    fn zero_normal_stays_zero_instead_of_nan() {
        let raw = crate::instance::MeshInstanceRaw::from_transform(&Transform::default());
        let out = transform_lit(
            &vertex([0.0, 0.0, 0.0], [0.0, 0.0, 0.0]),
            Mat4::IDENTITY,
            &raw.model,
            &raw.normal,
        );
        assert_eq!(out.world_normal, Vec3::ZERO);
    }

    #[test]
    fn flat_vertices_reach_clip_space_through_the_model_alone() {
        let transform = Transform {
            position: Vec3::new(0.5, -0.5, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::new(0.25, 0.25, 0.0),
        };
        let raw = crate::instance::ShapeInstance::filled(transform, Vec4::ONE).raw();
        let out = transform_flat(&vertex([1.0, 1.0, 0.0], [0.0; 3]), Mat4::IDENTITY, &raw.model);
        assert!((out.clip_position.x - 0.75).abs() < 1e-6);
        assert!((out.clip_position.y - -0.25).abs() < 1e-6);
    }
}
