use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec4};
use serde::{Deserialize, Serialize};

use crate::shape::{BorderWidths, CornerRadii};
use crate::transform::Transform;

/// Per-instance input of the lit mesh pipeline: the model matrix split into
/// four packed columns plus the normal matrix split into three. Locations
/// start at 5 so the vertex layout can grow without clashing.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshInstanceRaw {
    pub model: [[f32; 4]; 4],
    pub normal: [[f32; 3]; 3],
}

impl MeshInstanceRaw {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<MeshInstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 19]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 22]>() as wgpu::BufferAddress,
                    shader_location: 11,
                    format: wgpu::VertexFormat::Float32x3,
                },
            ],
        }
    }

    /// Packs a transform, deriving the normal matrix from the model.
    pub fn from_transform(transform: &Transform) -> Self {
        Self {
            model: transform.matrix().to_cols_array_2d(),
            normal: transform.normal_matrix().to_cols_array_2d(),
        }
    }

    pub fn from_transforms(transforms: &[Transform]) -> Vec<Self> {
        transforms.iter().map(Self::from_transform).collect()
    }
}

/// One drawable UI shape: a transformed unit quad with fill, border and
/// rounding parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub transform: Transform,
    pub color: Vec4,
    pub border_color: Vec4,
    pub radii: CornerRadii,
    pub borders: BorderWidths,
    /// Multiplies the fill by the bound texture when set.
    pub textured: bool,
}

impl ShapeInstance {
    /// A plain untextured rectangle with the given fill color.
    pub fn filled(transform: Transform, color: Vec4) -> Self {
        Self {
            transform,
            color,
            border_color: Vec4::ZERO,
            radii: CornerRadii::ZERO,
            borders: BorderWidths::ZERO,
            textured: false,
        }
    }

    pub fn raw(&self) -> ShapeInstanceRaw {
        ShapeInstanceRaw {
            model: self.transform.matrix().to_cols_array_2d(),
            color: self.color.into(),
            border_color: self.border_color.into(),
            radii: self.radii.to_array(),
            borders: self.borders.to_array(),
            params: [
                if self.radii.max() > 0.0 { 1.0 } else { 0.0 },
                if self.borders.max() > 0.0 { 1.0 } else { 0.0 },
                if self.textured { 1.0 } else { 0.0 },
                0.0,
            ],
        }
    }
}

/// Per-instance input of the shape pipeline. The shape quad's model matrix
/// lands directly in clip space, so no camera block is involved.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ShapeInstanceRaw {
    pub model: [[f32; 4]; 4],
    pub color: [f32; 4],
    pub border_color: [f32; 4],
    /// Corner radii in surface units: top-right, top-left, bottom-left,
    /// bottom-right.
    pub radii: [f32; 4],
    /// Border widths in surface units: top, bottom, right, left.
    pub borders: [f32; 4],
    /// Scalar flags: round, border, draw-texture, reserved.
    pub params: [f32; 4],
}

impl ShapeInstanceRaw {
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<ShapeInstanceRaw>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 5,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 4]>() as wgpu::BufferAddress,
                    shader_location: 6,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 8]>() as wgpu::BufferAddress,
                    shader_location: 7,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 12]>() as wgpu::BufferAddress,
                    shader_location: 8,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 16]>() as wgpu::BufferAddress,
                    shader_location: 9,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 20]>() as wgpu::BufferAddress,
                    shader_location: 10,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 24]>() as wgpu::BufferAddress,
                    shader_location: 11,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 28]>() as wgpu::BufferAddress,
                    shader_location: 12,
                    format: wgpu::VertexFormat::Float32x4,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 32]>() as wgpu::BufferAddress,
                    shader_location: 13,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }

    /// Rebuilds the model matrix from its packed columns.
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_cols_array_2d(&self.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn mesh_instance_round_trips_the_model_matrix() {
        let transform = Transform {
            position: Vec3::new(1.0, -2.0, 0.5),
            rotation: Quat::from_rotation_y(0.7),
            scale: Vec3::new(2.0, 1.0, 1.0),
        };
        let raw = MeshInstanceRaw::from_transform(&transform);
        let rebuilt = Mat4::from_cols_array_2d(&raw.model);
        assert!((rebuilt.col(3).truncate() - transform.position).length() < 1e-6);
    }

    #[test]
    fn batch_packing_matches_packing_one_by_one() {
        let transforms = [
            Transform::default(),
            Transform {
                position: Vec3::new(0.0, 3.0, 0.0),
                rotation: Quat::from_rotation_z(1.2),
                scale: Vec3::splat(0.5),
            },
        ];
        let batch = MeshInstanceRaw::from_transforms(&transforms);
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[1], MeshInstanceRaw::from_transform(&transforms[1]));
    }

    #[test]
    fn shape_raw_rebuilds_the_matrix_it_was_packed_from() {
        let transform = Transform {
            position: Vec3::new(0.25, -0.75, 0.0),
            rotation: Quat::IDENTITY,
            scale: Vec3::new(0.5, 0.25, 0.0),
        };
        let raw = ShapeInstance::filled(transform, Vec4::ONE).raw();
        assert_eq!(raw.model_matrix(), transform.matrix());
    }

    #[test]
    fn shape_flags_follow_radii_and_borders() {
        let mut shape = ShapeInstance::filled(Transform::default(), Vec4::ONE);
        assert_eq!(shape.raw().params, [0.0, 0.0, 0.0, 0.0]);

        shape.radii = CornerRadii::uniform(0.1);
        shape.borders = BorderWidths::uniform(0.02);
        shape.textured = true;
        assert_eq!(shape.raw().params, [1.0, 1.0, 1.0, 0.0]);
    }

    #[test]
    fn shape_raw_orders_radii_and_borders_as_documented() {
        let shape = ShapeInstance {
            radii: CornerRadii::new(0.1, 0.2, 0.3, 0.4),
            borders: BorderWidths::new(0.01, 0.02, 0.03, 0.04),
            ..ShapeInstance::filled(Transform::default(), Vec4::ONE)
        };
        let raw = shape.raw();
        assert_eq!(raw.radii, [0.1, 0.2, 0.3, 0.4]);
        assert_eq!(raw.borders, [0.01, 0.02, 0.03, 0.04]);
    }

    #[test]
    fn instance_layouts_step_per_instance() {
        assert_eq!(
            MeshInstanceRaw::layout().step_mode,
            wgpu::VertexStepMode::Instance
        );
        assert_eq!(
            ShapeInstanceRaw::layout().step_mode,
            wgpu::VertexStepMode::Instance
        );
    }
}
