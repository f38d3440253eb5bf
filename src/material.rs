use bytemuck::{Pod, Zeroable};
use glam::Vec4;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How a material resolves transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AlphaMode {
    #[default]
    Opaque,
    Mask,
    Blend,
}

/// Error raised by the strict alpha-mode decoder used at asset import time.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MaterialError {
    #[error("unrecognized alpha mode code {0}")]
    UnknownAlphaMode(f32),
}

impl AlphaMode {
    /// Wire code of the mode inside the metadata quadruple.
    pub fn encode(self) -> f32 {
        match self {
            AlphaMode::Opaque => 1.0,
            AlphaMode::Mask => 2.0,
            AlphaMode::Blend => 3.0,
        }
    }

    /// Fail-safe decoder used per fragment: unknown codes fall back to
    /// opaque so a corrupted material can never turn unintentionally
    /// transparent.
    pub fn from_encoded(code: f32) -> Self {
        if code == 2.0 {
            AlphaMode::Mask
        } else if code == 3.0 {
            AlphaMode::Blend
        } else {
            AlphaMode::Opaque
        }
    }

    /// Strict decoder for asset import, where an unknown code is a content
    /// bug worth surfacing instead of masking.
    pub fn try_from_encoded(code: f32) -> Result<Self, MaterialError> {
        match code {
            c if c == 1.0 => Ok(AlphaMode::Opaque),
            c if c == 2.0 => Ok(AlphaMode::Mask),
            c if c == 3.0 => Ok(AlphaMode::Blend),
            other => Err(MaterialError::UnknownAlphaMode(other)),
        }
    }
}

/// Per-material shading constants. The metallic and roughness factors ride
/// along in the metadata block for a later micro-facet extension; the base
/// evaluator does not read them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub diffuse_color: Vec4,
    pub emissive_color: Vec4,
    pub metallic_factor: f32,
    pub roughness_factor: f32,
    pub alpha_mode: AlphaMode,
    pub alpha_cutoff: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse_color: Vec4::ONE,
            emissive_color: Vec4::new(0.0, 0.0, 0.0, 1.0),
            metallic_factor: 0.0,
            roughness_factor: 1.0,
            alpha_mode: AlphaMode::Opaque,
            alpha_cutoff: 0.0,
        }
    }
}

impl Material {
    /// Packs the three uniform blocks of the material bind group.
    pub fn uniform(&self) -> MaterialUniform {
        MaterialUniform {
            diffuse_color: self.diffuse_color.into(),
            emissive_color: self.emissive_color.into(),
            metadata: [
                self.metallic_factor,
                self.roughness_factor,
                self.alpha_mode.encode(),
                self.alpha_cutoff,
            ],
        }
    }

    /// Bind layout of a material: five texture/sampler pairs followed by
    /// the diffuse, emissive and metadata uniform blocks.
    pub const BIND_LAYOUT: wgpu::BindGroupLayoutDescriptor<'static> =
        wgpu::BindGroupLayoutDescriptor {
            label: Some("material-bind-layout"),
            entries: &[
                texture_entry(0), // diffuse
                sampler_entry(1),
                texture_entry(2), // roughness
                sampler_entry(3),
                texture_entry(4), // emissive
                sampler_entry(5),
                texture_entry(6), // normal
                sampler_entry(7),
                texture_entry(8), // occlusion
                sampler_entry(9),
                uniform_entry(10), // diffuse color
                uniform_entry(11), // emissive color
                uniform_entry(12), // metadata
            ],
        };
}

/// Wire layout of the material's uniform blocks. The three members are
/// uploaded as separate buffers (bindings 10 through 12).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MaterialUniform {
    pub diffuse_color: [f32; 4],
    pub emissive_color: [f32; 4],
    pub metadata: [f32; 4],
}

/// Texture samples feeding one fragment evaluation. An unbound texture is
/// represented by the multiplicative identity: white, fully opaque.
///
/// Roughness, normal and occlusion are accepted but staged: they do not
/// affect color until the micro-facet extension lands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceSamples {
    pub diffuse: Vec4,
    pub roughness: Vec4,
    pub emissive: Vec4,
    pub normal: Vec4,
    pub occlusion: Vec4,
}

impl Default for SurfaceSamples {
    fn default() -> Self {
        Self {
            diffuse: Vec4::ONE,
            roughness: Vec4::ONE,
            emissive: Vec4::ONE,
            normal: Vec4::ONE,
            occlusion: Vec4::ONE,
        }
    }
}

const fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

const fn sampler_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
        count: None,
    }
}

const fn uniform_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: None,
        },
        count: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alpha_codes_round_trip() {
        for mode in [AlphaMode::Opaque, AlphaMode::Mask, AlphaMode::Blend] {
            assert_eq!(AlphaMode::from_encoded(mode.encode()), mode);
            assert_eq!(AlphaMode::try_from_encoded(mode.encode()), Ok(mode));
        }
    }

    #[test]
    fn unknown_codes_fall_back_to_opaque_or_error() {
        assert_eq!(AlphaMode::from_encoded(0.0), AlphaMode::Opaque);
        assert_eq!(AlphaMode::from_encoded(7.5), AlphaMode::Opaque);
        assert_eq!(
            AlphaMode::try_from_encoded(7.5),
            Err(MaterialError::UnknownAlphaMode(7.5))
        );
    }

    #[test]
    fn metadata_packs_in_declared_order() {
        let material = Material {
            metallic_factor: 0.25,
            roughness_factor: 0.5,
            alpha_mode: AlphaMode::Mask,
            alpha_cutoff: 0.75,
            ..Material::default()
        };
        assert_eq!(material.uniform().metadata, [0.25, 0.5, 2.0, 0.75]);
    }

    #[test]
    fn default_samples_are_multiplicative_identity() {
        let samples = SurfaceSamples::default();
        assert_eq!(samples.diffuse, Vec4::ONE);
        assert_eq!(samples.emissive, Vec4::ONE);
    }

    #[test]
    fn bind_layout_covers_all_thirteen_bindings() {
        let entries = Material::BIND_LAYOUT.entries;
        assert_eq!(entries.len(), 13);
        for (index, entry) in entries.iter().enumerate() {
            assert_eq!(entry.binding, index as u32);
        }
    }
}
