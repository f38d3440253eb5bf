use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use log::warn;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Wire sentinel for "no spotlight cone". A cosine can never exceed 1, so
/// any cutoff above it reads back as omni-directional.
pub const OMNI_CUTOFF: f32 = 2.0;

/// A single point or spot light.
///
/// `range` is the distance at which attenuation reaches zero; pass
/// `f32::INFINITY` for an unattenuated light. `direction` only matters when
/// `cutoff` is set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Light {
    pub position: Vec3,
    pub range: f32,
    pub color: Vec3,
    pub exponent: f32,
    pub direction: Vec3,
    pub cutoff: Option<f32>,
}

impl Light {
    /// An omni-directional point light.
    pub fn omni(position: Vec3, color: Vec3, range: f32) -> Self {
        Self {
            position,
            range,
            color,
            exponent: 0.0,
            direction: Vec3::NEG_Z,
            cutoff: None,
        }
    }

    /// A spotlight. `cutoff` is the cosine of the half-angle of the cone;
    /// `exponent` sharpens the cone edge as it grows.
    pub fn spot(
        position: Vec3,
        color: Vec3,
        direction: Vec3,
        range: f32,
        cutoff: f32,
        exponent: f32,
    ) -> Self {
        Self {
            position,
            range,
            color,
            exponent,
            direction,
            cutoff: Some(cutoff),
        }
    }

    /// Packs the light into its wire layout.
    pub fn raw(&self) -> LightRaw {
        LightRaw {
            position: self.position.into(),
            range: self.range,
            color: self.color.into(),
            exponent: self.exponent,
            direction: self.direction.into(),
            cutoff: self.cutoff.unwrap_or(OMNI_CUTOFF),
        }
    }
}

/// Wire layout of one light in the storage list. Field order matches the
/// shader struct; the interleaved scalars keep vec3 members 16-byte aligned
/// without padding.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightRaw {
    pub position: [f32; 3],
    pub range: f32,
    pub color: [f32; 3],
    pub exponent: f32,
    pub direction: [f32; 3],
    pub cutoff: f32,
}

impl LightRaw {
    /// Bind layout of the light block: the light list, its count and the
    /// ambient term. The core only ever reads it.
    pub const BIND_LAYOUT: wgpu::BindGroupLayoutDescriptor<'static> =
        wgpu::BindGroupLayoutDescriptor {
            label: Some("light-bind-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: true },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        };

    /// Rebuilds the CPU-side light from the wire layout.
    pub fn unpack(&self) -> Light {
        Light {
            position: self.position.into(),
            range: self.range,
            color: self.color.into(),
            exponent: self.exponent,
            direction: self.direction.into(),
            cutoff: (self.cutoff <= 1.0).then_some(self.cutoff),
        }
    }
}

#[derive(Debug, Default)]
struct RigState {
    lights: Vec<Light>,
    ambient: Vec3,
}

/// Frame-level light container mutated by the scene's lighting manager and
/// snapshotted once per frame by the upload path. Clones share state.
#[derive(Debug, Default)]
pub struct LightRig {
    inner: Arc<RwLock<RigState>>,
}

impl Clone for LightRig {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl LightRig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a light and returns its index in the draw order.
    pub fn add_light(&self, light: Light) -> usize {
        let mut state = self.inner.write();
        state.lights.push(light);
        state.lights.len() - 1
    }

    /// Removes the light at `index`, shifting later lights down.
    pub fn remove_light(&self, index: usize) -> Option<Light> {
        let mut state = self.inner.write();
        (index < state.lights.len()).then(|| state.lights.remove(index))
    }

    pub fn clear_lights(&self) {
        self.inner.write().lights.clear();
    }

    pub fn set_ambient(&self, ambient: Vec3) {
        self.inner.write().ambient = ambient;
    }

    pub fn ambient(&self) -> Vec3 {
        self.inner.read().ambient
    }

    pub fn light_count(&self) -> usize {
        self.inner.read().lights.len()
    }

    /// Snapshot of the current lights and ambient term.
    pub fn snapshot(&self) -> (Vec<Light>, Vec3) {
        let state = self.inner.read();
        (state.lights.clone(), state.ambient)
    }

    /// Packs up to `capacity` lights for upload, returning the raw list and
    /// the count the shader loop is bounded by. Overflowing lights are
    /// dropped in draw order.
    pub fn pack(&self, capacity: usize) -> (Vec<LightRaw>, u32) {
        let state = self.inner.read();
        if state.lights.len() > capacity {
            warn!(
                "light list holds {} lights but the buffer fits {capacity}; dropping the rest",
                state.lights.len()
            );
        }
        let raw: Vec<LightRaw> = state
            .lights
            .iter()
            .take(capacity)
            .map(Light::raw)
            .collect();
        let count = raw.len() as u32;
        (raw, count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_round_trips_spot_and_omni() {
        let spot = Light::spot(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::ONE,
            Vec3::NEG_Y,
            10.0,
            0.8,
            2.0,
        );
        assert_eq!(spot.raw().unpack(), spot);

        let omni = Light::omni(Vec3::ZERO, Vec3::X, f32::INFINITY);
        assert_eq!(omni.raw().cutoff, OMNI_CUTOFF);
        assert_eq!(omni.raw().unpack().cutoff, None);
    }

    #[test]
    fn light_raw_is_48_bytes() {
        assert_eq!(std::mem::size_of::<LightRaw>(), 48);
    }

    #[test]
    fn rig_clones_share_state() {
        let rig = LightRig::new();
        let view = rig.clone();
        rig.add_light(Light::omni(Vec3::ZERO, Vec3::ONE, 5.0));
        assert_eq!(view.light_count(), 1);
        view.set_ambient(Vec3::splat(0.2));
        assert_eq!(rig.ambient(), Vec3::splat(0.2));
        rig.clear_lights();
        assert_eq!(view.light_count(), 0);
    }

    #[test]
    fn pack_caps_the_list_and_reports_the_capped_count() {
        let rig = LightRig::new();
        for i in 0..4 {
            rig.add_light(Light::omni(Vec3::splat(i as f32), Vec3::ONE, 5.0));
        }
        let (raw, count) = rig.pack(2);
        assert_eq!(raw.len(), 2);
        assert_eq!(count, 2);
        assert_eq!(raw[1].position, [1.0, 1.0, 1.0]);
    }

    #[test]
    fn remove_light_out_of_range_is_none() {
        let rig = LightRig::new();
        assert!(rig.remove_light(0).is_none());
    }
}
