//! Multi-light illumination accumulator.
//!
//! Produces the unclamped RGB radiance reaching a surface point: a
//! Lambertian term per light, attenuated by distance and spotlight cone,
//! summed and topped with the ambient term. Clamping and gamma are the
//! caller's concern.

use glam::Vec3;

use crate::light::Light;

/// The surface point being shaded. The view position rides along for the
/// planned specular extension; the Lambertian baseline does not read it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfacePoint {
    pub view_position: Vec3,
    pub world_position: Vec3,
    pub world_normal: Vec3,
}

/// Accumulates radiance from the first `count` lights plus `ambient`.
/// Indices at or past `count` are never read.
pub fn illuminate(lights: &[Light], count: usize, ambient: Vec3, point: &SurfacePoint) -> Vec3 {
    let normal = point.world_normal.normalize_or_zero();
    let mut total = ambient;
    for light in lights.iter().take(count) {
        total += light_contribution(light, point.world_position, normal);
    }
    total
}

/// Radiance one light adds to a point with the given unit normal.
pub fn light_contribution(light: &Light, world_position: Vec3, normal: Vec3) -> Vec3 {
    let to_light = light.position - world_position;
    let distance = to_light.length();
    if distance <= 0.0 {
        // The point sits exactly on the light; skip rather than divide by
        // zero.
        return Vec3::ZERO;
    }
    let direction = to_light / distance;

    let range_atten = (1.0 - distance / light.range).clamp(0.0, 1.0);
    if range_atten <= 0.0 {
        return Vec3::ZERO;
    }

    let cone_atten = match light.cutoff {
        Some(cutoff) => {
            let spot_cos = (-direction).dot(light.direction);
            // The boundary itself is dark: the cone is open at the cutoff.
            if spot_cos <= cutoff {
                return Vec3::ZERO;
            }
            ((spot_cos - cutoff) / (1.0 - cutoff))
                .clamp(0.0, 1.0)
                .powf(light.exponent)
        }
        None => 1.0,
    };

    let diffuse = normal.dot(direction).max(0.0);
    diffuse * light.color * range_atten * cone_atten
}
