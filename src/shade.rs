//! Fragment-stage material evaluator for lit surfaces.

use glam::{Vec3, Vec4};

use crate::material::{AlphaMode, Material, SurfaceSamples};

/// Output of a fragment evaluation: a color, or an explicit discard meaning
/// no color and no depth contribution. Discard is a defined output, not an
/// error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FragmentColor {
    Color(Vec4),
    Discard,
}

impl FragmentColor {
    /// The color if the fragment survived.
    pub fn color(self) -> Option<Vec4> {
        match self {
            FragmentColor::Color(color) => Some(color),
            FragmentColor::Discard => None,
        }
    }

    pub fn is_discard(self) -> bool {
        matches!(self, FragmentColor::Discard)
    }
}

/// Combines the sampled surface with the accumulated illumination.
///
/// The tinted diffuse sample is scaled by the incoming radiance, emissive is
/// added on top unlit, and the material's alpha mode decides what happens to
/// the alpha channel. Roughness, normal and occlusion samples are accepted
/// via [`SurfaceSamples`] but do not yet influence the result.
pub fn evaluate_material(
    material: &Material,
    samples: &SurfaceSamples,
    illumination: Vec3,
) -> FragmentColor {
    let base = samples.diffuse * material.diffuse_color;
    let emissive = samples.emissive.truncate() * material.emissive_color.truncate();
    let rgb = base.truncate() * illumination + emissive;

    let alpha = match material.alpha_mode {
        AlphaMode::Opaque => 1.0,
        AlphaMode::Mask => {
            if base.w < material.alpha_cutoff {
                return FragmentColor::Discard;
            }
            1.0
        }
        AlphaMode::Blend => base.w,
    };

    FragmentColor::Color(rgb.extend(alpha))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glowing_material(alpha_mode: AlphaMode, alpha_cutoff: f32) -> Material {
        Material {
            diffuse_color: Vec4::new(1.0, 0.5, 0.25, 0.5),
            emissive_color: Vec4::new(0.1, 0.1, 0.1, 1.0),
            alpha_mode,
            alpha_cutoff,
            ..Material::default()
        }
    }

    #[test]
    fn diffuse_scales_with_illumination_and_emissive_does_not() {
        let material = glowing_material(AlphaMode::Opaque, 0.0);
        let dark = evaluate_material(&material, &SurfaceSamples::default(), Vec3::ZERO)
            .color()
            .unwrap();
        // Nothing but the emissive term survives a black scene.
        assert!((dark.truncate() - Vec3::splat(0.1)).length() < 1e-6);

        let lit = evaluate_material(&material, &SurfaceSamples::default(), Vec3::ONE)
            .color()
            .unwrap();
        assert!((lit.truncate() - Vec3::new(1.1, 0.6, 0.35)).length() < 1e-6);
    }

    #[test]
    fn opaque_mode_forces_full_alpha() {
        let material = glowing_material(AlphaMode::Opaque, 0.0);
        let color = evaluate_material(&material, &SurfaceSamples::default(), Vec3::ONE)
            .color()
            .unwrap();
        assert_eq!(color.w, 1.0);
    }

    #[test]
    fn blend_mode_passes_base_alpha_through() {
        let material = glowing_material(AlphaMode::Blend, 0.0);
        let samples = SurfaceSamples {
            diffuse: Vec4::new(1.0, 1.0, 1.0, 0.8),
            ..SurfaceSamples::default()
        };
        let color = evaluate_material(&material, &samples, Vec3::ONE)
            .color()
            .unwrap();
        // base alpha = sample alpha * tint alpha
        assert!((color.w - 0.4).abs() < 1e-6);
    }

    #[test]
    fn mask_mode_keeps_the_cutoff_boundary() {
        let material = Material {
            diffuse_color: Vec4::ONE,
            alpha_mode: AlphaMode::Mask,
            alpha_cutoff: 0.5,
            ..Material::default()
        };
        let with_alpha = |alpha| SurfaceSamples {
            diffuse: Vec4::new(1.0, 1.0, 1.0, alpha),
            ..SurfaceSamples::default()
        };

        // Exactly at the cutoff: kept, with alpha forced opaque.
        let kept = evaluate_material(&material, &with_alpha(0.5), Vec3::ONE);
        assert_eq!(kept.color().map(|c| c.w), Some(1.0));

        // One ULP below the cutoff: discarded.
        let just_below = f32::from_bits(0.5f32.to_bits() - 1);
        let dropped = evaluate_material(&material, &with_alpha(just_below), Vec3::ONE);
        assert!(dropped.is_discard());
    }

    #[test]
    fn staged_samples_do_not_affect_color() {
        let material = glowing_material(AlphaMode::Opaque, 0.0);
        let plain = evaluate_material(&material, &SurfaceSamples::default(), Vec3::ONE);
        let noisy = evaluate_material(
            &material,
            &SurfaceSamples {
                roughness: Vec4::splat(0.2),
                normal: Vec4::new(0.0, 0.0, 1.0, 1.0),
                occlusion: Vec4::splat(0.3),
                ..SurfaceSamples::default()
            },
            Vec3::ONE,
        );
        assert_eq!(plain, noisy);
    }
}
