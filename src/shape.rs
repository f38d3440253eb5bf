//! Analytic rounded-rectangle and border field used by the shape pipeline.
//!
//! One parameterized implementation serves every consumer. The field is a
//! normalized edge signal: positive inside the shape, zero at the boundary,
//! negative outside. Inside a corner's radius box the signal falls off with
//! distance from the corner circle's center; along straight edges each edge
//! is normalized by its own border width, so borders of different widths
//! stay independent.
//!
//! Corner order is `(top_right, top_left, bottom_left, bottom_right)`;
//! border order is `(top, bottom, right, left)`. Surface coordinates grow
//! rightward in X and downward in Y, so the top edge sits at `y = 0`.

use glam::{Vec2, Vec4};
use serde::{Deserialize, Serialize};

use crate::shade::FragmentColor;

/// Width of the anti-aliasing band at the outer edge and at the border-fill
/// transition, in edge-signal units.
const EDGE_BAND: f32 = 0.1;

/// Upper bound for the border band so a sliver of fill always survives.
const MAX_BORDER_RATIO: f32 = 0.99;

/// Floor for shape dimensions; zero or negative extents degrade to a point
/// instead of poisoning the math.
const MIN_DIMENSION: f32 = 1e-6;

/// Per-corner rounding radii in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadii {
    pub top_right: f32,
    pub top_left: f32,
    pub bottom_left: f32,
    pub bottom_right: f32,
}

impl CornerRadii {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(top_right: f32, top_left: f32, bottom_left: f32, bottom_right: f32) -> Self {
        Self {
            top_right,
            top_left,
            bottom_left,
            bottom_right,
        }
    }

    pub const fn uniform(radius: f32) -> Self {
        Self::new(radius, radius, radius, radius)
    }

    pub fn to_array(self) -> [f32; 4] {
        [
            self.top_right,
            self.top_left,
            self.bottom_left,
            self.bottom_right,
        ]
    }

    pub fn max(self) -> f32 {
        self.top_right
            .max(self.top_left)
            .max(self.bottom_left)
            .max(self.bottom_right)
    }

    /// Radii clamped to half the shorter shape dimension, the precondition
    /// of the field math. Negative radii collapse to zero.
    pub fn clamped(self, dims: Vec2) -> Self {
        let limit = (dims.min_element() * 0.5).max(0.0);
        Self {
            top_right: self.top_right.clamp(0.0, limit),
            top_left: self.top_left.clamp(0.0, limit),
            bottom_left: self.bottom_left.clamp(0.0, limit),
            bottom_right: self.bottom_right.clamp(0.0, limit),
        }
    }
}

/// Per-edge border widths in surface units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BorderWidths {
    pub top: f32,
    pub bottom: f32,
    pub right: f32,
    pub left: f32,
}

impl BorderWidths {
    pub const ZERO: Self = Self::uniform(0.0);

    pub const fn new(top: f32, bottom: f32, right: f32, left: f32) -> Self {
        Self {
            top,
            bottom,
            right,
            left,
        }
    }

    pub const fn uniform(width: f32) -> Self {
        Self::new(width, width, width, width)
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.top, self.bottom, self.right, self.left]
    }

    pub fn max(self) -> f32 {
        self.top.max(self.bottom).max(self.right).max(self.left)
    }
}

/// How a caller consumes the shape field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeMode {
    /// Hard-edged clipping: discard at and outside the boundary, opaque
    /// fill inside. No anti-aliasing.
    Cutout,
    /// Anti-aliased fill and border bands blended into one color.
    BorderBlend,
    /// The raw edge signal, floored at zero, as a grayscale mask for
    /// external compositing.
    DistanceMask,
}

/// Fill and border appearance of one shape. Texture modulation happens
/// before this point: a textured fill arrives premultiplied by its texel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Vec4,
    pub border_color: Vec4,
    pub radii: CornerRadii,
    pub borders: BorderWidths,
}

/// The resolved field at one point: the edge signal plus the border band
/// extent governing that point's region.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ShapeField {
    signal: f32,
    border_ratio: f32,
}

/// Edge signal at `p` for a shape of extent `dims`: positive inside, zero
/// at the boundary, negative outside.
pub fn edge_signal(p: Vec2, dims: Vec2, radii: CornerRadii, borders: BorderWidths) -> f32 {
    shape_field(p, dims, radii, borders).signal
}

/// Shades one fragment of a shape in the requested consumption mode.
pub fn shade_shape(mode: ShapeMode, style: &ShapeStyle, p: Vec2, dims: Vec2) -> FragmentColor {
    let field = shape_field(p, dims, style.radii, style.borders);
    match mode {
        ShapeMode::Cutout => {
            if field.signal <= 0.0 {
                FragmentColor::Discard
            } else {
                FragmentColor::Color(style.fill.truncate().extend(1.0))
            }
        }
        ShapeMode::BorderBlend => {
            let coverage = smoothstep(0.0, EDGE_BAND, field.signal);
            let fill_mix = smoothstep(
                field.border_ratio - EDGE_BAND,
                field.border_ratio,
                field.signal,
            );
            let color = style.border_color.lerp(style.fill, fill_mix);
            FragmentColor::Color(color * coverage)
        }
        ShapeMode::DistanceMask => {
            let mask = field.signal.max(0.0);
            FragmentColor::Color(Vec4::new(mask, mask, mask, 1.0))
        }
    }
}

fn shape_field(p: Vec2, dims: Vec2, radii: CornerRadii, borders: BorderWidths) -> ShapeField {
    let dims = Vec2::new(dims.x.max(MIN_DIMENSION), dims.y.max(MIN_DIMENSION));
    let radii = radii.clamped(dims);

    // Corner regions, checked in declaration order. A zero radius has an
    // empty radius box and falls through to the straight-edge path.
    let corners = [
        // (radius, center, p is past center toward the corner, border width)
        (
            radii.top_right,
            Vec2::new(dims.x - radii.top_right, radii.top_right),
            [true, false],
            borders.top.max(borders.right),
        ),
        (
            radii.top_left,
            Vec2::new(radii.top_left, radii.top_left),
            [false, false],
            borders.top.max(borders.left),
        ),
        (
            radii.bottom_left,
            Vec2::new(radii.bottom_left, dims.y - radii.bottom_left),
            [false, true],
            borders.bottom.max(borders.left),
        ),
        (
            radii.bottom_right,
            Vec2::new(dims.x - radii.bottom_right, dims.y - radii.bottom_right),
            [true, true],
            borders.bottom.max(borders.right),
        ),
    ];
    for (radius, center, [past_x, past_y], border) in corners {
        if radius <= 0.0 {
            continue;
        }
        let in_x = if past_x { p.x >= center.x } else { p.x <= center.x };
        let in_y = if past_y { p.y >= center.y } else { p.y <= center.y };
        if in_x && in_y {
            return ShapeField {
                signal: 1.0 - p.distance(center) / radius,
                border_ratio: border_ratio(border, radius),
            };
        }
    }

    // Straight-edge fallback: each edge normalized by its own border width,
    // the nearest (smallest) edge governs. Evaluation order: top, left,
    // bottom, right.
    let margins = [
        (p.y, borders.top),
        (p.x, borders.left),
        (dims.y - p.y, borders.bottom),
        (dims.x - p.x, borders.right),
    ];
    let mut signal = f32::MAX;
    let mut governing_width = 0.0;
    for (margin, width) in margins {
        let term = edge_term(margin, width);
        if term < signal {
            signal = term;
            governing_width = width;
        }
    }
    ShapeField {
        signal,
        border_ratio: border_ratio(governing_width, governing_width),
    }
}

/// One edge's normalized margin. A borderless edge saturates to fully
/// inside so it never darkens the field.
fn edge_term(margin: f32, width: f32) -> f32 {
    if width <= 0.0 {
        1.0
    } else {
        (margin / width).clamp(0.0, 1.0)
    }
}

/// Fraction of the edge signal occupied by the border band.
fn border_ratio(width: f32, governing: f32) -> f32 {
    if width <= 0.0 || governing <= 0.0 {
        0.0
    } else {
        (width / governing).min(MAX_BORDER_RATIO)
    }
}

fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    if edge0 == edge1 {
        return if x < edge0 { 0.0 } else { 1.0 };
    }
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}
