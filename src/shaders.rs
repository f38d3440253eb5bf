//! Embedded WGSL sources for the two shading programs.
//!
//! The GPU programs are the wire-facing rendition of the same math the
//! Rust functions in [`crate::lighting`], [`crate::shade`] and
//! [`crate::shape`] implement, so the CPU side can be tested headless and
//! the shaders stay reviewable next to it. Bind group and vertex layouts
//! match the constants published by the data-model modules.

/// Lit mesh program: camera at group 0, material at group 1, lights at
/// group 2; vertex layout at locations 0-2 and the mesh instance at 5-11.
pub const MESH_SHADER: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    position: vec4<f32>,
}

struct Light {
    position: vec3<f32>,
    range: f32,
    color: vec3<f32>,
    exponent: f32,
    direction: vec3<f32>,
    cutoff: f32,
}

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) tex_coords: vec2<f32>,
    @location(2) normal: vec3<f32>,
}

struct InstanceInput {
    @location(5) model_0: vec4<f32>,
    @location(6) model_1: vec4<f32>,
    @location(7) model_2: vec4<f32>,
    @location(8) model_3: vec4<f32>,
    @location(9) normal_0: vec3<f32>,
    @location(10) normal_1: vec3<f32>,
    @location(11) normal_2: vec3<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
    @location(1) world_position: vec3<f32>,
    @location(2) world_normal: vec3<f32>,
}

@group(0) @binding(0) var<uniform> camera: CameraUniform;

@group(1) @binding(0) var diffuse_texture: texture_2d<f32>;
@group(1) @binding(1) var diffuse_sampler: sampler;
@group(1) @binding(2) var roughness_texture: texture_2d<f32>;
@group(1) @binding(3) var roughness_sampler: sampler;
@group(1) @binding(4) var emissive_texture: texture_2d<f32>;
@group(1) @binding(5) var emissive_sampler: sampler;
@group(1) @binding(6) var normal_texture: texture_2d<f32>;
@group(1) @binding(7) var normal_sampler: sampler;
@group(1) @binding(8) var occlusion_texture: texture_2d<f32>;
@group(1) @binding(9) var occlusion_sampler: sampler;
@group(1) @binding(10) var<uniform> diffuse_color: vec4<f32>;
@group(1) @binding(11) var<uniform> emissive_color: vec4<f32>;
@group(1) @binding(12) var<uniform> metadata: vec4<f32>;

@group(2) @binding(0) var<storage, read> lights: array<Light>;
@group(2) @binding(1) var<uniform> light_count: u32;
@group(2) @binding(2) var<uniform> ambient_light: vec3<f32>;

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let normal_matrix = mat3x3<f32>(
        instance.normal_0,
        instance.normal_1,
        instance.normal_2,
    );

    let world_position = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = camera.view_proj * world_position;
    out.tex_coords = vertex.tex_coords;
    out.world_position = world_position.xyz;
    out.world_normal = normalize(normal_matrix * vertex.normal);
    return out;
}

fn light_contribution(light: Light, world_position: vec3<f32>, normal: vec3<f32>) -> vec3<f32> {
    let to_light = light.position - world_position;
    let dist = length(to_light);
    if (dist <= 0.0) {
        return vec3<f32>(0.0);
    }
    let direction = to_light / dist;

    let range_atten = clamp(1.0 - dist / light.range, 0.0, 1.0);
    if (range_atten <= 0.0) {
        return vec3<f32>(0.0);
    }

    var cone_atten = 1.0;
    if (light.cutoff <= 1.0) {
        let spot_cos = dot(-direction, light.direction);
        if (spot_cos <= light.cutoff) {
            return vec3<f32>(0.0);
        }
        let edge = clamp((spot_cos - light.cutoff) / (1.0 - light.cutoff), 0.0, 1.0);
        cone_atten = pow(edge, light.exponent);
    }

    let diffuse = max(dot(normal, direction), 0.0);
    return diffuse * light.color * range_atten * cone_atten;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let base = textureSample(diffuse_texture, diffuse_sampler, in.tex_coords) * diffuse_color;
    let emissive = textureSample(emissive_texture, emissive_sampler, in.tex_coords).rgb
        * emissive_color.rgb;

    let normal = normalize(in.world_normal);
    var illumination = ambient_light;
    for (var i = 0u; i < light_count; i = i + 1u) {
        illumination += light_contribution(lights[i], in.world_position, normal);
    }

    var color = vec4<f32>(base.rgb * illumination + emissive, 1.0);
    let alpha_mode = metadata.z;
    if (alpha_mode == 2.0) {
        if (base.a < metadata.w) {
            discard;
        }
    } else if (alpha_mode == 3.0) {
        color.a = base.a;
    }
    return color;
}
"#;

/// UI shape program: texture at group 0, shape instance at locations 5-13.
/// The instance matrix lands directly in clip space. `fs_main` serves the
/// cutout and border-blend consumers; `fs_mask` emits the raw distance as
/// a grayscale mask.
pub const SHAPE_SHADER: &str = r#"
struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) tex_coords: vec2<f32>,
    @location(2) normal: vec3<f32>,
}

struct InstanceInput {
    @location(5) model_0: vec4<f32>,
    @location(6) model_1: vec4<f32>,
    @location(7) model_2: vec4<f32>,
    @location(8) model_3: vec4<f32>,
    @location(9) color: vec4<f32>,
    @location(10) border_color: vec4<f32>,
    // top-right, top-left, bottom-left, bottom-right
    @location(11) radii: vec4<f32>,
    // top, bottom, right, left
    @location(12) borders: vec4<f32>,
    // round flag, border flag, draw-texture flag, reserved
    @location(13) params: vec4<f32>,
}

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) tex_coords: vec2<f32>,
    @location(1) color: vec4<f32>,
    @location(2) border_color: vec4<f32>,
    @location(3) radii: vec4<f32>,
    @location(4) borders: vec4<f32>,
    @location(5) params: vec4<f32>,
}

@group(0) @binding(0) var shape_texture: texture_2d<f32>;
@group(0) @binding(1) var shape_sampler: sampler;

const EDGE_BAND: f32 = 0.1;
const MAX_BORDER_RATIO: f32 = 0.99;

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );

    var out: VertexOutput;
    out.clip_position = model * vec4<f32>(vertex.position, 1.0);
    out.tex_coords = vertex.tex_coords;
    out.color = instance.color;
    out.border_color = instance.border_color;
    out.radii = instance.radii;
    out.borders = instance.borders;
    out.params = instance.params;
    return out;
}

fn edge_term(margin: f32, width: f32) -> f32 {
    if (width <= 0.0) {
        return 1.0;
    }
    return clamp(margin / width, 0.0, 1.0);
}

fn border_ratio(width: f32, governing: f32) -> f32 {
    if (width <= 0.0 || governing <= 0.0) {
        return 0.0;
    }
    return min(width / governing, MAX_BORDER_RATIO);
}

// Returns the edge signal in x and the governing border ratio in y.
fn shape_field(p: vec2<f32>, radii_in: vec4<f32>, borders: vec4<f32>) -> vec2<f32> {
    let limit = 0.5;
    let radii = clamp(radii_in, vec4<f32>(0.0), vec4<f32>(limit));

    // Corner regions in declaration order: a zero radius has an empty
    // radius box and falls through to the straight edges.
    if (radii.x > 0.0) {
        let center = vec2<f32>(1.0 - radii.x, radii.x);
        if (p.x >= center.x && p.y <= center.y) {
            let width = max(borders.x, borders.z);
            return vec2<f32>(1.0 - distance(p, center) / radii.x, border_ratio(width, radii.x));
        }
    }
    if (radii.y > 0.0) {
        let center = vec2<f32>(radii.y, radii.y);
        if (p.x <= center.x && p.y <= center.y) {
            let width = max(borders.x, borders.w);
            return vec2<f32>(1.0 - distance(p, center) / radii.y, border_ratio(width, radii.y));
        }
    }
    if (radii.z > 0.0) {
        let center = vec2<f32>(radii.z, 1.0 - radii.z);
        if (p.x <= center.x && p.y >= center.y) {
            let width = max(borders.y, borders.w);
            return vec2<f32>(1.0 - distance(p, center) / radii.z, border_ratio(width, radii.z));
        }
    }
    if (radii.w > 0.0) {
        let center = vec2<f32>(1.0 - radii.w, 1.0 - radii.w);
        if (p.x >= center.x && p.y >= center.y) {
            let width = max(borders.y, borders.z);
            return vec2<f32>(1.0 - distance(p, center) / radii.w, border_ratio(width, radii.w));
        }
    }

    // Straight edges, each normalized by its own border width; the nearest
    // edge governs. Order: top, left, bottom, right.
    var signal = edge_term(p.y, borders.x);
    var governing = borders.x;
    let left = edge_term(p.x, borders.w);
    if (left < signal) {
        signal = left;
        governing = borders.w;
    }
    let bottom = edge_term(1.0 - p.y, borders.y);
    if (bottom < signal) {
        signal = bottom;
        governing = borders.y;
    }
    let right = edge_term(1.0 - p.x, borders.z);
    if (right < signal) {
        signal = right;
        governing = borders.z;
    }
    return vec2<f32>(signal, border_ratio(governing, governing));
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let texel = textureSample(shape_texture, shape_sampler, in.tex_coords);
    var fill = in.color;
    if (in.params.z > 0.5) {
        fill = fill * texel;
    }

    let field = shape_field(in.tex_coords, in.radii, in.borders);
    let signal = field.x;
    let ratio = field.y;

    if (in.params.y > 0.5) {
        // Border blend: transparent over the outer band, border color
        // through the band, fill past the ratio.
        let coverage = smoothstep(0.0, EDGE_BAND, signal);
        let fill_mix = smoothstep(ratio - EDGE_BAND, ratio, signal);
        return mix(in.border_color, fill, fill_mix) * coverage;
    }

    // Cutout: hard edge, no anti-aliasing.
    if (signal <= 0.0) {
        discard;
    }
    return vec4<f32>(fill.rgb, 1.0);
}

@fragment
fn fs_mask(in: VertexOutput) -> @location(0) vec4<f32> {
    let field = shape_field(in.tex_coords, in.radii, in.borders);
    let mask = max(field.x, 0.0);
    return vec4<f32>(mask, mask, mask, 1.0);
}
"#;
