//! Embedded WGSL program pair for the effect.
//!
//! A single full-screen triangle covers the surface; the fragment stage does
//! all of the work. The trail arrays use vec4 slots because WGSL uniform
//! buffers round array strides up to 16 bytes — see
//! [`crate::uniforms::EffectUniforms`], which must stay layout-identical to
//! the `Params` block below.

/// Full-screen triangle vertex shader. UV origin is bottom-left, matching the
/// normalized pointer coordinates.
pub(crate) const VERTEX_WGSL: &str = r#"
struct VertexOut {
    @builtin(position) position: vec4<f32>,
    @location(0) uv: vec2<f32>,
};

@vertex
fn vs_main(@builtin(vertex_index) index: u32) -> VertexOut {
    var positions = array<vec2<f32>, 3>(
        vec2<f32>(-1.0, -3.0),
        vec2<f32>(3.0, 1.0),
        vec2<f32>(-1.0, 1.0),
    );
    let pos = positions[index];
    var out: VertexOut;
    out.position = vec4<f32>(pos, 0.0, 1.0);
    out.uv = pos * 0.5 + vec2<f32>(0.5, 0.5);
    return out;
}
"#;

/// Pixelation fragment shader: the background stays sharp except where the
/// decaying motion trail passes, which snaps sampling onto a coarse grid.
pub(crate) const FRAGMENT_WGSL: &str = r#"
struct Params {
    time: f32,
    grid_size: i32,
    pixelation_radius: f32,
    trail_decay: f32,
    mouse: vec2<f32>,
    canvas_size: vec2<f32>,
    canvas_aspect: f32,
    image_aspect: f32,
    _pad: vec2<f32>,
    trail_positions: array<vec4<f32>, 15>,
    trail_strengths: array<vec4<f32>, 15>,
};

@group(0) @binding(0) var<uniform> params: Params;
@group(1) @binding(0) var background_texture: texture_2d<f32>;
@group(1) @binding(1) var background_sampler: sampler;

// Crop-fit the viewport UV onto the image so the background always covers
// the surface regardless of the two aspect ratios.
fn cover_uv(uv: vec2<f32>) -> vec2<f32> {
    var scale = vec2<f32>(1.0, 1.0);
    if params.canvas_aspect > params.image_aspect {
        scale.y = params.image_aspect / params.canvas_aspect;
    } else {
        scale.x = params.canvas_aspect / params.image_aspect;
    }
    return (uv - vec2<f32>(0.5, 0.5)) * scale + vec2<f32>(0.5, 0.5);
}

// Summed influence of the trail at this fragment. Distances are aspect
// corrected so the reveal radius is circular on screen.
fn trail_influence(uv: vec2<f32>) -> f32 {
    var influence = 0.0;
    for (var i = 0; i < 15; i = i + 1) {
        let strength = params.trail_strengths[i].x;
        if strength <= 0.0 {
            continue;
        }
        var delta = uv - params.trail_positions[i].xy;
        delta.x = delta.x * params.canvas_aspect;
        let falloff = 1.0 - smoothstep(0.0, params.pixelation_radius, length(delta));
        influence = influence + strength * falloff;
    }
    return clamp(influence, 0.0, 1.0);
}

@fragment
fn fs_main(@location(0) uv: vec2<f32>) -> @location(0) vec4<f32> {
    let cells = vec2<f32>(
        f32(params.grid_size) * params.canvas_aspect,
        f32(params.grid_size),
    );
    let cell_id = floor(uv * cells);
    let snapped = (cell_id + vec2<f32>(0.5, 0.5)) / cells;

    let influence = trail_influence(uv);
    let sharp = textureSample(background_texture, background_sampler, cover_uv(uv));
    let blocky = textureSample(background_texture, background_sampler, cover_uv(snapped));

    // Faint per-cell shimmer keeps revealed cells alive while they fade.
    let shimmer = 0.06 * sin(params.time * 3.0 + cell_id.x * 7.0 + cell_id.y * 11.0);
    let lit = vec4<f32>(blocky.rgb * (1.0 + shimmer * influence), blocky.a);

    return mix(sharp, lit, influence);
}
"#;
