//! GLSL sources for the background quad, plus a CPU evaluation of the
//! fragment stage so the gradient can be checked without a GPU.

/// Spatial frequency applied to the normalized coordinate.
pub const SPATIAL_FREQUENCY: f32 = 40.0;

/// Per-channel phase shift, which is what makes the hue cycle.
pub const PHASE_OFFSETS: [f32; 3] = [0.0, 2.0, 4.0];

pub const RESOLUTION_UNIFORM: &str = "iResolution";
pub const TIME_UNIFORM: &str = "iTime";
pub const PROJECTION_UNIFORM: &str = "uProjection";
pub const POSITION_ATTRIBUTE: &str = "aPosition";

/// Places the quad through the camera projection. The camera has an identity
/// view, so no model-view matrix is needed.
pub const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 aPosition;

uniform mat4 uProjection;

void main() {
    gl_Position = uProjection * vec4(aPosition, 1.0);
}
"#;

/// Shadertoy-style gradient. `iResolution` stays a vec3 (z = 1) because that
/// is the layout shaders of this style expect.
pub const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

uniform vec3 iResolution;
uniform float iTime;

out vec4 outColor;

void mainImage(out vec4 fragColor, in vec2 fragCoord) {
    vec2 uv = fragCoord / iResolution.xy;
    vec3 col = 0.5 + 0.5 * cos(iTime + uv.xyx * 40.0 + vec3(0.0, 2.0, 4.0));
    fragColor = vec4(col, 1.0);
}

void main() {
    mainImage(outColor, gl_FragCoord.xy);
}
"#;

/// Maps a pixel coordinate into [0,1]x[0,1] using the resolution uniform.
pub fn normalize_coord(frag_coord: [f32; 2], resolution: [f32; 3]) -> [f32; 2] {
    [frag_coord[0] / resolution[0], frag_coord[1] / resolution[1]]
}

/// Colour the fragment shader produces for `frag_coord`.
pub fn shade(frag_coord: [f32; 2], resolution: [f32; 3], time: f32) -> [f32; 4] {
    let uv = normalize_coord(frag_coord, resolution);
    let swizzled = [uv[0], uv[1], uv[0]];
    let mut color = [0.0, 0.0, 0.0, 1.0];
    for channel in 0..3 {
        let phase = time + swizzled[channel] * SPATIAL_FREQUENCY + PHASE_OFFSETS[channel];
        color[channel] = 0.5 + 0.5 * phase.cos();
    }
    color
}
