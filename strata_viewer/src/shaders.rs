use bytemuck::{Pod, Zeroable};

pub const SLAB_SHADER_SOURCE: &str = r#"
struct SceneUniforms {
    view_projection: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> scene: SceneUniforms;

struct VertexIn {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) model_0: vec4<f32>,
    @location(3) model_1: vec4<f32>,
    @location(4) model_2: vec4<f32>,
    @location(5) model_3: vec4<f32>,
    @location(6) color: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) normal: vec3<f32>,
    @location(1) color: vec4<f32>,
};

@vertex
fn slab_vs_main(input: VertexIn) -> VertexOutput {
    let model = mat4x4<f32>(input.model_0, input.model_1, input.model_2, input.model_3);
    let world = model * vec4<f32>(input.position, 1.0);
    var out: VertexOutput;
    out.position = scene.view_projection * world;
    // Uniform-per-axis scaling only, so the upper 3x3 keeps directions.
    out.normal = normalize((model * vec4<f32>(input.normal, 0.0)).xyz);
    out.color = input.color;
    return out;
}

@fragment
fn slab_fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let sun = normalize(vec3<f32>(0.4, 1.0, 0.6));
    let diffuse = max(dot(normalize(input.normal), sun), 0.0);
    let lit = input.color.rgb * (0.35 + 0.65 * diffuse);
    return vec4<f32>(lit, input.color.a);
}
"#;

pub const BADGE_SHADER_SOURCE: &str = r#"
struct VertexInput {
    @location(0) position: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) local: vec2<f32>,
};

@vertex
fn badge_vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.position = vec4<f32>(input.position, 0.0, 1.0);
    out.local = input.position;
    return out;
}

@fragment
fn badge_fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    return vec4<f32>(0.92, 0.88, 0.78, 0.85);
}
"#;

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
pub struct BadgeVertex {
    pub position: [f32; 2],
}

/// Small quad in the lower-left corner, drawn while the back affordance is
/// visible. Clip-space coordinates, triangle-strip order.
pub const BADGE_VERTICES: [BadgeVertex; 4] = [
    BadgeVertex {
        position: [-0.96, -0.80],
    },
    BadgeVertex {
        position: [-0.78, -0.80],
    },
    BadgeVertex {
        position: [-0.96, -0.92],
    },
    BadgeVertex {
        position: [-0.78, -0.92],
    },
];
