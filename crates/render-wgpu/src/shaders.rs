/// Textured Phong program: ambient + diffuse + specular against one point light.
pub const LIT_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_color: vec4<f32>,
    light_position: vec4<f32>,
    view_position: vec4<f32>,
    object_color: vec4<f32>,
    // x: ambient strength, y: specular strength, z: shininess
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

@group(1) @binding(0)
var diffuse_texture: texture_2d<f32>;
@group(1) @binding(1)
var diffuse_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
    @location(7) normal_0: vec4<f32>,
    @location(8) normal_1: vec4<f32>,
    @location(9) normal_2: vec4<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput, instance: InstanceInput) -> VertexOutput {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    let normal_matrix = mat3x3<f32>(
        instance.normal_0.xyz,
        instance.normal_1.xyz,
        instance.normal_2.xyz,
    );
    let world = model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = uniforms.projection * uniforms.view * world;
    out.world_position = world.xyz;
    out.normal = normal_matrix * vertex.normal;
    out.uv = vertex.uv;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    let light_color = uniforms.light_color.xyz;
    let ambient = uniforms.material.x * light_color;

    let norm = normalize(in.normal);
    let light_dir = normalize(uniforms.light_position.xyz - in.world_position);
    let impact = max(dot(norm, light_dir), 0.0);
    let diffuse = impact * light_color;

    let view_dir = normalize(uniforms.view_position.xyz - in.world_position);
    let reflect_dir = reflect(-light_dir, norm);
    let highlight = pow(max(dot(view_dir, reflect_dir), 0.0), uniforms.material.z);
    let specular = uniforms.material.y * highlight * light_color;

    let texel = textureSample(diffuse_texture, diffuse_sampler, in.uv);
    let phong = (ambient + diffuse + specular) * texel.xyz;
    return vec4<f32>(phong, 1.0);
}
"#;

/// Unlit program for the marker at the light position.
pub const LAMP_SHADER: &str = r#"
struct Uniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    light_color: vec4<f32>,
    light_position: vec4<f32>,
    view_position: vec4<f32>,
    object_color: vec4<f32>,
    material: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> uniforms: Uniforms;

struct InstanceInput {
    @location(3) model_0: vec4<f32>,
    @location(4) model_1: vec4<f32>,
    @location(5) model_2: vec4<f32>,
    @location(6) model_3: vec4<f32>,
};

@vertex
fn vs_lamp(@location(0) position: vec3<f32>, instance: InstanceInput) -> @builtin(position) vec4<f32> {
    let model = mat4x4<f32>(
        instance.model_0,
        instance.model_1,
        instance.model_2,
        instance.model_3,
    );
    return uniforms.projection * uniforms.view * model * vec4<f32>(position, 1.0);
}

@fragment
fn fs_lamp() -> @location(0) vec4<f32> {
    return vec4<f32>(1.0);
}
"#;
