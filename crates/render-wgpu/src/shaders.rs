/// WGSL Phong shader for every scene object.
///
/// Uniform block layouts mirror `FrameUniforms` and `ObjectUniforms` in
/// `recorder.rs`.
pub const SCENE_SHADER: &str = r#"
struct DirectionalLight {
    direction: vec3<f32>,
    active: u32,
    ambient: vec3<f32>,
    diffuse: vec3<f32>,
    specular: vec3<f32>,
};

struct PointLight {
    position: vec3<f32>,
    active: u32,
    ambient: vec3<f32>,
    diffuse: vec3<f32>,
    specular: vec3<f32>,
};

struct FrameUniforms {
    view: mat4x4<f32>,
    projection: mat4x4<f32>,
    view_position: vec3<f32>,
    use_lighting: u32,
    directional: DirectionalLight,
    point_lights: array<PointLight, 5>,
};

struct ObjectUniforms {
    model: mat4x4<f32>,
    normal_matrix: mat4x4<f32>,
    color: vec4<f32>,
    diffuse: vec3<f32>,
    shininess: f32,
    specular: vec3<f32>,
    use_texture: u32,
    uv_scale: vec2<f32>,
    texture_slot: i32,
};

@group(0) @binding(0)
var<uniform> u_frame: FrameUniforms;

@group(1) @binding(0)
var<uniform> u_object: ObjectUniforms;

@group(2) @binding(0)
var object_texture: texture_2d<f32>;
@group(2) @binding(1)
var object_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_main(vertex: VertexInput) -> VertexOutput {
    let world = u_object.model * vec4<f32>(vertex.position, 1.0);

    var out: VertexOutput;
    out.clip_position = u_frame.projection * u_frame.view * world;
    out.world_position = world.xyz;
    out.normal = (u_object.normal_matrix * vec4<f32>(vertex.normal, 0.0)).xyz;
    out.uv = vertex.uv * u_object.uv_scale;
    return out;
}

fn shade(
    to_light: vec3<f32>,
    ambient: vec3<f32>,
    diffuse: vec3<f32>,
    specular: vec3<f32>,
    normal: vec3<f32>,
    to_eye: vec3<f32>,
    base: vec3<f32>,
) -> vec3<f32> {
    let lambert = max(dot(normal, to_light), 0.0);
    let reflected = reflect(-to_light, normal);
    let highlight = pow(max(dot(to_eye, reflected), 0.0), max(u_object.shininess, 1.0));
    return ambient * base
        + diffuse * lambert * base * u_object.diffuse
        + specular * highlight * u_object.specular;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    // Sampled unconditionally to keep texture access in uniform control flow.
    let sampled = textureSample(object_texture, object_sampler, in.uv);
    let textured = u_object.use_texture != 0u;
    let base = select(u_object.color, sampled, textured);

    if u_frame.use_lighting == 0u {
        return base;
    }

    let normal = normalize(in.normal);
    let to_eye = normalize(u_frame.view_position - in.world_position);
    var color = vec3<f32>(0.0);

    let sun = u_frame.directional;
    if sun.active != 0u {
        color += shade(normalize(-sun.direction), sun.ambient, sun.diffuse, sun.specular,
            normal, to_eye, base.rgb);
    }

    for (var i = 0u; i < 5u; i++) {
        let light = u_frame.point_lights[i];
        if light.active != 0u {
            let to_light = normalize(light.position - in.world_position);
            color += shade(to_light, light.ambient, light.diffuse, light.specular,
                normal, to_eye, base.rgb);
        }
    }

    return vec4<f32>(color, base.a);
}
"#;
