use glam::Vec3;
use tableau_common::UniformSink;

/// Number of point-light slots the shader declares.
pub const MAX_POINT_LIGHTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub direction: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub ambient: Vec3,
    pub diffuse: Vec3,
    pub specular: Vec3,
}

/// Scene lights, pushed once per frame before any object is drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    pub lighting_enabled: bool,
    pub directional: Option<DirectionalLight>,
    point_lights: Vec<PointLight>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            lighting_enabled: true,
            directional: None,
            point_lights: Vec::new(),
        }
    }
}

impl LightRig {
    /// Unlit rig: the shader falls back to raw object color.
    pub fn unlit() -> Self {
        Self {
            lighting_enabled: false,
            ..Self::default()
        }
    }

    /// Warm daylight from the window plus four fill lights.
    pub fn daylight() -> Self {
        let mut rig = Self {
            directional: Some(DirectionalLight {
                direction: Vec3::new(1.0, -0.55, -0.40),
                ambient: Vec3::new(0.07, 0.06, 0.06),
                diffuse: Vec3::new(0.24, 0.23, 0.22),
                specular: Vec3::splat(0.10),
            }),
            ..Self::default()
        };
        let lights = [
            // front fill
            ([-14.0, 9.0, 18.0], [0.08, 0.07, 0.07], [0.50, 0.48, 0.46], [0.14, 0.13, 0.12]),
            // cool overhead
            ([-8.0, 16.0, 6.0], [0.05, 0.06, 0.08], [0.18, 0.21, 0.26], [0.05, 0.06, 0.08]),
            // low front
            ([0.0, 3.0, 14.0], [0.07, 0.07, 0.06], [0.38, 0.37, 0.35], [0.12, 0.12, 0.11]),
            // ceiling
            ([-2.0, 18.0, 2.0], [0.05, 0.05, 0.05], [0.18, 0.18, 0.18], [0.04, 0.04, 0.04]),
        ];
        for (position, ambient, diffuse, specular) in lights {
            rig.add_point_light(PointLight {
                position: Vec3::from(position),
                ambient: Vec3::from(ambient),
                diffuse: Vec3::from(diffuse),
                specular: Vec3::from(specular),
            });
        }
        rig
    }

    /// Add a point light. Returns `false` and drops the light when all
    /// [`MAX_POINT_LIGHTS`] slots are taken.
    pub fn add_point_light(&mut self, light: PointLight) -> bool {
        if self.point_lights.len() >= MAX_POINT_LIGHTS {
            tracing::warn!("light rig full ({MAX_POINT_LIGHTS} point lights); dropping light");
            return false;
        }
        self.point_lights.push(light);
        true
    }

    pub fn point_lights(&self) -> &[PointLight] {
        &self.point_lights
    }

    pub fn push<S: UniformSink + ?Sized>(&self, sink: &mut S) {
        sink.set_bool("bUseLighting", self.lighting_enabled);

        match &self.directional {
            Some(d) => {
                sink.set_bool("directionalLight.bActive", true);
                sink.set_vec3("directionalLight.direction", d.direction);
                sink.set_vec3("directionalLight.ambient", d.ambient);
                sink.set_vec3("directionalLight.diffuse", d.diffuse);
                sink.set_vec3("directionalLight.specular", d.specular);
            }
            None => sink.set_bool("directionalLight.bActive", false),
        }

        for i in 0..MAX_POINT_LIGHTS {
            let Some(p) = self.point_lights.get(i) else {
                sink.set_bool(&format!("pointLights[{i}].bActive"), false);
                continue;
            };
            sink.set_bool(&format!("pointLights[{i}].bActive"), true);
            sink.set_vec3(&format!("pointLights[{i}].position"), p.position);
            sink.set_vec3(&format!("pointLights[{i}].ambient"), p.ambient);
            sink.set_vec3(&format!("pointLights[{i}].diffuse"), p.diffuse);
            sink.set_vec3(&format!("pointLights[{i}].specular"), p.specular);
        }

        sink.set_bool("spotLight.bActive", false);
    }
}
