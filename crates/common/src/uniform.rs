use crate::mesh::{MeshBackend, MeshFlags, MeshKind};
use glam::{Mat4, Vec2, Vec3, Vec4};

/// A value written to a named shader input.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    Bool(bool),
    /// Integers, including sampler slots. `-1` is the "no texture" sentinel.
    Int(i32),
    Float(f32),
    Vec2(Vec2),
    Vec3(Vec3),
    Vec4(Vec4),
    Mat4(Mat4),
}

/// Write-only destination for named shader inputs.
///
/// Implementations must tolerate names they do not know and the `-1`
/// sampler sentinel.
pub trait UniformSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue);

    fn set_bool(&mut self, name: &str, value: bool) {
        self.set_uniform(name, UniformValue::Bool(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.set_uniform(name, UniformValue::Int(value));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.set_uniform(name, UniformValue::Float(value));
    }

    fn set_vec2(&mut self, name: &str, value: Vec2) {
        self.set_uniform(name, UniformValue::Vec2(value));
    }

    fn set_vec3(&mut self, name: &str, value: Vec3) {
        self.set_uniform(name, UniformValue::Vec3(value));
    }

    fn set_vec4(&mut self, name: &str, value: Vec4) {
        self.set_uniform(name, UniformValue::Vec4(value));
    }

    fn set_mat4(&mut self, name: &str, value: Mat4) {
        self.set_uniform(name, UniformValue::Mat4(value));
    }
}

/// One recorded call on a [`CommandLog`].
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Uniform { name: String, value: UniformValue },
    Draw { kind: MeshKind, flags: MeshFlags },
}

/// In-memory sink and mesh backend that records every call in order.
///
/// Used as a spy in tests and by headless tooling.
#[derive(Debug, Clone, Default)]
pub struct CommandLog {
    commands: Vec<Command>,
}

impl CommandLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Most recent value written to `name`, if any.
    pub fn latest(&self, name: &str) -> Option<UniformValue> {
        self.commands.iter().rev().find_map(|c| match c {
            Command::Uniform { name: n, value } if n == name => Some(*value),
            _ => None,
        })
    }

    /// Number of writes to `name`.
    pub fn write_count(&self, name: &str) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::Uniform { name: n, .. } if n == name))
            .count()
    }

    /// Draw commands in submission order.
    pub fn draws(&self) -> Vec<(MeshKind, MeshFlags)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                Command::Draw { kind, flags } => Some((*kind, *flags)),
                _ => None,
            })
            .collect()
    }
}

impl UniformSink for CommandLog {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.commands.push(Command::Uniform {
            name: name.to_string(),
            value,
        });
    }
}

impl MeshBackend for CommandLog {
    fn draw_mesh(&mut self, kind: MeshKind, flags: MeshFlags) {
        self.commands.push(Command::Draw { kind, flags });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_returns_last_write() {
        let mut log = CommandLog::new();
        log.set_float("material.shininess", 2.0);
        log.set_float("material.shininess", 12.0);
        assert_eq!(
            log.latest("material.shininess"),
            Some(UniformValue::Float(12.0))
        );
        assert_eq!(log.write_count("material.shininess"), 2);
        assert_eq!(log.latest("missing"), None);
    }

    #[test]
    fn records_draws_in_order() {
        let mut log = CommandLog::new();
        log.draw_mesh(MeshKind::Box, MeshFlags::default());
        log.set_bool("bUseTexture", true);
        log.draw_mesh(MeshKind::Cylinder, MeshFlags::sides_only());
        let draws = log.draws();
        assert_eq!(draws.len(), 2);
        assert_eq!(draws[0].0, MeshKind::Box);
        assert_eq!(draws[1], (MeshKind::Cylinder, MeshFlags::sides_only()));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn helpers_wrap_values() {
        let mut log = CommandLog::new();
        log.set_int("objectTexture", -1);
        log.set_vec2("UVscale", Vec2::new(1.0, 2.0));
        log.set_mat4("model", Mat4::IDENTITY);
        assert_eq!(log.latest("objectTexture"), Some(UniformValue::Int(-1)));
        assert_eq!(
            log.latest("UVscale"),
            Some(UniformValue::Vec2(Vec2::new(1.0, 2.0)))
        );
        assert_eq!(log.latest("model"), Some(UniformValue::Mat4(Mat4::IDENTITY)));
        log.clear();
        assert!(log.is_empty());
    }
}
