use std::fmt::Write;
use tableau_common::{MeshBackend, MeshFlags, MeshKind, UniformSink, UniformValue};

/// Draw target that renders commands as text.
///
/// Produces a human-readable transcript of one or more frames. Useful for
/// CLI output, logging and checking the submission protocol without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextSink {
    out: String,
    uniforms: usize,
    draws: usize,
    /// Only draws are written to the transcript when set.
    pub draws_only: bool,
}

impl DebugTextSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new frame section in the transcript.
    pub fn begin_frame(&mut self, index: u64) {
        let _ = writeln!(self.out, "=== Frame {index} ===");
    }

    pub fn uniform_count(&self) -> usize {
        self.uniforms
    }

    pub fn draw_count(&self) -> usize {
        self.draws
    }

    pub fn output(&self) -> &str {
        &self.out
    }

    /// Take the transcript so far, leaving the sink empty.
    pub fn take_output(&mut self) -> String {
        std::mem::take(&mut self.out)
    }
}

fn format_value(value: &UniformValue) -> String {
    match value {
        UniformValue::Bool(b) => b.to_string(),
        UniformValue::Int(i) => i.to_string(),
        UniformValue::Float(f) => format!("{f:.3}"),
        UniformValue::Vec2(v) => format!("({:.3}, {:.3})", v.x, v.y),
        UniformValue::Vec3(v) => format!("({:.3}, {:.3}, {:.3})", v.x, v.y, v.z),
        UniformValue::Vec4(v) => format!("({:.3}, {:.3}, {:.3}, {:.3})", v.x, v.y, v.z, v.w),
        UniformValue::Mat4(m) => {
            let t = m.w_axis;
            format!("mat4 [t=({:.2}, {:.2}, {:.2})]", t.x, t.y, t.z)
        }
    }
}

impl UniformSink for DebugTextSink {
    fn set_uniform(&mut self, name: &str, value: UniformValue) {
        self.uniforms += 1;
        if !self.draws_only {
            let _ = writeln!(self.out, "  {name} = {}", format_value(&value));
        }
    }
}

impl MeshBackend for DebugTextSink {
    fn draw_mesh(&mut self, kind: MeshKind, flags: MeshFlags) {
        self.draws += 1;
        let mut parts = Vec::new();
        if flags.top {
            parts.push("top");
        }
        if flags.bottom {
            parts.push("bottom");
        }
        if flags.sides {
            parts.push("sides");
        }
        let _ = writeln!(self.out, "  draw {kind} [{}]", parts.join(" "));
    }
}
