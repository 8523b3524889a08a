use bytemuck::{Pod, Zeroable};
use glam::{Vec2, Vec3};
use std::f32::consts::{PI, TAU};
use std::ops::Range;
use tableau_common::{MeshFlags, MeshKind};

#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex {
    fn new(position: Vec3, normal: Vec3, uv: Vec2) -> Self {
        Self {
            position: position.to_array(),
            normal: normal.to_array(),
            uv: uv.to_array(),
        }
    }
}

/// Indexed triangle list with the index ranges of each drawable part.
///
/// Shapes without caps keep everything in `sides` and leave the cap ranges
/// empty.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
    pub sides: Range<u32>,
    pub top: Range<u32>,
    pub bottom: Range<u32>,
}

impl MeshData {
    fn uncapped(vertices: Vec<Vertex>, indices: Vec<u16>) -> Self {
        let n = indices.len() as u32;
        Self {
            vertices,
            indices,
            sides: 0..n,
            top: n..n,
            bottom: n..n,
        }
    }

    pub fn has_caps(&self) -> bool {
        !self.top.is_empty() || !self.bottom.is_empty()
    }

    /// Index ranges to draw for `flags`. Flags only matter for capped shapes.
    pub fn ranges(&self, flags: MeshFlags) -> Vec<Range<u32>> {
        if !self.has_caps() {
            return vec![self.sides.clone()];
        }
        [
            (flags.sides, &self.sides),
            (flags.top, &self.top),
            (flags.bottom, &self.bottom),
        ]
        .into_iter()
        .filter(|(on, range)| *on && !range.is_empty())
        .map(|(_, range)| range.clone())
        .collect()
    }
}

/// Geometry for a primitive, in its unit-sized local space.
///
/// Plane: 2x2 in XZ. Box: unit cube centred on the origin. Cylinders: radius
/// 1, height 1 from y = 0 (the tapered one narrows to 0.5). Sphere: radius 1.
/// Torus: ring radius 1 in the XY plane.
pub fn build(kind: MeshKind) -> MeshData {
    match kind {
        MeshKind::Plane => plane(),
        MeshKind::Box => cube(),
        MeshKind::Cylinder => cylinder(1.0, 1.0, 36),
        MeshKind::TaperedCylinder => cylinder(1.0, 0.5, 36),
        MeshKind::Sphere => sphere(16, 32),
        MeshKind::Torus => torus(1.0, 0.25, 32, 16),
    }
}

fn plane() -> MeshData {
    let corners = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)];
    let vertices = corners
        .iter()
        .map(|&(x, z)| {
            Vertex::new(
                Vec3::new(x, 0.0, z),
                Vec3::Y,
                Vec2::new((x + 1.0) * 0.5, (1.0 - z) * 0.5),
            )
        })
        .collect();
    MeshData::uncapped(vertices, vec![0, 2, 1, 2, 0, 3])
}

fn cube() -> MeshData {
    // (outward normal, u axis, v axis) with u x v = normal.
    let faces = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];
    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, u, v) in faces {
        let base = vertices.len() as u16;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = 0.5 * (normal + su * u + sv * v);
            let uv = Vec2::new((su + 1.0) * 0.5, (sv + 1.0) * 0.5);
            vertices.push(Vertex::new(position, normal, uv));
        }
        indices.extend([0, 1, 2, 2, 3, 0].map(|i| base + i));
    }
    MeshData::uncapped(vertices, indices)
}

fn cylinder(bottom_radius: f32, top_radius: f32, segments: u16) -> MeshData {
    let mut vertices = Vec::new();
    let mut indices: Vec<u16> = Vec::new();
    let slope = bottom_radius - top_radius;

    for i in 0..=segments {
        let t = f32::from(i) / f32::from(segments);
        let (s, c) = (t * TAU).sin_cos();
        let normal = Vec3::new(c, slope, s).normalize();
        vertices.push(Vertex::new(
            Vec3::new(bottom_radius * c, 0.0, bottom_radius * s),
            normal,
            Vec2::new(t, 0.0),
        ));
        vertices.push(Vertex::new(
            Vec3::new(top_radius * c, 1.0, top_radius * s),
            normal,
            Vec2::new(t, 1.0),
        ));
    }
    for i in 0..segments {
        let (b0, t0, b1, t1) = (2 * i, 2 * i + 1, 2 * i + 2, 2 * i + 3);
        indices.extend([b0, t0, b1, b1, t0, t1]);
    }
    let sides_end = indices.len() as u32;

    push_cap(&mut vertices, &mut indices, 1.0, top_radius, Vec3::Y, segments);
    let top_end = indices.len() as u32;
    push_cap(&mut vertices, &mut indices, 0.0, bottom_radius, Vec3::NEG_Y, segments);
    let bottom_end = indices.len() as u32;

    MeshData {
        vertices,
        indices,
        sides: 0..sides_end,
        top: sides_end..top_end,
        bottom: top_end..bottom_end,
    }
}

/// Triangle fan closing a cylinder end at height `y`.
fn push_cap(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u16>,
    y: f32,
    radius: f32,
    normal: Vec3,
    segments: u16,
) {
    let center = vertices.len() as u16;
    vertices.push(Vertex::new(Vec3::new(0.0, y, 0.0), normal, Vec2::splat(0.5)));
    for i in 0..=segments {
        let (s, c) = (f32::from(i) / f32::from(segments) * TAU).sin_cos();
        vertices.push(Vertex::new(
            Vec3::new(radius * c, y, radius * s),
            normal,
            Vec2::new(0.5 + 0.5 * c, 0.5 + 0.5 * s),
        ));
    }
    for i in 0..segments {
        indices.extend([center, center + 1 + i, center + 2 + i]);
    }
}

/// Row-major grid indices for a `(rows + 1) x (cols + 1)` vertex lattice.
fn grid_indices(rows: u16, cols: u16) -> Vec<u16> {
    let stride = cols + 1;
    let mut indices = Vec::with_capacity(usize::from(rows) * usize::from(cols) * 6);
    for r in 0..rows {
        for c in 0..cols {
            let a = r * stride + c;
            let b = a + stride;
            indices.extend([a, b, a + 1, a + 1, b, b + 1]);
        }
    }
    indices
}

fn sphere(stacks: u16, slices: u16) -> MeshData {
    let mut vertices = Vec::new();
    for st in 0..=stacks {
        let v = f32::from(st) / f32::from(stacks);
        let (ring, y) = (v * PI).sin_cos();
        for sl in 0..=slices {
            let u = f32::from(sl) / f32::from(slices);
            let (s, c) = (u * TAU).sin_cos();
            let p = Vec3::new(ring * c, y, ring * s);
            vertices.push(Vertex::new(p, p, Vec2::new(u, 1.0 - v)));
        }
    }
    MeshData::uncapped(vertices, grid_indices(stacks, slices))
}

fn torus(ring_radius: f32, tube_radius: f32, rings: u16, sides: u16) -> MeshData {
    let mut vertices = Vec::new();
    for r in 0..=rings {
        let u = f32::from(r) / f32::from(rings);
        let (su, cu) = (u * TAU).sin_cos();
        let center = Vec3::new(ring_radius * cu, ring_radius * su, 0.0);
        for sd in 0..=sides {
            let v = f32::from(sd) / f32::from(sides);
            let (sv, cv) = (v * TAU).sin_cos();
            let normal = Vec3::new(cv * cu, cv * su, sv);
            vertices.push(Vertex::new(
                center + tube_radius * normal,
                normal,
                Vec2::new(u, v),
            ));
        }
    }
    MeshData::uncapped(vertices, grid_indices(rings, sides))
}
