use glam::{Vec3, Vec4};
use tableau_common::{MeshFlags, MeshKind, Transform};
use tableau_render::{DrawSubmitter, SceneScript};

/// How a piece is colored.
#[derive(Debug, Clone, Copy)]
enum Surface {
    Color(Vec4),
    /// Texture tag, UV scale and the color to use when the tag is not loaded.
    Texture(&'static str, f32, Vec4),
}

#[derive(Debug, Clone, Copy)]
struct Piece {
    mesh: MeshKind,
    flags: MeshFlags,
    transform: Transform,
    surface: Surface,
    material: &'static str,
}

fn piece(mesh: MeshKind, scale: Vec3, translation: Vec3) -> Piece {
    Piece {
        mesh,
        flags: MeshFlags::default(),
        transform: Transform::new(scale, Vec3::ZERO, translation),
        surface: Surface::Color(Vec4::ONE),
        material: "grayMatte",
    }
}

impl Piece {
    fn color(mut self, r: f32, g: f32, b: f32) -> Self {
        self.surface = Surface::Color(Vec4::new(r, g, b, 1.0));
        self
    }

    fn texture(mut self, tag: &'static str, uv: f32, fallback: Vec4) -> Self {
        self.surface = Surface::Texture(tag, uv, fallback);
        self
    }

    fn material(mut self, tag: &'static str) -> Self {
        self.material = tag;
        self
    }

    fn rotated(mut self, degrees: Vec3) -> Self {
        self.transform.rotation_degrees = degrees;
        self
    }

    fn flags(mut self, flags: MeshFlags) -> Self {
        self.flags = flags;
        self
    }
}

/// A kitchen counter corner: back wall, two-level counter, a potted bonsai
/// and a candle mug.
pub struct CounterScene {
    pieces: Vec<Piece>,
}

impl Default for CounterScene {
    fn default() -> Self {
        Self::new()
    }
}

impl CounterScene {
    pub fn new() -> Self {
        use MeshKind::*;

        let upper_y = 1.0;
        let lower_y = -0.5;
        let wall_z = -11.0;
        let floor_y = -4.0;
        let wall_h = 20.0;
        let cream = Vec4::new(0.95, 0.95, 0.90, 1.0);

        let mut pieces = vec![
            piece(Box, Vec3::new(60.0, wall_h, 0.3), Vec3::new(0.0, floor_y + wall_h * 0.5, wall_z))
                .texture("wall", 1.0, cream)
                .material("wall"),
            piece(Box, Vec3::new(60.0, 0.3, 6.0), Vec3::new(0.0, floor_y + 0.15, wall_z + 3.0))
                .color(0.16, 0.11, 0.07)
                .material("bark"),
            // upper counter slab and the panel below its front edge
            piece(Box, Vec3::new(20.0, 1.0, 8.0), Vec3::new(0.0, upper_y + 0.5, -3.0))
                .texture("toptable", 1.0, Vec4::new(0.80, 0.76, 0.70, 1.0))
                .material("tableTop"),
            piece(Box, Vec3::new(20.0, upper_y - lower_y, 0.8), Vec3::new(0.0, (upper_y + lower_y) / 2.0, 0.0))
                .color(0.72, 0.72, 0.70)
                .material("counter"),
            piece(Plane, Vec3::new(20.0, 1.0, 6.0), Vec3::new(0.0, lower_y, 3.0))
                .texture("bottomtable", 1.0, Vec4::new(0.55, 0.53, 0.50, 1.0))
                .material("counter"),
        ];

        // flower pot
        let pot_base = upper_y + 1.0;
        let pot_z = -3.0;
        let pot_color = Vec4::new(0.45, 0.45, 0.45, 1.0);
        let pot_top = pot_base + 1.0 + 1.8;
        pieces.extend([
            piece(Cylinder, Vec3::new(1.47, 1.0, 1.47), Vec3::new(0.0, pot_base, pot_z))
                .texture("pot", 1.0, pot_color)
                .material("grayMatte"),
            piece(Cylinder, Vec3::new(1.6, 1.8, 1.6), Vec3::new(0.0, pot_base + 1.0, pot_z))
                .texture("pot", 1.0, pot_color)
                .material("grayMatte"),
            piece(Cylinder, Vec3::new(1.44, 0.05, 1.44), Vec3::new(0.0, pot_top, pot_z))
                .color(0.25, 0.18, 0.10)
                .material("soil"),
        ]);

        // bonsai: trunk segments leaning alternately, then three canopy clusters
        let trunk = [
            (Vec3::new(0.0, pot_top + 0.05, pot_z), 0.45, 0.18, -20.0),
            (Vec3::new(0.15, pot_top + 0.47, pot_z), 0.75, 0.15, -15.0),
            (Vec3::new(0.34, pot_top + 1.19, pot_z), 0.75, 0.12, 8.0),
            (Vec3::new(0.24, pot_top + 1.93, pot_z), 0.75, 0.09, 22.0),
        ];
        for (base, height, radius, lean) in trunk {
            pieces.push(
                piece(TaperedCylinder, Vec3::new(radius, height, radius), base)
                    .rotated(Vec3::new(0.0, 0.0, lean))
                    .color(0.30, 0.24, 0.18)
                    .material("bark"),
            );
        }
        let canopy = [
            (Vec3::new(-0.04, pot_top + 3.12, pot_z), 0.9),
            (Vec3::new(-1.00, pot_top + 1.27, pot_z), 0.7),
            (Vec3::new(1.26, pot_top + 1.96, pot_z), 0.7),
        ];
        for (center, size) in canopy {
            pieces.push(
                piece(Sphere, Vec3::new(size * 1.3, size * 0.8, size), center)
                    .color(0.16, 0.46, 0.14)
                    .material("foliage"),
            );
        }

        // candle mug on the lower shelf
        let (mug_x, mug_z, mug_r, mug_h) = (-4.0, 4.0, 0.65, 1.275);
        let ceramic = (0.95, 0.93, 0.90);
        pieces.extend([
            piece(Cylinder, Vec3::new(mug_r, mug_h, mug_r), Vec3::new(mug_x, lower_y, mug_z))
                .color(ceramic.0, ceramic.1, ceramic.2)
                .material("ceramic"),
            piece(
                Cylinder,
                Vec3::new(mug_r * 0.88, 0.055, mug_r * 0.88),
                Vec3::new(mug_x, lower_y + mug_h - 0.05, mug_z),
            )
            .color(0.88, 0.84, 0.72)
            .material("ceramic"),
            piece(Torus, Vec3::new(0.42, 0.3, 0.42), Vec3::new(mug_x - mug_r, lower_y + mug_h * 0.5, mug_z))
                .rotated(Vec3::new(90.0, 0.0, 0.0))
                .color(ceramic.0, ceramic.1, ceramic.2)
                .material("ceramic"),
            piece(
                Cylinder,
                Vec3::new(mug_r + 0.01, mug_h * 0.25, mug_r + 0.01),
                Vec3::new(mug_x, lower_y + mug_h * 0.15, mug_z),
            )
            .flags(MeshFlags::sides_only())
            .color(0.88, 0.86, 0.82)
            .material("ceramic"),
        ]);

        Self { pieces }
    }
}

impl SceneScript for CounterScene {
    fn required_tags(&self) -> Vec<&str> {
        let mut tags: Vec<&str> = self
            .pieces
            .iter()
            .filter_map(|p| match p.surface {
                Surface::Texture(tag, ..) => Some(tag),
                Surface::Color(_) => None,
            })
            .collect();
        tags.sort_unstable();
        tags.dedup();
        tags
    }

    fn draw(&mut self, submit: &mut DrawSubmitter<'_>) {
        for p in &self.pieces {
            submit.set_transform(&p.transform);
            match p.surface {
                Surface::Color(rgba) => submit.set_color(rgba),
                Surface::Texture(tag, uv, fallback) => {
                    if submit.registry().find_slot(tag).is_some() {
                        submit.set_texture(tag);
                        submit.set_uv_scale(uv, uv);
                    } else {
                        submit.set_color(fallback);
                    }
                }
            }
            submit.set_material(p.material);
            submit.draw(p.mesh, p.flags);
        }
    }
}
