use glam::{EulerRot, Mat4, Vec2, Vec3};

use std::f32::consts::FRAC_PI_2;

/// The three decorative polyhedra, drawn as wireframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolidKind {
    Tetrahedron,
    Octahedron,
    Icosahedron,
}

/// Sinusoidal bobbing orbit around a solid's base offset, x and y only.
#[derive(Debug, Clone, Copy)]
pub struct Bob {
    pub amplitude: Vec2,
    pub frequency: Vec2,
    pub phase: Vec2,
}

impl Bob {
    fn offset(&self, t: f32) -> Vec3 {
        Vec3::new(
            self.amplitude.x * (self.frequency.x * t + self.phase.x).sin(),
            self.amplitude.y * (self.frequency.y * t + self.phase.y).sin(),
            0.0,
        )
    }
}

/// One wireframe accent: fixed base offset, its own spin rates about two
/// axes, and its own bobbing orbit. Exactly three exist per scene.
#[derive(Debug, Clone, Copy)]
pub struct DecorativeSolid {
    pub kind: SolidKind,
    pub radius: f32,
    pub base: Vec3,
    /// Angular rate about each axis, radians per second, signed.
    pub spin: Vec3,
    pub bob: Bob,
}

impl DecorativeSolid {
    pub fn position(&self, t: f32) -> Vec3 {
        self.base + self.bob.offset(t)
    }

    pub fn rotation(&self, t: f32) -> Mat4 {
        Mat4::from_euler(
            EulerRot::XYZ,
            self.spin.x * t,
            self.spin.y * t,
            self.spin.z * t,
        )
    }

    pub fn transform(&self, t: f32) -> Mat4 {
        Mat4::from_translation(self.position(t)) * self.rotation(t)
    }

    /// Line-list wireframe vertices (two per edge), centered on the origin
    /// and scaled to the solid's radius.
    pub fn wireframe(&self) -> Vec<Vec3> {
        let vertices = unit_vertices(self.kind);
        edges(&vertices)
            .into_iter()
            .flat_map(|(a, b)| [vertices[a] * self.radius, vertices[b] * self.radius])
            .collect()
    }
}

/// The fixed trio: tetrahedron, octahedron, icosahedron, with the base
/// offsets and motion parameters of the original backdrop.
pub fn decorative_solids() -> [DecorativeSolid; 3] {
    [
        DecorativeSolid {
            kind: SolidKind::Tetrahedron,
            radius: 0.3,
            base: Vec3::new(3.0, 2.0, -2.0),
            spin: Vec3::new(0.2, 0.3, 0.0),
            bob: Bob {
                amplitude: Vec2::splat(0.5),
                frequency: Vec2::new(0.5, 0.3),
                phase: Vec2::new(0.0, FRAC_PI_2),
            },
        },
        DecorativeSolid {
            kind: SolidKind::Octahedron,
            radius: 0.4,
            base: Vec3::new(-3.0, -2.0, -1.0),
            spin: Vec3::new(-0.3, 0.0, 0.2),
            bob: Bob {
                amplitude: Vec2::splat(0.5),
                frequency: Vec2::new(0.3, 0.5),
                phase: Vec2::new(FRAC_PI_2, 0.0),
            },
        },
        DecorativeSolid {
            kind: SolidKind::Icosahedron,
            radius: 0.5,
            base: Vec3::new(2.0, -3.0, -3.0),
            spin: Vec3::new(0.0, 0.2, -0.1),
            bob: Bob {
                amplitude: Vec2::splat(0.3),
                frequency: Vec2::new(0.4, 0.6),
                phase: Vec2::new(0.0, FRAC_PI_2),
            },
        },
    ]
}

/// Unit-radius vertex set for each polyhedron.
fn unit_vertices(kind: SolidKind) -> Vec<Vec3> {
    match kind {
        SolidKind::Tetrahedron => {
            let s = 1.0 / 3.0f32.sqrt();
            vec![
                Vec3::new(s, s, s),
                Vec3::new(s, -s, -s),
                Vec3::new(-s, s, -s),
                Vec3::new(-s, -s, s),
            ]
        }
        SolidKind::Octahedron => vec![
            Vec3::X,
            Vec3::NEG_X,
            Vec3::Y,
            Vec3::NEG_Y,
            Vec3::Z,
            Vec3::NEG_Z,
        ],
        SolidKind::Icosahedron => {
            let phi = (1.0 + 5.0f32.sqrt()) / 2.0;
            let s = 1.0 / (1.0 + phi * phi).sqrt();
            let mut out = Vec::with_capacity(12);
            for &a in &[-1.0f32, 1.0] {
                for &b in &[-phi, phi] {
                    out.push(Vec3::new(0.0, a, b) * s);
                    out.push(Vec3::new(a, b, 0.0) * s);
                    out.push(Vec3::new(b, 0.0, a) * s);
                }
            }
            out
        }
    }
}

/// Edges of a regular polyhedron are exactly the vertex pairs at the
/// minimal pairwise distance.
fn edges(vertices: &[Vec3]) -> Vec<(usize, usize)> {
    let mut min_dist = f32::INFINITY;
    for i in 0..vertices.len() {
        for j in (i + 1)..vertices.len() {
            min_dist = min_dist.min(vertices[i].distance(vertices[j]));
        }
    }

    let cutoff = min_dist * 1.01;
    let mut out = Vec::new();
    for i in 0..vertices.len() {
        for j in (i + 1)..vertices.len() {
            if vertices[i].distance(vertices[j]) <= cutoff {
                out.push((i, j));
            }
        }
    }
    out
}
