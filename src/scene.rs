use glam::{Mat4, Vec3};
use rand::Rng;

use crate::camera::Camera;
use crate::particles::ParticleField;
use crate::pointer::PointerState;
use crate::solids::{decorative_solids, DecorativeSolid};
use crate::theme::{Palette, Theme};

pub const PARTICLE_OPACITY: f32 = 0.8;
pub const WIREFRAME_OPACITY: f32 = 0.3;

/// Ubiquitous, non-directional fill light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmbientLight {
    pub color: [f32; 3],
    pub intensity: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: [f32; 3],
    pub intensity: f32,
}

/// Everything renderable for one mount lifetime: camera, lights, the
/// particle field and the three wireframe solids, colored from one theme's
/// palette. Created as a unit at mount and dropped as a unit at teardown;
/// a theme change replaces the whole scene rather than recoloring it.
#[derive(Debug, Clone)]
pub struct Scene {
    pub theme: Theme,
    pub palette: Palette,
    pub camera: Camera,
    pub ambient: AmbientLight,
    pub point_lights: [PointLight; 2],
    pub particles: ParticleField,
    pub solids: [DecorativeSolid; 3],
    pub elapsed: f32,
}

impl Scene {
    pub fn new(theme: Theme, aspect: f32) -> Self {
        Self::with_rng(theme, aspect, &mut rand::thread_rng())
    }

    pub fn with_rng(theme: Theme, aspect: f32, rng: &mut impl Rng) -> Self {
        let palette = theme.palette();
        Self {
            theme,
            palette,
            camera: Camera::new(aspect),
            ambient: AmbientLight {
                color: [1.0, 1.0, 1.0],
                intensity: 0.5,
            },
            point_lights: [
                PointLight {
                    position: Vec3::new(5.0, 5.0, 5.0),
                    color: palette.primary_light,
                    intensity: 1.0,
                },
                PointLight {
                    position: Vec3::new(-5.0, -5.0, 5.0),
                    color: palette.secondary_light,
                    intensity: 0.8,
                },
            ],
            particles: ParticleField::generate(rng),
            solids: decorative_solids(),
            elapsed: 0.0,
        }
    }

    /// Per-frame state arithmetic: record the elapsed time the transforms
    /// are sampled at and fold the current pointer offset into the particle
    /// drift. Pure computation; the render call follows separately.
    pub fn advance(&mut self, elapsed: f32, pointer: PointerState) {
        self.elapsed = elapsed;
        self.particles.drift(pointer);
    }

    pub fn particle_transform(&self) -> Mat4 {
        self.particles.orientation(self.elapsed)
    }

    pub fn solid_transform(&self, index: usize) -> Mat4 {
        self.solids[index].transform(self.elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene(theme: Theme) -> Scene {
        Scene::with_rng(theme, 4.0 / 3.0, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn lights_take_the_theme_palette() {
        let dark = scene(Theme::Dark);
        assert_eq!(dark.point_lights[0].color, [0.0, 1.0, 1.0]);
        assert_eq!(dark.point_lights[1].color, [1.0, 0.0, 1.0]);

        let light = scene(Theme::Light);
        assert_eq!(light.point_lights[0].color, [0.0, 0.533, 1.0]);
        assert_eq!(light.point_lights[1].color, [1.0, 0.533, 0.0]);
    }

    #[test]
    fn light_rig_matches_the_fixture() {
        let s = scene(Theme::Dark);
        assert_eq!(s.ambient.color, [1.0, 1.0, 1.0]);
        assert_eq!(s.ambient.intensity, 0.5);
        assert_eq!(s.point_lights[0].position, Vec3::new(5.0, 5.0, 5.0));
        assert_eq!(s.point_lights[0].intensity, 1.0);
        assert_eq!(s.point_lights[1].position, Vec3::new(-5.0, -5.0, 5.0));
        assert_eq!(s.point_lights[1].intensity, 0.8);
    }

    #[test]
    fn advance_records_elapsed_and_drifts() {
        let mut s = scene(Theme::Dark);
        let pointer = PointerState { x: 1.0, y: 0.0 };

        s.advance(3.0, pointer);
        assert_eq!(s.elapsed, 3.0);

        let expected = s.particles.orientation(3.0);
        assert!(s.particle_transform().abs_diff_eq(expected, 1e-6));
    }

    #[test]
    fn solid_transforms_track_elapsed_time() {
        let mut s = scene(Theme::Light);
        s.advance(2.5, PointerState::default());
        for i in 0..3 {
            let expected = s.solids[i].transform(2.5);
            assert!(s.solid_transform(i).abs_diff_eq(expected, 1e-6));
        }
    }
}
