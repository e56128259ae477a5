use glam::{Mat4, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::pointer::PointerState;

pub const PARTICLE_COUNT: usize = 3000;
pub const FIELD_RADIUS: f32 = 10.0;

/// Idle spin about the vertical axis, radians per second of elapsed time.
pub const BASE_SPIN_RATE: f32 = 0.05;
/// Extra rotation added per frame per unit of pointer offset. The pointer
/// contributes a drift that accumulates frame over frame, never an absolute
/// orientation.
pub const POINTER_DRIFT_RATE: f32 = 0.0005;

#[derive(Debug, Clone, Copy)]
pub struct Particle {
    pub position: Vec3,
    /// Independent visual scale factor in [0, 1), modulates brightness.
    pub scale: f32,
}

/// 3000 points distributed uniformly through the volume of a sphere, plus
/// the field's accumulated rotation state. Positions are immutable after
/// generation; only the spin state changes per frame.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    drift_yaw: f32,
    drift_pitch: f32,
}

impl ParticleField {
    pub fn generate(rng: &mut impl Rng) -> Self {
        let particles = (0..PARTICLE_COUNT)
            .map(|_| {
                // Cube-root radius keeps the density uniform by volume;
                // acos on [-1, 1) avoids clustering at the poles.
                let radius = FIELD_RADIUS * rng.gen::<f32>().cbrt();
                let theta = rng.gen::<f32>() * std::f32::consts::TAU;
                let phi = (rng.gen::<f32>() * 2.0 - 1.0).acos();

                Particle {
                    position: Vec3::new(
                        radius * phi.sin() * theta.cos(),
                        radius * phi.sin() * theta.sin(),
                        radius * phi.cos(),
                    ),
                    scale: rng.gen::<f32>(),
                }
            })
            .collect();

        Self {
            particles,
            drift_yaw: 0.0,
            drift_pitch: 0.0,
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self::generate(&mut StdRng::seed_from_u64(seed))
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Accumulate one frame's worth of pointer-driven rotation.
    pub fn drift(&mut self, pointer: PointerState) {
        self.drift_yaw += pointer.x * POINTER_DRIFT_RATE;
        self.drift_pitch += pointer.y * POINTER_DRIFT_RATE;
    }

    pub fn drift_angles(&self) -> (f32, f32) {
        (self.drift_yaw, self.drift_pitch)
    }

    /// Field orientation at the given elapsed time: slow idle yaw plus the
    /// accumulated pointer drift.
    pub fn orientation(&self, elapsed: f32) -> Mat4 {
        Mat4::from_rotation_y(BASE_SPIN_RATE * elapsed + self.drift_yaw)
            * Mat4::from_rotation_x(self.drift_pitch)
    }
}

impl Default for ParticleField {
    fn default() -> Self {
        Self::generate(&mut rand::thread_rng())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_holds_exactly_3000_particles() {
        let field = ParticleField::seeded(1);
        assert_eq!(field.particles().len(), 3000);
    }

    #[test]
    fn scales_stay_in_unit_range() {
        let field = ParticleField::seeded(2);
        assert!(field
            .particles()
            .iter()
            .all(|p| (0.0..1.0).contains(&p.scale)));
    }

    #[test]
    fn drift_accumulates_per_frame() {
        let mut field = ParticleField::seeded(3);
        let pointer = PointerState { x: 1.0, y: -0.5 };

        field.drift(pointer);
        field.drift(pointer);

        let (yaw, pitch) = field.drift_angles();
        assert!((yaw - 2.0 * POINTER_DRIFT_RATE).abs() < 1e-7);
        assert!((pitch + 1.0 * POINTER_DRIFT_RATE).abs() < 1e-7);
    }

    #[test]
    fn idle_orientation_spins_with_elapsed_time() {
        let field = ParticleField::seeded(4);
        let expected = Mat4::from_rotation_y(BASE_SPIN_RATE * 10.0);
        let actual = field.orientation(10.0);
        assert!(expected.abs_diff_eq(actual, 1e-6));
    }
}
