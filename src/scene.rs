//! Particle scene state on the CPU side.
//!
//! The scene owns the particle records and the color palette exactly as
//! they are uploaded to the GPU. Motion is a constant-velocity drift with
//! periodic wrapping; it exists so the viewer has something to look at, not
//! as a simulation.

use glam::Vec3;
use rand::Rng;

use crate::options::{PaletteOptions, WorldOptions};

/// One particle as stored in the particle buffer.
#[derive(Debug, Clone, Copy)]
pub struct Particle {
    /// World-space position, within the cubic domain.
    pub position: Vec3,
    /// World-space drift velocity.
    pub velocity: Vec3,
    /// Palette index used by the billboard passes.
    pub id: u32,
}

/// The full renderable state: domain size, particles, and palette.
pub struct Scene {
    /// Scalar extent of the cubic domain; positions live in
    /// `[-world_size/2, world_size/2]` per axis.
    pub world_size: f32,
    /// Live particles.
    pub particles: Vec<Particle>,
    /// RGB palette indexed by particle id.
    pub palette: Vec<Vec3>,
}

impl Scene {
    /// Scene populated with uniformly scattered particles drifting in
    /// random directions, each with a randomly drawn palette id.
    pub fn spawn(world: &WorldOptions, palette: &PaletteOptions) -> Self {
        let colors: Vec<Vec3> =
            palette.colors.iter().map(|c| Vec3::from_array(*c)).collect();
        let palette_len = colors.len().max(1) as u32;

        let mut rng = rand::rng();
        let half = world.size * 0.5;
        let particles = (0..world.particle_count)
            .map(|_| Particle {
                position: Vec3::new(
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                    rng.random_range(-half..=half),
                ),
                velocity: Vec3::new(
                    rng.random_range(
                        -world.max_drift_speed..=world.max_drift_speed,
                    ),
                    rng.random_range(
                        -world.max_drift_speed..=world.max_drift_speed,
                    ),
                    rng.random_range(
                        -world.max_drift_speed..=world.max_drift_speed,
                    ),
                ),
                id: rng.random_range(0..palette_len),
            })
            .collect();

        Self {
            world_size: world.size,
            particles,
            palette: colors,
        }
    }

    /// Drift every particle by its velocity, wrapping positions that leave
    /// the domain back to the opposite face.
    pub fn advect(&mut self, dt: f32) {
        let size = self.world_size;
        for particle in &mut self.particles {
            let moved = particle.position + particle.velocity * dt;
            particle.position = Vec3::new(
                wrap(moved.x, size),
                wrap(moved.y, size),
                wrap(moved.z, size),
            );
        }
    }

    /// Check the invariants the shaders rely on: every position inside the
    /// domain and every id a valid palette index.
    pub fn check_invariants(&self) -> Result<(), String> {
        let half = self.world_size * 0.5;
        let palette_len = self.palette.len() as u32;

        for (i, particle) in self.particles.iter().enumerate() {
            let p = particle.position;
            if p.x.abs() > half || p.y.abs() > half || p.z.abs() > half {
                return Err(format!(
                    "particle {i} at {p} outside domain of half-extent {half}"
                ));
            }
            if particle.id >= palette_len {
                return Err(format!(
                    "particle {i} has id {} but palette has {palette_len} \
                     entries",
                    particle.id
                ));
            }
        }
        Ok(())
    }

    /// Debug-build invariant check at the GPU upload boundary.
    pub fn debug_validate(&self) {
        #[cfg(debug_assertions)]
        if let Err(violation) = self.check_invariants() {
            debug_assert!(false, "{violation}");
        }
    }
}

/// Wrap a coordinate into `[-size/2, size/2]`.
fn wrap(value: f32, size: f32) -> f32 {
    (value + size * 0.5).rem_euclid(size) - size * 0.5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn world(size: f32, count: usize) -> WorldOptions {
        WorldOptions {
            size,
            particle_count: count,
            max_drift_speed: 0.5,
        }
    }

    #[test]
    fn spawn_respects_domain_and_palette() {
        let palette = PaletteOptions::default();
        let scene = Scene::spawn(&world(10.0, 500), &palette);

        assert_eq!(scene.particles.len(), 500);
        assert_eq!(scene.palette.len(), palette.colors.len());
        scene.check_invariants().unwrap();
    }

    #[test]
    fn spawn_draws_random_palette_ids() {
        let palette = PaletteOptions::default();
        let scene = Scene::spawn(&world(10.0, 500), &palette);
        let len = scene.palette.len() as u32;

        assert!(scene.particles.iter().all(|p| p.id < len));
        // Ids are drawn from the RNG, not assigned round-robin: 500
        // independent draws matching the cycle i % len has probability
        // 5^-500 with the default palette.
        assert!(scene
            .particles
            .iter()
            .enumerate()
            .any(|(i, p)| p.id != i as u32 % len));
    }

    #[test]
    fn advect_wraps_positions_to_opposite_face() {
        let mut scene = Scene {
            world_size: 10.0,
            particles: vec![Particle {
                position: Vec3::new(4.9, 0.0, -4.9),
                velocity: Vec3::new(1.0, 0.0, -1.0),
                id: 0,
            }],
            palette: vec![Vec3::ONE],
        };

        scene.advect(0.5);
        let p = scene.particles[0].position;

        // 4.9 + 0.5 wraps past +5 to the -5 side.
        assert!((p.x - (-4.6)).abs() < 1e-5);
        assert!((p.z - 4.6).abs() < 1e-5);
        scene.check_invariants().unwrap();
    }

    #[test]
    fn advect_holds_invariants_over_many_steps() {
        let palette = PaletteOptions::default();
        let mut scene = Scene::spawn(&world(4.0, 200), &palette);

        for _ in 0..1000 {
            scene.advect(0.016);
        }
        scene.check_invariants().unwrap();
    }

    #[test]
    fn out_of_range_id_fails_invariants() {
        let scene = Scene {
            world_size: 10.0,
            particles: vec![Particle {
                position: Vec3::ZERO,
                velocity: Vec3::ZERO,
                id: 7,
            }],
            palette: vec![Vec3::ONE],
        };

        assert!(scene.check_invariants().is_err());
    }
}
