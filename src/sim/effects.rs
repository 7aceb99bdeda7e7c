//! Particle bursts
//!
//! Purely cosmetic. Every burst draws from the sim RNG so runs stay
//! reproducible.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::state::{Asteroid, Particle, ParticleKind};
use crate::consts::GOLD;
use crate::random_in;

/// Sparks added on top of every asteroid explosion
const SPARKS_PER_EXPLOSION: usize = 5;
/// Particles in a ship explosion
const EXPLOSION_PARTICLES: usize = 15;

/// Borrowed particle sink plus the RNG that jitters it
pub struct Fx<'a> {
    pub particles: &'a mut Vec<Particle>,
    pub rng: &'a mut Pcg32,
}

impl<'a> Fx<'a> {
    pub fn new(particles: &'a mut Vec<Particle>, rng: &'a mut Pcg32) -> Self {
        Self { particles, rng }
    }

    fn spread(&mut self, half: f32) -> Vec2 {
        Vec2::new(
            random_in(self.rng, -half, half),
            random_in(self.rng, -half, half),
        )
    }

    /// Rock debris scaled to the asteroid plus a few gold sparks
    pub fn asteroid_explosion(&mut self, asteroid: &Asteroid) {
        let rocks = (asteroid.size * 0.8).floor() as usize;
        for _ in 0..rocks {
            let vel = self.spread(3.0);
            let size = random_in(self.rng, 1.0, 4.0);
            self.particles.push(Particle {
                pos: asteroid.pos,
                vel,
                size,
                color: asteroid.color,
                life: 40,
                kind: ParticleKind::Rock,
            });
        }
        for _ in 0..SPARKS_PER_EXPLOSION {
            let vel = self.spread(4.0);
            let size = random_in(self.rng, 1.0, 3.0);
            self.particles.push(Particle {
                pos: asteroid.pos,
                vel,
                size,
                color: GOLD,
                life: 25,
                kind: ParticleKind::Spark,
            });
        }
    }

    /// Large fiery burst (ship hit)
    pub fn explosion(&mut self, pos: Vec2, color: u32) {
        for _ in 0..EXPLOSION_PARTICLES {
            let vel = self.spread(4.0);
            let size = random_in(self.rng, 2.0, 6.0);
            self.particles.push(Particle {
                pos,
                vel,
                size,
                color,
                life: 30,
                kind: ParticleKind::Explosion,
            });
        }
    }

    /// Small generic burst of `count` particles
    pub fn burst(&mut self, pos: Vec2, color: u32, count: usize) {
        for _ in 0..count {
            let vel = self.spread(2.0);
            let size = random_in(self.rng, 1.0, 4.0);
            self.particles.push(Particle {
                pos,
                vel,
                size,
                color,
                life: 20,
                kind: ParticleKind::Generic,
            });
        }
    }
}
