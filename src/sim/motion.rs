//! Motion step
//!
//! Moves every entity by one tick, then prunes the ones that left the
//! playfield or ran out of life.

use glam::Vec2;
use rand_pcg::Pcg32;

use super::abilities::Ability;
use super::state::{
    Ally, Asteroid, AsteroidKind, Bullet, BulletOwner, GameState, Particle, Player, Playfield,
    PowerUp, Star,
};
use super::tick::TickInput;
use crate::consts::*;
use crate::random_in;

/// Advance everything by one tick
pub fn step(state: &mut GameState, input: &TickInput) {
    let field = state.playfield;
    let boosted = state.abilities.is_active(Ability::LightSpeed);

    move_player(&mut state.player, input, &field, boosted);
    advance_bullets(&mut state.bullets);
    advance_asteroids(&mut state.asteroids, &field);
    advance_particles(&mut state.particles);
    advance_power_ups(&mut state.power_ups, &field);
    if state.allies_enabled {
        let fired = advance_allies(&mut state.allies, input.now_ms);
        for pos in fired {
            let id = state.next_entity_id();
            state.bullets.push(ally_bullet(id, pos));
        }
    }
    advance_stars(&mut state.stars, &field, &mut state.rng);
}

/// Move the ship from the direction flags, clamped to the playfield
pub fn move_player(player: &mut Player, input: &TickInput, field: &Playfield, boosted: bool) {
    let speed = if boosted {
        player.speed * LIGHT_SPEED_MULTIPLIER
    } else {
        player.speed
    };
    let half_w = player.width / 2.0;
    let half_h = player.height / 2.0;

    if input.left {
        player.pos.x = (player.pos.x - speed).max(half_w);
    }
    if input.right {
        player.pos.x = (player.pos.x + speed).min(field.width - half_w);
    }
    if input.up {
        player.pos.y = (player.pos.y - speed).max(half_h);
    }
    if input.down {
        player.pos.y = (player.pos.y + speed).min(field.height - half_h);
    }
}

pub fn advance_bullets(bullets: &mut Vec<Bullet>) {
    for bullet in bullets.iter_mut() {
        bullet.pos.y -= bullet.speed;
    }
    bullets.retain(|b| !b.is_expired());
}

pub fn advance_asteroids(asteroids: &mut Vec<Asteroid>, field: &Playfield) {
    for asteroid in asteroids.iter_mut() {
        asteroid.pos.y += asteroid.speed;
        asteroid.rotation += asteroid.rotation_speed;
        if asteroid.kind == AsteroidKind::Moving {
            asteroid.pos.x += (asteroid.pos.y * 0.01).sin() * 1.5;
        }
    }
    asteroids.retain(|a| !a.is_expired(field));
}

pub fn advance_particles(particles: &mut Vec<Particle>) {
    for particle in particles.iter_mut() {
        particle.pos += particle.vel;
        particle.life = particle.life.saturating_sub(1);
    }
    particles.retain(|p| !p.is_expired());
}

pub fn advance_power_ups(power_ups: &mut Vec<PowerUp>, field: &Playfield) {
    for power_up in power_ups.iter_mut() {
        power_up.pos.y += power_up.speed;
    }
    power_ups.retain(|p| !p.is_expired(field));
}

/// Move allies up; returns muzzle positions of allies that fired
pub fn advance_allies(allies: &mut Vec<Ally>, now_ms: f64) -> Vec<Vec2> {
    let mut fired = Vec::new();
    for ally in allies.iter_mut() {
        ally.pos.y -= ally.speed;
        if now_ms - ally.last_shot_ms > ALLY_FIRE_INTERVAL_MS {
            fired.push(ally.pos - Vec2::new(0.0, 10.0));
            ally.last_shot_ms = now_ms;
        }
    }
    allies.retain(|a| !a.is_expired());
    fired
}

fn ally_bullet(id: u32, pos: Vec2) -> Bullet {
    Bullet {
        id,
        pos,
        speed: ALLY_BULLET_SPEED,
        width: ALLY_BULLET_WIDTH,
        height: ALLY_BULLET_HEIGHT,
        color: ALLY_BLUE,
        owner: BulletOwner::Ally,
        piercing: false,
        struck: Vec::new(),
    }
}

/// Scroll the starfield, wrapping stars back to the top
pub fn advance_stars(stars: &mut [Star], field: &Playfield, rng: &mut Pcg32) {
    for star in stars.iter_mut() {
        star.pos.y += star.speed;
        if star.pos.y > field.height {
            star.pos.y = 0.0;
            star.pos.x = random_in(rng, 0.0, field.width);
        }
    }
}
