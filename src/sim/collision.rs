//! Collision detection and response
//!
//! Everything is a circle: asteroids use `size`, the ship and power-ups use
//! half their width, bullets half theirs. Passes run in a fixed order:
//! bullets vs asteroids, ship vs asteroids, ship vs power-ups. Scans walk
//! the collections back to front and the ship passes stop at the first hit.

use super::effects::Fx;
use super::events::{GameEvent, Notice, ProgressKind};
use super::state::{Asteroid, AsteroidKind, GameState, PowerUpKind};
use crate::circles_overlap;
use crate::consts::*;

/// Summary of one collision step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CollisionResult {
    /// Asteroids destroyed by bullets
    pub destroyed: u32,
    /// The ship took an unshielded hit
    pub player_hit: bool,
    /// Lives ran out; later passes were skipped
    pub game_over: bool,
}

/// Run all collision passes for one tick
pub fn resolve(state: &mut GameState) -> CollisionResult {
    let mut result = CollisionResult {
        destroyed: bullets_vs_asteroids(state),
        ..Default::default()
    };

    result.player_hit = player_vs_asteroids(state);
    if state.run.lives == 0 {
        result.game_over = true;
        return result;
    }

    player_vs_power_ups(state);
    result
}

/// Each bullet damages at most one asteroid per tick
fn bullets_vs_asteroids(state: &mut GameState) -> u32 {
    let mut destroyed = 0;
    let mut i = state.bullets.len();
    while i > 0 {
        i -= 1;
        let bullet = &state.bullets[i];
        let hit = state.asteroids.iter().rposition(|a| {
            !bullet.struck.contains(&a.id)
                && circles_overlap(bullet.pos, bullet.radius(), a.pos, a.size)
        });
        let Some(j) = hit else {
            continue;
        };

        let asteroid = &mut state.asteroids[j];
        let asteroid_id = asteroid.id;
        asteroid.health = asteroid.health.saturating_sub(1);
        if asteroid.health == 0 {
            let asteroid = state.asteroids.remove(j);
            asteroid_destroyed(state, &asteroid);
            destroyed += 1;
        } else {
            let (pos, color) = (asteroid.pos, asteroid.color);
            Fx::new(&mut state.particles, &mut state.rng).burst(pos, color, 5);
        }

        let bullet = &mut state.bullets[i];
        if bullet.piercing {
            bullet.struck.push(asteroid_id);
        } else {
            state.bullets.remove(i);
        }
    }
    destroyed
}

/// Debris, score and mission progress for a shot-down asteroid
fn asteroid_destroyed(state: &mut GameState, asteroid: &Asteroid) {
    Fx::new(&mut state.particles, &mut state.rng).asteroid_explosion(asteroid);

    let tuning = &state.tuning;
    let mut points = tuning.asteroid_points_per_level * state.run.level as u64;
    if asteroid.kind == AsteroidKind::Spinning {
        points += tuning.spinning_bonus;
    }
    if asteroid.is_event {
        points *= tuning.event_asteroid_multiplier;
        if let Some(event) = state.cosmic_event.as_mut() {
            event.progress += 1;
        }
    }
    state.run.score += points;
    state.events.push(GameEvent::Progress {
        kind: ProgressKind::Destroy,
        amount: 1,
    });
}

/// First asteroid touching the ship; returns true on an unshielded hit
fn player_vs_asteroids(state: &mut GameState) -> bool {
    let player = &state.player;
    let hit = state
        .asteroids
        .iter()
        .rposition(|a| circles_overlap(player.pos, player.radius(), a.pos, a.size));
    let Some(j) = hit else {
        return false;
    };

    let asteroid = state.asteroids.remove(j);
    let shielded = state.player.shield;
    let ship = state.player.pos;
    let mut fx = Fx::new(&mut state.particles, &mut state.rng);
    fx.asteroid_explosion(&asteroid);

    if shielded {
        state
            .events
            .push(GameEvent::Notice(Notice::ShieldBlocked));
        return false;
    }

    fx.explosion(ship, RED);
    state.run.lives = state.run.lives.saturating_sub(1);
    log::info!("Ship hit, {} lives left", state.run.lives);
    true
}

/// First power-up touching the ship
fn player_vs_power_ups(state: &mut GameState) {
    let player = &state.player;
    let hit = state
        .power_ups
        .iter()
        .rposition(|p| circles_overlap(player.pos, player.radius(), p.pos, p.size));
    let Some(j) = hit else {
        return;
    };

    let power_up = state.power_ups.remove(j);
    let level = state.run.level as u64;
    match power_up.kind {
        PowerUpKind::Life => {
            if state.run.lives < MAX_LIVES {
                state.run.lives += 1;
                state.events.push(GameEvent::Notice(Notice::LifeGained));
            }
        }
        PowerUpKind::Score => {
            let points = state.tuning.score_power_up_per_level * level;
            state.run.score += points;
            state
                .events
                .push(GameEvent::Notice(Notice::ScoreBonus(points)));
        }
        PowerUpKind::Event => {
            let coins = state.tuning.event_item_coins;
            state.run.score += state.tuning.event_item_per_level * level;
            state.events.push(GameEvent::CoinsEarned(coins));
            state
                .events
                .push(GameEvent::Notice(Notice::EventCoins(coins)));
        }
    }

    if power_up.kind != PowerUpKind::Event {
        state.events.push(GameEvent::Progress {
            kind: ProgressKind::Collect,
            amount: 1,
        });
    }
    Fx::new(&mut state.particles, &mut state.rng).burst(power_up.pos, power_up.color, 10);
}
