//! Spawner
//!
//! One independent roll per category each tick. Everything enters outside
//! the visible playfield: falling things above the top edge, allies below
//! the bottom edge.

use std::f32::consts::TAU;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Ally, Asteroid, AsteroidKind, EVENT_GLOW, GameState, PowerUp, PowerUpKind};
use crate::consts::*;
use crate::random_in;

/// Spawn for one tick: asteroid, power-up, event item, ally
pub fn step(state: &mut GameState, now_ms: f64) {
    if roll(&mut state.rng, state.tuning.asteroid_chance(state.run.level)) {
        let asteroid = make_asteroid(state);
        state.asteroids.push(asteroid);
    }

    if roll(&mut state.rng, state.tuning.power_up_chance) {
        let kind = if state.rng.random::<bool>() {
            PowerUpKind::Life
        } else {
            PowerUpKind::Score
        };
        spawn_power_up(state, kind, POWER_UP_SIZE);
    }

    if state.cosmic_event.is_some() && roll(&mut state.rng, state.tuning.event_item_chance) {
        spawn_power_up(state, PowerUpKind::Event, EVENT_ITEM_SIZE);
        log::debug!("Event item spawned at tick {}", state.time_ticks);
    }

    if state.allies_enabled
        && state.allies.len() < MAX_ALLIES
        && roll(&mut state.rng, state.tuning.ally_chance)
    {
        spawn_ally(state, now_ms);
    }
}

fn roll(rng: &mut Pcg32, chance: f64) -> bool {
    rng.random::<f64>() < chance
}

/// Build a fresh asteroid just above the top edge
pub fn make_asteroid(state: &mut GameState) -> Asteroid {
    let field = state.playfield;
    let level = state.run.level;
    let event_active = state.cosmic_event.is_some();
    let event_chance = state.tuning.event_asteroid_chance;
    let id = state.next_entity_id();
    let rng = &mut state.rng;

    let size = random_in(rng, ASTEROID_MIN_SIZE, ASTEROID_MAX_SIZE);
    let kind = AsteroidKind::ALL[rng.random_range(0..AsteroidKind::ALL.len())];
    let x = random_in(rng, size, field.width - size);
    let speed = random_in(rng, 1.0, 3.0) + level as f32 * 0.2;
    let rotation = random_in(rng, 0.0, TAU);
    let rotation_speed = random_in(rng, -0.025, 0.025);
    let outline = asteroid_outline(size, rng);
    let palette = kind.palette();
    let mut color = palette[rng.random_range(0..palette.len())];
    let mut glow = kind.glow();
    let is_event = event_active && roll(rng, event_chance);
    if is_event {
        color = GOLD;
        glow = EVENT_GLOW;
    }
    let health = Asteroid::health_for_size(size);

    Asteroid {
        id,
        pos: Vec2::new(x, -size),
        size,
        speed,
        rotation,
        rotation_speed,
        kind,
        health,
        max_health: health,
        outline,
        color,
        glow,
        is_event,
    }
}

/// Jagged polygon around the origin: 8-11 vertices, radius 70-100% of size
pub fn asteroid_outline<R: Rng + ?Sized>(size: f32, rng: &mut R) -> Vec<Vec2> {
    let vertices = rng.random_range(8..12usize);
    (0..vertices)
        .map(|i| {
            let angle = i as f32 / vertices as f32 * TAU;
            let radius = size * random_in(rng, 0.7, 1.0);
            Vec2::from_angle(angle) * radius
        })
        .collect()
}

/// Same outline for the same `(size, seed)`
pub fn asteroid_outline_from_seed(size: f32, seed: u64) -> Vec<Vec2> {
    asteroid_outline(size, &mut Pcg32::seed_from_u64(seed))
}

fn spawn_power_up(state: &mut GameState, kind: PowerUpKind, size: f32) {
    let id = state.next_entity_id();
    let x = random_in(&mut state.rng, 0.0, state.playfield.width - 30.0);
    state.power_ups.push(PowerUp {
        id,
        pos: Vec2::new(x, -30.0),
        speed: POWER_UP_SPEED,
        size,
        kind,
        color: kind.color(),
    });
}

fn spawn_ally(state: &mut GameState, now_ms: f64) {
    let id = state.next_entity_id();
    let x = random_in(&mut state.rng, 0.0, state.playfield.width - 40.0);
    state.allies.push(Ally {
        id,
        pos: Vec2::new(x, state.playfield.height + 50.0),
        speed: ALLY_SPEED,
        size: ALLY_SIZE,
        color: ALLY_BLUE,
        last_shot_ms: now_ms,
    });
    log::debug!("Ally joined ({} flying)", state.allies.len());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{CosmicEvent, Playfield};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn state_with(tuning: Tuning) -> GameState {
        let mut state = GameState::new(11, Playfield::default(), tuning);
        state.start_run();
        state
    }

    fn never() -> Tuning {
        Tuning {
            asteroid_base_chance: 0.0,
            asteroid_chance_per_level: 0.0,
            power_up_chance: 0.0,
            event_item_chance: 0.0,
            ally_chance: 0.0,
            ..Tuning::default()
        }
    }

    #[test]
    fn test_zero_chances_spawn_nothing() {
        let mut state = state_with(never());
        state.cosmic_event = Some(CosmicEvent::meteor_shower(0.0));
        state.allies_enabled = true;
        for _ in 0..500 {
            step(&mut state, 0.0);
        }
        assert!(state.asteroids.is_empty());
        assert!(state.power_ups.is_empty());
        assert!(state.allies.is_empty());
    }

    #[test]
    fn test_asteroids_spawn_above_playfield() {
        let mut state = state_with(Tuning {
            asteroid_base_chance: 1.0,
            ..never()
        });
        for _ in 0..200 {
            step(&mut state, 0.0);
        }
        assert_eq!(state.asteroids.len(), 200);
        for a in &state.asteroids {
            assert!(a.size >= ASTEROID_MIN_SIZE && a.size < ASTEROID_MAX_SIZE);
            assert!(a.pos.x >= a.size && a.pos.x < 800.0 - a.size);
            assert_eq!(a.pos.y, -a.size);
            assert_eq!(a.health, Asteroid::health_for_size(a.size));
            assert!((8..=11).contains(&a.outline.len()));
            assert!(!a.is_event);
        }
    }

    #[test]
    fn test_event_asteroids_only_during_event() {
        let mut state = state_with(Tuning {
            asteroid_base_chance: 1.0,
            event_asteroid_chance: 1.0,
            ..never()
        });
        step(&mut state, 0.0);
        assert!(!state.asteroids[0].is_event);

        state.cosmic_event = Some(CosmicEvent::meteor_shower(0.0));
        step(&mut state, 0.0);
        assert!(state.asteroids[1].is_event);
        assert_eq!(state.asteroids[1].color, GOLD);
    }

    #[test]
    fn test_event_items_need_an_event() {
        let mut state = state_with(Tuning {
            event_item_chance: 1.0,
            ..never()
        });
        step(&mut state, 0.0);
        assert!(state.power_ups.is_empty());

        state.cosmic_event = Some(CosmicEvent::meteor_shower(0.0));
        step(&mut state, 0.0);
        assert_eq!(state.power_ups.len(), 1);
        assert_eq!(state.power_ups[0].kind, PowerUpKind::Event);
        assert_eq!(state.power_ups[0].size, EVENT_ITEM_SIZE);
        assert_eq!(state.power_ups[0].pos.y, -30.0);
    }

    #[test]
    fn test_allies_capped_and_enter_from_below() {
        let mut state = state_with(Tuning {
            ally_chance: 1.0,
            ..never()
        });
        step(&mut state, 0.0);
        assert!(state.allies.is_empty());

        state.allies_enabled = true;
        for _ in 0..10 {
            step(&mut state, 500.0);
        }
        assert_eq!(state.allies.len(), MAX_ALLIES);
        for ally in &state.allies {
            assert_eq!(ally.pos.y, 650.0);
            assert_eq!(ally.last_shot_ms, 500.0);
        }
    }

    #[test]
    fn test_outline_from_seed_is_pure() {
        let a = asteroid_outline_from_seed(40.0, 99);
        let b = asteroid_outline_from_seed(40.0, 99);
        assert_eq!(a, b);
        assert_ne!(a, asteroid_outline_from_seed(40.0, 100));
    }

    proptest! {
        #[test]
        fn prop_outline_within_bounds(size in 25.0f32..55.0, seed in any::<u64>()) {
            let outline = asteroid_outline_from_seed(size, seed);
            prop_assert!((8..=11).contains(&outline.len()));
            for v in outline {
                let r = v.length();
                prop_assert!(r >= size * 0.7 - 1e-3 && r <= size + 1e-3);
            }
        }
    }
}
