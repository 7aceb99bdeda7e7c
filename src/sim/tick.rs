//! Per-frame simulation tick
//!
//! One call advances the game by exactly one tick in a fixed order:
//! input, motion, spawn, collision, ability decay, progression, cosmic event.

use glam::Vec2;

use super::abilities::{self, Ability};
use super::effects::Fx;
use super::events::{GameEvent, Notice, ProgressKind};
use super::state::{CosmicEvent, GamePhase, GameState};
use super::{collision, motion, spawn};
use crate::consts::GOLD;
use crate::progression::level_for_score;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickInput {
    /// Direction flags (keyboard or touch, any source)
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    /// Fire one bullet
    pub shoot: bool,
    /// Ability hotkey pressed this tick (1-6; anything else is ignored)
    pub ability_slot: Option<u8>,
    /// Pause toggle
    pub pause: bool,
    /// Wall-clock time (ms) for ally fire rate and cosmic event expiry
    pub now_ms: f64,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    // Handle pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                log::info!("Paused at tick {}", state.time_ticks);
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
                log::info!("Resumed at tick {}", state.time_ticks);
            }
            _ => {}
        }
    }

    if state.phase != GamePhase::Playing {
        return;
    }

    state.time_ticks += 1;

    if input.shoot {
        state.fire_player_bullet();
    }
    if let Some(ability) = input.ability_slot.and_then(Ability::from_slot) {
        if let Err(err) = abilities::activate(state, ability) {
            log::debug!("Ability rejected: {}", err);
            state.events.push(GameEvent::Notice(Notice::Rejected(err)));
        }
    }

    motion::step(state, input);
    spawn::step(state, input.now_ms);

    let result = collision::resolve(state);
    if result.game_over {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver {
            score: state.run.score,
            level: state.run.level,
        });
        log::info!(
            "Game over: score {} at level {} after {} ticks",
            state.run.score,
            state.run.level,
            state.time_ticks
        );
        return;
    }

    abilities::decay(state);
    check_level_up(state);
    renew_cosmic_event(state, input.now_ms);
}

/// Raise the level when the score crosses a threshold
fn check_level_up(state: &mut GameState) {
    let new_level = level_for_score(state.run.score);
    if new_level <= state.run.level {
        return;
    }

    state.run.level = new_level;
    let top_center = Vec2::new(state.playfield.width / 2.0, 100.0);
    Fx::new(&mut state.particles, &mut state.rng).burst(top_center, GOLD, 20);
    state
        .events
        .push(GameEvent::Notice(Notice::LevelReached(new_level)));
    state.events.push(GameEvent::Progress {
        kind: ProgressKind::Level,
        amount: new_level,
    });
    log::info!("Level {} reached (score {})", new_level, state.run.score);
}

/// Replace an expired cosmic event with a fresh one
fn renew_cosmic_event(state: &mut GameState, now_ms: f64) {
    let expired = state
        .cosmic_event
        .as_ref()
        .is_some_and(|event| event.is_expired(now_ms));
    if !expired {
        return;
    }

    let event = CosmicEvent::meteor_shower(now_ms);
    log::info!("Cosmic event rotated: {}", event.name);
    state
        .events
        .push(GameEvent::Notice(Notice::CosmicEventStarted(event.name.clone())));
    state.cosmic_event = Some(event);
}
