//! Galactic Defender - A vertical arcade asteroid shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, abilities)
//! - `ledger`: Missions and the coin/achievement economy
//! - `progression`: Levels, skins and high score
//! - `game`: Loop driver tying the sim to persistence and notifications
//! - `render`: Drawable projection of the game state for an external renderer
//! - `persistence`: Key-value save data with safe fallbacks
//! - `platform`: Browser/native platform abstraction
//! - `tuning`: Data-driven game balance

pub mod error;
pub mod game;
pub mod ledger;
pub mod persistence;
pub mod platform;
pub mod progression;
pub mod ranking;
pub mod render;
pub mod sim;
pub mod tuning;

pub use error::{CommandError, PersistError, TuningError};
pub use game::Game;
pub use ranking::Ranking;
pub use tuning::Tuning;

use glam::Vec2;
use rand::Rng;

/// Game configuration constants
///
/// Speeds and lifetimes are expressed per tick; the game is tuned for one
/// tick per animation frame at roughly 60 Hz.
pub mod consts {
    /// Nominal tick rate (used for display conversions only)
    pub const TICKS_PER_SECOND: u32 = 60;

    /// Default playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 800.0;
    pub const PLAYFIELD_HEIGHT: f32 = 600.0;

    /// Player ship footprint and movement
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 70.0;
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Distance of the spawn point above the bottom edge
    pub const PLAYER_START_OFFSET: f32 = 100.0;
    pub const START_LIVES: u8 = 3;
    pub const MAX_LIVES: u8 = 5;

    /// Player bullets
    pub const BULLET_WIDTH: f32 = 4.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    pub const BULLET_SPEED: f32 = 10.0;

    /// Ally wingmen
    pub const ALLY_SIZE: f32 = 30.0;
    pub const ALLY_SPEED: f32 = 3.0;
    pub const ALLY_BULLET_WIDTH: f32 = 3.0;
    pub const ALLY_BULLET_HEIGHT: f32 = 8.0;
    pub const ALLY_BULLET_SPEED: f32 = 8.0;
    /// Wall-clock gap between ally shots
    pub const ALLY_FIRE_INTERVAL_MS: f64 = 1000.0;
    /// Ticks before allies can be toggled again after enabling
    pub const ALLY_TOGGLE_COOLDOWN: u32 = 1800;
    pub const MAX_ALLIES: usize = 2;

    /// Power-ups
    pub const POWER_UP_SIZE: f32 = 20.0;
    pub const EVENT_ITEM_SIZE: f32 = 25.0;
    pub const POWER_UP_SPEED: f32 = 2.0;

    /// Asteroid size range [min, max)
    pub const ASTEROID_MIN_SIZE: f32 = 25.0;
    pub const ASTEROID_MAX_SIZE: f32 = 55.0;

    /// Score needed per level
    pub const SCORE_PER_LEVEL: u64 = 1000;

    /// Abilities
    pub const AURA_RADIUS: f32 = 150.0;
    pub const LIGHT_SPEED_MULTIPLIER: f32 = 1.5;
    pub const COSMIC_RAY_BULLETS: usize = 5;
    pub const COSMIC_RAY_SPACING: f32 = 10.0;
    pub const COSMIC_RAY_WIDTH: f32 = 6.0;
    pub const COSMIC_RAY_HEIGHT: f32 = 20.0;
    pub const COSMIC_RAY_SPEED: f32 = 15.0;

    /// Cosmic events (wall-clock window)
    pub const COSMIC_EVENT_DURATION_MS: f64 = 7.0 * 24.0 * 60.0 * 60.0 * 1000.0;
    pub const COSMIC_EVENT_TARGET: u32 = 20;

    /// Background stars
    pub const STAR_COUNT: usize = 100;

    /// Palette
    pub const GOLD: u32 = 0xffd43b;
    pub const RED: u32 = 0xff6b6b;
    pub const GREEN: u32 = 0x51cf66;
    pub const PURPLE: u32 = 0x8b5cf6;
    pub const ALLY_BLUE: u32 = 0x667fff;
}

/// True when two circles overlap (strictly closer than the sum of radii)
#[inline]
pub fn circles_overlap(a: Vec2, ra: f32, b: Vec2, rb: f32) -> bool {
    a.distance(b) < ra + rb
}

/// Uniform sample in `[lo, hi)`; returns `lo` for an empty range
#[inline]
pub fn random_in<R: Rng + ?Sized>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if hi > lo { rng.random_range(lo..hi) } else { lo }
}

/// Format an `0xRRGGBB` color as a CSS hex string
pub fn css_color(color: u32) -> String {
    format!("#{:06x}", color & 0x00ff_ffff)
}
