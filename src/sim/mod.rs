//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Per-tick units only (no frame delta)
//! - Seeded RNG only
//! - Wall-clock time arrives through `TickInput::now_ms`, never read directly
//! - No rendering, storage or platform dependencies

pub mod abilities;
pub mod collision;
pub mod effects;
pub mod events;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use abilities::{Abilities, Ability, AbilitySlot, AbilityTimer};
pub use collision::CollisionResult;
pub use events::{GameEvent, Notice, ProgressKind};
pub use spawn::{asteroid_outline, asteroid_outline_from_seed};
pub use state::{
    Ally, Asteroid, AsteroidKind, Bullet, BulletOwner, CosmicEvent, GamePhase, GameState,
    Particle, ParticleKind, Player, Playfield, PowerUp, PowerUpKind, Scoreboard, Star,
};
pub use tick::{TickInput, tick};
