//! Error types
//!
//! Nothing in the core is fatal. Command errors are surfaced to the player as
//! notifications, persistence errors are logged and dropped.

use thiserror::Error;

use crate::sim::Ability;

/// A player command that was rejected with no state change
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("{} is locked", .0.name())]
    AbilityLocked(Ability),

    #[error("{} on cooldown ({remaining} ticks)", .ability.name())]
    AbilityOnCooldown { ability: Ability, remaining: u32 },

    #[error("{} is already unlocked", .0.name())]
    AlreadyUnlocked(Ability),

    #[error("not enough coins ({available}/{cost})")]
    InsufficientCoins { cost: u64, available: u64 },

    #[error("skin {0} is locked")]
    SkinLocked(u32),

    #[error("unknown skin {0}")]
    UnknownSkin(u32),

    #[error("allies on cooldown ({remaining} ticks)")]
    AlliesOnCooldown { remaining: u32 },
}

/// Storage read/write failures
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("storage unavailable")]
    Unavailable,

    #[error("storage write failed for key {key}: {reason}")]
    Write { key: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures loading a tuning file
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("failed to read tuning file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid tuning json: {0}")]
    Json(#[from] serde_json::Error),
}
