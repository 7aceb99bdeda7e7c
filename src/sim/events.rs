//! Events raised by the simulation
//!
//! The sim never talks to the ledger, storage or UI directly. It records what
//! happened and the driver fans the events out after each tick.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::abilities::Ability;
use crate::error::CommandError;

/// Mission progress categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProgressKind {
    /// Asteroid destroyed by a bullet (cumulative)
    Destroy,
    /// Life/score power-up collected (cumulative)
    Collect,
    /// Level reached (absolute)
    Level,
}

/// Something the driver must react to
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// Mission progress signal
    Progress { kind: ProgressKind, amount: u32 },
    /// Coins earned during play
    CoinsEarned(u64),
    /// Lives reached zero
    GameOver { score: u64, level: u32 },
    /// Toast for the player
    Notice(Notice),
}

/// Short player-facing notification
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    LifeGained,
    ScoreBonus(u64),
    EventCoins(u64),
    ShieldBlocked,
    AbilityActivated(Ability),
    AbilityEnded(Ability),
    AbilityUnlocked(Ability),
    LevelReached(u32),
    MissionComplete { title: String, reward: u64 },
    CosmicEventStarted(String),
    AlliesEnabled,
    AlliesDisabled,
    SkinEquipped(String),
    SkinUnlocked(String),
    NewHighScore(u64),
    GameOver { score: u64, coins: u64 },
    /// A command was refused
    Rejected(CommandError),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::LifeGained => write!(f, "+1 Life!"),
            Notice::ScoreBonus(points) => write!(f, "+{} Points!", points),
            Notice::EventCoins(coins) => write!(f, "+{} Celestial Coins!", coins),
            Notice::ShieldBlocked => write!(f, "Shield blocked the hit!"),
            Notice::AbilityActivated(a) => write!(f, "{} activated!", a.name()),
            Notice::AbilityEnded(a) => write!(f, "{} ended!", a.name()),
            Notice::AbilityUnlocked(a) => write!(f, "{} unlocked!", a.name()),
            Notice::LevelReached(level) => write!(f, "Level {} reached!", level),
            Notice::MissionComplete { title, reward } => {
                write!(f, "Mission complete: {}! +{} coins", title, reward)
            }
            Notice::CosmicEventStarted(name) => write!(f, "New cosmic event: {}!", name),
            Notice::AlliesEnabled => write!(f, "Allies enabled!"),
            Notice::AlliesDisabled => write!(f, "Allies disabled"),
            Notice::SkinEquipped(name) => write!(f, "{} equipped!", name),
            Notice::SkinUnlocked(name) => write!(f, "Skin unlocked: {}!", name),
            Notice::NewHighScore(score) => write!(f, "New high score: {}!", score),
            Notice::GameOver { score, coins } => {
                write!(f, "Game over! {} points, +{} coins", score, coins)
            }
            Notice::Rejected(err) => write!(f, "{}", capitalize(&err.to_string())),
        }
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
