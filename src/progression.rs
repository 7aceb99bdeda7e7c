//! Progression rules
//!
//! Level is derived from score; skins unlock permanently once the high score
//! reaches their threshold.

use serde::{Deserialize, Serialize};

use crate::consts::SCORE_PER_LEVEL;
use crate::error::CommandError;

/// Level for a score (1-based)
pub fn level_for_score(score: u64) -> u32 {
    (score / SCORE_PER_LEVEL) as u32 + 1
}

/// A ship paint job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skin {
    pub id: u32,
    pub name: String,
    pub color: u32,
    /// High score needed to unlock
    pub requirement: u64,
    pub unlocked: bool,
}

impl Skin {
    fn new(id: u32, name: &str, color: u32, requirement: u64) -> Self {
        Self {
            id,
            name: name.to_string(),
            color,
            requirement,
            unlocked: requirement == 0,
        }
    }
}

/// The shipped skin catalog
pub fn default_skins() -> Vec<Skin> {
    vec![
        Skin::new(0, "Star Ship", 0x667fff, 0),
        Skin::new(1, "Red Fighter", 0xff6b6b, 1000),
        Skin::new(2, "Green Interceptor", 0x51cf66, 2500),
        Skin::new(3, "Phantom Ship", 0xcc5de8, 5000),
        Skin::new(4, "Golden Destroyer", 0xffd43b, 10000),
        Skin::new(5, "Legendary Ship", 0xff922b, 20000),
    ]
}

/// High score, skin unlocks and the equipped skin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Progression {
    pub high_score: u64,
    skins: Vec<Skin>,
    selected: u32,
}

impl Default for Progression {
    fn default() -> Self {
        Self::new(0, &[])
    }
}

impl Progression {
    /// Restore from saved data; unlocks are re-derived from the high score too
    pub fn new(high_score: u64, unlocked_ids: &[u32]) -> Self {
        let mut progression = Self {
            high_score,
            skins: default_skins(),
            selected: 0,
        };
        for skin in progression.skins.iter_mut() {
            if unlocked_ids.contains(&skin.id) {
                skin.unlocked = true;
            }
        }
        progression.unlock_skins();
        progression
    }

    pub fn skins(&self) -> &[Skin] {
        &self.skins
    }

    pub fn selected_skin(&self) -> &Skin {
        self.skins
            .iter()
            .find(|s| s.id == self.selected)
            .unwrap_or(&self.skins[0])
    }

    pub fn unlocked_ids(&self) -> Vec<u32> {
        self.skins
            .iter()
            .filter(|s| s.unlocked)
            .map(|s| s.id)
            .collect()
    }

    /// Record a finished run; returns true on a new high score
    pub fn submit_score(&mut self, score: u64) -> bool {
        if score > self.high_score {
            self.high_score = score;
            log::info!("New high score: {}", score);
            true
        } else {
            false
        }
    }

    /// Unlock every skin the high score qualifies for; returns the new ones
    pub fn unlock_skins(&mut self) -> Vec<Skin> {
        let high_score = self.high_score;
        let mut newly = Vec::new();
        for skin in self.skins.iter_mut() {
            if !skin.unlocked && high_score >= skin.requirement {
                skin.unlocked = true;
                newly.push(skin.clone());
            }
        }
        newly
    }

    /// Equip an unlocked skin
    pub fn select(&mut self, id: u32) -> Result<&Skin, CommandError> {
        let skin = self
            .skins
            .iter()
            .find(|s| s.id == id)
            .ok_or(CommandError::UnknownSkin(id))?;
        if !skin.unlocked {
            return Err(CommandError::SkinLocked(id));
        }
        self.selected = id;
        Ok(self.selected_skin())
    }
}
