//! Save/load persistence
//!
//! Features:
//! - One storage key per concern (economy, records, skins, ranking)
//! - Each key parsed independently; corrupt or missing values fall back to defaults
//! - Write-through, fire-and-forget saves (failures are logged, never propagated)

pub mod storage;

pub use storage::{FileStorage, MemoryStorage, Storage};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStorage;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::PersistError;
use crate::ledger::Economy;
use crate::ranking::Ranking;

pub const COINS_KEY: &str = "galactic_coins";
pub const POINTS_KEY: &str = "galactic_achievement_points";
pub const HIGH_SCORE_KEY: &str = "galactic_high_score";
pub const SKINS_KEY: &str = "galactic_skins";
pub const RANKING_KEY: &str = "galactic_ranking";

/// Everything that outlives a session
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SaveData {
    pub economy: Economy,
    pub high_score: u64,
    pub unlocked_skins: Vec<u32>,
    pub ranking: Ranking,
}

impl SaveData {
    /// Load all keys; never fails
    pub fn load(storage: &impl Storage) -> Self {
        let data = Self {
            economy: Economy::new(read_key(storage, COINS_KEY), read_key(storage, POINTS_KEY)),
            high_score: read_key(storage, HIGH_SCORE_KEY),
            unlocked_skins: read_key(storage, SKINS_KEY),
            ranking: read_key(storage, RANKING_KEY),
        };
        log::info!(
            "Loaded save: {} coins, high score {}",
            data.economy.coins,
            data.high_score
        );
        data
    }
}

/// Persist the wallet
pub fn save_economy(storage: &mut impl Storage, economy: &Economy) {
    report(write_key(storage, COINS_KEY, &economy.coins));
    report(write_key(storage, POINTS_KEY, &economy.achievement_points));
}

/// Persist high score, skin unlocks and the leaderboard
pub fn save_records(
    storage: &mut impl Storage,
    high_score: u64,
    unlocked_skins: &[u32],
    ranking: &Ranking,
) {
    report(write_key(storage, HIGH_SCORE_KEY, &high_score));
    report(write_key(storage, SKINS_KEY, &unlocked_skins));
    report(write_key(storage, RANKING_KEY, ranking));
}

fn read_key<T: DeserializeOwned + Default>(storage: &impl Storage, key: &str) -> T {
    match storage.get(key) {
        Ok(Some(json)) => serde_json::from_str(&json).unwrap_or_else(|e| {
            log::warn!("Corrupt value for {}, using default: {}", key, e);
            T::default()
        }),
        Ok(None) => T::default(),
        Err(e) => {
            log::warn!("Failed to read {}, using default: {}", key, e);
            T::default()
        }
    }
}

fn write_key<T: Serialize + ?Sized>(
    storage: &mut impl Storage,
    key: &str,
    value: &T,
) -> Result<(), PersistError> {
    let json = serde_json::to_string(value)?;
    storage.set(key, &json)
}

fn report(result: Result<(), PersistError>) {
    if let Err(e) = result {
        log::warn!("Save failed: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_storage_gives_defaults() {
        let data = SaveData::load(&MemoryStorage::new());
        assert_eq!(data, SaveData::default());
    }

    #[test]
    fn test_corrupt_key_falls_back_alone() {
        let mut storage = MemoryStorage::new();
        storage.set(COINS_KEY, "lots").unwrap();
        storage.set(HIGH_SCORE_KEY, "1500").unwrap();
        storage.set(SKINS_KEY, "{broken").unwrap();

        let data = SaveData::load(&storage);
        assert_eq!(data.economy.coins, 0);
        assert_eq!(data.high_score, 1500);
        assert!(data.unlocked_skins.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let mut storage = MemoryStorage::new();
        let mut ranking = Ranking::new();
        ranking.add_run(2400, 3, 1.0);
        save_economy(&mut storage, &Economy::new(320, 20));
        save_records(&mut storage, 2400, &[0, 1], &ranking);

        let data = SaveData::load(&storage);
        assert_eq!(data.economy, Economy::new(320, 20));
        assert_eq!(data.high_score, 2400);
        assert_eq!(data.unlocked_skins, vec![0, 1]);
        assert_eq!(data.ranking, ranking);
    }
}
