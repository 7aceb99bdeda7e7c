//! Missions and economy
//!
//! A reactive sink: it never looks at the game state, it only receives
//! progress signals and coin payouts from the driver.

use serde::{Deserialize, Serialize};

use crate::error::CommandError;
use crate::sim::ProgressKind;

/// Achievement points granted per completed mission
pub const POINTS_PER_MISSION: u64 = 10;

/// Coin and achievement balances
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Economy {
    pub coins: u64,
    pub achievement_points: u64,
}

impl Economy {
    pub fn new(coins: u64, achievement_points: u64) -> Self {
        Self {
            coins,
            achievement_points,
        }
    }

    pub fn credit(&mut self, coins: u64) {
        self.coins = self.coins.saturating_add(coins);
    }

    /// Spend coins; the balance is untouched when it is too low
    pub fn spend(&mut self, cost: u64) -> Result<(), CommandError> {
        if self.coins < cost {
            return Err(CommandError::InsufficientCoins {
                cost,
                available: self.coins,
            });
        }
        self.coins -= cost;
        Ok(())
    }
}

/// A progress goal with a coin reward
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mission {
    pub id: u32,
    pub title: String,
    pub description: String,
    pub kind: ProgressKind,
    pub target: u32,
    pub progress: u32,
    pub reward: u64,
    pub completed: bool,
}

impl Mission {
    pub fn new(
        id: u32,
        title: &str,
        description: &str,
        kind: ProgressKind,
        target: u32,
        reward: u64,
    ) -> Self {
        Self {
            id,
            title: title.to_string(),
            description: description.to_string(),
            kind,
            target,
            progress: 0,
            reward,
            completed: false,
        }
    }

    /// Completion ratio in [0, 1]
    pub fn fraction(&self) -> f32 {
        if self.target == 0 {
            return 1.0;
        }
        (self.progress as f32 / self.target as f32).min(1.0)
    }
}

/// The shipped mission set
pub fn default_missions() -> Vec<Mission> {
    vec![
        Mission::new(
            1,
            "Defend 5 Planets",
            "Destroy 20 asteroids",
            ProgressKind::Destroy,
            20,
            100,
        ),
        Mission::new(
            2,
            "Gather Cosmic Energy",
            "Collect 3 power-ups",
            ProgressKind::Collect,
            3,
            150,
        ),
        Mission::new(
            3,
            "Survive the Danger",
            "Reach level 3",
            ProgressKind::Level,
            3,
            200,
        ),
    ]
}

/// Missions plus the wallet they pay into
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ledger {
    pub economy: Economy,
    missions: Vec<Mission>,
}

impl Ledger {
    pub fn new(economy: Economy) -> Self {
        Self::with_missions(economy, default_missions())
    }

    pub fn with_missions(economy: Economy, missions: Vec<Mission>) -> Self {
        Self { economy, missions }
    }

    pub fn missions(&self) -> &[Mission] {
        &self.missions
    }

    pub fn completed_count(&self) -> usize {
        self.missions.iter().filter(|m| m.completed).count()
    }

    /// Apply a progress signal; returns missions completed by it
    pub fn record(&mut self, kind: ProgressKind, amount: u32) -> Vec<Mission> {
        let mut finished = Vec::new();
        for mission in self.missions.iter_mut() {
            if mission.completed || mission.kind != kind {
                continue;
            }
            mission.progress = match kind {
                ProgressKind::Level => mission.progress.max(amount),
                ProgressKind::Destroy | ProgressKind::Collect => {
                    mission.progress.saturating_add(amount)
                }
            };
            if mission.progress >= mission.target {
                mission.progress = mission.target;
                mission.completed = true;
                self.economy.credit(mission.reward);
                self.economy.achievement_points += POINTS_PER_MISSION;
                log::info!("Mission {} complete (+{} coins)", mission.id, mission.reward);
                finished.push(mission.clone());
            }
        }
        finished
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_destroy_mission_completes_once() {
        let mut ledger = Ledger::new(Economy::default());
        for _ in 0..19 {
            assert!(ledger.record(ProgressKind::Destroy, 1).is_empty());
        }
        let done = ledger.record(ProgressKind::Destroy, 1);
        assert_eq!(done.len(), 1);
        assert_eq!(done[0].id, 1);
        assert_eq!(ledger.economy.coins, 100);
        assert_eq!(ledger.economy.achievement_points, 10);

        // Frozen after completion
        assert!(ledger.record(ProgressKind::Destroy, 5).is_empty());
        assert_eq!(ledger.missions()[0].progress, 20);
        assert_eq!(ledger.economy.coins, 100);
    }

    #[test]
    fn test_level_mission_is_absolute() {
        let mut ledger = Ledger::new(Economy::default());
        ledger.record(ProgressKind::Level, 2);
        ledger.record(ProgressKind::Level, 2);
        assert_eq!(ledger.missions()[2].progress, 2);
        assert!(!ledger.missions()[2].completed);

        let done = ledger.record(ProgressKind::Level, 5);
        assert_eq!(done.len(), 1);
        assert_eq!(ledger.missions()[2].progress, 3);
        assert_eq!(ledger.economy.coins, 200);
    }

    #[test]
    fn test_kinds_do_not_cross() {
        let mut ledger = Ledger::new(Economy::default());
        ledger.record(ProgressKind::Collect, 2);
        assert_eq!(ledger.missions()[0].progress, 0);
        assert_eq!(ledger.missions()[1].progress, 2);
        assert_eq!(ledger.missions()[2].progress, 0);
    }

    #[test]
    fn test_spend_rejects_overdraft() {
        let mut economy = Economy::new(100, 0);
        assert_eq!(
            economy.spend(150),
            Err(CommandError::InsufficientCoins {
                cost: 150,
                available: 100
            })
        );
        assert_eq!(economy.coins, 100);
        assert!(economy.spend(100).is_ok());
        assert_eq!(economy.coins, 0);
    }

    fn progress_kind() -> impl Strategy<Value = ProgressKind> {
        prop_oneof![
            Just(ProgressKind::Destroy),
            Just(ProgressKind::Collect),
            Just(ProgressKind::Level),
        ]
    }

    proptest! {
        #[test]
        fn prop_rewards_paid_exactly_once(
            signals in proptest::collection::vec((progress_kind(), 0u32..6), 0..200)
        ) {
            let mut ledger = Ledger::new(Economy::default());
            for (kind, amount) in signals {
                ledger.record(kind, amount);
                for mission in ledger.missions() {
                    prop_assert!(mission.progress <= mission.target || !mission.completed);
                }
            }
            let expected: u64 = ledger
                .missions()
                .iter()
                .filter(|m| m.completed)
                .map(|m| m.reward)
                .sum();
            prop_assert_eq!(ledger.economy.coins, expected);
            prop_assert_eq!(
                ledger.economy.achievement_points,
                ledger.completed_count() as u64 * POINTS_PER_MISSION
            );
        }
    }
}
