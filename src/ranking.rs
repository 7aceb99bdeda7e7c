//! Local run leaderboard
//!
//! Tracks the top 10 finished runs and estimates a global rank from the
//! high score.

use serde::{Deserialize, Serialize};

/// Maximum number of runs to keep
pub const MAX_RANKED_RUNS: usize = 10;

/// Nominal size of the global player pool used for rank estimates
pub const NOMINAL_PLAYERS: u64 = 1247;
/// Score at which the estimate reaches rank 1
const TOP_RANK_SCORE: f64 = 50_000.0;

/// A single finished run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRun {
    pub score: u64,
    /// Level reached
    pub level: u32,
    /// Unix timestamp (ms) when achieved
    pub timestamp: f64,
}

/// Run leaderboard, sorted descending by score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Ranking {
    pub entries: Vec<RankedRun>,
}

impl Ranking {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert a finished run in score order.
    ///
    /// Returns the 1-based rank, or `None` when the run scored nothing or
    /// would land past the last kept slot. Ties rank below earlier runs.
    pub fn add_run(&mut self, score: u64, level: u32, timestamp: f64) -> Option<usize> {
        let slot = self.entries.partition_point(|e| e.score >= score);
        if score == 0 || slot >= MAX_RANKED_RUNS {
            return None;
        }
        self.entries.insert(
            slot,
            RankedRun {
                score,
                level,
                timestamp,
            },
        );
        self.entries.truncate(MAX_RANKED_RUNS);
        Some(slot + 1)
    }

    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.score)
    }
}

/// Estimated global rank for a high score (1 = best)
pub fn estimated_rank(high_score: u64) -> u64 {
    let share = 1.0 - high_score as f64 / TOP_RANK_SCORE;
    ((NOMINAL_PLAYERS as f64 * share).floor() as i64).max(1) as u64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_score_is_not_ranked() {
        let mut ranking = Ranking::new();
        assert_eq!(ranking.add_run(0, 1, 0.0), None);
        assert!(ranking.entries.is_empty());
    }

    #[test]
    fn test_runs_sorted_and_truncated() {
        let mut ranking = Ranking::new();
        for score in 1..=12u64 {
            ranking.add_run(score * 100, 1, score as f64);
        }
        assert_eq!(ranking.entries.len(), MAX_RANKED_RUNS);
        assert_eq!(ranking.top_score(), Some(1200));
        assert_eq!(ranking.entries.last().map(|e| e.score), Some(300));
        let before = ranking.clone();
        assert_eq!(ranking.add_run(250, 1, 98.0), None);
        assert_eq!(ranking, before);
        assert_eq!(ranking.add_run(1150, 2, 99.0), Some(2));
        assert_eq!(ranking.entries.last().map(|e| e.score), Some(400));
    }

    #[test]
    fn test_ties_rank_below_earlier_runs() {
        let mut ranking = Ranking::new();
        assert_eq!(ranking.add_run(500, 1, 1.0), Some(1));
        assert_eq!(ranking.add_run(500, 2, 2.0), Some(2));
        assert_eq!(ranking.entries[0].timestamp, 1.0);

        // A full board rejects a tie with its last entry
        for i in 0..8 {
            ranking.add_run(100, 1, 10.0 + i as f64);
        }
        assert_eq!(ranking.entries.len(), MAX_RANKED_RUNS);
        let before = ranking.clone();
        assert_eq!(ranking.add_run(100, 3, 50.0), None);
        assert_eq!(ranking, before);
        assert_eq!(ranking.add_run(101, 3, 51.0), Some(3));
        assert_eq!(ranking.entries.len(), MAX_RANKED_RUNS);
    }

    #[test]
    fn test_estimated_rank() {
        assert_eq!(estimated_rank(0), NOMINAL_PLAYERS);
        assert_eq!(estimated_rank(25_000), 623);
        assert_eq!(estimated_rank(50_000), 1);
        assert_eq!(estimated_rank(90_000), 1);
    }
}
