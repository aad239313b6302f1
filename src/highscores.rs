//! High score table
//!
//! Always holds exactly ten scores, highest first. Persisted as JSON in the
//! data directory; a missing or unreadable file starts the table at zeros.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::persistence::{self, PersistError};

/// Number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// High score leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScores {
    entries: Vec<u64>,
}

impl Default for HighScores {
    fn default() -> Self {
        Self::new()
    }
}

impl HighScores {
    /// File name inside the data directory
    pub const FILE_NAME: &'static str = "highscores.json";

    /// A table of ten zeros
    pub fn new() -> Self {
        Self {
            entries: vec![0; MAX_HIGH_SCORES],
        }
    }

    /// Build a table from arbitrary scores: sorted descending, then padded
    /// with zeros or cut to ten entries
    pub fn from_scores(mut scores: Vec<u64>) -> Self {
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.resize(MAX_HIGH_SCORES, 0);
        Self { entries: scores }
    }

    pub fn entries(&self) -> &[u64] {
        &self.entries
    }

    /// Insert a finished run's score.
    ///
    /// The score goes after any equal entries, the lowest entry drops off,
    /// and the 1-indexed rank is returned if the score stayed in the table.
    pub fn add_score(&mut self, score: u64) -> Option<usize> {
        let pos = self
            .entries
            .iter()
            .position(|&e| score > e)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, score);
        self.entries.truncate(MAX_HIGH_SCORES);

        (pos < MAX_HIGH_SCORES).then_some(pos + 1)
    }

    /// Get the top score
    pub fn top_score(&self) -> u64 {
        self.entries.first().copied().unwrap_or(0)
    }

    /// Load from a file, falling back to zeros on any failure
    pub fn load_from(path: &Path) -> Self {
        match persistence::load_json::<Vec<u64>>(path) {
            Ok(scores) => {
                log::info!("Loaded {} high scores", scores.len());
                Self::from_scores(scores)
            }
            Err(err) if err.is_not_found() => {
                log::info!("No high scores found, starting fresh");
                Self::new()
            }
            Err(err) => {
                log::warn!("Could not read high scores ({}), starting fresh", err);
                Self::new()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistError> {
        persistence::save_json(path, &self.entries)?;
        log::info!("High scores saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::scratch_dir;
    use proptest::prelude::*;

    #[test]
    fn test_new_table_is_ten_zeros() {
        let scores = HighScores::new();
        assert_eq!(scores.entries(), &[0; MAX_HIGH_SCORES]);
        assert_eq!(scores.top_score(), 0);
    }

    #[test]
    fn test_add_score_ranks() {
        let mut scores = HighScores::from_scores(vec![50, 40, 30]);
        assert_eq!(scores.add_score(45), Some(2));
        assert_eq!(&scores.entries()[..4], &[50, 45, 40, 30]);
        assert_eq!(scores.add_score(60), Some(1));
        assert_eq!(scores.top_score(), 60);
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_equal_score_goes_after_existing() {
        let mut scores = HighScores::from_scores(vec![50, 40]);
        assert_eq!(scores.add_score(40), Some(3));
    }

    #[test]
    fn test_score_too_low_drops_off() {
        let mut scores = HighScores::from_scores((1..=10).collect());
        assert_eq!(scores.add_score(1), None);
        assert_eq!(scores.entries().last(), Some(&1));
        assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
    }

    #[test]
    fn test_zero_score_on_fresh_table() {
        let mut scores = HighScores::new();
        assert_eq!(scores.add_score(0), None);
        assert_eq!(scores.entries(), &[0; MAX_HIGH_SCORES]);
    }

    #[test]
    fn test_from_scores_normalizes_length() {
        let long = HighScores::from_scores((0..15).collect());
        assert_eq!(long.entries().len(), MAX_HIGH_SCORES);
        assert_eq!(long.top_score(), 14);
        assert_eq!(long.entries().last(), Some(&5));

        let short = HighScores::from_scores(vec![3, 9]);
        assert_eq!(&short.entries()[..3], &[9, 3, 0]);
    }

    #[test]
    fn test_missing_file_gives_zeros() {
        let dir = scratch_dir("hs-missing");
        let scores = HighScores::load_from(&dir.join(HighScores::FILE_NAME));
        assert_eq!(scores, HighScores::new());
    }

    #[test]
    fn test_corrupt_file_gives_zeros() {
        let dir = scratch_dir("hs-corrupt");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(HighScores::FILE_NAME);
        std::fs::write(&path, "{\"oops\": true}").unwrap();

        assert_eq!(HighScores::load_from(&path), HighScores::new());
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_save_and_load() {
        let dir = scratch_dir("hs-save");
        let path = dir.join(HighScores::FILE_NAME);
        let mut scores = HighScores::new();
        scores.add_score(12);
        scores.add_score(7);

        scores.save_to(&path).unwrap();
        assert_eq!(HighScores::load_from(&path), scores);
        let _ = std::fs::remove_dir_all(&dir);
    }

    proptest! {
        #[test]
        fn prop_table_stays_sorted_and_full(
            start in proptest::collection::vec(0u64..1_000, 0..20),
            new_scores in proptest::collection::vec(0u64..1_000, 1..30),
        ) {
            let mut scores = HighScores::from_scores(start);
            for score in new_scores {
                let rank = scores.add_score(score);
                prop_assert_eq!(scores.entries().len(), MAX_HIGH_SCORES);
                prop_assert!(scores.entries().windows(2).all(|w| w[0] >= w[1]));
                if let Some(rank) = rank {
                    prop_assert_eq!(scores.entries()[rank - 1], score);
                }
            }
        }
    }
}
