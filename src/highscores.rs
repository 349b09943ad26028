//! High score leaderboard and score store
//!
//! Persisted as JSON through the `persistence` module, tracks top 10 scores.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::persistence;

/// Maximum number of high scores to keep
pub const MAX_HIGH_SCORES: usize = 10;

/// Places shown on the scoreboard; a fresh board has this many zero entries
pub const SCOREBOARD_PLACES: usize = 3;

/// Where finished runs are recorded
pub trait ScoreStore {
    /// Record the final score of a run
    fn record_score(&mut self, score: u64) -> Result<()>;

    /// Best `n` scores, highest first
    fn top_scores(&self, n: usize) -> Vec<u64>;
}

/// A single high score entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    /// Final score of the run
    pub score: u64,
    /// Unix timestamp (ms) when achieved
    pub timestamp: u64,
}

/// High score leaderboard, sorted descending
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    /// Create empty leaderboard
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Fresh board with every scoreboard place at zero
    pub fn seeded() -> Self {
        Self {
            entries: vec![
                HighScoreEntry {
                    score: 0,
                    timestamp: 0,
                };
                SCOREBOARD_PLACES
            ],
        }
    }

    /// Check if a score makes it onto the board
    pub fn qualifies(&self, score: u64) -> bool {
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        // Check if score beats the lowest entry
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Add a new score to the leaderboard (if it qualifies)
    /// Returns the rank achieved (1-indexed) or None if didn't qualify
    pub fn add_score(&mut self, score: u64, timestamp: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }

        let entry = HighScoreEntry { score, timestamp };

        // Ties go below existing entries
        let pos = self.entries.iter().position(|e| score > e.score);
        let rank = match pos {
            Some(i) => {
                self.entries.insert(i, entry);
                i + 1
            }
            None => {
                self.entries.push(entry);
                self.entries.len()
            }
        };

        self.entries.truncate(MAX_HIGH_SCORES);

        Some(rank)
    }
}

impl ScoreStore for HighScores {
    fn record_score(&mut self, score: u64) -> Result<()> {
        self.add_score(score, unix_millis());
        Ok(())
    }

    fn top_scores(&self, n: usize) -> Vec<u64> {
        self.entries.iter().take(n).map(|e| e.score).collect()
    }
}

/// Leaderboard backed by a JSON file, saved on every recorded score
#[derive(Debug)]
pub struct FileScoreStore {
    path: PathBuf,
    scores: HighScores,
}

impl FileScoreStore {
    /// Open the store at `path`, creating a seeded board if none exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let scores = match persistence::load_json::<HighScores>(&path)? {
            Some(scores) => {
                log::info!("Loaded {} high scores from {}", scores.entries.len(), path.display());
                scores
            }
            None => {
                let scores = HighScores::seeded();
                persistence::save_json(&path, &scores)?;
                log::info!("Created high score table at {}", path.display());
                scores
            }
        };
        Ok(Self { path, scores })
    }
}

impl ScoreStore for FileScoreStore {
    fn record_score(&mut self, score: u64) -> Result<()> {
        match self.scores.add_score(score, unix_millis()) {
            Some(rank) => log::info!("Score {} recorded at rank {}", score, rank),
            None => log::info!("Score {} did not make the leaderboard", score),
        }
        persistence::save_json(&self.path, &self.scores)
    }

    fn top_scores(&self, n: usize) -> Vec<u64> {
        self.scores.top_scores(n)
    }
}

fn unix_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// "1st", "2nd", "3rd", "4th", ...
pub fn ordinal(place: usize) -> String {
    let suffix = match (place % 10, place % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", place, suffix)
}
