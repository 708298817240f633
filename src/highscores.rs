//! High score leaderboard
//!
//! Top 10 runs, persisted as JSON wherever the embedding game chooses to
//! keep its data.

use std::fs;
use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Maximum number of entries kept
pub const MAX_HIGH_SCORES: usize = 10;

/// A single leaderboard entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub score: u64,
    /// Level reached when the run ended
    pub level: u32,
    /// Sim ticks the run lasted
    pub ticks: u64,
}

/// High score leaderboard
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScores {
    pub entries: Vec<HighScoreEntry>,
}

impl HighScores {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Check if a score qualifies for the leaderboard
    pub fn qualifies(&self, score: u64) -> bool {
        if score == 0 {
            return false;
        }
        if self.entries.len() < MAX_HIGH_SCORES {
            return true;
        }
        self.entries.last().map(|e| score > e.score).unwrap_or(true)
    }

    /// Get the rank a score would achieve (1-indexed, None if it misses)
    pub fn potential_rank(&self, score: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let rank = self.entries.iter().position(|e| score > e.score);
        Some(rank.unwrap_or(self.entries.len()) + 1)
    }

    /// Insert a qualifying score, keeping the board sorted and truncated.
    /// Returns the 1-indexed rank it landed at.
    pub fn add(&mut self, score: u64, level: u32, ticks: u64) -> Option<usize> {
        if !self.qualifies(score) {
            return None;
        }
        let idx = self
            .entries
            .iter()
            .position(|e| score > e.score)
            .unwrap_or(self.entries.len());
        self.entries.insert(idx, HighScoreEntry { score, level, ticks });
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(idx + 1)
    }

    /// Load the board from a JSON file. A corrupt file starts fresh
    /// rather than erroring the game out.
    pub fn load_from(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        match serde_json::from_str(&json) {
            Ok(scores) => Ok(scores),
            Err(err) => {
                log::warn!("high score file is corrupt, starting fresh: {err}");
                Ok(Self::default())
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(io::Error::other)?;
        fs::write(path, json)
    }
}
