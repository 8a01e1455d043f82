use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::isolation::Heuristic;

/// Plies that are played at random before any search starts; nothing discriminates moves on a nearly empty board.
pub const OPENING_RANDOM_PLIES: u32 = 2;

/// Per-move time limit of the game driver.
pub const TIME_LIMIT_MS: u64 = 150;

/// Depth of the fixed-depth minimax baseline opponent.
pub const MINIMAX_DEPTH: u32 = 3;

/*====================================================================================================================*/

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub heuristic: Heuristic,
    pub search: SearchParams,
    pub time: TimeControl,
    pub tournament: TournamentConfig,
    pub minimax_depth: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            heuristic: Heuristic::default(),
            search: SearchParams::default(),
            time: TimeControl::default(),
            tournament: TournamentConfig::default(),
            minimax_depth: MINIMAX_DEPTH,
        }
    }
}

impl Config {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_owned(),
            source,
        })?;

        Ok(serde_json::from_str(&content)?)
    }
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParams {
    /// below this ply count a random legal move is played instead of searching
    pub opening_random_plies: u32,
    /// stop deepening after this depth; unbounded if `None`
    pub max_depth: Option<u32>,
}

impl Default for SearchParams {
    fn default() -> Self {
        SearchParams {
            opening_random_plies: OPENING_RANDOM_PLIES,
            max_depth: None,
        }
    }
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeControl {
    pub time_limit_ms: u64,
    /// kept free at the end of the time limit to collect the move and stop the search
    pub buffer_ms: u64,
    /// how often the driver checks whether the agent finished early
    pub poll_ms: u64,
}

impl TimeControl {
    pub fn from_limit(time_limit: Duration) -> Self {
        TimeControl {
            time_limit_ms: time_limit.as_millis() as u64,
            ..TimeControl::default()
        }
    }

    pub fn time_limit(&self) -> Duration {
        Duration::from_millis(self.time_limit_ms)
    }

    pub fn buffer(&self) -> Duration {
        Duration::from_millis(self.buffer_ms)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_ms)
    }
}

impl Default for TimeControl {
    fn default() -> Self {
        TimeControl {
            time_limit_ms: TIME_LIMIT_MS,
            buffer_ms: 10,
            poll_ms: 5,
        }
    }
}

/*====================================================================================================================*/

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TournamentConfig {
    pub rounds: u32,
    /// play every random opening twice with the seats swapped
    pub fair_matches: bool,
    /// number of games run in parallel
    pub processes: usize,
    /// random plies played before the agents take over
    pub opening_plies: u32,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        TournamentConfig {
            rounds: 5,
            fair_matches: false,
            processes: num_cpus::get(),
            opening_plies: OPENING_RANDOM_PLIES,
        }
    }
}

/*====================================================================================================================*/
