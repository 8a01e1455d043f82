use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::search::DeepeningReport;

/// What an agent carries from one turn to the next within a game. Opaque to the search.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    /// turns on which a search (or random opening) ran
    pub turns: u32,
    /// deepest completed depth of the previous turn
    pub last_depth: Option<u32>,
    /// deepest completed depth of any turn so far
    pub deepest: u32,
}

impl Context {
    pub fn record(&mut self, report: &DeepeningReport) {
        self.turns += 1;

        if report.random_opening {
            self.last_depth = None;
        } else {
            self.last_depth = Some(report.depth_reached);
            self.deepest = self.deepest.max(report.depth_reached);
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
