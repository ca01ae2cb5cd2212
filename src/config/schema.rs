use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::sheet::SheetColumns;

/// Config file contents.
///
/// Example YAML:
/// ```yaml
/// columns:
///   team: TeamName
///   score: Score
/// show_info: true
/// events:
///   - name: qualifier
///     path: round1.csv
///     weight: 0.3
///   - path: round2.csv
///     weight: 0.7
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Header names of the team and score columns (default: TeamName, Score)
    #[serde(default)]
    pub columns: Option<SheetColumns>,

    /// Include the per-event breakdown in the output
    #[serde(default)]
    pub show_info: Option<bool>,

    #[serde(default)]
    pub events: Vec<EventConfig>,
}

/// One scored event: its score sheet and weight, paired explicitly.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EventConfig {
    pub name: Option<String>,
    /// Score sheet path; relative paths resolve against the config file's directory
    pub path: PathBuf,
    pub weight: f64,
}

impl EventConfig {
    /// Event name for diagnostics, falling back to the sheet path
    pub fn label(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.path.display().to_string())
    }
}
