pub mod discovery;
pub mod loader;

pub use discovery::{discover_sheets, load_dir, SORT_ORDER_WARNING};
pub use loader::{load_sheet, read_sheet};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SheetError {
    #[error("No such directory: {}", .0.display())]
    MissingSource(PathBuf),

    #[error("{}: missing required column '{}'", .path.display(), .column)]
    MissingField { path: PathBuf, column: String },

    #[error("{}:{}: invalid score '{}'", .path.display(), .line, .value)]
    InvalidScore {
        path: PathBuf,
        line: u64,
        value: String,
    },

    #[error("Failed to read {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed CSV in {}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("Invalid score sheet pattern")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to list score sheets")]
    Glob(#[from] glob::GlobError),
}

/// One row of an event score sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreRow {
    pub team_label: String,
    pub score: f64,
}

impl ScoreRow {
    pub fn new(team_label: impl Into<String>, score: f64) -> Self {
        Self {
            team_label: team_label.into(),
            score,
        }
    }
}

/// All rows of one event, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreSheet {
    /// Source path or event name, used in diagnostics only
    pub name: String,
    pub rows: Vec<ScoreRow>,
}

impl ScoreSheet {
    pub fn from_rows(name: impl Into<String>, rows: Vec<ScoreRow>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// A score sheet paired with the weight of its event.
#[derive(Debug, Clone, PartialEq)]
pub struct WeightedEvent {
    pub sheet: ScoreSheet,
    pub weight: f64,
}

/// Header names of the two required columns.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SheetColumns {
    /// Team label column (default: "TeamName")
    #[serde(default = "default_team_column")]
    pub team: String,

    /// Numeric score column (default: "Score")
    #[serde(default = "default_score_column")]
    pub score: String,
}

fn default_team_column() -> String {
    "TeamName".to_string()
}

fn default_score_column() -> String {
    "Score".to_string()
}

impl Default for SheetColumns {
    fn default() -> Self {
        Self {
            team: default_team_column(),
            score: default_score_column(),
        }
    }
}
