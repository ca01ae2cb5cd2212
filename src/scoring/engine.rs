use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;
use thiserror::Error;

use super::numeric::{format_float, round4};
use super::team_id::normalize_team_id;
use crate::sheet::{ScoreSheet, WeightedEvent};

#[derive(Debug, Error, PartialEq)]
pub enum AggregateError {
    #[error("score sheets should equal weights, but {sheets} != {weights}")]
    CountMismatch { sheets: usize, weights: usize },

    #[error("team label '{label}' has a non-integer id prefix '{prefix}'")]
    MalformedTeamLabel { label: String, prefix: String },
}

/// One event's share of a team's final score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WeightedContribution {
    pub weight: f64,
    pub raw_score: f64,      // round(score, 4)
    pub weighted_score: f64, // round(weight * score, 4)
}

#[derive(Debug, Clone, PartialEq)]
pub struct TeamScore {
    pub id_team: String,
    pub final_score: f64,
    /// Per-event contributions in input order; `None` when breakdown is off
    pub breakdown: Option<Vec<WeightedContribution>>,
}

impl TeamScore {
    /// Breakdown rendered as "[(w, raw, weighted), ...]", or empty text when
    /// breakdown was not requested.
    pub fn info(&self) -> String {
        let Some(breakdown) = &self.breakdown else {
            return String::new();
        };

        let entries = breakdown
            .iter()
            .map(|c| {
                format!(
                    "({}, {}, {})",
                    format_float(c.weight),
                    format_float(c.raw_score),
                    format_float(c.weighted_score)
                )
            })
            .collect::<Vec<_>>()
            .join(", ");
        format!("[{}]", entries)
    }
}

/// Aggregate score sheets into per-team weighted final scores.
///
/// `sheets` and `weights` are paired by position and must have equal length.
///
/// Rounding policy: the running total of each team is rounded to 4 decimals
/// after every single addition, not only once at the end. This can differ
/// from rounding the exact sum (two contributions of 0.00004 total 0.0, not
/// 0.0001), and must stay this way to reproduce earlier leaderboards.
///
/// The result is sorted by final score descending, ties broken by team id
/// descending.
pub fn aggregate(
    sheets: &[ScoreSheet],
    weights: &[f64],
    include_breakdown: bool,
) -> Result<Vec<TeamScore>, AggregateError> {
    if sheets.len() != weights.len() {
        return Err(AggregateError::CountMismatch {
            sheets: sheets.len(),
            weights: weights.len(),
        });
    }

    accumulate(weights.iter().copied().zip(sheets), include_breakdown)
}

/// Same as [`aggregate`], for sheets already paired with their weight.
pub fn aggregate_events(
    events: &[WeightedEvent],
    include_breakdown: bool,
) -> Result<Vec<TeamScore>, AggregateError> {
    accumulate(
        events.iter().map(|event| (event.weight, &event.sheet)),
        include_breakdown,
    )
}

fn accumulate<'a>(
    weighted_sheets: impl IntoIterator<Item = (f64, &'a ScoreSheet)>,
    include_breakdown: bool,
) -> Result<Vec<TeamScore>, AggregateError> {
    let mut final_scores: HashMap<String, f64> = HashMap::new();
    let mut breakdowns: HashMap<String, Vec<WeightedContribution>> = HashMap::new();

    for (weight, sheet) in weighted_sheets {
        for row in &sheet.rows {
            let id_team = normalize_team_id(&row.team_label)?;

            if include_breakdown {
                breakdowns
                    .entry(id_team.clone())
                    .or_default()
                    .push(WeightedContribution {
                        weight,
                        raw_score: round4(row.score),
                        weighted_score: round4(weight * row.score),
                    });
            }

            let total = final_scores.entry(id_team).or_insert(0.0);
            *total = round4(*total + weight * row.score);
        }
    }

    let mut teams: Vec<TeamScore> = final_scores
        .into_iter()
        .map(|(id_team, final_score)| {
            let breakdown = if include_breakdown {
                Some(breakdowns.remove(&id_team).unwrap_or_default())
            } else {
                None
            };
            TeamScore {
                id_team,
                final_score,
                breakdown,
            }
        })
        .collect();

    sort_teams(&mut teams);
    Ok(teams)
}

/// Sort by final score descending, then by team id descending.
pub fn sort_teams(teams: &mut [TeamScore]) {
    teams.sort_by(|a, b| {
        b.final_score
            .partial_cmp(&a.final_score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.id_team.cmp(&a.id_team))
    });
}
