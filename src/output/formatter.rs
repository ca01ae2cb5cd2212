use std::io::IsTerminal;
use std::path::Path;

use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use owo_colors::OwoColorize;
use serde::Serialize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{format_float, RankMarker, RankedRow};

const EMPTY_MESSAGE: &str = "No teams found.";
const SEPARATOR: &str = "  ";

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate_info(info: &str, max_width: usize) -> String {
    let chars: Vec<char> = info.chars().collect();
    if chars.len() <= max_width {
        info.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

/// Pad a rank marker to `width` terminal columns
fn pad_rank(rank: &RankMarker, width: usize) -> String {
    let padding = width.saturating_sub(rank.display_width());
    format!("{}{}", rank, " ".repeat(padding))
}

/// Format the leaderboard as an aligned table with a header row.
/// Columns: rank, id_team, final_score (right-aligned), and info when `show_info`.
/// Medal rows are bold when colors are enabled.
pub fn format_ranked_table(rows: &[RankedRow], show_info: bool, use_colors: bool) -> String {
    if rows.is_empty() {
        return EMPTY_MESSAGE.to_string();
    }

    let scores: Vec<String> = rows.iter().map(|r| format_float(r.team.final_score)).collect();

    let rank_width = rows
        .iter()
        .map(|r| r.rank.display_width())
        .max()
        .unwrap_or(0)
        .max("rank".len());
    let id_width = rows
        .iter()
        .map(|r| r.team.id_team.chars().count())
        .max()
        .unwrap_or(0)
        .max("id_team".len());
    let score_width = scores
        .iter()
        .map(|s| s.len())
        .max()
        .unwrap_or(0)
        .max("final_score".len());

    // Info gets whatever the terminal has left; pipes are never truncated
    let fixed_width = rank_width + id_width + score_width + SEPARATOR.len() * 3;
    let info_width = get_terminal_width().map(|w| w.saturating_sub(fixed_width).max(20));

    let mut header = format!(
        "{:<rank_width$}{sep}{:<id_width$}{sep}{:>score_width$}",
        "rank",
        "id_team",
        "final_score",
        sep = SEPARATOR,
    );
    if show_info {
        header.push_str(SEPARATOR);
        header.push_str("info");
    }
    let header = if use_colors {
        header.dimmed().to_string()
    } else {
        header
    };

    let mut lines = vec![header];
    for (row, score) in rows.iter().zip(&scores) {
        let rank_str = pad_rank(&row.rank, rank_width);
        let id_str = format!("{:<width$}", row.team.id_team, width = id_width);
        let score_str = format!("{:>width$}", score, width = score_width);

        let mut line = if use_colors && row.rank.is_medal() {
            format!(
                "{}{}{}{}{}",
                rank_str,
                SEPARATOR,
                id_str.bold(),
                SEPARATOR,
                score_str.bold()
            )
        } else {
            format!("{}{}{}{}{}", rank_str, SEPARATOR, id_str, SEPARATOR, score_str)
        };

        if show_info {
            let info = row.team.info();
            let info = match info_width {
                Some(width) => truncate_info(&info, width),
                None => info,
            };
            line.push_str(SEPARATOR);
            if use_colors {
                line.push_str(&info.dimmed().to_string());
            } else {
                line.push_str(&info);
            }
        }

        lines.push(line.trim_end().to_string());
    }

    lines.join("\n")
}

/// Format the leaderboard as tab-separated values for scripting
/// Columns: rank, id_team, final_score, info (no headers, no colors)
pub fn format_tsv(rows: &[RankedRow]) -> String {
    rows.iter()
        .map(|row| {
            format!(
                "{}\t{}\t{}\t{}",
                row.rank,
                row.team.id_team,
                format_float(row.team.final_score),
                row.team.info()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Serialize)]
struct RankedRecord<'a> {
    rank: RankMarker,
    id_team: &'a str,
    final_score: f64,
    info: String,
}

impl<'a> From<&'a RankedRow> for RankedRecord<'a> {
    fn from(row: &'a RankedRow) -> Self {
        Self {
            rank: row.rank,
            id_team: &row.team.id_team,
            final_score: row.team.final_score,
            info: row.team.info(),
        }
    }
}

/// Format the leaderboard as a pretty-printed JSON array
pub fn format_json(rows: &[RankedRow]) -> Result<String> {
    let records: Vec<RankedRecord> = rows.iter().map(RankedRecord::from).collect();
    serde_json::to_string_pretty(&records).context("Failed to serialize leaderboard")
}

/// Write the leaderboard to a CSV file atomically.
///
/// Columns: id_team, final_score, info, rank, with a header row and no row index.
/// The file is never left half-written if serialization fails.
pub fn write_csv(path: &Path, rows: &[RankedRow]) -> Result<()> {
    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;

    {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(&mut file);

        writer
            .write_record(["id_team", "final_score", "info", "rank"])
            .context("Failed to write CSV header")?;
        for row in rows {
            writer
                .write_record([
                    row.team.id_team.clone(),
                    format_float(row.team.final_score),
                    row.team.info(),
                    row.rank.to_string(),
                ])
                .with_context(|| format!("Failed to write row for team {}", row.team.id_team))?;
        }
        writer.flush().context("Failed to flush CSV output")?;
    }

    file.commit()
        .with_context(|| format!("Failed to save leaderboard to {}", path.display()))?;

    Ok(())
}
