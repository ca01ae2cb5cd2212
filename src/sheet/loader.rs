use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::{ScoreRow, ScoreSheet, SheetColumns, SheetError};

/// Load one event score sheet from a CSV file with a header row.
///
/// Only the team and score columns are read; other columns are ignored.
pub fn load_sheet(path: &Path, columns: &SheetColumns) -> Result<ScoreSheet, SheetError> {
    let file = File::open(path).map_err(|source| SheetError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_sheet(file, path, columns)
}

/// Parse CSV from any reader. `path` is used for the sheet name and errors.
pub fn read_sheet<R: Read>(
    reader: R,
    path: &Path,
    columns: &SheetColumns,
) -> Result<ScoreSheet, SheetError> {
    let csv_error = |source: csv::Error| SheetError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let mut csv_reader = csv::ReaderBuilder::new().from_reader(reader);
    let headers = csv_reader.headers().map_err(csv_error)?.clone();

    let team_idx = column_index(&headers, &columns.team).ok_or_else(|| SheetError::MissingField {
        path: path.to_path_buf(),
        column: columns.team.clone(),
    })?;
    let score_idx =
        column_index(&headers, &columns.score).ok_or_else(|| SheetError::MissingField {
            path: path.to_path_buf(),
            column: columns.score.clone(),
        })?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(csv_error)?;
        let line = record.position().map(|p| p.line()).unwrap_or_default();

        // Record length always matches the header (csv rejects ragged rows)
        let team_label = record.get(team_idx).unwrap_or_default();
        let raw_score = record.get(score_idx).unwrap_or_default();

        let score = parse_score(raw_score).ok_or_else(|| SheetError::InvalidScore {
            path: path.to_path_buf(),
            line,
            value: raw_score.to_string(),
        })?;

        rows.push(ScoreRow::new(team_label, score));
    }

    Ok(ScoreSheet::from_rows(path.display().to_string(), rows))
}

fn column_index(headers: &csv::StringRecord, name: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}') == name)
}

fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|s| s.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::path::PathBuf;

    fn read(csv: &str) -> Result<ScoreSheet, SheetError> {
        read_sheet(csv.as_bytes(), Path::new("test.csv"), &SheetColumns::default())
    }

    #[test]
    fn test_reads_required_columns() {
        let sheet = read("TeamName,Score\n1-Alpha,80\n2-Beta,90.5\n").unwrap();
        assert_eq!(sheet.name, "test.csv");
        assert_eq!(
            sheet.rows,
            vec![ScoreRow::new("1-Alpha", 80.0), ScoreRow::new("2-Beta", 90.5)]
        );
    }

    #[test]
    fn test_extra_columns_ignored() {
        let sheet = read("Rank,TeamName,Members,Score\n1,7_Gamma,3,42.25\n").unwrap();
        assert_eq!(sheet.rows, vec![ScoreRow::new("7_Gamma", 42.25)]);
    }

    #[test]
    fn test_quoted_label_with_comma() {
        let sheet = read("TeamName,Score\n\"3-Rock, Paper\",10\n").unwrap();
        assert_eq!(sheet.rows[0].team_label, "3-Rock, Paper");
    }

    #[test]
    fn test_utf8_bom_header() {
        let sheet = read("\u{feff}TeamName,Score\nSolo,1\n").unwrap();
        assert_eq!(sheet.rows.len(), 1);
    }

    #[test]
    fn test_label_whitespace_preserved() {
        // Normalization trims later; the loader keeps the label as written
        let sheet = read("TeamName,Score\n  12 -Bar,5\n").unwrap();
        assert_eq!(sheet.rows[0].team_label, "  12 -Bar");
    }

    #[test]
    fn test_missing_score_column() {
        let err = read("TeamName,Points\nA,1\n").unwrap_err();
        match err {
            SheetError::MissingField { column, .. } => assert_eq!(column, "Score"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_team_column() {
        let err = read("Team,Score\nA,1\n").unwrap_err();
        assert!(matches!(err, SheetError::MissingField { .. }));
    }

    #[test]
    fn test_invalid_score() {
        let err = read("TeamName,Score\nA,1\nB,n/a\n").unwrap_err();
        match err {
            SheetError::InvalidScore { line, value, .. } => {
                assert_eq!(line, 3);
                assert_eq!(value, "n/a");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_empty_score_rejected() {
        assert!(matches!(
            read("TeamName,Score\nA,\n").unwrap_err(),
            SheetError::InvalidScore { .. }
        ));
    }

    #[test]
    fn test_ragged_row_rejected() {
        assert!(matches!(
            read("TeamName,Score\nA,1,extra\n").unwrap_err(),
            SheetError::Csv { .. }
        ));
    }

    #[test]
    fn test_custom_columns() {
        let columns = SheetColumns {
            team: "team".to_string(),
            score: "points".to_string(),
        };
        let sheet = read_sheet("team,points\nX,2\n".as_bytes(), Path::new("c.csv"), &columns).unwrap();
        assert_eq!(sheet.rows, vec![ScoreRow::new("X", 2.0)]);
    }

    #[test]
    fn test_load_missing_file() {
        let path = PathBuf::from("/nonexistent/hackrank/round.csv");
        let err = load_sheet(&path, &SheetColumns::default()).unwrap_err();
        assert!(matches!(err, SheetError::Io { .. }));
    }

    #[test]
    fn test_load_from_disk() {
        let path = env::temp_dir().join("hackrank_test_load_sheet.csv");
        std::fs::write(&path, "TeamName,Score\n1-Alpha,80\n").unwrap();

        let sheet = load_sheet(&path, &SheetColumns::default()).unwrap();
        assert_eq!(sheet.rows, vec![ScoreRow::new("1-Alpha", 80.0)]);

        let _ = std::fs::remove_file(&path);
    }
}
