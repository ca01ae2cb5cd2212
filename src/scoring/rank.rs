use std::fmt;

use serde::{Serialize, Serializer};

use super::engine::TeamScore;

/// Rank assigned to each distinct final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMarker {
    Gold,
    Silver,
    Bronze,
    /// 1-based position among distinct scores, always >= 4
    Place(usize),
}

impl RankMarker {
    /// Marker for the n-th distinct score (1-based).
    pub fn from_position(position: usize) -> Self {
        match position {
            1 => RankMarker::Gold,
            2 => RankMarker::Silver,
            3 => RankMarker::Bronze,
            n => RankMarker::Place(n),
        }
    }

    pub fn position(&self) -> usize {
        match self {
            RankMarker::Gold => 1,
            RankMarker::Silver => 2,
            RankMarker::Bronze => 3,
            RankMarker::Place(n) => *n,
        }
    }

    pub fn is_medal(&self) -> bool {
        !matches!(self, RankMarker::Place(_))
    }

    /// Terminal columns taken by the rendered marker (medal emoji are double width).
    pub fn display_width(&self) -> usize {
        match self {
            RankMarker::Place(n) => n.to_string().len(),
            _ => 2,
        }
    }
}

impl fmt::Display for RankMarker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RankMarker::Gold => write!(f, "🥇"),
            RankMarker::Silver => write!(f, "🥈"),
            RankMarker::Bronze => write!(f, "🥉"),
            RankMarker::Place(n) => write!(f, "{}", n),
        }
    }
}

// Medals serialize as their emoji, places as plain integers
impl Serialize for RankMarker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            RankMarker::Place(n) => serializer.serialize_u64(*n as u64),
            medal => serializer.collect_str(medal),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RankedRow {
    pub rank: RankMarker,
    pub team: TeamScore,
}

/// Attach a rank marker to every team.
///
/// Distinct final scores are numbered in the order they first appear (the
/// aggregator's descending sort), and every team sharing a score shares its
/// marker. With fewer than three distinct scores only the available medals
/// are handed out.
pub fn rank(teams: Vec<TeamScore>) -> Vec<RankedRow> {
    let mut distinct: Vec<f64> = Vec::new();

    teams
        .into_iter()
        .map(|team| {
            let index = match distinct.iter().position(|s| *s == team.final_score) {
                Some(index) => index,
                None => {
                    distinct.push(team.final_score);
                    distinct.len() - 1
                }
            };
            RankedRow {
                rank: RankMarker::from_position(index + 1),
                team,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn team(id: &str, score: f64) -> TeamScore {
        TeamScore {
            id_team: id.to_string(),
            final_score: score,
            breakdown: None,
        }
    }

    fn markers(rows: &[RankedRow]) -> Vec<RankMarker> {
        rows.iter().map(|r| r.rank).collect()
    }

    #[test]
    fn test_medals_then_places() {
        let rows = rank(vec![
            team("a", 90.0),
            team("b", 80.0),
            team("c", 70.0),
            team("d", 60.0),
            team("e", 50.0),
        ]);
        assert_eq!(
            markers(&rows),
            vec![
                RankMarker::Gold,
                RankMarker::Silver,
                RankMarker::Bronze,
                RankMarker::Place(4),
                RankMarker::Place(5),
            ]
        );
    }

    #[test]
    fn test_ties_share_marker() {
        let rows = rank(vec![
            team("a", 90.0),
            team("b", 90.0),
            team("c", 80.0),
            team("d", 70.0),
            team("e", 70.0),
            team("f", 60.0),
        ]);
        assert_eq!(
            markers(&rows),
            vec![
                RankMarker::Gold,
                RankMarker::Gold,
                RankMarker::Silver,
                RankMarker::Bronze,
                RankMarker::Bronze,
                RankMarker::Place(4),
            ]
        );
    }

    #[test]
    fn test_fewer_than_three_distinct_scores() {
        let rows = rank(vec![team("a", 5.0), team("b", 5.0), team("c", 1.0)]);
        assert_eq!(
            markers(&rows),
            vec![RankMarker::Gold, RankMarker::Gold, RankMarker::Silver]
        );

        let rows = rank(vec![team("only", 1.0)]);
        assert_eq!(markers(&rows), vec![RankMarker::Gold]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_marker_display() {
        assert_eq!(RankMarker::Gold.to_string(), "🥇");
        assert_eq!(RankMarker::Silver.to_string(), "🥈");
        assert_eq!(RankMarker::Bronze.to_string(), "🥉");
        assert_eq!(RankMarker::Place(7).to_string(), "7");
    }

    #[test]
    fn test_marker_position_roundtrip() {
        for position in 1..=6 {
            assert_eq!(RankMarker::from_position(position).position(), position);
        }
        assert!(RankMarker::Bronze.is_medal());
        assert!(!RankMarker::Place(4).is_medal());
    }

    #[test]
    fn test_marker_serialize() {
        assert_eq!(serde_json::to_string(&RankMarker::Gold).unwrap(), "\"🥇\"");
        assert_eq!(serde_json::to_string(&RankMarker::Place(4)).unwrap(), "4");
    }
}
