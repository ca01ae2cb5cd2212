pub mod engine;
pub mod numeric;
pub mod rank;
pub mod team_id;
pub mod validation;

pub use engine::{aggregate, aggregate_events, AggregateError, TeamScore, WeightedContribution};
pub use numeric::{format_float, round4};
pub use rank::{rank, RankMarker, RankedRow};
pub use team_id::normalize_team_id;
pub use validation::{negative_weight_warnings, validate_weights, weight_sum_warning};
