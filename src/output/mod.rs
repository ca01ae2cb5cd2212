pub mod formatter;

pub use formatter::{format_json, format_ranked_table, format_tsv, should_use_colors, write_csv};
