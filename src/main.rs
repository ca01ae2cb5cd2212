use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;

use hackrank::buffered_eprintln;
use hackrank::config::{self, EventConfig};
use hackrank::output;
use hackrank::scoring::{self, AggregateError};
use hackrank::sheet::{self, SheetColumns, WeightedEvent};
use hackrank::stderr_buffer;

// Exit codes
const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_CONFIG: i32 = 2;
const EXIT_OUTPUT: i32 = 3;

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Aligned table with medals (default)
    Table,
    /// Tab-separated values, no header
    Tsv,
    /// Pretty-printed JSON array
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "hackrank")]
#[command(about = "Merge weighted hackathon leaderboards into one final ranking", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory of score sheets (*.csv), paired with --weight-list in filename order
    #[arg(short, long, conflicts_with = "event")]
    dir_path: Option<PathBuf>,

    /// Weight per score sheet, e.g. --weight-list 0.7 0.3
    #[arg(short, long, num_args = 1.., allow_negative_numbers = true)]
    weight_list: Vec<f64>,

    /// Score sheet with its weight, e.g. --event round1.csv=0.3 (repeatable)
    #[arg(short, long, value_name = "PATH=WEIGHT", value_parser = parse_event)]
    event: Vec<EventConfig>,

    /// Path to config file (defaults to ~/.config/hackrank/config.yaml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Include the per-event (weight, raw_score, weighted_score) breakdown
    #[arg(long)]
    show_info: bool,

    /// Also write the ranked table to this CSV file
    #[arg(short = 'o', long)]
    csv_output: Option<PathBuf>,

    /// Output format on stdout
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,

    /// Header of the team label column (default: TeamName)
    #[arg(long)]
    team_column: Option<String>,

    /// Header of the score column (default: Score)
    #[arg(long)]
    score_column: Option<String>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_event(s: &str) -> Result<EventConfig, String> {
    let (path, weight) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected PATH=WEIGHT, got '{}'", s))?;
    if path.is_empty() {
        return Err(format!("missing path in '{}'", s));
    }
    let weight = weight
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("invalid weight '{}': {}", weight, e))?;
    Ok(EventConfig {
        name: None,
        path: PathBuf::from(path),
        weight,
    })
}

/// Where the score sheets come from
#[derive(Debug, PartialEq)]
enum Sources {
    /// Each sheet carries its own weight
    Events(Vec<EventConfig>),
    /// Sheets discovered in a directory, weights paired by filename order
    Directory { dir: PathBuf, weights: Vec<f64> },
}

impl Sources {
    fn weights(&self) -> Vec<f64> {
        match self {
            Sources::Events(events) => events.iter().map(|e| e.weight).collect(),
            Sources::Directory { weights, .. } => weights.clone(),
        }
    }
}

/// Everything a run needs, resolved from CLI flags and the config file
#[derive(Debug)]
struct RunConfig {
    sources: Sources,
    columns: SheetColumns,
    show_info: bool,
    csv_output: Option<PathBuf>,
    format: OutputFormat,
    verbose: bool,
}

/// CLI sources win over the config file. An explicit --config is always
/// loaded (for columns and show_info); the default one only when no source
/// was given on the command line.
fn resolve_run_config(cli: Cli) -> anyhow::Result<RunConfig> {
    let has_cli_source = !cli.event.is_empty() || cli.dir_path.is_some();

    if !cli.weight_list.is_empty() && cli.dir_path.is_none() {
        if cli.event.is_empty() {
            anyhow::bail!("--weight-list requires --dir-path");
        }
        anyhow::bail!("--weight-list cannot be combined with --event; each --event carries its own weight");
    }

    let file_config = if cli.config.is_some() || !has_cli_source {
        Some(config::load_config(cli.config.clone())?)
    } else {
        None
    };

    let sources = if !cli.event.is_empty() {
        Sources::Events(cli.event)
    } else if let Some(dir) = cli.dir_path {
        Sources::Directory {
            dir,
            weights: cli.weight_list,
        }
    } else {
        let events = file_config
            .as_ref()
            .map(|c| c.events.clone())
            .unwrap_or_default();
        if events.is_empty() {
            anyhow::bail!(
                "No score sheets configured. Pass --dir-path, --event or add events to the config file"
            );
        }
        Sources::Events(events)
    };

    let mut columns = file_config
        .as_ref()
        .and_then(|c| c.columns.clone())
        .unwrap_or_default();
    if let Some(team) = cli.team_column {
        columns.team = team;
    }
    if let Some(score) = cli.score_column {
        columns.score = score;
    }

    let show_info = cli.show_info
        || file_config
            .as_ref()
            .and_then(|c| c.show_info)
            .unwrap_or(false);

    Ok(RunConfig {
        sources,
        columns,
        show_info,
        csv_output: cli.csv_output,
        format: cli.format,
        verbose: cli.verbose,
    })
}

/// Failure of one run: exit code and the message for stderr
type RunError = (i32, String);

fn input_error(e: impl Into<anyhow::Error>) -> RunError {
    (EXIT_INPUT, format!("Input error: {:#}", e.into()))
}

/// Load, aggregate, rank, export, and render the leaderboard.
///
/// Returns the text for stdout. Every failure returns before anything is
/// printed, and the CSV export runs before rendering is handed back, so a
/// failed run never leaves a displayed or written partial table.
fn run(config: &RunConfig, use_colors: bool) -> Result<String, RunError> {
    let weights = config.sources.weights();
    if let Err(errors) = scoring::validate_weights(&weights) {
        let details = errors
            .iter()
            .map(|e| format!("  - {}", e))
            .collect::<Vec<_>>()
            .join("\n");
        return Err((EXIT_CONFIG, format!("Weight errors:\n{}", details)));
    }
    for warning in scoring::negative_weight_warnings(&weights) {
        buffered_eprintln!("Warning: {}", warning);
    }
    if let Some(warning) = scoring::weight_sum_warning(&weights) {
        buffered_eprintln!("Warning: {}", warning);
    }

    // Load score sheets and aggregate
    let aggregated = match &config.sources {
        Sources::Events(events) => {
            let mut weighted = Vec::with_capacity(events.len());
            for event in events {
                let sheet = sheet::load_sheet(&event.path, &config.columns).map_err(input_error)?;
                if config.verbose {
                    eprintln!(
                        "Loaded {} rows from {} (weight {})",
                        sheet.rows.len(),
                        event.label(),
                        event.weight
                    );
                }
                weighted.push(WeightedEvent {
                    sheet,
                    weight: event.weight,
                });
            }
            scoring::aggregate_events(&weighted, config.show_info)
        }
        Sources::Directory { dir, weights } => {
            let sheets = sheet::load_dir(dir, &config.columns).map_err(input_error)?;
            if config.verbose {
                for (sheet, weight) in sheets.iter().zip(weights) {
                    eprintln!(
                        "Loaded {} rows from {} (weight {})",
                        sheet.rows.len(),
                        sheet.name,
                        weight
                    );
                }
            }
            scoring::aggregate(&sheets, weights, config.show_info)
        }
    };

    let teams = match aggregated {
        Ok(t) => t,
        Err(e @ AggregateError::CountMismatch { .. }) => {
            return Err((EXIT_CONFIG, format!("Config error: {}", e)))
        }
        Err(e) => return Err(input_error(e)),
    };

    let team_count = teams.len();
    let ranked = scoring::rank(teams);

    let rendered = match config.format {
        OutputFormat::Table => output::format_ranked_table(&ranked, config.show_info, use_colors),
        OutputFormat::Tsv => output::format_tsv(&ranked),
        OutputFormat::Json => output::format_json(&ranked)
            .map_err(|e| (EXIT_OUTPUT, format!("Output error: {:#}", e)))?,
    };

    if let Some(path) = &config.csv_output {
        output::write_csv(path, &ranked)
            .map_err(|e| (EXIT_OUTPUT, format!("Output error: {:#}", e)))?;
        if config.verbose {
            eprintln!("Wrote {} teams to {}", team_count, path.display());
        }
    }

    if config.verbose {
        eprintln!("Ranked {} teams", team_count);
    }

    Ok(rendered)
}

fn main() {
    let cli = Cli::parse();
    let start_time = Instant::now();

    let config = match resolve_run_config(cli) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Warnings print after the leaderboard (or before the error message)
    stderr_buffer::activate();

    match run(&config, output::should_use_colors()) {
        Ok(rendered) => {
            println!("{}", rendered);
            stderr_buffer::flush();
        }
        Err((code, message)) => {
            stderr_buffer::flush();
            eprintln!("{}", message);
            std::process::exit(code);
        }
    }

    if config.verbose {
        eprintln!();
        eprintln!("Total: {:?}", start_time.elapsed());
    }

    std::process::exit(EXIT_SUCCESS);
}
