use std::path::{Path, PathBuf};

use glob::{MatchOptions, Pattern};

use super::{load_sheet, ScoreSheet, SheetColumns, SheetError};

/// Weights are paired with directory sheets by filename order only.
pub const SORT_ORDER_WARNING: &str =
    "Files are sorted by name, please check all of your filenames before.";

/// List the `*.csv` score sheets directly inside `dir`, sorted by filename.
///
/// Fails with `MissingSource` before touching any file when `dir` is not an
/// existing directory. Emits the sort-order warning on success.
pub fn discover_sheets(dir: &Path) -> Result<Vec<PathBuf>, SheetError> {
    if !dir.is_dir() {
        return Err(SheetError::MissingSource(dir.to_path_buf()));
    }

    crate::buffered_eprintln!("Warning: {}", SORT_ORDER_WARNING);

    let escaped = Pattern::escape(&dir.to_string_lossy());
    let pattern = Path::new(&escaped).join("*.csv");

    // Dotfiles (e.g. "._round1.csv" resource forks) are not score sheets
    let options = MatchOptions {
        require_literal_leading_dot: true,
        ..MatchOptions::new()
    };
    let mut paths = glob::glob_with(&pattern.to_string_lossy(), options)?
        .collect::<Result<Vec<_>, _>>()?;
    paths.sort();
    Ok(paths)
}

/// Discover and load every score sheet in `dir`, in filename order.
pub fn load_dir(dir: &Path, columns: &SheetColumns) -> Result<Vec<ScoreSheet>, SheetError> {
    discover_sheets(dir)?
        .iter()
        .map(|path| load_sheet(path, columns))
        .collect()
}
