/// Round to 4 decimal places.
///
/// Rounds the exact binary value half-to-even and re-parses the decimal text,
/// so `round4(x)` is the f64 nearest to the 4-place decimal and compares equal
/// to literals like `77.0` or `0.0001`.
pub fn round4(value: f64) -> f64 {
    if !value.is_finite() {
        return value;
    }
    format!("{:.4}", value).parse().unwrap_or(value)
}

/// Format a score as shortest round-trip decimal text.
/// Integral values keep a trailing ".0" (e.g. "81.0", "0.7", "56.125").
pub fn format_float(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.1}", value)
    } else {
        format!("{}", value)
    }
}
