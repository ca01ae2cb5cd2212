/// Allowed drift of the weight sum from 1.0 before warning
const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Validate event weights before any sheet is aggregated.
/// Returns all validation errors at once (not just the first).
pub fn validate_weights(weights: &[f64]) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();

    for (i, weight) in weights.iter().enumerate() {
        if !weight.is_finite() {
            errors.push(format!("weights[{}]: must be a finite number, got {}", i, weight));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Negative weights are allowed (they subtract an event's score) but unusual.
pub fn negative_weight_warnings(weights: &[f64]) -> Vec<String> {
    weights
        .iter()
        .enumerate()
        .filter(|(_, weight)| **weight < 0.0)
        .map(|(i, weight)| {
            format!(
                "weights[{}] is negative ({}); that event lowers final scores",
                i, weight
            )
        })
        .collect()
}

/// Weights conventionally sum to 1.0. Anything else is allowed but worth a warning.
pub fn weight_sum_warning(weights: &[f64]) -> Option<String> {
    if weights.is_empty() {
        return None;
    }
    let sum: f64 = weights.iter().sum();
    if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
        Some(format!(
            "Weights sum to {}, not 1.0; final scores are not a weighted average",
            sum
        ))
    } else {
        None
    }
}
