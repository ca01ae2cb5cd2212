use super::engine::AggregateError;

/// Derive the canonical team id from a score-sheet label.
///
/// Labels like "12-AwesomeName", "12_AwesomeName" and "  012 -Other" all map
/// to "12" so the same team lines up across event sheets. The `-` separator is
/// checked before `_`. A label with no separator is kept verbatim (trimmed).
pub fn normalize_team_id(label: &str) -> Result<String, AggregateError> {
    let prefix = if let Some((prefix, _)) = label.split_once('-') {
        prefix
    } else if let Some((prefix, _)) = label.split_once('_') {
        prefix
    } else {
        return Ok(label.trim().to_string());
    };

    let prefix = prefix.trim();
    canonical_integer(prefix).ok_or_else(|| AggregateError::MalformedTeamLabel {
        label: label.to_string(),
        prefix: prefix.to_string(),
    })
}

/// Decimal text of an optionally signed run of ASCII digits, without a `+`
/// sign or leading zeros. Any length is accepted.
fn canonical_integer(text: &str) -> Option<String> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'+') => (false, &text[1..]),
        Some(b'-') => (true, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        Some("0".to_string())
    } else if negative {
        Some(format!("-{}", significant))
    } else {
        Some(significant.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dash_and_underscore_collapse() {
        assert_eq!(normalize_team_id("12-Foo").unwrap(), "12");
        assert_eq!(normalize_team_id("12_Foo").unwrap(), "12");
        assert_eq!(normalize_team_id("  12 -Bar").unwrap(), "12");
    }

    #[test]
    fn test_leading_zeros_dropped() {
        assert_eq!(normalize_team_id("007-Bond").unwrap(), "7");
        assert_eq!(normalize_team_id("+3_Plus").unwrap(), "3");
    }

    #[test]
    fn test_long_numeric_prefix_accepted() {
        assert_eq!(
            normalize_team_id("12345678901234567890-BigTeam").unwrap(),
            "12345678901234567890"
        );
        assert_eq!(
            normalize_team_id("000123456789012345678901234_Huge").unwrap(),
            "123456789012345678901234"
        );
    }

    #[test]
    fn test_zero_prefix() {
        assert_eq!(normalize_team_id("000-Zero").unwrap(), "0");
        assert_eq!(normalize_team_id("+0_Zero").unwrap(), "0");
    }

    #[test]
    fn test_sign_without_digits_fails() {
        assert!(normalize_team_id("+-Team").is_err());
        assert!(normalize_team_id("1 2-Team").is_err());
    }

    #[test]
    fn test_no_separator_kept_verbatim() {
        assert_eq!(normalize_team_id("TeamX").unwrap(), "TeamX");
        assert_eq!(normalize_team_id("  Team X  ").unwrap(), "Team X");
        // Digits alone are not coerced
        assert_eq!(normalize_team_id("007").unwrap(), "007");
    }

    #[test]
    fn test_dash_checked_before_underscore() {
        assert_eq!(normalize_team_id("4-my_team").unwrap(), "4");
        let err = normalize_team_id("my_team-4").unwrap_err();
        assert_eq!(
            err,
            AggregateError::MalformedTeamLabel {
                label: "my_team-4".to_string(),
                prefix: "my_team".to_string(),
            }
        );
    }

    #[test]
    fn test_non_integer_prefix_fails() {
        assert!(normalize_team_id("Alpha-Team").is_err());
        assert!(normalize_team_id("-5Team").is_err());
        assert!(normalize_team_id("Team_Rocket").is_err());
    }

    #[test]
    fn test_error_message_names_label() {
        let err = normalize_team_id("abc-def").unwrap_err();
        assert!(err.to_string().contains("abc-def"));
    }
}
