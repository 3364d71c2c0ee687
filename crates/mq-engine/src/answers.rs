//! Tolerant comparison of free-text answers against canonical answers.
//!
//! Young players type answers in many shapes: stray spaces, a trailing percent
//! sign, `5rest2` instead of `5 rest 2`, or a decimal comma. The rules below
//! are tried in order; any match accepts the answer.

/// Check a free-text answer against the canonical answer string.
pub fn check(raw: &str, canonical: &str) -> bool {
    let clean = raw.trim().to_lowercase();
    let correct = canonical.trim().to_lowercase();

    // Exact match
    if clean == correct {
        return true;
    }

    // Whitespace-tolerant
    if strip_whitespace(&clean) == strip_whitespace(&correct) {
        return true;
    }

    // Percent format: "50" matches "50%"
    if let Some(stripped) = correct.strip_suffix('%') {
        if clean.replace('%', "") == stripped {
            return true;
        }
    }

    // Remainder format: "5rest2" matches "5 rest 2"
    if correct.contains("rest")
        && strip_whitespace(&clean.replace(',', "")) == strip_whitespace(&correct.replace(',', ""))
    {
        return true;
    }

    // Decimal comma: "3,5" matches "3.5"
    let numeric = clean.replace(',', ".");
    if numeric == correct {
        return true;
    }

    // Numeric comparison
    if let (Ok(user), Ok(expected)) = (numeric.parse::<f64>(), correct.parse::<f64>()) {
        return user == expected;
    }

    false
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_ignores_case_and_padding() {
        assert!(check("42", "42"));
        assert!(check("  42  ", "42"));
        assert!(check("Rest", "rest"));
    }

    #[test]
    fn whitespace_is_ignored() {
        assert!(check("4 2", "42"));
        assert!(check("5 rest 2", "5rest2"));
    }

    #[test]
    fn percent_suffix_is_optional() {
        assert!(check("50", "50%"));
        assert!(check("50%", "50%"));
        assert!(!check("50x", "50%"));
    }

    #[test]
    fn remainder_form_tolerates_spacing() {
        assert!(check("5 rest 2", "5 rest 2"));
        assert!(check("5rest2", "5 rest 2"));
        assert!(check("5  rest  2", "5 rest 2"));
        assert!(check("5, rest 2", "5 rest 2"));
        assert!(!check("2 rest 5", "5 rest 2"));
    }

    #[test]
    fn decimal_comma_matches_decimal_point() {
        assert!(check("3,5", "3.5"));
        assert!(check("3.5", "3.5"));
    }

    #[test]
    fn numeric_equality() {
        assert!(check("3.50", "3.5"));
        assert!(check("007", "7"));
        assert!(!check("8", "7"));
    }

    #[test]
    fn garbage_never_panics() {
        assert!(!check("", "7"));
        assert!(!check("seven", "7"));
        assert!(!check("1/2", "0.5"));
    }
}
