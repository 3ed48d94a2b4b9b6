//! Approximate substring matching.
//!
//! A field is scored by the smallest edit distance between the pattern and
//! any substring of the field, divided by the pattern length. Where the best
//! substring sits in the field does not matter.
//!
//! - "census" in "us census 2020" → 0.0
//! - "cenus" in "us census 2020" → 0.2 (one insertion)
//! - "xyz" in "roads" → 1.0

/// Minimum edit distance between `pattern` and any substring of `text`.
///
/// Every text position is a valid match start and end, so the result never
/// exceeds `pattern.len()`. Runs in `O(pattern.len() * text.len())` and stops
/// early once an exact hit is found.
pub fn substring_distance(pattern: &[char], text: &[char]) -> usize {
    let m = pattern.len();
    if m == 0 {
        return 0;
    }

    // col[i] = cost of matching pattern[..i] ending at the current text position.
    let mut col: Vec<usize> = (0..=m).collect();
    let mut best = m;

    for &tc in text {
        let mut diag = col[0];
        col[0] = 0;
        for i in 1..=m {
            let left = col[i];
            let cost = usize::from(pattern[i - 1] != tc);
            col[i] = (diag + cost).min(left + 1).min(col[i - 1] + 1);
            diag = left;
        }
        best = best.min(col[m]);
        if best == 0 {
            break;
        }
    }

    best
}

/// Normalized score in `[0, 1]`: 0 is an exact substring hit, 1 is no resemblance.
///
/// Both inputs are expected to be lowercased already.
pub fn field_score(pattern: &[char], text: &[char]) -> f64 {
    if pattern.is_empty() {
        return 0.0;
    }
    substring_distance(pattern, text) as f64 / pattern.len() as f64
}

/// Lowercase and split into chars, the form both index fields and queries are kept in.
pub fn normalize(text: &str) -> Vec<char> {
    text.to_lowercase().chars().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn distance(pattern: &str, text: &str) -> usize {
        substring_distance(&normalize(pattern), &normalize(text))
    }

    fn score(pattern: &str, text: &str) -> f64 {
        field_score(&normalize(pattern), &normalize(text))
    }

    #[test]
    fn test_exact_substring_anywhere() {
        assert_eq!(distance("census", "census"), 0);
        assert_eq!(distance("census", "us census 2020"), 0);
        assert_eq!(distance("2020", "us census 2020"), 0);
    }

    #[test]
    fn test_case_insensitive_after_normalize() {
        assert_eq!(distance("CENSUS", "Us Census"), 0);
    }

    #[test]
    fn test_single_edits() {
        // deletion, insertion, substitution
        assert_eq!(distance("cenus", "census"), 1);
        assert_eq!(distance("censsus", "census"), 1);
        assert_eq!(distance("cansus", "census"), 1);
    }

    #[test]
    fn test_distance_bounded_by_pattern_length() {
        assert_eq!(distance("xyz", "roads"), 3);
        assert_eq!(distance("abc", ""), 3);
    }

    #[test]
    fn test_empty_pattern() {
        assert_eq!(distance("", "anything"), 0);
        assert_eq!(score("", "anything"), 0.0);
    }

    #[test]
    fn test_score_normalized_by_pattern_length() {
        assert_eq!(score("census", "us census"), 0.0);
        assert!((score("cenus", "us census") - 0.2).abs() < 1e-9);
        assert_eq!(score("xyz", "roads"), 1.0);
    }

    #[test]
    fn test_non_ascii() {
        assert_eq!(distance("münchen", "Stadt München"), 0);
        assert_eq!(distance("munchen", "Stadt München"), 1);
    }
}
