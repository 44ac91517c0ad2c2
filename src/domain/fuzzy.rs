//! Fuzzy grading of free-text answers against accepted aliases.
//!
//! Matching is two-pass: any exact (normalized) alias wins outright, then the
//! aliases are tried in list order against an edit-distance tolerance that
//! grows with the alias length. The first alias within tolerance is reported,
//! even if a later alias would be closer.

use tracing::{instrument, trace};

use crate::domain::entities::MatchResult;

/// Alias-length dependent edit-distance tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TolerancePolicy {
    /// Aliases longer than this (in chars) get `long_tolerance`
    pub long_alias_len: usize,
    pub short_tolerance: usize,
    pub long_tolerance: usize,
}

impl Default for TolerancePolicy {
    fn default() -> Self {
        Self {
            long_alias_len: 5,
            short_tolerance: 1,
            long_tolerance: 2,
        }
    }
}

impl TolerancePolicy {
    /// Maximum accepted distance for an alias of `alias_len` chars.
    pub fn tolerance_for(&self, alias_len: usize) -> usize {
        if alias_len > self.long_alias_len {
            self.long_tolerance
        } else {
            self.short_tolerance
        }
    }
}

/// Grades guesses against alias lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FuzzyMatcher {
    policy: TolerancePolicy,
}

impl FuzzyMatcher {
    pub fn new(policy: TolerancePolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> TolerancePolicy {
        self.policy
    }

    /// Decide whether `input` names the concept behind `aliases`.
    #[instrument(level = "trace", skip(self, aliases))]
    pub fn check<S: AsRef<str>>(&self, input: &str, aliases: &[S]) -> MatchResult {
        let guess = normalize(input);
        let normalized: Vec<String> = aliases.iter().map(|a| normalize(a.as_ref())).collect();

        if normalized.iter().any(|alias| *alias == guess) {
            return MatchResult::Exact;
        }

        for (original, alias) in aliases.iter().zip(&normalized) {
            let distance = edit_distance(&guess, alias);
            let tolerance = self.policy.tolerance_for(alias.chars().count());
            trace!(alias = %alias, distance, tolerance, "comparing");
            if distance <= tolerance {
                return MatchResult::Corrected(original.as_ref().to_string());
            }
        }
        MatchResult::NoMatch
    }
}

/// Trim and lowercase (Unicode aware).
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase()
}

/// Levenshtein distance over Unicode scalar values.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() {
        return b_chars.len();
    }
    if b_chars.is_empty() {
        return a_chars.len();
    }

    let mut prev_row: Vec<usize> = (0..=b_chars.len()).collect();
    let mut curr_row: Vec<usize> = vec![0; b_chars.len() + 1];

    for (i, ca) in a_chars.iter().enumerate() {
        curr_row[0] = i + 1;
        for (j, cb) in b_chars.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr_row[j + 1] = (prev_row[j + 1] + 1) // deletion
                .min(curr_row[j] + 1) // insertion
                .min(prev_row[j] + cost); // substitution
        }
        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b_chars.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_identical_strings_when_distance_then_zero() {
        assert_eq!(edit_distance("ромб", "ромб"), 0);
    }

    #[test]
    fn given_empty_side_when_distance_then_other_length_in_chars() {
        assert_eq!(edit_distance("", "квадрат"), 7);
        assert_eq!(edit_distance("делтоид", ""), 7);
    }

    #[test]
    fn given_cyrillic_when_distance_then_counts_chars_not_bytes() {
        // One substitution, two bytes each in UTF-8
        assert_eq!(edit_distance("ромп", "ромб"), 1);
        assert_eq!(edit_distance("кводрад", "квадрат"), 2);
    }

    #[test]
    fn given_insertion_and_deletion_when_distance_then_counts_each() {
        assert_eq!(edit_distance("трапезо", "трапез"), 1);
        assert_eq!(edit_distance("трапезоид", "трапез"), 3);
    }

    #[test]
    fn given_uppercase_cyrillic_when_normalize_then_lowercases() {
        assert_eq!(normalize("  РАМНОКРАК Трапез "), "рамнокрак трапез");
    }

    #[test]
    fn given_default_policy_when_tolerance_then_long_aliases_get_two() {
        let policy = TolerancePolicy::default();
        assert_eq!(policy.tolerance_for(5), 1);
        assert_eq!(policy.tolerance_for(6), 2);
    }

    #[test]
    fn given_alias_with_uppercase_when_corrected_then_returns_alias_as_given() {
        let result = FuzzyMatcher::default().check("ромп", &["Ромб"]);
        assert_eq!(result, MatchResult::Corrected("Ромб".to_string()));
    }

    #[test]
    fn given_empty_aliases_when_check_then_no_match() {
        let aliases: [&str; 0] = [];
        assert_eq!(FuzzyMatcher::default().check("ромб", &aliases), MatchResult::NoMatch);
    }
}
