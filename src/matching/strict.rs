//! Strict (production) name matching.
//!
//! Criteria:
//! - Last name: exact only. A last name that is one letter off is NOT a match,
//!   no matter how well the rest of the name agrees.
//! - First name: exact, or a registered nickname/full-name variation unless
//!   `exact_first_name` is set.
//! - Middle names: every middle name of the search must appear in the result;
//!   extra middle names in the result are tolerated.

use std::fmt;

use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::models::{MatchResult, MatchType};
use crate::utils::{normalize_tokens, NameParts, VariationCatalog};

/// Outcome of the middle-name comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MiddleNameCheck {
    Exact,
    AdditionalInResult,
    MissingInResult,
    Mismatch,
}

impl MiddleNameCheck {
    pub fn compare(search_middle: &[String], result_middle: &[String]) -> Self {
        match (search_middle.is_empty(), result_middle.is_empty()) {
            (true, true) => MiddleNameCheck::Exact,
            (true, false) => MiddleNameCheck::AdditionalInResult,
            (false, true) => MiddleNameCheck::MissingInResult,
            (false, false) => {
                if search_middle.iter().all(|m| result_middle.contains(m)) {
                    MiddleNameCheck::Exact
                } else {
                    MiddleNameCheck::Mismatch
                }
            }
        }
    }

    pub fn passes(&self) -> bool {
        matches!(self, MiddleNameCheck::Exact | MiddleNameCheck::AdditionalInResult)
    }
}

impl fmt::Display for MiddleNameCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MiddleNameCheck::Exact => "exact",
            MiddleNameCheck::AdditionalInResult => "additional_in_result",
            MiddleNameCheck::MissingInResult => "missing_in_result",
            MiddleNameCheck::Mismatch => "mismatch",
        };
        f.write_str(label)
    }
}

/// Strictly classify `result_name` against `search_name` using the global catalog.
///
/// # Examples
///
/// ```
/// use readymatch::matching::classify_strict;
/// use readymatch::models::MatchType;
///
/// let near_miss = classify_strict("Ghafoor Jaggi Nadery", "GHAFOOR JAGGI NADER", false);
/// assert_eq!(near_miss.match_type, MatchType::NotMatched);
///
/// let nickname = classify_strict("Anthony Bek", "TONY BEK", false);
/// assert_eq!(nickname.match_type, MatchType::PartialVariation);
///
/// let required = classify_strict("Anthony Bek", "TONY BEK", true);
/// assert_eq!(required.match_type, MatchType::NotMatched);
/// ```
pub fn classify_strict(search_name: &str, result_name: &str, exact_first_name: bool) -> MatchResult {
    classify_strict_with(VariationCatalog::global(), search_name, result_name, exact_first_name)
}

/// Strict classification against an explicit catalog.
pub fn classify_strict_with(
    catalog: &VariationCatalog,
    search_name: &str,
    result_name: &str,
    exact_first_name: bool,
) -> MatchResult {
    let search_words = normalize_tokens(search_name);
    let result_words = normalize_tokens(result_name);

    let (search, result) = match (
        NameParts::from_tokens(&search_words),
        NameParts::from_tokens(&result_words),
    ) {
        (Some(search), Some(result)) => (search, result),
        _ => {
            return MatchResult::not_matched(
                "Empty name provided",
                json!({
                    "search_name": search_name,
                    "result_name": result_name,
                    "search_words": search_words,
                    "result_words": result_words,
                }),
            )
        }
    };

    debug!(
        "Strict matching '{}' vs '{}' (exact_first_name={})",
        search_name, result_name, exact_first_name
    );

    // Last name gate comes before every other signal
    if search.last != result.last {
        return MatchResult::not_matched(
            format!(
                "Last name mismatch: '{}' != '{}' (strict criteria: last name must be exact)",
                search.last, result.last
            ),
            json!({
                "search_last": search.last,
                "result_last": result.last,
                "rule_violated": "last_name_exact_required",
            }),
        );
    }

    let first_exact = search.first == result.first;
    let first_variation =
        !first_exact && !exact_first_name && catalog.is_known_variation(&search.first, &result.first);
    let middle = MiddleNameCheck::compare(&search.middle, &result.middle);

    let parts = json!({
        "search_parts": search,
        "result_parts": result,
    });

    if first_exact && middle == MiddleNameCheck::Exact {
        return MatchResult::matched(
            MatchType::Exact,
            1.0,
            "Exact match: all name components match exactly",
            with_fields(parts, json!({ "match_quality": "exact_all_components" })),
        );
    }

    if first_exact && middle == MiddleNameCheck::AdditionalInResult {
        return MatchResult::matched(
            MatchType::Exact,
            0.98,
            format!(
                "Exact match with additional middle names in result ({})",
                result.middle.join(" ")
            ),
            with_fields(parts, json!({ "match_quality": "exact_with_additional_middle" })),
        );
    }

    if first_variation && middle.passes() {
        return MatchResult::matched(
            MatchType::PartialVariation,
            0.85,
            format!(
                "Partial match: first name variation '{}' -> '{}', last name exact",
                search.first, result.first
            ),
            with_fields(
                parts,
                json!({
                    "match_quality": "partial_first_name_variation",
                    "first_name_variation": true,
                    "middle_check": middle,
                }),
            ),
        );
    }

    let mut reasons = Vec::new();
    if !first_exact && exact_first_name {
        reasons.push(format!(
            "first name exact required but '{}' != '{}'",
            search.first, result.first
        ));
    } else if !first_exact && !first_variation {
        reasons.push(format!(
            "first name '{}' has no valid variation to '{}'",
            search.first, result.first
        ));
    }
    if !middle.passes() {
        reasons.push(format!("middle name mismatch: {}", middle));
    }

    MatchResult::not_matched(
        format!("No match: {}", reasons.join("; ")),
        with_fields(
            parts,
            json!({
                "failed_criteria": reasons,
                "exact_first_name_required": exact_first_name,
            }),
        ),
    )
}

fn with_fields(mut base: serde_json::Value, extra: serde_json::Value) -> serde_json::Value {
    if let (Some(base_map), serde_json::Value::Object(extra_map)) = (base.as_object_mut(), extra) {
        base_map.extend(extra_map);
    }
    base
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_middle_name_check() {
        assert_eq!(MiddleNameCheck::compare(&[], &[]), MiddleNameCheck::Exact);
        assert_eq!(
            MiddleNameCheck::compare(&[], &words(&["michael"])),
            MiddleNameCheck::AdditionalInResult
        );
        assert_eq!(
            MiddleNameCheck::compare(&words(&["michael"]), &[]),
            MiddleNameCheck::MissingInResult
        );
        assert_eq!(
            MiddleNameCheck::compare(&words(&["paul"]), &words(&["michael", "paul"])),
            MiddleNameCheck::Exact
        );
        assert_eq!(
            MiddleNameCheck::compare(&words(&["paul"]), &words(&["michael"])),
            MiddleNameCheck::Mismatch
        );
        assert!(MiddleNameCheck::AdditionalInResult.passes());
        assert!(!MiddleNameCheck::MissingInResult.passes());
    }

    #[test]
    fn test_last_name_near_miss_never_matches() {
        for exact_first_name in [false, true] {
            let result = classify_strict("Ghafoor Jaggi Nadery", "GHAFOOR JAGGI NADER", exact_first_name);
            assert_eq!(result.match_type, MatchType::NotMatched);
            assert_eq!(result.confidence, 0.0);
            assert!(!result.is_match);
            assert_eq!(result.details["rule_violated"], "last_name_exact_required");
            assert!(result.reasoning.contains("'nadery' != 'nader'"));
        }
    }

    #[test]
    fn test_exact_all_components() {
        let result = classify_strict("Ghafoor Jaggi Nadery", "GHAFOOR JAGGI NADERY", true);
        assert_eq!(result.match_type, MatchType::Exact);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.details["match_quality"], "exact_all_components");
        assert_eq!(result.details["search_parts"]["middle"], json!(["jaggi"]));
    }

    #[test]
    fn test_exact_with_additional_middle() {
        let result = classify_strict("John Smith", "JOHN MICHAEL SMITH", true);
        assert_eq!(result.match_type, MatchType::Exact);
        assert_eq!(result.confidence, 0.98);
        assert_eq!(result.details["match_quality"], "exact_with_additional_middle");
    }

    #[test]
    fn test_first_name_variation() {
        let result = classify_strict("Anthony Bek", "TONY BEK", false);
        assert_eq!(result.match_type, MatchType::PartialVariation);
        assert_eq!(result.confidence, 0.85);
        assert!(result.is_match);
        assert!(result.reasoning.contains("'anthony' -> 'tony'"));

        let reverse = classify_strict("Tony Bek", "Anthony Bek", false);
        assert_eq!(reverse.match_type, MatchType::PartialVariation);
    }

    #[test]
    fn test_exact_first_name_required() {
        let result = classify_strict("Anthony Bek", "TONY BEK", true);
        assert_eq!(result.match_type, MatchType::NotMatched);
        assert_eq!(
            result.reasoning,
            "No match: first name exact required but 'anthony' != 'tony'"
        );
    }

    #[test]
    fn test_first_name_prefix_is_not_a_variation() {
        // similar spelling only counts through the catalog
        let result = classify_strict("Stephen Bek", "Steven Bek", false);
        assert_eq!(result.match_type, MatchType::NotMatched);
        assert_eq!(
            result.reasoning,
            "No match: first name 'stephen' has no valid variation to 'steven'"
        );
    }

    #[test]
    fn test_middle_name_mismatch() {
        let result = classify_strict("John Paul Smith", "John Peter Smith", false);
        assert_eq!(result.match_type, MatchType::NotMatched);
        assert_eq!(result.reasoning, "No match: middle name mismatch: mismatch");

        let missing = classify_strict("John Paul Smith", "John Smith", false);
        assert_eq!(missing.reasoning, "No match: middle name mismatch: missing_in_result");
    }

    #[test]
    fn test_variation_blocked_by_middle_mismatch() {
        let result = classify_strict("Anthony Paul Bek", "Tony Peter Bek", false);
        assert_eq!(result.match_type, MatchType::NotMatched);
        assert_eq!(result.reasoning, "No match: middle name mismatch: mismatch");
    }

    #[test]
    fn test_variation_blocked_by_missing_middle() {
        // Nickname first name does not excuse a dropped middle name
        let result = classify_strict("Anthony Paul Bek", "Tony Bek", false);
        assert_eq!(result.match_type, MatchType::NotMatched);
        assert!(!result.is_match);
        assert_eq!(result.reasoning, "No match: middle name mismatch: missing_in_result");
    }

    #[test]
    fn test_variation_with_additional_middle() {
        let result = classify_strict("Anthony Bek", "Tony James Bek", false);
        assert_eq!(result.match_type, MatchType::PartialVariation);
        assert_eq!(result.details["middle_check"], "additional_in_result");
    }

    #[test]
    fn test_single_token_names() {
        let same = classify_strict("Madonna", "MADONNA", false);
        assert_eq!(same.match_type, MatchType::Exact);

        // "smith" is both first and last of the search
        let surname_only = classify_strict("Smith", "John Smith", false);
        assert_eq!(surname_only.match_type, MatchType::NotMatched);
    }

    #[test]
    fn test_strict_empty_inputs() {
        for (search, candidate) in [("", "John Smith"), ("John Smith", ""), ("Dr.", "Mr. Jr.")] {
            let result = classify_strict(search, candidate, false);
            assert_eq!(result.match_type, MatchType::NotMatched);
            assert_eq!(result.reasoning, "Empty name provided");
        }
    }
}
