//! Applying a classifier across one search's candidate list.

use std::time::Instant;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::lenient::classify;
use super::strict::classify_strict;
use crate::models::{Candidate, MatchResult, MatchType, MatchedCandidate, SearchStatistics};

/// Minimum confidence for the legacy exact-only policy.
const LEGACY_MIN_CONFIDENCE: f64 = 0.8;

/// Which classifier decides, and which results are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "mode")]
pub enum MatchPolicy {
    /// Multi-strategy matcher; every `is_match` result is returned
    Lenient,
    /// Production matcher with the last-name gate
    Strict { exact_first_name: bool },
    /// Multi-strategy matcher, but only confident exact matches are returned
    Legacy,
}

impl Default for MatchPolicy {
    fn default() -> Self {
        MatchPolicy::Strict {
            exact_first_name: false,
        }
    }
}

impl MatchPolicy {
    pub fn classify(&self, search_name: &str, result_name: &str) -> MatchResult {
        match self {
            MatchPolicy::Lenient | MatchPolicy::Legacy => classify(search_name, result_name),
            MatchPolicy::Strict { exact_first_name } => {
                classify_strict(search_name, result_name, *exact_first_name)
            }
        }
    }

    /// Whether a classified candidate is returned as a match.
    pub fn accepts(&self, result: &MatchResult) -> bool {
        match self {
            MatchPolicy::Lenient | MatchPolicy::Strict { .. } => result.is_match,
            MatchPolicy::Legacy => {
                result.is_match
                    && result.match_type == MatchType::Exact
                    && result.confidence >= LEGACY_MIN_CONFIDENCE
            }
        }
    }
}

/// Matches for one search name, in candidate order.
#[derive(Debug, Clone, Serialize)]
pub struct SearchOutcome {
    pub found: bool,
    pub matches: Vec<MatchedCandidate>,
    pub stats: SearchStatistics,
}

/// Classify every candidate in order and keep the genuine matches.
///
/// Equally good matches are all returned; nothing is deduplicated.
///
/// # Examples
///
/// ```
/// use readymatch::matching::{find_matches, MatchPolicy};
/// use readymatch::models::Candidate;
///
/// let candidates = vec![
///     Candidate::new("JOHN SMITH"),
///     Candidate::new("MARY JONES"),
///     Candidate::new("JOHN MICHAEL SMITH"),
/// ];
/// let outcome = find_matches("John Smith", &candidates, MatchPolicy::Lenient);
/// assert!(outcome.found);
/// assert_eq!(outcome.matches.len(), 2);
/// assert_eq!(outcome.stats.no_matches, 1);
/// ```
pub fn find_matches(search_name: &str, candidates: &[Candidate], policy: MatchPolicy) -> SearchOutcome {
    let started = Instant::now();
    let results: Vec<MatchResult> = candidates
        .iter()
        .map(|candidate| policy.classify(search_name, &candidate.name))
        .collect();

    build_outcome(search_name, candidates, results, policy, started)
}

/// Same as [`find_matches`], classifying candidates on the rayon pool.
pub fn find_matches_parallel(
    search_name: &str,
    candidates: &[Candidate],
    policy: MatchPolicy,
) -> SearchOutcome {
    let started = Instant::now();
    // indexed collect keeps input order
    let results: Vec<MatchResult> = candidates
        .par_iter()
        .map(|candidate| policy.classify(search_name, &candidate.name))
        .collect();

    build_outcome(search_name, candidates, results, policy, started)
}

fn build_outcome(
    search_name: &str,
    candidates: &[Candidate],
    results: Vec<MatchResult>,
    policy: MatchPolicy,
    started: Instant,
) -> SearchOutcome {
    let mut stats = SearchStatistics {
        total_results_found: candidates.len(),
        ..SearchStatistics::default()
    };
    let mut matches = Vec::new();

    for (candidate, result) in candidates.iter().zip(results) {
        stats.record(&result);
        if policy.accepts(&result) {
            matches.push(MatchedCandidate::new(candidate.clone(), result));
        }
    }

    stats.search_time = started.elapsed().as_secs_f64();

    info!(
        "Results for '{}': {} total, {} exact, {} partial, {} no match, {} returned",
        search_name,
        stats.total_results_found,
        stats.exact_matches,
        stats.partial_matches,
        stats.no_matches,
        matches.len()
    );

    SearchOutcome {
        found: !matches.is_empty(),
        matches,
        stats,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(names: &[&str]) -> Vec<Candidate> {
        names.iter().map(|name| Candidate::new(*name)).collect()
    }

    #[test]
    fn test_policy_serde() {
        let policy: MatchPolicy =
            serde_json::from_str(r#"{"mode":"strict","exact_first_name":true}"#).unwrap();
        assert_eq!(policy, MatchPolicy::Strict { exact_first_name: true });

        let lenient: MatchPolicy = serde_json::from_str(r#"{"mode":"lenient"}"#).unwrap();
        assert_eq!(lenient, MatchPolicy::Lenient);
        assert_eq!(MatchPolicy::default(), MatchPolicy::Strict { exact_first_name: false });
    }

    #[test]
    fn test_strict_policy_filters_near_misses() {
        let list = candidates(&["GHAFOOR JAGGI NADER", "GHAFOOR JAGGI NADERY", "G NADERY"]);
        let outcome = find_matches("Ghafoor Jaggi Nadery", &list, MatchPolicy::default());

        assert!(outcome.found);
        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].name(), "GHAFOOR JAGGI NADERY");
        assert_eq!(outcome.stats.total_results_found, 3);
        assert_eq!(outcome.stats.exact_matches, 1);
        assert_eq!(outcome.stats.no_matches, 2);
    }

    #[test]
    fn test_legacy_policy_keeps_only_confident_exact() {
        let list = candidates(&["JOHN MICHAEL SMITH", "JOHN SMITH", "JONATHAN SMITH"]);
        let outcome = find_matches("John Smith", &list, MatchPolicy::Legacy);

        assert_eq!(outcome.matches.len(), 1);
        assert_eq!(outcome.matches[0].match_type(), MatchType::Exact);
        // statistics still count every classification
        assert_eq!(outcome.stats.partial_matches, 2);
    }

    #[test]
    fn test_weak_word_match_is_not_returned() {
        let list = candidates(&["Jo Wu"]);
        let outcome = find_matches("Jo Li", &list, MatchPolicy::Lenient);
        assert!(!outcome.found);
        assert!(outcome.matches.is_empty());
        assert_eq!(outcome.stats.no_matches, 1);
    }

    #[test]
    fn test_empty_candidate_list() {
        let outcome = find_matches("John Smith", &[], MatchPolicy::Lenient);
        assert!(!outcome.found);
        assert_eq!(outcome.stats.total_results_found, 0);
        assert!(!outcome.stats.error_occurred);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let names: Vec<String> = (0..200)
            .map(|i| match i % 4 {
                0 => format!("JOHN SMITH {}", i),
                1 => "JOHN SMITH".to_string(),
                2 => "TONY SMITH".to_string(),
                _ => "MARY JONES".to_string(),
            })
            .collect();
        let list: Vec<Candidate> = names.iter().map(|n| Candidate::new(n.as_str())).collect();

        for policy in [MatchPolicy::Lenient, MatchPolicy::default(), MatchPolicy::Legacy] {
            let sequential = find_matches("John Smith", &list, policy);
            let parallel = find_matches_parallel("John Smith", &list, policy);
            assert_eq!(sequential.matches, parallel.matches);
            assert_eq!(sequential.stats.exact_matches, parallel.stats.exact_matches);
            assert_eq!(sequential.stats.partial_matches, parallel.stats.partial_matches);
        }
    }
}
