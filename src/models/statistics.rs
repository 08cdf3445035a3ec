use serde::{Deserialize, Serialize};

use super::match_result::{MatchResult, MatchType};

/// Per-search counters accumulated over one candidate list.
///
/// `error_occurred` / `error_message` belong to the extraction layer: the
/// classifiers never set them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchStatistics {
    pub total_results_found: usize,
    pub exact_matches: usize,
    pub partial_matches: usize,
    pub no_matches: usize,
    /// Elapsed seconds
    pub search_time: f64,
    pub error_occurred: bool,
    pub error_message: String,
}

impl SearchStatistics {
    /// Statistics for a search whose results could not be extracted.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error_occurred: true,
            error_message: message.into(),
            ..Self::default()
        }
    }

    /// Count one classified candidate.
    pub fn record(&mut self, result: &MatchResult) {
        if result.match_type == MatchType::Exact {
            self.exact_matches += 1;
        } else if result.is_match {
            self.partial_matches += 1;
        } else {
            self.no_matches += 1;
        }
    }

    pub fn matched_count(&self) -> usize {
        self.exact_matches + self.partial_matches
    }
}

/// Overall status of one searched name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchStatus {
    #[serde(rename = "Match")]
    Match,
    #[serde(rename = "No Match")]
    NoMatch,
    #[serde(rename = "Error")]
    Error,
}

/// Report-level verdict derived from [`SearchStatistics`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub status: SearchStatus,
    pub match_category: String,
    pub match_reasoning: String,
    pub matches_found: usize,
    pub exact_matches: usize,
    pub partial_matches: usize,
}

impl SearchSummary {
    pub fn from_stats(stats: &SearchStatistics) -> Self {
        let (status, category, reasoning) = if stats.error_occurred {
            (
                SearchStatus::Error,
                "ERROR",
                format!("Result extraction failed: {}", stats.error_message),
            )
        } else if stats.exact_matches > 0 {
            (
                SearchStatus::Match,
                "EXACT MATCH",
                format!("Found {} exact matches", stats.exact_matches),
            )
        } else if stats.partial_matches > 0 {
            (
                SearchStatus::Match,
                "PARTIAL MATCH",
                format!("Found {} partial matches", stats.partial_matches),
            )
        } else {
            (
                SearchStatus::NoMatch,
                "NOT MATCHED",
                "No meaningful matches found".to_string(),
            )
        };

        Self {
            status,
            match_category: category.to_string(),
            match_reasoning: reasoning,
            matches_found: stats.matched_count(),
            exact_matches: stats.exact_matches,
            partial_matches: stats.partial_matches,
        }
    }
}
