//! Identity classification for scraped person-search results.
//!
//! Given the name that was searched for and the names found on a results page,
//! decide which rows actually refer to that person despite nicknames, middle
//! names, titles and suffixes.

pub mod config;
pub mod matching;
pub mod models;
pub mod utils;

// Re-export commonly used items
pub use config::{ConfigError, MatchMode, MatcherConfig};
pub use matching::{
    classify, classify_strict, find_matches, find_matches_parallel, MatchPolicy, SearchOutcome,
};
pub use models::{
    Candidate, MatchResult, MatchType, MatchedCandidate, SearchStatistics, SearchStatus,
    SearchSummary,
};
pub use utils::{clean_search_names, normalize_name, normalize_tokens, VariationCatalog};
