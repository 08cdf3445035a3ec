use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::match_result::{MatchResult, MatchType};

/// One scraped result row.
///
/// Fields other than `name`, `location` and `additional_info` are kept in
/// `extra` and passed through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub additional_info: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Candidate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = location.into();
        self
    }

    pub fn with_additional_info(mut self, info: impl Into<String>) -> Self {
        self.additional_info = info.into();
        self
    }
}

/// A candidate together with its classification
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedCandidate {
    #[serde(flatten)]
    pub candidate: Candidate,
    pub match_category: &'static str,
    pub match_result: MatchResult,
}

impl MatchedCandidate {
    pub fn new(candidate: Candidate, match_result: MatchResult) -> Self {
        Self {
            match_category: match_result.display_category(),
            candidate,
            match_result,
        }
    }

    pub fn name(&self) -> &str {
        &self.candidate.name
    }

    pub fn match_type(&self) -> MatchType {
        self.match_result.match_type
    }

    pub fn confidence(&self) -> f64 {
        self.match_result.confidence
    }
}
