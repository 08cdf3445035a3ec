use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Classification of a candidate name against a search name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,            // Identical after normalization (suffixes ignored)
    PartialMiddle,    // Same first/last name plus extra middle name(s)
    PartialVariation, // Nickname or spelling variation
    PartialSubstring, // Token containment
    PartialWord,      // Some words shared verbatim
    NotMatched,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact",
            MatchType::PartialMiddle => "partial_middle",
            MatchType::PartialVariation => "partial_variation",
            MatchType::PartialSubstring => "partial_substring",
            MatchType::PartialWord => "partial_word",
            MatchType::NotMatched => "not_matched",
        }
    }

    pub fn is_partial(&self) -> bool {
        !matches!(self, MatchType::Exact | MatchType::NotMatched)
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of classifying one candidate name.
///
/// `match_type` and `is_match` are independent: a [`MatchType::PartialWord`]
/// result only counts as a match when its confidence reaches 0.6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_type: MatchType,
    pub confidence: f64,
    pub is_match: bool,
    /// Human-readable explanation naming the tokens that were compared
    pub reasoning: String,
    /// Technical breakdown for auditing
    pub details: Value,
}

impl MatchResult {
    pub fn new(
        match_type: MatchType,
        confidence: f64,
        is_match: bool,
        reasoning: impl Into<String>,
        details: Value,
    ) -> Self {
        Self {
            match_type,
            confidence,
            is_match,
            reasoning: reasoning.into(),
            details,
        }
    }

    /// A positive classification (`is_match` follows from the type).
    pub fn matched(
        match_type: MatchType,
        confidence: f64,
        reasoning: impl Into<String>,
        details: Value,
    ) -> Self {
        Self::new(
            match_type,
            confidence,
            match_type != MatchType::NotMatched,
            reasoning,
            details,
        )
    }

    pub fn not_matched(reasoning: impl Into<String>, details: Value) -> Self {
        Self::new(MatchType::NotMatched, 0.0, false, reasoning, details)
    }

    /// User-facing category used in reports.
    pub fn display_category(&self) -> &'static str {
        if self.match_type == MatchType::Exact {
            "EXACT MATCH"
        } else if self.is_match {
            "PARTIAL MATCH"
        } else {
            "NOT MATCHED"
        }
    }
}
