//! Lenient multi-strategy name matching.
//!
//! Strategies are tried in a fixed priority order and the first one that
//! recognises the pair wins:
//!
//! 1. exact token sequence
//! 2. exact with trailing suffix(es)
//! 3. additional middle name(s)
//! 4. nickname / spelling variation
//! 5. token containment
//! 6. shared words
//!
//! Some pairs satisfy several strategies, so the order is part of the contract.

use serde_json::json;
use tracing::debug;

use crate::models::{MatchResult, MatchType};
use crate::utils::{is_suffix, normalize_tokens, VariationCatalog};

/// Per-token and overall threshold for variation assignments.
const VARIATION_THRESHOLD: f64 = 0.7;

/// Average containment ratio required for a substring match.
const SUBSTRING_THRESHOLD: f64 = 0.6;

/// Share of search words that must appear for a word-level result to count.
const WORD_MATCH_THRESHOLD: f64 = 0.6;

/// Minimum token length considered by the substring strategy.
const MIN_SUBSTRING_LEN: usize = 3;

const CHECKED_METHODS: &[&str] = &[
    "exact",
    "suffix",
    "middle_name",
    "variations",
    "substring",
    "word_partial",
];

/// Classify `result_name` against `search_name` using the global catalog.
///
/// # Examples
///
/// ```
/// use readymatch::matching::classify;
/// use readymatch::models::MatchType;
///
/// assert_eq!(classify("John Smith", "JOHN SMITH").match_type, MatchType::Exact);
/// assert_eq!(classify("John Smith", "John Michael Smith").match_type, MatchType::PartialMiddle);
/// assert_eq!(classify("John Smith", "Jonathan Smith").match_type, MatchType::PartialVariation);
/// assert_eq!(classify("John Smith", "Mary Jones").match_type, MatchType::NotMatched);
/// ```
pub fn classify(search_name: &str, result_name: &str) -> MatchResult {
    classify_with(VariationCatalog::global(), search_name, result_name)
}

/// Classify against an explicit catalog.
pub fn classify_with(
    catalog: &VariationCatalog,
    search_name: &str,
    result_name: &str,
) -> MatchResult {
    let search_words = normalize_tokens(search_name);
    let result_words = normalize_tokens(result_name);

    debug!("Matching '{}' vs '{}'", search_name, result_name);
    debug!("Normalized: {:?} vs {:?}", search_words, result_words);

    if search_words.is_empty() || result_words.is_empty() {
        return MatchResult::not_matched(
            "Empty name provided",
            json!({
                "search_name": search_name,
                "result_name": result_name,
                "search_words": search_words,
                "result_words": result_words,
            }),
        );
    }

    exact_match(search_name, result_name, &search_words, &result_words)
        .or_else(|| exact_with_suffix(search_name, result_name, &search_words, &result_words))
        .or_else(|| middle_name_addition(search_name, result_name, &search_words, &result_words))
        .or_else(|| name_variations(catalog, &search_words, &result_words))
        .or_else(|| intelligent_substring(&search_words, &result_words))
        .or_else(|| word_level(&search_words, &result_words))
        .unwrap_or_else(|| {
            MatchResult::not_matched(
                format!(
                    "No meaningful match found between '{}' and '{}'",
                    search_name, result_name
                ),
                json!({
                    "search_words": search_words,
                    "result_words": result_words,
                    "checked_methods": CHECKED_METHODS,
                }),
            )
        })
}

fn exact_match(
    search_name: &str,
    result_name: &str,
    search_words: &[String],
    result_words: &[String],
) -> Option<MatchResult> {
    if search_words != result_words {
        return None;
    }

    Some(MatchResult::matched(
        MatchType::Exact,
        1.0,
        format!("Perfect exact match: '{}' = '{}'", search_name, result_name),
        json!({
            "search_normalized": search_words.join(" "),
            "result_normalized": result_words.join(" "),
            "match_type": "exact_identical",
        }),
    ))
}

/// Result is the search name followed only by suffix tokens.
///
/// Must run before [`middle_name_addition`]: a trailing suffix is never a middle name.
fn exact_with_suffix(
    search_name: &str,
    result_name: &str,
    search_words: &[String],
    result_words: &[String],
) -> Option<MatchResult> {
    if result_words.len() <= search_words.len() {
        return None;
    }

    let (core, trailing) = result_words.split_at(search_words.len());
    if core != search_words || !trailing.iter().all(|word| is_suffix(word)) {
        return None;
    }

    let suffix = trailing.join(" ");
    Some(MatchResult::matched(
        MatchType::Exact,
        1.0,
        format!(
            "Exact match with suffix: '{}' matches '{}' (suffix: {})",
            search_name, result_name, suffix
        ),
        json!({
            "match_type": "exact_with_suffix",
            "suffix": suffix,
            "core_match": search_words.join(" "),
            "additional_words": trailing,
        }),
    ))
}

/// "john smith" vs "john michael smith".
fn middle_name_addition(
    search_name: &str,
    result_name: &str,
    search_words: &[String],
    result_words: &[String],
) -> Option<MatchResult> {
    if search_words.len() < 2 || result_words.len() <= search_words.len() {
        return None;
    }

    let (search_first, search_last) = (search_words.first()?, search_words.last()?);
    let (result_first, result_last) = (result_words.first()?, result_words.last()?);
    if search_first != result_first || search_last != result_last {
        return None;
    }

    let search_middle = &search_words[1..search_words.len() - 1];
    let result_middle = &result_words[1..result_words.len() - 1];
    if !search_middle.iter().all(|m| result_middle.contains(m)) {
        return None;
    }

    let added: Vec<&String> = result_middle
        .iter()
        .filter(|m| !search_middle.contains(m))
        .collect();
    let added_list = added
        .iter()
        .map(|m| m.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    Some(MatchResult::matched(
        MatchType::PartialMiddle,
        0.95,
        format!(
            "Core name match with additional middle name(s): '{}' found in '{}' (added: {})",
            search_name, result_name, added_list
        ),
        json!({
            "match_type": "middle_name_addition",
            "first_name": search_first,
            "last_name": search_last,
            "original_middle": search_middle,
            "added_names": added,
            "confidence": 0.95,
        }),
    ))
}

/// Greedy one-to-one assignment of search tokens to their best result token.
fn name_variations(
    catalog: &VariationCatalog,
    search_words: &[String],
    result_words: &[String],
) -> Option<MatchResult> {
    let mut used = vec![false; result_words.len()];
    let mut variations = Vec::new();
    let mut explanation = Vec::new();
    let mut total = 0.0;

    for search_word in search_words {
        let mut best: Option<(usize, f64)> = None;

        for (j, result_word) in result_words.iter().enumerate() {
            if used[j] {
                continue;
            }
            let confidence = catalog.variation_confidence(search_word, result_word);
            // strict comparison: ties keep the earliest result token
            if confidence > best.map_or(0.0, |(_, c)| c) {
                best = Some((j, confidence));
            }
        }

        if let Some((j, confidence)) = best.filter(|(_, c)| *c >= VARIATION_THRESHOLD) {
            used[j] = true;
            let result_word = &result_words[j];
            let kind = catalog.variation_kind(search_word, result_word);
            total += confidence;
            explanation.push(format!("'{}' → '{}' ({})", search_word, result_word, kind));
            variations.push(json!({
                "search_word": search_word,
                "result_word": result_word,
                "confidence": confidence,
                "variation_type": kind,
            }));
        }
    }

    if variations.is_empty() {
        return None;
    }

    let confidence = total / search_words.len() as f64;
    if confidence < VARIATION_THRESHOLD {
        return None;
    }

    let explanation = explanation.join("; ");
    Some(MatchResult::matched(
        MatchType::PartialVariation,
        confidence,
        format!("Name variation match: {}", explanation),
        json!({
            "match_type": "name_variations",
            "variations": variations,
            "confidence": confidence,
            "explanation": explanation,
        }),
    ))
}

/// Average length ratio over every containing token pair.
fn intelligent_substring(search_words: &[String], result_words: &[String]) -> Option<MatchResult> {
    let mut matches = Vec::new();
    let mut explanation = Vec::new();
    let mut total = 0.0;

    for search_word in search_words {
        let search_len = search_word.chars().count();
        if search_len < MIN_SUBSTRING_LEN {
            continue;
        }

        for result_word in result_words {
            let result_len = result_word.chars().count();
            if result_len < MIN_SUBSTRING_LEN {
                continue;
            }
            if !search_word.contains(result_word.as_str()) && !result_word.contains(search_word.as_str()) {
                continue;
            }

            let confidence = search_len.min(result_len) as f64 / search_len.max(result_len) as f64;
            total += confidence;
            explanation.push(format!("'{}' in '{}'", search_word, result_word));
            matches.push(json!({
                "search_word": search_word,
                "result_word": result_word,
                "confidence": confidence,
                "type": "substring",
            }));
        }
    }

    if matches.is_empty() {
        return None;
    }

    let confidence = total / matches.len() as f64;
    if confidence < SUBSTRING_THRESHOLD {
        return None;
    }

    let explanation = explanation.join("; ");
    Some(MatchResult::matched(
        MatchType::PartialSubstring,
        confidence,
        format!("Substring match: {}", explanation),
        json!({
            "match_type": "intelligent_substring",
            "matches": matches,
            "confidence": confidence,
            "explanation": explanation,
        }),
    ))
}

/// Share of search words present verbatim among the result words.
fn word_level(search_words: &[String], result_words: &[String]) -> Option<MatchResult> {
    let matched: Vec<&String> = search_words
        .iter()
        .filter(|word| result_words.contains(word))
        .collect();

    if matched.is_empty() {
        return None;
    }

    let confidence = matched.len() as f64 / search_words.len() as f64;
    let explanation = format!(
        "{}/{} words match exactly: {}",
        matched.len(),
        search_words.len(),
        matched.iter().map(|w| w.as_str()).collect::<Vec<_>>().join(", ")
    );

    Some(MatchResult::new(
        MatchType::PartialWord,
        confidence,
        confidence >= WORD_MATCH_THRESHOLD,
        format!("Partial word match: {}", explanation),
        json!({
            "match_type": "word_level_partial",
            "matched_words": matched,
            "total_search_words": search_words.len(),
            "confidence": confidence,
            "explanation": explanation,
        }),
    ))
}
