//! Name normalization for identity matching.
//!
//! Scraped result rows and typed search names arrive in every shape imaginable
//! ("DR. John  Smith Jr.", "SMITH-JONES, mary"). Before any comparison both sides
//! are reduced to a list of lowercase tokens:
//! - Convert to lowercase
//! - Strip punctuation (anything that is not a word character or whitespace)
//! - Normalize whitespace
//! - Drop honorific titles and generational/professional suffixes

use serde::{Deserialize, Serialize};

/// Honorific titles removed before matching.
pub const TITLES: &[&str] = &[
    "mr", "mrs", "ms", "miss", "dr", "prof", "professor", "sir", "lady", "lord", "rev",
    "reverend", "father", "sister",
];

/// Generational and professional suffixes removed before matching.
pub const SUFFIXES: &[&str] = &[
    "jr", "sr", "ii", "iii", "iv", "v", "vi", "esq", "phd", "md", "dds", "jd", "cpa",
];

/// Whether `token` (already lowercased) is an honorific title.
pub fn is_title(token: &str) -> bool {
    TITLES.contains(&token)
}

/// Whether `token` (already lowercased) is a name suffix.
pub fn is_suffix(token: &str) -> bool {
    SUFFIXES.contains(&token)
}

/// Tokenize a raw name for matching purposes.
///
/// Transformations applied:
/// 1. Convert to lowercase
/// 2. Remove punctuation, keeping letters, digits, underscores and whitespace
/// 3. Split on whitespace (which also collapses runs of it)
/// 4. Drop tokens found in [`TITLES`] or [`SUFFIXES`]
///
/// Never fails: empty or punctuation-only input yields an empty list.
///
/// # Examples
///
/// ```
/// use readymatch::utils::normalize_tokens;
///
/// assert_eq!(normalize_tokens("Dr. John  SMITH Jr."), vec!["john", "smith"]);
/// assert_eq!(normalize_tokens("O'Brien"), vec!["obrien"]);
/// assert!(normalize_tokens("   ").is_empty());
/// ```
pub fn normalize_tokens(raw: &str) -> Vec<String> {
    raw.to_lowercase()
        .chars()
        .filter(|c| is_word_char(*c) || c.is_whitespace())
        .collect::<String>()
        .split_whitespace()
        .filter(|word| !is_title(word) && !is_suffix(word))
        .map(str::to_string)
        .collect()
}

/// Normalize a name into a single space-joined string.
///
/// # Examples
///
/// ```
/// use readymatch::utils::normalize_name;
///
/// assert_eq!(normalize_name("  Mrs.   Mary-Ann Jones "), "maryann jones");
/// ```
pub fn normalize_name(raw: &str) -> String {
    normalize_tokens(raw).join(" ")
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// First / middle / last decomposition of a normalized name.
///
/// A single-token name uses that token as both first and last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameParts {
    pub first: String,
    pub middle: Vec<String>,
    pub last: String,
}

impl NameParts {
    /// Decompose normalized tokens. Returns `None` for an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use readymatch::utils::{normalize_tokens, NameParts};
    ///
    /// let parts = NameParts::from_tokens(&normalize_tokens("Ghafoor Jaggi Nadery")).unwrap();
    /// assert_eq!(parts.first, "ghafoor");
    /// assert_eq!(parts.middle, vec!["jaggi"]);
    /// assert_eq!(parts.last, "nadery");
    /// ```
    pub fn from_tokens(tokens: &[String]) -> Option<Self> {
        let (first, rest) = tokens.split_first()?;
        let (last, middle) = match rest.split_last() {
            Some((last, middle)) => (last.clone(), middle.to_vec()),
            None => (first.clone(), Vec::new()),
        };

        Some(Self {
            first: first.clone(),
            middle,
            last,
        })
    }
}
