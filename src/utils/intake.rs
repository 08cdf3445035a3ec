//! Search-name intake: cleaning a raw batch of names before it is searched.

use std::collections::HashSet;

use tracing::{info, warn};

/// Names shorter than this (in characters) are skipped.
pub const MIN_NAME_LEN: usize = 2;

/// Names longer than this (in characters) are truncated.
pub const MAX_NAME_LEN: usize = 100;

/// Clean a batch of search names.
///
/// - Trims surrounding whitespace
/// - Skips blank names and names shorter than [`MIN_NAME_LEN`]
/// - Truncates names longer than [`MAX_NAME_LEN`]
/// - Removes case-insensitive duplicates, keeping the first occurrence
///
/// # Examples
///
/// ```
/// use readymatch::utils::clean_search_names;
///
/// let names = clean_search_names(["John Smith", "  ", "JOHN SMITH", "X", "Anthony Bek"]);
/// assert_eq!(names, vec!["John Smith", "Anthony Bek"]);
/// ```
pub fn clean_search_names<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut cleaned = Vec::new();
    let mut duplicates = 0usize;

    for (row, name) in raw.into_iter().enumerate() {
        let name = name.as_ref().trim();

        if name.is_empty() {
            warn!("Skipping empty name at row {}", row + 1);
            continue;
        }

        let length = name.chars().count();
        if length < MIN_NAME_LEN {
            warn!("Skipping too short name: '{}'", name);
            continue;
        }

        let name = if length > MAX_NAME_LEN {
            let truncated: String = name.chars().take(MAX_NAME_LEN).collect();
            warn!("Truncating long name: '{}...'", truncated.chars().take(50).collect::<String>());
            truncated
        } else {
            name.to_string()
        };

        if seen.insert(name.to_lowercase()) {
            cleaned.push(name);
        } else {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        info!("Removed {} duplicate names", duplicates);
    }

    cleaned
}
