//! Word extraction shared by indexing and querying.

use itertools::Itertools;

/// Characters treated as word separators in addition to whitespace.
const SEPARATORS: [char; 11] = [',', '.', ';', ':', '-', '(', ')', '[', ']', '/', '\\'];

/// Tokens of this many bytes or fewer are dropped.
const MAX_NOISE_LEN: usize = 2;

/// Split free text into lowercase searchable words.
///
/// Separators are replaced by spaces rather than removed so that
/// `"CAMERA,TELEVISION"` yields two words, not `"cameratelevision"`.
/// The result keeps first-occurrence order and holds no duplicates.
#[must_use]
pub fn tokenize(text: &str) -> Vec<String> {
    let normalized: String = text
        .to_lowercase()
        .chars()
        .map(|c| if SEPARATORS.contains(&c) { ' ' } else { c })
        .collect();

    normalized
        .split_whitespace()
        .filter(|word| word.len() > MAX_NOISE_LEN)
        .unique()
        .map(str::to_string)
        .collect()
}
