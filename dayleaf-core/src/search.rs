//! Case-insensitive in-text search with single wraparound.
//!
//! Offsets are in characters, not bytes, so they line up with a text widget's
//! caret position. Case folding is ASCII-only, which keeps the fold from ever
//! changing a character count.

/// A hit: `[start, end)` in char offsets of the searched text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub start: usize,
    pub end: usize,
}

/// Finds the first occurrence of `query` at or after `from`. If nothing is
/// ahead and `from != 0`, wraps once and retries from the start. Empty query
/// or empty text is a no-op, not an error.
pub fn find_next(text: &str, query: &str, from: usize) -> Option<Match> {
    if query.is_empty() || text.is_empty() {
        return None;
    }
    let hay = fold(text);
    let needle = fold(query);
    let from = from.min(hay.len());
    scan_forward(&hay, &needle, from).or_else(|| {
        if from != 0 {
            scan_forward(&hay, &needle, 0)
        } else {
            None
        }
    })
}

/// Finds the last occurrence of `query` starting at or before `from - 1`
/// (a match under the caret is skipped, so repeated calls walk backward).
/// Wraps once to the end of text when nothing precedes the caret.
pub fn find_previous(text: &str, query: &str, from: usize) -> Option<Match> {
    if query.is_empty() || text.is_empty() {
        return None;
    }
    let hay = fold(text);
    let needle = fold(query);
    let limit = from.min(hay.len()).saturating_sub(1);
    scan_backward(&hay, &needle, limit).or_else(|| {
        if limit != hay.len() {
            scan_backward(&hay, &needle, hay.len())
        } else {
            None
        }
    })
}

fn fold(s: &str) -> Vec<char> {
    s.chars().map(|c| c.to_ascii_lowercase()).collect()
}

fn scan_forward(hay: &[char], needle: &[char], from: usize) -> Option<Match> {
    if needle.len() > hay.len() {
        return None;
    }
    for start in from..=hay.len() - needle.len() {
        if hay[start..start + needle.len()] == *needle {
            return Some(Match {
                start,
                end: start + needle.len(),
            });
        }
    }
    None
}

/// Last match whose start is `<= limit`.
fn scan_backward(hay: &[char], needle: &[char], limit: usize) -> Option<Match> {
    if needle.len() > hay.len() {
        return None;
    }
    let max_start = limit.min(hay.len() - needle.len());
    for start in (0..=max_start).rev() {
        if hay[start..start + needle.len()] == *needle {
            return Some(Match {
                start,
                end: start + needle.len(),
            });
        }
    }
    None
}
