/// Whitespace-separated word count of the trimmed text.
pub fn word_count(s: &str) -> usize {
    s.split_whitespace().count()
}

/// Character count (chars, not bytes), matching search offsets.
pub fn char_count(s: &str) -> usize {
    s.chars().count()
}
