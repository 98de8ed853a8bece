/*!
 * Word normalization for alignment comparisons.
 *
 * Words are compared case-insensitively and without trailing punctuation, so that
 * "Hello," in a machine transcript lines up with "hello" in the corrected text.
 * The original word text is never modified.
 */

/// Characters stripped from the end of a word before comparison
const TRAILING_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '\'', '"'];

/// Normalize a word for comparison: lowercase it and strip the trailing run of punctuation
pub fn normalize_word(word: &str) -> String {
    word.to_lowercase()
        .trim_end_matches(TRAILING_PUNCTUATION)
        .to_string()
}

/// Check whether two words are equal after normalization
pub fn words_match(a: &str, b: &str) -> bool {
    normalize_word(a) == normalize_word(b)
}

/// Normalize every word of a sequence, preserving order
pub(crate) fn normalize_all<S: AsRef<str>>(words: &[S]) -> Vec<String> {
    words.iter().map(|w| normalize_word(w.as_ref())).collect()
}
