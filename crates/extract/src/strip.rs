//! Punctuation stripping applied to raw pattern matches.

/// Characters stripped from the front of a raw match.
const LEADING: &[char] = &['<', '(', '[', '{', '"', '\''];

/// Characters stripped from the back of a raw match.
const TRAILING: &[char] = &[')', ']', '}', '>', '.', ',', ';', ':', '!', '?', '"', '\''];

/// Trims surrounding whitespace, leading brackets/quotes, and trailing
/// punctuation/brackets/quotes from a candidate.
///
/// Returns a subslice of the input; never allocates. Sentence punctuation
/// around a pasted link ("see (example.com)." ) is not part of the URL, while
/// interior punctuation is left untouched.
pub fn strip_url_punctuation(value: &str) -> &str {
    value
        .trim()
        .trim_start_matches(LEADING)
        .trim_end_matches(TRAILING)
        .trim()
}
