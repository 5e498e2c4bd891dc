//! Levenshtein edit distance and the similarity score derived from it.
//!
//! Both functions compare strings case-insensitively and count lengths in
//! Unicode scalar values, so "Café" and "CAFÉ" are identical and an accented
//! letter is a single edit.

/// Case-fold a string into its characters
fn folded_chars(s: &str) -> Vec<char> {
    s.chars().flat_map(char::to_lowercase).collect()
}

/// Levenshtein distance over two pre-folded character slices.
///
/// Keeps two rolling rows sized by the shorter input.
fn levenshtein(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0usize; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let cost = usize::from(lc != sc);
            curr[j + 1] = (prev[j + 1] + 1) // deletion
                .min(curr[j] + 1) // insertion
                .min(prev[j] + cost); // substitution
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// Compute the Levenshtein edit distance between two strings, ignoring case.
///
/// Insertions, deletions and substitutions each cost 1.
///
/// # Examples
///
/// ```
/// use howto_guides::matching::distance;
///
/// assert_eq!(distance("kitten", "sitting"), 3);
/// assert_eq!(distance("Pasta", "pasta"), 0);
/// assert_eq!(distance("", "abc"), 3);
/// ```
pub fn distance(a: &str, b: &str) -> usize {
    levenshtein(&folded_chars(a), &folded_chars(b))
}

/// Similarity in `[0, 1]`: `1 - distance / max(len(a), len(b))`.
///
/// Lengths count the characters of the inputs as given, before case folding.
/// A character whose lowercase form is longer (`İ`) can push the distance
/// past that length; the score is clamped at 0. Two empty strings are
/// identical and score 1.0.
///
/// # Examples
///
/// ```
/// use howto_guides::matching::similarity;
///
/// assert_eq!(similarity("ABC", "abc"), 1.0);
/// assert_eq!(similarity("", ""), 1.0);
/// assert_eq!(similarity("abc", "xyz"), 0.0);
/// ```
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let edits = distance(a, b);
    (1.0 - edits as f64 / max_len as f64).max(0.0)
}
