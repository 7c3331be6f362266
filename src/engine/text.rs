/// Uppercase the input and keep only ASCII letters A-Z.
///
/// Everything else (whitespace, digits, punctuation, non-Latin letters) is
/// dropped without complaint; reporting it is the validator's job.
pub fn normalize(text: &str) -> String {
    text.to_uppercase()
        .chars()
        .filter(|c| c.is_ascii_uppercase())
        .collect()
}

/// Number of letters `normalize` would keep
pub fn normalized_len(text: &str) -> usize {
    normalize(text).len()
}
