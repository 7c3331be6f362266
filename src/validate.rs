//! Checks run on user text before it reaches the engine.
//!
//! The engine itself never rejects text; these helpers produce the
//! messages a front end shows before calling it.

use crate::engine::normalized_len;
use crate::grid::CAPACITY;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextIssue {
    /// Nothing but whitespace was entered
    Empty { field: &'static str },
    /// More letters than the grid holds
    TooLong { len: usize, max: usize },
    /// Characters that normalization will throw away
    IgnoredCharacters { chars: Vec<char> },
}

impl TextIssue {
    pub fn severity(&self) -> Severity {
        match self {
            Self::Empty { .. } => Severity::Error,
            Self::TooLong { .. } | Self::IgnoredCharacters { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for TextIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "Please enter the {}", field),
            Self::TooLong { len, max } => {
                write!(f, "Text too long (currently {} letters, maximum {})", len, max)
            }
            Self::IgnoredCharacters { chars } => {
                let shown: String = chars.iter().collect();
                write!(f, "These characters will be ignored: {}", shown)
            }
        }
    }
}

/// Error when the text is blank
pub fn validate_not_empty(text: &str, field: &'static str) -> Vec<TextIssue> {
    if text.trim().is_empty() {
        return vec![TextIssue::Empty { field }];
    }
    Vec::new()
}

/// Warning when the normalized text exceeds `max` letters
pub fn validate_text_length(text: &str, max: usize) -> Vec<TextIssue> {
    let len = normalized_len(text);
    if len > max {
        return vec![TextIssue::TooLong { len, max }];
    }
    Vec::new()
}

/// Warning listing each distinct character that normalization discards.
///
/// Whitespace and ASCII punctuation are expected in prose and are not
/// reported.
pub fn validate_characters(text: &str) -> Vec<TextIssue> {
    let mut chars: Vec<char> = Vec::new();
    for ch in text.chars() {
        let ignorable = ch.is_ascii_alphabetic() || ch.is_whitespace() || ch.is_ascii_punctuation();
        if !ignorable && !chars.contains(&ch) {
            chars.push(ch);
        }
    }
    if chars.is_empty() {
        return Vec::new();
    }
    vec![TextIssue::IgnoredCharacters { chars }]
}

/// Run every check in display order: emptiness, length, characters
pub fn validate_text(text: &str, field: &'static str) -> Vec<TextIssue> {
    let empty = validate_not_empty(text, field);
    if !empty.is_empty() {
        return empty;
    }
    let mut issues = validate_text_length(text, CAPACITY);
    issues.extend(validate_characters(text));
    issues
}
