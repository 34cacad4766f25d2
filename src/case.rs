//! Name normalization used by customer search.

use crate::error::AppError;

/// Lower-case the whole token, then upper-case its first character.
/// e.g. "jOHN" -> "John", "o'brien" -> "O'brien"
pub fn title_case(name: &str) -> Result<String, AppError> {
    let lowered = name.to_lowercase();
    let mut chars = lowered.chars();
    let first = chars
        .next()
        .ok_or_else(|| AppError::Validation("cannot title-case an empty name".into()))?;
    let mut out = String::with_capacity(lowered.len());
    out.extend(first.to_uppercase());
    out.push_str(chars.as_str());
    Ok(out)
}

/// Split a free-text search on whitespace and title-case every token.
pub fn search_tokens(term: &str) -> Result<Vec<String>, AppError> {
    term.split_whitespace().map(title_case).collect()
}
