//! Value normalization
//!
//! The literal strings "null" and "not null" can be turned into a real SQL
//! NULL comparison, which also means fixing up the operator (`LIKE NULL`
//! and `= NULL` never match anything). Every other value is wrapped in `%`
//! when the operator is LIKE, turning the search into a substring match.

use crate::model::Comparison;

/// A value spelled like an SQL null test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NullKeyword {
    Null,
    NotNull,
}

impl NullKeyword {
    /// Case-insensitive, whole-value match
    pub fn detect(raw: &str) -> Option<Self> {
        match raw.to_lowercase().as_str() {
            "null" => Some(NullKeyword::Null),
            "not null" => Some(NullKeyword::NotNull),
            _ => None,
        }
    }
}

/// Question offered when a keyword is detected; its default answer is yes
pub const CONVERT_QUESTION: &str =
    "Would you like that converted to the reserved SQL keyword `NULL`?";

pub fn keyword_notice(raw: &str) -> String {
    format!(
        "I see that you're searching for a value of {}. Right now that is a literal string and has no special meaning to MySQL.",
        raw
    )
}

/// Normalize a value against its comparison operator
///
/// `raw = None` is already a NULL and passes through. `convert_keyword` is
/// the operator's answer to [`CONVERT_QUESTION`] and only matters when
/// `raw` is a [`NullKeyword`].
pub fn normalize(
    raw: Option<&str>,
    comparison: Comparison,
    convert_keyword: bool,
) -> (Option<String>, Comparison) {
    let Some(raw) = raw else {
        return (None, comparison);
    };

    if let Some(keyword) = NullKeyword::detect(raw).filter(|_| convert_keyword) {
        let adjusted = match (comparison, keyword) {
            (Comparison::Like | Comparison::Eq, NullKeyword::Null) => Comparison::Is,
            (Comparison::Like | Comparison::Eq, NullKeyword::NotNull) => Comparison::IsNot,
            (Comparison::NotEq, _) | (Comparison::Is, NullKeyword::NotNull) => Comparison::IsNot,
            (other, _) => other,
        };
        tracing::debug!(
            from = comparison.as_sql(),
            to = adjusted.as_sql(),
            "converted keyword value to NULL"
        );
        return (None, adjusted);
    }

    match comparison {
        Comparison::Like => (Some(format!("%{}%", raw)), comparison),
        _ => (Some(raw.to_string()), comparison),
    }
}
