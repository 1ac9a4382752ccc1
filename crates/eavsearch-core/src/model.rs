//! Search parameter and result types
//!
//! `SearchParams` holds what the operator supplied (possibly nothing, possibly
//! garbage). The resolver turns it into a `SearchRequest`, whose fields are
//! all typed and valid, so nothing downstream can see an unresolved value.

use std::fmt;
use std::path::PathBuf;

/// Entity family to search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scope {
    Category,
    Product,
}

impl Scope {
    pub const ALL: [Scope; 2] = [Scope::Category, Scope::Product];

    /// Table-name fragment, as in `catalog_<scope>_entity`
    pub fn as_str(&self) -> &'static str {
        match self {
            Scope::Category => "category",
            Scope::Product => "product",
        }
    }

    /// Case-insensitive parse; `None` when outside the domain
    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|s| s.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison operator allow-list
///
/// The SQL spelling of each variant is interpolated into the search query,
/// so this enum is the only way an operator reaches SQL text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Comparison {
    Eq,
    NullSafeEq,
    NotEq,
    NotEqAnsi,
    Lt,
    Le,
    Ge,
    Gt,
    Like,
    NotLike,
    Is,
    IsNot,
}

impl Comparison {
    pub const ALL: [Comparison; 12] = [
        Comparison::Eq,
        Comparison::NullSafeEq,
        Comparison::NotEq,
        Comparison::NotEqAnsi,
        Comparison::Lt,
        Comparison::Le,
        Comparison::Ge,
        Comparison::Gt,
        Comparison::Like,
        Comparison::NotLike,
        Comparison::Is,
        Comparison::IsNot,
    ];

    pub fn as_sql(&self) -> &'static str {
        match self {
            Comparison::Eq => "=",
            Comparison::NullSafeEq => "<=>",
            Comparison::NotEq => "!=",
            Comparison::NotEqAnsi => "<>",
            Comparison::Lt => "<",
            Comparison::Le => "<=",
            Comparison::Ge => ">=",
            Comparison::Gt => ">",
            Comparison::Like => "LIKE",
            Comparison::NotLike => "NOT LIKE",
            Comparison::Is => "IS",
            Comparison::IsNot => "IS NOT",
        }
    }

    /// Case-insensitive parse; `None` when outside the allow-list
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.as_sql().eq_ignore_ascii_case(raw))
    }
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// The value parameter as supplied
///
/// `Text(String::new())` is an explicit empty string and is valid; only
/// `Missing` fails validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchValue {
    #[default]
    Missing,
    Null,
    Text(String),
}

impl SearchValue {
    pub fn is_missing(&self) -> bool {
        matches!(self, SearchValue::Missing)
    }
}

impl From<Option<String>> for SearchValue {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(text) => SearchValue::Text(text),
            None => SearchValue::Missing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Csv,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 2] = [OutputFormat::Csv, OutputFormat::Text];

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Csv => "csv",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(raw.trim()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where rendered output goes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputLocation {
    Stdout,
    File(PathBuf),
}

impl OutputLocation {
    pub const STDOUT: &'static str = "stdout";

    /// Any non-empty string is a location; `"stdout"` is the console
    pub fn parse(raw: &str) -> Option<Self> {
        if raw.is_empty() {
            None
        } else if raw == Self::STDOUT {
            Some(OutputLocation::Stdout)
        } else {
            Some(OutputLocation::File(PathBuf::from(raw)))
        }
    }
}

impl fmt::Display for OutputLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputLocation::Stdout => f.write_str(Self::STDOUT),
            OutputLocation::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// The six resolvable search parameters, in resolution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    Scope,
    Attribute,
    Comparison,
    Value,
    OutputFormat,
    OutputLocation,
}

impl Parameter {
    pub const ORDER: [Parameter; 6] = [
        Parameter::Scope,
        Parameter::Attribute,
        Parameter::Comparison,
        Parameter::Value,
        Parameter::OutputFormat,
        Parameter::OutputLocation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Parameter::Scope => "Scope",
            Parameter::Attribute => "Attribute",
            Parameter::Comparison => "Comparison",
            Parameter::Value => "Value",
            Parameter::OutputFormat => "OutputFormat",
            Parameter::OutputLocation => "OutputLocation",
        }
    }
}

impl fmt::Display for Parameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Raw parameters as supplied on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    pub scope: Option<String>,
    pub attribute: Option<String>,
    pub comparison: Option<String>,
    pub value: SearchValue,
    pub output_format: Option<String>,
    pub output_location: Option<String>,
    pub automated: bool,
}

/// Fully resolved search
///
/// `value: None` is a SQL `NULL` comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub scope: Scope,
    pub attribute: String,
    pub comparison: Comparison,
    pub value: Option<String>,
    pub output_format: OutputFormat,
    pub output_location: OutputLocation,
    pub automated: bool,
}

/// One row of the attribute listing query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    pub id: i64,
    pub code: String,
    pub required: bool,
}

/// One row of the search query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRow {
    pub sku: String,
    pub attribute_id: i64,
    pub attribute_code: String,
    pub value: Option<String>,
    pub store_id: Option<String>,
    pub required: bool,
}

impl ResultRow {
    /// Row carrying only the columns the renderers use
    pub fn new(sku: impl Into<String>, value: Option<&str>) -> Self {
        Self {
            sku: sku.into(),
            attribute_id: 0,
            attribute_code: String::new(),
            value: value.map(str::to_string),
            store_id: None,
            required: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_parse_is_case_insensitive() {
        assert_eq!(Scope::parse("product"), Some(Scope::Product));
        assert_eq!(Scope::parse("Category"), Some(Scope::Category));
        assert_eq!(Scope::parse("widget"), None);
        assert_eq!(Scope::parse(""), None);
    }

    #[test]
    fn test_comparison_allow_list_round_trips() {
        for cmp in Comparison::ALL {
            assert_eq!(Comparison::parse(cmp.as_sql()), Some(cmp));
        }
        assert_eq!(Comparison::parse("like"), Some(Comparison::Like));
        assert_eq!(Comparison::parse("is not"), Some(Comparison::IsNot));
        assert_eq!(Comparison::parse("=="), None);
        assert_eq!(Comparison::parse("; DROP TABLE"), None);
    }

    #[test]
    fn test_output_location_parse() {
        assert_eq!(OutputLocation::parse("stdout"), Some(OutputLocation::Stdout));
        assert_eq!(
            OutputLocation::parse("/tmp/out.csv"),
            Some(OutputLocation::File(PathBuf::from("/tmp/out.csv")))
        );
        assert_eq!(OutputLocation::parse(""), None);
    }

    #[test]
    fn test_search_value_from_option() {
        assert_eq!(SearchValue::from(None), SearchValue::Missing);
        assert_eq!(
            SearchValue::from(Some(String::new())),
            SearchValue::Text(String::new())
        );
        assert!(!SearchValue::Text(String::new()).is_missing());
        assert!(!SearchValue::Null.is_missing());
    }
}
