use crate::model::Parameter;
use thiserror::Error;

/// Result type alias using SearchError
pub type Result<T> = std::result::Result<T, SearchError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code used by log events and by tests
/// that assert on error classification rather than message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Recoverable by asking the operator (fatal in automated mode)
    MissingConfig,
    InvalidParameter,

    // Operator declined the pre-execution confirmation
    UserCancelled,

    // Database
    Connection,
    Query,

    // Integration/IO
    Io,
    Serialization,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::MissingConfig => "ERR_MISSING_CONFIG",
            ExErrorKind::InvalidParameter => "ERR_INVALID_PARAMETER",
            ExErrorKind::UserCancelled => "ERR_USER_CANCELLED",
            ExErrorKind::Connection => "ERR_CONNECTION",
            ExErrorKind::Query => "ERR_QUERY",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus optional context, and is what the
/// `log_op_error!` macro records.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    parameter: Option<Parameter>,
    message: String,
}

impl ExError {
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            parameter: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the search parameter the error is about
    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameter = Some(parameter);
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn parameter(&self) -> Option<Parameter> {
        self.parameter
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(parameter) = self.parameter {
            write!(f, " (parameter: {})", parameter)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for a search run
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Config file absent (`missing` empty) or lacking some keys
    #[error("{}", missing_config_message(.path, .missing))]
    MissingConfig { path: String, missing: Vec<String> },

    /// A search parameter is outside its domain or was not supplied
    #[error("Invalid value \"{value}\" for {parameter}.")]
    InvalidParameter { parameter: Parameter, value: String },

    /// Operator declined to continue
    #[error("Search cancelled by user")]
    UserCancelled,

    /// Database unreachable or handshake failed
    #[error("Could not connect to database: {message}")]
    Connection { message: String },

    /// Query execution or row decoding failed
    #[error("Query failed: {message}")]
    Query { message: String },

    /// Filesystem or terminal failure
    #[error("IO error during {op}: {message}")]
    Io { op: String, message: String },

    /// YAML or CSV encoding failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },

    /// Generic internal error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

fn missing_config_message(path: &str, missing: &[String]) -> String {
    if missing.is_empty() {
        format!("Could not locate \"{}\".", path)
    } else {
        format!(
            "Missing some information in \"{}\": {}",
            path,
            missing.join(", ")
        )
    }
}

impl SearchError {
    /// Create an IO error for the named operation
    pub fn io(op: &str, err: std::io::Error) -> Self {
        SearchError::Io {
            op: op.to_string(),
            message: err.to_string(),
        }
    }
}

impl From<csv::Error> for SearchError {
    fn from(err: csv::Error) -> Self {
        SearchError::Serialization {
            message: err.to_string(),
        }
    }
}

/// Conversion from SearchError to ExError
impl From<SearchError> for ExError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::MissingConfig { .. } => ExError::new(ExErrorKind::MissingConfig)
                .with_op("load_config")
                .with_message(err.to_string()),

            SearchError::InvalidParameter { parameter, value } => {
                ExError::new(ExErrorKind::InvalidParameter)
                    .with_op("resolve_parameters")
                    .with_parameter(parameter)
                    .with_message(format!("Invalid value \"{}\"", value))
            }

            SearchError::UserCancelled => {
                ExError::new(ExErrorKind::UserCancelled).with_message("Search cancelled by user")
            }

            SearchError::Connection { message } => ExError::new(ExErrorKind::Connection)
                .with_op("connect")
                .with_message(message),

            SearchError::Query { message } => {
                ExError::new(ExErrorKind::Query).with_message(message)
            }

            SearchError::Io { op, message } => ExError::new(ExErrorKind::Io)
                .with_op(op)
                .with_message(message),

            SearchError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }

            SearchError::Internal { message } => {
                ExError::new(ExErrorKind::Internal).with_message(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_parameter_message_names_parameter_and_value() {
        let err = SearchError::InvalidParameter {
            parameter: Parameter::Scope,
            value: "widget".to_string(),
        };
        assert_eq!(err.to_string(), "Invalid value \"widget\" for Scope.");
    }

    #[test]
    fn test_missing_config_messages() {
        let absent = SearchError::MissingConfig {
            path: "db.yaml".to_string(),
            missing: vec![],
        };
        assert_eq!(absent.to_string(), "Could not locate \"db.yaml\".");

        let partial = SearchError::MissingConfig {
            path: "db.yaml".to_string(),
            missing: vec!["port".to_string(), "db".to_string()],
        };
        assert_eq!(
            partial.to_string(),
            "Missing some information in \"db.yaml\": port, db"
        );
    }

    #[test]
    fn test_ex_error_conversion_keeps_kind_and_parameter() {
        let ex: ExError = SearchError::InvalidParameter {
            parameter: Parameter::Comparison,
            value: "~".to_string(),
        }
        .into();

        assert_eq!(ex.kind(), ExErrorKind::InvalidParameter);
        assert_eq!(ex.code(), "ERR_INVALID_PARAMETER");
        assert_eq!(ex.parameter(), Some(Parameter::Comparison));
        assert_eq!(ex.op(), Some("resolve_parameters"));
        assert_eq!(ex.message(), "Invalid value \"~\"");
        assert!(ex.to_string().starts_with("[ERR_INVALID_PARAMETER]"));
    }

    #[test]
    fn test_io_conversion_keeps_op() {
        let ex: ExError = SearchError::Io {
            op: "write_results".to_string(),
            message: "disk full".to_string(),
        }
        .into();

        assert_eq!(ex.kind(), ExErrorKind::Io);
        assert_eq!(ex.op(), Some("write_results"));
        assert_eq!(ex.parameter(), None);
        assert_eq!(ex.message(), "disk full");
    }

    #[test]
    fn test_error_codes_are_distinct() {
        let kinds = [
            ExErrorKind::MissingConfig,
            ExErrorKind::InvalidParameter,
            ExErrorKind::UserCancelled,
            ExErrorKind::Connection,
            ExErrorKind::Query,
            ExErrorKind::Io,
            ExErrorKind::Serialization,
            ExErrorKind::Internal,
        ];
        let mut codes: Vec<_> = kinds.iter().map(|k| k.code()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), kinds.len());
    }
}
