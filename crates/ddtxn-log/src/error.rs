use thiserror::Error;

/// A run block that cannot become a record.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("no invocation line in block")]
    MissingInvocation,
    #[error("invocation line names no executable: {line:?}")]
    MalformedInvocation { line: String },
}

/// A field needed as a number is absent or not a number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("field `{field}` is missing")]
    Missing { field: String },
    #[error("field `{field}` is not numeric: {value:?}")]
    NotNumeric { field: String, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StatError {
    #[error("no records to aggregate")]
    EmptyInput,
    #[error(transparent)]
    Coercion(#[from] CoercionError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    #[error("corpus holds no records")]
    EmptyCorpus,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Unrecognised `sys`/`atomic` combination.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown system variant: sys={sys:?} atomic={atomic:?}")]
pub struct UnknownVariant {
    pub sys: Option<String>,
    pub atomic: Option<String>,
}
