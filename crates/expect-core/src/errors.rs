use thiserror::Error;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Divergences between two compared values are never errors; they are
/// reported as diff entries. The kinds below cover caller misuse and gaps
/// in the value model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Configuration
    /// An excluded field path pattern could not be parsed
    InvalidFieldPath,
    /// Option values are malformed (e.g. unreadable TOML)
    InvalidConfig,

    // Traversal
    /// A value kind the engine has no comparison rule for
    UnsupportedKind,
    /// A `Reflect` implementation produced different kinds for the same type
    KindMismatch,

    // Output
    Serialization,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidFieldPath => "ERR_INVALID_FIELD_PATH",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::UnsupportedKind => "ERR_UNSUPPORTED_KIND",
            ExErrorKind::KindMismatch => "ERR_KIND_MISMATCH",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification for programmatic handling plus the traversal
/// context (path, type) in which the error was raised.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    path: Option<String>,
    type_name: Option<String>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            path: None,
            type_name: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add traversal path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add type context
    pub fn with_type_name(mut self, type_name: impl Into<String>) -> Self {
        self.type_name = Some(type_name.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Get the operation context, if any
    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    /// Get the traversal path context, if any
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    /// Get the type context, if any
    pub fn type_name(&self) -> Option<&str> {
        self.type_name.as_deref()
    }

    /// Get the error message
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
        if let Some(path) = &self.path {
            if path.is_empty() {
                write!(f, " (path: <root>)")?;
            } else {
                write!(f, " (path: {})", path)?;
            }
        }
        if let Some(type_name) = &self.type_name {
            write!(f, " (type: {})", type_name)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Parse failures for excluded field path patterns
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldPathError {
    /// Pattern is the empty string
    #[error("field path pattern is empty")]
    Empty,

    /// A segment starts with something other than `.` or `[`
    #[error("unexpected character {found:?} at position {position} in field path pattern {pattern:?}")]
    UnexpectedChar {
        pattern: String,
        position: usize,
        found: char,
    },

    /// `[` without a matching `]`
    #[error("unclosed bracket at position {position} in field path pattern {pattern:?}")]
    UnclosedBracket { pattern: String, position: usize },

    /// `.` not followed by a field name, or `[]`
    #[error("empty segment at position {position} in field path pattern {pattern:?}")]
    EmptySegment { pattern: String, position: usize },
}

impl FieldPathError {
    fn pattern(&self) -> Option<&str> {
        match self {
            FieldPathError::Empty => None,
            FieldPathError::UnexpectedChar { pattern, .. }
            | FieldPathError::UnclosedBracket { pattern, .. }
            | FieldPathError::EmptySegment { pattern, .. } => Some(pattern),
        }
    }
}

impl From<FieldPathError> for ExError {
    fn from(err: FieldPathError) -> Self {
        let ex = ExError::new(ExErrorKind::InvalidFieldPath)
            .with_op("compile_field_path")
            .with_message(err.to_string());
        match err.pattern() {
            Some(pattern) => ex.with_path(pattern),
            None => ex,
        }
    }
}

impl From<toml::de::Error> for ExError {
    fn from(err: toml::de::Error) -> Self {
        ExError::new(ExErrorKind::InvalidConfig)
            .with_op("parse_options")
            .with_message(err.to_string())
    }
}

impl From<serde_json::Error> for ExError {
    fn from(err: serde_json::Error) -> Self {
        ExError::new(ExErrorKind::Serialization).with_message(err.to_string())
    }
}
