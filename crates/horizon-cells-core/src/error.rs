//! Error types for Horizon Cells.

/// Result type alias for cell operations.
pub type Result<T> = std::result::Result<T, CellError>;

/// Errors that can occur while building or dispatching cells.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CellError {
    /// A registration or construction argument was rejected.
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument { name: String, message: String },

    /// An adapter was requested for a host kind the builder was not set up for.
    #[error("Cell builder was set up for {expected} hosts, cannot serve a {actual} host")]
    WrongHostKind {
        expected: &'static str,
        actual: &'static str,
    },

    /// A caller-supplied configurator failed.
    #[error("Cell configurator failed: {0}")]
    Configure(String),

    /// A custom drawing routine failed while painting.
    #[error("Failed to paint cell component: {0}")]
    Paint(String),

    /// Editor text could not be converted to the column's value type.
    #[error("Cannot convert '{text}' to a value of type '{type_name}'")]
    Conversion {
        text: String,
        type_name: &'static str,
    },
}

impl CellError {
    /// Create an invalid argument error.
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a wrong host kind error.
    pub fn wrong_host_kind(expected: &'static str, actual: &'static str) -> Self {
        Self::WrongHostKind { expected, actual }
    }

    /// Create a configurator failure.
    pub fn configure(message: impl Into<String>) -> Self {
        Self::Configure(message.into())
    }

    /// Create a paint failure.
    pub fn paint(message: impl Into<String>) -> Self {
        Self::Paint(message.into())
    }

    /// Create a conversion failure.
    pub fn conversion(text: impl Into<String>, type_name: &'static str) -> Self {
        Self::Conversion {
            text: text.into(),
            type_name,
        }
    }

    /// Returns `true` if this is an invalid argument error.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}
