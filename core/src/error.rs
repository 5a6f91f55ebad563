use std::fmt;
use thiserror::Error;

/// The error type for giftsign operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A field required by the selected operation is absent
    MissingField,

    /// Payload encoding selector is not one we can serialize
    UnsupportedEncoding,

    /// Signing context is unusable (missing/malformed credential, region,
    /// service, host, or timestamp)
    ContextInvalid,

    /// Produced authorization value has no well-formed `Signature=` component
    SignatureMalformed,

    /// Unexpected errors (formatting, header assembly, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

// Convenience constructors
impl Error {
    /// Create a missing field error
    pub fn missing_field(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::MissingField, message)
    }

    /// Create an unsupported encoding error
    pub fn unsupported_encoding(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnsupportedEncoding, message)
    }

    /// Create a context invalid error
    pub fn context_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContextInvalid, message)
    }

    /// Create a signature malformed error
    pub fn signature_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SignatureMalformed, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::MissingField => write!(f, "missing required field"),
            ErrorKind::UnsupportedEncoding => write!(f, "unsupported payload encoding"),
            ErrorKind::ContextInvalid => write!(f, "invalid signing context"),
            ErrorKind::SignatureMalformed => write!(f, "malformed signature"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<std::fmt::Error> for Error {
    fn from(err: std::fmt::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_is_preserved() {
        let err = Error::missing_field("cardNumber is required for ActivateGiftCard");
        assert_eq!(err.kind(), ErrorKind::MissingField);
        assert_eq!(
            err.to_string(),
            "cardNumber is required for ActivateGiftCard"
        );
    }

    #[test]
    fn test_source_chain() {
        let err = Error::context_invalid("timestamp not parseable")
            .with_source(anyhow::anyhow!("input was empty"));
        assert_eq!(err.kind(), ErrorKind::ContextInvalid);
        assert!(std::error::Error::source(&err).is_some());
    }
}
