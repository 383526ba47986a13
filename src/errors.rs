//! Error handling for the client generator.
//!
//! Every failure in this crate is fatal for the run: nothing is retried and
//! nothing is recovered locally. The variants exist so callers and tests can
//! tell an unreadable IDL apart from a rule that selected the wrong node kind,
//! or from a file-system failure while resetting the output directory.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::nodes::NodeKind;

/// Main error type for the client generator.
#[derive(Error, Debug)]
pub enum GeneratorError {
    /// The IDL document was readable JSON but its content makes no sense
    /// (unknown primitive, account body that is not a struct, bad address).
    #[error("Invalid IDL: {0}")]
    InvalidIdl(String),

    /// A rule's `transform` received a node its `select` should never have matched.
    #[error("Expected node of kind [{expected}], got [{found}]")]
    NodeKindMismatch { expected: NodeKind, found: NodeKind },

    /// A rule returned a node that cannot take the place of the one it replaced.
    #[error("Cannot replace [{original}] with [{replacement}]")]
    InvalidReplacement {
        original: NodeKind,
        replacement: NodeKind,
    },

    /// Errors raised while turning the node graph into Rust source.
    #[error("Rendering error: {0}")]
    Render(String),

    /// Errors related to file I/O, such as file not found or permission denied.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON in the IDL document.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Fallback carrying an error that was wrapped with [`ErrorContext`].
    #[error("{0}")]
    Context(String),
}

/// Result type alias for the client generator.
pub type GeneratorResult<T> = Result<T, GeneratorError>;

/// Where an error happened: the component, the operation, and optionally
/// the path that was being read or written.
#[derive(Debug, Clone)]
pub struct ErrorContext {
    /// Component where the error occurred (e.g., "renderer").
    pub component: String,

    /// Operation being performed when the error occurred (e.g., "write_file").
    pub operation: String,

    /// File or directory involved, if any.
    pub path: Option<PathBuf>,

    /// Additional details.
    pub details: Option<String>,
}

impl ErrorContext {
    pub fn new(component: &str, operation: &str) -> Self {
        Self {
            component: component.to_string(),
            operation: operation.to_string(),
            path: None,
            details: None,
        }
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "In {} while {}", self.component, self.operation)?;
        if let Some(path) = &self.path {
            write!(f, " at {}", path.display())?;
        }
        if let Some(details) = &self.details {
            write!(f, " ({})", details)?;
        }
        Ok(())
    }
}

/// Extension trait for adding context to errors.
pub trait ErrorExt<T> {
    /// Add context to an error.
    ///
    /// I/O errors stay I/O errors (with the context folded into the message)
    /// so callers can still match on the variant.
    fn with_context(self, context: ErrorContext) -> GeneratorResult<T>;
}

impl<T, E: std::error::Error + Send + Sync + 'static> ErrorExt<T> for Result<T, E> {
    fn with_context(self, context: ErrorContext) -> GeneratorResult<T> {
        self.map_err(|e| {
            let error_msg = format!("{}: {}", context, e);
            let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(e);
            match boxed.downcast::<GeneratorError>() {
                Ok(generator_err) => *generator_err,
                Err(other) => match other.downcast::<std::io::Error>() {
                    Ok(io_err) => GeneratorError::Io(std::io::Error::new(io_err.kind(), error_msg)),
                    Err(_) => GeneratorError::Context(error_msg),
                },
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_context_display() {
        let context = ErrorContext::new("renderer", "write_file")
            .with_path("/tmp/out/mod.rs")
            .with_details("3 files");
        assert_eq!(
            context.to_string(),
            "In renderer while write_file at /tmp/out/mod.rs (3 files)"
        );
    }

    #[test]
    fn test_io_error_keeps_kind() {
        let result: Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "missing",
        ));
        let err = result
            .with_context(ErrorContext::new("models", "load_idl"))
            .unwrap_err();
        match err {
            GeneratorError::Io(io) => {
                assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
                assert!(io.to_string().contains("In models while load_idl"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_generator_error_passes_through() {
        let result: Result<(), GeneratorError> = Err(GeneratorError::NodeKindMismatch {
            expected: NodeKind::Account,
            found: NodeKind::StructFieldType,
        });
        let err = result
            .with_context(ErrorContext::new("visitors", "transform"))
            .unwrap_err();
        assert!(matches!(err, GeneratorError::NodeKindMismatch { .. }));
    }
}
