//! Error handling for the stringdex library
//!
//! Build-time precondition violations (duplicate edge labels, a root that
//! cannot be placed at base 0, patterns containing the reserved NULL byte)
//! are reported through [`StringdexError`]; they indicate bugs or unusable
//! input, never recoverable conditions. Query paths are total and do not
//! use this type.

use thiserror::Error;

/// Main error type for the stringdex library
#[derive(Error, Debug)]
pub enum StringdexError {
    /// I/O related errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid data format or content
    #[error("Invalid data: {message}")]
    InvalidData {
        /// Error message describing the issue
        message: String,
    },

    /// Index out of bounds access
    #[error("Out of bounds: index {index}, size {size}")]
    OutOfBounds {
        /// The invalid index
        index: usize,
        /// The valid size/length
        size: usize,
    },

    /// Index construction failed a structural precondition
    #[error("Index construction error: {message}")]
    Build {
        /// Error message describing the violated precondition
        message: String,
    },
}

impl StringdexError {
    /// Create an invalid data error
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        Self::InvalidData {
            message: message.into(),
        }
    }

    /// Create an out of bounds error
    pub fn out_of_bounds(index: usize, size: usize) -> Self {
        Self::OutOfBounds { index, size }
    }

    /// Create an index construction error
    pub fn build<S: Into<String>>(message: S) -> Self {
        Self::Build {
            message: message.into(),
        }
    }

    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            Self::Io(_) => "io",
            Self::InvalidData { .. } => "data",
            Self::OutOfBounds { .. } => "bounds",
            Self::Build { .. } => "build",
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, StringdexError>;

/// Assert that an index is within bounds
#[inline]
pub fn check_bounds(index: usize, size: usize) -> Result<()> {
    if index >= size {
        Err(StringdexError::out_of_bounds(index, size))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = StringdexError::invalid_data("test message");
        assert_eq!(err.category(), "data");

        let err = StringdexError::build("root displaced");
        assert_eq!(err.category(), "build");
    }

    #[test]
    fn test_bounds_checking() {
        assert!(check_bounds(5, 10).is_ok());
        assert!(check_bounds(10, 10).is_err());
        assert!(check_bounds(15, 10).is_err());
    }

    #[test]
    fn test_error_display() {
        let err = StringdexError::invalid_data("test message");
        let display = format!("{}", err);
        assert!(display.contains("Invalid data"));
        assert!(display.contains("test message"));

        let bounds_err = StringdexError::out_of_bounds(10, 5);
        let bounds_display = format!("{}", bounds_err);
        assert!(bounds_display.contains("Out of bounds"));
        assert!(bounds_display.contains("10"));
        assert!(bounds_display.contains("5"));
    }

    #[test]
    fn test_from_io_error() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "no such dataset");
        let err: StringdexError = io_error.into();
        assert_eq!(err.category(), "io");
        assert!(format!("{}", err).contains("I/O error"));
    }
}
