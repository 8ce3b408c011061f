//! Error handling for finboard
//!
//! Defines the domain error type and establishes a unified Result type
//! using anyhow for context chaining and error propagation. The analytics
//! engine itself never fails; these errors come from loading records,
//! reading configuration and parsing user input.

use thiserror::Error;

/// Core error types for record loading and presentation
#[derive(Error, Debug)]
pub enum FinanceError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("io error")]
    Io(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_formatting_is_readable() {
        let err = FinanceError::Parse("bad amount 'abc'".to_string());
        assert_eq!(err.to_string(), "parse error: bad amount 'abc'");
    }

    #[test]
    fn test_missing_data_file_keeps_io_source() {
        let err = crate::records::load_snapshot("/no/such/dir/export.json").unwrap_err();

        assert!(err.to_string().contains("Failed to read data file"));
        let finance = err
            .downcast_ref::<FinanceError>()
            .expect("io failure should surface as FinanceError");
        assert!(matches!(finance, FinanceError::Io(_)));

        let chain = format!("{:#}", err);
        assert!(chain.contains("io error"));
        assert!(chain.contains("No such file"));
    }

    #[test]
    fn test_finance_error_variants() {
        let validation = FinanceError::Validation("test".to_string());
        assert!(validation.to_string().starts_with("validation error"));

        let config = FinanceError::Config("test".to_string());
        assert!(config.to_string().starts_with("config error"));

        let io: FinanceError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert_eq!(io.to_string(), "io error");
    }
}
