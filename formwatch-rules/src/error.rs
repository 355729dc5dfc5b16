// Rule construction errors

use thiserror::Error;

/// Errors raised while building a rule.
///
/// These are programming mistakes caught at construction time. A value that
/// fails a rule is never an `Err`; it becomes a message in the context.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("expected a predicate or a rule with a predicate, got none")]
    MissingFunction,

    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
}

/// Result type for rule construction
pub type Result<T> = std::result::Result<T, RuleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_pattern_from_regex_error() {
        let err: RuleError = regex::Regex::new("(").unwrap_err().into();
        assert!(matches!(err, RuleError::InvalidPattern(_)));
        assert!(err.to_string().starts_with("invalid pattern"));
    }
}
