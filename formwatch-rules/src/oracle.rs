// Email and URL recognizers

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$").unwrap()
});

static URL_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

/// Boolean recognizer for a named pattern.
///
/// The pattern validator asks an oracle whether the stringified field value
/// is, say, a well-formed email address. Any `Fn(&str) -> bool` is an oracle.
pub trait PatternOracle: Send + Sync {
    /// Check whether `value` is recognized
    fn matches(&self, value: &str) -> bool;
}

impl<F> PatternOracle for F
where
    F: Fn(&str) -> bool + Send + Sync,
{
    fn matches(&self, value: &str) -> bool {
        self(value)
    }
}

/// Default email recognizer
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailOracle;

impl PatternOracle for EmailOracle {
    fn matches(&self, value: &str) -> bool {
        EMAIL_REGEX.is_match(value)
    }
}

/// Default URL recognizer (`http` and `https` only)
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlOracle;

impl PatternOracle for UrlOracle {
    fn matches(&self, value: &str) -> bool {
        URL_REGEX.is_match(value)
    }
}
