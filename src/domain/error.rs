use thiserror::Error;

/// A user supplied merge pattern that is not a valid regular expression.
#[derive(Error, Debug)]
#[error("Invalid pattern '{pattern}': {source}")]
pub struct InvalidPatternError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}
