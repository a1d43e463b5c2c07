//! Error types for NextStat

use thiserror::Error;

use crate::limits::Interval;

/// NextStat error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// An argument fell outside the interval declared for its parameter.
    #[error("Domain error: {parameter} = {value} outside {interval}")]
    Domain {
        /// Parameter symbol as declared in the limits table (e.g. `"s"`).
        parameter: String,
        /// The interval the argument had to lie in.
        interval: Interval,
        /// The rejected value.
        value: f64,
    },

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Parameter name carried by a [`Error::Domain`], if any.
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Error::Domain { parameter, .. } => Some(parameter),
            Error::Validation(_) => None,
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
