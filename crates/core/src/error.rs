//! Error types for top-c selection accuracy analysis.

/// Errors that can occur while computing an accuracy distribution.
#[derive(Debug, thiserror::Error)]
pub enum AccuracyError {
    /// A parameter is outside its valid domain. Raised before any sampling.
    #[error("invalid configuration: {msg}")]
    InvalidConfiguration {
        /// Human-readable error description.
        msg: String,
    },

    /// The dataset cannot support the requested computation.
    #[error("degenerate input at relaxation a={a}: {msg}")]
    DegenerateInput {
        /// Relaxation being sampled when the problem surfaced.
        a: f64,
        /// Human-readable error description.
        msg: String,
    },

    /// The failure-probability oracle errored or returned an invalid bound.
    #[error("oracle failure at relaxation a={a}: {msg}")]
    OracleFailure {
        /// Relaxation passed to the oracle.
        a: f64,
        /// Human-readable error description.
        msg: String,
    },

    /// Dataset input could not be read or parsed.
    #[error("dataset error: {msg}")]
    Dataset {
        /// Human-readable error description.
        msg: String,
    },
}

/// Result type for accuracy operations.
pub type Result<T> = std::result::Result<T, AccuracyError>;

impl AccuracyError {
    /// Create an invalid configuration error.
    pub fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration { msg: msg.into() }
    }

    /// Create a degenerate input error for relaxation `a`.
    pub fn degenerate<S: Into<String>>(a: f64, msg: S) -> Self {
        Self::DegenerateInput { a, msg: msg.into() }
    }

    /// Create an oracle failure for relaxation `a`.
    pub fn oracle<S: Into<String>>(a: f64, msg: S) -> Self {
        Self::OracleFailure { a, msg: msg.into() }
    }

    /// Create a dataset error.
    pub fn dataset<S: Into<String>>(msg: S) -> Self {
        Self::Dataset { msg: msg.into() }
    }

    /// Relaxation associated with this error, if any.
    pub fn relaxation(&self) -> Option<f64> {
        match self {
            Self::DegenerateInput { a, .. } | Self::OracleFailure { a, .. } => Some(*a),
            _ => None,
        }
    }
}
