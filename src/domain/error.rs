//! Domain validation errors for listing and settings types.
//!
//! These errors are returned by the `FromStr` implementations of the
//! enumerated filter values and by validated constructors.
//!
//! # Examples
//!
//! ```
//! use eventfeed::domain::error::DomainError;
//! use eventfeed::domain::event::EventStatus;
//!
//! let result: Result<EventStatus, _> = "archived".parse();
//! assert!(matches!(result, Err(DomainError::InvalidStatus { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Event status filter outside `active`/`resolved`.
    #[error("invalid status filter: {value}")]
    InvalidStatus {
        /// The rejected value.
        value: String,
    },

    /// Sports section outside `games`/`props`.
    #[error("invalid sports section: {value}")]
    InvalidSportsSection {
        /// The rejected value.
        value: String,
    },

    /// Frequency class outside the known set.
    #[error("invalid frequency: {value}")]
    InvalidFrequency {
        /// The rejected value.
        value: String,
    },

    /// Locale code that is not in the supported set.
    #[error("unsupported locale: {code}")]
    UnsupportedLocale {
        /// The rejected code.
        code: String,
    },

    /// A settings value failed validation.
    #[error("invalid setting {key}: {reason}")]
    InvalidSetting {
        /// Settings key being written.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}
