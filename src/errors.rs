//! Unified error types for Gatehouse.
//!
//! Every failure the service can produce is a variant of [`Error`]. Store
//! failures keep the raw `DbErr` so the message can be shown to staff as-is.

use chrono::NaiveDate;
use thiserror::Error;

/// Message shown when an error carries no text of its own.
pub const GENERIC_ERROR_MESSAGE: &str = "An unexpected error occurred. Please try again.";

/// All errors produced by the service.
#[derive(Debug, Error)]
pub enum Error {
    /// Failure reported by the relational store
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Description of what went wrong
        message: String,
    },

    /// Input rejected before reaching the store
    #[error("{message}")]
    Validation {
        /// Human-readable reason
        message: String,
    },

    /// Report range with start after end
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange {
        /// Requested first day
        start: NaiveDate,
        /// Requested last day
        end: NaiveDate,
    },

    /// No person with the given id
    #[error("Person {id} not found")]
    PersonNotFound {
        /// Person id
        id: i64,
    },

    /// No vehicle with the given id
    #[error("Vehicle {id} not found")]
    VehicleNotFound {
        /// Vehicle id
        id: i64,
    },

    /// No link with the given id
    #[error("Link {id} not found")]
    LinkNotFound {
        /// Link id
        id: i64,
    },

    /// No access event with the given id
    #[error("Access event {id} not found")]
    EventNotFound {
        /// Event id
        id: i64,
    },

    /// The person is already linked to the vehicle
    #[error("This link already exists.")]
    DuplicateLink {
        /// Person side of the pair
        person_id: i64,
        /// Vehicle side of the pair
        vehicle_id: i64,
    },

    /// I/O failure (config file, listener)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable could not be read
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

impl Error {
    /// Shorthand for a [`Error::Validation`] with the given message.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Text suitable for a blocking notification to the operator.
    ///
    /// Store errors keep their raw message; anything that renders to an
    /// empty string falls back to [`GENERIC_ERROR_MESSAGE`].
    #[must_use]
    pub fn user_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            GENERIC_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_uses_error_text() {
        let err = Error::PersonNotFound { id: 7 };
        assert_eq!(err.user_message(), "Person 7 not found");
    }

    #[test]
    fn test_user_message_falls_back_when_empty() {
        let err = Error::validation("   ");
        assert_eq!(err.user_message(), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn test_database_error_keeps_raw_message() {
        let err: Error = sea_orm::DbErr::Custom("disk I/O error".to_string()).into();
        assert!(err.user_message().contains("disk I/O error"));
    }
}
