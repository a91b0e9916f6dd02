//! # Venue Error Types
//!
//! Error types for venue data fetches.
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Venue Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │    Lookup       │  │   Transport     │  │     Payload             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  NotFound (404) │  │  Fetch (non-2xx)│  │  Decode                 │ │
//! │  │                 │  │  Transport      │  │  InvalidData            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │  Configuration  │                                                    │
//! │  │  InvalidBaseUrl │                                                    │
//! │  └─────────────────┘                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `NotFound` is its own variant so callers never inspect status codes or
//! message text to recognise an unknown venue.

use thiserror::Error;

/// Result type alias for venue operations.
pub type VenueResult<T> = Result<T, VenueError>;

/// Venue fetch errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    /// The venue API answered 404 for this slug.
    #[error("Venue not found: {slug}")]
    NotFound { slug: String },

    /// The venue API answered with any other non-success status.
    #[error("Request failed: {status} {reason}{}", details_suffix(.details))]
    Fetch {
        status: u16,
        reason: String,
        details: String,
    },

    /// The request never produced a response (DNS, connect, timeout).
    #[error("Request failed: {0}")]
    Transport(String),

    /// The response body is not the expected JSON shape.
    #[error("Invalid venue response: {0}")]
    Decode(String),

    /// The response decoded but holds impossible values.
    #[error("Invalid venue data: {0}")]
    InvalidData(String),

    /// The configured API base URL is unusable.
    #[error("Invalid venue API URL: {0}")]
    InvalidBaseUrl(String),
}

impl VenueError {
    /// True when the venue does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, VenueError::NotFound { .. })
    }
}

fn details_suffix(details: &str) -> String {
    if details.is_empty() {
        String::new()
    } else {
        format!(" ({})", details)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_message_includes_body() {
        let err = VenueError::Fetch {
            status: 500,
            reason: "Internal Server Error".to_string(),
            details: "upstream exploded".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Request failed: 500 Internal Server Error (upstream exploded)"
        );

        let err = VenueError::Fetch {
            status: 503,
            reason: "Service Unavailable".to_string(),
            details: String::new(),
        };
        assert_eq!(err.to_string(), "Request failed: 503 Service Unavailable");
    }

    #[test]
    fn test_is_not_found() {
        assert!(VenueError::NotFound {
            slug: "nope".to_string()
        }
        .is_not_found());
        assert!(!VenueError::Transport("timeout".to_string()).is_not_found());
    }
}
