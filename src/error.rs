// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Error types for tokenwarden
//!
//! Errors double as the error descriptor handed to interceptor hooks, so a
//! failed response keeps the full [`Response`] it came from.

use thiserror::Error;

use crate::http::Response;

/// Result type alias for tokenwarden operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for tokenwarden
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level failure reported by reqwest
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("HTTP {} from {}", .0.status, .0.url)]
    Status(Box<Response>),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// Network error raised by an interceptor or the client itself
    #[error("Network error: {0}")]
    Network(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Authentication error
    #[error("Authentication failed: {reason}")]
    Authentication {
        reason: String,
        url: Option<String>,
        status: Option<u16>,
    },

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a non-success response
    pub fn status(response: Response) -> Self {
        Error::Status(Box::new(response))
    }

    /// Create a new network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Error::Network(msg.into())
    }

    /// Create an authentication error
    pub fn auth(reason: impl Into<String>) -> Self {
        Error::Authentication {
            reason: reason.into(),
            url: None,
            status: None,
        }
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a network error
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Http(_))
    }

    /// Status code of the response nested in this error, if any.
    ///
    /// Errors raised before a response arrived (connect failures, bad URLs,
    /// hook rejections) have no status.
    pub fn response_status(&self) -> Option<u16> {
        match self {
            Error::Status(response) => Some(response.status_code()),
            Error::Http(e) => e.status().map(|s| s.as_u16()),
            Error::Authentication { status, .. } => *status,
            _ => None,
        }
    }

    /// Check if the nested response is 401 Unauthorized
    pub fn is_unauthorized(&self) -> bool {
        self.response_status() == Some(401)
    }

    /// The response carried by this error, if any
    pub fn response(&self) -> Option<&Response> {
        match self {
            Error::Status(response) => Some(response),
            _ => None,
        }
    }

    /// Get URL if available
    pub fn url(&self) -> Option<&str> {
        match self {
            Error::Status(response) => Some(response.url_str()),
            Error::Http(e) => e.url().map(|u| u.as_str()),
            Error::Authentication { url: Some(u), .. } => Some(u),
            _ => None,
        }
    }
}
