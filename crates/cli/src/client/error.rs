// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error type and transient-failure classification for the remote client.

use thiserror::Error;

/// Normalized failure class of a remote call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport-level hiccup (reset, refused, truncated response).
    TransientNetwork,
    /// The service answered but is momentarily unhealthy (5xx, licensing).
    TransientServer,
    /// Anything else; retrying will not help.
    Fatal,
}

/// Error message markers classified as transient network failures.
const NETWORK_MARKERS: &[&str] = &[
    "connection reset",
    "connection refused",
    "connection closed",
    "broken pipe",
    "timed out",
    "incomplete message",
    "unexpected end of file",
    "unexpected eof",
];

/// Error message markers classified as transient server failures.
const SERVER_MARKERS: &[&str] = &[
    "internal server error",
    "bad gateway",
    "service unavailable",
    "gateway timeout",
    "license check",
    "licensing",
];

/// All possible errors that can occur talking to the remote service.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The request never produced a usable response.
    #[error("transport error: {message}")]
    Transport { message: String },

    /// The service answered with a non-success status.
    #[error("remote service returned {status}: {message}")]
    Api { status: u16, message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("invalid remote url: {0}")]
    BadUrl(String),
}

impl ClientError {
    /// Classifies this error into a normalized kind.
    ///
    /// Status codes win for API errors; everything else falls back to the
    /// marker scan over the (already chain-flattened) message text.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Transport { message } => {
                classify_markers(message).unwrap_or(ErrorKind::Fatal)
            }
            ClientError::Api { status, message } => match status {
                500 | 502 | 503 | 504 => ErrorKind::TransientServer,
                _ => classify_markers(message).unwrap_or(ErrorKind::Fatal),
            },
            ClientError::NotFound { .. } | ClientError::BadUrl(_) => ErrorKind::Fatal,
        }
    }

    /// The single predicate the resilient caller consults.
    pub fn is_transient(&self) -> bool {
        self.kind() != ErrorKind::Fatal
    }
}

/// Scans a message for transient-error markers, case-insensitively.
fn classify_markers(message: &str) -> Option<ErrorKind> {
    let lowered = message.to_lowercase();
    if NETWORK_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Some(ErrorKind::TransientNetwork);
    }
    if SERVER_MARKERS.iter().any(|m| lowered.contains(m)) {
        return Some(ErrorKind::TransientServer);
    }
    None
}

impl From<reqwest::Error> for ClientError {
    /// Flattens the reqwest error and its cause chain into one message so the
    /// marker scan sees wrapped causes too.
    fn from(e: reqwest::Error) -> Self {
        let mut message = e.to_string();
        let mut source = std::error::Error::source(&e);
        while let Some(cause) = source {
            message.push_str(": ");
            message.push_str(&cause.to_string());
            source = cause.source();
        }
        ClientError::Transport { message }
    }
}

/// Result type for remote client operations.
pub type ClientResult<T> = Result<T, ClientError>;
