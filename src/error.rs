//! Error types for the protocol engine.
//!
//! Parsing is deliberately best-effort: a malformed line degrades to
//! best-effort fields or is skipped, it never crashes the engine. The
//! error surface here is correspondingly small.

use thiserror::Error;

/// Convenience type alias for Results using [`ProtocolError`].
pub type Result<T, E = ProtocolError> = std::result::Result<T, E>;

/// Top-level protocol errors, produced at the transport boundary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProtocolError {
    /// I/O error during reading or writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A line exceeded the maximum allowed length before a terminator
    /// was seen.
    #[error("line too long: {0} bytes")]
    LineTooLong(usize),
}

/// Errors encountered when parsing a server line.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MessageParseError {
    /// The line was empty. Callers skip these; an empty line is never
    /// dispatched as an event.
    #[error("empty message")]
    Empty,

    /// No command token could be found (e.g. a bare prefix).
    #[error("missing command")]
    MissingCommand,
}

/// Errors surfaced to callers issuing outbound requests.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    /// The request requires at least a registered connection.
    /// Requests issued while disconnected are rejected, not queued.
    #[error("not connected to a server")]
    NotConnected,

    /// A connect was requested while a connection is already up.
    #[error("already connected")]
    AlreadyConnected,

    /// The transport could not be established.
    #[error("connection failed: {0}")]
    ConnectionFailed(String),

    /// The connection task has shut down and can no longer accept
    /// requests.
    #[error("connection task is gone")]
    TaskGone,
}
