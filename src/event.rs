//! Events emitted to the presentation layer.
//!
//! The engine never renders or persists anything; everything observable
//! flows out through this enum. Transport failures surface as
//! [`Event::Disconnected`] and protocol-level rejections as
//! [`Event::Error`]; no inbound line ever terminates the process.

/// An observable protocol event.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub enum Event {
    /// The transport is up and registration has been sent.
    Connected {
        /// The remote endpoint that was reached.
        host: String,
    },
    /// The transport went down, from any state. No automatic reconnect
    /// happens; the caller may issue a reconnect request.
    Disconnected,
    /// Registration completed (welcome numeric received).
    LoggedIn {
        /// The nickname in effect, possibly altered by the server.
        nickname: String,
    },
    /// A protocol-level rejection or server-reported failure.
    Error {
        /// Human-readable reason.
        reason: String,
    },
    /// A command the engine does not handle. Forward-compatible default,
    /// never a failure.
    Diagnostic {
        /// The unhandled command, as received.
        command: String,
    },
    /// Any user on the network changed their nickname.
    NicknameChanged { old: String, new: String },
    /// Our own nickname changed (server-confirmed).
    SelfNicknameChanged { nickname: String },
    /// A user joined a channel.
    UserJoined { nick: String, channel: String },
    /// A user left a channel.
    UserParted { nick: String, channel: String },
    /// A user quit the network entirely.
    UserQuit { nick: String, reason: String },
    /// A message delivered to a channel or directly to us.
    Message {
        channel: String,
        sender: String,
        text: String,
    },
    /// A notice, not associated with any channel.
    Notification { sender: String, text: String },
}
