//! # ircline
//!
//! A client-side IRC protocol engine: it owns a single server connection,
//! performs the login handshake, parses incoming protocol lines into
//! structured messages, dispatches them to per-channel and per-session
//! state, and encodes outgoing commands back into wire format.
//!
//! ## Features
//!
//! - Best-effort IRC message parsing (prefix, numeric/verb command, params)
//! - Outbound command encoding with the trailing-parameter colon rule
//! - A sans-IO dispatch engine driving session and channel state
//! - Lazily created per-channel state (member sets, transcripts)
//! - Optional Tokio integration: CR-LF line codec and an async client task
//!
//! The presentation layer (rendering, input handling, settings) is an
//! external collaborator: it consumes the [`Event`] stream this engine
//! emits and issues [`Request`]s back into it.

#![deny(clippy::all)]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! ## Quick Start
//!
//! ### Parsing server lines
//!
//! ```rust
//! use ircline::{Command, ServerMessage};
//!
//! let msg: ServerMessage = ":alice!user@host PRIVMSG #chan :hi there".parse().unwrap();
//! assert_eq!(msg.nick(), Some("alice"));
//! assert_eq!(msg.command, Command::Verb("PRIVMSG".into()));
//! assert_eq!(msg.params, vec!["#chan", "hi there"]);
//! ```
//!
//! ### Encoding outbound commands
//!
//! ```rust
//! use ircline::encode_command;
//!
//! let line = encode_command("PRIVMSG", &["#chan", "hello world"]);
//! assert_eq!(line, "PRIVMSG #chan :hello world");
//! ```
//!
//! ### Driving the sans-IO engine
//!
//! ```rust
//! use ircline::{Engine, EngineConfig, ServerMessage};
//!
//! let mut engine = Engine::new(EngineConfig::new("wren"));
//! engine.on_connecting("irc.example.net", 6667, "wren");
//! let _registration = engine.on_connected(); // USER + NICK + Connected event
//!
//! let welcome: ServerMessage = ":server 001 wren :Welcome".parse().unwrap();
//! let actions = engine.feed(&welcome);
//! assert!(!actions.is_empty());
//! ```

pub mod casemap;
pub mod channel;
pub mod encode;
pub mod engine;
pub mod error;
pub mod event;
pub mod message;
pub mod response;
pub mod session;
pub mod verb;

pub use self::casemap::{irc_eq, irc_to_lower};
pub use self::channel::{Channel, ChannelRegistry, TranscriptEntry};
pub use self::encode::encode_command;
pub use self::engine::{Action, Engine, EngineConfig, Request};
pub use self::error::{EngineError, MessageParseError, ProtocolError};
pub use self::event::Event;
pub use self::message::{Command, ServerMessage};
pub use self::response::Response;
pub use self::session::{ConnectionState, Session};
pub use self::verb::Verb;

#[cfg(feature = "tokio")]
pub mod codec;
#[cfg(feature = "tokio")]
pub use self::codec::{LineCodec, MAX_IRC_LINE_LEN};

#[cfg(feature = "tokio")]
pub mod client;
#[cfg(feature = "tokio")]
pub use self::client::{Client, EventStream};
