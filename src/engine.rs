//! Sans-IO dispatch engine.
//!
//! The engine performs no I/O. It consumes lifecycle notifications and
//! parsed [`ServerMessage`]s, drives the session state machine and the
//! channel registry, and produces [`Action`]s: lines to write to the
//! transport and events to emit to the presentation layer. This keeps
//! the state machine runtime-agnostic and testable without a socket;
//! the Tokio wrapper in [`crate::client`] owns the actual transport.
//!
//! Dispatch is strictly in arrival order: the registration handshake,
//! the nickname-collision retry, and PING/PONG liveness all depend on
//! ordering.

use crate::channel::ChannelRegistry;
use crate::encode::encode_command;
use crate::error::EngineError;
use crate::event::Event;
use crate::message::{Command, ServerMessage};
use crate::response::Response;
use crate::session::Session;
use crate::verb::Verb;

/// Configuration for one connection's engine.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EngineConfig {
    /// Initial nickname to claim during registration.
    pub nickname: String,
    /// Username (ident) sent in the USER command.
    pub username: String,
    /// Real name sent in the USER command.
    pub realname: String,
    /// Suffix appended to the candidate nickname on a registration
    /// collision.
    pub nick_suffix: String,
    /// Collision retries allowed during registration before giving up
    /// with a fatal error event.
    pub max_nick_retries: u32,
}

impl EngineConfig {
    /// Config with placeholder identity fields, matching the minimal
    /// registration most servers accept.
    pub fn new(nickname: impl Into<String>) -> EngineConfig {
        EngineConfig {
            nickname: nickname.into(),
            username: "na".to_owned(),
            realname: "na".to_owned(),
            nick_suffix: "_".to_owned(),
            max_nick_retries: 8,
        }
    }
}

/// What the caller must do with the engine's output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Write this line to the transport (CR-LF appended by the codec).
    Send(String),
    /// Deliver this event to the presentation layer.
    Emit(Event),
}

/// An outbound request from the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Request {
    /// Ask the server for a new nickname. Identity is not mutated until
    /// the server confirms with a NICK line.
    ChangeNickname(String),
    /// Send a PRIVMSG to a channel or user.
    SendMessage { target: String, text: String },
    /// Join a channel (created lazily in the registry).
    Join(String),
    /// Leave a channel, with an optional parting reason.
    Leave {
        channel: String,
        reason: Option<String>,
    },
    /// Quit the server, with an optional reason.
    Quit(Option<String>),
}

/// The protocol engine: session + channels + dispatch.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    session: Session,
    channels: ChannelRegistry,
    nick_retries: u32,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Engine {
        let mut session = Session::new();
        session.set_nickname(config.nickname.clone());
        Engine {
            config,
            session,
            channels: ChannelRegistry::new(),
            nick_retries: 0,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// The transport has been requested. Remembers the endpoint and the
    /// nickname so a later reconnect replays identical parameters.
    pub fn on_connecting(&mut self, host: &str, port: u16, nickname: &str) {
        self.session.mark_connecting(host, port, nickname);
    }

    /// The transport is up: send the registration sequence and announce
    /// the connection.
    pub fn on_connected(&mut self) -> Vec<Action> {
        self.session.mark_connected();
        self.nick_retries = 0;
        vec![
            Action::Send(encode_command(
                Verb::User.as_str(),
                &[&self.config.username, "0", "0", &self.config.realname],
            )),
            Action::Send(encode_command(
                Verb::Nick.as_str(),
                &[self.session.current_nickname()],
            )),
            Action::Emit(Event::Connected {
                host: self.session.host().to_owned(),
            }),
        ]
    }

    /// The transport went down, from any state. No automatic reconnect.
    pub fn on_disconnected(&mut self) -> Vec<Action> {
        if self.session.state() == crate::session::ConnectionState::Disconnected {
            return Vec::new();
        }
        self.session.mark_disconnected();
        vec![Action::Emit(Event::Disconnected)]
    }

    /// Parse and dispatch one raw line. Empty or unparseable lines are
    /// skipped, never dispatched.
    pub fn handle_line(&mut self, line: &str) -> Vec<Action> {
        match ServerMessage::parse(line) {
            Ok(msg) => self.feed(&msg),
            Err(_) => Vec::new(),
        }
    }

    /// Dispatch one parsed message. Lines arriving while the session is
    /// not at least `Connected` are ignored.
    pub fn feed(&mut self, msg: &ServerMessage) -> Vec<Action> {
        if !self.session.is_connected() {
            return Vec::new();
        }
        match &msg.command {
            Command::Numeric(code) => self.dispatch_numeric(*code, msg),
            Command::Verb(name) => match Verb::parse(name) {
                Some(verb) => self.dispatch_verb(verb, msg),
                None => vec![Action::Emit(Event::Diagnostic {
                    command: name.clone(),
                })],
            },
        }
    }

    /// Issue an outbound request. Rejected (never queued) unless the
    /// transport is up.
    pub fn request(&mut self, request: Request) -> Result<Vec<Action>, EngineError> {
        if !self.session.is_connected() {
            return Err(EngineError::NotConnected);
        }

        let line = match request {
            Request::ChangeNickname(nick) => encode_command(Verb::Nick.as_str(), &[&nick]),
            Request::SendMessage { target, text } => {
                encode_command(Verb::Privmsg.as_str(), &[&target, &text])
            }
            Request::Join(channel) => {
                self.channels.get_or_create(&channel);
                encode_command(Verb::Join.as_str(), &[&channel])
            }
            Request::Leave { channel, reason } => match reason {
                Some(reason) => encode_command(Verb::Part.as_str(), &[&channel, &reason]),
                None => encode_command(Verb::Part.as_str(), &[&channel]),
            },
            Request::Quit(reason) => match reason {
                Some(reason) => encode_command(Verb::Quit.as_str(), &[&reason]),
                None => encode_command(Verb::Quit.as_str(), &[]),
            },
        };

        Ok(vec![Action::Send(line)])
    }

    fn dispatch_numeric(&mut self, code: u16, msg: &ServerMessage) -> Vec<Action> {
        match Response::from_code(code) {
            Some(Response::RPL_WELCOME) => {
                // Idempotent: a repeated welcome is a no-op.
                if self.session.is_logged_in() {
                    return Vec::new();
                }
                // The first parameter carries the nickname the server
                // actually registered, which may differ from ours.
                if let Some(nick) = msg.param(0) {
                    if !nick.is_empty() && nick != "*" {
                        self.session.set_nickname(nick);
                    }
                }
                self.session.mark_logged_in();
                self.nick_retries = 0;
                vec![Action::Emit(Event::LoggedIn {
                    nickname: self.session.current_nickname().to_owned(),
                })]
            }

            Some(Response::ERR_NICKNAMEINUSE) | Some(Response::ERR_NICKCOLLISION) => {
                if self.session.is_logged_in() {
                    // A post-login rename was rejected; the change never
                    // took effect, so identity is left untouched.
                    vec![Action::Emit(Event::Error {
                        reason: "nickname is already in use".to_owned(),
                    })]
                } else if self.nick_retries >= self.config.max_nick_retries {
                    vec![Action::Emit(Event::Error {
                        reason: format!(
                            "registration failed: nickname still in use after {} attempts",
                            self.nick_retries + 1
                        ),
                    })]
                } else {
                    // Registration retry: suffix the candidate and ask
                    // again.
                    self.nick_retries += 1;
                    let nick =
                        format!("{}{}", self.session.current_nickname(), self.config.nick_suffix);
                    self.session.set_nickname(nick.clone());
                    vec![Action::Send(encode_command(Verb::Nick.as_str(), &[&nick]))]
                }
            }

            Some(Response::ERR_PASSWDMISMATCH) => vec![Action::Emit(Event::Error {
                reason: "the password provided is not correct".to_owned(),
            })],

            Some(Response::RPL_NAMREPLY) => {
                // :server 353 <client> <symbol> <channel> :nick nick ...
                let channel = msg.param(2).unwrap_or("").to_owned();
                let nicks = msg.param(3).unwrap_or("");
                if !channel.is_empty() {
                    self.channels.merge_names(&channel, nicks.split_whitespace());
                }
                Vec::new()
            }

            // Merge semantics make the end-of-names boundary marker
            // unnecessary, but it is recognized rather than surfaced as
            // an unknown command.
            Some(Response::RPL_ENDOFNAMES) => Vec::new(),

            Some(Response::RPL_NOTOPIC)
            | Some(Response::RPL_TOPIC)
            | Some(Response::RPL_MOTD)
            | Some(Response::RPL_MOTDSTART)
            | Some(Response::RPL_ENDOFMOTD)
            | Some(Response::ERR_NOMOTD) => Vec::new(),

            Some(_) | None => vec![Action::Emit(Event::Diagnostic {
                command: format!("{:03}", code),
            })],
        }
    }

    fn dispatch_verb(&mut self, verb: Verb, msg: &ServerMessage) -> Vec<Action> {
        let nick = msg.nick().unwrap_or("").to_owned();

        match verb {
            Verb::Nick => {
                let new = msg.param(0).unwrap_or("").to_owned();
                self.channels.rename_member(&nick, &new);

                let mut actions = Vec::new();
                if self.session.apply_rename(&nick, &new) {
                    actions.push(Action::Emit(Event::SelfNicknameChanged {
                        nickname: new.clone(),
                    }));
                }
                actions.push(Action::Emit(Event::NicknameChanged { old: nick, new }));
                actions
            }

            Verb::Join => {
                let channel = msg.param(0).unwrap_or("").to_owned();
                self.channels.add_member(&channel, &nick);
                vec![Action::Emit(Event::UserJoined { nick, channel })]
            }

            Verb::Part => {
                let channel = msg.param(0).unwrap_or("").to_owned();
                self.channels.remove_member(&channel, &nick);
                vec![Action::Emit(Event::UserParted { nick, channel })]
            }

            Verb::Quit => {
                let reason = msg.param(0).unwrap_or("").to_owned();
                self.channels.remove_everywhere(&nick);
                vec![Action::Emit(Event::UserQuit { nick, reason })]
            }

            Verb::Privmsg => {
                let channel = msg.param(0).unwrap_or("").to_owned();
                let text = msg.param(1).unwrap_or("").to_owned();
                self.channels.record_message(&channel, &nick, &text);
                vec![Action::Emit(Event::Message {
                    channel,
                    sender: nick,
                    text,
                })]
            }

            Verb::Notice => vec![Action::Emit(Event::Notification {
                sender: nick,
                text: msg.param(1).unwrap_or("").to_owned(),
            })],

            // Liveness: reply immediately, never delayed or batched.
            Verb::Ping => vec![Action::Send(encode_command(
                Verb::Pong.as_str(),
                &[self.session.current_nickname()],
            ))],

            Verb::Pong => Vec::new(),

            Verb::Error => vec![Action::Emit(Event::Error {
                reason: msg.param(0).unwrap_or("").to_owned(),
            })],

            // Received but intentionally unhandled; forwarded so callers
            // extending this core can see them.
            Verb::Pass | Verb::User | Verb::Mode | Verb::Topic | Verb::Kick | Verb::Invite => {
                vec![Action::Emit(Event::Diagnostic {
                    command: verb.as_str().to_owned(),
                })]
            }
        }
    }
}
