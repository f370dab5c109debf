//! Parsed server messages.
//!
//! A [`ServerMessage`] is the structured form of one protocol line. It is
//! transient: produced per line, consumed immediately by dispatch, never
//! retained.

mod nom_parser;

use std::fmt;
use std::str::FromStr;

use crate::encode::write_params_freeform;
use crate::error::MessageParseError;

/// The command of a protocol line: either a 3-digit numeric reply code or
/// a verb such as `JOIN` or `PRIVMSG`.
///
/// The two forms are mutually exclusive on the wire, so they are kept as
/// a tagged variant rather than a raw string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Command {
    /// A 3-digit numeric reply code (e.g. `001`, `433`).
    Numeric(u16),
    /// A textual command verb, stored as received. Callers compare
    /// case-insensitively; the encoder always emits uppercase.
    Verb(String),
}

impl Command {
    /// Classify a command token: exactly three decimal digits is numeric,
    /// anything else is kept as a verb literal.
    pub fn classify(token: &str) -> Command {
        if token.len() == 3 && token.bytes().all(|b| b.is_ascii_digit()) {
            // Three ASCII digits always fit in u16.
            let code = token.parse::<u16>().unwrap_or(0);
            Command::Numeric(code)
        } else {
            Command::Verb(token.to_owned())
        }
    }

    /// The numeric code, if this is a numeric reply.
    pub fn numeric(&self) -> Option<u16> {
        match self {
            Command::Numeric(code) => Some(*code),
            Command::Verb(_) => None,
        }
    }

    /// Case-insensitive comparison against a verb name.
    pub fn is_verb(&self, name: &str) -> bool {
        match self {
            Command::Verb(verb) => verb.eq_ignore_ascii_case(name),
            Command::Numeric(_) => false,
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Numeric(code) => write!(f, "{:03}", code),
            Command::Verb(verb) => f.write_str(verb),
        }
    }
}

/// One parsed protocol line.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ServerMessage {
    /// The originating nickname or server name, without the leading `:`.
    pub prefix: Option<String>,
    /// Numeric reply code or command verb.
    pub command: Command,
    /// Ordered parameters. At most one entry contains spaces (the
    /// trailing parameter) and it is always last.
    pub params: Vec<String>,
}

impl ServerMessage {
    /// Parse one line. Trailing CR-LF is tolerated and stripped.
    ///
    /// # Errors
    ///
    /// [`MessageParseError::Empty`] for an empty line (callers skip it),
    /// [`MessageParseError::MissingCommand`] when no command token can be
    /// found. All other input degrades to best-effort fields.
    pub fn parse(line: &str) -> Result<ServerMessage, MessageParseError> {
        let trimmed = line.trim_end_matches(['\r', '\n']);
        let parsed = nom_parser::parse_line(trimmed)?;

        Ok(ServerMessage {
            prefix: parsed.prefix.map(str::to_owned),
            command: Command::classify(parsed.command),
            params: parsed.params.into_iter().map(str::to_owned).collect(),
        })
    }

    /// The originating nickname extracted from the prefix.
    ///
    /// For a user prefix (`nick!user@host`) this is the part before `!`.
    /// Server-originated lines have no `!`, so the whole prefix is
    /// returned; callers must tolerate a hostname appearing here.
    pub fn nick(&self) -> Option<&str> {
        let prefix = self.prefix.as_deref()?;
        Some(match prefix.find('!') {
            Some(idx) => &prefix[..idx],
            None => prefix,
        })
    }

    /// Parameter at `index`, if present.
    pub fn param(&self, index: usize) -> Option<&str> {
        self.params.get(index).map(String::as_str)
    }
}

impl FromStr for ServerMessage {
    type Err = MessageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ServerMessage::parse(s)
    }
}

impl fmt::Display for ServerMessage {
    /// Serialize back to wire format (without the CR-LF terminator).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(64);
        if let Some(prefix) = &self.prefix {
            out.push(':');
            out.push_str(prefix);
            out.push(' ');
        }
        out.push_str(&self.command.to_string());
        write_params_freeform(&mut out, self.params.iter().map(String::as_str));
        f.write_str(&out)
    }
}
