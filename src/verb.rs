//! The finite set of command verbs the engine dispatches on.
//!
//! Dispatch is a match over this enumeration rather than a cascade of
//! string comparisons; anything outside it surfaces as a diagnostic
//! event and is never a failure.

/// A known command verb.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Verb {
    Pass,
    Nick,
    User,
    Join,
    Part,
    Mode,
    Topic,
    Kick,
    Invite,
    Privmsg,
    Notice,
    Quit,
    Ping,
    Pong,
    Error,
}

impl Verb {
    /// Look up a verb by name, case-insensitively. Returns `None` for
    /// anything outside the known set.
    pub fn parse(name: &str) -> Option<Verb> {
        let verb = match name.to_ascii_uppercase().as_str() {
            "PASS" => Verb::Pass,
            "NICK" => Verb::Nick,
            "USER" => Verb::User,
            "JOIN" => Verb::Join,
            "PART" => Verb::Part,
            "MODE" => Verb::Mode,
            "TOPIC" => Verb::Topic,
            "KICK" => Verb::Kick,
            "INVITE" => Verb::Invite,
            "PRIVMSG" => Verb::Privmsg,
            "NOTICE" => Verb::Notice,
            "QUIT" => Verb::Quit,
            "PING" => Verb::Ping,
            "PONG" => Verb::Pong,
            "ERROR" => Verb::Error,
            _ => return None,
        };
        Some(verb)
    }

    /// The wire name of this verb, always uppercase.
    pub fn as_str(self) -> &'static str {
        match self {
            Verb::Pass => "PASS",
            Verb::Nick => "NICK",
            Verb::User => "USER",
            Verb::Join => "JOIN",
            Verb::Part => "PART",
            Verb::Mode => "MODE",
            Verb::Topic => "TOPIC",
            Verb::Kick => "KICK",
            Verb::Invite => "INVITE",
            Verb::Privmsg => "PRIVMSG",
            Verb::Notice => "NOTICE",
            Verb::Quit => "QUIT",
            Verb::Ping => "PING",
            Verb::Pong => "PONG",
            Verb::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Verb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Verb::parse("privmsg"), Some(Verb::Privmsg));
        assert_eq!(Verb::parse("PRIVMSG"), Some(Verb::Privmsg));
        assert_eq!(Verb::parse("PrivMsg"), Some(Verb::Privmsg));
    }

    #[test]
    fn test_unknown_verb() {
        assert_eq!(Verb::parse("CAP"), None);
        assert_eq!(Verb::parse(""), None);
    }

    #[test]
    fn test_round_trip() {
        for verb in [Verb::Join, Verb::Quit, Verb::Ping, Verb::Error] {
            assert_eq!(Verb::parse(verb.as_str()), Some(verb));
        }
    }
}
