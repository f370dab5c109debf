//! Property-based tests for parsing and encoding.
//!
//! Uses proptest to generate random protocol components and verify:
//! 1. The parser never panics on arbitrary input
//! 2. Encoded commands re-parse to the same command and arguments
//! 3. Parser invariants hold across random inputs

use proptest::prelude::*;

use ircline::{encode_command, ServerMessage};

/// Valid IRC nickname: starts with a letter or special char, max 9
/// chars per RFC 2812.
fn nickname_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z\\[\\]\\\\^_`{|}][a-zA-Z0-9\\-\\[\\]\\\\^_`{|}]{0,8}")
        .expect("valid regex")
}

/// Valid IRC channel name.
fn channel_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[#&][a-zA-Z0-9_\\-]{1,49}").expect("valid regex")
}

/// Message text free of CR/LF/NUL (which would break the line framing).
/// Guaranteed not to start with a colon or contain leading-space
/// ambiguity beyond what the trailing rule covers.
fn message_text_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z0-9 .,!?'\\-]{1,200}").expect("valid regex")
}

/// A command verb.
fn verb_strategy() -> impl Strategy<Value = &'static str> {
    prop_oneof![
        Just("PRIVMSG"),
        Just("NOTICE"),
        Just("JOIN"),
        Just("PART"),
        Just("NICK"),
    ]
}

proptest! {
    #[test]
    fn parser_never_panics_on_arbitrary_input(input in "\\PC{0,256}") {
        let _ = input.parse::<ServerMessage>();
    }

    #[test]
    fn encoded_privmsg_round_trips(
        channel in channel_strategy(),
        text in message_text_strategy(),
    ) {
        let line = encode_command("PRIVMSG", &[&channel, &text]);
        let parsed: ServerMessage = line.parse().expect("encoded line parses");

        prop_assert!(parsed.command.is_verb("PRIVMSG"));
        prop_assert_eq!(&parsed.params, &vec![channel, text]);
    }

    #[test]
    fn encoded_command_round_trips(
        verb in verb_strategy(),
        middle in nickname_strategy(),
        trailing in message_text_strategy(),
    ) {
        // Only the last argument may contain whitespace; under that
        // precondition parse(encode(..)) reproduces the arguments.
        let line = encode_command(verb, &[&middle, &trailing]);
        let parsed: ServerMessage = line.parse().expect("encoded line parses");

        prop_assert!(parsed.command.is_verb(verb));
        prop_assert_eq!(&parsed.params, &vec![middle, trailing]);
    }

    #[test]
    fn parsed_messages_have_single_trailing(
        channel in channel_strategy(),
        text in message_text_strategy(),
    ) {
        let line = format!(":a!u@h PRIVMSG {} :{}", channel, text);
        let parsed: ServerMessage = line.parse().expect("line parses");

        // Only the last parameter may contain spaces.
        for param in &parsed.params[..parsed.params.len() - 1] {
            prop_assert!(!param.contains(' '));
        }
    }

    #[test]
    fn reserialized_messages_reparse_equal(
        nick in nickname_strategy(),
        channel in channel_strategy(),
        text in message_text_strategy(),
    ) {
        let line = format!(":{}!user@host PRIVMSG {} :{}", nick, channel, text);
        let first: ServerMessage = line.parse().expect("line parses");
        let second: ServerMessage = first.to_string().parse().expect("reparses");
        prop_assert_eq!(first, second);
    }
}
