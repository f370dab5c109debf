//! Outbound command encoding.
//!
//! Builds exactly one protocol line, without the CR-LF terminator (the
//! transport codec appends it). Only the last argument may be
//! colon-escaped: the wire format can represent a single trailing
//! parameter, so an earlier argument containing spaces would corrupt the
//! line. The caller is responsible for staying within the 512-byte line
//! limit; encoding does not truncate.

/// Check if a string needs colon-prefixing as a trailing argument.
///
/// Whitespace requires it so the receiver treats the remainder of the
/// line as one parameter. An empty or `:`-leading argument requires it
/// so it survives a parse round-trip.
#[inline]
fn needs_colon_prefix(s: &str) -> bool {
    s.is_empty() || s.contains(char::is_whitespace) || s.starts_with(':')
}

/// Append arguments to `out`, colon-escaping the last one when needed.
pub(crate) fn write_params<'a>(out: &mut String, args: impl Iterator<Item = &'a str>) {
    let args: Vec<&str> = args.collect();
    let Some((trailing, middle)) = args.split_last() else {
        return;
    };

    for param in middle {
        out.push(' ');
        out.push_str(param);
    }

    out.push(' ');
    if needs_colon_prefix(trailing) {
        out.push(':');
    }
    out.push_str(trailing);
}

/// Append arguments to `out` with the last one always colon-prefixed.
///
/// Used when re-serializing parsed messages, where the trailing slot must
/// survive a round-trip regardless of its content.
pub(crate) fn write_params_freeform<'a>(out: &mut String, args: impl Iterator<Item = &'a str>) {
    let args: Vec<&str> = args.collect();
    let Some((trailing, middle)) = args.split_last() else {
        return;
    };

    for param in middle {
        out.push(' ');
        out.push_str(param);
    }

    out.push(' ');
    out.push(':');
    out.push_str(trailing);
}

/// Encode an outbound command and its arguments as one protocol line.
///
/// ```rust
/// use ircline::encode_command;
///
/// assert_eq!(encode_command("NICK", &["wren"]), "NICK wren");
/// assert_eq!(
///     encode_command("PRIVMSG", &["#chan", "hello world"]),
///     "PRIVMSG #chan :hello world"
/// );
/// ```
pub fn encode_command(command: &str, args: &[&str]) -> String {
    let mut out = String::with_capacity(512);
    out.push_str(command);
    write_params(&mut out, args.iter().copied());
    out
}
