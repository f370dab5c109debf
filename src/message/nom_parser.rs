//! Nom-based IRC line parser.
//!
//! Produces a borrowed intermediate representation of one protocol line.
//! The grammar is the classic RFC 1459 client form:
//!
//! ```text
//! [':' prefix SP] command [SP middle]* [SP ':' trailing]
//! ```

use nom::{
    bytes::complete::take_while1,
    character::complete::char,
    combinator::opt,
    error::Error as NomError,
    sequence::preceded,
    IResult,
};

use crate::error::MessageParseError;

type ParseResult<'a, O> = IResult<&'a str, O, NomError<&'a str>>;

/// Parse the message prefix (the part after `:` and before the first space).
fn parse_prefix(input: &str) -> ParseResult<'_, &str> {
    preceded(char(':'), take_while1(|c| c != ' '))(input)
}

/// Parse the command token (letters for verbs, digits for numeric replies).
fn parse_command(input: &str) -> ParseResult<'_, &str> {
    take_while1(|c: char| c.is_alphanumeric())(input)
}

/// A parsed protocol line with borrowed string slices.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ParsedLine<'a> {
    /// Raw prefix (without the leading `:`), if present.
    pub prefix: Option<&'a str>,
    /// The command token as received.
    pub command: &'a str,
    /// Parameters, trailing included as the last entry.
    pub params: Vec<&'a str>,
}

/// Parse one line (without its CR-LF terminator) into a [`ParsedLine`].
///
/// Middle parameters are separated by one or more spaces. A parameter
/// starting with `:` consumes the rest of the line as a single trailing
/// parameter with the colon stripped; an empty trailing parameter is
/// valid and distinct from no trailing parameter at all.
pub(crate) fn parse_line(input: &str) -> Result<ParsedLine<'_>, MessageParseError> {
    if input.is_empty() {
        return Err(MessageParseError::Empty);
    }

    let (rest, prefix) =
        opt(parse_prefix)(input).map_err(|_: nom::Err<NomError<&str>>| MessageParseError::MissingCommand)?;
    let rest = rest.trim_start_matches(' ');

    let (mut rest, command) =
        parse_command(rest).map_err(|_| MessageParseError::MissingCommand)?;

    let mut params = Vec::new();
    loop {
        let stripped = rest.trim_start_matches(' ');
        if stripped.is_empty() || stripped.len() == rest.len() {
            // Either nothing left, or no space separator before it.
            break;
        }
        rest = stripped;

        if let Some(trailing) = rest.strip_prefix(':') {
            params.push(trailing);
            break;
        }

        match rest.find(' ') {
            Some(idx) => {
                params.push(&rest[..idx]);
                rest = &rest[idx..];
            }
            None => {
                params.push(rest);
                break;
            }
        }
    }

    Ok(ParsedLine {
        prefix,
        command,
        params,
    })
}
