//! CR-LF line codec for the transport.
//!
//! Frames the TCP byte stream into parsed [`ServerMessage`]s and writes
//! outgoing lines with CR-LF termination. Bytes belonging to a line that
//! has not been fully received yet stay in the buffer until the next
//! read delivers the rest, so a line split across two socket reads is
//! reassembled transparently.

use bytes::{Buf, BufMut, BytesMut};
use tokio_util::codec::{Decoder, Encoder};
use tracing::debug;

use crate::error::ProtocolError;
use crate::message::ServerMessage;

/// Maximum accepted line length, including the terminator.
///
/// The protocol targets 512 bytes but real servers routinely exceed it;
/// this bound only guards against unbounded buffering.
pub const MAX_IRC_LINE_LEN: usize = 8191;

/// A tokio codec framing IRC lines.
#[derive(Debug, Default)]
pub struct LineCodec;

impl Decoder for LineCodec {
    type Item = ServerMessage;
    type Error = ProtocolError;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        loop {
            // Accept bare LF as well as CR-LF; CR is stripped below.
            let Some(pos) = src.iter().position(|&b| b == b'\n') else {
                if src.len() > MAX_IRC_LINE_LEN {
                    return Err(ProtocolError::LineTooLong(src.len()));
                }
                // Partial line: keep buffering until the next read.
                return Ok(None);
            };

            let line_bytes = src.split_to(pos);
            src.advance(1); // skip the LF

            // Decoding is best-effort: invalid UTF-8 degrades rather
            // than killing the connection.
            let line = String::from_utf8_lossy(&line_bytes);
            match ServerMessage::parse(&line) {
                Ok(msg) => return Ok(Some(msg)),
                Err(err) => {
                    // Empty and unparseable lines are skipped, never
                    // dispatched.
                    if !line.trim().is_empty() {
                        debug!(line = %line, error = %err, "skipping unparseable line");
                    }
                    continue;
                }
            }
        }
    }
}

impl Encoder<String> for LineCodec {
    type Error = ProtocolError;

    fn encode(&mut self, line: String, dst: &mut BytesMut) -> Result<(), Self::Error> {
        dst.reserve(line.len() + 2);
        dst.put_slice(line.as_bytes());
        dst.put_slice(b"\r\n");
        Ok(())
    }
}
