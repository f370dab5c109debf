//! Connection-wide identity and lifecycle state.
//!
//! A [`Session`] is 1:1 with one server connection. It is a pure state
//! holder: no I/O, no timers.

use crate::casemap::irc_eq;

/// Lifecycle of the connection.
///
/// `LoggedIn` is reachable only from `Connected`, after the welcome
/// numeric. `Disconnected` is reachable from any state on socket
/// closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ConnectionState {
    /// No transport.
    #[default]
    Disconnected,
    /// Transport requested, not yet established.
    Connecting,
    /// Transport up, registration sent, welcome not yet received.
    Connected,
    /// Welcome numeric received; the full command set is available.
    LoggedIn,
}

/// One connection's identity and endpoint.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Session {
    nickname: String,
    state: ConnectionState,
    host: String,
    port: u16,
}

impl Session {
    pub fn new() -> Session {
        Session::default()
    }

    /// The currently claimed nickname. During registration this is the
    /// candidate being negotiated, which may still be rejected.
    pub fn current_nickname(&self) -> &str {
        &self.nickname
    }

    pub(crate) fn set_nickname(&mut self, nickname: impl Into<String>) {
        self.nickname = nickname.into();
    }

    /// Apply an observed rename. Returns whether it affected the local
    /// identity (comparison uses the IRC case mapping).
    pub fn apply_rename(&mut self, old: &str, new: &str) -> bool {
        if irc_eq(old, &self.nickname) {
            self.nickname = new.to_owned();
            true
        } else {
            false
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Target endpoint, retained to support reconnect with identical
    /// parameters.
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Whether the transport is up (registration may still be pending).
    pub fn is_connected(&self) -> bool {
        self.state >= ConnectionState::Connected
    }

    pub fn is_logged_in(&self) -> bool {
        self.state == ConnectionState::LoggedIn
    }

    pub(crate) fn mark_connecting(&mut self, host: &str, port: u16, nickname: &str) {
        self.state = ConnectionState::Connecting;
        self.host = host.to_owned();
        self.port = port;
        self.nickname = nickname.to_owned();
    }

    pub(crate) fn mark_connected(&mut self) {
        self.state = ConnectionState::Connected;
    }

    pub fn mark_logged_in(&mut self) {
        self.state = ConnectionState::LoggedIn;
    }

    pub(crate) fn mark_disconnected(&mut self) {
        self.state = ConnectionState::Disconnected;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_state_ordering() {
        assert!(ConnectionState::LoggedIn > ConnectionState::Connected);
        assert!(ConnectionState::Connected > ConnectionState::Connecting);
        assert!(ConnectionState::Connecting > ConnectionState::Disconnected);
    }

    #[test]
    fn test_apply_rename_self() {
        let mut session = Session::new();
        session.set_nickname("wren");
        assert!(session.apply_rename("wren", "wren2"));
        assert_eq!(session.current_nickname(), "wren2");
    }

    #[test]
    fn test_apply_rename_other_user() {
        let mut session = Session::new();
        session.set_nickname("wren");
        assert!(!session.apply_rename("alice", "bob"));
        assert_eq!(session.current_nickname(), "wren");
    }

    #[test]
    fn test_apply_rename_case_mapped() {
        let mut session = Session::new();
        session.set_nickname("Wren[1]");
        assert!(session.apply_rename("wren{1}", "finch"));
        assert_eq!(session.current_nickname(), "finch");
    }

    #[test]
    fn test_lifecycle() {
        let mut session = Session::new();
        assert_eq!(session.state(), ConnectionState::Disconnected);

        session.mark_connecting("irc.example.net", 6667, "wren");
        assert_eq!(session.state(), ConnectionState::Connecting);
        assert!(!session.is_connected());

        session.mark_connected();
        assert!(session.is_connected());
        assert!(!session.is_logged_in());

        session.mark_logged_in();
        assert!(session.is_logged_in());

        session.mark_disconnected();
        assert_eq!(session.state(), ConnectionState::Disconnected);
        // Endpoint is retained for reconnect.
        assert_eq!(session.host(), "irc.example.net");
        assert_eq!(session.port(), 6667);
    }
}
