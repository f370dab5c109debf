//! End-to-end dispatch scenarios against the sans-IO engine.
//!
//! These exercise full session flows (registration, collision
//! handling, channel traffic) by feeding raw server lines and checking
//! the produced actions, without any transport.

use ircline::{Action, Engine, EngineConfig, Event, Request};

fn start(nickname: &str) -> (Engine, Vec<Action>) {
    let mut engine = Engine::new(EngineConfig::new(nickname));
    engine.on_connecting("irc.example.net", 6667, nickname);
    let actions = engine.on_connected();
    (engine, actions)
}

fn sent_lines(actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Send(line) => Some(line.clone()),
            Action::Emit(_) => None,
        })
        .collect()
}

fn emitted(actions: &[Action]) -> Vec<Event> {
    actions
        .iter()
        .filter_map(|a| match a {
            Action::Emit(event) => Some(event.clone()),
            Action::Send(_) => None,
        })
        .collect()
}

#[test]
fn registration_handshake_then_login() {
    let (mut engine, actions) = start("wren");
    assert_eq!(sent_lines(&actions), vec!["USER na 0 0 na", "NICK wren"]);

    let actions = engine.handle_line(":server 001 wren :Welcome to the network");
    assert_eq!(
        emitted(&actions),
        vec![Event::LoggedIn {
            nickname: "wren".into()
        }]
    );
    assert!(engine.session().is_logged_in());
}

#[test]
fn contested_registration_resolves_after_retries() {
    let (mut engine, _) = start("wren");

    // Two collisions, then the server accepts the suffixed candidate.
    let a1 = engine.handle_line(":server 433 * wren :Nickname is already in use");
    assert_eq!(sent_lines(&a1), vec!["NICK wren_"]);
    assert!(emitted(&a1).is_empty());

    let a2 = engine.handle_line(":server 433 * wren_ :Nickname is already in use");
    assert_eq!(sent_lines(&a2), vec!["NICK wren__"]);

    let a3 = engine.handle_line(":server 001 wren__ :Welcome");
    assert_eq!(
        emitted(&a3),
        vec![Event::LoggedIn {
            nickname: "wren__".into()
        }]
    );
}

#[test]
fn channel_session_flow() {
    let (mut engine, _) = start("wren");
    let _ = engine.handle_line(":server 001 wren :Welcome");

    // Join, receive the (multi-line) names listing, then traffic.
    let actions = engine.request(Request::Join("#rust".into())).unwrap();
    assert_eq!(sent_lines(&actions), vec!["JOIN #rust"]);

    let _ = engine.handle_line(":wren!u@h JOIN #rust");
    let _ = engine.handle_line(":server 353 wren = #rust :@alice bob");
    let _ = engine.handle_line(":server 353 wren = #rust :+carol");
    let _ = engine.handle_line(":server 366 wren #rust :End of /NAMES list");

    let channel = engine.channels().get("#Rust").expect("channel exists");
    assert_eq!(channel.members().len(), 4); // alice, bob, carol, wren

    let actions = engine.handle_line(":alice!u@h PRIVMSG #rust :morning all");
    assert_eq!(
        emitted(&actions),
        vec![Event::Message {
            channel: "#rust".into(),
            sender: "alice".into(),
            text: "morning all".into()
        }]
    );

    // A quitting user disappears from the member set.
    let _ = engine.handle_line(":bob!u@h QUIT :Leaving");
    assert!(!engine.channels().get("#rust").unwrap().has_member("bob"));

    // A part removes only that channel's membership.
    let _ = engine.handle_line(":carol!u@h PART #rust");
    assert!(!engine.channels().get("#rust").unwrap().has_member("carol"));
}

#[test]
fn rejoin_reuses_channel_state() {
    let (mut engine, _) = start("wren");
    let _ = engine.handle_line(":server 001 wren :Welcome");

    let _ = engine.handle_line(":alice!u@h PRIVMSG #chan :before");
    let _ = engine.request(Request::Join("#CHAN".into())).unwrap();

    assert_eq!(engine.channels().len(), 1);
    // Transcript from before the join is still there.
    assert_eq!(engine.channels().get("#chan").unwrap().transcript().len(), 1);
}

#[test]
fn disconnect_stops_dispatch_until_reconnected() {
    let (mut engine, _) = start("wren");
    let _ = engine.handle_line(":server 001 wren :Welcome");

    let actions = engine.on_disconnected();
    assert_eq!(emitted(&actions), vec![Event::Disconnected]);

    // Lines after the disconnect are ignored.
    assert!(engine.handle_line("PING :x").is_empty());

    // Reconnect replays the saved endpoint.
    let host = engine.session().host().to_owned();
    let port = engine.session().port();
    let nickname = engine.session().current_nickname().to_owned();
    assert_eq!(host, "irc.example.net");
    assert_eq!(port, 6667);
    engine.on_connecting(&host, port, &nickname);
    let actions = engine.on_connected();
    assert_eq!(sent_lines(&actions), vec!["USER na 0 0 na", "NICK wren"]);
}

#[test]
fn server_error_verb_is_surfaced() {
    let (mut engine, _) = start("wren");
    let actions = engine.handle_line("ERROR :Closing Link: too many connections");
    assert_eq!(
        emitted(&actions),
        vec![Event::Error {
            reason: "Closing Link: too many connections".into()
        }]
    );
}
