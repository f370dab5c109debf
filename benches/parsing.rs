//! Benchmarks for message parsing and command encoding.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ircline::{encode_command, ServerMessage};

/// Simple PING message
const SIMPLE_MESSAGE: &str = "PING :irc.example.com";

/// Message with prefix
const PREFIX_MESSAGE: &str = ":nick!user@host PRIVMSG #channel :Hello, world!";

/// Numeric response
const NUMERIC_RESPONSE: &str = ":irc.server.net 001 nickname :Welcome to the IRC Network nickname!user@host";

/// Multi-line names reply payload
const NAMES_REPLY: &str = ":irc.server.net 353 nickname = #channel :@op +voiced alice bob carol dave";

fn benchmark_parsing(c: &mut Criterion) {
    let mut group = c.benchmark_group("Message Parsing");

    group.bench_function("simple_ping", |b| {
        b.iter(|| {
            let msg: ServerMessage = black_box(SIMPLE_MESSAGE).parse().unwrap();
            black_box(msg)
        })
    });

    group.bench_function("with_prefix", |b| {
        b.iter(|| {
            let msg: ServerMessage = black_box(PREFIX_MESSAGE).parse().unwrap();
            black_box(msg)
        })
    });

    group.bench_function("numeric_response", |b| {
        b.iter(|| {
            let msg: ServerMessage = black_box(NUMERIC_RESPONSE).parse().unwrap();
            black_box(msg)
        })
    });

    group.bench_function("names_reply", |b| {
        b.iter(|| {
            let msg: ServerMessage = black_box(NAMES_REPLY).parse().unwrap();
            black_box(msg)
        })
    });

    group.finish();
}

fn benchmark_encoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("Command Encoding");

    group.bench_function("privmsg", |b| {
        b.iter(|| {
            let line = encode_command(
                black_box("PRIVMSG"),
                black_box(&["#channel", "Hello, world!"]),
            );
            black_box(line)
        })
    });

    group.bench_function("nick", |b| {
        b.iter(|| {
            let line = encode_command(black_box("NICK"), black_box(&["nickname"]));
            black_box(line)
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_parsing, benchmark_encoding);
criterion_main!(benches);
