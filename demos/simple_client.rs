//! Simple IRC client example
//!
//! Connects to a server, waits for login, joins a channel, sends a
//! greeting, and prints every event until the connection closes.

use anyhow::Result;
use ircline::{Client, EngineConfig, Event};

const CHANNEL: &str = "#ircline-demo";

#[tokio::main]
async fn main() -> Result<()> {
    let (client, mut events) = Client::spawn(EngineConfig::new("ircline_demo"));

    client
        .connect("irc.libera.chat", 6667, "ircline_demo")
        .await?;

    while let Some(event) = events.recv().await {
        println!("← {:?}", event);

        match event {
            Event::LoggedIn { .. } => {
                client.join(CHANNEL).await?;
                client
                    .send_message(CHANNEL, "Hello from the ircline example!")
                    .await?;
            }
            Event::Message {
                channel,
                sender,
                text,
            } => {
                // Respond to greetings.
                if text.contains("hello") {
                    client
                        .send_message(&channel, format!("Hello there, {}!", sender))
                        .await?;
                }
            }
            Event::Error { reason } => {
                eprintln!("server error: {}", reason);
            }
            Event::Disconnected => break,
            _ => {}
        }
    }

    Ok(())
}
