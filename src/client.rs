//! Async client task owning one server connection.
//!
//! One spawned task owns the [`Engine`] and the framed transport. All
//! parsing and dispatch is serialized through a single `select!` loop
//! over the read stream and a control channel, so messages are processed
//! strictly in arrival order and outbound writes never interleave
//! partial lines. Events flow out on an unbounded channel; the
//! presentation layer consumes them at its own pace.
//!
//! Reconnect is caller-driven: the task never redials on its own, it
//! only surfaces [`Event::Disconnected`] and waits for a request.

use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio_util::codec::Framed;
use tracing::{debug, warn};

use crate::codec::LineCodec;
use crate::engine::{Action, Engine, EngineConfig, Request};
use crate::error::{EngineError, ProtocolError};
use crate::event::Event;
use crate::message::ServerMessage;

type Transport = Framed<TcpStream, LineCodec>;
type Reply = oneshot::Sender<Result<(), EngineError>>;

/// The stream of events delivered to the presentation layer.
pub type EventStream = mpsc::UnboundedReceiver<Event>;

enum Control {
    Connect {
        host: String,
        port: u16,
        nickname: String,
        reply: Reply,
    },
    Reconnect {
        reply: Reply,
    },
    Disconnect {
        reply: Reply,
    },
    Request {
        request: Request,
        reply: Reply,
    },
}

/// Cloneable handle to the connection task.
///
/// Dropping every handle shuts the task down once the connection is
/// gone.
#[derive(Clone)]
pub struct Client {
    control: mpsc::UnboundedSender<Control>,
}

impl Client {
    /// Spawn the connection task. Must be called within a Tokio runtime.
    ///
    /// The task starts disconnected; call [`Client::connect`] to dial.
    pub fn spawn(config: EngineConfig) -> (Client, EventStream) {
        let (control_tx, control_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let runner = Runner {
            engine: Engine::new(config),
            control: control_rx,
            events: event_tx,
        };
        tokio::spawn(runner.run());

        (
            Client {
                control: control_tx,
            },
            event_rx,
        )
    }

    /// Open the transport and start registration. Resolves once the
    /// registration sequence has been written; login completion arrives
    /// later as [`Event::LoggedIn`].
    pub async fn connect(
        &self,
        host: impl Into<String>,
        port: u16,
        nickname: impl Into<String>,
    ) -> Result<(), EngineError> {
        let host = host.into();
        let nickname = nickname.into();
        self.roundtrip(|reply| Control::Connect {
            host,
            port,
            nickname,
            reply,
        })
        .await
    }

    /// Drop the transport. Safe to call in any state; any in-flight
    /// partial line is discarded with the codec buffer.
    pub async fn disconnect(&self) -> Result<(), EngineError> {
        self.roundtrip(|reply| Control::Disconnect { reply }).await
    }

    /// Disconnect (if needed) and redial with the saved host, port, and
    /// nickname.
    pub async fn reconnect(&self) -> Result<(), EngineError> {
        self.roundtrip(|reply| Control::Reconnect { reply }).await
    }

    /// Ask the server for a new nickname.
    pub async fn change_nickname(&self, nickname: impl Into<String>) -> Result<(), EngineError> {
        self.request(Request::ChangeNickname(nickname.into())).await
    }

    /// Send a PRIVMSG to a channel or user.
    pub async fn send_message(
        &self,
        target: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<(), EngineError> {
        self.request(Request::SendMessage {
            target: target.into(),
            text: text.into(),
        })
        .await
    }

    /// Join a channel.
    pub async fn join(&self, channel: impl Into<String>) -> Result<(), EngineError> {
        self.request(Request::Join(channel.into())).await
    }

    /// Leave a channel.
    pub async fn leave(
        &self,
        channel: impl Into<String>,
        reason: Option<String>,
    ) -> Result<(), EngineError> {
        self.request(Request::Leave {
            channel: channel.into(),
            reason,
        })
        .await
    }

    /// Send QUIT. The server closes the transport in response, which
    /// surfaces as [`Event::Disconnected`].
    pub async fn quit(&self, reason: Option<String>) -> Result<(), EngineError> {
        self.request(Request::Quit(reason)).await
    }

    async fn request(&self, request: Request) -> Result<(), EngineError> {
        self.roundtrip(|reply| Control::Request { request, reply })
            .await
    }

    async fn roundtrip(
        &self,
        make: impl FnOnce(Reply) -> Control,
    ) -> Result<(), EngineError> {
        let (tx, rx) = oneshot::channel();
        self.control
            .send(make(tx))
            .map_err(|_| EngineError::TaskGone)?;
        rx.await.map_err(|_| EngineError::TaskGone)?
    }
}

enum Step {
    Incoming(Option<Result<ServerMessage, ProtocolError>>),
    Control(Option<Control>),
}

struct Runner {
    engine: Engine,
    control: mpsc::UnboundedReceiver<Control>,
    events: mpsc::UnboundedSender<Event>,
}

impl Runner {
    async fn run(mut self) {
        let mut transport: Option<Transport> = None;

        loop {
            let step = match transport.as_mut() {
                Some(framed) => {
                    tokio::select! {
                        incoming = framed.next() => Step::Incoming(incoming),
                        ctrl = self.control.recv() => Step::Control(ctrl),
                    }
                }
                // Disconnected: only control requests can make progress.
                None => Step::Control(self.control.recv().await),
            };

            match step {
                Step::Incoming(Some(Ok(msg))) => {
                    let actions = self.engine.feed(&msg);
                    if !self.apply(actions, transport.as_mut()).await {
                        self.drop_transport(&mut transport).await;
                    }
                }
                Step::Incoming(Some(Err(err))) => {
                    warn!(error = %err, "transport read failed");
                    self.drop_transport(&mut transport).await;
                }
                Step::Incoming(None) => {
                    self.drop_transport(&mut transport).await;
                }
                Step::Control(Some(ctrl)) => self.handle_control(ctrl, &mut transport).await,
                // Every handle dropped: shut the task down.
                Step::Control(None) => return,
            }
        }
    }

    async fn handle_control(&mut self, ctrl: Control, transport: &mut Option<Transport>) {
        match ctrl {
            Control::Connect {
                host,
                port,
                nickname,
                reply,
            } => {
                let result = if transport.is_some() {
                    Err(EngineError::AlreadyConnected)
                } else {
                    self.dial(&host, port, &nickname, transport).await
                };
                let _ = reply.send(result);
            }

            Control::Reconnect { reply } => {
                if transport.take().is_some() {
                    let actions = self.engine.on_disconnected();
                    self.apply(actions, None).await;
                }
                let host = self.engine.session().host().to_owned();
                let port = self.engine.session().port();
                let nickname = self.engine.session().current_nickname().to_owned();
                let result = if host.is_empty() {
                    // Never connected, nothing to replay.
                    Err(EngineError::NotConnected)
                } else {
                    self.dial(&host, port, &nickname, transport).await
                };
                let _ = reply.send(result);
            }

            Control::Disconnect { reply } => {
                self.drop_transport(transport).await;
                let _ = reply.send(Ok(()));
            }

            Control::Request { request, reply } => match self.engine.request(request) {
                Ok(actions) => {
                    let ok = self.apply(actions, transport.as_mut()).await;
                    let _ = reply.send(Ok(()));
                    if !ok {
                        self.drop_transport(transport).await;
                    }
                }
                Err(err) => {
                    let _ = reply.send(Err(err));
                }
            },
        }
    }

    async fn dial(
        &mut self,
        host: &str,
        port: u16,
        nickname: &str,
        transport: &mut Option<Transport>,
    ) -> Result<(), EngineError> {
        self.engine.on_connecting(host, port, nickname);

        match TcpStream::connect((host, port)).await {
            Ok(stream) => {
                if let Err(err) = enable_keepalive(&stream) {
                    warn!("failed to enable TCP keepalive: {}", err);
                }
                *transport = Some(Framed::new(stream, LineCodec));

                let actions = self.engine.on_connected();
                if !self.apply(actions, transport.as_mut()).await {
                    self.drop_transport(transport).await;
                    return Err(EngineError::ConnectionFailed(
                        "registration write failed".to_owned(),
                    ));
                }
                Ok(())
            }
            Err(err) => {
                debug!(error = %err, host, port, "connect failed");
                let actions = self.engine.on_disconnected();
                self.apply(actions, None).await;
                Err(EngineError::ConnectionFailed(err.to_string()))
            }
        }
    }

    async fn drop_transport(&mut self, transport: &mut Option<Transport>) {
        transport.take();
        let actions = self.engine.on_disconnected();
        self.apply(actions, None).await;
    }

    /// Perform the engine's actions. Returns `false` when a write failed
    /// and the transport should be considered dead.
    async fn apply(&mut self, actions: Vec<Action>, mut framed: Option<&mut Transport>) -> bool {
        let mut ok = true;
        for action in actions {
            match action {
                Action::Emit(event) => {
                    // The receiver side being gone just means nobody is
                    // listening; the connection keeps running.
                    let _ = self.events.send(event);
                }
                Action::Send(line) => match framed.as_deref_mut() {
                    Some(framed) => {
                        if let Err(err) = framed.send(line).await {
                            warn!(error = %err, "transport write failed");
                            ok = false;
                        }
                    }
                    None => ok = false,
                },
            }
        }
        ok
    }
}

fn enable_keepalive(stream: &TcpStream) -> std::io::Result<()> {
    use socket2::{SockRef, TcpKeepalive};
    use std::time::Duration;

    let sock = SockRef::from(stream);
    let keepalive = TcpKeepalive::new()
        .with_time(Duration::from_secs(120))
        .with_interval(Duration::from_secs(30));

    sock.set_tcp_keepalive(&keepalive)
}
