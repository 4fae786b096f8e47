//! Connection - Handles an individual client connection.
//!
//! Each Connection runs in its own Tokio task. A single `tokio::select!`
//! loop multiplexes the two directions of the socket:
//!
//! ```text
//!   socket ──▶ LineCodec ──▶ parse_line ──▶ Dispatcher::submit
//!                                                  │
//!   socket ◀── LineCodec ◀── outbound queue ◀──────┘ (SessionHandle)
//! ```
//!
//! The connection never touches chat state. When the socket fails or the
//! peer hangs up it submits a quit on the session's behalf and keeps
//! draining the outbound queue until the dispatcher closes it, so room
//! membership is always cleaned up before the task ends.

mod error_handling;

use error_handling::{ReadErrorAction, classify_read_error};

use crate::config::LimitsConfig;
use crate::state::{Command, Dispatcher, Outbound, SessionHandle, SessionId};
use futures_util::{SinkExt, StreamExt};
use relay_proto::{CommandKind, LineCodec, parse_line};
use std::net::SocketAddr;
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_util::codec::Framed;
use tracing::{debug, info, instrument, warn};

/// A client connection handler.
pub struct Connection {
    id: SessionId,
    addr: SocketAddr,
    stream: TcpStream,
    dispatcher: Dispatcher,
    limits: LimitsConfig,
}

impl Connection {
    pub fn new(
        id: SessionId,
        stream: TcpStream,
        addr: SocketAddr,
        dispatcher: Dispatcher,
        limits: LimitsConfig,
    ) -> Self {
        Self {
            id,
            addr,
            stream,
            dispatcher,
            limits,
        }
    }

    /// Run the connection until the dispatcher closes it.
    #[instrument(skip(self), fields(session = %self.id, addr = %self.addr), name = "connection")]
    pub async fn run(self) -> anyhow::Result<()> {
        let Self {
            id,
            addr,
            stream,
            dispatcher,
            limits,
        } = self;

        info!("New client has connected");

        let (outbound_tx, mut outbound_rx) = mpsc::channel(limits.outbound_queue);
        dispatcher
            .attach(SessionHandle::new(id, addr, outbound_tx))
            .await?;

        let framed = Framed::new(stream, LineCodec::with_max_len(limits.max_line_length));
        let (mut sink, mut lines) = framed.split();

        // Once set, reading stops and only the outbound side runs.
        let mut quit_sent = false;

        loop {
            tokio::select! {
                next = lines.next(), if !quit_sent => {
                    match next {
                        Some(Ok(line)) => {
                            debug!(raw = %line, "Received line");
                            let Some(parsed) = parse_line(&line) else {
                                debug!("Ignoring blank or unrecognized line");
                                continue;
                            };
                            let is_quit = parsed.kind == CommandKind::Quit;
                            dispatcher.submit(Command::from_parsed(parsed, id)).await?;
                            quit_sent = is_quit;
                        }
                        Some(Err(e)) => {
                            match classify_read_error(&e) {
                                ReadErrorAction::RejectInput { error_msg } => {
                                    warn!(error = %e, "Rejecting client input");
                                    if let Err(write_err) = sink.send(format!("err: {error_msg}")).await {
                                        debug!(error = %write_err, "Failed to report input error");
                                    }
                                }
                                ReadErrorAction::IoError => {
                                    debug!(error = %e, "Read failed");
                                }
                            }
                            dispatcher.submit(Command::quit(id)).await?;
                            quit_sent = true;
                        }
                        None => {
                            debug!("Peer closed the connection");
                            dispatcher.submit(Command::quit(id)).await?;
                            quit_sent = true;
                        }
                    }
                }
                outbound = outbound_rx.recv() => {
                    match outbound {
                        Some(Outbound::Line(text)) => {
                            if let Err(e) = sink.send(text).await {
                                debug!(error = %e, "Write failed");
                                if !quit_sent {
                                    dispatcher.submit(Command::quit(id)).await?;
                                    quit_sent = true;
                                }
                            }
                        }
                        // Close marker, or every handle dropped after detach.
                        Some(Outbound::Close) | None => break,
                    }
                }
            }
        }

        if let Err(e) = sink.close().await {
            debug!(error = %e, "Error while closing connection");
        }
        Ok(())
    }
}
