//! Gateway - TCP listener that accepts incoming connections.
//!
//! The Gateway binds the listening socket and spawns a Connection task for
//! each incoming client.

use crate::config::LimitsConfig;
use crate::network::Connection;
use crate::state::{Dispatcher, SessionIdGenerator};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tracing::{error, info, instrument};

/// The Gateway accepts incoming TCP connections and spawns handlers.
pub struct Gateway {
    listener: TcpListener,
    dispatcher: Dispatcher,
    limits: LimitsConfig,
    session_ids: SessionIdGenerator,
}

impl Gateway {
    /// Bind the gateway to the specified address.
    ///
    /// A bind failure is returned to the caller; the relay cannot run
    /// without its listener.
    pub async fn bind(
        addr: SocketAddr,
        dispatcher: Dispatcher,
        limits: LimitsConfig,
    ) -> anyhow::Result<Self> {
        let listener = TcpListener::bind(addr).await?;
        info!(address = %listener.local_addr()?, "Listener bound");

        Ok(Self {
            listener,
            dispatcher,
            limits,
            session_ids: SessionIdGenerator::new(),
        })
    }

    /// The address actually bound (resolves port 0).
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Run the gateway, accepting connections forever.
    #[instrument(skip(self), name = "gateway")]
    pub async fn run(self) -> anyhow::Result<()> {
        loop {
            match self.listener.accept().await {
                Ok((stream, addr)) => {
                    let id = self.session_ids.next();
                    info!(session = %id, %addr, "Connection accepted");

                    if let Err(e) = stream.set_nodelay(true) {
                        error!(session = %id, %addr, error = %e, "Failed to set TCP_NODELAY");
                    }

                    let connection = Connection::new(
                        id,
                        stream,
                        addr,
                        self.dispatcher.clone(),
                        self.limits.clone(),
                    );
                    tokio::spawn(async move {
                        if let Err(e) = connection.run().await {
                            error!(session = %id, %addr, error = %e, "Connection error");
                        }
                        info!(session = %id, %addr, "Connection closed");
                    });
                }
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                }
            }
        }
    }
}
