//! Test server management.
//!
//! Runs the dispatcher and gateway in-process on an ephemeral port.

use relayd::config::Config;
use relayd::network::Gateway;
use relayd::state::{ChatSnapshot, DispatchConfig, Dispatcher};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::sleep;

/// A test server instance.
pub struct TestServer {
    addr: SocketAddr,
    dispatcher: Dispatcher,
    gateway_task: JoinHandle<anyhow::Result<()>>,
}

#[allow(dead_code)]
impl TestServer {
    /// Spawn a server with default configuration.
    pub async fn spawn() -> anyhow::Result<Self> {
        Self::spawn_with(Config::default()).await
    }

    /// Spawn a server with a custom configuration; the listen address is
    /// always replaced by an ephemeral loopback port.
    pub async fn spawn_with(mut config: Config) -> anyhow::Result<Self> {
        config.listen.address = "127.0.0.1:0".parse()?;

        let (dispatcher, _task) = Dispatcher::spawn(DispatchConfig::from(&config));
        let gateway = Gateway::bind(
            config.listen.address,
            dispatcher.clone(),
            config.limits.clone(),
        )
        .await?;
        let addr = gateway.local_addr()?;
        let gateway_task = tokio::spawn(gateway.run());

        Ok(Self {
            addr,
            dispatcher,
            gateway_task,
        })
    }

    /// Get the server address.
    pub fn address(&self) -> String {
        self.addr.to_string()
    }

    /// Create a new test client connected to this server.
    pub async fn connect(&self) -> anyhow::Result<super::client::TestClient> {
        super::client::TestClient::connect(&self.address()).await
    }

    /// Current dispatcher state.
    pub async fn snapshot(&self) -> anyhow::Result<ChatSnapshot> {
        Ok(self.dispatcher.snapshot().await?)
    }

    /// Poll the dispatcher until `predicate` holds (up to 5 seconds).
    pub async fn wait_for<F>(&self, mut predicate: F) -> anyhow::Result<ChatSnapshot>
    where
        F: FnMut(&ChatSnapshot) -> bool,
    {
        for _ in 0..100 {
            let snapshot = self.snapshot().await?;
            if predicate(&snapshot) {
                return Ok(snapshot);
            }
            sleep(Duration::from_millis(50)).await;
        }
        anyhow::bail!("dispatcher state never matched")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.gateway_task.abort();
    }
}
