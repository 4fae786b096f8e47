//! Test line client.
//!
//! Connects over TCP, sends raw lines and asserts on received lines.

use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, BufWriter};
use tokio::net::TcpStream;
use tokio::net::tcp::{OwnedReadHalf, OwnedWriteHalf};
use tokio::time::timeout;

/// A test chat client.
pub struct TestClient {
    reader: BufReader<OwnedReadHalf>,
    writer: BufWriter<OwnedWriteHalf>,
}

#[allow(dead_code)]
impl TestClient {
    /// Connect to a test server.
    pub async fn connect(address: &str) -> anyhow::Result<Self> {
        let stream = TcpStream::connect(address).await?;

        let (read_half, write_half) = stream.into_split();
        Ok(Self {
            reader: BufReader::new(read_half),
            writer: BufWriter::new(write_half),
        })
    }

    /// Send one line; a newline is appended when missing.
    pub async fn send_raw(&mut self, line: &str) -> anyhow::Result<()> {
        self.writer.write_all(line.as_bytes()).await?;
        if !line.ends_with('\n') {
            self.writer.write_all(b"\n").await?;
        }
        self.writer.flush().await?;
        Ok(())
    }

    /// Receive a single line from the server.
    pub async fn recv(&mut self) -> anyhow::Result<String> {
        self.recv_timeout(Duration::from_secs(5)).await
    }

    /// Receive a line with a timeout. EOF is an error.
    pub async fn recv_timeout(&mut self, dur: Duration) -> anyhow::Result<String> {
        let mut line = String::new();
        let read = timeout(dur, self.reader.read_line(&mut line)).await??;
        if read == 0 {
            anyhow::bail!("connection closed by server");
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_string())
    }

    /// Receive lines until the given predicate returns true.
    pub async fn recv_until<F>(&mut self, mut predicate: F) -> anyhow::Result<Vec<String>>
    where
        F: FnMut(&str) -> bool,
    {
        let mut lines = Vec::new();
        loop {
            let line = self.recv().await?;
            let done = predicate(&line);
            lines.push(line);
            if done {
                break;
            }
        }
        Ok(lines)
    }

    /// Collect every line until the server closes the connection.
    pub async fn recv_until_closed(&mut self) -> anyhow::Result<Vec<String>> {
        let mut lines = Vec::new();
        loop {
            let mut line = String::new();
            let read = timeout(Duration::from_secs(5), self.reader.read_line(&mut line)).await?;
            match read {
                Ok(0) => return Ok(lines),
                Ok(_) => lines.push(line.trim_end_matches(['\r', '\n']).to_string()),
                // A reset after the last line still counts as closed.
                Err(_) => return Ok(lines),
            }
        }
    }

    /// Assert that nothing arrives for `dur`.
    pub async fn expect_silence(&mut self, dur: Duration) -> anyhow::Result<()> {
        match self.recv_timeout(dur).await {
            Ok(line) => anyhow::bail!("expected silence, got {line:?}"),
            Err(e) if e.is::<tokio::time::error::Elapsed>() => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// `/nick NAME`, waiting for the confirmation.
    pub async fn nick(&mut self, nick: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("/nick {nick}")).await?;
        let expected = format!("all right, I will call you {nick}");
        self.recv_until(|line| line == expected).await?;
        Ok(())
    }

    /// `/join ROOM`, waiting for the welcome.
    pub async fn join(&mut self, room: &str) -> anyhow::Result<()> {
        self.send_raw(&format!("/join {room}")).await?;
        let expected = format!("welcome to {room}");
        self.recv_until(|line| line == expected).await?;
        Ok(())
    }

    /// Send `/quit`.
    pub async fn quit(&mut self) -> anyhow::Result<()> {
        self.send_raw("/quit").await
    }
}
