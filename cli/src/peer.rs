//! Websocket peer: one canvas engine bound to one relay connection.
//!
//! LIFECYCLE
//! =========
//! 1. Connect → send `joined`
//! 2. Serve: every inbound frame is decoded and applied; a `joined` from a
//!    peer is answered with a snapshot
//! 3. Local steps paint first and then transmit their message
//!
//! Undecodable or inapplicable inbound frames are logged and dropped. Only
//! transport failures end the loop.

#[cfg(test)]
#[path = "peer_test.rs"]
mod peer_test;

use std::path::Path;
use std::time::Duration;

use canvas::engine::Engine;
use frames::{CodecError, Message};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::time::Instant;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, info, warn};

use crate::CliError;
use crate::script::Step;

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

pub struct Peer {
    engine: Engine,
    stream: WsStream,
}

impl Peer {
    /// Connect to the relay at `url` (already a `ws://` or `wss://` URL).
    pub async fn connect(url: &str, engine: Engine) -> Result<Self, CliError> {
        let (stream, _) = connect_async(url)
            .await
            .map_err(|error| CliError::WsConnect(Box::new(error)))?;
        info!(%url, "connected to relay");
        Ok(Self { engine, stream })
    }

    /// Announce this peer so existing peers send their snapshots.
    pub async fn join(&mut self) -> Result<(), CliError> {
        if let Some(message) = self.engine.join() {
            self.send(&message).await?;
        }
        Ok(())
    }

    /// Apply one script step; pauses keep serving inbound frames.
    pub async fn run_step(&mut self, step: &Step) -> Result<(), CliError> {
        if let Some(pause) = step.pause() {
            return self.serve_for(pause).await;
        }
        if let Some(message) = step.apply(&mut self.engine)? {
            self.send(&message).await?;
        }
        self.serve_for(Duration::ZERO).await
    }

    /// Emit a local clear.
    pub async fn clear(&mut self) -> Result<(), CliError> {
        if let Some(message) = self.engine.request_clear() {
            self.send(&message).await?;
        }
        Ok(())
    }

    /// Serve inbound frames until `duration` elapses. A zero duration drains
    /// whatever is already buffered.
    pub async fn serve_for(&mut self, duration: Duration) -> Result<(), CliError> {
        let deadline = Instant::now() + duration;
        loop {
            match tokio::time::timeout_at(deadline, self.stream.next()).await {
                Err(_) => return Ok(()),
                Ok(next) => self.handle_next(next).await?,
            }
        }
    }

    /// Serve inbound frames until Ctrl-C or the optional duration elapses.
    pub async fn serve_until_interrupted(&mut self, duration: Option<Duration>) -> Result<(), CliError> {
        let deadline = async {
            match duration {
                Some(duration) => tokio::time::sleep(duration).await,
                None => std::future::pending().await,
            }
        };
        tokio::pin!(deadline);
        let interrupted = tokio::signal::ctrl_c();
        tokio::pin!(interrupted);

        loop {
            tokio::select! {
                () = &mut deadline => {
                    info!("watch duration elapsed");
                    return Ok(());
                }
                result = &mut interrupted => {
                    if let Err(error) = result {
                        warn!(%error, "failed to listen for ctrl-c");
                    }
                    info!("interrupted");
                    return Ok(());
                }
                next = self.stream.next() => self.handle_next(next).await?,
            }
        }
    }

    /// Write the current raster as a PNG file.
    pub fn write_png(&self, path: &Path) -> Result<(), CliError> {
        let Some(raster) = self.engine.raster() else {
            return Ok(());
        };
        std::fs::write(path, raster.encode_png()?)?;
        info!(path = %path.display(), "wrote snapshot");
        Ok(())
    }

    pub async fn close(mut self) -> Result<(), CliError> {
        self.stream
            .close(None)
            .await
            .map_err(|error| CliError::Ws(Box::new(error)))
    }

    async fn send(&mut self, message: &Message) -> Result<(), CliError> {
        debug!(event = %message.event(), "send");
        self.stream
            .send(WsMessage::binary(message.to_binary()))
            .await
            .map_err(|error| CliError::Ws(Box::new(error)))
    }

    async fn handle_next(
        &mut self,
        next: Option<Result<WsMessage, tokio_tungstenite::tungstenite::Error>>,
    ) -> Result<(), CliError> {
        let Some(frame) = next else {
            return Err(CliError::WsClosed);
        };
        let frame = frame.map_err(|error| CliError::Ws(Box::new(error)))?;
        if matches!(frame, WsMessage::Close(_)) {
            return Err(CliError::WsClosed);
        }

        let message = match decode_inbound(&frame) {
            Ok(Some(message)) => message,
            Ok(None) => return Ok(()),
            Err(error) => {
                warn!(%error, "dropping undecodable frame");
                return Ok(());
            }
        };

        debug!(event = %message.event(), "recv");
        match self.engine.handle_inbound(&message) {
            Ok(Some(reply)) => self.send(&reply).await?,
            Ok(None) => {}
            Err(error) => warn!(%error, "dropping inapplicable message"),
        }
        Ok(())
    }
}

/// Decode a websocket frame. Control frames carry no message.
pub fn decode_inbound(frame: &WsMessage) -> Result<Option<Message>, CodecError> {
    match frame {
        WsMessage::Text(text) => Message::from_text(text.as_str()).map(Some),
        WsMessage::Binary(bytes) => Message::from_binary(bytes).map(Some),
        _ => Ok(None),
    }
}

/// Turn an `http(s)://host[:port]` base URL into the relay's websocket URL.
pub fn ws_url(base_url: &str) -> Result<String, CliError> {
    let base = base_url.trim_end_matches('/');
    if let Some(rest) = base.strip_prefix("http://") {
        return Ok(format!("ws://{rest}/ws"));
    }
    if let Some(rest) = base.strip_prefix("https://") {
        return Ok(format!("wss://{rest}/ws"));
    }
    if base.starts_with("ws://") || base.starts_with("wss://") {
        return Ok(if base.ends_with("/ws") { base.to_owned() } else { format!("{base}/ws") });
    }

    Err(CliError::InvalidBaseUrl(base_url.to_owned()))
}
