//! WebSocket handler: verbatim frame relay.
//!
//! DESIGN
//! ======
//! On upgrade, registers a relay session and enters a `select!` loop:
//! - Text or binary frames from the client → broadcast to every other session
//! - Frames queued for this session by peers → forward to the client
//!
//! Frames are never parsed. A malformed payload reaches peers unchanged
//! and each client decides what to do with it.
//!
//! LIFECYCLE
//! =========
//! 1. Upgrade → `Relay::join`
//! 2. Loop until the client closes, the socket errors, a send fails or the
//!    relay evicts the session (its outbound queue overflowed)
//! 3. `Relay::part` (silent; peers are not told)
//!
//! An evicted client sees its socket close. It reconnects and sends
//! `joined`, and peer snapshots repair whatever it missed.

use axum::extract::State;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::response::Response;
use tracing::{debug, info, warn};

use crate::state::AppState;

#[cfg(test)]
#[path = "ws_test.rs"]
mod ws_test;

pub async fn handle_ws(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    ws.on_upgrade(move |socket| run_ws(socket, state))
}

async fn run_ws(mut socket: WebSocket, state: AppState) {
    let relay = state.relay;
    let (session_id, mut outbound) = relay.join().await;
    let peers = relay.session_count().await;
    info!(%session_id, peers, "ws: client connected");

    loop {
        tokio::select! {
            msg = socket.recv() => {
                let Some(msg) = msg else { break };
                let msg = match msg {
                    Ok(msg) => msg,
                    Err(e) => {
                        warn!(%session_id, error = %e, "ws: receive failed");
                        break;
                    }
                };
                match msg {
                    Message::Text(_) | Message::Binary(_) => {
                        let delivered = relay.broadcast(session_id, &msg).await;
                        debug!(%session_id, delivered, "ws: relayed frame");
                    }
                    Message::Close(_) => break,
                    Message::Ping(_) | Message::Pong(_) => {}
                }
            }
            msg = outbound.recv() => {
                let Some(msg) = msg else {
                    warn!(%session_id, "ws: evicted by relay; closing");
                    if let Err(e) = socket.send(Message::Close(None)).await {
                        debug!(%session_id, error = %e, "ws: close frame not sent");
                    }
                    break;
                };
                if let Err(e) = socket.send(msg).await {
                    warn!(%session_id, error = %e, "ws: send failed");
                    break;
                }
            }
        }
    }

    relay.part(session_id).await;
    info!(%session_id, "ws: client disconnected");
}
