//! Session registry and fan-out.
//!
//! DESIGN
//! ======
//! Each connected client owns a bounded `mpsc` queue drained by its socket
//! task. `broadcast` clones the inbound websocket message to every other
//! session with `try_send`, so a slow client never blocks delivery to the
//! rest. A session whose queue is full (or already closed) is evicted
//! instead of silently skipped: dropping its sender ends the socket task,
//! the client observes a disconnect, and a fresh join resynchronizes it.
//! Every session that stays registered has received every frame in order.
//! The relay never looks inside a message.

#[cfg(test)]
#[path = "relay_test.rs"]
mod relay_test;

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::ws::Message;
use tokio::sync::mpsc::error::TrySendError;
use tokio::sync::{RwLock, mpsc};
use tracing::{debug, warn};
use uuid::Uuid;

/// Identifies one websocket connection for its lifetime.
pub type SessionId = Uuid;

#[derive(Clone)]
pub struct Relay {
    sessions: Arc<RwLock<HashMap<SessionId, mpsc::Sender<Message>>>>,
    capacity: usize,
}

impl Relay {
    /// `capacity` is clamped to at least 1.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self { sessions: Arc::new(RwLock::new(HashMap::new())), capacity: capacity.max(1) }
    }

    /// Register a new session and return its outbound queue.
    pub async fn join(&self) -> (SessionId, mpsc::Receiver<Message>) {
        let session_id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(self.capacity);
        self.sessions.write().await.insert(session_id, tx);
        (session_id, rx)
    }

    /// Forget a session. Peers are not notified.
    pub async fn part(&self, session_id: SessionId) {
        self.sessions.write().await.remove(&session_id);
    }

    /// Deliver `message` to every session except `from`.
    ///
    /// Sessions that cannot take the message are evicted. Returns how many
    /// sessions accepted it.
    pub async fn broadcast(&self, from: SessionId, message: &Message) -> usize {
        let mut delivered = 0;
        let mut evicted = Vec::new();
        {
            let sessions = self.sessions.read().await;
            for (session_id, tx) in sessions.iter() {
                if *session_id == from {
                    continue;
                }
                match tx.try_send(message.clone()) {
                    Ok(()) => delivered += 1,
                    Err(TrySendError::Full(_)) => {
                        warn!(%from, to = %session_id, "relay: outbound queue full; evicting session");
                        evicted.push(*session_id);
                    }
                    Err(TrySendError::Closed(_)) => {
                        debug!(%from, to = %session_id, "relay: outbound queue closed; removing session");
                        evicted.push(*session_id);
                    }
                }
            }
        }

        if !evicted.is_empty() {
            let mut sessions = self.sessions.write().await;
            for session_id in &evicted {
                sessions.remove(session_id);
            }
        }
        delivered
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}
