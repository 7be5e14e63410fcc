//! Late-join reconciliation.
//!
//! The joiner broadcasts `joined`; every connected peer answers with a
//! snapshot of its raster; the joiner overlays each snapshot in arrival
//! order. There is no leader election and no completion signal. Overlay
//! (never replace) makes redundant answers harmless when peers agree.
//! Peers that already diverged are overlaid as-is; nothing detects or
//! repairs that.

#[cfg(test)]
#[path = "sync_test.rs"]
mod sync_test;

use frames::SyncPayload;

use crate::raster::{Raster, RasterError};
use crate::snapshot;

/// Joiner-side progress. Peers answering a join never leave `Idle`: the
/// response is produced synchronously.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Idle,
    AwaitingPeers {
        /// Snapshots overlaid since `joined` was sent.
        snapshots_applied: usize,
    },
}

impl SyncState {
    /// Enter `AwaitingPeers`, resetting the counter.
    pub fn joined(&mut self) {
        *self = Self::AwaitingPeers { snapshots_applied: 0 };
    }

    /// Count one overlaid snapshot. Stray snapshots received while idle are
    /// applied but not counted.
    pub fn record_snapshot(&mut self) {
        if let Self::AwaitingPeers { snapshots_applied } = self {
            *snapshots_applied += 1;
        }
    }

    #[must_use]
    pub fn snapshots_applied(&self) -> usize {
        match self {
            Self::Idle => 0,
            Self::AwaitingPeers { snapshots_applied } => *snapshots_applied,
        }
    }
}

/// Build the `sync` answer to a peer's `joined`.
///
/// # Errors
///
/// Returns [`RasterError::Encode`] if the raster cannot be encoded.
pub fn respond(raster: &Raster) -> Result<SyncPayload, RasterError> {
    Ok(SyncPayload { snapshot: snapshot::encode(raster)? })
}

/// Overlay a received snapshot onto `raster` at the origin.
///
/// # Errors
///
/// Returns an error if the snapshot text or image cannot be decoded; the
/// raster is left untouched in that case.
pub fn apply(raster: &mut Raster, payload: &SyncPayload) -> Result<(), RasterError> {
    let incoming = snapshot::decode(&payload.snapshot)?;
    raster.overlay(&incoming);
    Ok(())
}
