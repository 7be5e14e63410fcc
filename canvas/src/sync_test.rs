use frames::Point;
use tiny_skia::Color;

use super::*;

#[test]
fn default_state_is_idle() {
    let state = SyncState::default();
    assert_eq!(state, SyncState::Idle);
    assert_eq!(state.snapshots_applied(), 0);
}

#[test]
fn joined_then_snapshots_are_counted() {
    let mut state = SyncState::default();
    state.joined();
    assert_eq!(state, SyncState::AwaitingPeers { snapshots_applied: 0 });
    state.record_snapshot();
    state.record_snapshot();
    assert_eq!(state.snapshots_applied(), 2);
}

#[test]
fn stray_snapshot_while_idle_is_not_counted() {
    let mut state = SyncState::Idle;
    state.record_snapshot();
    assert_eq!(state, SyncState::Idle);
}

#[test]
fn rejoining_resets_counter() {
    let mut state = SyncState::default();
    state.joined();
    state.record_snapshot();
    state.joined();
    assert_eq!(state.snapshots_applied(), 0);
}

#[test]
fn respond_then_apply_reproduces_peer_raster() {
    let mut peer = Raster::new(60, 40).unwrap();
    peer.stroke_line(Point::new(5.0, 5.0), Point::new(55.0, 35.0), 5.0, Color::BLACK);

    let payload = respond(&peer).unwrap();
    let mut joiner = Raster::new(60, 40).unwrap();
    apply(&mut joiner, &payload).unwrap();
    assert_eq!(joiner, peer);
}

#[test]
fn apply_overlays_rather_than_replaces() {
    let mut peer = Raster::new(60, 40).unwrap();
    peer.fill_disc(Point::new(50.0, 20.0), 5.0, Color::BLACK);
    let payload = respond(&peer).unwrap();

    let mut joiner = Raster::new(60, 40).unwrap();
    joiner.fill_disc(Point::new(10.0, 20.0), 5.0, Color::BLACK);
    apply(&mut joiner, &payload).unwrap();

    assert_eq!(joiner.pixel(10, 20).unwrap().a, 255);
    assert_eq!(joiner.pixel(50, 20).unwrap().a, 255);
}

#[test]
fn apply_failure_leaves_raster_untouched() {
    let mut joiner = Raster::new(10, 10).unwrap();
    joiner.fill_disc(Point::new(5.0, 5.0), 3.0, Color::BLACK);
    let before = joiner.clone();

    let bad = SyncPayload { snapshot: "data:image/png;base64,@@@".into() };
    assert!(apply(&mut joiner, &bad).is_err());
    assert_eq!(joiner, before);
}
