//! Per-client canvas engine for the shared drawing relay.
//!
//! Each client holds its own raster and replays the operation stream it
//! receives; there is no authoritative server copy. This crate owns every
//! piece of that client-side state: the raster, the local drawing session,
//! the stroke/erase/clear operations and late-join reconciliation. It does
//! no I/O. Hosts (a browser shell, `draw-cli`, tests) feed pointer events and
//! inbound [`frames::Message`]s to an [`engine::Engine`] and ship whatever
//! messages it returns.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::Engine`] and dispatch |
//! | [`raster`] | Pixel surface and drawing primitives |
//! | [`session`] | Pointer-down gate and last sample |
//! | [`stroke`] | Pen segments |
//! | [`erase`] | Eraser discs |
//! | [`sync`] | Late-join snapshot exchange |
//! | [`snapshot`] | PNG data URL codec |
//! | [`input`] | Tools and pointer events |
//! | [`consts`] | Surface size, pen and eraser dimensions |

pub mod consts;
pub mod engine;
pub mod erase;
pub mod input;
pub mod raster;
pub mod session;
pub mod snapshot;
pub mod stroke;
pub mod sync;
