#![deny(unsafe_code)]
//! Headless driving of the huewheel picker: scripted replay and snapshots.
//!
//! This crate sits between `huewheel-core` (shapes, controller, surface) and
//! the CLI. It replays JSON interaction scripts against an in-memory picker and
//! exports the resulting surface as RGBA or PNG.

pub mod pixel;
pub mod script;

#[cfg(feature = "png")]
pub mod snapshot;

pub use script::{replay, Replay, Script, Step};
