//! Data models shared across the client.
//!
//! - [`primitives`] - the [`Environment`] selector and its configuration keys

pub mod primitives;

pub use primitives::*;
