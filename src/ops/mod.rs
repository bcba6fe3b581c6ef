//! High-level operations.
//!
//! This module contains the implementation of berth commands.

pub mod sync;

pub use sync::{sync, SyncOptions, SyncReport};
