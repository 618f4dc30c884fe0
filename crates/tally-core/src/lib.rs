//! Core engine for the friend activity tracker: the category catalog,
//! snapshot and friend entities, tolerance-based snapshot resolution, gain
//! computation, merge-candidate validation, and the per-context friend
//! registry.
//!
//! This crate performs no I/O. The remote statistics service and durable
//! storage appear only as the [`source::SnapshotSource`] and
//! [`store::TrackerStore`] boundary traits.

pub mod catalog;
pub mod config;
pub mod error;
pub mod friend;
pub mod gains;
pub mod merge;
pub mod registry;
pub mod snapshot;
pub mod sort;
pub mod source;
pub mod store;
pub mod value;

pub use error::{Error, Result};
