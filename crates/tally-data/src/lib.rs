//! Persistence for the friend tracker: the JSON wire format for a
//! registry's friend set (including transparent upgrade of the legacy
//! field-per-category format) and a file-backed [`TrackerStore`]
//! implementation.
//!
//! [`TrackerStore`]: tally_core::store::TrackerStore

mod codec;
mod file;

pub mod error;

pub use codec::{decode_registry, decode_snapshot, encode_registry, encode_snapshot};
pub use error::{Error, Result};
pub use file::JsonFileStore;
