//! Error types for `tally-data`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("I/O error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),

  /// Save data whose overall shape is wrong (not an object, unparseable
  /// id or timestamp). Missing categories are never an error; they
  /// reconstruct as unknown.
  #[error("malformed save data: {0}")]
  Format(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
