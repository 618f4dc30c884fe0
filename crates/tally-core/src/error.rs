//! Error types for `tally-core`.

use thiserror::Error;

use crate::friend::FriendId;

#[derive(Debug, Error)]
pub enum Error {
  /// Merging into an id the registry does not track is a caller contract
  /// violation, surfaced rather than silently ignored.
  #[error("unknown merge target: {0}")]
  UnknownMergeTarget(FriendId),

  /// A friend must carry at least one snapshot to be queryable.
  #[error("friend {0:?} has no snapshot history")]
  EmptyHistory(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
