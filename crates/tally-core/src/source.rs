//! The inbound snapshot-source boundary.
//!
//! Implementations talk to the remote statistics service. The engine never
//! retries or rate-limits lookups; calling discipline belongs to the
//! caller.

use std::future::Future;

use crate::snapshot::Snapshot;

/// Produces a fresh snapshot for a display name. Names should be sanitized
/// (see [`crate::friend::sanitize`]) before being used as lookup keys.
pub trait SnapshotSource: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn lookup<'a>(
    &'a self,
    name: &'a str,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + 'a;
}
