//! A tracked friend — a stable identity with a display-name history and a
//! time-ordered snapshot history.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  error::{Error, Result},
  snapshot::Snapshot,
};

/// Opaque identifier for a tracked friend. Assigned once at creation and
/// stable across display-name changes; names are never identity.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord,
  Serialize, Deserialize,
)]
pub struct FriendId(Uuid);

impl FriendId {
  pub fn random() -> Self { Self(Uuid::new_v4()) }

  pub fn as_uuid(&self) -> Uuid { self.0 }
}

impl From<Uuid> for FriendId {
  fn from(id: Uuid) -> Self { Self(id) }
}

impl fmt::Display for FriendId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// Replace no-break spaces with regular spaces. Display names arriving from
/// the host application may contain U+00A0; identity comparisons assume it
/// has been normalized away.
pub fn sanitize(name: &str) -> String {
  name.replace('\u{00A0}', " ")
}

/// A tracked identity: current display name, prior names in discovery order,
/// and a snapshot history keyed by capture instant.
///
/// The history is never empty — every constructor requires an initial
/// snapshot — and existing snapshots are never edited; merging only adds.
#[derive(Debug, Clone)]
pub struct Friend {
  id:             FriendId,
  name:           String,
  previous_names: Vec<String>,
  history:        BTreeMap<DateTime<Utc>, Snapshot>,
}

impl Friend {
  pub fn new(
    id: FriendId,
    name: &str,
    previous_name: Option<&str>,
    at: DateTime<Utc>,
    snapshot: Snapshot,
  ) -> Self {
    Self {
      id,
      name: sanitize(name),
      previous_names: previous_name.map(sanitize).into_iter().collect(),
      history: BTreeMap::from([(at, snapshot)]),
    }
  }

  /// Reassemble a friend from persisted parts. Fails if the stored history
  /// is empty, which the engine's invariants exclude.
  pub fn from_parts(
    id: FriendId,
    name: &str,
    previous_names: Vec<String>,
    history: BTreeMap<DateTime<Utc>, Snapshot>,
  ) -> Result<Self> {
    if history.is_empty() {
      return Err(Error::EmptyHistory(name.to_owned()));
    }
    Ok(Self { id, name: sanitize(name), previous_names, history })
  }

  pub fn id(&self) -> FriendId { self.id }

  pub fn name(&self) -> &str { &self.name }

  pub fn previous_names(&self) -> &[String] { &self.previous_names }

  /// Newline-joined prior names, oldest first, for tooltip display.
  pub fn previous_names_vertical(&self) -> String {
    self.previous_names.join("\n")
  }

  pub fn history(
    &self,
  ) -> impl Iterator<Item = (DateTime<Utc>, &Snapshot)> + '_ {
    self.history.iter().map(|(at, s)| (*at, s))
  }

  pub fn snapshot_count(&self) -> usize { self.history.len() }

  /// Record a snapshot at `at`. A snapshot already stored at exactly that
  /// instant is replaced.
  pub fn add_snapshot(&mut self, at: DateTime<Utc>, snapshot: Snapshot) {
    self.history.insert(at, snapshot);
  }

  pub fn add_snapshot_now(&mut self, snapshot: Snapshot) {
    self.add_snapshot(Utc::now(), snapshot);
  }

  pub fn latest_snapshot(&self) -> &Snapshot {
    // The history is non-empty by construction.
    self
      .history
      .values()
      .next_back()
      .expect("friend history is never empty")
  }

  /// Absorb another friend observed under a possibly-different name.
  ///
  /// If the names differ, the current name is demoted to the prior-name
  /// list (followed by the other friend's prior names) and the other's name
  /// becomes current. The other's snapshots are merged into the history,
  /// replacing on instant collision.
  pub fn merge(&mut self, other: Friend) {
    if other.name != self.name {
      let old = std::mem::replace(&mut self.name, other.name);
      self.previous_names.push(old);
      self.previous_names.extend(other.previous_names);
    }

    self.history.extend(other.history);
  }

  /// Resolve which stored snapshot best represents "history as of
  /// `target`". First match wins:
  ///
  /// 1. the snapshot at exactly `target`;
  /// 2. the earliest snapshot in `[target, target + tolerance]`;
  /// 3. the latest snapshot in `[target - tolerance, target]`;
  /// 4. the earliest snapshot at or after `target`, tolerance ignored.
  ///
  /// Recent-but-not-older data is preferred over older data so gains are
  /// not undercounted; the past is only consulted when no acceptably-recent
  /// snapshot exists.
  pub fn snapshot_at(
    &self,
    target: DateTime<Utc>,
    tolerance: Duration,
  ) -> Option<&Snapshot> {
    if let Some(snapshot) = self.history.get(&target) {
      return Some(snapshot);
    }

    let tolerance = tolerance.max(Duration::zero());
    let upper = target
      .checked_add_signed(tolerance)
      .unwrap_or(DateTime::<Utc>::MAX_UTC);
    let lower = target
      .checked_sub_signed(tolerance)
      .unwrap_or(DateTime::<Utc>::MIN_UTC);

    if let Some((_, snapshot)) = self.history.range(target..=upper).next() {
      return Some(snapshot);
    }

    if let Some((_, snapshot)) =
      self.history.range(lower..=target).next_back()
    {
      return Some(snapshot);
    }

    self.history.range(target..).next().map(|(_, snapshot)| snapshot)
  }
}
