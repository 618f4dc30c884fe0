//! [`Tracker`] — the registry handle plus the refresh/resolve/remove flow.

use chrono::Utc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use tally_core::{
  friend::{Friend, FriendId, sanitize},
  registry::FriendRegistry,
  source::SnapshotSource,
};

/// One entry of the externally-tracked roster: the current display name and,
/// if the host knows it, the name it replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RosterEntry {
  pub name:          String,
  pub previous_name: Option<String>,
}

impl RosterEntry {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), previous_name: None }
  }

  pub fn renamed_from(
    name: impl Into<String>,
    previous: impl Into<String>,
  ) -> Self {
    Self { name: name.into(), previous_name: Some(previous.into()) }
  }
}

/// How one roster entry was reconciled during a refresh.
#[derive(Debug)]
pub enum RefreshOutcome {
  /// No valid merge target existed; a new identity was created.
  Added { id: FriendId, name: String },
  /// Exactly one valid target; merged automatically.
  Merged { name: String, target: FriendId },
  /// Several tracked friends could be the same player. Nothing was
  /// written; the caller decides and calls [`Tracker::resolve`].
  NeedsDecision { observed: Friend, candidates: Vec<FriendId> },
  /// The lookup failed; the entry is skipped until the next refresh.
  Skipped { name: String },
}

/// Owns a registry behind a mutex and a snapshot source, and runs the
/// reconciliation flow against them.
///
/// For each roster entry, candidate computation and the resulting write
/// happen under a single lock acquisition, so two in-flight entries cannot
/// interleave their reads and writes. Two *separate* refreshes racing each
/// other can still both pick the same merge target before either writes;
/// that decision-level race is a known, accepted limitation.
pub struct Tracker<S> {
  registry: Mutex<FriendRegistry>,
  source:   S,
}

impl<S: SnapshotSource> Tracker<S> {
  pub fn new(registry: FriendRegistry, source: S) -> Self {
    Self { registry: Mutex::new(registry), source }
  }

  /// Swap in the registry for a new account context, returning the old
  /// one. The caller owns context-change detection and persistence of the
  /// outgoing registry.
  pub async fn swap_registry(
    &self,
    replacement: FriendRegistry,
  ) -> FriendRegistry {
    std::mem::replace(&mut *self.registry.lock().await, replacement)
  }

  /// Run read-only presentation queries against the registry.
  pub async fn with_registry<R>(
    &self,
    f: impl FnOnce(&FriendRegistry) -> R,
  ) -> R {
    f(&*self.registry.lock().await)
  }

  /// Look up every roster entry and reconcile it against the registry.
  pub async fn refresh(
    &self,
    roster: &[RosterEntry],
  ) -> Vec<RefreshOutcome> {
    let mut outcomes = Vec::with_capacity(roster.len());
    for entry in roster {
      outcomes.push(self.refresh_one(entry).await);
    }
    outcomes
  }

  async fn refresh_one(&self, entry: &RosterEntry) -> RefreshOutcome {
    let name = sanitize(&entry.name);

    let snapshot = match self.source.lookup(&name).await {
      Ok(snapshot) => snapshot,
      Err(err) => {
        warn!(name, %err, "lookup failed; skipping for this refresh");
        return RefreshOutcome::Skipped { name };
      }
    };

    let observed = Friend::new(
      FriendId::random(),
      &name,
      entry.previous_name.as_deref(),
      Utc::now(),
      snapshot,
    );

    let mut registry = self.registry.lock().await;
    let candidates: Vec<FriendId> = registry
      .valid_merge_candidates(&observed)
      .iter()
      .map(|f| f.id())
      .collect();

    match candidates.as_slice() {
      [] => {
        info!(name, "no merge candidates; tracking as new");
        let id = observed.id();
        registry.add(observed);
        RefreshOutcome::Added { id, name }
      }
      [target] => {
        let target = *target;
        match registry.merge(observed, target) {
          Ok(()) => RefreshOutcome::Merged { name, target },
          // Unreachable while the lock is held.
          Err(err) => {
            warn!(name, %err, "auto-merge failed");
            RefreshOutcome::Skipped { name }
          }
        }
      }
      _ => {
        info!(
          name,
          count = candidates.len(),
          "multiple merge candidates; deferring to caller",
        );
        RefreshOutcome::NeedsDecision { observed, candidates }
      }
    }
  }

  /// Apply the caller's decision for an ambiguous observation: merge into
  /// the chosen target, or track as a new identity when no target was
  /// chosen.
  pub async fn resolve(
    &self,
    observed: Friend,
    target: Option<FriendId>,
  ) -> tally_core::Result<()> {
    let mut registry = self.registry.lock().await;
    match target {
      Some(target) => registry.merge(observed, target),
      None => {
        registry.add(observed);
        Ok(())
      }
    }
  }

  /// Handle a roster-removal signal. Names are sanitized before matching.
  pub async fn remove(
    &self,
    name: &str,
    previous_name: Option<&str>,
  ) -> Option<Friend> {
    let name = sanitize(name);
    let previous = previous_name.map(sanitize);

    self
      .registry
      .lock()
      .await
      .remove_by_name(&name, previous.as_deref())
  }
}
