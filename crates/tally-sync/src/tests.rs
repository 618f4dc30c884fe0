//! Reconciliation-flow tests against an in-memory snapshot source.

use std::collections::HashMap;

use chrono::{DateTime, Duration, TimeZone, Utc};
use thiserror::Error;

use tally_core::{
  catalog::Category,
  friend::{Friend, FriendId},
  registry::{AccountContext, FriendRegistry},
  snapshot::Snapshot,
  source::SnapshotSource,
  value::CategoryValue,
};

use crate::{RefreshOutcome, RosterEntry, Tracker};

#[derive(Debug, Error)]
#[error("no stats for {0:?}")]
struct NoStats(String);

/// Serves canned snapshots by name; unknown names fail the lookup.
struct FakeSource {
  snapshots: HashMap<String, Snapshot>,
}

impl FakeSource {
  fn new(entries: impl IntoIterator<Item = (&'static str, i64)>) -> Self {
    Self {
      snapshots: entries
        .into_iter()
        .map(|(name, xp)| (name.to_owned(), overall(xp)))
        .collect(),
    }
  }
}

impl SnapshotSource for FakeSource {
  type Error = NoStats;

  async fn lookup(&self, name: &str) -> Result<Snapshot, NoStats> {
    self
      .snapshots
      .get(name)
      .cloned()
      .ok_or_else(|| NoStats(name.to_owned()))
  }
}

fn overall(experience: i64) -> Snapshot {
  Snapshot::new([(
    Category::Overall,
    CategoryValue::new(None, None, Some(experience)),
  )])
}

fn t(day: u32) -> DateTime<Utc> {
  Utc.with_ymd_and_hms(2024, 6, day, 12, 0, 0).unwrap()
}

fn tracked(name: &str, experience: i64) -> Friend {
  Friend::new(FriendId::random(), name, None, t(1), overall(experience))
}

fn tracker(
  friends: Vec<Friend>,
  source: FakeSource,
) -> Tracker<FakeSource> {
  let mut registry = FriendRegistry::new(AccountContext(1));
  for friend in friends {
    registry.add(friend);
  }
  Tracker::new(registry, source)
}

#[tokio::test]
async fn unknown_names_are_tracked_as_new() {
  let tracker = tracker(vec![], FakeSource::new([("Alice", 1_000)]));

  let outcomes = tracker.refresh(&[RosterEntry::new("Alice")]).await;

  assert!(matches!(
    &outcomes[..],
    [RefreshOutcome::Added { name, .. }] if name == "Alice"
  ));
  assert_eq!(tracker.with_registry(|r| r.len()).await, 1);
}

#[tokio::test]
async fn single_candidate_merges_automatically() {
  let bob = tracked("Bob", 1_000);
  let bob_id = bob.id();
  let tracker = tracker(vec![bob], FakeSource::new([("Bobby", 1_500)]));

  let outcomes = tracker
    .refresh(&[RosterEntry::renamed_from("Bobby", "Bob")])
    .await;

  assert!(matches!(
    &outcomes[..],
    [RefreshOutcome::Merged { name, target }]
      if name == "Bobby" && *target == bob_id
  ));

  tracker
    .with_registry(|r| {
      let merged = r.get(bob_id).unwrap();
      assert_eq!(merged.name(), "Bobby");
      assert!(merged.previous_names().contains(&"Bob".to_owned()));
      assert_eq!(merged.snapshot_count(), 2);
    })
    .await;
}

#[tokio::test]
async fn ambiguous_candidates_defer_without_writing() {
  // Two tracked friends both below the observed total: both are valid.
  let tracker = tracker(
    vec![tracked("Low", 100), tracked("Mid", 900)],
    FakeSource::new([("New", 1_000)]),
  );

  let outcomes = tracker.refresh(&[RosterEntry::new("New")]).await;

  let RefreshOutcome::NeedsDecision { observed, candidates } = &outcomes[0]
  else {
    panic!("expected NeedsDecision, got {:?}", outcomes[0]);
  };
  assert_eq!(observed.name(), "New");
  assert_eq!(candidates.len(), 2);

  // Nothing was added or merged.
  assert_eq!(tracker.with_registry(|r| r.len()).await, 2);
}

#[tokio::test]
async fn resolve_applies_the_callers_choice() {
  let low = tracked("Low", 100);
  let low_id = low.id();
  let tracker = tracker(
    vec![low, tracked("Mid", 900)],
    FakeSource::new([("New", 1_000)]),
  );

  let mut outcomes = tracker.refresh(&[RosterEntry::new("New")]).await;
  let RefreshOutcome::NeedsDecision { observed, .. } = outcomes.remove(0)
  else {
    panic!("expected NeedsDecision");
  };

  tracker.resolve(observed, Some(low_id)).await.unwrap();

  tracker
    .with_registry(|r| {
      assert_eq!(r.len(), 2);
      assert_eq!(r.get(low_id).unwrap().name(), "New");
    })
    .await;
}

#[tokio::test]
async fn resolve_without_target_adds_a_new_identity() {
  let tracker = tracker(
    vec![tracked("Low", 100), tracked("Mid", 900)],
    FakeSource::new([("New", 1_000)]),
  );

  let mut outcomes = tracker.refresh(&[RosterEntry::new("New")]).await;
  let RefreshOutcome::NeedsDecision { observed, .. } = outcomes.remove(0)
  else {
    panic!("expected NeedsDecision");
  };

  tracker.resolve(observed, None).await.unwrap();
  assert_eq!(tracker.with_registry(|r| r.len()).await, 3);
}

#[tokio::test]
async fn failed_lookups_are_skipped() {
  let tracker = tracker(vec![], FakeSource::new([("Alice", 1_000)]));

  let outcomes = tracker
    .refresh(&[RosterEntry::new("Offline"), RosterEntry::new("Alice")])
    .await;

  assert!(matches!(
    &outcomes[0],
    RefreshOutcome::Skipped { name } if name == "Offline"
  ));
  assert!(matches!(&outcomes[1], RefreshOutcome::Added { .. }));
  assert_eq!(tracker.with_registry(|r| r.len()).await, 1);
}

#[tokio::test]
async fn lookup_names_are_sanitized() {
  // The host hands over a name with a no-break space; the source only
  // knows the normalized form.
  let tracker = tracker(vec![], FakeSource::new([("Iron Bob", 1_000)]));

  let outcomes = tracker
    .refresh(&[RosterEntry::new("Iron\u{00A0}Bob")])
    .await;

  assert!(matches!(
    &outcomes[..],
    [RefreshOutcome::Added { name, .. }] if name == "Iron Bob"
  ));
}

#[tokio::test]
async fn roster_removal_matches_previous_name() {
  let tracker = tracker(
    vec![tracked("Alice", 1_000)],
    FakeSource::new([]),
  );

  let removed = tracker.remove("NewAlice", Some("Alice")).await;
  assert_eq!(removed.unwrap().name(), "Alice");
  assert!(tracker.with_registry(|r| r.is_empty()).await);
}

#[tokio::test]
async fn swap_registry_returns_the_old_context() {
  let tracker = tracker(vec![tracked("Alice", 1_000)], FakeSource::new([]));

  let old = tracker
    .swap_registry(FriendRegistry::new(AccountContext(2)))
    .await;

  assert_eq!(old.context(), AccountContext(1));
  assert_eq!(old.len(), 1);
  assert_eq!(
    tracker.with_registry(|r| r.context()).await,
    AccountContext(2)
  );
  assert!(tracker.with_registry(|r| r.is_empty()).await);
}

#[tokio::test]
async fn merged_gains_are_queryable_after_refresh() {
  let bob = tracked("Bob", 1_000);
  let bob_id = bob.id();
  let tracker = tracker(vec![bob], FakeSource::new([("Bobby", 1_500)]));

  tracker
    .refresh(&[RosterEntry::renamed_from("Bobby", "Bob")])
    .await;

  let gained = tracker
    .with_registry(|r| {
      r.get(bob_id).unwrap().xp_gained_since(
        t(1),
        Duration::zero(),
        Category::Overall,
      )
    })
    .await;
  assert_eq!(gained, 500);
}
