//! Gain computation — deltas between the latest snapshot and a resolved
//! historical baseline.
//!
//! A failed baseline resolution is not an error: with nothing to measure
//! against, the gain is zero. An absent baseline field counts as a zero
//! baseline, so "was unranked then, ranked now" reports the full current
//! value as gained.

use chrono::{DateTime, Duration, Utc};

use crate::{
  catalog::{Category, CategoryKind},
  friend::Friend,
  snapshot::Snapshot,
};

impl Friend {
  /// Experience gained in `category` since `target`, using the snapshot
  /// index's tolerance-based resolution for the baseline.
  pub fn xp_gained_since(
    &self,
    target: DateTime<Utc>,
    tolerance: Duration,
    category: Category,
  ) -> i64 {
    let current = self.latest_snapshot().value(category).experience;

    match self.snapshot_at(target, tolerance) {
      Some(baseline) => {
        current.unwrap_or(0)
          - baseline.value(category).experience.unwrap_or(0)
      }
      None => 0,
    }
  }

  /// Experience gained in `category` over the trailing `period`.
  ///
  /// A zero-length period means "all time": the latest snapshot's raw value
  /// is reported directly instead of a delta.
  pub fn xp_gained_in_the_last(
    &self,
    period: Duration,
    tolerance: Duration,
    category: Category,
  ) -> i64 {
    if period.is_zero() {
      return self.latest_snapshot().value(category).experience.unwrap_or(0);
    }

    self.xp_gained_since(Utc::now() - period, tolerance, category)
  }

  /// Total completion count gained across every count category since
  /// `target`. The overall aggregate is excluded by kind.
  pub fn kc_gained_since(
    &self,
    target: DateTime<Utc>,
    tolerance: Duration,
  ) -> i64 {
    let current = total_count(self.latest_snapshot());

    match self.snapshot_at(target, tolerance) {
      Some(baseline) => current - total_count(baseline),
      None => 0,
    }
  }

  /// Total completion count gained over the trailing `period`; a zero-length
  /// period reports the latest snapshot's lifetime total.
  pub fn kc_gained_in_the_last(
    &self,
    period: Duration,
    tolerance: Duration,
  ) -> i64 {
    if period.is_zero() {
      return total_count(self.latest_snapshot());
    }

    self.kc_gained_since(Utc::now() - period, tolerance)
  }

  /// A difference snapshot between the latest snapshot and the baseline at
  /// `target`, for comparison displays. With no resolvable baseline the
  /// snapshot is differenced against itself, reporting zero gains over the
  /// current values.
  pub fn change_since(
    &self,
    target: DateTime<Utc>,
    tolerance: Duration,
  ) -> Snapshot {
    let current = self.latest_snapshot();
    let baseline = self.snapshot_at(target, tolerance).unwrap_or(current);

    Snapshot::difference(current, baseline)
  }

  /// Difference snapshot over the trailing `period`; a zero-length period
  /// yields the latest snapshot unchanged (lifetime-total display mode).
  pub fn change_in_the_last(
    &self,
    period: Duration,
    tolerance: Duration,
  ) -> Snapshot {
    if period.is_zero() {
      return self.latest_snapshot().clone();
    }

    self.change_since(Utc::now() - period, tolerance)
  }
}

/// Sum of counts over every count category, absent values clamped to zero.
fn total_count(snapshot: &Snapshot) -> i64 {
  Category::ALL
    .iter()
    .filter(|c| c.kind() == CategoryKind::Count)
    .map(|&c| i64::from(snapshot.value(c).count.unwrap_or(0)))
    .sum()
}
