//! Per-category values — rank, count, and experience, each of which may be
//! absent.
//!
//! The remote statistics service reports unranked categories with a `-1`
//! sentinel. That encoding stays at the wire boundary (`tally-data`); inside
//! the engine an absent field is `None`, so no arithmetic can accidentally
//! treat "unranked" as an ordinary number.

use serde::{Deserialize, Serialize};

/// The value of one category at one point in time. All fields optional;
/// `None` means "not present / unranked".
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct CategoryValue {
  pub rank:       Option<i32>,
  /// Completion count for count categories; level for accumulating ones.
  pub count:      Option<i32>,
  pub experience: Option<i64>,
}

impl CategoryValue {
  pub const EMPTY: CategoryValue =
    CategoryValue { rank: None, count: None, experience: None };

  pub fn new(
    rank: Option<i32>,
    count: Option<i32>,
    experience: Option<i64>,
  ) -> Self {
    Self { rank, count, experience }
  }

  /// True when every field is absent — the whole category is unknown.
  pub fn is_empty(&self) -> bool {
    self.rank.is_none() && self.count.is_none() && self.experience.is_none()
  }

  /// Field-wise difference used to synthesize comparison snapshots.
  ///
  /// An absent `low` field is treated as a zero baseline ("was unranked,
  /// now ranked"); an absent `high` field stays absent.
  pub fn diff(high: CategoryValue, low: CategoryValue) -> CategoryValue {
    CategoryValue {
      rank:       field_diff(high.rank, low.rank),
      count:      field_diff(high.count, low.count),
      experience: field_diff(high.experience, low.experience),
    }
  }
}

fn field_diff<T>(high: Option<T>, low: Option<T>) -> Option<T>
where
  T: std::ops::Sub<Output = T> + Default,
{
  high.map(|h| h - low.unwrap_or_default())
}
