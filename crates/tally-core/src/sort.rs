//! Comparator construction for presenting the friend list in a configured
//! order.
//!
//! Only a primary sort criterion is wired up; multi-level tie-breaking is a
//! designed extension that no caller currently needs.

use std::cmp::Ordering;

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::{catalog::Category, friend::Friend};

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortCriteria {
  #[default]
  Alphanumeric,
  XpGained,
  KcGained,
}

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
  #[default]
  Ascending,
  Descending,
}

pub type FriendComparator = Box<dyn Fn(&Friend, &Friend) -> Ordering>;

/// Build a comparator over friends for the given criterion and order.
/// Gain-based criteria measure over the trailing `period` with the given
/// snapshot-matching `tolerance`; a zero-length period compares lifetime
/// totals.
pub fn comparator(
  criteria: SortCriteria,
  order: SortOrder,
  period: Duration,
  tolerance: Duration,
) -> FriendComparator {
  let by_criteria: FriendComparator = match criteria {
    SortCriteria::Alphanumeric => Box::new(|a, b| {
      a.name().to_lowercase().cmp(&b.name().to_lowercase())
    }),
    SortCriteria::XpGained => Box::new(move |a, b| {
      a.xp_gained_in_the_last(period, tolerance, Category::Overall)
        .cmp(&b.xp_gained_in_the_last(period, tolerance, Category::Overall))
    }),
    SortCriteria::KcGained => Box::new(move |a, b| {
      a.kc_gained_in_the_last(period, tolerance)
        .cmp(&b.kc_gained_in_the_last(period, tolerance))
    }),
  };

  match order {
    SortOrder::Ascending => by_criteria,
    SortOrder::Descending => Box::new(move |a, b| by_criteria(b, a)),
  }
}
