//! Display and tracking settings. Storage and retrieval of these values is
//! the host application's concern; the engine only defines their meaning.

use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::sort::{SortCriteria, SortOrder};

/// A selectable time window for gain displays. `All` is the zero-length
/// sentinel meaning "lifetime totals, no delta".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Window {
  Day,
  Week,
  Month,
  ThreeMonths,
  SixMonths,
  Year,
  All,
}

impl Window {
  pub fn duration(self) -> Duration {
    match self {
      Window::Day => Duration::days(1),
      Window::Week => Duration::days(7),
      Window::Month => Duration::days(30),
      Window::ThreeMonths => Duration::days(90),
      Window::SixMonths => Duration::days(180),
      Window::Year => Duration::days(365),
      Window::All => Duration::zero(),
    }
  }

  pub fn is_all(self) -> bool { matches!(self, Window::All) }

  pub fn label(self) -> &'static str {
    match self {
      Window::Day => "Day",
      Window::Week => "Week",
      Window::Month => "Month",
      Window::ThreeMonths => "3 Months",
      Window::SixMonths => "6 Months",
      Window::Year => "Year",
      Window::All => "All",
    }
  }
}

/// Settings the host persists for one tracker instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
  /// The base window gains are displayed over.
  pub window:            Window,
  /// Multiplier applied to the base window ("last 3 weeks").
  pub window_multiplier: u32,
  /// Snapshot-matching tolerance; `All` means zero tolerance.
  pub tolerance:         Window,
  pub sort_criteria:     SortCriteria,
  pub sort_order:        SortOrder,
  /// Drop a friend's data when the host roster no longer lists them.
  pub delete_on_removal: bool,
}

impl Default for TrackerConfig {
  fn default() -> Self {
    Self {
      window:            Window::All,
      window_multiplier: 1,
      tolerance:         Window::All,
      sort_criteria:     SortCriteria::Alphanumeric,
      sort_order:        SortOrder::Ascending,
      delete_on_removal: true,
    }
  }
}

impl TrackerConfig {
  /// The effective gain window: base window times multiplier. `All` stays
  /// zero-length under any multiplier.
  pub fn effective_window(&self) -> Duration {
    self.window.duration() * self.window_multiplier as i32
  }

  /// Tolerance as a duration; the `All` selection means exact matching.
  pub fn tolerance_duration(&self) -> Duration {
    self.tolerance.duration()
  }
}
