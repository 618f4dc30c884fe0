//! Merge validation — deciding whether a freshly observed friend is a
//! plausible continuation of an already-tracked one.
//!
//! Stats only ever increase, so any category that regressed between the
//! tracked friend's latest snapshot and the observed snapshot disqualifies
//! the pair as "the same player under a new name".

use tracing::warn;

use crate::{
  catalog::{Category, CategoryKind},
  friend::Friend,
};

/// Compare `existing`'s latest snapshot ("base") against `observed`'s
/// ("candidate"), category by category:
///
/// - a base category with no data carries no information and is skipped;
/// - a candidate category with no data where the base has some is a
///   regression to unknown, which rejects the candidate;
/// - accumulating categories reject on any experience decrease, count
///   categories on any count decrease.
pub fn is_valid_merge_candidate(existing: &Friend, observed: &Friend) -> bool {
  let base = existing.latest_snapshot();
  let candidate = observed.latest_snapshot();

  for &category in Category::ALL {
    let base_value = base.value(category);
    if base_value.is_empty() {
      continue;
    }

    let candidate_value = candidate.value(category);
    if candidate_value.is_empty() {
      warn!(
        candidate = observed.name(),
        category = category.key(),
        "merge candidate rejected: category regressed to unknown",
      );
      return false;
    }

    let regressed = match category.kind() {
      CategoryKind::Accumulating => {
        field_regressed(base_value.experience, candidate_value.experience)
      }
      CategoryKind::Count => {
        field_regressed(base_value.count, candidate_value.count)
      }
    };

    if regressed {
      warn!(
        candidate = observed.name(),
        category = category.key(),
        "merge candidate rejected: category value decreased",
      );
      return false;
    }
  }

  true
}

/// A present base field regresses when the candidate field is lower, or
/// absent entirely. An absent base field cannot be contradicted.
fn field_regressed<T: Ord>(base: Option<T>, candidate: Option<T>) -> bool {
  match (base, candidate) {
    (Some(b), Some(c)) => c < b,
    (Some(_), None) => true,
    (None, _) => false,
  }
}
