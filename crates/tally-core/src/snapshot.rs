//! Snapshots — immutable captures of every category's value at one instant.

use std::collections::BTreeMap;

use crate::{
  catalog::Category,
  value::CategoryValue,
};

/// A point-in-time capture of category values. Categories with nothing to
/// report are simply not stored; reading them back yields the empty value.
/// Snapshots are never edited after construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
  values: BTreeMap<Category, CategoryValue>,
}

impl Snapshot {
  pub fn new(
    values: impl IntoIterator<Item = (Category, CategoryValue)>,
  ) -> Self {
    Self {
      values: values
        .into_iter()
        .filter(|(_, v)| !v.is_empty())
        .collect(),
    }
  }

  /// The value recorded for `category`, or the empty value if none was.
  pub fn value(&self, category: Category) -> CategoryValue {
    self.values.get(&category).copied().unwrap_or(CategoryValue::EMPTY)
  }

  /// Iterate over the categories that actually carry data.
  pub fn values(&self) -> impl Iterator<Item = (Category, CategoryValue)> + '_ {
    self.values.iter().map(|(c, v)| (*c, *v))
  }

  pub fn is_empty(&self) -> bool { self.values.is_empty() }

  /// Synthesize a difference snapshot for side-by-side comparison displays:
  /// every category holds `high - low`, with absent `low` fields treated as
  /// zero baselines.
  pub fn difference(high: &Snapshot, low: &Snapshot) -> Snapshot {
    Snapshot::new(Category::ALL.iter().map(|&category| {
      (
        category,
        CategoryValue::diff(high.value(category), low.value(category)),
      )
    }))
  }

  /// The precise (fractional) combat level derived from the seven combat
  /// skills' levels. Combat is not a catalog entry; it is computed on demand
  /// from the base categories. `None` if any contributing level is absent.
  pub fn combat_level(&self) -> Option<f64> {
    let level = |c: Category| self.value(c).count.map(f64::from);

    let attack = level(Category::Attack)?;
    let strength = level(Category::Strength)?;
    let defence = level(Category::Defence)?;
    let hitpoints = level(Category::Hitpoints)?;
    let magic = level(Category::Magic)?;
    let ranged = level(Category::Ranged)?;
    let prayer = level(Category::Prayer)?;

    let base = 0.25 * (defence + hitpoints + (prayer / 2.0).floor());
    let melee = 0.325 * (attack + strength);
    let range = 0.325 * ((ranged / 2.0).floor() + ranged);
    let mage = 0.325 * ((magic / 2.0).floor() + magic);

    Some(base + melee.max(range).max(mage))
  }
}

impl FromIterator<(Category, CategoryValue)> for Snapshot {
  fn from_iter<I: IntoIterator<Item = (Category, CategoryValue)>>(
    iter: I,
  ) -> Self {
    Snapshot::new(iter)
  }
}
