//! The friend registry — the set of tracked friends for one account
//! context.
//!
//! One registry exists per active context. On context change the caller
//! constructs a fresh registry and swaps it explicitly; nothing here is
//! global. The registry itself is synchronous and single-writer; callers
//! that mutate it from concurrent tasks must serialize access (see
//! `tally-sync`, which holds it behind a mutex).

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::{
  error::{Error, Result},
  friend::{Friend, FriendId},
  merge::is_valid_merge_candidate,
  sort::FriendComparator,
};

/// Opaque key for the account/world context a registry belongs to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
pub struct AccountContext(pub i64);

impl fmt::Display for AccountContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

/// The tracked friend set for one account context, keyed by friend id.
/// Iteration order over the map is not meaningful.
#[derive(Debug)]
pub struct FriendRegistry {
  context: AccountContext,
  friends: HashMap<FriendId, Friend>,
}

impl FriendRegistry {
  pub fn new(context: AccountContext) -> Self {
    Self { context, friends: HashMap::new() }
  }

  pub fn context(&self) -> AccountContext { self.context }

  pub fn len(&self) -> usize { self.friends.len() }

  pub fn is_empty(&self) -> bool { self.friends.is_empty() }

  pub fn get(&self, id: FriendId) -> Option<&Friend> {
    self.friends.get(&id)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Friend> + '_ {
    self.friends.values()
  }

  pub fn friends(&self) -> &HashMap<FriendId, Friend> { &self.friends }

  /// Seed an empty registry from persisted state. Refused with a diagnostic
  /// if the registry already tracks anyone: loading over live friends would
  /// silently duplicate or shadow identities. Use [`FriendRegistry::add`]
  /// to grow a populated registry.
  pub fn apply_save_data(&mut self, friends: HashMap<FriendId, Friend>) {
    if !self.friends.is_empty() {
      error!(
        context = %self.context,
        "refusing to apply save data to a non-empty registry",
      );
      return;
    }

    self.friends = friends;

    info!(
      context = %self.context,
      count = self.friends.len(),
      "save data applied",
    );
  }

  /// Insert a freshly-created friend. Ids are generated by the caller and
  /// assumed unique; a collision would replace, which never happens for
  /// freshly generated ids.
  pub fn add(&mut self, friend: Friend) {
    info!(name = friend.name(), id = %friend.id(), "friend added");
    self.friends.insert(friend.id(), friend);
  }

  pub fn remove(&mut self, id: FriendId) -> Option<Friend> {
    let removed = self.friends.remove(&id);
    if let Some(friend) = &removed {
      info!(name = friend.name(), %id, "friend removed");
    }
    removed
  }

  /// Remove the friend whose current name is `name`; if none matches and a
  /// fallback previous name was supplied, try that against current names
  /// too. A miss on both is a no-op, not an error — the host may signal
  /// removals for names that were never tracked.
  pub fn remove_by_name(
    &mut self,
    name: &str,
    fallback_previous: Option<&str>,
  ) -> Option<Friend> {
    let id = self
      .find_by_current_name(name)
      .or_else(|| fallback_previous.and_then(|p| self.find_by_current_name(p)))?;

    self.remove(id)
  }

  fn find_by_current_name(&self, name: &str) -> Option<FriendId> {
    self
      .friends
      .values()
      .find(|f| f.name() == name)
      .map(|f| f.id())
  }

  /// Absorb `observed` into the tracked friend with id `target`.
  ///
  /// An unknown target id is a caller contract violation and is reported as
  /// an error rather than silently dropped.
  pub fn merge(&mut self, observed: Friend, target: FriendId) -> Result<()> {
    let observed_name = observed.name().to_owned();

    let friend = self
      .friends
      .get_mut(&target)
      .ok_or(Error::UnknownMergeTarget(target))?;
    friend.merge(observed);

    info!(
      observed = observed_name,
      target = friend.name(),
      "friend merged",
    );
    Ok(())
  }

  /// Every tracked friend that `observed` could validly continue. The list
  /// is in map iteration order; callers treat it only as "candidates to
  /// choose from".
  pub fn valid_merge_candidates(&self, observed: &Friend) -> Vec<&Friend> {
    self
      .friends
      .values()
      .filter(|existing| is_valid_merge_candidate(existing, observed))
      .collect()
  }

  /// Read-only projection of the friend set in comparator order.
  pub fn sorted_friends(&self, comparator: &FriendComparator) -> Vec<&Friend> {
    let mut friends: Vec<&Friend> = self.friends.values().collect();
    friends.sort_by(|a, b| comparator(a, b));
    friends
  }
}
