//! The outbound persistence boundary.
//!
//! A store durably maps an account context to its tracked friend set.
//! `tally-data` provides the JSON wire format and a file-backed
//! implementation; other backends implement this trait.

use std::collections::HashMap;
use std::future::Future;

use crate::{
  friend::{Friend, FriendId},
  registry::AccountContext,
};

pub trait TrackerStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the friend set saved for `context`, or `None` if nothing was
  /// ever saved for it.
  fn load(
    &self,
    context: AccountContext,
  ) -> impl Future<Output = Result<Option<HashMap<FriendId, Friend>>, Self::Error>>
  + Send
  + '_;

  /// Persist the full friend set for `context`, replacing whatever was
  /// saved before.
  fn save<'a>(
    &'a self,
    context: AccountContext,
    friends: &'a HashMap<FriendId, Friend>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;
}
