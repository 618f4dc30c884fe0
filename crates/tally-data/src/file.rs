//! [`JsonFileStore`] — a [`TrackerStore`] keeping one JSON file per
//! account context in a directory.

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::debug;

use tally_core::{
  friend::{Friend, FriendId},
  registry::AccountContext,
  store::TrackerStore,
};

use crate::{
  codec::{decode_registry, encode_registry},
  error::{Error, Result},
};

/// Stores each context's friend set at `<dir>/<context>.json`.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
  dir: PathBuf,
}

impl JsonFileStore {
  pub fn new(dir: impl Into<PathBuf>) -> Self {
    Self { dir: dir.into() }
  }

  fn path_for(&self, context: AccountContext) -> PathBuf {
    self.dir.join(format!("{context}.json"))
  }
}

impl TrackerStore for JsonFileStore {
  type Error = Error;

  async fn load(
    &self,
    context: AccountContext,
  ) -> Result<Option<HashMap<FriendId, Friend>>> {
    let path = self.path_for(context);

    let bytes = match tokio::fs::read(&path).await {
      Ok(bytes) => bytes,
      Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
        debug!(%context, "no save data on disk");
        return Ok(None);
      }
      Err(err) => return Err(err.into()),
    };

    let value: serde_json::Value = serde_json::from_slice(&bytes)?;
    Ok(Some(decode_registry(&value)?))
  }

  async fn save(
    &self,
    context: AccountContext,
    friends: &HashMap<FriendId, Friend>,
  ) -> Result<()> {
    tokio::fs::create_dir_all(&self.dir).await?;

    let value = encode_registry(friends)?;
    let bytes = serde_json::to_vec(&value)?;
    tokio::fs::write(self.path_for(context), bytes).await?;

    debug!(%context, count = friends.len(), "save data written");
    Ok(())
  }
}
