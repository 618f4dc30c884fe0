//! The JSON wire format for snapshots and friend sets.
//!
//! On the wire, absent rank/count/experience fields use the statistics
//! service's historical `-1` sentinel; in memory they are `Option`s. Two
//! snapshot layouts are understood on read:
//!
//! - current: `{ "values": { "<category key>": { rank, count, experience } } }`
//! - legacy:  a flat object keyed by lowerCamel field names, with `level`
//!   in place of `count`, upgraded via [`Category::from_legacy_key`]
//!
//! Only the current layout is ever written. Categories with nothing to
//! report are omitted on write and reconstruct as unknown on read.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use tally_core::{
  catalog::Category,
  friend::{Friend, FriendId},
  snapshot::Snapshot,
  value::CategoryValue,
};

use crate::error::{Error, Result};

// ─── Wire types ──────────────────────────────────────────────────────────────

const SENTINEL_I32: i32 = -1;
const SENTINEL_I64: i64 = -1;

fn sentinel_i32() -> i32 { SENTINEL_I32 }
fn sentinel_i64() -> i64 { SENTINEL_I64 }

#[derive(Debug, Serialize, Deserialize)]
struct StoredValue {
  #[serde(default = "sentinel_i32")]
  rank:       i32,
  #[serde(default = "sentinel_i32")]
  count:      i32,
  #[serde(default = "sentinel_i64")]
  experience: i64,
}

impl StoredValue {
  fn from_value(value: CategoryValue) -> Self {
    Self {
      rank:       value.rank.unwrap_or(SENTINEL_I32),
      count:      value.count.unwrap_or(SENTINEL_I32),
      experience: value.experience.unwrap_or(SENTINEL_I64),
    }
  }

  fn into_value(self) -> CategoryValue {
    CategoryValue::new(
      (self.rank >= 0).then_some(self.rank),
      (self.count >= 0).then_some(self.count),
      (self.experience >= 0).then_some(self.experience),
    )
  }
}

/// The legacy field-per-category era stored levels under `level`.
#[derive(Debug, Deserialize)]
struct LegacyValue {
  #[serde(default = "sentinel_i32")]
  rank:       i32,
  #[serde(default = "sentinel_i32")]
  level:      i32,
  #[serde(default = "sentinel_i64")]
  experience: i64,
}

impl LegacyValue {
  fn into_value(self) -> CategoryValue {
    CategoryValue::new(
      (self.rank >= 0).then_some(self.rank),
      (self.level >= 0).then_some(self.level),
      (self.experience >= 0).then_some(self.experience),
    )
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredFriend {
  name:           String,
  #[serde(default)]
  previous_names: Vec<String>,
  snapshots:      BTreeMap<DateTime<Utc>, Value>,
}

// ─── Snapshots ───────────────────────────────────────────────────────────────

pub fn encode_snapshot(snapshot: &Snapshot) -> Result<Value> {
  let mut values = serde_json::Map::new();
  for (category, value) in snapshot.values() {
    values.insert(
      category.key().to_owned(),
      serde_json::to_value(StoredValue::from_value(value))?,
    );
  }

  Ok(serde_json::json!({ "values": values }))
}

pub fn decode_snapshot(value: &Value) -> Result<Snapshot> {
  let object = value
    .as_object()
    .ok_or_else(|| Error::Format("snapshot is not an object".to_owned()))?;

  match object.get("values") {
    Some(values) => decode_keyed(values),
    None => decode_legacy(object),
  }
}

fn decode_keyed(values: &Value) -> Result<Snapshot> {
  let object = values.as_object().ok_or_else(|| {
    Error::Format("snapshot values are not an object".to_owned())
  })?;

  let mut pairs = Vec::with_capacity(object.len());
  for (key, raw) in object {
    let Some(category) = Category::from_key(key) else {
      warn!(key, "ignoring unknown category in save data");
      continue;
    };
    let stored: StoredValue = serde_json::from_value(raw.clone())?;
    pairs.push((category, stored.into_value()));
  }

  Ok(Snapshot::new(pairs))
}

/// Upgrade the flat legacy layout: each category was a lowerCamel-named
/// field of the snapshot object itself.
fn decode_legacy(object: &serde_json::Map<String, Value>) -> Result<Snapshot> {
  info!("upgrading legacy snapshot save data");

  let mut pairs = Vec::new();
  for (key, raw) in object {
    // The legacy blob carried the looked-up player name alongside the
    // category fields.
    if key == "player" {
      continue;
    }
    let Some(category) = Category::from_legacy_key(key) else {
      warn!(key, "ignoring unknown legacy field in save data");
      continue;
    };
    let legacy: LegacyValue = serde_json::from_value(raw.clone())?;
    pairs.push((category, legacy.into_value()));
  }

  Ok(Snapshot::new(pairs))
}

// ─── Friend sets ─────────────────────────────────────────────────────────────

/// Encode a registry's friend set as one JSON object keyed by friend id.
pub fn encode_registry(
  friends: &HashMap<FriendId, Friend>,
) -> Result<Value> {
  let mut map = serde_json::Map::with_capacity(friends.len());

  for (id, friend) in friends {
    let mut snapshots = BTreeMap::new();
    for (at, snapshot) in friend.history() {
      snapshots.insert(at, encode_snapshot(snapshot)?);
    }

    let stored = StoredFriend {
      name: friend.name().to_owned(),
      previous_names: friend.previous_names().to_vec(),
      snapshots,
    };
    map.insert(id.to_string(), serde_json::to_value(stored)?);
  }

  Ok(Value::Object(map))
}

/// Decode a friend set. Friends whose history decodes empty are dropped
/// with a warning — the engine requires at least one snapshot per friend.
pub fn decode_registry(
  value: &Value,
) -> Result<HashMap<FriendId, Friend>> {
  let object = value
    .as_object()
    .ok_or_else(|| Error::Format("save data is not an object".to_owned()))?;

  let mut friends = HashMap::with_capacity(object.len());
  for (key, raw) in object {
    let id: FriendId = Uuid::parse_str(key)
      .map_err(|_| Error::Format(format!("invalid friend id {key:?}")))?
      .into();
    let stored: StoredFriend = serde_json::from_value(raw.clone())?;

    let mut history = BTreeMap::new();
    for (at, snapshot) in &stored.snapshots {
      history.insert(*at, decode_snapshot(snapshot)?);
    }

    match Friend::from_parts(id, &stored.name, stored.previous_names, history)
    {
      Ok(friend) => {
        friends.insert(id, friend);
      }
      Err(err) => {
        warn!(name = stored.name, %err, "dropping unusable saved friend");
      }
    }
  }

  Ok(friends)
}
