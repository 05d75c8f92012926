//! Durable mapping from a volume's stable name to the plugin volume that
//! backs it.

mod etcd;
mod file;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, io, path::PathBuf, sync::Arc};
use thiserror::Error;

pub use etcd::EtcdStore;
pub use file::FileStore;
pub use memory::MemoryStore;

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// What the plugin told us about a volume when it was created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VolumeRecord {
  pub volume_id: String,

  #[serde(default, skip_serializing_if = "HashMap::is_empty")]
  pub volume_context: HashMap<String, String>,

  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub capacity_bytes: Option<u64>,
}

impl VolumeRecord {
  pub fn new(volume_id: impl Into<String>) -> Self {
    VolumeRecord {
      volume_id: volume_id.into(),
      volume_context: HashMap::new(),
      capacity_bytes: None,
    }
  }

  pub(crate) fn encode(&self) -> Result<Vec<u8>> {
    serde_json::to_vec(self).map_err(StoreError::Encode)
  }

  pub(crate) fn decode(name: &str, data: &[u8]) -> Result<Self> {
    serde_json::from_slice(data).map_err(|source| StoreError::Decode {
      name: name.to_owned(),
      source,
    })
  }
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum StoreError {
  #[error("Volume record already exists: {0}")]
  AlreadyExists(String),

  #[error("Invalid volume name: {0:?}")]
  InvalidName(String),

  #[error("Metadata store is closed")]
  Closed,

  #[error("Failed to encode volume record")]
  Encode(#[source] serde_json::Error),

  #[error("Malformed volume record for {name}")]
  Decode {
    name: String,
    #[source]
    source: serde_json::Error,
  },

  #[error("I/O error on {}", path.display())]
  Io {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error(transparent)]
  Etcd(#[from] etcd_client::Error),
}

/// Names become keys and file names, so they must be a single
/// non-empty path component.
pub fn validate_name(name: &str) -> Result<()> {
  match name {
    "" | "." | ".." => Err(StoreError::InvalidName(name.to_owned())),
    n if n.contains('/') || n.contains('\0') => Err(StoreError::InvalidName(name.to_owned())),
    _ => Ok(()),
  }
}

#[async_trait]
pub trait MetadataStore: Send + Sync {
  /// Stores `record` under `name`. Fails with
  /// [`StoreError::AlreadyExists`] when a record for `name` exists,
  /// without touching it.
  async fn add(&self, name: &str, record: &VolumeRecord) -> Result<()>;

  /// `Ok(None)` when nothing is stored under `name`.
  async fn get(&self, name: &str) -> Result<Option<VolumeRecord>>;

  /// Removing a missing record succeeds.
  async fn remove(&self, name: &str) -> Result<()>;

  /// Releases backend connections. Later calls fail with
  /// [`StoreError::Closed`].
  async fn close(&self) -> Result<()>;
}

#[async_trait]
impl<T: MetadataStore + ?Sized> MetadataStore for Box<T> {
  async fn add(&self, name: &str, record: &VolumeRecord) -> Result<()> {
    (**self).add(name, record).await
  }

  async fn get(&self, name: &str) -> Result<Option<VolumeRecord>> {
    (**self).get(name).await
  }

  async fn remove(&self, name: &str) -> Result<()> {
    (**self).remove(name).await
  }

  async fn close(&self) -> Result<()> {
    (**self).close().await
  }
}

#[async_trait]
impl<T: MetadataStore + ?Sized> MetadataStore for Arc<T> {
  async fn add(&self, name: &str, record: &VolumeRecord) -> Result<()> {
    (**self).add(name, record).await
  }

  async fn get(&self, name: &str) -> Result<Option<VolumeRecord>> {
    (**self).get(name).await
  }

  async fn remove(&self, name: &str) -> Result<()> {
    (**self).remove(name).await
  }

  async fn close(&self) -> Result<()> {
    (**self).close().await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use test_case::test_case;

  #[test_case("v1" => true ; "plain")]
  #[test_case("instance-1.disk0" => true ; "dotted")]
  #[test_case("" => false ; "empty")]
  #[test_case("." => false ; "dot")]
  #[test_case(".." => false ; "dot dot")]
  #[test_case("a/b" => false ; "nested")]
  #[test_case("a\0b" => false ; "nul")]
  fn names(name: &str) -> bool {
    validate_name(name).is_ok()
  }

  #[test]
  fn decodes_records_with_extra_fields() {
    let data = br#"{"capacity_bytes":1073741824,"volume_id":"bk-1","volume_context":{"pool":"fast"},"accessible_topology":[]}"#;
    let record = VolumeRecord::decode("v1", data).unwrap();

    assert_eq!(record.volume_id, "bk-1");
    assert_eq!(record.capacity_bytes, Some(1 << 30));
    assert_eq!(record.volume_context.get("pool").map(String::as_str), Some("fast"));
  }

  #[test]
  fn omits_empty_fields() {
    let data = VolumeRecord::new("bk-1").encode().unwrap();

    assert_eq!(data, br#"{"volume_id":"bk-1"}"#.to_vec());
  }

  #[test]
  fn malformed_record_names_the_volume() {
    let err = VolumeRecord::decode("v1", b"not json").unwrap_err();

    assert!(matches!(err, StoreError::Decode { ref name, .. } if name == "v1"));
  }
}
