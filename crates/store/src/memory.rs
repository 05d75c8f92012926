use crate::{validate_name, MetadataStore, Result, StoreError, VolumeRecord};
use async_trait::async_trait;
use std::collections::{hash_map::Entry, HashMap};
use tokio::sync::Mutex;

/// Records in a process-local map. Every operation is atomic, which
/// makes it a stand-in for etcd in tests.
#[derive(Debug)]
pub struct MemoryStore {
  records: Mutex<Option<HashMap<String, VolumeRecord>>>,
}

impl Default for MemoryStore {
  fn default() -> Self {
    MemoryStore::new()
  }
}

impl MemoryStore {
  pub fn new() -> Self {
    MemoryStore {
      records: Mutex::new(Some(HashMap::new())),
    }
  }

  /// A copy of every stored record.
  pub async fn snapshot(&self) -> HashMap<String, VolumeRecord> {
    self.records.lock().await.clone().unwrap_or_default()
  }
}

#[async_trait]
impl MetadataStore for MemoryStore {
  async fn add(&self, name: &str, record: &VolumeRecord) -> Result<()> {
    validate_name(name)?;
    let mut guard = self.records.lock().await;
    let records = guard.as_mut().ok_or(StoreError::Closed)?;

    match records.entry(name.to_owned()) {
      Entry::Occupied(_) => Err(StoreError::AlreadyExists(name.to_owned())),
      Entry::Vacant(e) => {
        e.insert(record.clone());
        Ok(())
      }
    }
  }

  async fn get(&self, name: &str) -> Result<Option<VolumeRecord>> {
    validate_name(name)?;
    let guard = self.records.lock().await;
    let records = guard.as_ref().ok_or(StoreError::Closed)?;

    Ok(records.get(name).cloned())
  }

  async fn remove(&self, name: &str) -> Result<()> {
    validate_name(name)?;
    let mut guard = self.records.lock().await;
    let records = guard.as_mut().ok_or(StoreError::Closed)?;

    records.remove(name);
    Ok(())
  }

  async fn close(&self) -> Result<()> {
    match self.records.lock().await.take() {
      Some(_) => Ok(()),
      None => Err(StoreError::Closed),
    }
  }
}
