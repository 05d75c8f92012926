use crate::{validate_name, MetadataStore, Result, StoreError, VolumeRecord};
use async_trait::async_trait;
use etcd_client::{Client, Compare, CompareOp, Txn, TxnOp};
use tokio::sync::Mutex;
use tracing::{debug, instrument};

const KEY_PREFIX: &str = "volmeta";

/// Records in etcd, one key per volume under `volmeta/`.
///
/// `add` is a single transaction that only puts the key if its create
/// revision is 0, i.e. the key does not exist.
pub struct EtcdStore {
  client: Mutex<Option<Client>>,
}

impl EtcdStore {
  pub async fn connect<E: AsRef<str>>(endpoints: &[E]) -> Result<Self> {
    let client = Client::connect(endpoints, None).await?;
    Ok(Self::from_client(client))
  }

  pub fn from_client(client: Client) -> Self {
    EtcdStore {
      client: Mutex::new(Some(client)),
    }
  }

  fn key(name: &str) -> Result<String> {
    validate_name(name)?;
    Ok(format!("{}/{}", KEY_PREFIX, name))
  }
}

#[async_trait]
impl MetadataStore for EtcdStore {
  #[instrument(name = "etcd.add", skip(self, record))]
  async fn add(&self, name: &str, record: &VolumeRecord) -> Result<()> {
    let key = Self::key(name)?;
    let value = record.encode()?;

    let txn = Txn::new()
      .when(vec![Compare::create_revision(
        key.clone(),
        CompareOp::Equal,
        0,
      )])
      .and_then(vec![TxnOp::put(key, value, None)]);

    let mut guard = self.client.lock().await;
    let client = guard.as_mut().ok_or(StoreError::Closed)?;
    let response = client.txn(txn).await?;

    if !response.succeeded() {
      return Err(StoreError::AlreadyExists(name.to_owned()));
    }

    debug!("volume record stored");
    Ok(())
  }

  #[instrument(name = "etcd.get", skip(self))]
  async fn get(&self, name: &str) -> Result<Option<VolumeRecord>> {
    let key = Self::key(name)?;

    let mut guard = self.client.lock().await;
    let client = guard.as_mut().ok_or(StoreError::Closed)?;
    let response = client.get(key, None).await?;

    response
      .kvs()
      .first()
      .map(|kv| VolumeRecord::decode(name, kv.value()))
      .transpose()
  }

  #[instrument(name = "etcd.remove", skip(self))]
  async fn remove(&self, name: &str) -> Result<()> {
    let key = Self::key(name)?;

    let mut guard = self.client.lock().await;
    let client = guard.as_mut().ok_or(StoreError::Closed)?;
    let response = client.delete(key, None).await?;

    debug!(deleted = response.deleted(), "volume record removed");
    Ok(())
  }

  async fn close(&self) -> Result<()> {
    match self.client.lock().await.take() {
      Some(_) => Ok(()),
      None => Err(StoreError::Closed),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn keys_are_namespaced() {
    assert_eq!(EtcdStore::key("v1").unwrap(), "volmeta/v1");
    assert!(matches!(
      EtcdStore::key("../v1"),
      Err(StoreError::InvalidName(_))
    ));
  }
}
