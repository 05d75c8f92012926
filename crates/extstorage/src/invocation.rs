use crate::{
  orchestrator::{Orchestrator, Outcome},
  request::{Verb, VolumeRequest},
  Error, Result,
};
use csi_proto::Plugin;
use csi_volume_store::MetadataStore;
use std::{
  future::Future,
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};
use tokio::time::{error::Elapsed, timeout_at, Instant};
use tracing::{instrument, warn};

/// One verb against one volume, bounded by a single deadline.
///
/// The deadline covers opening the store, connecting to the plugin,
/// capability negotiation and the verb. When it passes, the step in
/// flight is dropped and the invocation fails with
/// [`Error::DeadlineExceeded`]. A store that was opened is always
/// closed again.
#[derive(Debug, Clone)]
pub struct Invocation {
  verb: Verb,
  request: VolumeRequest,
  root: PathBuf,
  timeout: Duration,
}

impl Invocation {
  pub fn new(
    verb: Verb,
    request: VolumeRequest,
    root: impl Into<PathBuf>,
    timeout: Duration,
  ) -> Self {
    Invocation {
      verb,
      request,
      root: root.into(),
      timeout,
    }
  }

  #[inline]
  pub fn verb(&self) -> Verb {
    self.verb
  }

  #[inline]
  pub fn request(&self) -> &VolumeRequest {
    &self.request
  }

  #[inline]
  pub fn root(&self) -> &Path {
    &self.root
  }

  #[inline]
  pub fn timeout(&self) -> Duration {
    self.timeout
  }

  /// Validates the request, then awaits `store` and `plugin` in that
  /// order and runs the verb. Neither future is polled when the request
  /// is invalid.
  #[instrument(
    name = "invocation.run",
    skip(self, store, plugin),
    fields(verb = %self.verb, volume = %self.request.name())
  )]
  pub async fn run<S, P>(
    &self,
    store: impl Future<Output = Result<S>>,
    plugin: impl Future<Output = Result<P>>,
  ) -> Result<Outcome>
  where
    S: MetadataStore,
    P: Plugin,
  {
    self.request.validate_for(self.verb)?;

    let deadline = Instant::now() + self.timeout;
    let expired = |_: Elapsed| Error::DeadlineExceeded(self.timeout);

    let store = Arc::new(timeout_at(deadline, store).await.map_err(expired)??);
    let result = timeout_at(deadline, async {
      let plugin = plugin.await?;
      let orchestrator = Orchestrator::connect(plugin, store.clone(), &self.root).await?;
      orchestrator.run(self.verb, &self.request).await
    })
    .await
    .map_err(expired)
    .and_then(|r| r);

    if let Err(e) = store.close().await {
      warn!(error = %e, "failed to close metadata store");
    }

    result
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use csi_proto::FakePlugin;
  use csi_volume_store::{MemoryStore, StoreError};
  use std::future;
  use tempfile::TempDir;

  const TIMEOUT: Duration = Duration::from_secs(60);

  fn invocation(dir: &TempDir, verb: Verb, request: VolumeRequest) -> Invocation {
    Invocation::new(verb, request, dir.path().join("volumes"), TIMEOUT)
  }

  fn create() -> VolumeRequest {
    VolumeRequest::new("v1").with_size_mib(1024)
  }

  async fn ready<T>(value: T) -> Result<T> {
    Ok(value)
  }

  #[tokio::test(start_paused = true)]
  async fn stalled_verb_rpc_hits_the_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let plugin = FakePlugin::new();
    plugin.stall_on("CreateVolume");

    let err = invocation(&dir, Verb::Create, create())
      .run(ready(store.clone()), ready(plugin.clone()))
      .await
      .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded(t) if t == TIMEOUT));
    assert_eq!(plugin.get_methods().last(), Some(&"CreateVolume"));
    assert!(matches!(store.get("v1").await, Err(StoreError::Closed)));
  }

  #[tokio::test(start_paused = true)]
  async fn stalled_negotiation_hits_the_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let plugin = FakePlugin::new();
    plugin.stall_on("GetPluginCapabilities");

    let err = invocation(&dir, Verb::Verify, VolumeRequest::new("v1"))
      .run(ready(store.clone()), ready(plugin.clone()))
      .await
      .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded(_)));
    assert_eq!(
      plugin.get_methods(),
      vec!["GetPluginInfo", "GetPluginCapabilities"]
    );
    assert!(matches!(store.get("v1").await, Err(StoreError::Closed)));
  }

  #[tokio::test(start_paused = true)]
  async fn slow_store_open_counts_against_the_deadline() {
    let dir = tempfile::tempdir().unwrap();
    let plugin = FakePlugin::new();
    let store = async {
      tokio::time::sleep(TIMEOUT * 2).await;
      Ok::<_, Error>(MemoryStore::new())
    };

    let err = invocation(&dir, Verb::Verify, VolumeRequest::new("v1"))
      .run(store, ready(plugin.clone()))
      .await
      .unwrap_err();

    assert!(matches!(err, Error::DeadlineExceeded(_)));
    assert!(plugin.get_methods().is_empty());
  }

  #[tokio::test(start_paused = true)]
  async fn invalid_requests_never_open_the_store() {
    let dir = tempfile::tempdir().unwrap();

    let err = invocation(&dir, Verb::Create, VolumeRequest::new("v1"))
      .run(
        future::pending::<Result<MemoryStore>>(),
        future::pending::<Result<FakePlugin>>(),
      )
      .await
      .unwrap_err();

    assert!(matches!(err, Error::InvalidRequest(_)));
  }

  #[tokio::test]
  async fn completed_invocations_close_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let plugin = FakePlugin::new();

    let outcome = invocation(&dir, Verb::Create, create())
      .run(ready(store.clone()), ready(plugin.clone()))
      .await
      .unwrap();

    assert_eq!(outcome, Outcome::Done);
    assert_eq!(plugin.volume("v1").unwrap().volume_id(), "bk-1");
    assert!(matches!(store.get("v1").await, Err(StoreError::Closed)));
  }

  #[tokio::test]
  async fn connect_failures_still_close_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = Arc::new(MemoryStore::new());
    let plugin = async { Err::<FakePlugin, _>(Error::InvalidRequest("no plugin".to_owned())) };

    let err = invocation(&dir, Verb::Verify, VolumeRequest::new("v1"))
      .run(ready(store.clone()), plugin)
      .await
      .unwrap_err();

    assert!(matches!(err, Error::InvalidRequest(_)));
    assert!(matches!(store.get("v1").await, Err(StoreError::Closed)));
  }
}
