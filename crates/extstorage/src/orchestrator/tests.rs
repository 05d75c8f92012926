use super::*;
use async_trait::async_trait;
use csi_proto::{
  controller::CapacityRange, ControllerCapabilities, FakeCall, FakePlugin, PluginCapability,
  VolumeExpansionSupport,
};
use csi_volume_store::{FileStore, MemoryStore, Result as StoreResult};
use std::{collections::HashMap, fs as stdfs, sync::Arc};
use tempfile::TempDir;
use tokio::sync::Barrier;

const GIB: u64 = 1 << 30;

struct Harness {
  dir: TempDir,
  device: PathBuf,
  plugin: FakePlugin,
  orchestrator: Orchestrator<FakePlugin, Arc<MemoryStore>>,
}

impl Harness {
  /// A plugin with stage/unstage support, linked to a device file in a
  /// fresh temporary directory.
  async fn new(plugin: FakePlugin) -> Self {
    Self::with_store(plugin, Arc::new(MemoryStore::new())).await
  }

  async fn with_store(plugin: FakePlugin, store: Arc<MemoryStore>) -> Self {
    let dir = tempfile::tempdir().unwrap();
    let device = dir.path().join("disk0");
    stdfs::File::create(&device).unwrap();
    let root = dir.path().join("volumes");

    let plugin = plugin.with_device(&device);
    let orchestrator = Orchestrator::connect(plugin.clone(), store, root)
      .await
      .unwrap();
    plugin.reset_log();

    Harness {
      dir,
      device,
      plugin,
      orchestrator,
    }
  }

  async fn run(&self, verb: Verb, request: &VolumeRequest) -> Result<Outcome> {
    self.orchestrator.run(verb, request).await
  }

  async fn record(&self, name: &str) -> Option<VolumeRecord> {
    self.orchestrator.store().get(name).await.unwrap()
  }

  fn paths(&self, name: &str) -> VolumePaths {
    VolumePaths::new(self.orchestrator.root(), name)
  }

  fn methods(&self) -> Vec<&'static str> {
    self.plugin.get_methods()
  }
}

fn staging_plugin() -> FakePlugin {
  FakePlugin::new().with_node_capabilities(NodeCapabilities::STAGE_UNSTAGE_VOLUME)
}

fn v1() -> VolumeRequest {
  VolumeRequest::new("v1").with_size_mib(1024)
}

#[tokio::test]
async fn create_records_the_plugin_volume() {
  let h = Harness::new(FakePlugin::new()).await;

  assert_eq!(h.run(Verb::Create, &v1()).await.unwrap(), Outcome::Done);

  assert_eq!(
    h.plugin.get_log(),
    vec![FakeCall::CreateVolume {
      name: "v1".to_owned(),
      capacity_range: CapacityRange::exact(GIB),
    }]
  );
  let record = h.record("v1").await.unwrap();
  assert_eq!(record.volume_id, "bk-1");
  assert_eq!(record.volume_context.get("name").map(String::as_str), Some("v1"));
  assert_eq!(record.capacity_bytes, Some(GIB));
}

#[tokio::test]
async fn second_create_fails_without_rpcs() {
  let h = Harness::new(FakePlugin::new()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.plugin.reset_log();

  let err = h.run(Verb::Create, &v1()).await.unwrap_err();

  assert!(matches!(err, Error::VolumeExists(name) if name == "v1"));
  assert!(h.methods().is_empty());
  assert_eq!(h.record("v1").await.unwrap().volume_id, "bk-1");
}

#[tokio::test]
async fn unknown_volumes_are_not_found() {
  let h = Harness::new(staging_plugin()).await;
  let request = VolumeRequest::new("ghost").with_new_size_mib(2048);

  for verb in [Verb::Attach, Verb::Detach, Verb::Remove, Verb::Grow, Verb::Verify].iter() {
    let err = h.run(*verb, &request).await.unwrap_err();
    assert!(
      matches!(&err, Error::VolumeNotFound(name) if name == "ghost"),
      "{}: {}",
      verb,
      err
    );
  }

  assert!(h.methods().is_empty());
  assert!(h.orchestrator.store().snapshot().await.is_empty());
  assert!(!h.paths("ghost").volume_dir().exists());
}

/// Holds every `add` until as many callers as the barrier counts have
/// arrived, so racing creates all pass their lookup before one inserts.
struct GatedStore {
  inner: Arc<MemoryStore>,
  barrier: Arc<Barrier>,
}

#[async_trait]
impl MetadataStore for GatedStore {
  async fn add(&self, name: &str, record: &VolumeRecord) -> StoreResult<()> {
    self.barrier.wait().await;
    self.inner.add(name, record).await
  }

  async fn get(&self, name: &str) -> StoreResult<Option<VolumeRecord>> {
    self.inner.get(name).await
  }

  async fn remove(&self, name: &str) -> StoreResult<()> {
    self.inner.remove(name).await
  }

  async fn close(&self) -> StoreResult<()> {
    self.inner.close().await
  }
}

#[tokio::test]
async fn racing_creates_both_reach_the_plugin_and_record_once() {
  let dir = tempfile::tempdir().unwrap();
  let root = dir.path().join("volumes");
  let store = Arc::new(MemoryStore::new());
  let barrier = Arc::new(Barrier::new(2));
  let gated = || GatedStore {
    inner: store.clone(),
    barrier: barrier.clone(),
  };
  let plugin = FakePlugin::new();
  let a = Orchestrator::connect(plugin.clone(), gated(), root.clone())
    .await
    .unwrap();
  let b = Orchestrator::connect(plugin.clone(), gated(), root)
    .await
    .unwrap();
  plugin.reset_log();

  let request = v1();
  let (ra, rb) = tokio::join!(
    a.run(Verb::Create, &request),
    b.run(Verb::Create, &request)
  );

  assert_eq!(plugin.get_methods(), vec!["CreateVolume", "CreateVolume"]);
  let results = [ra, rb];
  assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
  assert!(results
    .iter()
    .any(|r| matches!(r, Err(Error::VolumeExists(name)) if name == "v1")));

  let records = store.snapshot().await;
  assert_eq!(records.len(), 1);
  assert_eq!(records["v1"].volume_id, "bk-1");
}

#[tokio::test]
async fn attach_stages_then_publishes() {
  let h = Harness::new(staging_plugin()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.plugin.reset_log();

  let outcome = h.run(Verb::Attach, &v1()).await.unwrap();

  let paths = h.paths("v1");
  assert_eq!(
    outcome,
    Outcome::Attached(stdfs::canonicalize(&h.device).unwrap())
  );
  assert_eq!(
    h.plugin.get_log(),
    vec![
      FakeCall::NodeGetCapabilities,
      FakeCall::NodeStageVolume {
        volume_id: "bk-1".to_owned(),
        staging_target_path: paths.staging().to_owned(),
        publish_context: HashMap::new(),
      },
      FakeCall::NodePublishVolume {
        volume_id: "bk-1".to_owned(),
        staging_target_path: Some(paths.staging().to_owned()),
        target_path: paths.device().to_owned(),
        publish_context: HashMap::new(),
      },
    ]
  );
  assert!(paths.staging().is_dir());
}

#[tokio::test]
async fn attach_is_idempotent() {
  let h = Harness::new(staging_plugin()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  let records = h.orchestrator.store().snapshot().await;

  let first = h.run(Verb::Attach, &v1()).await.unwrap();
  let second = h.run(Verb::Attach, &v1()).await.unwrap();

  assert_eq!(first, second);
  assert_eq!(h.orchestrator.store().snapshot().await, records);
}

#[tokio::test]
async fn attach_without_staging_publishes_directly() {
  let h = Harness::new(FakePlugin::new()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.plugin.reset_log();

  h.run(Verb::Attach, &v1()).await.unwrap();

  assert_eq!(h.methods(), vec!["NodeGetCapabilities", "NodePublishVolume"]);
  assert!(h.paths("v1").volume_dir().is_dir());
  assert!(!h.paths("v1").staging().exists());
}

#[tokio::test]
async fn controller_publish_round_trips_through_attach_and_detach() {
  let mut publish_context = HashMap::new();
  publish_context.insert("lun".to_owned(), "3".to_owned());
  let plugin = staging_plugin()
    .with_controller_capabilities(
      ControllerCapabilities::CREATE_DELETE_VOLUME
        | ControllerCapabilities::PUBLISH_UNPUBLISH_VOLUME,
    )
    .with_node_id("node-a")
    .with_publish_context(publish_context.clone());
  let h = Harness::new(plugin).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.plugin.reset_log();

  h.run(Verb::Attach, &v1()).await.unwrap();

  let log = h.plugin.get_log();
  assert_eq!(
    log[..2],
    [
      FakeCall::NodeGetInfo,
      FakeCall::ControllerPublishVolume {
        volume_id: "bk-1".to_owned(),
        node_id: "node-a".to_owned(),
      },
    ]
  );
  assert!(log.iter().any(|call| matches!(
    call,
    FakeCall::NodeStageVolume { publish_context: ctx, .. } if *ctx == publish_context
  )));
  assert!(log.iter().any(|call| matches!(
    call,
    FakeCall::NodePublishVolume { publish_context: ctx, .. } if *ctx == publish_context
  )));

  h.plugin.reset_log();
  h.run(Verb::Detach, &v1()).await.unwrap();

  assert_eq!(
    h.methods(),
    vec![
      "NodeGetCapabilities",
      "NodeUnpublishVolume",
      "NodeUnstageVolume",
      "NodeGetInfo",
      "ControllerUnpublishVolume",
    ]
  );
}

#[tokio::test]
async fn detach_cleans_up_and_tolerates_missing_directories() {
  let h = Harness::new(staging_plugin()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.run(Verb::Attach, &v1()).await.unwrap();
  h.plugin.reset_log();

  h.run(Verb::Detach, &v1()).await.unwrap();

  assert_eq!(
    h.methods(),
    vec!["NodeGetCapabilities", "NodeUnpublishVolume", "NodeUnstageVolume"]
  );
  assert!(!h.paths("v1").volume_dir().exists());
  assert!(h.device.exists());

  h.run(Verb::Detach, &v1()).await.unwrap();
}

#[tokio::test]
async fn detach_surfaces_unpublish_failures() {
  let h = Harness::new(staging_plugin()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.run(Verb::Attach, &v1()).await.unwrap();
  h.plugin
    .fail_on("NodeUnpublishVolume", tonic::Status::internal("busy"));

  let err = h.run(Verb::Detach, &v1()).await.unwrap_err();

  assert!(matches!(err, Error::Rpc { step: "NodeUnpublishVolume", .. }));
  assert!(h.paths("v1").staging().is_dir());
}

#[tokio::test]
async fn grow_stops_after_controller_without_node_expansion() {
  let h = Harness::new(staging_plugin()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.run(Verb::Attach, &v1()).await.unwrap();
  h.plugin.reset_log();

  h.run(Verb::Grow, &v1().with_new_size_mib(2048))
    .await
    .unwrap();

  assert_eq!(
    h.plugin.get_log(),
    vec![
      FakeCall::ControllerExpandVolume {
        volume_id: "bk-1".to_owned(),
        capacity_range: CapacityRange::exact(2 * GIB).unwrap(),
      },
      FakeCall::NodeGetCapabilities,
    ]
  );
}

#[tokio::test]
async fn grow_skips_node_expansion_when_detached() {
  let plugin = FakePlugin::new().with_node_capabilities(
    NodeCapabilities::STAGE_UNSTAGE_VOLUME | NodeCapabilities::EXPAND_VOLUME,
  );
  let h = Harness::new(plugin).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.plugin.reset_log();

  h.run(Verb::Grow, &v1().with_new_size_mib(2048))
    .await
    .unwrap();

  assert_eq!(
    h.methods(),
    vec!["ControllerExpandVolume", "NodeGetCapabilities"]
  );
}

#[tokio::test]
async fn lifecycle_end_to_end() {
  let plugin = FakePlugin::new().with_node_capabilities(
    NodeCapabilities::STAGE_UNSTAGE_VOLUME | NodeCapabilities::EXPAND_VOLUME,
  );
  let h = Harness::new(plugin).await;
  let paths = h.paths("v1");

  h.run(Verb::Create, &v1()).await.unwrap();
  assert_eq!(h.record("v1").await.unwrap().volume_id, "bk-1");

  h.plugin.reset_log();
  let attached = h.run(Verb::Attach, &VolumeRequest::new("v1")).await.unwrap();
  assert_eq!(
    attached,
    Outcome::Attached(stdfs::canonicalize(&h.device).unwrap())
  );
  assert_eq!(
    h.methods(),
    vec!["NodeGetCapabilities", "NodeStageVolume", "NodePublishVolume"]
  );

  h.plugin.reset_log();
  h.run(Verb::Grow, &VolumeRequest::new("v1").with_new_size_mib(2048))
    .await
    .unwrap();
  assert_eq!(
    h.plugin.get_log()[2],
    FakeCall::NodeExpandVolume {
      volume_id: "bk-1".to_owned(),
      volume_path: paths.device().to_owned(),
      staging_target_path: Some(paths.staging().to_owned()),
    }
  );
  assert_eq!(
    h.methods(),
    vec![
      "ControllerExpandVolume",
      "NodeGetCapabilities",
      "NodeExpandVolume"
    ]
  );

  h.plugin.reset_log();
  h.run(Verb::Detach, &VolumeRequest::new("v1")).await.unwrap();
  assert_eq!(
    h.methods(),
    vec!["NodeGetCapabilities", "NodeUnpublishVolume", "NodeUnstageVolume"]
  );
  assert!(!paths.staging().exists());
  assert!(!paths.volume_dir().exists());

  h.plugin.reset_log();
  h.run(Verb::Remove, &VolumeRequest::new("v1")).await.unwrap();
  assert_eq!(h.methods(), vec!["DeleteVolume"]);
  assert!(h.record("v1").await.is_none());
  assert!(h.plugin.volume("v1").is_none());

  let err = h
    .run(Verb::Verify, &VolumeRequest::new("v1"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::VolumeNotFound(_)));
  assert!(h.dir.path().join("volumes").is_dir());
}

#[tokio::test]
async fn failed_delete_keeps_the_record() {
  let h = Harness::new(FakePlugin::new()).await;
  h.run(Verb::Create, &v1()).await.unwrap();
  h.plugin
    .fail_on("DeleteVolume", tonic::Status::unavailable("plugin down"));

  let err = h.run(Verb::Remove, &v1()).await.unwrap_err();

  assert!(err.is_transport());
  assert!(h.record("v1").await.is_some());

  h.plugin.clear_failures();
  h.run(Verb::Remove, &v1()).await.unwrap();
  assert!(h.record("v1").await.is_none());
}

#[tokio::test]
async fn controller_verbs_need_a_controller_service() {
  let plugin = staging_plugin().with_plugin_capabilities(vec![PluginCapability::VolumeExpansion(
    VolumeExpansionSupport::Offline,
  )]);
  let h = Harness::new(plugin).await;

  let err = h.run(Verb::Create, &v1()).await.unwrap_err();

  assert!(matches!(err, Error::CapabilityMismatch(_)));
  assert!(h.methods().is_empty());
  assert!(h.record("v1").await.is_none());
}

#[tokio::test]
async fn invalid_requests_fail_before_any_io() {
  let h = Harness::new(FakePlugin::new()).await;

  let err = h
    .run(Verb::Create, &VolumeRequest::new("v1"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidRequest(_)));

  let err = h
    .run(Verb::Attach, &VolumeRequest::new("a/b"))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::InvalidRequest(_)));

  assert!(h.methods().is_empty());
}

#[tokio::test]
async fn setinfo_succeeds_without_rpcs() {
  let h = Harness::new(FakePlugin::new()).await;

  let outcome = h
    .run(Verb::Setinfo, &VolumeRequest::new("v1").with_metadata("owner=ops"))
    .await
    .unwrap();

  assert_eq!(outcome, Outcome::Done);
  assert!(h.methods().is_empty());
}

#[tokio::test]
async fn setinfo_accepts_names_other_verbs_reject() {
  let h = Harness::new(FakePlugin::new()).await;
  let request = VolumeRequest::new("a/b").with_metadata("owner=ops");

  assert_eq!(h.run(Verb::Setinfo, &request).await.unwrap(), Outcome::Done);
  assert!(matches!(
    h.run(Verb::Verify, &request).await,
    Err(Error::InvalidRequest(_))
  ));

  assert!(h.methods().is_empty());
  assert!(h.orchestrator.store().snapshot().await.is_empty());
}

#[tokio::test]
async fn records_survive_a_file_store_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let base = dir.path().join("meta");
  let plugin = FakePlugin::new();

  let store = FileStore::open(&base).await.unwrap();
  let first = Orchestrator::connect(plugin.clone(), store, dir.path().join("volumes"))
    .await
    .unwrap();
  first.run(Verb::Create, &v1()).await.unwrap();
  first.store().close().await.unwrap();

  let store = FileStore::open(&base).await.unwrap();
  let second = Orchestrator::connect(plugin, store, dir.path().join("volumes"))
    .await
    .unwrap();
  second
    .run(Verb::Verify, &VolumeRequest::new("v1"))
    .await
    .unwrap();
  assert!(matches!(
    second.run(Verb::Create, &v1()).await,
    Err(Error::VolumeExists(_))
  ));
}
