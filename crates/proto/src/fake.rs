use crate::{
  controller::{
    CapacityRange, ControllerCapabilities, ControllerExpandVolumeRequest,
    ControllerExpandVolumeResponse, ControllerPublishVolumeRequest,
    ControllerPublishVolumeResponse, ControllerUnpublishVolumeRequest, CreateVolumeRequest,
    DeleteVolumeRequest, Volume,
  },
  node::{
    NodeCapabilities, NodeExpandVolumeRequest, NodeExpandVolumeResponse, NodeGetInfoResponse,
    NodePublishVolumeRequest, NodeStageVolumeRequest, NodeUnpublishVolumeRequest,
    NodeUnstageVolumeRequest,
  },
  Plugin, PluginCapabilities, PluginCapability, PluginInfo, VolumeExpansionSupport,
};
use async_trait::async_trait;
use std::{
  collections::{HashMap, HashSet},
  fs, future, io,
  path::{Path, PathBuf},
  sync::{Arc, Mutex},
};
use tracing::info;

/// One RPC received by a [`FakePlugin`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeCall {
  GetPluginInfo,
  GetPluginCapabilities,
  ControllerGetCapabilities,
  CreateVolume {
    name: String,
    capacity_range: Option<CapacityRange>,
  },
  DeleteVolume {
    volume_id: String,
  },
  ControllerPublishVolume {
    volume_id: String,
    node_id: String,
  },
  ControllerUnpublishVolume {
    volume_id: String,
    node_id: String,
  },
  ControllerExpandVolume {
    volume_id: String,
    capacity_range: CapacityRange,
  },
  NodeGetCapabilities,
  NodeGetInfo,
  NodeStageVolume {
    volume_id: String,
    staging_target_path: PathBuf,
    publish_context: HashMap<String, String>,
  },
  NodeUnstageVolume {
    volume_id: String,
    staging_target_path: PathBuf,
  },
  NodePublishVolume {
    volume_id: String,
    staging_target_path: Option<PathBuf>,
    target_path: PathBuf,
    publish_context: HashMap<String, String>,
  },
  NodeUnpublishVolume {
    volume_id: String,
    target_path: PathBuf,
  },
  NodeExpandVolume {
    volume_id: String,
    volume_path: PathBuf,
    staging_target_path: Option<PathBuf>,
  },
}

impl FakeCall {
  /// The CSI method name, as used by [`FakePlugin::fail_on`].
  pub fn method(&self) -> &'static str {
    match self {
      FakeCall::GetPluginInfo => "GetPluginInfo",
      FakeCall::GetPluginCapabilities => "GetPluginCapabilities",
      FakeCall::ControllerGetCapabilities => "ControllerGetCapabilities",
      FakeCall::CreateVolume { .. } => "CreateVolume",
      FakeCall::DeleteVolume { .. } => "DeleteVolume",
      FakeCall::ControllerPublishVolume { .. } => "ControllerPublishVolume",
      FakeCall::ControllerUnpublishVolume { .. } => "ControllerUnpublishVolume",
      FakeCall::ControllerExpandVolume { .. } => "ControllerExpandVolume",
      FakeCall::NodeGetCapabilities => "NodeGetCapabilities",
      FakeCall::NodeGetInfo => "NodeGetInfo",
      FakeCall::NodeStageVolume { .. } => "NodeStageVolume",
      FakeCall::NodeUnstageVolume { .. } => "NodeUnstageVolume",
      FakeCall::NodePublishVolume { .. } => "NodePublishVolume",
      FakeCall::NodeUnpublishVolume { .. } => "NodeUnpublishVolume",
      FakeCall::NodeExpandVolume { .. } => "NodeExpandVolume",
    }
  }
}

struct FakePluginInner {
  info: PluginInfo,
  plugin_capabilities: Vec<PluginCapability>,
  controller_capabilities: ControllerCapabilities,
  node_capabilities: NodeCapabilities,
  node_id: String,
  publish_context: HashMap<String, String>,
  device: Option<PathBuf>,
  volumes: HashMap<String, Volume>,
  next_volume: usize,
  failures: HashMap<&'static str, tonic::Status>,
  stalls: HashSet<&'static str>,
  log: Vec<FakeCall>,
}

impl FakePluginInner {
  /// Logs `call`. `Ok(true)` means the call must never complete.
  fn call(&mut self, call: FakeCall) -> Result<bool, tonic::Status> {
    let method = call.method();
    info!(method, "fake plugin call");
    self.log.push(call);

    match self.failures.get(method) {
      Some(status) => Err(tonic::Status::new(status.code(), status.message())),
      None => Ok(self.stalls.contains(method)),
    }
  }

  fn volume_by_id(&self, volume_id: &str) -> Option<&Volume> {
    self.volumes.values().find(|v| v.volume_id() == volume_id)
  }
}

/// An in-memory CSI plugin. Clones share state.
///
/// Volumes are keyed by name, so `CreateVolume` is idempotent the way
/// real plugins are. `NodePublishVolume` creates a symlink at the
/// target path pointing at the configured device (or an empty file
/// when no device is configured), and `NodeUnpublishVolume` removes it.
#[derive(Clone)]
pub struct FakePlugin(Arc<Mutex<FakePluginInner>>);

impl Default for FakePlugin {
  fn default() -> Self {
    FakePlugin::new()
  }
}

impl FakePlugin {
  /// A plugin with a controller service supporting create/delete and
  /// expansion, online volume expansion and no node capabilities.
  pub fn new() -> Self {
    let inner = FakePluginInner {
      info: PluginInfo::new("fake.csi.local", "0.1.0"),
      plugin_capabilities: vec![
        PluginCapability::ControllerService,
        PluginCapability::VolumeExpansion(VolumeExpansionSupport::Online),
      ],
      controller_capabilities: ControllerCapabilities::CREATE_DELETE_VOLUME
        | ControllerCapabilities::EXPAND_VOLUME,
      node_capabilities: NodeCapabilities::empty(),
      node_id: "fake-node".to_owned(),
      publish_context: HashMap::new(),
      device: None,
      volumes: HashMap::new(),
      next_volume: 1,
      failures: HashMap::new(),
      stalls: HashSet::new(),
      log: Vec::new(),
    };

    Self(Arc::new(Mutex::new(inner)))
  }

  pub fn with_plugin_capabilities(self, caps: impl IntoIterator<Item = PluginCapability>) -> Self {
    self.0.lock().unwrap().plugin_capabilities = caps.into_iter().collect();
    self
  }

  pub fn with_controller_capabilities(self, caps: ControllerCapabilities) -> Self {
    self.0.lock().unwrap().controller_capabilities = caps;
    self
  }

  pub fn with_node_capabilities(self, caps: NodeCapabilities) -> Self {
    self.0.lock().unwrap().node_capabilities = caps;
    self
  }

  pub fn with_node_id(self, node_id: impl Into<String>) -> Self {
    self.0.lock().unwrap().node_id = node_id.into();
    self
  }

  pub fn with_publish_context(self, publish_context: HashMap<String, String>) -> Self {
    self.0.lock().unwrap().publish_context = publish_context;
    self
  }

  /// The node that published volumes link to.
  pub fn with_device(self, device: impl Into<PathBuf>) -> Self {
    self.0.lock().unwrap().device = Some(device.into());
    self
  }

  /// Makes every later call of `method` fail with `status`.
  pub fn fail_on(&self, method: &'static str, status: tonic::Status) {
    self.0.lock().unwrap().failures.insert(method, status);
  }

  pub fn clear_failures(&self) {
    self.0.lock().unwrap().failures.clear();
  }

  /// Makes every later call of `method` hang forever after it is
  /// logged.
  pub fn stall_on(&self, method: &'static str) {
    self.0.lock().unwrap().stalls.insert(method);
  }

  pub fn volume(&self, name: &str) -> Option<Volume> {
    self.0.lock().unwrap().volumes.get(name).cloned()
  }

  pub fn reset_log(&self) {
    self.0.lock().unwrap().log.clear();
  }

  pub fn get_log(&self) -> Vec<FakeCall> {
    self.0.lock().unwrap().log.clone()
  }

  /// The method names of [`FakePlugin::get_log`], in order.
  pub fn get_methods(&self) -> Vec<&'static str> {
    self.0.lock().unwrap().log.iter().map(FakeCall::method).collect()
  }

  async fn enter(&self, call: FakeCall) -> Result<(), tonic::Status> {
    let stalled = self.0.lock().unwrap().call(call)?;
    if stalled {
      future::pending::<()>().await;
    }

    Ok(())
  }
}

fn io_status(path: &Path, err: io::Error) -> tonic::Status {
  tonic::Status::internal(format!("{}: {}", path.display(), err))
}

#[async_trait]
impl Plugin for FakePlugin {
  async fn get_plugin_info(&self) -> Result<PluginInfo, tonic::Status> {
    self.enter(FakeCall::GetPluginInfo).await?;
    let inner = self.0.lock().unwrap();
    Ok(inner.info.clone())
  }

  async fn get_plugin_capabilities(&self) -> Result<PluginCapabilities, tonic::Status> {
    self.enter(FakeCall::GetPluginCapabilities).await?;
    let inner = self.0.lock().unwrap();
    Ok(inner.plugin_capabilities.iter().copied().collect())
  }

  async fn controller_get_capabilities(&self) -> Result<ControllerCapabilities, tonic::Status> {
    self.enter(FakeCall::ControllerGetCapabilities).await?;
    let inner = self.0.lock().unwrap();
    Ok(inner.controller_capabilities)
  }

  async fn create_volume(&self, request: CreateVolumeRequest) -> Result<Volume, tonic::Status> {
    self
      .enter(FakeCall::CreateVolume {
        name: request.name().to_owned(),
        capacity_range: request.capacity_range().copied(),
      })
      .await?;
    let mut inner = self.0.lock().unwrap();

    if let Some(volume) = inner.volumes.get(request.name()) {
      return Ok(volume.clone());
    }

    let volume_id = format!("bk-{}", inner.next_volume);
    inner.next_volume += 1;

    let mut context = HashMap::new();
    context.insert("name".to_owned(), request.name().to_owned());
    let mut volume = Volume::new(volume_id).with_volume_context(context);
    if let Some(bytes) = request.capacity_range().and_then(|r| r.required_bytes()) {
      volume = volume.with_capacity_bytes(bytes);
    }

    inner
      .volumes
      .insert(request.name().to_owned(), volume.clone());
    Ok(volume)
  }

  async fn delete_volume(&self, request: DeleteVolumeRequest) -> Result<(), tonic::Status> {
    self
      .enter(FakeCall::DeleteVolume {
        volume_id: request.volume_id().to_owned(),
      })
      .await?;
    let mut inner = self.0.lock().unwrap();

    inner
      .volumes
      .retain(|_, v| v.volume_id() != request.volume_id());
    Ok(())
  }

  async fn controller_publish_volume(
    &self,
    request: ControllerPublishVolumeRequest,
  ) -> Result<ControllerPublishVolumeResponse, tonic::Status> {
    self
      .enter(FakeCall::ControllerPublishVolume {
        volume_id: request.volume_id().to_owned(),
        node_id: request.node_id().to_owned(),
      })
      .await?;
    let inner = self.0.lock().unwrap();

    Ok(ControllerPublishVolumeResponse::new(
      inner.publish_context.clone(),
    ))
  }

  async fn controller_unpublish_volume(
    &self,
    request: ControllerUnpublishVolumeRequest,
  ) -> Result<(), tonic::Status> {
    self
      .enter(FakeCall::ControllerUnpublishVolume {
        volume_id: request.volume_id().to_owned(),
        node_id: request.node_id().to_owned(),
      })
      .await
  }

  async fn controller_expand_volume(
    &self,
    request: ControllerExpandVolumeRequest,
  ) -> Result<ControllerExpandVolumeResponse, tonic::Status> {
    self
      .enter(FakeCall::ControllerExpandVolume {
        volume_id: request.volume_id().to_owned(),
        capacity_range: *request.capacity_range(),
      })
      .await?;
    let inner = self.0.lock().unwrap();

    if inner.volume_by_id(request.volume_id()).is_none() {
      return Err(tonic::Status::not_found(request.volume_id().to_owned()));
    }

    let capacity_bytes = request.capacity_range().required_bytes().unwrap_or_default();
    let node_expansion_required = inner
      .node_capabilities
      .contains(NodeCapabilities::EXPAND_VOLUME);
    Ok(ControllerExpandVolumeResponse::new(
      capacity_bytes,
      node_expansion_required,
    ))
  }

  async fn node_get_capabilities(&self) -> Result<NodeCapabilities, tonic::Status> {
    self.enter(FakeCall::NodeGetCapabilities).await?;
    let inner = self.0.lock().unwrap();
    Ok(inner.node_capabilities)
  }

  async fn node_get_info(&self) -> Result<NodeGetInfoResponse, tonic::Status> {
    self.enter(FakeCall::NodeGetInfo).await?;
    let inner = self.0.lock().unwrap();
    Ok(NodeGetInfoResponse::new(inner.node_id.clone()))
  }

  async fn node_stage_volume(&self, request: NodeStageVolumeRequest) -> Result<(), tonic::Status> {
    self
      .enter(FakeCall::NodeStageVolume {
        volume_id: request.volume_id().to_owned(),
        staging_target_path: request.staging_target_path().to_owned(),
        publish_context: request.publish_context().clone(),
      })
      .await?;

    if !request.staging_target_path().is_dir() {
      return Err(tonic::Status::failed_precondition(format!(
        "{} is not a directory",
        request.staging_target_path().display()
      )));
    }

    Ok(())
  }

  async fn node_unstage_volume(
    &self,
    request: NodeUnstageVolumeRequest,
  ) -> Result<(), tonic::Status> {
    self
      .enter(FakeCall::NodeUnstageVolume {
        volume_id: request.volume_id().to_owned(),
        staging_target_path: request.staging_target_path().to_owned(),
      })
      .await
  }

  async fn node_publish_volume(
    &self,
    request: NodePublishVolumeRequest,
  ) -> Result<(), tonic::Status> {
    self
      .enter(FakeCall::NodePublishVolume {
        volume_id: request.volume_id().to_owned(),
        staging_target_path: request.staging_target_path().map(ToOwned::to_owned),
        target_path: request.target_path().to_owned(),
        publish_context: request.publish_context().clone(),
      })
      .await?;
    let inner = self.0.lock().unwrap();

    let target = request.target_path();
    if fs::symlink_metadata(target).is_ok() {
      return Ok(());
    }

    let published = match &inner.device {
      Some(device) => std::os::unix::fs::symlink(device, target),
      None => fs::File::create(target).map(drop),
    };

    published.map_err(|e| io_status(target, e))
  }

  async fn node_unpublish_volume(
    &self,
    request: NodeUnpublishVolumeRequest,
  ) -> Result<(), tonic::Status> {
    self
      .enter(FakeCall::NodeUnpublishVolume {
        volume_id: request.volume_id().to_owned(),
        target_path: request.target_path().to_owned(),
      })
      .await?;

    match fs::remove_file(request.target_path()) {
      Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_status(request.target_path(), e)),
      _ => Ok(()),
    }
  }

  async fn node_expand_volume(
    &self,
    request: NodeExpandVolumeRequest,
  ) -> Result<NodeExpandVolumeResponse, tonic::Status> {
    self
      .enter(FakeCall::NodeExpandVolume {
        volume_id: request.volume_id().to_owned(),
        volume_path: request.volume_path().to_owned(),
        staging_target_path: request.staging_target_path().map(ToOwned::to_owned),
      })
      .await?;
    let inner = self.0.lock().unwrap();

    let capacity_bytes = inner
      .volume_by_id(request.volume_id())
      .and_then(Volume::capacity_bytes)
      .unwrap_or_default();
    Ok(NodeExpandVolumeResponse::new(capacity_bytes))
  }
}
