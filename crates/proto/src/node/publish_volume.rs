use super::VolumeCapability;
use crate::{
  proto,
  utils::{non_empty, path_to_string},
};
use std::{
  collections::HashMap,
  convert::TryFrom,
  path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct NodePublishVolumeRequest {
  volume_id: String,
  publish_context: HashMap<String, String>,
  staging_target_path: Option<PathBuf>,
  target_path: PathBuf,
  volume_capability: VolumeCapability,
  readonly: bool,
  volume_context: HashMap<String, String>,
}

impl NodePublishVolumeRequest {
  pub fn new(
    volume_id: impl Into<String>,
    target_path: impl Into<PathBuf>,
    volume_capability: VolumeCapability,
  ) -> Self {
    NodePublishVolumeRequest {
      volume_id: volume_id.into(),
      publish_context: HashMap::new(),
      staging_target_path: None,
      target_path: target_path.into(),
      volume_capability,
      readonly: false,
      volume_context: HashMap::new(),
    }
  }

  pub fn with_publish_context(mut self, publish_context: HashMap<String, String>) -> Self {
    self.publish_context = publish_context;
    self
  }

  pub fn with_staging_target_path(mut self, staging_target_path: impl Into<PathBuf>) -> Self {
    self.staging_target_path = Some(staging_target_path.into());
    self
  }

  pub fn with_volume_context(mut self, volume_context: HashMap<String, String>) -> Self {
    self.volume_context = volume_context;
    self
  }

  /// The ID of the volume to publish. This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  #[inline]
  pub fn publish_context(&self) -> &HashMap<String, String> {
    &self.publish_context
  }

  /// The path to which the volume was staged by `NodeStageVolume`.
  /// It MUST be set if the Node Plugin implements the
  /// `STAGE_UNSTAGE_VOLUME` node capability.
  #[inline]
  pub fn staging_target_path(&self) -> Option<&Path> {
    self.staging_target_path.as_deref()
  }

  /// The path to which the volume will be published. For block
  /// volumes the SP creates a file at this path; the CO only ensures
  /// the parent directory exists.
  #[inline]
  pub fn target_path(&self) -> &Path {
    &self.target_path
  }

  #[inline]
  pub fn volume_capability(&self) -> &VolumeCapability {
    &self.volume_capability
  }

  #[inline]
  pub fn readonly(&self) -> bool {
    self.readonly
  }

  #[inline]
  pub fn volume_context(&self) -> &HashMap<String, String> {
    &self.volume_context
  }
}

impl TryFrom<NodePublishVolumeRequest> for proto::NodePublishVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: NodePublishVolumeRequest) -> Result<Self, Self::Error> {
    let volume_id = non_empty(value.volume_id, "NodePublishVolumeRequest.volume_id is empty")?;
    let staging_target_path = match value.staging_target_path {
      None => String::new(),
      Some(v) => path_to_string(&v, "NodePublishVolumeRequest.staging_target_path")?,
    };
    let target_path = path_to_string(&value.target_path, "NodePublishVolumeRequest.target_path")?;

    Ok(proto::NodePublishVolumeRequest {
      volume_id,
      publish_context: value.publish_context,
      staging_target_path,
      target_path,
      volume_capability: Some(value.volume_capability.into()),
      readonly: value.readonly,
      secrets: HashMap::new(),
      volume_context: value.volume_context,
    })
  }
}
