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
pub struct NodeStageVolumeRequest {
  volume_id: String,
  publish_context: HashMap<String, String>,
  staging_target_path: PathBuf,
  volume_capability: VolumeCapability,
  volume_context: HashMap<String, String>,
}

impl NodeStageVolumeRequest {
  pub fn new(
    volume_id: impl Into<String>,
    staging_target_path: impl Into<PathBuf>,
    volume_capability: VolumeCapability,
  ) -> Self {
    NodeStageVolumeRequest {
      volume_id: volume_id.into(),
      publish_context: HashMap::new(),
      staging_target_path: staging_target_path.into(),
      volume_capability,
      volume_context: HashMap::new(),
    }
  }

  pub fn with_publish_context(mut self, publish_context: HashMap<String, String>) -> Self {
    self.publish_context = publish_context;
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

  /// The value returned by `ControllerPublishVolume`, or empty if the
  /// controller has no `PUBLISH_UNPUBLISH_VOLUME` capability.
  #[inline]
  pub fn publish_context(&self) -> &HashMap<String, String> {
    &self.publish_context
  }

  /// The path to which the volume MAY be staged. It MUST be an
  /// absolute path in the root filesystem of the process serving this
  /// request, and MUST be a directory. The CO SHALL be responsible for
  /// creating the directory if it does not exist.
  #[inline]
  pub fn staging_target_path(&self) -> &Path {
    &self.staging_target_path
  }

  #[inline]
  pub fn volume_capability(&self) -> &VolumeCapability {
    &self.volume_capability
  }

  #[inline]
  pub fn volume_context(&self) -> &HashMap<String, String> {
    &self.volume_context
  }
}

impl TryFrom<NodeStageVolumeRequest> for proto::NodeStageVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: NodeStageVolumeRequest) -> Result<Self, Self::Error> {
    let volume_id = non_empty(value.volume_id, "NodeStageVolumeRequest.volume_id is empty")?;
    let staging_target_path = path_to_string(
      &value.staging_target_path,
      "NodeStageVolumeRequest.staging_target_path",
    )?;

    Ok(proto::NodeStageVolumeRequest {
      volume_id,
      publish_context: value.publish_context,
      staging_target_path,
      volume_capability: Some(value.volume_capability.into()),
      secrets: HashMap::new(),
      volume_context: value.volume_context,
    })
  }
}
