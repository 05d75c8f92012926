use crate::{
  proto,
  utils::{non_empty, path_to_string},
};
use std::{
  convert::TryFrom,
  path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct NodeUnstageVolumeRequest {
  volume_id: String,
  staging_target_path: PathBuf,
}

impl NodeUnstageVolumeRequest {
  pub fn new(volume_id: impl Into<String>, staging_target_path: impl Into<PathBuf>) -> Self {
    NodeUnstageVolumeRequest {
      volume_id: volume_id.into(),
      staging_target_path: staging_target_path.into(),
    }
  }

  /// The ID of the volume. This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  /// The path at which the volume was staged.
  #[inline]
  pub fn staging_target_path(&self) -> &Path {
    &self.staging_target_path
  }
}

impl TryFrom<NodeUnstageVolumeRequest> for proto::NodeUnstageVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: NodeUnstageVolumeRequest) -> Result<Self, Self::Error> {
    Ok(proto::NodeUnstageVolumeRequest {
      volume_id: non_empty(value.volume_id, "NodeUnstageVolumeRequest.volume_id is empty")?,
      staging_target_path: path_to_string(
        &value.staging_target_path,
        "NodeUnstageVolumeRequest.staging_target_path",
      )?,
    })
  }
}
