use crate::{
  proto,
  utils::{non_empty, path_to_string},
};
use std::{
  convert::TryFrom,
  path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct NodeUnpublishVolumeRequest {
  volume_id: String,
  target_path: PathBuf,
}

impl NodeUnpublishVolumeRequest {
  pub fn new(volume_id: impl Into<String>, target_path: impl Into<PathBuf>) -> Self {
    NodeUnpublishVolumeRequest {
      volume_id: volume_id.into(),
      target_path: target_path.into(),
    }
  }

  /// The ID of the volume. This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  /// The path at which the volume was published.
  #[inline]
  pub fn target_path(&self) -> &Path {
    &self.target_path
  }
}

impl TryFrom<NodeUnpublishVolumeRequest> for proto::NodeUnpublishVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: NodeUnpublishVolumeRequest) -> Result<Self, Self::Error> {
    Ok(proto::NodeUnpublishVolumeRequest {
      volume_id: non_empty(value.volume_id, "NodeUnpublishVolumeRequest.volume_id is empty")?,
      target_path: path_to_string(
        &value.target_path,
        "NodeUnpublishVolumeRequest.target_path",
      )?,
    })
  }
}
