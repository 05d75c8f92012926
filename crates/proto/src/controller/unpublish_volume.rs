use crate::{proto, utils::non_empty};
use std::{collections::HashMap, convert::TryFrom};

#[derive(Debug, Clone)]
pub struct ControllerUnpublishVolumeRequest {
  volume_id: String,
  node_id: String,
}

impl ControllerUnpublishVolumeRequest {
  pub fn new(volume_id: impl Into<String>, node_id: impl Into<String>) -> Self {
    ControllerUnpublishVolumeRequest {
      volume_id: volume_id.into(),
      node_id: node_id.into(),
    }
  }

  /// The ID of the volume. This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  /// The ID of the node, as returned by `NodeGetInfo`. An empty value
  /// asks the plugin to unpublish the volume from all nodes.
  #[inline]
  pub fn node_id(&self) -> &str {
    &self.node_id
  }
}

impl TryFrom<ControllerUnpublishVolumeRequest> for proto::ControllerUnpublishVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: ControllerUnpublishVolumeRequest) -> Result<Self, Self::Error> {
    let volume_id = non_empty(
      value.volume_id,
      "ControllerUnpublishVolumeRequest.volume_id is empty",
    )?;

    Ok(proto::ControllerUnpublishVolumeRequest {
      volume_id,
      node_id: value.node_id,
      secrets: HashMap::new(),
    })
  }
}
