use crate::{proto, utils::non_empty};
use std::{collections::HashMap, convert::TryFrom};

#[derive(Debug, Clone)]
pub struct DeleteVolumeRequest {
  volume_id: String,
}

impl DeleteVolumeRequest {
  pub fn new(volume_id: impl Into<String>) -> Self {
    DeleteVolumeRequest {
      volume_id: volume_id.into(),
    }
  }

  /// The ID of the volume to be deprovisioned.
  /// This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }
}

impl TryFrom<DeleteVolumeRequest> for proto::DeleteVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: DeleteVolumeRequest) -> Result<Self, Self::Error> {
    Ok(proto::DeleteVolumeRequest {
      volume_id: non_empty(value.volume_id, "DeleteVolumeRequest.volume_id is empty")?,
      secrets: HashMap::new(),
    })
  }
}
