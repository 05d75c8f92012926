use super::{CapacityRange, VolumeCapability};
use crate::{
  proto,
  utils::{non_empty, path_to_string},
};
use std::{
  convert::{TryFrom, TryInto},
  num::NonZeroU64,
  path::{Path, PathBuf},
};

#[derive(Debug, Clone)]
pub struct NodeExpandVolumeRequest {
  volume_id: String,
  volume_path: PathBuf,
  capacity_range: Option<CapacityRange>,
  staging_target_path: Option<PathBuf>,
  volume_capability: Option<VolumeCapability>,
}

impl NodeExpandVolumeRequest {
  pub fn new(volume_id: impl Into<String>, volume_path: impl Into<PathBuf>) -> Self {
    NodeExpandVolumeRequest {
      volume_id: volume_id.into(),
      volume_path: volume_path.into(),
      capacity_range: None,
      staging_target_path: None,
      volume_capability: None,
    }
  }

  pub fn with_capacity_range(mut self, capacity_range: CapacityRange) -> Self {
    self.capacity_range = Some(capacity_range);
    self
  }

  pub fn with_staging_target_path(mut self, staging_target_path: impl Into<PathBuf>) -> Self {
    self.staging_target_path = Some(staging_target_path.into());
    self
  }

  pub fn with_volume_capability(mut self, volume_capability: VolumeCapability) -> Self {
    self.volume_capability = Some(volume_capability);
    self
  }

  /// The ID of the volume. This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  /// The path on which volume is available. This field is REQUIRED.
  #[inline]
  pub fn volume_path(&self) -> &Path {
    &self.volume_path
  }

  #[inline]
  pub fn capacity_range(&self) -> Option<&CapacityRange> {
    self.capacity_range.as_ref()
  }

  #[inline]
  pub fn staging_target_path(&self) -> Option<&Path> {
    self.staging_target_path.as_deref()
  }

  #[inline]
  pub fn volume_capability(&self) -> Option<&VolumeCapability> {
    self.volume_capability.as_ref()
  }
}

impl TryFrom<NodeExpandVolumeRequest> for proto::NodeExpandVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: NodeExpandVolumeRequest) -> Result<Self, Self::Error> {
    let volume_id = non_empty(value.volume_id, "NodeExpandVolumeRequest.volume_id is empty")?;
    let volume_path = path_to_string(&value.volume_path, "NodeExpandVolumeRequest.volume_path")?;
    let capacity_range = value.capacity_range.map(TryInto::try_into).transpose()?;
    let staging_target_path = match value.staging_target_path {
      None => String::new(),
      Some(v) => path_to_string(&v, "NodeExpandVolumeRequest.staging_target_path")?,
    };

    Ok(proto::NodeExpandVolumeRequest {
      volume_id,
      volume_path,
      capacity_range,
      staging_target_path,
      volume_capability: value.volume_capability.map(Into::into),
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeExpandVolumeResponse {
  capacity_bytes: Option<NonZeroU64>,
}

impl NodeExpandVolumeResponse {
  pub fn new(capacity_bytes: u64) -> Self {
    NodeExpandVolumeResponse {
      capacity_bytes: NonZeroU64::new(capacity_bytes),
    }
  }

  /// The capacity of the volume in bytes, if the plugin reported it.
  #[inline]
  pub fn capacity_bytes(&self) -> Option<u64> {
    self.capacity_bytes.map(NonZeroU64::get)
  }
}

impl TryFrom<proto::NodeExpandVolumeResponse> for NodeExpandVolumeResponse {
  type Error = tonic::Status;

  fn try_from(value: proto::NodeExpandVolumeResponse) -> Result<Self, Self::Error> {
    match value.capacity_bytes {
      v if v < 0 => Err(tonic::Status::internal(
        "NodeExpandVolumeResponse.capacity_bytes is negative",
      )),
      v => Ok(NodeExpandVolumeResponse::new(v as u64)),
    }
  }
}
