use super::{CapacityRange, VolumeCapability};
use crate::{proto, utils::non_empty};
use std::{
  collections::HashMap,
  convert::{TryFrom, TryInto},
  num::NonZeroU64,
};

#[derive(Debug, Clone)]
pub struct ControllerExpandVolumeRequest {
  volume_id: String,
  capacity_range: CapacityRange,
  volume_capability: Option<VolumeCapability>,
}

impl ControllerExpandVolumeRequest {
  pub fn new(volume_id: impl Into<String>, capacity_range: CapacityRange) -> Self {
    ControllerExpandVolumeRequest {
      volume_id: volume_id.into(),
      capacity_range,
      volume_capability: None,
    }
  }

  pub fn with_volume_capability(mut self, volume_capability: VolumeCapability) -> Self {
    self.volume_capability = Some(volume_capability);
    self
  }

  /// The ID of the volume to expand. This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  /// This allows CO to specify the capacity requirements of the volume
  /// after expansion. This field is REQUIRED.
  #[inline]
  pub fn capacity_range(&self) -> &CapacityRange {
    &self.capacity_range
  }

  #[inline]
  pub fn volume_capability(&self) -> Option<&VolumeCapability> {
    self.volume_capability.as_ref()
  }
}

impl TryFrom<ControllerExpandVolumeRequest> for proto::ControllerExpandVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: ControllerExpandVolumeRequest) -> Result<Self, Self::Error> {
    let volume_id = non_empty(
      value.volume_id,
      "ControllerExpandVolumeRequest.volume_id is empty",
    )?;

    Ok(proto::ControllerExpandVolumeRequest {
      volume_id,
      capacity_range: Some(value.capacity_range.try_into()?),
      secrets: HashMap::new(),
      volume_capability: value.volume_capability.map(Into::into),
    })
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControllerExpandVolumeResponse {
  capacity_bytes: Option<NonZeroU64>,
  node_expansion_required: bool,
}

impl ControllerExpandVolumeResponse {
  pub fn new(capacity_bytes: u64, node_expansion_required: bool) -> Self {
    ControllerExpandVolumeResponse {
      capacity_bytes: NonZeroU64::new(capacity_bytes),
      node_expansion_required,
    }
  }

  /// Capacity of volume after expansion, if the plugin reported it.
  #[inline]
  pub fn capacity_bytes(&self) -> Option<u64> {
    self.capacity_bytes.map(NonZeroU64::get)
  }

  /// Whether node expansion is required for the volume. When true
  /// the CO MUST make NodeExpandVolume RPC call on the node.
  #[inline]
  pub fn node_expansion_required(&self) -> bool {
    self.node_expansion_required
  }
}

impl TryFrom<proto::ControllerExpandVolumeResponse> for ControllerExpandVolumeResponse {
  type Error = tonic::Status;

  fn try_from(value: proto::ControllerExpandVolumeResponse) -> Result<Self, Self::Error> {
    if value.capacity_bytes < 0 {
      return Err(tonic::Status::internal(
        "ControllerExpandVolumeResponse.capacity_bytes is negative",
      ));
    }

    Ok(ControllerExpandVolumeResponse::new(
      value.capacity_bytes as u64,
      value.node_expansion_required,
    ))
  }
}
