use super::VolumeCapability;
use crate::{proto, utils::non_empty};
use std::{collections::HashMap, convert::TryFrom};

#[derive(Debug, Clone)]
pub struct ControllerPublishVolumeRequest {
  volume_id: String,
  node_id: String,
  volume_capability: VolumeCapability,
  readonly: bool,
  volume_context: HashMap<String, String>,
}

impl ControllerPublishVolumeRequest {
  pub fn new(
    volume_id: impl Into<String>,
    node_id: impl Into<String>,
    volume_capability: VolumeCapability,
  ) -> Self {
    ControllerPublishVolumeRequest {
      volume_id: volume_id.into(),
      node_id: node_id.into(),
      volume_capability,
      readonly: false,
      volume_context: HashMap::new(),
    }
  }

  pub fn with_volume_context(mut self, volume_context: HashMap<String, String>) -> Self {
    self.volume_context = volume_context;
    self
  }

  /// The ID of the volume to be used on a node.
  /// This field is REQUIRED.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  /// The ID of the node. This field is REQUIRED. The CO SHALL set this
  /// field to match the node ID returned by `NodeGetInfo`.
  #[inline]
  pub fn node_id(&self) -> &str {
    &self.node_id
  }

  #[inline]
  pub fn volume_capability(&self) -> &VolumeCapability {
    &self.volume_capability
  }

  #[inline]
  pub fn readonly(&self) -> bool {
    self.readonly
  }

  /// Volume context as returned by SP in
  /// CreateVolumeResponse.Volume.volume_context.
  #[inline]
  pub fn volume_context(&self) -> &HashMap<String, String> {
    &self.volume_context
  }
}

impl TryFrom<ControllerPublishVolumeRequest> for proto::ControllerPublishVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: ControllerPublishVolumeRequest) -> Result<Self, Self::Error> {
    let volume_id = non_empty(
      value.volume_id,
      "ControllerPublishVolumeRequest.volume_id is empty",
    )?;
    let node_id = non_empty(
      value.node_id,
      "ControllerPublishVolumeRequest.node_id is empty",
    )?;

    Ok(proto::ControllerPublishVolumeRequest {
      volume_id,
      node_id,
      volume_capability: Some(value.volume_capability.into()),
      readonly: value.readonly,
      secrets: HashMap::new(),
      volume_context: value.volume_context,
    })
  }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControllerPublishVolumeResponse {
  publish_context: HashMap<String, String>,
}

impl ControllerPublishVolumeResponse {
  pub fn new(publish_context: HashMap<String, String>) -> Self {
    ControllerPublishVolumeResponse { publish_context }
  }

  /// Opaque static publish properties of the volume. When present they
  /// MUST be passed to subsequent `NodeStageVolume` or
  /// `NodePublishVolume` calls.
  #[inline]
  pub fn publish_context(&self) -> &HashMap<String, String> {
    &self.publish_context
  }

  #[inline]
  pub fn into_publish_context(self) -> HashMap<String, String> {
    self.publish_context
  }
}

impl From<proto::ControllerPublishVolumeResponse> for ControllerPublishVolumeResponse {
  fn from(value: proto::ControllerPublishVolumeResponse) -> Self {
    ControllerPublishVolumeResponse::new(value.publish_context)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn requires_a_node_id() {
    let request =
      ControllerPublishVolumeRequest::new("bk-1", "", VolumeCapability::block_multi_writer());
    let err = proto::ControllerPublishVolumeRequest::try_from(request).unwrap_err();

    assert_eq!(err.code(), tonic::Code::InvalidArgument);
  }

  #[test]
  fn forwards_volume_context() {
    let mut context = HashMap::new();
    context.insert("pool".to_owned(), "fast".to_owned());
    let request =
      ControllerPublishVolumeRequest::new("bk-1", "node-a", VolumeCapability::block_multi_writer())
        .with_volume_context(context.clone());
    let proto = proto::ControllerPublishVolumeRequest::try_from(request).unwrap();

    assert_eq!(proto.volume_context, context);
    assert!(!proto.readonly);
    assert!(proto.volume_capability.is_some());
  }
}
