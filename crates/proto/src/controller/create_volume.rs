use super::{CapacityRange, Volume, VolumeCapability};
use crate::{proto, utils::non_empty};
use std::{
  collections::HashMap,
  convert::{TryFrom, TryInto},
};

#[derive(Debug, Clone)]
pub struct CreateVolumeRequest {
  name: String,
  capacity_range: Option<CapacityRange>,
  volume_capabilities: Vec<VolumeCapability>,
  parameters: HashMap<String, String>,
}

impl CreateVolumeRequest {
  pub fn new(name: impl Into<String>, volume_capability: VolumeCapability) -> Self {
    CreateVolumeRequest {
      name: name.into(),
      capacity_range: None,
      volume_capabilities: vec![volume_capability],
      parameters: HashMap::new(),
    }
  }

  pub fn with_capacity_range(mut self, capacity_range: CapacityRange) -> Self {
    self.capacity_range = Some(capacity_range);
    self
  }

  pub fn with_parameter(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
    self.parameters.insert(key.into(), value.into());
    self
  }

  /// The suggested name for the storage space. This field is REQUIRED.
  /// It serves two purposes:
  /// 1) Idempotency - This name is generated by the CO to achieve
  ///    idempotency. The Plugin SHOULD ensure that multiple
  ///    `CreateVolume` calls for the same name do not result in more
  ///    than one piece of storage provisioned corresponding to that
  ///    name.
  /// 2) Suggested name - Some storage systems allow callers to specify
  ///    an identifier by which to refer to the newly provisioned
  ///    storage.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[inline]
  pub fn capacity_range(&self) -> Option<&CapacityRange> {
    self.capacity_range.as_ref()
  }

  /// The capabilities that the provisioned volume MUST have.
  #[inline]
  pub fn volume_capabilities(&self) -> &[VolumeCapability] {
    &self.volume_capabilities
  }

  #[inline]
  pub fn parameters(&self) -> &HashMap<String, String> {
    &self.parameters
  }
}

impl TryFrom<CreateVolumeRequest> for proto::CreateVolumeRequest {
  type Error = tonic::Status;

  fn try_from(value: CreateVolumeRequest) -> Result<Self, Self::Error> {
    let name = non_empty(value.name, "CreateVolumeRequest.name is empty")?;
    let capacity_range = value.capacity_range.map(TryInto::try_into).transpose()?;
    let volume_capabilities = match value.volume_capabilities {
      v if v.is_empty() => {
        return Err(tonic::Status::invalid_argument(
          "CreateVolumeRequest.volume_capabilities is empty",
        ))
      }
      v => v.into_iter().map(Into::into).collect(),
    };

    Ok(proto::CreateVolumeRequest {
      name,
      capacity_range,
      volume_capabilities,
      parameters: value.parameters,
      secrets: HashMap::new(),
      volume_content_source: None,
      accessibility_requirements: None,
    })
  }
}

impl TryFrom<proto::CreateVolumeResponse> for Volume {
  type Error = tonic::Status;

  fn try_from(value: proto::CreateVolumeResponse) -> Result<Self, Self::Error> {
    value
      .volume
      .ok_or_else(|| tonic::Status::internal("CreateVolumeResponse.volume is missing"))?
      .try_into()
  }
}
