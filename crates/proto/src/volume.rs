use std::{collections::HashMap, convert::TryFrom, num::NonZeroU64};

use crate::proto;

pub type Topology = HashMap<String, String>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Volume {
  capacity_bytes: Option<NonZeroU64>,
  volume_id: String,
  volume_context: HashMap<String, String>,
}

impl Volume {
  pub fn new(volume_id: impl Into<String>) -> Self {
    Volume {
      capacity_bytes: None,
      volume_id: volume_id.into(),
      volume_context: HashMap::new(),
    }
  }

  pub fn with_capacity_bytes(mut self, capacity_bytes: u64) -> Self {
    self.capacity_bytes = NonZeroU64::new(capacity_bytes);
    self
  }

  pub fn with_volume_context(mut self, volume_context: HashMap<String, String>) -> Self {
    self.volume_context = volume_context;
    self
  }

  /// The capacity of the volume in bytes. `None` means the capacity
  /// is unknown.
  #[inline]
  pub fn capacity_bytes(&self) -> Option<u64> {
    self.capacity_bytes.map(NonZeroU64::get)
  }

  /// The identifier for this volume, generated by the plugin.
  /// It is used to refer to the volume in all subsequent calls.
  #[inline]
  pub fn volume_id(&self) -> &str {
    &self.volume_id
  }

  /// Opaque static properties of the volume. They must be passed back
  /// to the plugin on every later call that refers to this volume.
  #[inline]
  pub fn volume_context(&self) -> &HashMap<String, String> {
    &self.volume_context
  }

  #[inline]
  pub fn into_parts(self) -> (String, HashMap<String, String>, Option<u64>) {
    let capacity_bytes = self.capacity_bytes();
    (self.volume_id, self.volume_context, capacity_bytes)
  }
}

impl TryFrom<proto::Volume> for Volume {
  type Error = tonic::Status;

  fn try_from(value: proto::Volume) -> Result<Self, Self::Error> {
    let capacity_bytes = match value.capacity_bytes {
      v if v < 0 => {
        return Err(tonic::Status::internal(
          "Volume.capacity_bytes is negative",
        ))
      }
      v => NonZeroU64::new(v as u64),
    };

    let volume_id = match value.volume_id {
      v if v.is_empty() => return Err(tonic::Status::internal("Volume.volume_id is empty")),
      v => v,
    };

    Ok(Volume {
      capacity_bytes,
      volume_id,
      volume_context: value.volume_context,
    })
  }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumeCapability {
  access_mode: AccessMode,
  access_type: AccessType,
}

impl VolumeCapability {
  #[inline]
  pub fn new(access_type: AccessType, access_mode: AccessMode) -> Self {
    VolumeCapability {
      access_mode,
      access_type,
    }
  }

  /// Raw block access that may be published read/write on any number
  /// of nodes at once.
  #[inline]
  pub fn block_multi_writer() -> Self {
    Self::new(AccessType::Block, AccessMode::MultiNodeMultiWriter)
  }

  #[inline]
  pub fn access_mode(&self) -> &AccessMode {
    &self.access_mode
  }

  #[inline]
  pub fn access_type(&self) -> &AccessType {
    &self.access_type
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum AccessMode {
  Unknown,
  /// Can only be published once as read/write on a single node, at
  /// any given time.
  SingleNodeWriter,
  /// Can only be published once as readonly on a single node, at
  /// any given time.
  SingleNodeReaderOnly,
  /// Can be published as readonly at multiple nodes simultaneously.
  MultiNodeReaderOnly,
  /// Can be published at multiple nodes simultaneously. Only one of
  /// the node can be used as read/write. The rest will be readonly.
  MultiNodeSingleWriter,
  /// Can be published as read/write at multiple nodes
  /// simultaneously.
  MultiNodeMultiWriter,
}

impl From<AccessMode> for proto::volume_capability::AccessMode {
  fn from(value: AccessMode) -> Self {
    use proto::volume_capability::access_mode::Mode;

    let mode = match value {
      AccessMode::Unknown => Mode::Unknown,
      AccessMode::SingleNodeWriter => Mode::SingleNodeWriter,
      AccessMode::SingleNodeReaderOnly => Mode::SingleNodeReaderOnly,
      AccessMode::MultiNodeReaderOnly => Mode::MultiNodeReaderOnly,
      AccessMode::MultiNodeSingleWriter => Mode::MultiNodeSingleWriter,
      AccessMode::MultiNodeMultiWriter => Mode::MultiNodeMultiWriter,
    } as i32;

    proto::volume_capability::AccessMode { mode }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessType {
  /// Indicate that the volume will be accessed via the block device API.
  Block,
}

impl From<AccessType> for proto::volume_capability::AccessType {
  fn from(value: AccessType) -> Self {
    match value {
      AccessType::Block => {
        proto::volume_capability::AccessType::Block(proto::volume_capability::BlockVolume {})
      }
    }
  }
}

impl From<VolumeCapability> for proto::VolumeCapability {
  fn from(value: VolumeCapability) -> Self {
    proto::VolumeCapability {
      access_mode: Some(value.access_mode.into()),
      access_type: Some(value.access_type.into()),
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapacityRange {
  AtLeast(NonZeroU64),
  AtMost(NonZeroU64),
  /// Effectively AtLeast(.0) & AtMost(.1)
  Between(NonZeroU64, NonZeroU64),
}

impl CapacityRange {
  /// A range whose lower and upper bound are both `bytes`. Returns
  /// `None` for zero.
  #[inline]
  pub fn exact(bytes: u64) -> Option<Self> {
    NonZeroU64::new(bytes).map(|v| CapacityRange::Between(v, v))
  }

  #[inline]
  pub fn required_bytes(&self) -> Option<u64> {
    match self {
      CapacityRange::AtLeast(r) | CapacityRange::Between(r, _) => Some(r.get()),
      CapacityRange::AtMost(_) => None,
    }
  }

  #[inline]
  pub fn limit_bytes(&self) -> Option<u64> {
    match self {
      CapacityRange::AtMost(l) | CapacityRange::Between(_, l) => Some(l.get()),
      CapacityRange::AtLeast(_) => None,
    }
  }
}

impl TryFrom<CapacityRange> for proto::CapacityRange {
  type Error = tonic::Status;

  fn try_from(value: CapacityRange) -> Result<Self, Self::Error> {
    let required_bytes = match value.required_bytes() {
      None => 0,
      Some(v) => bytes_to_i64(v, "CapacityRange.required_bytes")?,
    };
    let limit_bytes = match value.limit_bytes() {
      None => 0,
      Some(v) => bytes_to_i64(v, "CapacityRange.limit_bytes")?,
    };

    Ok(proto::CapacityRange {
      required_bytes,
      limit_bytes,
    })
  }
}

pub(crate) fn bytes_to_i64(value: u64, field: &'static str) -> Result<i64, tonic::Status> {
  i64::try_from(value)
    .map_err(|_| tonic::Status::invalid_argument(format!("{} is out of range", field)))
}
