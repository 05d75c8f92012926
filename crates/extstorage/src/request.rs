use crate::{Error, Result};
use std::{fmt, str::FromStr};

const MEBIBYTE: u64 = 1 << 20;

/// The seven extstorage verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
  Create,
  Attach,
  Detach,
  Remove,
  Grow,
  Setinfo,
  Verify,
}

impl Verb {
  pub fn as_str(&self) -> &'static str {
    match self {
      Verb::Create => "create",
      Verb::Attach => "attach",
      Verb::Detach => "detach",
      Verb::Remove => "remove",
      Verb::Grow => "grow",
      Verb::Setinfo => "setinfo",
      Verb::Verify => "verify",
    }
  }
}

impl FromStr for Verb {
  type Err = Error;

  fn from_str(s: &str) -> Result<Self> {
    Ok(match s {
      "create" => Verb::Create,
      "attach" => Verb::Attach,
      "detach" => Verb::Detach,
      "remove" => Verb::Remove,
      "grow" => Verb::Grow,
      "setinfo" => Verb::Setinfo,
      "verify" => Verb::Verify,
      other => return Err(Error::InvalidVerb(other.to_owned())),
    })
  }
}

impl fmt::Display for Verb {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// One volume descriptor, as handed over by the extstorage caller.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VolumeRequest {
  name: String,
  size_mib: Option<u64>,
  new_size_mib: Option<u64>,
  metadata: Option<String>,
  display_name: Option<String>,
  uuid: Option<String>,
  open_exclusive: bool,
  snapshot_name: Option<String>,
  snapshot_size_mib: Option<u64>,
}

impl VolumeRequest {
  pub fn new(name: impl Into<String>) -> Self {
    VolumeRequest {
      name: name.into(),
      ..Default::default()
    }
  }

  pub fn with_size_mib(mut self, size_mib: u64) -> Self {
    self.size_mib = Some(size_mib);
    self
  }

  pub fn with_new_size_mib(mut self, new_size_mib: u64) -> Self {
    self.new_size_mib = Some(new_size_mib);
    self
  }

  pub fn with_metadata(mut self, metadata: impl Into<String>) -> Self {
    self.metadata = Some(metadata.into());
    self
  }

  pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
    self.display_name = Some(display_name.into());
    self
  }

  pub fn with_uuid(mut self, uuid: impl Into<String>) -> Self {
    self.uuid = Some(uuid.into());
    self
  }

  pub fn with_open_exclusive(mut self, open_exclusive: bool) -> Self {
    self.open_exclusive = open_exclusive;
    self
  }

  pub fn with_snapshot(mut self, name: impl Into<String>, size_mib: Option<u64>) -> Self {
    self.snapshot_name = Some(name.into());
    self.snapshot_size_mib = size_mib;
    self
  }

  /// The stable identity: store key, CSI volume name and directory name.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }

  #[inline]
  pub fn size_mib(&self) -> Option<u64> {
    self.size_mib
  }

  #[inline]
  pub fn new_size_mib(&self) -> Option<u64> {
    self.new_size_mib
  }

  #[inline]
  pub fn metadata(&self) -> Option<&str> {
    self.metadata.as_deref()
  }

  #[inline]
  pub fn display_name(&self) -> Option<&str> {
    self.display_name.as_deref()
  }

  #[inline]
  pub fn uuid(&self) -> Option<&str> {
    self.uuid.as_deref()
  }

  /// Whether the caller wants exclusive access. Advisory: the caller
  /// arbitrates write access, volumes are always multi-writer.
  #[inline]
  pub fn open_exclusive(&self) -> bool {
    self.open_exclusive
  }

  #[inline]
  pub fn snapshot_name(&self) -> Option<&str> {
    self.snapshot_name.as_deref()
  }

  #[inline]
  pub fn snapshot_size_mib(&self) -> Option<u64> {
    self.snapshot_size_mib
  }

  /// The requested size in bytes, as needed by create.
  pub fn size_bytes(&self) -> Result<u64> {
    mib_to_bytes(self.size_mib, "VOL_SIZE")
  }

  /// The requested new size in bytes, as needed by grow.
  pub fn new_size_bytes(&self) -> Result<u64> {
    mib_to_bytes(self.new_size_mib, "VOL_NEW_SIZE")
  }

  /// Checks the fields `verb` depends on, before any I/O happens.
  /// Setinfo touches nothing and accepts any request.
  pub fn validate_for(&self, verb: Verb) -> Result<()> {
    if verb == Verb::Setinfo {
      return Ok(());
    }

    csi_volume_store::validate_name(&self.name)
      .map_err(|_| Error::InvalidRequest(format!("VOL_NAME {:?} is not a valid name", self.name)))?;

    match verb {
      Verb::Create => self.size_bytes().map(drop),
      Verb::Grow => self.new_size_bytes().map(drop),
      _ => Ok(()),
    }
  }
}

fn mib_to_bytes(mib: Option<u64>, field: &str) -> Result<u64> {
  match mib {
    None | Some(0) => Err(Error::InvalidRequest(format!(
      "{} must be a positive number of MiB",
      field
    ))),
    Some(v) => v
      .checked_mul(MEBIBYTE)
      .filter(|b| *b <= i64::MAX as u64)
      .ok_or_else(|| Error::InvalidRequest(format!("{} of {} MiB is too large", field, v))),
  }
}
