use std::path::{Path, PathBuf};

pub const DEFAULT_STORAGE_ROOT: &str = "/srv/ganeti/ganeti-extstorage-csi";

/// Where a volume lives on the local node.
///
/// ```text
/// <root>/<name>/           volume directory
/// <root>/<name>/device     NodePublishVolume target
/// <root>/<name>/staging    NodeStageVolume target
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VolumePaths {
  volume_dir: PathBuf,
  device: PathBuf,
  staging: PathBuf,
}

impl VolumePaths {
  pub fn new(root: impl AsRef<Path>, name: &str) -> Self {
    let volume_dir = root.as_ref().join(name);
    let device = volume_dir.join("device");
    let staging = volume_dir.join("staging");

    VolumePaths {
      volume_dir,
      device,
      staging,
    }
  }

  #[inline]
  pub fn volume_dir(&self) -> &Path {
    &self.volume_dir
  }

  /// The block device node, once the volume is attached.
  #[inline]
  pub fn device(&self) -> &Path {
    &self.device
  }

  #[inline]
  pub fn staging(&self) -> &Path {
    &self.staging
  }
}
