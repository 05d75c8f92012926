use crate::{validate_name, MetadataStore, Result, StoreError, VolumeRecord};
use async_trait::async_trait;
use std::{
  io,
  path::{Path, PathBuf},
  sync::atomic::{AtomicBool, Ordering},
};
use tokio::{
  fs::{self, DirBuilder, OpenOptions},
  io::AsyncWriteExt,
};
use tracing::{debug, instrument, warn};

const DIR_MODE: u32 = 0o750;
const FILE_MODE: u32 = 0o640;

/// Records as JSON files, one per volume, under a base directory.
///
/// Files are created with `O_EXCL`, which closes the create race on a
/// local filesystem but not on network filesystems, and a crash while
/// writing leaves a truncated record behind. Use it for development and
/// tests; production deployments want [`EtcdStore`](crate::EtcdStore).
#[derive(Debug)]
pub struct FileStore {
  base: PathBuf,
  closed: AtomicBool,
}

impl FileStore {
  /// Opens the store, creating `base` if needed.
  pub async fn open(base: impl Into<PathBuf>) -> Result<Self> {
    let base = base.into();
    DirBuilder::new()
      .recursive(true)
      .mode(DIR_MODE)
      .create(&base)
      .await
      .map_err(|source| StoreError::Io {
        path: base.clone(),
        source,
      })?;

    Ok(FileStore {
      base,
      closed: AtomicBool::new(false),
    })
  }

  #[inline]
  pub fn base(&self) -> &Path {
    &self.base
  }

  fn path(&self, name: &str) -> Result<PathBuf> {
    if self.closed.load(Ordering::Acquire) {
      return Err(StoreError::Closed);
    }

    validate_name(name)?;
    Ok(self.base.join(name))
  }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> StoreError + '_ {
  move |source| StoreError::Io {
    path: path.to_owned(),
    source,
  }
}

#[async_trait]
impl MetadataStore for FileStore {
  #[instrument(name = "file.add", skip(self, record))]
  async fn add(&self, name: &str, record: &VolumeRecord) -> Result<()> {
    let path = self.path(name)?;
    let data = record.encode()?;

    let mut file = match OpenOptions::new()
      .write(true)
      .create_new(true)
      .mode(FILE_MODE)
      .open(&path)
      .await
    {
      Ok(file) => file,
      Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
        return Err(StoreError::AlreadyExists(name.to_owned()))
      }
      Err(e) => return Err(io_error(&path)(e)),
    };

    let written = match file.write_all(&data).await {
      Ok(()) => file.sync_all().await,
      Err(e) => Err(e),
    };

    if let Err(e) = written {
      // a partial record would make the name unusable
      if let Err(cleanup) = fs::remove_file(&path).await {
        warn!(error = %cleanup, "failed to remove partial volume record");
      }
      return Err(io_error(&path)(e));
    }

    debug!(path = %path.display(), "volume record stored");
    Ok(())
  }

  #[instrument(name = "file.get", skip(self))]
  async fn get(&self, name: &str) -> Result<Option<VolumeRecord>> {
    let path = self.path(name)?;

    match fs::read(&path).await {
      Ok(data) => VolumeRecord::decode(name, &data).map(Some),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(io_error(&path)(e)),
    }
  }

  #[instrument(name = "file.remove", skip(self))]
  async fn remove(&self, name: &str) -> Result<()> {
    let path = self.path(name)?;

    match fs::remove_file(&path).await {
      Err(e) if e.kind() != io::ErrorKind::NotFound => Err(io_error(&path)(e)),
      _ => Ok(()),
    }
  }

  async fn close(&self) -> Result<()> {
    match self.closed.swap(true, Ordering::AcqRel) {
      false => Ok(()),
      true => Err(StoreError::Closed),
    }
  }
}
