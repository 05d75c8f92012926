mod attach;
mod create;
mod detach;
mod grow;
mod remove;
mod setinfo;
mod verify;

#[cfg(test)]
mod tests;

use crate::{
  capabilities::{negotiate, PluginCapabilitySet},
  paths::VolumePaths,
  request::{Verb, VolumeRequest},
  Error, Result,
};
use csi_proto::{NodeCapabilities, Plugin};
use csi_volume_store::{MetadataStore, VolumeRecord};
use std::{
  io,
  path::{Path, PathBuf},
};
use tokio::fs::{self, DirBuilder};
use tracing::{debug, warn};

const DIR_MODE: u32 = 0o750;

/// What a successful verb produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Done,
  /// The symlink-resolved block device of an attached volume.
  Attached(PathBuf),
}

/// Drives a CSI plugin through the RPC sequence of each extstorage verb,
/// keeping volume records in a [`MetadataStore`].
///
/// Holds no locks: concurrent invocations for the same volume are only
/// kept apart by the store's atomic `add`.
pub struct Orchestrator<P, S> {
  plugin: P,
  store: S,
  capabilities: PluginCapabilitySet,
  root: PathBuf,
}

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// Negotiates capabilities with `plugin`.
  pub async fn connect(plugin: P, store: S, root: impl Into<PathBuf>) -> Result<Self> {
    let capabilities = negotiate(&plugin).await?;
    Ok(Self::new(plugin, store, capabilities, root))
  }

  pub fn new(
    plugin: P,
    store: S,
    capabilities: PluginCapabilitySet,
    root: impl Into<PathBuf>,
  ) -> Self {
    Orchestrator {
      plugin,
      store,
      capabilities,
      root: root.into(),
    }
  }

  #[inline]
  pub fn plugin(&self) -> &P {
    &self.plugin
  }

  #[inline]
  pub fn store(&self) -> &S {
    &self.store
  }

  #[inline]
  pub fn capabilities(&self) -> &PluginCapabilitySet {
    &self.capabilities
  }

  #[inline]
  pub fn root(&self) -> &Path {
    &self.root
  }

  pub fn paths(&self, request: &VolumeRequest) -> VolumePaths {
    VolumePaths::new(&self.root, request.name())
  }

  /// Validates `request` for `verb` and runs it.
  pub async fn run(&self, verb: Verb, request: &VolumeRequest) -> Result<Outcome> {
    request.validate_for(verb)?;

    match verb {
      Verb::Create => self.create(request).await.map(|()| Outcome::Done),
      Verb::Attach => self.attach(request).await.map(Outcome::Attached),
      Verb::Detach => self.detach(request).await.map(|()| Outcome::Done),
      Verb::Remove => self.remove(request).await.map(|()| Outcome::Done),
      Verb::Grow => self.grow(request).await.map(|()| Outcome::Done),
      Verb::Setinfo => self.setinfo(request).await.map(|()| Outcome::Done),
      Verb::Verify => self.verify(request).await.map(|()| Outcome::Done),
    }
  }

  async fn find(&self, name: &str) -> Result<Option<VolumeRecord>> {
    self.store.get(name).await.map_err(Error::store("get", name))
  }

  async fn lookup(&self, name: &str) -> Result<VolumeRecord> {
    self
      .find(name)
      .await?
      .ok_or_else(|| Error::VolumeNotFound(name.to_owned()))
  }

  fn require_controller(&self, verb: Verb) -> Result<()> {
    match self.capabilities.controller_service() {
      true => Ok(()),
      false => Err(Error::CapabilityMismatch(format!(
        "{} needs the controller service, which the plugin does not provide",
        verb
      ))),
    }
  }

  async fn node_capabilities(&self, name: &str) -> Result<NodeCapabilities> {
    self
      .plugin
      .node_get_capabilities()
      .await
      .map_err(Error::rpc("NodeGetCapabilities", name))
  }

  /// The node id ControllerPublish and ControllerUnpublish refer to.
  async fn node_id(&self, name: &str) -> Result<String> {
    let info = self
      .plugin
      .node_get_info()
      .await
      .map_err(Error::rpc("NodeGetInfo", name))?;

    Ok(info.node_id().to_owned())
  }
}

async fn create_dir(path: &Path) -> Result<()> {
  DirBuilder::new()
    .recursive(true)
    .mode(DIR_MODE)
    .create(path)
    .await
    .map_err(Error::io("create directory", path))
}

/// Removal failures are logged, never returned.
async fn remove_dir(path: &Path) {
  match fs::remove_dir(path).await {
    Ok(()) => debug!(path = %path.display(), "removed directory"),
    Err(e) if e.kind() == io::ErrorKind::NotFound => {
      debug!(path = %path.display(), "directory already gone")
    }
    Err(e) => warn!(path = %path.display(), error = %e, "failed to remove directory"),
  }
}
