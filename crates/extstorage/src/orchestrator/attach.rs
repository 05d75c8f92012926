use super::{create_dir, Orchestrator};
use crate::{request::VolumeRequest, Error, Result};
use csi_proto::{
  controller::{ControllerPublishVolumeRequest, VolumeCapability},
  node::{NodePublishVolumeRequest, NodeStageVolumeRequest},
  NodeCapabilities, Plugin,
};
use csi_volume_store::MetadataStore;
use std::{collections::HashMap, path::PathBuf};
use tokio::fs;
use tracing::{debug, info, instrument};

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// Makes the volume available on this node and returns its device.
  ///
  /// Every step is idempotent on the plugin side, so attaching an
  /// attached volume yields the same path again.
  #[instrument(
    name = "orchestrator.attach",
    skip(self, request),
    fields(volume = %request.name(), open_exclusive = request.open_exclusive())
  )]
  pub(super) async fn attach(&self, request: &VolumeRequest) -> Result<PathBuf> {
    let name = request.name();
    let record = self.lookup(name).await?;
    let paths = self.paths(request);

    let publish_context = if self.capabilities.controller_publish() {
      let node_id = self.node_id(name).await?;
      let response = self
        .plugin
        .controller_publish_volume(
          ControllerPublishVolumeRequest::new(
            &record.volume_id,
            &node_id,
            VolumeCapability::block_multi_writer(),
          )
          .with_volume_context(record.volume_context.clone()),
        )
        .await
        .map_err(Error::rpc("ControllerPublishVolume", name))?;
      debug!(node_id = %node_id, "controller published volume");
      response.into_publish_context()
    } else {
      HashMap::new()
    };

    let node = self.node_capabilities(name).await?;
    create_dir(paths.volume_dir()).await?;

    let staged = node.contains(NodeCapabilities::STAGE_UNSTAGE_VOLUME);
    if staged {
      create_dir(paths.staging()).await?;
      self
        .plugin
        .node_stage_volume(
          NodeStageVolumeRequest::new(
            &record.volume_id,
            paths.staging(),
            VolumeCapability::block_multi_writer(),
          )
          .with_publish_context(publish_context.clone())
          .with_volume_context(record.volume_context.clone()),
        )
        .await
        .map_err(Error::rpc("NodeStageVolume", name))?;
    }

    let mut publish = NodePublishVolumeRequest::new(
      &record.volume_id,
      paths.device(),
      VolumeCapability::block_multi_writer(),
    )
    .with_publish_context(publish_context)
    .with_volume_context(record.volume_context);
    if staged {
      publish = publish.with_staging_target_path(paths.staging());
    }
    self
      .plugin
      .node_publish_volume(publish)
      .await
      .map_err(Error::rpc("NodePublishVolume", name))?;

    let device = fs::canonicalize(paths.device())
      .await
      .map_err(Error::io("resolve device", paths.device()))?;
    info!(device = %device.display(), "volume attached");
    Ok(device)
  }
}
