use super::{remove_dir, Orchestrator};
use crate::{request::VolumeRequest, Error, Result};
use csi_proto::{
  controller::ControllerUnpublishVolumeRequest,
  node::{NodeUnpublishVolumeRequest, NodeUnstageVolumeRequest},
  NodeCapabilities, Plugin,
};
use csi_volume_store::MetadataStore;
use tracing::{info, instrument};

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// Reverses attach. Unpublishing a volume that is not published is
  /// left to the plugin, which treats it as success.
  #[instrument(
    name = "orchestrator.detach",
    skip(self, request),
    fields(volume = %request.name())
  )]
  pub(super) async fn detach(&self, request: &VolumeRequest) -> Result<()> {
    let name = request.name();
    let record = self.lookup(name).await?;
    let paths = self.paths(request);
    let node = self.node_capabilities(name).await?;

    self
      .plugin
      .node_unpublish_volume(NodeUnpublishVolumeRequest::new(
        &record.volume_id,
        paths.device(),
      ))
      .await
      .map_err(Error::rpc("NodeUnpublishVolume", name))?;

    if node.contains(NodeCapabilities::STAGE_UNSTAGE_VOLUME) {
      self
        .plugin
        .node_unstage_volume(NodeUnstageVolumeRequest::new(
          &record.volume_id,
          paths.staging(),
        ))
        .await
        .map_err(Error::rpc("NodeUnstageVolume", name))?;
      remove_dir(paths.staging()).await;
    }

    if self.capabilities.controller_publish() {
      let node_id = self.node_id(name).await?;
      self
        .plugin
        .controller_unpublish_volume(ControllerUnpublishVolumeRequest::new(
          &record.volume_id,
          node_id,
        ))
        .await
        .map_err(Error::rpc("ControllerUnpublishVolume", name))?;
    }

    remove_dir(paths.volume_dir()).await;
    info!("volume detached");
    Ok(())
  }
}
