use super::Orchestrator;
use crate::{request::VolumeRequest, Error, Result, Verb};
use csi_proto::{
  controller::{CapacityRange, ControllerExpandVolumeRequest, VolumeCapability},
  node::NodeExpandVolumeRequest,
  NodeCapabilities, Plugin,
};
use csi_volume_store::MetadataStore;
use tokio::fs;
use tracing::{debug, info, instrument};

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// Expands the volume on the controller, then on this node if the
  /// plugin can and the volume is attached here.
  #[instrument(
    name = "orchestrator.grow",
    skip(self, request),
    fields(volume = %request.name())
  )]
  pub(super) async fn grow(&self, request: &VolumeRequest) -> Result<()> {
    let name = request.name();
    let record = self.lookup(name).await?;
    self.require_controller(Verb::Grow)?;

    let new_size_bytes = request.new_size_bytes()?;
    let capacity_range = CapacityRange::exact(new_size_bytes)
      .ok_or_else(|| Error::InvalidRequest("VOL_NEW_SIZE must be positive".to_owned()))?;

    let response = self
      .plugin
      .controller_expand_volume(
        ControllerExpandVolumeRequest::new(&record.volume_id, capacity_range)
          .with_volume_capability(VolumeCapability::block_multi_writer()),
      )
      .await
      .map_err(Error::rpc("ControllerExpandVolume", name))?;
    info!(
      capacity_bytes = ?response.capacity_bytes(),
      node_expansion_required = response.node_expansion_required(),
      "controller expanded volume"
    );

    let node = self.node_capabilities(name).await?;
    let required = NodeCapabilities::STAGE_UNSTAGE_VOLUME | NodeCapabilities::EXPAND_VOLUME;
    if !node.contains(required) {
      debug!("plugin does not expand staged volumes on the node");
      return Ok(());
    }

    let paths = self.paths(request);
    if let Err(e) = fs::metadata(paths.device()).await {
      debug!(error = %e, "volume is not attached here, skipping node expansion");
      return Ok(());
    }

    let response = self
      .plugin
      .node_expand_volume(
        NodeExpandVolumeRequest::new(&record.volume_id, paths.device())
          .with_capacity_range(capacity_range)
          .with_staging_target_path(paths.staging())
          .with_volume_capability(VolumeCapability::block_multi_writer()),
      )
      .await
      .map_err(Error::rpc("NodeExpandVolume", name))?;
    info!(capacity_bytes = ?response.capacity_bytes(), "node expanded volume");
    Ok(())
  }
}
