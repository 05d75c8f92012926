use super::Orchestrator;
use crate::{request::VolumeRequest, Error, Result, Verb};
use csi_proto::{controller::DeleteVolumeRequest, Plugin};
use csi_volume_store::MetadataStore;
use tracing::{info, instrument};

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// Deletes the plugin volume, then forgets it. A failed DeleteVolume
  /// leaves the record in place so the remove can be retried.
  #[instrument(
    name = "orchestrator.remove",
    skip(self, request),
    fields(volume = %request.name())
  )]
  pub(super) async fn remove(&self, request: &VolumeRequest) -> Result<()> {
    let name = request.name();
    let record = self.lookup(name).await?;
    self.require_controller(Verb::Remove)?;

    self
      .plugin
      .delete_volume(DeleteVolumeRequest::new(&record.volume_id))
      .await
      .map_err(Error::rpc("DeleteVolume", name))?;
    info!(volume_id = %record.volume_id, "plugin deleted volume");

    self
      .store
      .remove(name)
      .await
      .map_err(Error::store("remove", name))
  }
}
