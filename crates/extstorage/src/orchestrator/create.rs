use super::Orchestrator;
use crate::{request::VolumeRequest, Error, Result, Verb};
use csi_proto::{
  controller::{CapacityRange, CreateVolumeRequest, VolumeCapability},
  Plugin,
};
use csi_volume_store::{MetadataStore, StoreError, VolumeRecord};
use tracing::{info, instrument, warn};

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// Provisions a block volume of the requested size and records it.
  ///
  /// Two concurrent creates may both reach the plugin. CreateVolume is
  /// idempotent by name there, and only one of them wins the record.
  #[instrument(
    name = "orchestrator.create",
    skip(self, request),
    fields(volume = %request.name())
  )]
  pub(super) async fn create(&self, request: &VolumeRequest) -> Result<()> {
    let name = request.name();
    if self.find(name).await?.is_some() {
      return Err(Error::VolumeExists(name.to_owned()));
    }

    self.require_controller(Verb::Create)?;

    let size_bytes = request.size_bytes()?;
    let capacity_range = CapacityRange::exact(size_bytes)
      .ok_or_else(|| Error::InvalidRequest("VOL_SIZE must be positive".to_owned()))?;
    let volume = self
      .plugin
      .create_volume(
        CreateVolumeRequest::new(name, VolumeCapability::block_multi_writer())
          .with_capacity_range(capacity_range),
      )
      .await
      .map_err(Error::rpc("CreateVolume", name))?;

    let (volume_id, volume_context, capacity_bytes) = volume.into_parts();
    info!(volume_id = %volume_id, ?capacity_bytes, "plugin created volume");

    let record = VolumeRecord {
      volume_id,
      volume_context,
      capacity_bytes,
    };
    match self.store.add(name, &record).await {
      Ok(()) => Ok(()),
      Err(StoreError::AlreadyExists(_)) => {
        warn!(volume_id = %record.volume_id, "lost the race to record the volume");
        Err(Error::VolumeExists(name.to_owned()))
      }
      Err(e) => Err(Error::store("add", name)(e)),
    }
  }
}
