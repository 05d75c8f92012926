use super::Orchestrator;
use crate::{request::VolumeRequest, Result};
use csi_proto::Plugin;
use csi_volume_store::MetadataStore;
use tracing::{debug, instrument};

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// Succeeds when the volume has a record. Issues no RPCs.
  #[instrument(
    name = "orchestrator.verify",
    skip(self, request),
    fields(volume = %request.name())
  )]
  pub(super) async fn verify(&self, request: &VolumeRequest) -> Result<()> {
    let record = self.lookup(request.name()).await?;
    debug!(volume_id = %record.volume_id, "volume is known");
    Ok(())
  }
}
