use super::Orchestrator;
use crate::{request::VolumeRequest, Result};
use csi_proto::Plugin;
use csi_volume_store::MetadataStore;
use tracing::{debug, instrument};

impl<P: Plugin, S: MetadataStore> Orchestrator<P, S> {
  /// CSI has no notion of per-volume metadata, so this only logs.
  #[instrument(
    name = "orchestrator.setinfo",
    skip(self, request),
    fields(volume = %request.name())
  )]
  pub(super) async fn setinfo(&self, request: &VolumeRequest) -> Result<()> {
    debug!(metadata = ?request.metadata(), "ignoring volume metadata");
    Ok(())
  }
}
