use crate::{Error, Result};
use csi_proto::{ControllerCapabilities, Plugin, VolumeExpansionSupport};
use tracing::{debug, info, instrument};

/// What the plugin can do, decided once per invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginCapabilitySet {
  controller_service: bool,
  controller: ControllerCapabilities,
  volume_expansion: VolumeExpansionSupport,
}

impl PluginCapabilitySet {
  pub fn new(
    controller_service: bool,
    controller: ControllerCapabilities,
    volume_expansion: VolumeExpansionSupport,
  ) -> Self {
    PluginCapabilitySet {
      controller_service,
      controller: if controller_service {
        controller
      } else {
        ControllerCapabilities::empty()
      },
      volume_expansion,
    }
  }

  #[inline]
  pub fn controller_service(&self) -> bool {
    self.controller_service
  }

  /// Whether attach and detach go through ControllerPublishVolume and
  /// ControllerUnpublishVolume.
  #[inline]
  pub fn controller_publish(&self) -> bool {
    self
      .controller
      .contains(ControllerCapabilities::PUBLISH_UNPUBLISH_VOLUME)
  }

  #[inline]
  pub fn controller(&self) -> ControllerCapabilities {
    self.controller
  }

  #[inline]
  pub fn volume_expansion(&self) -> VolumeExpansionSupport {
    self.volume_expansion
  }
}

/// Asks the plugin who it is and what it supports.
///
/// Fails when the plugin declares volume accessibility constraints,
/// since every volume is assumed reachable from every node, or when it
/// cannot expand volumes at all.
#[instrument(name = "negotiate", skip(plugin))]
pub async fn negotiate<P: Plugin + ?Sized>(plugin: &P) -> Result<PluginCapabilitySet> {
  let plugin_info = plugin
    .get_plugin_info()
    .await
    .map_err(Error::negotiation("GetPluginInfo"))?;
  info!(
    name = plugin_info.name(),
    vendor_version = plugin_info.vendor_version(),
    manifest = ?plugin_info.manifest(),
    "connected to CSI plugin"
  );

  let caps = plugin
    .get_plugin_capabilities()
    .await
    .map_err(Error::negotiation("GetPluginCapabilities"))?;

  if caps.volume_accessibility_constraints() {
    return Err(Error::CapabilityMismatch(
      "plugin declares VOLUME_ACCESSIBILITY_CONSTRAINTS, which is not supported".to_owned(),
    ));
  }

  if caps.volume_expansion() == VolumeExpansionSupport::None {
    return Err(Error::CapabilityMismatch(
      "plugin supports neither online nor offline volume expansion".to_owned(),
    ));
  }

  let controller = if caps.controller_service() {
    plugin
      .controller_get_capabilities()
      .await
      .map_err(Error::negotiation("ControllerGetCapabilities"))?
  } else {
    ControllerCapabilities::empty()
  };

  let set = PluginCapabilitySet::new(caps.controller_service(), controller, caps.volume_expansion());
  debug!(
    controller_service = set.controller_service(),
    controller_publish = set.controller_publish(),
    volume_expansion = ?set.volume_expansion(),
    "negotiated plugin capabilities"
  );
  Ok(set)
}

#[cfg(test)]
mod tests {
  use super::*;
  use csi_proto::{FakePlugin, PluginCapability};

  #[tokio::test]
  async fn controller_plugin() {
    let plugin = FakePlugin::new().with_controller_capabilities(
      ControllerCapabilities::CREATE_DELETE_VOLUME
        | ControllerCapabilities::PUBLISH_UNPUBLISH_VOLUME,
    );

    let set = negotiate(&plugin).await.unwrap();

    assert!(set.controller_service());
    assert!(set.controller_publish());
    assert_eq!(set.volume_expansion(), VolumeExpansionSupport::Online);
    assert_eq!(
      plugin.get_methods(),
      vec![
        "GetPluginInfo",
        "GetPluginCapabilities",
        "ControllerGetCapabilities"
      ]
    );
  }

  #[tokio::test]
  async fn node_only_plugin_skips_controller_query() {
    let plugin = FakePlugin::new()
      .with_plugin_capabilities(vec![PluginCapability::VolumeExpansion(
        VolumeExpansionSupport::Offline,
      )])
      .with_controller_capabilities(ControllerCapabilities::PUBLISH_UNPUBLISH_VOLUME);

    let set = negotiate(&plugin).await.unwrap();

    assert!(!set.controller_service());
    assert!(!set.controller_publish());
    assert_eq!(plugin.get_methods(), vec!["GetPluginInfo", "GetPluginCapabilities"]);
  }

  #[tokio::test]
  async fn accessibility_constraints_are_fatal() {
    let plugin = FakePlugin::new().with_plugin_capabilities(vec![
      PluginCapability::ControllerService,
      PluginCapability::VolumeAccessibilityConstraints,
      PluginCapability::VolumeExpansion(VolumeExpansionSupport::Online),
    ]);

    let err = negotiate(&plugin).await.unwrap_err();
    assert!(matches!(err, Error::CapabilityMismatch(_)));
  }

  #[tokio::test]
  async fn volume_expansion_is_required() {
    let plugin =
      FakePlugin::new().with_plugin_capabilities(vec![PluginCapability::ControllerService]);

    let err = negotiate(&plugin).await.unwrap_err();
    assert!(matches!(err, Error::CapabilityMismatch(_)));
  }

  #[tokio::test]
  async fn query_failures_are_fatal() {
    let plugin = FakePlugin::new();
    plugin.fail_on(
      "GetPluginCapabilities",
      tonic::Status::unavailable("starting"),
    );

    let err = negotiate(&plugin).await.unwrap_err();
    assert!(matches!(err, Error::Negotiation { step: "GetPluginCapabilities", .. }));
  }
}
