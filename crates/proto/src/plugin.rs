use std::{collections::HashMap, convert::TryFrom, iter::FromIterator};

use crate::{proto, VolumeExpansionSupport};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginInfo {
  name: String,
  vendor_version: String,
  manifest: HashMap<String, String>,
}

impl PluginInfo {
  pub fn new(name: impl Into<String>, vendor_version: impl Into<String>) -> Self {
    PluginInfo {
      name: name.into(),
      vendor_version: vendor_version.into(),
      manifest: HashMap::new(),
    }
  }

  /// The plugin name, in domain name notation.
  #[inline]
  pub fn name(&self) -> &str {
    &self.name
  }

  /// Plugin version. Value of this field is opaque to the CO.
  #[inline]
  pub fn vendor_version(&self) -> &str {
    &self.vendor_version
  }

  #[inline]
  pub fn manifest(&self) -> &HashMap<String, String> {
    &self.manifest
  }
}

impl TryFrom<proto::GetPluginInfoResponse> for PluginInfo {
  type Error = tonic::Status;

  fn try_from(value: proto::GetPluginInfoResponse) -> Result<Self, Self::Error> {
    let name = match value.name {
      v if v.is_empty() => {
        return Err(tonic::Status::internal(
          "GetPluginInfoResponse.name is empty",
        ))
      }
      v => v,
    };

    Ok(PluginInfo {
      name,
      vendor_version: value.vendor_version,
      manifest: value.manifest,
    })
  }
}

/// A single entry of the plugin capability list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PluginCapability {
  ControllerService,
  VolumeAccessibilityConstraints,
  VolumeExpansion(VolumeExpansionSupport),
}

impl From<proto::PluginCapability> for Option<PluginCapability> {
  fn from(value: proto::PluginCapability) -> Self {
    use crate::proto::plugin_capability::{service, volume_expansion, Type};

    match value.r#type? {
      Type::Service(s) => match service::Type::from_i32(s.r#type)? {
        service::Type::ControllerService => Some(PluginCapability::ControllerService),
        service::Type::VolumeAccessibilityConstraints => {
          Some(PluginCapability::VolumeAccessibilityConstraints)
        }
        service::Type::Unknown => None,
      },
      Type::VolumeExpansion(e) => match volume_expansion::Type::from_i32(e.r#type)? {
        volume_expansion::Type::Online => Some(PluginCapability::VolumeExpansion(
          VolumeExpansionSupport::Online,
        )),
        volume_expansion::Type::Offline => Some(PluginCapability::VolumeExpansion(
          VolumeExpansionSupport::Offline,
        )),
        volume_expansion::Type::Unknown => None,
      },
    }
  }
}

/// The plugin capability list, decoded once into flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginCapabilities {
  controller_service: bool,
  volume_accessibility_constraints: bool,
  volume_expansion: VolumeExpansionSupport,
}

impl PluginCapabilities {
  /// Whether the plugin provides the controller service.
  #[inline]
  pub fn controller_service(&self) -> bool {
    self.controller_service
  }

  /// Whether volumes may not be equally accessible from all nodes.
  #[inline]
  pub fn volume_accessibility_constraints(&self) -> bool {
    self.volume_accessibility_constraints
  }

  #[inline]
  pub fn volume_expansion(&self) -> VolumeExpansionSupport {
    self.volume_expansion
  }
}

impl Default for PluginCapabilities {
  fn default() -> Self {
    PluginCapabilities {
      controller_service: false,
      volume_accessibility_constraints: false,
      volume_expansion: VolumeExpansionSupport::None,
    }
  }
}

impl FromIterator<PluginCapability> for PluginCapabilities {
  fn from_iter<I: IntoIterator<Item = PluginCapability>>(iter: I) -> Self {
    iter
      .into_iter()
      .fold(PluginCapabilities::default(), |mut caps, cap| {
        match cap {
          PluginCapability::ControllerService => caps.controller_service = true,
          PluginCapability::VolumeAccessibilityConstraints => {
            caps.volume_accessibility_constraints = true
          }
          // online expansion implies offline expansion
          PluginCapability::VolumeExpansion(support) => match (caps.volume_expansion, support) {
            (VolumeExpansionSupport::Online, _) => (),
            (_, support) => caps.volume_expansion = support,
          },
        }
        caps
      })
  }
}

impl From<proto::GetPluginCapabilitiesResponse> for PluginCapabilities {
  fn from(value: proto::GetPluginCapabilitiesResponse) -> Self {
    value
      .capabilities
      .into_iter()
      .filter_map(Option::<PluginCapability>::from)
      .collect()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::proto::plugin_capability::{service, volume_expansion, Service, Type, VolumeExpansion};
  use test_case::test_case;

  fn encode(cap: PluginCapability) -> proto::PluginCapability {
    let r#type = match cap {
      PluginCapability::ControllerService => Type::Service(Service {
        r#type: service::Type::ControllerService as i32,
      }),
      PluginCapability::VolumeAccessibilityConstraints => Type::Service(Service {
        r#type: service::Type::VolumeAccessibilityConstraints as i32,
      }),
      PluginCapability::VolumeExpansion(VolumeExpansionSupport::Online) => {
        Type::VolumeExpansion(VolumeExpansion {
          r#type: volume_expansion::Type::Online as i32,
        })
      }
      PluginCapability::VolumeExpansion(_) => Type::VolumeExpansion(VolumeExpansion {
        r#type: volume_expansion::Type::Offline as i32,
      }),
    };

    proto::PluginCapability {
      r#type: Some(r#type),
    }
  }

  #[test_case(&[] => (false, false, VolumeExpansionSupport::None) ; "empty")]
  #[test_case(&[PluginCapability::ControllerService] => (true, false, VolumeExpansionSupport::None) ; "controller only")]
  #[test_case(
    &[PluginCapability::VolumeExpansion(VolumeExpansionSupport::Online), PluginCapability::VolumeExpansion(VolumeExpansionSupport::Offline)]
    => (false, false, VolumeExpansionSupport::Online) ; "online wins over offline")]
  #[test_case(
    &[PluginCapability::ControllerService, PluginCapability::VolumeAccessibilityConstraints, PluginCapability::VolumeExpansion(VolumeExpansionSupport::Offline)]
    => (true, true, VolumeExpansionSupport::Offline) ; "everything")]
  fn decode_capabilities(caps: &[PluginCapability]) -> (bool, bool, VolumeExpansionSupport) {
    let response = proto::GetPluginCapabilitiesResponse {
      capabilities: caps.iter().copied().map(encode).collect(),
    };

    let decoded = PluginCapabilities::from(response);
    (
      decoded.controller_service(),
      decoded.volume_accessibility_constraints(),
      decoded.volume_expansion(),
    )
  }

  #[test]
  fn unknown_capabilities_are_skipped() {
    let response = proto::GetPluginCapabilitiesResponse {
      capabilities: vec![
        proto::PluginCapability { r#type: None },
        proto::PluginCapability {
          r#type: Some(proto::plugin_capability::Type::Service(
            proto::plugin_capability::Service { r#type: 42 },
          )),
        },
      ],
    };

    assert_eq!(
      PluginCapabilities::from(response),
      PluginCapabilities::default()
    );
  }

  #[test]
  fn plugin_info_requires_a_name() {
    let err = PluginInfo::try_from(proto::GetPluginInfoResponse::default()).unwrap_err();
    assert_eq!(err.code(), tonic::Code::Internal);
  }
}
