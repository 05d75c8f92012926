use bitflags::bitflags;

use crate::proto;

#[rustfmt::skip]
bitflags! {
  pub struct ControllerCapabilities: u32 {
    const CREATE_DELETE_VOLUME         = 0b_0000_0000_0000_0001;
    const PUBLISH_UNPUBLISH_VOLUME     = 0b_0000_0000_0000_0010;
    const LIST_VOLUMES                 = 0b_0000_0000_0000_0100;
    const GET_CAPACITY                 = 0b_0000_0000_0000_1000;
    const CREATE_DELETE_SNAPSHOT       = 0b_0000_0000_0001_0000;
    const LIST_SNAPSHOTS               = 0b_0000_0000_0010_0000;
    const CLONE_VOLUME                 = 0b_0000_0000_0100_0000;

    /// Indicates the SP supports ControllerPublishVolume.readonly
    /// field.
    const PUBLISH_READONLY             = 0b_0000_0000_1000_0000;

    /// See VolumeExpansion for details.
    const EXPAND_VOLUME                = 0b_0000_0001_0000_0000;
    const LIST_VOLUMES_PUBLISHED_NODES = 0b_0000_0010_0000_0000;
    const VOLUME_CONDITION             = 0b_0000_0100_0000_0000;
    const GET_VOLUME                   = 0b_0000_1000_0000_0000;
  }
}

use proto::controller_service_capability::rpc::Type;

impl ControllerCapabilities {
  fn from_rpc_type(value: Type) -> Self {
    match value {
      Type::Unknown => ControllerCapabilities::empty(),
      Type::CreateDeleteVolume => ControllerCapabilities::CREATE_DELETE_VOLUME,
      Type::PublishUnpublishVolume => ControllerCapabilities::PUBLISH_UNPUBLISH_VOLUME,
      Type::ListVolumes => ControllerCapabilities::LIST_VOLUMES,
      Type::GetCapacity => ControllerCapabilities::GET_CAPACITY,
      Type::CreateDeleteSnapshot => ControllerCapabilities::CREATE_DELETE_SNAPSHOT,
      Type::ListSnapshots => ControllerCapabilities::LIST_SNAPSHOTS,
      Type::CloneVolume => ControllerCapabilities::CLONE_VOLUME,
      Type::PublishReadonly => ControllerCapabilities::PUBLISH_READONLY,
      Type::ExpandVolume => ControllerCapabilities::EXPAND_VOLUME,
      Type::ListVolumesPublishedNodes => ControllerCapabilities::LIST_VOLUMES_PUBLISHED_NODES,
      Type::VolumeCondition => ControllerCapabilities::VOLUME_CONDITION,
      Type::GetVolume => ControllerCapabilities::GET_VOLUME,
    }
  }
}

impl From<proto::ControllerGetCapabilitiesResponse> for ControllerCapabilities {
  fn from(value: proto::ControllerGetCapabilitiesResponse) -> Self {
    value
      .capabilities
      .into_iter()
      .filter_map(|c| match c.r#type {
        Some(proto::controller_service_capability::Type::Rpc(rpc)) => Type::from_i32(rpc.r#type),
        None => None,
      })
      .fold(ControllerCapabilities::empty(), |caps, t| {
        caps | ControllerCapabilities::from_rpc_type(t)
      })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn rpc(t: Type) -> proto::ControllerServiceCapability {
    proto::ControllerServiceCapability {
      r#type: Some(proto::controller_service_capability::Type::Rpc(
        proto::controller_service_capability::Rpc { r#type: t as i32 },
      )),
    }
  }

  #[test]
  fn decodes_rpc_capabilities() {
    let response = proto::ControllerGetCapabilitiesResponse {
      capabilities: vec![
        rpc(Type::CreateDeleteVolume),
        rpc(Type::PublishUnpublishVolume),
        rpc(Type::ExpandVolume),
      ],
    };

    assert_eq!(
      ControllerCapabilities::from(response),
      ControllerCapabilities::CREATE_DELETE_VOLUME
        | ControllerCapabilities::PUBLISH_UNPUBLISH_VOLUME
        | ControllerCapabilities::EXPAND_VOLUME
    );
  }

  #[test]
  fn ignores_unknown_rpc_types() {
    let response = proto::ControllerGetCapabilitiesResponse {
      capabilities: vec![
        proto::ControllerServiceCapability { r#type: None },
        proto::ControllerServiceCapability {
          r#type: Some(proto::controller_service_capability::Type::Rpc(
            proto::controller_service_capability::Rpc { r#type: 999 },
          )),
        },
      ],
    };

    assert!(ControllerCapabilities::from(response).is_empty());
  }
}
