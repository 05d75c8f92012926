use bitflags::bitflags;

use crate::proto;

#[rustfmt::skip]
bitflags! {
  pub struct NodeCapabilities: u32 {
    const STAGE_UNSTAGE_VOLUME         = 0b_0000_0000_0000_0001;
    const GET_VOLUME_STATS             = 0b_0000_0000_0000_0010;
    const EXPAND_VOLUME                = 0b_0000_0000_0000_0100;
    const VOLUME_CONDITION             = 0b_0000_0000_0000_1000;
  }
}

use proto::node_service_capability::rpc::Type;

impl NodeCapabilities {
  fn from_rpc_type(value: Type) -> Self {
    match value {
      Type::Unknown => NodeCapabilities::empty(),
      Type::StageUnstageVolume => NodeCapabilities::STAGE_UNSTAGE_VOLUME,
      Type::GetVolumeStats => NodeCapabilities::GET_VOLUME_STATS,
      Type::ExpandVolume => NodeCapabilities::EXPAND_VOLUME,
      Type::VolumeCondition => NodeCapabilities::VOLUME_CONDITION,
    }
  }
}

impl From<proto::NodeGetCapabilitiesResponse> for NodeCapabilities {
  fn from(value: proto::NodeGetCapabilitiesResponse) -> Self {
    let mut caps = NodeCapabilities::empty();
    for cap in value.capabilities {
      if let Some(proto::node_service_capability::Type::Rpc(rpc)) = cap.r#type {
        if let Some(t) = Type::from_i32(rpc.r#type) {
          caps |= NodeCapabilities::from_rpc_type(t);
        }
      }
    }

    caps
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn decodes_stage_and_expand() {
    let rpc = |t: Type| proto::NodeServiceCapability {
      r#type: Some(proto::node_service_capability::Type::Rpc(
        proto::node_service_capability::Rpc { r#type: t as i32 },
      )),
    };
    let response = proto::NodeGetCapabilitiesResponse {
      capabilities: vec![rpc(Type::StageUnstageVolume), rpc(Type::ExpandVolume), rpc(Type::Unknown)],
    };

    assert_eq!(
      NodeCapabilities::from(response),
      NodeCapabilities::STAGE_UNSTAGE_VOLUME | NodeCapabilities::EXPAND_VOLUME
    );
  }
}
