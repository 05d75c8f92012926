use super::Topology;
use crate::proto;
use std::{convert::TryFrom, num::NonZeroU64};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeGetInfoResponse {
  node_id: String,
  max_volumes_per_node: Option<NonZeroU64>,
  accessible_topology: Option<Topology>,
}

impl NodeGetInfoResponse {
  pub fn new(node_id: impl Into<String>) -> Self {
    NodeGetInfoResponse {
      node_id: node_id.into(),
      max_volumes_per_node: None,
      accessible_topology: None,
    }
  }

  /// The identifier of the node as understood by the SP. It SHALL be
  /// used by the CO in subsequent calls, including
  /// `ControllerPublishVolume`, to refer to this node.
  #[inline]
  pub fn node_id(&self) -> &str {
    &self.node_id
  }

  #[inline]
  pub fn max_volumes_per_node(&self) -> Option<u64> {
    self.max_volumes_per_node.map(NonZeroU64::get)
  }

  #[inline]
  pub fn accessible_topology(&self) -> Option<&Topology> {
    self.accessible_topology.as_ref()
  }
}

impl TryFrom<proto::NodeGetInfoResponse> for NodeGetInfoResponse {
  type Error = tonic::Status;

  fn try_from(value: proto::NodeGetInfoResponse) -> Result<Self, Self::Error> {
    let node_id = match value.node_id {
      v if v.is_empty() => {
        return Err(tonic::Status::internal(
          "NodeGetInfoResponse.node_id is empty",
        ))
      }
      v => v,
    };

    let max_volumes_per_node = match value.max_volumes_per_node {
      v if v < 0 => {
        return Err(tonic::Status::internal(
          "NodeGetInfoResponse.max_volumes_per_node is negative",
        ))
      }
      v => NonZeroU64::new(v as u64),
    };

    Ok(NodeGetInfoResponse {
      node_id,
      max_volumes_per_node,
      accessible_topology: value.accessible_topology.map(|t| t.segments),
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use test_case::test_case;

  #[test_case("", 0 => None ; "missing node id")]
  #[test_case("node-a", -1 => None ; "negative limit")]
  #[test_case("node-a", 0 => Some(("node-a".to_owned(), None)) ; "no limit")]
  #[test_case("node-a", 16 => Some(("node-a".to_owned(), Some(16))) ; "with limit")]
  fn decode(node_id: &str, max_volumes_per_node: i64) -> Option<(String, Option<u64>)> {
    NodeGetInfoResponse::try_from(proto::NodeGetInfoResponse {
      node_id: node_id.to_owned(),
      max_volumes_per_node,
      accessible_topology: None,
    })
    .ok()
    .map(|r| (r.node_id().to_owned(), r.max_volumes_per_node()))
  }
}
