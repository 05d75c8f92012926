use crate::{
  controller::{
    ControllerCapabilities, ControllerExpandVolumeRequest, ControllerExpandVolumeResponse,
    ControllerPublishVolumeRequest, ControllerPublishVolumeResponse,
    ControllerUnpublishVolumeRequest, CreateVolumeRequest, DeleteVolumeRequest, Volume,
  },
  node::{
    NodeCapabilities, NodeExpandVolumeRequest, NodeExpandVolumeResponse, NodeGetInfoResponse,
    NodePublishVolumeRequest, NodeStageVolumeRequest, NodeUnpublishVolumeRequest,
    NodeUnstageVolumeRequest,
  },
  proto::{
    self, controller_client::ControllerClient, identity_client::IdentityClient,
    node_client::NodeClient,
  },
  utils::{record_request, record_response},
  PluginCapabilities, PluginInfo,
};
use async_trait::async_trait;
use std::{
  convert::{TryFrom, TryInto},
  path::PathBuf,
};
use thiserror::Error;
use tokio::net::UnixStream;
use tonic::transport::{Channel, ClientTlsConfig, Endpoint, Uri};
use tower::service_fn;
use tracing::{debug, instrument};

/// The CSI RPCs a container orchestrator issues against a plugin.
///
/// Every method maps to exactly one RPC. Implementations must not retry.
#[async_trait]
pub trait Plugin: Send + Sync {
  async fn get_plugin_info(&self) -> Result<PluginInfo, tonic::Status>;

  async fn get_plugin_capabilities(&self) -> Result<PluginCapabilities, tonic::Status>;

  async fn controller_get_capabilities(&self) -> Result<ControllerCapabilities, tonic::Status>;

  async fn create_volume(&self, request: CreateVolumeRequest) -> Result<Volume, tonic::Status>;

  async fn delete_volume(&self, request: DeleteVolumeRequest) -> Result<(), tonic::Status>;

  async fn controller_publish_volume(
    &self,
    request: ControllerPublishVolumeRequest,
  ) -> Result<ControllerPublishVolumeResponse, tonic::Status>;

  async fn controller_unpublish_volume(
    &self,
    request: ControllerUnpublishVolumeRequest,
  ) -> Result<(), tonic::Status>;

  async fn controller_expand_volume(
    &self,
    request: ControllerExpandVolumeRequest,
  ) -> Result<ControllerExpandVolumeResponse, tonic::Status>;

  async fn node_get_capabilities(&self) -> Result<NodeCapabilities, tonic::Status>;

  async fn node_get_info(&self) -> Result<NodeGetInfoResponse, tonic::Status>;

  async fn node_stage_volume(&self, request: NodeStageVolumeRequest) -> Result<(), tonic::Status>;

  async fn node_unstage_volume(
    &self,
    request: NodeUnstageVolumeRequest,
  ) -> Result<(), tonic::Status>;

  async fn node_publish_volume(
    &self,
    request: NodePublishVolumeRequest,
  ) -> Result<(), tonic::Status>;

  async fn node_unpublish_volume(
    &self,
    request: NodeUnpublishVolumeRequest,
  ) -> Result<(), tonic::Status>;

  async fn node_expand_volume(
    &self,
    request: NodeExpandVolumeRequest,
  ) -> Result<NodeExpandVolumeResponse, tonic::Status>;
}

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum ConnectError {
  #[error("Invalid CSI endpoint {endpoint:?}: {message}")]
  InvalidEndpoint { endpoint: String, message: String },

  #[error("Invalid TLS settings for CSI endpoint {endpoint:?}")]
  Tls {
    endpoint: String,
    #[source]
    source: tonic::transport::Error,
  },

  #[error("Failed to connect to CSI endpoint {endpoint:?}")]
  Transport {
    endpoint: String,
    #[source]
    source: tonic::transport::Error,
  },
}

/// A [`Plugin`] talking gRPC to a CSI plugin process.
#[derive(Debug, Clone)]
pub struct GrpcPlugin {
  identity: IdentityClient<Channel>,
  controller: ControllerClient<Channel>,
  node: NodeClient<Channel>,
}

impl GrpcPlugin {
  /// Connects to `unix:///path/to/socket` over a Unix domain socket,
  /// or to any other endpoint tonic understands over TCP.
  pub async fn connect(endpoint: &str) -> Result<Self, ConnectError> {
    Self::connect_with_tls(endpoint, None).await
  }

  /// Like [`GrpcPlugin::connect`], wrapping either transport in TLS
  /// when `tls` is set. A Unix socket has no host name, so `tls` must
  /// carry the expected server name there.
  pub async fn connect_with_tls(
    endpoint: &str,
    tls: Option<ClientTlsConfig>,
  ) -> Result<Self, ConnectError> {
    let invalid = |message: String| ConnectError::InvalidEndpoint {
      endpoint: endpoint.to_owned(),
      message,
    };
    let transport = |source| ConnectError::Transport {
      endpoint: endpoint.to_owned(),
      source,
    };

    let socket = match endpoint.strip_prefix("unix://") {
      Some("") => return Err(invalid("socket path is empty".to_owned())),
      Some(path) => Some(PathBuf::from(path)),
      None => None,
    };

    let mut builder = match socket {
      // the authority is ignored by the connector
      Some(_) => Endpoint::from_static("http://[::]:50051"),
      None => Endpoint::from_shared(endpoint.to_owned()).map_err(|e| invalid(e.to_string()))?,
    };
    if let Some(tls) = tls {
      debug!("Using TLS towards CSI plugin");
      builder = builder
        .tls_config(tls)
        .map_err(|source| ConnectError::Tls {
          endpoint: endpoint.to_owned(),
          source,
        })?;
    }

    let channel = match socket {
      Some(path) => {
        debug!(socket = %path.display(), "Connecting to CSI plugin socket");
        builder
          .connect_with_connector(service_fn(move |_: Uri| UnixStream::connect(path.clone())))
          .await
      }
      None => builder.connect().await,
    }
    .map_err(transport)?;

    Ok(Self::from_channel(channel))
  }

  pub fn from_channel(channel: Channel) -> Self {
    GrpcPlugin {
      identity: IdentityClient::new(channel.clone()),
      controller: ControllerClient::new(channel.clone()),
      node: NodeClient::new(channel),
    }
  }
}

#[async_trait]
impl Plugin for GrpcPlugin {
  #[instrument(name = "identity.get_plugin_info", skip(self), fields(response))]
  async fn get_plugin_info(&self) -> Result<PluginInfo, tonic::Status> {
    let response = self
      .identity
      .clone()
      .get_plugin_info(proto::GetPluginInfoRequest {})
      .await?
      .into_inner();

    PluginInfo::try_from(response).map(record_response)
  }

  #[instrument(name = "identity.get_plugin_capabilities", skip(self), fields(response))]
  async fn get_plugin_capabilities(&self) -> Result<PluginCapabilities, tonic::Status> {
    let response = self
      .identity
      .clone()
      .get_plugin_capabilities(proto::GetPluginCapabilitiesRequest {})
      .await?
      .into_inner();

    Ok(record_response(PluginCapabilities::from(response)))
  }

  #[instrument(name = "controller.get_capabilities", skip(self), fields(response))]
  async fn controller_get_capabilities(&self) -> Result<ControllerCapabilities, tonic::Status> {
    let response = self
      .controller
      .clone()
      .controller_get_capabilities(proto::ControllerGetCapabilitiesRequest {})
      .await?
      .into_inner();

    Ok(record_response(ControllerCapabilities::from(response)))
  }

  #[instrument(name = "controller.create_volume", skip(self, request), fields(request, response))]
  async fn create_volume(&self, request: CreateVolumeRequest) -> Result<Volume, tonic::Status> {
    let request: proto::CreateVolumeRequest = record_request(request).try_into()?;
    let response = self.controller.clone().create_volume(request).await?;

    Volume::try_from(response.into_inner()).map(record_response)
  }

  #[instrument(name = "controller.delete_volume", skip(self, request), fields(request))]
  async fn delete_volume(&self, request: DeleteVolumeRequest) -> Result<(), tonic::Status> {
    let request: proto::DeleteVolumeRequest = record_request(request).try_into()?;
    self.controller.clone().delete_volume(request).await?;

    Ok(())
  }

  #[instrument(
    name = "controller.publish_volume",
    skip(self, request),
    fields(request, response)
  )]
  async fn controller_publish_volume(
    &self,
    request: ControllerPublishVolumeRequest,
  ) -> Result<ControllerPublishVolumeResponse, tonic::Status> {
    let request: proto::ControllerPublishVolumeRequest = record_request(request).try_into()?;
    let response = self
      .controller
      .clone()
      .controller_publish_volume(request)
      .await?;

    Ok(record_response(ControllerPublishVolumeResponse::from(
      response.into_inner(),
    )))
  }

  #[instrument(name = "controller.unpublish_volume", skip(self, request), fields(request))]
  async fn controller_unpublish_volume(
    &self,
    request: ControllerUnpublishVolumeRequest,
  ) -> Result<(), tonic::Status> {
    let request: proto::ControllerUnpublishVolumeRequest = record_request(request).try_into()?;
    self
      .controller
      .clone()
      .controller_unpublish_volume(request)
      .await?;

    Ok(())
  }

  #[instrument(
    name = "controller.expand_volume",
    skip(self, request),
    fields(request, response)
  )]
  async fn controller_expand_volume(
    &self,
    request: ControllerExpandVolumeRequest,
  ) -> Result<ControllerExpandVolumeResponse, tonic::Status> {
    let request: proto::ControllerExpandVolumeRequest = record_request(request).try_into()?;
    let response = self
      .controller
      .clone()
      .controller_expand_volume(request)
      .await?;

    ControllerExpandVolumeResponse::try_from(response.into_inner()).map(record_response)
  }

  #[instrument(name = "node.get_capabilities", skip(self), fields(response))]
  async fn node_get_capabilities(&self) -> Result<NodeCapabilities, tonic::Status> {
    let response = self
      .node
      .clone()
      .node_get_capabilities(proto::NodeGetCapabilitiesRequest {})
      .await?
      .into_inner();

    Ok(record_response(NodeCapabilities::from(response)))
  }

  #[instrument(name = "node.get_info", skip(self), fields(response))]
  async fn node_get_info(&self) -> Result<NodeGetInfoResponse, tonic::Status> {
    let response = self
      .node
      .clone()
      .node_get_info(proto::NodeGetInfoRequest {})
      .await?
      .into_inner();

    NodeGetInfoResponse::try_from(response).map(record_response)
  }

  #[instrument(name = "node.stage_volume", skip(self, request), fields(request))]
  async fn node_stage_volume(&self, request: NodeStageVolumeRequest) -> Result<(), tonic::Status> {
    let request: proto::NodeStageVolumeRequest = record_request(request).try_into()?;
    self.node.clone().node_stage_volume(request).await?;

    Ok(())
  }

  #[instrument(name = "node.unstage_volume", skip(self, request), fields(request))]
  async fn node_unstage_volume(
    &self,
    request: NodeUnstageVolumeRequest,
  ) -> Result<(), tonic::Status> {
    let request: proto::NodeUnstageVolumeRequest = record_request(request).try_into()?;
    self.node.clone().node_unstage_volume(request).await?;

    Ok(())
  }

  #[instrument(name = "node.publish_volume", skip(self, request), fields(request))]
  async fn node_publish_volume(
    &self,
    request: NodePublishVolumeRequest,
  ) -> Result<(), tonic::Status> {
    let request: proto::NodePublishVolumeRequest = record_request(request).try_into()?;
    self.node.clone().node_publish_volume(request).await?;

    Ok(())
  }

  #[instrument(name = "node.unpublish_volume", skip(self, request), fields(request))]
  async fn node_unpublish_volume(
    &self,
    request: NodeUnpublishVolumeRequest,
  ) -> Result<(), tonic::Status> {
    let request: proto::NodeUnpublishVolumeRequest = record_request(request).try_into()?;
    self.node.clone().node_unpublish_volume(request).await?;

    Ok(())
  }

  #[instrument(name = "node.expand_volume", skip(self, request), fields(request, response))]
  async fn node_expand_volume(
    &self,
    request: NodeExpandVolumeRequest,
  ) -> Result<NodeExpandVolumeResponse, tonic::Status> {
    let request: proto::NodeExpandVolumeRequest = record_request(request).try_into()?;
    let response = self.node.clone().node_expand_volume(request).await?;

    NodeExpandVolumeResponse::try_from(response.into_inner()).map(record_response)
  }
}
