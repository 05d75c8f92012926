#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPluginInfoRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPluginInfoResponse {
  #[prost(string, tag = "1")]
  pub name: ::prost::alloc::string::String,
  #[prost(string, tag = "2")]
  pub vendor_version: ::prost::alloc::string::String,
  #[prost(map = "string, string", tag = "3")]
  pub manifest:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPluginCapabilitiesRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct GetPluginCapabilitiesResponse {
  #[prost(message, repeated, tag = "1")]
  pub capabilities: ::prost::alloc::vec::Vec<PluginCapability>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct PluginCapability {
  #[prost(oneof = "plugin_capability::Type", tags = "1, 2")]
  pub r#type: ::core::option::Option<plugin_capability::Type>,
}
pub mod plugin_capability {
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct Service {
    #[prost(enumeration = "service::Type", tag = "1")]
    pub r#type: i32,
  }
  pub mod service {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
      Unknown = 0,
      ControllerService = 1,
      VolumeAccessibilityConstraints = 2,
    }
  }
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct VolumeExpansion {
    #[prost(enumeration = "volume_expansion::Type", tag = "1")]
    pub r#type: i32,
  }
  pub mod volume_expansion {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
      Unknown = 0,
      Online = 1,
      Offline = 2,
    }
  }
  #[derive(Clone, PartialEq, ::prost::Oneof)]
  pub enum Type {
    #[prost(message, tag = "1")]
    Service(Service),
    #[prost(message, tag = "2")]
    VolumeExpansion(VolumeExpansion),
  }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateVolumeRequest {
  #[prost(string, tag = "1")]
  pub name: ::prost::alloc::string::String,
  #[prost(message, optional, tag = "2")]
  pub capacity_range: ::core::option::Option<CapacityRange>,
  #[prost(message, repeated, tag = "3")]
  pub volume_capabilities: ::prost::alloc::vec::Vec<VolumeCapability>,
  #[prost(map = "string, string", tag = "4")]
  pub parameters:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(map = "string, string", tag = "5")]
  pub secrets:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(message, optional, tag = "6")]
  pub volume_content_source: ::core::option::Option<VolumeContentSource>,
  #[prost(message, optional, tag = "7")]
  pub accessibility_requirements: ::core::option::Option<TopologyRequirement>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VolumeContentSource {
  #[prost(oneof = "volume_content_source::Type", tags = "1, 2")]
  pub r#type: ::core::option::Option<volume_content_source::Type>,
}
pub mod volume_content_source {
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct SnapshotSource {
    #[prost(string, tag = "1")]
    pub snapshot_id: ::prost::alloc::string::String,
  }
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct VolumeSource {
    #[prost(string, tag = "1")]
    pub volume_id: ::prost::alloc::string::String,
  }
  #[derive(Clone, PartialEq, ::prost::Oneof)]
  pub enum Type {
    #[prost(message, tag = "1")]
    Snapshot(SnapshotSource),
    #[prost(message, tag = "2")]
    Volume(VolumeSource),
  }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CreateVolumeResponse {
  #[prost(message, optional, tag = "1")]
  pub volume: ::core::option::Option<Volume>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct VolumeCapability {
  #[prost(message, optional, tag = "3")]
  pub access_mode: ::core::option::Option<volume_capability::AccessMode>,
  #[prost(oneof = "volume_capability::AccessType", tags = "1, 2")]
  pub access_type: ::core::option::Option<volume_capability::AccessType>,
}
pub mod volume_capability {
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct BlockVolume {}
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct MountVolume {
    #[prost(string, tag = "1")]
    pub fs_type: ::prost::alloc::string::String,
    #[prost(string, repeated, tag = "2")]
    pub mount_flags: ::prost::alloc::vec::Vec<::prost::alloc::string::String>,
  }
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct AccessMode {
    #[prost(enumeration = "access_mode::Mode", tag = "1")]
    pub mode: i32,
  }
  pub mod access_mode {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Mode {
      Unknown = 0,
      SingleNodeWriter = 1,
      SingleNodeReaderOnly = 2,
      MultiNodeReaderOnly = 3,
      MultiNodeSingleWriter = 4,
      MultiNodeMultiWriter = 5,
    }
  }
  #[derive(Clone, PartialEq, ::prost::Oneof)]
  pub enum AccessType {
    #[prost(message, tag = "1")]
    Block(BlockVolume),
    #[prost(message, tag = "2")]
    Mount(MountVolume),
  }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct CapacityRange {
  #[prost(int64, tag = "1")]
  pub required_bytes: i64,
  #[prost(int64, tag = "2")]
  pub limit_bytes: i64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Volume {
  #[prost(int64, tag = "1")]
  pub capacity_bytes: i64,
  #[prost(string, tag = "2")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(map = "string, string", tag = "3")]
  pub volume_context:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(message, optional, tag = "4")]
  pub content_source: ::core::option::Option<VolumeContentSource>,
  #[prost(message, repeated, tag = "5")]
  pub accessible_topology: ::prost::alloc::vec::Vec<Topology>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct TopologyRequirement {
  #[prost(message, repeated, tag = "1")]
  pub requisite: ::prost::alloc::vec::Vec<Topology>,
  #[prost(message, repeated, tag = "2")]
  pub preferred: ::prost::alloc::vec::Vec<Topology>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct Topology {
  #[prost(map = "string, string", tag = "1")]
  pub segments:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(map = "string, string", tag = "2")]
  pub secrets:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct DeleteVolumeResponse {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerPublishVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(string, tag = "2")]
  pub node_id: ::prost::alloc::string::String,
  #[prost(message, optional, tag = "3")]
  pub volume_capability: ::core::option::Option<VolumeCapability>,
  #[prost(bool, tag = "4")]
  pub readonly: bool,
  #[prost(map = "string, string", tag = "5")]
  pub secrets:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(map = "string, string", tag = "6")]
  pub volume_context:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerPublishVolumeResponse {
  #[prost(map = "string, string", tag = "1")]
  pub publish_context:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerUnpublishVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(string, tag = "2")]
  pub node_id: ::prost::alloc::string::String,
  #[prost(map = "string, string", tag = "3")]
  pub secrets:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerUnpublishVolumeResponse {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerGetCapabilitiesRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerGetCapabilitiesResponse {
  #[prost(message, repeated, tag = "1")]
  pub capabilities: ::prost::alloc::vec::Vec<ControllerServiceCapability>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerServiceCapability {
  #[prost(oneof = "controller_service_capability::Type", tags = "1")]
  pub r#type: ::core::option::Option<controller_service_capability::Type>,
}
pub mod controller_service_capability {
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct Rpc {
    #[prost(enumeration = "rpc::Type", tag = "1")]
    pub r#type: i32,
  }
  pub mod rpc {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
      Unknown = 0,
      CreateDeleteVolume = 1,
      PublishUnpublishVolume = 2,
      ListVolumes = 3,
      GetCapacity = 4,
      CreateDeleteSnapshot = 5,
      ListSnapshots = 6,
      CloneVolume = 7,
      PublishReadonly = 8,
      ExpandVolume = 9,
      ListVolumesPublishedNodes = 10,
      VolumeCondition = 11,
      GetVolume = 12,
    }
  }
  #[derive(Clone, PartialEq, ::prost::Oneof)]
  pub enum Type {
    #[prost(message, tag = "1")]
    Rpc(Rpc),
  }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerExpandVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(message, optional, tag = "2")]
  pub capacity_range: ::core::option::Option<CapacityRange>,
  #[prost(map = "string, string", tag = "3")]
  pub secrets:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(message, optional, tag = "4")]
  pub volume_capability: ::core::option::Option<VolumeCapability>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ControllerExpandVolumeResponse {
  #[prost(int64, tag = "1")]
  pub capacity_bytes: i64,
  #[prost(bool, tag = "2")]
  pub node_expansion_required: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeStageVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(map = "string, string", tag = "2")]
  pub publish_context:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(string, tag = "3")]
  pub staging_target_path: ::prost::alloc::string::String,
  #[prost(message, optional, tag = "4")]
  pub volume_capability: ::core::option::Option<VolumeCapability>,
  #[prost(map = "string, string", tag = "5")]
  pub secrets:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(map = "string, string", tag = "6")]
  pub volume_context:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeStageVolumeResponse {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeUnstageVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(string, tag = "2")]
  pub staging_target_path: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeUnstageVolumeResponse {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodePublishVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(map = "string, string", tag = "2")]
  pub publish_context:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(string, tag = "3")]
  pub staging_target_path: ::prost::alloc::string::String,
  #[prost(string, tag = "4")]
  pub target_path: ::prost::alloc::string::String,
  #[prost(message, optional, tag = "5")]
  pub volume_capability: ::core::option::Option<VolumeCapability>,
  #[prost(bool, tag = "6")]
  pub readonly: bool,
  #[prost(map = "string, string", tag = "7")]
  pub secrets:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
  #[prost(map = "string, string", tag = "8")]
  pub volume_context:
    ::std::collections::HashMap<::prost::alloc::string::String, ::prost::alloc::string::String>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodePublishVolumeResponse {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeUnpublishVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(string, tag = "2")]
  pub target_path: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeUnpublishVolumeResponse {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeGetCapabilitiesRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeGetCapabilitiesResponse {
  #[prost(message, repeated, tag = "1")]
  pub capabilities: ::prost::alloc::vec::Vec<NodeServiceCapability>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeServiceCapability {
  #[prost(oneof = "node_service_capability::Type", tags = "1")]
  pub r#type: ::core::option::Option<node_service_capability::Type>,
}
pub mod node_service_capability {
  #[derive(Clone, PartialEq, ::prost::Message)]
  pub struct Rpc {
    #[prost(enumeration = "rpc::Type", tag = "1")]
    pub r#type: i32,
  }
  pub mod rpc {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, ::prost::Enumeration)]
    #[repr(i32)]
    pub enum Type {
      Unknown = 0,
      StageUnstageVolume = 1,
      GetVolumeStats = 2,
      ExpandVolume = 3,
      VolumeCondition = 4,
    }
  }
  #[derive(Clone, PartialEq, ::prost::Oneof)]
  pub enum Type {
    #[prost(message, tag = "1")]
    Rpc(Rpc),
  }
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeGetInfoRequest {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeGetInfoResponse {
  #[prost(string, tag = "1")]
  pub node_id: ::prost::alloc::string::String,
  #[prost(int64, tag = "2")]
  pub max_volumes_per_node: i64,
  #[prost(message, optional, tag = "3")]
  pub accessible_topology: ::core::option::Option<Topology>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeExpandVolumeRequest {
  #[prost(string, tag = "1")]
  pub volume_id: ::prost::alloc::string::String,
  #[prost(string, tag = "2")]
  pub volume_path: ::prost::alloc::string::String,
  #[prost(message, optional, tag = "3")]
  pub capacity_range: ::core::option::Option<CapacityRange>,
  #[prost(string, tag = "4")]
  pub staging_target_path: ::prost::alloc::string::String,
  #[prost(message, optional, tag = "5")]
  pub volume_capability: ::core::option::Option<VolumeCapability>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct NodeExpandVolumeResponse {
  #[prost(int64, tag = "1")]
  pub capacity_bytes: i64,
}
#[doc = r" Generated client implementations."]
pub mod identity_client {
  #![allow(unused_variables, dead_code, missing_docs)]
  use tonic::codegen::*;
  pub struct IdentityClient<T> {
    inner: tonic::client::Grpc<T>,
  }
  impl IdentityClient<tonic::transport::Channel> {
    #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
      D: std::convert::TryInto<tonic::transport::Endpoint>,
      D::Error: Into<StdError>,
    {
      let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
      Ok(Self::new(conn))
    }
  }
  impl<T> IdentityClient<T>
  where
    T: tonic::client::GrpcService<tonic::body::BoxBody>,
    T::ResponseBody: Body + HttpBody + Send + 'static,
    T::Error: Into<StdError>,
    <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
  {
    pub fn new(inner: T) -> Self {
      let inner = tonic::client::Grpc::new(inner);
      Self { inner }
    }
    pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
      let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
      Self { inner }
    }
    pub async fn get_plugin_info(
      &mut self,
      request: impl tonic::IntoRequest<super::GetPluginInfoRequest>,
    ) -> Result<tonic::Response<super::GetPluginInfoResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Identity/GetPluginInfo");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn get_plugin_capabilities(
      &mut self,
      request: impl tonic::IntoRequest<super::GetPluginCapabilitiesRequest>,
    ) -> Result<tonic::Response<super::GetPluginCapabilitiesResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Identity/GetPluginCapabilities");
      self.inner.unary(request.into_request(), path, codec).await
    }
  }
  impl<T: Clone> Clone for IdentityClient<T> {
    fn clone(&self) -> Self {
      Self {
        inner: self.inner.clone(),
      }
    }
  }
  impl<T> std::fmt::Debug for IdentityClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "IdentityClient {{ ... }}")
    }
  }
}
#[doc = r" Generated client implementations."]
pub mod controller_client {
  #![allow(unused_variables, dead_code, missing_docs)]
  use tonic::codegen::*;
  pub struct ControllerClient<T> {
    inner: tonic::client::Grpc<T>,
  }
  impl ControllerClient<tonic::transport::Channel> {
    #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
      D: std::convert::TryInto<tonic::transport::Endpoint>,
      D::Error: Into<StdError>,
    {
      let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
      Ok(Self::new(conn))
    }
  }
  impl<T> ControllerClient<T>
  where
    T: tonic::client::GrpcService<tonic::body::BoxBody>,
    T::ResponseBody: Body + HttpBody + Send + 'static,
    T::Error: Into<StdError>,
    <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
  {
    pub fn new(inner: T) -> Self {
      let inner = tonic::client::Grpc::new(inner);
      Self { inner }
    }
    pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
      let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
      Self { inner }
    }
    pub async fn create_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::CreateVolumeRequest>,
    ) -> Result<tonic::Response<super::CreateVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Controller/CreateVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn delete_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::DeleteVolumeRequest>,
    ) -> Result<tonic::Response<super::DeleteVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Controller/DeleteVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn controller_publish_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::ControllerPublishVolumeRequest>,
    ) -> Result<tonic::Response<super::ControllerPublishVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Controller/ControllerPublishVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn controller_unpublish_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::ControllerUnpublishVolumeRequest>,
    ) -> Result<tonic::Response<super::ControllerUnpublishVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Controller/ControllerUnpublishVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn controller_get_capabilities(
      &mut self,
      request: impl tonic::IntoRequest<super::ControllerGetCapabilitiesRequest>,
    ) -> Result<tonic::Response<super::ControllerGetCapabilitiesResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Controller/ControllerGetCapabilities");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn controller_expand_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::ControllerExpandVolumeRequest>,
    ) -> Result<tonic::Response<super::ControllerExpandVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Controller/ControllerExpandVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
  }
  impl<T: Clone> Clone for ControllerClient<T> {
    fn clone(&self) -> Self {
      Self {
        inner: self.inner.clone(),
      }
    }
  }
  impl<T> std::fmt::Debug for ControllerClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "ControllerClient {{ ... }}")
    }
  }
}
#[doc = r" Generated client implementations."]
pub mod node_client {
  #![allow(unused_variables, dead_code, missing_docs)]
  use tonic::codegen::*;
  pub struct NodeClient<T> {
    inner: tonic::client::Grpc<T>,
  }
  impl NodeClient<tonic::transport::Channel> {
    #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
    pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
    where
      D: std::convert::TryInto<tonic::transport::Endpoint>,
      D::Error: Into<StdError>,
    {
      let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
      Ok(Self::new(conn))
    }
  }
  impl<T> NodeClient<T>
  where
    T: tonic::client::GrpcService<tonic::body::BoxBody>,
    T::ResponseBody: Body + HttpBody + Send + 'static,
    T::Error: Into<StdError>,
    <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
  {
    pub fn new(inner: T) -> Self {
      let inner = tonic::client::Grpc::new(inner);
      Self { inner }
    }
    pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
      let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
      Self { inner }
    }
    pub async fn node_stage_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::NodeStageVolumeRequest>,
    ) -> Result<tonic::Response<super::NodeStageVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Node/NodeStageVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn node_unstage_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::NodeUnstageVolumeRequest>,
    ) -> Result<tonic::Response<super::NodeUnstageVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Node/NodeUnstageVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn node_publish_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::NodePublishVolumeRequest>,
    ) -> Result<tonic::Response<super::NodePublishVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Node/NodePublishVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn node_unpublish_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::NodeUnpublishVolumeRequest>,
    ) -> Result<tonic::Response<super::NodeUnpublishVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Node/NodeUnpublishVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn node_expand_volume(
      &mut self,
      request: impl tonic::IntoRequest<super::NodeExpandVolumeRequest>,
    ) -> Result<tonic::Response<super::NodeExpandVolumeResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Node/NodeExpandVolume");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn node_get_capabilities(
      &mut self,
      request: impl tonic::IntoRequest<super::NodeGetCapabilitiesRequest>,
    ) -> Result<tonic::Response<super::NodeGetCapabilitiesResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Node/NodeGetCapabilities");
      self.inner.unary(request.into_request(), path, codec).await
    }
    pub async fn node_get_info(
      &mut self,
      request: impl tonic::IntoRequest<super::NodeGetInfoRequest>,
    ) -> Result<tonic::Response<super::NodeGetInfoResponse>, tonic::Status> {
      self.inner.ready().await.map_err(|e| {
        tonic::Status::new(
          tonic::Code::Unknown,
          format!("Service was not ready: {}", e.into()),
        )
      })?;
      let codec = tonic::codec::ProstCodec::default();
      let path = http::uri::PathAndQuery::from_static("/csi.v1.Node/NodeGetInfo");
      self.inner.unary(request.into_request(), path, codec).await
    }
  }
  impl<T: Clone> Clone for NodeClient<T> {
    fn clone(&self) -> Self {
      Self {
        inner: self.inner.clone(),
      }
    }
  }
  impl<T> std::fmt::Debug for NodeClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
      write!(f, "NodeClient {{ ... }}")
    }
  }
}
