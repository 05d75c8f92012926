//! Client side of the Container Storage Interface (CSI) v1.
//!
//! [`Plugin`] is the typed RPC surface, implemented over gRPC by
//! [`GrpcPlugin`] and in memory by [`FakePlugin`].

pub mod controller;
pub mod node;
pub mod volume;

mod client;
mod fake;
mod plugin;
mod proto;
mod utils;

pub use client::{ConnectError, GrpcPlugin, Plugin};
pub use controller::ControllerCapabilities;
pub use fake::{FakeCall, FakePlugin};
pub use node::NodeCapabilities;
pub use plugin::{PluginCapabilities, PluginCapability, PluginInfo};

#[derive(Eq, Clone, Copy, PartialEq, Debug, Hash)]
pub enum VolumeExpansionSupport {
  None,
  Offline,
  Online,
}
