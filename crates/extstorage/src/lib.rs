//! Ganeti extstorage provider that drives a CSI plugin.
//!
//! Each invocation runs one [`Verb`] against one volume. The
//! [`Orchestrator`] negotiates what the plugin supports, issues the RPCs
//! the verb needs and keeps the volume's CSI identity in a
//! [`csi_volume_store::MetadataStore`]. An [`Invocation`] bounds the
//! whole run by one deadline.

pub mod config;

mod capabilities;
mod error;
mod invocation;
mod orchestrator;
mod paths;
mod request;

pub use capabilities::{negotiate, PluginCapabilitySet};
pub use error::{Error, Result};
pub use invocation::Invocation;
pub use orchestrator::{Orchestrator, Outcome};
pub use paths::{VolumePaths, DEFAULT_STORAGE_ROOT};
pub use request::{Verb, VolumeRequest};
