use csi_proto::ConnectError;
use csi_volume_store::StoreError;
use std::{io, path::PathBuf, time::Duration};
use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
  /// The operation needs a stored record and there is none.
  #[error("Volume not found: {0}")]
  VolumeNotFound(String),

  #[error("Volume already exists: {0}")]
  VolumeExists(String),

  /// The plugin lacks a capability we need, or declares one we cannot
  /// honor.
  #[error("Plugin capability mismatch: {0}")]
  CapabilityMismatch(String),

  #[error("Invalid operation: {0:?}")]
  InvalidVerb(String),

  #[error("Invalid volume request: {0}")]
  InvalidRequest(String),

  #[error(
    "{step} failed for volume {volume}: {code:?}: {message}",
    code = .status.code(),
    message = .status.message()
  )]
  Rpc {
    step: &'static str,
    volume: String,
    status: tonic::Status,
  },

  #[error(
    "{step} failed during capability negotiation: {code:?}: {message}",
    code = .status.code(),
    message = .status.message()
  )]
  Negotiation {
    step: &'static str,
    status: tonic::Status,
  },

  #[error("Metadata store {step} failed for volume {volume}")]
  Store {
    step: &'static str,
    volume: String,
    #[source]
    source: StoreError,
  },

  /// The store itself could not be reached, before any volume was
  /// looked at.
  #[error("Failed to {step} metadata store")]
  StoreSetup {
    step: &'static str,
    #[source]
    source: StoreError,
  },

  #[error(transparent)]
  Connect(#[from] ConnectError),

  #[error("Failed to {step} {}", path.display())]
  Io {
    step: &'static str,
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("Operation timed out after {0:?}")]
  DeadlineExceeded(Duration),
}

impl Error {
  pub(crate) fn rpc(step: &'static str, volume: &str) -> impl FnOnce(tonic::Status) -> Error {
    let volume = volume.to_owned();
    move |status| Error::Rpc {
      step,
      volume,
      status,
    }
  }

  pub(crate) fn negotiation(step: &'static str) -> impl FnOnce(tonic::Status) -> Error {
    move |status| Error::Negotiation { step, status }
  }

  pub(crate) fn store(step: &'static str, volume: &str) -> impl FnOnce(StoreError) -> Error {
    let volume = volume.to_owned();
    move |source| Error::Store {
      step,
      volume,
      source,
    }
  }

  pub(crate) fn store_setup(step: &'static str) -> impl FnOnce(StoreError) -> Error {
    move |source| Error::StoreSetup { step, source }
  }

  pub(crate) fn io(step: &'static str, path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Error {
    let path = path.into();
    move |source| Error::Io { step, path, source }
  }

  /// Whether the plugin or the metadata store failed underneath us.
  pub fn is_transport(&self) -> bool {
    matches!(
      self,
      Error::Rpc { .. }
        | Error::Negotiation { .. }
        | Error::Store { .. }
        | Error::StoreSetup { .. }
        | Error::Connect(_)
    )
  }
}
