use std::{fmt, path::Path};
use tracing::{field, Span};

pub(crate) trait Record: Sized {
  fn record_field(self, field: &'static str) -> Self;

  #[inline]
  fn record_request(self) -> Self {
    self.record_field("request")
  }

  #[inline]
  fn record_response(self) -> Self {
    self.record_field("response")
  }
}

impl<T: fmt::Debug> Record for T {
  #[inline]
  fn record_field(self, field: &'static str) -> Self {
    Span::current().record(field, &field::debug(&self));
    self
  }
}

#[inline]
pub(crate) fn record_request<T: fmt::Debug>(request: T) -> T {
  request.record_request()
}

#[inline]
pub(crate) fn record_response<T: fmt::Debug>(response: T) -> T {
  response.record_response()
}

pub(crate) fn non_empty(value: String, error: &'static str) -> Result<String, tonic::Status> {
  match value {
    v if v.is_empty() => Err(tonic::Status::invalid_argument(error)),
    v => Ok(v),
  }
}

/// Paths sent to the plugin must be absolute and valid UTF-8.
pub(crate) fn path_to_string(path: &Path, field: &'static str) -> Result<String, tonic::Status> {
  if !path.is_absolute() {
    return Err(tonic::Status::invalid_argument(format!(
      "{} is not absolute",
      field
    )));
  }

  path
    .to_str()
    .map(ToOwned::to_owned)
    .ok_or_else(|| tonic::Status::invalid_argument(format!("{} is not valid UTF-8", field)))
}
