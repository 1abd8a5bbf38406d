//! Responses for requests that match no handler.

use crate::errors::Error;
use axum::http::{Method, Uri};

/// Unknown path
pub async fn not_found(uri: Uri) -> Error {
    Error::not_found("Route", uri.path())
}

/// Known path, unsupported method
pub async fn method_not_allowed(method: Method, uri: Uri) -> Error {
    tracing::debug!("{} not allowed on {}", method, uri.path());
    Error::MethodNotAllowed
}
