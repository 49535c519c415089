//! Bridging HTTP requests to the gate's [`RequestContext`].

use axum::http::HeaderMap;

use staffdir_auth::{RequestContext, RequestMetadata};

/// Build the per-request execution context from HTTP headers.
///
/// Values that are not valid UTF-8 are dropped, so a binary `authorization`
/// header reads as absent.
pub fn request_context(headers: &HeaderMap) -> RequestContext {
    let metadata: RequestMetadata = headers
        .iter()
        .filter_map(|(name, value)| value.to_str().ok().map(|v| (name.as_str(), v)))
        .collect();

    RequestContext::new(metadata)
}
