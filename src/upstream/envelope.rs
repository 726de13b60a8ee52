//! Upstream response envelope.

use serde::Deserialize;

/// Uniform wrapper the upstream API puts around every response body.
///
/// `data` is absent on failure-shaped responses; `error` carries the
/// upstream's own message when it has one.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiEnvelope<T> {
    pub data: Option<T>,

    #[serde(default)]
    pub status: String,

    #[serde(default)]
    pub error: Option<String>,
}
