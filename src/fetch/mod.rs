mod basic;
mod client;
pub mod auth;

pub use basic::BasicClient;
pub use client::HttpClient;

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use tracing::debug;

/// Upstream error bodies are cut to this many characters before they reach a
/// caller-facing message.
const BODY_PREFIX_CHARS: usize = 200;

/// GETs `url` through `client` and decodes the JSON body into `T`.
///
/// `service` names the collaborator in error messages. Non-2xx responses are
/// mapped with [`ApiError::from_upstream_status`]; a body that does not match
/// `T` is an [`ApiError::Upstream`].
pub async fn fetch_json<C, T>(client: &C, service: &'static str, url: reqwest::Url) -> Result<T, ApiError>
where
    C: HttpClient + ?Sized,
    T: DeserializeOwned,
{
    let path = url.path().to_string();
    let req = reqwest::Request::new(reqwest::Method::GET, url);

    // The URL may carry an API key added by a credential wrapper.
    let resp = client.execute(req).await.map_err(|e| {
        if e.is_timeout() {
            ApiError::upstream(service, format!("request to {path} timed out"))
        } else {
            ApiError::upstream(service, format!("request to {path} failed: {}", e.without_url()))
        }
    })?;

    let status = resp.status();
    debug!(service, path = %path, status = status.as_u16(), "Upstream responded");

    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        debug!(service, path = %path, body = %body, "Upstream error body");
        return Err(ApiError::from_upstream_status(
            service,
            status.as_u16(),
            format!("GET {path}: {}", body_prefix(&body)),
        ));
    }

    let bytes = resp
        .bytes()
        .await
        .map_err(|e| ApiError::upstream(service, format!("reading body of {path}: {e}")))?;

    serde_json::from_slice(&bytes)
        .map_err(|e| ApiError::upstream(service, format!("unexpected response from {path}: {e}")))
}

fn body_prefix(body: &str) -> String {
    let body = body.trim();
    match body.char_indices().nth(BODY_PREFIX_CHARS) {
        Some((cut, _)) => format!("{}...", &body[..cut]),
        None => body.to_string(),
    }
}
