//! One-shot HTTP GET from the browser.

use std::fmt;

use gloo_net::http::Request;

/// Status and body of a completed request. Non-2xx statuses are not errors
/// at this layer; callers decide what a bad status means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextResponse {
    pub status: u16,
    pub body: String,
}

impl TextResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request never produced a response (network down, CORS, aborted).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError(pub String);

impl fmt::Display for TransportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "transport error: {}", self.0)
    }
}

impl std::error::Error for TransportError {}

/// GET `url` and read the body as text. No retry, no timeout.
pub async fn get_text(url: &str) -> Result<TextResponse, TransportError> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| TransportError(e.to_string()))?;
    let status = resp.status();
    let body = resp
        .text()
        .await
        .map_err(|e| TransportError(e.to_string()))?;
    Ok(TextResponse { status, body })
}
