//! Plain-text HTTP GET through the browser `fetch` API.

use crate::NetworkError;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

/// GET `url` and return the response body as text.
///
/// Any non-success status is an error; there is no retry.
pub async fn fetch_text(url: &str) -> Result<String, NetworkError> {
    let window = gloo_utils::window();
    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| NetworkError::Request(describe(&e)))?;
    let response: Response = response
        .dyn_into()
        .map_err(|v| NetworkError::Request(format!("not a Response: {}", describe(&v))))?;

    if !response.ok() {
        return Err(NetworkError::Status(response.status()));
    }

    let body = response
        .text()
        .map_err(|e| NetworkError::Body(describe(&e)))?;
    let body = JsFuture::from(body)
        .await
        .map_err(|e| NetworkError::Body(describe(&e)))?;

    body.as_string()
        .ok_or_else(|| NetworkError::Body("body is not a string".to_string()))
}
