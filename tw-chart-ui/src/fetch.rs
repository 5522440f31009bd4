//! The one network request the page makes.

use tw_core::{Snapshot, TidewatchError};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::Response;

fn js_failure(err: JsValue) -> TidewatchError {
    TidewatchError::FetchFailure(format!("{:?}", err))
}

/// Snapshot URL for a lookback window.
pub fn snapshot_url(endpoint: &str, hours: i64) -> String {
    let sep = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}hours={}", endpoint, sep, hours)
}

/// GET the snapshot document and decode it.
pub async fn fetch_snapshot(url: &str) -> Result<Snapshot, TidewatchError> {
    let window = web_sys::window()
        .ok_or_else(|| TidewatchError::FetchFailure("no window".to_string()))?;
    let value = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(js_failure)?;
    let response: Response = value.dyn_into().map_err(js_failure)?;
    if !response.ok() {
        return Err(TidewatchError::FetchFailure(format!(
            "{} returned {}",
            url,
            response.status()
        )));
    }
    let text = JsFuture::from(response.text().map_err(js_failure)?)
        .await
        .map_err(js_failure)?;
    let body = text
        .as_string()
        .ok_or_else(|| TidewatchError::FetchFailure("response body is not text".to_string()))?;
    Snapshot::from_json(&body)
}
