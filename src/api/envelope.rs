//! Success/failure envelope of backend responses

use crate::error::{Result, ResumeDeskError};
use log::{debug, error};
use serde_json::{Map, Value};

/// Body fields that carry a failure description, in order of preference.
const DETAIL_FIELDS: [&str; 4] = ["detail", "error", "error_graphql", "error_pr_api"];

fn describe(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// First failure description present in a JSON body.
pub fn failure_detail(body: &Value) -> Option<String> {
    DETAIL_FIELDS
        .iter()
        .find_map(|field| body.get(field).and_then(describe))
}

/// Classify a non-2xx response body into an `Http` error.
pub fn http_failure(status: u16, reason: Option<&str>, text: &str) -> ResumeDeskError {
    error!("Backend request failed with HTTP {}: {}", status, text);

    let detail = serde_json::from_str::<Value>(text)
        .ok()
        .and_then(|body| failure_detail(&body))
        .or_else(|| {
            let trimmed = text.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        })
        .or_else(|| reason.map(str::to_string))
        .unwrap_or_else(|| "Request failed".to_string());

    ResumeDeskError::Http { status, detail }
}

/// Interpret a 2xx body: it must be a JSON object without an `error` field.
pub fn success_body(text: &str) -> Result<Map<String, Value>> {
    let body: Value = serde_json::from_str(text).map_err(|e| {
        ResumeDeskError::UnexpectedResponse(format!("response is not JSON: {}", e))
    })?;

    let Value::Object(map) = body else {
        return Err(ResumeDeskError::UnexpectedResponse(
            "response is not a JSON object".to_string(),
        ));
    };

    if let Some(detail) = map.get("error").and_then(describe) {
        error!("Backend reported an error in a successful response: {}", detail);
        return Err(ResumeDeskError::Backend(detail));
    }

    Ok(map)
}

/// Read the body, failing on any non-2xx status. Returns the raw text.
pub async fn ensure_success(response: reqwest::Response) -> Result<String> {
    let status = response.status();
    let text = response.text().await?;
    debug!("Backend responded {} ({} bytes)", status, text.len());

    if !status.is_success() {
        return Err(http_failure(status.as_u16(), status.canonical_reason(), &text));
    }
    Ok(text)
}

/// Read a JSON object body, applying both the status and the embedded-error checks.
pub async fn read_json(response: reqwest::Response) -> Result<Map<String, Value>> {
    let text = ensure_success(response).await?;
    success_body(&text)
}
