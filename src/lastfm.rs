use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum UpstreamError {
    /// The API answered with an error payload.
    #[error("{0}")]
    Api(String),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("invalid response from Last.fm: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Single-shot client for the Last.fm web service. Every call carries the
/// API key and asks for JSON; nothing is retried or cached.
#[derive(Debug, Clone)]
pub struct LastFmClient {
    http: reqwest::Client,
    api_base: String,
    api_key: String,
}

impl LastFmClient {
    pub fn new(api_base: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base: api_base.into(),
            api_key: api_key.into(),
        }
    }

    pub async fn call(&self, method: &str, params: &[(&str, String)]) -> Result<Value, UpstreamError> {
        let mut query: Vec<(&str, &str)> = Vec::with_capacity(params.len() + 3);
        query.push(("method", method));
        query.push(("api_key", self.api_key.as_str()));
        query.push(("format", "json"));
        query.extend(params.iter().map(|(name, value)| (*name, value.as_str())));

        debug!(method, "calling Last.fm");
        let response = self.http.get(&self.api_base).query(&query).send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let payload: Value = serde_json::from_slice(&bytes)?;

        if let Some(message) = api_error(&payload) {
            warn!(method, %status, "Last.fm reported an error: {message}");
            return Err(UpstreamError::Api(message));
        }

        Ok(payload)
    }
}

fn api_error(payload: &Value) -> Option<String> {
    let failed = match payload.get("error")? {
        Value::Bool(flag) => *flag,
        Value::Number(code) => code.as_f64().is_some_and(|code| code != 0.0),
        Value::String(code) => !code.is_empty(),
        Value::Null => false,
        Value::Array(_) | Value::Object(_) => true,
    };
    if !failed {
        return None;
    }
    let message = payload
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
        .unwrap_or("Last.fm API error");
    Some(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn error_payload_uses_upstream_message() {
        let payload = json!({ "error": 6, "message": "User not found" });
        assert_eq!(api_error(&payload).as_deref(), Some("User not found"));
    }

    #[test]
    fn error_payload_without_message_gets_fallback() {
        let payload = json!({ "error": 10 });
        assert_eq!(api_error(&payload).as_deref(), Some("Last.fm API error"));
    }

    #[test]
    fn regular_payload_is_not_an_error() {
        let payload = json!({ "user": { "name": "rj" } });
        assert!(api_error(&payload).is_none());
    }

    #[test]
    fn falsy_error_fields_are_not_failures() {
        for error in [json!(0), json!(""), json!(false), json!(null)] {
            let payload = json!({ "error": error, "message": "ignored" });
            assert!(api_error(&payload).is_none(), "{payload}");
        }
        assert!(api_error(&json!({ "error": true })).is_some());
        assert!(api_error(&json!({ "error": "29" })).is_some());
    }
}
