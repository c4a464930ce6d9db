//! Usage-query executor.
//!
//! Runs one usage script end to end and always produces a `UsageResult`;
//! failures degrade to `success: false` with a human-readable message
//! instead of surfacing as errors.

use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use provswitch_core::{effective_timeout, validate_usage_script, UsageData, UsageResult, UsageScript};

use crate::descriptor::{substitute_placeholders, UsageRequest};
use crate::engine::ScriptEngine;
use crate::error::FetchError;

/// Maximum response-body characters carried into an error message.
const BODY_PREVIEW_CHARS: usize = 200;

/// Executes usage scripts through a pluggable [`ScriptEngine`].
pub struct UsageExecutor<E: ScriptEngine> {
    engine: E,
}

impl<E: ScriptEngine> UsageExecutor<E> {
    /// Creates an executor around a script engine.
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Runs a usage script with the given credentials.
    ///
    /// Never fails outward; every error is folded into a
    /// `UsageResult {success: false}`.
    pub async fn query(
        &self,
        script: &UsageScript,
        api_key: &str,
        base_url: Option<&str>,
    ) -> UsageResult {
        match self.try_query(script, api_key, base_url).await {
            Ok(data) => UsageResult::ok(data),
            Err(e) => {
                warn!(error = %e, "Usage query failed");
                UsageResult::err(e.to_string())
            }
        }
    }

    async fn try_query(
        &self,
        script: &UsageScript,
        api_key: &str,
        base_url: Option<&str>,
    ) -> Result<Vec<UsageData>, FetchError> {
        validate_usage_script(script)?;

        let code = substitute_placeholders(&script.code, api_key, base_url);
        let request = self.engine.extract_request(&code).await?;
        debug!(url = %request.url, method = %request.method, "Usage request extracted");

        let body = send_request(&request, effective_timeout(script)).await?;
        let extracted = self.engine.run_extractor(&code, &body).await?;
        normalize_entries(extracted)
    }
}

/// Performs the script's HTTP request under the enforced timeout.
async fn send_request(request: &UsageRequest, timeout_secs: u64) -> Result<String, FetchError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!("provswitch/", env!("CARGO_PKG_VERSION")))
        .build()?;

    let method: reqwest::Method = request
        .method
        .to_uppercase()
        .parse()
        .map_err(|_| FetchError::Script(format!("unsupported HTTP method: {}", request.method)))?;

    let mut builder = client.request(method, &request.url);
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = &request.body {
        builder = builder.body(body.clone());
    }

    let response = builder.send().await?;
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(FetchError::Status {
            status: status.as_u16(),
            preview: text.chars().take(BODY_PREVIEW_CHARS).collect(),
        });
    }
    Ok(text)
}

/// Normalizes the extractor's return value into plan entries.
///
/// Accepts a single object or a non-empty array of objects; anything else
/// is an invalid shape.
fn normalize_entries(value: Value) -> Result<Vec<UsageData>, FetchError> {
    match value {
        Value::Object(_) => {
            let entry: UsageData = serde_json::from_value(value)?;
            Ok(vec![entry])
        }
        Value::Array(items) => {
            if items.is_empty() {
                return Err(FetchError::InvalidShape(
                    "extractor returned an empty array".to_string(),
                ));
            }
            items
                .into_iter()
                .enumerate()
                .map(|(i, item)| {
                    serde_json::from_value(item).map_err(|e| {
                        FetchError::InvalidShape(format!("entry {i} is not a usage object: {e}"))
                    })
                })
                .collect()
        }
        other => Err(FetchError::InvalidShape(format!(
            "extractor must return an object or array, got {}",
            type_name(&other)
        ))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;

    /// Engine stub returning canned values; records the substituted code.
    struct StubEngine {
        request: UsageRequest,
        extracted: Value,
        seen_code: std::sync::Mutex<Vec<String>>,
    }

    impl StubEngine {
        fn new(extracted: Value) -> Self {
            Self {
                request: UsageRequest {
                    url: "https://api.example.com/usage".into(),
                    method: "GET".into(),
                    headers: Default::default(),
                    body: None,
                },
                extracted,
                seen_code: std::sync::Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ScriptEngine for StubEngine {
        async fn extract_request(&self, code: &str) -> Result<UsageRequest, FetchError> {
            self.seen_code.lock().unwrap().push(code.to_string());
            Ok(self.request.clone())
        }

        async fn run_extractor(&self, _code: &str, _response: &str) -> Result<Value, FetchError> {
            Ok(self.extracted.clone())
        }
    }

    #[test]
    fn test_normalize_single_object() {
        let entries = normalize_entries(json!({"planName": "Pro", "remaining": 5.0})).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].plan_name.as_deref(), Some("Pro"));
    }

    #[test]
    fn test_normalize_array_of_objects() {
        let entries =
            normalize_entries(json!([{"planName": "A"}, {"planName": "B"}])).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].plan_name.as_deref(), Some("B"));
    }

    #[test]
    fn test_normalize_rejects_empty_array() {
        let err = normalize_entries(json!([])).unwrap_err();
        assert!(err.to_string().contains("empty array"));
    }

    #[test]
    fn test_normalize_rejects_scalars() {
        let err = normalize_entries(json!(42)).unwrap_err();
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_normalize_names_bad_array_entry() {
        let err = normalize_entries(json!([{"planName": "A"}, "nope"])).unwrap_err();
        assert!(err.to_string().contains("entry 1"));
    }

    #[tokio::test]
    async fn test_invalid_script_fails_before_any_engine_call() {
        let engine = StubEngine::new(json!({}));
        let executor = UsageExecutor::new(engine);

        let script = UsageScript::new("   ");
        let result = executor.query(&script, "sk-test", None).await;

        assert!(!result.success);
        assert!(result.error.unwrap().contains("empty"));
        assert!(executor.engine.seen_code.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_placeholders_substituted_before_engine_sees_code() {
        // request extraction is reached; the stub URL points nowhere so the
        // HTTP step fails, but the recorded code proves the substitution
        let mut engine = StubEngine::new(json!({}));
        engine.request.url = "http://127.0.0.1:1/unreachable".into();
        let executor = UsageExecutor::new(engine);

        let script = UsageScript::new(
            "({request:{url:'{{baseUrl}}/v1'}, extractor:function(r){return r}})",
        );
        let result = executor
            .query(&script, "sk-abc", Some("https://api.example.com"))
            .await;
        assert!(!result.success);

        let seen = executor.engine.seen_code.lock().unwrap();
        assert_eq!(seen.len(), 1);
        assert!(seen[0].contains("https://api.example.com/v1"));
        assert!(!seen[0].contains("{{baseUrl}}"));
    }
}
