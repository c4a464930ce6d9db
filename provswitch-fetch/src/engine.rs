//! Script engine boundary.

use async_trait::async_trait;
use serde_json::Value;

use crate::descriptor::UsageRequest;
use crate::error::FetchError;

/// Sandbox that evaluates usage-script source.
///
/// The executor never interprets script code itself; it hands the
/// (placeholder-substituted) source to an engine twice, once to obtain the
/// request config and once to run the extractor on the raw response text.
/// Implementations must not grant the script network or filesystem access,
/// the executor performs the single HTTP request on its behalf.
#[async_trait]
pub trait ScriptEngine: Send + Sync {
    /// Evaluates the script's `request` member into a request config.
    async fn extract_request(&self, code: &str) -> Result<UsageRequest, FetchError>;

    /// Runs the script's `extractor` function against the response text.
    async fn run_extractor(&self, code: &str, response: &str) -> Result<Value, FetchError>;
}
