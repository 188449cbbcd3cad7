//! Zhipu GLM chat-completion client.
//!
//! A thin client over the OpenAI-compatible chat endpoint. The public
//! [`GlmClient::summarize`] entry point never fails its caller: every
//! failure path (missing credential, network error, non-2xx status,
//! malformed response body) resolves to one of the fixed fallback strings,
//! so the orchestrator always has a body to deliver.

use crate::config::Config;
use crate::models::NewsItem;
use crate::prompt::build_prompt;
use crate::utils::truncate_for_log;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::time::{Duration, Instant};
use tracing::{error, info, instrument, warn};

/// Returned when the fetch produced no items; no request is made.
pub const NO_NEWS_MESSAGE: &str = "今日暂无可用的财经资讯，或抓取失败。";

/// Returned when no API key is configured; no request is made.
pub const MISSING_KEY_MESSAGE: &str = "未配置 GLM_API_KEY 环境变量，无法调用智谱大模型。";

/// Returned when the request or response handling fails in any way.
pub const REQUEST_FAILED_MESSAGE: &str = "调用智谱 GLM 接口失败，请检查网络、API Key 或配额。";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const TEMPERATURE: f64 = 0.3;

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Client for the GLM chat-completion endpoint.
pub struct GlmClient {
    client: reqwest::Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl GlmClient {
    /// Build a client from the runtime configuration.
    pub fn new(config: &Config) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            client,
            api_url: config.glm_api_url.clone(),
            api_key: config.glm_api_key.clone(),
            model: config.glm_model.clone(),
        })
    }

    /// Summarize the collected news, falling back to a fixed message on any
    /// failure.
    ///
    /// Empty input and a missing API key short-circuit before any network
    /// call is made.
    #[instrument(level = "info", skip_all, fields(items = items.len()))]
    pub async fn summarize(&self, items: &[NewsItem]) -> String {
        if items.is_empty() {
            info!("No news items; skipping summarization request");
            return NO_NEWS_MESSAGE.to_string();
        }

        let Some(api_key) = self.api_key.as_deref().filter(|key| !key.is_empty()) else {
            warn!("GLM API key not configured; skipping summarization request");
            return MISSING_KEY_MESSAGE.to_string();
        };

        let prompt = build_prompt(items);
        let t0 = Instant::now();
        match self.try_summarize(api_key, prompt).await {
            Ok(content) => {
                info!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Summarization succeeded"
                );
                content
            }
            Err(e) => {
                error!(
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    error = %e,
                    "Summarization request failed"
                );
                REQUEST_FAILED_MESSAGE.to_string()
            }
        }
    }

    async fn try_summarize(&self, api_key: &str, prompt: String) -> Result<String, Box<dyn Error>> {
        let payload = ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: prompt,
            }],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(format!(
                "GLM API error {status}: {}",
                truncate_for_log(&body, 300)
            )
            .into());
        }

        let body: ChatResponse = response.json().await?;
        let choice = body
            .choices
            .into_iter()
            .next()
            .ok_or("GLM response has no choices")?;
        Ok(choice.message.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client(api_url: &str, api_key: Option<&str>) -> GlmClient {
        GlmClient {
            client: reqwest::Client::new(),
            api_url: api_url.to_string(),
            api_key: api_key.map(str::to_string),
            model: "glm-4-flash".to_string(),
        }
    }

    fn sample_items() -> Vec<NewsItem> {
        vec![NewsItem::from_title("测试新闻")]
    }

    #[test]
    fn test_request_payload_shape() {
        let payload = ChatRequest {
            model: "glm-4-flash".to_string(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: "提示词".to_string(),
            }],
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["model"], "glm-4-flash");
        assert_eq!(json["messages"][0]["role"], "user");
        assert_eq!(json["messages"][0]["content"], "提示词");
        assert_eq!(json["temperature"], 0.3);
    }

    #[tokio::test]
    async fn test_summarize_empty_items_skips_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;

        let client = test_client(&server.url(), Some("test-key"));
        let result = client.summarize(&[]).await;

        assert_eq!(result, NO_NEWS_MESSAGE);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_summarize_missing_key_skips_network() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/").expect(0).create_async().await;

        let client = test_client(&server.url(), None);
        let result = client.summarize(&sample_items()).await;

        assert_eq!(result, MISSING_KEY_MESSAGE);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_summarize_empty_key_treated_as_missing() {
        let client = test_client("http://127.0.0.1:1", Some(""));
        let result = client.summarize(&sample_items()).await;
        assert_eq!(result, MISSING_KEY_MESSAGE);
    }

    #[tokio::test]
    async fn test_summarize_success_returns_content() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[{"message":{"role":"assistant","content":"摘要文本"}}]}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), Some("test-key"));
        let result = client.summarize(&sample_items()).await;

        assert_eq!(result, "摘要文本");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_summarize_server_error_returns_fallback() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body(r#"{"error":"internal"}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), Some("test-key"));
        let result = client.summarize(&sample_items()).await;

        assert_eq!(result, REQUEST_FAILED_MESSAGE);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_summarize_server_error_chinese_body_returns_fallback() {
        let mut server = mockito::Server::new_async().await;
        // Quota/auth errors from this API come back as Chinese text; the
        // logged preview must not split a multi-byte char.
        let body = format!("a{}", "错".repeat(150));
        let mock = server
            .mock("POST", "/")
            .with_status(500)
            .with_body(body)
            .create_async()
            .await;

        let client = test_client(&server.url(), Some("test-key"));
        let result = client.summarize(&sample_items()).await;

        assert_eq!(result, REQUEST_FAILED_MESSAGE);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_summarize_empty_choices_returns_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"choices":[]}"#)
            .create_async()
            .await;

        let client = test_client(&server.url(), Some("test-key"));
        let result = client.summarize(&sample_items()).await;

        assert_eq!(result, REQUEST_FAILED_MESSAGE);
    }

    #[tokio::test]
    async fn test_summarize_malformed_body_returns_fallback() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("not json at all")
            .create_async()
            .await;

        let client = test_client(&server.url(), Some("test-key"));
        let result = client.summarize(&sample_items()).await;

        assert_eq!(result, REQUEST_FAILED_MESSAGE);
    }
}
