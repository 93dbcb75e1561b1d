use reqwest::header::{HeaderMap, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{LlmError, Result};

pub const OPENAI_API_ROOT: &str = "https://api.openai.com/v1";

/// Connection settings for a chat completions endpoint.
///
/// `api_root` lets deployments point at any OpenAI-compatible service
/// (including a local stub during tests).
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_root: String,
    pub api_key: String,
    pub model: String,
    pub max_tokens: u32,
}

#[derive(Debug, Serialize, Default, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Default, Clone)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Message {
        Message {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Message {
        Message {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionResponse {
    pub choices: Vec<CompletionChoice>,
    // id/object may be absent on streamed responses.
    pub id: Option<String>,
    pub object: Option<String>,
    pub model: Option<String>,
    pub created: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub message: Message,
    pub index: usize,
    pub finish_reason: String,
}

#[derive(Debug, Clone)]
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl LlmClient {
    pub fn new(config: LlmConfig) -> Result<LlmClient> {
        let mut def_headers = HeaderMap::new();
        let auth = format!("Bearer {}", config.api_key)
            .parse()
            .map_err(|_| LlmError::InvalidApiKey)?;
        def_headers.insert(AUTHORIZATION, auth);
        def_headers.insert(CONTENT_TYPE, "application/json".parse().unwrap());

        let client = reqwest::Client::builder()
            .default_headers(def_headers)
            .build()?;

        Ok(LlmClient { client, config })
    }

    pub async fn make_completion_request(
        &self,
        req: &CompletionRequest,
    ) -> Result<CompletionResponse> {
        let url = format!("{}/chat/completions", self.config.api_root);
        let resp = self.client.post(url).json(req).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }

    /// Run a single completion with a system instruction and one user turn,
    /// returning the first choice's content.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let req = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![Message::system(system), Message::user(user)],
            max_tokens: Some(self.config.max_tokens),
            ..Default::default()
        };

        debug!(model = %req.model, "sending completion request");
        let resp = self.make_completion_request(&req).await?;

        let choice = resp
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::EmptyResponse)?;
        Ok(choice.message.content)
    }
}
