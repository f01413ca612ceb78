// src/core/service_client.rs
//! HTTP client for the external text-generation service

use anyhow::{Context, Result};

use crate::app_log;
use crate::core::augment::{GenerationError, TextGenerator};
use crate::core::config_manager::GenerationConfig;
use crate::types::response::{ApiErrorResponse, GenerateContentRequest, GenerateContentResponse};

const GENERATE_CONTENT_PATH: &str = "/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl ServiceClient {
    /// Create new service client. No request timeout is set here; whatever
    /// the transport enforces applies.
    pub fn new(config: &GenerationConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}{}/{}:generateContent",
            self.base_url, GENERATE_CONTENT_PATH, self.model
        )
    }
}

#[rocket::async_trait]
impl TextGenerator for ServiceClient {
    async fn generate_text(&self, prompt: &str) -> Result<String, GenerationError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or(GenerationError::MissingApiKey)?;
        let url = self.endpoint();

        app_log!(info, "Calling text generation service: {}", url);

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, api_key)
            .json(&GenerateContentRequest::from_prompt(prompt))
            .send()
            .await?;

        let status = response.status();
        app_log!(trace, "Response status: {}", status);

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorResponse>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let generated: GenerateContentResponse = response.json().await?;

        if let Some(usage) = &generated.usage_metadata {
            app_log!(
                debug,
                "Generation succeeded: prompt_tokens={:?}, output_tokens={:?}",
                usage.prompt_token_count,
                usage.candidates_token_count
            );
        }

        generated.text().ok_or(GenerationError::EmptyResponse)
    }
}
