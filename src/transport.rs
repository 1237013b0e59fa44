#![allow(missing_docs)]

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE, RETRY_AFTER};
use tracing::debug;

use crate::config::GeminiConfig;
use crate::error::{GeminiError, Result};
use crate::models::Model;
use crate::types::{ErrorResponse, GenerateContentRequest, GenerateContentResponse};

const API_KEY_HEADER: &str = "x-goog-api-key";
const DEFAULT_RETRY_AFTER_SECONDS: u64 = 60;

/// The provider's one-shot generation capability.
#[async_trait]
pub trait GenerativeTransport: Send + Sync {
    async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse>;
}

pub struct HttpTransport {
    config: GeminiConfig,
    http_client: reqwest::Client,
}

impl HttpTransport {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if config.has_api_key() {
            let mut key = HeaderValue::from_str(config.api_key())
                .map_err(|_| GeminiError::api_key("API key contains invalid header characters"))?;
            key.set_sensitive(true);
            headers.insert(API_KEY_HEADER, key);
        }

        let mut builder = reqwest::Client::builder().default_headers(headers);
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }

        let http_client = builder
            .build()
            .map_err(|e| GeminiError::config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }
}

#[async_trait]
impl GenerativeTransport for HttpTransport {
    async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        let url = self.config.generate_content_url(model);
        debug!(model = %model, contents = request.contents.len(), "Sending generateContent");

        let response = self.http_client.post(&url).json(request).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(response.json::<GenerateContentResponse>().await?);
        }

        if status.as_u16() == 429 {
            let retry_after_seconds = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .unwrap_or(DEFAULT_RETRY_AFTER_SECONDS);
            return Err(GeminiError::RateLimitError {
                retry_after_seconds,
            });
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(classify_error(status.as_u16(), &error_body))
    }
}

fn classify_error(status: u16, body: &str) -> GeminiError {
    if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(body) {
        let detail = error_response.error;
        if status >= 500 {
            return GeminiError::ServerError {
                status_code: status,
                message: detail.message,
            };
        }
        return GeminiError::ApiError {
            status: detail.status,
            code: detail.code.or(Some(status)),
            message: detail.message,
        };
    }

    if status >= 500 {
        return GeminiError::ServerError {
            status_code: status,
            message: body.to_string(),
        };
    }

    GeminiError::http(
        format!("API request failed: {} - {}", status, body),
        Some(status),
    )
}
