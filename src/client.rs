#![allow(missing_docs)]

use std::sync::Arc;

use crate::config::GeminiConfig;
use crate::error::Result;
use crate::models::Model;
use crate::transport::{GenerativeTransport, HttpTransport};
use crate::types::{GenerateContentRequest, GenerateContentResponse};

/// Authenticated handle to the provider.
///
/// Clones share the same transport, so one handle can be constructed at
/// startup and passed to every component that talks to the provider.
#[derive(Clone)]
pub struct GeminiClient {
    transport: Arc<dyn GenerativeTransport>,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self> {
        Ok(Self::with_transport(HttpTransport::new(config)?))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(GeminiConfig::from_env())
    }

    pub fn with_transport<T: GenerativeTransport + 'static>(transport: T) -> Self {
        Self {
            transport: Arc::new(transport),
        }
    }

    pub fn from_shared(transport: Arc<dyn GenerativeTransport>) -> Self {
        Self { transport }
    }

    pub async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.transport.generate_content(model, request).await
    }
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient").finish_non_exhaustive()
    }
}
