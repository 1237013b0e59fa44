use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::{GeminiError, Result};
use crate::models::Model;
use crate::transport::GenerativeTransport;
use crate::types::{Candidate, Content, GenerateContentRequest, GenerateContentResponse, Part};

pub(crate) enum Reply {
    Response(GenerateContentResponse),
    Network,
}

/// Transport that records every request and answers with a fixed reply.
pub(crate) struct RecordingTransport {
    reply: Reply,
    calls: Mutex<Vec<(Model, GenerateContentRequest)>>,
}

impl RecordingTransport {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn replying_text(text: &str) -> Self {
        Self::new(Reply::Response(text_response(text)))
    }

    pub(crate) fn replying(response: GenerateContentResponse) -> Self {
        Self::new(Reply::Response(response))
    }

    pub(crate) fn failing() -> Self {
        Self::new(Reply::Network)
    }

    pub(crate) fn calls(&self) -> Vec<(Model, GenerateContentRequest)> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_call(&self) -> (Model, GenerateContentRequest) {
        self.calls().pop().expect("no request was sent")
    }
}

#[async_trait]
impl GenerativeTransport for RecordingTransport {
    async fn generate_content(
        &self,
        model: &Model,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse> {
        self.calls
            .lock()
            .unwrap()
            .push((model.clone(), request.clone()));

        match &self.reply {
            Reply::Response(response) => Ok(response.clone()),
            Reply::Network => Err(GeminiError::NetworkError {
                message: "connection refused".to_string(),
            }),
        }
    }
}

pub(crate) fn text_response(text: &str) -> GenerateContentResponse {
    GenerateContentResponse {
        candidates: Some(vec![Candidate {
            content: Some(Content::model(vec![Part::text(text)])),
            finish_reason: Some("STOP".to_string()),
            index: Some(0),
        }]),
        ..Default::default()
    }
}
