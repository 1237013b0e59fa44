//! Multi-turn chat sessions.
//!
//! The provider's REST API is stateless, so a session keeps the
//! conversation itself and resends it with every message, together with the
//! system instruction and tool declarations it was created with.

#![allow(missing_docs)]

use serde_json::Value;
use tracing::debug;

use crate::client::GeminiClient;
use crate::error::Result;
use crate::models::Model;
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, Part, Role, Tool};

/// A conversation owned by the caller.
#[derive(Debug, Clone)]
pub struct ChatSession {
    client: GeminiClient,
    model: Model,
    system_instruction: String,
    tools: Vec<Tool>,
    history: Vec<Content>,
}

impl ChatSession {
    /// `history` is forwarded as given; the provider rejects malformed turns.
    pub fn new(
        client: GeminiClient,
        model: Model,
        system_instruction: String,
        tools: Vec<Tool>,
        history: Vec<Content>,
    ) -> Self {
        Self {
            client,
            model,
            system_instruction,
            tools,
            history,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn history(&self) -> &[Content] {
        &self.history
    }

    /// Builds the request that sending `message` would issue.
    pub fn build_request(&self, message: &Content) -> GenerateContentRequest {
        let mut contents = self.history.clone();
        contents.push(message.clone());

        GenerateContentRequest {
            contents,
            system_instruction: Some(Content::unattributed(vec![Part::text(
                self.system_instruction.clone(),
            )])),
            tools: if self.tools.is_empty() {
                None
            } else {
                Some(self.tools.clone())
            },
        }
    }

    /// Sends a user turn and records both sides on success.
    ///
    /// Function calls requested by the model are not executed here; inspect
    /// [`GenerateContentResponse::function_calls`] and answer with
    /// [`ChatSession::send_function_response`].
    pub async fn send_message(&mut self, parts: Vec<Part>) -> Result<GenerateContentResponse> {
        self.send(Content::user(parts)).await
    }

    pub async fn send_text<S: Into<String>>(&mut self, text: S) -> Result<GenerateContentResponse> {
        self.send_message(vec![Part::text(text)]).await
    }

    pub async fn send_function_response<S: Into<String>>(
        &mut self,
        name: S,
        response: Value,
    ) -> Result<GenerateContentResponse> {
        self.send_message(vec![Part::function_response(name, response)])
            .await
    }

    async fn send(&mut self, message: Content) -> Result<GenerateContentResponse> {
        let request = self.build_request(&message);
        debug!(model = %self.model, turns = request.contents.len(), "Sending chat message");

        let response = self.client.generate_content(&self.model, &request).await?;

        self.history.push(message);
        if let Some(content) = response.clone().into_first_content() {
            if !content.parts.is_empty() {
                self.history.push(Content {
                    role: content.role.or(Some(Role::Model)),
                    parts: content.parts,
                });
            }
        }

        Ok(response)
    }
}
