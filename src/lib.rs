//! Gemini assistant plugin for ElizaOS.
//!
//! This crate adapts Google's Gemini API for an assistant front end: chat
//! sessions carrying a fixed persona and an image generation tool, one-shot
//! content generation, image generation, and best-effort audio transcription.
//!
//! The client handle is built once and injected:
//!
//! ```no_run
//! use elizaos_plugin_gemini_assistant::{AssistantConfig, GeminiAdapter, GeminiClient, GeminiConfig};
//!
//! # fn main() -> elizaos_plugin_gemini_assistant::Result<()> {
//! let client = GeminiClient::new(GeminiConfig::new("my-api-key"))?;
//! let adapter = GeminiAdapter::new(client, AssistantConfig::default());
//! # let _ = adapter;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod adapter;
pub mod audio;
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod prompts;
pub mod tools;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use adapter::{
    GeminiAdapter, Transcription, TranscriptionFailure, TranscriptionFailureKind,
    TranscriptionText,
};
pub use audio::{AudioBlob, AudioFile, AudioSource, EncodedAudio};
pub use chat::ChatSession;
pub use client::GeminiClient;
pub use config::{AssistantConfig, GeminiConfig};
pub use error::{GeminiError, Result};
pub use models::Model;
pub use prompts::NO_SPEECH_SENTINEL;
pub use tools::IMAGE_TOOL_NAME;
pub use transport::{GenerativeTransport, HttpTransport};
pub use types::{
    Content, FunctionCall, GenerateContentRequest, GenerateContentResponse, InlineData, Part,
    Role,
};

/// Creates an adapter using configuration from environment variables.
///
/// A missing API key is not reported here; the provider rejects the first
/// request instead.
///
/// # Errors
///
/// Returns an error if a configured model ID is invalid or the HTTP client
/// cannot be built.
pub fn create_adapter_from_env() -> Result<GeminiAdapter> {
    let client = GeminiClient::from_env()?;
    let config = AssistantConfig::from_env()?;
    Ok(GeminiAdapter::new(client, config))
}

/// The name identifier for this plugin.
pub const PLUGIN_NAME: &str = "gemini-assistant";

/// A human-readable description of this plugin's functionality.
pub const PLUGIN_DESCRIPTION: &str =
    "Gemini assistant adapter with chat sessions, image generation and audio transcription";

/// The version of this plugin, derived from Cargo.toml.
pub const PLUGIN_VERSION: &str = env!("CARGO_PKG_VERSION");
