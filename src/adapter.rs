#![allow(missing_docs)]

use tracing::{debug, error};

use crate::audio::{encode_audio, AudioSource};
use crate::chat::ChatSession;
use crate::client::GeminiClient;
use crate::config::AssistantConfig;
use crate::error::Result;
use crate::models::Model;
use crate::prompts::render_transcription_instruction;
use crate::tools::chat_tools;
use crate::types::{Content, GenerateContentRequest, GenerateContentResponse, Part};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranscriptionFailureKind {
    /// The audio could not be read.
    Encoding,
    /// The provider call failed.
    Provider,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptionFailure {
    pub kind: TranscriptionFailureKind,
    pub message: String,
}

/// Outcome of a transcription request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transcription {
    Speech(String),
    /// The model answered with the no-speech sentinel.
    NoSpeech,
    /// The model answered without any text.
    Empty,
    Failed(TranscriptionFailure),
}

impl Transcription {
    /// Text a caller would display: the transcript, the sentinel verbatim,
    /// or empty for `Empty` and `Failed`.
    pub fn into_text(self, sentinel: &str) -> String {
        match self {
            Self::Speech(text) => text,
            Self::NoSpeech => sentinel.to_string(),
            Self::Empty | Self::Failed(_) => String::new(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranscriptionText {
    pub text: String,
}

/// Entry point for chat, generation, image and transcription calls.
#[derive(Debug, Clone)]
pub struct GeminiAdapter {
    client: GeminiClient,
    config: AssistantConfig,
}

impl GeminiAdapter {
    pub fn new(client: GeminiClient, config: AssistantConfig) -> Self {
        Self { client, config }
    }

    pub fn with_defaults(client: GeminiClient) -> Self {
        Self::new(client, AssistantConfig::default())
    }

    pub fn client(&self) -> &GeminiClient {
        &self.client
    }

    pub fn config(&self) -> &AssistantConfig {
        &self.config
    }

    /// Opens a session carrying the persona and the image tool.
    pub fn create_chat(&self, model: &Model, history: Option<Vec<Content>>) -> ChatSession {
        ChatSession::new(
            self.client.clone(),
            model.clone(),
            self.config.system_instruction().to_string(),
            chat_tools(),
            history.unwrap_or_default(),
        )
    }

    /// Sends `parts` as one user turn. Provider errors are returned as is.
    pub async fn generate_content(
        &self,
        model: &Model,
        parts: Vec<Part>,
    ) -> Result<GenerateContentResponse> {
        debug!(model = %model, parts = parts.len(), "Generating content");
        let request = GenerateContentRequest::from_parts(parts);
        self.client.generate_content(model, &request).await
    }

    /// Always targets the configured image model. The request carries only
    /// the prompt; image models reject response schema settings.
    pub async fn generate_image(&self, prompt: &str) -> Result<GenerateContentResponse> {
        let model = self.config.image_model();
        debug!(model = %model, "Generating image");
        let request = GenerateContentRequest::from_parts(vec![Part::text(prompt)]);
        self.client.generate_content(model, &request).await
    }

    pub async fn transcribe_audio_detailed(&self, source: &dyn AudioSource) -> Transcription {
        let encoded = match encode_audio(source, self.config.default_audio_mime_type()).await {
            Ok(encoded) => encoded,
            Err(e) => {
                return Transcription::Failed(TranscriptionFailure {
                    kind: TranscriptionFailureKind::Encoding,
                    message: e.to_string(),
                })
            }
        };

        let model = self.config.transcription_model();
        debug!(model = %model, mime_type = %encoded.mime_type, "Transcribing audio");

        let instruction = render_transcription_instruction(
            self.config.transcription_language(),
            self.config.no_speech_sentinel(),
        );
        let request = GenerateContentRequest::from_parts(vec![
            Part::inline_data(encoded.mime_type, encoded.data),
            Part::text(instruction),
        ]);

        match self.client.generate_content(model, &request).await {
            Ok(response) => self.classify_transcript(response.text()),
            Err(e) => Transcription::Failed(TranscriptionFailure {
                kind: TranscriptionFailureKind::Provider,
                message: e.to_string(),
            }),
        }
    }

    /// Best-effort transcription: failures are logged and yield empty text.
    pub async fn transcribe_audio(&self, source: &dyn AudioSource) -> TranscriptionText {
        let transcription = self.transcribe_audio_detailed(source).await;
        if let Transcription::Failed(failure) = &transcription {
            error!(kind = ?failure.kind, "Audio transcription failed: {}", failure.message);
        }
        TranscriptionText {
            text: transcription.into_text(self.config.no_speech_sentinel()),
        }
    }

    fn classify_transcript(&self, text: String) -> Transcription {
        if text.trim() == self.config.no_speech_sentinel() {
            Transcription::NoSpeech
        } else if text.trim().is_empty() {
            Transcription::Empty
        } else {
            Transcription::Speech(text)
        }
    }
}
