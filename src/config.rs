#![allow(missing_docs)]

use std::time::Duration;

use tracing::warn;

use crate::error::Result;
use crate::models::Model;
use crate::prompts::{
    render_system_instruction, DEFAULT_ASSISTANT_NAME, DEFAULT_TRANSCRIPTION_LANGUAGE,
    NO_SPEECH_SENTINEL,
};

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_API_VERSION: &str = "v1beta";
pub const DEFAULT_AUDIO_MIME_TYPE: &str = "audio/webm";

pub const API_KEY_ENV: &str = "GEMINI_API_KEY";
pub const FALLBACK_API_KEY_ENV: &str = "GOOGLE_GENERATIVE_AI_API_KEY";

fn env_non_empty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.trim().is_empty())
}

/// Connection settings for the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    api_key: String,
    base_url: String,
    api_version: String,
    timeout_seconds: Option<u64>,
}

impl GeminiConfig {
    /// An empty key is accepted; the provider rejects it on the first call.
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            timeout_seconds: None,
        }
    }

    pub fn from_env() -> Self {
        let api_key = env_non_empty(API_KEY_ENV)
            .or_else(|| env_non_empty(FALLBACK_API_KEY_ENV))
            .unwrap_or_else(|| {
                warn!(
                    "{} is not set; requests will fail authentication",
                    API_KEY_ENV
                );
                String::new()
            });

        let mut config = Self::new(api_key);

        if let Some(base_url) = env_non_empty("GEMINI_BASE_URL") {
            config.base_url = base_url;
        }

        if let Some(api_version) = env_non_empty("GEMINI_API_VERSION") {
            config.api_version = api_version;
        }

        if let Some(timeout_str) = env_non_empty("GEMINI_TIMEOUT_SECONDS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) => config.timeout_seconds = Some(timeout),
                Err(_) => warn!(value = %timeout_str, "Ignoring invalid GEMINI_TIMEOUT_SECONDS"),
            }
        }

        config
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn api_version(&self) -> &str {
        &self.api_version
    }

    pub fn timeout_seconds(&self) -> Option<u64> {
        self.timeout_seconds
    }

    /// Local request deadline. `None` (the default) and zero leave timing to
    /// the provider's transport.
    pub fn request_timeout(&self) -> Option<Duration> {
        self.timeout_seconds
            .filter(|seconds| *seconds > 0)
            .map(Duration::from_secs)
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_api_version<S: Into<String>>(mut self, api_version: S) -> Self {
        self.api_version = api_version.into();
        self
    }

    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = Some(seconds);
        self
    }

    pub fn generate_content_url(&self, model: &Model) -> String {
        format!(
            "{}/{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.api_version,
            model.id()
        )
    }
}

/// Adapter behavior: persona, fixed models and transcription policy.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    assistant_name: String,
    system_instruction: String,
    image_model: Model,
    transcription_model: Model,
    transcription_language: String,
    no_speech_sentinel: String,
    default_audio_mime_type: String,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            assistant_name: DEFAULT_ASSISTANT_NAME.to_string(),
            system_instruction: render_system_instruction(DEFAULT_ASSISTANT_NAME),
            image_model: Model::image(),
            transcription_model: Model::transcription(),
            transcription_language: DEFAULT_TRANSCRIPTION_LANGUAGE.to_string(),
            no_speech_sentinel: NO_SPEECH_SENTINEL.to_string(),
            default_audio_mime_type: DEFAULT_AUDIO_MIME_TYPE.to_string(),
        }
    }
}

impl AssistantConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Some(name) = env_non_empty("ASSISTANT_NAME") {
            config = config.with_assistant_name(name);
        }

        if let Some(instruction) = env_non_empty("ASSISTANT_SYSTEM_INSTRUCTION") {
            config.system_instruction = instruction;
        }

        if let Some(model_id) = env_non_empty("GEMINI_IMAGE_MODEL") {
            config.image_model = Model::new(model_id)?;
        }

        if let Some(model_id) = env_non_empty("GEMINI_TRANSCRIPTION_MODEL") {
            config.transcription_model = Model::new(model_id)?;
        }

        if let Some(language) = env_non_empty("TRANSCRIPTION_LANGUAGE") {
            config.transcription_language = language;
        }

        Ok(config)
    }

    pub fn assistant_name(&self) -> &str {
        &self.assistant_name
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn image_model(&self) -> &Model {
        &self.image_model
    }

    pub fn transcription_model(&self) -> &Model {
        &self.transcription_model
    }

    pub fn transcription_language(&self) -> &str {
        &self.transcription_language
    }

    pub fn no_speech_sentinel(&self) -> &str {
        &self.no_speech_sentinel
    }

    pub fn default_audio_mime_type(&self) -> &str {
        &self.default_audio_mime_type
    }

    /// Also re-renders the default persona under the new name.
    pub fn with_assistant_name<S: Into<String>>(mut self, name: S) -> Self {
        self.assistant_name = name.into();
        self.system_instruction = render_system_instruction(&self.assistant_name);
        self
    }

    pub fn with_system_instruction<S: Into<String>>(mut self, instruction: S) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn with_image_model(mut self, model: Model) -> Self {
        self.image_model = model;
        self
    }

    pub fn with_transcription_model(mut self, model: Model) -> Self {
        self.transcription_model = model;
        self
    }

    pub fn with_transcription_language<S: Into<String>>(mut self, language: S) -> Self {
        self.transcription_language = language.into();
        self
    }

    pub fn with_no_speech_sentinel<S: Into<String>>(mut self, sentinel: S) -> Self {
        self.no_speech_sentinel = sentinel.into();
        self
    }

    pub fn with_default_audio_mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.default_audio_mime_type = mime_type.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_new() {
        let config = GeminiConfig::new("test-key");
        assert_eq!(config.api_key(), "test-key");
        assert_eq!(config.base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.timeout_seconds(), None);
        assert!(config.has_api_key());
    }

    #[test]
    fn test_config_empty_key_is_accepted() {
        let config = GeminiConfig::new("");
        assert!(!config.has_api_key());
    }

    #[test]
    fn test_config_builder() {
        let config = GeminiConfig::new("test-key")
            .with_base_url("https://custom.api.com/")
            .with_api_version("v1")
            .with_timeout(120);

        assert_eq!(config.timeout_seconds(), Some(120));
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(120)));
        assert_eq!(
            config.generate_content_url(&Model::chat()),
            "https://custom.api.com/v1/models/gemini-2.5-flash:generateContent"
        );
    }

    #[test]
    fn test_default_config_applies_no_local_timeout() {
        assert_eq!(GeminiConfig::new("test-key").request_timeout(), None);
        assert_eq!(
            GeminiConfig::new("test-key").with_timeout(0).request_timeout(),
            None
        );
    }

    #[test]
    fn test_generate_content_url_keeps_key_out_of_query() {
        let config = GeminiConfig::new("secret-key");
        let url = config.generate_content_url(&Model::image());
        assert!(url.ends_with("/v1beta/models/gemini-2.5-flash-image:generateContent"));
        assert!(!url.contains("secret-key"));
    }

    #[test]
    fn test_assistant_defaults() {
        let config = AssistantConfig::default();
        assert_eq!(config.assistant_name(), DEFAULT_ASSISTANT_NAME);
        assert_eq!(config.image_model().id(), Model::GEMINI_2_5_FLASH_IMAGE);
        assert_eq!(config.no_speech_sentinel(), "[[NO_SPEECH]]");
        assert_eq!(config.default_audio_mime_type(), "audio/webm");
    }

    #[test]
    fn test_assistant_name_rerenders_persona() {
        let config = AssistantConfig::new().with_assistant_name("Nova");
        assert!(config.system_instruction().starts_with("You are Nova"));

        let config = config.with_system_instruction("Be brief.");
        assert_eq!(config.system_instruction(), "Be brief.");
    }
}
