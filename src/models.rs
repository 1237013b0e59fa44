#![allow(missing_docs)]

use crate::error::{GeminiError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Model {
    id: String,
}

impl Model {
    pub const GEMINI_2_5_FLASH: &'static str = "gemini-2.5-flash";
    pub const GEMINI_2_5_PRO: &'static str = "gemini-2.5-pro";
    pub const GEMINI_2_5_FLASH_IMAGE: &'static str = "gemini-2.5-flash-image";

    pub fn new<S: Into<String>>(id: S) -> Result<Self> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(GeminiError::invalid_parameter(
                "model",
                "Model ID cannot be empty",
            ));
        }

        Ok(Self { id })
    }

    /// Default model for chat sessions.
    pub fn chat() -> Self {
        Self {
            id: Self::GEMINI_2_5_FLASH.to_string(),
        }
    }

    pub fn image() -> Self {
        Self {
            id: Self::GEMINI_2_5_FLASH_IMAGE.to_string(),
        }
    }

    pub fn transcription() -> Self {
        Self {
            id: Self::GEMINI_2_5_FLASH.to_string(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl std::fmt::Display for Model {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id)
    }
}

impl std::str::FromStr for Model {
    type Err = GeminiError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl Default for Model {
    fn default() -> Self {
        Self::chat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_models() {
        assert_eq!(Model::image().id(), Model::GEMINI_2_5_FLASH_IMAGE);
        assert_eq!(Model::transcription().id(), Model::GEMINI_2_5_FLASH);
        assert_eq!(Model::default(), Model::chat());
    }

    #[test]
    fn test_empty_model_id() {
        assert!(Model::new("").is_err());
        assert!(Model::new("  ").is_err());
    }

    #[test]
    fn test_parse_and_display() {
        let model: Model = "gemini-2.5-pro".parse().unwrap();
        assert_eq!(model.to_string(), "gemini-2.5-pro");
    }
}
