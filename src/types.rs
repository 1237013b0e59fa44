#![allow(missing_docs)]

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn new(role: Role, parts: Vec<Part>) -> Self {
        Self {
            role: Some(role),
            parts,
        }
    }

    pub fn user(parts: Vec<Part>) -> Self {
        Self::new(Role::User, parts)
    }

    pub fn model(parts: Vec<Part>) -> Self {
        Self::new(Role::Model, parts)
    }

    /// Content without a role, as used for `systemInstruction`.
    pub fn unattributed(parts: Vec<Part>) -> Self {
        Self { role: None, parts }
    }

    pub fn text(&self) -> String {
        self.parts.iter().filter_map(Part::as_text).collect()
    }
}

/// A unit of multimodal content.
///
/// Parts the crate does not model (executable code, file references) are
/// carried through untouched in [`Part::Other`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
        #[serde(
            rename = "thoughtSignature",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        thought_signature: Option<String>,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
        #[serde(
            rename = "thoughtSignature",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        thought_signature: Option<String>,
    },
    FunctionCall {
        #[serde(rename = "functionCall")]
        function_call: FunctionCall,
        #[serde(
            rename = "thoughtSignature",
            default,
            skip_serializing_if = "Option::is_none"
        )]
        thought_signature: Option<String>,
    },
    FunctionResponse {
        #[serde(rename = "functionResponse")]
        function_response: FunctionResponse,
    },
    Other(Value),
}

impl Part {
    pub fn text<S: Into<String>>(text: S) -> Self {
        Self::Text {
            text: text.into(),
            thought_signature: None,
        }
    }

    /// `data` must already be base64 encoded.
    pub fn inline_data<M: Into<String>, D: Into<String>>(mime_type: M, data: D) -> Self {
        Self::InlineData {
            inline_data: InlineData {
                mime_type: mime_type.into(),
                data: data.into(),
            },
            thought_signature: None,
        }
    }

    pub fn function_response<S: Into<String>>(name: S, response: Value) -> Self {
        Self::FunctionResponse {
            function_response: FunctionResponse {
                name: name.into(),
                response,
            },
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text, .. } => Some(text),
            _ => None,
        }
    }

    pub fn as_inline_data(&self) -> Option<&InlineData> {
        match self {
            Self::InlineData { inline_data, .. } => Some(inline_data),
            _ => None,
        }
    }

    pub fn as_function_call(&self) -> Option<&FunctionCall> {
        match self {
            Self::FunctionCall { function_call, .. } => Some(function_call),
            _ => None,
        }
    }

    /// Opaque signature the provider attaches to model output; it must be
    /// sent back unchanged when the turn is replayed.
    pub fn thought_signature(&self) -> Option<&str> {
        match self {
            Self::Text {
                thought_signature, ..
            }
            | Self::InlineData {
                thought_signature, ..
            }
            | Self::FunctionCall {
                thought_signature, ..
            } => thought_signature.as_deref(),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    #[serde(default)]
    pub args: Value,
}

impl FunctionCall {
    /// Reads a string argument, e.g. `prompt` of the image tool.
    pub fn string_arg(&self, key: &str) -> Option<&str> {
        self.args.get(key).and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResponse {
    pub name: String,
    pub response: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<Schema>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Array,
    Object,
}

/// Subset of the OpenAPI schema accepted for function parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "type")]
    pub schema_type: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
}

impl Schema {
    pub fn new(schema_type: SchemaType) -> Self {
        Self {
            schema_type,
            description: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }

    pub fn object() -> Self {
        Self::new(SchemaType::Object)
    }

    pub fn string<S: Into<String>>(description: S) -> Self {
        Self::new(SchemaType::String).with_description(description)
    }

    pub fn with_description<S: Into<String>>(mut self, description: S) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_required_property<S: Into<String>>(mut self, name: S, schema: Schema) -> Self {
        let name = name.into();
        self.required.push(name.clone());
        self.properties.insert(name, schema);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tools: Option<Vec<Tool>>,
}

impl GenerateContentRequest {
    /// A single user turn holding `parts` verbatim.
    pub fn from_parts(parts: Vec<Part>) -> Self {
        Self {
            contents: vec![Content::user(parts)],
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_token_count: u32,
    #[serde(default)]
    pub candidates_token_count: u32,
    #[serde(default)]
    pub total_token_count: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_reason: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub candidates: Option<Vec<Candidate>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<TokenUsage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt_feedback: Option<PromptFeedback>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_version: Option<String>,
}

impl GenerateContentResponse {
    fn first_content(&self) -> Option<&Content> {
        self.candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.content.as_ref())
    }

    /// Concatenated text of the first candidate, empty when there is none.
    pub fn text(&self) -> String {
        self.first_content().map(Content::text).unwrap_or_default()
    }

    pub fn function_calls(&self) -> Vec<&FunctionCall> {
        self.first_content()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(Part::as_function_call)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Binary outputs of the first candidate, such as generated images.
    pub fn inline_data(&self) -> Vec<&InlineData> {
        self.first_content()
            .map(|content| {
                content
                    .parts
                    .iter()
                    .filter_map(Part::as_inline_data)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates
            .as_ref()
            .and_then(|c| c.first())
            .and_then(|c| c.finish_reason.as_deref())
    }

    pub(crate) fn into_first_content(self) -> Option<Content> {
        self.candidates
            .and_then(|c| c.into_iter().next())
            .and_then(|c| c.content)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorDetail {
    #[serde(default)]
    pub code: Option<u16>,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_part_wire_shapes() {
        let parts = vec![
            Part::text("hello"),
            Part::inline_data("audio/wav", "AAAA"),
        ];
        assert_eq!(
            serde_json::to_value(&parts).unwrap(),
            json!([
                { "text": "hello" },
                { "inlineData": { "mimeType": "audio/wav", "data": "AAAA" } }
            ])
        );
    }

    #[test]
    fn test_response_text_and_function_calls() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{
                "content": {
                    "role": "model",
                    "parts": [
                        { "text": "Sure, " },
                        { "text": "drawing now." },
                        { "functionCall": { "name": "generate_image", "args": { "prompt": "a cat" } } },
                        { "executableCode": { "language": "PYTHON", "code": "print(1)" } }
                    ]
                },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.text(), "Sure, drawing now.");
        let calls = response.function_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].string_arg("prompt"), Some("a cat"));
        assert_eq!(response.finish_reason(), Some("STOP"));
        assert!(matches!(
            response.candidates.as_ref().unwrap()[0].content.as_ref().unwrap().parts[3],
            Part::Other(_)
        ));
    }

    #[test]
    fn test_thought_signature_survives_round_trip() {
        let wire = json!({
            "functionCall": { "name": "generate_image", "args": { "prompt": "x" } },
            "thoughtSignature": "SIG123"
        });
        let part: Part = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(part.thought_signature(), Some("SIG123"));
        assert_eq!(part.as_function_call().unwrap().name, "generate_image");
        assert_eq!(serde_json::to_value(&part).unwrap(), wire);

        let text: Part =
            serde_json::from_value(json!({ "text": "hi", "thoughtSignature": "T1" })).unwrap();
        assert_eq!(text.thought_signature(), Some("T1"));
        assert_eq!(
            serde_json::to_value(Part::text("hi")).unwrap(),
            json!({ "text": "hi" })
        );
    }

    #[test]
    fn test_textless_response_yields_empty_text() {
        let response: GenerateContentResponse = serde_json::from_value(json!({
            "candidates": [{ "content": { "role": "model" }, "finishReason": "SAFETY" }]
        }))
        .unwrap();
        assert_eq!(response.text(), "");

        assert_eq!(GenerateContentResponse::default().text(), "");
    }

    #[test]
    fn test_schema_serialization() {
        let schema = Schema::object()
            .with_required_property("prompt", Schema::string("What to draw"));
        assert_eq!(
            serde_json::to_value(&schema).unwrap(),
            json!({
                "type": "OBJECT",
                "properties": {
                    "prompt": { "type": "STRING", "description": "What to draw" }
                },
                "required": ["prompt"]
            })
        );
    }

    #[test]
    fn test_request_omits_empty_sections() {
        let request = GenerateContentRequest::from_parts(vec![Part::text("hi")]);
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "contents": [{ "role": "user", "parts": [{ "text": "hi" }] }] })
        );
    }
}
