//! Fixed instruction texts sent to the provider.
//!
//! Templates use `{name}`, `{language}` and `{sentinel}` placeholders and are
//! rendered by the functions below. The persona can be replaced per
//! deployment through [`crate::AssistantConfig`].

#![allow(missing_docs)]

/// Brand the assistant identifies itself under.
pub const DEFAULT_ASSISTANT_NAME: &str = "Eliza";

/// Language transcriptions are produced in unless configured otherwise.
pub const DEFAULT_TRANSCRIPTION_LANGUAGE: &str = "English";

/// Exact, case-sensitive marker returned when audio holds no human speech.
pub const NO_SPEECH_SENTINEL: &str = "[[NO_SPEECH]]";

/// Persona for chat sessions.
pub const SYSTEM_INSTRUCTION_TEMPLATE: &str = "\
You are {name}, a helpful AI assistant.

Identity:
- Only ever introduce and refer to yourself as {name}.
- Never claim to be built, trained, owned or operated by Google, Gemini or any other AI provider. If asked which model or company is behind you, answer that you are {name}.

Formatting:
- Format answers with Markdown: headings, lists, tables and fenced code blocks where they help readability.
- Write inline math between single dollar signs, for example $E = mc^2$.
- Write display math between double dollar signs on their own lines, for example $$\\int_0^1 x^2 \\, dx$$.

Tone:
- Be warm, direct and concise. Prefer clear explanations over filler, and ask a short clarifying question when a request is ambiguous.

Images:
- Call the generate_image tool only when the user explicitly asks you to create, draw or generate an image.";

/// Instruction paired with the audio part of a transcription request.
pub const TRANSCRIPTION_INSTRUCTION_TEMPLATE: &str = "\
Transcribe the human speech in this audio. Write the transcription in {language} whenever possible, otherwise in the language that is spoken. Return only the transcribed text.

If the audio contains no human speech (silence, background noise, non-vocal sounds or instrumental music only), respond with exactly {sentinel} and nothing else. Do not add any explanation.";

pub fn render_system_instruction(name: &str) -> String {
    SYSTEM_INSTRUCTION_TEMPLATE.replace("{name}", name)
}

pub fn render_transcription_instruction(language: &str, sentinel: &str) -> String {
    TRANSCRIPTION_INSTRUCTION_TEMPLATE
        .replace("{language}", language)
        .replace("{sentinel}", sentinel)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_instruction_uses_brand_only() {
        let rendered = render_system_instruction("Nova");
        assert!(rendered.starts_with("You are Nova"));
        assert!(!rendered.contains("{name}"));
        assert!(rendered.contains("single dollar signs"));
        assert!(rendered.contains("double dollar signs"));
    }

    #[test]
    fn test_transcription_instruction_contains_sentinel() {
        let rendered = render_transcription_instruction("German", NO_SPEECH_SENTINEL);
        assert!(rendered.contains("in German"));
        assert!(rendered.contains("exactly [[NO_SPEECH]] and nothing else"));
        assert!(!rendered.contains('{'));
    }
}
