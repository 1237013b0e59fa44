//! Tool declarations offered to the model in chat sessions.

#![allow(missing_docs)]

use crate::types::{FunctionDeclaration, Schema, Tool};

/// Name the model uses when it asks for an image.
pub const IMAGE_TOOL_NAME: &str = "generate_image";

/// Required string argument of [`IMAGE_TOOL_NAME`].
pub const IMAGE_TOOL_PROMPT_ARG: &str = "prompt";

const IMAGE_TOOL_DESCRIPTION: &str = "Generates an image from a text description. \
Only call this when the user explicitly asks to create, draw, paint or generate an image, \
picture or illustration.";

const IMAGE_TOOL_PROMPT_DESCRIPTION: &str =
    "A detailed description of the image to generate, including subject, style and composition.";

pub fn image_generation_declaration() -> FunctionDeclaration {
    FunctionDeclaration {
        name: IMAGE_TOOL_NAME.to_string(),
        description: IMAGE_TOOL_DESCRIPTION.to_string(),
        parameters: Some(Schema::object().with_required_property(
            IMAGE_TOOL_PROMPT_ARG,
            Schema::string(IMAGE_TOOL_PROMPT_DESCRIPTION),
        )),
    }
}

pub fn image_generation_tool() -> Tool {
    Tool {
        function_declarations: vec![image_generation_declaration()],
    }
}

/// Tool set attached to every chat session.
pub fn chat_tools() -> Vec<Tool> {
    vec![image_generation_tool()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SchemaType;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_chat_tools_declare_single_image_tool() {
        let tools = chat_tools();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].function_declarations.len(), 1);

        let declaration = &tools[0].function_declarations[0];
        assert_eq!(declaration.name, "generate_image");
        assert!(declaration.description.contains("explicitly asks"));

        let parameters = declaration.parameters.as_ref().unwrap();
        assert_eq!(parameters.schema_type, SchemaType::Object);
        assert_eq!(parameters.required, vec!["prompt".to_string()]);
        assert_eq!(parameters.properties["prompt"].schema_type, SchemaType::String);
    }
}
