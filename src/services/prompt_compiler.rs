use crate::{
    constants::quiz_prompt::{
        CHATML_ASSISTANT_OPEN, CHATML_CLOSE, CHATML_SYSTEM_OPEN, CHATML_USER_OPEN,
        FILL_BLANK_DIRECTIVE, FILL_BLANK_OUTPUT_TEMPLATE, FILL_BLANK_ROLE, MCQ_DIRECTIVE,
        MCQ_OUTPUT_TEMPLATE, MCQ_ROLE,
    },
    models::domain::{ItemType, SourceChunk},
};

struct PromptParts {
    role: &'static str,
    template: &'static str,
    directive: &'static str,
}

fn parts_for(item_type: ItemType) -> PromptParts {
    match item_type {
        ItemType::Mcq => PromptParts {
            role: MCQ_ROLE,
            template: MCQ_OUTPUT_TEMPLATE,
            directive: MCQ_DIRECTIVE,
        },
        ItemType::FillBlank => PromptParts {
            role: FILL_BLANK_ROLE,
            template: FILL_BLANK_OUTPUT_TEMPLATE,
            directive: FILL_BLANK_DIRECTIVE,
        },
    }
}

/// Builds the complete ChatML prompt for one chunk. The output is a pure
/// function of the chunk text and the item type.
pub fn compile(chunk: &SourceChunk, item_type: ItemType) -> String {
    compile_context(&chunk.text, item_type)
}

pub fn compile_context(context: &str, item_type: ItemType) -> String {
    let parts = parts_for(item_type);

    format!(
        "{system_open}{role}\n{template}{close}\n{user_open}Texte: {context}\n\n{directive}{close}\n{assistant_open}",
        system_open = CHATML_SYSTEM_OPEN,
        role = parts.role,
        template = parts.template,
        close = CHATML_CLOSE,
        user_open = CHATML_USER_OPEN,
        context = context,
        directive = parts.directive,
        assistant_open = CHATML_ASSISTANT_OPEN,
    )
}
