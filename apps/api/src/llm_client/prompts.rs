// System prompts and prompt augmentation for the remote completion endpoint.

/// System prompt sent as a `system` role message on single-shot requests.
pub const ASSISTANT_SYSTEM: &str = "You are Akansha's AI assistant. Be helpful, concise, and friendly. \
    Provide information about Akansha's experience, projects, and skills based on her portfolio. \
    Format your responses using markdown for better readability - use headings, bullet points, bold, \
    and links where appropriate. If the user asks for a specific project, provide details about that \
    project. If the user asks for a skill, provide details about that skill. If the user asks for \
    contact information, provide Akansha's email address. If the user asks for education, provide \
    details about Akansha's education. If the user asks for experience, provide details about \
    Akansha's work experience. If they ask irrelevant questions, provide a generic response.";

/// Top-level `system` field on streaming requests.
pub const ASSISTANT_STREAM_SYSTEM: &str = "You are Akansha's AI assistant. Be helpful, concise, and friendly. \
    Provide information about Akansha's experience, projects, and skills based on her portfolio. \
    Format your responses using markdown for better readability - use headings, bullet points, bold, \
    and links where appropriate.";

/// Prompts shorter than this get the portfolio digest appended (single-shot).
pub const COMPLETION_CONTEXT_LIMIT: usize = 4000;
/// Same threshold for streaming requests.
pub const STREAM_CONTEXT_LIMIT: usize = 100;

/// Appends the portfolio digest when the prompt is short enough.
pub fn augment_prompt(prompt: &str, digest: &str, limit: usize) -> String {
    if prompt.chars().count() < limit {
        format!("{prompt}\n\nBelow is the portfolio of Akansha {digest}")
    } else {
        prompt.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_prompt_is_augmented() {
        let out = augment_prompt("hello", "DIGEST", STREAM_CONTEXT_LIMIT);
        assert_eq!(out, "hello\n\nBelow is the portfolio of Akansha DIGEST");
    }

    #[test]
    fn test_long_prompt_is_untouched() {
        let prompt = "x".repeat(STREAM_CONTEXT_LIMIT);
        assert_eq!(augment_prompt(&prompt, "DIGEST", STREAM_CONTEXT_LIMIT), prompt);
    }
}
