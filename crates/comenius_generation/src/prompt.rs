//! The prompt contract for lesson generation.
//!
//! The model is asked for a single JSON document in the `lesson/v1` format.
//! The system prompt pins the schema; the user prompt embeds the outline
//! verbatim. Sampling parameters are fixed so attempts are comparable.

use comenius_core::{GenerateRequest, Message, LESSON_FORMAT};

/// Maximum tokens requested per generation.
pub const GENERATION_MAX_TOKENS: u32 = 4000;

/// Sampling temperature for generation.
pub const GENERATION_TEMPERATURE: f32 = 0.7;

const SYSTEM_PROMPT: &str = r#"You are an expert educational content creator specializing in creating interactive, engaging lessons for students. Your task is to generate a lesson document based on the provided outline.

CRITICAL REQUIREMENTS:
1. Respond with a SINGLE JSON object and nothing else
2. Do NOT include any markdown formatting or code fences in your response
3. The document must declare "format": "lesson/v1"
4. The document must have a "title" and exactly one "root" component
5. Components are objects with a "type" field; allowed types: heading, paragraph, section, list, button, conditional, quiz
6. Nest content inside "section" components with a "children" array
7. Include interactive elements when appropriate (quizzes, buttons)
8. For quizzes, every question needs a numeric "id", a "prompt", an "options" array, and the zero-based "answer" index of the correct option; add an "explanation" when it helps
9. Buttons carry an "on_press" action object; allowed actions: set, toggle, increment, select_answer, reveal_result
10. Use appropriate educational structure (headings, sections, lists, examples)
11. The lesson should be self-contained and render immediately

REQUIRED STRUCTURE (follow exactly):
{
  "format": "lesson/v1",
  "title": "Lesson Title",
  "root": {
    "type": "section",
    "title": "Lesson Title",
    "children": [
      { "type": "heading", "level": 2, "text": "Introduction" },
      { "type": "paragraph", "text": "Educational content here" },
      {
        "type": "quiz",
        "questions": [
          {
            "id": 1,
            "prompt": "What is 7 - 5?",
            "options": ["1", "2", "3", "4"],
            "answer": 1,
            "explanation": "7 - 5 = 2"
          }
        ]
      }
    ]
  }
}

Generate a complete, production-ready lesson document that validates against this structure."#;

/// Build the model request for an outline.
///
/// The outline is embedded verbatim in the user prompt; the model override is
/// left to the driver when `model` is `None`.
pub fn build_request(outline: &str, model: Option<String>) -> GenerateRequest {
    let user_prompt = format!(
        "Create an interactive educational lesson based on this outline:\n\n{outline}\n\nGenerate a complete {LESSON_FORMAT} JSON document that will render beautifully for students. Make it engaging and educational."
    );

    GenerateRequest {
        messages: vec![Message::system(SYSTEM_PROMPT), Message::user(user_prompt)],
        max_tokens: Some(GENERATION_MAX_TOKENS),
        temperature: Some(GENERATION_TEMPERATURE),
        model,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use comenius_core::Role;

    #[test]
    fn request_embeds_outline_verbatim() {
        let request = build_request("A 3 question quiz on addition", None);
        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.messages[0].role, Role::System);
        assert_eq!(request.messages[1].role, Role::User);
        assert!(request.messages[1]
            .content
            .contains("A 3 question quiz on addition"));
    }

    #[test]
    fn request_uses_fixed_parameters() {
        let request = build_request("counting", Some("gpt-4o".to_string()));
        assert_eq!(request.max_tokens, Some(GENERATION_MAX_TOKENS));
        assert_eq!(request.temperature, Some(GENERATION_TEMPERATURE));
        assert_eq!(request.model.as_deref(), Some("gpt-4o"));
    }

    #[test]
    fn system_prompt_pins_the_format() {
        let request = build_request("counting", None);
        assert!(request.messages[0].content.contains(LESSON_FORMAT));
    }
}
