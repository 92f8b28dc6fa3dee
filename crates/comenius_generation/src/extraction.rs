//! Utilities for cleaning raw model completions.
//!
//! Models routinely wrap their output in markdown code fences even when asked
//! not to. Stripping is a pure text transform: it tolerates zero, one, or many
//! fences, never fails, and is idempotent.

/// Fence markers stripped from completions, longest tag first so the generic
/// fence does not eat a tagged one.
const FENCE_MARKERS: [&str; 3] = ["```lesson", "```json", "```"];

/// Remove markdown code-fence delimiters from a completion and trim it.
///
/// # Examples
///
/// ```
/// use comenius_generation::strip_code_fences;
///
/// let fenced = "```json\n{\"format\":\"lesson/v1\"}\n```";
/// assert_eq!(strip_code_fences(fenced), "{\"format\":\"lesson/v1\"}");
///
/// // No fences: unchanged modulo trim
/// assert_eq!(strip_code_fences("  plain text "), "plain text");
///
/// // Idempotent
/// let once = strip_code_fences(fenced);
/// assert_eq!(strip_code_fences(&once), once);
/// ```
pub fn strip_code_fences(text: &str) -> String {
    let mut cleaned = text.to_string();
    for marker in FENCE_MARKERS {
        cleaned = cleaned.replace(marker, "");
    }
    cleaned.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tagged_fence() {
        let text = "```json\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn strips_lesson_tagged_fence() {
        let text = "```lesson\n{\"a\": 1}\n```";
        assert_eq!(strip_code_fences(text), "{\"a\": 1}");
    }

    #[test]
    fn strips_multiple_fences() {
        let text = "```json\n{\"a\": 1}\n```\nand\n```\n{\"b\": 2}\n```";
        let cleaned = strip_code_fences(text);
        assert!(cleaned.contains("{\"a\": 1}"));
        assert!(cleaned.contains("{\"b\": 2}"));
        assert!(!cleaned.contains("```"));
    }

    #[test]
    fn unfenced_text_is_only_trimmed() {
        assert_eq!(strip_code_fences("\n  {\"a\": 1}  \n"), "{\"a\": 1}");
    }

    #[test]
    fn stripping_is_idempotent() {
        let text = "```json\n{\"a\": 1}\n```";
        let once = strip_code_fences(text);
        assert_eq!(strip_code_fences(&once), once);
    }

    #[test]
    fn empty_input_is_fine() {
        assert_eq!(strip_code_fences(""), "");
        assert_eq!(strip_code_fences("```"), "");
    }
}
