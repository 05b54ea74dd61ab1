//! Prompt building utilities for LLM providers.

/// Prefix a task prompt with an optional context block.
///
/// Returns the original prompt when there is no (or only blank) context.
pub fn with_context(prompt: &str, context: Option<&str>) -> String {
    match context.filter(|c| !c.trim().is_empty()) {
        Some(context) => format!("Context:\n{}\n\nTask:\n{}", context, prompt),
        None => prompt.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_without_context() {
        assert_eq!(with_context("Explain the box step", None), "Explain the box step");
        assert_eq!(with_context("Explain", Some("  ")), "Explain");
    }

    #[test]
    fn test_with_context() {
        let result = with_context("Explain the box step", Some("Dance: Rumba"));
        assert_eq!(result, "Context:\nDance: Rumba\n\nTask:\nExplain the box step");
    }
}
