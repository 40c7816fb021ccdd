use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FENCED_BLOCK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"```[A-Za-z0-9_+-]*\s*([\s\S]*?)\s*```").expect("fenced block pattern is valid")
});

/// Neither the bare text nor a fenced block parsed as JSON.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Failed to extract valid JSON from response")]
pub struct ExtractionError {
    pub raw: String,
}

/// Parse model output as JSON, falling back to the first fenced code block.
/// Any JSON value is accepted here; whether it has the question shape is
/// for the validator to decide.
pub fn extract_json(raw: &str) -> Result<Value, ExtractionError> {
    if let Ok(value) = serde_json::from_str::<Value>(raw) {
        return Ok(value);
    }

    FENCED_BLOCK
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|inner| serde_json::from_str::<Value>(inner.as_str().trim()).ok())
        .ok_or_else(|| ExtractionError {
            raw: raw.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const INNER: &str = r#"[{"question":"Q?","options":["a","b","c","d","e"],"answer":"A","explanation":"x","subtopic":0}]"#;

    #[test]
    fn bare_and_fenced_output_extract_identically() {
        let bare = extract_json(INNER).unwrap();
        let fenced = extract_json(&format!("```json\n{INNER}\n```")).unwrap();
        let untagged = extract_json(&format!("```\n{INNER}\n```")).unwrap();

        assert_eq!(bare, fenced);
        assert_eq!(bare, untagged);
        assert!(bare.is_array());
    }

    #[test]
    fn fenced_block_surrounded_by_prose() {
        let raw = format!("Here is your quiz:\n\n```json\n{INNER}\n```\n\nGood luck!");
        assert_eq!(extract_json(&raw).unwrap(), extract_json(INNER).unwrap());
    }

    #[test]
    fn bare_output_with_surrounding_whitespace() {
        let raw = format!("\n  {INNER}  \n");
        assert!(extract_json(&raw).unwrap().is_array());
    }

    #[test]
    fn extraction_is_idempotent() {
        let raw = format!("```json\n{INNER}\n```");
        assert_eq!(extract_json(&raw), extract_json(&raw));
    }

    #[test]
    fn failure_carries_raw_text() {
        let raw = "Sorry, I cannot help with that.";
        let err = extract_json(raw).unwrap_err();
        assert_eq!(err.raw, raw);
    }

    #[test]
    fn bare_non_array_json_is_returned_as_is() {
        let object = r#"{"title": "Lungs"}"#;
        assert_eq!(
            extract_json(object).unwrap(),
            serde_json::json!({ "title": "Lungs" })
        );

        // a bare string wins over a fenced block it mentions
        let quoted = "\"```json\\n[]\\n```\"";
        assert!(extract_json(quoted).unwrap().is_string());
    }

    #[test]
    fn broken_json_inside_fence_is_not_repaired() {
        let raw = "```json\n[{\"question\": \"Q?\",]\n```";
        assert!(extract_json(raw).is_err());
    }
}
