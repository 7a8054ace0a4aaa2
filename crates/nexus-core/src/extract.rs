//! Extraction of the JSON report from raw model output.
//!
//! Models often wrap JSON in a fenced code block, with or without a
//! language tag. The fence scan is a two-state machine: outside a fence
//! until the first marker, inside until the next one.

use serde_json::{Map, Value};
use tracing::debug;

use crate::error::{GenerationFault, GenerationResult};
use crate::report::MarketIntelligenceReport;

const FENCE: &str = "```";

#[derive(Debug, Clone, Copy)]
enum ScanState {
    Outside,
    Inside { start: usize },
}

/// Return the content of the first fenced block, or the text unchanged.
///
/// An opening fence without a closing one yields everything after the
/// opener, which is what a truncated answer looks like.
pub fn strip_fences(raw: &str) -> &str {
    let mut state = ScanState::Outside;
    let mut pos = 0;

    while let Some(offset) = raw[pos..].find(FENCE) {
        let marker = pos + offset;
        match state {
            ScanState::Outside => {
                let start = skip_language_tag(raw, marker + FENCE.len());
                state = ScanState::Inside { start };
                pos = start;
            }
            ScanState::Inside { start } => return raw[start..marker].trim(),
        }
    }

    match state {
        ScanState::Outside => raw,
        ScanState::Inside { start } => raw[start..].trim(),
    }
}

/// Skip an info string such as `json` right after an opening fence.
/// Spaces or tabs may sit between the fence and the tag.
fn skip_language_tag(raw: &str, from: usize) -> usize {
    let after_fence = &raw[from..];
    let rest = after_fence.trim_start_matches([' ', '\t']);
    let from = from + (after_fence.len() - rest.len());
    if !rest.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return from;
    }
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '.')))
        .unwrap_or(rest.len());
    from + tag_len
}

/// Strip fences and parse the result as a JSON object.
pub fn parse_json_object(raw: &str) -> GenerationResult<Map<String, Value>> {
    let text = strip_fences(raw).trim();
    let value: Value = serde_json::from_str(text)
        .map_err(|e| GenerationFault::parse(format!("invalid JSON: {}", e)))?;

    match value {
        Value::Object(map) => Ok(map),
        other => Err(GenerationFault::parse(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
    }
}

/// Parse raw model output into a report.
///
/// Missing keys and wrong types are parse faults; rank and count
/// invariants are checked separately by the generator.
pub fn extract_report(raw: &str) -> GenerationResult<MarketIntelligenceReport> {
    let object = parse_json_object(raw)?;
    debug!(keys = object.len(), "Model answer parsed as JSON object");
    serde_json::from_value(Value::Object(object))
        .map_err(|e| GenerationFault::parse(format!("schema mismatch: {}", e)))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback::FallbackSynthesizer;
    use crate::report::DataIntegrity;

    const BODY: &str = r#"{"niche_name": "Yoga Mats", "count": 3}"#;

    #[test]
    fn test_plain_text_is_verbatim() {
        assert_eq!(strip_fences(BODY), BODY);
    }

    #[test]
    fn test_fence_with_language_tag() {
        let raw = format!("Here you go:\n```json\n{}\n```\nHope it helps", BODY);
        assert_eq!(strip_fences(&raw), BODY);
    }

    #[test]
    fn test_fence_without_language_tag() {
        let raw = format!("```\n{}\n```", BODY);
        assert_eq!(strip_fences(&raw), BODY);
    }

    #[test]
    fn test_fence_with_spaced_language_tag() {
        let raw = "```  json\n{\"a\": 1}\n```";
        assert_eq!(strip_fences(raw), "{\"a\": 1}");
        let raw = "```\tjson\n{\"a\": 1}\n```";
        assert_eq!(parse_json_object(raw).unwrap()["a"], 1);
    }

    #[test]
    fn test_single_line_fence() {
        let raw = format!("```json{}```", BODY);
        assert_eq!(strip_fences(&raw), BODY);
    }

    #[test]
    fn test_only_first_block_is_used() {
        let raw = "```json\n{\"a\": 1}\n```\nand\n```json\n{\"b\": 2}\n```";
        assert_eq!(strip_fences(raw), "{\"a\": 1}");
    }

    #[test]
    fn test_unterminated_fence_takes_remainder() {
        let raw = format!("```json\n{}", BODY);
        assert_eq!(strip_fences(&raw), BODY);
    }

    #[test]
    fn test_fenced_and_bare_parse_identically() {
        let bare = parse_json_object(BODY).unwrap();
        let tagged = parse_json_object(&format!("```json\n{}\n```", BODY)).unwrap();
        let untagged = parse_json_object(&format!("```\n{}\n```", BODY)).unwrap();
        assert_eq!(bare, tagged);
        assert_eq!(bare, untagged);
    }

    #[test]
    fn test_non_json_is_parse_fault() {
        let err = parse_json_object("I'm sorry, I can't help with that.").unwrap_err();
        assert!(matches!(err, GenerationFault::ResponseParse { .. }));
    }

    #[test]
    fn test_non_object_is_parse_fault() {
        let err = parse_json_object("```json\n[1, 2, 3]\n```").unwrap_err();
        assert_eq!(
            err,
            GenerationFault::parse("expected a JSON object, got an array")
        );
    }

    #[test]
    fn test_extract_report_round_trip_through_fence() {
        let report = FallbackSynthesizer::default().synthesize("Silicone Baking Mat", None);
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed = extract_report(&format!("```json\n{}\n```", json)).unwrap();

        let mut expected = report;
        expected.data_integrity = DataIntegrity::default();
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_extract_report_ignores_foreign_integrity_block() {
        let report = FallbackSynthesizer::default().synthesize("Silicone Baking Mat", None);
        let mut value = serde_json::to_value(&report).unwrap();
        value["data_integrity"] = serde_json::json!({
            "quantitative_source": "POE",
            "qualitative_source": "LLM",
            "warning": "unverified"
        });

        let parsed = extract_report(&value.to_string()).unwrap();
        assert_eq!(parsed.data_integrity, DataIntegrity::default());
        assert_eq!(parsed.top_10_products, report.top_10_products);
    }

    #[test]
    fn test_extract_report_missing_key_is_parse_fault() {
        let report = FallbackSynthesizer::default().synthesize("Silicone Baking Mat", None);
        let mut value = serde_json::to_value(&report).unwrap();
        value.as_object_mut().unwrap().remove("trends");
        let err = extract_report(&value.to_string()).unwrap_err();
        match err {
            GenerationFault::ResponseParse { cause } => assert!(cause.contains("trends")),
            other => panic!("unexpected fault: {:?}", other),
        }
    }
}
