const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Strips markdown code fences the model sometimes wraps its answer in.
///
/// Every occurrence is removed, not only the outer pair, so the result
/// never contains a fence and cleaning twice is the same as cleaning once.
pub fn clean_ai_response(response_text: &str) -> String {
    response_text
        .trim()
        .replace(JSON_FENCE, "")
        .replace(FENCE, "")
        .trim()
        .to_string()
}
