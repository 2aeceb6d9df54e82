use std::sync::OnceLock;

use regex::Regex;

fn opening_fence() -> &'static Regex {
    static OPENING: OnceLock<Regex> = OnceLock::new();
    OPENING.get_or_init(|| Regex::new(r"^```[A-Za-z0-9_+-]*\s*").expect("static fence pattern"))
}

fn closing_fence() -> &'static Regex {
    static CLOSING: OnceLock<Regex> = OnceLock::new();
    CLOSING.get_or_init(|| Regex::new(r"\s*```\s*$").expect("static fence pattern"))
}

/// Narrows raw model text down to the span most likely to hold the JSON payload.
///
/// A leading Markdown fence (bare or with a language tag) is stripped together
/// with its closing fence. When what remains does not open with `{`, the span
/// from the first `{` to the last `}` is taken instead, which covers models that
/// preface the payload with conversational text. Nothing here validates JSON.
pub fn extract_json_candidate(raw: &str) -> String {
    let mut text = raw.trim().to_string();

    if text.starts_with("```") {
        text = opening_fence().replace(&text, "").into_owned();
        text = closing_fence().replace(&text, "").into_owned();
    }

    if !text.starts_with('{') {
        if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}')) {
            if start < end {
                return text[start..=end].to_string();
            }
        }
    }

    text
}

#[cfg(test)]
mod tests {
    use super::extract_json_candidate;

    #[test]
    fn strips_fence_with_language_tag() {
        assert_eq!(extract_json_candidate("```json\n{\"score\": 42}\n```"), "{\"score\": 42}");
    }

    #[test]
    fn strips_bare_fence() {
        assert_eq!(extract_json_candidate("```\n{\"a\": 1}\n```"), "{\"a\": 1}");
    }

    #[test]
    fn finds_object_behind_conversational_preamble() {
        assert_eq!(
            extract_json_candidate("Sure! Here is the analysis: {\"a\": {\"b\": 2}} Hope it helps."),
            "{\"a\": {\"b\": 2}}"
        );
    }

    #[test]
    fn leaves_plain_object_untouched() {
        assert_eq!(extract_json_candidate("  {\"a\": 1}\n"), "{\"a\": 1}");
    }

    #[test]
    fn returns_text_unchanged_when_no_braces_exist() {
        assert_eq!(
            extract_json_candidate("I cannot help with that."),
            "I cannot help with that."
        );
    }

    #[test]
    fn handles_fence_followed_by_prose_and_object() {
        assert_eq!(
            extract_json_candidate("```json\nResult: {\"a\": 1}\n```"),
            "{\"a\": 1}"
        );
    }
}
