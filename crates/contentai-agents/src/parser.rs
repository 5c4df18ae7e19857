//! Pull a JSON object out of free-form model output.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

static FENCED_JSON: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)```(?:json|JSON)?[ \t]*\n(.*?)```").expect("valid regex"));

/// Return the first JSON object found in `text`.
///
/// Tries, in order: the whole text, each fenced code block, then every
/// balanced `{...}` span scanning left to right. Strings inside the
/// candidate are respected, so braces in string values do not end a span.
#[must_use]
pub fn extract_json(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if let Some(value) = parse_object(trimmed) {
        return Some(value);
    }

    for captures in FENCED_JSON.captures_iter(text) {
        if let Some(value) = captures.get(1).and_then(|m| parse_object(m.as_str().trim())) {
            return Some(value);
        }
    }

    let mut offset = 0;
    while let Some(start) = text[offset..].find('{').map(|i| i + offset) {
        if let Some(end) = balanced_end(&text[start..]) {
            if let Some(value) = parse_object(&text[start..start + end]) {
                return Some(value);
            }
        }
        offset = start + 1;
    }

    None
}

fn parse_object(candidate: &str) -> Option<Value> {
    match serde_json::from_str::<Value>(candidate) {
        Ok(value @ Value::Object(_)) => Some(value),
        _ => None,
    }
}

/// Byte length of the balanced object starting at `text[0] == '{'`.
fn balanced_end(text: &str) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, c) in text.char_indices() {
        if in_string {
            match c {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth = depth.checked_sub(1)?;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn bare_object() {
        assert_eq!(extract_json(r#" {"a": 1} "#), Some(json!({"a": 1})));
    }

    #[test]
    fn fenced_block() {
        let text = "Here is the script:\n```json\n{\"topic\": \"rust\"}\n```\nEnjoy.";
        assert_eq!(extract_json(text), Some(json!({"topic": "rust"})));
    }

    #[test]
    fn unlabelled_fence() {
        let text = "```\n{\"k\": [1, 2]}\n```";
        assert_eq!(extract_json(text), Some(json!({"k": [1, 2]})));
    }

    #[test]
    fn embedded_object_with_braces_in_strings() {
        let text = r#"Sure! {"hook": "use {braces} and \"quotes\"", "n": 2} Hope that helps."#;
        assert_eq!(
            extract_json(text),
            Some(json!({"hook": "use {braces} and \"quotes\"", "n": 2}))
        );
    }

    #[test]
    fn skips_unparseable_span_before_real_object() {
        let text = r#"Format {like this} is wrong, but {"ok": true} is right"#;
        assert_eq!(extract_json(text), Some(json!({"ok": true})));
    }

    #[test]
    fn arrays_and_prose_yield_none() {
        assert_eq!(extract_json("[1, 2, 3]"), None);
        assert_eq!(extract_json("no json here"), None);
        assert_eq!(extract_json("{ unterminated"), None);
    }
}
