// src/roadmap/extract.rs — Pull one JSON object out of free-form model output

use serde_json::Value;

use crate::infra::errors::LearnpathError;

/// Locate the first `{` and its matching `}`.
///
/// Braces inside JSON string literals (including escaped quotes) do not count
/// toward the depth.
pub fn extract_json_object(text: &str) -> Result<&str, LearnpathError> {
    let start = text
        .find('{')
        .ok_or_else(|| LearnpathError::Parse("no JSON object in response".into()))?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Ok(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    Err(LearnpathError::Parse("unterminated JSON object in response".into()))
}

/// Extract and parse. Parse failures surface as `LearnpathError::Parse`.
pub fn parse_json_object(text: &str) -> Result<Value, LearnpathError> {
    let json = extract_json_object(text)?;
    serde_json::from_str(json).map_err(|e| LearnpathError::Parse(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_with_surrounding_prose() {
        let text = "Here is your roadmap:\n{\"a\": {\"b\": 1}}\nGood luck!";
        assert_eq!(extract_json_object(text).unwrap(), "{\"a\": {\"b\": 1}}");
    }

    #[test]
    fn test_braces_inside_strings_ignored() {
        let text = r#"{"title": "use {} and \"}\" carefully"} trailing }"#;
        let json = extract_json_object(text).unwrap();
        assert_eq!(json, r#"{"title": "use {} and \"}\" carefully"}"#);
        assert!(parse_json_object(text).is_ok());
    }

    #[test]
    fn test_first_object_wins() {
        let text = "{\"n\": 1} {\"n\": 2}";
        assert_eq!(parse_json_object(text).unwrap()["n"], 1);
    }

    #[test]
    fn test_no_object() {
        assert!(matches!(
            extract_json_object("no json here"),
            Err(LearnpathError::Parse(_))
        ));
    }

    #[test]
    fn test_unbalanced() {
        assert!(matches!(
            extract_json_object("{\"a\": {\"b\": 1}"),
            Err(LearnpathError::Parse(_))
        ));
    }

    #[test]
    fn test_malformed_after_extraction() {
        assert!(matches!(
            parse_json_object("{not: valid,}"),
            Err(LearnpathError::Parse(_))
        ));
    }
}
