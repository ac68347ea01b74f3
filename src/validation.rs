//! Shape checks shared by the route guards

use serde_json::Value;

/// True when the value is present and not empty
pub fn is_string_provided(value: Option<&str>) -> bool {
    value.map(|s| !s.is_empty()).unwrap_or(false)
}

/// Keep the value only when it is present and not empty
pub fn provided(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

/// Free-text field that clients send either as a string or a bare number (zip codes)
pub fn text_from_json(value: Option<&Value>) -> Option<String> {
    match value {
        Some(Value::String(s)) => provided(Some(s.trim().to_string())),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a numeric identifier from a path segment
pub fn parse_id(raw: &str) -> Option<i32> {
    raw.trim().parse::<i32>().ok()
}

#[derive(Debug, PartialEq, Eq)]
pub enum IdField {
    Missing,
    Malformed,
}

/// Numeric identifier from a JSON body field; clients send both `4` and `"4"`
pub fn id_from_json(value: Option<&Value>) -> Result<i32, IdField> {
    match value {
        None | Some(Value::Null) => Err(IdField::Missing),
        Some(Value::Number(n)) => n
            .as_i64()
            .and_then(|n| i32::try_from(n).ok())
            .ok_or(IdField::Malformed),
        Some(Value::String(s)) => parse_id(s).ok_or(IdField::Malformed),
        Some(_) => Err(IdField::Malformed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn string_provided() {
        assert!(is_string_provided(Some("hi")));
        assert!(!is_string_provided(Some("")));
        assert!(!is_string_provided(None));
    }

    #[test]
    fn provided_drops_empty() {
        assert_eq!(provided(Some("general".to_string())), Some("general".to_string()));
        assert_eq!(provided(Some(String::new())), None);
        assert_eq!(provided(None), None);
    }

    #[test]
    fn text_fields() {
        assert_eq!(text_from_json(Some(&json!("98402"))), Some("98402".to_string()));
        assert_eq!(text_from_json(Some(&json!(98402))), Some("98402".to_string()));
        assert_eq!(text_from_json(Some(&json!("  "))), None);
        assert_eq!(text_from_json(Some(&json!(true))), None);
        assert_eq!(text_from_json(None), None);
    }

    #[test]
    fn path_ids() {
        assert_eq!(parse_id("42"), Some(42));
        assert_eq!(parse_id(" 7 "), Some(7));
        assert_eq!(parse_id("abc"), None);
        assert_eq!(parse_id("4.5"), None);
        assert_eq!(parse_id("99999999999"), None);
    }

    #[test]
    fn body_ids() {
        assert_eq!(id_from_json(Some(&json!(3))), Ok(3));
        assert_eq!(id_from_json(Some(&json!("3"))), Ok(3));
        assert_eq!(id_from_json(None), Err(IdField::Missing));
        assert_eq!(id_from_json(Some(&Value::Null)), Err(IdField::Missing));
        assert_eq!(id_from_json(Some(&json!("three"))), Err(IdField::Malformed));
        assert_eq!(id_from_json(Some(&json!(1.5))), Err(IdField::Malformed));
        assert_eq!(id_from_json(Some(&json!([1]))), Err(IdField::Malformed));
    }
}
