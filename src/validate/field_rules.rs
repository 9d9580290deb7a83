//! Per-type value checks.
//! Match arms here must track `FieldType` in `parse/types.rs`.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::Value;

use super::FieldValidator;
use crate::parse::types::FieldType;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static URL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^https?://.+").unwrap());
static E164: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+?[1-9]\d{1,14}$").unwrap());
static DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap());
static NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^-?\d+(\.\d+)?$").unwrap());

/// Apply the type-specific rules to a non-empty value. `text` is the trimmed
/// string form of `value`. Returns the failure message, if any.
pub fn check(validator: &FieldValidator, value: &Value, text: &str) -> Option<String> {
    let rules = validator.rules();

    match validator.field_type() {
        FieldType::Email => {
            if !EMAIL.is_match(text) {
                return Some("Invalid email format".into());
            }
        }
        FieldType::Url => {
            if !URL.is_match(text) {
                return Some("Invalid URL format (must start with http:// or https://)".into());
            }
        }
        FieldType::Phone => {
            let compact: String = text
                .chars()
                .filter(|c| !(c.is_whitespace() || matches!(c, '-' | '(' | ')')))
                .collect();
            if !E164.is_match(&compact) {
                return Some(
                    "Invalid phone format (use E.164 format, e.g., +1234567890)".into(),
                );
            }
        }
        FieldType::Date => {
            if !DATE.is_match(text) {
                return Some("Invalid date format (use YYYY-MM-DD)".into());
            }
            if NaiveDate::parse_from_str(text, "%Y-%m-%d").is_err() {
                return Some("Invalid date".into());
            }
        }
        FieldType::Number => {
            if !NUMBER.is_match(text) {
                return Some("Must be a valid number".into());
            }
            let Ok(n) = text.parse::<f64>() else {
                return Some("Must be a valid number".into());
            };
            if let Some(min) = rules.min {
                if n < min {
                    return Some(format!("Minimum value is {}", min));
                }
            }
            if let Some(max) = rules.max {
                if n > max {
                    return Some(format!("Maximum value is {}", max));
                }
            }
        }
        FieldType::Text | FieldType::Textarea => {
            if let Some(message) = check_length(validator, text) {
                return Some(message);
            }
            if let Some(pattern) = validator.pattern() {
                match pattern.is_match(text) {
                    Ok(true) => {}
                    Ok(false) => return Some("Value does not match required pattern".into()),
                    Err(e) => {
                        tracing::warn!(error = %e, "validation pattern failed to run, rule skipped");
                    }
                }
            }
        }
        FieldType::Select => {
            if let Some(options) = &rules.options {
                if !options.iter().any(|o| o == text) {
                    return Some(format!("Value must be one of: {}", options.join(", ")));
                }
            }
        }
        FieldType::Checkbox => {
            if !value.is_boolean() {
                return Some("Must be true or false".into());
            }
        }
        FieldType::Time | FieldType::Other(_) => return check_length(validator, text),
    }

    None
}

fn check_length(validator: &FieldValidator, text: &str) -> Option<String> {
    let rules = validator.rules();
    let len = text.chars().count();

    if let Some(min) = rules.min_length {
        if len < min {
            return Some(format!("Minimum {} characters required", min));
        }
    }
    if let Some(max) = rules.max_length {
        if len > max {
            return Some(format!("Maximum {} characters allowed", max));
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::types::ValidationRules;
    use serde_json::json;

    fn run(field_type: &str, value: Value, rules: ValidationRules) -> Option<String> {
        let validator = FieldValidator::new(field_type.into(), rules);
        let text = super::super::string_form(&value);
        check(&validator, &value, text.trim())
    }

    #[test]
    fn phone_strips_separators() {
        assert_eq!(run("phone", json!("+1 (234) 567-890"), ValidationRules::default()), None);
        assert!(run("phone", json!("0123"), ValidationRules::default()).is_some());
    }

    #[test]
    fn number_bounds_format_like_the_ui() {
        let rules = ValidationRules::default().with_range(Some(1.5), Some(10.0));
        assert_eq!(run("number", json!("1"), rules.clone()).as_deref(), Some("Minimum value is 1.5"));
        assert_eq!(run("number", json!(11), rules).as_deref(), Some("Maximum value is 10"));
    }

    #[test]
    fn invalid_pattern_is_skipped() {
        let rules = ValidationRules::default().with_pattern("([a-z");
        assert_eq!(run("text", json!("anything"), rules), None);
    }

    #[test]
    fn lookahead_pattern_is_enforced() {
        let rules = ValidationRules::default().with_pattern(r"^(?=.*\d).+$");
        assert_eq!(
            run("text", json!("abcdef"), rules.clone()).as_deref(),
            Some("Value does not match required pattern")
        );
        assert_eq!(run("text", json!("abc1ef"), rules), None);
    }

    #[test]
    fn backreference_pattern_is_enforced() {
        let rules = ValidationRules::default().with_pattern(r"^(\w)\1$");
        assert_eq!(run("text", json!("aa"), rules.clone()), None);
        assert!(run("text", json!("ab"), rules).is_some());
    }

    #[test]
    fn date_checks_calendar() {
        let rules = ValidationRules::default();
        assert_eq!(run("date", json!("2024-02-29"), rules.clone()), None);
        assert_eq!(run("date", json!("2023-02-29"), rules.clone()).as_deref(), Some("Invalid date"));
        assert_eq!(
            run("date", json!("29/02/2024"), rules).as_deref(),
            Some("Invalid date format (use YYYY-MM-DD)")
        );
    }
}
