//! Typed get-with-default access to loosely shaped model JSON.
//!
//! Model output drifts: numbers arrive as `"85%"`, lists as single strings,
//! fields go missing. Every read goes through [`JsonAccess`] so each optional
//! field has exactly one documented default in [`defaults`].

use serde_json::Value;

/// Defaults for optional fields of model output.
pub mod defaults {
    /// Actor name when a suggestion omits `actor`.
    pub const ACTOR_NAME: &str = "Unknown Actor";
    /// Reasoning when a suggestion omits `why`.
    pub const REASONING: &str = "No reasoning provided";
    /// Profile when a suggestion omits `profile`.
    pub const PROFILE: &str = "No profile available";
    /// Match percentage when a suggestion omits `match_percent`.
    pub const MATCH_PERCENT: f64 = 50.0;
    /// Actor age when a suggestion omits `age`.
    pub const ACTOR_AGE: u32 = 30;
    /// Character age when a character omits `age`.
    pub const CHARACTER_AGE: u32 = 0;
}

static EMPTY: Vec<Value> = Vec::new();

/// Field readers over a JSON object. Non-objects behave as empty objects.
pub trait JsonAccess {
    /// Raw field, `None` when absent or null.
    fn field(&self, key: &str) -> Option<&Value>;

    /// Non-blank text of a field; numbers and booleans are rendered as text.
    fn opt_text(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Text of a field, or `default`.
    fn text_or(&self, key: &str, default: &str) -> String {
        self.opt_text(key).unwrap_or_else(|| default.to_string())
    }

    /// String field exactly as given, or `default` when absent or not a string.
    fn raw_text_or(&self, key: &str, default: &str) -> String {
        match self.field(key) {
            Some(Value::String(s)) => s.clone(),
            _ => default.to_string(),
        }
    }

    /// Numeric field. Strings are parsed after dropping everything except
    /// digits, `.` and `-`, so `"85%"` reads as `85.0`.
    fn opt_number(&self, key: &str) -> Option<f64> {
        match self.field(key)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => parse_lenient(s),
            _ => None,
        }
    }

    /// Numeric field, or `default`.
    fn number_or(&self, key: &str, default: f64) -> f64 {
        self.opt_number(key).unwrap_or(default)
    }

    /// Non-negative integer field; fractions are rounded, negatives clamp to zero.
    fn opt_count(&self, key: &str) -> Option<u32> {
        self.opt_number(key)
            .filter(|n| n.is_finite())
            .map(|n| n.round().clamp(0.0, u32::MAX as f64) as u32)
    }

    /// Integer field, or `default`.
    fn count_or(&self, key: &str, default: u32) -> u32 {
        self.opt_count(key).unwrap_or(default)
    }

    /// Array field, empty when absent or not an array.
    fn array(&self, key: &str) -> &[Value] {
        match self.field(key) {
            Some(Value::Array(items)) => items,
            _ => &EMPTY,
        }
    }

    /// Text list tolerating an array, an object (its values) or a single string.
    fn text_list(&self, key: &str) -> Vec<String> {
        let items: Vec<&Value> = match self.field(key) {
            Some(Value::Array(items)) => items.iter().collect(),
            Some(Value::Object(map)) => map.values().collect(),
            Some(other) => vec![other],
            None => Vec::new(),
        };
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect()
    }
}

impl JsonAccess for Value {
    fn field(&self, key: &str) -> Option<&Value> {
        self.as_object()?.get(key).filter(|v| !v.is_null())
    }
}

fn parse_lenient(text: &str) -> Option<f64> {
    let cleaned: String = text
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_text_defaults_for_missing_and_blank() {
        let v = json!({"actor": "  ", "why": null, "profile": "Veteran"});
        assert_eq!(v.text_or("actor", defaults::ACTOR_NAME), "Unknown Actor");
        assert_eq!(v.text_or("why", defaults::REASONING), "No reasoning provided");
        assert_eq!(v.text_or("profile", defaults::PROFILE), "Veteran");
    }

    #[test]
    fn test_raw_text_is_verbatim() {
        let v = json!({"slug": "  INT. VAULT - NIGHT ", "action": 3});
        assert_eq!(v.raw_text_or("slug", ""), "  INT. VAULT - NIGHT ");
        assert_eq!(v.raw_text_or("action", ""), "");
        assert_eq!(v.raw_text_or("missing", "-"), "-");
    }

    #[test]
    fn test_numbers_from_strings() {
        let v = json!({"match_percent": "85%", "age": "about 41 years", "bad": "n/a"});
        assert_eq!(v.number_or("match_percent", defaults::MATCH_PERCENT), 85.0);
        assert_eq!(v.count_or("age", defaults::ACTOR_AGE), 41);
        assert_eq!(v.number_or("bad", defaults::MATCH_PERCENT), 50.0);
    }

    #[test]
    fn test_negative_count_clamps_to_zero() {
        let v = json!({"age": -4});
        assert_eq!(v.count_or("age", 30), 0);
    }

    #[test]
    fn test_text_list_shapes() {
        let arr = json!({"assumptions": ["a", "", "b"]});
        let obj = json!({"assumptions": {"x": "a", "y": "b"}});
        let one = json!({"assumptions": "a"});
        assert_eq!(arr.text_list("assumptions"), vec!["a", "b"]);
        assert_eq!(obj.text_list("assumptions").len(), 2);
        assert_eq!(one.text_list("assumptions"), vec!["a"]);
        assert!(json!({}).text_list("assumptions").is_empty());
    }

    #[test]
    fn test_non_object_reads_as_empty() {
        let v = json!("just a string");
        assert!(v.field("name").is_none());
        assert!(v.array("scenes").is_empty());
    }
}
