//! Card configuration intake and the display options derived from it.

use serde_json::Value;

use crate::i18n::Translations;
use crate::ports::CardError;

/// Configuration as handed over by the host, stored verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct CardConfig {
    raw: Value,
}

impl CardConfig {
    /// Accept a configuration object.
    ///
    /// Only presence is checked: shape problems in `title` or `show_count` are absorbed
    /// later by [`CardOptions::resolve`].
    ///
    /// # Errors
    ///
    /// Returns [`CardError::InvalidConfiguration`] for `null`, `false`, `0` or `""`.
    pub fn from_value(raw: &Value) -> Result<Self, CardError> {
        if is_falsy(raw) {
            return Err(CardError::InvalidConfiguration);
        }
        Ok(Self { raw: raw.clone() })
    }

    /// The configuration exactly as supplied.
    #[must_use]
    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// Title override, if one was given as a truthy scalar.
    ///
    /// Numbers and `true` are shown in their JSON spelling. Arrays and objects have no
    /// sensible text and fall back like a missing title.
    #[must_use]
    pub fn title(&self) -> Option<String> {
        match self.raw.get("title")? {
            Value::String(text) if !text.is_empty() => Some(text.clone()),
            Value::Number(number) if number.as_f64() != Some(0.0) => Some(number.to_string()),
            Value::Bool(true) => Some(true.to_string()),
            _ => None,
        }
    }

    /// Number of rows requested; `None` when absent, non-positive or not a number.
    #[must_use]
    pub fn show_count(&self) -> Option<usize> {
        let count = match self.raw.get("show_count")? {
            Value::Number(number) => number
                .as_i64()
                .or_else(|| number.as_f64().map(truncate))?,
            Value::String(text) => text.trim().parse::<f64>().ok().map(truncate)?,
            _ => return None,
        };
        usize::try_from(count).ok().filter(|count| *count >= 1)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "row counts are truncated toward zero like a slice bound"
)]
fn truncate(value: f64) -> i64 {
    value.trunc() as i64
}

fn is_falsy(raw: &Value) -> bool {
    match raw {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::Number(number) => number.as_f64().is_none_or(|float| float == 0.0 || float.is_nan()),
        Value::String(text) => text.is_empty(),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Display options with every default applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOptions {
    /// Header text.
    pub header: String,
    /// How many leading resolved sensors to render.
    pub rows_to_show: usize,
}

impl CardOptions {
    /// Apply the defaulting rules once, against the active translation table.
    #[must_use]
    pub fn resolve(config: &CardConfig, translations: &Translations) -> Self {
        Self {
            header: config
                .title()
                .unwrap_or_else(|| translations.next_collection.to_owned()),
            rows_to_show: config.show_count().unwrap_or(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::i18n::Language;

    fn options(raw: Value) -> CardOptions {
        let config = CardConfig::from_value(&raw).unwrap();
        CardOptions::resolve(&config, Language::En.translations())
    }

    #[test]
    fn should_reject_falsy_configuration() {
        for raw in [json!(null), json!(false), json!(0), json!("")] {
            assert!(
                matches!(
                    CardConfig::from_value(&raw),
                    Err(CardError::InvalidConfiguration)
                ),
                "{raw}"
            );
        }
    }

    #[test]
    fn should_store_configuration_verbatim() {
        let raw = json!({ "type": "custom:raccolta-differenziata-card", "show_count": "lots" });
        let config = CardConfig::from_value(&raw).unwrap();
        assert_eq!(config.raw(), &raw);
    }

    #[test]
    fn should_default_header_to_translation() {
        assert_eq!(options(json!({})).header, "Next waste collection");
        assert_eq!(options(json!({ "title": "" })).header, "Next waste collection");
        assert_eq!(options(json!({ "title": "Rifiuti" })).header, "Rifiuti");
        assert_eq!(options(json!({ "title": 42 })).header, "42");
        assert_eq!(options(json!({ "title": true })).header, "true");
        assert_eq!(options(json!({ "title": false })).header, "Next waste collection");
        assert_eq!(options(json!({ "title": ["a"] })).header, "Next waste collection");
    }

    #[test]
    fn should_treat_missing_or_non_positive_show_count_as_one() {
        for raw in [
            json!({}),
            json!({ "show_count": 0 }),
            json!({ "show_count": -3 }),
            json!({ "show_count": null }),
            json!({ "show_count": "many" }),
            json!({ "show_count": [2] }),
        ] {
            assert_eq!(options(raw.clone()).rows_to_show, 1, "{raw}");
        }
    }

    #[test]
    fn should_read_numeric_show_count() {
        assert_eq!(options(json!({ "show_count": 3 })).rows_to_show, 3);
        assert_eq!(options(json!({ "show_count": 2.7 })).rows_to_show, 2);
        assert_eq!(options(json!({ "show_count": "2" })).rows_to_show, 2);
        assert_eq!(options(json!({ "show_count": 10 })).rows_to_show, 10);
    }
}
