/// Serde utility functions for vendor payload quirks
use serde::{Deserialize, Deserializer};

/// Deserialize an optional int64 that may arrive as a JSON string or number.
///
/// Google APIs encode int64 fields as strings (`"errors": "3"`), but some
/// endpoints and test fixtures send plain numbers.
///
/// Usage:
/// ```ignore
/// #[derive(Deserialize)]
/// struct Example {
///     #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
///     errors: Option<i64>,
/// }
/// ```
pub fn lenient_i64<'de, D>(de: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum StringOrNumber {
        Number(i64),
        Float(f64),
        Text(String),
    }

    match Option::<StringOrNumber>::deserialize(de)? {
        None => Ok(None),
        Some(StringOrNumber::Number(n)) => Ok(Some(n)),
        Some(StringOrNumber::Float(f)) => Ok(Some(f as i64)),
        Some(StringOrNumber::Text(s)) => s
            .trim()
            .parse::<i64>()
            .map(Some)
            .map_err(serde::de::Error::custom),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Counts {
        #[serde(default, deserialize_with = "lenient_i64")]
        errors: Option<i64>,
    }

    #[test]
    fn test_lenient_i64_accepts_strings_and_numbers() {
        let from_str: Counts = serde_json::from_str(r#"{"errors": "12"}"#).unwrap();
        assert_eq!(from_str.errors, Some(12));

        let from_num: Counts = serde_json::from_str(r#"{"errors": 7}"#).unwrap();
        assert_eq!(from_num.errors, Some(7));

        let missing: Counts = serde_json::from_str("{}").unwrap();
        assert_eq!(missing.errors, None);

        let null: Counts = serde_json::from_str(r#"{"errors": null}"#).unwrap();
        assert_eq!(null.errors, None);
    }

    #[test]
    fn test_lenient_i64_rejects_garbage() {
        let result: Result<Counts, _> = serde_json::from_str(r#"{"errors": "many"}"#);
        assert!(result.is_err());
    }
}
