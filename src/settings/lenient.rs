//! Field-by-field decoding of stored settings payloads
//!
//! Settings rows are edited by hand and by older admin builds, so a payload may carry unknown
//! keys, `null`s, or values of the wrong type. Decoding starts from the default record and overlays
//! each payload field only if the record still deserializes with it.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// Decode `payload` onto `T::default()`, dropping any field that does not fit
pub fn decode<T>(payload: &Value) -> T
where
    T: Default + Serialize + DeserializeOwned,
{
    decode_with_report(payload).0
}

/// Like [`decode`], but also returns the names of the fields that were rejected
pub fn decode_with_report<T>(payload: &Value) -> (T, Vec<String>)
where
    T: Default + Serialize + DeserializeOwned,
{
    let defaults = match serde_json::to_value(T::default()) {
        Ok(Value::Object(map)) => map,
        _ => return (T::default(), Vec::new()),
    };

    let Value::Object(fields) = payload else {
        if !payload.is_null() {
            log::warn!("settings payload is not an object, using defaults");
        }
        return (T::default(), Vec::new());
    };

    let mut merged: Map<String, Value> = defaults;
    let mut rejected = Vec::new();

    for (name, value) in fields {
        if value.is_null() || !merged.contains_key(name) {
            continue;
        }

        let previous = merged.insert(name.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(merged.clone())).is_err() {
            rejected.push(name.clone());
            if let Some(previous) = previous {
                merged.insert(name.clone(), previous);
            }
        }
    }

    if !rejected.is_empty() {
        log::warn!("ignoring malformed settings fields: {}", rejected.join(", "));
    }

    let decoded = serde_json::from_value(Value::Object(merged)).unwrap_or_default();
    (decoded, rejected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    #[serde(default)]
    struct Sample {
        label: String,
        count: u32,
        on: bool,
    }

    impl Default for Sample {
        fn default() -> Self {
            Self {
                label: "x".to_string(),
                count: 3,
                on: true,
            }
        }
    }

    #[test]
    fn test_overlays_valid_fields() {
        let decoded: Sample = decode(&json!({ "label": "y", "on": false }));
        assert_eq!(
            decoded,
            Sample {
                label: "y".to_string(),
                count: 3,
                on: false
            }
        );
    }

    #[test]
    fn test_drops_only_bad_fields() {
        let (decoded, rejected): (Sample, _) =
            decode_with_report(&json!({ "label": "y", "count": "many", "extra": 1 }));
        assert_eq!(decoded.label, "y");
        assert_eq!(decoded.count, 3);
        assert_eq!(rejected, vec!["count".to_string()]);
    }

    #[test]
    fn test_non_object_payload_is_default() {
        let decoded: Sample = decode(&json!([1, 2, 3]));
        assert_eq!(decoded, Sample::default());
        let decoded: Sample = decode(&Value::Null);
        assert_eq!(decoded, Sample::default());
    }
}
