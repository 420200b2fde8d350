//! Flattening of nested bundle dictionaries

use std::collections::HashMap;

use serde_json::Value;

/// Flatten a nested dictionary into separator-joined keys.
///
/// Nested objects group related keys; leaves must be strings. Keys that
/// already contain the separator are kept as-is and joined like any other.
///
/// # Examples
/// ```
/// use serde_json::json;
/// use nls_bundle::bundle::flatten_dictionary;
///
/// let json = json!({
///     "service:prov:azure:name": "Name",
///     "error": {
///         "azure-login": "Authentication failed"
///     }
/// });
///
/// let flattened = flatten_dictionary(&json, ".").unwrap();
/// assert_eq!(flattened.get("service:prov:azure:name"), Some(&"Name".to_string()));
/// assert_eq!(flattened.get("error.azure-login"), Some(&"Authentication failed".to_string()));
/// ```
///
/// # Errors
/// Returns a message describing the first value that is neither a string nor
/// an object, or a key produced twice.
pub fn flatten_dictionary(
    dictionary: &Value,
    separator: &str,
) -> Result<HashMap<String, String>, String> {
    let Value::Object(_) = dictionary else {
        return Err(format!("expected an object of translations, found {}", kind_of(dictionary)));
    };

    let mut result = HashMap::new();
    flatten_value(dictionary, separator, None, &mut result)?;
    Ok(result)
}

fn flatten_value(
    value: &Value,
    separator: &str,
    prefix: Option<&str>,
    result: &mut HashMap<String, String>,
) -> Result<(), String> {
    match value {
        Value::Object(map) => {
            for (key, value) in map {
                let full_key =
                    prefix.map_or_else(|| key.clone(), |p| format!("{p}{separator}{key}"));
                flatten_value(value, separator, Some(&full_key), result)?;
            }
            Ok(())
        }
        Value::String(s) => {
            let Some(key) = prefix else {
                return Err("expected an object of translations, found a string".to_string());
            };
            if result.insert(key.to_string(), s.clone()).is_some() {
                return Err(format!("duplicate key '{key}'"));
            }
            Ok(())
        }
        other => Err(format!(
            "value of '{}' must be a string, found {}",
            prefix.unwrap_or_default(),
            kind_of(other)
        )),
    }
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
