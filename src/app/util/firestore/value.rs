use serde_json::{json, Map, Value};

/// Converts plain JSON into Firestore's typed value representation.
pub fn to_firestore_value(value: &Value) -> Value {
    match value {
        Value::Null => json!({ "nullValue": null }),
        Value::Bool(b) => json!({ "booleanValue": b }),
        Value::Number(n) => match n.as_i64() {
            // integers travel as strings
            Some(i) => json!({ "integerValue": i.to_string() }),
            None => json!({ "doubleValue": n.as_f64() }),
        },
        Value::String(s) => json!({ "stringValue": s }),
        Value::Array(values) => {
            if values.is_empty() {
                return json!({ "arrayValue": {} });
            }

            let values: Vec<Value> = values.iter().map(to_firestore_value).collect();
            json!({ "arrayValue": { "values": values } })
        }
        Value::Object(map) => json!({ "mapValue": { "fields": to_firestore_fields(map) } }),
    }
}

pub fn to_firestore_fields(map: &Map<String, Value>) -> Value {
    let fields: Map<String, Value> = map
        .iter()
        .map(|(key, value)| (key.to_string(), to_firestore_value(value)))
        .collect();

    Value::Object(fields)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_scalars() {
        assert_eq!(to_firestore_value(&json!(false)), json!({"booleanValue": false}));
        assert_eq!(to_firestore_value(&json!(0)), json!({"integerValue": "0"}));
        assert_eq!(to_firestore_value(&json!(7.5)), json!({"doubleValue": 7.5}));
        assert_eq!(to_firestore_value(&json!("a cat")), json!({"stringValue": "a cat"}));
        assert_eq!(to_firestore_value(&Value::Null), json!({"nullValue": null}));
    }

    #[test]
    fn empty_array_has_no_values_key() {
        assert_eq!(to_firestore_value(&json!([])), json!({"arrayValue": {}}));
    }

    #[test]
    fn encodes_nested_collections() {
        let value = json!({ "likes": ["u2"], "meta": { "steps": 50 } });

        assert_eq!(
            to_firestore_value(&value),
            json!({
                "mapValue": { "fields": {
                    "likes": { "arrayValue": { "values": [{ "stringValue": "u2" }] } },
                    "meta": { "mapValue": { "fields": { "steps": { "integerValue": "50" } } } }
                }}
            })
        );
    }
}
