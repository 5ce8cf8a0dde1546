use serde_json::{Map, Value};

const NESTED_MAPS: [&str; 3] = ["properties", "definitions", "$defs"];
const NESTED_LISTS: [&str; 3] = ["anyOf", "oneOf", "allOf"];

/// Harden a JSON schema for strict structured-output modes.
///
/// Every object node (one with `"type": "object"`, `properties` or `required`) gets a `type`
/// if it had none, a `properties` map, `"additionalProperties": false`, and `required` listing
/// every property key in declaration order. Recurses through `properties`, `definitions`,
/// `$defs`, `items` and `anyOf`/`oneOf`/`allOf`. Non-object values are returned unchanged, and
/// hardening a hardened schema changes nothing.
pub fn harden_schema(schema: Value) -> Value {
    match schema {
        Value::Object(node) => Value::Object(harden_node(node)),
        other => other,
    }
}

fn harden_node(mut node: Map<String, Value>) -> Map<String, Value> {
    let is_object = node.get("type").and_then(Value::as_str) == Some("object")
        || node.contains_key("properties")
        || node.contains_key("required");

    if is_object {
        node.entry("type")
            .or_insert_with(|| Value::String("object".to_string()));
        let props = node
            .entry("properties")
            .or_insert_with(|| Value::Object(Map::new()));
        let required: Vec<Value> = match props {
            Value::Object(p) => p.keys().cloned().map(Value::String).collect(),
            _ => Vec::new(),
        };
        node.insert("additionalProperties".to_string(), Value::Bool(false));
        node.insert("required".to_string(), Value::Array(required));
    }

    for key in NESTED_MAPS {
        if let Some(Value::Object(children)) = node.get_mut(key) {
            for child in children.values_mut() {
                *child = harden_schema(child.take());
            }
        }
    }

    if let Some(items) = node.get_mut("items") {
        *items = harden_schema(items.take());
    }

    for key in NESTED_LISTS {
        if let Some(Value::Array(list)) = node.get_mut(key) {
            for s in list.iter_mut() {
                *s = harden_schema(s.take());
            }
        }
    }

    node
}

#[cfg(test)]
#[path = "../../tests/unit/schema/strict.rs"]
mod tests;
