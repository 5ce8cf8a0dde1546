use serde_json::{Value, json};

use crate::scene::model::PrimitiveKind;
use crate::schema::strict::harden_schema;

const DRAFT_07: &str = "http://json-schema.org/draft-07/schema#";

/// Response schema for part synthesis, allowing at most `max_parts` parts per object.
pub fn kitbash_schema(max_parts: u32) -> Value {
    let kinds: Vec<&str> = PrimitiveKind::ALL.iter().map(|k| k.as_str()).collect();
    let vec3 = json!({"type": "array", "items": {"type": "number"}, "minItems": 3, "maxItems": 3});

    harden_schema(json!({
        "$schema": DRAFT_07,
        "type": "object",
        "properties": {
            "objects": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "parts": {
                            "type": "array",
                            "maxItems": max_parts,
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": {"type": "string"},
                                    "type": {"type": "string", "enum": kinds},
                                    "dimensions": vec3,
                                    "location": vec3,
                                    "rotation_degrees": vec3,
                                    "color": rgb(false)
                                }
                            }
                        }
                    }
                }
            },
            "meta": {
                "type": "object",
                "properties": {
                    "reality_factor": {"type": "integer", "minimum": 1, "maximum": 10}
                }
            }
        }
    }))
}

/// Response schema for object extraction: objects, optional motion actions and paths.
pub fn extraction_schema() -> Value {
    harden_schema(json!({
        "$schema": DRAFT_07,
        "type": "object",
        "properties": {
            "objects": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "category": {"type": "string"},
                        "color": rgb(true)
                    }
                }
            },
            "actions": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "type": {"type": "string", "enum": ["move_along_path", "none"]},
                        "subject": {"type": "string"},
                        "path_name": {"type": "string"}
                    }
                }
            },
            "paths": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": {"type": "string"},
                        "points": {
                            "type": "array",
                            "items": {
                                "type": "array",
                                "items": {"type": "number"},
                                "minItems": 3,
                                "maxItems": 3
                            },
                            "minItems": 2
                        }
                    }
                }
            }
        }
    }))
}

fn rgb(bounded: bool) -> Value {
    let channel = if bounded {
        json!({"type": "number", "minimum": 0, "maximum": 1})
    } else {
        json!({"type": "number"})
    };
    json!({
        "type": "object",
        "properties": {"r": channel, "g": channel, "b": channel}
    })
}

#[cfg(test)]
#[path = "../../tests/unit/schema/kitbash.rs"]
mod tests;
