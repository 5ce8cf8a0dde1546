use serde_json::json;

use super::*;

#[test]
fn kitbash_schema_injects_part_budget() {
    let s = kitbash_schema(4);
    let parts = &s["properties"]["objects"]["items"]["properties"]["parts"];
    assert_eq!(parts["maxItems"], 4);
    assert_eq!(
        parts["items"]["properties"]["type"]["enum"],
        json!(["cube", "sphere", "cylinder", "cone", "plane", "torus"])
    );
}

#[test]
fn kitbash_schema_is_fully_required() {
    let s = kitbash_schema(6);
    assert_eq!(s["required"], json!(["objects", "meta"]));
    assert_eq!(s["additionalProperties"], json!(false));
    let part = &s["properties"]["objects"]["items"]["properties"]["parts"]["items"];
    assert_eq!(
        part["required"],
        json!(["name", "type", "dimensions", "location", "rotation_degrees", "color"])
    );
    assert_eq!(part["properties"]["color"]["required"], json!(["r", "g", "b"]));
    assert_eq!(s["properties"]["meta"]["required"], json!(["reality_factor"]));
    assert_eq!(s["$schema"], "http://json-schema.org/draft-07/schema#");
}

#[test]
fn extraction_schema_requires_every_section() {
    let s = extraction_schema();
    assert_eq!(s["required"], json!(["objects", "actions", "paths"]));
    let action = &s["properties"]["actions"]["items"];
    assert_eq!(action["required"], json!(["type", "subject", "path_name"]));
    let color = &s["properties"]["objects"]["items"]["properties"]["color"];
    assert_eq!(color["properties"]["g"]["maximum"], 1);
    assert_eq!(s["properties"]["paths"]["items"]["properties"]["points"]["minItems"], 2);
}

#[test]
fn schemas_are_already_hardened() {
    let s = kitbash_schema(3);
    assert_eq!(harden_schema(s.clone()), s);
    let e = extraction_schema();
    assert_eq!(harden_schema(e.clone()), e);
}
