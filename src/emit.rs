//! Render the OpenAPI IR as JSON. Key order follows insertion order
//! (`serde_json` is built with `preserve_order`), so output is stable.

use serde_json::{json, Map, Value};

use crate::ir::{ObjectSchema, OpenApiDocument, PropertySchema, Reference, SchemaNode};

// ————————————————————————————————————————————————————————————————————————————
// OPENAPI JSON CG
// ————————————————————————————————————————————————————————————————————————————

pub fn document_json(doc: &OpenApiDocument) -> Value {
    let schemas: Map<String, Value> = doc
        .schemas
        .iter()
        .map(|(name, node)| (name.clone(), schema_json(node)))
        .collect();

    json!({
        "openapi": doc.openapi,
        "info": {
            "title": doc.info.title,
            "version": doc.info.version,
            "x-signature": doc.info.signature,
        },
        "components": {
            "schemas": schemas,
        },
    })
}

pub fn schema_json(node: &SchemaNode) -> Value {
    match node {
        SchemaNode::Reference(r) => reference_json(r),
        SchemaNode::Object(o) => object_json(o),
        SchemaNode::AllOf(nodes) => {
            json!({ "allOf": nodes.iter().map(schema_json).collect::<Vec<_>>() })
        }
    }
}

pub fn property_json(prop: &PropertySchema) -> Value {
    match prop {
        PropertySchema::Boolean => json!({ "type": "boolean" }),
        PropertySchema::Integer => json!({ "type": "integer" }),
        PropertySchema::Double => json!({ "type": "number", "format": "double" }),
        PropertySchema::String => json!({ "type": "string" }),
        PropertySchema::DateTime => json!({ "type": "string", "format": "date-time" }),
        PropertySchema::Any => json!({}),
        PropertySchema::Reference(r) => reference_json(r),
        PropertySchema::Array(item) => json!({
            "type": "array",
            "items": property_json(item),
        }),
    }
}

fn reference_json(r: &Reference) -> Value {
    json!({ "$ref": r.pointer() })
}

fn object_json(o: &ObjectSchema) -> Value {
    let props: Map<String, Value> = o
        .properties
        .iter()
        .map(|(k, v)| (k.clone(), property_json(v)))
        .collect();
    json!({
        "type": "object",
        "properties": props,
        "additionalProperties": false,
        "required": o.required,
    })
}

// ------------------------------- Tests ------------------------------------ //
