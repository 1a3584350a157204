// Strongly-typed IR for the OpenAPI output. No serde_json::Value here.

use indexmap::IndexMap;

#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    /// `components.schemas`, in input type order.
    pub schemas: IndexMap<String, SchemaNode>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Info {
    pub title: String,
    pub version: String,     // "{major}.{minor}"
    pub signature: String,   // emitted as `x-signature`
}

/// A `$ref` into `#/components/schemas`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
}

/// A top-level entry of `components.schemas`.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    Reference(Reference),
    Object(ObjectSchema),
    AllOf(Vec<SchemaNode>),  // [supertype ref, own object schema]
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub properties: IndexMap<String, PropertySchema>,
    pub required: Vec<String>,   // input order; additionalProperties is always false
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertySchema {
    Boolean,
    Integer,
    Double,                  // number, format double
    String,
    DateTime,                // string, format date-time
    Any,                     // `{}`
    Reference(Reference),
    Array(Box<PropertySchema>),
}

/// Prefix every `$ref` points into.
pub const SCHEMAS_POINTER: &str = "#/components/schemas/";

impl Reference {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn pointer(&self) -> String {
        format!("{SCHEMAS_POINTER}{}", self.name)
    }
}
