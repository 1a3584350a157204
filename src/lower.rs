//! Lowering: type-description document → OpenAPI IR.
//!
//! Value and array kinds never get a definition of their own; they are
//! inlined wherever a property names them. Object kinds become an object
//! schema, composed with `allOf` behind their supertype when they have one.

use indexmap::IndexMap;
use log::{debug, warn};

use crate::descriptor::{
    ARRAY_MARKER, Document, OPTIONAL_MARKER, PropertyDescriptor, TypeDescriptor, TypeKind,
};
use crate::error::{Error, Result};
use crate::ir::{Info, ObjectSchema, OpenApiDocument, PropertySchema, Reference, SchemaNode};

pub const DEFAULT_OPENAPI_VERSION: &str = "3.1.0";

#[derive(Debug, Clone)]
pub struct Options {
    /// Value of the top-level `openapi` field.
    pub openapi_version: String,
}

impl Default for Options {
    fn default() -> Self {
        Self { openapi_version: DEFAULT_OPENAPI_VERSION.to_string() }
    }
}

/// A single lowered property.
#[derive(Debug, Clone, PartialEq)]
pub struct LoweredProperty {
    pub name: String,
    pub schema: PropertySchema,
    /// Set for `Optional`-typed properties. The generated schema lists those
    /// names under `required`; downstream consumers depend on that polarity.
    pub required: bool,
}

/// Map a concrete type name to its schema. Anything that is not a built-in
/// scalar is a reference to the definition of that name.
pub fn data_type(name: &str) -> PropertySchema {
    match name {
        "Bool" => PropertySchema::Boolean,
        "Int" => PropertySchema::Integer,
        "Double" => PropertySchema::Double,
        "String" => PropertySchema::String,
        "Date" => PropertySchema::DateTime,
        "SchemaSerializable" => PropertySchema::Any,
        other => PropertySchema::Reference(Reference::new(other)),
    }
}

pub fn lower_property(type_name: &str, prop: &PropertyDescriptor) -> Result<LoweredProperty> {
    let wrapped = |marker: &'static str| {
        let name = prop.wrapped_type.as_deref().filter(|s| !s.is_empty());
        name.ok_or_else(|| Error::MissingWrappedType {
            type_name: type_name.to_string(),
            property: prop.name.clone(),
            marker,
        })
    };

    let (schema, required) = match prop.type_name.as_str() {
        ARRAY_MARKER => {
            let item = data_type(wrapped(ARRAY_MARKER)?);
            (PropertySchema::Array(Box::new(item)), false)
        }
        OPTIONAL_MARKER => {
            if !prop.is_optional {
                return Err(Error::OptionalNotFlagged {
                    type_name: type_name.to_string(),
                    property: prop.name.clone(),
                });
            }
            (data_type(wrapped(OPTIONAL_MARKER)?), true)
        }
        other => (data_type(other), false),
    };

    Ok(LoweredProperty { name: prop.name.clone(), schema, required })
}

/// Lower one type to its title and zero, one or two schema nodes:
/// nothing for value/array kinds, `[object]` or `[supertype ref, object]`.
pub fn lower_type(ty: &TypeDescriptor) -> Result<(String, Vec<SchemaNode>)> {
    let title = ty.info.name.clone();
    match ty.kind {
        TypeKind::Value | TypeKind::Array => return Ok((title, Vec::new())),
        TypeKind::Object => {}
    }

    let props = ty.object_properties()?;

    let mut nodes = Vec::with_capacity(2);
    if let Some(supertype) = ty.info.supertype() {
        nodes.push(SchemaNode::Reference(Reference::new(supertype)));
    }

    let mut properties = IndexMap::with_capacity(props.len());
    let mut required = Vec::new();
    for prop in &props {
        let lowered = lower_property(&title, prop)?;
        if lowered.required {
            required.push(lowered.name.clone());
        }
        properties.insert(lowered.name, lowered.schema);
    }
    nodes.push(SchemaNode::Object(ObjectSchema { properties, required }));

    Ok((title, nodes))
}

pub fn lower_document(doc: &Document, options: &Options) -> Result<OpenApiDocument> {
    debug!("lowering '{}' {} ({} types)", doc.name, doc.version, doc.types.len());

    let mut schemas = IndexMap::new();
    for ty in &doc.types {
        let (title, mut nodes) = lower_type(ty)?;
        let node = match nodes.len() {
            0 => {
                debug!("skipping {:?} type '{title}'", ty.kind);
                continue;
            }
            1 => nodes.remove(0),
            _ => SchemaNode::AllOf(nodes),
        };
        debug!("defined '{title}'");
        if schemas.insert(title.clone(), node).is_some() {
            warn!("type '{title}' is declared more than once; keeping the last declaration");
        }
    }

    Ok(OpenApiDocument {
        openapi: options.openapi_version.clone(),
        info: Info {
            title: doc.name.clone(),
            version: doc.version.to_string(),
            signature: doc.signature.clone(),
        },
        schemas,
    })
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::{TypeInfo, Version};

    fn prop(name: &str, ty: &str, wrapped: Option<&str>, optional: bool) -> PropertyDescriptor {
        PropertyDescriptor {
            name: name.into(),
            type_name: ty.into(),
            wrapped_type: wrapped.map(Into::into),
            is_optional: optional,
        }
    }

    fn object(
        name: &str,
        supertype: Option<&str>,
        props: Vec<PropertyDescriptor>,
    ) -> TypeDescriptor {
        TypeDescriptor {
            kind: TypeKind::Object,
            info: TypeInfo { name: name.into(), supertype: supertype.map(Into::into) },
            properties: Some(serde_json::to_value(props).unwrap()),
        }
    }

    fn leaf(kind: TypeKind, name: &str) -> TypeDescriptor {
        TypeDescriptor {
            kind,
            info: TypeInfo { name: name.into(), supertype: None },
            properties: None,
        }
    }

    #[test]
    fn builtin_scalars_map_exactly() {
        assert_eq!(data_type("Bool"), PropertySchema::Boolean);
        assert_eq!(data_type("Int"), PropertySchema::Integer);
        assert_eq!(data_type("Double"), PropertySchema::Double);
        assert_eq!(data_type("String"), PropertySchema::String);
        assert_eq!(data_type("Date"), PropertySchema::DateTime);
        assert_eq!(data_type("SchemaSerializable"), PropertySchema::Any);
    }

    #[test]
    fn unknown_names_become_references_verbatim() {
        assert_eq!(
            data_type("ActionRecord"),
            PropertySchema::Reference(Reference::new("ActionRecord"))
        );
        // case-sensitive: not the Bool scalar
        assert_eq!(data_type("bool"), PropertySchema::Reference(Reference::new("bool")));
    }

    #[test]
    fn array_property_wraps_item_schema() {
        let p = lower_property("T", &prop("xs", "Array", Some("Int"), false)).unwrap();
        assert_eq!(p.schema, PropertySchema::Array(Box::new(PropertySchema::Integer)));
        assert!(!p.required);

        let p = lower_property("T", &prop("rs", "Array", Some("Ref"), false)).unwrap();
        let item = PropertySchema::Reference(Reference::new("Ref"));
        assert_eq!(p.schema, PropertySchema::Array(Box::new(item)));
    }

    #[test]
    fn optional_property_is_listed_as_required() {
        let p = lower_property("T", &prop("tag", "Optional", Some("Date"), true)).unwrap();
        assert_eq!(p.schema, PropertySchema::DateTime);
        assert!(p.required);
    }

    #[test]
    fn plain_property_is_not_required() {
        let p = lower_property("T", &prop("id", "String", None, false)).unwrap();
        assert_eq!(p.schema, PropertySchema::String);
        assert!(!p.required);
    }

    #[test]
    fn wrapper_without_wrapped_type_fails() {
        let err = lower_property("T", &prop("xs", "Array", None, false)).unwrap_err();
        assert!(matches!(err, Error::MissingWrappedType { marker: "Array", .. }));
        let err = lower_property("T", &prop("o", "Optional", None, true)).unwrap_err();
        assert!(matches!(err, Error::MissingWrappedType { marker: "Optional", .. }));
    }

    #[test]
    fn empty_wrapped_type_counts_as_missing() {
        let err = lower_property("T", &prop("xs", "Array", Some(""), false)).unwrap_err();
        assert!(matches!(err, Error::MissingWrappedType { marker: "Array", .. }));
        let err = lower_property("T", &prop("o", "Optional", Some(""), true)).unwrap_err();
        assert!(matches!(err, Error::MissingWrappedType { marker: "Optional", .. }));
    }

    #[test]
    fn optional_without_flag_fails() {
        let err = lower_property("T", &prop("o", "Optional", Some("Int"), false)).unwrap_err();
        match err {
            Error::OptionalNotFlagged { type_name, property } => {
                assert_eq!(type_name, "T");
                assert_eq!(property, "o");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn value_and_array_kinds_produce_nothing() {
        let (title, nodes) = lower_type(&leaf(TypeKind::Value, "Int")).unwrap();
        assert_eq!(title, "Int");
        assert!(nodes.is_empty());
        let (_, nodes) = lower_type(&leaf(TypeKind::Array, "Array")).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn leaf_kinds_ignore_their_properties() {
        let mut ty = leaf(TypeKind::Value, "Int");
        ty.properties = Some(serde_json::json!([{"name": "raw"}]));
        let (_, nodes) = lower_type(&ty).unwrap();
        assert!(nodes.is_empty());
    }

    #[test]
    fn malformed_object_properties_fail() {
        let mut ty = object("Foo", None, vec![]);
        ty.properties = Some(serde_json::json!([{"name": "raw"}]));
        assert!(matches!(lower_type(&ty), Err(Error::Properties { .. })));
    }

    #[test]
    fn object_with_supertype_puts_reference_first() {
        let (title, nodes) = lower_type(&object("Bar", Some("Foo"), vec![])).unwrap();
        assert_eq!(title, "Bar");
        assert_eq!(nodes.len(), 2);
        assert_eq!(nodes[0], SchemaNode::Reference(Reference::new("Foo")));
        let SchemaNode::Object(own) = &nodes[1] else { panic!("expected object") };
        assert!(own.properties.is_empty());
        assert!(own.required.is_empty());
    }

    #[test]
    fn object_keeps_property_and_required_order() {
        let ty = object("Foo", None, vec![
            prop("z", "Optional", Some("Int"), true),
            prop("a", "String", None, false),
            prop("m", "Optional", Some("Bool"), true),
        ]);
        let (_, nodes) = lower_type(&ty).unwrap();
        let SchemaNode::Object(o) = &nodes[0] else { panic!("expected object") };
        assert_eq!(o.properties.keys().collect::<Vec<_>>(), ["z", "a", "m"]);
        assert_eq!(o.required, ["z", "m"]);
    }

    #[test]
    fn object_without_properties_list_fails() {
        let mut ty = object("Foo", None, vec![]);
        ty.properties = None;
        assert!(matches!(lower_type(&ty), Err(Error::MissingProperties { .. })));
    }

    #[test]
    fn document_skips_leaves_and_composes_subtypes() {
        let doc = Document {
            name: "X".into(),
            version: Version { major: 3, minor: 14 },
            signature: "abc".into(),
            types: vec![
                leaf(TypeKind::Value, "Baz"),
                object("Foo", None, vec![prop("id", "String", None, false)]),
                object("Bar", Some("Foo"), vec![]),
                leaf(TypeKind::Array, "Qux"),
            ],
        };
        let out = lower_document(&doc, &Options::default()).unwrap();
        assert_eq!(out.openapi, DEFAULT_OPENAPI_VERSION);
        assert_eq!(out.info.version, "3.14");
        assert_eq!(out.info.title, "X");
        assert_eq!(out.info.signature, "abc");
        assert_eq!(out.schemas.keys().collect::<Vec<_>>(), ["Foo", "Bar"]);
        assert!(matches!(out.schemas["Foo"], SchemaNode::Object(_)));
        assert!(matches!(&out.schemas["Bar"], SchemaNode::AllOf(v) if v.len() == 2));
    }

    #[test]
    fn duplicate_titles_keep_first_position_and_last_value() {
        let doc = Document {
            name: "X".into(),
            version: Version { major: 1, minor: 0 },
            signature: "s".into(),
            types: vec![
                object("A", None, vec![]),
                object("B", None, vec![]),
                object("A", Some("B"), vec![]),
            ],
        };
        let out = lower_document(&doc, &Options::default()).unwrap();
        assert_eq!(out.schemas.keys().collect::<Vec<_>>(), ["A", "B"]);
        assert!(matches!(out.schemas["A"], SchemaNode::AllOf(_)));
    }

    #[test]
    fn custom_openapi_version_is_used() {
        let doc = Document {
            name: "X".into(),
            version: Version { major: 1, minor: 0 },
            signature: "s".into(),
            types: vec![],
        };
        let opts = Options { openapi_version: "3.0.3".into() };
        assert_eq!(lower_document(&doc, &opts).unwrap().openapi, "3.0.3");
    }
}
