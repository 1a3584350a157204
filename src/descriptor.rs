//! Typed model of the reflection-derived type-description document.
//!
//! Shape checks happen at load time. A missing key, a wrong scalar type or an
//! unknown `kind` fails the parse of the [`Document`], reporting the JSON path
//! of the offending node. The `properties` list is decoded only for object
//! kinds, when lowering asks for it. Cross-references (supertypes, property
//! type names) are not resolved; a dangling name lowers to a dangling `$ref`.

use std::io::Read;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// One versioned snapshot of a type system.
#[derive(Debug, Clone, Deserialize)]
pub struct Document {
    pub name: String,
    pub version: Version,
    pub signature: String,
    pub types: Vec<TypeDescriptor>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct Version {
    pub major: i64,
    pub minor: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeKind {
    Value,
    Array,
    Object,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeDescriptor {
    pub kind: TypeKind,
    #[serde(rename = "type")]
    pub info: TypeInfo,
    /// Left undecoded: only object kinds read it, see [`Self::object_properties`].
    #[serde(default)]
    pub properties: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TypeInfo {
    pub name: String,
    #[serde(default)]
    pub supertype: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDescriptor {
    pub name: String,
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default)]
    pub wrapped_type: Option<String>,
    pub is_optional: bool,
}

/// Structural markers that wrap another type via `wrappedType`.
pub const ARRAY_MARKER: &str = "Array";
pub const OPTIONAL_MARKER: &str = "Optional";

impl std::str::FromStr for Document {
    type Err = crate::error::Error;

    fn from_str(src: &str) -> Result<Self> {
        crate::path_de::from_str_with_path(src)
    }
}

impl Document {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        crate::path_de::from_reader_with_path(reader)
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl TypeDescriptor {
    /// Decode the property list of an object-kind type.
    pub fn object_properties(&self) -> Result<Vec<PropertyDescriptor>> {
        let type_name = &self.info.name;
        let raw = self
            .properties
            .as_ref()
            .ok_or_else(|| Error::MissingProperties { type_name: type_name.clone() })?;
        crate::path_de::from_value_with_path(raw).map_err(|err| match err {
            Error::Parse { path, source } => {
                let path = if path == "." { String::new() } else { path };
                Error::Properties {
                    type_name: type_name.clone(),
                    path: format!("properties{path}"),
                    source,
                }
            }
            other => other,
        })
    }
}

impl TypeInfo {
    /// The supertype name, treating an empty string as absent.
    pub fn supertype(&self) -> Option<&str> {
        self.supertype.as_deref().filter(|s| !s.is_empty())
    }
}

// ------------------------------- Tests ------------------------------------ //
