//! Error types for loading and lowering a type-description document.

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Input is not JSON, or does not have the type-description shape.
    /// `path` is the JSON path of the offending node (e.g. `types[2].kind`).
    #[error("malformed type description at JSON path {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// The `properties` list of an object type has the wrong shape.
    /// `path` is relative to the type entry (e.g. `properties[0].isOptional`).
    #[error("malformed {path} of '{type_name}': {source}")]
    Properties {
        type_name: String,
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An `Array` or `Optional` property without a (non-empty) `wrappedType`.
    #[error("property '{property}' of '{type_name}' is {marker} but has no wrappedType")]
    MissingWrappedType {
        type_name: String,
        property: String,
        marker: &'static str,
    },

    /// A property typed `Optional` whose `isOptional` flag is false.
    #[error("property '{property}' of '{type_name}' is Optional but isOptional is false")]
    OptionalNotFlagged { type_name: String, property: String },

    /// An object-kind type with no `properties` list.
    #[error("object type '{type_name}' has no properties list")]
    MissingProperties { type_name: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
