//! Generate an OpenAPI `components.schemas` document from the JSON type
//! description that xcresulttool prints for its result-bundle format.
//!
//! Pipeline: JSON bytes → [`descriptor::Document`] → [`lower`] →
//! [`ir::OpenApiDocument`] → [`emit`] → JSON bytes.
pub mod cli;
pub mod descriptor;
pub mod emit;
pub mod error;
pub mod ir;
pub mod lower;
pub mod path_de;

use std::io::{Read, Write};

use serde_json::Value;

pub use descriptor::Document;
pub use error::{Error, Result};
pub use lower::{DEFAULT_OPENAPI_VERSION, Options};

/// Parse, lower and render in one go.
pub fn gen_openapi(src: &str, options: &Options) -> Result<Value> {
    let doc: Document = src.parse()?;
    let out = lower::lower_document(&doc, options)?;
    Ok(emit::document_json(&out))
}

/// Reader → writer. Nothing is written unless the whole input lowers cleanly.
pub fn transcode<R: Read, W: Write>(input: R, mut output: W, options: &Options) -> Result<()> {
    let doc = Document::from_reader(input)?;
    let out = lower::lower_document(&doc, options)?;
    write_json(&mut output, &emit::document_json(&out))
}

/// Compact JSON followed by a newline.
pub fn write_json<W: Write>(mut output: W, value: &Value) -> Result<()> {
    let bytes = serde_json::to_vec(value).map_err(std::io::Error::from)?;
    output.write_all(&bytes)?;
    output.write_all(b"\n")?;
    output.flush()?;
    Ok(())
}
