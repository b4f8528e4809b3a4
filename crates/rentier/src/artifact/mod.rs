//! Model artifact reading and writing.
//!
//! The artifact is a single versioned JSON document carrying everything the
//! pipeline needs: the trained forest, the fitted label encoders, and the
//! feature schema they were trained against. [`read_schema`] checks the
//! format envelope before parsing the payload, so a foreign file or a
//! future format version fails with a precise error instead of a generic
//! serde one.

pub mod convert;
pub mod schema;

pub use convert::ConversionError;
pub use schema::ArtifactSchema;

use std::io::{Read, Write};

use serde_json::Value;
use thiserror::Error;

/// Errors loading a model artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    /// The artifact could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The document is not valid JSON, or does not match the schema.
    #[error("malformed artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// The document is JSON, but not a rent model artifact.
    #[error("not a rent model artifact")]
    NotAnArtifact,

    /// The artifact was written by a newer format version.
    #[error("unsupported artifact version {found}, this build reads version {}", ArtifactSchema::VERSION)]
    UnsupportedVersion { found: u64 },

    /// The artifact parsed, but its contents failed validation.
    #[error("invalid artifact: {0}")]
    Invalid(#[from] ConversionError),
}

/// Read an artifact document, checking the format envelope first.
pub fn read_schema<R: Read>(reader: R) -> Result<ArtifactSchema, ArtifactError> {
    let document: Value = serde_json::from_reader(reader)?;

    if document.get("format").and_then(Value::as_str) != Some(ArtifactSchema::FORMAT_TAG) {
        return Err(ArtifactError::NotAnArtifact);
    }

    let version = document
        .get("version")
        .and_then(Value::as_u64)
        .ok_or(ArtifactError::NotAnArtifact)?;
    if version != u64::from(ArtifactSchema::VERSION) {
        return Err(ArtifactError::UnsupportedVersion { found: version });
    }

    Ok(serde_json::from_value(document)?)
}

/// Write an artifact document as pretty-printed JSON.
pub fn write_schema<W: Write>(writer: W, schema: &ArtifactSchema) -> Result<(), ArtifactError> {
    serde_json::to_writer_pretty(writer, schema)?;
    Ok(())
}
