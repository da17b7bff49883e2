//! # Loader and Decoder
//!
//! The two collaborators that run before validation: read a file's bytes,
//! then decode them into a [`Document`]. Each returns its own
//! [`DocumentError`] variant so the caller can report them differently.

use std::path::Path;

use serde_yaml::Value;

use crate::document::Document;
use crate::error::DocumentError;

/// Read the raw bytes of a manifest.
///
/// # Errors
///
/// Returns [`DocumentError::Read`] if the file is missing or unreadable.
pub fn read_document_bytes(path: &Path) -> Result<Vec<u8>, DocumentError> {
    std::fs::read(path).map_err(|source| DocumentError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Decode YAML bytes into a [`Document`].
///
/// Only the first and only document of the input is accepted; a stream of
/// several documents is a decode error. Merge keys (`<<: *anchor`) are
/// resolved before the tree is built, so merged fields are visible to
/// validation like any other field.
///
/// # Errors
///
/// Returns [`DocumentError::Decode`] on malformed YAML or an invalid merge,
/// [`DocumentError::RootNotMapping`] if the root is a sequence or scalar, and
/// [`DocumentError::RootKeyNotScalar`] if a top-level key is a collection.
pub fn decode_document(bytes: &[u8]) -> Result<Document, DocumentError> {
    let mut value: Value = serde_yaml::from_slice(bytes)?;
    value.apply_merge()?;
    Document::try_from(value)
}

/// Read and decode a manifest in one step.
///
/// # Errors
///
/// Any error from [`read_document_bytes`] or [`decode_document`].
pub fn load_document(path: &Path) -> Result<Document, DocumentError> {
    let bytes = read_document_bytes(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read manifest");
    decode_document(&bytes)
}
