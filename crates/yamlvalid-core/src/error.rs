//! # Error Types
//!
//! Failures of the two collaborators that run before validation: reading
//! the file and decoding it. Validation itself never fails, so there is no
//! validation error type here.

use std::path::PathBuf;

use thiserror::Error;

/// Error produced while turning a file into a [`Document`](crate::Document).
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The file could not be read.
    #[error("unable to read file {}: {source}", path.display())]
    Read {
        /// Path that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },

    /// The bytes are not well-formed YAML.
    #[error("{0}")]
    Decode(#[from] serde_yaml::Error),

    /// The YAML is well-formed but its root is not a mapping.
    #[error("document root must be a mapping, found {kind}")]
    RootNotMapping {
        /// Kind of the node found at the root.
        kind: &'static str,
    },

    /// A top-level key is a sequence or mapping and cannot name a field.
    #[error("document root has a {kind} key")]
    RootKeyNotScalar {
        /// Kind of the offending key.
        kind: &'static str,
    },
}
