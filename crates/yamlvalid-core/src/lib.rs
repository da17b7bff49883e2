//! # yamlvalid-core — Foundational Types for yamlvalid
//!
//! This crate defines the data every other yamlvalid crate works on. It
//! depends on nothing internal.
//!
//! ## Key Design Principles
//!
//! 1. **One tagged union for decoded YAML.** [`Node`] has exactly the
//!    variants a workload manifest can carry: mapping, sequence, string,
//!    integer, float, boolean, null. Every consumer matches on it
//!    explicitly; a variant mismatch is data, never a panic.
//!
//! 2. **One numeric normalization.** [`Node::as_integer`] is the only place
//!    integer and floating-point scalars are folded into a single integer
//!    view. Range checks go through it.
//!
//! 3. **Collaborator failures are typed.** Reading and decoding return
//!    [`DocumentError`], so the caller can report a read failure and a
//!    decode failure differently.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `yamlvalid-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod diagnostic;
pub mod document;
pub mod error;
pub mod loader;

// Re-export primary types for ergonomic imports.
pub use diagnostic::Diagnostic;
pub use document::{Document, Node};
pub use error::DocumentError;
pub use loader::{decode_document, load_document, read_document_bytes};
