//! # yamlvalid-lint — Workload Manifest Validator
//!
//! Applies a fixed checklist of field-presence and value-range rules to a
//! decoded workload manifest and yields human-readable diagnostics.
//!
//! ## Checklist as data (`rule`, `checklist`)
//!
//! Rules are [`Rule`] descriptors (path, [`Check`], message template)
//! arranged in [`Entry`] lists. An [`Entry::ForEach`] scope re-runs its body
//! for every mapping element of a sequence, which is how the per-container
//! and per-port rules are expressed. [`Checklist::standard`] builds the
//! workload checklist; [`Checklist::workload`] applies configuration.
//!
//! ## Lazy evaluation (`validator`)
//!
//! [`validate`] and [`Checklist::validate`] return a [`Diagnostics`]
//! iterator. Nothing is evaluated until it is polled.
//!
//! ## Crate Policy
//!
//! - Depends only on `yamlvalid-core` internally.
//! - Validation never fails: a missing or mistyped field is either skipped
//!   or reported as a [`Diagnostic`](yamlvalid_core::Diagnostic).

pub mod checklist;
pub mod port;
pub mod rule;
pub mod validator;

pub use checklist::{Checklist, ChecklistError, RuleInfo, WorkloadOptions, DEFAULT_ALLOWED_OS};
pub use port::is_valid_port;
pub use rule::{Check, Entry, Rule};
pub use validator::{standard_checklist, validate, Diagnostics};
