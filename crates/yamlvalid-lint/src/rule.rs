//! # Rule Descriptors
//!
//! A checklist is data: an ordered list of [`Entry`] values. An entry is
//! either a [`Rule`] evaluated against the current scope, or a
//! [`Entry::ForEach`] that re-runs a body of entries for every mapping
//! element of a sequence.
//!
//! Paths are relative to the scope they are evaluated in. A rule whose
//! parent path is missing, or passes through something that is not a
//! mapping, is skipped without a finding.

use yamlvalid_core::{Diagnostic, Node};

use crate::port::is_valid_port;

/// Placeholder replaced by the offending value in a message template.
pub const VALUE_PLACEHOLDER: &str = "{value}";

// ---------------------------------------------------------------------------
// Checks
// ---------------------------------------------------------------------------

/// Predicate applied to the value found at a rule's path.
///
/// The value is `None` when the final key is absent from its parent
/// mapping. Only [`Check::RequiredString`] reports an absent key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Check {
    /// Must be present and a non-empty string.
    RequiredString,
    /// If present and a string, must be one of the listed values.
    /// Non-string values are ignored.
    OneOf(Vec<String>),
    /// If present, must be a valid port (see [`is_valid_port`]).
    Port,
    /// If present, must be an integer or floating-point scalar.
    Numeric,
}

impl Check {
    /// Returns `true` if `value` satisfies the check.
    pub fn accepts(&self, value: Option<&Node>) -> bool {
        match self {
            Self::RequiredString => matches!(value, Some(Node::String(s)) if !s.is_empty()),
            Self::OneOf(allowed) => match value {
                Some(Node::String(s)) => allowed.iter().any(|a| a == s),
                _ => true,
            },
            Self::Port => value.map_or(true, is_valid_port),
            Self::Numeric => value.map_or(true, Node::is_numeric),
        }
    }
}

// ---------------------------------------------------------------------------
// Rule
// ---------------------------------------------------------------------------

/// One path + predicate + message triple.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    id: String,
    path: Vec<String>,
    check: Check,
    message: String,
}

impl Rule {
    /// Create a rule.
    ///
    /// `path` is dot-separated and relative to the enclosing scope; it must
    /// name at least one key. `id` becomes the diagnostic's location hint.
    pub fn new(
        id: impl Into<String>,
        path: &str,
        check: Check,
        message: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            path: split_path(path),
            check,
            message: message.into(),
        }
    }

    /// Rule identifier, reported as the diagnostic's location hint.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Path keys relative to the enclosing scope.
    pub fn path(&self) -> &[String] {
        &self.path
    }

    /// The predicate.
    pub fn check(&self) -> &Check {
        &self.check
    }

    pub(crate) fn check_mut(&mut self) -> &mut Check {
        &mut self.check
    }

    /// Message template, possibly containing [`VALUE_PLACEHOLDER`].
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Evaluate the rule against `scope`.
    ///
    /// Returns a diagnostic labelled `source_label` if the check fails,
    /// `None` if it passes or the rule does not apply.
    pub fn evaluate(&self, scope: &Node, source_label: &str) -> Option<Diagnostic> {
        let (key, parents) = self.path.split_last()?;
        let parent = scope.lookup(parents)?.as_mapping()?;
        let value = parent.get(key.as_str());

        if self.check.accepts(value) {
            return None;
        }

        tracing::trace!(rule = %self.id, key = %key, "rule fired");
        Some(Diagnostic::new(
            source_label,
            self.id.as_str(),
            self.render_message(value),
        ))
    }

    fn render_message(&self, value: Option<&Node>) -> String {
        if !self.message.contains(VALUE_PLACEHOLDER) {
            return self.message.clone();
        }
        let rendered = value.map(Node::to_string).unwrap_or_default();
        self.message.replace(VALUE_PLACEHOLDER, &rendered)
    }
}

// ---------------------------------------------------------------------------
// Entry
// ---------------------------------------------------------------------------

/// One element of a checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A rule evaluated in the current scope.
    Rule(Rule),
    /// Run `body` once per mapping element of the sequence at `path`, with
    /// that element as the scope. Non-mapping elements are skipped.
    ForEach {
        /// Keys leading to the sequence, relative to the current scope.
        path: Vec<String>,
        /// Entries evaluated for each element.
        body: Vec<Entry>,
    },
}

impl Entry {
    /// Build a [`Entry::ForEach`] from a dot-separated path.
    pub fn for_each(path: &str, body: Vec<Entry>) -> Self {
        Self::ForEach {
            path: split_path(path),
            body,
        }
    }
}

impl From<Rule> for Entry {
    fn from(rule: Rule) -> Self {
        Self::Rule(rule)
    }
}

fn split_path(path: &str) -> Vec<String> {
    path.split('.')
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .collect()
}
