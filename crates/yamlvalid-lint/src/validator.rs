//! # Validator
//!
//! Walks a checklist over a document and yields diagnostics lazily.
//!
//! [`Diagnostics`] is a depth-first walk driven by an explicit stack. Each
//! frame is either a list of entries being evaluated in one scope, or the
//! remaining elements of a sequence a `ForEach` entry is iterating. Nothing
//! is shared between calls; the walk holds only borrows of the checklist
//! and the document.

use std::sync::OnceLock;

use yamlvalid_core::{Diagnostic, Document, Node};

use crate::checklist::Checklist;
use crate::rule::Entry;

/// The standard workload checklist, built once.
pub fn standard_checklist() -> &'static Checklist {
    static STANDARD: OnceLock<Checklist> = OnceLock::new();
    STANDARD.get_or_init(Checklist::standard)
}

/// Validate `document` against the standard workload checklist.
///
/// The returned iterator is lazy and yields findings in checklist order;
/// findings for one sequence element are contiguous and elements are
/// visited in sequence order.
pub fn validate<'a>(document: &'a Document, source_label: &'a str) -> Diagnostics<'a> {
    standard_checklist().validate(document, source_label)
}

enum Frame<'a> {
    Entries {
        entries: std::slice::Iter<'a, Entry>,
        scope: &'a Node,
    },
    Elements {
        body: &'a [Entry],
        items: std::slice::Iter<'a, Node>,
    },
}

/// Lazy sequence of findings produced by one validation pass.
pub struct Diagnostics<'a> {
    stack: Vec<Frame<'a>>,
    source_label: &'a str,
}

impl<'a> Diagnostics<'a> {
    pub(crate) fn new(entries: &'a [Entry], root: &'a Node, source_label: &'a str) -> Self {
        Self {
            stack: vec![Frame::Entries {
                entries: entries.iter(),
                scope: root,
            }],
            source_label,
        }
    }
}

impl<'a> Iterator for Diagnostics<'a> {
    type Item = Diagnostic;

    fn next(&mut self) -> Option<Diagnostic> {
        loop {
            let frame = self.stack.last_mut()?;
            let pushed = match frame {
                Frame::Entries { entries, scope } => {
                    let scope: &'a Node = *scope;
                    let Some(entry) = entries.next() else {
                        self.stack.pop();
                        continue;
                    };
                    match entry {
                        Entry::Rule(rule) => {
                            if let Some(diagnostic) = rule.evaluate(scope, self.source_label) {
                                return Some(diagnostic);
                            }
                            None
                        }
                        Entry::ForEach { path, body } => scope
                            .lookup(path.as_slice())
                            .and_then(Node::as_sequence)
                            .map(|items| {
                                tracing::debug!(
                                    path = %path.join("."),
                                    elements = items.len(),
                                    "entering sequence scope"
                                );
                                Frame::Elements {
                                    body: body.as_slice(),
                                    items: items.iter(),
                                }
                            }),
                    }
                }
                Frame::Elements { body, items } => {
                    let body: &'a [Entry] = *body;
                    let Some(item) = items.next() else {
                        self.stack.pop();
                        continue;
                    };
                    item.as_mapping().map(|_| Frame::Entries {
                        entries: body.iter(),
                        scope: item,
                    })
                }
            };
            if let Some(frame) = pushed {
                self.stack.push(frame);
            }
        }
    }
}

impl std::iter::FusedIterator for Diagnostics<'_> {}
