//! # Workload Checklist
//!
//! The fixed set of rules applied to a workload manifest, and the knobs a
//! configuration file may turn on it.
//!
//! | Id | Path | Check |
//! |----|------|-------|
//! | `4`  | `metadata.name` | required non-empty string |
//! | `10` | `spec.os` | one of the allowed operating systems |
//! | `12` | `spec.containers[*].name` | required non-empty string |
//! | `15` | `spec.containers[*].ports[*].containerPort` | port |
//! | `20` | `spec.containers[*].readinessProbe.httpGet.port` | port |
//! | `24` | `spec.containers[*].livenessProbe.httpGet.port` | port |
//! | `27` | `spec.containers[*].resources.limits.cpu` | numeric |
//! | `30` | `spec.containers[*].resources.requests.cpu` | numeric |
//!
//! The ids are opaque labels carried over as each diagnostic's location
//! hint. They do not track positions in the file.

use std::collections::BTreeSet;

use thiserror::Error;
use yamlvalid_core::Document;

use crate::rule::{Check, Entry, Rule};
use crate::validator::Diagnostics;

/// Rule id of the `spec.os` check.
pub const OS_RULE_ID: &str = "10";

/// Operating systems accepted by default.
pub const DEFAULT_ALLOWED_OS: &[&str] = &["linux", "windows"];

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors building a checklist from options.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChecklistError {
    /// A disabled rule id does not name any rule.
    #[error("unknown rule id '{0}'")]
    UnknownRule(String),

    /// An allow-list was configured empty.
    #[error("rule {rule} needs at least one allowed value")]
    EmptyAllowList {
        /// Id of the rule whose allow-list is empty.
        rule: String,
    },
}

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Adjustments applied on top of the standard workload checklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadOptions {
    /// Values accepted for `spec.os`.
    pub allowed_os: Vec<String>,
    /// Rule ids to leave out.
    pub disabled_rules: BTreeSet<String>,
}

impl Default for WorkloadOptions {
    fn default() -> Self {
        Self {
            allowed_os: DEFAULT_ALLOWED_OS.iter().map(|s| s.to_string()).collect(),
            disabled_rules: BTreeSet::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// Checklist
// ---------------------------------------------------------------------------

/// An ordered, immutable list of checklist entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checklist {
    entries: Vec<Entry>,
}

/// A rule together with its path from the document root, e.g.
/// `spec.containers[*].ports[*].containerPort`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleInfo<'a> {
    /// The rule.
    pub rule: &'a Rule,
    /// Absolute path pattern.
    pub path: String,
}

impl Checklist {
    /// Build a checklist from arbitrary entries.
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    /// The standard workload checklist with default options.
    pub fn standard() -> Self {
        Self::new(workload_entries(DEFAULT_ALLOWED_OS.iter().map(|s| s.to_string()).collect()))
    }

    /// The workload checklist adjusted by `options`.
    ///
    /// # Errors
    ///
    /// [`ChecklistError::EmptyAllowList`] if `allowed_os` is empty and the
    /// os rule is enabled; [`ChecklistError::UnknownRule`] if a disabled id
    /// names no rule.
    pub fn workload(options: &WorkloadOptions) -> Result<Self, ChecklistError> {
        let mut checklist = Self::standard();

        if !options.disabled_rules.contains(OS_RULE_ID) {
            checklist.set_allowed_values(OS_RULE_ID, options.allowed_os.clone())?;
        }

        let known: BTreeSet<String> = checklist
            .rules()
            .into_iter()
            .map(|info| info.rule.id().to_string())
            .collect();
        if let Some(unknown) = options.disabled_rules.difference(&known).next() {
            return Err(ChecklistError::UnknownRule(unknown.clone()));
        }

        checklist.entries = without_rules(checklist.entries, &options.disabled_rules);
        tracing::debug!(
            rules = checklist.rules().len(),
            disabled = options.disabled_rules.len(),
            "built workload checklist"
        );
        Ok(checklist)
    }

    /// Replace the allow-list of the [`Check::OneOf`] rule `rule_id`.
    ///
    /// # Errors
    ///
    /// [`ChecklistError::EmptyAllowList`] if `values` is empty;
    /// [`ChecklistError::UnknownRule`] if no `OneOf` rule has that id.
    pub fn set_allowed_values(
        &mut self,
        rule_id: &str,
        values: Vec<String>,
    ) -> Result<(), ChecklistError> {
        if values.is_empty() {
            return Err(ChecklistError::EmptyAllowList {
                rule: rule_id.to_string(),
            });
        }
        let rule = find_rule_mut(&mut self.entries, rule_id)
            .filter(|rule| matches!(rule.check(), Check::OneOf(_)))
            .ok_or_else(|| ChecklistError::UnknownRule(rule_id.to_string()))?;
        *rule.check_mut() = Check::OneOf(values);
        Ok(())
    }

    /// Every rule with its absolute path, in evaluation order.
    pub fn rules(&self) -> Vec<RuleInfo<'_>> {
        let mut out = Vec::new();
        collect_rules(&self.entries, "", &mut out);
        out
    }

    /// Lazily validate `document`, labelling findings with `source_label`.
    pub fn validate<'a>(&'a self, document: &'a Document, source_label: &'a str) -> Diagnostics<'a> {
        Diagnostics::new(&self.entries, document.root(), source_label)
    }
}

impl Default for Checklist {
    fn default() -> Self {
        Self::standard()
    }
}

fn workload_entries(allowed_os: Vec<String>) -> Vec<Entry> {
    vec![
        Rule::new("4", "metadata.name", Check::RequiredString, "name is required").into(),
        Rule::new(
            OS_RULE_ID,
            "spec.os",
            Check::OneOf(allowed_os),
            "os has unsupported value '{value}'",
        )
        .into(),
        Entry::for_each(
            "spec.containers",
            vec![
                Rule::new("12", "name", Check::RequiredString, "name is required").into(),
                Entry::for_each(
                    "ports",
                    vec![Rule::new(
                        "15",
                        "containerPort",
                        Check::Port,
                        "containerPort value out of range",
                    )
                    .into()],
                ),
                Rule::new(
                    "20",
                    "readinessProbe.httpGet.port",
                    Check::Port,
                    "port value out of range",
                )
                .into(),
                Rule::new(
                    "24",
                    "livenessProbe.httpGet.port",
                    Check::Port,
                    "port value out of range",
                )
                .into(),
                Rule::new("27", "resources.limits.cpu", Check::Numeric, "cpu must be int").into(),
                Rule::new("30", "resources.requests.cpu", Check::Numeric, "cpu must be int").into(),
            ],
        ),
    ]
}

fn without_rules(entries: Vec<Entry>, disabled: &BTreeSet<String>) -> Vec<Entry> {
    entries
        .into_iter()
        .filter_map(|entry| match entry {
            Entry::Rule(rule) if disabled.contains(rule.id()) => None,
            Entry::Rule(rule) => Some(Entry::Rule(rule)),
            Entry::ForEach { path, body } => {
                let body = without_rules(body, disabled);
                (!body.is_empty()).then_some(Entry::ForEach { path, body })
            }
        })
        .collect()
}

fn find_rule_mut<'a>(entries: &'a mut [Entry], rule_id: &str) -> Option<&'a mut Rule> {
    for entry in entries {
        match entry {
            Entry::Rule(rule) if rule.id() == rule_id => return Some(rule),
            Entry::Rule(_) => {}
            Entry::ForEach { body, .. } => {
                if let Some(rule) = find_rule_mut(body, rule_id) {
                    return Some(rule);
                }
            }
        }
    }
    None
}

fn collect_rules<'a>(entries: &'a [Entry], prefix: &str, out: &mut Vec<RuleInfo<'a>>) {
    for entry in entries {
        match entry {
            Entry::Rule(rule) => out.push(RuleInfo {
                rule,
                path: join_path(prefix, &rule.path().join(".")),
            }),
            Entry::ForEach { path, body } => {
                let scope = format!("{}[*]", join_path(prefix, &path.join(".")));
                collect_rules(body, &scope, out);
            }
        }
    }
}

fn join_path(prefix: &str, rest: &str) -> String {
    match (prefix.is_empty(), rest.is_empty()) {
        (true, _) => rest.to_string(),
        (false, true) => prefix.to_string(),
        (false, false) => format!("{prefix}.{rest}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(checklist: &Checklist) -> Vec<String> {
        checklist
            .rules()
            .iter()
            .map(|info| info.rule.id().to_string())
            .collect()
    }

    #[test]
    fn standard_rules_in_order() {
        let checklist = Checklist::standard();
        assert_eq!(
            ids(&checklist),
            vec!["4", "10", "12", "15", "20", "24", "27", "30"]
        );
    }

    #[test]
    fn standard_absolute_paths() {
        let paths: Vec<String> = Checklist::standard()
            .rules()
            .into_iter()
            .map(|info| info.path)
            .collect();
        assert_eq!(
            paths,
            vec![
                "metadata.name",
                "spec.os",
                "spec.containers[*].name",
                "spec.containers[*].ports[*].containerPort",
                "spec.containers[*].readinessProbe.httpGet.port",
                "spec.containers[*].livenessProbe.httpGet.port",
                "spec.containers[*].resources.limits.cpu",
                "spec.containers[*].resources.requests.cpu",
            ]
        );
    }

    #[test]
    fn default_options_match_standard() {
        let built = Checklist::workload(&WorkloadOptions::default()).unwrap();
        assert_eq!(built, Checklist::standard());
        assert_eq!(Checklist::default(), Checklist::standard());
    }

    #[test]
    fn disabled_rules_are_removed() {
        let options = WorkloadOptions {
            disabled_rules: ["27", "30"].iter().map(|s| s.to_string()).collect(),
            ..WorkloadOptions::default()
        };
        let checklist = Checklist::workload(&options).unwrap();
        assert_eq!(ids(&checklist), vec!["4", "10", "12", "15", "20", "24"]);
    }

    #[test]
    fn empty_scopes_are_pruned() {
        let options = WorkloadOptions {
            disabled_rules: ["15"].iter().map(|s| s.to_string()).collect(),
            ..WorkloadOptions::default()
        };
        let checklist = Checklist::workload(&options).unwrap();
        assert!(checklist
            .rules()
            .iter()
            .all(|info| !info.path.contains("ports")));
    }

    #[test]
    fn unknown_disabled_rule_is_rejected() {
        let options = WorkloadOptions {
            disabled_rules: ["99"].iter().map(|s| s.to_string()).collect(),
            ..WorkloadOptions::default()
        };
        assert_eq!(
            Checklist::workload(&options),
            Err(ChecklistError::UnknownRule("99".to_string()))
        );
    }

    #[test]
    fn empty_os_allow_list_is_rejected() {
        let options = WorkloadOptions {
            allowed_os: vec![],
            ..WorkloadOptions::default()
        };
        assert!(matches!(
            Checklist::workload(&options),
            Err(ChecklistError::EmptyAllowList { .. })
        ));
    }

    #[test]
    fn empty_os_allow_list_is_fine_when_rule_disabled() {
        let options = WorkloadOptions {
            allowed_os: vec![],
            disabled_rules: [OS_RULE_ID].iter().map(|s| s.to_string()).collect(),
        };
        let checklist = Checklist::workload(&options).unwrap();
        assert!(!ids(&checklist).contains(&OS_RULE_ID.to_string()));
    }

    #[test]
    fn custom_os_allow_list_is_applied() {
        let options = WorkloadOptions {
            allowed_os: vec!["linux".to_string(), "freebsd".to_string()],
            ..WorkloadOptions::default()
        };
        let checklist = Checklist::workload(&options).unwrap();
        let os_rule = checklist
            .rules()
            .into_iter()
            .find(|info| info.rule.id() == OS_RULE_ID)
            .unwrap();
        assert_eq!(
            os_rule.rule.check(),
            &Check::OneOf(vec!["linux".to_string(), "freebsd".to_string()])
        );
    }

    #[test]
    fn set_allowed_values_requires_one_of_rule() {
        let mut checklist = Checklist::standard();
        assert_eq!(
            checklist.set_allowed_values("27", vec!["x".to_string()]),
            Err(ChecklistError::UnknownRule("27".to_string()))
        );
    }
}
