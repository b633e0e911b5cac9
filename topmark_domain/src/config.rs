//! Immutable run configuration, frozen from a builder.
//!
//! `topmark-domain` only models the frozen shape and the freeze step itself;
//! reading a config from TOML/CLI and merging multiple sources together is
//! an external-collaborator concern left to the bootstrap/engine layers.

use std::collections::HashMap;

use crate::error::TopmarkError;
use crate::policy::{MutablePolicy, Policy};

/// How a rendered header is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HeaderOutputFormat {
    #[default]
    Native,
    Plain,
    /// Renders identically to `Plain`; kept as a distinct variant so a
    /// future structured-output mode has a place to land without another
    /// enum change.
    Json,
}

/// How a file's new contents are committed to disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileWriteStrategy {
    /// Write a temp file in the same directory, fsync, then rename over the original.
    #[default]
    Atomic,
    /// Write directly in place (no crash-safety guarantee).
    Inplace,
}

/// Where processed output goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputTarget {
    #[default]
    File,
    Stdout,
}

/// Which of the two mutually-exclusive per-file branches a run takes:
/// the normal insert/update/compare workflow (`Planner`), or an explicit
/// header-removal pass (`Stripper`). The pipeline's step list is the same
/// either way; each branch's steps gate themselves on this field (see
/// spec.md §2's "(Stripper | Planner)" alternative in the data-flow diagram).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Operation {
    #[default]
    Sync,
    Strip,
}

/// Parallel arrays of header field name → value, mirroring the source
/// format's separate `[header].fields` ordering list and `[fields]` value
/// table: order and values are independent axes, so a field can be declared
/// (and thus rendered, even if blank) without a value, and vice versa.
#[derive(Debug, Clone, Default)]
pub struct HeaderFieldSpec {
    pub order: Vec<String>,
    pub values: HashMap<String, String>,
}

impl HeaderFieldSpec {
    pub fn new(order: Vec<String>, values: HashMap<String, String>) -> Self {
        Self { order, values }
    }

    /// Iterates fields in declared order, pairing each with its value (empty
    /// string if undeclared in `values`).
    pub fn ordered_pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.order.iter().map(|name| (name.as_str(), self.values.get(name).map_or("", |v| v.as_str())))
    }
}

/// A builder for [`Config`]. Any field left `None`/empty stays unresolved
/// until [`MutableConfig::freeze`].
#[derive(Debug, Clone, Default)]
pub struct MutableConfig {
    pub apply_changes: Option<bool>,
    pub operation: Operation,
    pub output_target: OutputTarget,
    pub file_write_strategy: FileWriteStrategy,
    pub policy: MutablePolicy,
    pub policy_by_type: HashMap<String, MutablePolicy>,
    pub header_fields: Vec<String>,
    pub field_values: HashMap<String, String>,
    pub align_fields: Option<bool>,
    pub header_format: Option<HeaderOutputFormat>,
}

impl MutableConfig {
    pub fn builder() -> Self {
        Self::default()
    }

    /// Resolves policy layering (per-type over global over an all-false
    /// base) and normalizes container types, producing an immutable
    /// [`Config`] snapshot.
    ///
    /// Mirrors the original layering: the global policy is resolved first
    /// against defaults, then each per-type override is resolved against
    /// *that* resolved global policy — so an unset per-type field inherits
    /// the run's global choice, not the hardcoded default.
    pub fn freeze(&self) -> Result<Config, TopmarkError> {
        let global_policy = self.policy.resolve(Policy::default());
        global_policy.validate("global policy")?;

        let mut policy_by_type = HashMap::with_capacity(self.policy_by_type.len());
        for (file_type, mutable) in &self.policy_by_type {
            let resolved = mutable.resolve(global_policy);
            resolved.validate(&format!("policy for type '{file_type}'"))?;
            policy_by_type.insert(file_type.clone(), resolved);
        }

        Ok(Config {
            apply_changes: self.apply_changes.unwrap_or(false),
            operation: self.operation,
            output_target: self.output_target,
            file_write_strategy: self.file_write_strategy,
            policy: global_policy,
            policy_by_type,
            header_fields: HeaderFieldSpec::new(self.header_fields.clone(), self.field_values.clone()),
            align_fields: self.align_fields.unwrap_or(true),
            header_format: self.header_format.unwrap_or_default(),
        })
    }
}

/// A fully resolved, immutable run configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub apply_changes: bool,
    pub operation: Operation,
    pub output_target: OutputTarget,
    pub file_write_strategy: FileWriteStrategy,
    pub policy: Policy,
    pub policy_by_type: HashMap<String, Policy>,
    pub header_fields: HeaderFieldSpec,
    pub align_fields: bool,
    pub header_format: HeaderOutputFormat,
}

impl Config {
    /// The effective policy for `file_type_name`, falling back to the global policy.
    pub fn policy_for(&self, file_type_name: &str) -> Policy {
        self.policy_by_type.get(file_type_name).copied().unwrap_or(self.policy)
    }
}
