//! Tri-state policy resolution.
//!
//! Policy can be set at three layers — command line, per-file-type config
//! section, global config section — each of which may leave a field unset.
//! [`MutablePolicy`] represents one layer (`Option<bool>` per field);
//! resolving a chain of layers with [`MutablePolicy::resolve`] folds them
//! down, narrowest layer first, into an immutable [`Policy`] with plain
//! `bool`s. `add_only`/`update_only` mutual exclusion is checked once, at
//! resolution time, not on every read.

use crate::error::TopmarkError;

/// One layer of policy, with any subset of fields left unset.
///
/// New soft-policy flags are added here as `Option<bool>` and default to
/// `false` once resolved, so an older config that never sets them keeps
/// today's behavior (see spec's Open Questions note on extensibility).
#[derive(Debug, Clone, Copy, Default)]
pub struct MutablePolicy {
    pub add_only: Option<bool>,
    pub update_only: Option<bool>,
    pub allow_header_in_empty_files: Option<bool>,
    /// Render an empty header block (markers only, no fields) rather than
    /// skipping insertion when no field has a value.
    pub render_empty_header_when_no_fields: Option<bool>,
    /// Permit the XML processor to split an existing physical line when
    /// insertion would otherwise land mid-line (prolog/DOCTYPE + body).
    pub allow_reflow: Option<bool>,
    /// Tolerate a file with more than one newline style instead of skipping it.
    pub ignore_mixed_line_endings: Option<bool>,
    /// Tolerate a UTF-8 BOM appearing before a `#!` shebang instead of flagging it.
    pub ignore_bom_before_shebang: Option<bool>,
}

impl MutablePolicy {
    /// Resolves this layer against a `base` (an already-resolved, coarser
    /// layer): an unset field here falls through to `base`'s value.
    pub fn resolve(&self, base: Policy) -> Policy {
        Policy {
            add_only: self.add_only.unwrap_or(base.add_only),
            update_only: self.update_only.unwrap_or(base.update_only),
            allow_header_in_empty_files: self
                .allow_header_in_empty_files
                .unwrap_or(base.allow_header_in_empty_files),
            render_empty_header_when_no_fields: self
                .render_empty_header_when_no_fields
                .unwrap_or(base.render_empty_header_when_no_fields),
            allow_reflow: self.allow_reflow.unwrap_or(base.allow_reflow),
            ignore_mixed_line_endings: self
                .ignore_mixed_line_endings
                .unwrap_or(base.ignore_mixed_line_endings),
            ignore_bom_before_shebang: self
                .ignore_bom_before_shebang
                .unwrap_or(base.ignore_bom_before_shebang),
        }
    }
}

/// Fully resolved policy: every field has a concrete value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Policy {
    pub add_only: bool,
    pub update_only: bool,
    pub allow_header_in_empty_files: bool,
    pub render_empty_header_when_no_fields: bool,
    pub allow_reflow: bool,
    pub ignore_mixed_line_endings: bool,
    pub ignore_bom_before_shebang: bool,
}

impl Policy {
    /// Validates `add_only`/`update_only` mutual exclusion.
    ///
    /// Called once per resolved policy (global, then each per-type override)
    /// at [`crate::config::MutableConfig::freeze`] time — not on every
    /// per-file read, since the invariant can't change after freezing.
    pub fn validate(&self, context: &str) -> Result<(), TopmarkError> {
        if self.add_only && self.update_only {
            return Err(TopmarkError::invalid_policy(format!(
                "{context}: `add_only` and `update_only` cannot both be true"
            )));
        }
        Ok(())
    }
}
