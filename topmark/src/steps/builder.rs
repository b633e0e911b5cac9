//! Computes the expected field values for a file: each declared field name
//! takes its explicitly configured value if one exists, falling back to
//! whatever the scanner already parsed out of an existing header, and
//! finally an empty string if neither source has it.
//!
//! Uses `header_fields.values.get(name)` rather than
//! [`topmark_domain::HeaderFieldSpec::ordered_pairs`] deliberately: the
//! latter collapses "not configured" to `""`, which would hide an existing
//! header's value behind a blank override it never asked for.

use std::collections::HashMap;

use topmark_domain::{GenerationStatus, HeaderStatus, ProcessingContext};

use super::{PipelineStep, StepEnv};

pub struct Builder;

impl PipelineStep for Builder {
    fn name(&self) -> &'static str {
        "builder"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.generation, GenerationStatus::Pending)
            && !matches!(
                ctx.status.header,
                HeaderStatus::Pending
                    | HeaderStatus::Malformed
                    | HeaderStatus::MalformedAllFields
                    | HeaderStatus::MalformedSomeFields
            )
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        let existing: HashMap<String, String> = ctx.views.parsed_fields.clone().unwrap_or_default().into_iter().collect();

        let built: Vec<(String, String)> = env
            .config
            .header_fields
            .order
            .iter()
            .map(|name| {
                let value = match env.config.header_fields.values.get(name) {
                    Some(configured) => configured.clone(),
                    None => existing.get(name).cloned().unwrap_or_default(),
                };
                (name.clone(), value)
            })
            .collect();

        let has_any_value = built.iter().any(|(_, value)| !value.is_empty());
        ctx.views.built_fields = Some(built);
        ctx.status.generation =
            if has_any_value { GenerationStatus::Generated } else { GenerationStatus::NoFields };
    }
}
