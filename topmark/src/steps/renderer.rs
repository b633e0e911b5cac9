//! Renders the built fields into the header text that would be written,
//! either in the file type's native comment syntax or as a bare `key: value`
//! block for [`HeaderOutputFormat::Plain`]/[`HeaderOutputFormat::Json`].

use topmark_domain::{GenerationStatus, HeaderOutputFormat, ProcessingContext, RenderStatus};

use crate::processors::HeaderField;

use super::{PipelineStep, StepEnv};

pub struct Renderer;

impl PipelineStep for Renderer {
    fn name(&self) -> &'static str {
        "renderer"
    }

    fn may_proceed(&self, ctx: &ProcessingContext, _env: &StepEnv) -> bool {
        matches!(ctx.status.render, RenderStatus::Pending)
            && matches!(ctx.status.generation, GenerationStatus::Generated | GenerationStatus::NoFields)
    }

    fn run(&self, ctx: &mut ProcessingContext, env: &StepEnv) {
        let type_name = ctx.file_type.as_ref().map(|ft| ft.name).unwrap_or_default();
        let policy = env.config.policy_for(type_name);

        if matches!(ctx.status.generation, GenerationStatus::NoFields) && !policy.render_empty_header_when_no_fields {
            ctx.status.render = RenderStatus::Skipped;
            return;
        }

        let (Some(file_type), Some(processor)) =
            (ctx.file_type.clone(), ctx.file_type.as_ref().and_then(|ft| env.processors.get(ft.name)))
        else {
            ctx.status.render = RenderStatus::Skipped;
            return;
        };

        let fields: Vec<HeaderField> = ctx
            .views
            .built_fields
            .clone()
            .unwrap_or_default()
            .into_iter()
            .map(|(key, value)| HeaderField { key, value })
            .collect();

        let newline = ctx.newline_style.as_str();
        let rendered = match env.config.header_format {
            HeaderOutputFormat::Native => processor.render_header(&file_type, &fields, env.config.align_fields, newline),
            HeaderOutputFormat::Plain | HeaderOutputFormat::Json => render_plain(&fields, newline),
        };

        ctx.views.rendered_header = Some(rendered);
        ctx.status.render = RenderStatus::Rendered;
    }
}

/// A bare `key: value` block, one field per line, with no comment affixes at
/// all. `Json` renders identically to `Plain` today (see that variant's doc
/// comment on [`HeaderOutputFormat`]).
fn render_plain(fields: &[HeaderField], newline: &str) -> Vec<String> {
    fields.iter().map(|f| format!("{}: {}{newline}", f.key, f.value)).collect()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use topmark_domain::{builtins, FileTypeRegistry, MutableConfig};

    use super::*;
    use crate::registry::ProcessorRegistry;
    use crate::sinks::NullSink;

    #[test]
    fn renders_native_header_for_python() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let config = MutableConfig::builder().freeze().unwrap();
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &NullSink };

        let mut ctx = ProcessingContext::new(PathBuf::from("x.py"));
        ctx.file_type = file_types.resolve(&ctx.path).cloned();
        ctx.status.generation = GenerationStatus::Generated;
        ctx.views.built_fields = Some(vec![("file".to_string(), "x.py".to_string())]);
        Renderer.run(&mut ctx, &env);

        assert_eq!(ctx.status.render, RenderStatus::Rendered);
        let rendered = ctx.views.rendered_header.unwrap();
        assert_eq!(rendered.first().unwrap(), "# topmark:header:start\n");
    }

    #[test]
    fn no_fields_skips_rendering_by_default() {
        let file_types = FileTypeRegistry::build(builtins::catalog()).unwrap();
        let processors = ProcessorRegistry::from_file_types(&file_types);
        let config = MutableConfig::builder().freeze().unwrap();
        let env = StepEnv { config: &config, file_types: &file_types, processors: &processors, sink: &NullSink };

        let mut ctx = ProcessingContext::new(PathBuf::from("x.py"));
        ctx.file_type = file_types.resolve(&ctx.path).cloned();
        ctx.status.generation = GenerationStatus::NoFields;
        ctx.views.built_fields = Some(vec![("file".to_string(), String::new())]);
        Renderer.run(&mut ctx, &env);

        assert_eq!(ctx.status.render, RenderStatus::Skipped);
        assert!(ctx.views.rendered_header.is_none());
    }
}
