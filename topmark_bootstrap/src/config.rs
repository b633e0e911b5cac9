//! Builds the engine's frozen [`topmark_domain::Config`] from parsed CLI
//! arguments. The only config source this binary knows about is the command
//! line itself — no `pyproject.toml`/user-file layering, left to whatever
//! richer CLI a real deployment would front this engine with.

use topmark_domain::{Config, FileWriteStrategy, HeaderOutputFormat, MutableConfig, Operation, OutputTarget, TopmarkError};

use crate::cli::{Cli, OutputFormat};

pub fn build_config(cli: &Cli) -> Result<Config, TopmarkError> {
    let mut fields = Vec::with_capacity(cli.fields.len());
    let mut values = std::collections::HashMap::with_capacity(cli.fields.len());
    for arg in &cli.fields {
        let (key, value) = crate::cli::parse_field(arg).map_err(TopmarkError::invalid_configuration)?;
        fields.push(key.clone());
        values.insert(key, value);
    }

    let mut mutable = MutableConfig::builder();
    mutable.apply_changes = Some(cli.apply);
    mutable.operation = if cli.strip { Operation::Strip } else { Operation::Sync };
    mutable.output_target = if cli.stdout { OutputTarget::Stdout } else { OutputTarget::File };
    mutable.file_write_strategy = if cli.inplace { FileWriteStrategy::Inplace } else { FileWriteStrategy::Atomic };
    mutable.header_fields = fields;
    mutable.field_values = values;
    mutable.header_format = Some(match cli.format {
        OutputFormat::Native => HeaderOutputFormat::Native,
        OutputFormat::Plain => HeaderOutputFormat::Plain,
        OutputFormat::Json => HeaderOutputFormat::Json,
    });

    mutable.freeze()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::cli::Cli;

    fn base_cli() -> Cli {
        Cli {
            paths: vec![PathBuf::from("x.py")],
            apply: false,
            strip: false,
            stdout: false,
            fields: vec!["file=x.py".to_string()],
            format: OutputFormat::Native,
            inplace: false,
            verbose: 0,
        }
    }

    #[test]
    fn builds_a_config_from_default_flags() {
        let config = build_config(&base_cli()).unwrap();
        assert!(!config.apply_changes);
        assert_eq!(config.operation, Operation::Sync);
        assert_eq!(config.header_fields.order, vec!["file".to_string()]);
    }

    #[test]
    fn strip_flag_selects_strip_operation() {
        let mut cli = base_cli();
        cli.strip = true;
        let config = build_config(&cli).unwrap();
        assert_eq!(config.operation, Operation::Strip);
    }

    #[test]
    fn malformed_field_argument_is_rejected() {
        let mut cli = base_cli();
        cli.fields = vec!["not-a-field".to_string()];
        assert!(build_config(&cli).is_err());
    }
}
