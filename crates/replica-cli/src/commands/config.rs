//! Config command implementation.
//!
//! Shows the effective pipeline configuration or writes it as a TOML file.

use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::cli::OutputFormat;
use crate::config::PipelineConfig;
use crate::output::{print_header, print_output, print_success, print_warning, KeyValue};

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Write the effective configuration to this TOML file
    #[arg(short, long)]
    pub write: Option<PathBuf>,

    /// Overwrite an existing file
    #[arg(long, requires = "write")]
    pub force: bool,
}

/// Execute the config command.
pub fn execute(args: ConfigArgs, config: &PipelineConfig, format: OutputFormat) -> Result<()> {
    if let Some(path) = args.write {
        if path.exists() && !args.force {
            print_warning(&format!("{} exists, use --force to overwrite", path.display()));
            return Ok(());
        }
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, config.to_toml()?)?;
        print_success(&format!("Wrote {}", path.display()));
        return Ok(());
    }

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(config)?),
        OutputFormat::Table | OutputFormat::Csv => {
            let value = serde_json::to_value(config)?;
            let results: Vec<KeyValue> = value
                .as_object()
                .into_iter()
                .flatten()
                .map(|(key, value)| match value {
                    serde_json::Value::String(s) => KeyValue::new(key.as_str(), s),
                    other => KeyValue::new(key.as_str(), other),
                })
                .collect();
            print_header("Current Configuration", format);
            print_output(&results, format)?;
        }
    }
    Ok(())
}
