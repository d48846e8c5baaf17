//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod generate;

pub(crate) use check::CheckArgs;
pub(crate) use generate::GenerateArgs;

use std::path::PathBuf;

use clap::Args;
use themegen_config::{CliSettings, Config, Variant};
use themegen_renderer::RenderJob;

use crate::error::CliError;

/// Options shared by every command: where the config lives and what to render.
#[derive(Args, Debug, Default)]
pub(crate) struct TargetArgs {
    /// Path to configuration file (default: auto-discover themegen.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory holding the template and substitution lists (overrides config).
    #[arg(short, long)]
    base_dir: Option<PathBuf>,

    /// Template file (overrides config).
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Only process this variant. May be repeated.
    #[arg(long = "variant", value_name = "NAME")]
    variants: Vec<String>,

    /// Enable verbose output.
    #[arg(short, long)]
    pub(crate) verbose: bool,
}

impl TargetArgs {
    /// Load the configuration with CLI overrides applied.
    fn load_config(&self) -> Result<Config, CliError> {
        let cli_settings = CliSettings {
            base_dir: self.base_dir.clone(),
            template: self.template.clone(),
        };
        Ok(Config::load(self.config.as_deref(), Some(&cli_settings))?)
    }

    /// Load the configuration and build one job per selected variant.
    fn jobs(&self) -> Result<(Config, Vec<(String, RenderJob)>), CliError> {
        let config = self.load_config()?;
        let jobs = config
            .select(&self.variants)?
            .into_iter()
            .map(|variant| (variant.name.clone(), job_for(&config, variant)))
            .collect::<Vec<_>>();

        tracing::debug!(
            config = ?config.config_path,
            base_dir = %config.themes_resolved.base_dir.display(),
            variants = jobs.len(),
            "Loaded configuration"
        );
        Ok((config, jobs))
    }
}

/// Render job for one variant of the configured template.
fn job_for(config: &Config, variant: &Variant) -> RenderJob {
    RenderJob {
        template: config.themes_resolved.template.clone(),
        substitutions: variant.substitutions.clone(),
        output: variant.output.clone(),
    }
}
