//! `themegen check` command implementation.

use clap::Args;
use themegen_renderer::render_to_string;

use super::TargetArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the check command.
#[derive(Args, Debug, Default)]
pub(crate) struct CheckArgs {
    #[command(flatten)]
    pub(crate) target: TargetArgs,

    /// Treat substitution targets missing from the template as errors.
    #[arg(long)]
    strict: bool,
}

impl CheckArgs {
    /// Parse and render every selected variant in memory.
    ///
    /// Unlike `generate`, all variants are checked before failing so every
    /// broken substitution list is reported in one run.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, jobs) = self.target.jobs()?;

        output.template(&config.themes_resolved.template);

        let mut failed = 0;
        for (name, job) in &jobs {
            output.variant(name);
            match render_to_string(job) {
                Ok(rendered) => {
                    output.rendered(name, &job.output, &rendered);
                    output.unmatched(name, &rendered.stats.unmatched);
                    if self.strict && !rendered.stats.unmatched.is_empty() {
                        failed += 1;
                    }
                }
                Err(err) => {
                    output.error(&format!("{name}: {err}"));
                    failed += 1;
                }
            }
        }

        if failed > 0 {
            return Err(CliError::Validation(format!(
                "{failed} of {} variants failed the check",
                jobs.len()
            )));
        }
        Ok(())
    }
}
