//! `themegen generate` command implementation.

use clap::Args;
use themegen_renderer::{render, render_to_string};

use super::TargetArgs;
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the generate command.
#[derive(Args, Debug, Default)]
pub(crate) struct GenerateArgs {
    #[command(flatten)]
    pub(crate) target: TargetArgs,

    /// Render in memory without writing output files.
    #[arg(long)]
    dry_run: bool,
}

impl GenerateArgs {
    /// Render every selected variant in configured order.
    ///
    /// Stops at the first failure. Outputs written before it stay on disk.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();
        let (config, jobs) = self.target.jobs()?;

        output.template(&config.themes_resolved.template);

        for (name, job) in &jobs {
            if self.dry_run {
                let rendered = render_to_string(job)?;
                output.rendered(name, &job.output, &rendered);
            } else {
                let report = render(job)?;
                output.written(name, &report);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::tests::{target, write_project};
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_generate_writes_both_variants() {
        let tmp = TempDir::new().unwrap();
        let config = write_project(
            tmp.path(),
            "$FG := #000000\n$BG := #ffffff // paper",
            "// dark palette\n$FG := #eeeeee\n\n$BG := #202020",
        );

        GenerateArgs {
            target: target(config, &[]),
            dry_run: false,
        }
        .execute()
        .unwrap();

        assert_eq!(
            fs::read_to_string(tmp.path().join("light.qss")).unwrap(),
            "QWidget { color: #000000; background: #ffffff; }\n"
        );
        assert_eq!(
            fs::read_to_string(tmp.path().join("dark.qss")).unwrap(),
            "QWidget { color: #eeeeee; background: #202020; }\n"
        );
    }

    #[test]
    fn test_generate_selected_variant_only() {
        let tmp = TempDir::new().unwrap();
        let config = write_project(tmp.path(), "$FG := black", "$FG := white");

        GenerateArgs {
            target: target(config, &["dark"]),
            dry_run: false,
        }
        .execute()
        .unwrap();

        assert!(!tmp.path().join("light.qss").exists());
        assert!(tmp.path().join("dark.qss").exists());
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let tmp = TempDir::new().unwrap();
        let config = write_project(tmp.path(), "$FG := black", "$FG := white");

        GenerateArgs {
            target: target(config, &[]),
            dry_run: true,
        }
        .execute()
        .unwrap();

        assert!(!tmp.path().join("light.qss").exists());
        assert!(!tmp.path().join("dark.qss").exists());
    }

    #[test]
    fn test_failure_keeps_earlier_output() {
        let tmp = TempDir::new().unwrap();
        let config = write_project(tmp.path(), "$FG := black", "$FG := a := b");

        let err = GenerateArgs {
            target: target(config, &[]),
            dry_run: false,
        }
        .execute()
        .unwrap_err();

        match err {
            CliError::Render(err) => assert!(err.is_parse()),
            other => panic!("Expected CliError::Render, got {other:?}"),
        }
        assert!(tmp.path().join("light.qss").exists());
        assert!(!tmp.path().join("dark.qss").exists());
    }
}
