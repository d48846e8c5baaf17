//! CLI error types.

use themegen_config::ConfigError;
use themegen_renderer::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Validation(String),
}
