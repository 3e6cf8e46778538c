//! CLI error types.

use rtc_config::ConfigError;
use rtc_confluence::PublishError;
use rtc_project::ProjectError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("{0}")]
    Publish(#[from] PublishError),
}
