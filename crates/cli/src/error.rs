#[derive(Debug, thiserror::Error)]
pub(crate) enum Error {
    #[error("{0}")]
    Generic(String),
    #[error("Config error: {0}")]
    ConfigError(#[from] evmi_config::error::Error),
}
