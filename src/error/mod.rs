use crate::config::ConfigError;
use crate::host::AttachError;
use crate::state::StateError;
use thiserror::Error;

pub type PreviewResult<T> = std::result::Result<T, PreviewError>;

#[derive(Debug, Error)]
pub enum PreviewError {
    #[error(transparent)]
    State(#[from] StateError),
    #[error(transparent)]
    Attach(#[from] AttachError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
