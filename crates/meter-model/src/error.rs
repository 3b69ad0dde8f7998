use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown variant: {0} (expected radio, remote or manual)")]
    UnknownVariant(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
