use thiserror::Error;

#[derive(Error, Debug)]
pub enum FileManagerError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("remote analysis failed: {0}")]
    RemoteFailure(String),

    #[error("configuration error: {0}")]
    Config(String),
}
