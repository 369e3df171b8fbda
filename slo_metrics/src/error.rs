use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("Registry error: {0}")]
    Registry(#[from] prometheus::Error),

    #[error("Unknown metric family: {0}")]
    UnknownFamily(String),

    #[error("Encoding error: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SinkError>;
