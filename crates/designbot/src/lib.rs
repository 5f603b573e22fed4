use thiserror::Error;

pub mod commands {
    pub mod generate;
    pub mod init;
    pub mod serve;
    pub mod spacing;
}

pub mod server;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("An IO error occurred: {0}")]
    IoError(#[from] std::io::Error),
    #[error("{0}")]
    General(String),
    #[error("{0}")]
    Designbot(#[from] libdesignbot::Error),
    #[error("Could not serialize output: {0}")]
    Json(#[from] serde_json::Error),
}
