use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewForgeError {
    #[error("IO Error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON Parsing Error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data Error: {0}")]
    Data(String),

    #[error("Validation Error: {0}")]
    Validation(String),
}

pub type CfResult<T> = Result<T, CrewForgeError>;
