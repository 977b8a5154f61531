use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrustLensError>;

#[derive(Error, Debug)]
pub enum TrustLensError {
    #[error("Manifest error in {path}: {message}")]
    Manifest { path: String, message: String },

    #[error("Extensions directory not found: {0}")]
    ExtensionsDir(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Extension not in current report: {0}")]
    UnknownExtension(String),

    #[error("Failed to {action} {identifier}: {message}")]
    Dispatch {
        action: String,
        identifier: String,
        message: String,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl TrustLensError {
    pub fn exit_code(&self) -> i32 {
        2
    }
}
