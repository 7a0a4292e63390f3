use thiserror::Error;

#[derive(Error, Debug)]
pub enum CrewError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Workspace is locked by another operation ({0}). Try again once it has finished.")]
    Locked(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML write error: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Workspace not initialized. Run 'crewload init' first.")]
    NotInitialized,

    #[error("Workspace already initialized at {0}")]
    AlreadyInitialized(String),
}

pub type Result<T> = std::result::Result<T, CrewError>;
