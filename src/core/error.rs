use thiserror::Error;

#[derive(Error, Debug)]
pub enum BattleError {
    #[error("Action buttons need exactly {expected} labels, got {got}")]
    LabelCount { expected: usize, got: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, BattleError>;
