use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("invalid service time: min {min}s is greater than max {max}s")]
    InvalidServiceTime { min: u64, max: u64 },

    #[error("invalid value for {key}: '{value}'")]
    InvalidConfig { key: String, value: String },

    #[error("poll interval must be greater than zero")]
    ZeroPollInterval,
}

pub type Result<T> = std::result::Result<T, SeatingError>;
