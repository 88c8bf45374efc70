use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ZombieError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Invalid value for {name}: {value}")]
    EnvVar { name: String, value: String },
}
