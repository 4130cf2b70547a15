use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum SystemError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("Actor task failed: {0}")]
    ActorFailed(String),
    #[error("Startup seeding failed: {0}")]
    Seed(String),
    #[error("Server error: {0}")]
    Server(#[from] std::io::Error),
}
