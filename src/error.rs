use thiserror::Error;

#[derive(Debug, Error)]
pub enum WindPlantError {
    #[error("SerdeAPI::init failed: {0}")]
    Init(String),
    #[error("Invalid model configuration: {0}")]
    Config(String),
    #[error("Simulation failed: {0}")]
    Simulation(String),
    #[error("{0}")]
    Other(String),
}

pub type WindPlantResult<T> = Result<T, WindPlantError>;
