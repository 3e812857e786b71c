use crate::config::ConfigError;
use fxsim_core::BookError;
use fxsim_ports::PricingError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Order book error: {0}")]
    Book(#[from] BookError),

    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

pub type SimulationResult<T> = Result<T, SimulationError>;
