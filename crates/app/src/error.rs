use engine::EngineError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    NotFound(String),
}

impl AppError {
    /// Extra guidance printed under the error, for the failures a user can
    /// fix by changing the command.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Engine(EngineError::MissingPrices(_)) => {
                Some("pass a price for every listed coin, e.g. --price ETH=3000")
            }
            Self::Engine(EngineError::InsufficientBalance(shortfall))
                if shortfall.operation == "sell" =>
            {
                Some("see `follyo summary` for available balances, or `follyo stake list` to unstake")
            }
            Self::Engine(EngineError::InsufficientBalance(_)) => {
                Some("see `follyo summary` for available balances")
            }
            Self::Engine(EngineError::Storage { .. }) => {
                Some("check that the data directory is readable and writable")
            }
            _ => None,
        }
    }
}
