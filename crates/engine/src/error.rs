//! The module contains the errors the engine can return.
//!
//! Callers are expected to tell these apart:
//!
//! - [`Validation`] a field failed a format or range check.
//! - [`InsufficientBalance`] a stake (or a sale, under the strict sale policy)
//!   would exceed the available balance.
//! - [`MissingPrices`] a snapshot was requested without a price for every
//!   coin that carries value.
//! - [`Storage`] the backing file could not be read, parsed or written.
//!
//!  [`Validation`]: EngineError::Validation
//!  [`InsufficientBalance`]: EngineError::InsufficientBalance
//!  [`MissingPrices`]: EngineError::MissingPrices
//!  [`Storage`]: EngineError::Storage
use std::fmt;

use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },
    #[error("{0}")]
    InsufficientBalance(InsufficientBalance),
    #[error("missing prices for coins: {}", .0.join(", "))]
    MissingPrices(Vec<String>),
    #[error("{operation}: {source}")]
    Storage {
        operation: String,
        #[source]
        source: StorageError,
    },
    #[error("fetching prices: {0}")]
    PriceOracle(String),
}

impl EngineError {
    pub(crate) fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub(crate) fn storage(operation: impl Into<String>, source: impl Into<StorageError>) -> Self {
        Self::Storage {
            operation: operation.into(),
            source: source.into(),
        }
    }
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Self::Validation { field: a, reason: x },
                Self::Validation { field: b, reason: y },
            ) => a == b && x == y,
            (Self::InsufficientBalance(a), Self::InsufficientBalance(b)) => a == b,
            (Self::MissingPrices(a), Self::MissingPrices(b)) => a == b,
            (Self::Storage { operation: a, .. }, Self::Storage { operation: b, .. }) => a == b,
            (Self::PriceOracle(a), Self::PriceOracle(b)) => a == b,
            _ => false,
        }
    }
}

/// Underlying failure of a storage operation.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Operation rejected because the coin balance cannot cover it.
#[derive(Clone, Debug, PartialEq)]
pub struct InsufficientBalance {
    pub coin: String,
    pub requested: f64,
    pub available: f64,
    pub staked: f64,
    /// `"stake"` or `"sell"`.
    pub operation: &'static str,
}

impl fmt::Display for InsufficientBalance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            coin,
            requested,
            available,
            staked,
            operation,
        } = self;
        let selling = *operation == "sell";

        if *available <= 0.0 {
            if *staked > 0.0 && selling {
                return write!(
                    f,
                    "cannot {operation} {requested} {coin}: all your {coin} is staked (unstake first)"
                );
            }
            return write!(
                f,
                "cannot {operation} {requested} {coin}: you have no available {coin} to {operation}"
            );
        }
        if *staked > 0.0 && selling {
            return write!(
                f,
                "cannot {operation} {requested} {coin}: only {available} {coin} available \
                 ({staked} staked - unstake first to {operation} more)"
            );
        }
        if *operation == "stake" {
            return write!(
                f,
                "cannot {operation} {requested} {coin}: only {available} {coin} available \
                 (holdings - sales - already staked)"
            );
        }
        write!(
            f,
            "cannot {operation} {requested} {coin}: only {available} {coin} available"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shortfall(operation: &'static str, available: f64, staked: f64) -> InsufficientBalance {
        InsufficientBalance {
            coin: "BTC".to_string(),
            requested: 2.0,
            available,
            staked,
            operation,
        }
    }

    #[test]
    fn stake_messages_distinguish_empty_from_partial() {
        assert_eq!(
            shortfall("stake", 0.0, 1.0).to_string(),
            "cannot stake 2 BTC: you have no available BTC to stake"
        );
        assert_eq!(
            shortfall("stake", 1.5, 1.0).to_string(),
            "cannot stake 2 BTC: only 1.5 BTC available (holdings - sales - already staked)"
        );
    }

    #[test]
    fn sell_messages_mention_unstaking() {
        assert_eq!(
            shortfall("sell", 0.0, 3.0).to_string(),
            "cannot sell 2 BTC: all your BTC is staked (unstake first)"
        );
        assert_eq!(
            shortfall("sell", 0.5, 1.0).to_string(),
            "cannot sell 2 BTC: only 0.5 BTC available (1 staked - unstake first to sell more)"
        );
        assert_eq!(
            shortfall("sell", 0.5, 0.0).to_string(),
            "cannot sell 2 BTC: only 0.5 BTC available"
        );
    }

    #[test]
    fn missing_prices_lists_every_coin() {
        let err = EngineError::MissingPrices(vec!["ETH".to_string(), "SOL".to_string()]);
        assert_eq!(err.to_string(), "missing prices for coins: ETH, SOL");
    }

    #[test]
    fn storage_error_names_the_operation() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = EngineError::storage("saving holding", io);
        assert_eq!(err.to_string(), "saving holding: denied");
        assert_eq!(
            err,
            EngineError::storage("saving holding", std::io::Error::other("other"))
        );
    }
}
