//! Current USD prices for a valuation.

use std::collections::HashMap;

use crate::{ResultEngine, util};

/// USD price per normalized coin symbol.
pub type PriceMap = HashMap<String, f64>;

/// Source of current prices.
///
/// Implementations return whatever they know about `coins`. Coins they
/// cannot price are simply left out; the valuation reports them.
pub trait PriceOracle {
    fn prices(&self, coins: &[String]) -> ResultEngine<PriceMap>;
}

/// A fixed price table, e.g. prices typed in by the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StaticPrices {
    prices: PriceMap,
}

impl StaticPrices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(coin, price)` pairs. Coins are normalized and each price
    /// must be finite and non-negative. A later pair wins over an earlier one.
    pub fn from_pairs<I, S>(pairs: I) -> ResultEngine<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: AsRef<str>,
    {
        pairs
            .into_iter()
            .try_fold(Self::new(), |prices, (coin, price)| {
                prices.with_price(coin.as_ref(), price)
            })
    }

    pub fn with_price(mut self, coin: &str, price: f64) -> ResultEngine<Self> {
        let coin = util::normalize_coin(coin)?;
        util::validate_price("price", price)?;
        self.prices.insert(coin, price);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

impl PriceOracle for StaticPrices {
    fn prices(&self, coins: &[String]) -> ResultEngine<PriceMap> {
        Ok(coins
            .iter()
            .filter_map(|coin| self.prices.get(coin).map(|price| (coin.clone(), *price)))
            .collect())
    }
}

impl PriceOracle for PriceMap {
    fn prices(&self, coins: &[String]) -> ResultEngine<PriceMap> {
        Ok(coins
            .iter()
            .filter_map(|coin| self.get(coin).map(|price| (coin.clone(), *price)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EngineError;

    #[test]
    fn keys_are_normalized_and_last_pair_wins() {
        let prices = StaticPrices::from_pairs([("btc", 1.0), (" BTC ", 2.0), ("eth", 3.0)]).unwrap();
        assert_eq!(prices.len(), 2);

        let known = prices
            .prices(&["BTC".to_string(), "SOL".to_string()])
            .unwrap();
        assert_eq!(known, PriceMap::from([("BTC".to_string(), 2.0)]));
    }

    #[test]
    fn bad_prices_are_rejected() {
        assert!(matches!(
            StaticPrices::new().with_price("BTC", -1.0),
            Err(EngineError::Validation { field: "price", .. })
        ));
        assert!(StaticPrices::new().with_price("BTC", f64::NAN).is_err());
        assert!(StaticPrices::new().with_price("BT-C", 1.0).is_err());
    }

    #[test]
    fn zero_is_a_valid_price() {
        let prices = StaticPrices::new().with_price("LUNA", 0.0).unwrap();
        assert_eq!(prices.prices(&["LUNA".to_string()]).unwrap()["LUNA"], 0.0);
    }
}
