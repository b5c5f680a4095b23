//! Internal helpers for record validation and normalization.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every record kind enforces the same invariants.

use chrono::{Local, NaiveDate};
use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Length of generated record and snapshot IDs (hex characters).
pub const ID_LENGTH: usize = 12;
pub const MAX_COIN_SYMBOL_LENGTH: usize = 10;
pub const MAX_PLATFORM_LENGTH: usize = 50;
pub const MAX_NOTES_LENGTH: usize = 500;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Generate a fresh random identifier.
pub(crate) fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LENGTH);
    id
}

/// Validate a coin symbol and return its upper-case form.
pub(crate) fn normalize_coin(raw: &str) -> ResultEngine<String> {
    let coin = raw.trim();
    if coin.is_empty() {
        return Err(EngineError::validation(
            "coin",
            "coin symbol cannot be empty (example: BTC, ETH)",
        ));
    }
    if coin.len() > MAX_COIN_SYMBOL_LENGTH {
        return Err(EngineError::validation(
            "coin",
            format!(
                "coin symbol too long (max {MAX_COIN_SYMBOL_LENGTH} characters, got {})",
                coin.len()
            ),
        ));
    }
    if !coin.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(EngineError::validation(
            "coin",
            "coin symbol must contain only letters and numbers (example: BTC, USDT)",
        ));
    }
    Ok(coin.to_ascii_uppercase())
}

pub(crate) fn validate_amount(amount: f64) -> ResultEngine<()> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(EngineError::validation(
            "amount",
            format!("amount must be positive (got {amount})"),
        ));
    }
    Ok(())
}

/// Prices may be zero (airdrops) but never negative.
pub(crate) fn validate_price(field: &'static str, price: f64) -> ResultEngine<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(EngineError::validation(
            field,
            format!("price cannot be negative (got {price})"),
        ));
    }
    Ok(())
}

/// Interest rates and APYs are optional percentages.
pub(crate) fn validate_rate(field: &'static str, rate: Option<f64>) -> ResultEngine<()> {
    match rate {
        Some(value) if !value.is_finite() || value < 0.0 => Err(EngineError::validation(
            field,
            format!("{field} cannot be negative (got {value})"),
        )),
        _ => Ok(()),
    }
}

/// Validate a `YYYY-MM-DD` date. A missing or blank date becomes today.
pub(crate) fn normalize_date(raw: Option<&str>) -> ResultEngine<String> {
    let Some(date) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(Local::now().date_naive().format(DATE_FORMAT).to_string());
    };

    let bytes = date.as_bytes();
    let shaped = bytes.len() == 10
        && bytes[4] == b'-'
        && bytes[7] == b'-'
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit());
    if !shaped {
        return Err(EngineError::validation(
            "date",
            format!("date must be in YYYY-MM-DD format (example: 2024-01-15, got: {date})"),
        ));
    }
    NaiveDate::parse_from_str(date, DATE_FORMAT).map_err(|_| {
        EngineError::validation("date", format!("{date} is not a real calendar date"))
    })?;
    Ok(date.to_string())
}

/// Validate an optional platform name. Blank means absent.
pub(crate) fn normalize_platform(raw: Option<&str>) -> ResultEngine<Option<String>> {
    let Some(platform) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if platform.len() > MAX_PLATFORM_LENGTH {
        return Err(EngineError::validation(
            "platform",
            format!("platform name too long (max {MAX_PLATFORM_LENGTH} characters)"),
        ));
    }
    let allowed = |c: char| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_';
    if !platform.chars().all(allowed) {
        return Err(EngineError::validation(
            "platform",
            "platform name can only contain letters, numbers, spaces, dashes, and underscores",
        ));
    }
    Ok(Some(platform.to_string()))
}

/// Loans and stakes must name the platform holding the coins.
pub(crate) fn require_platform(raw: &str, kind: &str) -> ResultEngine<String> {
    normalize_platform(Some(raw))?.ok_or_else(|| {
        EngineError::validation("platform", format!("platform is required for {kind}"))
    })
}

pub(crate) fn normalize_notes(raw: Option<&str>) -> ResultEngine<Option<String>> {
    let Some(notes) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    if notes.len() > MAX_NOTES_LENGTH {
        return Err(EngineError::validation(
            "notes",
            format!(
                "notes too long (max {MAX_NOTES_LENGTH} characters, got {})",
                notes.len()
            ),
        ));
    }
    Ok(Some(notes.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_of(err: EngineError) -> &'static str {
        match err {
            EngineError::Validation { field, .. } => field,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn ids_are_short_hex_and_unique() {
        let a = new_id();
        let b = new_id();
        assert_eq!(a.len(), ID_LENGTH);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(a, b);
    }

    #[test]
    fn coin_is_upper_cased() {
        assert_eq!(normalize_coin("btc").unwrap(), "BTC");
        assert_eq!(normalize_coin(" usdt ").unwrap(), "USDT");
    }

    #[test]
    fn coin_rejects_bad_symbols() {
        assert_eq!(field_of(normalize_coin("").unwrap_err()), "coin");
        assert_eq!(field_of(normalize_coin("BTC!").unwrap_err()), "coin");
        assert_eq!(field_of(normalize_coin("BTC ETH").unwrap_err()), "coin");
        assert_eq!(field_of(normalize_coin("ABCDEFGHIJK").unwrap_err()), "coin");
    }

    #[test]
    fn amounts_must_be_positive_and_prices_non_negative() {
        assert!(validate_amount(0.5).is_ok());
        assert!(validate_amount(0.0).is_err());
        assert!(validate_amount(-1.0).is_err());
        assert!(validate_amount(f64::NAN).is_err());
        assert!(validate_price("price", 0.0).is_ok());
        assert!(validate_price("price", -0.01).is_err());
        assert!(validate_rate("apy", None).is_ok());
        assert!(validate_rate("apy", Some(-3.0)).is_err());
    }

    #[test]
    fn date_defaults_to_today_and_rejects_bad_input() {
        let today = normalize_date(None).unwrap();
        assert_eq!(today.len(), 10);
        assert_eq!(normalize_date(Some("  ")).unwrap(), today);
        assert_eq!(normalize_date(Some("2024-01-15")).unwrap(), "2024-01-15");
        assert_eq!(field_of(normalize_date(Some("2024/01/15")).unwrap_err()), "date");
        assert_eq!(field_of(normalize_date(Some("2023-02-30")).unwrap_err()), "date");
    }

    #[test]
    fn platform_and_notes_limits() {
        assert_eq!(normalize_platform(Some("")).unwrap(), None);
        assert_eq!(
            normalize_platform(Some(" Binance US ")).unwrap().as_deref(),
            Some("Binance US")
        );
        assert!(normalize_platform(Some("cold/storage")).is_err());
        assert!(normalize_platform(Some(&"x".repeat(51))).is_err());
        assert!(require_platform("", "loans").is_err());
        assert!(normalize_notes(Some(&"n".repeat(501))).is_err());
        assert_eq!(normalize_notes(Some("  ")).unwrap(), None);
    }
}
