use regex::Regex;
use thiserror::Error;
use validator::ValidationError;

lazy_static::lazy_static! {
    pub static ref PRICE_REGEX: Regex = Regex::new(r"^[0-9]+(\.[0-9]{1,2})?$").unwrap();
}

// custom error
#[derive(Error, Debug)]
pub enum PriceError {
    #[error("Invalid price '{value}': expected a non-negative decimal like 10 or 10.99")]
    InvalidPrice { value: String },
}

/// Parse a raw price string into a number.
///
/// Prices arrive as text (catalog entries, user input) and must be a
/// non-negative decimal with at most two fraction digits. Anything else is
/// rejected instead of propagating as a NaN total.
pub fn parse_price(raw: &str) -> Result<f64, PriceError> {
    if !PRICE_REGEX.is_match(raw) {
        return Err(PriceError::InvalidPrice {
            value: raw.to_string(),
        });
    }

    let price: f64 = raw.parse().map_err(|_| PriceError::InvalidPrice {
        value: raw.to_string(),
    })?;

    // A long enough digit string still overflows to infinity
    if !price.is_finite() || price < 0.0 {
        return Err(PriceError::InvalidPrice {
            value: raw.to_string(),
        });
    }

    Ok(price)
}

#[allow(dead_code)]
pub fn validate_price_format(raw: &str) -> Result<(), ValidationError> {
    if PRICE_REGEX.is_match(raw) {
        Ok(())
    } else {
        Err(ValidationError::new("invalid_price"))
    }
}

/// Round to two decimal places for money totals and display.
pub fn round_money(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_accepts_valid_decimals() {
        assert_eq!(parse_price("10").unwrap(), 10.0);
        assert_eq!(parse_price("10.5").unwrap(), 10.5);
        assert_eq!(parse_price("0.99").unwrap(), 0.99);
        assert_eq!(parse_price("0").unwrap(), 0.0);
        assert_eq!(parse_price("699.99").unwrap(), 699.99);
    }

    #[test]
    fn test_parse_price_rejects_malformed_input() {
        for raw in ["", "-1", "1.234", "abc", "1,5", "NaN", "1e3", " 10", "10 ", "$10", "10."] {
            assert!(
                parse_price(raw).is_err(),
                "expected '{}' to be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_parse_price_rejects_overflowing_digits() {
        let huge = "9".repeat(400);
        assert!(parse_price(&huge).is_err());
    }

    #[test]
    fn test_round_money() {
        assert_eq!(round_money(0.30000000000000004), 0.3);
        assert_eq!(round_money(20.0), 20.0);
        assert_eq!(round_money(3.456), 3.46);
    }
}
