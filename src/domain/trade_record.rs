//! Trade records and their validity classification.

use serde::Serialize;
use std::fmt;

/// One parsed row of an uploaded trade file.
///
/// Fields are `None` when the header lacks the column. `quantity` is also
/// `None` when the cell is not an integer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeRecord {
    pub line: usize,
    pub symbol: Option<String>,
    pub quantity: Option<i64>,
    pub price: Option<String>,
    pub slippage: Option<String>,
}

/// A record whose four fields all parsed to usable values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidTrade {
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    pub slippage_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum InvalidReason {
    MissingSymbol,
    MissingQuantity,
    NonPositiveQuantity,
    MissingPrice,
    InvalidPrice,
    MissingSlippage,
    InvalidSlippage,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::MissingSymbol => "missing symbol",
            InvalidReason::MissingQuantity => "missing or non-integer qty",
            InvalidReason::NonPositiveQuantity => "qty must be positive",
            InvalidReason::MissingPrice => "missing price",
            InvalidReason::InvalidPrice => "price is not a number",
            InvalidReason::MissingSlippage => "missing slippage",
            InvalidReason::InvalidSlippage => "slippage is not a number",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TradeRow<'a> {
    Valid(ValidTrade),
    Invalid {
        record: &'a TradeRecord,
        reason: InvalidReason,
    },
}

impl<'a> TradeRow<'a> {
    pub fn valid(&self) -> Option<&ValidTrade> {
        match self {
            TradeRow::Valid(trade) => Some(trade),
            TradeRow::Invalid { .. } => None,
        }
    }
}

impl TradeRecord {
    /// Checks symbol, quantity, price and slippage in that order; the first
    /// failing field decides the reason.
    pub fn classify(&self) -> TradeRow<'_> {
        match self.validate() {
            Ok(trade) => TradeRow::Valid(trade),
            Err(reason) => TradeRow::Invalid {
                record: self,
                reason,
            },
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    fn validate(&self) -> Result<ValidTrade, InvalidReason> {
        let symbol = match self.symbol.as_deref() {
            Some(s) if !s.is_empty() => s.to_string(),
            _ => return Err(InvalidReason::MissingSymbol),
        };

        let quantity = self.quantity.ok_or(InvalidReason::MissingQuantity)?;
        if quantity <= 0 {
            return Err(InvalidReason::NonPositiveQuantity);
        }

        let price = match self.price.as_deref() {
            Some(s) if !s.is_empty() => parse_finite(s).ok_or(InvalidReason::InvalidPrice)?,
            _ => return Err(InvalidReason::MissingPrice),
        };

        let slippage_pct = match self.slippage.as_deref() {
            Some(s) if !s.is_empty() => {
                parse_percent(s).ok_or(InvalidReason::InvalidSlippage)?
            }
            _ => return Err(InvalidReason::MissingSlippage),
        };

        Ok(ValidTrade {
            symbol,
            quantity,
            price,
            slippage_pct,
        })
    }
}

/// Parses `"0.85%"` or `"0.85"` into `0.85`.
pub fn parse_percent(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    let number = trimmed.strip_suffix('%').unwrap_or(trimmed);
    parse_finite(number)
}

fn parse_finite(value: &str) -> Option<f64> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(symbol: &str, quantity: Option<i64>, price: &str, slippage: &str) -> TradeRecord {
        TradeRecord {
            line: 2,
            symbol: Some(symbol.to_string()),
            quantity,
            price: Some(price.to_string()),
            slippage: Some(slippage.to_string()),
        }
    }

    #[test]
    fn well_formed_record_is_valid() {
        let rec = record("RELIANCE", Some(100), "2450.5", "0.85%");
        let row = rec.classify();
        let trade = row.valid().unwrap();
        assert_eq!(trade.symbol, "RELIANCE");
        assert_eq!(trade.quantity, 100);
        assert!((trade.price - 2450.5).abs() < f64::EPSILON);
        assert!((trade.slippage_pct - 0.85).abs() < f64::EPSILON);
    }

    #[test]
    fn slippage_without_percent_sign() {
        let rec = record("TCS", Some(5), "3500", "1.2");
        assert!(rec.is_valid());
    }

    #[test]
    fn missing_quantity_is_invalid() {
        let rec = record("AAA", None, "100", "1.0%");
        assert!(matches!(
            rec.classify(),
            TradeRow::Invalid {
                reason: InvalidReason::MissingQuantity,
                ..
            }
        ));
    }

    #[test]
    fn zero_quantity_is_invalid() {
        let rec = record("AAA", Some(0), "100", "1.0%");
        assert!(matches!(
            rec.classify(),
            TradeRow::Invalid {
                reason: InvalidReason::NonPositiveQuantity,
                ..
            }
        ));
    }

    #[test]
    fn empty_symbol_is_invalid() {
        let rec = record("", Some(10), "100", "1.0%");
        assert!(matches!(
            rec.classify(),
            TradeRow::Invalid {
                reason: InvalidReason::MissingSymbol,
                ..
            }
        ));
    }

    #[test]
    fn non_numeric_price_is_invalid() {
        let rec = record("AAA", Some(10), "12abc", "1.0%");
        assert!(matches!(
            rec.classify(),
            TradeRow::Invalid {
                reason: InvalidReason::InvalidPrice,
                ..
            }
        ));
    }

    #[test]
    fn absent_slippage_column_is_invalid() {
        let rec = TradeRecord {
            line: 2,
            symbol: Some("AAA".into()),
            quantity: Some(10),
            price: Some("100".into()),
            slippage: None,
        };
        assert!(matches!(
            rec.classify(),
            TradeRow::Invalid {
                reason: InvalidReason::MissingSlippage,
                ..
            }
        ));
    }

    #[test]
    fn infinite_price_is_invalid() {
        let rec = record("AAA", Some(10), "inf", "1.0");
        assert!(!rec.is_valid());
    }

    #[test]
    fn parse_percent_variants() {
        assert_eq!(parse_percent("1.5%"), Some(1.5));
        assert_eq!(parse_percent(" 1.5 % "), Some(1.5));
        assert_eq!(parse_percent("0"), Some(0.0));
        assert_eq!(parse_percent("%"), None);
        assert_eq!(parse_percent("NaN"), None);
    }

    #[test]
    fn invalid_reason_display() {
        assert_eq!(InvalidReason::InvalidSlippage.to_string(), "slippage is not a number");
    }
}
