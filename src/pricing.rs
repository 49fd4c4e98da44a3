use crate::error::{AppError, AppResult};

/// Convert a display price like `"$20"` into gateway minor units (2000).
///
/// Only whole currency units are supported: the text after the `$` must be
/// plain digits. Fractional amounts are outside the supported format and
/// are rejected at catalog creation, not silently mangled at checkout.
pub fn minor_units(display: &str) -> AppResult<i64> {
    let units = display
        .strip_prefix('$')
        .ok_or_else(|| bad_price(display))?;
    if units.is_empty() || !units.bytes().all(|b| b.is_ascii_digit()) {
        return Err(bad_price(display));
    }
    let units: i64 = units.parse().map_err(|_| bad_price(display))?;
    units.checked_mul(100).ok_or_else(|| bad_price(display))
}

/// Validation used at catalog-creation time so malformed prices never reach
/// the checkout path.
pub fn validate_display_price(display: &str) -> AppResult<()> {
    minor_units(display).map(|_| ())
}

fn bad_price(display: &str) -> AppError {
    AppError::Validation(format!(
        "price must be a dollar amount in whole units, like \"$20\" (got {display:?})"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whole_dollar_amounts_convert_to_minor_units() {
        assert_eq!(minor_units("$5").unwrap(), 500);
        assert_eq!(minor_units("$20").unwrap(), 2000);
        assert_eq!(minor_units("$0").unwrap(), 0);
    }

    #[test]
    fn missing_symbol_is_rejected() {
        assert!(minor_units("5").is_err());
        assert!(minor_units("20 dollars").is_err());
    }

    #[test]
    fn fractional_and_empty_amounts_are_rejected() {
        assert!(minor_units("$4.99").is_err());
        assert!(minor_units("$").is_err());
        assert!(minor_units("").is_err());
        assert!(minor_units("$-3").is_err());
    }

    #[test]
    fn rejection_is_a_validation_error() {
        match minor_units("4.99") {
            Err(AppError::Validation(msg)) => assert!(msg.contains("4.99")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }
}
