use chrono::NaiveDate;

use crate::error::{AppError, Result};

pub fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|err| AppError::InvalidRange(format!("invalid date {}: {}", value, err)))
}

/// Parse and validate a half-open stay range. A one-night stay is the
/// smallest valid range; check-out on or before check-in is rejected, never
/// silently coerced.
pub fn parse_range(check_in: &str, check_out: &str) -> Result<(NaiveDate, NaiveDate)> {
    let check_in = parse_date(check_in)?;
    let check_out = parse_date(check_out)?;
    if check_out <= check_in {
        return Err(AppError::InvalidRange(format!(
            "check-out {} must be after check-in {}",
            check_out, check_in
        )));
    }
    Ok((check_in, check_out))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_inverted_and_zero_length_ranges() {
        assert!(parse_range("2026-03-05", "2026-03-05").is_err());
        assert!(parse_range("2026-03-07", "2026-03-05").is_err());
        assert!(parse_range("2026-03-05", "2026-03-06").is_ok());
    }

    #[test]
    fn rejects_unparseable_dates() {
        assert!(matches!(
            parse_date("03/05/2026"),
            Err(AppError::InvalidRange(_))
        ));
    }
}
