use chrono::NaiveDate;

use crate::error::ForestError;

pub const FILL_ALL_FIELDS: &str = "Please fill in all fields";
pub const FILL_REQUIRED_FIELDS: &str = "Please fill in all required fields";

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Trimmed value of a required text field, or the form's fill-in message.
pub fn required(value: &str, message: &str) -> Result<String, ForestError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ForestError::invalid(message));
    }
    Ok(trimmed.to_string())
}

pub fn parse_date(value: &str) -> Result<NaiveDate, ForestError> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        ForestError::invalid(format!("Invalid date '{}', expected YYYY-MM-DD", value.trim()))
    })
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims() {
        assert_eq!(required("  Oak  ", FILL_ALL_FIELDS).unwrap(), "Oak");
        assert_eq!(
            required("   ", FILL_ALL_FIELDS),
            Err(ForestError::invalid(FILL_ALL_FIELDS))
        );
    }

    #[test]
    fn dates_must_be_iso() {
        let d = parse_date("2023-06-15").unwrap();
        assert_eq!(format_date(d), "2023-06-15");
        assert!(parse_date("15/06/2023").is_err());
        assert!(parse_date("2023-02-30").is_err());
    }
}
