//! Date of birth wire format.

use chrono::NaiveDate;

use crate::constants::{DOB_FORMAT, DOB_TEXT_LENGTH};
use crate::error::{DomainError, DomainResult};

/// Parse a `YYYY-MM-DD` date of birth.
///
/// The shape is checked before calendar parsing so that variants chrono
/// would accept (unpadded months, signed or 5-digit years) are rejected.
pub fn parse_dob(text: &str) -> DomainResult<NaiveDate> {
    if !has_dob_shape(text) {
        return Err(DomainError::date_format(format!(
            "'{}' does not match YYYY-MM-DD",
            text
        )));
    }

    NaiveDate::parse_from_str(text, DOB_FORMAT)
        .map_err(|e| DomainError::date_format(format!("'{}': {}", text, e)))
}

/// Format a date of birth as `YYYY-MM-DD`.
pub fn format_dob(date: NaiveDate) -> String {
    date.format(DOB_FORMAT).to_string()
}

fn has_dob_shape(text: &str) -> bool {
    text.len() == DOB_TEXT_LENGTH
        && text.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}
