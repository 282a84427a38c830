//! Lenient parsing of expense dates sent by clients.
//!
//! Browsers tend to send either a plain date from a date input ("2025-10-05")
//! or a full timestamp from `Date.toISOString()` ("2025-10-05T08:30:00.000Z").
//! Both are accepted and only the calendar date is kept.

use time::{
    Date, OffsetDateTime, format_description::BorrowedFormatItem,
    format_description::well_known::Rfc3339, macros::format_description,
};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// Parse a date from either `YYYY-MM-DD` or an RFC 3339 timestamp.
///
/// # Errors
/// Returns [Error::InvalidDate] if `text` matches neither format.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    let text = text.trim();

    Date::parse(text, DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| Error::InvalidDate(text.to_owned()))
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::parse_date;
    use crate::Error;

    #[test]
    fn parses_plain_date() {
        assert_eq!(parse_date("2025-10-05"), Ok(date!(2025 - 10 - 05)));
    }

    #[test]
    fn parses_timestamp_and_keeps_date() {
        assert_eq!(
            parse_date("2025-10-05T08:30:00.000Z"),
            Ok(date!(2025 - 10 - 05))
        );
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(
            parse_date("yesterday"),
            Err(Error::InvalidDate("yesterday".to_owned()))
        );
    }
}
