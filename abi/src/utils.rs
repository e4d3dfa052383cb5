use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::Error;

/// Parse an ISO 8601 timestamp as stored on the wire.
pub fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, Error> {
    s.parse::<DateTime<Utc>>()
        .map_err(|_| Error::InvalidTimestamp(s.to_string()))
}

/// First instant of the given calendar day (00:00:00).
pub fn day_start(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Last instant of the given calendar day (23:59:59.999), so a range whose
/// end bound is a date covers that entire day.
pub fn day_end(date: NaiveDate) -> DateTime<Utc> {
    let end = date.and_time(NaiveTime::MIN) + Duration::days(1) - Duration::milliseconds(1);
    Utc.from_utc_datetime(&end)
}

/// Display formatting for monetary amounts: two decimal places, comma
/// decimal separator, trailing currency symbol. Amounts are stored as plain
/// numbers; this is presentation only.
pub fn format_currency(value: f64, symbol: &str) -> String {
    format!("{:.2} {}", value, symbol).replacen('.', ",", 1)
}
