use chrono::{DateTime, NaiveDateTime, Utc};

const DATE_PARSE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DATE_WRITE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.000Z";
// "YYYY-MM-DDTHH:MM:SS", the fraction and zone suffix are ignored on read
const DATE_PREFIX_LEN: usize = 19;

/// Parses a server timestamp such as `2017-01-02T03:04:05.678Z`.
///
/// Only the first 19 characters are read; milliseconds and the zone designator
/// are dropped. Returns `None` for an empty or unparseable string, which is how
/// an unset timestamp is represented.
pub fn parse_date_string(date: &str) -> Option<DateTime<Utc>> {
    let prefix = date.get(..DATE_PREFIX_LEN)?;
    match NaiveDateTime::parse_from_str(prefix, DATE_PARSE_FORMAT) {
        Ok(naive) => Some(naive.and_utc()),
        Err(err) => {
            log::debug!("Unparseable date string {:?}: {}", date, err);
            None
        }
    }
}

/// Formats a timestamp the way the server stores it, with a fixed `.000Z`
/// suffix. `None` formats to the empty string.
pub fn format_date_string(date: Option<&DateTime<Utc>>) -> String {
    match date {
        Some(date) => date.format(DATE_WRITE_FORMAT).to_string(),
        None => String::new(),
    }
}
