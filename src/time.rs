use crate::error::{Error, Result};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn parse_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(s.to_string()))
}

/// Accepts "YYYY-MM-DD HH:MM" or a bare "YYYY-MM-DD", which is read as midnight.
pub fn parse_date_time(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    NaiveDateTime::parse_from_str(s, DATE_TIME_FORMAT)
        .or_else(|_| parse_date(s).map(|d| d.and_time(NaiveTime::MIN)))
        .map_err(|_| Error::InvalidDate(s.to_string()))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn format_date_time(time: NaiveDateTime) -> String {
    time.format(DATE_TIME_FORMAT).to_string()
}

/// Duration in whole hours, truncated toward zero.
pub fn whole_hours(from: NaiveDateTime, to: NaiveDateTime) -> i64 {
    (to - from).num_hours()
}

/// Serde adapter writing "YYYY-MM-DD HH:MM" and reading either stored form.
pub mod date_time {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(time: &NaiveDateTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&super::format_date_time(*time))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_date_time(&raw).map_err(de::Error::custom)
    }
}
