use chrono::{Datelike, NaiveDate, Timelike};
use mysql_async::Value;

use crate::error::SqlHelperError;
use crate::types::{RowValues, check_timestamp};

/// Positional parameters ready for a prepared execution.
#[derive(Debug, Clone)]
pub struct Params(pub Vec<Value>);

impl Params {
    /// # Errors
    /// Returns `SqlHelperError::ParameterError` when a value has no MySQL wire form.
    pub fn convert(params: &[RowValues]) -> Result<Self, SqlHelperError> {
        params
            .iter()
            .map(to_mysql_value)
            .collect::<Result<Vec<_>, _>>()
            .map(Params)
    }

    #[must_use]
    pub fn into_mysql(self) -> mysql_async::Params {
        if self.0.is_empty() {
            mysql_async::Params::Empty
        } else {
            mysql_async::Params::Positional(self.0)
        }
    }
}

/// Converts a middleware value into the driver's wire value.
///
/// # Errors
/// Returns `SqlHelperError::ParameterError` for timestamps MySQL cannot store.
pub fn to_mysql_value(value: &RowValues) -> Result<Value, SqlHelperError> {
    let converted = match value {
        RowValues::Int(i) => Value::Int(*i),
        RowValues::UInt(u) => Value::UInt(*u),
        RowValues::Float(f) => Value::Double(*f),
        RowValues::Text(s) => Value::Bytes(s.as_bytes().to_vec()),
        RowValues::Bool(b) => Value::Int(i64::from(*b)),
        RowValues::Timestamp(ts) => {
            check_timestamp(ts)?;
            let year = u16::try_from(ts.year()).map_err(|_| {
                SqlHelperError::ParameterError(format!("timestamp {ts} has a negative year"))
            })?;
            // month, day and time fields are bounded by chrono
            Value::Date(
                year,
                ts.month() as u8,
                ts.day() as u8,
                ts.hour() as u8,
                ts.minute() as u8,
                ts.second() as u8,
                ts.nanosecond() / 1_000,
            )
        }
        RowValues::Null => Value::NULL,
        RowValues::Blob(bytes) => Value::Bytes(bytes.clone()),
    };
    Ok(converted)
}

/// Converts a driver value read from a row.
///
/// Text-protocol results deliver every column as bytes; those come back as `Text` when they
/// are UTF-8 and `Blob` otherwise. `TIME` values become `HH:MM:SS[.ffffff]` text.
#[must_use]
pub fn from_mysql_value(value: &Value) -> RowValues {
    match value {
        Value::NULL => RowValues::Null,
        Value::Int(i) => RowValues::Int(*i),
        Value::UInt(u) => i64::try_from(*u).map_or(RowValues::UInt(*u), RowValues::Int),
        Value::Float(f) => RowValues::Float(f64::from(*f)),
        Value::Double(d) => RowValues::Float(*d),
        Value::Bytes(bytes) => match String::from_utf8(bytes.clone()) {
            Ok(text) => RowValues::Text(text),
            Err(_) => RowValues::Blob(bytes.clone()),
        },
        Value::Date(year, month, day, hour, minute, second, micros) => {
            NaiveDate::from_ymd_opt(i32::from(*year), u32::from(*month), u32::from(*day))
                .and_then(|date| {
                    date.and_hms_micro_opt(
                        u32::from(*hour),
                        u32::from(*minute),
                        u32::from(*second),
                        *micros,
                    )
                })
                .map_or_else(
                    // zero dates such as 0000-00-00 have no chrono form
                    || {
                        RowValues::Text(format!(
                            "{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}"
                        ))
                    },
                    RowValues::Timestamp,
                )
        }
        Value::Time(negative, days, hours, minutes, seconds, micros) => {
            let sign = if *negative { "-" } else { "" };
            let total_hours = days * 24 + u32::from(*hours);
            let mut text = format!("{sign}{total_hours:02}:{minutes:02}:{seconds:02}");
            if *micros != 0 {
                text.push_str(&format!(".{micros:06}"));
            }
            RowValues::Text(text)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_round_trips_through_bytes() {
        let value = to_mysql_value(&RowValues::Text("héllo".into())).unwrap();
        assert_eq!(from_mysql_value(&value), RowValues::Text("héllo".into()));
    }

    #[test]
    fn invalid_utf8_becomes_blob() {
        let value = Value::Bytes(vec![0xff, 0xfe]);
        assert_eq!(from_mysql_value(&value), RowValues::Blob(vec![0xff, 0xfe]));
    }

    #[test]
    fn datetimes_keep_microseconds() {
        let ts = NaiveDate::from_ymd_opt(2024, 2, 29)
            .unwrap()
            .and_hms_micro_opt(23, 59, 58, 123_456)
            .unwrap();
        let value = to_mysql_value(&RowValues::Timestamp(ts)).unwrap();
        assert_eq!(value, Value::Date(2024, 2, 29, 23, 59, 58, 123_456));
        assert_eq!(from_mysql_value(&value), RowValues::Timestamp(ts));
    }

    #[test]
    fn zero_dates_fall_back_to_text() {
        let value = Value::Date(0, 0, 0, 0, 0, 0, 0);
        assert_eq!(
            from_mysql_value(&value),
            RowValues::Text("0000-00-00 00:00:00".into())
        );
    }

    #[test]
    fn times_render_as_text() {
        let value = Value::Time(true, 1, 2, 3, 4, 5);
        assert_eq!(
            from_mysql_value(&value),
            RowValues::Text("-26:03:04.000005".into())
        );
    }

    #[test]
    fn large_unsigned_values_stay_exact() {
        let value = Value::UInt(u64::MAX);
        assert_eq!(from_mysql_value(&value), RowValues::UInt(u64::MAX));
        assert_eq!(
            to_mysql_value(&RowValues::UInt(u64::MAX)).unwrap(),
            Value::UInt(u64::MAX)
        );
        assert_eq!(from_mysql_value(&Value::UInt(5)), RowValues::Int(5));
    }

    #[test]
    fn unstorable_timestamps_are_not_truncated() {
        let far = NaiveDate::from_ymd_opt(70_000, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        assert!(matches!(
            to_mysql_value(&RowValues::Timestamp(far)),
            Err(SqlHelperError::ParameterError(_))
        ));

        let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
            .unwrap()
            .and_hms_micro_opt(23, 59, 59, 1_000_001)
            .unwrap();
        assert!(Params::convert(&[RowValues::Int(1), RowValues::Timestamp(leap)]).is_err());
    }

    #[test]
    fn empty_params_are_empty() {
        assert!(matches!(
            Params::convert(&[]).unwrap().into_mysql(),
            mysql_async::Params::Empty
        ));
    }
}
