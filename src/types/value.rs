//! Statement parameters and native result values.
//!
//! [`Parameter`] is the closed set of argument types a statement accepts;
//! [`Value`] is what a row cursor hands back. Both convert to and from the
//! service's [`TaggedValue`].

use crate::transport::messages::TaggedValue;
use chrono::{DateTime, NaiveDateTime, TimeZone, Timelike};

/// Timestamp layout understood by the service, without the fraction.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parameter value for statement execution.
#[derive(Debug, Clone, PartialEq)]
pub enum Parameter {
    /// NULL value
    Null,
    /// Integer value
    Integer(i64),
    /// Float value
    Double(f64),
    /// Boolean value
    Boolean(bool),
    /// Binary data
    Bytes(Vec<u8>),
    /// String value
    String(String),
    /// Timestamp without time zone
    Timestamp(NaiveDateTime),
}

impl Parameter {
    /// Marshal into the service's tagged representation.
    ///
    /// Timestamps are sent as text in the form `YYYY-MM-DD HH:MM:SS[.fff]`.
    pub fn to_tagged(&self) -> TaggedValue {
        match self {
            Parameter::Null => TaggedValue::null(),
            Parameter::Integer(i) => TaggedValue::Long(*i),
            Parameter::Double(f) => TaggedValue::Double(*f),
            Parameter::Boolean(b) => TaggedValue::Boolean(*b),
            Parameter::Bytes(b) => TaggedValue::Blob(b.clone()),
            Parameter::String(s) => TaggedValue::String(s.clone()),
            Parameter::Timestamp(ts) => TaggedValue::String(format_timestamp(ts)),
        }
    }
}

/// Format a timestamp as `YYYY-MM-DD HH:MM:SS[.fff]`.
///
/// The fraction is truncated to milliseconds, trailing zeros are trimmed and
/// the fraction is omitted entirely when it is zero.
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    let mut out = ts.format(TIMESTAMP_FORMAT).to_string();
    // leap seconds carry nanos >= 1e9
    let millis = (ts.nanosecond() % 1_000_000_000) / 1_000_000;
    if millis > 0 {
        let fraction = format!("{:03}", millis);
        out.push('.');
        out.push_str(fraction.trim_end_matches('0'));
    }
    out
}

impl From<bool> for Parameter {
    fn from(value: bool) -> Self {
        Parameter::Boolean(value)
    }
}

impl From<i32> for Parameter {
    fn from(value: i32) -> Self {
        Parameter::Integer(value as i64)
    }
}

impl From<i64> for Parameter {
    fn from(value: i64) -> Self {
        Parameter::Integer(value)
    }
}

impl From<f64> for Parameter {
    fn from(value: f64) -> Self {
        Parameter::Double(value)
    }
}

impl From<String> for Parameter {
    fn from(value: String) -> Self {
        Parameter::String(value)
    }
}

impl From<&str> for Parameter {
    fn from(value: &str) -> Self {
        Parameter::String(value.to_string())
    }
}

impl From<Vec<u8>> for Parameter {
    fn from(value: Vec<u8>) -> Self {
        Parameter::Bytes(value)
    }
}

impl From<&[u8]> for Parameter {
    fn from(value: &[u8]) -> Self {
        Parameter::Bytes(value.to_vec())
    }
}

impl From<NaiveDateTime> for Parameter {
    fn from(value: NaiveDateTime) -> Self {
        Parameter::Timestamp(value)
    }
}

/// Zoned timestamps are sent as their local wall-clock time; the zone is dropped.
impl<Tz: TimeZone> From<DateTime<Tz>> for Parameter {
    fn from(value: DateTime<Tz>) -> Self {
        Parameter::Timestamp(value.naive_local())
    }
}

impl<T: Into<Parameter>> From<Option<T>> for Parameter {
    fn from(value: Option<T>) -> Self {
        value.map_or(Parameter::Null, Into::into)
    }
}

/// Native value read from a result row.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Value {
    /// SQL NULL
    #[default]
    Null,
    /// Binary data
    Bytes(Vec<u8>),
    /// Boolean
    Bool(bool),
    /// Double precision float
    Double(f64),
    /// 64-bit integer
    Integer(i64),
    /// Text (including dates, timestamps and decimals)
    String(String),
}

impl Value {
    /// Check if this is SQL NULL.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Integer content, if this is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Float content, if this is a double.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Double(f) => Some(*f),
            _ => None,
        }
    }

    /// Boolean content, if this is a boolean.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// Text content, if this is a string.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Binary content, if this is a byte sequence.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::Bytes(b) => Some(b),
            _ => None,
        }
    }

    /// Parse a string value written in the service's timestamp layout.
    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        let s = self.as_str()?;
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").ok()
    }
}

impl From<&TaggedValue> for Value {
    fn from(value: &TaggedValue) -> Self {
        match value {
            TaggedValue::Null => Value::Null,
            TaggedValue::Blob(b) => Value::Bytes(b.clone()),
            TaggedValue::Boolean(b) => Value::Bool(*b),
            TaggedValue::Double(f) => Value::Double(*f),
            TaggedValue::Long(i) => Value::Integer(*i),
            TaggedValue::String(s) => Value::String(s.clone()),
        }
    }
}

impl From<TaggedValue> for Value {
    fn from(value: TaggedValue) -> Self {
        match value {
            TaggedValue::Null => Value::Null,
            TaggedValue::Blob(b) => Value::Bytes(b),
            TaggedValue::Boolean(b) => Value::Bool(b),
            TaggedValue::Double(f) => Value::Double(f),
            TaggedValue::Long(i) => Value::Integer(i),
            TaggedValue::String(s) => Value::String(s),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn ts(h: u32, m: u32, s: u32, milli: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_milli_opt(h, m, s, milli)
            .unwrap()
    }

    #[test]
    fn test_scalar_parameters_round_trip() {
        let cases = vec![
            (Parameter::from(42i64), Value::Integer(42)),
            (Parameter::from(1.25f64), Value::Double(1.25)),
            (Parameter::from(true), Value::Bool(true)),
            (Parameter::from(vec![0xde, 0xad]), Value::Bytes(vec![0xde, 0xad])),
            (Parameter::from("hello"), Value::String("hello".to_string())),
            (Parameter::Null, Value::Null),
        ];

        for (param, expected) in cases {
            assert_eq!(Value::from(param.to_tagged()), expected);
        }
    }

    #[test]
    fn test_integer_marshals_to_long_tag() {
        assert_eq!(Parameter::from(42i64).to_tagged(), TaggedValue::Long(42));
        assert_eq!(Parameter::from(7i32).to_tagged(), TaggedValue::Long(7));
    }

    #[test]
    fn test_timestamp_without_fraction() {
        assert_eq!(format_timestamp(&ts(13, 4, 5, 0)), "2024-03-09 13:04:05");
    }

    #[test]
    fn test_timestamp_fraction_is_trimmed() {
        assert_eq!(format_timestamp(&ts(13, 4, 5, 120)), "2024-03-09 13:04:05.12");
        assert_eq!(format_timestamp(&ts(13, 4, 5, 7)), "2024-03-09 13:04:05.007");
        assert_eq!(format_timestamp(&ts(13, 4, 5, 999)), "2024-03-09 13:04:05.999");
    }

    #[test]
    fn test_timestamp_fraction_is_truncated() {
        let value = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_nano_opt(1, 2, 3, 123_999_999)
            .unwrap();
        assert_eq!(format_timestamp(&value), "2024-03-09 01:02:03.123");
    }

    #[test]
    fn test_timestamp_parameter_is_string_tag() {
        let tagged = Parameter::from(ts(0, 0, 0, 500)).to_tagged();
        assert_eq!(
            tagged,
            TaggedValue::String("2024-03-09 00:00:00.5".to_string())
        );

        let round_tripped = Value::from(tagged).as_timestamp().unwrap();
        assert_eq!(round_tripped, ts(0, 0, 0, 500));
    }

    #[test]
    fn test_zoned_timestamp_drops_zone() {
        let utc = Utc.from_utc_datetime(&ts(8, 30, 0, 0));
        assert_eq!(
            Parameter::from(utc).to_tagged(),
            TaggedValue::String("2024-03-09 08:30:00".to_string())
        );
    }

    #[test]
    fn test_option_parameter() {
        assert_eq!(Parameter::from(None::<i64>), Parameter::Null);
        assert_eq!(Parameter::from(Some(3i64)), Parameter::Integer(3));
    }

    #[test]
    fn test_value_accessors() {
        assert_eq!(Value::Integer(5).as_i64(), Some(5));
        assert_eq!(Value::Double(0.5).as_f64(), Some(0.5));
        assert_eq!(Value::Bool(false).as_bool(), Some(false));
        assert_eq!(Value::String("a".into()).as_str(), Some("a"));
        assert_eq!(Value::Bytes(vec![1]).as_bytes(), Some(&[1u8][..]));
        assert!(Value::Null.is_null());
        assert!(Value::Integer(1).as_str().is_none());
        assert_eq!(Value::default(), Value::Null);
    }
}
