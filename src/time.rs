//! # Temporal Values
//!
//! CZML marks time in three ways: an ISO-8601 string, a number of seconds
//! relative to an epoch, or (on the Rust side) a native `chrono` value. This
//! module normalizes all of them into [`TemporalValue`] and renders them back
//! to their JSON form.
//!
//! ## Round-trip fidelity
//! An absolute timestamp is rendered with the offset it was parsed from. A
//! `Z` suffix stays `Z`, `+02:00` stays `+02:00`, a naive date-time stays
//! naive and a plain calendar date stays a date. Nothing is forced to UTC.

use crate::error::{describe, CzmlError, Result};
use crate::property::PropertyValue;
use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, SecondsFormat, Utc};
use serde_json::Value;

/// ISO-8601 zoned layouts outside RFC 3339: offsets without a colon and
/// times without seconds. `%#z` also accepts `Z`.
const ZONED_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%#z", "%Y-%m-%dT%H:%M%#z"];

/// Naive date-time layouts accepted on input, tried in order.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Layout used when rendering a naive date-time. `%.f` prints no fraction
/// when the sub-second part is zero.
const NAIVE_RENDER: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// An absolute point in time, remembering how it was written.
#[derive(Clone, Debug, PartialEq)]
pub enum Timestamp {
    /// Date-time with an explicit UTC offset. `zulu` records whether a zero
    /// offset was spelled `Z`.
    Zoned {
        at: DateTime<FixedOffset>,
        zulu: bool,
    },
    /// Date-time without any offset information.
    Naive(NaiveDateTime),
    /// Calendar date only.
    Date(NaiveDate),
}

impl Timestamp {
    /// Parse an ISO-8601 timestamp, date-time or date.
    ///
    /// # Example
    /// ```
    /// use czml::time::Timestamp;
    ///
    /// let ts = Timestamp::parse("2012-08-04T16:00:00+02:00").unwrap();
    /// assert_eq!(ts.to_iso8601(), "2012-08-04T16:00:00+02:00");
    ///
    /// let day = Timestamp::parse("2013-02-18").unwrap();
    /// assert_eq!(day.to_iso8601(), "2013-02-18");
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();

        if let Ok(at) = DateTime::parse_from_rfc3339(text) {
            let zulu = text.ends_with('Z') || text.ends_with('z');
            return Ok(Timestamp::Zoned { at, zulu });
        }

        for format in ZONED_FORMATS {
            if let Ok(at) = DateTime::parse_from_str(text, format) {
                let zulu = text.ends_with('Z') || text.ends_with('z');
                return Ok(Timestamp::Zoned { at, zulu });
            }
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                return Ok(Timestamp::Naive(naive));
            }
        }

        NaiveDate::parse_from_str(text, "%Y-%m-%d")
            .map(Timestamp::Date)
            .map_err(|_| {
                CzmlError::InvalidTemporalValue(format!("{:?} is not an ISO-8601 timestamp", text))
            })
    }

    /// Render as an ISO-8601 string in the form it was created from.
    pub fn to_iso8601(&self) -> String {
        match self {
            Timestamp::Zoned { at, zulu } => at.to_rfc3339_opts(SecondsFormat::AutoSi, *zulu),
            Timestamp::Naive(naive) => naive.format(NAIVE_RENDER).to_string(),
            Timestamp::Date(date) => date.format("%Y-%m-%d").to_string(),
        }
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(at: DateTime<Utc>) -> Self {
        Timestamp::Zoned {
            at: at.fixed_offset(),
            zulu: true,
        }
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(at: DateTime<FixedOffset>) -> Self {
        Timestamp::Zoned { at, zulu: false }
    }
}

impl From<NaiveDateTime> for Timestamp {
    fn from(naive: NaiveDateTime) -> Self {
        Timestamp::Naive(naive)
    }
}

impl From<NaiveDate> for Timestamp {
    fn from(date: NaiveDate) -> Self {
        Timestamp::Date(date)
    }
}

/// A time marker: either seconds relative to an epoch or an absolute timestamp.
///
/// "Absent" is modelled as `Option<TemporalValue>::None` by whoever owns the value.
#[derive(Clone, Debug, PartialEq)]
pub enum TemporalValue {
    /// Seconds since the owning property's epoch.
    Offset(f64),
    /// Absolute point in time.
    Absolute(Timestamp),
}

impl TemporalValue {
    /// Normalize a JSON time marker.
    ///
    /// `null` yields `None`. Numbers become offsets, strings are first tried as
    /// offsets and then as timestamps. Offsets are only accepted when
    /// `allow_offset` is set.
    pub fn parse(value: &Value, allow_offset: bool) -> Result<Option<Self>> {
        match value {
            Value::Null => Ok(None),
            Value::Number(n) => {
                let seconds = n.as_f64().ok_or_else(|| {
                    CzmlError::InvalidTemporalValue(format!("{} is not a finite offset", n))
                })?;
                Self::offset_if_allowed(seconds, allow_offset).map(Some)
            }
            Value::String(text) => Self::parse_str(text, allow_offset).map(Some),
            other => Err(CzmlError::InvalidTemporalValue(format!(
                "expected a timestamp or offset, got {}",
                describe(other)
            ))),
        }
    }

    /// Normalize a time marker given as text.
    pub fn parse_str(text: &str, allow_offset: bool) -> Result<Self> {
        if allow_offset {
            if let Ok(seconds) = text.trim().parse::<f64>() {
                if seconds.is_finite() {
                    return Ok(TemporalValue::Offset(seconds));
                }
            }
        }
        Timestamp::parse(text).map(TemporalValue::Absolute)
    }

    fn offset_if_allowed(seconds: f64, allow_offset: bool) -> Result<Self> {
        if allow_offset {
            Ok(TemporalValue::Offset(seconds))
        } else {
            Err(CzmlError::InvalidTemporalValue(format!(
                "offset {} given where an absolute timestamp is required",
                seconds
            )))
        }
    }

    /// JSON form: a string for timestamps, the unchanged number for offsets.
    pub fn render(&self) -> Value {
        match self {
            TemporalValue::Offset(seconds) => Value::from(*seconds),
            TemporalValue::Absolute(ts) => Value::String(ts.to_iso8601()),
        }
    }
}

impl From<f64> for TemporalValue {
    fn from(seconds: f64) -> Self {
        TemporalValue::Offset(seconds)
    }
}

impl From<Timestamp> for TemporalValue {
    fn from(ts: Timestamp) -> Self {
        TemporalValue::Absolute(ts)
    }
}

impl From<DateTime<Utc>> for TemporalValue {
    fn from(at: DateTime<Utc>) -> Self {
        TemporalValue::Absolute(at.into())
    }
}

impl From<DateTime<FixedOffset>> for TemporalValue {
    fn from(at: DateTime<FixedOffset>) -> Self {
        TemporalValue::Absolute(at.into())
    }
}

impl From<NaiveDateTime> for TemporalValue {
    fn from(naive: NaiveDateTime) -> Self {
        TemporalValue::Absolute(naive.into())
    }
}

impl From<NaiveDate> for TemporalValue {
    fn from(date: NaiveDate) -> Self {
        TemporalValue::Absolute(date.into())
    }
}

impl PropertyValue for TemporalValue {
    const EXPECTED: &'static str = "a timestamp or offset";

    fn from_json(_property: &str, value: Value) -> Result<Self> {
        TemporalValue::parse(&value, true)?
            .ok_or_else(|| CzmlError::InvalidTemporalValue("null".to_string()))
    }

    fn to_json(&self) -> Value {
        self.render()
    }
}

impl PropertyValue for Timestamp {
    const EXPECTED: &'static str = "an absolute timestamp";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        match TemporalValue::parse(&value, false) {
            Ok(Some(TemporalValue::Absolute(ts))) => Ok(ts),
            Ok(_) => Err(CzmlError::InvalidTemporalValue(format!(
                "'{}' needs an absolute timestamp",
                property
            ))),
            Err(e) => Err(e),
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.to_iso8601())
    }
}
