//! # Scalar Codec
//!
//! A numeric property is either one constant number or `[t, v, t, v, ...]`
//! pairs. A one-element array counts as a constant.

use crate::error::{describe, CzmlError, Result};
use crate::property::PropertyValue;
use crate::samples::{Sample, Samples};
use crate::time::TemporalValue;
use serde_json::Value;

/// Constant or time-tagged number.
#[derive(Clone, Debug, PartialEq)]
pub struct Scalar(Samples<[f64; 1]>);

impl Scalar {
    /// A plain number. NaN and infinities are rejected.
    pub fn constant(value: f64) -> Result<Self> {
        Samples::Constant([value])
            .validate(CzmlError::InvalidScalarShape)
            .map(Scalar)
    }

    /// `(time, value)` pairs; the list must not be empty.
    pub fn time_tagged<T: Into<TemporalValue>>(samples: Vec<(T, f64)>) -> Result<Self> {
        let samples: Vec<Sample<[f64; 1]>> = samples
            .into_iter()
            .map(|(time, value)| Sample::new(time, [value]))
            .collect();
        Samples::TimeTagged(samples)
            .validate(CzmlError::InvalidScalarShape)
            .map(Scalar)
    }

    /// Decode a JSON number or a flat `[t, v, ...]` array.
    ///
    /// # Example
    /// ```
    /// use czml::scalar::Scalar;
    /// use serde_json::json;
    ///
    /// assert_eq!(Scalar::from_value(&json!(5)).unwrap(), Scalar::constant(5.0).unwrap());
    /// assert_eq!(Scalar::from_value(&json!([5])).unwrap(), Scalar::constant(5.0).unwrap());
    /// assert_eq!(Scalar::from_value(&json!([0, 1, 10, 2])).unwrap().len(), 2);
    /// assert!(Scalar::from_value(&json!([0, 1, 10])).is_err());
    /// ```
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Number(n) => match n.as_f64() {
                Some(v) => Self::constant(v),
                None => Err(CzmlError::InvalidScalarShape(format!(
                    "{} is not representable",
                    n
                ))),
            },
            Value::Array(values) => {
                Samples::decode(values, CzmlError::InvalidScalarShape).map(Scalar)
            }
            other => Err(CzmlError::InvalidScalarShape(format!(
                "expected a number or array, got {}",
                describe(other)
            ))),
        }
    }

    /// The constant value, if not animated.
    pub fn value(&self) -> Option<f64> {
        self.0.constant().map(|[v]| *v)
    }

    pub fn is_constant(&self) -> bool {
        !self.0.is_time_tagged()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn samples(&self) -> &Samples<[f64; 1]> {
        &self.0
    }
}

impl PropertyValue for Scalar {
    const EXPECTED: &'static str = "a number or time-tagged number array";

    fn from_json(_property: &str, value: Value) -> Result<Self> {
        Scalar::from_value(&value)
    }

    /// A constant encodes as a bare number, a series as the flat array.
    fn to_json(&self) -> Value {
        match self.value() {
            Some(v) => Value::from(v),
            None => Value::Array(self.0.encode()),
        }
    }
}
