//! # Sample Grouping and Fixed-Arity Sample Codec
//!
//! Every animated CZML property is written as one flat JSON array that
//! interleaves time markers with value components:
//!
//! ```text
//! [t0, x0, y0, z0, t1, x1, y1, z1, ...]
//! ```
//!
//! [`group`] slices such an array into equal-sized tuples, and [`Samples`]
//! decides once, at the boundary, whether a flat array is a constant value or
//! a series of time-tagged samples. The decision is made purely on length:
//! exactly `N` components is a constant, any non-zero multiple of `N + 1` is a
//! time-tagged series. The type of the first element never matters.

use crate::error::{CzmlError, Result};
use crate::time::TemporalValue;
use serde_json::Value;
use std::fmt::Debug;
use std::slice::ChunksExact;

/// Split `flat` into consecutive, non-overlapping tuples of `arity` elements.
///
/// Returns `None` when `arity` is zero or the length is not a multiple of it,
/// leaving the caller to report a shape error in its own terms.
///
/// # Example
/// ```
/// use czml::samples::group;
///
/// let tuples: Vec<&[i32]> = group(&[1, 2, 3, 4, 5, 6], 3).unwrap().collect();
/// assert_eq!(tuples, vec![&[1, 2, 3][..], &[4, 5, 6][..]]);
/// assert!(group(&[1, 2, 3, 4], 3).is_none());
/// ```
pub fn group<T>(flat: &[T], arity: usize) -> Option<ChunksExact<'_, T>> {
    if arity == 0 || flat.len() % arity != 0 {
        return None;
    }
    Some(flat.chunks_exact(arity))
}

/// A numeric component that can sit inside a sample tuple.
pub trait Component: Copy + Debug + PartialEq {
    /// Convert a JSON element, or `None` if it is not an acceptable component.
    fn from_json(value: &Value) -> Option<Self>;
    /// JSON form of the component.
    fn to_json(self) -> Value;
    /// Whether the component can be written as a JSON number.
    fn is_encodable(self) -> bool;
}

impl Component for f64 {
    fn from_json(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn is_encodable(self) -> bool {
        self.is_finite()
    }

    fn to_json(self) -> Value {
        Value::from(self)
    }
}

/// Byte channels truncate toward zero, so `127.9` becomes `127`.
impl Component for u8 {
    fn from_json(value: &Value) -> Option<Self> {
        let n = value.as_f64()?;
        if (0.0..256.0).contains(&n) {
            Some(n as u8)
        } else {
            None
        }
    }

    fn is_encodable(self) -> bool {
        true
    }

    fn to_json(self) -> Value {
        Value::from(self)
    }
}

/// One value paired with the point in time it applies to.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample<T> {
    pub time: TemporalValue,
    pub value: T,
}

impl<T> Sample<T> {
    pub fn new(time: impl Into<TemporalValue>, value: T) -> Self {
        Sample {
            time: time.into(),
            value,
        }
    }
}

/// The value set of one property: either a single constant or a series in
/// which every sample carries a time marker. Mixing the two cannot be
/// expressed.
#[derive(Clone, Debug, PartialEq)]
pub enum Samples<T> {
    Constant(T),
    TimeTagged(Vec<Sample<T>>),
}

impl<T> Samples<T> {
    pub fn is_time_tagged(&self) -> bool {
        matches!(self, Samples::TimeTagged(_))
    }

    /// Number of samples; a constant counts as one.
    pub fn len(&self) -> usize {
        match self {
            Samples::Constant(_) => 1,
            Samples::TimeTagged(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The constant value, if this is not a time series.
    pub fn constant(&self) -> Option<&T> {
        match self {
            Samples::Constant(value) => Some(value),
            Samples::TimeTagged(_) => None,
        }
    }
}

impl<C: Component, const N: usize> Samples<[C; N]> {
    /// Decode a flat JSON array into `N`-component samples.
    ///
    /// `shape_error` builds the error reported when the length or element
    /// types fit no encoding; malformed time markers are always reported as
    /// [`CzmlError::InvalidTemporalValue`].
    pub fn decode(flat: &[Value], shape_error: fn(String) -> CzmlError) -> Result<Self> {
        if flat.len() == N {
            return components::<C, N>(flat)
                .map(Samples::Constant)
                .ok_or_else(|| shape_error(format!("non-numeric component in {:?}", flat)));
        }

        let tuples = match group(flat, N + 1) {
            Some(tuples) if !flat.is_empty() => tuples,
            _ => {
                return Err(shape_error(format!(
                    "{} values fit neither a constant of {} nor samples of {}",
                    flat.len(),
                    N,
                    N + 1
                )))
            }
        };

        let mut samples = Vec::with_capacity(flat.len() / (N + 1));
        for tuple in tuples {
            let time = TemporalValue::parse(&tuple[0], true)?.ok_or_else(|| {
                CzmlError::InvalidTemporalValue("missing time marker in sample".to_string())
            })?;
            let value = components::<C, N>(&tuple[1..]).ok_or_else(|| {
                shape_error(format!("non-numeric component in sample {:?}", tuple))
            })?;
            samples.push(Sample { time, value });
        }
        log::trace!("decoded {} time-tagged samples of arity {}", samples.len(), N);
        Ok(Samples::TimeTagged(samples))
    }

    /// Check a value set built in code rather than decoded.
    ///
    /// A series needs at least one sample, and every component and offset
    /// must be a finite number, so that [`Samples::encode`] output always
    /// decodes back.
    pub fn validate(self, shape_error: fn(String) -> CzmlError) -> Result<Self> {
        if self.is_empty() {
            return Err(shape_error("a time series needs at least one sample".to_string()));
        }
        if let Samples::TimeTagged(samples) = &self {
            if let Some(bad) = samples
                .iter()
                .find(|s| matches!(s.time, TemporalValue::Offset(t) if !t.is_finite()))
            {
                return Err(CzmlError::InvalidTemporalValue(format!(
                    "offset {:?} is not a finite number",
                    bad.time
                )));
            }
        }
        if let Some(bad) = self.values().iter().flatten().find(|c| !c.is_encodable()) {
            return Err(shape_error(format!("component {:?} is not a finite number", bad)));
        }
        Ok(self)
    }

    /// Flat JSON form: `[x, y, ...]` for a constant, `[t, x, y, ..., t, x, y, ...]`
    /// for a time series.
    pub fn encode(&self) -> Vec<Value> {
        match self {
            Samples::Constant(value) => value.iter().map(|c| c.to_json()).collect(),
            Samples::TimeTagged(samples) => {
                let mut flat = Vec::with_capacity(samples.len() * (N + 1));
                for sample in samples {
                    flat.push(sample.time.render());
                    flat.extend(sample.value.iter().map(|c| c.to_json()));
                }
                flat
            }
        }
    }

    /// Every component tuple, in order, ignoring time markers.
    pub fn values(&self) -> Vec<[C; N]> {
        match self {
            Samples::Constant(value) => vec![*value],
            Samples::TimeTagged(samples) => samples.iter().map(|s| s.value).collect(),
        }
    }
}

fn components<C: Component, const N: usize>(values: &[Value]) -> Option<[C; N]> {
    if values.len() != N {
        return None;
    }
    let mut out = [values.first().and_then(C::from_json)?; N];
    for (slot, value) in out.iter_mut().zip(values).skip(1) {
        *slot = C::from_json(value)?;
    }
    Some(out)
}
