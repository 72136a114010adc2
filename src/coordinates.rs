//! # Coordinate and Vertex-List Codecs
//!
//! Point-like values (positions, radii) may be constant or animated and are
//! decoded by length:
//!
//! | length | meaning |
//! |---|---|
//! | 2 | constant `(x, y)`, `z = 0` |
//! | 3 | constant `(x, y, z)` |
//! | 4 | one time-tagged sample `(t, x, y, z)` |
//! | `4k` | `k` time-tagged samples |
//!
//! Vertex lists (polyline and polygon outlines) are never animated: they are
//! a flat run of `x, y, z` triples, at least two vertices long.

use crate::error::{describe, CzmlError, Result};
use crate::geometry::{LineLike, PointLike};
use crate::property::PropertyValue;
use crate::samples::{Sample, Samples};
use crate::time::TemporalValue;
use serde_json::Value;

/// Constant or time-tagged 3D coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Coordinates(Samples<[f64; 3]>);

impl Coordinates {
    /// A fixed point. Non-finite components are rejected.
    pub fn constant(x: f64, y: f64, z: f64) -> Result<Self> {
        Self::checked(Samples::Constant([x, y, z]))
    }

    /// A series of samples; it must not be empty.
    pub fn time_tagged(samples: Vec<Sample<[f64; 3]>>) -> Result<Self> {
        Self::checked(Samples::TimeTagged(samples))
    }

    fn checked(samples: Samples<[f64; 3]>) -> Result<Self> {
        samples
            .validate(CzmlError::InvalidCoordinateShape)
            .map(Coordinates)
    }

    /// Decode a flat JSON array according to the length table above.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        if values.len() == 2 {
            let x = values[0].as_f64();
            let y = values[1].as_f64();
            return match (x, y) {
                (Some(x), Some(y)) => Self::constant(x, y, 0.0),
                _ => Err(CzmlError::InvalidCoordinateShape(format!(
                    "non-numeric component in {:?}",
                    values
                ))),
            };
        }
        Samples::decode(values, CzmlError::InvalidCoordinateShape).map(Coordinates)
    }

    /// Decode a flat numeric array. Same length rules as [`Coordinates::from_values`],
    /// with time markers given as offsets.
    ///
    /// # Example
    /// ```
    /// use czml::coordinates::Coordinates;
    ///
    /// let constant = Coordinates::from_flat(&[1.0, 2.0]).unwrap();
    /// assert_eq!(constant.samples().constant(), Some(&[1.0, 2.0, 0.0]));
    ///
    /// let track = Coordinates::from_flat(&[0.0, 1.0, 2.0, 3.0]).unwrap();
    /// assert!(track.samples().is_time_tagged());
    /// ```
    pub fn from_flat(flat: &[f64]) -> Result<Self> {
        let values: Vec<Value> = flat.iter().map(|&n| Value::from(n)).collect();
        Self::from_values(&values)
    }

    /// Extract a point from point-like geometry, optionally time-tagged.
    pub fn from_point<P: PointLike + ?Sized>(point: &P, time: Option<TemporalValue>) -> Result<Self> {
        let xyz = point_xyz(point.coords(), CzmlError::InvalidCoordinateShape)?;
        Self::checked(match time {
            Some(time) => Samples::TimeTagged(vec![Sample { time, value: xyz }]),
            None => Samples::Constant(xyz),
        })
    }

    /// Build a time series from point-like geometry paired with time markers.
    pub fn from_timed_points<P: PointLike>(points: &[(TemporalValue, P)]) -> Result<Self> {
        let samples = points
            .iter()
            .map(|(time, point)| {
                point_xyz(point.coords(), CzmlError::InvalidCoordinateShape).map(|value| Sample {
                    time: time.clone(),
                    value,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::time_tagged(samples)
    }

    pub fn samples(&self) -> &Samples<[f64; 3]> {
        &self.0
    }

    /// Flat JSON form, `[x, y, z]` or `[t, x, y, z, ...]`.
    pub fn to_flat(&self) -> Vec<Value> {
        self.0.encode()
    }
}

impl PropertyValue for Coordinates {
    const EXPECTED: &'static str = "a coordinate array";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        match value {
            Value::Array(values) => Coordinates::from_values(&values),
            other => Err(CzmlError::InvalidCoordinateShape(format!(
                "'{}' expects an array, got {}",
                property,
                describe(&other)
            ))),
        }
    }

    fn to_json(&self) -> Value {
        Value::Array(self.to_flat())
    }
}

/// Extend a 2- or 3-component point to `(x, y, z)`.
fn point_xyz(coords: Vec<f64>, shape_error: fn(String) -> CzmlError) -> Result<[f64; 3]> {
    match coords.as_slice() {
        [x, y] => Ok([*x, *y, 0.0]),
        [x, y, z] => Ok([*x, *y, *z]),
        other => Err(shape_error(format!(
            "points need 2 or 3 coordinates, got {}",
            other.len()
        ))),
    }
}

/// Flat list of `x, y, z` vertex components with no time dimension.
#[derive(Clone, Debug, PartialEq)]
pub struct VertexList(Vec<f64>);

impl VertexList {
    /// Smallest accepted list: two vertices.
    pub const MIN_LEN: usize = 6;

    /// Validate a flat list: a multiple of 3, at least [`VertexList::MIN_LEN`] long.
    pub fn from_flat(flat: Vec<f64>) -> Result<Self> {
        if flat.len() % 3 != 0 || flat.len() < Self::MIN_LEN {
            return Err(CzmlError::InvalidVertexShape(format!(
                "expected at least {} values in groups of 3, got {}",
                Self::MIN_LEN,
                flat.len()
            )));
        }
        if let Some(bad) = flat.iter().find(|v| !v.is_finite()) {
            return Err(CzmlError::InvalidVertexShape(format!(
                "vertex component {} is not a finite number",
                bad
            )));
        }
        Ok(VertexList(flat))
    }

    pub fn from_values(values: &[Value]) -> Result<Self> {
        let flat = values
            .iter()
            .map(|v| {
                v.as_f64().ok_or_else(|| {
                    CzmlError::InvalidVertexShape(format!("non-numeric vertex component {}", v))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Self::from_flat(flat)
    }

    /// Flatten a line, ring or polygon exterior, giving 2D points `z = 0`.
    ///
    /// # Example
    /// ```
    /// use czml::coordinates::VertexList;
    ///
    /// let line = vec![(0.0, 0.0), (1.0, 1.0)];
    /// let vertices = VertexList::from_line(&line).unwrap();
    /// assert_eq!(vertices.as_slice(), &[0.0, 0.0, 0.0, 1.0, 1.0, 0.0]);
    /// ```
    pub fn from_line<L: LineLike + ?Sized>(line: &L) -> Result<Self> {
        let mut flat = Vec::new();
        for point in line.points() {
            flat.extend(point_xyz(point, CzmlError::InvalidVertexShape)?);
        }
        Self::from_flat(flat)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.0.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_flat(&self) -> Vec<Value> {
        self.0.iter().map(|&n| Value::from(n)).collect()
    }
}

impl PropertyValue for VertexList {
    const EXPECTED: &'static str = "a flat vertex array";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        match value {
            Value::Array(values) => VertexList::from_values(&values),
            other => Err(CzmlError::InvalidVertexShape(format!(
                "'{}' expects an array, got {}",
                property,
                describe(&other)
            ))),
        }
    }

    fn to_json(&self) -> Value {
        Value::Array(self.to_flat())
    }
}

/// Constant or time-tagged unit quaternions `(x, y, z, w)`.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitQuaternion(Samples<[f64; 4]>);

impl UnitQuaternion {
    pub fn constant(x: f64, y: f64, z: f64, w: f64) -> Result<Self> {
        Samples::Constant([x, y, z, w])
            .validate(CzmlError::InvalidCoordinateShape)
            .map(UnitQuaternion)
    }

    pub fn time_tagged(samples: Vec<Sample<[f64; 4]>>) -> Result<Self> {
        Samples::TimeTagged(samples)
            .validate(CzmlError::InvalidCoordinateShape)
            .map(UnitQuaternion)
    }

    pub fn from_values(values: &[Value]) -> Result<Self> {
        Samples::decode(values, CzmlError::InvalidCoordinateShape).map(UnitQuaternion)
    }

    pub fn samples(&self) -> &Samples<[f64; 4]> {
        &self.0
    }
}

impl PropertyValue for UnitQuaternion {
    const EXPECTED: &'static str = "a quaternion array";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        match value {
            Value::Array(values) => UnitQuaternion::from_values(&values),
            other => Err(CzmlError::InvalidCoordinateShape(format!(
                "'{}' expects an array, got {}",
                property,
                describe(&other)
            ))),
        }
    }

    fn to_json(&self) -> Value {
        Value::Array(self.0.encode())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Polygon;
    use serde_json::json;

    fn array(v: Value) -> Vec<Value> {
        v.as_array().cloned().unwrap()
    }

    #[test]
    fn test_two_values_default_z() {
        let c = Coordinates::from_values(&array(json!([1, 2]))).unwrap();
        assert_eq!(c.samples(), &Samples::Constant([1.0, 2.0, 0.0]));
    }

    #[test]
    fn test_length_three_is_always_constant() {
        // A string in front does not turn three values into a sample.
        let c = Coordinates::from_values(&array(json!([0, 1, 2]))).unwrap();
        assert!(!c.samples().is_time_tagged());
        assert!(Coordinates::from_values(&array(json!(["2012-08-04T16:00:00Z", 1, 2]))).is_err());
    }

    #[test]
    fn test_length_four_is_always_one_sample() {
        for input in [json!([0, 1, 2, 3]), json!(["2012-08-04T16:00:00Z", 1, 2, 3])] {
            let c = Coordinates::from_values(&array(input)).unwrap();
            assert_eq!(c.samples().len(), 1);
            assert!(c.samples().is_time_tagged());
        }
    }

    #[test]
    fn test_multiple_samples_round_trip() {
        let input = json!([0, -62, 141, 0, 2, -51, 143, 0, 4, -40, 145, 0]);
        let c = Coordinates::from_json("cartographicDegrees", input.clone()).unwrap();
        assert_eq!(c.samples().len(), 3);
        let decoded = Coordinates::from_json("cartographicDegrees", c.to_json()).unwrap();
        assert_eq!(decoded, c);
        let out: Vec<f64> = c.to_flat().iter().filter_map(Value::as_f64).collect();
        let expected: Vec<f64> = array(input).iter().filter_map(Value::as_f64).collect();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_bad_coordinate_shapes() {
        for input in [json!([]), json!([1]), json!([1, 2, 3, 4, 5]), json!([1, "x", 3])] {
            assert!(matches!(
                Coordinates::from_values(&array(input)),
                Err(CzmlError::InvalidCoordinateShape(_))
            ));
        }
        assert!(Coordinates::from_json("cartesian", json!("1,2,3")).is_err());
    }

    #[test]
    fn test_from_point_geometry() {
        let c = Coordinates::from_point(&(10.0, 20.0), None).unwrap();
        assert_eq!(c.to_json(), json!([10.0, 20.0, 0.0]));

        let c = Coordinates::from_point(&[1.0, 2.0, 3.0], Some(TemporalValue::Offset(5.0))).unwrap();
        assert_eq!(c.to_json(), json!([5.0, 1.0, 2.0, 3.0]));

        let err = Coordinates::from_point(&vec![1.0], None).unwrap_err();
        assert!(matches!(err, CzmlError::InvalidCoordinateShape(_)));
    }

    #[test]
    fn test_from_timed_points() {
        let c = Coordinates::from_timed_points(&[
            (TemporalValue::Offset(0.0), (1.0, 2.0)),
            (TemporalValue::Offset(10.0), (3.0, 4.0)),
        ])
        .unwrap();
        assert_eq!(c.to_json(), json!([0.0, 1.0, 2.0, 0.0, 10.0, 3.0, 4.0, 0.0]));
    }

    #[test]
    fn test_built_values_must_encode() {
        assert!(matches!(
            Coordinates::time_tagged(vec![]),
            Err(CzmlError::InvalidCoordinateShape(_))
        ));
        let none: [(TemporalValue, (f64, f64)); 0] = [];
        assert!(Coordinates::from_timed_points(&none).is_err());
        assert!(matches!(
            Coordinates::constant(f64::NAN, 1.0, 2.0),
            Err(CzmlError::InvalidCoordinateShape(_))
        ));
        assert!(Coordinates::from_point(&(f64::INFINITY, 0.0), None).is_err());
        assert!(UnitQuaternion::time_tagged(vec![]).is_err());
        assert!(matches!(
            VertexList::from_flat(vec![0.0, 0.0, 0.0, 1.0, f64::NAN, 0.0]),
            Err(CzmlError::InvalidVertexShape(_))
        ));

        let c = Coordinates::constant(1.0, 2.0, 3.0).unwrap();
        assert_eq!(Coordinates::from_json("cartesian", c.to_json()).unwrap(), c);
    }

    #[test]
    fn test_vertex_list_validation() {
        assert!(VertexList::from_flat(vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0]).is_ok());
        assert!(matches!(
            VertexList::from_flat(vec![0.0, 1.0, 2.0]),
            Err(CzmlError::InvalidVertexShape(_))
        ));
        assert!(matches!(
            VertexList::from_flat(vec![0.0; 7]),
            Err(CzmlError::InvalidVertexShape(_))
        ));
    }

    #[test]
    fn test_vertex_list_from_geometry() {
        let line = vec![(0.0, 0.0), (1.0, 1.0)];
        let v = VertexList::from_line(&line).unwrap();
        assert_eq!(v.to_json(), json!([0.0, 0.0, 0.0, 1.0, 1.0, 0.0]));
        assert_eq!(v.len(), 2);

        let ring = Polygon::new(vec![[0.0, 0.0, 1.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]);
        assert_eq!(VertexList::from_line(&ring).unwrap().len(), 3);

        let bad: Vec<Vec<f64>> = vec![vec![0.0, 0.0], vec![1.0, 1.0, 1.0, 1.0]];
        assert!(matches!(
            VertexList::from_line(&bad),
            Err(CzmlError::InvalidVertexShape(_))
        ));
    }

    #[test]
    fn test_vertex_list_is_identity_on_numbers() {
        let flat = vec![1.5, 2.5, 3.5, 4.5, 5.5, 6.5];
        let v = VertexList::from_flat(flat.clone()).unwrap();
        assert_eq!(v.as_slice(), flat.as_slice());
    }

    #[test]
    fn test_quaternion_shapes() {
        let q = UnitQuaternion::from_values(&array(json!([0, 0, 0, 1]))).unwrap();
        assert_eq!(q.samples(), &Samples::Constant([0.0, 0.0, 0.0, 1.0]));
        let q = UnitQuaternion::from_values(&array(json!([0, 0, 0, 0, 1]))).unwrap();
        assert!(q.samples().is_time_tagged());
    }
}
