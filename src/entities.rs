//! # Core Entities
//!
//! The entities that carry codec-backed values: positions, radii, colors,
//! numbers and orientations. Each of them extends [`TimeAware`], the block of
//! temporal metadata (epoch, neighbouring-packet times, interpolation) that
//! tells a client how to read time-tagged samples.
//!
//! The enumerations at the bottom are the literal strings CZML consumers
//! expect; they serialize exactly as written in their `rename` attributes.

use crate::color::{Rgba, Rgbaf, DEFAULT_HEX_OPACITY};
use crate::coordinates::{Coordinates, UnitQuaternion};
use crate::error::Result;
use crate::property::{czml_object, literal_property, nested_property, wrap, PropertyValue};
use crate::scalar::Scalar;
use crate::time::{TemporalValue, Timestamp};
use serde::{Deserialize, Serialize};
use serde_json::Value;

czml_object! {
    /// Temporal metadata shared by every time-taggable entity.
    ///
    /// `epoch` must be absolute; `nextTime` and `previousTime` may also be
    /// offsets in seconds.
    pub struct TimeAware {
        "epoch" => epoch: Timestamp,
        "nextTime" => next_time: TemporalValue,
        "previousTime" => previous_time: TemporalValue,
        "interpolationAlgorithm" => interpolation_algorithm: InterpolationAlgorithm,
        "interpolationDegree" => interpolation_degree: u32,
    }
}

impl TimeAware {
    /// True when no temporal metadata is set.
    pub fn is_empty(&self) -> bool {
        *self == TimeAware::default()
    }
}

czml_object! {
    /// The position of the object in the world. It has no visual
    /// representation of its own but locates billboards, labels and other
    /// primitives attached to the object.
    pub struct Position: TimeAware {
        "referenceFrame" => reference_frame: ReferenceFrame,
        "cartesian" => cartesian: Coordinates,
        "cartographicRadians" => cartographic_radians: Coordinates,
        "cartographicDegrees" => cartographic_degrees: Coordinates,
    }
}

impl Position {
    pub fn cartesian(coordinates: Coordinates) -> Self {
        Position {
            cartesian: Some(coordinates),
            ..Default::default()
        }
    }

    pub fn cartographic_degrees(coordinates: Coordinates) -> Self {
        Position {
            cartographic_degrees: Some(coordinates),
            ..Default::default()
        }
    }
}

/// A bare coordinate array becomes a cartesian position.
impl PropertyValue for Position {
    const EXPECTED: &'static str = "a position object or cartesian array";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        wrap(property, value, |v| {
            let values = v.as_array()?;
            Coordinates::from_values(values).ok().map(Position::cartesian)
        })
    }

    fn to_json(&self) -> Value {
        Value::Object(crate::property::CzmlObject::data(self))
    }
}

czml_object! {
    /// Radii of an ellipsoid along its three axes.
    pub struct Radii: TimeAware {
        "cartesian" => cartesian: Coordinates,
    }
}

/// A bare coordinate array becomes cartesian radii.
impl PropertyValue for Radii {
    const EXPECTED: &'static str = "a radii object or cartesian array";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        wrap(property, value, |v| {
            let cartesian = Coordinates::from_values(v.as_array()?).ok()?;
            Some(Radii {
                cartesian: Some(cartesian),
                ..Default::default()
            })
        })
    }

    fn to_json(&self) -> Value {
        Value::Object(crate::property::CzmlObject::data(self))
    }
}

czml_object! {
    /// A color, as byte channels (`rgba`) and/or unit channels (`rgbaf`).
    ///
    /// The two views are set independently; assigning one never rewrites
    /// the other.
    pub struct Color: TimeAware {
        "rgba" => rgba: Rgba,
        "rgbaf" => rgbaf: Rgbaf,
    }
}

impl Color {
    pub fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color {
            rgba: Some(Rgba::bytes(r, g, b, a)),
            ..Default::default()
        }
    }

    /// Unit-channel color; every channel must lie in `0.0..=1.0`.
    pub fn rgbaf(r: f64, g: f64, b: f64, a: f64) -> Result<Self> {
        Ok(Color {
            rgbaf: Some(Rgbaf::constant(r, g, b, a)?),
            ..Default::default()
        })
    }

    /// Byte color from a web hex string; see [`crate::color::hexcolor_to_rgba`].
    pub fn from_hex(text: &str, opacity: u8) -> Result<Self> {
        Ok(Color {
            rgba: Some(Rgba::from_hex(text, opacity)?),
            ..Default::default()
        })
    }
}

/// A hex string or a bare `rgba` array also makes a color.
impl PropertyValue for Color {
    const EXPECTED: &'static str = "a color object, hex string or rgba array";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        wrap(property, value, |v| match v {
            Value::String(hex) => Color::from_hex(hex, DEFAULT_HEX_OPACITY).ok(),
            Value::Array(values) => Rgba::from_values(values).ok().map(|rgba| Color {
                rgba: Some(rgba),
                ..Default::default()
            }),
            _ => None,
        })
    }

    fn to_json(&self) -> Value {
        Value::Object(crate::property::CzmlObject::data(self))
    }
}

czml_object! {
    /// A numeric property with optional temporal metadata.
    pub struct Number: TimeAware {
        "number" => number: Scalar,
    }
}

impl Number {
    pub fn new(value: Scalar) -> Self {
        Number {
            number: Some(value),
            ..Default::default()
        }
    }

    /// A plain constant number.
    pub fn constant(value: f64) -> Result<Self> {
        Scalar::constant(value).map(Number::new)
    }
}

/// Numbers nest as a bare JSON number when they are a plain constant, and as
/// `{"number": ...}` otherwise. Both shapes load.
impl PropertyValue for Number {
    const EXPECTED: &'static str = "a number or number object";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        wrap(property, value, |v| match v {
            Value::Number(_) | Value::Array(_) => Scalar::from_value(v).ok().map(Number::new),
            _ => None,
        })
    }

    fn to_json(&self) -> Value {
        match &self.number {
            Some(scalar) if scalar.is_constant() && self.timing.is_empty() => scalar.to_json(),
            _ => Value::Object(crate::property::CzmlObject::data(self)),
        }
    }
}

czml_object! {
    /// The orientation of the object in the world, used to orient models,
    /// cones and pyramids.
    pub struct Orientation: TimeAware {
        "unitQuaternion" => unit_quaternion: UnitQuaternion,
    }
}

nested_property!(Orientation);

czml_object! {
    /// Global clock settings, legal only on the document packet.
    pub struct Clock {
        "currentTime" => current_time: Timestamp,
        "multiplier" => multiplier: f64,
        "range" => range: ClockRange,
        "step" => step: ClockStep,
        "interval" => interval: String,
    }
}

nested_property!(Clock);

/// When data for an object is available: one interval string or several.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Availability {
    Single(String),
    Many(Vec<String>),
}

/// Reference frame of cartesian coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReferenceFrame {
    #[serde(rename = "FIXED")]
    Fixed,
    #[serde(rename = "INERTIAL")]
    Inertial,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InterpolationAlgorithm {
    Linear,
    Lagrange,
    Hermite,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HorizontalOrigin {
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VerticalOrigin {
    Bottom,
    Center,
    Top,
}

/// How label text is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LabelStyle {
    Fill,
    Outline,
    FillAndOutline,
}

/// What the clock does at the end of its interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockRange {
    Unbounded,
    Clamped,
    LoopStop,
}

/// How the clock advances each tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClockStep {
    TickDependent,
    SystemClockMultiplier,
    SystemClock,
}

literal_property! {
    Availability => "an interval string or list of interval strings",
    ReferenceFrame => "FIXED or INERTIAL",
    InterpolationAlgorithm => "LINEAR, LAGRANGE or HERMITE",
    HorizontalOrigin => "LEFT, CENTER or RIGHT",
    VerticalOrigin => "BOTTOM, CENTER or TOP",
    LabelStyle => "FILL, OUTLINE or FILL_AND_OUTLINE",
    ClockRange => "UNBOUNDED, CLAMPED or LOOP_STOP",
    ClockStep => "TICK_DEPENDENT, SYSTEM_CLOCK_MULTIPLIER or SYSTEM_CLOCK",
}
