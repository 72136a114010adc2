//! # CZML Packets
//!
//! A packet describes (part of) one object in the scene, such as a single
//! aircraft. It is identified by an `id`; several packets may carry the same
//! id, each refining the same object, and consumers merge them in order.
//!
//! ## The document packet
//! The packet whose id is exactly `"document"` carries global settings. Only
//! it may hold `version` and `clock`; setting either on any other packet fails
//! with [`CzmlError::IllegalPropertyContext`].
//!
//! ## Tolerant loading
//! Unlike nested entities, whose `load` rejects undeclared keys, a packet's
//! `load` skips keys it does not recognize. Recognized keys are still fully
//! validated, and a packet that fails to load is left untouched.

use crate::entities::{Availability, Clock, Orientation, Position};
use crate::error::{CzmlError, Result};
use crate::graphics::{
    Billboard, Cone, Ellipse, Ellipsoid, Label, Path, Point, Polygon, Polyline, Positions,
};
use crate::property::{coerce, type_error, PropertyValue};
use serde_json::{Map, Value};

/// Reserved id of the document packet.
pub const DOCUMENT_ID: &str = "document";

/// Every key a packet recognizes, in emission order.
pub const PACKET_PROPERTIES: [&str; 17] = [
    "id",
    "availability",
    "version",
    "clock",
    "description",
    "position",
    "orientation",
    "billboard",
    "label",
    "point",
    "vertexPositions",
    "polyline",
    "polygon",
    "path",
    "ellipse",
    "ellipsoid",
    "cone",
];

/// One JSON object in a CZML document.
///
/// # Example
/// ```
/// use czml::packet::Packet;
///
/// let packet = Packet::new("abc");
/// assert_eq!(packet.dumps().unwrap(), r#"{"id":"abc"}"#);
///
/// let mut aircraft = Packet::new("aircraft-1");
/// assert!(aircraft.set_version("1.0").is_err());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Packet {
    id: Option<String>,
    version: Option<String>,
    clock: Option<Clock>,
    /// When data for the object is available.
    pub availability: Option<Availability>,
    /// HTML description shown for the object.
    pub description: Option<String>,
    pub position: Option<Position>,
    pub orientation: Option<Orientation>,
    pub billboard: Option<Billboard>,
    pub label: Option<Label>,
    pub point: Option<Point>,
    /// Serialized as `vertexPositions`.
    pub vertex_positions: Option<Positions>,
    pub polyline: Option<Polyline>,
    pub polygon: Option<Polygon>,
    pub path: Option<Path>,
    pub ellipse: Option<Ellipse>,
    pub ellipsoid: Option<Ellipsoid>,
    pub cone: Option<Cone>,
}

impl Packet {
    pub fn new(id: impl Into<String>) -> Self {
        Packet {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// The document packet, ready for `version` and `clock`.
    pub fn document() -> Self {
        Packet::new(DOCUMENT_ID)
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn is_document(&self) -> bool {
        self.id.as_deref() == Some(DOCUMENT_ID)
    }

    /// Change the id. Moving `version` or `clock` off the document packet
    /// this way is refused.
    pub fn set_id(&mut self, id: Option<String>) -> Result<()> {
        if id.as_deref() != Some(DOCUMENT_ID) {
            let id_text = id.clone().unwrap_or_default();
            if self.version.is_some() {
                return Err(illegal("version", id_text));
            }
            if self.clock.is_some() {
                return Err(illegal("clock", id_text));
            }
        }
        self.id = id;
        Ok(())
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn set_version(&mut self, version: impl Into<String>) -> Result<()> {
        self.require_document("version")?;
        self.version = Some(version.into());
        Ok(())
    }

    pub fn clock(&self) -> Option<&Clock> {
        self.clock.as_ref()
    }

    pub fn set_clock(&mut self, clock: Clock) -> Result<()> {
        self.require_document("clock")?;
        self.clock = Some(clock);
        Ok(())
    }

    /// Remove `version` and `clock`. Always allowed.
    pub fn clear_document_settings(&mut self) {
        self.version = None;
        self.clock = None;
    }

    fn require_document(&self, property: &'static str) -> Result<()> {
        if self.is_document() {
            Ok(())
        } else {
            Err(illegal(property, self.id.clone().unwrap_or_default()))
        }
    }

    /// Serialized value of one property, `None` when absent.
    pub fn get(&self, name: &str) -> Result<Option<Value>> {
        fn json<T: PropertyValue>(value: &Option<T>) -> Option<Value> {
            value.as_ref().map(PropertyValue::to_json)
        }

        Ok(match name {
            "id" => json(&self.id),
            "availability" => json(&self.availability),
            "version" => json(&self.version),
            "clock" => json(&self.clock),
            "description" => json(&self.description),
            "position" => json(&self.position),
            "orientation" => json(&self.orientation),
            "billboard" => json(&self.billboard),
            "label" => json(&self.label),
            "point" => json(&self.point),
            "vertexPositions" => json(&self.vertex_positions),
            "polyline" => json(&self.polyline),
            "polygon" => json(&self.polygon),
            "path" => json(&self.path),
            "ellipse" => json(&self.ellipse),
            "ellipsoid" => json(&self.ellipsoid),
            "cone" => json(&self.cone),
            _ => {
                return Err(CzmlError::UnknownProperty {
                    entity: "Packet",
                    name: name.to_string(),
                })
            }
        })
    }

    /// Assign one property from JSON; `null` clears it.
    ///
    /// Unlike [`Packet::load`], an unrecognized name is an error here.
    pub fn set(&mut self, name: &str, value: Value) -> Result<()> {
        match name {
            "id" => match value {
                Value::Null => self.set_id(None),
                Value::String(id) => self.set_id(Some(id)),
                other => Err(type_error(name, "a string", &other)),
            },
            "version" => match coerce::<String>(name, value)? {
                Some(version) => self.set_version(version),
                None => {
                    self.version = None;
                    Ok(())
                }
            },
            "clock" => {
                if !value.is_null() {
                    self.require_document("clock")?;
                }
                self.clock = coerce(name, value)?;
                Ok(())
            }
            "availability" => assign(&mut self.availability, name, value),
            "description" => assign(&mut self.description, name, value),
            "position" => assign(&mut self.position, name, value),
            "orientation" => assign(&mut self.orientation, name, value),
            "billboard" => assign(&mut self.billboard, name, value),
            "label" => assign(&mut self.label, name, value),
            "point" => assign(&mut self.point, name, value),
            "vertexPositions" => assign(&mut self.vertex_positions, name, value),
            "polyline" => assign(&mut self.polyline, name, value),
            "polygon" => assign(&mut self.polygon, name, value),
            "path" => assign(&mut self.path, name, value),
            "ellipse" => assign(&mut self.ellipse, name, value),
            "ellipsoid" => assign(&mut self.ellipsoid, name, value),
            "cone" => assign(&mut self.cone, name, value),
            _ => Err(CzmlError::UnknownProperty {
                entity: "Packet",
                name: name.to_string(),
            }),
        }
    }

    /// Sparse JSON object: `id` first, then every present property.
    pub fn data(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for name in PACKET_PROPERTIES {
            if let Ok(Some(value)) = self.get(name) {
                map.insert(name.to_string(), value);
            }
        }
        map
    }

    /// Load recognized keys from `map`, skipping the rest.
    ///
    /// `null` clears of `version`/`clock` come first, then the id, so that
    /// document settings are judged against the id in the same object.
    /// Nothing is committed if any recognized key fails.
    pub fn load(&mut self, map: &Map<String, Value>) -> Result<()> {
        let mut next = self.clone();
        for name in ["version", "clock"] {
            if map.get(name).is_some_and(Value::is_null) {
                next.set(name, Value::Null)?;
            }
        }
        if let Some(id) = map.get("id") {
            next.set("id", id.clone())?;
        }
        for (name, value) in map {
            if name == "id" {
                continue;
            }
            if PACKET_PROPERTIES.contains(&name.as_str()) {
                next.set(name, value.clone())?;
            } else {
                log::debug!(
                    "packet {:?}: skipping unrecognized property '{}'",
                    next.id.as_deref().unwrap_or(""),
                    name
                );
            }
        }
        *self = next;
        Ok(())
    }

    /// Load from any JSON value; anything but an object is not a packet.
    pub fn load_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => self.load(map),
            other => Err(CzmlError::InvalidPacketType(crate::error::describe(other))),
        }
    }

    pub fn dumps(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.data())?)
    }

    pub fn loads(&mut self, text: &str) -> Result<()> {
        let value: Value = serde_json::from_str(text)?;
        self.load_value(&value)
    }

    /// Build a packet from a JSON value.
    pub fn from_value(value: &Value) -> Result<Self> {
        let mut packet = Packet::default();
        packet.load_value(value)?;
        Ok(packet)
    }
}

fn assign<T: PropertyValue>(slot: &mut Option<T>, name: &str, value: Value) -> Result<()> {
    *slot = coerce(name, value)?;
    Ok(())
}

fn illegal(property: &'static str, id: String) -> CzmlError {
    CzmlError::IllegalPropertyContext { property, id }
}

impl serde::Serialize for Packet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.data(), serializer)
    }
}

impl<'de> serde::Deserialize<'de> for Packet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = <Value as serde::Deserialize>::deserialize(deserializer)?;
        Packet::from_value(&value).map_err(serde::de::Error::custom)
    }
}
