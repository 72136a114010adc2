//! # CZML Object Model
//!
//! Build, validate, read and write CZML: the JSON document format that
//! describes time-dynamic scenes on a virtual globe (positions, shapes,
//! colors and materials of objects over time).
//!
//! ## Layers
//!
//! ### Codecs
//! Raw input (numbers, timestamps, hex strings, point sequences) is turned
//! into canonical sample lists by the codec modules:
//! - [`time`]: ISO-8601 timestamps and epoch offsets
//! - [`samples`]: fixed-arity grouping shared by every codec
//! - [`coordinates`]: positions, vertex lists and unit quaternions
//! - [`color`]: byte and unit RGBA, hex strings
//! - [`scalar`]: plain or time-tagged numbers
//!
//! ### Entities
//! [`property`] supplies the typed-property object model. Each entity is a
//! fixed set of optional properties that serialize sparsely: an entity with
//! nothing set is `{}`. The catalog lives in [`entities`], [`material`] and
//! [`graphics`].
//!
//! ### Packets and documents
//! A [`packet::Packet`] groups the properties of one scene object under an
//! id. A [`document::Document`] is the ordered list of packets that makes a
//! CZML stream, and serializes to a JSON array (`[]` when empty).
//!
//! ## Example
//! ```
//! use czml::document::Document;
//! use czml::entities::{Color, Position};
//! use czml::coordinates::Coordinates;
//! use czml::graphics::Point;
//! use czml::packet::Packet;
//!
//! let mut doc = Document::new();
//! let mut settings = Packet::document();
//! settings.set_version("1.0").unwrap();
//! doc.append(settings);
//!
//! let mut marker = Packet::new("marker");
//! marker.position = Some(Position::cartographic_degrees(Coordinates::constant(-75.0, 40.0, 0.0).unwrap()));
//! marker.point = Some(Point {
//!     color: Some(Color::rgba(255, 0, 0, 255)),
//!     ..Default::default()
//! });
//! doc.append(marker);
//!
//! assert_eq!(
//!     doc.dumps().unwrap(),
//!     r#"[{"id":"document","version":"1.0"},{"id":"marker","position":{"cartographicDegrees":[-75.0,40.0,0.0]},"point":{"color":{"rgba":[255,0,0,255]}}}]"#
//! );
//! ```

// Module declarations
pub mod color;
pub mod config;
pub mod coordinates;
pub mod document;
pub mod entities;
pub mod error;
pub mod geometry;
pub mod graphics;
pub mod material;
pub mod packet;
pub mod property;
pub mod samples;
pub mod scalar;
pub mod time;

pub use document::Document;
pub use error::{CzmlError, Result};
pub use packet::Packet;
pub use property::{CzmlObject, PropertyValue};
