//! # Graphical Primitives
//!
//! The visual building blocks attached to a packet. Each is a flat bag of
//! named properties over the codec-backed entities in [`crate::entities`] and
//! [`crate::material`].

use crate::coordinates::VertexList;
use crate::entities::{Color, HorizontalOrigin, LabelStyle, Number, Radii, ReferenceFrame, VerticalOrigin};
use crate::material::Material;
use crate::property::{czml_object, nested_property};

czml_object! {
    /// A viewport-aligned image positioned by the packet's position,
    /// sometimes called a marker.
    pub struct Billboard {
        "show" => show: bool,
        "image" => image: String,
        "color" => color: Color,
        "scale" => scale: Number,
        "horizontalOrigin" => horizontal_origin: HorizontalOrigin,
        "verticalOrigin" => vertical_origin: VerticalOrigin,
    }
}

czml_object! {
    /// A string of text positioned by the packet's position.
    pub struct Label {
        "show" => show: bool,
        "text" => text: String,
        "font" => font: String,
        "style" => style: LabelStyle,
        "scale" => scale: Number,
        "fillColor" => fill_color: Color,
        "outlineColor" => outline_color: Color,
        "outlineWidth" => outline_width: Number,
        "horizontalOrigin" => horizontal_origin: HorizontalOrigin,
        "verticalOrigin" => vertical_origin: VerticalOrigin,
    }
}

czml_object! {
    /// A viewport-aligned circle positioned by the packet's position.
    pub struct Point {
        "show" => show: bool,
        "color" => color: Color,
        "pixelSize" => pixel_size: Number,
        "outlineColor" => outline_color: Color,
        "outlineWidth" => outline_width: Number,
    }
}

czml_object! {
    /// World-space vertex positions for polylines and polygons.
    pub struct Positions {
        "referenceFrame" => reference_frame: ReferenceFrame,
        "cartesian" => cartesian: VertexList,
        "cartographicRadians" => cartographic_radians: VertexList,
        "cartographicDegrees" => cartographic_degrees: VertexList,
    }
}

impl Positions {
    pub fn cartographic_degrees(vertices: VertexList) -> Self {
        Positions {
            cartographic_degrees: Some(vertices),
            ..Default::default()
        }
    }
}

czml_object! {
    /// A line in the scene composed of multiple segments.
    pub struct Polyline {
        "show" => show: bool,
        "width" => width: Number,
        "followSurface" => follow_surface: bool,
        "material" => material: Material,
        "positions" => positions: Positions,
    }
}

czml_object! {
    /// A closed figure on the surface of the Earth.
    pub struct Polygon {
        "show" => show: bool,
        "fill" => fill: bool,
        "material" => material: Material,
        "positions" => positions: Positions,
        "height" => height: Number,
        "extrudedHeight" => extruded_height: Number,
        "perPositionHeight" => per_position_height: bool,
        "outline" => outline: bool,
        "outlineColor" => outline_color: Color,
    }
}

czml_object! {
    /// A polyline traced by the motion of the object over time.
    pub struct Path {
        "show" => show: bool,
        "width" => width: Number,
        "resolution" => resolution: Number,
        "leadTime" => lead_time: Number,
        "trailTime" => trail_time: Number,
        "material" => material: Material,
    }
}

czml_object! {
    /// An ellipse on the globe surface, centered on the packet's position.
    pub struct Ellipse {
        "semiMajorAxis" => semi_major_axis: Number,
        "semiMinorAxis" => semi_minor_axis: Number,
        "rotation" => rotation: Number,
    }
}

czml_object! {
    /// A closed quadric surface centered on the packet's position.
    pub struct Ellipsoid {
        "show" => show: bool,
        "radii" => radii: Radii,
        "material" => material: Material,
    }
}

czml_object! {
    /// A cone from the packet's position along its orientation's Z axis,
    /// optionally capped, hollow or clipped by clock angle.
    pub struct Cone {
        "show" => show: bool,
        "innerHalfAngle" => inner_half_angle: Number,
        "outerHalfAngle" => outer_half_angle: Number,
        "minimumClockAngle" => minimum_clock_angle: Number,
        "maximumClockAngle" => maximum_clock_angle: Number,
        "radius" => radius: Number,
        "showIntersection" => show_intersection: bool,
        "intersectionColor" => intersection_color: Color,
        "capMaterial" => cap_material: Material,
        "innerMaterial" => inner_material: Material,
        "outerMaterial" => outer_material: Material,
        "silhouetteMaterial" => silhouette_material: Material,
    }
}

nested_property!(
    Billboard, Label, Point, Positions, Polyline, Polygon, Path, Ellipse, Ellipsoid, Cone
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CzmlError;
    use crate::property::{CzmlObject, PropertyValue};
    use serde_json::{json, Value};

    #[test]
    fn test_billboard_round_trip() {
        let input = json!({
            "show": true,
            "image": "marker.png",
            "color": {"rgba": [0, 255, 127, 55]},
            "scale": 0.7,
            "horizontalOrigin": "CENTER",
            "verticalOrigin": "BOTTOM"
        });
        let billboard = Billboard::from_json("billboard", input).unwrap();
        assert_eq!(billboard.to_json(), json!({
            "show": true,
            "image": "marker.png",
            "color": {"rgba": [0, 255, 127, 55]},
            "scale": 0.7,
            "horizontalOrigin": "CENTER",
            "verticalOrigin": "BOTTOM"
        }));
        assert_eq!(Billboard::from_json("billboard", billboard.to_json()).unwrap(), billboard);
    }

    #[test]
    fn test_label_fields() {
        let mut label = Label::default();
        label
            .loads(r##"{"text": "Hi", "style": "FILL_AND_OUTLINE", "fillColor": "#ffffff"}"##)
            .unwrap();
        assert_eq!(label.style, Some(LabelStyle::FillAndOutline));
        assert_eq!(
            label.get("fillColor").unwrap(),
            Some(json!({"rgba": [255, 255, 255, 60]}))
        );
    }

    #[test]
    fn test_point_empty_is_empty_object() {
        assert_eq!(Point::default().to_json(), json!({}));
        assert_eq!(Point::default().dumps().unwrap(), "{}");
    }

    #[test]
    fn test_polyline_positions_from_vertices() {
        let mut polyline = Polyline::default();
        polyline
            .load_value(&json!({
                "width": 2,
                "followSurface": true,
                "positions": {"cartographicDegrees": [0, 0, 0, 1, 1, 0]},
                "material": {"polylineGlow": {"glowPower": 0.2}}
            }))
            .unwrap();
        let positions = polyline.positions.as_ref().unwrap();
        assert_eq!(positions.cartographic_degrees.as_ref().unwrap().len(), 2);

        let err = polyline
            .set("positions", json!({"cartographicDegrees": [0, 0, 0]}))
            .unwrap_err();
        assert!(matches!(err, CzmlError::InvalidVertexShape(_)));
        // The earlier value survives the failed assignment.
        assert!(polyline.positions.is_some());
    }

    #[test]
    fn test_ellipsoid_radii_and_material() {
        let ellipsoid = Ellipsoid::from_json(
            "ellipsoid",
            json!({"radii": {"cartesian": [1, 2, 3]}, "material": {"solidColor": {"color": [255, 0, 0]}}}),
        )
        .unwrap();
        let data = ellipsoid.data();
        assert_eq!(data["radii"], json!({"cartesian": [1.0, 2.0, 3.0]}));
        assert_eq!(
            data["material"],
            json!({"solidColor": {"color": {"rgba": [255, 0, 0, 255]}}})
        );
    }

    #[test]
    fn test_cone_rejects_unknown_keys() {
        let err = Cone::from_json("cone", json!({"show": true, "apex": 1})).unwrap_err();
        assert!(matches!(err, CzmlError::UnknownProperty { entity: "Cone", .. }));
    }

    #[test]
    fn test_path_numbers_accept_both_shapes() {
        let path = Path::from_json(
            "path",
            json!({"leadTime": 10, "trailTime": {"number": [0, 100, 60, 200]}}),
        )
        .unwrap();
        let data = Value::Object(path.data());
        assert_eq!(data["leadTime"], json!(10.0));
        assert_eq!(data["trailTime"], json!({"number": [0.0, 100.0, 60.0, 200.0]}));
    }
}
