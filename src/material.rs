//! # Materials
//!
//! A material fills a surface or line. Exactly one sub-material key is
//! normally present: `solidColor`, `grid`, `image`, `stripe`, `polylineGlow`
//! or `polylineOutline`.

use crate::entities::{Color, Number};
use crate::error::Result;
use crate::property::{czml_object, literal_property, nested_property, wrap, CzmlObject, PropertyValue};
use serde::{Deserialize, Serialize};
use serde_json::Value;

czml_object! {
    /// Fill surfaces with one color.
    pub struct SolidColor {
        "color" => color: Color,
    }
}

czml_object! {
    /// Fill surfaces with a grid of lines.
    pub struct Grid {
        "color" => color: Color,
        "cellAlpha" => cell_alpha: Number,
        "lineCount" => line_count: Number,
        "lineThickness" => line_thickness: Number,
        "lineOffset" => line_offset: Number,
    }
}

czml_object! {
    /// Fill surfaces with an image.
    pub struct Image {
        "image" => image: String,
        "color" => color: Color,
        "transparent" => transparent: bool,
    }
}

czml_object! {
    /// Fill surfaces with alternating stripes.
    pub struct Stripe {
        "orientation" => orientation: StripeOrientation,
        "evenColor" => even_color: Color,
        "oddColor" => odd_color: Color,
        "offset" => offset: Number,
        "repeat" => repeat: Number,
    }
}

czml_object! {
    /// A glowing line.
    pub struct PolylineGlow {
        "color" => color: Color,
        "glowPower" => glow_power: Number,
    }
}

czml_object! {
    /// A line with an outline.
    pub struct PolylineOutline {
        "color" => color: Color,
        "outlineColor" => outline_color: Color,
        "outlineWidth" => outline_width: Number,
    }
}

nested_property!(SolidColor, Grid, Image, Stripe, PolylineGlow, PolylineOutline);

czml_object! {
    /// Definition of how a surface or line is colored.
    pub struct Material {
        "solidColor" => solid_color: SolidColor,
        "grid" => grid: Grid,
        "image" => image: Image,
        "stripe" => stripe: Stripe,
        "polylineGlow" => polyline_glow: PolylineGlow,
        "polylineOutline" => polyline_outline: PolylineOutline,
    }
}

impl Material {
    pub fn solid(color: Color) -> Self {
        Material {
            solid_color: Some(SolidColor { color: Some(color) }),
            ..Default::default()
        }
    }
}

/// Anything that makes a [`Color`] (hex string, `rgba` array) also makes a
/// solid-color material.
impl PropertyValue for Material {
    const EXPECTED: &'static str = "a material object or color";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        wrap(property, value, |v| {
            Color::from_json(property, v.clone()).ok().map(Material::solid)
        })
    }

    fn to_json(&self) -> Value {
        Value::Object(self.data())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StripeOrientation {
    Horizontal,
    Vertical,
}

literal_property! {
    StripeOrientation => "HORIZONTAL or VERTICAL",
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CzmlError;
    use serde_json::json;

    #[test]
    fn test_material_keys_are_preserved() {
        let input = json!({
            "solidColor": {"color": {"rgba": [255, 0, 0, 255]}},
            "grid": {"color": {"rgbaf": [0.5, 0.5, 0.5, 1.0]}, "cellAlpha": 0.1},
            "image": {"image": "http://example.com/a.png"},
            "stripe": {"orientation": "VERTICAL", "repeat": 4},
            "polylineGlow": {"glowPower": 0.25},
            "polylineOutline": {"outlineWidth": 2}
        });
        let mut material = Material::default();
        material.load_value(&input).unwrap();
        let data = material.data();
        let keys: Vec<&str> = data.keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec!["solidColor", "grid", "image", "stripe", "polylineGlow", "polylineOutline"]
        );
        assert_eq!(data["stripe"], json!({"orientation": "VERTICAL", "repeat": 4.0}));
    }

    #[test]
    fn test_material_from_color_shorthand() {
        let material = Material::from_json("material", json!("#ff0000")).unwrap();
        assert_eq!(
            material.to_json(),
            json!({"solidColor": {"color": {"rgba": [255, 0, 0, 60]}}})
        );
    }

    #[test]
    fn test_sub_materials_are_strict() {
        let mut material = Material::default();
        let err = material
            .load_value(&json!({"grid": {"cellAlpha": 0.1, "cellBeta": 0.2}}))
            .unwrap_err();
        assert!(matches!(err, CzmlError::UnknownProperty { entity: "Grid", .. }));
        assert_eq!(material, Material::default());
    }
}
