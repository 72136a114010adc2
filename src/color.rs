//! # Color Codec
//!
//! Colors come in two parallel encodings that share one shape table:
//!
//! - `rgba`: byte channels, integers `0..=255`
//! - `rgbaf`: unit channels, floats `0.0..=1.0`
//!
//! | length | meaning |
//! |---|---|
//! | 3 | constant `(r, g, b)`, alpha fully opaque |
//! | 4 | constant `(r, g, b, a)` |
//! | 5 | one time-tagged sample `(t, r, g, b, a)` |
//! | `5k` | `k` time-tagged samples |
//!
//! Web hex strings (`#RGB`, `#RGBA`, `#RRGGBB`, `#RRGGBBAA`) convert to byte
//! channels through [`hexcolor_to_rgba`].

use crate::error::{describe, CzmlError, Result};
use crate::property::PropertyValue;
use crate::samples::{Component, Sample, Samples};
use serde_json::Value;

/// Opacity given to hex colors written without an alpha channel.
pub const DEFAULT_HEX_OPACITY: u8 = 0x3c;

/// A color channel type.
pub trait Channel: Component {
    /// Alpha value of a fully opaque color.
    const OPAQUE: Self;

    /// Whether the channel value lies in the encoding's range.
    fn in_range(self) -> bool;
}

impl Channel for u8 {
    const OPAQUE: Self = 255;

    fn in_range(self) -> bool {
        true
    }
}

impl Channel for f64 {
    const OPAQUE: Self = 1.0;

    fn in_range(self) -> bool {
        (0.0..=1.0).contains(&self)
    }
}

/// Constant or time-tagged color samples in one channel encoding.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorSamples<C>(Samples<[C; 4]>);

/// Byte-range colors, serialized under `rgba`.
pub type Rgba = ColorSamples<u8>;

/// Unit-range colors, serialized under `rgbaf`.
pub type Rgbaf = ColorSamples<f64>;

impl<C: Channel> ColorSamples<C> {
    /// A fixed color. Channels outside the encoding's range are rejected.
    pub fn constant(r: C, g: C, b: C, a: C) -> Result<Self> {
        Self::checked(Samples::Constant([r, g, b, a]))
    }

    /// A series of colors; it must not be empty.
    pub fn time_tagged(samples: Vec<Sample<[C; 4]>>) -> Result<Self> {
        Self::checked(Samples::TimeTagged(samples))
    }

    /// Decode a flat JSON array according to the shape table above.
    pub fn from_values(values: &[Value]) -> Result<Self> {
        let samples: Samples<[C; 4]> = if values.len() == 3 {
            let mut rgba = values.to_vec();
            rgba.push(C::OPAQUE.to_json());
            Samples::decode(&rgba, CzmlError::InvalidColorShape)?
        } else {
            Samples::decode(values, CzmlError::InvalidColorShape)?
        };
        Self::checked(samples)
    }

    fn checked(samples: Samples<[C; 4]>) -> Result<Self> {
        let samples = samples.validate(CzmlError::InvalidColorShape)?;
        if let Some(bad) = samples
            .values()
            .iter()
            .flatten()
            .find(|channel| !channel.in_range())
        {
            return Err(CzmlError::InvalidColorShape(format!(
                "channel value {:?} out of range",
                bad
            )));
        }
        Ok(ColorSamples(samples))
    }

    pub fn samples(&self) -> &Samples<[C; 4]> {
        &self.0
    }

    pub fn to_flat(&self) -> Vec<Value> {
        self.0.encode()
    }
}

impl Rgba {
    /// Byte channels are always in range, so this cannot fail.
    pub fn bytes(r: u8, g: u8, b: u8, a: u8) -> Self {
        ColorSamples(Samples::Constant([r, g, b, a]))
    }

    /// Byte color from a web hex string.
    ///
    /// # Example
    /// ```
    /// use czml::color::{Rgba, DEFAULT_HEX_OPACITY};
    ///
    /// let color = Rgba::from_hex("#AABBCCDD", DEFAULT_HEX_OPACITY).unwrap();
    /// assert_eq!(color.samples().constant(), Some(&[170, 187, 204, 221]));
    /// ```
    pub fn from_hex(text: &str, opacity: u8) -> Result<Self> {
        let [r, g, b, a] = hexcolor_to_rgba(text, opacity)?;
        Ok(Self::bytes(r, g, b, a))
    }
}

impl<C: Channel> PropertyValue for ColorSamples<C> {
    const EXPECTED: &'static str = "a color array";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        match value {
            Value::Array(values) => ColorSamples::from_values(&values),
            other => Err(CzmlError::InvalidColorShape(format!(
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

/// Convert a web hex color `[#]RGB[A]` or `[#]RRGGBB[AA]` to byte channels.
///
/// Forms without alpha take `opacity`. Any other length, or a non-hex digit,
/// fails with [`CzmlError::InvalidColorShape`].
pub fn hexcolor_to_rgba(text: &str, opacity: u8) -> Result<[u8; 4]> {
    let digits = text.trim();
    let digits = digits.strip_prefix('#').unwrap_or(digits);

    let invalid = || {
        CzmlError::InvalidColorShape(format!("{:?} is not in #RRGGBB[AA] format", text))
    };
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return Err(invalid()),
    };

    let mut channels = [opacity; 4];
    for (slot, pair) in channels.iter_mut().zip(expanded.as_bytes().chunks(2)) {
        let pair = std::str::from_utf8(pair).map_err(|_| invalid())?;
        *slot = u8::from_str_radix(pair, 16).map_err(|_| invalid())?;
    }
    Ok(channels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::TemporalValue;
    use serde_json::json;

    fn array(v: Value) -> Vec<Value> {
        v.as_array().cloned().unwrap()
    }

    #[test]
    fn test_three_channels_default_to_opaque() {
        let rgba = Rgba::from_values(&array(json!([1, 2, 3]))).unwrap();
        assert_eq!(rgba.samples(), &Samples::Constant([1, 2, 3, 255]));

        let rgbaf = Rgbaf::from_values(&array(json!([0.1, 0.2, 0.3]))).unwrap();
        assert_eq!(rgbaf.samples(), &Samples::Constant([0.1, 0.2, 0.3, 1.0]));
    }

    #[test]
    fn test_constant_round_trip() {
        let rgba = Rgba::from_json("rgba", json!([0, 255, 127, 55])).unwrap();
        assert_eq!(rgba.to_json(), json!([0, 255, 127, 55]));
    }

    #[test]
    fn test_time_tagged_samples() {
        let rgba = Rgba::from_values(&array(json!([0, 1, 2, 3, 4]))).unwrap();
        match rgba.samples() {
            Samples::TimeTagged(list) => {
                assert_eq!(list[0].time, TemporalValue::Offset(0.0));
                assert_eq!(list[0].value, [1, 2, 3, 4]);
            }
            other => panic!("expected samples, got {:?}", other),
        }

        let rgbaf = Rgbaf::from_values(&array(json!([
            0, 0.1, 0.2, 0.3, 0.4,
            1, 0.5, 0.6, 0.7, 0.8
        ])))
        .unwrap();
        assert_eq!(rgbaf.samples().len(), 2);
        assert_eq!(rgbaf.to_flat().len(), 10);
    }

    #[test]
    fn test_bad_shapes_and_ranges() {
        for input in [json!([1, 2]), json!([1, 2, 3, 4, 5, 6]), json!([1, 2, 300])] {
            assert!(matches!(
                Rgba::from_values(&array(input)),
                Err(CzmlError::InvalidColorShape(_))
            ));
        }
        assert!(matches!(
            Rgbaf::from_values(&array(json!([0.5, 0.5, 1.5]))),
            Err(CzmlError::InvalidColorShape(_))
        ));
        assert!(Rgba::from_json("rgba", json!("red")).is_err());
    }

    #[test]
    fn test_built_colors_must_load_back() {
        assert!(matches!(
            Rgbaf::constant(2.0, -1.0, 0.5, 1.0),
            Err(CzmlError::InvalidColorShape(_))
        ));
        assert!(Rgbaf::constant(f64::NAN, 0.0, 0.0, 1.0).is_err());
        assert!(matches!(
            Rgba::time_tagged(vec![]),
            Err(CzmlError::InvalidColorShape(_))
        ));
        assert!(Rgbaf::time_tagged(vec![Sample::new(0.0, [0.0, 0.0, 1.5, 1.0])]).is_err());

        let rgbaf = Rgbaf::constant(0.25, 0.5, 0.75, 1.0).unwrap();
        assert_eq!(Rgbaf::from_json("rgbaf", rgbaf.to_json()).unwrap(), rgbaf);
        assert_eq!(Rgba::bytes(1, 2, 3, 4).to_json(), json!([1, 2, 3, 4]));
    }

    #[test]
    fn test_byte_channels_are_integers() {
        let rgba = Rgba::from_values(&array(json!([10.7, 20.2, 30.0, 40.9]))).unwrap();
        assert_eq!(rgba.to_json(), json!([10, 20, 30, 40]));
    }

    #[test]
    fn test_hex_forms() {
        assert_eq!(hexcolor_to_rgba("AABBCCDD", 0x3c).unwrap(), [170, 187, 204, 221]);
        assert_eq!(hexcolor_to_rgba("#aabbcc", 0x3c).unwrap(), [170, 187, 204, 60]);
        assert_eq!(hexcolor_to_rgba("abc", 0x3c).unwrap(), [170, 187, 204, 60]);
        assert_eq!(hexcolor_to_rgba("abcd", 0x3c).unwrap(), [170, 187, 204, 221]);
        assert_eq!(hexcolor_to_rgba(" #abc ", 0xff).unwrap(), [170, 187, 204, 255]);
    }

    #[test]
    fn test_hex_rejects_bad_input() {
        for input in ["ab", "abcde", "#ggg", "", "#"] {
            assert!(matches!(
                hexcolor_to_rgba(input, 0x3c),
                Err(CzmlError::InvalidColorShape(_))
            ));
        }
    }
}
