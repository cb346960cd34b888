//! Keyed object codec, `{}`/`{n}` descriptor kind.

use log::warn;
use serde_json::{Map, Value};

use crate::color::{Channel, Rgba};
use crate::format::ColorParseError;

/// Codec for colors carried as an object keyed by component letter,
/// e.g. `{"r": 59, "g": 130, "b": 246}`.
///
/// With `normalized` set, color channels are already 0.0–1.0 on the wire
/// and pass through unscaled; otherwise they are 0–255. Alpha is always
/// 0.0–1.0 in either mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectColorFormat {
    channels: Vec<Channel>,
    normalized: bool,
}

impl ObjectColorFormat {
    pub fn new(channels: Vec<Channel>, normalized: bool) -> Self {
        Self {
            channels,
            normalized,
        }
    }

    /// The channels this codec reads and writes, in descriptor order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Whether wire values are 0.0–1.0 rather than 0–255.
    pub fn is_normalized(&self) -> bool {
        self.normalized
    }

    /// Decode an object into RGBA. Non-object input logs a warning and
    /// yields opaque black; missing or non-numeric entries read as 0.
    pub fn parse(&self, value: &Value) -> Rgba {
        match self.try_parse(value) {
            Ok(rgba) => rgba,
            Err(err) => {
                warn!("object color {value}: {err}");
                Rgba::BLACK
            }
        }
    }

    fn try_parse(&self, value: &Value) -> Result<Rgba, ColorParseError> {
        let empty = Map::new();
        let entries = match value {
            Value::Null => &empty,
            Value::Object(map) => map,
            _ => return Err(ColorParseError::NotAnObject),
        };

        let mut rgba = Rgba::BLACK;
        for &channel in &self.channels {
            let raw = entries
                .get(channel.key())
                .and_then(Value::as_f64)
                .unwrap_or(0.0);
            let scaled = if channel.is_alpha() || self.normalized {
                raw
            } else {
                raw / 255.0
            };
            rgba.set_channel(channel, scaled);
        }
        Ok(rgba)
    }

    /// Encode RGBA as an object keyed by component letter.
    pub fn format(&self, rgba: &Rgba) -> Value {
        let mut entries = Map::with_capacity(self.channels.len());
        for &channel in &self.channels {
            let v = rgba.channel(channel);
            let encoded = if channel.is_alpha() || self.normalized {
                Value::from(if v.is_finite() { v } else { 0.0 })
            } else {
                Value::from((v * 255.0).round() as u8)
            };
            entries.insert(channel.key().to_string(), encoded);
        }
        Value::Object(entries)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::color::Channel::{A, B, G, R};

    #[test]
    fn reads_components_by_letter() {
        let codec = ObjectColorFormat::new(vec![R, G, B], false);
        let rgba = codec.parse(&json!({"r": 10, "g": 20, "b": 30}));
        assert_eq!(rgba, Rgba::new(10.0 / 255.0, 20.0 / 255.0, 30.0 / 255.0, 1.0));
    }

    #[test]
    fn normalized_values_pass_through() {
        let codec = ObjectColorFormat::new(vec![R, G, B], true);
        let rgba = codec.parse(&json!({"r": 0.25, "g": 0.5, "b": 0.75}));
        assert_eq!(rgba, Rgba::new(0.25, 0.5, 0.75, 1.0));
    }

    #[test]
    fn missing_keys_read_as_zero() {
        let codec = ObjectColorFormat::new(vec![R, G, B], false);
        assert_eq!(codec.parse(&json!({"g": 255})), Rgba::new(0.0, 1.0, 0.0, 1.0));
    }

    #[test]
    fn alpha_never_scales() {
        let codec = ObjectColorFormat::new(vec![R, G, B, A], false);
        let input = json!({"r": 255, "g": 0, "b": 0, "a": 0.5});
        let rgba = codec.parse(&input);
        assert_eq!(rgba.a, 0.5);
        assert_eq!(codec.format(&rgba), input);
    }

    #[test]
    fn format_only_writes_descriptor_components() {
        let codec = ObjectColorFormat::new(vec![R, G], false);
        assert_eq!(
            codec.format(&Rgba::new(1.0, 0.5, 0.25, 1.0)),
            json!({"r": 255, "g": 128})
        );
    }

    #[test]
    fn non_object_degrades_to_black() {
        let codec = ObjectColorFormat::new(vec![R, G, B], false);
        assert_eq!(codec.parse(&json!([255, 0, 0])), Rgba::BLACK);
    }
}
