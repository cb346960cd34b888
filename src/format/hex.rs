//! Hex string codec — the default format kind.

use log::warn;
use serde_json::Value;

use crate::color::{Channel, Rgba};
use crate::format::ColorParseError;

/// Codec for hex color strings such as `"#3b82f6"`.
///
/// Parsing takes the first run of hex digits in the input, so a leading `#`
/// (or any other noise) is tolerated. Shorthand input with one digit per
/// component (`"#f00"`) is expanded by doubling each digit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HexStringFormat {
    channels: Vec<Channel>,
}

impl HexStringFormat {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// The channels this codec reads and writes, in descriptor order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Decode a hex string into RGBA. Malformed input logs a warning and
    /// yields opaque black.
    pub fn parse(&self, value: &Value) -> Rgba {
        match self.try_parse(value) {
            Ok(rgba) => rgba,
            Err(err) => {
                warn!("hex color {value}: {err}");
                Rgba::BLACK
            }
        }
    }

    fn try_parse(&self, value: &Value) -> Result<Rgba, ColorParseError> {
        let text = match value {
            Value::Null => "#000",
            Value::String(s) => s.as_str(),
            _ => return Err(ColorParseError::NotAString),
        };
        let run = first_hex_run(text).ok_or(ColorParseError::NoHexDigits)?;

        // One digit per component is shorthand: #f00 -> #ff0000.
        let digits: String = if run.len() == self.channels.len() {
            run.chars().flat_map(|c| [c, c]).collect()
        } else {
            run.to_string()
        };

        let mut rgba = Rgba::BLACK;
        for (i, &channel) in self.channels.iter().enumerate() {
            let byte = digits
                .get(i * 2..i * 2 + 2)
                .and_then(|pair| u8::from_str_radix(pair, 16).ok())
                .unwrap_or(0);
            rgba.set_channel(channel, byte as f64 / 255.0);
        }
        Ok(rgba)
    }

    /// Encode RGBA as a `#`-prefixed lowercase hex string, two digits per
    /// channel in descriptor order.
    pub fn format(&self, rgba: &Rgba) -> Value {
        let mut out = String::with_capacity(1 + self.channels.len() * 2);
        out.push('#');
        for &channel in &self.channels {
            let byte = (rgba.channel(channel) * 255.0).round() as u8;
            out.push_str(&format!("{byte:02x}"));
        }
        Value::String(out)
    }
}

/// First maximal run of ascii hex digits in `text`.
fn first_hex_run(text: &str) -> Option<&str> {
    let start = text.find(|c: char| c.is_ascii_hexdigit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_hexdigit())
        .unwrap_or(rest.len());
    Some(&rest[..end])
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::color::Channel::{A, B, G, R};

    fn rgb_codec() -> HexStringFormat {
        HexStringFormat::new(vec![R, G, B])
    }

    #[test]
    fn parses_six_digit_hex() {
        let rgba = rgb_codec().parse(&json!("#102030"));
        assert_eq!(
            rgba,
            Rgba::new(0x10 as f64 / 255.0, 0x20 as f64 / 255.0, 0x30 as f64 / 255.0, 1.0)
        );
    }

    #[test]
    fn parses_without_hash_prefix() {
        assert_eq!(rgb_codec().parse(&json!("102030")), rgb_codec().parse(&json!("#102030")));
    }

    #[test]
    fn expands_shorthand() {
        let rgba = rgb_codec().parse(&json!("#123"));
        assert_eq!(
            rgba,
            Rgba::new(0x11 as f64 / 255.0, 0x22 as f64 / 255.0, 0x33 as f64 / 255.0, 1.0)
        );
    }

    #[test]
    fn parses_alpha_component() {
        let codec = HexStringFormat::new(vec![R, G, B, A]);
        let rgba = codec.parse(&json!("#10203040"));
        assert_eq!(rgba.a, 0x40 as f64 / 255.0);
    }

    #[test]
    fn format_round_trips() {
        let codec = rgb_codec();
        let rgba = codec.parse(&json!("#102030"));
        assert_eq!(codec.format(&rgba), json!("#102030"));
    }

    #[test]
    fn uppercase_input_formats_lowercase() {
        let codec = rgb_codec();
        assert_eq!(codec.format(&codec.parse(&json!("#A0B0C0"))), json!("#a0b0c0"));
    }

    #[test]
    fn truncated_input_zero_fills_missing_components() {
        let rgba = rgb_codec().parse(&json!("#1020"));
        assert_eq!(rgba.b, 0.0);
        assert_eq!(rgba.r, 0x10 as f64 / 255.0);
    }

    #[test]
    fn garbage_degrades_to_black() {
        assert_eq!(rgb_codec().parse(&json!("not a color, sorry")), Rgba::BLACK);
        assert_eq!(rgb_codec().parse(&json!(["#102030"])), Rgba::BLACK);
    }

    #[test]
    fn null_is_black() {
        assert_eq!(rgb_codec().parse(&Value::Null), Rgba::BLACK);
    }
}
