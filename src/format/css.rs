//! CSS function string codec, `rgb(..)` / `rgba(..)` style.

use log::warn;
use serde_json::Value;

use crate::color::{Channel, Rgba};
use crate::format::ColorParseError;

/// Codec for CSS function strings such as `"rgba(59, 130, 246, 0.5)"`.
///
/// Values map positionally onto the descriptor components. Color channels
/// are 0–255 on the wire; alpha keeps its 0.0–1.0 unit range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CssStringFormat {
    channels: Vec<Channel>,
}

impl CssStringFormat {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// The channels this codec reads and writes, in descriptor order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Decode a css function string into RGBA. Malformed input logs a
    /// warning and yields opaque black; unparseable list entries read as 0.
    pub fn parse(&self, value: &Value) -> Rgba {
        match self.try_parse(value) {
            Ok(rgba) => rgba,
            Err(err) => {
                warn!("css color {value}: {err}");
                Rgba::BLACK
            }
        }
    }

    fn try_parse(&self, value: &Value) -> Result<Rgba, ColorParseError> {
        let text = match value {
            Value::Null => "rgba(0, 0, 0)",
            Value::String(s) => s.as_str(),
            _ => return Err(ColorParseError::NotAString),
        };

        // Strip the function wrapper, leaving the bare comma list.
        let list: String = text
            .chars()
            .filter(|c| !matches!(c.to_ascii_lowercase(), 'r' | 'g' | 'b' | 'a' | '(' | ')'))
            .collect();

        let mut rgba = Rgba::BLACK;
        let mut parts = list.split(',');
        for &channel in &self.channels {
            let raw = parts
                .next()
                .and_then(|p| p.trim().parse::<f64>().ok())
                .unwrap_or(0.0);
            let scaled = if channel.is_alpha() { raw } else { raw / 255.0 };
            rgba.set_channel(channel, scaled);
        }
        Ok(rgba)
    }

    /// Encode RGBA as `"rgb(..)"`/`"rgba(..)"` with the component letters as
    /// the function name. Color channels are rounded to 0–255; alpha is
    /// written unrounded.
    pub fn format(&self, rgba: &Rgba) -> Value {
        let name: String = self.channels.iter().map(|c| c.letter()).collect();
        let list = self
            .channels
            .iter()
            .map(|&channel| {
                let v = rgba.channel(channel);
                if channel.is_alpha() {
                    format!("{v}")
                } else {
                    format!("{}", (v * 255.0).round() as u8)
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        Value::String(format!("{name}({list})"))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::color::Channel::{A, B, G, R};

    fn rgba_codec() -> CssStringFormat {
        CssStringFormat::new(vec![R, G, B, A])
    }

    #[test]
    fn parses_rgb_function() {
        let codec = CssStringFormat::new(vec![R, G, B]);
        let rgba = codec.parse(&json!("rgb(255, 0, 16)"));
        assert_eq!(rgba, Rgba::new(1.0, 0.0, 16.0 / 255.0, 1.0));
    }

    #[test]
    fn alpha_keeps_unit_range() {
        let rgba = rgba_codec().parse(&json!("rgba(255, 255, 255, 0.5)"));
        assert_eq!(rgba.a, 0.5);
    }

    #[test]
    fn missing_entries_read_as_zero() {
        let rgba = rgba_codec().parse(&json!("rgba(16, 32)"));
        assert_eq!(rgba, Rgba::new(16.0 / 255.0, 32.0 / 255.0, 0.0, 0.0));
    }

    #[test]
    fn format_round_trips() {
        let codec = rgba_codec();
        let input = json!("rgba(16, 32, 48, 0.5)");
        assert_eq!(codec.format(&codec.parse(&input)), input);
    }

    #[test]
    fn format_writes_function_name_from_components() {
        let codec = CssStringFormat::new(vec![R, G, B]);
        assert_eq!(
            codec.format(&Rgba::new(1.0, 0.0, 0.0, 1.0)),
            json!("rgb(255, 0, 0)")
        );
    }

    #[test]
    fn non_string_degrades_to_black() {
        assert_eq!(rgba_codec().parse(&json!(42)), Rgba::BLACK);
    }
}
