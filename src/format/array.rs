//! Flat numeric array codec, `[]`/`[n]` descriptor kind.

use log::warn;
use serde_json::Value;

use crate::color::{Channel, Rgba};
use crate::format::ColorParseError;

/// Codec for colors carried as a flat array matched positionally to the
/// descriptor components.
///
/// With `normalized` set, color channels are already 0.0–1.0 on the wire
/// and pass through unscaled; otherwise they are 0–255. Alpha is always
/// 0.0–1.0 in either mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayColorFormat {
    channels: Vec<Channel>,
    normalized: bool,
}

impl ArrayColorFormat {
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

    /// Decode an array into RGBA. Non-array input logs a warning and yields
    /// opaque black; missing or non-numeric entries read as 0.
    pub fn parse(&self, value: &Value) -> Rgba {
        match self.try_parse(value) {
            Ok(rgba) => rgba,
            Err(err) => {
                warn!("array color {value}: {err}");
                Rgba::BLACK
            }
        }
    }

    fn try_parse(&self, value: &Value) -> Result<Rgba, ColorParseError> {
        const EMPTY: &[Value] = &[];
        let items = match value {
            Value::Null => EMPTY,
            Value::Array(items) => items.as_slice(),
            _ => return Err(ColorParseError::NotAnArray),
        };

        let mut rgba = Rgba::BLACK;
        for (i, &channel) in self.channels.iter().enumerate() {
            let raw = items.get(i).and_then(Value::as_f64).unwrap_or(0.0);
            let scaled = if channel.is_alpha() || self.normalized {
                raw
            } else {
                raw / 255.0
            };
            rgba.set_channel(channel, scaled);
        }
        Ok(rgba)
    }

    /// Encode RGBA as an array in descriptor order.
    pub fn format(&self, rgba: &Rgba) -> Value {
        Value::Array(
            self.channels
                .iter()
                .map(|&channel| {
                    let v = rgba.channel(channel);
                    if channel.is_alpha() || self.normalized {
                        Value::from(if v.is_finite() { v } else { 0.0 })
                    } else {
                        Value::from((v * 255.0).round() as u8)
                    }
                })
                .collect(),
        )
    }
}
