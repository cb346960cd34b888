//! Packed integer codec, `0x`-descriptor kind.

use log::warn;
use serde_json::Value;

use crate::color::{Channel, Rgba};
use crate::format::ColorParseError;

/// Codec for colors packed into a single integer, 8 bits per component.
///
/// The first descriptor component occupies the least significant byte, the
/// last the most significant: `0xrgba` unpacks `0x40102030` as
/// `r = 0x30, g = 0x20, b = 0x10, a = 0x40`. This byte order is a
/// compatibility contract with existing callers; do not "fix" it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumberColorFormat {
    channels: Vec<Channel>,
}

impl NumberColorFormat {
    pub fn new(channels: Vec<Channel>) -> Self {
        Self { channels }
    }

    /// The channels this codec reads and writes, in descriptor order.
    pub fn channels(&self) -> &[Channel] {
        &self.channels
    }

    /// Decode a packed integer into RGBA. Non-integer input logs a warning
    /// and yields opaque black.
    pub fn parse(&self, value: &Value) -> Rgba {
        match self.try_parse(value) {
            Ok(rgba) => rgba,
            Err(err) => {
                warn!("packed color {value}: {err}");
                Rgba::BLACK
            }
        }
    }

    fn try_parse(&self, value: &Value) -> Result<Rgba, ColorParseError> {
        let packed = match value {
            Value::Null => 0,
            Value::Number(_) => value
                .as_u64()
                .or_else(|| value.as_f64().map(|f| f as u64))
                .ok_or(ColorParseError::NotAnInteger)?,
            _ => return Err(ColorParseError::NotAnInteger),
        };

        let mut rgba = Rgba::BLACK;
        for (i, &channel) in self.channels.iter().enumerate() {
            let byte = (packed >> (i * 8)) & 0xff;
            rgba.set_channel(channel, byte as f64 / 255.0);
        }
        Ok(rgba)
    }

    /// Encode RGBA as a packed integer, inverse of [`Self::parse`].
    pub fn format(&self, rgba: &Rgba) -> Value {
        let mut packed: u64 = 0;
        for (i, &channel) in self.channels.iter().enumerate() {
            let v = rgba.channel(channel);
            let byte = if v.is_finite() {
                (v * 255.0).round().clamp(0.0, 255.0) as u64
            } else {
                0
            };
            packed |= byte << (i * 8);
        }
        Value::from(packed)
    }
}
