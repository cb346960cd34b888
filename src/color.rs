//! Color value types — the plain records the conversion and codec layers
//! operate on.
//!
//! Stores channels as f64. [`Rgb`]/[`Rgba`] channels are normalized to the
//! 0.0–1.0 range; [`Hsv`]/[`Hsl`] carry hue in degrees with the remaining
//! components normalized.

use serde::{Deserialize, Serialize};

use crate::math;

/// Color channel selector, the parsed form of a descriptor component letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Red
    R,
    /// Green
    G,
    /// Blue
    B,
    /// Alpha
    A,
}

impl Channel {
    /// Parse a component letter (`r`, `g`, `b` or `a`).
    pub fn from_letter(c: char) -> Option<Self> {
        match c {
            'r' => Some(Self::R),
            'g' => Some(Self::G),
            'b' => Some(Self::B),
            'a' => Some(Self::A),
            _ => None,
        }
    }

    /// The component letter this channel was parsed from.
    pub fn letter(self) -> char {
        match self {
            Self::R => 'r',
            Self::G => 'g',
            Self::B => 'b',
            Self::A => 'a',
        }
    }

    /// Component key for object-shaped color values.
    pub fn key(self) -> &'static str {
        match self {
            Self::R => "r",
            Self::G => "g",
            Self::B => "b",
            Self::A => "a",
        }
    }

    /// Whether this is the alpha channel. Alpha always carries unit
    /// semantics and is never scaled by 255.
    pub fn is_alpha(self) -> bool {
        matches!(self, Self::A)
    }
}

/// RGB color with components in the 0.0–1.0 range. No alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rgb {
    /// Red component (0.0–1.0).
    pub r: f64,
    /// Green component (0.0–1.0).
    pub g: f64,
    /// Blue component (0.0–1.0).
    pub b: f64,
}

impl Rgb {
    pub fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Create from 0–255 channel values.
    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
        }
    }

    /// Convert to a 0–255 channel tuple, rounding each channel.
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        (
            (self.r * 255.0).round() as u8,
            (self.g * 255.0).round() as u8,
            (self.b * 255.0).round() as u8,
        )
    }

    /// Attach an alpha component.
    pub fn with_alpha(self, a: f64) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }

    /// Convert to HSV.
    pub fn to_hsv(self) -> Hsv {
        math::rgb_to_hsv(self)
    }
}

/// RGBA color with components in the 0.0–1.0 range.
///
/// This is the canonical representation every format codec parses into and
/// formats out of.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    /// Red component (0.0–1.0).
    pub r: f64,
    /// Green component (0.0–1.0).
    pub g: f64,
    /// Blue component (0.0–1.0).
    pub b: f64,
    /// Alpha component (0.0 = transparent, 1.0 = opaque).
    pub a: f64,
}

impl Default for Rgba {
    fn default() -> Self {
        Self::BLACK
    }
}

impl From<Rgb> for Rgba {
    fn from(rgb: Rgb) -> Self {
        rgb.with_alpha(1.0)
    }
}

impl Rgba {
    /// Opaque black, the fallback every codec degrades to on unparseable
    /// input.
    pub const BLACK: Self = Self {
        r: 0.0,
        g: 0.0,
        b: 0.0,
        a: 1.0,
    };

    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// The color channels without alpha.
    pub fn rgb(self) -> Rgb {
        Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }

    /// Read a single channel.
    pub fn channel(self, channel: Channel) -> f64 {
        match channel {
            Channel::R => self.r,
            Channel::G => self.g,
            Channel::B => self.b,
            Channel::A => self.a,
        }
    }

    /// Write a single channel.
    pub fn set_channel(&mut self, channel: Channel, value: f64) {
        match channel {
            Channel::R => self.r = value,
            Channel::G => self.g = value,
            Channel::B => self.b = value,
            Channel::A => self.a = value,
        }
    }
}

/// HSV color. Hue in degrees (0–360), saturation and value 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsv {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation (0.0–1.0).
    pub s: f64,
    /// Value/brightness (0.0–1.0).
    pub v: f64,
}

impl Hsv {
    pub fn new(h: f64, s: f64, v: f64) -> Self {
        Self { h, s, v }
    }

    /// Convert to RGB.
    pub fn to_rgb(self) -> Rgb {
        math::hsv_to_rgb(self)
    }

    /// Convert to HSL.
    pub fn to_hsl(self) -> Hsl {
        math::hsv_to_hsl(self)
    }
}

/// HSL color. Hue in degrees (0–360), saturation and lightness 0.0–1.0.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation (0.0–1.0).
    pub s: f64,
    /// Lightness (0.0–1.0).
    pub l: f64,
}

impl Hsl {
    pub fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Convert to HSV.
    pub fn to_hsv(self) -> Hsv {
        math::hsl_to_hsv(self)
    }
}
