//! Pluggable color format codecs.
//!
//! A short descriptor string selects how a color value travels on the wire:
//!
//! | Descriptor | Kind | Example value |
//! |---|---|---|
//! | `"rgb"`, `"#rgba"` | hex string (default) | `"#3b82f6"` |
//! | `"rgb()"`, `"rgba()"` | css function string | `"rgb(59, 130, 246)"` |
//! | `"0xrgb"` | packed integer | `0x3b82f6` |
//! | `"[]rgb"`, `"[n]rgba"` | numeric array | `[59, 130, 246]` |
//! | `"{}rgb"`, `"{n}rgb"` | keyed object | `{"r": 59, "g": 130, "b": 246}` |
//!
//! The component letters fix field order in array/number encodings and
//! component order in string encodings. The `n` marker on array/object kinds
//! means color channels are expressed in 0.0–1.0 instead of 0–255; alpha is
//! always 0.0–1.0 in those kinds regardless of the marker.
//!
//! Every codec parses into canonical [`Rgba`] and formats back out of it.
//! `parse` never fails: malformed input is logged and degrades to opaque
//! black so live-typed partial input cannot take down a render cycle.

mod array;
mod css;
mod hex;
mod number;
mod object;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use thiserror::Error;

use crate::color::{Channel, Rgba};

pub use array::ArrayColorFormat;
pub use css::CssStringFormat;
pub use hex::HexStringFormat;
pub use number::NumberColorFormat;
pub use object::ObjectColorFormat;

/// Why a color value could not be decoded.
///
/// Never escapes the parse boundary; it only feeds the warning emitted when
/// a codec falls back to opaque black.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ColorParseError {
    #[error("expected a string value")]
    NotAString,
    #[error("no hex digits in input")]
    NoHexDigits,
    #[error("expected an integer value")]
    NotAnInteger,
    #[error("expected an array value")]
    NotAnArray,
    #[error("expected an object value")]
    NotAnObject,
}

/// A color format codec resolved from a descriptor string.
///
/// The descriptor is parsed exactly once, when the codec is constructed;
/// `parse`/`format` dispatch on the already-classified kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ColorFormat {
    /// Hex string, e.g. `"#3b82f6"`.
    Hex(HexStringFormat),
    /// CSS function string, e.g. `"rgba(59, 130, 246, 0.5)"`.
    Css(CssStringFormat),
    /// Packed integer, e.g. `0x3b82f6`.
    Number(NumberColorFormat),
    /// Flat numeric array, e.g. `[59, 130, 246]`.
    Array(ArrayColorFormat),
    /// Object keyed by component letter.
    Object(ObjectColorFormat),
}

impl ColorFormat {
    /// Classify a descriptor string and construct the matching codec.
    ///
    /// Kind precedence: array bracket pattern, object brace pattern, `0x`
    /// prefix, trailing `()`, otherwise the hex-string default. An unknown
    /// kind therefore falls back to hex, never an error.
    pub fn from_descriptor(descriptor: &str) -> Self {
        let channels = descriptor_channels(descriptor);
        if descriptor.contains("[]") || descriptor.contains("[n]") {
            Self::Array(ArrayColorFormat::new(channels, descriptor.contains("[n]")))
        } else if descriptor.contains("{}") || descriptor.contains("{n}") {
            Self::Object(ObjectColorFormat::new(channels, descriptor.contains("{n}")))
        } else if descriptor.contains("0x") {
            Self::Number(NumberColorFormat::new(channels))
        } else if descriptor.contains("()") {
            Self::Css(CssStringFormat::new(channels))
        } else {
            Self::Hex(HexStringFormat::new(channels))
        }
    }

    /// Decode a wire value into canonical RGBA.
    ///
    /// Total: unparseable input logs a warning and yields [`Rgba::BLACK`].
    pub fn parse(&self, value: &Value) -> Rgba {
        match self {
            Self::Hex(f) => f.parse(value),
            Self::Css(f) => f.parse(value),
            Self::Number(f) => f.parse(value),
            Self::Array(f) => f.parse(value),
            Self::Object(f) => f.parse(value),
        }
    }

    /// Encode canonical RGBA into the wire representation.
    pub fn format(&self, rgba: &Rgba) -> Value {
        match self {
            Self::Hex(f) => f.format(rgba),
            Self::Css(f) => f.format(rgba),
            Self::Number(f) => f.format(rgba),
            Self::Array(f) => f.format(rgba),
            Self::Object(f) => f.format(rgba),
        }
    }

    /// The channels this codec reads and writes, in descriptor order.
    pub fn channels(&self) -> &[Channel] {
        match self {
            Self::Hex(f) => f.channels(),
            Self::Css(f) => f.channels(),
            Self::Number(f) => f.channels(),
            Self::Array(f) => f.channels(),
            Self::Object(f) => f.channels(),
        }
    }
}

/// First run of `rgba` component letters in the descriptor; `r,g,b` when
/// the descriptor names none.
fn descriptor_channels(descriptor: &str) -> Vec<Channel> {
    let mut channels = Vec::new();
    for c in descriptor.chars() {
        match Channel::from_letter(c) {
            Some(channel) => channels.push(channel),
            None if channels.is_empty() => continue,
            None => break,
        }
    }
    if channels.is_empty() {
        channels = vec![Channel::R, Channel::G, Channel::B];
    }
    channels
}

/// Resolves descriptor strings to shared codec instances.
///
/// The cache is keyed by the exact descriptor string, populated lazily and
/// never evicted. Distinct descriptors that denote equivalent formats
/// (`"rgb"` vs `"#rgb"`) resolve to distinct instances; the cache does not
/// deduplicate them. Owned by whatever top-level context builds the control
/// tree, so tests can reset it.
#[derive(Debug, Default)]
pub struct FormatRegistry {
    cache: RefCell<HashMap<String, Rc<ColorFormat>>>,
}

impl FormatRegistry {
    /// Descriptor assumed when a model does not name one.
    pub const DEFAULT_DESCRIPTOR: &'static str = "rgb";

    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a descriptor to its codec, constructing and caching it on
    /// first use. Repeat calls with the same string return the same
    /// instance.
    pub fn resolve(&self, descriptor: &str) -> Rc<ColorFormat> {
        if let Some(hit) = self.cache.borrow().get(descriptor) {
            return Rc::clone(hit);
        }
        let codec = Rc::new(ColorFormat::from_descriptor(descriptor));
        self.cache
            .borrow_mut()
            .insert(descriptor.to_string(), Rc::clone(&codec));
        codec
    }

    /// Resolve the default `"rgb"` descriptor.
    pub fn resolve_default(&self) -> Rc<ColorFormat> {
        self.resolve(Self::DEFAULT_DESCRIPTOR)
    }

    /// Number of cached codecs.
    pub fn len(&self) -> usize {
        self.cache.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.borrow().is_empty()
    }

    /// Drop every cached codec.
    pub fn clear(&self) {
        self.cache.borrow_mut().clear();
    }
}
