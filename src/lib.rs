//! # panel-core
//!
//! Color representation and value-binding core for data-bound control
//! panels (checkboxes, sliders, color pickers and friends).
//!
//! The surrounding widget and rendering layers stay external; this crate
//! carries the three pieces they consume:
//!
//! - [`math`] — HSV↔RGB conversion (plus HSL), round-trip exact across the
//!   full 8-bit channel space.
//! - [`format`] — five interchangeable color codecs selected by a short
//!   descriptor string, with a caching [`FormatRegistry`]. Parsing is
//!   lenient: malformed live-typed input degrades to opaque black instead
//!   of failing a render cycle.
//! - [`binding`] — the get/set contract over a value that lives directly on
//!   a model or is proxied onto an external object's property, optionally
//!   through a lossy codec.
//!
//! ## Usage
//!
//! ```rust
//! use panel_core::FormatRegistry;
//! use serde_json::json;
//!
//! let registry = FormatRegistry::new();
//! let codec = registry.resolve("#rgb");
//!
//! let rgba = codec.parse(&json!("#3b82f6"));
//! assert_eq!(codec.format(&rgba), json!("#3b82f6"));
//! ```

pub mod binding;
pub mod color;
pub mod format;
pub mod math;

pub use binding::{PropertyAccess, ValueCodec, ValueSlot, ValueSource};
pub use color::{Channel, Hsl, Hsv, Rgb, Rgba};
pub use format::{
    ArrayColorFormat, ColorFormat, CssStringFormat, FormatRegistry, HexStringFormat,
    NumberColorFormat, ObjectColorFormat,
};
