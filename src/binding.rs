//! Value binding — the get/set indirection between a control and wherever
//! its value actually lives.
//!
//! A control's value either sits directly in the model ([`ValueSlot`]) or is
//! proxied onto a property of an external target object. Reads prefer the
//! target when the property exists on it; writes always go to the target
//! when one is configured. An optional [`ValueCodec`] translates between the
//! control-facing value and the stored representation on both paths.
//!
//! Color controls consume this through the format codecs; every other
//! control type in the surrounding widget layer uses the same contract.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// String-keyed property access on a bound target object.
///
/// The binding layer assumes nothing about the target beyond this; the
/// widget layer owns object identity and lifetime.
pub trait PropertyAccess<V> {
    /// Whether `key` currently exists on the target.
    fn contains(&self, key: &str) -> bool;
    /// Current value of `key`, if present.
    fn get(&self, key: &str) -> Option<V>;
    /// Write `value` under `key`, inserting it if absent.
    fn set(&mut self, key: &str, value: V);
}

impl<V: Clone> PropertyAccess<V> for HashMap<String, V> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<V> {
        HashMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: V) {
        self.insert(key.to_string(), value);
    }
}

impl<V: Clone> PropertyAccess<V> for BTreeMap<String, V> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<V> {
        BTreeMap::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: V) {
        self.insert(key.to_string(), value);
    }
}

impl PropertyAccess<Value> for serde_json::Map<String, Value> {
    fn contains(&self, key: &str) -> bool {
        self.contains_key(key)
    }

    fn get(&self, key: &str) -> Option<Value> {
        serde_json::Map::get(self, key).cloned()
    }

    fn set(&mut self, key: &str, value: Value) {
        self.insert(key.to_string(), value);
    }
}

/// Translates between the control-facing value and its stored
/// representation. Either direction may be lossy (quantizing codecs are the
/// typical case).
pub trait ValueCodec<V> {
    /// Control-facing value → stored representation.
    fn encode(&self, value: V) -> V;
    /// Stored representation → control-facing value.
    fn decode(&self, value: V) -> V;
}

/// Direct storage slot for a bound value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueSlot<V> {
    /// Plain stored value; writes replace it.
    Writable(V),
    /// Computed or otherwise guarded value; writes are silently ignored.
    ReadOnly(V),
}

impl<V> ValueSlot<V> {
    /// The stored value, regardless of writability.
    pub fn get(&self) -> &V {
        match self {
            Self::Writable(v) | Self::ReadOnly(v) => v,
        }
    }
}

/// Where a control's value lives and how to reach it.
///
/// When `target` and `property` are both set and the property exists on the
/// target, that pair is authoritative for reads; otherwise the `value` slot
/// is. Writes always go to `target[property]` when the pair is configured,
/// and to the `value` slot only while it is [`ValueSlot::Writable`].
pub struct ValueSource<V, T = HashMap<String, V>> {
    /// External owner of the value, shared with the caller.
    pub target: Option<Rc<RefCell<T>>>,
    /// Key into `target`.
    pub property: Option<String>,
    /// Direct/fallback storage.
    pub value: Option<ValueSlot<V>>,
    /// Optional translation between control-facing and stored values.
    pub codec: Option<Box<dyn ValueCodec<V>>>,
}

impl<V, T> ValueSource<V, T>
where
    V: Clone,
    T: PropertyAccess<V>,
{
    /// A source holding its value directly.
    pub fn direct(value: V) -> Self {
        Self {
            target: None,
            property: None,
            value: Some(ValueSlot::Writable(value)),
            codec: None,
        }
    }

    /// A source holding a guarded value; writes are silent no-ops.
    pub fn read_only(value: V) -> Self {
        Self {
            target: None,
            property: None,
            value: Some(ValueSlot::ReadOnly(value)),
            codec: None,
        }
    }

    /// A source proxied onto `target[property]`.
    pub fn bound(target: Rc<RefCell<T>>, property: impl Into<String>) -> Self {
        Self {
            target: Some(target),
            property: Some(property.into()),
            value: None,
            codec: None,
        }
    }

    /// Attach a fallback value slot.
    pub fn with_value(mut self, value: V) -> Self {
        self.value = Some(ValueSlot::Writable(value));
        self
    }

    /// Attach a codec.
    pub fn with_codec(mut self, codec: Box<dyn ValueCodec<V>>) -> Self {
        self.codec = Some(codec);
        self
    }

    /// Read the current value.
    ///
    /// `target[property]` when the pair is configured and the property
    /// exists on the target, else the `value` slot; decoded through the
    /// codec when one is set. `None` when no storage holds a value.
    pub fn get_value(&self) -> Option<V> {
        let raw = self.read_raw()?;
        Some(match &self.codec {
            Some(codec) => codec.decode(raw),
            None => raw,
        })
    }

    fn read_raw(&self) -> Option<V> {
        if let (Some(target), Some(property)) = (&self.target, &self.property) {
            let target = target.borrow();
            if target.contains(property) {
                return target.get(property);
            }
        }
        self.value.as_ref().map(|slot| slot.get().clone())
    }

    /// Write a new value and return what was actually stored.
    ///
    /// The value is encoded through the codec first. A configured
    /// `target`/`property` pair is always written, even when a `value` slot
    /// is also present; otherwise the slot is written unless it is
    /// [`ValueSlot::ReadOnly`] (then nothing happens). The return is
    /// [`Self::get_value`] after the write — the post-encode value as
    /// stored, round-tripped back through `decode` — so callers can
    /// reconcile UI state with what a lossy codec actually persisted.
    pub fn set_value(&mut self, value: V) -> Option<V> {
        let encoded = match &self.codec {
            Some(codec) => codec.encode(value),
            None => value,
        };
        if let (Some(target), Some(property)) = (&self.target, &self.property) {
            target.borrow_mut().set(property, encoded);
        } else {
            match &mut self.value {
                Some(ValueSlot::Writable(slot)) => *slot = encoded,
                Some(ValueSlot::ReadOnly(_)) => {}
                None => self.value = Some(ValueSlot::Writable(encoded)),
            }
        }
        self.get_value()
    }
}

impl<V: fmt::Debug, T> fmt::Debug for ValueSource<V, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueSource")
            .field("target", &self.target.as_ref().map(|_| ".."))
            .field("property", &self.property)
            .field("value", &self.value)
            .field("codec", &self.codec.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn target_with(key: &str, value: i64) -> Rc<RefCell<HashMap<String, i64>>> {
        let mut map = HashMap::new();
        map.insert(key.to_string(), value);
        Rc::new(RefCell::new(map))
    }

    #[test]
    fn target_property_wins_over_value() {
        let target = target_with("x", 5);
        let source = ValueSource::bound(Rc::clone(&target), "x").with_value(99);
        assert_eq!(source.get_value(), Some(5));
    }

    #[test]
    fn write_goes_to_target_and_leaves_value_untouched() {
        let target = target_with("x", 5);
        let mut source = ValueSource::bound(Rc::clone(&target), "x").with_value(99);

        assert_eq!(source.set_value(7), Some(7));
        assert_eq!(target.borrow().get("x").copied(), Some(7));
        assert_eq!(source.value, Some(ValueSlot::Writable(99)));
        assert_eq!(source.get_value(), Some(7));
    }

    #[test]
    fn missing_property_falls_back_to_value() {
        let target: Rc<RefCell<HashMap<String, i64>>> = Rc::new(RefCell::new(HashMap::new()));
        let source = ValueSource::bound(Rc::clone(&target), "x").with_value(3);
        assert_eq!(source.get_value(), Some(3));
    }

    #[test]
    fn write_creates_missing_target_property() {
        let target: Rc<RefCell<HashMap<String, i64>>> = Rc::new(RefCell::new(HashMap::new()));
        let mut source = ValueSource::bound(Rc::clone(&target), "x");

        assert_eq!(source.set_value(4), Some(4));
        assert_eq!(target.borrow().get("x").copied(), Some(4));
    }

    #[test]
    fn direct_value_reads_and_writes() {
        let mut source: ValueSource<i64> = ValueSource::direct(3);
        assert_eq!(source.get_value(), Some(3));
        assert_eq!(source.set_value(4), Some(4));
        assert_eq!(source.get_value(), Some(4));
    }

    #[test]
    fn read_only_value_ignores_writes() {
        let mut source: ValueSource<i64> = ValueSource::read_only(3);
        assert_eq!(source.set_value(4), Some(3));
        assert_eq!(source.get_value(), Some(3));
    }

    #[test]
    fn empty_source_reads_none_and_accepts_writes() {
        let mut source: ValueSource<i64> = ValueSource {
            target: None,
            property: None,
            value: None,
            codec: None,
        };
        assert_eq!(source.get_value(), None);
        assert_eq!(source.set_value(8), Some(8));
    }

    struct Quantize(i64);

    impl ValueCodec<i64> for Quantize {
        fn encode(&self, value: i64) -> i64 {
            (value / self.0) * self.0
        }

        fn decode(&self, value: i64) -> i64 {
            value
        }
    }

    #[test]
    fn set_returns_post_encode_value() {
        let mut source: ValueSource<i64> = ValueSource::direct(0).with_codec(Box::new(Quantize(10)));
        assert_eq!(source.set_value(47), Some(40));
        assert_eq!(source.get_value(), Some(40));
    }

    struct Scale255;

    impl ValueCodec<Value> for Scale255 {
        fn encode(&self, value: Value) -> Value {
            Value::from((value.as_f64().unwrap_or(0.0) * 255.0).round())
        }

        fn decode(&self, value: Value) -> Value {
            Value::from(value.as_f64().unwrap_or(0.0) / 255.0)
        }
    }

    #[test]
    fn codec_applies_on_both_paths_of_a_json_target() {
        let target: Rc<RefCell<serde_json::Map<String, Value>>> =
            Rc::new(RefCell::new(serde_json::Map::new()));
        let mut source =
            ValueSource::bound(Rc::clone(&target), "level").with_codec(Box::new(Scale255));

        assert_eq!(source.set_value(Value::from(0.2)), Some(Value::from(0.2)));
        assert_eq!(target.borrow().get("level").cloned(), Some(Value::from(51.0)));
        assert_eq!(source.get_value(), Some(Value::from(0.2)));
    }
}
