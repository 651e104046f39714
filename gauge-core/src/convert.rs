//! The conversion engine
//!
//! Absolute conversion maps a point on one scale to the same point on
//! another: `base = (v - offset_from) / scale_from`, then
//! `result = base * scale_to + offset_to`.
//!
//! Delta conversion maps a difference between two points. Offsets cancel in
//! a difference, so only the scales apply: `result = v / scale_from * scale_to`.
//!
//! Collections are converted element-wise, preserving order (sequences) or
//! keys (mappings). Units are validated before any element is read, and
//! every element is validated before anything is written back.

use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::trace;

use crate::error::ConversionError;
use crate::registry::Registry;
use crate::transform::UnitTransform;
use crate::value::Value;

/// Per-call switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Treat values as intervals: ignore offsets
    pub delta: bool,
    /// Overwrite the caller's container instead of building a new one
    pub in_place: bool,
}

impl ConvertOptions {
    pub fn delta(mut self, delta: bool) -> Self {
        self.delta = delta;
        self
    }

    pub fn in_place(mut self, in_place: bool) -> Self {
        self.in_place = in_place;
        self
    }
}

/// The value a request works on
#[derive(Debug)]
pub enum RequestValue<'a> {
    /// Read-only; the result is always a new value
    Shared(&'a Value),
    /// Writable; converted in place when the request asks for it
    Exclusive(&'a mut Value),
}

impl<'a> From<&'a Value> for RequestValue<'a> {
    fn from(value: &'a Value) -> Self {
        RequestValue::Shared(value)
    }
}

impl<'a> From<&'a mut Value> for RequestValue<'a> {
    fn from(value: &'a mut Value) -> Self {
        RequestValue::Exclusive(value)
    }
}

/// One conversion call: the value, both units and the options
#[derive(Debug)]
pub struct ConversionRequest<'a> {
    pub value: RequestValue<'a>,
    pub origin: &'a str,
    pub target: &'a str,
    pub options: ConvertOptions,
}

impl<'a> ConversionRequest<'a> {
    /// `value` may be `&Value` or `&mut Value`; only the latter can be
    /// converted in place
    pub fn new(value: impl Into<RequestValue<'a>>, origin: &'a str, target: &'a str) -> Self {
        ConversionRequest {
            value: value.into(),
            origin,
            target,
            options: ConvertOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ConvertOptions) -> Self {
        self.options = options;
        self
    }
}

/// A resolved origin/target pair, ready to map numbers
#[derive(Debug, Clone, Copy)]
struct Route {
    from: UnitTransform,
    to: UnitTransform,
    identity: bool,
    delta: bool,
}

impl Route {
    fn apply(&self, value: f64) -> f64 {
        if self.identity {
            return value;
        }
        let base = self.from.to_base(value, self.delta);
        self.to.from_base(base, self.delta)
    }

    fn apply_value(&self, value: &Value, position: impl FnOnce() -> String) -> Result<f64, ConversionError> {
        match value {
            Value::Number(_) | Value::Text(_) => value.to_scalar().map(|v| self.apply(v)),
            other => Err(ConversionError::unsupported(
                other.type_name(),
                format!("{} is not a number", position()),
            )),
        }
    }

    fn apply_items(&self, items: &[Value]) -> Result<Vec<f64>, ConversionError> {
        items
            .iter()
            .enumerate()
            .map(|(i, item)| self.apply_value(item, || format!("element {}", i)))
            .collect()
    }

    fn apply_entries(&self, map: &BTreeMap<String, Value>) -> Result<Vec<f64>, ConversionError> {
        map.iter()
            .map(|(key, item)| self.apply_value(item, || format!("entry '{}'", key)))
            .collect()
    }
}

impl Registry {
    fn route(&self, origin: &str, target: &str, delta: bool) -> Result<Route, ConversionError> {
        match (self.get(origin), self.get(target)) {
            (Some(from), Some(to)) => {
                trace!(origin, target, delta, "conversion route resolved");
                Ok(Route {
                    from: *from,
                    to: *to,
                    identity: origin == target,
                    delta,
                })
            }
            _ => Err(ConversionError::unknown_unit(origin, target)),
        }
    }

    /// Convert one number from `origin` to `target`.
    ///
    /// Converting to the same unit returns `value` unchanged.
    pub fn convert(&self, value: f64, origin: &str, target: &str, delta: bool) -> Result<f64, ConversionError> {
        Ok(self.route(origin, target, delta)?.apply(value))
    }

    /// Convert any supported shape into a new value; `value` is untouched.
    ///
    /// Sequences keep their order and length, mappings keep their keys,
    /// tuples stay tuples. Converted elements are always `Number`.
    pub fn convert_value(&self, value: &Value, origin: &str, target: &str, delta: bool) -> Result<Value, ConversionError> {
        let route = self.route(origin, target, delta)?;
        match value {
            Value::Number(_) | Value::Text(_) => value.to_scalar().map(|v| Value::Number(route.apply(v))),
            Value::List(items) => Ok(Value::List(numbers(route.apply_items(items)?))),
            Value::Tuple(items) => Ok(Value::Tuple(numbers(route.apply_items(items)?))),
            Value::Map(map) => {
                let converted = route.apply_entries(map)?;
                Ok(Value::Map(
                    map.keys().cloned().zip(converted.into_iter().map(Value::Number)).collect(),
                ))
            }
            Value::Null | Value::Bool(_) => Err(ConversionError::unsupported(
                value.type_name(),
                "expected a number, numeric text or a collection of numbers",
            )),
        }
    }

    /// Overwrite the elements of a `List` or the values of a `Map` and hand
    /// the same value back.
    ///
    /// Other shapes fail with `InPlaceUnsupported`. On any error the
    /// container is left as it was.
    pub fn convert_value_in_place<'v>(
        &self,
        value: &'v mut Value,
        origin: &str,
        target: &str,
        delta: bool,
    ) -> Result<&'v mut Value, ConversionError> {
        let route = self.route(origin, target, delta)?;
        match &mut *value {
            Value::List(items) => {
                let converted = route.apply_items(items)?;
                for (slot, v) in items.iter_mut().zip(converted) {
                    *slot = Value::Number(v);
                }
            }
            Value::Map(map) => {
                let converted = route.apply_entries(map)?;
                for (slot, v) in map.values_mut().zip(converted) {
                    *slot = Value::Number(v);
                }
            }
            other => {
                return Err(ConversionError::InPlaceUnsupported {
                    found: other.type_name(),
                })
            }
        }
        Ok(value)
    }

    /// Run a request, honouring its `in_place` flag.
    ///
    /// In place: the caller's container is mutated and borrowed back. This
    /// needs an exclusive borrow; a shared one fails with
    /// `InPlaceUnsupported`. Otherwise a new value is returned and the input
    /// is left alone.
    pub fn execute<'a>(&self, request: ConversionRequest<'a>) -> Result<Cow<'a, Value>, ConversionError> {
        let ConversionRequest { value, origin, target, options } = request;
        match (value, options.in_place) {
            (RequestValue::Exclusive(value), true) => {
                let value = self.convert_value_in_place(value, origin, target, options.delta)?;
                Ok(Cow::Borrowed(value))
            }
            (RequestValue::Shared(_), true) => {
                self.route(origin, target, options.delta)?;
                Err(ConversionError::InPlaceUnsupported { found: "shared reference" })
            }
            (RequestValue::Shared(value), false) => {
                self.convert_value(value, origin, target, options.delta).map(Cow::Owned)
            }
            (RequestValue::Exclusive(value), false) => {
                self.convert_value(value, origin, target, options.delta).map(Cow::Owned)
            }
        }
    }

    /// Convert a mutable sequence of numbers in place and hand it back
    pub fn convert_slice<'v>(
        &self,
        values: &'v mut [f64],
        origin: &str,
        target: &str,
        delta: bool,
    ) -> Result<&'v mut [f64], ConversionError> {
        let route = self.route(origin, target, delta)?;
        for v in values.iter_mut() {
            *v = route.apply(*v);
        }
        Ok(values)
    }

    /// Convert any finite collection of numbers into a new collection of
    /// the same kind (`Vec`, `VecDeque`, ...)
    pub fn convert_iter<C>(&self, values: C, origin: &str, target: &str, delta: bool) -> Result<C, ConversionError>
    where
        C: IntoIterator<Item = f64> + FromIterator<f64>,
    {
        let route = self.route(origin, target, delta)?;
        Ok(values.into_iter().map(|v| route.apply(v)).collect())
    }

    /// Convert the values of a mapping into a new mapping with the same keys
    pub fn convert_map<K: Ord + Clone>(
        &self,
        values: &BTreeMap<K, f64>,
        origin: &str,
        target: &str,
        delta: bool,
    ) -> Result<BTreeMap<K, f64>, ConversionError> {
        let route = self.route(origin, target, delta)?;
        Ok(values.iter().map(|(k, v)| (k.clone(), route.apply(*v))).collect())
    }

    /// Convert the values of a mapping in place and hand it back
    pub fn convert_map_in_place<'v, K: Ord>(
        &self,
        values: &'v mut BTreeMap<K, f64>,
        origin: &str,
        target: &str,
        delta: bool,
    ) -> Result<&'v mut BTreeMap<K, f64>, ConversionError> {
        let route = self.route(origin, target, delta)?;
        for v in values.values_mut() {
            *v = route.apply(*v);
        }
        Ok(values)
    }
}

fn numbers(values: Vec<f64>) -> Vec<Value> {
    values.into_iter().map(Value::Number).collect()
}
