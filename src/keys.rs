//! Cache-key derivation
//!
//! Turns an operation name and its parameters into one canonical cache key.
//! Parameters are sorted by name, so insertion order never changes the key:
//!
//! ```
//! use lead_cache::keys::{derive_key, KeyParams};
//!
//! let a = KeyParams::new().with("lng", -46.63).with("lat", -23.55);
//! let b = KeyParams::new().with("lat", -23.55).with("lng", -46.63);
//!
//! assert_eq!(derive_key("nearby", &a), "nearby:lat:-23.55|lng:-46.63");
//! assert_eq!(derive_key("nearby", &a), derive_key("nearby", &b));
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde_json::{Map, Value};

/// Separator between the prefix and the parameter list, and inside each pair.
const PAIR_SEPARATOR: char = ':';

/// Separator between parameter pairs.
const PARAM_SEPARATOR: char = '|';

// == Param Value ==
/// A primitive parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(s) => f.write_str(s),
            ParamValue::Int(n) => write!(f, "{}", n),
            ParamValue::Bool(b) => write!(f, "{}", b),
            ParamValue::Float(v) => format_float(*v, f),
        }
    }
}

/// Number-to-string rules of the web client, so keys built on either side
/// agree: integral floats print without a fraction (`5000.0` and `5000` give
/// the same key), and magnitudes below `1e-6` or from `1e21` up switch to
/// exponent form (`1e-7`, `2.5e+22`).
fn format_float(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let magnitude = v.abs();
    if v.is_infinite() {
        f.write_str(if v > 0.0 { "Infinity" } else { "-Infinity" })
    } else if v.fract() == 0.0 && magnitude < 1e15 {
        write!(f, "{}", v as i64)
    } else if v != 0.0 && (magnitude < 1e-6 || magnitude >= 1e21) {
        format_exponent(v, f)
    } else {
        write!(f, "{}", v)
    }
}

/// Shortest exponent form with an explicit `+` on positive exponents.
fn format_exponent(v: f64, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let formatted = format!("{:e}", v);
    match formatted.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            write!(f, "{}e+{}", mantissa, exponent)
        }
        _ => f.write_str(&formatted),
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        ParamValue::Str(v.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(v: String) -> Self {
        ParamValue::Str(v)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<i32> for ParamValue {
    fn from(v: i32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<u32> for ParamValue {
    fn from(v: u32) -> Self {
        ParamValue::Int(i64::from(v))
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        ParamValue::Float(v)
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        ParamValue::Bool(v)
    }
}

// == Key Params ==
/// Named parameters of a cacheable request, kept sorted by name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyParams {
    params: BTreeMap<String, ParamValue>,
}

impl KeyParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a parameter, replacing any earlier value under the same name.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Adds a parameter only when it is present.
    ///
    /// # Arguments
    /// * `name` - Parameter name
    /// * `value` - `None` leaves the parameter out of the key entirely
    pub fn with_opt<T: Into<ParamValue>>(self, name: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.with(name, value),
            None => self,
        }
    }

    /// In-place form of `with`.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.params.insert(name.into(), value.into());
    }

    /// Builds params from a JSON object.
    ///
    /// Nulls are treated as absent. Strings are used unquoted; arrays and
    /// objects are rendered as compact JSON.
    pub fn from_json_object(object: &Map<String, Value>) -> Self {
        let mut params = Self::new();
        for (name, value) in object {
            let value = match value {
                Value::Null => continue,
                Value::Bool(b) => ParamValue::Bool(*b),
                Value::Number(n) => match n.as_i64() {
                    Some(i) => ParamValue::Int(i),
                    None => ParamValue::Float(n.as_f64().unwrap_or(f64::NAN)),
                },
                Value::String(s) => ParamValue::Str(s.clone()),
                other => ParamValue::Str(other.to_string()),
            };
            params.insert(name.clone(), value);
        }
        params
    }

    /// Number of parameters that will appear in the key.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// True when the key will be just `prefix:`.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

// == Derive Key ==
/// Builds `prefix:name1:value1|name2:value2|...` with names in sorted order.
///
/// An empty parameter set yields `prefix:`.
pub fn derive_key(prefix: &str, params: &KeyParams) -> String {
    let tail = params
        .params
        .iter()
        .map(|(name, value)| format!("{}{}{}", name, PAIR_SEPARATOR, value))
        .collect::<Vec<_>>()
        .join(&PARAM_SEPARATOR.to_string());

    format!("{}{}{}", prefix, PAIR_SEPARATOR, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    #[test]
    fn test_empty_params() {
        assert_eq!(derive_key("nearby-search", &KeyParams::new()), "nearby-search:");
    }

    #[test]
    fn test_sorted_by_name() {
        let params = KeyParams::new().with("b", 2).with("a", 1);
        assert_eq!(derive_key("p", &params), "p:a:1|b:2");
    }

    #[test]
    fn test_absent_params_excluded() {
        let params = KeyParams::new()
            .with("input", "pizza")
            .with_opt::<f64>("lat", None)
            .with_opt("lng", Some(-46.63));
        assert_eq!(derive_key("autocomplete", &params), "autocomplete:input:pizza|lng:-46.63");
    }

    #[test]
    fn test_float_formatting() {
        assert_eq!(ParamValue::Float(5000.0).to_string(), "5000");
        assert_eq!(ParamValue::Float(-23.5505).to_string(), "-23.5505");
        assert_eq!(ParamValue::Float(f64::INFINITY).to_string(), "Infinity");
        assert_eq!(ParamValue::Bool(true).to_string(), "true");
    }

    #[test]
    fn test_float_exponent_ranges() {
        assert_eq!(ParamValue::Float(1e-7).to_string(), "1e-7");
        assert_eq!(ParamValue::Float(-1.5e-7).to_string(), "-1.5e-7");
        assert_eq!(ParamValue::Float(0.000001).to_string(), "0.000001");
        assert_eq!(ParamValue::Float(1e20).to_string(), "100000000000000000000");
        assert_eq!(ParamValue::Float(1e21).to_string(), "1e+21");
        assert_eq!(ParamValue::Float(2.5e22).to_string(), "2.5e+22");
        assert_eq!(ParamValue::Float(0.0).to_string(), "0");
        assert_eq!(ParamValue::Float(f64::NAN).to_string(), "NaN");
    }

    #[test]
    fn test_later_insert_replaces() {
        let params = KeyParams::new().with("a", 1).with("a", 2);
        assert_eq!(params.len(), 1);
        assert_eq!(derive_key("p", &params), "p:a:2");
    }

    #[test]
    fn test_from_json_object() {
        let object = json!({
            "type": "restaurant",
            "radius": 5000,
            "lat": -23.55,
            "open": true,
            "skip": null,
            "tags": ["a", "b"]
        });
        let params = KeyParams::from_json_object(object.as_object().unwrap());

        assert_eq!(
            derive_key("nearby_places", &params),
            r#"nearby_places:lat:-23.55|open:true|radius:5000|tags:["a","b"]|type:restaurant"#
        );
    }

    proptest! {
        #[test]
        fn prop_insertion_order_irrelevant(
            pairs in prop::collection::btree_map("[a-z]{1,8}", any::<i64>(), 0..10)
        ) {
            let forward = pairs
                .iter()
                .fold(KeyParams::new(), |p, (k, v)| p.with(k.clone(), *v));
            let backward = pairs
                .iter()
                .rev()
                .fold(KeyParams::new(), |p, (k, v)| p.with(k.clone(), *v));

            prop_assert_eq!(derive_key("p", &forward), derive_key("p", &backward));
        }

        #[test]
        fn prop_different_value_different_key(
            name in "[a-z]{1,8}",
            v1 in any::<i64>(),
            v2 in any::<i64>()
        ) {
            prop_assume!(v1 != v2 && name != "other");
            let a = KeyParams::new().with(name.clone(), v1).with("other", "x");
            let b = KeyParams::new().with(name, v2).with("other", "x");

            prop_assert_ne!(derive_key("p", &a), derive_key("p", &b));
        }

        #[test]
        fn prop_different_string_different_key(
            name in "[a-z]{1,8}",
            v1 in "[a-zA-Z0-9 .:|-]{0,16}",
            v2 in "[a-zA-Z0-9 .:|-]{0,16}"
        ) {
            prop_assume!(v1 != v2 && name != "other");
            let a = KeyParams::new().with(name.clone(), v1).with("other", "x");
            let b = KeyParams::new().with(name, v2).with("other", "x");

            prop_assert_ne!(derive_key("p", &a), derive_key("p", &b));
        }

        // Distinct finite floats never share a rendering (0.0 == -0.0 is
        // excluded by the assumption)
        #[test]
        fn prop_different_float_different_key(
            name in "[a-z]{1,8}",
            v1 in prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO,
            v2 in prop::num::f64::NORMAL | prop::num::f64::SUBNORMAL | prop::num::f64::ZERO
        ) {
            prop_assume!(v1 != v2 && name != "other");
            let a = KeyParams::new().with(name.clone(), v1).with("other", "x");
            let b = KeyParams::new().with(name, v2).with("other", "x");

            prop_assert_ne!(derive_key("p", &a), derive_key("p", &b));
        }

        #[test]
        fn prop_integral_float_matches_int(v in -1_000_000_000i64..1_000_000_000) {
            let as_int = KeyParams::new().with("n", v);
            let as_float = KeyParams::new().with("n", v as f64);

            prop_assert_eq!(derive_key("p", &as_int), derive_key("p", &as_float));
        }
    }
}
