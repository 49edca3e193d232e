//! # Public Record
//!
//! The clear-text half of a lot document: a JSON object of caller-defined
//! keys (product, weight, date, lot number, price). Keys are opaque to the
//! codec except for [`RESERVED_SECRET_FIELD`], which carries the encrypted
//! private reference once a document has been sealed.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};

use crate::canonical::CanonicalBytes;
use crate::error::{CanonicalizationError, RecordError};

/// Document field holding the symmetric ciphertext of the private reference.
pub const RESERVED_SECRET_FIELD: &str = "i_secret";

/// A JSON object of public lot attributes.
///
/// Serializes transparently as the underlying object. Field order is not
/// significant; canonical bytes sort keys.
///
/// Numbers are held in their canonical JSON form: a float with no
/// fractional part that fits an integer (`12.0`, `-0.0`) is stored as that
/// integer, since JCS writes it as `12` and it parses back as one. Every
/// constructor applies this, so a record compares equal to itself after a
/// trip through its document.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PublicRecord(Map<String, Value>);

impl PublicRecord {
    /// An empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from any serializable value.
    ///
    /// # Errors
    ///
    /// `RecordError::Unserializable` if serde cannot produce JSON,
    /// `RecordError::NotAnObject` if the JSON is not an object.
    pub fn from_serializable(value: &impl Serialize) -> Result<Self, RecordError> {
        Self::from_value(serde_json::to_value(value)?)
    }

    /// Build a record from a JSON value, which must be an object.
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        match value {
            Value::Object(map) => Ok(Self::from(map)),
            other => Err(RecordError::NotAnObject(json_kind(&other))),
        }
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a field, returning the previous value if any.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        let mut value = value.into();
        canonicalize_numbers(&mut value);
        self.0.insert(key.into(), value)
    }

    /// Remove a field.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    /// A field's value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Convenience accessor for string-valued fields.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// True if `key` is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// True if the reserved ciphertext field is present.
    pub fn has_secret_field(&self) -> bool {
        self.contains_key(RESERVED_SECRET_FIELD)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if the record has no fields.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// JCS bytes of this record.
    pub fn canonical_bytes(&self) -> Result<CanonicalBytes, CanonicalizationError> {
        CanonicalBytes::new(&self.0)
    }
}

impl From<Map<String, Value>> for PublicRecord {
    fn from(mut map: Map<String, Value>) -> Self {
        map.values_mut().for_each(canonicalize_numbers);
        Self(map)
    }
}

impl<'de> Deserialize<'de> for PublicRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Map::deserialize(deserializer).map(Self::from)
    }
}

impl TryFrom<Value> for PublicRecord {
    type Error = RecordError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

/// Rewrite integral floats as integers, recursively.
fn canonicalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(integer) = n.as_f64().and_then(integral_number) {
                *n = integer;
            }
        }
        Value::Array(items) => items.iter_mut().for_each(canonicalize_numbers),
        Value::Object(map) => map.values_mut().for_each(canonicalize_numbers),
        Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {}
    }
}

fn integral_number(f: f64) -> Option<Number> {
    // 2^64 and -2^63, both exact in f64.
    const U64_END: f64 = 18_446_744_073_709_551_616.0;
    const I64_MIN: f64 = -9_223_372_036_854_775_808.0;

    if f.fract() != 0.0 {
        return None;
    }
    if (0.0..U64_END).contains(&f) {
        Some(Number::from(f as u64))
    } else if (I64_MIN..0.0).contains(&f) {
        Some(Number::from(f as i64))
    } else {
        None
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Serialize)]
    struct Lot {
        p: &'static str,
        w: &'static str,
        n: &'static str,
    }

    #[test]
    fn from_struct() {
        let lot = Lot {
            p: "Pommes Bio",
            w: "1500kg",
            n: "LOT-12345",
        };
        let record = PublicRecord::from_serializable(&lot).unwrap();
        assert_eq!(record.get_str("p"), Some("Pommes Bio"));
        assert_eq!(record.len(), 3);
        assert!(!record.has_secret_field());
    }

    #[test]
    fn rejects_non_objects() {
        let err = PublicRecord::from_value(json!(["a", "b"])).unwrap_err();
        assert!(matches!(err, RecordError::NotAnObject("an array")));
        assert!(PublicRecord::from_value(json!("text")).is_err());
        assert!(PublicRecord::from_value(Value::Null).is_err());
    }

    #[test]
    fn builder_and_serde_transparent() {
        let record = PublicRecord::new().with("n", "LOT-1").with("price", 12);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json, json!({"n": "LOT-1", "price": 12}));

        let back: PublicRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn secret_field_detection() {
        let mut record = PublicRecord::new().with("n", "LOT-1");
        record.insert(RESERVED_SECRET_FIELD, "ciphertext");
        assert!(record.has_secret_field());
        record.remove(RESERVED_SECRET_FIELD);
        assert!(!record.has_secret_field());
    }

    #[test]
    fn integral_floats_stored_as_integers() {
        let record = PublicRecord::new().with("price", 12.0).with("w", 1500.5);
        assert_eq!(record, PublicRecord::new().with("price", 12).with("w", 1500.5));
        assert_eq!(record.get("price").and_then(Value::as_u64), Some(12));
        assert_eq!(record.get("w").and_then(Value::as_f64), Some(1500.5));
    }

    #[test]
    fn numbers_canonicalized_on_every_path() {
        let nested = json!({"price": -3.0, "zero": -0.0, "grades": [1.0, 2.5], "origin": {"alt": 210.0}});
        let expected = json!({"price": -3, "zero": 0, "grades": [1, 2.5], "origin": {"alt": 210}});

        let from_value = PublicRecord::from_value(nested.clone()).unwrap();
        let from_serde: PublicRecord = serde_json::from_value(nested).unwrap();
        assert_eq!(serde_json::to_value(&from_value).unwrap(), expected);
        assert_eq!(from_serde, from_value);
    }

    #[test]
    fn out_of_integer_range_floats_kept() {
        let record = PublicRecord::new().with("big", 1e20).with("neg", -1e19);
        assert!(record.get("big").unwrap().is_f64());
        assert!(record.get("neg").unwrap().is_f64());
    }

    #[test]
    fn record_equals_itself_after_canonical_roundtrip() {
        let record = PublicRecord::new()
            .with("price", 12.0)
            .with("w", 1500.5)
            .with("qty", 9_007_199_254_740_993u64)
            .with("tiny", 1e-7)
            .with("big", 1e20);
        let bytes = record.canonical_bytes().unwrap();
        let back: PublicRecord = serde_json::from_slice(bytes.as_bytes()).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn canonical_bytes_sorted() {
        let record = PublicRecord::new().with("w", "1500kg").with("n", "LOT-12345");
        let cb = record.canonical_bytes().unwrap();
        assert_eq!(cb.as_bytes(), br#"{"n":"LOT-12345","w":"1500kg"}"#);
    }
}
