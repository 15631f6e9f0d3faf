//! `type`-tagged JSON entities and their constructor registry
//!
//! Every serializable structure writes a plain JSON object carrying a `type`
//! discriminant. Loading goes through a [`TypeRegistry`], a map from that tag
//! to a constructor filled in by code when the registry is built. An unknown
//! tag is an explicit [`Error::UnknownType`], never a silent no-op.

use crate::error::{Error, Result};
use core::fmt;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Name of the discriminant field in every entity object
pub const TYPE_FIELD: &str = "type";

/// A structure with a symmetric JSON representation
pub trait JsonEntity: Sized {
    /// Value of the `type` discriminant
    const TYPE_NAME: &'static str;

    /// Produce a plain JSON object. Nested entities are written as ids.
    fn to_json(&self) -> Value;

    /// Rebuild from the output of [`JsonEntity::to_json`]
    fn from_json(json: &Value) -> Result<Self>;
}

/// Read the `type` discriminant of a JSON object
pub fn type_tag(json: &Value) -> Option<&str> {
    json.get(TYPE_FIELD)?.as_str()
}

/// Fail unless `json` is tagged as `expected`
pub fn expect_type(json: &Value, expected: &'static str) -> Result<()> {
    match type_tag(json) {
        Some(found) if found == expected => Ok(()),
        Some(found) => {
            log::warn!("Expected JSON entity '{}', found '{}'", expected, found);
            Err(Error::TypeMismatch {
                expected: expected.to_owned(),
                found: found.to_owned(),
            })
        }
        None => {
            log::warn!("JSON entity without '{}' tag passed to {}", TYPE_FIELD, expected);
            Err(Error::MissingField {
                type_name: expected,
                field: TYPE_FIELD,
            })
        }
    }
}

/// Serialize `payload` and stamp it with the `type` discriminant
///
/// A payload that cannot be represented (non-string map keys) degrades to an
/// object holding only the tag.
pub fn tagged<T: Serialize>(type_name: &'static str, payload: &T) -> Value {
    let mut map = match serde_json::to_value(payload) {
        Ok(Value::Object(map)) => map,
        Ok(other) => {
            let mut map = Map::new();
            map.insert("value".to_owned(), other);
            map
        }
        Err(e) => {
            log::warn!("Failed to serialize {}: {}", type_name, e);
            Map::new()
        }
    };
    map.insert(TYPE_FIELD.to_owned(), Value::String(type_name.to_owned()));
    Value::Object(map)
}

/// Check the tag of `json`, then deserialize its payload
pub fn decode<T: DeserializeOwned>(json: &Value, type_name: &'static str) -> Result<T> {
    expect_type(json, type_name)?;
    serde_json::from_value(json.clone()).map_err(|e| {
        log::warn!("Malformed {} JSON: {}", type_name, e);
        Error::from(e)
    })
}

/// Constructor registered for one type tag
pub type Constructor<T> = Box<dyn Fn(&Value) -> Result<T> + Send + Sync>;

/// Registry mapping `type` tags to constructors of a common output type `T`
///
/// `T` is usually a tagged union of every entity an application loads.
pub struct TypeRegistry<T> {
    constructors: BTreeMap<&'static str, Constructor<T>>,
}

impl<T: 'static> TypeRegistry<T> {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            constructors: BTreeMap::new(),
        }
    }

    /// Register a constructor for a tag
    pub fn register(
        &mut self,
        type_name: &'static str,
        constructor: impl Fn(&Value) -> Result<T> + Send + Sync + 'static,
    ) -> &mut Self {
        if self.constructors.insert(type_name, Box::new(constructor)).is_some() {
            log::debug!("Replaced constructor for type '{}'", type_name);
        }
        self
    }

    /// Register a [`JsonEntity`] under its own tag
    pub fn register_entity<E>(&mut self) -> &mut Self
    where
        E: JsonEntity + Into<T> + 'static,
    {
        self.register(E::TYPE_NAME, |json| E::from_json(json).map(Into::into))
    }

    /// Check if a tag is registered
    pub fn contains(&self, type_name: &str) -> bool {
        self.constructors.contains_key(type_name)
    }

    /// Registered tags in sorted order
    pub fn type_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.constructors.keys().copied()
    }

    /// Get the number of registered types
    pub fn len(&self) -> usize {
        self.constructors.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.constructors.is_empty()
    }

    /// Build a value from a tagged JSON object
    pub fn deserialize(&self, json: &Value) -> Result<T> {
        let Some(tag) = type_tag(json) else {
            log::warn!("Cannot deserialize JSON without a '{}' tag", TYPE_FIELD);
            return Err(Error::MissingField {
                type_name: "entity",
                field: TYPE_FIELD,
            });
        };
        match self.constructors.get(tag) {
            Some(constructor) => constructor(json),
            None => {
                log::warn!("Unknown entity type '{}'", tag);
                Err(Error::UnknownType(tag.to_owned()))
            }
        }
    }
}

impl<T: 'static> Default for TypeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for TypeRegistry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field("types", &self.constructors.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Marker {
        value: i32,
    }

    impl JsonEntity for Marker {
        const TYPE_NAME: &'static str = "Marker";

        fn to_json(&self) -> Value {
            tagged(Self::TYPE_NAME, self)
        }

        fn from_json(json: &Value) -> Result<Self> {
            decode(json, Self::TYPE_NAME)
        }
    }

    #[test]
    fn test_tagged_round_trip() {
        let json = Marker { value: 7 }.to_json();
        assert_eq!(json["type"], "Marker");
        assert_eq!(Marker::from_json(&json).unwrap(), Marker { value: 7 });
    }

    #[test]
    fn test_type_mismatch() {
        let err = Marker::from_json(&json!({ "type": "Other", "value": 1 })).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }));
    }

    #[test]
    fn test_registry_dispatch() {
        let mut registry = TypeRegistry::<Marker>::new();
        registry.register_entity::<Marker>();

        assert!(registry.contains("Marker"));
        assert_eq!(registry.len(), 1);

        let value = registry.deserialize(&json!({ "type": "Marker", "value": 3 })).unwrap();
        assert_eq!(value, Marker { value: 3 });
    }

    #[test]
    fn test_registry_unknown_type() {
        let registry = TypeRegistry::<Marker>::new();
        let err = registry.deserialize(&json!({ "type": "Ghost" })).unwrap_err();
        assert!(matches!(err, Error::UnknownType(name) if name == "Ghost"));

        let err = registry.deserialize(&json!({ "value": 3 })).unwrap_err();
        assert!(matches!(err, Error::MissingField { .. }));
    }
}
