//! # Typed-Property Object Model
//!
//! Every CZML entity (position, billboard, material, ...) is a fixed set of
//! named, optional properties. This module supplies the pieces they share:
//!
//! - [`PropertyValue`]: how one property value converts from and to JSON.
//! - [`CzmlObject`]: declared property names, name-based get/set, and the
//!   recursive `data()` / `load()` serialization built on them.
//! - [`coerce`] and [`wrap`]: the single coerce-or-wrap path used for nested
//!   entities. A JSON object is loaded into a fresh instance, `null` clears,
//!   anything else goes through the target's one-argument constructor and
//!   fails with [`CzmlError::PropertyTypeError`] if there is none.
//! - `czml_object!`: declares an entity struct with its property table.
//!
//! Entities own their property values outright; two instances never share
//! storage, and nested entities belong to exactly one parent.
//!
//! ## Strict loading
//! [`CzmlObject::load`] rejects keys the entity does not declare. Packets are
//! the exception and skip unknown keys; see [`crate::packet`].

use crate::error::{describe, CzmlError, Result};
use serde_json::{Map, Value};

/// Conversion between one property's typed value and its JSON form.
///
/// `from_json` is never called with `null`; clearing is handled by [`coerce`].
pub trait PropertyValue: Sized {
    /// What the property expects, for error messages.
    const EXPECTED: &'static str;

    fn from_json(property: &str, value: Value) -> Result<Self>;

    fn to_json(&self) -> Value;
}

/// Decode a property assignment: `null` clears, anything else is converted.
pub fn coerce<T: PropertyValue>(property: &str, value: Value) -> Result<Option<T>> {
    match value {
        Value::Null => Ok(None),
        other => T::from_json(property, other).map(Some),
    }
}

/// Build a nested entity from a non-null JSON value.
///
/// Objects are loaded into a fresh instance. Any other value is offered to
/// `construct`, the target's one-argument constructor.
pub fn wrap<T: CzmlObject>(
    property: &str,
    value: Value,
    construct: impl FnOnce(&Value) -> Option<T>,
) -> Result<T> {
    match value {
        Value::Object(map) => {
            let mut target = T::default();
            target.load(&map)?;
            Ok(target)
        }
        other => construct(&other).ok_or_else(|| type_error(property, T::NAME, &other)),
    }
}

pub(crate) fn type_error(property: &str, expected: &'static str, found: &Value) -> CzmlError {
    CzmlError::PropertyTypeError {
        property: property.to_string(),
        expected,
        found: describe(found),
    }
}

/// An entity with a declared, ordered set of optional properties.
pub trait CzmlObject: Default + Clone {
    /// Entity name used in error messages.
    const NAME: &'static str;

    /// Declared property names, base properties first.
    fn properties() -> Vec<&'static str>;

    fn declares(name: &str) -> bool {
        Self::properties().contains(&name)
    }

    /// Serialized value of one property, `None` when it is absent.
    fn get(&self, name: &str) -> Result<Option<Value>>;

    /// Assign one property from JSON. `null` clears it. On error the
    /// property keeps its previous value.
    fn set(&mut self, name: &str, value: Value) -> Result<()>;

    /// Sparse JSON object with every present property, in declaration order.
    fn data(&self) -> Map<String, Value> {
        let mut map = Map::new();
        for name in Self::properties() {
            if let Ok(Some(value)) = self.get(name) {
                map.insert(name.to_string(), value);
            }
        }
        map
    }

    /// Assign every key of `map` through its setter. Fails on the first
    /// undeclared or invalid key, in which case nothing is committed.
    fn load(&mut self, map: &Map<String, Value>) -> Result<()> {
        let mut next = self.clone();
        for (name, value) in map {
            next.set(name, value.clone())?;
        }
        *self = next;
        Ok(())
    }

    /// Like [`CzmlObject::load`] but for an arbitrary JSON value, which must be an object.
    fn load_value(&mut self, value: &Value) -> Result<()> {
        match value {
            Value::Object(map) => self.load(map),
            other => Err(type_error(Self::NAME, "an object", other)),
        }
    }

    fn dumps(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.data())?)
    }

    fn loads(&mut self, text: &str) -> Result<()> {
        let value: Value = serde_json::from_str(text)?;
        self.load_value(&value)
    }
}

impl PropertyValue for bool {
    const EXPECTED: &'static str = "a boolean";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        value
            .as_bool()
            .ok_or_else(|| type_error(property, Self::EXPECTED, &value))
    }

    fn to_json(&self) -> Value {
        Value::Bool(*self)
    }
}

impl PropertyValue for f64 {
    const EXPECTED: &'static str = "a number";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        value
            .as_f64()
            .ok_or_else(|| type_error(property, Self::EXPECTED, &value))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl PropertyValue for u32 {
    const EXPECTED: &'static str = "a non-negative integer";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        value
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| type_error(property, Self::EXPECTED, &value))
    }

    fn to_json(&self) -> Value {
        Value::from(*self)
    }
}

impl PropertyValue for String {
    const EXPECTED: &'static str = "a string";

    fn from_json(property: &str, value: Value) -> Result<Self> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(type_error(property, Self::EXPECTED, &other)),
        }
    }

    fn to_json(&self) -> Value {
        Value::String(self.clone())
    }
}

/// Implements [`PropertyValue`] for an enumeration of CZML string literals
/// through its serde derive.
macro_rules! literal_property {
    ($($ty:ty => $expected:literal),* $(,)?) => {
        $(
            impl $crate::property::PropertyValue for $ty {
                const EXPECTED: &'static str = $expected;

                fn from_json(property: &str, value: ::serde_json::Value) -> $crate::error::Result<Self> {
                    ::serde_json::from_value(value.clone())
                        .map_err(|_| $crate::property::type_error(property, Self::EXPECTED, &value))
                }

                fn to_json(&self) -> ::serde_json::Value {
                    ::serde_json::to_value(self).unwrap_or(::serde_json::Value::Null)
                }
            }
        )*
    };
}

/// Implements [`PropertyValue`] for entities that nest as plain objects and
/// have no one-argument constructor.
macro_rules! nested_property {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::property::PropertyValue for $ty {
                const EXPECTED: &'static str = <$ty as $crate::property::CzmlObject>::NAME;

                fn from_json(property: &str, value: ::serde_json::Value) -> $crate::error::Result<Self> {
                    $crate::property::wrap(property, value, |_| None)
                }

                fn to_json(&self) -> ::serde_json::Value {
                    ::serde_json::Value::Object($crate::property::CzmlObject::data(self))
                }
            }
        )*
    };
}

/// Declares an entity struct and its [`CzmlObject`] implementation.
///
/// Each property is listed as `"jsonName" => field: Type`; the field is stored
/// as `Option<Type>`. An optional `: Base` after the struct name embeds a base
/// entity as the `timing` field, whose properties are declared ahead of the
/// entity's own.
///
/// The generated struct also implements `Serialize`/`Deserialize` through
/// `data()`/`load()`.
macro_rules! czml_object {
    (
        $(#[$meta:meta])*
        pub struct $name:ident $(: $base:ty)? {
            $(
                $(#[$field_meta:meta])*
                $key:literal => $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, Default, PartialEq)]
        pub struct $name {
            $(
                /// Time-tagging metadata shared with the base entity.
                pub timing: $base,
            )?
            $(
                $(#[$field_meta])*
                pub $field: Option<$ty>,
            )*
        }

        impl $crate::property::CzmlObject for $name {
            const NAME: &'static str = stringify!($name);

            fn properties() -> Vec<&'static str> {
                #[allow(unused_mut)]
                let mut names: Vec<&'static str> = Vec::new();
                $( names.extend(<$base as $crate::property::CzmlObject>::properties()); )?
                names.extend([$($key),*]);
                names
            }

            fn get(&self, name: &str) -> $crate::error::Result<Option<::serde_json::Value>> {
                match name {
                    $( $key => Ok(self.$field.as_ref().map($crate::property::PropertyValue::to_json)), )*
                    $( _ if <$base as $crate::property::CzmlObject>::declares(name) => $crate::property::CzmlObject::get(&self.timing, name), )?
                    _ => Err($crate::error::CzmlError::UnknownProperty {
                        entity: Self::NAME,
                        name: name.to_string(),
                    }),
                }
            }

            fn set(&mut self, name: &str, value: ::serde_json::Value) -> $crate::error::Result<()> {
                match name {
                    $(
                        $key => {
                            self.$field = $crate::property::coerce(name, value)?;
                            Ok(())
                        }
                    )*
                    $( _ if <$base as $crate::property::CzmlObject>::declares(name) => $crate::property::CzmlObject::set(&mut self.timing, name, value), )?
                    _ => Err($crate::error::CzmlError::UnknownProperty {
                        entity: Self::NAME,
                        name: name.to_string(),
                    }),
                }
            }
        }

        impl ::serde::Serialize for $name {
            fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error> {
                ::serde::Serialize::serialize(&$crate::property::CzmlObject::data(self), serializer)
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $name {
            fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> ::std::result::Result<Self, D::Error> {
                let map = <::serde_json::Map<String, ::serde_json::Value> as ::serde::Deserialize>::deserialize(deserializer)?;
                let mut entity = Self::default();
                $crate::property::CzmlObject::load(&mut entity, &map).map_err(::serde::de::Error::custom)?;
                Ok(entity)
            }
        }
    };
}

pub(crate) use czml_object;
pub(crate) use literal_property;
pub(crate) use nested_property;
