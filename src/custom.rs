//! Codecs for application types used as cast kinds.
//!
//! A type becomes castable by implementing [`CustomCast`] and being registered
//! with a [`crate::registry::CastRegistry`] under its [`CustomCast::TYPE_NAME`].
//! The codec is the only serialization format a custom-cast attribute ever
//! sees, so `decode(encode(x)) == x` is a per-type contract.
//!
//! Types that already derive serde's traits can use [`json_cast!`](crate::json_cast)
//! to get a JSON based codec.

// used to recover concrete types from decoded values
use std::any::Any;
use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{CastError, Result};

pub trait CustomCast: fmt::Debug + Clone + PartialEq + Send + Sync + 'static {
    /// The exact cast-kind descriptor naming this type.
    const TYPE_NAME: &'static str;
    fn encode(&self) -> Result<String>;
    fn decode(text: &str) -> Result<Self>;
}

/// Object safe view of a [`CustomCast`] value, so decoded instances of any
/// registered type can travel inside a [`crate::value::LogicalValue`].
pub trait CastObject: Any + fmt::Debug + Send + Sync {
    fn type_name(&self) -> &'static str;
    fn encode_text(&self) -> Result<String>;
    fn as_any(&self) -> &dyn Any;
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync>;
    fn clone_box(&self) -> Box<dyn CastObject>;
    fn eq_dyn(&self, other: &dyn CastObject) -> bool;
}

impl<T: CustomCast> CastObject for T {
    fn type_name(&self) -> &'static str {
        T::TYPE_NAME
    }
    fn encode_text(&self) -> Result<String> {
        self.encode()
    }
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn into_any(self: Box<Self>) -> Box<dyn Any + Send + Sync> {
        self
    }
    fn clone_box(&self) -> Box<dyn CastObject> {
        Box::new(self.clone())
    }
    fn eq_dyn(&self, other: &dyn CastObject) -> bool {
        other
            .as_any()
            .downcast_ref::<T>()
            .is_some_and(|other| self == other)
    }
}

impl PartialEq for dyn CastObject {
    fn eq(&self, other: &Self) -> bool {
        self.eq_dyn(other)
    }
}
impl Clone for Box<dyn CastObject> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

pub fn to_json_text<T: Serialize>(type_name: &str, value: &T) -> Result<String> {
    serde_json::to_string(value).map_err(|e| CastError::Serialize {
        type_name: type_name.to_string(),
        message: e.to_string(),
    })
}

pub fn from_json_text<T: DeserializeOwned>(type_name: &str, text: &str) -> Result<T> {
    serde_json::from_str(text).map_err(|e| CastError::Deserialize {
        type_name: type_name.to_string(),
        message: e.to_string(),
    })
}

/// Implements [`CustomCast`] for a serde type using JSON text as the stored
/// form. The type name defaults to the type's identifier.
///
/// ```
/// use serde::{Deserialize, Serialize};
///
/// #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// struct Money { cents: i64 }
/// attrcast::json_cast!(Money);
///
/// use attrcast::custom::CustomCast;
/// assert_eq!(Money::TYPE_NAME, "Money");
/// ```
#[macro_export]
macro_rules! json_cast {
    ($ty:ident) => {
        $crate::json_cast!($ty, stringify!($ty));
    };
    ($ty:ty, $name:expr) => {
        impl $crate::custom::CustomCast for $ty {
            const TYPE_NAME: &'static str = $name;
            fn encode(&self) -> $crate::error::Result<String> {
                $crate::custom::to_json_text(Self::TYPE_NAME, self)
            }
            fn decode(text: &str) -> $crate::error::Result<Self> {
                $crate::custom::from_json_text(Self::TYPE_NAME, text)
            }
        }
    };
}
