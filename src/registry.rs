// codecs are keyed by type name, so a fast non-cryptographic hasher will do
use core::hash::BuildHasherDefault;
use seahash::SeaHasher;
use std::collections::HashMap;
use std::collections::hash_map::Entry;

use tracing::debug;

use crate::custom::{CastObject, CustomCast};
use crate::error::{CastError, Result};
use crate::kind::CastKind;

pub type NameHasher = BuildHasherDefault<SeaHasher>;

type DecodeFn = fn(&str) -> Result<Box<dyn CastObject>>;

fn decode_boxed<T: CustomCast>(text: &str) -> Result<Box<dyn CastObject>> {
    Ok(Box::new(T::decode(text)?))
}

/// The encode/decode pair registered for one custom type.
#[derive(Clone, Copy, Debug)]
pub struct Codec {
    type_name: &'static str,
    decode_fn: DecodeFn,
}

impl Codec {
    pub fn of<T: CustomCast>() -> Codec {
        Codec {
            type_name: T::TYPE_NAME,
            decode_fn: decode_boxed::<T>,
        }
    }
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }
    /// Encodes an instance of this codec's type. Instances of other types are
    /// refused, since their text could never be decoded back by this codec.
    pub fn encode(&self, value: &dyn CastObject) -> Result<String> {
        if value.type_name() != self.type_name {
            return Err(CastError::Serialize {
                type_name: self.type_name.to_string(),
                message: format!("value is an instance of '{}'", value.type_name()),
            });
        }
        value.encode_text()
    }
    pub fn decode(&self, text: &str) -> Result<Box<dyn CastObject>> {
        (self.decode_fn)(text)
    }
}

/// Explicit table of the custom types that may appear as cast kinds.
///
/// Populated once at startup and then shared read-only, typically behind an
/// `Arc`. A cast kind naming a type that was never registered is treated as
/// unresolvable.
#[derive(Debug, Default, Clone)]
pub struct CastRegistry {
    codecs: HashMap<String, Codec, NameHasher>,
}

impl CastRegistry {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn register<T: CustomCast>(&mut self) -> Result<&mut Self> {
        let name = T::TYPE_NAME;
        if !CastKind::parse(name).is_custom() {
            return Err(CastError::ReservedName(name.to_string()));
        }
        match self.codecs.entry(name.to_string()) {
            Entry::Occupied(_) => Err(CastError::DuplicateCodec(name.to_string())),
            Entry::Vacant(entry) => {
                debug!(type_name = name, "registered custom cast codec");
                entry.insert(Codec::of::<T>());
                Ok(self)
            }
        }
    }
    /// Consuming variant of [`CastRegistry::register`] for building a registry
    /// in one expression.
    pub fn with<T: CustomCast>(mut self) -> Result<Self> {
        self.register::<T>()?;
        Ok(self)
    }
    pub fn resolve(&self, type_name: &str) -> Option<&Codec> {
        self.codecs.get(type_name)
    }
    pub fn contains(&self, type_name: &str) -> bool {
        self.codecs.contains_key(type_name)
    }
    pub fn len(&self) -> usize {
        self.codecs.len()
    }
    pub fn is_empty(&self) -> bool {
        self.codecs.is_empty()
    }
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.codecs.keys().map(String::as_str)
    }
}
