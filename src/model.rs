// the schema and the registry are shared by every instance of a model
use std::sync::Arc;
use std::collections::HashMap;

// used for nested JSON attribute paths
use serde_json::{Map, Value as JsonValue};

use tracing::trace;

use crate::convert;
use crate::custom::CustomCast;
use crate::decode;
use crate::encode;
use crate::error::{CastError, Result};
use crate::kind::CastKind;
use crate::registry::{CastRegistry, Codec, NameHasher};
use crate::schema::ModelSchema;
use crate::value::{LogicalValue, RawValue};

/// One model instance: its raw attribute store plus the static schema and
/// codec registry that govern how attributes are cast.
#[derive(Debug, Clone)]
pub struct Model {
    schema: Arc<ModelSchema>,
    registry: Arc<CastRegistry>,
    attributes: HashMap<String, RawValue, NameHasher>,
}

impl Model {
    pub fn new(schema: Arc<ModelSchema>, registry: Arc<CastRegistry>) -> Self {
        Self {
            schema,
            registry,
            attributes: HashMap::default(),
        }
    }
    pub fn schema(&self) -> &ModelSchema {
        &self.schema
    }
    pub fn registry(&self) -> &CastRegistry {
        &self.registry
    }
    pub fn raw(&self, field: &str) -> Option<&RawValue> {
        self.attributes.get(field)
    }
    /// Stores a raw value as is, bypassing every cast.
    pub fn set_raw(&mut self, field: &str, raw: RawValue) -> &mut Self {
        self.attributes.insert(field.to_string(), raw);
        self
    }
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &RawValue)> {
        self.attributes.iter().map(|(k, v)| (k.as_str(), v))
    }
    pub fn get_cast_kind(&self, field: &str) -> Result<&CastKind> {
        self.schema.cast_kind(field)
    }

    fn custom_codec(&self, field: &str) -> Option<Codec> {
        self.schema
            .casts()
            .get(field)
            .and_then(CastKind::custom_name)
            .and_then(|type_name| self.registry.resolve(type_name))
            .copied()
    }
    /// True when the field is cast to a custom type that has a registered
    /// codec. Looked up on every call.
    pub fn is_custom_castable(&self, field: &str) -> bool {
        self.custom_codec(field).is_some()
    }

    // ------------- Read path -------------
    /// Decodes a raw value for `field` according to its declared cast.
    pub fn cast_attribute(&self, field: &str, raw: RawValue) -> Result<LogicalValue> {
        if raw.is_null() {
            return Ok(LogicalValue::Null);
        }
        let kind = self.schema.cast_kind(field)?;
        decode::cast_value(kind, raw, &self.registry, self.schema.date_format())
    }
    /// Current logical value of `field`. Attributes without a cast that are
    /// listed as dates become date-times; the rest come back as stored.
    pub fn get_attribute(&self, field: &str) -> Result<LogicalValue> {
        let raw = self.attributes.get(field).cloned().unwrap_or(RawValue::Null);
        if self.schema.has_cast(field) {
            return self.cast_attribute(field, raw);
        }
        if self.schema.dates().contains(field) && !raw.is_null() {
            return Ok(LogicalValue::DateTime(convert::as_date_time(
                &raw,
                self.schema.date_format(),
            )?));
        }
        Ok(LogicalValue::from(raw))
    }
    /// Typed read of a custom-cast attribute. `None` when the attribute is null.
    pub fn get_custom<T: CustomCast>(&self, field: &str) -> Result<Option<T>> {
        match self.get_attribute(field)? {
            LogicalValue::Null => Ok(None),
            value => {
                let found = value.type_name().to_string();
                value.into_custom::<T>().map(Some).ok_or(CastError::TypeMismatch {
                    field: field.to_string(),
                    expected: T::TYPE_NAME.to_string(),
                    found,
                })
            }
        }
    }

    // ------------- Write path -------------
    /// Encodes `value` for `field` and stores it. Returns the model so calls
    /// can be chained.
    pub fn set_attribute(
        &mut self,
        field: &str,
        value: impl Into<LogicalValue>,
    ) -> Result<&mut Self> {
        let mut value = value.into();
        if let Some(mutator) = self.schema.set_mutator(field) {
            trace!(field, "delegating to set-mutator");
            mutator(self, value)?;
            return Ok(self);
        }
        let schema = Arc::clone(&self.schema);
        let date_format = schema.date_format();

        if value.is_truthy() && schema.is_date_attribute(field) {
            value = encode::date_to_storage(&value, date_format)?;
        }
        if schema.is_json_castable(field) && !value.is_null() {
            value = encode::json_to_storage(&value, date_format)?;
        }
        if field.contains("->") {
            return self.fill_json_attribute(field, value);
        }
        if !value.is_null() {
            if let Some(codec) = self.custom_codec(field) {
                value = encode::custom_to_storage(field, &codec, value)?;
            }
        }

        let raw = encode::into_raw(field, schema.casts().get(field), value, date_format)?;
        trace!(field, raw = raw.type_name(), "storing attribute");
        self.attributes.insert(field.to_string(), raw);
        Ok(self)
    }

    /// Sets a value inside the JSON document held by the root attribute of a
    /// `root->a->b` path, creating intermediate objects as needed.
    pub fn fill_json_attribute(&mut self, key: &str, value: LogicalValue) -> Result<&mut Self> {
        let mut segments = key.split("->");
        let root = segments.next().unwrap_or(key);
        let path: Vec<&str> = segments.collect();

        let mut document = match self.attributes.get(root) {
            Some(raw) if !raw.is_null() => convert::decode_json(raw),
            _ => JsonValue::Null,
        };
        if !document.is_object() {
            document = JsonValue::Object(Map::new());
        }
        let leaf = convert::to_json_value(&value, self.schema.date_format())?;
        set_path(&mut document, &path, leaf);

        let text = serde_json::to_string(&document).map_err(|e| CastError::Json(e.to_string()))?;
        self.attributes.insert(root.to_string(), RawValue::Text(text));
        Ok(self)
    }
}

fn set_path(target: &mut JsonValue, path: &[&str], value: JsonValue) {
    match path.split_first() {
        None => *target = value,
        Some((head, rest)) => {
            if !target.is_object() {
                *target = JsonValue::Object(Map::new());
            }
            if let JsonValue::Object(members) = target {
                let member = members.entry(head.to_string()).or_insert(JsonValue::Null);
                set_path(member, rest, value);
            }
        }
    }
}
