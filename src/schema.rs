// used to share one schema between all instances of a model
use std::sync::Arc;
use std::collections::{HashMap, HashSet};

use crate::convert::DEFAULT_DATE_FORMAT;
use crate::error::{CastError, Result};
use crate::kind::CastKind;
use crate::model::Model;
use crate::registry::NameHasher;
use crate::value::LogicalValue;

/// A set-mutator takes over storing the value for its attribute.
pub type Mutator = fn(&mut Model, LogicalValue) -> Result<()>;

/// Static configuration of a model: its cast declaration, the attributes
/// treated as dates, the set-mutators, and the storage date format.
///
/// Built once through [`ModelSchema::builder`] and never changed afterwards.
#[derive(Debug, Clone)]
pub struct ModelSchema {
    name: String,
    casts: HashMap<String, CastKind, NameHasher>,
    dates: HashSet<String, NameHasher>,
    mutators: HashMap<String, Mutator, NameHasher>,
    date_format: String,
}

impl ModelSchema {
    pub fn builder(name: &str) -> SchemaBuilder {
        SchemaBuilder {
            schema: ModelSchema {
                name: name.to_string(),
                casts: HashMap::default(),
                dates: HashSet::default(),
                mutators: HashMap::default(),
                date_format: DEFAULT_DATE_FORMAT.to_string(),
            },
        }
    }
    pub fn name(&self) -> &str {
        &self.name
    }
    pub fn casts(&self) -> &HashMap<String, CastKind, NameHasher> {
        &self.casts
    }
    pub fn dates(&self) -> &HashSet<String, NameHasher> {
        &self.dates
    }
    pub fn date_format(&self) -> &str {
        &self.date_format
    }
    pub fn cast_kind(&self, field: &str) -> Result<&CastKind> {
        self.casts
            .get(field)
            .ok_or_else(|| CastError::UndeclaredCast(field.to_string()))
    }
    pub fn has_cast(&self, field: &str) -> bool {
        self.casts.contains_key(field)
    }
    /// Listed as a date, or cast as `date`/`datetime`.
    pub fn is_date_attribute(&self, field: &str) -> bool {
        self.dates.contains(field) || self.casts.get(field).is_some_and(CastKind::is_date)
    }
    pub fn is_json_castable(&self, field: &str) -> bool {
        self.casts.get(field).is_some_and(CastKind::is_json)
    }
    pub fn has_set_mutator(&self, field: &str) -> bool {
        self.mutators.contains_key(field)
    }
    pub fn set_mutator(&self, field: &str) -> Option<Mutator> {
        self.mutators.get(field).copied()
    }
}

pub struct SchemaBuilder {
    schema: ModelSchema,
}

impl SchemaBuilder {
    /// Declares `field` with a cast descriptor such as `"integer"`, `"array"`
    /// or the type name of a registered custom cast.
    pub fn cast(mut self, field: &str, descriptor: &str) -> Self {
        self.schema
            .casts
            .insert(field.to_string(), CastKind::parse(descriptor));
        self
    }
    pub fn date(mut self, field: &str) -> Self {
        self.schema.dates.insert(field.to_string());
        self
    }
    pub fn mutator(mut self, field: &str, mutator: Mutator) -> Self {
        self.schema.mutators.insert(field.to_string(), mutator);
        self
    }
    pub fn date_format(mut self, date_format: &str) -> Self {
        self.schema.date_format = date_format.to_string();
        self
    }
    pub fn build(self) -> Arc<ModelSchema> {
        Arc::new(self.schema)
    }
}
