//! Attrcast – type-directed attribute casting for ORM models.
//!
//! Every model attribute may declare a *cast kind*. The kind decides how a
//! value is turned into its stored (raw) form on write, and how the stored form
//! is turned back into a caller-facing (logical) value on read:
//! * Built-in kinds: `integer`, `float`, `string`, `boolean`, `object`,
//!   `array`/`json`, `collection`, `date`, `datetime` and `timestamp`.
//! * Custom kinds: the name of an application type whose codec was registered
//!   in a [`registry::CastRegistry`]. Values are stored as the text the codec
//!   produces and decoded back into the type on read.
//!
//! ## Modules
//! * [`kind`] – The [`kind::CastKind`] enum and descriptor parsing.
//! * [`value`] – Raw values (what is stored) and logical values (what callers see).
//! * [`custom`] – The [`custom::CustomCast`] codec trait and the [`json_cast!`] helper.
//! * [`registry`] – Explicit table of custom codecs, populated at startup.
//! * [`schema`] – Static model configuration: casts, dates, set-mutators.
//! * [`model`] – A model instance with `cast_attribute` and `set_attribute`.
//! * [`decode`] / [`encode`] – The read and write path dispatch.
//! * [`convert`] – Scalar coercion, JSON and date-time helpers.
//! * [`persist`] – SQLite storage of raw attributes.
//! * [`settings`] – Configuration file and environment overrides.
//!
//! ## Null
//! Null is never transformed. It decodes to null for every kind and is stored
//! as null even for custom casts.
//!
//! ## Quick Start
//! ```
//! use std::sync::Arc;
//! use serde::{Deserialize, Serialize};
//! use attrcast::{CastRegistry, LogicalValue, Model, ModelSchema};
//!
//! #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
//! struct Money { cents: i64 }
//! attrcast::json_cast!(Money);
//!
//! let registry = Arc::new(CastRegistry::new().with::<Money>().unwrap());
//! let schema = ModelSchema::builder("orders")
//!     .cast("quantity", "integer")
//!     .cast("price", "Money")
//!     .build();
//! let mut order = Model::new(schema, registry);
//! order
//!     .set_attribute("quantity", "3").unwrap()
//!     .set_attribute("price", LogicalValue::custom(Money { cents: 500 })).unwrap();
//! assert_eq!(order.get_attribute("quantity").unwrap(), LogicalValue::Integer(3));
//! assert_eq!(order.get_custom::<Money>("price").unwrap(), Some(Money { cents: 500 }));
//! ```

pub mod convert;
pub mod custom;
pub mod decode;
pub mod encode;
pub mod error;
pub mod kind;
pub mod model;
pub mod persist;
pub mod registry;
pub mod schema;
pub mod settings;
pub mod value;

pub use custom::CustomCast;
pub use error::{CastError, Result};
pub use kind::CastKind;
pub use model::Model;
pub use registry::CastRegistry;
pub use schema::ModelSchema;
pub use value::{Collection, LogicalValue, RawValue};
