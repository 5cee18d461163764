//! Read path: stored raw value to logical value, driven by the cast kind.

use tracing::{debug, trace};

use crate::convert;
use crate::error::Result;
use crate::kind::CastKind;
use crate::registry::CastRegistry;
use crate::value::{Collection, LogicalValue, RawValue};

/// Decodes `raw` under `kind`. Null is returned untouched for every kind.
pub fn cast_value(
    kind: &CastKind,
    raw: RawValue,
    registry: &CastRegistry,
    date_format: &str,
) -> Result<LogicalValue> {
    if raw.is_null() {
        return Ok(LogicalValue::Null);
    }
    trace!(kind = %kind, raw = raw.type_name(), "decoding attribute");
    Ok(match kind {
        CastKind::Integer => LogicalValue::Integer(convert::to_integer(&raw)),
        CastKind::Float => LogicalValue::Float(convert::to_float(&raw)),
        CastKind::String => LogicalValue::String(raw.to_text()),
        CastKind::Boolean => LogicalValue::Boolean(convert::to_boolean(&raw)),
        CastKind::Object => convert::from_json(&raw, true),
        CastKind::Json => convert::from_json(&raw, false),
        CastKind::Collection => {
            LogicalValue::Collection(Collection::new(convert::decode_json(&raw)))
        }
        CastKind::Date | CastKind::DateTime => {
            LogicalValue::DateTime(convert::as_date_time(&raw, date_format)?)
        }
        CastKind::Timestamp => LogicalValue::DateTime(convert::as_timestamp(&raw, date_format)?),
        CastKind::Custom(type_name) => to_custom(type_name, raw, registry)?,
    })
}

/// Unknown type names leave the raw value as it is. A registered codec that
/// rejects the text fails the read with the codec's own error.
fn to_custom(type_name: &str, raw: RawValue, registry: &CastRegistry) -> Result<LogicalValue> {
    match registry.resolve(type_name) {
        None => {
            debug!(type_name, "no codec registered, returning raw value");
            Ok(LogicalValue::from(raw))
        }
        Some(codec) => {
            let text = match raw {
                RawValue::Text(text) => text,
                other => other.to_text(),
            };
            debug!(type_name, "decoding custom cast");
            Ok(LogicalValue::Custom(codec.decode(&text)?))
        }
    }
}
