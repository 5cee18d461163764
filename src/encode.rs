//! Write path steps. Each step takes the value produced by the previous one;
//! [`crate::model::Model::set_attribute`] decides which steps apply.

use tracing::debug;

use crate::convert;
use crate::error::{CastError, Result};
use crate::kind::CastKind;
use crate::registry::Codec;
use crate::value::{LogicalValue, RawValue};

/// Date attributes are stored in the storage date format.
pub fn date_to_storage(value: &LogicalValue, date_format: &str) -> Result<LogicalValue> {
    Ok(LogicalValue::String(convert::from_date_time(value, date_format)?))
}

/// Structured attributes are stored as JSON text.
pub fn json_to_storage(value: &LogicalValue, date_format: &str) -> Result<LogicalValue> {
    Ok(LogicalValue::String(convert::as_json(value, date_format)?))
}

/// Serializes an instance of the field's custom type with its codec.
pub fn custom_to_storage(field: &str, codec: &Codec, value: LogicalValue) -> Result<LogicalValue> {
    match value {
        LogicalValue::Custom(object) if object.type_name() == codec.type_name() => {
            debug!(field, type_name = codec.type_name(), "encoding custom cast");
            Ok(LogicalValue::String(codec.encode(&*object)?))
        }
        other => Err(CastError::TypeMismatch {
            field: field.to_string(),
            expected: codec.type_name().to_string(),
            found: other.type_name().to_string(),
        }),
    }
}

/// Hands the value over in raw form. Scalars pass through unchanged; the
/// remaining structured values get their natural storage form.
pub fn into_raw(
    field: &str,
    kind: Option<&CastKind>,
    value: LogicalValue,
    date_format: &str,
) -> Result<RawValue> {
    Ok(match value {
        LogicalValue::Null => RawValue::Null,
        LogicalValue::Integer(i) => RawValue::Integer(i),
        LogicalValue::Float(f) => RawValue::Real(f),
        LogicalValue::String(s) => RawValue::Text(s),
        LogicalValue::Boolean(b) => RawValue::Boolean(b),
        LogicalValue::DateTime(d) => match kind {
            Some(CastKind::Timestamp) => RawValue::Integer(convert::timestamp_of(&d)),
            _ => RawValue::Text(convert::format_date_time(&d, date_format)?),
        },
        structured @ (LogicalValue::Object(_)
        | LogicalValue::Json(_)
        | LogicalValue::Collection(_)) => {
            RawValue::Text(convert::as_json(&structured, date_format)?)
        }
        LogicalValue::Custom(object) => {
            return Err(CastError::Unstorable {
                field: field.to_string(),
                message: format!("no codec applies to an instance of '{}'", object.type_name()),
            });
        }
    })
}
