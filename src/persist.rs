// used for persistence
use rusqlite::{Connection, Statement, params};
use std::sync::Arc;

use tracing::debug;

use crate::error::Result;
use crate::model::Model;
use crate::registry::CastRegistry;
use crate::schema::ModelSchema;
use crate::value::RawValue;

// ------------- Persistence -------------
/// Keeps the raw attributes of model records in SQLite. Only raw values ever
/// reach the database, so every column value is null, a number, text or a
/// boolean stored as an integer.
///
/// `AttributeValue` has no declared type and therefore no affinity, so text
/// like "00501" or "1e3" is stored as text.
pub struct Persistor<'db> {
    pub add_attribute: Statement<'db>,
    pub record_attributes: Statement<'db>,
    pub drop_record: Statement<'db>,
}
impl<'db> Persistor<'db> {
    pub fn new(connection: &'db Connection) -> Result<Persistor<'db>> {
        connection.execute_batch(
            "
            create table if not exists Attribute (
                Model text not null,
                Record integer not null,
                Attribute text not null,
                AttributeValue null,
                constraint referenceable_Attribute primary key (
                    Model,
                    Record,
                    Attribute
                )
            );
            ",
        )?;
        Ok(Persistor {
            add_attribute: connection.prepare(
                "
                insert or replace into Attribute (
                    Model,
                    Record,
                    Attribute,
                    AttributeValue
                ) values (?, ?, ?, ?)
            ",
            )?,
            record_attributes: connection.prepare(
                "
                select Attribute, AttributeValue
                    from Attribute
                    where Model = ?
                    and Record = ?
            ",
            )?,
            drop_record: connection.prepare(
                "
                delete from Attribute
                    where Model = ?
                    and Record = ?
            ",
            )?,
        })
    }
    /// Writes every raw attribute of `model` under `record`, replacing what
    /// was stored before for the same attributes.
    pub fn persist_model(&mut self, record: i64, model: &Model) -> Result<usize> {
        let name = model.schema().name();
        let mut written = 0;
        for (attribute, raw) in model.attributes() {
            written += self
                .add_attribute
                .execute(params![name, record, attribute, raw])?;
        }
        debug!(model = name, record, written, "persisted model attributes");
        Ok(written)
    }
    /// Rebuilds a model from its stored raw attributes. `None` when nothing
    /// is stored for the record.
    pub fn restore_model(
        &mut self,
        record: i64,
        schema: Arc<ModelSchema>,
        registry: Arc<CastRegistry>,
    ) -> Result<Option<Model>> {
        let rows = self
            .record_attributes
            .query_map(params![schema.name(), record], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, RawValue>(1)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        if rows.is_empty() {
            return Ok(None);
        }
        let mut model = Model::new(Arc::clone(&schema), registry);
        for (attribute, raw) in rows {
            model.set_raw(&attribute, raw);
        }
        debug!(model = schema.name(), record, "restored model attributes");
        Ok(Some(model))
    }
    pub fn forget_model(&mut self, record: i64, schema: &ModelSchema) -> Result<usize> {
        Ok(self.drop_record.execute(params![schema.name(), record])?)
    }
}
