use crate::core::bulk::{BulkPayload, BulkResource};
use crate::utils::error::{AdminError, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::*;
use std::marker::PhantomData;
use std::str::FromStr;
use tracing::debug;
use uuid::Uuid;

/// Column refreshed on every bulk update when the entity has one
const TOUCH_COLUMN: &str = "updated_at";

/// Bulk-capable handle over a SeaORM entity with a single UUID primary key.
///
/// The optional scope is ANDed into every lookup and mutation, so callers only ever
/// reach the records they were allowed to see.
pub struct SeaOrmResource<E: EntityTrait> {
    db: DatabaseConnection,
    label: String,
    scope: Option<Condition>,
    _entity: PhantomData<fn() -> E>,
}

impl<E: EntityTrait> Clone for SeaOrmResource<E> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            label: self.label.clone(),
            scope: self.scope.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E: EntityTrait> std::fmt::Debug for SeaOrmResource<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeaOrmResource")
            .field("label", &self.label)
            .field("table", &E::default().table_name())
            .field("scoped", &self.scope.is_some())
            .finish()
    }
}

impl<E: EntityTrait> SeaOrmResource<E> {
    pub fn new(db: DatabaseConnection, label: impl Into<String>) -> Self {
        Self {
            db,
            label: label.into(),
            scope: None,
            _entity: PhantomData,
        }
    }

    /// Restrict the handle to records matching `scope`
    pub fn scoped(mut self, scope: Condition) -> Self {
        self.scope = Some(scope);
        self
    }

    pub fn connection(&self) -> &DatabaseConnection {
        &self.db
    }

    fn primary_key() -> Result<E::Column> {
        let mut keys = E::PrimaryKey::iter();
        match (keys.next(), keys.next()) {
            (Some(key), None) => Ok(key.into_column()),
            _ => Err(AdminError::internal(format!(
                "table '{}' must have a single-column primary key",
                E::default().table_name()
            ))),
        }
    }

    fn id_condition(&self, pk: E::Column, ids: &[Uuid]) -> Condition {
        let condition = Condition::all().add(pk.is_in(ids.iter().copied()));
        match &self.scope {
            Some(scope) => condition.add(scope.clone()),
            None => condition,
        }
    }

    /// Resolve a payload key to a writable column
    fn writable_column(field: &str, pk: E::Column) -> Result<E::Column> {
        let column = E::Column::from_str(field)
            .map_err(|_| AdminError::bad_request(format!("Unknown field: {}", field)))?;
        if column.as_str() == pk.as_str() {
            return Err(AdminError::bad_request(format!(
                "Field '{}' cannot be updated",
                field
            )));
        }
        Ok(column)
    }
}

/// Convert a JSON payload value into a SeaORM value typed for the target column
pub(crate) fn column_value(
    field: &str,
    column_type: &ColumnType,
    value: &serde_json::Value,
) -> Result<Value> {
    use serde_json::Value as Json;

    let mismatch =
        || AdminError::bad_request(format!("Invalid value for field '{}': {}", field, value));

    let converted: Value = match column_type {
        ColumnType::Uuid => match value {
            Json::Null => Option::<Uuid>::None.into(),
            Json::String(s) => Uuid::parse_str(s).map_err(|_| mismatch())?.into(),
            _ => return Err(mismatch()),
        },
        ColumnType::TimestampWithTimeZone => match value {
            Json::Null => Option::<DateTime<FixedOffset>>::None.into(),
            Json::String(s) => DateTime::parse_from_rfc3339(s)
                .map_err(|_| mismatch())?
                .into(),
            _ => return Err(mismatch()),
        },
        ColumnType::Boolean => match value {
            Json::Null => Option::<bool>::None.into(),
            Json::Bool(b) => (*b).into(),
            _ => return Err(mismatch()),
        },
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger => match value {
            Json::Null => Option::<i64>::None.into(),
            Json::Number(n) => n.as_i64().ok_or_else(mismatch)?.into(),
            _ => return Err(mismatch()),
        },
        ColumnType::Float | ColumnType::Double => match value {
            Json::Null => Option::<f64>::None.into(),
            Json::Number(n) => n.as_f64().ok_or_else(mismatch)?.into(),
            _ => return Err(mismatch()),
        },
        ColumnType::Json | ColumnType::JsonBinary => value.clone().into(),
        ColumnType::String(_) | ColumnType::Text | ColumnType::Char(_) => match value {
            Json::Null => Option::<String>::None.into(),
            Json::String(s) => s.clone().into(),
            _ => return Err(mismatch()),
        },
        _ => {
            return Err(AdminError::bad_request(format!(
                "Field '{}' cannot be set by bulk update",
                field
            )));
        }
    };
    Ok(converted)
}

#[async_trait]
impl<E> BulkResource for SeaOrmResource<E>
where
    E: EntityTrait,
    E::Model: Sync,
{
    type Id = Uuid;

    fn label(&self) -> &str {
        &self.label
    }

    async fn find_existing(&self, ids: &[Uuid]) -> Result<Vec<Uuid>> {
        let pk = Self::primary_key()?;
        let found: Vec<Uuid> = E::find()
            .select_only()
            .column(pk)
            .filter(self.id_condition(pk, ids))
            .into_tuple()
            .all(&self.db)
            .await?;
        Ok(found)
    }

    async fn delete_matching(&self, ids: &[Uuid]) -> Result<u64> {
        let pk = Self::primary_key()?;
        let condition = self.id_condition(pk, ids);

        let txn = self.db.begin().await?;
        let count = E::find().filter(condition.clone()).count(&txn).await?;
        E::delete_many().filter(condition).exec(&txn).await?;
        txn.commit().await?;

        debug!(resource = %self.label, count, "Deleted records");
        Ok(count)
    }

    async fn update_matching(&self, ids: &[Uuid], payload: &BulkPayload) -> Result<u64> {
        let pk = Self::primary_key()?;

        // Unknown fields are rejected before the transaction opens
        let mut update = E::update_many();
        for (field, value) in payload {
            let column = Self::writable_column(field, pk)?;
            let value = column_value(field, column.def().get_column_type(), value)?;
            update = update.col_expr(column, Expr::value(value));
        }
        if !payload.contains_key(TOUCH_COLUMN) {
            if let Ok(column) = E::Column::from_str(TOUCH_COLUMN) {
                if matches!(column.def().get_column_type(), ColumnType::TimestampWithTimeZone) {
                    update = update.col_expr(column, Expr::value(Utc::now().fixed_offset()));
                }
            }
        }

        let condition = self.id_condition(pk, ids);
        let txn = self.db.begin().await?;
        let count = E::find().filter(condition.clone()).count(&txn).await?;
        update.filter(condition).exec(&txn).await?;
        txn.commit().await?;

        debug!(resource = %self.label, count, "Updated records");
        Ok(count)
    }
}
