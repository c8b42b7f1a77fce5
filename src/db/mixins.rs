//! Capabilities that models opt into by implementing a marker trait.
//!
//! - [`Deprecated`] models keep their table but can never be instantiated again.
//! - [`DeletableByValue`] models can have every row matching `field = value` removed in a
//!   single statement through [`DeleteByValue`] (pool) or [`TxDeleteByValue`] (transaction).
use crate::db::{DatabaseConnection, DatabaseKind, DatabaseTransaction};
use async_trait::async_trait;
use derive_more::Display;
use sqlx::any::AnyArguments;
use sqlx::query::Query;
use sqlx::Any;

/// Errors raised by model capabilities.
#[derive(Debug, Display, PartialEq, Eq)]
pub enum ModelError {
    /// Construction of a deprecated model was attempted.
    #[display(fmt = "This model has been deprecated and should not be used.")]
    Deprecated {
        /// Table of the deprecated model.
        model: &'static str,
    },
}

impl std::error::Error for ModelError {}

/// A model that must no longer be used.
///
/// Its table is intentionally left in place so existing rows stay readable through raw
/// queries, see [`DeprecatedManager::count_rows`]. Implementors should make the type
/// uninhabited (e.g. with a [`std::convert::Infallible`] field) and route their
/// `FromRow` through [`decode_error`], so that no instance can exist.
pub trait Deprecated: Sized {
    /// Table that backed the model.
    const TABLE: &'static str;

    /// Attempt to build an instance from any arguments.
    ///
    /// # Errors
    /// Always errors with [`ModelError::Deprecated`].
    fn construct<A>(_args: A) -> Result<Self, ModelError> {
        tracing::warn!(model = Self::TABLE, "Refusing to instantiate deprecated model");
        Err(ModelError::Deprecated { model: Self::TABLE })
    }
}

/// The error every `FromRow` of a deprecated model should return.
#[must_use]
pub fn decode_error<M: Deprecated>() -> sqlx::Error {
    sqlx::Error::Decode(Box::new(ModelError::Deprecated { model: M::TABLE }))
}

/// Read-only access to the tables of deprecated models.
#[async_trait]
pub trait DeprecatedManager {
    /// Count the rows still stored for a deprecated model.
    async fn count_rows<M: Deprecated>(&self) -> anyhow::Result<i64>;
}

#[async_trait]
impl DeprecatedManager for DatabaseConnection {
    /// Count the rows still stored for a deprecated model.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database.
    async fn count_rows<M: Deprecated>(&self) -> anyhow::Result<i64> {
        let statement = format!("SELECT COUNT(*) FROM {}", quote_identifier(M::TABLE));
        let row = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                sqlx::query_as::<_, (i64,)>(&statement)
                    .fetch_one(&mut *connection)
                    .await?
            }
        };
        Ok(row.0)
    }
}

/// A model whose rows can be removed by matching a single field against a value.
pub trait DeletableByValue {
    /// Table holding the model's rows.
    const TABLE: &'static str;
    /// Columns of [`Self::TABLE`] that rows can be matched on.
    const COLUMNS: &'static [&'static str];
}

/// Value matched against a field by [`DeleteByValue::delete_by_value`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Text column value, e.g. an email address.
    Text(String),
    /// Integer column value, e.g. a user id.
    Integer(i64),
    /// Boolean column value.
    Bool(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Delete rows by field value on a pooled connection.
#[async_trait]
pub trait DeleteByValue {
    /// Deletes rows of `M` where `field` equals `value`.
    ///
    /// e.g. `db.delete_by_value::<AccountRecovery, _>("learner@example.com", "secondary_email")`
    ///
    /// Returns `true` if any rows were deleted, `false` otherwise.
    async fn delete_by_value<M, V>(&self, value: V, field: &str) -> anyhow::Result<bool>
    where
        M: DeletableByValue,
        V: Into<FieldValue> + Send;
}

/// Delete rows by field value inside a transaction.
#[async_trait]
pub trait TxDeleteByValue {
    /// Deletes rows of `M` where `field` equals `value`.
    ///
    /// Returns `true` if any rows were deleted, `false` otherwise.
    async fn delete_by_value<M, V>(&mut self, value: V, field: &str) -> anyhow::Result<bool>
    where
        M: DeletableByValue,
        V: Into<FieldValue> + Send;
}

#[async_trait]
impl DeleteByValue for DatabaseConnection {
    /// Deletes rows of `M` where `field` equals `value`.
    ///
    /// # Errors
    /// Errors if can't establish a connection to the database, or if `field` isn't a column.
    async fn delete_by_value<M, V>(&self, value: V, field: &str) -> anyhow::Result<bool>
    where
        M: DeletableByValue,
        V: Into<FieldValue> + Send,
    {
        let statement = delete_statement::<M>(field)?;
        let deleted = match self.kind {
            DatabaseKind::Sqlite => {
                let mut connection = self.pool.acquire().await?;
                bind_value(sqlx::query(&statement), value.into())
                    .execute(&mut *connection)
                    .await?
                    .rows_affected()
            }
        };
        tracing::debug!(table = M::TABLE, field, deleted, "Deleted rows by value");
        Ok(deleted > 0)
    }
}

#[async_trait]
impl TxDeleteByValue for DatabaseTransaction {
    /// Deletes rows of `M` where `field` equals `value`.
    ///
    /// # Errors
    /// Errors if `field` isn't a column, or if the statement fails.
    async fn delete_by_value<M, V>(&mut self, value: V, field: &str) -> anyhow::Result<bool>
    where
        M: DeletableByValue,
        V: Into<FieldValue> + Send,
    {
        let statement = delete_statement::<M>(field)?;
        let deleted = bind_value(sqlx::query(&statement), value.into())
            .execute(&mut *self.tx)
            .await?
            .rows_affected();
        tracing::debug!(table = M::TABLE, field, deleted, "Deleted rows by value");
        Ok(deleted > 0)
    }
}

/// Quote a table or column name as a single SQL identifier.
fn quote_identifier(identifier: &str) -> String {
    format!("\"{}\"", identifier.replace('"', "\"\""))
}

/// `DELETE` of every row of `M` where `field` equals the first bound parameter.
///
/// `SQLite` reads a quoted name that matches no column as a string literal, so `field`
/// is checked against [`DeletableByValue::COLUMNS`] before any SQL is built.
///
/// # Errors
/// Errors if `field` isn't one of the model's columns.
fn delete_statement<M: DeletableByValue>(field: &str) -> anyhow::Result<String> {
    if !M::COLUMNS.iter().any(|column| *column == field) {
        anyhow::bail!("Unknown column `{field}` on table `{}`", M::TABLE);
    }
    Ok(format!(
        "DELETE FROM {} WHERE {} = $1",
        quote_identifier(M::TABLE),
        quote_identifier(field)
    ))
}

/// Bind a [`FieldValue`] with its native column type.
fn bind_value<'q>(
    query: Query<'q, Any, AnyArguments<'q>>,
    value: FieldValue,
) -> Query<'q, Any, AnyArguments<'q>> {
    match value {
        FieldValue::Text(text) => query.bind(text),
        FieldValue::Integer(integer) => query.bind(integer),
        FieldValue::Bool(boolean) => query.bind(boolean),
    }
}
