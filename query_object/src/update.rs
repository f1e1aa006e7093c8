//! Update-by-key
//!
//! `UPDATE table SET c1 = $1, ..., changed_at = $k WHERE pk = $k+1`. The
//! changed-at stamp is always bound after the explicit changes and before
//! the key.

use crate::errors::QueryError;
use crate::translator::{BoundParam, QueryTranslator};
use crate::validation::ValidatedFieldName;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use type_mapping::{Coercion, SqlValue};

pub const DEFAULT_CHANGED_AT_COLUMN: &str = "changed_at";

/// How change-set keys are turned into column names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateColumns {
    /// Keys are logical names resolved through the allow-list
    #[default]
    AllowList,
    /// Keys are physical column names, checked as plain identifiers
    Physical,
}

/// Ordered column assignments
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    entries: Vec<(String, SqlValue)>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder form of [`ChangeSet::insert`]
    pub fn set(mut self, field: impl Into<String>, value: impl Into<SqlValue>) -> Self {
        self.insert(field, value);
        self
    }

    /// Assign a field; a repeated field keeps its position and takes the new value
    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<SqlValue>) {
        let field = field.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == field) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((field, value)),
        }
    }

    pub fn get(&self, field: &str) -> Option<&SqlValue> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == field)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SqlValue)> {
        self.entries.iter().map(|(field, value)| (field.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ChangeSet
where
    K: Into<String>,
    V: Into<SqlValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut changes = ChangeSet::new();
        for (field, value) in iter {
            changes.insert(field, value);
        }
        changes
    }
}

/// Inputs of one update call
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateRequest {
    pub table: String,
    pub pk_column: String,
    pub changes: ChangeSet,
    pub pk_value: SqlValue,
}

impl UpdateRequest {
    pub fn new(
        table: impl Into<String>,
        pk_column: impl Into<String>,
        changes: ChangeSet,
        pk_value: impl Into<SqlValue>,
    ) -> Self {
        Self {
            table: table.into(),
            pk_column: pk_column.into(),
            changes,
            pk_value: pk_value.into(),
        }
    }
}

/// Generated UPDATE statement and its parameters in placeholder order
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateStatement {
    pub sql: String,
    pub params: Vec<BoundParam>,
}

impl QueryTranslator {
    /// Build the UPDATE statement for `request`, stamping `changed_at`.
    ///
    /// Every identifier is checked before any SQL is produced.
    pub fn build_update(
        &self,
        request: &UpdateRequest,
        columns: UpdateColumns,
        changed_at_column: &str,
        changed_at: DateTime<Utc>,
    ) -> Result<UpdateStatement, QueryError> {
        if request.changes.is_empty() {
            return Err(QueryError::EmptyChangeSet);
        }

        let changed_at_column = ValidatedFieldName::new(changed_at_column)?;
        let pk_column = ValidatedFieldName::new(&request.pk_column)?;

        let mut assignments = Vec::with_capacity(request.changes.len() + 1);
        let mut params = Vec::with_capacity(request.changes.len() + 2);

        for (field, value) in request.changes.iter() {
            let (column, coercion) = match columns {
                UpdateColumns::AllowList => (
                    self.allow_list().resolve(field)?.to_string(),
                    self.field_sets().coercion_for(field),
                ),
                UpdateColumns::Physical => {
                    (ValidatedFieldName::new(field)?.into_string(), Coercion::None)
                }
            };

            if column.eq_ignore_ascii_case(changed_at_column.as_str()) {
                return Err(QueryError::ReservedColumn(field.to_string()));
            }

            params.push(BoundParam {
                field: field.to_string(),
                value: value.clone(),
                coercion,
            });
            assignments.push(format!(
                "{} = {}",
                column,
                self.dialect().placeholder(params.len())
            ));
        }

        params.push(BoundParam {
            field: changed_at_column.to_string(),
            value: SqlValue::TimestampTz(changed_at),
            coercion: Coercion::None,
        });
        assignments.push(format!(
            "{} = {}",
            changed_at_column,
            self.dialect().placeholder(params.len())
        ));

        params.push(BoundParam {
            field: pk_column.to_string(),
            value: request.pk_value.clone(),
            coercion: Coercion::None,
        });
        let sql = format!(
            "UPDATE {} SET {} WHERE {} = {}",
            request.table,
            assignments.join(", "),
            pk_column,
            self.dialect().placeholder(params.len())
        );

        Ok(UpdateStatement { sql, params })
    }
}
