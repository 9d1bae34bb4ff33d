//! Catalog introspection of the managed schemas.
//!
//! A [`SchemaSnapshot`] records every table, column, index and foreign key
//! the ERP migrations own, read back from the database catalog. Two snapshots taken
//! around an `up`/`down` pair must be equal for the migration to be reversible.

use std::collections::BTreeMap;
use std::fmt;

use migrations::schema::DbSchema;
use sea_orm::{ConnectionTrait, DbBackend, DbErr, FromQueryResult, Statement};
use serde::Serialize;
use tracing::debug;

/// Bookkeeping table written by the migration runner itself.
const MIGRATION_TABLE: &str = "seaql_migrations";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnShape {
    pub data_type: String,
    pub nullable: bool,
    pub default: Option<String>,
}

impl fmt::Display for ColumnShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}",
            self.data_type,
            if self.nullable { "NULL" } else { "NOT NULL" }
        )?;
        if let Some(default) = &self.default {
            write!(f, " DEFAULT {default}")?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TableShape {
    pub columns: BTreeMap<String, ColumnShape>,
    /// Index name to its definition.
    pub indexes: BTreeMap<String, String>,
    /// Constraint name to columns, principal and delete rule. SQLite keeps no
    /// constraint names, so there the key is the referencing column.
    pub foreign_keys: BTreeMap<String, String>,
}

/// Tables of the managed schemas keyed by `schema.table` (`table` on SQLite).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SchemaSnapshot {
    pub tables: BTreeMap<String, TableShape>,
}

#[derive(Debug, FromQueryResult)]
struct ColumnRow {
    table_key: String,
    column_name: String,
    data_type: String,
    is_nullable: String,
    column_default: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct IndexRow {
    table_key: String,
    index_name: String,
    definition: String,
}

#[derive(Debug, FromQueryResult)]
struct ForeignKeyRow {
    table_key: String,
    constraint_name: String,
    definition: String,
}

#[derive(Debug, FromQueryResult)]
struct SqliteTable {
    name: String,
}

#[derive(Debug, FromQueryResult)]
struct SqliteColumn {
    name: String,
    data_type: String,
    notnull: i32,
    dflt_value: Option<String>,
}

#[derive(Debug, FromQueryResult)]
struct SqliteIndex {
    name: String,
    sql: String,
}

#[derive(Debug, FromQueryResult)]
struct SqliteForeignKey {
    column_name: String,
    principal: String,
    principal_column: Option<String>,
    on_delete: String,
}

impl SchemaSnapshot {
    /// Reads the current shape of every managed table.
    pub async fn capture<C>(db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let backend = db.get_database_backend();
        let snapshot = match backend {
            DbBackend::Postgres | DbBackend::MySql => Self::capture_catalog(db, backend).await?,
            DbBackend::Sqlite => Self::capture_sqlite(db).await?,
        };
        debug!(tables = snapshot.tables.len(), "captured schema snapshot");
        Ok(snapshot)
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn table(&self, key: &str) -> Option<&TableShape> {
        self.tables.get(key)
    }

    /// Human-readable differences from `self` to `other`; empty when equal.
    pub fn diff(&self, other: &SchemaSnapshot) -> Vec<String> {
        let mut out = Vec::new();
        for (name, before) in &self.tables {
            match other.tables.get(name) {
                None => out.push(format!("table {name} is missing")),
                Some(after) => diff_table(name, before, after, &mut out),
            }
        }
        for name in other.tables.keys() {
            if !self.tables.contains_key(name) {
                out.push(format!("table {name} was added"));
            }
        }
        out
    }

    async fn capture_catalog<C>(db: &C, backend: DbBackend) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let schemas = DbSchema::ALL
            .iter()
            .map(|s| format!("'{}'", s.as_str()))
            .collect::<Vec<_>>()
            .join(", ");

        let (columns_sql, indexes_sql, foreign_keys_sql) = match backend {
            DbBackend::Postgres => (
                format!(
                    "SELECT (table_schema || '.' || table_name)::text AS table_key, \
                     column_name::text AS column_name, \
                     CASE WHEN character_maximum_length IS NOT NULL \
                          THEN data_type || '(' || character_maximum_length || ')' \
                          WHEN data_type = 'numeric' \
                          THEN 'numeric(' || numeric_precision || ',' || numeric_scale || ')' \
                          ELSE data_type::text END AS data_type, \
                     is_nullable::text AS is_nullable, \
                     column_default::text AS column_default \
                     FROM information_schema.columns \
                     WHERE table_schema IN ({schemas}) AND table_name <> '{MIGRATION_TABLE}'"
                ),
                format!(
                    "SELECT (schemaname || '.' || tablename)::text AS table_key, \
                     indexname::text AS index_name, indexdef::text AS definition \
                     FROM pg_indexes WHERE schemaname IN ({schemas})"
                ),
                format!(
                    "SELECT (n.nspname || '.' || c.relname)::text AS table_key, \
                     con.conname::text AS constraint_name, \
                     pg_get_constraintdef(con.oid)::text AS definition \
                     FROM pg_constraint con \
                     JOIN pg_class c ON c.oid = con.conrelid \
                     JOIN pg_namespace n ON n.oid = c.relnamespace \
                     WHERE con.contype = 'f' AND n.nspname IN ({schemas})"
                ),
            ),
            _ => (
                format!(
                    "SELECT CAST(CONCAT(TABLE_SCHEMA, '.', TABLE_NAME) AS CHAR) AS table_key, \
                     CAST(COLUMN_NAME AS CHAR) AS column_name, \
                     CAST(CONCAT(COLUMN_TYPE, IF(COLLATION_NAME IS NULL, '', \
                          CONCAT(' COLLATE ', COLLATION_NAME))) AS CHAR) AS data_type, \
                     CAST(IS_NULLABLE AS CHAR) AS is_nullable, \
                     CAST(COLUMN_DEFAULT AS CHAR) AS column_default \
                     FROM information_schema.columns \
                     WHERE TABLE_SCHEMA IN ({schemas}) AND TABLE_NAME <> '{MIGRATION_TABLE}'"
                ),
                format!(
                    "SELECT CAST(CONCAT(TABLE_SCHEMA, '.', TABLE_NAME) AS CHAR) AS table_key, \
                     CAST(INDEX_NAME AS CHAR) AS index_name, \
                     CAST(CONCAT(IF(MAX(NON_UNIQUE) = 0, 'UNIQUE ', ''), '(', \
                          GROUP_CONCAT(CONCAT(COLUMN_NAME, IFNULL(CONCAT('(', SUB_PART, ')'), '')) \
                                       ORDER BY SEQ_IN_INDEX SEPARATOR ', '), ')') AS CHAR) \
                          AS definition \
                     FROM information_schema.statistics \
                     WHERE TABLE_SCHEMA IN ({schemas}) \
                     GROUP BY TABLE_SCHEMA, TABLE_NAME, INDEX_NAME"
                ),
                format!(
                    "SELECT CAST(CONCAT(k.TABLE_SCHEMA, '.', k.TABLE_NAME) AS CHAR) AS table_key, \
                     CAST(k.CONSTRAINT_NAME AS CHAR) AS constraint_name, \
                     CAST(CONCAT('(', GROUP_CONCAT(k.COLUMN_NAME ORDER BY k.ORDINAL_POSITION \
                                                   SEPARATOR ', '), ') -> ', \
                          k.REFERENCED_TABLE_SCHEMA, '.', k.REFERENCED_TABLE_NAME, '(', \
                          GROUP_CONCAT(k.REFERENCED_COLUMN_NAME ORDER BY k.ORDINAL_POSITION \
                                       SEPARATOR ', '), ') ON DELETE ', r.DELETE_RULE) AS CHAR) \
                          AS definition \
                     FROM information_schema.key_column_usage k \
                     JOIN information_schema.referential_constraints r \
                       ON r.CONSTRAINT_SCHEMA = k.CONSTRAINT_SCHEMA \
                      AND r.CONSTRAINT_NAME = k.CONSTRAINT_NAME \
                     WHERE k.TABLE_SCHEMA IN ({schemas}) AND k.REFERENCED_TABLE_NAME IS NOT NULL \
                     GROUP BY k.TABLE_SCHEMA, k.TABLE_NAME, k.CONSTRAINT_NAME, \
                              k.REFERENCED_TABLE_SCHEMA, k.REFERENCED_TABLE_NAME, r.DELETE_RULE"
                ),
            ),
        };

        let columns =
            ColumnRow::find_by_statement(Statement::from_string(backend, columns_sql))
                .all(db)
                .await?;
        let indexes = IndexRow::find_by_statement(Statement::from_string(backend, indexes_sql))
            .all(db)
            .await?;
        let foreign_keys =
            ForeignKeyRow::find_by_statement(Statement::from_string(backend, foreign_keys_sql))
                .all(db)
                .await?;

        let mut snapshot = SchemaSnapshot::default();
        for row in columns {
            snapshot.tables.entry(row.table_key).or_default().columns.insert(
                row.column_name,
                ColumnShape {
                    data_type: row.data_type,
                    nullable: row.is_nullable.eq_ignore_ascii_case("YES"),
                    default: row.column_default,
                },
            );
        }
        for row in indexes {
            snapshot
                .tables
                .entry(row.table_key)
                .or_default()
                .indexes
                .insert(row.index_name, row.definition);
        }
        for row in foreign_keys {
            snapshot
                .tables
                .entry(row.table_key)
                .or_default()
                .foreign_keys
                .insert(row.constraint_name, row.definition);
        }
        Ok(snapshot)
    }

    async fn capture_sqlite<C>(db: &C) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let tables = SqliteTable::find_by_statement(Statement::from_string(
            DbBackend::Sqlite,
            format!(
                "SELECT name FROM sqlite_master WHERE type = 'table' \
                 AND name NOT LIKE 'sqlite_%' AND name <> '{MIGRATION_TABLE}'"
            ),
        ))
        .all(db)
        .await?;

        let mut snapshot = SchemaSnapshot::default();
        for table in tables {
            let mut shape = TableShape::default();

            let columns = SqliteColumn::find_by_statement(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                r#"SELECT name, type AS data_type, "notnull", dflt_value FROM pragma_table_info(?)"#,
                [table.name.clone().into()],
            ))
            .all(db)
            .await?;
            for column in columns {
                shape.columns.insert(
                    column.name,
                    ColumnShape {
                        data_type: column.data_type,
                        nullable: column.notnull == 0,
                        default: column.dflt_value,
                    },
                );
            }

            // Implicit indexes carry no SQL and follow their table.
            let indexes = SqliteIndex::find_by_statement(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                "SELECT name, sql FROM sqlite_master \
                 WHERE type = 'index' AND tbl_name = ? AND sql IS NOT NULL",
                [table.name.clone().into()],
            ))
            .all(db)
            .await?;
            for index in indexes {
                shape.indexes.insert(index.name, index.sql);
            }

            let foreign_keys = SqliteForeignKey::find_by_statement(Statement::from_sql_and_values(
                DbBackend::Sqlite,
                r#"SELECT "from" AS column_name, "table" AS principal, "to" AS principal_column, on_delete FROM pragma_foreign_key_list(?)"#,
                [table.name.clone().into()],
            ))
            .all(db)
            .await?;
            for key in foreign_keys {
                let definition = format!(
                    "-> {}({}) ON DELETE {}",
                    key.principal,
                    key.principal_column.as_deref().unwrap_or("rowid"),
                    key.on_delete
                );
                shape.foreign_keys.insert(key.column_name, definition);
            }

            snapshot.tables.insert(table.name, shape);
        }
        Ok(snapshot)
    }
}

fn diff_table(name: &str, before: &TableShape, after: &TableShape, out: &mut Vec<String>) {
    for (column, shape) in &before.columns {
        match after.columns.get(column) {
            None => out.push(format!("column {name}.{column} is missing")),
            Some(now) if now != shape => {
                out.push(format!("column {name}.{column} changed: {shape} -> {now}"))
            }
            Some(_) => {}
        }
    }
    for column in after.columns.keys() {
        if !before.columns.contains_key(column) {
            out.push(format!("column {name}.{column} was added"));
        }
    }
    diff_definitions("index", name, &before.indexes, &after.indexes, out);
    diff_definitions("foreign key", name, &before.foreign_keys, &after.foreign_keys, out);
}

fn diff_definitions(
    kind: &str,
    table: &str,
    before: &BTreeMap<String, String>,
    after: &BTreeMap<String, String>,
    out: &mut Vec<String>,
) {
    for (key, definition) in before {
        match after.get(key) {
            None => out.push(format!("{kind} {key} on {table} is missing")),
            Some(now) if now != definition => {
                out.push(format!("{kind} {key} on {table} changed: {definition} -> {now}"))
            }
            Some(_) => {}
        }
    }
    for key in after.keys() {
        if !before.contains_key(key) {
            out.push(format!("{kind} {key} on {table} was added"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn column(data_type: &str, nullable: bool) -> ColumnShape {
        ColumnShape {
            data_type: data_type.into(),
            nullable,
            default: None,
        }
    }

    fn snapshot() -> SchemaSnapshot {
        let mut table = TableShape::default();
        table.columns.insert("Id".into(), column("uuid", false));
        table.columns.insert("Status".into(), column("text", false));
        table.indexes.insert(
            "IX_JournalEntries_ReferenceNumber".into(),
            "UNIQUE (ReferenceNumber)".into(),
        );
        let mut snapshot = SchemaSnapshot::default();
        snapshot
            .tables
            .insert("accounting.JournalEntries".into(), table);
        snapshot
    }

    #[test]
    fn equal_snapshots_have_no_diff() {
        assert!(snapshot().diff(&snapshot()).is_empty());
    }

    #[test]
    fn diff_names_changed_columns_and_indexes() {
        let before = snapshot();
        let mut after = snapshot();
        let table = after
            .tables
            .get_mut("accounting.JournalEntries")
            .expect("table present");
        table.columns.insert("Status".into(), column("text", true));
        table.columns.insert("PostingBatchId".into(), column("uuid", true));
        table.indexes.clear();

        let diff = before.diff(&after);
        assert_eq!(diff.len(), 3, "{diff:?}");
        assert!(diff.contains(
            &"column accounting.JournalEntries.Status changed: text NOT NULL -> text NULL"
                .to_owned()
        ));
        assert!(diff.contains(&"column accounting.JournalEntries.PostingBatchId was added".to_owned()));
        assert!(diff.contains(
            &"index IX_JournalEntries_ReferenceNumber on accounting.JournalEntries is missing"
                .to_owned()
        ));
    }

    #[test]
    fn diff_names_changed_foreign_keys() {
        let mut before = snapshot();
        before
            .tables
            .get_mut("accounting.JournalEntries")
            .expect("table present")
            .foreign_keys
            .insert(
                "FK_JournalEntries_PostingBatches_PostingBatchId".into(),
                "(PostingBatchId) -> accounting.PostingBatches(Id) ON DELETE NO ACTION".into(),
            );

        let mut cascading = before.clone();
        cascading
            .tables
            .get_mut("accounting.JournalEntries")
            .expect("table present")
            .foreign_keys
            .insert(
                "FK_JournalEntries_PostingBatches_PostingBatchId".into(),
                "(PostingBatchId) -> accounting.PostingBatches(Id) ON DELETE CASCADE".into(),
            );
        assert_eq!(
            before.diff(&cascading),
            vec![
                "foreign key FK_JournalEntries_PostingBatches_PostingBatchId on accounting.JournalEntries changed: \
                 (PostingBatchId) -> accounting.PostingBatches(Id) ON DELETE NO ACTION -> \
                 (PostingBatchId) -> accounting.PostingBatches(Id) ON DELETE CASCADE"
                    .to_owned()
            ]
        );

        let diff = before.diff(&snapshot());
        assert_eq!(
            diff,
            vec![
                "foreign key FK_JournalEntries_PostingBatches_PostingBatchId on accounting.JournalEntries is missing"
                    .to_owned()
            ]
        );
        assert_eq!(
            snapshot().diff(&before),
            vec![
                "foreign key FK_JournalEntries_PostingBatches_PostingBatchId on accounting.JournalEntries was added"
                    .to_owned()
            ]
        );
    }

    #[test]
    fn diff_reports_whole_tables() {
        let empty = SchemaSnapshot::default();
        assert_eq!(
            snapshot().diff(&empty),
            vec!["table accounting.JournalEntries is missing".to_owned()]
        );
        assert_eq!(
            empty.diff(&snapshot()),
            vec!["table accounting.JournalEntries was added".to_owned()]
        );
    }
}
