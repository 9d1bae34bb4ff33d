//! Migrations as data.
//!
//! A migration describes its `up` and `down` halves as ordered lists of
//! [`SchemaStep`]s. The same list is either executed through a
//! [`SchemaManager`] or rendered to DDL text without a connection.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend};

use crate::dialect::Dialect;
use crate::schema::DbSchema;

#[derive(Debug, Clone)]
pub enum SchemaStep {
    /// Create the schema (PostgreSQL) or database (MySQL) if missing.
    EnsureSchema(DbSchema),
    CreateTable(TableCreateStatement),
    DropTable(TableDropStatement),
    AlterTable(TableAlterStatement),
    CreateIndex(IndexCreateStatement),
    DropIndex(IndexDropStatement),
    /// Skipped on backends that cannot alter foreign keys.
    CreateForeignKey(ForeignKeyCreateStatement),
    /// Skipped on backends that cannot alter foreign keys.
    DropForeignKey(ForeignKeyDropStatement),
}

impl SchemaStep {
    /// Short label for logs and plan listings.
    pub fn kind(&self) -> &'static str {
        match self {
            SchemaStep::EnsureSchema(_) => "ensure schema",
            SchemaStep::CreateTable(_) => "create table",
            SchemaStep::DropTable(_) => "drop table",
            SchemaStep::AlterTable(_) => "alter table",
            SchemaStep::CreateIndex(_) => "create index",
            SchemaStep::DropIndex(_) => "drop index",
            SchemaStep::CreateForeignKey(_) => "create foreign key",
            SchemaStep::DropForeignKey(_) => "drop foreign key",
        }
    }

    fn applies_to(&self, dialect: &Dialect) -> bool {
        match self {
            SchemaStep::EnsureSchema(_) => dialect.has_schemas(),
            SchemaStep::CreateForeignKey(_) | SchemaStep::DropForeignKey(_) => {
                dialect.supports_foreign_key_alter()
            }
            _ => true,
        }
    }
}

/// A migration whose halves are expressed as step lists.
pub trait PlannedMigration: MigrationName + Send + Sync {
    fn up_plan(&self, dialect: &Dialect) -> Vec<SchemaStep>;

    fn down_plan(&self, dialect: &Dialect) -> Vec<SchemaStep>;
}

/// Runs `steps` in order. The first failing statement aborts the run and its
/// error is returned as is.
pub async fn apply(manager: &SchemaManager<'_>, steps: Vec<SchemaStep>) -> Result<(), DbErr> {
    let dialect = Dialect::of(manager);
    for step in steps {
        if !step.applies_to(&dialect) {
            continue;
        }
        match step {
            SchemaStep::EnsureSchema(schema) => {
                if let Some(sql) = dialect.ensure_schema_sql(schema) {
                    manager.get_connection().execute_unprepared(&sql).await?;
                }
            }
            SchemaStep::CreateTable(stmt) => manager.create_table(stmt).await?,
            SchemaStep::DropTable(stmt) => manager.drop_table(stmt).await?,
            SchemaStep::AlterTable(stmt) => manager.alter_table(stmt).await?,
            SchemaStep::CreateIndex(stmt) => manager.create_index(stmt).await?,
            SchemaStep::DropIndex(stmt) => manager.drop_index(stmt).await?,
            SchemaStep::CreateForeignKey(stmt) => manager.create_foreign_key(stmt).await?,
            SchemaStep::DropForeignKey(stmt) => manager.drop_foreign_key(stmt).await?,
        }
    }
    Ok(())
}

/// Renders `steps` to SQL for `backend`, one statement per entry.
pub fn render(backend: DbBackend, steps: &[SchemaStep]) -> Vec<String> {
    let dialect = Dialect::new(backend);
    steps
        .iter()
        .filter(|step| step.applies_to(&dialect))
        .filter_map(|step| match step {
            SchemaStep::EnsureSchema(schema) => dialect.ensure_schema_sql(*schema),
            SchemaStep::CreateTable(stmt) => Some(backend.build(stmt).to_string()),
            SchemaStep::DropTable(stmt) => Some(backend.build(stmt).to_string()),
            SchemaStep::AlterTable(stmt) => Some(backend.build(stmt).to_string()),
            SchemaStep::CreateIndex(stmt) => Some(backend.build(stmt).to_string()),
            SchemaStep::DropIndex(stmt) => Some(backend.build(stmt).to_string()),
            SchemaStep::CreateForeignKey(stmt) => Some(backend.build(stmt).to_string()),
            SchemaStep::DropForeignKey(stmt) => Some(backend.build(stmt).to_string()),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::accounting::JournalEntries;
    use crate::schema::accounting::PostingBatches;
    use sea_orm_migration::prelude::ForeignKeyAction;

    fn steps(dialect: &Dialect) -> Vec<SchemaStep> {
        vec![
            SchemaStep::EnsureSchema(DbSchema::Accounting),
            SchemaStep::CreateForeignKey(dialect.foreign_key_statement(
                DbSchema::Accounting,
                JournalEntries::Table,
                JournalEntries::PostingBatchId,
                PostingBatches::Table,
                ForeignKeyAction::NoAction,
            )),
            SchemaStep::DropTable(dialect.drop_table(DbSchema::Accounting, PostingBatches::Table)),
        ]
    }

    #[test]
    fn renders_every_step_on_postgres() {
        let dialect = Dialect::new(DbBackend::Postgres);
        let sql = render(DbBackend::Postgres, &steps(&dialect));
        assert_eq!(sql.len(), 3);
        assert_eq!(sql[0], r#"CREATE SCHEMA IF NOT EXISTS "accounting""#);
        assert!(
            sql[1].contains("FK_JournalEntries_PostingBatches_PostingBatchId"),
            "{}",
            sql[1]
        );
        assert_eq!(sql[2], r#"DROP TABLE "accounting"."PostingBatches""#);
    }

    #[test]
    fn sqlite_skips_schema_and_foreign_key_alters() {
        let dialect = Dialect::new(DbBackend::Sqlite);
        let sql = render(DbBackend::Sqlite, &steps(&dialect));
        assert_eq!(sql, vec![r#"DROP TABLE "PostingBatches""#.to_owned()]);
    }
}
