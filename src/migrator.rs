//! Running, reverting and inspecting the ERP schema migrations.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use migrations::dialect::Dialect;
use migrations::plan;
use migrations::schema::DbSchema;
use migrations::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbBackend, DbErr};
use serde::Serialize;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::db::SchemaSnapshot;
use crate::errors::ServiceError;

/// Which half of each migration to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Applied state of a single migration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct MigrationStatusEntry {
    #[schema(example = "m20251120_003209_create_hr_leave_tables")]
    pub name: String,
    pub applied: bool,
}

/// DDL of one migration half for a given backend.
#[derive(Debug, Clone, Serialize)]
pub struct RenderedMigration {
    pub name: String,
    pub statements: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoundTripOutcome {
    pub migration: String,
    /// Schema differences left behind by `down`; empty when it reverted cleanly.
    pub differences: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct RoundTripReport {
    pub outcomes: Vec<RoundTripOutcome>,
}

impl RoundTripReport {
    pub fn is_clean(&self) -> bool {
        self.outcomes.iter().all(|o| o.differences.is_empty())
    }

    pub fn failures(&self) -> impl Iterator<Item = &RoundTripOutcome> {
        self.outcomes.iter().filter(|o| !o.differences.is_empty())
    }
}

/// Parses the backend names accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackendArg(pub DbBackend);

impl FromStr for BackendArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" | "pg" => Ok(Self(DbBackend::Postgres)),
            "mysql" => Ok(Self(DbBackend::MySql)),
            "sqlite" => Ok(Self(DbBackend::Sqlite)),
            other => Err(format!(
                "unknown backend '{other}', expected postgres, mysql or sqlite"
            )),
        }
    }
}

impl fmt::Display for BackendArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self.0 {
            DbBackend::Postgres => "postgres",
            DbBackend::MySql => "mysql",
            DbBackend::Sqlite => "sqlite",
        })
    }
}

/// Migration operations over one shared connection pool.
#[derive(Clone)]
pub struct MigrationService {
    db: Arc<DatabaseConnection>,
}

impl MigrationService {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Applies pending migrations, all of them when `steps` is `None`.
    pub async fn run_pending(&self, steps: Option<u32>) -> Result<(), ServiceError> {
        info!(?steps, "Applying pending migrations");
        Migrator::up(self.db.as_ref(), steps)
            .await
            .map_err(|e| log_failure("up", e))?;
        info!("Migrations applied");
        Ok(())
    }

    /// Reverts applied migrations, newest first. `None` reverts one.
    pub async fn rollback(&self, steps: Option<u32>) -> Result<(), ServiceError> {
        let steps = steps.unwrap_or(1);
        info!(steps, "Reverting migrations");
        Migrator::down(self.db.as_ref(), Some(steps))
            .await
            .map_err(|e| log_failure("down", e))?;
        info!("Migrations reverted");
        Ok(())
    }

    /// Drops every table and reapplies all migrations.
    ///
    /// The runner's own `fresh` only clears the connection's current schema,
    /// so the ERP schemas are dropped here first.
    pub async fn fresh(&self) -> Result<(), ServiceError> {
        warn!("Dropping all tables and reapplying every migration");
        let db = self.db.as_ref();
        for sql in schema_drop_statements(db.get_database_backend()) {
            info!(%sql, "Dropping schema");
            db.execute_unprepared(&sql)
                .await
                .map_err(|e| log_failure("fresh", e))?;
        }
        Migrator::fresh(db)
            .await
            .map_err(|e| log_failure("fresh", e))?;
        info!("Database rebuilt from migrations");
        Ok(())
    }

    pub async fn status(&self) -> Result<Vec<MigrationStatusEntry>, ServiceError> {
        let applied: Vec<String> = Migrator::get_applied_migrations(self.db.as_ref())
            .await
            .map_err(|e| log_failure("status", e))?
            .iter()
            .map(|m| m.name().to_owned())
            .collect();

        Ok(Migrator::plans()
            .iter()
            .map(|m| MigrationStatusEntry {
                name: m.name().to_owned(),
                applied: applied.iter().any(|name| name == m.name()),
            })
            .collect())
    }

    /// Renders DDL for every migration without touching a database.
    ///
    /// `Down` lists migrations newest first, the order they are reverted in.
    pub fn render_sql(backend: DbBackend, direction: Direction) -> Vec<RenderedMigration> {
        let dialect = Dialect::new(backend);
        let mut plans = Migrator::plans();
        if direction == Direction::Down {
            plans.reverse();
        }
        plans
            .iter()
            .map(|m| {
                let steps = match direction {
                    Direction::Up => m.up_plan(&dialect),
                    Direction::Down => m.down_plan(&dialect),
                };
                RenderedMigration {
                    name: m.name().to_owned(),
                    statements: plan::render(backend, &steps),
                }
            })
            .collect()
    }

    /// Applies each pending migration, reverts it, and compares the schema
    /// with its state before the migration. The migration is then applied
    /// again so the next one starts from the right state.
    pub async fn verify_round_trip(&self) -> Result<RoundTripReport, ServiceError> {
        let db = self.db.as_ref();
        let pending: Vec<String> = Migrator::get_pending_migrations(db)
            .await
            .map_err(|e| log_failure("status", e))?
            .iter()
            .map(|m| m.name().to_owned())
            .collect();

        let mut report = RoundTripReport::default();
        for name in pending {
            let before = SchemaSnapshot::capture(db).await?;

            Migrator::up(db, Some(1))
                .await
                .map_err(|e| log_failure("up", e))?;
            Migrator::down(db, Some(1))
                .await
                .map_err(|e| log_failure("down", e))?;

            let after = SchemaSnapshot::capture(db).await?;
            let differences = before.diff(&after);
            if differences.is_empty() {
                info!(migration = %name, "round trip restored the schema");
            } else {
                warn!(migration = %name, ?differences, "round trip left the schema changed");
            }

            Migrator::up(db, Some(1))
                .await
                .map_err(|e| log_failure("up", e))?;

            report.outcomes.push(RoundTripOutcome {
                migration: name,
                differences,
            });
        }
        Ok(report)
    }
}

/// Drops of the ERP schemas, last-created first. Empty on SQLite.
fn schema_drop_statements(backend: DbBackend) -> Vec<String> {
    let dialect = Dialect::new(backend);
    DbSchema::ALL
        .iter()
        .rev()
        .filter_map(|schema| dialect.drop_schema_sql(*schema))
        .collect()
}

fn log_failure(operation: &str, err: DbErr) -> ServiceError {
    error!(operation, error = %err, "Migration failed");
    ServiceError::migration(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::establish_connection;
    use assert_matches::assert_matches;

    async fn service() -> MigrationService {
        let db = establish_connection("sqlite::memory:").await.unwrap();
        MigrationService::new(Arc::new(db))
    }

    #[test]
    fn backend_names_parse() {
        assert_eq!("pg".parse::<BackendArg>().unwrap().0, DbBackend::Postgres);
        assert_eq!("MySQL".parse::<BackendArg>().unwrap().0, DbBackend::MySql);
        assert_eq!(BackendArg(DbBackend::Sqlite).to_string(), "sqlite");
        assert_matches!("oracle".parse::<BackendArg>(), Err(_));
    }

    #[test]
    fn down_renders_newest_first() {
        let up = MigrationService::render_sql(DbBackend::Postgres, Direction::Up);
        let down = MigrationService::render_sql(DbBackend::Postgres, Direction::Down);
        assert_eq!(up.len(), down.len());
        assert_eq!(up.first().unwrap().name, down.last().unwrap().name);
        assert!(up.iter().all(|m| !m.statements.is_empty()));
    }

    #[test]
    fn fresh_drops_every_erp_schema() {
        assert_eq!(
            schema_drop_statements(DbBackend::Postgres),
            vec![
                r#"DROP SCHEMA IF EXISTS "hr" CASCADE"#,
                r#"DROP SCHEMA IF EXISTS "store" CASCADE"#,
                r#"DROP SCHEMA IF EXISTS "accounting" CASCADE"#,
            ]
        );
        assert_eq!(schema_drop_statements(DbBackend::MySql).len(), 3);
        assert!(schema_drop_statements(DbBackend::Sqlite).is_empty());
    }

    #[tokio::test]
    async fn status_tracks_applied_migrations() {
        let service = service().await;
        let before = service.status().await.unwrap();
        assert!(before.iter().all(|m| !m.applied));

        service.run_pending(Some(2)).await.unwrap();
        let after = service.status().await.unwrap();
        assert_eq!(after.iter().filter(|m| m.applied).count(), 2);
        assert!(after[0].applied && after[1].applied && !after[2].applied);

        service.rollback(None).await.unwrap();
        let reverted = service.status().await.unwrap();
        assert_eq!(reverted.iter().filter(|m| m.applied).count(), 1);
    }
}
