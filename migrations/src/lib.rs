pub use sea_orm_migration::prelude::*;

/// Adds `FK_<table>_<principal>_<column>` constraints to a table being created.
macro_rules! foreign_keys {
    ($d:expr, $stmt:expr, $schema:expr, $table:ident {
        $($column:ident -> $principal:ident on delete $action:ident),+ $(,)?
    }) => {
        $(
            $d.foreign_key(
                &mut $stmt,
                $schema,
                $table::Table,
                $table::$column,
                $principal::Table,
                ForeignKeyAction::$action,
            );
        )+
    };
}

pub mod dialect;
pub mod plan;
pub mod schema;

mod m20250813_120433_create_accounting_tables;
mod m20250902_022539_add_accounting_approvals;
mod m20251117_025234_create_store_catalog;
mod m20251117_025235_create_store_procurement;
mod m20251117_025236_create_store_warehouse_ops;
mod m20251117_025237_create_store_sales_imports;
mod m20251120_003209_create_hr_leave_tables;

use plan::PlannedMigration;

macro_rules! migrations {
    ($($module:ident),+ $(,)?) => {
        impl Migrator {
            /// Step plans of every migration, in the order they are applied.
            pub fn plans() -> Vec<Box<dyn PlannedMigration>> {
                vec![$(Box::new($module::Migration)),+]
            }
        }

        #[async_trait::async_trait]
        impl MigratorTrait for Migrator {
            fn migrations() -> Vec<Box<dyn MigrationTrait>> {
                vec![$(Box::new($module::Migration)),+]
            }
        }
    };
}

pub struct Migrator;

migrations![
    m20250813_120433_create_accounting_tables,
    m20250902_022539_add_accounting_approvals,
    m20251117_025234_create_store_catalog,
    m20251117_025235_create_store_procurement,
    m20251117_025236_create_store_warehouse_ops,
    m20251117_025237_create_store_sales_imports,
    m20251120_003209_create_hr_leave_tables,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plans_follow_migration_order() {
        let names: Vec<String> = Migrator::migrations()
            .iter()
            .map(|m| m.name().to_owned())
            .collect();
        let planned: Vec<String> = Migrator::plans()
            .iter()
            .map(|m| m.name().to_owned())
            .collect();
        assert_eq!(names, planned);
        assert_eq!(names.len(), 7);
        assert_eq!(names[0], "m20250813_120433_create_accounting_tables");

        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }

    #[test]
    fn every_plan_renders_on_every_backend() {
        use sea_orm_migration::sea_orm::DbBackend;

        for backend in [DbBackend::Postgres, DbBackend::MySql, DbBackend::Sqlite] {
            let d = dialect::Dialect::new(backend);
            for migration in Migrator::plans() {
                let up = plan::render(backend, &migration.up_plan(&d));
                let down = plan::render(backend, &migration.down_plan(&d));
                assert!(!up.is_empty(), "{backend:?} {}", migration.name());
                assert!(!down.is_empty(), "{backend:?} {}", migration.name());
            }
        }
    }

    #[test]
    fn mysql_keys_and_indexes_name_their_database() {
        use sea_orm_migration::sea_orm::DbBackend;

        let d = dialect::Dialect::new(DbBackend::MySql);
        let sql: Vec<String> = Migrator::plans()
            .iter()
            .flat_map(|m| plan::render(DbBackend::MySql, &m.up_plan(&d)))
            .collect();

        let index = sql
            .iter()
            .find(|s| s.starts_with("CREATE INDEX `IX_LeaveRequest_EmployeeId`"))
            .expect("leave request employee index");
        assert!(index.contains(" ON `hr`.`LeaveRequests` "), "{index}");

        let fk = sql
            .iter()
            .find(|s| s.contains("FK_JournalEntries_PostingBatches_PostingBatchId"))
            .expect("posting batch foreign key");
        assert!(fk.starts_with("ALTER TABLE `accounting`.`JournalEntries`"), "{fk}");
        assert!(fk.contains("REFERENCES `accounting`.`PostingBatches`"), "{fk}");
    }
}
