use sea_orm_migration::prelude::*;

use crate::dialect::{Descriptive, Dialect};
use crate::m20251117_025234_create_store_catalog::{finish_store_table, SCHEMA};
use crate::plan::{self, PlannedMigration, SchemaStep};
use crate::schema::store::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        plan::apply(manager, self.up_plan(&Dialect::of(manager))).await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        plan::apply(manager, self.down_plan(&Dialect::of(manager))).await
    }
}

impl PlannedMigration for Migration {
    fn up_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        use crate::schema::store::{SalesImportItems as Line, SalesImports as Import};

        vec![
            SchemaStep::CreateTable(sales_imports(d)),
            SchemaStep::CreateTable(sales_import_items(d)),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Import::Table, &[Import::ImportDate])),
            SchemaStep::CreateIndex(d.unique_index_on(
                SCHEMA,
                Import::Table,
                &[Import::ImportNumber],
            )),
            SchemaStep::CreateIndex(d.index_on(
                SCHEMA,
                Import::Table,
                &[Import::SalesPeriodFrom, Import::SalesPeriodTo],
            )),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Import::Table, &[Import::Status])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Import::Table, &[Import::WarehouseId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Line::Table, &[Line::Barcode])),
            SchemaStep::CreateIndex(d.index_on(
                SCHEMA,
                Line::Table,
                &[Line::InventoryTransactionId],
            )),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Line::Table, &[Line::ItemId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Line::Table, &[Line::SalesImportId])),
            SchemaStep::CreateIndex(d.unique_index_on(
                SCHEMA,
                Line::Table,
                &[Line::SalesImportId, Line::LineNumber],
            )),
        ]
    }

    fn down_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        vec![
            SchemaStep::DropTable(d.drop_table(SCHEMA, SalesImportItems::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, SalesImports::Table)),
        ]
    }
}

fn sales_imports(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, SalesImports::Table);
    t.col(d.varchar(SalesImports::ImportNumber, 100).not_null())
        .col(d.timestamp(SalesImports::ImportDate).not_null())
        .col(d.timestamp(SalesImports::SalesPeriodFrom).not_null())
        .col(d.timestamp(SalesImports::SalesPeriodTo).not_null())
        .col(d.guid(SalesImports::WarehouseId).not_null())
        .col(d.varchar(SalesImports::FileName, 255).not_null())
        .col(d.int(SalesImports::TotalRecords).not_null())
        .col(d.int(SalesImports::ProcessedRecords).not_null())
        .col(d.int(SalesImports::ErrorRecords).not_null())
        .col(d.int(SalesImports::TotalQuantity).not_null())
        .col(d.decimal(SalesImports::TotalValue, 16, 2).null())
        .col(d.varchar(SalesImports::Status, 20).not_null())
        .col(d.boolean(SalesImports::IsReversed).not_null())
        .col(d.timestamp(SalesImports::ReversedDate).null())
        .col(d.varchar(SalesImports::ReversedBy, 256).null())
        .col(d.varchar(SalesImports::ReversalReason, 500).null())
        .col(d.varchar(SalesImports::ProcessedBy, 256).null())
        .col(d.varchar(SalesImports::ErrorMessage, 1000).null());
    foreign_keys!(d, t, SCHEMA, SalesImports {
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn sales_import_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, SalesImportItems::Table);
    t.col(d.guid(SalesImportItems::SalesImportId).not_null())
        .col(d.int(SalesImportItems::LineNumber).not_null())
        .col(d.timestamp(SalesImportItems::SaleDate).not_null())
        .col(d.varchar(SalesImportItems::Barcode, 100).not_null())
        .col(d.varchar(SalesImportItems::ItemName, 255).null())
        .col(d.int(SalesImportItems::QuantitySold).not_null())
        .col(d.decimal(SalesImportItems::UnitPrice, 16, 2).null())
        .col(d.decimal(SalesImportItems::TotalAmount, 16, 2).null())
        .col(d.guid(SalesImportItems::ItemId).null())
        .col(d.guid(SalesImportItems::InventoryTransactionId).null())
        .col(d.boolean(SalesImportItems::IsProcessed).not_null())
        .col(d.boolean(SalesImportItems::HasError).not_null())
        .col(d.varchar(SalesImportItems::ErrorMessage, 1000).null());
    foreign_keys!(d, t, SCHEMA, SalesImportItems {
        InventoryTransactionId -> InventoryTransactions on delete Restrict,
        ItemId -> Items on delete Restrict,
        SalesImportId -> SalesImports on delete Cascade,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::DbBackend;

    #[test]
    fn import_lines_are_unique_per_import() {
        let d = Dialect::new(DbBackend::Postgres);
        let sql = plan::render(DbBackend::Postgres, &Migration.up_plan(&d));
        assert!(sql.iter().any(|s| s.starts_with(
            r#"CREATE UNIQUE INDEX "IX_SalesImportItems_SalesImportId_LineNumber""#
        )));
        let lines = &sql[1];
        assert!(lines.contains("ON DELETE CASCADE"), "{lines}");
    }
}
