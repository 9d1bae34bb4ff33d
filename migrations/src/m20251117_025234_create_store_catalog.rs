use sea_orm_migration::prelude::*;

use crate::dialect::{Descriptive, Dialect};
use crate::plan::{self, PlannedMigration, SchemaStep};
use crate::schema::store::*;
use crate::schema::{Common, DbSchema};

pub(crate) const SCHEMA: DbSchema = DbSchema::Store;

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
        vec![
            SchemaStep::EnsureSchema(SCHEMA),
            SchemaStep::CreateTable(categories(d)),
            SchemaStep::CreateTable(suppliers(d)),
            SchemaStep::CreateTable(warehouses(d)),
            SchemaStep::CreateTable(warehouse_locations(d)),
            SchemaStep::CreateTable(bins(d)),
            SchemaStep::CreateTable(items(d)),
            SchemaStep::CreateTable(item_suppliers(d)),
            SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, Categories::Table, &[Categories::Code])),
            SchemaStep::CreateIndex(d.index_on(
                SCHEMA,
                Categories::Table,
                &[Categories::ParentCategoryId],
            )),
            SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, Suppliers::Table, &[Suppliers::Code])),
            SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, Warehouses::Table, &[Warehouses::Code])),
            SchemaStep::CreateIndex(d.unique_index_on(
                SCHEMA,
                WarehouseLocations::Table,
                &[WarehouseLocations::Code],
            )),
            SchemaStep::CreateIndex(d.index_on(
                SCHEMA,
                WarehouseLocations::Table,
                &[WarehouseLocations::WarehouseId],
            )),
            SchemaStep::CreateIndex(d.unique_index_on(
                SCHEMA,
                Bins::Table,
                &[Bins::WarehouseLocationId, Bins::Code],
            )),
            SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, Items::Table, &[Items::Barcode])),
            SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, Items::Table, &[Items::Sku])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Items::Table, &[Items::CategoryId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Items::Table, &[Items::SupplierId])),
            SchemaStep::CreateIndex(d.index_on(
                SCHEMA,
                Items::Table,
                &[Items::WarehouseLocationId],
            )),
            // utf8mb4 keys top out at 3072 bytes
            SchemaStep::CreateIndex(d.prefixed_index(
                SCHEMA,
                Items::Table,
                "IX_Items_Name",
                [(Common::Name.into_iden(), Some(768))],
            )),
            SchemaStep::CreateIndex(d.unique_index_on(
                SCHEMA,
                ItemSuppliers::Table,
                &[ItemSuppliers::ItemId, ItemSuppliers::SupplierId],
            )),
            SchemaStep::CreateIndex(d.index_on(
                SCHEMA,
                ItemSuppliers::Table,
                &[ItemSuppliers::SupplierId],
            )),
        ]
    }

    fn down_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        vec![
            SchemaStep::DropTable(d.drop_table(SCHEMA, ItemSuppliers::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Items::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Bins::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, WarehouseLocations::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Categories::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Suppliers::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Warehouses::Table)),
        ]
    }
}

/// Every store table is auditable and descriptive.
pub(crate) fn finish_store_table(
    d: &Dialect,
    mut stmt: TableCreateStatement,
    layout: Descriptive,
) -> TableCreateStatement {
    d.descriptive_columns(&mut stmt, layout);
    d.audit_columns(&mut stmt);
    stmt
}

fn categories(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Categories::Table);
    t.col(d.varchar(Categories::Code, 50).not_null())
        .col(d.guid(Categories::ParentCategoryId).null())
        .col(d.boolean(Categories::IsActive).not_null())
        .col(d.int(Categories::SortOrder).not_null())
        .col(d.varchar(Common::ImageUrl, 500).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        Categories::Table,
        Categories::ParentCategoryId,
        Categories::Table,
        ForeignKeyAction::Restrict,
    );
    finish_store_table(d, t, Descriptive::STORE.without_attachment())
}

fn suppliers(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Suppliers::Table);
    t.col(d.varchar(Suppliers::Code, 50).not_null())
        .col(d.varchar(Suppliers::ContactPerson, 100).not_null())
        .col(d.varchar(Suppliers::Email, 255).not_null())
        .col(d.varchar(Suppliers::Phone, 50).not_null())
        .col(d.varchar(Suppliers::Address, 500).not_null())
        .col(d.varchar(Suppliers::PostalCode, 20).null())
        .col(d.varchar(Suppliers::Website, 255).null())
        .col(d.decimal(Suppliers::CreditLimit, 18, 2).null())
        .col(d.int(Suppliers::PaymentTermsDays).not_null())
        .col(d.boolean(Suppliers::IsActive).not_null())
        .col(d.decimal(Suppliers::Rating, 3, 2).not_null());
    finish_store_table(d, t, Descriptive::STORE)
}

fn warehouses(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Warehouses::Table);
    t.col(d.varchar(Warehouses::Code, 50).not_null())
        .col(d.varchar(Warehouses::Address, 500).not_null())
        .col(d.varchar(Warehouses::ManagerName, 100).not_null())
        .col(d.varchar(Warehouses::ManagerEmail, 255).not_null())
        .col(d.varchar(Warehouses::ManagerPhone, 50).not_null())
        .col(d.decimal(Warehouses::TotalCapacity, 18, 3).not_null())
        .col(d.decimal(Warehouses::UsedCapacity, 18, 3).not_null().default(0))
        .col(d.varchar(Warehouses::CapacityUnit, 20).not_null())
        .col(d.boolean(Warehouses::IsActive).not_null())
        .col(d.boolean(Warehouses::IsMainWarehouse).not_null())
        .col(d.text(Warehouses::WarehouseType).not_null())
        .col(d.timestamp(Warehouses::LastInventoryDate).null());
    finish_store_table(d, t, Descriptive::STORE)
}

fn warehouse_locations(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, WarehouseLocations::Table);
    t.col(d.varchar(WarehouseLocations::Code, 50).not_null())
        .col(d.varchar(WarehouseLocations::Aisle, 20).not_null())
        .col(d.varchar(WarehouseLocations::Section, 20).not_null())
        .col(d.varchar(WarehouseLocations::Shelf, 20).not_null())
        .col(d.varchar(WarehouseLocations::Bin, 20).null())
        .col(d.guid(WarehouseLocations::WarehouseId).not_null())
        .col(d.varchar(WarehouseLocations::LocationType, 50).not_null())
        .col(d.decimal(WarehouseLocations::Capacity, 18, 3).not_null())
        .col(d.varchar(WarehouseLocations::CapacityUnit, 20).not_null())
        .col(
            d.decimal(WarehouseLocations::UsedCapacity, 18, 3)
                .not_null()
                .default(0),
        )
        .col(d.boolean(WarehouseLocations::RequiresTemperatureControl).not_null())
        .col(d.decimal(WarehouseLocations::MinTemperature, 5, 2).null())
        .col(d.decimal(WarehouseLocations::MaxTemperature, 5, 2).null())
        .col(d.varchar(WarehouseLocations::TemperatureUnit, 10).null())
        .col(d.boolean(WarehouseLocations::IsActive).not_null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        WarehouseLocations::Table,
        WarehouseLocations::WarehouseId,
        Warehouses::Table,
        ForeignKeyAction::Cascade,
    );
    finish_store_table(d, t, Descriptive::STORE)
}

fn bins(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Bins::Table);
    t.col(d.varchar(Bins::Code, 50).not_null())
        .col(d.guid(Bins::WarehouseLocationId).not_null())
        .col(d.varchar(Bins::BinType, 50).not_null())
        .col(d.decimal(Bins::Capacity, 18, 2).null())
        .col(d.decimal(Bins::CurrentUtilization, 18, 2).null())
        .col(d.boolean(Bins::IsActive).not_null())
        .col(d.boolean(Bins::IsPickable).not_null())
        .col(d.boolean(Bins::IsPutable).not_null())
        .col(d.int(Bins::Priority).not_null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        Bins::Table,
        Bins::WarehouseLocationId,
        WarehouseLocations::Table,
        ForeignKeyAction::Restrict,
    );
    finish_store_table(d, t, Descriptive::STORE)
}

fn items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Items::Table);
    t.col(d.varchar(Items::Sku, 50).not_null())
        .col(d.varchar(Items::Barcode, 50).not_null())
        .col(d.decimal(Items::UnitPrice, 18, 2).not_null())
        .col(d.decimal(Items::Cost, 18, 2).not_null())
        .col(d.int(Items::MinimumStock).not_null())
        .col(d.int(Items::MaximumStock).not_null())
        .col(d.int(Items::ReorderPoint).not_null())
        .col(d.int(Items::ReorderQuantity).not_null())
        .col(d.int(Items::LeadTimeDays).not_null())
        .col(d.boolean(Items::IsPerishable).not_null())
        .col(d.boolean(Items::IsSerialTracked).not_null())
        .col(d.boolean(Items::IsLotTracked).not_null())
        .col(d.int(Items::ShelfLifeDays).null())
        .col(d.text(Items::Brand).null())
        .col(d.text(Items::Manufacturer).null())
        .col(d.text(Items::ManufacturerPartNumber).null())
        .col(d.decimal(Items::Weight, 18, 3).not_null())
        .col(d.varchar(Items::WeightUnit, 10).null())
        .col(d.decimal(Items::Length, 18, 3).null())
        .col(d.decimal(Items::Width, 18, 3).null())
        .col(d.decimal(Items::Height, 18, 3).null())
        .col(d.varchar(Items::DimensionUnit, 10).null())
        .col(d.guid(Items::CategoryId).not_null())
        .col(d.guid(Items::SupplierId).not_null())
        .col(d.varchar(Items::UnitOfMeasure, 20).not_null())
        .col(d.guid(Items::WarehouseLocationId).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        Items::Table,
        Items::CategoryId,
        Categories::Table,
        ForeignKeyAction::Restrict,
    );
    d.foreign_key(
        &mut t,
        SCHEMA,
        Items::Table,
        Items::SupplierId,
        Suppliers::Table,
        ForeignKeyAction::Restrict,
    );
    d.foreign_key(
        &mut t,
        SCHEMA,
        Items::Table,
        Items::WarehouseLocationId,
        WarehouseLocations::Table,
        ForeignKeyAction::NoAction,
    );
    finish_store_table(d, t, Descriptive::STORE)
}

fn item_suppliers(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, ItemSuppliers::Table);
    t.col(d.guid(ItemSuppliers::ItemId).not_null())
        .col(d.guid(ItemSuppliers::SupplierId).not_null())
        .col(d.varchar(ItemSuppliers::SupplierPartNumber, 100).null())
        .col(d.decimal(ItemSuppliers::UnitCost, 18, 2).not_null())
        .col(d.int(ItemSuppliers::LeadTimeDays).not_null())
        .col(d.int(ItemSuppliers::MinimumOrderQuantity).not_null())
        .col(d.int(ItemSuppliers::PackagingQuantity).null())
        .col(d.boolean(ItemSuppliers::IsPreferred).not_null())
        .col(d.boolean(ItemSuppliers::IsActive).not_null())
        .col(d.decimal(ItemSuppliers::ReliabilityRating, 16, 2).null())
        .col(d.timestamp(ItemSuppliers::LastPriceUpdate).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        ItemSuppliers::Table,
        ItemSuppliers::ItemId,
        Items::Table,
        ForeignKeyAction::Restrict,
    );
    d.foreign_key(
        &mut t,
        SCHEMA,
        ItemSuppliers::Table,
        ItemSuppliers::SupplierId,
        Suppliers::Table,
        ForeignKeyAction::Restrict,
    );
    finish_store_table(d, t, Descriptive::STORE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::DbBackend;

    #[test]
    fn categories_reference_themselves() {
        let d = Dialect::new(DbBackend::Postgres);
        let sql = plan::render(DbBackend::Postgres, &Migration.up_plan(&d));
        let categories = sql
            .iter()
            .find(|s| s.starts_with(r#"CREATE TABLE "store"."Categories""#))
            .expect("Categories is created");
        assert!(categories.contains(r#"REFERENCES "store"."Categories" ("Id")"#));
        assert!(categories.contains("ON DELETE RESTRICT"));
        assert!(categories.contains(r#""ImageUrl" varchar(500)"#));
    }

    #[test]
    fn composite_unique_index_names_list_columns() {
        let d = Dialect::new(DbBackend::Postgres);
        let sql = plan::render(DbBackend::Postgres, &Migration.up_plan(&d));
        assert!(sql.iter().any(|s| s.starts_with(
            r#"CREATE UNIQUE INDEX "IX_Bins_WarehouseLocationId_Code" ON "store"."Bins""#
        )));
    }
}
