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
        use crate::schema::store::{
            GoodsReceiptItems as Gri, GoodsReceipts as Gr, PurchaseOrderItems as Poi,
            PurchaseOrders as Po,
        };

        vec![
            SchemaStep::CreateTable(purchase_orders(d)),
            SchemaStep::CreateTable(purchase_order_items(d)),
            SchemaStep::CreateTable(goods_receipts(d)),
            SchemaStep::CreateTable(goods_receipt_items(d)),
            // purchase orders
            SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, Po::Table, &[Po::OrderNumber])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Po::Table, &[Po::SupplierId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Po::Table, &[Po::OrderDate])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Po::Table, &[Po::ExpectedDeliveryDate])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Po::Table, &[Po::Status])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Po::Table, &[Po::Status, Po::OrderDate])),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                Po::Table,
                "IX_PurchaseOrders_Supplier_OrderDate",
                [Po::SupplierId, Po::OrderDate],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                Po::Table,
                "IX_PurchaseOrders_Supplier_Status",
                [Po::SupplierId, Po::Status],
            )),
            // purchase order lines
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Poi::Table, &[Poi::PurchaseOrderId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Poi::Table, &[Poi::ItemId])),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                Poi::Table,
                "IX_PurchaseOrderItems_PurchaseOrder_Item",
                [Poi::PurchaseOrderId, Poi::ItemId],
            )),
            // goods receipts
            SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, Gr::Table, &[Gr::ReceiptNumber])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gr::Table, &[Gr::PurchaseOrderId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gr::Table, &[Gr::WarehouseId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gr::Table, &[Gr::ReceivedDate])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gr::Table, &[Gr::Status])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gr::Table, &[Gr::Status, Gr::ReceivedDate])),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                Gr::Table,
                "IX_GoodsReceipts_Warehouse_ReceivedDate",
                [Gr::WarehouseId, Gr::ReceivedDate],
            )),
            // goods receipt lines
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gri::Table, &[Gri::GoodsReceiptId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gri::Table, &[Gri::ItemId])),
            SchemaStep::CreateIndex(d.index_on(SCHEMA, Gri::Table, &[Gri::PurchaseOrderItemId])),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                Gri::Table,
                "IX_GoodsReceiptItems_Receipt_Item",
                [Gri::GoodsReceiptId, Gri::ItemId],
            )),
        ]
    }

    fn down_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        vec![
            SchemaStep::DropTable(d.drop_table(SCHEMA, GoodsReceiptItems::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, GoodsReceipts::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, PurchaseOrderItems::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, PurchaseOrders::Table)),
        ]
    }
}

fn purchase_orders(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, PurchaseOrders::Table);
    t.col(d.varchar(PurchaseOrders::OrderNumber, 50).not_null())
        .col(d.guid(PurchaseOrders::SupplierId).not_null())
        .col(d.timestamp(PurchaseOrders::OrderDate).not_null())
        .col(d.timestamp(PurchaseOrders::ExpectedDeliveryDate).null())
        .col(d.timestamp(PurchaseOrders::ActualDeliveryDate).null())
        .col(d.varchar(PurchaseOrders::Status, 50).not_null())
        .col(d.decimal(PurchaseOrders::TotalAmount, 18, 2).not_null())
        .col(d.decimal(PurchaseOrders::TaxAmount, 18, 2).not_null())
        .col(d.decimal(PurchaseOrders::DiscountAmount, 18, 2).not_null())
        .col(d.decimal(PurchaseOrders::ShippingCost, 16, 2).not_null())
        .col(d.decimal(PurchaseOrders::NetAmount, 18, 2).not_null())
        .col(d.varchar(PurchaseOrders::DeliveryAddress, 500).null())
        .col(d.varchar(PurchaseOrders::ContactPerson, 100).null())
        .col(d.varchar(PurchaseOrders::ContactPhone, 50).null())
        .col(d.boolean(PurchaseOrders::IsUrgent).not_null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        PurchaseOrders::Table,
        PurchaseOrders::SupplierId,
        Suppliers::Table,
        ForeignKeyAction::Restrict,
    );
    finish_store_table(d, t, Descriptive::STORE)
}

fn purchase_order_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, PurchaseOrderItems::Table);
    t.col(d.guid(PurchaseOrderItems::PurchaseOrderId).not_null())
        .col(d.guid(PurchaseOrderItems::ItemId).not_null())
        .col(d.int(PurchaseOrderItems::Quantity).not_null())
        .col(d.decimal(PurchaseOrderItems::UnitPrice, 18, 2).not_null())
        .col(d.decimal(PurchaseOrderItems::DiscountAmount, 18, 2).not_null())
        .col(
            d.int(PurchaseOrderItems::ReceivedQuantity)
                .not_null()
                .default(0),
        )
        .col(d.decimal(PurchaseOrderItems::TotalPrice, 18, 2).not_null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        PurchaseOrderItems::Table,
        PurchaseOrderItems::PurchaseOrderId,
        PurchaseOrders::Table,
        ForeignKeyAction::Cascade,
    );
    d.foreign_key(
        &mut t,
        SCHEMA,
        PurchaseOrderItems::Table,
        PurchaseOrderItems::ItemId,
        Items::Table,
        ForeignKeyAction::Restrict,
    );
    finish_store_table(d, t, Descriptive::STORE)
}

fn goods_receipts(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, GoodsReceipts::Table);
    t.col(d.varchar(GoodsReceipts::ReceiptNumber, 100).not_null())
        .col(d.guid(GoodsReceipts::PurchaseOrderId).null())
        .col(d.guid(GoodsReceipts::WarehouseId).not_null())
        .col(d.guid(GoodsReceipts::WarehouseLocationId).null())
        .col(d.timestamp(GoodsReceipts::ReceivedDate).not_null())
        .col(d.varchar(GoodsReceipts::Status, 50).not_null());
    finish_store_table(d, t, Descriptive::STORE)
}

fn goods_receipt_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, GoodsReceiptItems::Table);
    t.col(d.guid(GoodsReceiptItems::GoodsReceiptId).not_null())
        .col(d.guid(GoodsReceiptItems::ItemId).not_null())
        .col(d.guid(GoodsReceiptItems::PurchaseOrderItemId).null())
        .col(d.int(GoodsReceiptItems::Quantity).not_null())
        .col(d.decimal(GoodsReceiptItems::UnitCost, 18, 2).not_null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        GoodsReceiptItems::Table,
        GoodsReceiptItems::GoodsReceiptId,
        GoodsReceipts::Table,
        ForeignKeyAction::Cascade,
    );
    finish_store_table(d, t, Descriptive::STORE)
}
