use sea_orm_migration::prelude::*;

use crate::dialect::{index_name, Descriptive, Dialect};
use crate::m20251117_025234_create_store_catalog::{finish_store_table, SCHEMA};
use crate::plan::{self, PlannedMigration, SchemaStep};
use crate::schema::store::*;

/// Characters of a free-text column keyed by a MySQL index.
const TEXT_KEY_PREFIX: u32 = 255;

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
        let mut steps: Vec<SchemaStep> = [
            lot_numbers(d),
            serial_numbers(d),
            stock_levels(d),
            inventory_reservations(d),
            inventory_transactions(d),
            pick_lists(d),
            pick_list_items(d),
            put_away_tasks(d),
            put_away_task_items(d),
            cycle_counts(d),
            cycle_count_items(d),
            stock_adjustments(d),
            inventory_transfers(d),
            inventory_transfer_items(d),
        ]
        .into_iter()
        .map(SchemaStep::CreateTable)
        .collect();

        steps.extend(lot_number_indexes(d));
        steps.extend(serial_number_indexes(d));
        steps.extend(stock_level_indexes(d));
        steps.extend(reservation_indexes(d));
        steps.extend(transaction_indexes(d));
        steps.extend(pick_list_indexes(d));
        steps.extend(put_away_indexes(d));
        steps.extend(cycle_count_indexes(d));
        steps.extend(adjustment_indexes(d));
        steps.extend(transfer_indexes(d));
        steps
    }

    fn down_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        vec![
            SchemaStep::DropTable(d.drop_table(SCHEMA, InventoryTransferItems::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, InventoryTransfers::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, StockAdjustments::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, CycleCountItems::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, CycleCounts::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, PutAwayTaskItems::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, PutAwayTasks::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, PickListItems::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, PickLists::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, InventoryTransactions::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, InventoryReservations::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, StockLevels::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, SerialNumbers::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, LotNumbers::Table)),
        ]
    }
}

fn lot_numbers(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, LotNumbers::Table);
    t.col(d.varchar(LotNumbers::LotCode, 100).not_null())
        .col(d.guid(LotNumbers::ItemId).not_null())
        .col(d.guid(LotNumbers::SupplierId).null())
        .col(d.timestamp(LotNumbers::ManufactureDate).null())
        .col(d.timestamp(LotNumbers::ExpirationDate).null())
        .col(d.timestamp(LotNumbers::ReceiptDate).not_null())
        .col(d.int(LotNumbers::QuantityReceived).not_null())
        .col(d.int(LotNumbers::QuantityRemaining).not_null())
        .col(d.varchar(LotNumbers::Status, 50).not_null())
        .col(d.text(LotNumbers::QualityNotes).null());
    foreign_keys!(d, t, SCHEMA, LotNumbers {
        ItemId -> Items on delete Restrict,
        SupplierId -> Suppliers on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn serial_numbers(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, SerialNumbers::Table);
    t.col(d.varchar(SerialNumbers::SerialNumberValue, 100).not_null())
        .col(d.guid(SerialNumbers::ItemId).not_null())
        .col(d.guid(SerialNumbers::WarehouseId).null())
        .col(d.guid(SerialNumbers::WarehouseLocationId).null())
        .col(d.guid(SerialNumbers::BinId).null())
        .col(d.guid(SerialNumbers::LotNumberId).null())
        .col(d.varchar(SerialNumbers::Status, 50).not_null())
        .col(d.timestamp(SerialNumbers::ReceiptDate).not_null())
        .col(d.timestamp(SerialNumbers::ManufactureDate).null())
        .col(d.timestamp(SerialNumbers::WarrantyExpirationDate).null())
        .col(d.text(SerialNumbers::ExternalReference).null());
    foreign_keys!(d, t, SCHEMA, SerialNumbers {
        BinId -> Bins on delete Restrict,
        ItemId -> Items on delete Restrict,
        LotNumberId -> LotNumbers on delete Restrict,
        WarehouseLocationId -> WarehouseLocations on delete Restrict,
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn stock_levels(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, StockLevels::Table);
    t.col(d.guid(StockLevels::ItemId).not_null())
        .col(d.guid(StockLevels::WarehouseId).not_null())
        .col(d.guid(StockLevels::WarehouseLocationId).null())
        .col(d.guid(StockLevels::BinId).null())
        .col(d.guid(StockLevels::LotNumberId).null())
        .col(d.guid(StockLevels::SerialNumberId).null())
        .col(d.int(StockLevels::QuantityOnHand).not_null())
        .col(d.int(StockLevels::QuantityAvailable).not_null())
        .col(d.int(StockLevels::QuantityReserved).not_null())
        .col(d.int(StockLevels::QuantityAllocated).not_null())
        .col(d.timestamp(StockLevels::LastCountDate).null())
        .col(d.timestamp(StockLevels::LastMovementDate).null());
    foreign_keys!(d, t, SCHEMA, StockLevels {
        BinId -> Bins on delete Restrict,
        ItemId -> Items on delete Restrict,
        LotNumberId -> LotNumbers on delete Restrict,
        SerialNumberId -> SerialNumbers on delete Restrict,
        WarehouseLocationId -> WarehouseLocations on delete Restrict,
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn inventory_reservations(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, InventoryReservations::Table);
    t.col(d.varchar(InventoryReservations::ReservationNumber, 50).not_null())
        .col(d.guid(InventoryReservations::ItemId).not_null())
        .col(d.guid(InventoryReservations::WarehouseId).not_null())
        .col(d.guid(InventoryReservations::WarehouseLocationId).null())
        .col(d.guid(InventoryReservations::BinId).null())
        .col(d.guid(InventoryReservations::LotNumberId).null())
        .col(d.int(InventoryReservations::QuantityReserved).not_null())
        .col(d.varchar(InventoryReservations::ReservationType, 50).not_null())
        .col(d.varchar(InventoryReservations::Status, 50).not_null())
        .col(d.varchar(InventoryReservations::ReferenceNumber, 100).null())
        .col(d.timestamp(InventoryReservations::ReservationDate).not_null())
        .col(d.timestamp(InventoryReservations::ExpirationDate).null())
        .col(d.timestamp(InventoryReservations::CompletionDate).null())
        .col(d.text(InventoryReservations::ReservedBy).null())
        .col(d.text(InventoryReservations::ReleaseReason).null());
    foreign_keys!(d, t, SCHEMA, InventoryReservations {
        BinId -> Bins on delete Restrict,
        ItemId -> Items on delete Restrict,
        LotNumberId -> LotNumbers on delete Restrict,
        WarehouseLocationId -> WarehouseLocations on delete Restrict,
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn inventory_transactions(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, InventoryTransactions::Table);
    t.col(d.varchar(InventoryTransactions::TransactionNumber, 50).not_null())
        .col(d.guid(InventoryTransactions::ItemId).not_null())
        .col(d.guid(InventoryTransactions::WarehouseId).null())
        .col(d.guid(InventoryTransactions::WarehouseLocationId).null())
        .col(d.guid(InventoryTransactions::PurchaseOrderId).null())
        .col(d.varchar(InventoryTransactions::TransactionType, 20).not_null())
        .col(d.varchar(InventoryTransactions::Reason, 100).not_null())
        .col(d.int(InventoryTransactions::Quantity).not_null())
        .col(d.int(InventoryTransactions::QuantityBefore).not_null())
        .col(d.int(InventoryTransactions::QuantityAfter).not_null())
        .col(d.decimal(InventoryTransactions::UnitCost, 18, 2).not_null())
        .col(d.decimal(InventoryTransactions::TotalCost, 18, 2).not_null())
        .col(d.timestamp(InventoryTransactions::TransactionDate).not_null())
        .col(d.varchar(InventoryTransactions::Reference, 100).null())
        .col(d.varchar(InventoryTransactions::PerformedBy, 100).null())
        .col(d.boolean(InventoryTransactions::IsApproved).not_null())
        .col(d.varchar(InventoryTransactions::ApprovedBy, 100).null())
        .col(d.timestamp(InventoryTransactions::ApprovalDate).null());
    foreign_keys!(d, t, SCHEMA, InventoryTransactions {
        ItemId -> Items on delete Restrict,
        PurchaseOrderId -> PurchaseOrders on delete SetNull,
        WarehouseLocationId -> WarehouseLocations on delete SetNull,
        WarehouseId -> Warehouses on delete SetNull,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn pick_lists(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, PickLists::Table);
    t.col(d.varchar(PickLists::PickListNumber, 50).not_null())
        .col(d.guid(PickLists::WarehouseId).not_null())
        .col(d.varchar(PickLists::Status, 50).not_null())
        .col(d.varchar(PickLists::PickingType, 50).not_null())
        .col(d.int(PickLists::Priority).not_null())
        .col(d.text(PickLists::AssignedTo).null())
        .col(d.timestamp(PickLists::StartDate).null())
        .col(d.timestamp(PickLists::CompletedDate).null())
        .col(d.timestamp(PickLists::ExpectedCompletionDate).null())
        .col(d.text(PickLists::ReferenceNumber).null())
        .col(d.int(PickLists::TotalLines).not_null())
        .col(d.int(PickLists::CompletedLines).not_null());
    foreign_keys!(d, t, SCHEMA, PickLists {
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn pick_list_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, PickListItems::Table);
    t.col(d.guid(PickListItems::PickListId).not_null())
        .col(d.guid(PickListItems::ItemId).not_null())
        .col(d.guid(PickListItems::BinId).null())
        .col(d.guid(PickListItems::LotNumberId).null())
        .col(d.guid(PickListItems::SerialNumberId).null())
        .col(d.int(PickListItems::QuantityToPick).not_null())
        .col(d.int(PickListItems::QuantityPicked).not_null())
        .col(d.varchar(PickListItems::Status, 50).not_null())
        .col(d.int(PickListItems::SequenceNumber).not_null())
        .col(d.timestamp(PickListItems::PickedDate).null());
    foreign_keys!(d, t, SCHEMA, PickListItems {
        BinId -> Bins on delete Restrict,
        ItemId -> Items on delete Restrict,
        LotNumberId -> LotNumbers on delete Restrict,
        PickListId -> PickLists on delete Cascade,
        SerialNumberId -> SerialNumbers on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn put_away_tasks(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, PutAwayTasks::Table);
    t.col(d.varchar(PutAwayTasks::TaskNumber, 50).not_null())
        .col(d.guid(PutAwayTasks::WarehouseId).not_null())
        .col(d.guid(PutAwayTasks::GoodsReceiptId).null())
        .col(d.varchar(PutAwayTasks::Status, 50).not_null())
        .col(d.int(PutAwayTasks::Priority).not_null())
        .col(d.text(PutAwayTasks::AssignedTo).null())
        .col(d.timestamp(PutAwayTasks::StartDate).null())
        .col(d.timestamp(PutAwayTasks::CompletedDate).null())
        .col(d.varchar(PutAwayTasks::PutAwayStrategy, 50).not_null())
        .col(d.int(PutAwayTasks::TotalLines).not_null())
        .col(d.int(PutAwayTasks::CompletedLines).not_null());
    foreign_keys!(d, t, SCHEMA, PutAwayTasks {
        GoodsReceiptId -> GoodsReceipts on delete Restrict,
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn put_away_task_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, PutAwayTaskItems::Table);
    t.col(d.guid(PutAwayTaskItems::PutAwayTaskId).not_null())
        .col(d.guid(PutAwayTaskItems::ItemId).not_null())
        .col(d.guid(PutAwayTaskItems::ToBinId).not_null())
        .col(d.guid(PutAwayTaskItems::LotNumberId).null())
        .col(d.guid(PutAwayTaskItems::SerialNumberId).null())
        .col(d.int(PutAwayTaskItems::QuantityToPutAway).not_null())
        .col(d.int(PutAwayTaskItems::QuantityPutAway).not_null())
        .col(d.varchar(PutAwayTaskItems::Status, 50).not_null())
        .col(d.int(PutAwayTaskItems::SequenceNumber).not_null())
        .col(d.timestamp(PutAwayTaskItems::PutAwayDate).null());
    foreign_keys!(d, t, SCHEMA, PutAwayTaskItems {
        ItemId -> Items on delete Restrict,
        LotNumberId -> LotNumbers on delete Restrict,
        PutAwayTaskId -> PutAwayTasks on delete Cascade,
        SerialNumberId -> SerialNumbers on delete Restrict,
        ToBinId -> Bins on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn cycle_counts(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, CycleCounts::Table);
    t.col(d.varchar(CycleCounts::CountNumber, 50).not_null())
        .col(d.guid(CycleCounts::WarehouseId).not_null())
        .col(d.guid(CycleCounts::WarehouseLocationId).null())
        .col(d.timestamp(CycleCounts::ScheduledDate).not_null())
        .col(d.timestamp(CycleCounts::ActualStartDate).null())
        .col(d.timestamp(CycleCounts::CompletionDate).null())
        .col(d.varchar(CycleCounts::Status, 50).not_null())
        .col(d.varchar(CycleCounts::CountType, 50).not_null())
        .col(d.varchar(CycleCounts::CounterName, 100).null())
        .col(d.varchar(CycleCounts::SupervisorName, 100).null())
        .col(d.int(CycleCounts::TotalItemsToCount).not_null())
        .col(d.int(CycleCounts::ItemsCountedCorrect).not_null())
        .col(d.int(CycleCounts::ItemsWithDiscrepancies).not_null())
        .col(d.decimal(CycleCounts::AccuracyPercentage, 5, 2).not_null());
    foreign_keys!(d, t, SCHEMA, CycleCounts {
        WarehouseLocationId -> WarehouseLocations on delete SetNull,
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn cycle_count_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, CycleCountItems::Table);
    t.col(d.guid(CycleCountItems::CycleCountId).not_null())
        .col(d.guid(CycleCountItems::ItemId).not_null())
        .col(d.int(CycleCountItems::SystemQuantity).not_null())
        .col(d.int(CycleCountItems::CountedQuantity).null())
        .col(d.int(CycleCountItems::VarianceQuantity).null())
        .col(d.timestamp(CycleCountItems::CountDate).null())
        .col(d.varchar(CycleCountItems::CountedBy, 100).null())
        .col(d.boolean(CycleCountItems::RequiresRecount).not_null())
        .col(d.varchar(CycleCountItems::RecountReason, 500).null());
    foreign_keys!(d, t, SCHEMA, CycleCountItems {
        CycleCountId -> CycleCounts on delete Cascade,
        ItemId -> Items on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn stock_adjustments(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, StockAdjustments::Table);
    t.col(d.varchar(StockAdjustments::AdjustmentNumber, 50).not_null())
        .col(d.guid(StockAdjustments::ItemId).not_null())
        .col(d.guid(StockAdjustments::WarehouseId).not_null())
        .col(d.guid(StockAdjustments::WarehouseLocationId).null())
        .col(d.timestamp(StockAdjustments::AdjustmentDate).not_null())
        .col(d.varchar(StockAdjustments::AdjustmentType, 50).not_null())
        .col(d.varchar(StockAdjustments::Reason, 200).not_null())
        .col(d.int(StockAdjustments::QuantityBefore).not_null())
        .col(d.int(StockAdjustments::AdjustmentQuantity).not_null())
        .col(d.int(StockAdjustments::QuantityAfter).not_null())
        .col(
            d.decimal(StockAdjustments::UnitCost, 18, 2)
                .not_null()
                .default(0),
        )
        .col(
            d.decimal(StockAdjustments::TotalCostImpact, 18, 2)
                .not_null()
                .default(0),
        )
        .col(d.varchar(StockAdjustments::Reference, 100).null())
        .col(d.varchar(StockAdjustments::AdjustedBy, 100).null())
        .col(d.varchar(StockAdjustments::ApprovedBy, 100).null())
        .col(d.timestamp(StockAdjustments::ApprovalDate).null())
        .col(d.boolean(StockAdjustments::IsApproved).not_null())
        .col(d.varchar(StockAdjustments::BatchNumber, 50).null())
        .col(d.timestamp(StockAdjustments::ExpiryDate).null());
    foreign_keys!(d, t, SCHEMA, StockAdjustments {
        ItemId -> Items on delete Restrict,
        WarehouseLocationId -> WarehouseLocations on delete SetNull,
        WarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn inventory_transfers(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, InventoryTransfers::Table);
    t.col(d.text(InventoryTransfers::Reason).null())
        .col(d.varchar(InventoryTransfers::TransferNumber, 50).not_null())
        .col(d.guid(InventoryTransfers::FromWarehouseId).not_null())
        .col(d.guid(InventoryTransfers::ToWarehouseId).not_null())
        .col(d.timestamp(InventoryTransfers::TransferDate).not_null())
        .col(d.varchar(InventoryTransfers::Status, 50).not_null())
        .col(d.decimal(InventoryTransfers::TotalValue, 18, 2).not_null())
        .col(d.varchar(InventoryTransfers::TransportMethod, 100).null())
        .col(d.varchar(InventoryTransfers::TrackingNumber, 100).null())
        .col(d.varchar(InventoryTransfers::RequestedBy, 100).null())
        .col(d.varchar(InventoryTransfers::ApprovedBy, 100).null())
        .col(d.timestamp(InventoryTransfers::ApprovalDate).null())
        .col(d.guid(InventoryTransfers::FromLocationId).null())
        .col(d.guid(InventoryTransfers::ToLocationId).null())
        .col(d.timestamp(InventoryTransfers::ExpectedArrivalDate).null())
        .col(d.varchar(InventoryTransfers::TransferType, 50).not_null())
        .col(d.varchar(InventoryTransfers::Priority, 20).not_null())
        .col(d.timestamp(InventoryTransfers::ActualArrivalDate).null());
    foreign_keys!(d, t, SCHEMA, InventoryTransfers {
        FromLocationId -> WarehouseLocations on delete SetNull,
        ToLocationId -> WarehouseLocations on delete SetNull,
        FromWarehouseId -> Warehouses on delete Restrict,
        ToWarehouseId -> Warehouses on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn inventory_transfer_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, InventoryTransferItems::Table);
    t.col(d.guid(InventoryTransferItems::InventoryTransferId).not_null())
        .col(d.guid(InventoryTransferItems::ItemId).not_null())
        .col(d.int(InventoryTransferItems::Quantity).not_null())
        .col(d.decimal(InventoryTransferItems::UnitPrice, 18, 2).not_null())
        .col(d.decimal(InventoryTransferItems::LineTotal, 18, 2).not_null());
    foreign_keys!(d, t, SCHEMA, InventoryTransferItems {
        InventoryTransferId -> InventoryTransfers on delete Cascade,
        ItemId -> Items on delete Restrict,
    });
    finish_store_table(d, t, Descriptive::STORE)
}

fn lot_number_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::LotNumbers as L;
    vec![
        SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, L::Table, &[L::ItemId, L::LotCode])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, L::Table, &[L::SupplierId])),
    ]
}

fn serial_number_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::SerialNumbers as S;
    let mut steps: Vec<SchemaStep> = [
        S::BinId,
        S::ItemId,
        S::LotNumberId,
        S::WarehouseId,
        S::WarehouseLocationId,
    ]
    .iter()
    .map(|column| SchemaStep::CreateIndex(d.index_on(SCHEMA, S::Table, &[*column])))
    .collect();
    steps.push(SchemaStep::CreateIndex(d.unique_index_on(
        SCHEMA,
        S::Table,
        &[S::SerialNumberValue],
    )));
    steps
}

fn stock_level_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::StockLevels as S;
    let mut steps: Vec<SchemaStep> = [
        S::BinId,
        S::LotNumberId,
        S::SerialNumberId,
        S::WarehouseId,
        S::WarehouseLocationId,
    ]
    .iter()
    .map(|column| SchemaStep::CreateIndex(d.index_on(SCHEMA, S::Table, &[*column])))
    .collect();
    steps.push(SchemaStep::CreateIndex(d.unique_index_on(
        SCHEMA,
        S::Table,
        &[S::ItemId, S::WarehouseId, S::WarehouseLocationId, S::BinId],
    )));
    steps
}

fn reservation_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::InventoryReservations as R;
    let mut steps: Vec<SchemaStep> = [
        R::BinId,
        R::ExpirationDate,
        R::ItemId,
        R::LotNumberId,
        R::ReservationDate,
        R::ReservationType,
        R::Status,
        R::WarehouseId,
        R::WarehouseLocationId,
    ]
    .iter()
    .map(|column| SchemaStep::CreateIndex(d.index_on(SCHEMA, R::Table, &[*column])))
    .collect();
    steps.push(SchemaStep::CreateIndex(d.unique_index_on(
        SCHEMA,
        R::Table,
        &[R::ReservationNumber],
    )));
    steps
}

fn transaction_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::InventoryTransactions as T;
    let mut steps: Vec<SchemaStep> = [
        T::ItemId,
        T::PurchaseOrderId,
        T::TransactionDate,
        T::TransactionType,
        T::WarehouseId,
        T::WarehouseLocationId,
    ]
    .iter()
    .map(|column| SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[*column])))
    .collect();
    steps.push(SchemaStep::CreateIndex(d.unique_index_on(
        SCHEMA,
        T::Table,
        &[T::TransactionNumber],
    )));
    steps
}

/// `AssignedTo` is free text; MySQL only keys its first characters.
fn assignee_indexes<T>(d: &Dialect, table: T, assigned_to: T, status: T) -> [SchemaStep; 2]
where
    T: Iden + Copy + 'static,
{
    let single = index_name(&table, &[assigned_to]);
    let with_status = index_name(&table, &[assigned_to, status]);
    [
        SchemaStep::CreateIndex(d.prefixed_index(
            SCHEMA,
            table,
            &single,
            [(assigned_to.into_iden(), Some(TEXT_KEY_PREFIX))],
        )),
        SchemaStep::CreateIndex(d.prefixed_index(
            SCHEMA,
            table,
            &with_status,
            [
                (assigned_to.into_iden(), Some(TEXT_KEY_PREFIX)),
                (status.into_iden(), None),
            ],
        )),
    ]
}

fn pick_list_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::{PickListItems as I, PickLists as P};
    let mut steps = Vec::from(assignee_indexes(d, P::Table, P::AssignedTo, P::Status));
    steps.extend([
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::PickingType])),
        SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, P::Table, &[P::PickListNumber])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::Priority])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::Status])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::Status, P::Priority])),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            P::Table,
            "IX_PickLists_Warehouse_Status",
            [P::WarehouseId, P::Status],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::WarehouseId])),
        // lines
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            I::Table,
            "IX_PickListItems_Bin_Status",
            [I::BinId, I::Status],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::BinId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::ItemId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::LotNumberId])),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            I::Table,
            "IX_PickListItems_PickList_Item",
            [I::PickListId, I::ItemId],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::PickListId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::SerialNumberId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::Status])),
    ]);
    steps
}

fn put_away_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::{PutAwayTaskItems as I, PutAwayTasks as P};
    let mut steps = Vec::from(assignee_indexes(d, P::Table, P::AssignedTo, P::Status));
    steps.extend([
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::GoodsReceiptId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::Priority])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::PutAwayStrategy])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::Status])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::Status, P::Priority])),
        SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, P::Table, &[P::TaskNumber])),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            P::Table,
            "IX_PutAwayTasks_Warehouse_Status",
            [P::WarehouseId, P::Status],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, P::Table, &[P::WarehouseId])),
        // lines
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::ItemId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::LotNumberId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::PutAwayTaskId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::SerialNumberId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::Status])),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            I::Table,
            "IX_PutAwayTaskItems_Task_Item",
            [I::PutAwayTaskId, I::ItemId],
        )),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            I::Table,
            "IX_PutAwayTaskItems_ToBin_Status",
            [I::ToBinId, I::Status],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::ToBinId])),
    ]);
    steps
}

fn cycle_count_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::{CycleCountItems as I, CycleCounts as C};
    vec![
        SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, C::Table, &[C::CountNumber])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, C::Table, &[C::CountType])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, C::Table, &[C::ScheduledDate])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, C::Table, &[C::Status])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, C::Table, &[C::Status, C::ScheduledDate])),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            C::Table,
            "IX_CycleCounts_Warehouse_ScheduledDate",
            [C::WarehouseId, C::ScheduledDate],
        )),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            C::Table,
            "IX_CycleCounts_Warehouse_Status",
            [C::WarehouseId, C::Status],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, C::Table, &[C::WarehouseId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, C::Table, &[C::WarehouseLocationId])),
        // lines
        SchemaStep::CreateIndex(d.unique_index(
            SCHEMA,
            I::Table,
            "IX_CycleCountItems_CycleCount_Item",
            [I::CycleCountId, I::ItemId],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::CycleCountId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::ItemId])),
    ]
}

fn adjustment_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::StockAdjustments as A;
    let mut steps: Vec<SchemaStep> = [
        A::AdjustmentDate,
        A::AdjustmentType,
        A::ItemId,
        A::WarehouseId,
        A::WarehouseLocationId,
    ]
    .iter()
    .map(|column| SchemaStep::CreateIndex(d.index_on(SCHEMA, A::Table, &[*column])))
    .collect();
    steps.push(SchemaStep::CreateIndex(d.unique_index_on(
        SCHEMA,
        A::Table,
        &[A::AdjustmentNumber],
    )));
    steps
}

fn transfer_indexes(d: &Dialect) -> Vec<SchemaStep> {
    use crate::schema::store::{InventoryTransferItems as I, InventoryTransfers as T};
    vec![
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::FromLocationId])),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            T::Table,
            "IX_InventoryTransfers_FromWarehouse_ToWarehouse",
            [T::FromWarehouseId, T::ToWarehouseId],
        )),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            T::Table,
            "IX_InventoryTransfers_FromWarehouse_TransferDate",
            [T::FromWarehouseId, T::TransferDate],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::FromWarehouseId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::Status])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::Status, T::TransferDate])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::ToLocationId])),
        SchemaStep::CreateIndex(d.index(
            SCHEMA,
            T::Table,
            "IX_InventoryTransfers_ToWarehouse_TransferDate",
            [T::ToWarehouseId, T::TransferDate],
        )),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::ToWarehouseId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::TransferDate])),
        SchemaStep::CreateIndex(d.unique_index_on(SCHEMA, T::Table, &[T::TransferNumber])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, T::Table, &[T::TransferType])),
        // lines
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::InventoryTransferId])),
        SchemaStep::CreateIndex(d.index_on(SCHEMA, I::Table, &[I::ItemId])),
        SchemaStep::CreateIndex(d.unique_index(
            SCHEMA,
            I::Table,
            "IX_InventoryTransferItems_Transfer_Item",
            [I::InventoryTransferId, I::ItemId],
        )),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::DbBackend;

    fn up_sql(backend: DbBackend) -> Vec<String> {
        plan::render(backend, &Migration.up_plan(&Dialect::new(backend)))
    }

    #[test]
    fn tables_are_created_before_indexes() {
        let sql = up_sql(DbBackend::Postgres);
        let last_table = sql
            .iter()
            .rposition(|s| s.starts_with("CREATE TABLE"))
            .expect("tables are created");
        let first_index = sql
            .iter()
            .position(|s| s.starts_with("CREATE INDEX") || s.starts_with("CREATE UNIQUE INDEX"))
            .expect("indexes are created");
        assert_eq!(last_table, 13);
        assert!(first_index > last_table);
    }

    #[test]
    fn transactions_null_out_deleted_locations() {
        let sql = up_sql(DbBackend::Postgres);
        let transactions = sql
            .iter()
            .find(|s| s.starts_with(r#"CREATE TABLE "store"."InventoryTransactions""#))
            .expect("InventoryTransactions is created");
        assert!(transactions.contains("ON DELETE SET NULL"), "{transactions}");
        assert!(transactions.contains("ON DELETE RESTRICT"), "{transactions}");
    }

    #[test]
    fn mysql_keys_assignee_by_prefix() {
        let mysql = up_sql(DbBackend::MySql);
        let index = mysql
            .iter()
            .find(|s| s.contains("`IX_PickLists_AssignedTo_Status`"))
            .expect("assignee index exists");
        assert!(index.contains("255"), "{index}");

        let postgres = up_sql(DbBackend::Postgres);
        let index = postgres
            .iter()
            .find(|s| s.contains(r#""IX_PickLists_AssignedTo_Status""#))
            .expect("assignee index exists");
        assert!(!index.contains("255"), "{index}");
    }

    #[test]
    fn down_drops_lines_before_headers() {
        let d = Dialect::new(DbBackend::Sqlite);
        let sql = plan::render(DbBackend::Sqlite, &Migration.down_plan(&d));
        let pos = |table: &str| {
            sql.iter()
                .position(|s| s == &format!(r#"DROP TABLE "{table}""#))
                .expect("table is dropped")
        };
        assert!(pos("PickListItems") < pos("PickLists"));
        assert!(pos("StockLevels") < pos("SerialNumbers"));
        assert!(pos("SerialNumbers") < pos("LotNumbers"));
        assert!(pos("InventoryTransferItems") < pos("InventoryTransfers"));
    }

    #[test]
    fn transfer_lines_use_the_truncated_key_name() {
        let sql = up_sql(DbBackend::MySql);
        let lines = sql
            .iter()
            .find(|s| s.starts_with("CREATE TABLE `store`.`InventoryTransferItems`"))
            .expect("InventoryTransferItems is created");
        assert!(
            lines.contains("`FK_InventoryTransferItems_InventoryTransfers_InventoryTransfer~`"),
            "{lines}"
        );
        assert!(lines.contains("ON DELETE CASCADE"), "{lines}");

        let transfers = sql
            .iter()
            .find(|s| s.starts_with("CREATE TABLE `store`.`InventoryTransfers`"))
            .expect("InventoryTransfers is created");
        assert!(
            transfers.contains("`FK_InventoryTransfers_WarehouseLocations_ToLocationId`"),
            "{transfers}"
        );
        assert!(transfers.contains("ON DELETE SET NULL"), "{transfers}");
        assert!(sql
            .iter()
            .any(|s| s.contains("UNIQUE INDEX `IX_InventoryTransfers_TransferNumber`")));
    }
}
