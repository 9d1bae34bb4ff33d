use std::sync::Arc;

use erp_schema::db::{establish_connection, SchemaSnapshot};
use erp_schema::migrator::MigrationService;
use sea_orm::DatabaseConnection;

async fn fresh_database() -> Arc<DatabaseConnection> {
    Arc::new(
        establish_connection("sqlite::memory:")
            .await
            .expect("in-memory database"),
    )
}

#[tokio::test]
async fn every_migration_reverts_cleanly() {
    let db = fresh_database().await;
    let service = MigrationService::new(db.clone());

    let report = service.verify_round_trip().await.expect("round trip runs");
    assert_eq!(report.outcomes.len(), 7);
    for outcome in &report.outcomes {
        assert!(
            outcome.differences.is_empty(),
            "{} left differences: {:?}",
            outcome.migration,
            outcome.differences
        );
    }
    assert!(report.is_clean());

    // Verification leaves every migration applied.
    let status = service.status().await.unwrap();
    assert!(status.iter().all(|entry| entry.applied));
}

#[tokio::test]
async fn rolling_everything_back_leaves_no_tables() {
    let db = fresh_database().await;
    let service = MigrationService::new(db.clone());

    service.run_pending(None).await.unwrap();
    let migrated = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    assert!(!migrated.is_empty());

    service.rollback(Some(7)).await.unwrap();
    let empty = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    assert!(empty.is_empty(), "{:?}", empty.tables.keys().collect::<Vec<_>>());
}

#[tokio::test]
async fn snapshot_sees_leave_request_shape() {
    let db = fresh_database().await;
    MigrationService::new(db.clone())
        .run_pending(None)
        .await
        .unwrap();

    let snapshot = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    let requests = snapshot.table("LeaveRequests").expect("LeaveRequests exists");

    assert!(!requests.columns["EmployeeId"].nullable);
    assert!(requests.columns["ApproverManagerId"].nullable);
    assert!(requests.columns["DeletedOn"].nullable);
    assert!(requests.indexes.contains_key("IX_LeaveRequest_EmployeeId"));
    assert!(snapshot.table("seaql_migrations").is_none());
}

#[tokio::test]
async fn approvals_migration_round_trips_journal_columns() {
    let db = fresh_database().await;
    let service = MigrationService::new(db.clone());

    service.run_pending(Some(1)).await.unwrap();
    let before = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    assert!(before.table("Currencies").is_some());

    service.run_pending(Some(1)).await.unwrap();
    let applied = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    assert!(applied.table("Currencies").is_none());
    let journal = applied.table("JournalEntries").unwrap();
    assert!(journal.columns.contains_key("PostingBatchId"));
    assert!(!before.diff(&applied).is_empty());

    service.rollback(None).await.unwrap();
    let reverted = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    assert_eq!(before.diff(&reverted), Vec::<String>::new());
}

#[tokio::test]
async fn fresh_rebuilds_a_fully_migrated_database() {
    let db = fresh_database().await;
    let service = MigrationService::new(db.clone());

    service.run_pending(None).await.unwrap();
    let migrated = SchemaSnapshot::capture(db.as_ref()).await.unwrap();

    service.fresh().await.expect("fresh succeeds over existing tables");
    let rebuilt = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    assert_eq!(migrated.diff(&rebuilt), Vec::<String>::new());

    let status = service.status().await.unwrap();
    assert_eq!(status.len(), 7);
    assert!(status.iter().all(|entry| entry.applied));
}

#[tokio::test]
async fn snapshot_sees_foreign_keys() {
    let db = fresh_database().await;
    MigrationService::new(db.clone())
        .run_pending(None)
        .await
        .unwrap();

    let snapshot = SchemaSnapshot::capture(db.as_ref()).await.unwrap();
    let readings = snapshot.table("MeterReading").expect("MeterReading exists");
    assert_eq!(
        readings.foreign_keys.get("MeterId").map(String::as_str),
        Some("-> Meters(Id) ON DELETE CASCADE")
    );

    let transfers = snapshot
        .table("InventoryTransfers")
        .expect("InventoryTransfers exists");
    assert_eq!(transfers.foreign_keys.len(), 4);
    assert_eq!(
        transfers.foreign_keys.get("ToLocationId").map(String::as_str),
        Some("-> WarehouseLocations(Id) ON DELETE SET NULL")
    );
    assert!(snapshot.table("Meters").unwrap().foreign_keys.is_empty());
}
