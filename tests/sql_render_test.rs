use erp_schema::migrator::{Direction, MigrationService};
use rstest::rstest;
use sea_orm::DbBackend;

fn statements(backend: DbBackend, direction: Direction) -> Vec<String> {
    MigrationService::render_sql(backend, direction)
        .into_iter()
        .flat_map(|m| m.statements)
        .collect()
}

fn create_table(sql: &[String], quoted_name: &str) -> String {
    sql.iter()
        .find(|s| s.starts_with("CREATE TABLE") && s.contains(quoted_name))
        .cloned()
        .unwrap_or_else(|| panic!("no CREATE TABLE for {quoted_name}"))
}

#[test]
fn postgres_uses_native_guid_and_timestamptz() {
    let sql = statements(DbBackend::Postgres, Direction::Up);
    let requests = create_table(&sql, r#""hr"."LeaveRequests""#);

    assert!(requests.contains(r#""EmployeeId" uuid NOT NULL"#), "{requests}");
    assert!(requests.contains(r#""StartDate" timestamp with time zone NOT NULL"#), "{requests}");
    assert!(requests.contains(r#""Name" varchar(1024) NOT NULL"#), "{requests}");
    assert!(requests.contains(r#"CONSTRAINT "PK_LeaveRequests" PRIMARY KEY"#), "{requests}");
}

#[test]
fn mysql_uses_char36_guids_and_utf8mb4_tables() {
    let sql = statements(DbBackend::MySql, Direction::Up);
    let requests = create_table(&sql, "`hr`.`LeaveRequests`");

    assert!(requests.contains("`EmployeeId` char(36)"), "{requests}");
    assert!(requests.contains("ascii_general_ci"), "{requests}");
    assert!(requests.contains("`StartDate` datetime(6) NOT NULL"), "{requests}");
    assert!(requests.contains("utf8mb4"), "{requests}");
}

#[rstest]
#[case::postgres(DbBackend::Postgres, r#"CREATE SCHEMA IF NOT EXISTS "accounting""#)]
#[case::mysql(DbBackend::MySql, "CREATE DATABASE IF NOT EXISTS `accounting`")]
fn schemas_are_created_first(#[case] backend: DbBackend, #[case] expected: &str) {
    let sql = statements(backend, Direction::Up);
    assert!(sql[0].starts_with(expected), "{}", sql[0]);
}

#[test]
fn sqlite_flattens_schemas() {
    let sql = statements(DbBackend::Sqlite, Direction::Up);
    assert!(sql.iter().all(|s| !s.contains("\"hr\".") && !s.contains("SCHEMA")));
    assert!(sql.iter().all(|s| !s.contains("ADD CONSTRAINT")));
}

#[test]
fn down_drops_leave_tables_before_accounting() {
    let sql = statements(DbBackend::Postgres, Direction::Down);
    let position = |needle: &str| {
        sql.iter()
            .position(|s| s.starts_with("DROP TABLE") && s.contains(needle))
            .unwrap_or_else(|| panic!("no DROP TABLE for {needle}"))
    };
    assert!(position(r#""hr"."LeaveRequests""#) < position(r#""accounting"."JournalEntryLines""#));
    assert!(position(r#""store"."SalesImportItems""#) < position(r#""store"."Items""#));
}
