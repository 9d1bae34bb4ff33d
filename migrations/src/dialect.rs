//! Backend-specific rendering of the logical column kinds used by the ERP schema.
//!
//! Every migration is written once against [`Dialect`]; the dialect decides
//! how a GUID, a long text or a timestamp is spelled on PostgreSQL, MySQL or
//! SQLite, and whether a table lives in a named schema.

use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

use crate::schema::{Audit, Common, DbSchema, QualifiedTable};

/// Which attachment column a descriptive table carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Attachment {
    FilePath,
    ImageUrl,
}

/// Shape of the descriptive column group (`Name`, `Description`, `Notes`, attachment).
///
/// Some tables declare their own `Description` or attachment column with a
/// different width; those opt out here and add the column themselves.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Descriptive {
    pub description: bool,
    pub attachment: Option<Attachment>,
}

impl Descriptive {
    pub const ACCOUNTING: Descriptive = Descriptive {
        description: true,
        attachment: Some(Attachment::FilePath),
    };

    pub const STORE: Descriptive = Descriptive {
        description: true,
        attachment: Some(Attachment::ImageUrl),
    };

    pub const HR: Descriptive = Descriptive::STORE;

    pub fn without_description(self) -> Self {
        Self {
            description: false,
            ..self
        }
    }

    pub fn without_attachment(self) -> Self {
        Self {
            attachment: None,
            ..self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Dialect {
    backend: DbBackend,
}

impl Dialect {
    pub fn new(backend: DbBackend) -> Self {
        Self { backend }
    }

    pub fn of(manager: &SchemaManager) -> Self {
        Self::new(manager.get_database_backend())
    }

    pub fn backend(&self) -> DbBackend {
        self.backend
    }

    /// SQLite has no schemas; everything is created in the main database.
    pub fn has_schemas(&self) -> bool {
        !matches!(self.backend, DbBackend::Sqlite)
    }

    /// SQLite cannot add or drop foreign keys on an existing table.
    pub fn supports_foreign_key_alter(&self) -> bool {
        !matches!(self.backend, DbBackend::Sqlite)
    }

    pub fn table<T>(&self, schema: DbSchema, table: T) -> TableRef
    where
        T: IntoIden,
    {
        match self.backend {
            DbBackend::Postgres => TableRef::SchemaTable(schema.into_iden(), table.into_iden()),
            DbBackend::MySql => TableRef::Table(SeaRc::new(QualifiedTable::new(schema, table))),
            DbBackend::Sqlite => TableRef::Table(table.into_iden()),
        }
    }

    /// Statement creating the schema if it is missing, `None` on SQLite.
    pub fn ensure_schema_sql(&self, schema: DbSchema) -> Option<String> {
        match self.backend {
            DbBackend::Postgres => Some(format!(
                "CREATE SCHEMA IF NOT EXISTS \"{}\"",
                schema.as_str()
            )),
            DbBackend::MySql => Some(format!(
                "CREATE DATABASE IF NOT EXISTS `{}` CHARACTER SET utf8mb4",
                schema.as_str()
            )),
            DbBackend::Sqlite => None,
        }
    }

    /// Statement dropping the schema and everything in it, `None` on SQLite.
    pub fn drop_schema_sql(&self, schema: DbSchema) -> Option<String> {
        match self.backend {
            DbBackend::Postgres => Some(format!(
                "DROP SCHEMA IF EXISTS \"{}\" CASCADE",
                schema.as_str()
            )),
            DbBackend::MySql => Some(format!("DROP DATABASE IF EXISTS `{}`", schema.as_str())),
            DbBackend::Sqlite => None,
        }
    }

    pub fn guid<T: IntoIden>(&self, name: T) -> ColumnDef {
        let mut col = ColumnDef::new(name);
        match self.backend {
            DbBackend::MySql => {
                col.char_len(36).extra("COLLATE ascii_general_ci");
            }
            _ => {
                col.uuid();
            }
        }
        col
    }

    pub fn varchar<T: IntoIden>(&self, name: T, len: u32) -> ColumnDef {
        let mut col = ColumnDef::new(name);
        col.string_len(len);
        col
    }

    /// Unbounded text: `text` on PostgreSQL and SQLite, `longtext` on MySQL.
    pub fn text<T: IntoIden>(&self, name: T) -> ColumnDef {
        let mut col = ColumnDef::new(name);
        match self.backend {
            DbBackend::MySql => {
                col.custom(Alias::new("longtext"));
            }
            _ => {
                col.text();
            }
        }
        col
    }

    /// Fixed-point number. SQLite gets the same `real(p, s)` spelling sea-query
    /// uses, written out because its builder refuses a precision above 16.
    pub fn decimal<T: IntoIden>(&self, name: T, precision: u32, scale: u32) -> ColumnDef {
        let mut col = ColumnDef::new(name);
        match self.backend {
            DbBackend::Sqlite => {
                col.custom(Alias::new(format!("real({precision}, {scale})")));
            }
            _ => {
                col.decimal_len(precision, scale);
            }
        }
        col
    }

    pub fn boolean<T: IntoIden>(&self, name: T) -> ColumnDef {
        let mut col = ColumnDef::new(name);
        col.boolean();
        col
    }

    pub fn int<T: IntoIden>(&self, name: T) -> ColumnDef {
        let mut col = ColumnDef::new(name);
        col.integer();
        col
    }

    pub fn timestamp<T: IntoIden>(&self, name: T) -> ColumnDef {
        let mut col = ColumnDef::new(name);
        match self.backend {
            DbBackend::MySql => {
                col.custom(Alias::new("datetime(6)"));
            }
            _ => {
                col.timestamp_with_time_zone();
            }
        }
        col
    }

    /// Begins `CREATE TABLE` with the GUID primary key every table shares.
    pub fn create_table<T>(&self, schema: DbSchema, table: T) -> TableCreateStatement
    where
        T: Iden + 'static,
    {
        let pk = format!("PK_{}", Iden::to_string(&table));
        let mut stmt = Table::create();
        stmt.table(self.table(schema, table))
            .col(self.guid(Common::Id).not_null())
            .primary_key(Index::create().name(pk).col(Common::Id));
        self.table_options(&mut stmt);
        stmt
    }

    pub fn table_options(&self, stmt: &mut TableCreateStatement) {
        if matches!(self.backend, DbBackend::MySql) {
            stmt.character_set("utf8mb4");
        }
    }

    pub fn drop_table<T>(&self, schema: DbSchema, table: T) -> TableDropStatement
    where
        T: IntoIden,
    {
        Table::drop().table(self.table(schema, table)).to_owned()
    }

    pub fn descriptive_columns(&self, stmt: &mut TableCreateStatement, layout: Descriptive) {
        stmt.col(self.varchar(Common::Name, 1024).not_null());
        if layout.description {
            stmt.col(self.varchar(Common::Description, 2048).null());
        }
        stmt.col(self.varchar(Common::Notes, 2048).null());
        match layout.attachment {
            Some(Attachment::FilePath) => {
                stmt.col(self.text(Common::FilePath).null());
            }
            Some(Attachment::ImageUrl) => {
                stmt.col(self.text(Common::ImageUrl).null());
            }
            None => {}
        }
    }

    pub fn audit_columns(&self, stmt: &mut TableCreateStatement) {
        stmt.col(self.timestamp(Audit::CreatedOn).not_null())
            .col(self.guid(Audit::CreatedBy).not_null())
            .col(self.varchar(Audit::CreatedByUserName, 64).null())
            .col(self.timestamp(Audit::LastModifiedOn).not_null())
            .col(self.guid(Audit::LastModifiedBy).null())
            .col(self.varchar(Audit::LastModifiedByUserName, 64).null())
            .col(self.timestamp(Audit::DeletedOn).null())
            .col(self.guid(Audit::DeletedBy).null())
            .col(self.varchar(Audit::DeletedByUserName, 64).null());
    }

    /// Adds `FK_<table>_<principal>_<column>` to a table being created.
    pub fn foreign_key<T, C, P>(
        &self,
        stmt: &mut TableCreateStatement,
        schema: DbSchema,
        table: T,
        column: C,
        principal: P,
        on_delete: ForeignKeyAction,
    ) where
        T: Iden + 'static,
        C: Iden + 'static,
        P: Iden + 'static,
    {
        let mut fk = self.foreign_key_statement(schema, table, column, principal, on_delete);
        stmt.foreign_key(&mut fk);
    }

    pub fn foreign_key_statement<T, C, P>(
        &self,
        schema: DbSchema,
        table: T,
        column: C,
        principal: P,
        on_delete: ForeignKeyAction,
    ) -> ForeignKeyCreateStatement
    where
        T: Iden + 'static,
        C: Iden + 'static,
        P: Iden + 'static,
    {
        let name = foreign_key_name(&table, &principal, &column);
        ForeignKey::create()
            .name(name)
            .from(self.table(schema, table), column)
            .to(self.table(schema, principal), Common::Id)
            .on_delete(on_delete)
            .to_owned()
    }

    pub fn index<T, I>(
        &self,
        schema: DbSchema,
        table: T,
        name: &str,
        columns: I,
    ) -> IndexCreateStatement
    where
        T: IntoIden,
        I: IntoIterator,
        I::Item: IntoIndexColumn,
    {
        let mut index = Index::create();
        index.name(name).table(self.table(schema, table));
        for column in columns {
            index.col(column);
        }
        index
    }

    pub fn unique_index<T, I>(
        &self,
        schema: DbSchema,
        table: T,
        name: &str,
        columns: I,
    ) -> IndexCreateStatement
    where
        T: IntoIden,
        I: IntoIterator,
        I::Item: IntoIndexColumn,
    {
        let mut index = self.index(schema, table, name, columns);
        index.unique();
        index
    }

    /// Index over columns that may be too wide for a MySQL key. A column
    /// paired with `Some(n)` is keyed on its first `n` characters on MySQL and
    /// indexed whole elsewhere.
    pub fn prefixed_index<T, I>(
        &self,
        schema: DbSchema,
        table: T,
        name: &str,
        columns: I,
    ) -> IndexCreateStatement
    where
        T: IntoIden,
        I: IntoIterator<Item = (DynIden, Option<u32>)>,
    {
        let mut index = Index::create();
        index.name(name).table(self.table(schema, table));
        for (column, prefix) in columns {
            match prefix {
                Some(len) if matches!(self.backend, DbBackend::MySql) => {
                    index.col((column, len));
                }
                _ => {
                    index.col(column);
                }
            }
        }
        index
    }

    /// Index named `IX_<table>_<column>[_<column>...]`.
    pub fn index_on<T>(&self, schema: DbSchema, table: T, columns: &[T]) -> IndexCreateStatement
    where
        T: Iden + Copy + 'static,
    {
        let name = index_name(&table, columns);
        self.index(schema, table, &name, columns.iter().copied())
    }

    pub fn unique_index_on<T>(
        &self,
        schema: DbSchema,
        table: T,
        columns: &[T],
    ) -> IndexCreateStatement
    where
        T: Iden + Copy + 'static,
    {
        let mut index = self.index_on(schema, table, columns);
        index.unique();
        index
    }

    pub fn drop_index<T>(&self, schema: DbSchema, table: T, name: &str) -> IndexDropStatement
    where
        T: IntoIden,
    {
        Index::drop()
            .name(name)
            .table(self.table(schema, table))
            .to_owned()
    }
}

/// Foreign key names follow `FK_<table>_<principal>_<column>`, cut to 63
/// characters (the PostgreSQL identifier limit) with a trailing `~`.
pub fn foreign_key_name(table: &dyn Iden, principal: &dyn Iden, column: &dyn Iden) -> String {
    let name = format!(
        "FK_{}_{}_{}",
        Iden::to_string(table),
        Iden::to_string(principal),
        Iden::to_string(column)
    );
    truncate_identifier(name)
}

pub fn index_name<T: Iden>(table: &T, columns: &[T]) -> String {
    let mut name = format!("IX_{}", Iden::to_string(table));
    for column in columns {
        name.push('_');
        name.push_str(&Iden::to_string(column));
    }
    truncate_identifier(name)
}

fn truncate_identifier(name: String) -> String {
    const MAX: usize = 63;
    if name.len() <= MAX {
        return name;
    }
    let mut cut: String = name.chars().take(MAX - 1).collect();
    cut.push('~');
    cut
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::hr::LeaveRequests;
    use crate::schema::store::{InventoryTransactions, InventoryTransferItems, InventoryTransfers};

    fn render_create(backend: DbBackend) -> String {
        let dialect = Dialect::new(backend);
        let mut stmt = dialect.create_table(DbSchema::Hr, LeaveRequests::Table);
        stmt.col(dialect.guid(LeaveRequests::EmployeeId).not_null())
            .col(dialect.decimal(LeaveRequests::NumberOfDays, 5, 2).not_null())
            .col(dialect.timestamp(LeaveRequests::StartDate).not_null())
            .col(dialect.text(LeaveRequests::Reason).not_null())
            .col(dialect.boolean(LeaveRequests::IsActive).not_null());
        backend.build(&stmt).to_string()
    }

    #[test]
    fn postgres_uses_native_types_and_schema() {
        let sql = render_create(DbBackend::Postgres);
        assert!(sql.starts_with(r#"CREATE TABLE "hr"."LeaveRequests""#), "{sql}");
        assert!(sql.contains(r#""Id" uuid NOT NULL"#), "{sql}");
        assert!(sql.contains(r#""StartDate" timestamp with time zone NOT NULL"#), "{sql}");
        assert!(sql.contains(r#""Reason" text NOT NULL"#), "{sql}");
        assert!(sql.contains(r#"CONSTRAINT "PK_LeaveRequests" PRIMARY KEY ("Id")"#), "{sql}");
    }

    #[test]
    fn mysql_spells_guids_as_ascii_char36() {
        let sql = render_create(DbBackend::MySql);
        assert!(sql.starts_with("CREATE TABLE `hr`.`LeaveRequests`"), "{sql}");
        assert!(sql.contains("`Id` char(36)"), "{sql}");
        assert!(sql.contains("COLLATE ascii_general_ci"), "{sql}");
        assert!(sql.contains("`StartDate` datetime(6) NOT NULL"), "{sql}");
        assert!(sql.contains("`Reason` longtext NOT NULL"), "{sql}");
        assert!(sql.contains("utf8mb4"), "{sql}");
    }

    #[test]
    fn sqlite_flattens_schemas() {
        let sql = render_create(DbBackend::Sqlite);
        assert!(sql.starts_with(r#"CREATE TABLE "LeaveRequests""#), "{sql}");
        assert!(!sql.contains(r#""hr""#), "{sql}");
    }

    #[test]
    fn decimals_keep_their_precision_on_every_backend() {
        let render = |backend: DbBackend| {
            let dialect = Dialect::new(backend);
            let mut stmt = dialect.create_table(DbSchema::Store, InventoryTransfers::Table);
            stmt.col(dialect.decimal(InventoryTransfers::TotalValue, 18, 2).not_null());
            backend.build(&stmt).to_string()
        };
        let sqlite = render(DbBackend::Sqlite);
        assert!(sqlite.contains(r#""TotalValue" real(18, 2) NOT NULL"#), "{sqlite}");
        let postgres = render(DbBackend::Postgres);
        assert!(postgres.contains(r#""TotalValue" decimal(18, 2) NOT NULL"#), "{postgres}");
        let mysql = render(DbBackend::MySql);
        assert!(mysql.contains("`TotalValue` decimal(18, 2) NOT NULL"), "{mysql}");
    }

    #[test]
    fn schema_sql_per_backend() {
        assert_eq!(
            Dialect::new(DbBackend::Postgres).ensure_schema_sql(DbSchema::Store),
            Some(r#"CREATE SCHEMA IF NOT EXISTS "store""#.to_owned())
        );
        assert_eq!(
            Dialect::new(DbBackend::MySql).drop_schema_sql(DbSchema::Accounting),
            Some("DROP DATABASE IF EXISTS `accounting`".to_owned())
        );
        assert_eq!(Dialect::new(DbBackend::Sqlite).ensure_schema_sql(DbSchema::Hr), None);
    }

    #[test]
    fn long_foreign_key_names_are_truncated() {
        let name = foreign_key_name(
            &InventoryTransactions::Table,
            &InventoryTransactions::Table,
            &InventoryTransactions::WarehouseLocationId,
        );
        assert_eq!(name.len(), 63);
        assert!(name.ends_with('~'));

        let exactly_64 = foreign_key_name(
            &InventoryTransferItems::Table,
            &InventoryTransfers::Table,
            &InventoryTransferItems::InventoryTransferId,
        );
        assert_eq!(
            exactly_64,
            "FK_InventoryTransferItems_InventoryTransfers_InventoryTransfer~"
        );

        let short = foreign_key_name(
            &LeaveRequests::Table,
            &crate::schema::hr::Employees::Table,
            &LeaveRequests::EmployeeId,
        );
        assert_eq!(short, "FK_LeaveRequests_Employees_EmployeeId");
    }
}
