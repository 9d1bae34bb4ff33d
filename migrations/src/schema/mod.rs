//! Identifiers for every schema, table and column the migrations touch.
//!
//! Names are PascalCase and written to the database verbatim, so the enums
//! below implement [`Iden`] by hand instead of deriving it (the derive
//! snake-cases variant names).

use sea_orm_migration::prelude::*;

/// Declares a table iden enum: a `Table` variant named after the enum plus
/// one variant per column.
macro_rules! table_idens {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($column:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis enum $name {
            Table,
            $($column),*
        }

        impl sea_orm_migration::prelude::Iden for $name {
            fn unquoted(&self, s: &mut dyn std::fmt::Write) {
                let name = match self {
                    Self::Table => stringify!($name),
                    $(Self::$column => stringify!($column)),*
                };
                s.write_str(name).expect("writing an identifier cannot fail");
            }
        }
    };
}

/// Declares a column-only iden enum for column groups shared between tables.
macro_rules! column_idens {
    ($(#[$meta:meta])* $vis:vis enum $name:ident { $($column:ident),* $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        $vis enum $name {
            $($column),*
        }

        impl sea_orm_migration::prelude::Iden for $name {
            fn unquoted(&self, s: &mut dyn std::fmt::Write) {
                let name = match self {
                    $(Self::$column => stringify!($column)),*
                };
                s.write_str(name).expect("writing an identifier cannot fail");
            }
        }
    };
}

pub mod accounting;
pub mod hr;
pub mod store;

/// Logical namespace a table lives in.
///
/// PostgreSQL maps it to a schema, MySQL to a database. SQLite has neither,
/// so tables there are created unqualified.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DbSchema {
    Accounting,
    Store,
    Hr,
}

impl DbSchema {
    pub const ALL: [DbSchema; 3] = [DbSchema::Accounting, DbSchema::Store, DbSchema::Hr];

    pub fn as_str(&self) -> &'static str {
        match self {
            DbSchema::Accounting => "accounting",
            DbSchema::Store => "store",
            DbSchema::Hr => "hr",
        }
    }
}

impl Iden for DbSchema {
    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        s.write_str(self.as_str())
            .expect("writing an identifier cannot fail");
    }
}

/// A table written as `schema.table` through a single identifier.
///
/// sea-query's MySQL backend only takes unqualified table references in
/// index and foreign key statements, so the qualification has to live in the
/// identifier itself.
#[derive(Clone)]
pub struct QualifiedTable {
    schema: DbSchema,
    table: DynIden,
}

impl QualifiedTable {
    pub fn new<T: IntoIden>(schema: DbSchema, table: T) -> Self {
        Self {
            schema,
            table: table.into_iden(),
        }
    }
}

impl Iden for QualifiedTable {
    fn prepare(&self, s: &mut dyn std::fmt::Write, q: Quote) {
        self.schema.prepare(s, q);
        s.write_char('.').expect("writing an identifier cannot fail");
        self.table.prepare(s, q);
    }

    fn unquoted(&self, s: &mut dyn std::fmt::Write) {
        self.schema.unquoted(s);
        s.write_char('.').expect("writing an identifier cannot fail");
        self.table.unquoted(s);
    }
}

column_idens! {
    /// Key and descriptive columns shared by most entity tables.
    pub enum Common {
        Id,
        Name,
        Description,
        Notes,
        FilePath,
        ImageUrl,
    }
}

column_idens! {
    /// Who/when columns carried by every auditable root table.
    pub enum Audit {
        CreatedOn,
        CreatedBy,
        CreatedByUserName,
        LastModifiedOn,
        LastModifiedBy,
        LastModifiedByUserName,
        DeletedOn,
        DeletedBy,
        DeletedByUserName,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idens_keep_pascal_case() {
        assert_eq!(Iden::to_string(&accounting::ChartOfAccounts::Table), "ChartOfAccounts");
        assert_eq!(Iden::to_string(&hr::LeaveRequests::NumberOfDays), "NumberOfDays");
        assert_eq!(Iden::to_string(&Audit::LastModifiedByUserName), "LastModifiedByUserName");
        assert_eq!(Iden::to_string(&DbSchema::Store), "store");
    }

    #[test]
    fn qualified_tables_quote_each_part() {
        let table = QualifiedTable::new(DbSchema::Hr, hr::LeaveRequests::Table);
        let mut mysql = String::new();
        table.prepare(&mut mysql, Quote::new(b'`'));
        assert_eq!(mysql, "`hr`.`LeaveRequests`");
        assert_eq!(Iden::to_string(&table), "hr.LeaveRequests");
    }
}
