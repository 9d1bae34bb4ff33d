use std::sync::Arc;

use migrations::dialect::Dialect;
use migrations::schema::hr::LeaveRequests;
use migrations::schema::{Audit, Common, DbSchema};
use sea_orm::sea_query::{Alias, Expr, Order, Query, SelectStatement};
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, QueryResult, TryGetable, Value,
};
use tracing::debug;
use uuid::Uuid;

use crate::dto::{LeaveRequestResponse, LeaveRequestSearch};
use crate::errors::ServiceError;
use crate::repositories::Repository;

use super::BaseRepository;

/// Read access to `hr.LeaveRequests`.
#[derive(Debug, Clone)]
pub struct LeaveRequestRepository {
    base: BaseRepository,
}

impl LeaveRequestRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    fn backend(&self) -> DbBackend {
        self.base.get_db().get_database_backend()
    }

    /// Find a leave request by ID; soft-deleted rows are not returned.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<LeaveRequestResponse>, ServiceError> {
        let backend = self.backend();
        let mut select = base_select(backend);
        select
            .column(Common::Id)
            .columns(RESPONSE_COLUMNS)
            .and_where(Expr::col(Common::Id).eq(guid_value(backend, id)));

        let row = self.base.get_db().query_one(backend.build(&select)).await?;
        row.map(|row| decode(&row, backend))
            .transpose()
            .map_err(ServiceError::from)
    }

    /// Returns one page of matching requests, newest start date first, and
    /// the total number of matches.
    pub async fn search(
        &self,
        search: &LeaveRequestSearch,
        page_size: u64,
    ) -> Result<(Vec<LeaveRequestResponse>, u64), ServiceError> {
        let backend = self.backend();
        let db = self.base.get_db();

        let mut filtered = base_select(backend);
        apply_filters(&mut filtered, backend, search);

        let mut count = filtered.clone();
        count.expr_as(Expr::col(Common::Id).count(), Alias::new("total"));
        let total = match db.query_one(backend.build(&count)).await? {
            Some(row) => row.try_get::<i64>("", "total")?,
            None => 0,
        };

        let page = search.page.max(1);
        let offset = (page - 1).checked_mul(page_size).ok_or_else(|| {
            ServiceError::ValidationError(format!("page {page} is out of range"))
        })?;
        let mut select = filtered;
        select
            .column(Common::Id)
            .columns(RESPONSE_COLUMNS)
            .order_by(LeaveRequests::StartDate, Order::Desc)
            .order_by(Common::Id, Order::Asc)
            .limit(page_size)
            .offset(offset);

        let rows = db.query_all(backend.build(&select)).await?;
        debug!(total, returned = rows.len(), page, "leave request search");

        let items = rows
            .iter()
            .map(|row| decode(row, backend))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((items, u64::try_from(total).unwrap_or_default()))
    }
}

const RESPONSE_COLUMNS: [LeaveRequests; 13] = [
    LeaveRequests::EmployeeId,
    LeaveRequests::LeaveTypeId,
    LeaveRequests::StartDate,
    LeaveRequests::EndDate,
    LeaveRequests::NumberOfDays,
    LeaveRequests::Reason,
    LeaveRequests::Status,
    LeaveRequests::ApproverManagerId,
    LeaveRequests::SubmittedDate,
    LeaveRequests::ReviewedDate,
    LeaveRequests::ApproverComment,
    LeaveRequests::IsActive,
    LeaveRequests::AttachmentPath,
];

/// `FROM hr.LeaveRequests WHERE DeletedOn IS NULL` with no columns selected yet.
fn base_select(backend: DbBackend) -> SelectStatement {
    let dialect = Dialect::new(backend);
    Query::select()
        .from(dialect.table(DbSchema::Hr, LeaveRequests::Table))
        .and_where(Expr::col(Audit::DeletedOn).is_null())
        .to_owned()
}

fn apply_filters(select: &mut SelectStatement, backend: DbBackend, search: &LeaveRequestSearch) {
    if let Some(employee_id) = search.employee_id {
        select.and_where(Expr::col(LeaveRequests::EmployeeId).eq(guid_value(backend, employee_id)));
    }
    if let Some(leave_type_id) = search.leave_type_id {
        select.and_where(
            Expr::col(LeaveRequests::LeaveTypeId).eq(guid_value(backend, leave_type_id)),
        );
    }
    if let Some(status) = &search.status {
        select.and_where(Expr::col(LeaveRequests::Status).eq(status.as_str()));
    }
    // Overlap with the window, not containment.
    if let Some(from) = search.from {
        select.and_where(Expr::col(LeaveRequests::EndDate).gte(from));
    }
    if let Some(to) = search.to {
        select.and_where(Expr::col(LeaveRequests::StartDate).lte(to));
    }
    if let Some(keyword) = search.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        select.and_where(Expr::col(LeaveRequests::Reason).like(format!("%{}%", escape_like(keyword))));
    }
}

fn escape_like(keyword: &str) -> String {
    keyword.replace('%', "").replace('_', "")
}

/// GUIDs are `char(36)` text on MySQL and native elsewhere.
pub fn guid_value(backend: DbBackend, id: Uuid) -> Value {
    match backend {
        DbBackend::MySql => id.to_string().into(),
        _ => id.into(),
    }
}

fn get<T: TryGetable>(row: &QueryResult, column: LeaveRequests) -> Result<T, DbErr> {
    row.try_get("", &sea_orm::sea_query::Iden::to_string(&column))
}

fn guid(row: &QueryResult, backend: DbBackend, column: &str) -> Result<Option<Uuid>, DbErr> {
    match backend {
        DbBackend::MySql => row
            .try_get::<Option<String>>("", column)?
            .map(|text| {
                Uuid::parse_str(&text)
                    .map_err(|e| DbErr::Type(format!("{column} is not a GUID: {e}")))
            })
            .transpose(),
        _ => row.try_get::<Option<Uuid>>("", column),
    }
}

fn required_guid(row: &QueryResult, backend: DbBackend, column: &str) -> Result<Uuid, DbErr> {
    guid(row, backend, column)?.ok_or_else(|| DbErr::Type(format!("{column} is NULL")))
}

fn decode(row: &QueryResult, backend: DbBackend) -> Result<LeaveRequestResponse, DbErr> {
    use LeaveRequests as R;

    Ok(LeaveRequestResponse {
        id: required_guid(row, backend, "Id")?,
        employee_id: required_guid(row, backend, "EmployeeId")?,
        leave_type_id: required_guid(row, backend, "LeaveTypeId")?,
        start_date: get(row, R::StartDate)?,
        end_date: get(row, R::EndDate)?,
        number_of_days: get(row, R::NumberOfDays)?,
        reason: get(row, R::Reason)?,
        status: get(row, R::Status)?,
        approver_manager_id: guid(row, backend, "ApproverManagerId")?,
        submitted_date: get(row, R::SubmittedDate)?,
        reviewed_date: get(row, R::ReviewedDate)?,
        approver_comment: get(row, R::ApproverComment)?,
        is_active: get(row, R::IsActive)?,
        attachment_path: get(row, R::AttachmentPath)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn search() -> LeaveRequestSearch {
        LeaveRequestSearch {
            page: 1,
            ..Default::default()
        }
    }

    #[test]
    fn unfiltered_search_only_hides_deleted_rows() {
        let mut select = base_select(DbBackend::Postgres);
        apply_filters(&mut select, DbBackend::Postgres, &search());
        select.column(Common::Id);
        assert_eq!(
            select.to_string(sea_orm::sea_query::PostgresQueryBuilder),
            r#"SELECT "Id" FROM "hr"."LeaveRequests" WHERE "DeletedOn" IS NULL"#
        );
    }

    #[test]
    fn window_filter_selects_overlapping_requests() {
        let mut filters = search();
        filters.from = Some(Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap());
        filters.to = Some(Utc.with_ymd_and_hms(2025, 11, 30, 0, 0, 0).unwrap());

        let mut select = base_select(DbBackend::Sqlite);
        apply_filters(&mut select, DbBackend::Sqlite, &filters);
        select.column(Common::Id);
        let sql = select.to_string(sea_orm::sea_query::SqliteQueryBuilder);
        assert!(sql.starts_with(r#"SELECT "Id" FROM "LeaveRequests""#), "{sql}");
        assert!(sql.contains(r#""EndDate" >= '2025-11-01"#), "{sql}");
        assert!(sql.contains(r#""StartDate" <= '2025-11-30"#), "{sql}");
    }

    #[test]
    fn mysql_binds_guids_as_text() {
        let id = Uuid::new_v4();
        assert_eq!(guid_value(DbBackend::MySql, id), Value::from(id.to_string()));
        assert_eq!(guid_value(DbBackend::Postgres, id), Value::from(id));
    }

    #[test]
    fn keyword_wildcards_are_stripped() {
        assert_eq!(escape_like("50%_off"), "50off");
    }
}
