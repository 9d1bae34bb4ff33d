use sea_orm_migration::prelude::*;

use crate::dialect::{Descriptive, Dialect};
use crate::plan::{self, PlannedMigration, SchemaStep};
use crate::schema::hr::*;
use crate::schema::{Common, DbSchema};

const SCHEMA: DbSchema = DbSchema::Hr;

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
        let mut steps = vec![
            SchemaStep::EnsureSchema(SCHEMA),
            SchemaStep::CreateTable(leave_types(d)),
            SchemaStep::CreateTable(organizational_units(d)),
            SchemaStep::CreateTable(employees(d)),
            SchemaStep::CreateTable(leave_balances(d)),
            SchemaStep::CreateTable(leave_requests(d)),
        ];
        steps.extend(
            indexes(d)
                .into_iter()
                .map(SchemaStep::CreateIndex),
        );
        steps
    }

    fn down_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        vec![
            SchemaStep::DropTable(d.drop_table(SCHEMA, LeaveBalances::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, LeaveRequests::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, LeaveTypes::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Employees::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, OrganizationalUnits::Table)),
        ]
    }
}

fn finish_hr_table(
    d: &Dialect,
    mut stmt: TableCreateStatement,
    layout: Descriptive,
) -> TableCreateStatement {
    d.descriptive_columns(&mut stmt, layout);
    d.audit_columns(&mut stmt);
    stmt
}

fn leave_types(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, LeaveTypes::Table);
    t.col(d.varchar(LeaveTypes::LeaveName, 100).not_null())
        .col(d.decimal(LeaveTypes::AnnualAllowance, 5, 2).not_null())
        .col(d.varchar(LeaveTypes::AccrualFrequency, 50).not_null())
        .col(d.boolean(LeaveTypes::IsPaid).not_null())
        .col(d.decimal(LeaveTypes::MaxCarryoverDays, 5, 2).not_null())
        .col(d.int(LeaveTypes::CarryoverExpiryMonths).null())
        .col(d.boolean(LeaveTypes::RequiresApproval).not_null())
        .col(d.int(LeaveTypes::MinimumNoticeDay).null())
        .col(d.text(LeaveTypes::LeaveCode).null())
        .col(d.text(LeaveTypes::ApplicableGender).not_null())
        .col(d.int(LeaveTypes::MinimumServiceDays).not_null())
        .col(d.boolean(LeaveTypes::RequiresMedicalCertification).not_null())
        .col(d.int(LeaveTypes::MedicalCertificateAfterDays).not_null())
        .col(d.boolean(LeaveTypes::IsConvertibleToCash).not_null())
        .col(d.boolean(LeaveTypes::IsCumulative).not_null())
        .col(d.boolean(LeaveTypes::IsActive).not_null())
        .col(d.varchar(Common::Description, 500).null());
    finish_hr_table(d, t, Descriptive::HR.without_description())
}

fn organizational_units(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, OrganizationalUnits::Table);
    t.col(d.varchar(OrganizationalUnits::Code, 50).not_null())
        .col(d.int(OrganizationalUnits::Type).not_null())
        .col(d.guid(OrganizationalUnits::ParentId).null())
        .col(d.int(OrganizationalUnits::Level).not_null())
        .col(d.varchar(OrganizationalUnits::HierarchyPath, 500).null())
        .col(d.guid(OrganizationalUnits::ManagerId).null())
        .col(d.varchar(OrganizationalUnits::CostCenter, 50).null())
        .col(d.varchar(OrganizationalUnits::Location, 200).null())
        .col(
            d.boolean(OrganizationalUnits::IsActive)
                .not_null()
                .default(true),
        )
        .col(d.varchar(OrganizationalUnits::TenantId, 64).not_null());
    foreign_keys!(d, t, SCHEMA, OrganizationalUnits {
        ParentId -> OrganizationalUnits on delete Restrict,
    });
    finish_hr_table(d, t, Descriptive::HR)
}

fn employees(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Employees::Table);
    t.col(d.varchar(Employees::EmployeeNumber, 50).not_null())
        .col(d.varchar(Employees::FirstName, 100).not_null())
        .col(d.varchar(Employees::MiddleName, 100).null())
        .col(d.varchar(Employees::LastName, 100).not_null())
        .col(d.guid(Employees::OrganizationalUnitId).not_null())
        .col(d.varchar(Employees::Email, 256).null())
        .col(d.varchar(Employees::PhoneNumber, 20).null())
        .col(d.timestamp(Employees::HireDate).null())
        .col(d.varchar(Employees::Status, 50).not_null())
        .col(d.timestamp(Employees::BirthDate).null())
        .col(d.text(Employees::Gender).null())
        .col(d.text(Employees::EmploymentClassification).not_null())
        .col(d.decimal(Employees::BasicMonthlySalary, 16, 2).null())
        .col(d.timestamp(Employees::TerminationDate).null())
        .col(d.varchar(Employees::TerminationReason, 500).null())
        .col(d.boolean(Employees::IsActive).not_null())
        .col(d.varchar(Employees::TenantId, 64).not_null());
    foreign_keys!(d, t, SCHEMA, Employees {
        OrganizationalUnitId -> OrganizationalUnits on delete Restrict,
    });
    finish_hr_table(d, t, Descriptive::HR)
}

fn leave_balances(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, LeaveBalances::Table);
    t.col(d.guid(LeaveBalances::EmployeeId).not_null())
        .col(d.guid(LeaveBalances::LeaveTypeId).not_null())
        .col(d.int(LeaveBalances::Year).not_null());
    for days in [
        LeaveBalances::OpeningBalance,
        LeaveBalances::AccruedDays,
        LeaveBalances::CarriedOverDays,
        LeaveBalances::TakenDays,
        LeaveBalances::PendingDays,
    ] {
        t.col(d.decimal(days, 5, 2).not_null());
    }
    t.col(d.timestamp(LeaveBalances::CarryoverExpiryDate).null());
    foreign_keys!(d, t, SCHEMA, LeaveBalances {
        EmployeeId -> Employees on delete Cascade,
        LeaveTypeId -> LeaveTypes on delete Restrict,
    });
    finish_hr_table(d, t, Descriptive::HR)
}

fn leave_requests(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, LeaveRequests::Table);
    t.col(d.guid(LeaveRequests::EmployeeId).not_null())
        .col(d.guid(LeaveRequests::LeaveTypeId).not_null())
        .col(d.timestamp(LeaveRequests::StartDate).not_null())
        .col(d.timestamp(LeaveRequests::EndDate).not_null())
        .col(d.decimal(LeaveRequests::NumberOfDays, 5, 2).not_null())
        .col(d.varchar(LeaveRequests::Reason, 500).not_null())
        .col(d.varchar(LeaveRequests::Status, 50).not_null())
        .col(d.guid(LeaveRequests::ApproverManagerId).null())
        .col(d.timestamp(LeaveRequests::SubmittedDate).null())
        .col(d.timestamp(LeaveRequests::ReviewedDate).null())
        .col(d.varchar(LeaveRequests::ApproverComment, 500).null())
        .col(d.boolean(LeaveRequests::IsActive).not_null())
        .col(d.varchar(LeaveRequests::AttachmentPath, 1000).null());
    foreign_keys!(d, t, SCHEMA, LeaveRequests {
        EmployeeId -> Employees on delete Cascade,
        LeaveTypeId -> LeaveTypes on delete Restrict,
    });
    finish_hr_table(d, t, Descriptive::HR)
}

fn indexes(d: &Dialect) -> Vec<IndexCreateStatement> {
    use crate::schema::hr::{
        Employees as E, LeaveBalances as B, LeaveRequests as R, LeaveTypes as T,
        OrganizationalUnits as O,
    };

    vec![
        // employees
        d.index(SCHEMA, E::Table, "IX_Employee_Email", [E::Email]),
        d.index(SCHEMA, E::Table, "IX_Employee_Email_Active", [E::Email, E::IsActive]),
        d.unique_index(SCHEMA, E::Table, "IX_Employee_EmployeeNumber", [E::EmployeeNumber]),
        d.index(
            SCHEMA,
            E::Table,
            "IX_Employee_FirstName_LastName",
            [E::FirstName, E::LastName],
        ),
        d.index(SCHEMA, E::Table, "IX_Employee_IsActive", [E::IsActive]),
        d.index(
            SCHEMA,
            E::Table,
            "IX_Employee_LastName_FirstName_Active",
            [E::LastName, E::FirstName, E::IsActive],
        ),
        d.index(
            SCHEMA,
            E::Table,
            "IX_Employee_OrganizationalUnitId",
            [E::OrganizationalUnitId],
        ),
        d.index(
            SCHEMA,
            E::Table,
            "IX_Employee_OrgUnit_Status_Active",
            [E::OrganizationalUnitId, E::Status, E::IsActive],
        ),
        d.index(SCHEMA, E::Table, "IX_Employee_Status", [E::Status]),
        d.index(SCHEMA, E::Table, "IX_Employee_Status_Active", [E::Status, E::IsActive]),
        // leave balances
        d.index(SCHEMA, B::Table, "IX_LeaveBalance_EmployeeId", [B::EmployeeId]),
        d.unique_index(
            SCHEMA,
            B::Table,
            "IX_LeaveBalance_EmployeeId_LeaveTypeId_Year",
            [B::EmployeeId, B::LeaveTypeId, B::Year],
        ),
        d.index(SCHEMA, B::Table, "IX_LeaveBalance_EmployeeYear", [B::EmployeeId, B::Year]),
        d.index(SCHEMA, B::Table, "IX_LeaveBalance_LeaveType_Year", [B::LeaveTypeId, B::Year]),
        d.index(SCHEMA, B::Table, "IX_LeaveBalance_LeaveTypeId", [B::LeaveTypeId]),
        d.index(
            SCHEMA,
            B::Table,
            "IX_LeaveBalance_Period_Query",
            [B::EmployeeId, B::Year, B::LeaveTypeId],
        ),
        // leave requests
        d.index(
            SCHEMA,
            R::Table,
            "IX_LeaveRequest_EmployeeHistory",
            [R::EmployeeId, R::StartDate, R::Status],
        ),
        d.index(SCHEMA, R::Table, "IX_LeaveRequest_EmployeeId", [R::EmployeeId]),
        d.index(
            SCHEMA,
            R::Table,
            "IX_LeaveRequest_EmployeeId_DateRange",
            [R::EmployeeId, R::StartDate, R::EndDate],
        ),
        d.index(SCHEMA, R::Table, "IX_LeaveRequest_IsActive", [R::IsActive]),
        d.index(SCHEMA, R::Table, "IX_LeaveRequest_LeaveTypeId", [R::LeaveTypeId]),
        d.index(
            SCHEMA,
            R::Table,
            "IX_LeaveRequest_Overlap_Detection",
            [R::EmployeeId, R::StartDate, R::EndDate, R::Status],
        ),
        d.index(
            SCHEMA,
            R::Table,
            "IX_LeaveRequest_Pending_Queue",
            [R::Status, R::StartDate, R::EmployeeId],
        ),
        d.index(SCHEMA, R::Table, "IX_LeaveRequest_Status", [R::Status]),
        d.index(
            SCHEMA,
            R::Table,
            "IX_LeaveRequest_Workflow",
            [R::Status, R::EmployeeId, R::StartDate],
        ),
        // leave types
        d.index(SCHEMA, T::Table, "IX_LeaveType_IsActive", [T::IsActive]),
        d.index(SCHEMA, T::Table, "IX_LeaveType_LeaveName", [T::LeaveName]),
        // organizational units
        d.unique_index_on(SCHEMA, O::Table, &[O::Code]),
        d.index(
            SCHEMA,
            O::Table,
            "IX_OrganizationalUnits_CostCenter_Active",
            [O::CostCenter, O::IsActive],
        ),
        d.index_on(SCHEMA, O::Table, &[O::HierarchyPath]),
        d.index_on(SCHEMA, O::Table, &[O::IsActive]),
        d.index(
            SCHEMA,
            O::Table,
            "IX_OrganizationalUnits_Location_Type_Active",
            [O::Location, O::Type, O::IsActive],
        ),
        d.index(
            SCHEMA,
            O::Table,
            "IX_OrganizationalUnits_Parent_Active",
            [O::ParentId, O::IsActive],
        ),
        d.index_on(SCHEMA, O::Table, &[O::ParentId]),
        d.index(
            SCHEMA,
            O::Table,
            "IX_OrganizationalUnits_Path_Active",
            [O::HierarchyPath, O::IsActive],
        ),
        d.index_on(SCHEMA, O::Table, &[O::Type]),
        d.index(
            SCHEMA,
            O::Table,
            "IX_OrganizationalUnits_Type_Active",
            [O::Type, O::IsActive],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::DbBackend;

    #[test]
    fn leave_requests_follow_their_employee() {
        let d = Dialect::new(DbBackend::Postgres);
        let sql = plan::render(DbBackend::Postgres, &Migration.up_plan(&d));
        assert_eq!(sql[0], r#"CREATE SCHEMA IF NOT EXISTS "hr""#);
        let requests = sql
            .iter()
            .find(|s| s.starts_with(r#"CREATE TABLE "hr"."LeaveRequests""#))
            .expect("LeaveRequests is created");
        assert!(
            requests.contains(r#"CONSTRAINT "FK_LeaveRequests_Employees_EmployeeId""#),
            "{requests}"
        );
        assert!(requests.contains("ON DELETE CASCADE"), "{requests}");
    }

    #[test]
    fn leave_types_keep_a_short_description() {
        let d = Dialect::new(DbBackend::MySql);
        let sql = plan::render(DbBackend::MySql, &Migration.up_plan(&d));
        let types = sql
            .iter()
            .find(|s| s.starts_with("CREATE TABLE `hr`.`LeaveTypes`"))
            .expect("LeaveTypes is created");
        assert!(types.contains("`Description` varchar(500)"), "{types}");
        assert_eq!(types.matches("`Description`").count(), 1, "{types}");
    }

    #[test]
    fn balances_are_dropped_before_employees() {
        let d = Dialect::new(DbBackend::Sqlite);
        let sql = plan::render(DbBackend::Sqlite, &Migration.down_plan(&d));
        assert_eq!(sql.first().map(String::as_str), Some(r#"DROP TABLE "LeaveBalances""#));
        assert_eq!(
            sql.last().map(String::as_str),
            Some(r#"DROP TABLE "OrganizationalUnits""#)
        );
    }
}
