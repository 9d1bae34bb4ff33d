use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::DbBackend;

use crate::dialect::{Descriptive, Dialect};
use crate::m20250813_120433_create_accounting_tables::currencies;
use crate::plan::{self, PlannedMigration, SchemaStep};
use crate::schema::accounting::*;
use crate::schema::{Common, DbSchema};

const SCHEMA: DbSchema = DbSchema::Accounting;

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
        let mut steps = vec![SchemaStep::DropTable(d.drop_table(SCHEMA, Currencies::Table))];

        // Existing rows get an empty approval status. MySQL rejects literal
        // defaults on text columns and back-fills '' by itself.
        let mut approval_status = d.text(JournalEntries::ApprovalStatus);
        approval_status.not_null();
        if d.backend() != DbBackend::MySql {
            approval_status.default("");
        }

        // One column per statement; SQLite accepts a single alter option only.
        steps.extend(
            [
                approval_status,
                d.text(JournalEntries::ApprovedBy).null().to_owned(),
                d.timestamp(JournalEntries::ApprovedDate).null().to_owned(),
                d.guid(JournalEntries::PostingBatchId).null().to_owned(),
            ]
            .into_iter()
            .map(|column| {
                SchemaStep::AlterTable(
                    Table::alter()
                        .table(d.table(SCHEMA, JournalEntries::Table))
                        .add_column(column)
                        .to_owned(),
                )
            }),
        );

        steps.extend([
            SchemaStep::CreateTable(accruals(d)),
            SchemaStep::CreateTable(deferred_revenues(d)),
            SchemaStep::CreateTable(posting_batches(d)),
            SchemaStep::CreateTable(regulatory_reports(d)),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                JournalEntries::Table,
                "IX_JournalEntries_PostingBatchId",
                [JournalEntries::PostingBatchId],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                RegulatoryReports::Table,
                "IX_RegulatoryReports_DueDate",
                [RegulatoryReports::DueDate],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                RegulatoryReports::Table,
                "IX_RegulatoryReports_PeriodStartDate_PeriodEndDate",
                [
                    RegulatoryReports::PeriodStartDate,
                    RegulatoryReports::PeriodEndDate,
                ],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                RegulatoryReports::Table,
                "IX_RegulatoryReports_RegulatoryBody",
                [RegulatoryReports::RegulatoryBody],
            )),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                RegulatoryReports::Table,
                "IX_RegulatoryReports_ReportName",
                [RegulatoryReports::ReportName],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                RegulatoryReports::Table,
                "IX_RegulatoryReports_ReportType",
                [RegulatoryReports::ReportType],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                RegulatoryReports::Table,
                "IX_RegulatoryReports_Status",
                [RegulatoryReports::Status],
            )),
            SchemaStep::CreateForeignKey(d.foreign_key_statement(
                SCHEMA,
                JournalEntries::Table,
                JournalEntries::PostingBatchId,
                PostingBatches::Table,
                ForeignKeyAction::NoAction,
            )),
        ]);
        steps
    }

    fn down_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        let mut steps = vec![
            SchemaStep::DropForeignKey(
                ForeignKey::drop()
                    .name("FK_JournalEntries_PostingBatches_PostingBatchId")
                    .table(d.table(SCHEMA, JournalEntries::Table))
                    .to_owned(),
            ),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Accruals::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, DeferredRevenues::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, PostingBatches::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, RegulatoryReports::Table)),
            SchemaStep::DropIndex(d.drop_index(
                SCHEMA,
                JournalEntries::Table,
                "IX_JournalEntries_PostingBatchId",
            )),
        ];

        steps.extend(
            [
                JournalEntries::ApprovalStatus,
                JournalEntries::ApprovedBy,
                JournalEntries::ApprovedDate,
                JournalEntries::PostingBatchId,
            ]
            .into_iter()
            .map(|column| {
                SchemaStep::AlterTable(
                    Table::alter()
                        .table(d.table(SCHEMA, JournalEntries::Table))
                        .drop_column(column)
                        .to_owned(),
                )
            }),
        );

        steps.push(SchemaStep::CreateTable(currencies(d)));
        steps.push(SchemaStep::CreateIndex(d.unique_index(
            SCHEMA,
            Currencies::Table,
            "IX_Currencies_CurrencyCode",
            [Currencies::CurrencyCode],
        )));
        steps
    }
}

fn finish_root(
    d: &Dialect,
    mut stmt: TableCreateStatement,
    layout: Descriptive,
) -> TableCreateStatement {
    d.descriptive_columns(&mut stmt, layout);
    d.audit_columns(&mut stmt);
    stmt
}

fn accruals(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Accruals::Table);
    t.col(d.text(Accruals::AccrualNumber).not_null())
        .col(d.timestamp(Accruals::AccrualDate).not_null())
        .col(d.decimal(Accruals::Amount, 16, 2).not_null())
        .col(d.text(Common::Description).null())
        .col(d.boolean(Accruals::IsReversed).not_null())
        .col(d.timestamp(Accruals::ReversalDate).null());
    finish_root(d, t, Descriptive::ACCOUNTING.without_description())
}

fn deferred_revenues(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, DeferredRevenues::Table);
    t.col(d.text(DeferredRevenues::DeferredRevenueNumber).not_null())
        .col(d.timestamp(DeferredRevenues::RecognitionDate).not_null())
        .col(d.decimal(DeferredRevenues::Amount, 16, 2).not_null())
        .col(d.text(Common::Description).null())
        .col(d.boolean(DeferredRevenues::IsRecognized).not_null())
        .col(d.timestamp(DeferredRevenues::RecognizedDate).null());
    finish_root(d, t, Descriptive::ACCOUNTING.without_description())
}

fn posting_batches(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, PostingBatches::Table);
    t.col(d.text(PostingBatches::BatchNumber).not_null())
        .col(d.timestamp(PostingBatches::BatchDate).not_null())
        .col(d.text(PostingBatches::Status).not_null())
        .col(d.text(Common::Description).null())
        .col(d.guid(PostingBatches::PeriodId).null())
        .col(d.text(PostingBatches::ApprovalStatus).not_null())
        .col(d.text(PostingBatches::ApprovedBy).null())
        .col(d.timestamp(PostingBatches::ApprovedDate).null());
    finish_root(d, t, Descriptive::ACCOUNTING.without_description())
}

fn regulatory_reports(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, RegulatoryReports::Table);
    t.col(d.varchar(RegulatoryReports::ReportName, 200).not_null())
        .col(d.varchar(RegulatoryReports::ReportType, 50).not_null())
        .col(d.varchar(RegulatoryReports::ReportingPeriod, 20).not_null())
        .col(d.timestamp(RegulatoryReports::PeriodStartDate).not_null())
        .col(d.timestamp(RegulatoryReports::PeriodEndDate).not_null())
        .col(d.timestamp(RegulatoryReports::DueDate).not_null())
        .col(d.timestamp(RegulatoryReports::SubmissionDate).null())
        .col(
            d.varchar(RegulatoryReports::Status, 20)
                .not_null()
                .default("Draft"),
        )
        .col(d.varchar(RegulatoryReports::RegulatoryBody, 100).null())
        .col(d.varchar(RegulatoryReports::FilingNumber, 50).null());
    for amount in [
        RegulatoryReports::TotalAssets,
        RegulatoryReports::TotalLiabilities,
        RegulatoryReports::TotalEquity,
        RegulatoryReports::TotalRevenue,
        RegulatoryReports::TotalExpenses,
        RegulatoryReports::NetIncome,
        RegulatoryReports::RateBase,
        RegulatoryReports::AllowedReturn,
    ] {
        t.col(d.decimal(amount, 18, 2).null());
    }
    t.col(d.varchar(Common::FilePath, 500).null())
        .col(d.varchar(RegulatoryReports::PreparedBy, 100).null())
        .col(d.varchar(RegulatoryReports::ReviewedBy, 100).null())
        .col(d.varchar(RegulatoryReports::ApprovedBy, 100).null())
        .col(d.boolean(RegulatoryReports::RequiresAudit).not_null())
        .col(d.varchar(RegulatoryReports::AuditFirm, 200).null())
        .col(d.timestamp(RegulatoryReports::AuditDate).null());
    finish_root(d, t, Descriptive::ACCOUNTING.without_attachment())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn down_recreates_currencies() {
        let d = Dialect::new(DbBackend::Postgres);
        let sql = plan::render(DbBackend::Postgres, &Migration.down_plan(&d));
        assert!(sql
            .iter()
            .any(|s| s.starts_with(r#"CREATE TABLE "accounting"."Currencies""#)));
        assert!(sql.last().is_some_and(|s| s.contains("IX_Currencies_CurrencyCode")));
    }

    #[test]
    fn report_status_defaults_to_draft() {
        let d = Dialect::new(DbBackend::MySql);
        let sql = plan::render(DbBackend::MySql, &Migration.up_plan(&d));
        let reports = sql
            .iter()
            .find(|s| s.starts_with("CREATE TABLE `accounting`.`RegulatoryReports`"))
            .expect("RegulatoryReports is created");
        assert!(reports.contains("DEFAULT 'Draft'"), "{reports}");
    }

    #[test]
    fn sqlite_adds_columns_one_by_one() {
        let d = Dialect::new(DbBackend::Sqlite);
        let sql = plan::render(DbBackend::Sqlite, &Migration.up_plan(&d));
        let alters = sql.iter().filter(|s| s.starts_with("ALTER TABLE")).count();
        assert_eq!(alters, 4);
        assert!(!sql.iter().any(|s| s.contains("FOREIGN KEY")));
    }
}
