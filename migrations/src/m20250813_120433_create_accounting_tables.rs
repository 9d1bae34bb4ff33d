use sea_orm_migration::prelude::*;

use crate::dialect::{Descriptive, Dialect};
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
        vec![
            SchemaStep::EnsureSchema(SCHEMA),
            SchemaStep::CreateTable(accounting_periods(d)),
            SchemaStep::CreateTable(budgets(d)),
            SchemaStep::CreateTable(chart_of_accounts(d)),
            SchemaStep::CreateTable(consumption(d)),
            SchemaStep::CreateTable(currencies(d)),
            SchemaStep::CreateTable(customers(d)),
            SchemaStep::CreateTable(depreciation_methods(d)),
            SchemaStep::CreateTable(fixed_assets(d)),
            SchemaStep::CreateTable(fuel_consumptions(d)),
            SchemaStep::CreateTable(general_ledgers(d)),
            SchemaStep::CreateTable(invoices(d)),
            SchemaStep::CreateTable(journal_entries(d)),
            SchemaStep::CreateTable(members(d)),
            SchemaStep::CreateTable(meters(d)),
            SchemaStep::CreateTable(payees(d)),
            SchemaStep::CreateTable(projects(d)),
            SchemaStep::CreateTable(vendors(d)),
            SchemaStep::CreateTable(budget_lines(d)),
            SchemaStep::CreateTable(depreciation_entries(d)),
            SchemaStep::CreateTable(invoice_line_items(d)),
            SchemaStep::CreateTable(journal_entry_lines(d)),
            SchemaStep::CreateTable(job_costing_entries(d)),
            SchemaStep::CreateTable(meter_reading(d)),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                AccountingPeriods::Table,
                "IX_AccountingPeriods_FiscalYear_PeriodType",
                [AccountingPeriods::FiscalYear, AccountingPeriods::PeriodType],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                BudgetLines::Table,
                "IX_BudgetLines_BudgetId",
                [BudgetLines::BudgetId],
            )),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                ChartOfAccounts::Table,
                "IX_ChartOfAccounts_AccountCode",
                [ChartOfAccounts::AccountCode],
            )),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                Currencies::Table,
                "IX_Currencies_CurrencyCode",
                [Currencies::CurrencyCode],
            )),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                Customers::Table,
                "IX_Customers_CustomerCode",
                [Customers::CustomerCode],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                DepreciationEntry::Table,
                "IX_DepreciationEntry_FixedAssetId",
                [DepreciationEntry::FixedAssetId],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                InvoiceLineItem::Table,
                "IX_InvoiceLineItem_InvoiceId",
                [InvoiceLineItem::InvoiceId],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                JobCostingEntries::Table,
                "IX_JobCostingEntries_ProjectId",
                [JobCostingEntries::ProjectId],
            )),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                JournalEntries::Table,
                "IX_JournalEntries_ReferenceNumber",
                [JournalEntries::ReferenceNumber],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                JournalEntryLines::Table,
                "IX_JournalEntryLines_JournalEntryId",
                [JournalEntryLines::JournalEntryId],
            )),
            SchemaStep::CreateIndex(d.index(
                SCHEMA,
                MeterReading::Table,
                "IX_MeterReading_MeterId",
                [MeterReading::MeterId],
            )),
            SchemaStep::CreateIndex(d.unique_index(
                SCHEMA,
                Payees::Table,
                "IX_Payees_PayeeCode",
                [Payees::PayeeCode],
            )),
        ]
    }

    fn down_plan(&self, d: &Dialect) -> Vec<SchemaStep> {
        // Line tables first; their foreign keys pin the headers.
        vec![
            SchemaStep::DropTable(d.drop_table(SCHEMA, BudgetLines::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, DepreciationEntry::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, GeneralLedgers::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, InvoiceLineItem::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, JobCostingEntries::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, JournalEntryLines::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, MeterReading::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, AccountingPeriods::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, ChartOfAccounts::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Consumption::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Currencies::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Customers::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, FuelConsumptions::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Members::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Payees::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Vendors::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Budgets::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, FixedAssets::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Invoices::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, JournalEntries::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Projects::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, Meters::Table)),
            SchemaStep::DropTable(d.drop_table(SCHEMA, DepreciationMethods::Table)),
        ]
    }
}

/// Root tables carry the descriptive and audit column groups.
fn finish_root(d: &Dialect, mut stmt: TableCreateStatement) -> TableCreateStatement {
    d.descriptive_columns(&mut stmt, Descriptive::ACCOUNTING);
    d.audit_columns(&mut stmt);
    stmt
}

fn accounting_periods(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, AccountingPeriods::Table);
    t.col(d.timestamp(AccountingPeriods::StartDate).not_null())
        .col(d.timestamp(AccountingPeriods::EndDate).not_null())
        .col(d.boolean(AccountingPeriods::IsClosed).not_null())
        .col(d.boolean(AccountingPeriods::IsAdjustmentPeriod).not_null())
        .col(d.int(AccountingPeriods::FiscalYear).not_null())
        .col(d.varchar(AccountingPeriods::PeriodType, 16).not_null());
    finish_root(d, t)
}

fn budgets(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Budgets::Table);
    t.col(d.guid(Budgets::PeriodId).not_null())
        .col(d.int(Budgets::FiscalYear).not_null())
        .col(d.varchar(Budgets::BudgetType, 32).not_null())
        .col(d.varchar(Budgets::Status, 16).not_null())
        .col(d.decimal(Budgets::TotalBudgetedAmount, 18, 2).not_null())
        .col(d.decimal(Budgets::TotalActualAmount, 18, 2).not_null())
        .col(d.timestamp(Budgets::ApprovedDate).null())
        .col(d.varchar(Budgets::ApprovedBy, 256).null());
    finish_root(d, t)
}

fn chart_of_accounts(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, ChartOfAccounts::Table);
    t.col(d.varchar(ChartOfAccounts::AccountCode, 16).not_null())
        .col(d.text(ChartOfAccounts::AccountName).not_null())
        .col(d.varchar(ChartOfAccounts::AccountType, 32).not_null())
        .col(d.guid(ChartOfAccounts::SubAccountOf).null())
        .col(d.varchar(ChartOfAccounts::UsoaCategory, 16).not_null())
        .col(d.boolean(ChartOfAccounts::IsActive).not_null())
        .col(d.varchar(ChartOfAccounts::ParentCode, 16).not_null())
        .col(d.decimal(ChartOfAccounts::Balance, 18, 2).not_null())
        .col(d.boolean(ChartOfAccounts::IsControlAccount).not_null())
        .col(d.text(ChartOfAccounts::NormalBalance).not_null())
        .col(d.int(ChartOfAccounts::AccountLevel).not_null())
        .col(d.boolean(ChartOfAccounts::AllowDirectPosting).not_null())
        .col(d.boolean(ChartOfAccounts::IsUsoaCompliant).not_null())
        .col(d.text(ChartOfAccounts::RegulatoryClassification).null());
    finish_root(d, t)
}

/// Also recreated by the approvals migration's `down`, so it is shared.
pub(crate) fn currencies(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Currencies::Table);
    t.col(d.varchar(Currencies::CurrencyCode, 3).not_null())
        .col(d.varchar(Currencies::Symbol, 10).not_null())
        .col(d.int(Currencies::DecimalPlaces).not_null())
        .col(d.boolean(Currencies::IsActive).not_null())
        .col(d.boolean(Currencies::IsBaseCurrency).not_null());
    finish_root(d, t)
}

fn consumption(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Consumption::Table);
    t.col(d.guid(Consumption::MeterId).not_null())
        .col(d.timestamp(Consumption::ReadingDate).not_null())
        .col(d.decimal(Consumption::CurrentReading, 16, 2).not_null())
        .col(d.decimal(Consumption::PreviousReading, 16, 2).not_null())
        .col(d.decimal(Consumption::KWhUsed, 16, 2).not_null())
        .col(d.text(Consumption::BillingPeriod).not_null())
        .col(d.text(Consumption::ReadingType).not_null())
        .col(d.decimal(Consumption::Multiplier, 16, 2).null())
        .col(d.boolean(Consumption::IsValidReading).not_null())
        .col(d.text(Consumption::ReadingSource).null());
    finish_root(d, t)
}

fn customers(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Customers::Table);
    t.col(d.varchar(Customers::CustomerCode, 16).not_null())
        .col(d.varchar(Customers::Address, 500).null())
        .col(d.varchar(Customers::BillingAddress, 500).null())
        .col(d.varchar(Customers::ContactPerson, 256).null())
        .col(d.varchar(Customers::Email, 256).null())
        .col(d.varchar(Customers::Terms, 100).null())
        .col(d.varchar(Customers::RevenueAccountCode, 16).null())
        .col(d.varchar(Customers::RevenueAccountName, 256).null())
        .col(d.varchar(Customers::Tin, 50).null())
        .col(d.varchar(Customers::PhoneNumber, 50).null())
        .col(d.boolean(Customers::IsActive).not_null())
        .col(d.decimal(Customers::CreditLimit, 18, 2).not_null())
        .col(d.decimal(Customers::CurrentBalance, 18, 2).not_null());
    finish_root(d, t)
}

fn depreciation_methods(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, DepreciationMethods::Table);
    t.col(d.text(DepreciationMethods::MethodCode).not_null())
        .col(d.text(DepreciationMethods::CalculationFormula).not_null())
        .col(d.boolean(DepreciationMethods::IsActive).not_null());
    finish_root(d, t)
}

fn fixed_assets(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, FixedAssets::Table);
    t.col(d.text(FixedAssets::AssetName).not_null())
        .col(d.timestamp(FixedAssets::PurchaseDate).not_null())
        .col(d.decimal(FixedAssets::PurchasePrice, 18, 2).not_null())
        .col(d.int(FixedAssets::ServiceLife).not_null())
        .col(d.guid(FixedAssets::DepreciationMethodId).not_null())
        .col(d.decimal(FixedAssets::SalvageValue, 18, 2).not_null())
        .col(d.decimal(FixedAssets::CurrentBookValue, 18, 2).not_null())
        .col(d.guid(FixedAssets::AccumulatedDepreciationAccountId).not_null())
        .col(d.guid(FixedAssets::DepreciationExpenseAccountId).not_null())
        .col(d.varchar(FixedAssets::SerialNumber, 100).null())
        .col(d.varchar(FixedAssets::Location, 256).null())
        .col(d.varchar(FixedAssets::Department, 100).null())
        .col(d.boolean(FixedAssets::IsDisposed).not_null())
        .col(d.timestamp(FixedAssets::DisposalDate).null())
        .col(d.decimal(FixedAssets::DisposalAmount, 18, 2).null())
        .col(d.text(FixedAssets::AssetType).not_null())
        .col(d.text(FixedAssets::GpsCoordinates).null())
        .col(d.text(FixedAssets::SubstationName).null())
        .col(d.text(FixedAssets::AssetUsoaId).null())
        .col(d.text(FixedAssets::RegulatoryClassification).null())
        .col(d.decimal(FixedAssets::VoltageRating, 16, 2).null())
        .col(d.decimal(FixedAssets::Capacity, 16, 2).null())
        .col(d.text(FixedAssets::Manufacturer).null())
        .col(d.text(FixedAssets::ModelNumber).null())
        .col(d.timestamp(FixedAssets::LastMaintenanceDate).null())
        .col(d.timestamp(FixedAssets::NextMaintenanceDate).null())
        .col(d.boolean(FixedAssets::RequiresUsoaReporting).not_null());
    finish_root(d, t)
}

fn fuel_consumptions(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, FuelConsumptions::Table);
    t.col(d.timestamp(FuelConsumptions::ConsumptionDate).not_null())
        .col(d.guid(FuelConsumptions::PowerPlantId).not_null())
        .col(d.text(FuelConsumptions::FuelType).not_null())
        .col(d.decimal(FuelConsumptions::Quantity, 16, 2).not_null())
        .col(d.text(FuelConsumptions::QuantityUnit).not_null())
        .col(d.decimal(FuelConsumptions::UnitCost, 16, 2).not_null())
        .col(d.decimal(FuelConsumptions::TotalCost, 16, 2).not_null())
        .col(d.text(FuelConsumptions::SupplierId).null())
        .col(d.decimal(FuelConsumptions::BtuContent, 16, 2).null())
        .col(d.decimal(FuelConsumptions::SulfurContent, 16, 2).null())
        .col(d.text(FuelConsumptions::DeliveryMethod).null())
        .col(d.boolean(FuelConsumptions::IsEmergencyFuel).not_null());
    finish_root(d, t)
}

fn general_ledgers(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, GeneralLedgers::Table);
    t.col(d.guid(GeneralLedgers::EntryId).not_null())
        .col(d.guid(GeneralLedgers::AccountId).not_null())
        .col(d.decimal(GeneralLedgers::Debit, 16, 2).not_null())
        .col(d.decimal(GeneralLedgers::Credit, 16, 2).not_null())
        .col(d.text(GeneralLedgers::Memo).null())
        .col(d.text(GeneralLedgers::UsoaClass).not_null())
        .col(d.timestamp(GeneralLedgers::TransactionDate).not_null())
        .col(d.text(GeneralLedgers::ReferenceNumber).null())
        .col(d.guid(GeneralLedgers::PeriodId).null());
    finish_root(d, t)
}

fn invoices(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Invoices::Table);
    t.col(d.text(Invoices::InvoiceNumber).not_null())
        .col(d.guid(Invoices::MemberId).not_null())
        .col(d.timestamp(Invoices::InvoiceDate).not_null())
        .col(d.timestamp(Invoices::DueDate).not_null())
        .col(d.decimal(Invoices::TotalAmount, 16, 2).not_null())
        .col(d.text(Invoices::Status).not_null())
        .col(d.guid(Invoices::ConsumptionId).null())
        .col(d.decimal(Invoices::UsageCharge, 16, 2).not_null())
        .col(d.decimal(Invoices::BasicServiceCharge, 16, 2).not_null())
        .col(d.decimal(Invoices::TaxAmount, 16, 2).not_null())
        .col(d.decimal(Invoices::OtherCharges, 16, 2).not_null())
        .col(d.decimal(Invoices::KWhUsed, 16, 2).not_null())
        .col(d.text(Invoices::BillingPeriod).not_null())
        .col(d.timestamp(Invoices::PaidDate).null())
        .col(d.text(Invoices::PaymentMethod).null())
        .col(d.decimal(Invoices::LateFee, 16, 2).null())
        .col(d.decimal(Invoices::ReconnectionFee, 16, 2).null())
        .col(d.decimal(Invoices::DepositAmount, 16, 2).null())
        .col(d.text(Invoices::RateSchedule).null())
        .col(d.decimal(Invoices::DemandCharge, 16, 2).null());
    finish_root(d, t)
}

fn journal_entries(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, JournalEntries::Table);
    t.col(d.timestamp(JournalEntries::Date).not_null())
        .col(d.varchar(JournalEntries::ReferenceNumber, 32).not_null())
        .col(d.varchar(JournalEntries::Source, 64).not_null())
        .col(d.boolean(JournalEntries::IsPosted).not_null())
        .col(d.guid(JournalEntries::PeriodId).null())
        .col(d.decimal(JournalEntries::OriginalAmount, 18, 2).not_null());
    finish_root(d, t)
}

fn members(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Members::Table);
    t.col(d.text(Members::MemberNumber).not_null())
        .col(d.text(Members::MemberName).not_null())
        .col(d.text(Members::ServiceAddress).not_null())
        .col(d.text(Members::MailingAddress).null())
        .col(d.text(Members::ContactInfo).null())
        .col(d.text(Members::AccountStatus).not_null())
        .col(d.guid(Members::MeterId).null())
        .col(d.timestamp(Members::MembershipDate).not_null())
        .col(d.decimal(Members::CurrentBalance, 16, 2).not_null())
        .col(d.boolean(Members::IsActive).not_null())
        .col(d.text(Members::Email).null())
        .col(d.text(Members::PhoneNumber).null())
        .col(d.text(Members::EmergencyContact).null())
        .col(d.text(Members::ServiceClass).null())
        .col(d.text(Members::RateSchedule).null());
    finish_root(d, t)
}

fn meters(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Meters::Table);
    t.col(d.text(Meters::MeterNumber).not_null())
        .col(d.text(Meters::MeterType).not_null())
        .col(d.text(Meters::Manufacturer).not_null())
        .col(d.text(Meters::ModelNumber).not_null())
        .col(d.text(Meters::SerialNumber).null())
        .col(d.timestamp(Meters::InstallationDate).not_null())
        .col(d.timestamp(Meters::LastReadingDate).null())
        .col(d.decimal(Meters::LastReading, 16, 2).null())
        .col(d.decimal(Meters::Multiplier, 16, 2).not_null())
        .col(d.text(Meters::Status).not_null())
        .col(d.text(Meters::Location).null())
        .col(d.text(Meters::GpsCoordinates).null())
        .col(d.guid(Meters::MemberId).null())
        .col(d.boolean(Meters::IsSmartMeter).not_null())
        .col(d.text(Meters::CommunicationProtocol).null())
        .col(d.timestamp(Meters::LastMaintenanceDate).null())
        .col(d.timestamp(Meters::NextCalibrationDate).null())
        .col(d.decimal(Meters::AccuracyClass, 16, 2).null())
        .col(d.text(Meters::MeterConfiguration).null());
    finish_root(d, t)
}

fn payees(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Payees::Table);
    t.col(d.varchar(Payees::PayeeCode, 255).not_null())
        .col(d.varchar(Payees::Address, 1024).null())
        .col(d.varchar(Payees::ExpenseAccountCode, 16).null())
        .col(d.varchar(Payees::ExpenseAccountName, 64).null())
        .col(d.text(Payees::Tin).null());
    finish_root(d, t)
}

fn projects(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Projects::Table);
    t.col(d.timestamp(Projects::StartDate).not_null())
        .col(d.timestamp(Projects::EndDate).null())
        .col(d.decimal(Projects::BudgetedAmount, 18, 2).not_null())
        .col(d.varchar(Projects::Status, 16).not_null())
        .col(d.varchar(Projects::ClientName, 256).null())
        .col(d.varchar(Projects::ProjectManager, 256).null())
        .col(d.varchar(Projects::Department, 100).null())
        .col(d.decimal(Projects::ActualCost, 18, 2).not_null())
        .col(d.decimal(Projects::ActualRevenue, 18, 2).not_null());
    finish_root(d, t)
}

fn vendors(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, Vendors::Table);
    t.col(d.varchar(Vendors::VendorCode, 64).not_null())
        .col(d.varchar(Vendors::Address, 512).null())
        .col(d.text(Vendors::BillingAddress).null())
        .col(d.text(Vendors::ContactPerson).null())
        .col(d.text(Vendors::Email).null())
        .col(d.text(Vendors::Terms).null())
        .col(d.varchar(Vendors::ExpenseAccountCode, 64).null())
        .col(d.varchar(Vendors::ExpenseAccountName, 256).null())
        .col(d.varchar(Vendors::Tin, 32).null())
        .col(d.varchar(Vendors::PhoneNumber, 32).null())
        .col(d.boolean(Vendors::IsActive).not_null());
    finish_root(d, t)
}

fn budget_lines(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, BudgetLines::Table);
    t.col(d.guid(BudgetLines::BudgetId).not_null())
        .col(d.guid(BudgetLines::AccountId).not_null())
        .col(d.decimal(BudgetLines::BudgetedAmount, 18, 2).not_null())
        .col(d.decimal(BudgetLines::ActualAmount, 18, 2).not_null())
        .col(d.varchar(Common::Description, 500).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        BudgetLines::Table,
        BudgetLines::BudgetId,
        Budgets::Table,
        ForeignKeyAction::Cascade,
    );
    t
}

fn depreciation_entries(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, DepreciationEntry::Table);
    t.col(d.guid(DepreciationEntry::FixedAssetId).not_null())
        .col(d.decimal(DepreciationEntry::Amount, 16, 2).not_null())
        .col(d.timestamp(DepreciationEntry::Date).not_null())
        .col(d.text(DepreciationEntry::Method).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        DepreciationEntry::Table,
        DepreciationEntry::FixedAssetId,
        FixedAssets::Table,
        ForeignKeyAction::Cascade,
    );
    t
}

fn invoice_line_items(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, InvoiceLineItem::Table);
    t.col(d.guid(InvoiceLineItem::InvoiceId).not_null())
        .col(d.text(Common::Description).not_null())
        .col(d.decimal(InvoiceLineItem::Quantity, 16, 2).not_null())
        .col(d.decimal(InvoiceLineItem::UnitPrice, 16, 2).not_null())
        .col(d.decimal(InvoiceLineItem::TotalPrice, 16, 2).not_null())
        .col(d.text(InvoiceLineItem::AccountCode).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        InvoiceLineItem::Table,
        InvoiceLineItem::InvoiceId,
        Invoices::Table,
        ForeignKeyAction::Cascade,
    );
    t
}

fn journal_entry_lines(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, JournalEntryLines::Table);
    t.col(d.guid(JournalEntryLines::JournalEntryId).not_null())
        .col(d.guid(JournalEntryLines::AccountId).not_null())
        .col(d.decimal(JournalEntryLines::DebitAmount, 18, 2).not_null())
        .col(d.decimal(JournalEntryLines::CreditAmount, 18, 2).not_null())
        .col(d.text(Common::Description).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        JournalEntryLines::Table,
        JournalEntryLines::JournalEntryId,
        JournalEntries::Table,
        ForeignKeyAction::Cascade,
    );
    t
}

fn job_costing_entries(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, JobCostingEntries::Table);
    t.col(d.guid(JobCostingEntries::ProjectId).not_null())
        .col(d.timestamp(JobCostingEntries::Date).not_null())
        .col(d.text(Common::Description).not_null())
        .col(d.decimal(JobCostingEntries::Amount, 18, 2).not_null())
        .col(d.guid(JobCostingEntries::AccountId).not_null())
        .col(d.guid(JobCostingEntries::JournalEntryId).null())
        .col(d.text(JobCostingEntries::Category).null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        JobCostingEntries::Table,
        JobCostingEntries::ProjectId,
        Projects::Table,
        ForeignKeyAction::Cascade,
    );
    t
}

/// Readings hang off their meter and carry no descriptive or audit columns.
fn meter_reading(d: &Dialect) -> TableCreateStatement {
    let mut t = d.create_table(SCHEMA, MeterReading::Table);
    t.col(d.guid(MeterReading::MeterId).not_null())
        .col(d.decimal(MeterReading::Reading, 16, 2).not_null())
        .col(d.timestamp(MeterReading::ReadingDate).not_null())
        .col(d.text(MeterReading::ReadingType).not_null())
        .col(d.text(MeterReading::ReadBy).null())
        .col(d.boolean(MeterReading::IsValidated).not_null());
    d.foreign_key(
        &mut t,
        SCHEMA,
        MeterReading::Table,
        MeterReading::MeterId,
        Meters::Table,
        ForeignKeyAction::Cascade,
    );
    t
}

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm_migration::sea_orm::DbBackend;

    #[test]
    fn every_created_table_is_dropped() {
        let d = Dialect::new(DbBackend::Postgres);
        let created = Migration
            .up_plan(&d)
            .iter()
            .filter(|step| matches!(step, SchemaStep::CreateTable(_)))
            .count();
        let dropped = Migration
            .down_plan(&d)
            .iter()
            .filter(|step| matches!(step, SchemaStep::DropTable(_)))
            .count();
        assert_eq!(created, 23);
        assert_eq!(created, dropped);
    }

    #[test]
    fn line_tables_cascade_to_their_headers() {
        let sql = plan::render(DbBackend::MySql, &Migration.up_plan(&Dialect::new(DbBackend::MySql)));
        let budget_lines = sql
            .iter()
            .find(|s| s.starts_with("CREATE TABLE `accounting`.`BudgetLines`"))
            .expect("BudgetLines is created");
        assert!(budget_lines.contains("FK_BudgetLines_Budgets_BudgetId"));
        assert!(budget_lines.contains("ON DELETE CASCADE"));
        assert!(budget_lines.contains("`Description` varchar(500)"));
    }

    #[test]
    fn meter_readings_cascade_from_meters() {
        let sql = plan::render(
            DbBackend::Postgres,
            &Migration.up_plan(&Dialect::new(DbBackend::Postgres)),
        );
        let readings = sql
            .iter()
            .find(|s| s.starts_with(r#"CREATE TABLE "accounting"."MeterReading""#))
            .expect("MeterReading is created");
        assert!(readings.contains("FK_MeterReading_Meters_MeterId"));
        assert!(readings.contains(r#"REFERENCES "accounting"."Meters""#));
        assert!(readings.contains("ON DELETE CASCADE"));
        assert!(!readings.contains("CreatedOn"));
        assert!(sql.iter().any(|s| s.contains(r#"CREATE INDEX "IX_MeterReading_MeterId""#)));
        for table in ["Consumption", "FuelConsumptions", "Members", "Meters"] {
            let prefix = format!(r#"CREATE TABLE "accounting"."{table}""#);
            assert!(sql.iter().any(|s| s.starts_with(&prefix)), "{table} is created");
        }
    }
}
