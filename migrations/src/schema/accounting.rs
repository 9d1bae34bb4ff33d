//! `accounting` schema.

table_idens! {
    pub enum AccountingPeriods {
        StartDate,
        EndDate,
        IsClosed,
        IsAdjustmentPeriod,
        FiscalYear,
        PeriodType,
    }
}

table_idens! {
    pub enum Budgets {
        PeriodId,
        FiscalYear,
        BudgetType,
        Status,
        TotalBudgetedAmount,
        TotalActualAmount,
        ApprovedDate,
        ApprovedBy,
    }
}

table_idens! {
    pub enum BudgetLines {
        BudgetId,
        AccountId,
        BudgetedAmount,
        ActualAmount,
    }
}

table_idens! {
    pub enum ChartOfAccounts {
        AccountCode,
        AccountName,
        AccountType,
        SubAccountOf,
        UsoaCategory,
        IsActive,
        ParentCode,
        Balance,
        IsControlAccount,
        NormalBalance,
        AccountLevel,
        AllowDirectPosting,
        IsUsoaCompliant,
        RegulatoryClassification,
    }
}

table_idens! {
    pub enum Currencies {
        CurrencyCode,
        Symbol,
        DecimalPlaces,
        IsActive,
        IsBaseCurrency,
    }
}

table_idens! {
    pub enum Customers {
        CustomerCode,
        Address,
        BillingAddress,
        ContactPerson,
        Email,
        Terms,
        RevenueAccountCode,
        RevenueAccountName,
        Tin,
        PhoneNumber,
        IsActive,
        CreditLimit,
        CurrentBalance,
    }
}

table_idens! {
    pub enum DepreciationMethods {
        MethodCode,
        CalculationFormula,
        IsActive,
    }
}

table_idens! {
    pub enum FixedAssets {
        AssetName,
        PurchaseDate,
        PurchasePrice,
        ServiceLife,
        DepreciationMethodId,
        SalvageValue,
        CurrentBookValue,
        AccumulatedDepreciationAccountId,
        DepreciationExpenseAccountId,
        SerialNumber,
        Location,
        Department,
        IsDisposed,
        DisposalDate,
        DisposalAmount,
        AssetType,
        GpsCoordinates,
        SubstationName,
        AssetUsoaId,
        RegulatoryClassification,
        VoltageRating,
        Capacity,
        Manufacturer,
        ModelNumber,
        LastMaintenanceDate,
        NextMaintenanceDate,
        RequiresUsoaReporting,
    }
}

table_idens! {
    pub enum DepreciationEntry {
        FixedAssetId,
        Amount,
        Date,
        Method,
    }
}

table_idens! {
    pub enum GeneralLedgers {
        EntryId,
        AccountId,
        Debit,
        Credit,
        Memo,
        UsoaClass,
        TransactionDate,
        ReferenceNumber,
        PeriodId,
    }
}

table_idens! {
    pub enum Invoices {
        InvoiceNumber,
        MemberId,
        InvoiceDate,
        DueDate,
        TotalAmount,
        Status,
        ConsumptionId,
        UsageCharge,
        BasicServiceCharge,
        TaxAmount,
        OtherCharges,
        KWhUsed,
        BillingPeriod,
        PaidDate,
        PaymentMethod,
        LateFee,
        ReconnectionFee,
        DepositAmount,
        RateSchedule,
        DemandCharge,
    }
}

table_idens! {
    pub enum InvoiceLineItem {
        InvoiceId,
        Quantity,
        UnitPrice,
        TotalPrice,
        AccountCode,
    }
}

table_idens! {
    pub enum JournalEntries {
        Date,
        ReferenceNumber,
        Source,
        IsPosted,
        PeriodId,
        OriginalAmount,
        ApprovalStatus,
        ApprovedBy,
        ApprovedDate,
        PostingBatchId,
    }
}

table_idens! {
    pub enum JournalEntryLines {
        JournalEntryId,
        AccountId,
        DebitAmount,
        CreditAmount,
    }
}

table_idens! {
    pub enum Payees {
        PayeeCode,
        Address,
        ExpenseAccountCode,
        ExpenseAccountName,
        Tin,
    }
}

table_idens! {
    pub enum Projects {
        StartDate,
        EndDate,
        BudgetedAmount,
        Status,
        ClientName,
        ProjectManager,
        Department,
        ActualCost,
        ActualRevenue,
    }
}

table_idens! {
    pub enum JobCostingEntries {
        ProjectId,
        Date,
        Amount,
        AccountId,
        JournalEntryId,
        Category,
    }
}

table_idens! {
    pub enum Vendors {
        VendorCode,
        Address,
        BillingAddress,
        ContactPerson,
        Email,
        Terms,
        ExpenseAccountCode,
        ExpenseAccountName,
        Tin,
        PhoneNumber,
        IsActive,
    }
}

table_idens! {
    pub enum Consumption {
        MeterId,
        ReadingDate,
        CurrentReading,
        PreviousReading,
        KWhUsed,
        BillingPeriod,
        ReadingType,
        Multiplier,
        IsValidReading,
        ReadingSource,
    }
}

table_idens! {
    pub enum FuelConsumptions {
        ConsumptionDate,
        PowerPlantId,
        FuelType,
        Quantity,
        QuantityUnit,
        UnitCost,
        TotalCost,
        SupplierId,
        BtuContent,
        SulfurContent,
        DeliveryMethod,
        IsEmergencyFuel,
    }
}

table_idens! {
    pub enum Members {
        MemberNumber,
        MemberName,
        ServiceAddress,
        MailingAddress,
        ContactInfo,
        AccountStatus,
        MeterId,
        MembershipDate,
        CurrentBalance,
        IsActive,
        Email,
        PhoneNumber,
        EmergencyContact,
        ServiceClass,
        RateSchedule,
    }
}

table_idens! {
    pub enum Meters {
        MeterNumber,
        MeterType,
        Manufacturer,
        ModelNumber,
        SerialNumber,
        InstallationDate,
        LastReadingDate,
        LastReading,
        Multiplier,
        Status,
        Location,
        GpsCoordinates,
        MemberId,
        IsSmartMeter,
        CommunicationProtocol,
        LastMaintenanceDate,
        NextCalibrationDate,
        AccuracyClass,
        MeterConfiguration,
    }
}

table_idens! {
    pub enum MeterReading {
        MeterId,
        Reading,
        ReadingDate,
        ReadingType,
        ReadBy,
        IsValidated,
    }
}

table_idens! {
    pub enum Accruals {
        AccrualNumber,
        AccrualDate,
        Amount,
        IsReversed,
        ReversalDate,
    }
}

table_idens! {
    pub enum DeferredRevenues {
        DeferredRevenueNumber,
        RecognitionDate,
        Amount,
        IsRecognized,
        RecognizedDate,
    }
}

table_idens! {
    pub enum PostingBatches {
        BatchNumber,
        BatchDate,
        Status,
        PeriodId,
        ApprovalStatus,
        ApprovedBy,
        ApprovedDate,
    }
}

table_idens! {
    pub enum RegulatoryReports {
        ReportName,
        ReportType,
        ReportingPeriod,
        PeriodStartDate,
        PeriodEndDate,
        DueDate,
        SubmissionDate,
        Status,
        RegulatoryBody,
        FilingNumber,
        TotalAssets,
        TotalLiabilities,
        TotalEquity,
        TotalRevenue,
        TotalExpenses,
        NetIncome,
        RateBase,
        AllowedReturn,
        PreparedBy,
        ReviewedBy,
        ApprovedBy,
        RequiresAudit,
        AuditFirm,
        AuditDate,
    }
}
