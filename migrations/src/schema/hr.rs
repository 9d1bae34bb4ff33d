//! `hr` schema: the organisation tree, employees and leave.

table_idens! {
    pub enum OrganizationalUnits {
        Code,
        Type,
        ParentId,
        Level,
        HierarchyPath,
        ManagerId,
        CostCenter,
        Location,
        IsActive,
        TenantId,
    }
}

table_idens! {
    pub enum Employees {
        EmployeeNumber,
        FirstName,
        MiddleName,
        LastName,
        OrganizationalUnitId,
        Email,
        PhoneNumber,
        HireDate,
        Status,
        BirthDate,
        Gender,
        EmploymentClassification,
        BasicMonthlySalary,
        TerminationDate,
        TerminationReason,
        IsActive,
        TenantId,
    }
}

table_idens! {
    pub enum LeaveTypes {
        LeaveName,
        LeaveCode,
        AnnualAllowance,
        AccrualFrequency,
        IsPaid,
        MaxCarryoverDays,
        CarryoverExpiryMonths,
        RequiresApproval,
        MinimumNoticeDay,
        ApplicableGender,
        MinimumServiceDays,
        RequiresMedicalCertification,
        MedicalCertificateAfterDays,
        IsConvertibleToCash,
        IsCumulative,
        IsActive,
    }
}

table_idens! {
    pub enum LeaveBalances {
        EmployeeId,
        LeaveTypeId,
        Year,
        OpeningBalance,
        AccruedDays,
        CarriedOverDays,
        TakenDays,
        PendingDays,
        CarryoverExpiryDate,
    }
}

table_idens! {
    pub enum LeaveRequests {
        EmployeeId,
        LeaveTypeId,
        StartDate,
        EndDate,
        NumberOfDays,
        Reason,
        Status,
        ApproverManagerId,
        SubmittedDate,
        ReviewedDate,
        ApproverComment,
        IsActive,
        AttachmentPath,
    }
}
