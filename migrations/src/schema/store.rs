//! `store` schema: catalog, procurement, warehouse operations and sales imports.

table_idens! {
    pub enum Categories {
        Code,
        ParentCategoryId,
        IsActive,
        SortOrder,
    }
}

table_idens! {
    pub enum Suppliers {
        Code,
        ContactPerson,
        Email,
        Phone,
        Address,
        PostalCode,
        Website,
        CreditLimit,
        PaymentTermsDays,
        IsActive,
        Rating,
    }
}

table_idens! {
    pub enum Warehouses {
        Code,
        Address,
        ManagerName,
        ManagerEmail,
        ManagerPhone,
        TotalCapacity,
        UsedCapacity,
        CapacityUnit,
        IsActive,
        IsMainWarehouse,
        WarehouseType,
        LastInventoryDate,
    }
}

table_idens! {
    pub enum WarehouseLocations {
        Code,
        Aisle,
        Section,
        Shelf,
        Bin,
        WarehouseId,
        LocationType,
        Capacity,
        CapacityUnit,
        UsedCapacity,
        RequiresTemperatureControl,
        MinTemperature,
        MaxTemperature,
        TemperatureUnit,
        IsActive,
    }
}

table_idens! {
    pub enum Bins {
        Code,
        WarehouseLocationId,
        BinType,
        Capacity,
        CurrentUtilization,
        IsActive,
        IsPickable,
        IsPutable,
        Priority,
    }
}

table_idens! {
    pub enum Items {
        Sku,
        Barcode,
        UnitPrice,
        Cost,
        MinimumStock,
        MaximumStock,
        ReorderPoint,
        ReorderQuantity,
        LeadTimeDays,
        IsPerishable,
        IsSerialTracked,
        IsLotTracked,
        ShelfLifeDays,
        Brand,
        Manufacturer,
        ManufacturerPartNumber,
        Weight,
        WeightUnit,
        Length,
        Width,
        Height,
        DimensionUnit,
        CategoryId,
        SupplierId,
        UnitOfMeasure,
        WarehouseLocationId,
    }
}

table_idens! {
    pub enum ItemSuppliers {
        ItemId,
        SupplierId,
        SupplierPartNumber,
        UnitCost,
        LeadTimeDays,
        MinimumOrderQuantity,
        PackagingQuantity,
        IsPreferred,
        IsActive,
        ReliabilityRating,
        LastPriceUpdate,
    }
}

table_idens! {
    pub enum PurchaseOrders {
        OrderNumber,
        SupplierId,
        OrderDate,
        ExpectedDeliveryDate,
        ActualDeliveryDate,
        Status,
        TotalAmount,
        TaxAmount,
        DiscountAmount,
        ShippingCost,
        NetAmount,
        DeliveryAddress,
        ContactPerson,
        ContactPhone,
        IsUrgent,
    }
}

table_idens! {
    pub enum PurchaseOrderItems {
        PurchaseOrderId,
        ItemId,
        Quantity,
        UnitPrice,
        DiscountAmount,
        ReceivedQuantity,
        TotalPrice,
    }
}

table_idens! {
    pub enum GoodsReceipts {
        ReceiptNumber,
        PurchaseOrderId,
        WarehouseId,
        WarehouseLocationId,
        ReceivedDate,
        Status,
    }
}

table_idens! {
    pub enum GoodsReceiptItems {
        GoodsReceiptId,
        ItemId,
        PurchaseOrderItemId,
        Quantity,
        UnitCost,
    }
}

table_idens! {
    pub enum LotNumbers {
        LotCode,
        ItemId,
        SupplierId,
        ManufactureDate,
        ExpirationDate,
        ReceiptDate,
        QuantityReceived,
        QuantityRemaining,
        Status,
        QualityNotes,
    }
}

table_idens! {
    pub enum SerialNumbers {
        SerialNumberValue,
        ItemId,
        WarehouseId,
        WarehouseLocationId,
        BinId,
        LotNumberId,
        Status,
        ReceiptDate,
        ManufactureDate,
        WarrantyExpirationDate,
        ExternalReference,
    }
}

table_idens! {
    pub enum StockLevels {
        ItemId,
        WarehouseId,
        WarehouseLocationId,
        BinId,
        LotNumberId,
        SerialNumberId,
        QuantityOnHand,
        QuantityAvailable,
        QuantityReserved,
        QuantityAllocated,
        LastCountDate,
        LastMovementDate,
    }
}

table_idens! {
    pub enum InventoryReservations {
        ReservationNumber,
        ItemId,
        WarehouseId,
        WarehouseLocationId,
        BinId,
        LotNumberId,
        QuantityReserved,
        ReservationType,
        Status,
        ReferenceNumber,
        ReservationDate,
        ExpirationDate,
        CompletionDate,
        ReservedBy,
        ReleaseReason,
    }
}

table_idens! {
    pub enum InventoryTransactions {
        TransactionNumber,
        ItemId,
        WarehouseId,
        WarehouseLocationId,
        PurchaseOrderId,
        TransactionType,
        Reason,
        Quantity,
        QuantityBefore,
        QuantityAfter,
        UnitCost,
        TotalCost,
        TransactionDate,
        Reference,
        PerformedBy,
        IsApproved,
        ApprovedBy,
        ApprovalDate,
    }
}

table_idens! {
    pub enum PickLists {
        PickListNumber,
        WarehouseId,
        Status,
        PickingType,
        Priority,
        AssignedTo,
        StartDate,
        CompletedDate,
        ExpectedCompletionDate,
        ReferenceNumber,
        TotalLines,
        CompletedLines,
    }
}

table_idens! {
    pub enum PickListItems {
        PickListId,
        ItemId,
        BinId,
        LotNumberId,
        SerialNumberId,
        QuantityToPick,
        QuantityPicked,
        Status,
        SequenceNumber,
        PickedDate,
    }
}

table_idens! {
    pub enum PutAwayTasks {
        TaskNumber,
        WarehouseId,
        GoodsReceiptId,
        Status,
        Priority,
        AssignedTo,
        StartDate,
        CompletedDate,
        PutAwayStrategy,
        TotalLines,
        CompletedLines,
    }
}

table_idens! {
    pub enum PutAwayTaskItems {
        PutAwayTaskId,
        ItemId,
        ToBinId,
        LotNumberId,
        SerialNumberId,
        QuantityToPutAway,
        QuantityPutAway,
        Status,
        SequenceNumber,
        PutAwayDate,
    }
}

table_idens! {
    pub enum CycleCounts {
        CountNumber,
        WarehouseId,
        WarehouseLocationId,
        ScheduledDate,
        ActualStartDate,
        CompletionDate,
        Status,
        CountType,
        CounterName,
        SupervisorName,
        TotalItemsToCount,
        ItemsCountedCorrect,
        ItemsWithDiscrepancies,
        AccuracyPercentage,
    }
}

table_idens! {
    pub enum CycleCountItems {
        CycleCountId,
        ItemId,
        SystemQuantity,
        CountedQuantity,
        VarianceQuantity,
        CountDate,
        CountedBy,
        RequiresRecount,
        RecountReason,
    }
}

table_idens! {
    pub enum StockAdjustments {
        AdjustmentNumber,
        ItemId,
        WarehouseId,
        WarehouseLocationId,
        AdjustmentDate,
        AdjustmentType,
        Reason,
        QuantityBefore,
        AdjustmentQuantity,
        QuantityAfter,
        UnitCost,
        TotalCostImpact,
        Reference,
        AdjustedBy,
        ApprovedBy,
        ApprovalDate,
        IsApproved,
        BatchNumber,
        ExpiryDate,
    }
}

table_idens! {
    pub enum InventoryTransfers {
        Reason,
        TransferNumber,
        FromWarehouseId,
        ToWarehouseId,
        TransferDate,
        Status,
        TotalValue,
        TransportMethod,
        TrackingNumber,
        RequestedBy,
        ApprovedBy,
        ApprovalDate,
        FromLocationId,
        ToLocationId,
        ExpectedArrivalDate,
        TransferType,
        Priority,
        ActualArrivalDate,
    }
}

table_idens! {
    pub enum InventoryTransferItems {
        InventoryTransferId,
        ItemId,
        Quantity,
        UnitPrice,
        LineTotal,
    }
}

table_idens! {
    pub enum SalesImports {
        ImportNumber,
        ImportDate,
        SalesPeriodFrom,
        SalesPeriodTo,
        WarehouseId,
        FileName,
        TotalRecords,
        ProcessedRecords,
        ErrorRecords,
        TotalQuantity,
        TotalValue,
        Status,
        IsReversed,
        ReversedDate,
        ReversedBy,
        ReversalReason,
        ProcessedBy,
        ErrorMessage,
    }
}

table_idens! {
    pub enum SalesImportItems {
        SalesImportId,
        LineNumber,
        SaleDate,
        Barcode,
        ItemName,
        QuantitySold,
        UnitPrice,
        TotalAmount,
        ItemId,
        InventoryTransactionId,
        IsProcessed,
        HasError,
        ErrorMessage,
    }
}
