use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// A leave request as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequestResponse {
    pub id: Uuid,
    pub employee_id: Uuid,
    pub leave_type_id: Uuid,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[schema(value_type = String, example = "2.50")]
    pub number_of_days: Decimal,
    pub reason: String,
    #[schema(example = "Pending")]
    pub status: String,
    pub approver_manager_id: Option<Uuid>,
    pub submitted_date: Option<DateTime<Utc>>,
    pub reviewed_date: Option<DateTime<Utc>>,
    pub approver_comment: Option<String>,
    pub is_active: bool,
    pub attachment_path: Option<String>,
}

/// Filters for listing leave requests. Every filter is optional; dates
/// select requests whose span overlaps the `[from, to]` window.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_window"))]
pub struct LeaveRequestSearch {
    pub employee_id: Option<Uuid>,
    pub leave_type_id: Option<Uuid>,
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
    /// Matched against the request reason.
    #[validate(length(min = 1, max = 200))]
    pub keyword: Option<String>,
    /// 1-based page number.
    #[serde(default = "default_page")]
    #[validate(range(min = 1, max = 1_000_000))]
    #[schema(minimum = 1, maximum = 1_000_000)]
    pub page: u64,
    pub page_size: Option<u64>,
}

fn default_page() -> u64 {
    1
}

fn validate_window(search: &LeaveRequestSearch) -> Result<(), ValidationError> {
    match (search.from, search.to) {
        (Some(from), Some(to)) if from > to => {
            let mut err = ValidationError::new("date_window");
            err.message = Some("from must not be after to".into());
            Err(err)
        }
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn serializes_in_camel_case() {
        let dto = LeaveRequestResponse {
            id: Uuid::nil(),
            employee_id: Uuid::nil(),
            leave_type_id: Uuid::nil(),
            start_date: Utc.with_ymd_and_hms(2025, 11, 3, 0, 0, 0).unwrap(),
            end_date: Utc.with_ymd_and_hms(2025, 11, 5, 0, 0, 0).unwrap(),
            number_of_days: dec!(2.5),
            reason: "Family trip".into(),
            status: "Pending".into(),
            approver_manager_id: None,
            submitted_date: None,
            reviewed_date: None,
            approver_comment: None,
            is_active: true,
            attachment_path: None,
        };

        let value = serde_json::to_value(&dto).unwrap();
        assert_eq!(value["employeeId"], json!(Uuid::nil()));
        assert_eq!(value["numberOfDays"], json!("2.5"));
        assert_eq!(value["isActive"], json!(true));
        assert!(value["approverManagerId"].is_null());
        assert!(value.get("employee_id").is_none());
    }

    #[test]
    fn search_defaults_to_first_page() {
        let search: LeaveRequestSearch = serde_json::from_value(json!({ "status": "Approved" })).unwrap();
        assert_eq!(search.page, 1);
        assert!(search.validate().is_ok());
    }

    #[test]
    fn search_rejects_inverted_window_and_page_zero() {
        let search = LeaveRequestSearch {
            from: Some(Utc.with_ymd_and_hms(2025, 12, 1, 0, 0, 0).unwrap()),
            to: Some(Utc.with_ymd_and_hms(2025, 11, 1, 0, 0, 0).unwrap()),
            page: 1,
            ..Default::default()
        };
        assert!(search.validate().is_err());

        let search = LeaveRequestSearch {
            page: 0,
            ..Default::default()
        };
        assert!(search.validate().is_err());
    }

    #[test]
    fn search_caps_page_number() {
        let search: LeaveRequestSearch =
            serde_json::from_value(json!({ "page": 1_000_000_000_000_000_000u64 })).unwrap();
        let errors = search.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("page"));
    }
}
