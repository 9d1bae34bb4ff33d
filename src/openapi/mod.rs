use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ERP Schema Service",
        version = "0.1.0",
        description = r#"
Read access to the HR leave-request model and the state of the
`accounting`, `store` and `hr` schema migrations.

## Error Handling

Errors share one body shape:

```json
{
  "error": "Not Found",
  "message": "Not found: leave request 550e8400-e29b-41d4-a716-446655440000",
  "timestamp": "2025-11-20T10:30:00Z"
}
```

## Pagination

Search bodies take a 1-based `page` and an optional `pageSize`, which is
capped at the configured maximum (100 by default).
        "#,
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development")
    ),
    tags(
        (name = "HR", description = "Leave request read endpoints"),
        (name = "Schema", description = "Migration status endpoints")
    ),
    paths(
        crate::handlers::leave_requests::get_leave_request,
        crate::handlers::leave_requests::search_leave_requests,
        crate::handlers::schema::list_migrations,
    ),
    components(
        schemas(
            crate::dto::LeaveRequestResponse,
            crate::dto::LeaveRequestSearch,
            crate::migrator::MigrationStatusEntry,
            crate::errors::ErrorResponse
        )
    )
)]
pub struct ApiDocV1;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/swagger-ui")
        .url("/api-docs/openapi.json", ApiDocV1::openapi())
        .config(utoipa_swagger_ui::Config::from("/api-docs/openapi.json").try_it_out_enabled(true))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let openapi = ApiDocV1::openapi();
        let json = serde_json::to_string_pretty(&openapi).unwrap();
        assert!(json.contains("ERP Schema Service"));
        assert!(json.contains("/api/v1/hr/leave-requests/{id}"));
        assert!(json.contains("/api/v1/hr/leave-requests/search"));
        assert!(json.contains("/api/v1/schema/migrations"));
        assert!(json.contains("LeaveRequestResponse"));
    }
}
