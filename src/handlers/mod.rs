pub mod leave_requests;
pub mod schema;
