pub mod leave_request;

pub use leave_request::{LeaveRequestResponse, LeaveRequestSearch};
