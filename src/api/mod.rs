pub mod attendance;
pub mod employee;
pub mod insight;
pub mod leave_request;
pub mod payroll;
pub mod reports;
