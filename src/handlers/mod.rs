pub mod advances;
pub mod attendance;
pub mod employees;
pub mod general;
pub mod payroll;
