pub mod attendance;
pub mod payroll_run;
