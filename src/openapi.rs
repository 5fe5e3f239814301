// src/openapi.rs

use crate::engine::AdvanceRejection;
use crate::models::{
    AttendanceRecord, AutoCloseReport, CashAdvanceRequest, CashAdvanceStatus,
    CreateAdvanceRequest, CreateEmployeeRequest, DayType, DecideAdvanceRequest, Employee,
    EmployeeRateCard, MandatoryDeduction, PayrollRecord, PayrollRunReport, PayrollStatus,
    RunPayrollRequest, ScanAction, ScanRequest, ScanResponse, SetRateCardRequest, TimeInStatus,
    TransitionRequest,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Timeclock Payroll API",
        version = "1.0.0",
        description = "Fingerprint-attendance payroll engine. Classifies time-in/time-out \
            pairs into paid day types (lunch-adjusted hours, 09:30 late cutoff, 17:00 \
            overtime gate), aggregates Monday-Saturday weeks into salaries, gates cash \
            advances against earned wages, and assembles net-pay records per pay period.",
    ),
    paths(
        crate::handlers::employees::create_employee,
        crate::handlers::employees::list_employees,
        crate::handlers::employees::get_employee,
        crate::handlers::employees::set_rate_card,
        crate::handlers::attendance::scan,
        crate::handlers::attendance::list_attendance,
        crate::handlers::attendance::auto_close,
        crate::handlers::advances::request_advance,
        crate::handlers::advances::decide_advance,
        crate::handlers::advances::list_advances,
        crate::handlers::payroll::run_payroll,
        crate::handlers::payroll::list_payroll,
        crate::handlers::payroll::get_payroll,
        crate::handlers::payroll::transition_payroll,
    ),
    components(schemas(
        Employee,
        CreateEmployeeRequest,
        EmployeeRateCard,
        SetRateCardRequest,
        AttendanceRecord,
        DayType,
        TimeInStatus,
        ScanRequest,
        ScanAction,
        ScanResponse,
        AutoCloseReport,
        CashAdvanceRequest,
        CashAdvanceStatus,
        CreateAdvanceRequest,
        DecideAdvanceRequest,
        AdvanceRejection,
        MandatoryDeduction,
        PayrollRecord,
        PayrollStatus,
        RunPayrollRequest,
        TransitionRequest,
        PayrollRunReport,
    )),
    tags(
        (name = "Employees", description = "Employee registry and rate cards"),
        (name = "Attendance", description = "Scan capture and day classification"),
        (name = "Cash Advances", description = "Advances against earned wages"),
        (name = "Payroll", description = "Weekly assembly and the status machine"),
    )
)]
pub struct ApiDoc;
