//! Shared fixtures for domain service unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    Cpf, Employee, EmployeeCode, EmployeeDraft, EmployeeId, EmployeeName, RecordStatus, Ticket,
    TicketDraft, TicketId, TicketQuantity,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 15, 9, 30, 0)
        .single()
        .expect("valid fixture timestamp")
}

struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn make_employee(name: &str, code: i64, cpf: &str, status: RecordStatus) -> Employee {
    let created = Utc
        .with_ymd_and_hms(2024, 1, 2, 8, 0, 0)
        .single()
        .expect("valid creation timestamp");
    Employee::new(EmployeeDraft {
        id: EmployeeId::random(),
        code: EmployeeCode::new(code).expect("valid code"),
        name: EmployeeName::new(name).expect("valid name"),
        cpf: Cpf::new(cpf).expect("valid cpf"),
        status,
        created_at: created,
        updated_at: created,
    })
}

pub(crate) fn make_ticket(owner: &Employee, quantity: i64, delivered_at: DateTime<Utc>) -> Ticket {
    Ticket::new(TicketDraft {
        id: TicketId::random(),
        quantity: TicketQuantity::new(quantity).expect("valid quantity"),
        employee_id: owner.id(),
        employee_code: owner.code(),
        status: RecordStatus::Active,
        delivered_at,
    })
}
