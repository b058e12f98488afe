//! Behavioural coverage for the in-memory ledger.

use chrono::TimeDelta;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::RecordStatus;
use crate::domain::service_test_support::{fixture_timestamp, make_employee, make_ticket};
use crate::domain::{Cpf, DeliveryWindow};

#[fixture]
fn ledger() -> InMemoryLedger {
    InMemoryLedger::new()
}

async fn store(ledger: &InMemoryLedger, employee: &Employee) {
    EmployeeRepository::create(ledger, employee)
        .await
        .expect("employee stored");
}

#[rstest]
#[tokio::test]
async fn duplicate_cpf_is_a_conflict(ledger: InMemoryLedger) {
    store(&ledger, &make_employee("Ana", 1000, "12345678901", RecordStatus::Active)).await;
    let clash = make_employee("Bia", 1001, "12345678901", RecordStatus::Active);

    let err = EmployeeRepository::create(&ledger, &clash)
        .await
        .expect_err("cpf collision");

    assert_eq!(err, EmployeeRepositoryError::conflict("cpf"));
}

#[rstest]
#[tokio::test]
async fn duplicate_code_is_a_conflict(ledger: InMemoryLedger) {
    store(&ledger, &make_employee("Ana", 1000, "12345678901", RecordStatus::Active)).await;
    let clash = make_employee("Bia", 1000, "10987654321", RecordStatus::Active);

    let err = EmployeeRepository::create(&ledger, &clash)
        .await
        .expect_err("code collision");

    assert_eq!(err, EmployeeRepositoryError::conflict("code"));
}

#[rstest]
#[tokio::test]
async fn lookups_resolve_by_id_cpf_and_code(ledger: InMemoryLedger) {
    let ana = make_employee("Ana", 1004, "12345678901", RecordStatus::Active);
    store(&ledger, &ana).await;

    let by_id = ledger.find(&EmployeeLookup::Id(ana.id())).await.expect("find");
    let by_cpf = ledger
        .find(&EmployeeLookup::Cpf(Cpf::new("12345678901").expect("cpf")))
        .await
        .expect("find");
    let by_code = ledger
        .find(&EmployeeLookup::Code(EmployeeCode::new(1004).expect("code")))
        .await
        .expect("find");
    let missing = ledger
        .find(&EmployeeLookup::Id(EmployeeId::random()))
        .await
        .expect("find");

    assert_eq!(by_id.as_ref(), Some(&ana));
    assert_eq!(by_cpf.as_ref(), Some(&ana));
    assert_eq!(by_code.as_ref(), Some(&ana));
    assert!(missing.is_none());
    assert_eq!(
        ledger.highest_code().await.expect("highest"),
        Some(ana.code())
    );
}

#[rstest]
#[tokio::test]
async fn update_of_unknown_employee_reports_false(ledger: InMemoryLedger) {
    let ghost = make_employee("Ghost", 1000, "12345678901", RecordStatus::Active);

    let updated = ledger.update(&ghost).await.expect("update");

    assert!(!updated);
}

#[rstest]
#[tokio::test]
async fn listing_orders_by_name_and_filters_status(ledger: InMemoryLedger) {
    store(&ledger, &make_employee("Carla", 1000, "11111111111", RecordStatus::Active)).await;
    store(&ledger, &make_employee("Ana", 1001, "22222222222", RecordStatus::Active)).await;
    store(&ledger, &make_employee("Bruno", 1002, "33333333333", RecordStatus::Inactive)).await;

    let active = EmployeeRepository::list(&ledger, &EmployeeFilter::active())
        .await
        .expect("list");
    let names: Vec<&str> = active.iter().map(|e| e.name().as_ref()).collect();

    assert_eq!(names, ["Ana", "Carla"]);
}

#[rstest]
#[tokio::test]
async fn tickets_require_a_stored_employee(ledger: InMemoryLedger) {
    let ghost = make_employee("Ghost", 1000, "12345678901", RecordStatus::Active);
    let ticket = make_ticket(&ghost, 2, fixture_timestamp());

    let err = TicketRepository::create(&ledger, &ticket)
        .await
        .expect_err("orphan ticket");

    assert!(matches!(err, TicketRepositoryError::MissingEmployee { .. }));
}

#[rstest]
#[tokio::test]
async fn aggregates_follow_the_filter(ledger: InMemoryLedger) {
    let ana = make_employee("Ana", 1000, "12345678901", RecordStatus::Active);
    let bia = make_employee("Bia", 1001, "10987654321", RecordStatus::Active);
    store(&ledger, &ana).await;
    store(&ledger, &bia).await;

    let base = fixture_timestamp();
    let early = make_ticket(&ana, 3, base - TimeDelta::days(10));
    let late = make_ticket(&ana, 2, base);
    let other = make_ticket(&bia, 5, base - TimeDelta::days(1));
    for ticket in [&early, &late, &other] {
        TicketRepository::create(&ledger, ticket)
            .await
            .expect("ticket stored");
    }

    let listed = TicketRepository::list(&ledger, &TicketFilter::active())
        .await
        .expect("list");
    assert_eq!(
        listed.iter().map(Ticket::id).collect::<Vec<_>>(),
        vec![late.id(), other.id(), early.id()]
    );

    let window = DeliveryWindow::new(Some(base - TimeDelta::days(2)), Some(base)).expect("window");
    let recent = TicketFilter::active().with_window(window);
    assert_eq!(ledger.sum_quantity(&recent).await.expect("sum"), 7);
    assert_eq!(ledger.sum_quantity(&TicketFilter::active()).await.expect("sum"), 10);

    let groups = ledger
        .group_by_employee(&TicketFilter::active())
        .await
        .expect("groups");
    let ana_group = groups
        .iter()
        .find(|group| group.employee_id == ana.id())
        .expect("ana grouped");
    assert_eq!(ana_group.total_quantity, 5);
    assert_eq!(ana_group.last_delivered_at, Some(base));
    assert_eq!(groups.len(), 2);
}
