//! Tests for the employee service.

use std::sync::Arc;

use mockall::predicate::eq;
use rstest::{fixture, rstest};

use super::*;
use crate::domain::ports::{MockEmployeeRepository, MockTicketRepository, TicketRepositoryError};
use crate::domain::service_test_support::{
    fixture_clock, fixture_timestamp, make_employee, make_ticket,
};
use crate::domain::{Cpf, EmployeeCode, ErrorCode, RecordStatus};

fn ana_request() -> NewEmployee {
    NewEmployee {
        name: Some(" Ana ".to_owned()),
        cpf: Some("12345678901".to_owned()),
        status: None,
        code: None,
    }
}

fn service(
    employees: MockEmployeeRepository,
    tickets: MockTicketRepository,
) -> EmployeeService<MockEmployeeRepository, MockTicketRepository> {
    EmployeeService::new(Arc::new(employees), Arc::new(tickets), fixture_clock())
}

#[fixture]
fn empty_store() -> MockEmployeeRepository {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find().returning(|_| Ok(None));
    repo.expect_highest_code().returning(|| Ok(None));
    repo
}

#[rstest]
#[tokio::test]
async fn create_normalises_and_allocates_baseline_code(mut empty_store: MockEmployeeRepository) {
    empty_store.expect_create().times(1).return_once(|_| Ok(()));

    let employee = service(empty_store, MockTicketRepository::new())
        .create_employee(ana_request())
        .await
        .expect("employee created");

    assert_eq!(employee.name().as_ref(), "Ana");
    assert_eq!(employee.status(), RecordStatus::Active);
    assert_eq!(employee.code().value(), 1000);
    assert_eq!(employee.created_at(), fixture_timestamp());
    assert_eq!(employee.updated_at(), fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn create_rejects_invalid_fields_before_storage() {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find().times(0);
    repo.expect_create().times(0);
    let mut request = ana_request();
    request.cpf = Some("123".to_owned());

    let err = service(repo, MockTicketRepository::new())
        .create_employee(request)
        .await
        .expect_err("invalid cpf");

    assert_eq!(err.code(), ErrorCode::InvalidField);
    assert_eq!(err.field(), Some("cpf"));
}

#[rstest]
#[tokio::test]
async fn create_reports_duplicate_cpf_as_conflict() {
    let existing = make_employee("Ana", 1000, "12345678901", RecordStatus::Active);
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find()
        .with(eq(EmployeeLookup::Cpf(
            Cpf::new("12345678901").expect("cpf"),
        )))
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_create().times(0);

    let err = service(repo, MockTicketRepository::new())
        .create_employee(ana_request())
        .await
        .expect_err("duplicate cpf");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.field(), Some("cpf"));
}

#[rstest]
#[tokio::test]
async fn create_reports_taken_explicit_code_as_conflict() {
    let holder = make_employee("Bia", 77, "99999999999", RecordStatus::Active);
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find().returning(move |lookup| match lookup {
        EmployeeLookup::Code(_) => Ok(Some(holder.clone())),
        _ => Ok(None),
    });
    repo.expect_create().times(0);
    let mut request = ana_request();
    request.code = Some(77);

    let err = service(repo, MockTicketRepository::new())
        .create_employee(request)
        .await
        .expect_err("code taken");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.field(), Some("code"));
}

#[rstest]
#[tokio::test]
async fn create_allocates_above_highest_code(mut empty_store: MockEmployeeRepository) {
    empty_store.checkpoint();
    empty_store.expect_find().returning(|_| Ok(None));
    empty_store
        .expect_highest_code()
        .return_once(|| Ok(Some(EmployeeCode::new(1041).expect("code"))));
    empty_store.expect_create().return_once(|_| Ok(()));

    let employee = service(empty_store, MockTicketRepository::new())
        .create_employee(ana_request())
        .await
        .expect("employee created");

    assert_eq!(employee.code().value(), 1042);
}

#[rstest]
#[case("cpf")]
#[case("code")]
#[tokio::test]
async fn write_time_uniqueness_violation_is_conflict(
    mut empty_store: MockEmployeeRepository,
    #[case] field: &'static str,
) {
    empty_store
        .expect_create()
        .return_once(move |_| Err(EmployeeRepositoryError::conflict(field)));

    let err = service(empty_store, MockTicketRepository::new())
        .create_employee(ana_request())
        .await
        .expect_err("late conflict");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.field(), Some(field));
}

#[rstest]
#[tokio::test]
async fn storage_outage_maps_to_storage_failure() {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find()
        .return_once(|_| Err(EmployeeRepositoryError::connection("pool exhausted")));

    let err = service(repo, MockTicketRepository::new())
        .create_employee(ana_request())
        .await
        .expect_err("storage failure");

    assert_eq!(err.code(), ErrorCode::StorageFailure);
}

#[rstest]
#[tokio::test]
async fn update_applies_changes_and_keeps_code() {
    let existing = make_employee("Ana", 1000, "12345678901", RecordStatus::Active);
    let id = existing.id();
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find()
        .with(eq(EmployeeLookup::Id(id)))
        .return_once(move |_| Ok(Some(existing)));
    repo.expect_update()
        .withf(|employee| employee.status() == RecordStatus::Inactive)
        .return_once(|_| Ok(true));

    let updated = service(repo, MockTicketRepository::new())
        .update_employee(
            id,
            UpdateEmployee {
                status: Some("I".to_owned()),
                ..UpdateEmployee::default()
            },
        )
        .await
        .expect("employee updated");

    assert_eq!(updated.code().value(), 1000);
    assert_eq!(updated.status(), RecordStatus::Inactive);
    assert_eq!(updated.updated_at(), fixture_timestamp());
}

#[rstest]
#[tokio::test]
async fn update_rejects_cpf_owned_by_another_employee() {
    let ana = make_employee("Ana", 1000, "12345678901", RecordStatus::Active);
    let bia = make_employee("Bia", 1001, "10987654321", RecordStatus::Active);
    let id = ana.id();
    let mut repo = MockEmployeeRepository::new();
    repo.expect_find().returning(move |lookup| match lookup {
        EmployeeLookup::Id(_) => Ok(Some(ana.clone())),
        EmployeeLookup::Cpf(_) => Ok(Some(bia.clone())),
        EmployeeLookup::Code(_) => Ok(None),
    });
    repo.expect_update().times(0);

    let err = service(repo, MockTicketRepository::new())
        .update_employee(
            id,
            UpdateEmployee {
                cpf: Some("10987654321".to_owned()),
                ..UpdateEmployee::default()
            },
        )
        .await
        .expect_err("cpf owned by someone else");

    assert_eq!(err.code(), ErrorCode::Conflict);
    assert_eq!(err.field(), Some("cpf"));
}

#[rstest]
#[tokio::test]
async fn update_unknown_employee_is_not_found(mut empty_store: MockEmployeeRepository) {
    empty_store.expect_update().times(0);

    let err = service(empty_store, MockTicketRepository::new())
        .update_employee(EmployeeId::random(), UpdateEmployee::default())
        .await
        .expect_err("unknown employee");

    assert_eq!(err.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn list_attaches_tickets_to_owners() {
    let ana = make_employee("Ana", 1000, "12345678901", RecordStatus::Active);
    let bia = make_employee("Bia", 1001, "10987654321", RecordStatus::Inactive);
    let ticket = make_ticket(&ana, 5, fixture_timestamp());
    let employees = vec![ana, bia];
    let mut repo = MockEmployeeRepository::new();
    repo.expect_list().return_once(move |_| Ok(employees));
    let mut tickets = MockTicketRepository::new();
    tickets.expect_list().return_once(move |_| Ok(vec![ticket]));

    let listed = service(repo, tickets)
        .list_employees()
        .await
        .expect("list succeeds");

    assert_eq!(listed.len(), 2);
    assert_eq!(listed[0].tickets.len(), 1);
    assert!(listed[1].tickets.is_empty());
}

#[rstest]
#[tokio::test]
async fn ticket_storage_failure_surfaces_on_reads() {
    let mut repo = MockEmployeeRepository::new();
    repo.expect_list().return_once(|_| Ok(Vec::new()));
    let mut tickets = MockTicketRepository::new();
    tickets
        .expect_list()
        .return_once(|_| Err(TicketRepositoryError::query("timeout")));

    let err = service(repo, tickets)
        .list_employees()
        .await
        .expect_err("storage failure");

    assert_eq!(err.code(), ErrorCode::StorageFailure);
}

#[rstest]
#[tokio::test]
async fn get_employee_returns_not_found_when_missing(empty_store: MockEmployeeRepository) {
    let err = service(empty_store, MockTicketRepository::new())
        .get_employee(EmployeeId::random())
        .await
        .expect_err("not found");

    assert_eq!(err.code(), ErrorCode::NotFound);
}
