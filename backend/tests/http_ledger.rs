//! End-to-end HTTP tests over the in-memory ledger.

#[path = "support/ledger_app.rs"]
mod ledger_app;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::{Method, StatusCode};
use actix_web::test as actix_test;
use actix_http::Request;
use ledger_app::{ledger_app, memory_state};
use rstest::rstest;
use serde_json::{Value, json};
use ticket_ledger::domain::TRACE_ID_HEADER;

async fn send<S>(app: &S, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value)
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let mut request = actix_test::TestRequest::default().method(method).uri(uri);
    if let Some(body) = body {
        request = request.set_json(body);
    }
    let response = actix_test::call_service(app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

async fn create_employee<S>(app: &S, name: &str, cpf: &str) -> Value
where
    S: Service<Request, Response = ServiceResponse, Error = actix_web::Error>,
{
    let (status, body) = send(
        app,
        Method::POST,
        "/api/employees",
        Some(json!({"name": name, "cpf": cpf})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create {name}: {body}");
    body
}

fn id_of(body: &Value) -> String {
    body["id"].as_str().expect("id").to_owned()
}

#[actix_web::test]
async fn inactivated_employee_keeps_issued_tickets_in_totals() {
    let app = actix_test::init_service(ledger_app(memory_state())).await;

    let ana = create_employee(&app, "  Ana  ", "12345678901").await;
    assert_eq!(ana["name"], json!("Ana"));
    assert_eq!(ana["status"], json!("active"));
    assert_eq!(ana["code"], json!(1000));
    let ana_id = id_of(&ana);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({"name": "Bia", "cpf": "12345678901"})),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["field"], json!("cpf"));

    let (status, ticket) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(json!({"employeeId": ana_id, "quantity": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(ticket["employeeCode"], json!(1000));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/employees/{ana_id}"),
        Some(json!({"status": "inactive"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["status"], json!("inactive"));

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(json!({"employeeId": ana_id, "quantity": 3})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("inactive_employee"));

    let (status, total) = send(&app, Method::GET, "/api/reports/total", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(total, json!({"totalTickets": 5}));
}

#[actix_web::test]
async fn codes_continue_from_the_highest_existing_code() {
    let app = actix_test::init_service(ledger_app(memory_state())).await;

    let first = create_employee(&app, "Ana", "11111111111").await;
    let (status, explicit) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({"name": "Bia", "cpf": "22222222222", "code": 2000})),
    )
    .await;
    let next = create_employee(&app, "Caio", "33333333333").await;
    let (duplicate_status, duplicate) = send(
        &app,
        Method::POST,
        "/api/employees",
        Some(json!({"name": "Dani", "cpf": "44444444444", "code": 1000})),
    )
    .await;

    assert_eq!(first["code"], json!(1000));
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(explicit["code"], json!(2000));
    assert_eq!(next["code"], json!(2001));
    assert_eq!(duplicate_status, StatusCode::CONFLICT);
    assert_eq!(duplicate["field"], json!("code"));
}

#[rstest]
#[case(json!(0))]
#[case(json!(-3))]
#[case(json!("abc"))]
#[case(json!(2.5))]
#[actix_web::test]
async fn non_positive_or_non_numeric_quantity_is_invalid(#[case] quantity: Value) {
    let app = actix_test::init_service(ledger_app(memory_state())).await;
    let ana = create_employee(&app, "Ana", "12345678901").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(json!({"employeeId": id_of(&ana), "quantity": quantity})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("invalid_field"));
    assert_eq!(body["field"], json!("quantity"));
}

#[rstest]
#[case(json!({"quantity": 1}), "employeeId")]
#[case(json!({"employeeId": "3fa85f64-5717-4562-b3fc-2c963f66afa6"}), "quantity")]
#[actix_web::test]
async fn missing_ticket_fields_are_reported(#[case] payload: Value, #[case] field: &str) {
    let app = actix_test::init_service(ledger_app(memory_state())).await;

    let (status, body) = send(&app, Method::POST, "/api/tickets", Some(payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], json!("missing_field"));
    assert_eq!(body["field"], json!(field));
}

#[actix_web::test]
async fn unknown_employee_is_not_found() {
    let app = actix_test::init_service(ledger_app(memory_state())).await;

    let request = actix_test::TestRequest::post()
        .uri("/api/tickets")
        .set_json(json!({"employeeId": "3fa85f64-5717-4562-b3fc-2c963f66afa6", "quantity": 1}))
        .to_request();
    let response = actix_test::call_service(&app, request).await;
    let header = response
        .headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], json!("not_found"));
    assert_eq!(body["traceId"].as_str(), header.as_deref());
}

#[actix_web::test]
async fn reports_over_an_empty_ledger_are_empty() {
    let app = actix_test::init_service(ledger_app(memory_state())).await;

    let (_, total) = send(&app, Method::GET, "/api/reports/total", None).await;
    let (_, per_employee) = send(&app, Method::GET, "/api/reports/by-employee", None).await;
    let (_, detailed) = send(&app, Method::GET, "/api/reports/detailed", None).await;

    assert_eq!(total, json!({"totalTickets": 0}));
    assert_eq!(per_employee, json!([]));
    assert_eq!(detailed, json!({"summary": [], "total": 0}));
}

#[actix_web::test]
async fn per_employee_lists_active_employees_with_zero_totals() {
    let app = actix_test::init_service(ledger_app(memory_state())).await;
    let ana = create_employee(&app, "Ana", "11111111111").await;
    create_employee(&app, "Bia", "22222222222").await;
    let caio = create_employee(&app, "Caio", "33333333333").await;
    send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(json!({"employeeId": id_of(&ana), "quantity": "4"})),
    )
    .await;
    send(
        &app,
        Method::PUT,
        &format!("/api/employees/{}", id_of(&caio)),
        Some(json!({"status": "I"})),
    )
    .await;

    let (status, rows) = send(&app, Method::GET, "/api/reports/by-employee", None).await;

    assert_eq!(status, StatusCode::OK);
    let rows = rows.as_array().expect("array");
    assert_eq!(rows.len(), 2);
    let totals: Vec<(&str, i64)> = rows
        .iter()
        .map(|row| {
            (
                row["employee"]["name"].as_str().expect("name"),
                row["totalTickets"].as_i64().expect("total"),
            )
        })
        .collect();
    assert!(totals.contains(&("Ana", 4)));
    assert!(totals.contains(&("Bia", 0)));
}

#[actix_web::test]
async fn detailed_window_includes_both_bounds_and_totals_match() {
    let app = actix_test::init_service(ledger_app(memory_state())).await;
    let ana = create_employee(&app, "Ana", "11111111111").await;
    let bia = create_employee(&app, "Bia", "22222222222").await;
    let (_, first) = send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(json!({"employeeId": id_of(&ana), "quantity": 2})),
    )
    .await;
    send(
        &app,
        Method::POST,
        "/api/tickets",
        Some(json!({"employeeId": id_of(&bia), "quantity": 3})),
    )
    .await;
    let delivered = first["deliveredAt"].as_str().expect("deliveredAt");

    let (status, exact) = send(
        &app,
        Method::GET,
        &format!(
            "/api/reports/detailed?employee={}&start={delivered}&end={delivered}",
            id_of(&ana)
        ),
        None,
    )
    .await;
    let (_, summary) = send(&app, Method::GET, "/api/reports/detailed?employee=todos", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(exact.as_array().map(Vec::len), Some(1));
    assert_eq!(exact[0]["employee"]["name"], json!("Ana"));
    let rows = summary["summary"].as_array().expect("summary rows");
    let sum: i64 = rows
        .iter()
        .map(|row| row["totalTickets"].as_i64().expect("total"))
        .sum();
    assert_eq!(summary["total"].as_i64(), Some(sum));
    assert_eq!(sum, 5);
    assert_eq!(rows[0]["employee"]["name"], json!("Ana"));
}

#[actix_web::test]
async fn history_reports_every_ticket_of_every_employee() {
    let app = actix_test::init_service(ledger_app(memory_state())).await;
    let ana = create_employee(&app, "Ana", "11111111111").await;
    for quantity in [1, 2] {
        send(
            &app,
            Method::POST,
            "/api/tickets",
            Some(json!({"employeeId": id_of(&ana), "quantity": quantity})),
        )
        .await;
    }

    let (status, history) = send(&app, Method::GET, "/api/employees/history", None).await;
    let (_, listed) = send(&app, Method::GET, "/api/tickets", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(history[0]["totalTickets"], json!(3));
    assert_eq!(history[0]["tickets"][0]["quantity"], json!(2));
    assert_eq!(listed.as_array().map(Vec::len), Some(2));
    assert_eq!(listed[0]["employee"]["code"], json!(1000));
}
