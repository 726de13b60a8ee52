//! Resilience tests for the upstream call layer, driven through the
//! domain service against a scripted upstream.

use std::sync::Arc;
use std::time::{Duration, Instant};

use employee_gateway::employees::{CreateEmployeeInput, EmployeeService};
use employee_gateway::lifecycle::Shutdown;
use employee_gateway::upstream::UpstreamError;
use serde_json::{json, Value};
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const EMPLOYEE_PATH: &str = "/api/v1/employee";

fn service_for(server: &MockServer) -> (EmployeeService, Shutdown) {
    let config = common::test_config(&server.uri());
    let shutdown = Shutdown::new();
    let service = EmployeeService::new(&config.upstream, shutdown.subscribe()).unwrap();
    (service, shutdown)
}

#[tokio::test]
async fn rate_limiting_exhausts_the_retry_budget() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .expect(3)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let err = service.get_all_employees().await.unwrap_err();

    match err {
        UpstreamError::Unavailable { attempts, .. } => assert_eq!(attempts, 3),
        other => panic!("expected Unavailable, got {other:?}"),
    }
}

#[tokio::test]
async fn transient_server_errors_retry_until_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_PATH))
        .respond_with(ResponseTemplate::new(503))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!([
            common::employee_json(
                "11111111-1111-1111-1111-111111111111",
                "John Doe",
                75_000,
                30,
                "Developer"
            )
        ]))))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let employees = service.get_all_employees().await.unwrap();

    assert_eq!(employees.len(), 1);
    assert_eq!(employees[0].name.as_deref(), Some("John Doe"));
}

#[tokio::test]
async fn upstream_404_is_never_retried() {
    let server = MockServer::start().await;
    let id = "22222222-2222-2222-2222-222222222222";
    Mock::given(method("GET"))
        .and(path(format!("{EMPLOYEE_PATH}/{id}")))
        .respond_with(ResponseTemplate::new(404))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let err = service.get_employee_by_id(id).await.unwrap_err();

    match err {
        UpstreamError::NotFound(missing) => assert_eq!(missing, id),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_data_on_single_fetch_is_not_found() {
    let server = MockServer::start().await;
    let id = "33333333-3333-3333-3333-333333333333";
    Mock::given(method("GET"))
        .and(path(format!("{EMPLOYEE_PATH}/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(Value::Null)))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let err = service.get_employee_by_id(id).await.unwrap_err();

    assert!(matches!(err, UpstreamError::NotFound(_)));
}

#[tokio::test]
async fn empty_data_on_list_fetch_is_an_empty_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(Value::Null)))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let employees = service.get_all_employees().await.unwrap();

    assert!(employees.is_empty());
}

#[tokio::test]
async fn connection_failures_consume_the_retry_budget() {
    // Nothing listens on the discard port; every attempt is a transport
    // error and therefore retryable.
    let mut config = common::test_config("http://127.0.0.1:9");
    config.upstream.request_timeout_secs = 1;

    let shutdown = Shutdown::new();
    let service = EmployeeService::new(&config.upstream, shutdown.subscribe()).unwrap();
    let err = service.get_all_employees().await.unwrap_err();

    assert!(matches!(
        err,
        UpstreamError::Unavailable { attempts: 3, .. }
    ));
}

#[tokio::test]
async fn delete_resolves_name_before_issuing_the_delete() {
    let server = MockServer::start().await;
    let id = "44444444-4444-4444-4444-444444444444";
    Mock::given(method("GET"))
        .and(path(format!("{EMPLOYEE_PATH}/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(
            common::employee_json(id, "John Doe", 75_000, 30, "Developer"),
        )))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(EMPLOYEE_PATH))
        .and(body_json(json!({ "name": "John Doe" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!(true))))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let deleted = service.delete_employee_by_id(id).await.unwrap();

    assert_eq!(deleted, "John Doe");
}

#[tokio::test]
async fn unconfirmed_delete_is_an_operation_failure() {
    let server = MockServer::start().await;
    let id = "55555555-5555-5555-5555-555555555555";
    Mock::given(method("GET"))
        .and(path(format!("{EMPLOYEE_PATH}/{id}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(
            common::employee_json(id, "Jane Smith", 82_000, 28, "Manager"),
        )))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path(EMPLOYEE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(json!(false))))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let err = service.delete_employee_by_id(id).await.unwrap_err();

    assert!(matches!(err, UpstreamError::OperationFailed(_)));
}

#[tokio::test]
async fn create_unwraps_the_created_employee() {
    let server = MockServer::start().await;
    let id = "66666666-6666-6666-6666-666666666666";
    Mock::given(method("POST"))
        .and(path(EMPLOYEE_PATH))
        .and(body_json(json!({
            "name": "Jane Smith",
            "salary": 82_000,
            "age": 28,
            "title": "Manager",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(
            common::employee_json(id, "Jane Smith", 82_000, 28, "Manager"),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let input = CreateEmployeeInput {
        name: Some("Jane Smith".to_string()),
        salary: Some(82_000),
        age: Some(28),
        title: Some("Manager".to_string()),
    };
    let created = service.create_employee(&input).await.unwrap();

    assert_eq!(created.name.as_deref(), Some("Jane Smith"));
}

#[tokio::test]
async fn create_with_empty_response_is_an_operation_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(EMPLOYEE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::envelope(Value::Null)))
        .expect(1)
        .mount(&server)
        .await;

    let (service, _shutdown) = service_for(&server);
    let input = CreateEmployeeInput {
        name: Some("Jane Smith".to_string()),
        salary: Some(82_000),
        age: Some(28),
        title: Some("Manager".to_string()),
    };
    let err = service.create_employee(&input).await.unwrap_err();

    assert!(matches!(err, UpstreamError::OperationFailed(_)));
}

#[tokio::test]
async fn shutdown_interrupts_a_pending_retry_delay() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(EMPLOYEE_PATH))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let mut config = common::test_config(&server.uri());
    config.upstream.retry_delay_ms = 10_000;

    let shutdown = Arc::new(Shutdown::new());
    let service = EmployeeService::new(&config.upstream, shutdown.subscribe()).unwrap();

    let trigger = shutdown.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.trigger();
    });

    let started = Instant::now();
    let err = service.get_all_employees().await.unwrap_err();

    assert!(matches!(err, UpstreamError::RetryInterrupted));
    assert!(
        started.elapsed() < Duration::from_secs(5),
        "shutdown should cut the 10s delay short"
    );
}
