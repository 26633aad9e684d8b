/// Integration tests with a mocked lead intake relay
/// Tests the complete submission workflow without hitting the real relay
use rust_roi_calculator::errors::AppError;
use rust_roi_calculator::lead_client::LeadIntakeClient;
use rust_roi_calculator::mail_fallback::MailClient;
use rust_roi_calculator::models::LeadSubmission;
use rust_roi_calculator::notifications::{Notification, Notifier, Severity};
use rust_roi_calculator::submission::{
    LeadPipeline, SubmissionOutcome, SubmissionState, FALLBACK_MESSAGE, SUCCESS_MESSAGE,
};
use rust_roi_calculator::submission_guard::SubmissionGuard;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[derive(Default)]
struct RecordingMailer(Mutex<Vec<String>>);

impl MailClient for RecordingMailer {
    fn open_draft(&self, mailto_uri: &str) -> Result<(), AppError> {
        self.0.lock().unwrap().push(mailto_uri.to_string());
        Ok(())
    }
}

#[derive(Default)]
struct RecordingNotifier(Mutex<Vec<Notification>>);

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.0.lock().unwrap().push(notification);
    }
}

/// Helper function to create a client pointing at the mock relay
fn create_test_client(server: &MockServer, timeout: Duration) -> LeadIntakeClient {
    LeadIntakeClient::new(
        format!("{}/submit", server.uri()),
        "test_access_key".to_string(),
        "New Demo Request".to_string(),
        timeout,
    )
    .unwrap()
}

struct Harness {
    pipeline: LeadPipeline,
    mailer: Arc<RecordingMailer>,
    notifier: Arc<RecordingNotifier>,
}

fn harness(client: LeadIntakeClient) -> Harness {
    let mailer = Arc::new(RecordingMailer::default());
    let notifier = Arc::new(RecordingNotifier::default());
    let pipeline = LeadPipeline::new(
        Some(client),
        mailer.clone(),
        notifier.clone(),
        SubmissionGuard::new(Duration::from_millis(20)),
        "ryan.pritchard@shaed.ai".to_string(),
        "New Demo Request".to_string(),
    );
    Harness {
        pipeline,
        mailer,
        notifier,
    }
}

fn filled_form() -> HashMap<String, String> {
    [
        ("name", "João Silva"),
        ("email", "joao@dealer.com"),
        ("company", "Silva Motors"),
        ("phone", "555-0100"),
        ("message", "Interested in a demo"),
    ]
    .iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn lead() -> LeadSubmission {
    LeadSubmission {
        name: "João Silva".into(),
        email: "joao@dealer.com".into(),
        company: "Silva Motors".into(),
        phone: "555-0100".into(),
        message: None,
    }
}

#[tokio::test]
async fn test_relay_success_delivers_and_clears_form() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit"))
        .and(body_partial_json(serde_json::json!({
            "access_key": "test_access_key",
            "subject": "New Demo Request",
            "name": "João Silva",
            "email": "joao@dealer.com",
            "company": "Silva Motors",
            "phone": "555-0100",
            "message": "Interested in a demo"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "message": "Email sent successfully!"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let h = harness(create_test_client(&mock_server, Duration::from_secs(8)));
    let mut form = filled_form();

    let outcome = h.pipeline.submit(&mut form).await;

    match outcome {
        SubmissionOutcome::Delivered(receipt) => {
            assert_eq!(receipt.status, 200);
            assert_eq!(receipt.message.as_deref(), Some("Email sent successfully!"));
        }
        other => panic!("expected delivery, got {:?}", other),
    }
    assert_eq!(h.pipeline.last_state(), SubmissionState::Delivered);
    assert!(h.mailer.0.lock().unwrap().is_empty());
    assert!(form.values().all(String::is_empty));

    let notes = h.notifier.0.lock().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Success);
    assert_eq!(notes[0].message, SUCCESS_MESSAGE);
}

#[tokio::test]
async fn test_server_error_falls_back_exactly_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/submit"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "success": false,
            "message": "Internal Server Error"
        })))
        .expect(1) // No retries against the relay
        .mount(&mock_server)
        .await;

    let h = harness(create_test_client(&mock_server, Duration::from_secs(8)));
    let mut form = filled_form();

    let outcome = h.pipeline.submit(&mut form).await;

    match outcome {
        SubmissionOutcome::FallbackInvoked { mailto, reason } => {
            assert!(mailto.starts_with("mailto:ryan.pritchard@shaed.ai?subject=New%20Demo%20Request"));
            assert!(reason.contains("500"));
        }
        other => panic!("expected fallback, got {:?}", other),
    }
    assert_eq!(h.pipeline.last_state(), SubmissionState::FallbackInvoked);
    assert_eq!(h.mailer.0.lock().unwrap().len(), 1);
    assert!(form.values().all(String::is_empty));

    let notes = h.notifier.0.lock().unwrap();
    assert_eq!(notes.len(), 1);
    assert_eq!(notes[0].severity, Severity::Info);
    assert_eq!(notes[0].message, FALLBACK_MESSAGE);
}

#[tokio::test]
async fn test_rate_limited_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_json(serde_json::json!({
            "error": "Too many requests"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, Duration::from_secs(8));
    let err = client.deliver(&lead()).await.unwrap_err();

    assert!(err.is_transport_failure());
    assert!(err.to_string().contains("Too many requests"));
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": true}))
                .set_delay(Duration::from_millis(500)),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let h = harness(create_test_client(&mock_server, Duration::from_millis(100)));
    let mut form = filled_form();

    let outcome = h.pipeline.submit(&mut form).await;

    assert!(matches!(outcome, SubmissionOutcome::FallbackInvoked { .. }));
    assert_eq!(h.mailer.0.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_malformed_success_body_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, Duration::from_secs(8));
    let err = client.deliver(&lead()).await.unwrap_err();

    assert!(matches!(err, AppError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_relay_refusal_with_200_is_a_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "message": "Invalid access key"
        })))
        .mount(&mock_server)
        .await;

    let client = create_test_client(&mock_server, Duration::from_secs(8));
    let err = client.deliver(&lead()).await.unwrap_err();

    assert!(err.is_transport_failure());
    assert!(err.to_string().contains("Invalid access key"));
}

#[tokio::test]
async fn test_unreachable_relay_falls_back() {
    // Port 9 (discard) is closed on test hosts; the connection is refused
    let client = LeadIntakeClient::new(
        "http://127.0.0.1:9/submit".to_string(),
        "test_access_key".to_string(),
        "New Demo Request".to_string(),
        Duration::from_secs(2),
    )
    .unwrap();
    let h = harness(client);
    let mut form = filled_form();

    let outcome = h.pipeline.submit(&mut form).await;

    assert!(matches!(outcome, SubmissionOutcome::FallbackInvoked { .. }));
}

#[tokio::test]
async fn test_invalid_form_never_reaches_relay() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let h = harness(create_test_client(&mock_server, Duration::from_secs(8)));
    let mut form = filled_form();
    form.insert("phone".to_string(), "   ".to_string());

    let outcome = h.pipeline.submit(&mut form).await;

    assert!(matches!(outcome, SubmissionOutcome::Rejected(_)));
    assert_eq!(form.get("company").map(String::as_str), Some("Silva Motors"));
}
