use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use crpt_core::{AppError, AppResult};
use crpt_domain::{DocType, DocumentGoods, RateLimitPolicy, WindowUnit};

use super::{DocumentSerializer, DocumentSubmissionService, DocumentTransport, SubmissionOutcome};
use crate::RateGate;

struct TestSerializer {
    fail: bool,
}

impl DocumentSerializer for TestSerializer {
    fn serialize(&self, document: &DocumentGoods) -> AppResult<String> {
        if self.fail {
            return Err(AppError::Serialization(
                "document cannot be encoded".to_owned(),
            ));
        }
        Ok(format!("{{\"docId\":\"{}\"}}", document.label()))
    }
}

struct TestTransport {
    status: Option<u16>,
    sent: Mutex<Vec<(String, String)>>,
}

impl TestTransport {
    fn answering(status: u16) -> Self {
        Self {
            status: Some(status),
            sent: Mutex::new(Vec::new()),
        }
    }

    fn unreachable() -> Self {
        Self {
            status: None,
            sent: Mutex::new(Vec::new()),
        }
    }

    fn sent(&self) -> Vec<(String, String)> {
        self.sent
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl DocumentTransport for TestTransport {
    async fn send(&self, payload: &str, signature: &str) -> AppResult<u16> {
        self.sent
            .lock()
            .map_err(|error| {
                AppError::Internal(format!("failed to lock transport state: {error}"))
            })?
            .push((payload.to_owned(), signature.to_owned()));

        self.status
            .ok_or_else(|| AppError::Transport("connection refused".to_owned()))
    }
}

fn service(
    limit: u32,
    serializer: TestSerializer,
    transport: Arc<TestTransport>,
) -> DocumentSubmissionService {
    let gate = match RateLimitPolicy::new(WindowUnit::Minutes, limit) {
        Ok(policy) => Arc::new(RateGate::new(policy)),
        Err(error) => panic!("test policy must be valid: {error}"),
    };
    DocumentSubmissionService::new(gate, Arc::new(serializer), transport)
}

fn document() -> DocumentGoods {
    DocumentGoods::new("12", DocType::IntroduceGoods)
}

#[tokio::test(start_paused = true)]
async fn created_status_is_reported_as_accepted() {
    let transport = Arc::new(TestTransport::answering(201));
    let service = service(10, TestSerializer { fail: false }, transport.clone());

    let outcome = service.submit(&document(), "SIGN").await;

    assert!(matches!(
        outcome,
        Ok(SubmissionOutcome::Accepted { status: 201 })
    ));
    assert_eq!(
        transport.sent(),
        vec![("{\"docId\":\"12\"}".to_owned(), "SIGN".to_owned())]
    );
}

#[tokio::test(start_paused = true)]
async fn not_found_is_a_rejection_and_keeps_the_admission() {
    let transport = Arc::new(TestTransport::answering(404));
    let service = service(10, TestSerializer { fail: false }, transport);

    let outcome = service.submit(&document(), "SIGN").await;

    assert!(matches!(
        outcome,
        Ok(SubmissionOutcome::Rejected { status: 404 })
    ));
    assert_eq!(service.gate().admissions_in_window().await, 1);
}

#[tokio::test(start_paused = true)]
async fn serialization_failure_is_surfaced_without_sending() {
    let transport = Arc::new(TestTransport::answering(200));
    let service = service(10, TestSerializer { fail: true }, transport.clone());

    let outcome = service.submit(&document(), "SIGN").await;

    assert!(matches!(outcome, Err(AppError::Serialization(_))));
    assert!(transport.sent().is_empty());
    assert_eq!(service.gate().admissions_in_window().await, 1);
}

#[tokio::test(start_paused = true)]
async fn transport_failure_is_surfaced_and_not_retried() {
    let transport = Arc::new(TestTransport::unreachable());
    let service = service(10, TestSerializer { fail: false }, transport.clone());

    let outcome = service.submit(&document(), "SIGN").await;

    assert!(matches!(outcome, Err(AppError::Transport(_))));
    assert_eq!(transport.sent().len(), 1);
    assert_eq!(service.gate().admissions_in_window().await, 1);
}

#[tokio::test(start_paused = true)]
async fn submissions_beyond_the_limit_wait_for_the_window() {
    let transport = Arc::new(TestTransport::answering(200));
    let service = service(2, TestSerializer { fail: false }, transport.clone());
    let started = tokio::time::Instant::now();

    for _ in 0..3 {
        let outcome = service.submit(&document(), "SIGN").await;
        assert!(matches!(outcome, Ok(SubmissionOutcome::Accepted { .. })));
    }

    assert_eq!(transport.sent().len(), 3);
    assert!(started.elapsed() >= Duration::from_secs(60));
}

#[tokio::test(start_paused = true)]
async fn clones_share_one_gate() {
    let transport = Arc::new(TestTransport::answering(200));
    let service = service(1, TestSerializer { fail: false }, transport);
    let clone = service.clone();

    assert!(service.submit(&document(), "SIGN").await.is_ok());

    let blocked =
        tokio::time::timeout(Duration::from_secs(1), clone.submit(&document(), "SIGN")).await;
    assert!(blocked.is_err());
}

#[test]
fn outcome_classification_uses_inclusive_success_range() {
    assert!(SubmissionOutcome::from_status(200).is_accepted());
    assert!(SubmissionOutcome::from_status(299).is_accepted());
    assert!(!SubmissionOutcome::from_status(199).is_accepted());
    assert!(!SubmissionOutcome::from_status(300).is_accepted());
    assert_eq!(SubmissionOutcome::from_status(404).status(), 404);
}
