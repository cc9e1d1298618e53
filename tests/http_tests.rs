//! HTTP client tests against a local mock server

use cms_workflow::api::{HttpSubmissionApi, SubmissionApi};
use cms_workflow::config::ApiConfig;
use cms_workflow::error::Error;
use cms_workflow::types::{HistoryAction, UserRole};
use cms_workflow::workflow::{PhaseValue, SubmissionPhase};
use mockito::{Matcher, Server, ServerGuard};
use serde_json::json;

fn client(server: &ServerGuard, token: Option<&str>) -> HttpSubmissionApi {
    let config = ApiConfig::new(&format!("{}/api", server.url()), token.map(String::from)).unwrap();
    HttpSubmissionApi::new(config).unwrap()
}

fn submission_json(id: u64, phase: &str) -> serde_json::Value {
    json!({
        "id": id,
        "reference": "EXH-0042",
        "police_station": "Harbour Road",
        "phase": phase,
        "phase_history": [],
        "created_at": "2024-03-01T09:30:00Z",
        "certificates": [],
        "invoices": []
    })
}

#[tokio::test]
async fn test_get_submission_sends_token() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/submissions/42/")
        .match_header("authorization", "Token s3cret")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(submission_json(42, "botanist_review").to_string())
        .create_async()
        .await;

    let api = client(&server, Some("s3cret"));
    let submission = api.get_submission(42).await.unwrap();

    mock.assert_async().await;
    assert_eq!(submission.id, 42);
    assert_eq!(submission.reference, "EXH-0042");
    assert_eq!(
        submission.phase,
        PhaseValue::Known(SubmissionPhase::BotanistReview)
    );
}

#[tokio::test]
async fn test_unknown_phase_is_preserved() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/submissions/7/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(submission_json(7, "lab_testing").to_string())
        .create_async()
        .await;

    let api = client(&server, None);
    let submission = api.get_submission(7).await.unwrap();

    assert_eq!(submission.phase, PhaseValue::Unknown("lab_testing".to_string()));
}

#[tokio::test]
async fn test_null_phases_do_not_break_listing() {
    let mut server = Server::new_async().await;
    let mut legacy = submission_json(11, "documents");
    legacy["phase"] = serde_json::Value::Null;
    legacy["phase_history"] = json!([{
        "from_phase": null,
        "to_phase": "documents",
        "action": "advance",
        "timestamp": "2022-06-01T12:00:00Z"
    }]);
    server
        .mock("GET", "/api/submissions/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!([legacy, submission_json(12, "send_emails")]).to_string())
        .create_async()
        .await;

    let api = client(&server, None);
    let submissions = api.list_submissions(None).await.unwrap();

    assert_eq!(submissions.len(), 2);
    assert_eq!(submissions[0].phase, PhaseValue::default());
    assert_eq!(submissions[0].phase_history[0].from_phase, PhaseValue::default());
    assert_eq!(
        submissions[1].phase,
        PhaseValue::Known(SubmissionPhase::SendEmails)
    );
}

#[tokio::test]
async fn test_missing_submission_maps_to_not_found() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/submissions/9/")
        .with_status(404)
        .with_body(r#"{"detail": "Not found."}"#)
        .create_async()
        .await;

    let api = client(&server, Some("t"));
    let err = api.get_submission(9).await.unwrap_err();

    assert!(matches!(err, Error::SubmissionNotFound(9)));
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/auth/user/")
        .with_status(401)
        .with_body(r#"{"detail": "Invalid token."}"#)
        .create_async()
        .await;

    let api = client(&server, Some("expired"));
    let err = api.current_user().await.unwrap_err();

    match err {
        Error::Auth(msg) => assert!(msg.contains("Invalid token")),
        other => panic!("expected auth error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_rejected_transition_keeps_server_message() {
    let mut server = Server::new_async().await;
    server
        .mock("POST", "/api/submissions/3/advance_phase/")
        .with_status(400)
        .with_body(r#"{"error": "Submission is already complete"}"#)
        .create_async()
        .await;

    let api = client(&server, Some("t"));
    let err = api.advance_phase(3).await.unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 400);
            assert!(message.contains("already complete"));
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_send_back_posts_target_and_reason() {
    let mut server = Server::new_async().await;
    let mut body = submission_json(5, "finance_approval");
    body["phase_history"] = json!([{
        "from_phase": "documents",
        "to_phase": "finance_approval",
        "action": "send_back",
        "reason": "wrong invoice total",
        "user": "jdoe",
        "timestamp": "2024-03-02T11:00:00Z"
    }]);

    let mock = server
        .mock("POST", "/api/submissions/5/send_back/")
        .match_body(Matcher::Json(json!({
            "target_phase": "finance_approval",
            "reason": "wrong invoice total"
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body.to_string())
        .create_async()
        .await;

    let api = client(&server, Some("t"));
    let submission = api
        .send_back(5, SubmissionPhase::FinanceApproval, "wrong invoice total")
        .await
        .unwrap();

    mock.assert_async().await;
    let entry = &submission.phase_history[0];
    assert_eq!(entry.action, HistoryAction::SendBack);
    assert_eq!(entry.from_phase, PhaseValue::Known(SubmissionPhase::Documents));
    assert_eq!(entry.reason.as_deref(), Some("wrong invoice total"));
}

#[tokio::test]
async fn test_list_filters_by_phase() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/api/submissions/")
        .match_query(Matcher::UrlEncoded("phase".into(), "documents".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!([submission_json(1, "documents"), submission_json(2, "documents")]).to_string(),
        )
        .create_async()
        .await;

    let api = client(&server, Some("t"));
    let submissions = api
        .list_submissions(Some(SubmissionPhase::Documents))
        .await
        .unwrap();

    mock.assert_async().await;
    assert_eq!(submissions.len(), 2);
}

#[tokio::test]
async fn test_current_user_role() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/api/auth/user/")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"username": "mthembu", "role": "finance"}"#)
        .create_async()
        .await;

    let api = client(&server, Some("t"));
    let user = api.current_user().await.unwrap();

    assert_eq!(user.username, "mthembu");
    assert_eq!(user.role, UserRole::Finance);
    assert!(!user.is_admin);
}
