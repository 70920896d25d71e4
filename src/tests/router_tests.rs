use crate::errors::ServerError;
use crate::mailings::DIGEST_SUBJECT;
use crate::responses::XLSX_CONTENT_TYPE;
use crate::router::handle;
use crate::tests::utils::{body_string, sample_listing, test_app, FakeSource, RecordingSender};
use astra::{Body, Request};
use http::Method;
use std::sync::atomic::Ordering;

fn request(method: Method, uri: &str) -> Request {
    http::Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn listings() -> Vec<crate::domain::Listing> {
    vec![
        sample_listing("30 Elm St", "https://z/30", 70_000.0, 100_000.0),
        sample_listing("50 Pine St", "https://z/50", 50_000.0, 100_000.0),
        sample_listing("Full Price Ln", "https://z/fp", 100_000.0, 100_000.0),
    ]
}

#[test]
fn dashboard_lists_deals_largest_discount_first() {
    let app = test_app(FakeSource::ok(listings()), RecordingSender::default());

    let resp = handle(request(Method::GET, "/"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Real-Time Zillow Deal Finder"));
    assert!(body.contains("Last checked: "));
    assert!(body.contains("Found 2 deals ≥ 25% below market"));
    assert!(!body.contains("Full Price Ln"));

    let fifty = body.find("50 Pine St").expect("50% deal missing");
    let thirty = body.find("30 Elm St").expect("30% deal missing");
    assert!(fifty < thirty, "deals should be sorted by discount");
}

#[test]
fn dashboard_does_not_send_mail() {
    let sender = RecordingSender::default();
    let app = test_app(FakeSource::ok(listings()), sender.clone());

    handle(request(Method::GET, "/"), &app).expect("Handler failed");

    assert!(sender.sent().is_empty());
}

#[test]
fn failed_fetch_shows_error_and_no_data() {
    let sender = RecordingSender::default();
    let app = test_app(FakeSource::status(500), sender.clone());

    let body = body_string(handle(request(Method::GET, "/"), &app).expect("Handler failed"));

    assert!(body.contains("Failed to fetch: 500"));
    assert!(body.contains("No data received."));
    assert!(!body.contains("Send Now"));
    assert!(sender.sent().is_empty());
}

#[test]
fn empty_fetch_shows_no_data() {
    let app = test_app(FakeSource::ok(vec![]), RecordingSender::default());

    let body = body_string(handle(request(Method::GET, "/"), &app).expect("Handler failed"));

    assert!(body.contains("No data received."));
    assert!(!body.contains("Found 0 deals"));
}

#[test]
fn send_now_refetches_and_mails_digest() {
    let source = FakeSource::ok(listings());
    let calls = source.calls();
    let sender = RecordingSender::default();
    let app = test_app(source, sender.clone());

    let body = body_string(handle(request(Method::POST, "/send"), &app).expect("Handler failed"));

    assert!(body.contains("Email sent!"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].subject, DIGEST_SUBJECT);
    assert!(sent[0].html.contains("50 Pine St"));
    assert!(sent[0].html.contains("(~50% below market)"));
    assert!(!sent[0].html.contains("Full Price Ln"));
}

#[test]
fn send_now_without_deals_reports_nothing_sent() {
    let only_full_price = vec![sample_listing(
        "Full Price Ln",
        "https://z/fp",
        100_000.0,
        100_000.0,
    )];
    let sender = RecordingSender::default();
    let app = test_app(FakeSource::ok(only_full_price), sender.clone());

    let body = body_string(handle(request(Method::POST, "/send"), &app).expect("Handler failed"));

    assert!(body.contains("Found 0 deals"));
    assert!(body.contains("No deals to send."));
    assert!(!body.contains("Email sent!"));
    assert!(sender.sent().is_empty());
}

#[test]
fn send_now_surfaces_mail_failure() {
    let app = test_app(FakeSource::ok(listings()), RecordingSender::failing());

    let resp = handle(request(Method::POST, "/send"), &app).expect("Handler failed");
    assert_eq!(resp.status(), 200);

    let body = body_string(resp);
    assert!(body.contains("Email failed"));
    assert!(body.contains("invalid api key"));
    assert!(!body.contains("Email sent!"));
}

#[test]
fn send_now_after_failed_fetch_sends_nothing() {
    let sender = RecordingSender::default();
    let app = test_app(FakeSource::status(503), sender.clone());

    let body = body_string(handle(request(Method::POST, "/send"), &app).expect("Handler failed"));

    assert!(body.contains("Failed to fetch: 503"));
    assert!(!body.contains("Email sent!"));
    assert!(sender.sent().is_empty());
}

#[test]
fn xlsx_export_downloads_workbook() {
    let app = test_app(FakeSource::ok(listings()), RecordingSender::default());

    let resp = handle(request(Method::GET, "/deals.xlsx"), &app).expect("Handler failed");

    assert_eq!(resp.status(), 200);
    assert_eq!(resp.headers()["Content-Type"], XLSX_CONTENT_TYPE);
    let disposition = resp.headers()["Content-Disposition"].to_str().unwrap();
    assert!(disposition.starts_with("attachment; filename=\"deals_"));
}

#[test]
fn xlsx_export_fails_when_source_is_down() {
    let app = test_app(FakeSource::status(500), RecordingSender::default());

    match handle(request(Method::GET, "/deals.xlsx"), &app) {
        Err(ServerError::Upstream(msg)) => assert_eq!(msg, "Failed to fetch: 500"),
        other => panic!("expected upstream error, got {:?}", other.map(|r| r.status())),
    }
}

#[test]
fn unknown_route_is_not_found() {
    let app = test_app(FakeSource::ok(vec![]), RecordingSender::default());

    assert!(matches!(
        handle(request(Method::GET, "/admin"), &app),
        Err(ServerError::NotFound)
    ));
    assert!(matches!(
        handle(request(Method::GET, "/send"), &app),
        Err(ServerError::NotFound)
    ));
}

#[test]
fn error_page_carries_status() {
    let resp = crate::templates::html_error_response(ServerError::Upstream("down".into()));

    assert_eq!(resp.status(), 502);
    assert!(body_string(resp).contains("down"));
}
