use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::Value;

use crate::common;
use gatehouse::server::pipeline::UnconfiguredPipeline;

#[actix_web::test]
async fn test_login_when_no_messages_expect_empty_list_and_no_cookie() {
    let (_dir, db) = common::initialize_db().await;
    let app = common::initialize_app(db, Arc::new(UnconfiguredPipeline)).await;

    let req = test::TestRequest::get()
        .uri("/login?next=/dashboard")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.response().cookies().next().is_none());
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["next"], "/dashboard");
    assert!(body["messages"].as_array().unwrap().is_empty());
}

#[actix_web::test]
async fn test_login_when_next_is_other_site_expect_next_dropped() {
    let (_dir, db) = common::initialize_db().await;
    let app = common::initialize_app(db, Arc::new(UnconfiguredPipeline)).await;

    let req = test::TestRequest::get()
        .uri("/login?next=//example.com/")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["next"].is_null());
}

#[actix_web::test]
async fn test_login_when_message_cookie_unreadable_expect_no_messages() {
    let (_dir, db) = common::initialize_db().await;
    let app = common::initialize_app(db, Arc::new(UnconfiguredPipeline)).await;

    let req = test::TestRequest::get()
        .uri("/login")
        .cookie(actix_web::cookie::Cookie::new("messages", "not-json"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["messages"].as_array().unwrap().is_empty());
}
