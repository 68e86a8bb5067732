mod test_user;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_user::*;
use test_utils::*;

use portfolio_site::entities::{
    blog_post::BlogPostSummary,
    post_view::PostViewCount,
    task::TaskStatus,
};

#[actix_rt::test]
async fn chat_greets_and_replies() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let greeting: Value = app.client
        .get(app.url("/api/v1/chat"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(greeting["sender"], "bot");

    let response = app.client
        .post(app.url("/api/v1/chat/messages"))
        .json(&json!({ "text": "Are you available?" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let exchange: Value = response.json().await.unwrap();
    assert_eq!(exchange["messages"][0]["sender"], "user");
    assert_eq!(exchange["messages"][0]["text"], "Are you available?");
    assert_eq!(exchange["messages"][1]["sender"], "bot");
}

#[actix_rt::test]
async fn blank_chat_message_is_rejected() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let response = app.client
        .post(app.url("/api/v1/chat/messages"))
        .json(&json!({ "text": "  " }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn chat_is_rate_limited_per_client() {
    let options = TestOptions { rate_limit_capacity: 2.0, ..TestOptions::default() };
    let app = TestApp::spawn_with(TestRepos::default(), options).await;

    let first = app.client
        .post(app.url("/api/v1/chat/messages"))
        .json(&json!({ "text": "Hello" }))
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);
    assert_eq!(first.headers()["x-ratelimit-limit"], "2");

    let mut statuses = Vec::new();
    for _ in 0..5 {
        let response = app.client
            .post(app.url("/api/v1/chat/messages"))
            .json(&json!({ "text": "Hello again" }))
            .send()
            .await
            .unwrap();
        statuses.push(response.status());
    }

    assert_eq!(statuses.last(), Some(&StatusCode::TOO_MANY_REQUESTS));
}

#[actix_rt::test]
async fn empty_dashboard_reports_zeros() {
    let mut repos = TestRepos::default();
    repos.posts.expect_get_post_summaries().returning(|| Ok(vec![]));
    repos.views.expect_views_per_post().returning(|| Ok(vec![]));
    repos.tasks.expect_count_by_status().returning(|| Ok(vec![]));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url("/api/v1/admin/dashboard"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_posts"], 0);
    assert_eq!(body["total_views"], 0);
    assert_eq!(body["tasks"], json!({ "completed": 0, "in_progress": 0, "pending": 0 }));
}

#[actix_rt::test]
async fn dashboard_joins_views_onto_posts() {
    let mut repos = TestRepos::default();
    repos.posts.expect_get_post_summaries().returning(|| {
        Ok(vec![
            BlogPostSummary { slug: "a".into(), title: "A".into(), created_at: chrono::Utc::now() },
            BlogPostSummary { slug: "b".into(), title: "B".into(), created_at: chrono::Utc::now() },
        ])
    });
    repos.views
        .expect_views_per_post()
        .returning(|| Ok(vec![PostViewCount { post_slug: "a".into(), view_count: 4 }]));
    repos.tasks
        .expect_count_by_status()
        .returning(|| Ok(vec![(TaskStatus::Completed, 2), (TaskStatus::Pending, 1)]));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url("/api/v1/admin/dashboard"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .send()
        .await
        .unwrap();

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total_posts"], 2);
    assert_eq!(body["total_views"], 4);
    assert_eq!(body["posts"][1]["view_count"], 0);
    assert_eq!(body["tasks"]["completed"], 2);
}
