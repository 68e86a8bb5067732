mod test_user;

use reqwest::{header::LOCATION, StatusCode};
use serde_json::Value;
use test_user::*;
use test_utils::*;

fn expect_empty_dashboard(repos: &mut TestRepos) {
    repos.posts.expect_get_post_summaries().returning(|| Ok(vec![]));
    repos.views.expect_views_per_post().returning(|| Ok(vec![]));
    repos.tasks.expect_count_by_status().returning(|| Ok(vec![]));
}

async fn get_page(app: &TestApp, path: &str, token: Option<String>) -> reqwest::Response {
    let mut request = app.client.get(app.url(path));
    if let Some(token) = token {
        request = request.bearer_auth(token);
    }
    request.send().await.unwrap()
}

fn location(response: &reqwest::Response) -> &str {
    response.headers()[LOCATION].to_str().unwrap()
}

#[actix_rt::test]
async fn non_admin_visiting_admin_is_sent_home() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let response = get_page(&app, "/admin", Some(access_token(&app.config, &regular_user()))).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
}

#[actix_rt::test]
async fn anonymous_visitor_is_sent_home_from_admin_pages() {
    let app = TestApp::spawn(TestRepos::default()).await;

    for path in ["/admin", "/admin/tasks/new"] {
        let response = get_page(&app, path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(&response), "/", "{path}");
    }
}

#[actix_rt::test]
async fn admin_page_shows_dashboard_and_tasks() {
    let mut repos = TestRepos::default();
    expect_empty_dashboard(&mut repos);
    repos.tasks.expect_list_tasks().returning(|| Ok(vec![]));
    let app = TestApp::spawn(repos).await;

    let response = get_page(&app, "/admin", Some(access_token(&app.config, &admin_user()))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["dashboard"]["total_posts"], 0);
    assert_eq!(body["tasks"], Value::Array(vec![]));
}

#[actix_rt::test]
async fn signed_in_visitor_skips_the_auth_page() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let anonymous = get_page(&app, "/auth", None).await;
    assert_eq!(anonymous.status(), StatusCode::OK);

    let signed_in = get_page(&app, "/auth", Some(access_token(&app.config, &regular_user()))).await;
    assert_eq!(signed_in.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&signed_in), "/blog");
}

#[actix_rt::test]
async fn blog_editor_pages_redirect_non_admins() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let anonymous = get_page(&app, "/blog/create", None).await;
    assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&anonymous), "/auth");

    let regular = get_page(&app, "/blog/hello-world/edit", Some(access_token(&app.config, &regular_user()))).await;
    assert_eq!(regular.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&regular), "/blog");
}

#[actix_rt::test]
async fn blog_create_page_is_not_read_as_a_slug() {
    let mut repos = TestRepos::default();
    repos.categories.expect_list_categories().returning(|| Ok(vec![]));
    let app = TestApp::spawn(repos).await;

    let response = get_page(&app, "/blog/create", Some(access_token(&app.config, &admin_user()))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert!(body["post"].is_null());
}

#[actix_rt::test]
async fn project_create_page_requires_sign_in() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let anonymous = get_page(&app, "/projects/create", None).await;
    assert_eq!(anonymous.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&anonymous), "/auth");

    let signed_in = get_page(&app, "/projects/create", Some(access_token(&app.config, &regular_user()))).await;
    assert_eq!(signed_in.status(), StatusCode::OK);
}

#[actix_rt::test]
async fn landing_page_lists_recent_work() {
    let mut repos = TestRepos::default();
    repos.posts
        .expect_get_recent_blog_posts()
        .withf(|limit| *limit == 3)
        .returning(|_| Ok(vec![blog_post("Hello World", "hello-world")]));
    repos.projects
        .expect_get_recent_projects()
        .withf(|limit| *limit == 2)
        .returning(|_| Ok(vec![project("Portfolio", uuid::Uuid::new_v4())]));
    let app = TestApp::spawn(repos).await;

    let response = get_page(&app, "/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["recent_posts"][0]["slug"], "hello-world");
    assert_eq!(body["recent_projects"][0]["title"], "Portfolio");
    assert_eq!(body["contact"]["email"], "ada@example.com");
}

#[actix_rt::test]
async fn project_demo_page_is_public() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let response = get_page(&app, "/project-demo", None).await;

    assert_eq!(response.status(), StatusCode::OK);
}
