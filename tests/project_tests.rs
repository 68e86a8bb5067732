mod test_user;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_user::*;
use test_utils::*;

#[actix_rt::test]
async fn signed_in_user_creates_project_from_comma_separated_stack() {
    let mut repos = TestRepos::default();
    repos.projects
        .expect_create_project()
        .withf(|insert| insert.tech_stack == vec!["Rust".to_string(), "Actix".to_string()])
        .returning(|insert| {
            let mut created = project(&insert.title, insert.created_by);
            created.tech_stack = insert.tech_stack.clone();
            Ok(created)
        });
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url("/api/v1/projects"))
        .bearer_auth(access_token(&app.config, &regular_user()))
        .json(&json!({
            "title": "Portfolio",
            "description": "This site",
            "tech_stack": "Rust, Actix, rust"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["tech_stack"], json!(["Rust", "Actix"]));
}

#[actix_rt::test]
async fn invalid_project_url_is_rejected() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let response = app.client
        .post(app.url("/api/v1/projects"))
        .bearer_auth(access_token(&app.config, &regular_user()))
        .json(&json!({
            "title": "Portfolio",
            "description": "This site",
            "github_url": "not a url"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn only_the_creator_may_edit_a_project() {
    let owner = regular_user();
    let stranger = user("stranger@example.com", false);
    let existing = project("Portfolio", owner.id);
    let project_id = existing.id;

    let mut repos = TestRepos::default();
    let stored = existing.clone();
    repos.projects
        .expect_get_project_by_id()
        .returning(move |_| Ok(stored.clone()));
    let stored = existing.clone();
    repos.projects
        .expect_update_project()
        .times(1)
        .returning(move |_, changes| {
            let mut updated = stored.clone();
            updated.title = changes.title.clone();
            Ok(updated)
        });
    let app = TestApp::spawn(repos).await;

    let forbidden = app.client
        .patch(app.url(&format!("/api/v1/projects/{project_id}")))
        .bearer_auth(access_token(&app.config, &stranger))
        .json(&json!({ "title": "Hijacked" }))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let allowed = app.client
        .patch(app.url(&format!("/api/v1/projects/{project_id}")))
        .bearer_auth(access_token(&app.config, &owner))
        .json(&json!({ "title": "Portfolio v2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(allowed.status(), StatusCode::OK);
    let body: Value = allowed.json().await.unwrap();
    assert_eq!(body["title"], "Portfolio v2");
}

#[actix_rt::test]
async fn projects_are_public_to_read() {
    let mut repos = TestRepos::default();
    repos.projects
        .expect_list_projects()
        .returning(|| Ok(vec![project("Portfolio", uuid::Uuid::new_v4())]));
    let app = TestApp::spawn(repos).await;

    let response = app.client.get(app.url("/api/v1/projects")).send().await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Vec<Value> = response.json().await.unwrap();
    assert_eq!(body.len(), 1);
}

#[actix_rt::test]
async fn blank_links_from_the_form_are_stored_as_missing() {
    let mut repos = TestRepos::default();
    repos.projects
        .expect_create_project()
        .withf(|insert| insert.github_url.is_none() && insert.demo_url.is_none() && insert.image_url.is_none())
        .returning(|insert| Ok(project(&insert.title, insert.created_by)));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url("/api/v1/projects"))
        .bearer_auth(access_token(&app.config, &regular_user()))
        .json(&json!({
            "title": "Portfolio",
            "description": "This site",
            "github_url": "",
            "demo_url": "",
            "image_url": ""
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[actix_rt::test]
async fn single_project_is_public_to_read() {
    let existing = project("Portfolio", uuid::Uuid::new_v4());
    let project_id = existing.id;

    let mut repos = TestRepos::default();
    repos.projects
        .expect_get_project_by_id()
        .returning(move |id| {
            if *id == existing.id {
                Ok(existing.clone())
            } else {
                Err(portfolio_site::errors::AppError::NotFound("Project not found".into()))
            }
        });
    let app = TestApp::spawn(repos).await;

    let found = app.client
        .get(app.url(&format!("/api/v1/projects/{project_id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(found.status(), StatusCode::OK);
    let body: Value = found.json().await.unwrap();
    assert_eq!(body["id"], project_id.to_string());
    assert_eq!(body["title"], "Portfolio");

    let missing = app.client
        .get(app.url(&format!("/api/v1/projects/{}", uuid::Uuid::new_v4())))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);

    let malformed = app.client
        .get(app.url("/api/v1/projects/not-a-uuid"))
        .send()
        .await
        .unwrap();
    assert_eq!(malformed.status(), StatusCode::BAD_REQUEST);
}
