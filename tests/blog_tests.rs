mod test_user;

use reqwest::StatusCode;
use serde_json::{json, Value};
use test_user::*;
use test_utils::*;

use portfolio_site::{entities::category::Category, errors::AppError};

#[actix_rt::test]
async fn admin_creates_post_with_slug_from_title() {
    let mut repos = TestRepos::default();
    repos.posts
        .expect_create_blog_post()
        .withf(|post| post.slug == "hello-world" && post.title == "Hello World")
        .times(1)
        .returning(|_| Ok(uuid::Uuid::new_v4()));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url("/api/v1/blog/posts"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .json(&json!({
            "title": "Hello World",
            "description": "First post",
            "content": "Some **markdown**"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["slug"], "hello-world");
    assert_eq!(body["url"], "/blog/hello-world");
    assert_eq!(body["edit_url"], "/blog/hello-world/edit");
}

#[actix_rt::test]
async fn duplicate_slug_is_a_conflict() {
    let mut repos = TestRepos::default();
    repos.posts
        .expect_create_blog_post()
        .returning(|_| Err(AppError::Conflict("A post with this slug already exists".into())));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url("/api/v1/blog/posts"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .json(&json!({
            "title": "Hello World",
            "description": "Again",
            "content": "Body"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[actix_rt::test]
async fn unknown_category_is_a_validation_error() {
    let mut repos = TestRepos::default();
    repos.categories.expect_get_category_by_slug().returning(|_| Ok(None));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .post(app.url("/api/v1/blog/posts"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .json(&json!({
            "title": "Hello World",
            "description": "First post",
            "content": "Body",
            "category": "does-not-exist"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn regular_users_cannot_create_posts() {
    let app = TestApp::spawn(TestRepos::default()).await;

    let response = app.client
        .post(app.url("/api/v1/blog/posts"))
        .bearer_auth(access_token(&app.config, &regular_user()))
        .json(&json!({ "title": "Hello World", "description": "d", "content": "c" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[actix_rt::test]
async fn reading_a_post_records_a_view_and_sanitizes_html() {
    let mut repos = TestRepos::default();
    repos.posts
        .expect_get_blog_post_by_slug()
        .withf(|slug| slug == "hello-world")
        .returning(|_| Ok(blog_post("Hello World", "hello-world")));
    repos.views
        .expect_record_view()
        .withf(|view| view.post_slug == "hello-world")
        .times(1)
        .returning(|_| Ok(()));
    repos.views.expect_count_views().returning(|_| Ok(7));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url("/api/v1/blog/posts/hello-world"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["view_count"], 7);
    let html = body["content_html"].as_str().unwrap();
    assert!(html.contains("<h1>Heading</h1>"));
    assert!(!html.contains("<script>"));
}

#[actix_rt::test]
async fn missing_post_is_not_found() {
    let mut repos = TestRepos::default();
    repos.posts
        .expect_get_blog_post_by_slug()
        .returning(|_| Err(AppError::NotFound("Blog post not found".into())));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url("/api/v1/blog/posts/nope"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn listing_posts_is_paginated() {
    let mut repos = TestRepos::default();
    repos.posts
        .expect_get_all_blog_posts()
        .withf(|page, per_page| *page == 2 && *per_page == 5)
        .returning(|_, _| Ok(vec![blog_post("Second Page", "second-page")]));
    repos.posts.expect_count_blog_posts().returning(|| Ok(6));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .get(app.url("/api/v1/blog/posts?page=2&per_page=5"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["total"], 6);
    assert_eq!(body["page"], 2);
    assert_eq!(body["posts"][0]["slug"], "second-page");
}

#[actix_rt::test]
async fn admin_deletes_post() {
    let mut repos = TestRepos::default();
    repos.posts
        .expect_delete_blog_post()
        .withf(|slug| slug == "hello-world")
        .times(1)
        .returning(|_| Ok(()));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .delete(app.url("/api/v1/blog/posts/hello-world"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[actix_rt::test]
async fn patching_title_keeps_slug_and_clears_category() {
    let mut existing = blog_post("Hello world", "hello-world");
    existing.category_id = Some(uuid::Uuid::new_v4());
    existing.category_name = Some("Rust".into());
    existing.category_slug = Some("rust".into());

    let mut repos = TestRepos::default();
    let stored = existing.clone();
    repos.posts
        .expect_get_blog_post_by_slug()
        .withf(|slug| slug == "hello-world")
        .returning(move |_| Ok(stored.clone()));
    let stored = existing.clone();
    repos.posts
        .expect_update_blog_post()
        .withf(move |id, changes| {
            *id == existing.id
                && changes.title == "Hello again"
                && changes.slug == "hello-world"
                && changes.category_id.is_none()
        })
        .times(1)
        .returning(move |_, changes| {
            let mut updated = stored.clone();
            updated.title = changes.title.clone();
            updated.category_id = None;
            updated.category_name = None;
            updated.category_slug = None;
            Ok(updated)
        });
    repos.views.expect_count_views().returning(|_| Ok(3));
    let app = TestApp::spawn(repos).await;

    let response = app.client
        .patch(app.url("/api/v1/blog/posts/hello-world"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .json(&json!({ "title": "Hello again", "category": null }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["title"], "Hello again");
    assert_eq!(body["slug"], "hello-world");
    assert_eq!(body["category"], Value::Null);
    assert_eq!(body["view_count"], 3);
}

#[actix_rt::test]
async fn admin_creates_category_and_anyone_lists_them() {
    let mut repos = TestRepos::default();
    repos.categories
        .expect_create_category()
        .withf(|insert| insert.name == "Web Development" && insert.slug == "web-development")
        .times(1)
        .returning(|insert| {
            Ok(Category {
                id: uuid::Uuid::new_v4(),
                name: insert.name.clone(),
                slug: insert.slug.clone(),
                created_at: chrono::Utc::now(),
            })
        });
    repos.categories
        .expect_list_categories()
        .returning(|| {
            Ok(vec![Category {
                id: uuid::Uuid::new_v4(),
                name: "Web Development".into(),
                slug: "web-development".into(),
                created_at: chrono::Utc::now(),
            }])
        });
    let app = TestApp::spawn(repos).await;

    let forbidden = app.client
        .post(app.url("/api/v1/blog/categories"))
        .bearer_auth(access_token(&app.config, &regular_user()))
        .json(&json!({ "name": "Web Development" }))
        .send()
        .await
        .unwrap();
    assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);

    let created = app.client
        .post(app.url("/api/v1/blog/categories"))
        .bearer_auth(access_token(&app.config, &admin_user()))
        .json(&json!({ "name": " Web Development " }))
        .send()
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::CREATED);
    let body: Value = created.json().await.unwrap();
    assert_eq!(body["slug"], "web-development");

    let listed = app.client.get(app.url("/api/v1/blog/categories")).send().await.unwrap();
    assert_eq!(listed.status(), StatusCode::OK);
    let body: Vec<Value> = listed.json().await.unwrap();
    assert_eq!(body.len(), 1);
    assert_eq!(body[0]["name"], "Web Development");
}
