#![allow(clippy::unwrap_used)]

use actix_web::http::StatusCode;
use actix_web::{test, web};
use async_trait::async_trait;
use error_stack::Report;
use serde_json::{json, Value};

use super::configure;
use crate::store::{self, Backend, PostStore, ReportSink};
use crate::types::{Mood, Post, ReactionKind};
use crate::App;

const JSON_LIMIT: usize = 64 * 1024;

macro_rules! init {
    ($app:expr) => {
        test::init_service(
            actix_web::App::new()
                .app_data(web::Data::new($app))
                .configure(configure(JSON_LIMIT)),
        )
        .await
    };
}

macro_rules! post_json {
    ($service:expr, $uri:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri($uri)
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$service, req).await;
        let status = resp.status();
        let body: Value = test::read_body_json(resp).await;
        (status, body)
    }};
}

fn error_body(kind: &str, message: &str) -> Value {
    json!({ "type": kind, "error": message })
}

async fn seeded() -> (App, Post) {
    let app = App::for_tests();
    let post = app
        .backend
        .posts
        .create_post("hello".into(), None, Mood::Happy)
        .await
        .unwrap();
    (app, post)
}

#[derive(Debug)]
struct BrokenStore;

#[async_trait]
impl PostStore for BrokenStore {
    async fn list_posts(&self) -> store::Result<Vec<Post>> {
        Err(Report::new(store::Error::Io))
    }

    async fn create_post(
        &self,
        _content: String,
        _image_url: Option<String>,
        _mood: Mood,
    ) -> store::Result<Post> {
        Err(Report::new(store::Error::Io))
    }

    async fn add_reaction(&self, _: &str, _: ReactionKind) -> store::Result<Option<Post>> {
        Err(Report::new(store::Error::Serialization))
    }

    async fn add_comment(&self, _: &str, _: String) -> store::Result<Option<Post>> {
        Err(Report::new(store::Error::Database))
    }
}

#[async_trait]
impl ReportSink for BrokenStore {
    async fn submit_report(&self, _: String, _: String) -> store::Result<crate::types::Report> {
        Err(Report::new(store::Error::Io))
    }
}

#[actix_web::test]
async fn lists_posts() {
    let service = init!(App::for_tests());

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, json!([]));
}

#[actix_web::test]
async fn creates_post() {
    let service = init!(App::for_tests());

    let (status, body) = post_json!(
        service,
        "/api/posts",
        json!({ "content": "今日はいい天気", "mood": "peaceful" })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "今日はいい天気");
    assert_eq!(body["mood"], "peaceful");
    assert_eq!(body["reactions"]["understand"], 0);
    assert_eq!(body["comments"], json!([]));
    assert!(body.get("imageUrl").is_none());

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let posts: Value = test::call_and_read_body_json(&service, req).await;
    assert_eq!(posts.as_array().unwrap().len(), 1);
    assert_eq!(posts[0]["id"], body["id"]);
}

#[actix_web::test]
async fn creates_image_only_post_with_unknown_mood() {
    let service = init!(App::for_tests());

    let (status, body) = post_json!(
        service,
        "/api/posts",
        json!({ "imageUrl": "data:image/png;base64,AA==", "mood": "furious" })
    );
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["content"], "");
    assert_eq!(body["imageUrl"], "data:image/png;base64,AA==");
    assert_eq!(body["mood"], "default");
}

#[actix_web::test]
async fn rejects_empty_post() {
    let service = init!(App::for_tests());

    let (status, body) = post_json!(service, "/api/posts", json!({ "content": "" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        error_body("invalid_form_body", "Content or image is required")
    );
}

#[actix_web::test]
async fn rejects_long_post() {
    let service = init!(App::for_tests());

    let (status, body) = post_json!(
        service,
        "/api/posts",
        json!({ "content": "あ".repeat(501) })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "invalid_form_body");
}

#[actix_web::test]
async fn rejects_malformed_json() {
    let service = init!(App::for_tests());

    let req = test::TestRequest::post()
        .uri("/api/posts")
        .insert_header(("content-type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["type"], "invalid_form_body");
}

#[actix_web::test]
async fn rejects_oversized_body() {
    let service = init!(App::for_tests());

    let (status, body) = post_json!(
        service,
        "/api/posts",
        json!({ "imageUrl": "A".repeat(JSON_LIMIT * 2) })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["type"], "invalid_form_body");
}

#[actix_web::test]
async fn adds_reaction() {
    let (app, post) = seeded().await;
    let service = init!(app);

    let (status, body) = post_json!(
        service,
        "/api/reactions",
        json!({ "postId": post.id, "reactionType": "lovely" })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], post.id.as_str());
    assert_eq!(body["reactions"]["lovely"], 1);
    assert_eq!(body["reactions"]["healing"], 0);
}

#[actix_web::test]
async fn rejects_bad_reactions() {
    let (app, post) = seeded().await;
    let service = init!(app);

    let (status, body) = post_json!(service, "/api/reactions", json!({ "postId": post.id }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        error_body("invalid_form_body", "postId and reactionType are required")
    );

    let (status, body) = post_json!(
        service,
        "/api/reactions",
        json!({ "postId": post.id, "reactionType": "angry" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, error_body("invalid_form_body", "Invalid reaction type"));

    let (status, body) = post_json!(
        service,
        "/api/reactions",
        json!({ "postId": "missing", "reactionType": "lovely" })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("not_found", "Post not found"));
}

#[actix_web::test]
async fn adds_comment() {
    let (app, post) = seeded().await;
    let service = init!(app);

    let (status, body) = post_json!(
        service,
        "/api/comments",
        json!({ "postId": post.id, "content": "わかる！" })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["comments"][0]["content"], "わかる！");
}

#[actix_web::test]
async fn rejects_bad_comments() {
    let (app, post) = seeded().await;
    let service = init!(app);

    let (status, body) = post_json!(service, "/api/comments", json!({ "content": "hi" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        error_body("invalid_form_body", "postId and content are required")
    );

    let (status, body) = post_json!(
        service,
        "/api/comments",
        json!({ "postId": post.id, "content": "x".repeat(201) })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        error_body("invalid_form_body", "Comment must be at most 200 characters")
    );

    let (status, body) = post_json!(
        service,
        "/api/comments",
        json!({ "postId": "missing", "content": "hi" })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("not_found", "Post not found"));
}

#[actix_web::test]
async fn moderates_comments() {
    let (app, post) = seeded().await;
    let backend = app.backend.clone();
    let service = init!(app);

    let expected = error_body("moderated", "もっと優しい言葉で伝えてみませんか？💫");
    let (status, body) = post_json!(
        service,
        "/api/comments",
        json!({ "postId": post.id, "content": "お前はバカだ" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);

    // the filter runs before the post is looked up
    let (status, body) = post_json!(
        service,
        "/api/comments",
        json!({ "postId": "missing", "content": "消えろ" })
    );
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);

    let posts = backend.posts.list_posts().await.unwrap();
    assert!(posts[0].comments.is_empty());
}

#[actix_web::test]
async fn submits_report() {
    let service = init!(App::for_tests());

    let (status, body) = post_json!(
        service,
        "/api/reports",
        json!({ "postId": "anything", "reason": "spam" })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert!(!body["reportId"].as_str().unwrap().is_empty());

    let (status, body) = post_json!(service, "/api/reports", json!({ "postId": "anything" }));
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        error_body("invalid_form_body", "postId and reason are required")
    );
}

#[actix_web::test]
async fn hides_storage_faults() {
    crate::telemetry::init_for_tests();

    let app = App::for_tests().with_backend(Backend::new(BrokenStore));
    let service = init!(app);

    let req = test::TestRequest::get().uri("/api/posts").to_request();
    let resp = test::call_service(&service, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, error_body("internal", "Failed to get posts"));

    let cases = [
        ("/api/posts", json!({ "content": "hi" }), "Failed to create post"),
        (
            "/api/reactions",
            json!({ "postId": "a", "reactionType": "lovely" }),
            "Failed to add reaction",
        ),
        (
            "/api/comments",
            json!({ "postId": "a", "content": "hi" }),
            "Failed to add comment",
        ),
        (
            "/api/reports",
            json!({ "postId": "a", "reason": "spam" }),
            "Failed to save report",
        ),
    ];

    for (uri, payload, message) in cases {
        let (status, body) = post_json!(service, uri, payload);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR, "{uri}");
        assert_eq!(body, error_body("internal", message));
    }
}

#[actix_web::test]
async fn keeps_reaction_kinds_apart() {
    let (app, post) = seeded().await;
    let service = init!(app);

    for kind in ReactionKind::ALL {
        let (status, _) = post_json!(
            service,
            "/api/reactions",
            json!({ "postId": post.id, "reactionType": kind.as_str() })
        );
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = post_json!(
        service,
        "/api/reactions",
        json!({ "postId": post.id, "reactionType": "energized" })
    );
    assert_eq!(
        body["reactions"],
        json!({
            "understand": 1,
            "lovely": 1,
            "emotional": 1,
            "healing": 1,
            "energized": 2,
        })
    );
}

#[actix_web::test]
async fn accepts_long_post_ids() {
    let service = init!(App::for_tests());
    let long_id = "z".repeat(100);

    let (status, body) = post_json!(
        service,
        "/api/reactions",
        json!({ "postId": long_id, "reactionType": "lovely" })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("not_found", "Post not found"));

    let (status, body) = post_json!(
        service,
        "/api/comments",
        json!({ "postId": long_id, "content": "hi" })
    );
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, error_body("not_found", "Post not found"));

    let (status, body) = post_json!(
        service,
        "/api/reports",
        json!({ "postId": long_id, "reason": "r".repeat(2_000) })
    );
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
}
