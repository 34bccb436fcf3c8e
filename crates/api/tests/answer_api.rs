//! HTTP-level tests for answers: posting, acceptance, editing, deletion
//! and ranking on the question page.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, delete_auth, get, post_auth, post_json_auth, put_json_auth};
use serde_json::json;
use sqlx::PgPool;

async fn ask(app: axum::Router, token: &str) -> i64 {
    let body = json!({ "title": "Which runtime?", "content": "Body text" });
    let response = post_json_auth(app, "/api/v1/questions", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn answer(app: axum::Router, token: &str, question_id: i64, content: &str) -> i64 {
    let uri = format!("/api/v1/questions/{question_id}/answers");
    let response = post_json_auth(app, &uri, json!({ "content": content }), token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

async fn question_state(app: axum::Router, question_id: i64) -> serde_json::Value {
    let response = get(app, &format!("/api/v1/questions/{question_id}")).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await["data"].clone()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_answer_missing_question(pool: PgPool) {
    let (_, bob) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);

    let response = post_json_auth(
        app,
        "/api/v1/questions/424242/answers",
        json!({ "content": "Into the void" }),
        &bob,
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_author_may_answer_own_question(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;

    answer(app.clone(), &alice, question_id, "Answering myself").await;

    let data = question_state(app, question_id).await;
    assert_eq!(data["question"]["answers_count"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_accept_is_one_shot(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let (_, bob) = create_user(&pool, "bob").await;
    let (_, carol) = create_user(&pool, "carol").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;
    let first = answer(app.clone(), &bob, question_id, "Use tokio").await;
    let second = answer(app.clone(), &carol, question_id, "Use smol").await;

    // Only the question author may accept.
    let response = post_auth(app.clone(), &format!("/api/v1/answers/{first}/accept"), &bob).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response =
        post_auth(app.clone(), &format!("/api/v1/answers/{first}/accept"), &alice).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["accepted"], true);
    assert!(data["accepted_at"].is_string());

    let response =
        post_auth(app.clone(), &format!("/api/v1/answers/{first}/accept"), &alice).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "UNSUPPORTED_TRANSITION");

    let response =
        post_auth(app.clone(), &format!("/api/v1/answers/{second}/accept"), &alice).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let data = question_state(app, question_id).await;
    assert_eq!(data["state"], "solved");
    assert_eq!(data["answers"][0]["id"], first);
    assert_eq!(data["answers"][1]["accepted"], false);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_deleting_accepted_answer_reopens_question(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let (_, bob) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;
    let answer_id = answer(app.clone(), &bob, question_id, "Use tokio").await;

    post_auth(app.clone(), &format!("/api/v1/answers/{answer_id}/accept"), &alice).await;
    assert_eq!(question_state(app.clone(), question_id).await["state"], "solved");

    // The question author cannot delete someone else's answer.
    let uri = format!("/api/v1/answers/{answer_id}");
    let response = delete_auth(app.clone(), &uri, &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(app.clone(), &uri, &bob).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let data = question_state(app, question_id).await;
    assert_eq!(data["state"], "open");
    assert_eq!(data["question"]["solved"], false);
    assert_eq!(data["answers"], json!([]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_edit_answer_author_only(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let (_, bob) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;
    let answer_id = answer(app.clone(), &bob, question_id, "Draft").await;
    let uri = format!("/api/v1/answers/{answer_id}");

    let response = put_json_auth(app.clone(), &uri, json!({ "content": "Mine now" }), &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = put_json_auth(app.clone(), &uri, json!({ "content": "Final" }), &bob).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["content"], "Final");
    assert!(data["updated_at"].is_string());

    let response = put_json_auth(app, &uri, json!({ "content": "" }), &bob).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_answer_comments_appends_and_votes(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let (_, bob) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;
    let answer_id = answer(app.clone(), &bob, question_id, "Use tokio").await;

    let uri = format!("/api/v1/answers/{answer_id}/appends");
    let response = post_json_auth(app.clone(), &uri, json!({ "content": "Edit" }), &alice).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let response = post_json_auth(app.clone(), &uri, json!({ "content": "P.S." }), &bob).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/answers/{answer_id}/comments");
    let response = post_json_auth(app.clone(), &uri, json!({ "content": "Thanks" }), &alice).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let uri = format!("/api/v1/answers/{answer_id}/votes");
    let response = post_json_auth(app.clone(), &uri, json!({ "direction": "up" }), &bob).await;
    assert_eq!(body_json(response).await["data"]["outcome"], "ignored");
    let response = post_json_auth(app.clone(), &uri, json!({ "direction": "up" }), &alice).await;
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["outcome"], "recorded");
    assert_eq!(data["net_score"], 1);

    let data = question_state(app, question_id).await;
    let shown = &data["answers"][0];
    assert_eq!(shown["appends"][0]["content"], "P.S.");
    assert_eq!(shown["comments"][0]["author_name"], "alice");
    assert_eq!(shown["up_votes"], 1);
    assert_eq!(shown["net_score"], 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_answers_ranked_by_score(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let (_, bob) = create_user(&pool, "bob").await;
    let (_, carol) = create_user(&pool, "carol").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;
    let low = answer(app.clone(), &bob, question_id, "Low").await;
    let high = answer(app.clone(), &carol, question_id, "High").await;

    post_json_auth(
        app.clone(),
        &format!("/api/v1/answers/{low}/votes"),
        json!({ "direction": "down" }),
        &alice,
    )
    .await;

    let data = question_state(app.clone(), question_id).await;
    assert_eq!(data["answers"][0]["id"], high);
    assert_eq!(data["answers"][1]["id"], low);

    // Acceptance outranks score.
    post_auth(app.clone(), &format!("/api/v1/answers/{low}/accept"), &alice).await;
    let data = question_state(app, question_id).await;
    assert_eq!(data["answers"][0]["id"], low);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_comment_listing_is_paged(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let (_, bob) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;
    let answer_id = answer(app.clone(), &bob, question_id, "Use tokio").await;

    let uri = format!("/api/v1/answers/{answer_id}/comments");
    for i in 0..7 {
        let body = json!({ "content": format!("Comment {i}") });
        let response = post_json_auth(app.clone(), &uri, body, &alice).await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["items"].as_array().unwrap().len(), 5);
    assert_eq!(data["items"][0]["content"], "Comment 0");
    assert_eq!(data["pagination"]["per_page"], 5);
    assert_eq!(data["pagination"]["num_pages"], 2);

    let response = get(app.clone(), &format!("{uri}?page=2")).await;
    let data = body_json(response).await["data"].clone();
    let contents: Vec<&str> = data["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["Comment 5", "Comment 6"]);

    let response = get(app, "/api/v1/answers/999999/comments").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_question_page_pages_answers(pool: PgPool) {
    let (_, alice) = create_user(&pool, "alice").await;
    let (_, bob) = create_user(&pool, "bob").await;
    let app = common::build_test_app(pool);
    let question_id = ask(app.clone(), &alice).await;
    let first = answer(app.clone(), &bob, question_id, "First").await;
    answer(app.clone(), &bob, question_id, "Second").await;

    let uri = format!("/api/v1/questions/{question_id}?pagesize=1&page=2");
    let response = get(app.clone(), &uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["answers"].as_array().unwrap().len(), 1);
    assert_eq!(data["answers"][0]["id"], first);
    assert_eq!(data["answer_pagination"]["total"], 2);
    assert_eq!(data["answer_pagination"]["num_pages"], 2);

    let data = question_state(app, question_id).await;
    assert_eq!(data["answer_pagination"]["per_page"], 25);
}
