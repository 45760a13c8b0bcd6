mod common;

use axum::http::{Method, StatusCode};
use common::{create_post, create_user, send, setup_test_app};
use serde_json::json;

#[tokio::test]
async fn test_create_post_for_unknown_author_is_validation_error() {
    let (app, _) = setup_test_app();
    let (status, body) = send(
        &app,
        Method::POST,
        "/posts",
        Some(json!({
            "title": "Orphan",
            "content": "No author",
            "authorId": uuid::Uuid::new_v4()
        })),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_get_post_includes_author_and_comments() {
    let (app, _) = setup_test_app();
    let author = create_user(&app, "Ada").await;
    let author_id = author["id"].as_str().unwrap();
    let post = create_post(&app, author_id, "Hello").await;
    let post_id = post["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        "/comments",
        Some(json!({ "content": "Nice", "postId": post_id, "authorId": author_id })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = send(&app, Method::GET, &format!("/posts/{}", post_id), None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Hello");
    assert_eq!(body["authorId"], author_id);
    assert_eq!(body["author"]["name"], "Ada");
    assert!(body["author"].get("passwordHash").is_none());
    assert_eq!(body["comments"].as_array().unwrap().len(), 1);
    assert_eq!(body["comments"][0]["content"], "Nice");
}

#[tokio::test]
async fn test_list_posts_filters_by_author() {
    let (app, _) = setup_test_app();
    let ada = create_user(&app, "Ada").await;
    let bob = create_user(&app, "Bob").await;
    let ada_id = ada["id"].as_str().unwrap();
    create_post(&app, ada_id, "Ada 1").await;
    create_post(&app, bob["id"].as_str().unwrap(), "Bob 1").await;
    create_post(&app, ada_id, "Ada 2").await;

    let (status, body) = send(
        &app,
        Method::GET,
        &format!("/posts?authorId={}", ada_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let posts = body.as_array().unwrap();
    assert_eq!(posts.len(), 2);
    assert_eq!(posts[0]["title"], "Ada 2");
    assert_eq!(posts[1]["title"], "Ada 1");

    let (_, body) = send(&app, Method::GET, "/posts", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);

    let (_, body) = send(&app, Method::GET, "/posts?authorId=", None).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_partial_update_and_delete() {
    let (app, _) = setup_test_app();
    let author = create_user(&app, "Ada").await;
    let post = create_post(&app, author["id"].as_str().unwrap(), "Draft").await;
    let uri = format!("/posts/{}", post["id"].as_str().unwrap());

    let (status, updated) = send(
        &app,
        Method::PATCH,
        &uri,
        Some(json!({ "title": "Published" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Published");
    assert_eq!(updated["content"], post["content"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Post deleted successfully");

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Post not found");
}

#[tokio::test]
async fn test_deleting_author_removes_posts() {
    let (app, _) = setup_test_app();
    let author = create_user(&app, "Ada").await;
    let author_id = author["id"].as_str().unwrap();
    create_post(&app, author_id, "Gone soon").await;

    send(&app, Method::DELETE, &format!("/users/{}", author_id), None).await;

    let (_, body) = send(&app, Method::GET, "/posts", None).await;
    assert!(body.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_post_validation() {
    let (app, _) = setup_test_app();
    let author = create_user(&app, "Ada").await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/posts",
        Some(json!({
            "title": "",
            "content": "Body",
            "authorId": author["id"]
        })),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}
