//! Repository tests against a real PostgreSQL database.
//!
//! Run with `DATABASE_URL` set: `cargo test --test pg_repositories -- --ignored`.

use quill_db::{
    CommentRepository, DbError, NewComment, NewPost, NewUser, PgCommentRepository,
    PgPostRepository, PgUserRepository, PostChanges, PostRepository, UserChanges, UserRepository,
};
use quill_models::{Email, PostId, UserId};
use sqlx::PgPool;

fn new_user(email: &str) -> NewUser {
    NewUser {
        name: "Ada".to_string(),
        email: Email::new_unchecked(email),
        password_hash: "$2b$04$digestdigestdigestdigestdigestdigestdigestdigestdig".to_string(),
    }
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_unique_email(pool: PgPool) {
    let users = PgUserRepository::new(pool);
    users.create(new_user("ada@x.com")).await.unwrap();

    let err = users.create(new_user("ada@x.com")).await.unwrap_err();
    assert!(err.is_unique_violation());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_user_credentials_and_partial_update(pool: PgPool) {
    let users = PgUserRepository::new(pool);
    let user = users.create(new_user("ada@x.com")).await.unwrap();

    let creds = users.find_by_email("ada@x.com").await.unwrap().unwrap();
    assert_eq!(creds.user.id, user.id);
    assert!(creds.password_hash.starts_with("$2b$"));

    let updated = users
        .update(
            user.id,
            UserChanges {
                name: Some("Ada L.".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.name, "Ada L.");
    assert_eq!(updated.email, user.email);
    assert!(updated.updated_at >= user.updated_at);

    let err = users
        .update(UserId::new(), UserChanges::default())
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_post_includes_and_foreign_keys(pool: PgPool) {
    let users = PgUserRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool.clone());
    let comments = PgCommentRepository::new(pool);

    let err = posts
        .create(NewPost {
            title: "T".to_string(),
            content: "C".to_string(),
            author_id: UserId::new(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, DbError::ForeignKeyViolation(_)));

    let author = users.create(new_user("ada@x.com")).await.unwrap();
    let post = posts
        .create(NewPost {
            title: "T".to_string(),
            content: "C".to_string(),
            author_id: author.id,
        })
        .await
        .unwrap();
    comments
        .create(NewComment {
            content: "Nice".to_string(),
            post_id: post.id,
            author_id: author.id,
        })
        .await
        .unwrap();

    let found = posts.find_by_id(post.id).await.unwrap().unwrap();
    assert_eq!(found.author.email, author.email);
    assert_eq!(found.comments.len(), 1);

    let by_author = posts.find_many(Some(author.id)).await.unwrap();
    assert_eq!(by_author.len(), 1);
    assert!(posts.find_many(Some(UserId::new())).await.unwrap().is_empty());

    let updated = posts
        .update(
            post.id,
            PostChanges {
                content: Some("C2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.title, "T");
    assert_eq!(updated.content, "C2");

    let listed = comments.find_many(Some(post.id)).await.unwrap();
    assert_eq!(listed[0].post.id, post.id);
    assert_eq!(listed[0].author.id, author.id);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "requires DATABASE_URL"]
async fn test_delete_cascades_and_reports_missing(pool: PgPool) {
    let users = PgUserRepository::new(pool.clone());
    let posts = PgPostRepository::new(pool.clone());

    let author = users.create(new_user("ada@x.com")).await.unwrap();
    let post = posts
        .create(NewPost {
            title: "T".to_string(),
            content: "C".to_string(),
            author_id: author.id,
        })
        .await
        .unwrap();

    users.delete(author.id).await.unwrap();
    assert!(posts.find_by_id(post.id).await.unwrap().is_none());

    let err = posts.delete(PostId::new()).await.unwrap_err();
    assert!(err.is_not_found());
}
