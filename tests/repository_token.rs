use sqlx::PgPool;
use std::sync::Arc;
use wedding_transport::domain::repositories::TokenRepository;
use wedding_transport::error::AppError;
use wedding_transport::infrastructure::persistence::PgTokenRepository;

fn repository(pool: PgPool) -> PgTokenRepository {
    PgTokenRepository::new(Arc::new(pool))
}

#[sqlx::test]
async fn test_create_stores_digest(pool: PgPool) {
    let repo = repository(pool);

    let token = repo.create("planner", "digest-1").await.unwrap();

    assert_eq!(token.name, "planner");
    assert_eq!(token.token_hash, "digest-1");
    assert!(!token.is_revoked());
    assert!(token.last_used_at.is_none());
}

#[sqlx::test]
async fn test_create_duplicate_name_conflicts(pool: PgPool) {
    let repo = repository(pool);

    repo.create("planner", "digest-a").await.unwrap();
    let err = repo.create("planner", "digest-b").await.unwrap_err();

    assert!(matches!(err, AppError::Conflict { .. }));
}

#[sqlx::test]
async fn test_touch_active_stamps_last_used(pool: PgPool) {
    let repo = repository(pool);
    let created = repo.create("coordinator", "digest-live").await.unwrap();

    let touched = repo.touch_active("digest-live").await.unwrap().unwrap();
    assert_eq!(touched.id, created.id);
    assert!(touched.last_used_at.is_some());

    let reloaded = repo.find_by_id(created.id).await.unwrap().unwrap();
    assert_eq!(reloaded.last_used_at, touched.last_used_at);
}

#[sqlx::test]
async fn test_touch_active_ignores_unknown_and_revoked(pool: PgPool) {
    let repo = repository(pool);
    let token = repo.create("old-device", "digest-old").await.unwrap();
    assert!(repo.revoke(token.id).await.unwrap());

    assert!(repo.touch_active("digest-old").await.unwrap().is_none());
    assert!(repo.touch_active("digest-missing").await.unwrap().is_none());

    let reloaded = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(reloaded.last_used_at.is_none());
}

#[sqlx::test]
async fn test_list_and_lookups(pool: PgPool) {
    let repo = repository(pool);
    let first = repo.create("venue-desk", "digest-1").await.unwrap();
    repo.create("driver-app", "digest-2").await.unwrap();

    let tokens = repo.list().await.unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].name, "driver-app");

    let by_id = repo.find_by_id(first.id).await.unwrap().unwrap();
    assert_eq!(by_id.name, "venue-desk");

    let by_name = repo.find_by_name("driver-app").await.unwrap().unwrap();
    assert_eq!(by_name.token_hash, "digest-2");

    assert!(repo.find_by_name("missing").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_revoke_only_once(pool: PgPool) {
    let repo = repository(pool);
    let token = repo.create("temp", "digest-temp").await.unwrap();

    assert!(repo.revoke(token.id).await.unwrap());
    assert!(!repo.revoke(token.id).await.unwrap());
    assert!(!repo.revoke(999_999).await.unwrap());

    let reloaded = repo.find_by_id(token.id).await.unwrap().unwrap();
    assert!(reloaded.is_revoked());
}
