//! User accounts: email uniqueness, lookup normalization, credential flow

mod common;

use common::test_db;
use ember_server::auth::{hash_password, verify_password};
use ember_server::db::models::UserRole;
use ember_server::db::repository::{RepoError, UserRepository};

#[tokio::test]
async fn email_is_unique_and_lowercased() {
    let db = test_db().await;
    let users = UserRepository::new(db.clone());
    let hash = hash_password("hunter2-but-longer").unwrap();

    users
        .create("Admin", "Admin@Example.com", &hash, UserRole::Admin)
        .await
        .expect("create user");

    // Lookup normalizes case and whitespace
    let found = users
        .find_by_email("  admin@example.COM ")
        .await
        .unwrap()
        .expect("user found");
    assert_eq!(found.email, "admin@example.com");

    // Duplicate (case-insensitive) is rejected
    let dup = users
        .create("Clone", "ADMIN@example.com", &hash, UserRole::Staff)
        .await;
    assert!(matches!(dup, Err(RepoError::Duplicate(_))));
}

#[tokio::test]
async fn stored_hash_verifies_the_original_password_only() {
    let db = test_db().await;
    let users = UserRepository::new(db.clone());
    let hash = hash_password("correct horse battery staple").unwrap();

    users
        .create("Admin", "admin@example.com", &hash, UserRole::SuperAdmin)
        .await
        .expect("create user");

    let user = users
        .find_by_email("admin@example.com")
        .await
        .unwrap()
        .expect("user found");
    assert!(verify_password("correct horse battery staple", &user.password).unwrap());
    assert!(!verify_password("wrong password", &user.password).unwrap());
    assert_eq!(user.role, UserRole::SuperAdmin);
}
