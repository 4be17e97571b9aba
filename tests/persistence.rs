//! On-disk engine smoke test

use ember_server::db::DbService;
use ember_server::db::models::{CategoryCreate, CategoryStatus};
use ember_server::db::repository::CategoryRepository;

#[tokio::test]
async fn rocksdb_engine_stores_and_lists() {
    let dir = tempfile::tempdir().expect("temp dir");
    let db_path = dir.path().join("db");
    let service = DbService::new(db_path.to_str().expect("utf-8 path"))
        .await
        .expect("open rocksdb");

    let repo = CategoryRepository::new(service.db.clone());
    repo.create(CategoryCreate {
        name: "Starters".to_string(),
        description: Some("Small plates".to_string()),
        r#type: "food".to_string(),
        image: "starters.png".to_string(),
        status: CategoryStatus::Active,
    })
    .await
    .expect("create category");

    let all = repo.find_all().await.expect("list categories");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].name, "Starters");
    assert!(all[0].id.is_some());
}
