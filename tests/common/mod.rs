//! Shared helpers for integration tests

use ember_server::db::DbService;
use ember_server::db::models::*;
use ember_server::db::repository::*;
use surrealdb::RecordId;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

/// Fresh in-memory database per test
pub async fn test_db() -> Surreal<Db> {
    DbService::memory().await.expect("in-memory db").db
}

pub async fn seed_table(db: &Surreal<Db>, number: i32, floor: i32) -> DiningTable {
    DiningTableRepository::new(db.clone())
        .create(DiningTableCreate {
            number,
            floor,
            capacity: 4,
            status: TableStatus::Available,
        })
        .await
        .expect("seed table")
}

pub async fn seed_category(db: &Surreal<Db>) -> Category {
    CategoryRepository::new(db.clone())
        .create(CategoryCreate {
            name: "Mains".to_string(),
            description: None,
            r#type: "food".to_string(),
            image: "mains.png".to_string(),
            status: CategoryStatus::Active,
        })
        .await
        .expect("seed category")
}

pub async fn seed_menu(db: &Surreal<Db>, category: &Category) -> Menu {
    MenuRepository::new(db.clone())
        .create(MenuCreate {
            name: "Dinner".to_string(),
            image: "dinner.png".to_string(),
            category: category.id.clone().expect("category id"),
        })
        .await
        .expect("seed menu")
}

pub async fn seed_product(db: &Surreal<Db>, menu: &Menu, number: &str, price: f64) -> Product {
    ProductRepository::new(db.clone())
        .create(ProductCreate {
            name: format!("Dish {number}"),
            description: "A tasty dish".to_string(),
            image: "dish.png".to_string(),
            product_number: number.to_string(),
            price,
            menu: menu.id.clone().expect("menu id"),
        })
        .await
        .expect("seed product")
}

/// Table + category + menu + one product, the minimum to place an order
pub async fn seed_catalog(db: &Surreal<Db>) -> (DiningTable, Product) {
    let table = seed_table(db, 1, 1).await;
    let category = seed_category(db).await;
    let menu = seed_menu(db, &category).await;
    let product = seed_product(db, &menu, "P-001", 12.5).await;
    (table, product)
}

pub fn rid(entity_id: &Option<RecordId>) -> RecordId {
    entity_id.clone().expect("record id")
}

pub fn id_str(entity_id: &Option<RecordId>) -> String {
    rid(entity_id).to_string()
}

/// Place an order for `quantity` of `product` on `table`
pub async fn place_order(
    db: &Surreal<Db>,
    table: &DiningTable,
    product: &Product,
    quantity: i32,
) -> Order {
    let mut products = std::collections::HashMap::new();
    products.insert(id_str(&product.id), product.clone());
    OrderRepository::new(db.clone())
        .create(
            OrderCreate {
                table: rid(&table.id),
                products: vec![OrderItemCreate {
                    product: rid(&product.id),
                    quantity,
                }],
                customer: Customer {
                    name: "Walk-in".to_string(),
                },
            },
            &products,
        )
        .await
        .expect("place order")
}
