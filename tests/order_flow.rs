//! Order lifecycle: numbering, snapshots, status machine, payment

mod common;

use common::*;
use ember_server::db::models::*;
use ember_server::db::repository::*;

#[tokio::test]
async fn order_numbers_are_monotonic_and_gap_free() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;

    let mut numbers = Vec::new();
    for _ in 0..5 {
        let order = place_order(&db, &table, &product, 1).await;
        numbers.push(order.order_number);
    }

    assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn product_snapshot_survives_product_mutation() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;
    let order = place_order(&db, &table, &product, 2).await;

    // Mutate the live product after the order exists
    ProductRepository::new(db.clone())
        .update(
            &id_str(&product.id),
            ProductUpdate {
                name: Some("Renamed Dish".to_string()),
                description: None,
                image: None,
                product_number: None,
                price: Some(99.0),
                menu: None,
            },
        )
        .await
        .expect("update product");

    let reloaded = OrderRepository::new(db.clone())
        .find_by_id(&id_str(&order.id))
        .await
        .expect("find order")
        .expect("order exists");
    let snapshot = reloaded.products[0]
        .product_snapshot
        .as_ref()
        .expect("snapshot present");

    assert_eq!(snapshot.price, 12.5);
    assert_eq!(snapshot.name, "Dish P-001");
}

#[tokio::test]
async fn missing_product_rejects_whole_order() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;

    // Empty resolution map simulates an id that did not resolve
    let result = OrderRepository::new(db.clone())
        .create(
            OrderCreate {
                table: rid(&table.id),
                products: vec![OrderItemCreate {
                    product: rid(&product.id),
                    quantity: 1,
                }],
                customer: Customer {
                    name: "Walk-in".to_string(),
                },
            },
            &std::collections::HashMap::new(),
        )
        .await;

    match result {
        Err(RepoError::NotFound(msg)) => assert_eq!(msg, "One or more products not found"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[tokio::test]
async fn status_machine_blocks_terminal_transitions() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;
    let order = place_order(&db, &table, &product, 1).await;
    let orders = OrderRepository::new(db.clone());
    let id = id_str(&order.id);

    let completed = orders
        .update_status(&id, OrderStatus::Completed)
        .await
        .expect("complete order");
    assert_eq!(completed.status, OrderStatus::Completed);

    // Terminal state refuses to move again
    let result = orders.update_status(&id, OrderStatus::Cancelled).await;
    assert!(matches!(result, Err(RepoError::Validation(_))));

    // Same-state write is a no-op, not an error
    let again = orders
        .update_status(&id, OrderStatus::Completed)
        .await
        .expect("same-state write");
    assert_eq!(again.status, OrderStatus::Completed);
}

#[tokio::test]
async fn pay_overwrites_money_fields_but_not_status() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;
    let order = place_order(&db, &table, &product, 1).await;
    let orders = OrderRepository::new(db.clone());

    let paid = orders
        .pay(
            &id_str(&order.id),
            OrderPay {
                price: 12.5,
                tax: 1.25,
                total_price: 13.75,
                payment_method: PaymentMethod::Card,
                tip: None,
                date: order.date,
            },
        )
        .await
        .expect("pay order");

    assert_eq!(paid.total_price, 13.75);
    assert_eq!(paid.tip, 0.0);
    assert_eq!(paid.payment_method, Some(PaymentMethod::Card));
    // Payment does not complete the order; callers sequence the transition
    assert_eq!(paid.status, OrderStatus::InProcess);
}

#[tokio::test]
async fn paid_but_not_completed_is_invisible_to_revenue() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;
    let order = place_order(&db, &table, &product, 1).await;
    let orders = OrderRepository::new(db.clone());
    let id = id_str(&order.id);

    orders
        .pay(
            &id,
            OrderPay {
                price: 20.0,
                tax: 0.0,
                total_price: 20.0,
                payment_method: PaymentMethod::Card,
                tip: None,
                date: order.date,
            },
        )
        .await
        .expect("pay order");

    let before = orders
        .sum_completed_revenue(0, i64::MAX)
        .await
        .expect("sum");
    assert_eq!(before, 0.0);

    orders
        .update_status(&id, OrderStatus::Completed)
        .await
        .expect("complete order");
    let after = orders
        .sum_completed_revenue(0, i64::MAX)
        .await
        .expect("sum");
    assert_eq!(after, 20.0);
}
