//! Aggregation zero-safety, occupancy, and revenue windows

mod common;

use common::*;
use ember_server::db::models::*;
use ember_server::db::repository::*;

#[tokio::test]
async fn aggregations_are_zero_safe_on_empty_store() {
    let db = test_db().await;
    let orders = OrderRepository::new(db.clone());

    assert_eq!(orders.sum_completed_revenue(0, i64::MAX).await.unwrap(), 0.0);
    assert_eq!(orders.count_completed(0, i64::MAX).await.unwrap(), 0);
    assert!(orders.occupied_table_ids().await.unwrap().is_empty());
    assert!(orders
        .find_completed_in_range(0, i64::MAX)
        .await
        .unwrap()
        .is_empty());
    assert_eq!(DiningTableRepository::new(db.clone()).count().await.unwrap(), 0);
}

#[tokio::test]
async fn occupancy_counts_distinct_in_process_tables() {
    let db = test_db().await;
    let t1 = seed_table(&db, 1, 1).await;
    let _t2 = seed_table(&db, 2, 1).await;
    let _t3 = seed_table(&db, 3, 1).await;
    let category = seed_category(&db).await;
    let menu = seed_menu(&db, &category).await;
    let product = seed_product(&db, &menu, "P-001", 10.0).await;
    let orders = OrderRepository::new(db.clone());

    // Two in-process orders on the same table count once
    place_order(&db, &t1, &product, 1).await;
    place_order(&db, &t1, &product, 2).await;

    assert_eq!(DiningTableRepository::new(db.clone()).count().await.unwrap(), 3);
    assert_eq!(orders.occupied_table_ids().await.unwrap().len(), 1);

    // Completed orders stop counting as occupied
    let third = place_order(&db, &t1, &product, 1).await;
    orders
        .update_status(&id_str(&third.id), OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(orders.occupied_table_ids().await.unwrap().len(), 1);
}

#[tokio::test]
async fn cancelled_orders_still_hold_tables_for_floor_view() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;
    let orders = OrderRepository::new(db.clone());

    let order = place_order(&db, &table, &product, 1).await;
    orders
        .update_status(&id_str(&order.id), OrderStatus::Cancelled)
        .await
        .unwrap();

    // occupied (dashboard) only counts in-process
    assert!(orders.occupied_table_ids().await.unwrap().is_empty());
    // unsettled (occupancy-count endpoint) counts everything not completed
    assert_eq!(orders.unsettled_table_ids().await.unwrap().len(), 1);
}

#[tokio::test]
async fn revenue_respects_date_window_and_status() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;
    let orders = OrderRepository::new(db.clone());

    for (total, date) in [(10.0, 1_000), (20.0, 2_000), (40.0, 5_000)] {
        let order = place_order(&db, &table, &product, 1).await;
        let id = id_str(&order.id);
        orders
            .pay(
                &id,
                OrderPay {
                    price: total,
                    tax: 0.0,
                    total_price: total,
                    payment_method: PaymentMethod::Card,
                    tip: None,
                    date,
                },
            )
            .await
            .unwrap();
        orders
            .update_status(&id, OrderStatus::Completed)
            .await
            .unwrap();
    }
    // In-process order inside the window is excluded
    let open = place_order(&db, &table, &product, 1).await;
    orders
        .pay(
            &id_str(&open.id),
            OrderPay {
                price: 99.0,
                tax: 0.0,
                total_price: 99.0,
                payment_method: PaymentMethod::Card,
                tip: None,
                date: 2_500,
            },
        )
        .await
        .unwrap();

    // Half-open window [1000, 5000) picks up the first two only
    assert_eq!(orders.sum_completed_revenue(1_000, 5_000).await.unwrap(), 30.0);
    assert_eq!(orders.count_completed(1_000, 5_000).await.unwrap(), 2);
    assert_eq!(orders.sum_completed_revenue(0, i64::MAX).await.unwrap(), 70.0);
}

#[tokio::test]
async fn soft_deleted_orders_leave_aggregations() {
    let db = test_db().await;
    let (table, product) = seed_catalog(&db).await;
    let orders = OrderRepository::new(db.clone());

    let order = place_order(&db, &table, &product, 1).await;
    let id = id_str(&order.id);
    orders
        .pay(
            &id,
            OrderPay {
                price: 15.0,
                tax: 0.0,
                total_price: 15.0,
                payment_method: PaymentMethod::Card,
                tip: None,
                date: 1_000,
            },
        )
        .await
        .unwrap();
    orders
        .update_status(&id, OrderStatus::Completed)
        .await
        .unwrap();
    assert_eq!(orders.sum_completed_revenue(0, i64::MAX).await.unwrap(), 15.0);

    orders.delete_many(&[id.clone()]).await.unwrap();
    assert_eq!(orders.sum_completed_revenue(0, i64::MAX).await.unwrap(), 0.0);
    let (page, total) = orders.find_page(1, 20).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(total, 0);
}
