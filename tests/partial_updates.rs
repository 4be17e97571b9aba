//! Partial-merge updates round-tripped through the live store, one per
//! repository: untouched fields survive, changed fields land.

mod common;

use common::*;
use ember_server::db::models::*;
use ember_server::db::repository::*;

#[tokio::test]
async fn category_update_merges_and_keeps_untouched_fields() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let repo = CategoryRepository::new(db.clone());

    let updated = repo
        .update(
            &id_str(&category.id),
            CategoryUpdate {
                name: Some("Specials".to_string()),
                description: None,
                r#type: None,
                image: None,
                status: Some(CategoryStatus::Inactive),
            },
        )
        .await
        .expect("update category");

    assert_eq!(updated.name, "Specials");
    assert_eq!(updated.status, CategoryStatus::Inactive);
    assert_eq!(updated.r#type, category.r#type);
    assert_eq!(updated.image, category.image);

    let reread = repo
        .find_by_id(&id_str(&category.id))
        .await
        .expect("reread")
        .expect("still present");
    assert_eq!(reread.name, "Specials");
    assert!(reread.updated_at >= category.updated_at);
}

#[tokio::test]
async fn menu_update_can_move_to_another_category() {
    let db = test_db().await;
    let category = seed_category(&db).await;
    let menu = seed_menu(&db, &category).await;
    let other = CategoryRepository::new(db.clone())
        .create(CategoryCreate {
            name: "Drinks".to_string(),
            description: None,
            r#type: "beverage".to_string(),
            image: "drinks.png".to_string(),
            status: CategoryStatus::Active,
        })
        .await
        .expect("second category");

    let repo = MenuRepository::new(db.clone());
    let updated = repo
        .update(
            &id_str(&menu.id),
            MenuUpdate {
                name: Some("Evening".to_string()),
                image: None,
                category: Some(rid(&other.id)),
            },
        )
        .await
        .expect("update menu");

    assert_eq!(updated.name, "Evening");
    assert_eq!(updated.image, menu.image);
    assert_eq!(updated.category, rid(&other.id));

    // The moved menu shows up under its new category, not the old one
    let under_old = repo
        .find_by_category(&id_str(&category.id))
        .await
        .expect("list old");
    assert!(under_old.is_empty());
    let under_new = repo
        .find_by_category(&id_str(&other.id))
        .await
        .expect("list new");
    assert_eq!(under_new.len(), 1);
}

#[tokio::test]
async fn table_update_merges_capacity_and_status() {
    let db = test_db().await;
    let table = seed_table(&db, 7, 2).await;
    let repo = DiningTableRepository::new(db.clone());

    let updated = repo
        .update(
            &id_str(&table.id),
            DiningTableUpdate {
                number: None,
                floor: None,
                capacity: Some(8),
                status: Some(TableStatus::NotAvailable),
            },
        )
        .await
        .expect("update table");

    assert_eq!(updated.number, 7);
    assert_eq!(updated.floor, 2);
    assert_eq!(updated.capacity, 8);
    assert_eq!(updated.status, TableStatus::NotAvailable);

    let reread = repo
        .find_by_id(&id_str(&table.id))
        .await
        .expect("reread")
        .expect("still present");
    assert_eq!(reread.capacity, 8);
}

#[tokio::test]
async fn reservation_update_merges_and_survives_reread() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 1).await;
    let repo = ReservationRepository::new(db.clone());

    let reservation = repo
        .create(ReservationCreate {
            table: rid(&table.id),
            max_persons: 2,
            date: "2026-09-01".to_string(),
            time: "19:00".to_string(),
            advance_fee: None,
            status: ReservationStatus::Confirmed,
            customer: ReservationCustomer {
                name: "Dana".to_string(),
                phone: "600111222".to_string(),
                email: None,
            },
            payment: ReservationPayment {
                payment_method: ReservationPaymentMethod::NoAdvancePayment,
                payment_status: "pending".to_string(),
                payment_amount: 0.0,
            },
        })
        .await
        .expect("create reservation");

    let updated = repo
        .update(
            &id_str(&reservation.id),
            ReservationUpdate {
                table: None,
                max_persons: Some(4),
                date: None,
                time: Some("20:30".to_string()),
                advance_fee: Some(15.0),
                status: None,
                customer: None,
                payment: None,
            },
        )
        .await
        .expect("update reservation");

    assert_eq!(updated.max_persons, 4);
    assert_eq!(updated.time, "20:30");
    assert_eq!(updated.advance_fee, Some(15.0));
    assert_eq!(updated.status, ReservationStatus::Confirmed);
    assert_eq!(updated.customer.name, "Dana");

    let listed = repo.find_by_date("2026-09-01").await.expect("list by date");
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].reservation.time, "20:30");
}

#[tokio::test]
async fn reservation_update_rejects_dangling_table() {
    let db = test_db().await;
    let table = seed_table(&db, 1, 1).await;
    let repo = ReservationRepository::new(db.clone());

    let reservation = repo
        .create(ReservationCreate {
            table: rid(&table.id),
            max_persons: 2,
            date: "2026-09-01".to_string(),
            time: "19:00".to_string(),
            advance_fee: None,
            status: ReservationStatus::Confirmed,
            customer: ReservationCustomer {
                name: "Dana".to_string(),
                phone: "600111222".to_string(),
                email: None,
            },
            payment: ReservationPayment {
                payment_method: ReservationPaymentMethod::Card,
                payment_status: "paid".to_string(),
                payment_amount: 10.0,
            },
        })
        .await
        .expect("create reservation");

    let ghost: surrealdb::RecordId = "dining_table:missing".parse().expect("ghost id");
    let result = repo
        .update(
            &id_str(&reservation.id),
            ReservationUpdate {
                table: Some(ghost),
                max_persons: None,
                date: None,
                time: None,
                advance_fee: None,
                status: None,
                customer: None,
                payment: None,
            },
        )
        .await;
    assert!(matches!(result, Err(RepoError::NotFound(_))));
}

#[tokio::test]
async fn staff_update_merges_salary_and_shift() {
    let db = test_db().await;
    let repo = StaffRepository::new(db.clone());
    let staff = repo
        .create(StaffCreate {
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            phone: "600333444".to_string(),
            dob: "1992-03-14".to_string(),
            address: "12 Calle Mayor".to_string(),
            salary: 1800.0,
            shift_start: "09:00".to_string(),
            shift_end: "17:00".to_string(),
            photo: None,
            notes: None,
        })
        .await
        .expect("create staff");

    let updated = repo
        .update(
            &id_str(&staff.id),
            StaffUpdate {
                name: None,
                email: None,
                phone: None,
                dob: None,
                address: None,
                salary: Some(2000.0),
                shift_start: None,
                shift_end: Some("18:00".to_string()),
                photo: None,
                notes: Some("Closes on Fridays".to_string()),
            },
        )
        .await
        .expect("update staff");

    assert_eq!(updated.name, "Sam");
    assert_eq!(updated.salary, 2000.0);
    assert_eq!(updated.shift_start, "09:00");
    assert_eq!(updated.shift_end, "18:00");
    assert_eq!(updated.notes.as_deref(), Some("Closes on Fridays"));

    let reread = repo
        .find_by_id(&id_str(&staff.id))
        .await
        .expect("reread")
        .expect("still present");
    assert_eq!(reread.salary, 2000.0);
}
