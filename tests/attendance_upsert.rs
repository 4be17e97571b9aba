//! Attendance create-or-update semantics

mod common;

use common::*;
use ember_server::db::models::*;
use ember_server::db::repository::*;

async fn seed_staff(db: &surrealdb::Surreal<surrealdb::engine::local::Db>, name: &str) -> Staff {
    StaffRepository::new(db.clone())
        .create(StaffCreate {
            name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "600000000".to_string(),
            dob: "1990-01-01".to_string(),
            address: "1 Main St".to_string(),
            salary: 1500.0,
            shift_start: "09:00".to_string(),
            shift_end: "17:00".to_string(),
            photo: None,
            notes: None,
        })
        .await
        .expect("seed staff")
}

#[tokio::test]
async fn re_marking_same_day_updates_in_place() {
    let db = test_db().await;
    let staff = seed_staff(&db, "Alex").await;
    let attendance = AttendanceRepository::new(db.clone());

    attendance
        .mark(AttendanceMark {
            date: "2026-08-30".to_string(),
            status: "present".to_string(),
            remarks: None,
            staff: rid(&staff.id),
        })
        .await
        .expect("first mark");

    let second = attendance
        .mark(AttendanceMark {
            date: "2026-08-30".to_string(),
            status: "absent".to_string(),
            remarks: Some("called in sick".to_string()),
            staff: rid(&staff.id),
        })
        .await
        .expect("second mark");
    assert_eq!(second.status, "absent");

    let day = attendance
        .find_by_date("2026-08-30")
        .await
        .expect("list day");
    assert_eq!(day.len(), 1);
    assert_eq!(day[0].attendance.status, "absent");
    assert_eq!(
        day[0].attendance.remarks.as_deref(),
        Some("called in sick")
    );
}

#[tokio::test]
async fn different_days_and_staff_get_separate_records() {
    let db = test_db().await;
    let alex = seed_staff(&db, "Alex").await;
    let sam = seed_staff(&db, "Sam").await;
    let attendance = AttendanceRepository::new(db.clone());

    for (staff, date) in [
        (&alex, "2026-08-29"),
        (&alex, "2026-08-30"),
        (&sam, "2026-08-30"),
    ] {
        attendance
            .mark(AttendanceMark {
                date: date.to_string(),
                status: "present".to_string(),
                remarks: None,
                staff: rid(&staff.id),
            })
            .await
            .expect("mark");
    }

    assert_eq!(attendance.find_by_date("2026-08-29").await.unwrap().len(), 1);
    let day = attendance.find_by_date("2026-08-30").await.unwrap();
    assert_eq!(day.len(), 2);
    // Staff join is attached
    assert!(day.iter().all(|r| r.staff_data.is_some()));
}
