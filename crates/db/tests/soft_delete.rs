//! Integration tests for soft-delete, restore, and listing filters.
//!
//! Exercises the repository layer against a real database to verify that:
//! - Soft-deleted rows stay retrievable by id
//! - Default listings hide deleted rows and `isDeleted=true` listings show only them
//! - A legacy `NULL` flag counts as not deleted
//! - The pattern is consistent across entrances, cameras, detections, and alerts

use crowdwatch_core::alert::Severity;
use crowdwatch_core::listing::DeletedFilter;
use crowdwatch_core::pagination::PageRequest;
use crowdwatch_db::models::alert::{AlertFilter, AlertInput};
use crowdwatch_db::models::camera::{CameraFilter, CameraInput};
use crowdwatch_db::models::detection::{DetectionFilter, DetectionInput};
use crowdwatch_db::models::entrance::{EntranceFilter, EntranceInput};
use crowdwatch_db::models::user::{CreateUser, UserFilter};
use crowdwatch_db::repositories::{AlertRepo, CameraRepo, DetectionRepo, EntranceRepo, UserRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_entrance(name: &str) -> EntranceInput {
    EntranceInput {
        name: name.to_string(),
        description: None,
        threshold_medium: Some(50.0),
        threshold_high: Some(100.0),
        is_active: true,
    }
}

fn new_user(email: &str, phone_no: &str) -> CreateUser {
    CreateUser {
        name: "Operator".to_string(),
        email: email.to_string(),
        phone_no: phone_no.to_string(),
        password_hash: "$argon2id$placeholder".to_string(),
        role: "user".to_string(),
    }
}

fn new_camera(device_id: &str) -> CameraInput {
    CameraInput {
        entrance_id: 1,
        device_id: device_id.to_string(),
        name: format!("Camera {device_id}"),
        stream_url: None,
        roi: None,
        is_active: true,
        ip_address: None,
        location: None,
    }
}

fn new_detection(count: i32) -> DetectionInput {
    DetectionInput {
        camera_id: 1,
        entrance_id: 1,
        count,
        timestamp: None,
        image_snapshot: None,
        density: None,
    }
}

fn new_alert(title: &str) -> AlertInput {
    AlertInput {
        entrance_id: 1,
        triggered_by: 1,
        title: title.to_string(),
        message: "Count over threshold".to_string(),
        severity: Severity::Medium,
        is_resolved: false,
        resolved_at: None,
    }
}

fn filter(deleted: DeletedFilter) -> EntranceFilter {
    EntranceFilter { deleted }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn delete_and_restore_round_trip(pool: PgPool) {
    let entrance = EntranceRepo::create(&pool, &new_entrance("Gate A")).await.unwrap();
    assert!(!entrance.is_deleted);

    let deleted = EntranceRepo::set_deleted(&pool, entrance.id, true).await.unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert!(EntranceRepo::find_by_id(&pool, entrance.id).await.unwrap().is_some());

    let restored = EntranceRepo::set_deleted(&pool, entrance.id, false).await.unwrap().unwrap();
    assert!(!restored.is_deleted);
}

#[sqlx::test(migrations = "./migrations")]
async fn listings_split_on_deleted_flag(pool: PgPool) {
    let kept = EntranceRepo::create(&pool, &new_entrance("Kept")).await.unwrap();
    let gone = EntranceRepo::create(&pool, &new_entrance("Gone")).await.unwrap();
    EntranceRepo::set_deleted(&pool, gone.id, true).await.unwrap();

    let active = EntranceRepo::list(&pool, &filter(DeletedFilter::Active), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(active.metadata.total_results, 1);
    assert_eq!(active.data[0].id, kept.id);

    let trash = EntranceRepo::list(&pool, &filter(DeletedFilter::OnlyDeleted), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(trash.metadata.total_results, 1);
    assert_eq!(trash.data[0].id, gone.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn null_deleted_flag_counts_as_active(pool: PgPool) {
    let legacy = EntranceRepo::create(&pool, &new_entrance("Legacy")).await.unwrap();
    sqlx::query("UPDATE entrances SET is_deleted = NULL WHERE id = $1")
        .bind(legacy.id)
        .execute(&pool)
        .await
        .unwrap();

    let found = EntranceRepo::find_by_id(&pool, legacy.id).await.unwrap().unwrap();
    assert!(!found.is_deleted);

    let active = EntranceRepo::list(&pool, &filter(DeletedFilter::Active), PageRequest::default())
        .await
        .unwrap();
    assert_eq!(active.metadata.total_results, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn pagination_windows_rows(pool: PgPool) {
    for i in 0..5 {
        EntranceRepo::create(&pool, &new_entrance(&format!("Gate {i}"))).await.unwrap();
    }

    let page = EntranceRepo::list(
        &pool,
        &filter(DeletedFilter::Active),
        PageRequest::new(Some(3), Some(2)),
    )
    .await
    .unwrap();

    assert_eq!(page.metadata.total_results, 5);
    assert_eq!(page.metadata.total_pages, 3);
    assert_eq!(page.data.len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn detections_list_newest_first_with_camera_filter(pool: PgPool) {
    for (camera_id, count, ts) in [
        (1, 3, "2025-01-01T08:00:00Z"),
        (1, 7, "2025-01-01T09:00:00Z"),
        (2, 4, "2025-01-01T10:00:00Z"),
    ] {
        let input = DetectionInput {
            camera_id,
            entrance_id: 1,
            count,
            timestamp: Some(ts.parse().unwrap()),
            image_snapshot: None,
            density: None,
        };
        DetectionRepo::create(&pool, &input).await.unwrap();
    }

    let page = DetectionRepo::list(
        &pool,
        &DetectionFilter {
            camera_id: Some(1),
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();

    let counts: Vec<i32> = page.data.iter().map(|d| d.detection.count).collect();
    assert_eq!(counts, vec![7, 3]);
    assert!(page.data[0].camera.is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn deleted_users_keep_their_contact_details(pool: PgPool) {
    let user = UserRepo::create(&pool, &new_user("held@test.com", "5555555555")).await.unwrap();
    UserRepo::set_deleted(&pool, user.id, true).await.unwrap();

    assert!(UserRepo::contact_taken(&pool, Some("held@test.com"), None, None).await.unwrap());
    assert!(UserRepo::contact_taken(&pool, None, Some("5555555555"), None).await.unwrap());
    assert!(!UserRepo::contact_taken(&pool, Some("held@test.com"), None, Some(user.id))
        .await
        .unwrap());
}

#[sqlx::test(migrations = "./migrations")]
async fn user_listing_matches_partially_and_case_insensitively(pool: PgPool) {
    UserRepo::create(&pool, &new_user("Alice.Ops@test.com", "6666666666")).await.unwrap();
    UserRepo::create(&pool, &new_user("bob@test.com", "7777777777")).await.unwrap();

    let page = UserRepo::list(
        &pool,
        &UserFilter {
            email: Some("alice".into()),
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();

    assert_eq!(page.metadata.total_results, 1);
    assert_eq!(page.data[0].email, "Alice.Ops@test.com");
}

#[sqlx::test(migrations = "./migrations")]
async fn duplicate_email_violates_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &new_user("twice@test.com", "8888888888")).await.unwrap();

    let err = UserRepo::create(&pool, &new_user("twice@test.com", "9999999999"))
        .await
        .unwrap_err();

    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert!(db_err.constraint().unwrap_or_default().starts_with("uq_"));
}

// ---------------------------------------------------------------------------
// Cameras, detections, alerts
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn camera_soft_delete_and_restore(pool: PgPool) {
    let kept = CameraRepo::create(&pool, &new_camera("cam-kept")).await.unwrap();
    let gone = CameraRepo::create(&pool, &new_camera("cam-gone")).await.unwrap();

    let deleted = CameraRepo::set_deleted(&pool, gone.id, true).await.unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert!(CameraRepo::find_by_id(&pool, gone.id).await.unwrap().unwrap().is_deleted);

    let active = CameraRepo::list(&pool, &CameraFilter::default(), PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<i64> = active.data.iter().map(|c| c.camera.id).collect();
    assert_eq!(ids, vec![kept.id]);

    let trash = CameraRepo::list(
        &pool,
        &CameraFilter {
            deleted: DeletedFilter::OnlyDeleted,
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    let ids: Vec<i64> = trash.data.iter().map(|c| c.camera.id).collect();
    assert_eq!(ids, vec![gone.id]);

    let restored = CameraRepo::set_deleted(&pool, gone.id, false).await.unwrap().unwrap();
    assert!(!restored.is_deleted);
}

#[sqlx::test(migrations = "./migrations")]
async fn detection_soft_delete_and_restore(pool: PgPool) {
    let kept = DetectionRepo::create(&pool, &new_detection(2)).await.unwrap();
    let gone = DetectionRepo::create(&pool, &new_detection(8)).await.unwrap();

    let deleted = DetectionRepo::set_deleted(&pool, gone.id, true).await.unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert!(DetectionRepo::find_by_id(&pool, gone.id).await.unwrap().unwrap().is_deleted);

    let active = DetectionRepo::list(&pool, &DetectionFilter::default(), PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<i64> = active.data.iter().map(|d| d.detection.id).collect();
    assert_eq!(ids, vec![kept.id]);

    let trash = DetectionRepo::list(
        &pool,
        &DetectionFilter {
            deleted: DeletedFilter::OnlyDeleted,
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    let ids: Vec<i64> = trash.data.iter().map(|d| d.detection.id).collect();
    assert_eq!(ids, vec![gone.id]);

    let restored = DetectionRepo::set_deleted(&pool, gone.id, false).await.unwrap().unwrap();
    assert!(!restored.is_deleted);
}

#[sqlx::test(migrations = "./migrations")]
async fn alert_soft_delete_and_restore(pool: PgPool) {
    let kept = AlertRepo::create(&pool, &new_alert("Kept"), None).await.unwrap();
    let gone = AlertRepo::create(&pool, &new_alert("Gone"), None).await.unwrap();

    let deleted = AlertRepo::set_deleted(&pool, gone.id, true).await.unwrap().unwrap();
    assert!(deleted.is_deleted);
    assert!(AlertRepo::find_by_id(&pool, gone.id).await.unwrap().unwrap().is_deleted);

    let active = AlertRepo::list(&pool, &AlertFilter::default(), PageRequest::default())
        .await
        .unwrap();
    let ids: Vec<i64> = active.data.iter().map(|a| a.alert.id).collect();
    assert_eq!(ids, vec![kept.id]);

    let trash = AlertRepo::list(
        &pool,
        &AlertFilter {
            deleted: DeletedFilter::OnlyDeleted,
            ..Default::default()
        },
        PageRequest::default(),
    )
    .await
    .unwrap();
    let ids: Vec<i64> = trash.data.iter().map(|a| a.alert.id).collect();
    assert_eq!(ids, vec![gone.id]);

    let unread = AlertRepo::list_unread_for_entrance(&pool, 1).await.unwrap();
    assert_eq!(unread.len(), 1, "deleted alerts are not reported unread");

    let restored = AlertRepo::set_deleted(&pool, gone.id, false).await.unwrap().unwrap();
    assert!(!restored.is_deleted);
}
