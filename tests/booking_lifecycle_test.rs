//! Booking and rating lifecycle integration tests
//!
//! Exercises the locked reservation path, seat accounting, the
//! time/attendance gating on ratings, and the notifications bookings leave
//! behind. Tests skip when no test database is available.

mod helpers;

use assert_matches::assert_matches;
use chrono::{Duration, Utc};
use serial_test::serial;

use evently::database::DatabaseService;
use evently::models::event::EventStatus;
use evently::models::notification::{Notification, NotificationKind};
use evently::services::{JobQueue, JobWorker, ServiceFactory};
use evently::EventlyError;

use helpers::database_helper::test_database;
use helpers::test_data::{create_event, create_upcoming_event, create_user};

/// Database handle plus the full service stack with a live job worker.
fn build_services(pool: sqlx::PgPool) -> (DatabaseService, ServiceFactory) {
    let db = DatabaseService::new(pool);
    let (queue, receivers) = JobQueue::new();
    JobWorker::new(db.clone(), queue.clone()).spawn(receivers);
    (db.clone(), ServiceFactory::new(db, queue))
}

/// Notifications are persisted asynchronously; poll until they land.
async fn wait_for_notifications(
    db: &DatabaseService,
    user_id: i64,
    expected: usize,
) -> Vec<Notification> {
    for _ in 0..100 {
        let items = db.notifications.list_for_user(user_id).await.unwrap();
        if items.len() >= expected {
            return items;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    panic!("timed out waiting for {expected} notifications for user {user_id}");
}

#[tokio::test]
#[serial]
async fn test_two_seat_event_scenario() {
    let Some(test_db) = test_database().await else { return };
    let (db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;
    let bob = create_user(&test_db.pool, 3, "bob").await;
    let carol = create_user(&test_db.pool, 4, "carol").await;
    let event_id = create_upcoming_event(&test_db.pool, organizer, "Dance night", 2).await;

    let (booking, event) = services.bookings.reserve(alice, event_id).await.unwrap();
    assert_eq!(booking.user_id, alice);
    assert_eq!(event.id, event_id);

    // booking the same event twice is rejected
    assert_matches!(
        services.bookings.reserve(alice, event_id).await,
        Err(EventlyError::AlreadyBooked)
    );

    services.bookings.reserve(bob, event_id).await.unwrap();

    // both seats taken now
    assert_matches!(
        services.bookings.reserve(carol, event_id).await,
        Err(EventlyError::SeatsExhausted { .. })
    );

    assert_eq!(db.bookings.count_for_event(event_id).await.unwrap(), 2);
}

#[tokio::test]
#[serial]
async fn test_reserve_missing_event() {
    let Some(test_db) = test_database().await else { return };
    let (_db, services) = build_services(test_db.pool.clone());

    let alice = create_user(&test_db.pool, 1, "alice").await;

    assert_matches!(
        services.bookings.reserve(alice, 9999).await,
        Err(EventlyError::EventNotFound { event_id: 9999 })
    );
}

#[tokio::test]
#[serial]
async fn test_reserve_rejected_for_terminal_statuses() {
    let Some(test_db) = test_database().await else { return };
    let (_db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;

    for status in [EventStatus::Finished, EventStatus::Cancelled] {
        let event_id = create_event(
            &test_db.pool,
            organizer,
            "Closed event",
            Utc::now() + Duration::days(1),
            10,
            status,
        )
        .await;

        assert_matches!(
            services.bookings.reserve(alice, event_id).await,
            Err(EventlyError::EventNotBookable { .. })
        );
    }
}

#[tokio::test]
#[serial]
async fn test_cancel_then_rebook() {
    let Some(test_db) = test_database().await else { return };
    let (db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;
    let event_id = create_upcoming_event(&test_db.pool, organizer, "Dance night", 2).await;

    // book, cancel and re-book: no residual uniqueness violation
    services.bookings.reserve(alice, event_id).await.unwrap();
    services.bookings.cancel(alice, event_id).await.unwrap();
    services.bookings.reserve(alice, event_id).await.unwrap();

    assert_eq!(db.bookings.count_for_event(event_id).await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_cancel_without_booking() {
    let Some(test_db) = test_database().await else { return };
    let (_db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;
    let event_id = create_upcoming_event(&test_db.pool, organizer, "Dance night", 2).await;

    assert_matches!(
        services.bookings.cancel(alice, event_id).await,
        Err(EventlyError::NotRegistered)
    );

    assert_matches!(
        services.bookings.cancel(alice, 9999).await,
        Err(EventlyError::EventNotFound { .. })
    );
}

#[tokio::test]
#[serial]
async fn test_concurrent_last_seat_exactly_one_wins() {
    let Some(test_db) = test_database().await else { return };
    let (db, _services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;
    let bob = create_user(&test_db.pool, 3, "bob").await;
    let event_id = create_upcoming_event(&test_db.pool, organizer, "One seat left", 1).await;

    let repo_a = db.bookings.clone();
    let repo_b = db.bookings.clone();
    let a = tokio::spawn(async move { repo_a.reserve(alice, event_id).await });
    let b = tokio::spawn(async move { repo_b.reserve(bob, event_id).await });

    let results = [a.await.unwrap(), b.await.unwrap()];
    let winners = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1, "exactly one reservation must win the last seat");

    for result in results {
        if let Err(e) = result {
            assert_matches!(
                e,
                EventlyError::SeatsExhausted { .. } | EventlyError::AlreadyBooked
            );
        }
    }

    assert_eq!(db.bookings.count_for_event(event_id).await.unwrap(), 1);
}

#[tokio::test]
#[serial]
async fn test_capacity_never_exceeded_under_contention() {
    let Some(test_db) = test_database().await else { return };
    let (db, _services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let event_id = create_upcoming_event(&test_db.pool, organizer, "Small venue", 3).await;

    let mut handles = Vec::new();
    for i in 0..6i64 {
        let user = create_user(&test_db.pool, 10 + i, &format!("user{i}")).await;
        let repo = db.bookings.clone();
        handles.push(tokio::spawn(async move { repo.reserve(user, event_id).await }));
    }

    let mut successes = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            successes += 1;
        }
    }

    assert_eq!(successes, 3);
    assert_eq!(db.bookings.count_for_event(event_id).await.unwrap(), 3);
}

#[tokio::test]
#[serial]
async fn test_booking_and_cancel_emit_notifications() {
    let Some(test_db) = test_database().await else { return };
    let (db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;
    let event_id = create_upcoming_event(&test_db.pool, organizer, "Dance night", 2).await;

    services.bookings.reserve(alice, event_id).await.unwrap();
    let notifications = wait_for_notifications(&db, alice, 1).await;
    assert_eq!(notifications[0].kind, NotificationKind::Booking);
    assert_eq!(notifications[0].event_id, Some(event_id));
    assert!(notifications[0].message.contains("Dance night"));

    services.bookings.cancel(alice, event_id).await.unwrap();
    let notifications = wait_for_notifications(&db, alice, 2).await;
    // newest first
    assert_eq!(notifications[0].kind, NotificationKind::Cancel);
}

#[tokio::test]
#[serial]
async fn test_rating_before_start_rejected() {
    let Some(test_db) = test_database().await else { return };
    let (_db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;
    let event_id = create_upcoming_event(&test_db.pool, organizer, "Future event", 2).await;

    services.bookings.reserve(alice, event_id).await.unwrap();

    // holding a booking does not matter before the event starts
    assert_matches!(
        services.ratings.rate(alice, event_id, Some(5)).await,
        Err(EventlyError::RatingNotOpen)
    );
}

#[tokio::test]
#[serial]
async fn test_rating_requires_attendance() {
    let Some(test_db) = test_database().await else { return };
    let (_db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;
    let event_id = create_event(
        &test_db.pool,
        organizer,
        "Past event",
        Utc::now() - Duration::days(2),
        2,
        EventStatus::Finished,
    )
    .await;

    assert_matches!(
        services.ratings.rate(alice, event_id, Some(5)).await,
        Err(EventlyError::RatingWithoutBooking)
    );
}

#[tokio::test]
#[serial]
async fn test_rating_upsert_and_bounds() {
    let Some(test_db) = test_database().await else { return };
    let (db, services) = build_services(test_db.pool.clone());

    let organizer = create_user(&test_db.pool, 1, "organizer").await;
    let alice = create_user(&test_db.pool, 2, "alice").await;

    // book while upcoming, then move the event into the past
    let event_id = create_upcoming_event(&test_db.pool, organizer, "Dance night", 2).await;
    services.bookings.reserve(alice, event_id).await.unwrap();
    sqlx::query("UPDATE events SET start_time = $2, status = 'finished' WHERE id = $1")
        .bind(event_id)
        .bind(Utc::now() - Duration::days(2))
        .execute(&test_db.pool)
        .await
        .unwrap();

    assert_matches!(
        services.ratings.rate(alice, event_id, Some(6)).await,
        Err(EventlyError::InvalidScore)
    );
    assert_matches!(
        services.ratings.rate(alice, event_id, Some(0)).await,
        Err(EventlyError::InvalidScore)
    );
    assert_matches!(
        services.ratings.rate(alice, event_id, None).await,
        Err(EventlyError::InvalidScore)
    );

    let first = services.ratings.rate(alice, event_id, Some(5)).await.unwrap();
    assert_eq!(first.score, 5);

    // repeat call overwrites, no duplicate row
    let second = services.ratings.rate(alice, event_id, Some(3)).await.unwrap();
    assert_eq!(second.id, first.id);
    assert_eq!(second.score, 3);

    let stored = db
        .ratings
        .find_by_user_and_event(alice, event_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.score, 3);
}
