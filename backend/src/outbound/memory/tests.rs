//! Tests for the in-memory store.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::*;
use crate::domain::{
    EmailAddress, PasswordHash, RepairIntake, RepairIntakeDraft, RepairStatus, TrackingCode,
    Username,
};

fn at(hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, hour, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn new_repair(code: &str) -> NewRepair {
    let intake = RepairIntake::new(RepairIntakeDraft {
        device_type: "smartphone".into(),
        device_model: "Pixel 8".into(),
        issue_description: "Cracked screen".into(),
        customer_name: "Ada Lovelace".into(),
        customer_email: "ada@example.com".into(),
        customer_phone: None,
    })
    .expect("valid intake");
    NewRepair {
        intake,
        user_id: None,
        tracking_code: TrackingCode::parse(code).expect("valid code"),
        estimated_completion: Some(at(9) + TimeDelta::days(2)),
        received_at: at(9),
    }
}

fn seed() -> SeedEntry {
    SeedEntry {
        notes: "Device received for repair".into(),
        timestamp: at(9),
    }
}

fn new_user(username: &str, email: &str) -> NewUser {
    NewUser {
        username: Username::parse(username).expect("valid username"),
        password_hash: PasswordHash::from_stored("00ff$abcd"),
        full_name: "Grace Hopper".into(),
        email: EmailAddress::parse("email", email).expect("valid email"),
        phone: None,
        created_at: at(8),
    }
}

#[fixture]
fn store() -> MemoryStore {
    MemoryStore::new()
}

#[rstest]
#[tokio::test]
async fn create_with_seed_assigns_ids_and_seeds_history(store: MemoryStore) {
    let first = store
        .create_with_seed(new_repair("REPABCDEFGH"), seed())
        .await
        .expect("created");
    let second = store
        .create_with_seed(new_repair("REPJKLMNPQR"), seed())
        .await
        .expect("created");

    assert_eq!(first.id(), RepairId::new(1));
    assert_eq!(second.id(), RepairId::new(2));
    assert_eq!(first.status(), RepairStatus::Received);

    let history = store.list_progress(first.id()).await.expect("history");
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].status, RepairStatus::Received);
    assert_eq!(history[0].notes.as_deref(), Some("Device received for repair"));
}

#[rstest]
#[tokio::test]
async fn duplicate_tracking_code_writes_nothing(store: MemoryStore) {
    store
        .create_with_seed(new_repair("REPABCDEFGH"), seed())
        .await
        .expect("created");

    let err = store
        .create_with_seed(new_repair("REPABCDEFGH"), seed())
        .await
        .expect_err("duplicate");

    assert!(matches!(
        err,
        RepairRepositoryError::DuplicateTrackingCode { ref code } if code == "REPABCDEFGH"
    ));
    assert_eq!(RepairRepository::list(&store).await.expect("list").len(), 1);
    assert!(
        store
            .list_progress(RepairId::new(2))
            .await
            .expect("history")
            .is_empty()
    );
}

#[rstest]
#[tokio::test]
async fn tracking_code_lookup_is_exact(store: MemoryStore) {
    let created = store
        .create_with_seed(new_repair("REPABCDEFGH"), seed())
        .await
        .expect("created");

    let found = store
        .find_by_tracking_code("REPABCDEFGH")
        .await
        .expect("lookup");
    assert_eq!(found.map(|repair| repair.id()), Some(created.id()));
    assert!(
        store
            .find_by_tracking_code("repabcdefgh")
            .await
            .expect("lookup")
            .is_none()
    );
}

#[rstest]
#[tokio::test]
async fn status_change_appends_progress_and_bumps_updated_at(store: MemoryStore) {
    let created = store
        .create_with_seed(new_repair("REPABCDEFGH"), seed())
        .await
        .expect("created");

    let updated = store
        .apply_status_change(StatusChange {
            repair_id: created.id(),
            expected: RepairStatus::Received,
            next: RepairStatus::Diagnosed,
            notes: "Opened the case".into(),
            at: at(11),
        })
        .await
        .expect("applied");

    assert_eq!(updated.status(), RepairStatus::Diagnosed);
    assert_eq!(updated.updated_at(), at(11));
    let stored = RepairRepository::find_by_id(&store, created.id())
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(stored, updated);

    let history = store.list_progress(created.id()).await.expect("history");
    let statuses: Vec<_> = history.iter().map(|entry| entry.status).collect();
    assert_eq!(
        statuses,
        vec![RepairStatus::Received, RepairStatus::Diagnosed]
    );
    assert_eq!(history[1].timestamp, at(11));
}

#[rstest]
#[tokio::test]
async fn stale_expected_status_is_a_conflict(store: MemoryStore) {
    let created = store
        .create_with_seed(new_repair("REPABCDEFGH"), seed())
        .await
        .expect("created");

    let err = store
        .apply_status_change(StatusChange {
            repair_id: created.id(),
            expected: RepairStatus::Testing,
            next: RepairStatus::Completed,
            notes: "Done".into(),
            at: at(12),
        })
        .await
        .expect_err("conflict");

    assert_eq!(
        err,
        RepairRepositoryError::status_mismatch(
            created.id(),
            RepairStatus::Testing,
            RepairStatus::Received,
        )
    );
    assert_eq!(
        store.list_progress(created.id()).await.expect("history").len(),
        1
    );
}

#[rstest]
#[tokio::test]
async fn status_change_on_missing_repair_is_not_found(store: MemoryStore) {
    let err = store
        .apply_status_change(StatusChange {
            repair_id: RepairId::new(99),
            expected: RepairStatus::Received,
            next: RepairStatus::Diagnosed,
            notes: "n/a".into(),
            at: at(12),
        })
        .await
        .expect_err("missing");

    assert_eq!(err, RepairRepositoryError::not_found(99));
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_bookings_with_one_code_admit_a_single_winner() {
    let store = Arc::new(MemoryStore::new());
    let tasks: Vec<_> = (0..8)
        .map(|_| {
            let store = Arc::clone(&store);
            tokio::spawn(async move {
                store
                    .create_with_seed(new_repair("REPABCDEFGH"), seed())
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    for task in tasks {
        if task.await.expect("task joined").is_ok() {
            winners += 1;
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(
        store.list_progress(RepairId::new(1)).await.expect("history").len(),
        1
    );
}

#[rstest]
#[tokio::test]
async fn list_by_user_filters_on_owner(store: MemoryStore) {
    let mut owned = new_repair("REPABCDEFGH");
    owned.user_id = Some(UserId::new(7));
    store.create_with_seed(owned, seed()).await.expect("created");
    store
        .create_with_seed(new_repair("REPJKLMNPQR"), seed())
        .await
        .expect("created");

    let repairs = store.list_by_user(UserId::new(7)).await.expect("list");
    assert_eq!(repairs.len(), 1);
    assert_eq!(repairs[0].tracking_code().as_str(), "REPABCDEFGH");
}

#[rstest]
#[case("ada", "GRACE@example.com", "email")]
#[case("grace", "other@example.com", "username")]
#[tokio::test]
async fn duplicate_accounts_are_rejected(
    store: MemoryStore,
    #[case] username: &str,
    #[case] email: &str,
    #[case] clash: &str,
) {
    UserRepository::create(&store, new_user("grace", "grace@example.com"))
        .await
        .expect("first account");

    let err = UserRepository::create(&store, new_user(username, email))
        .await
        .expect_err("duplicate");

    match clash {
        "email" => assert!(matches!(err, UserRepositoryError::DuplicateEmail { .. })),
        _ => assert!(matches!(err, UserRepositoryError::DuplicateUsername { .. })),
    }
}

#[rstest]
#[tokio::test]
async fn users_are_found_by_id_and_username(store: MemoryStore) {
    let created = UserRepository::create(&store, new_user("grace", "grace@example.com"))
        .await
        .expect("created");

    assert_eq!(created.id(), UserId::new(1));
    let by_id = UserRepository::find_by_id(&store, created.id())
        .await
        .expect("lookup");
    let by_name = store.find_by_username("grace").await.expect("lookup");
    assert_eq!(by_id, Some(created.clone()));
    assert_eq!(by_name, Some(created));
}

fn blog_draft(slug: &str, published_at: DateTime<Utc>) -> BlogPostDraft {
    BlogPostDraft {
        title: format!("Post {slug}"),
        slug: slug.into(),
        content: "Body".into(),
        excerpt: "Short".into(),
        category: "tips".into(),
        image_url: None,
        published_at,
    }
}

#[rstest]
#[tokio::test]
async fn blog_posts_are_newest_first_with_unique_slugs(store: MemoryStore) {
    store
        .create_blog_post(blog_draft("older", at(8)))
        .await
        .expect("created");
    store
        .create_blog_post(blog_draft("newer", at(10)))
        .await
        .expect("created");

    let err = store
        .create_blog_post(blog_draft("older", at(12)))
        .await
        .expect_err("duplicate slug");
    assert_eq!(err, CatalogueRepositoryError::duplicate_slug("older"));

    let slugs: Vec<_> = store
        .list_blog_posts()
        .await
        .expect("list")
        .into_iter()
        .map(|post| post.slug)
        .collect();
    assert_eq!(slugs, vec!["newer", "older"]);
    assert!(
        store
            .find_blog_post_by_slug("newer")
            .await
            .expect("lookup")
            .is_some()
    );
}

#[rstest]
#[tokio::test]
async fn faqs_follow_display_order(store: MemoryStore) {
    for (question, order) in [("third", 3), ("first", 1), ("second", 2)] {
        store
            .create_faq(FaqDraft {
                question: question.into(),
                answer: "Yes".into(),
                order,
            })
            .await
            .expect("created");
    }

    let questions: Vec<_> = store
        .list_faqs()
        .await
        .expect("list")
        .into_iter()
        .map(|faq| faq.question)
        .collect();
    assert_eq!(questions, vec!["first", "second", "third"]);
}

#[rstest]
#[tokio::test]
async fn services_filter_by_category_and_empty_tracks_any_family(store: MemoryStore) {
    assert!(store.is_empty().await.expect("empty check"));

    for category in ["smartphone", "laptop", "smartphone"] {
        store
            .create_service(ServiceOfferingDraft {
                category: category.into(),
                name: format!("{category} repair"),
                description: "Fix".into(),
                price: "From $49".into(),
                estimated_time: "1 day".into(),
            })
            .await
            .expect("created");
    }

    assert!(!store.is_empty().await.expect("empty check"));
    let phones = store
        .list_services_by_category("smartphone")
        .await
        .expect("list");
    assert_eq!(
        phones.iter().map(|service| service.id).collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert!(store.find_service(4).await.expect("lookup").is_none());
}

#[rstest]
#[tokio::test]
async fn contact_messages_are_kept_in_arrival_order(store: MemoryStore) {
    for subject in ["Quote", "Follow-up"] {
        let submission = ContactSubmission {
            name: "Ada".into(),
            email: EmailAddress::parse("email", "ada@example.com").expect("valid email"),
            subject: subject.into(),
            message: "Hello".into(),
        };
        ContactMessageRepository::create(&store, submission, at(10))
            .await
            .expect("stored");
    }

    let messages = store.contact_messages();
    assert_eq!(
        messages.iter().map(|m| (m.id, m.subject.as_str())).collect::<Vec<_>>(),
        vec![(1, "Quote"), (2, "Follow-up")]
    );
}
