//! Catalogue reads over the bundled seed, plus accounts and contact over HTTP.

mod support;

use std::sync::Arc;

use actix_web::test as actix_test;
use backend::domain::{CatalogueSeed, SeedOutcome, seed_catalogue};
use backend::outbound::tracking_codes::RandomTrackingCodes;
use rstest::rstest;
use serde_json::{Value, json};

use support::{Harness, harness, init_app, send};

async fn seeded() -> Harness {
    let backend = harness(Arc::new(RandomTrackingCodes));
    let seed = CatalogueSeed::bundled().expect("bundled catalogue");
    let outcome = seed_catalogue(backend.store.as_ref(), seed)
        .await
        .expect("seeded");
    assert!(matches!(outcome, SeedOutcome::Seeded { faqs: 5, .. }));
    backend
}

fn get(uri: &str) -> actix_http::Request {
    actix_test::TestRequest::get().uri(uri).to_request()
}

fn field(body: &Value, key: &str) -> Vec<String> {
    body.as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item[key].as_str().map(str::to_owned))
                .collect()
        })
        .unwrap_or_default()
}

#[actix_web::test]
async fn reseeding_a_populated_store_is_skipped() {
    let backend = seeded().await;
    let seed = CatalogueSeed::bundled().expect("bundled catalogue");

    let outcome = seed_catalogue(backend.store.as_ref(), seed)
        .await
        .expect("second seed");

    assert_eq!(outcome, SeedOutcome::Skipped);
    let app = init_app(backend.state).await;
    let (_, services) = send(&app, get("/api/v1/services")).await;
    assert_eq!(services.as_array().map(Vec::len), Some(12));
}

#[actix_web::test]
async fn faqs_and_blog_posts_are_ordered() {
    let app = init_app(seeded().await.state).await;

    let (status, faqs) = send(&app, get("/api/v1/faqs")).await;
    assert_eq!(status, 200);
    let orders: Vec<i64> = faqs
        .as_array()
        .expect("faq array")
        .iter()
        .filter_map(|faq| faq["order"].as_i64())
        .collect();
    assert_eq!(orders, [1, 2, 3, 4, 5]);

    let (status, posts) = send(&app, get("/api/v1/blog")).await;
    assert_eq!(status, 200);
    assert_eq!(
        field(&posts, "slug"),
        [
            "top-5-diy-smartphone-repairs",
            "phone-water-damage-immediate-steps",
            "speed-up-slow-laptop",
        ]
    );
}

#[rstest]
#[case("smartphone")]
#[case("computer")]
#[case("console")]
#[case("tablet")]
#[actix_web::test]
async fn category_routes_agree(#[case] category: &str) {
    let app = init_app(seeded().await.state).await;

    let (_, by_query) = send(&app, get(&format!("/api/v1/services?category={category}"))).await;
    let (_, by_path) = send(&app, get(&format!("/api/v1/services/category/{category}"))).await;

    assert!(!field(&by_query, "name").is_empty());
    assert_eq!(by_query, by_path);
    assert!(
        by_path
            .as_array()
            .expect("service array")
            .iter()
            .all(|service| service["category"] == category)
    );
}

#[actix_web::test]
async fn blog_post_lookup_by_slug() {
    let app = init_app(seeded().await.state).await;

    let (status, post) = send(&app, get("/api/v1/blog/speed-up-slow-laptop")).await;
    assert_eq!(status, 200);
    assert_eq!(post["publishedAt"], "2022-12-18T00:00:00Z");

    let (status, _) = send(&app, get("/api/v1/blog/no-such-post")).await;
    assert_eq!(status, 404);
}

fn register(username: &str, email: &str) -> actix_http::Request {
    actix_test::TestRequest::post()
        .uri("/api/v1/users")
        .set_json(json!({
            "username": username,
            "password": "hunter2hunter2",
            "fullName": "Sam Lee",
            "email": email
        }))
        .to_request()
}

#[actix_web::test]
async fn duplicate_registration_conflicts() {
    let app = init_app(harness(Arc::new(RandomTrackingCodes)).state).await;

    let (status, user) = send(&app, register("samlee", "sam@example.com")).await;
    assert_eq!(status, 201);
    assert!(user.get("password").is_none());

    let (status, error) = send(&app, register("samlee", "other@example.com")).await;
    assert_eq!(status, 409);
    assert_eq!(error["code"], "conflict");

    let (status, error) = send(&app, register("samuel", "SAM@example.com")).await;
    assert_eq!(status, 409);
    assert_eq!(error["details"]["field"], "email");
}

#[actix_web::test]
async fn signed_in_customer_sees_own_repairs() {
    let app = init_app(harness(Arc::new(RandomTrackingCodes)).state).await;
    let (_, user) = send(&app, register("samlee", "sam@example.com")).await;
    let user_id = user["id"].clone();

    for owner in [Some(user_id.clone()), None] {
        let mut body = json!({
            "deviceType": "console",
            "deviceModel": "Switch",
            "issueDescription": "Joy-Con drift",
            "customerName": "Sam Lee",
            "customerEmail": "sam@example.com"
        });
        if let Some(owner) = owner {
            body["userId"] = owner;
        }
        let req = actix_test::TestRequest::post()
            .uri("/api/v1/repairs")
            .set_json(body)
            .to_request();
        let (status, _) = send(&app, req).await;
        assert_eq!(status, 201);
    }

    let (_, mine) = send(&app, get(&format!("/api/v1/repairs?userId={user_id}"))).await;
    let (_, all) = send(&app, get("/api/v1/repairs")).await;
    assert_eq!(mine.as_array().map(Vec::len), Some(1));
    assert_eq!(mine[0]["userId"], user_id);
    assert_eq!(all.as_array().map(Vec::len), Some(2));
}

#[actix_web::test]
async fn contact_message_is_stored() {
    let backend = harness(Arc::new(RandomTrackingCodes));
    let store = backend.store.clone();
    let app = init_app(backend.state).await;

    let req = actix_test::TestRequest::post()
        .uri("/api/v1/contact")
        .set_json(json!({
            "name": "Sam Lee",
            "email": "sam@example.com",
            "subject": "Warranty",
            "message": "Is the screen covered?"
        }))
        .to_request();
    let (status, body) = send(&app, req).await;

    assert_eq!(status, 201);
    assert_eq!(body, json!({"message": "Contact message sent successfully"}));
    assert_eq!(store.contact_messages().len(), 1);
}
