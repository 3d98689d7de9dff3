mod common;

use common::TestApp;
use http::{Method, StatusCode};
use serde_json::json;

fn restaurant_body(name: &str, category_id: i64) -> serde_json::Value {
    json!({
        "name": name,
        "description": "Wood-fired pizza",
        "category_id": category_id,
        "address": "4-5-6 Shibuya",
        "phone_number": "03-1111-2222",
        "opening_time": "11:00",
        "closing_time": "22:00",
        "regular_holiday": "Tuesdays"
    })
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;

    let res = app.get("/health", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["status"], "healthy");

    let res = app.get("/health/detailed", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["checks"]["database"]["status"], "ok");
    assert_eq!(res.body["timezone"], "Asia/Tokyo");
}

#[tokio::test]
async fn test_catalog_reads_are_public() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;

    let list = app.get("/api/restaurants", None).await;
    assert_eq!(list.status, StatusCode::OK);
    assert_eq!(list.body["total"], 1);
    assert_eq!(list.body["per_page"], 12);
    assert_eq!(list.body["items"][0]["category_name"], "Sushi");
    assert_eq!(list.body["items"][0]["average_rating"], 0.0);

    let detail = app
        .get(&format!("/api/restaurants/{}", restaurant.id), None)
        .await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["name"], "Sushi Kanda");
    assert_eq!(detail.body["time_slots"].as_array().unwrap().len(), 7);

    let categories = app.get("/api/categories", None).await;
    assert_eq!(categories.status, StatusCode::OK);
    assert_eq!(categories.body[0]["name"], "Sushi");

    let missing = app.get("/api/restaurants/1", None).await;
    assert_eq!(missing.code(), Some(5001));
}

#[tokio::test]
async fn test_listing_filters() {
    let app = TestApp::new().await;
    app.seed_restaurant("Sushi Kanda").await;
    app.seed_restaurant("Sushi Ginza").await;
    let other = app.seed_restaurant("Tempura Asakusa").await;

    let res = app.get("/api/restaurants?q=ginza", None).await;
    // Every seeded address is in Ginza
    assert_eq!(res.body["total"], 3);

    let res = app.get("/api/restaurants?q=Tempura", None).await;
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["items"][0]["id"].as_i64(), Some(other.id));

    let res = app
        .get(
            &format!("/api/restaurants?category_id={}", other.category_id),
            None,
        )
        .await;
    assert_eq!(res.body["total"], 3);

    let res = app.get("/api/restaurants?category_id=1", None).await;
    assert_eq!(res.body["total"], 0);
}

#[tokio::test]
async fn test_listing_edge_queries() {
    let app = TestApp::new().await;
    app.seed_restaurant("Sushi Kanda").await;

    let res = app
        .get("/api/restaurants?page=9223372036854775807", None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 1);
    assert_eq!(res.body["items"].as_array().unwrap().len(), 0);

    // `%` and `_` match literally
    let res = app.get("/api/restaurants?q=%25", None).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["total"], 0);
    let res = app.get("/api/restaurants?q=_", None).await;
    assert_eq!(res.body["total"], 0);
}

#[tokio::test]
async fn test_catalog_writes_need_staff() {
    let app = TestApp::new().await;
    let guest = app.register("guest@example.com").await;

    let res = app
        .post("/api/categories", None, json!({ "name": "Italian" }))
        .await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);

    let res = app
        .post("/api/categories", Some(&guest), json!({ "name": "Italian" }))
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);
    assert_eq!(res.code(), Some(2002));

    let staff = app.staff_token("staff@example.com").await;
    let res = app
        .post("/api/categories", Some(&staff), json!({ "name": "Italian" }))
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let category_id = res.body["id"].as_i64().unwrap();

    let dup = app
        .post("/api/categories", Some(&staff), json!({ "name": "Italian" }))
        .await;
    assert_eq!(dup.status, StatusCode::CONFLICT);
    assert_eq!(dup.code(), Some(5102));

    let res = app
        .post(
            "/api/restaurants",
            Some(&guest),
            restaurant_body("Trattoria", category_id),
        )
        .await;
    assert_eq!(res.status, StatusCode::FORBIDDEN);

    let res = app
        .post(
            "/api/restaurants",
            Some(&staff),
            restaurant_body("Trattoria", category_id),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK, "{}", res.body);
    let restaurant_id = res.body["id"].as_i64().unwrap();

    let res = app
        .request(
            Method::PUT,
            &format!("/api/restaurants/{restaurant_id}"),
            Some(&staff),
            Some(json!({ "name": "Trattoria Roma", "opening_time": "11:30" })),
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.body["name"], "Trattoria Roma");
    assert_eq!(res.body["opening_time"], "11:30");
    assert_eq!(res.body["address"], "4-5-6 Shibuya");

    let res = app
        .request(
            Method::DELETE,
            &format!("/api/categories/{category_id}"),
            Some(&staff),
            None,
        )
        .await;
    assert_eq!(res.status, StatusCode::OK);

    // Restaurant went with its category
    let res = app
        .get(&format!("/api/restaurants/{restaurant_id}"), None)
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_restaurant_input_checks() {
    let app = TestApp::new().await;
    let staff = app.staff_token("staff@example.com").await;

    let res = app
        .post("/api/restaurants", Some(&staff), restaurant_body("Nowhere", 99))
        .await;
    assert_eq!(res.code(), Some(5101));

    let seeded = app.seed_restaurant("Sushi Kanda").await;
    let mut body = restaurant_body("", seeded.category_id);
    let res = app.post("/api/restaurants", Some(&staff), body.clone()).await;
    assert_eq!(res.code(), Some(7));
    assert_eq!(res.field(), Some("name"));

    body["name"] = json!("Late Night");
    body["opening_time"] = json!("25:00");
    let res = app.post("/api/restaurants", Some(&staff), body).await;
    assert_eq!(res.code(), Some(6));
    assert_eq!(res.field(), Some("opening_time"));
}

#[tokio::test]
async fn test_review_lifecycle() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let author = app.register("author@example.com").await;
    let other = app.register("other@example.com").await;
    let uri = format!("/api/restaurants/{}/reviews", restaurant.id);

    let anon = app
        .post(&uri, None, json!({ "rating": 4, "comment": "Lovely counter seats" }))
        .await;
    assert_eq!(anon.status, StatusCode::UNAUTHORIZED);

    let bad_rating = app
        .post(&uri, Some(&author), json!({ "rating": 6, "comment": "Lovely counter seats" }))
        .await;
    assert_eq!(bad_rating.code(), Some(6003));

    let short = app
        .post(&uri, Some(&author), json!({ "rating": 4, "comment": "   good    " }))
        .await;
    assert_eq!(short.code(), Some(6004));

    let created = app
        .post(&uri, Some(&author), json!({ "rating": 4, "comment": "  Lovely counter seats  " }))
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    assert_eq!(created.body["comment"], "Lovely counter seats");
    let review_id = created.body["id"].as_i64().unwrap();

    let second = app
        .post(&uri, Some(&author), json!({ "rating": 5, "comment": "Even better the second time" }))
        .await;
    assert_eq!(second.status, StatusCode::CONFLICT);
    assert_eq!(second.code(), Some(6002));

    app.post(&uri, Some(&other), json!({ "rating": 3, "comment": "A bit pricey for lunch" }))
        .await;

    let listed = app.get(&uri, None).await;
    assert_eq!(listed.status, StatusCode::OK);
    let reviews = listed.body.as_array().unwrap();
    assert_eq!(reviews.len(), 2);
    assert!(reviews.iter().all(|r| r["author_name"] == "Sato Hanako"));

    let detail = app
        .get(&format!("/api/restaurants/{}", restaurant.id), None)
        .await;
    assert_eq!(detail.body["average_rating"], 3.5);
    assert_eq!(detail.body["review_count"], 2);

    let review_uri = format!("/api/reviews/{review_id}");
    let hijack = app
        .request(Method::PUT, &review_uri, Some(&other), Some(json!({ "rating": 1 })))
        .await;
    assert_eq!(hijack.status, StatusCode::FORBIDDEN);
    assert_eq!(hijack.code(), Some(2001));

    let edited = app
        .request(Method::PUT, &review_uri, Some(&author), Some(json!({ "rating": 5 })))
        .await;
    assert_eq!(edited.status, StatusCode::OK);
    assert_eq!(edited.body["rating"], 5);
    assert_eq!(edited.body["comment"], "Lovely counter seats");

    let deleted = app
        .request(Method::DELETE, &review_uri, Some(&author), None)
        .await;
    assert_eq!(deleted.status, StatusCode::OK);

    let gone = app
        .request(Method::DELETE, &review_uri, Some(&author), None)
        .await;
    assert_eq!(gone.code(), Some(6001));
}

#[tokio::test]
async fn test_favorite_toggle() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let token = app.register("guest@example.com").await;
    let uri = format!("/api/restaurants/{}/favorite", restaurant.id);

    let status = app.get(&uri, Some(&token)).await;
    assert_eq!(status.body["is_favorite"], false);

    let on = app.post(&uri, Some(&token), json!({})).await;
    assert_eq!(on.body["is_favorite"], true);

    let list = app.get("/api/favorites", Some(&token)).await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
    assert_eq!(list.body[0]["restaurant_id"].as_i64(), Some(restaurant.id));

    let off = app.post(&uri, Some(&token), json!({})).await;
    assert_eq!(off.body["is_favorite"], false);

    let list = app.get("/api/favorites", Some(&token)).await;
    assert_eq!(list.body.as_array().unwrap().len(), 0);

    // Status lookup sits under the public prefix but still needs a token
    let anon = app.get(&uri, None).await;
    assert_eq!(anon.status, StatusCode::UNAUTHORIZED);

    let missing = app
        .post("/api/restaurants/1/favorite", Some(&token), json!({}))
        .await;
    assert_eq!(missing.code(), Some(5001));
}

#[tokio::test]
async fn test_registration_rules() {
    let app = TestApp::new().await;
    app.register("taken@example.com").await;

    let dup = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": " TAKEN@example.com ", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(dup.status, StatusCode::CONFLICT);
    assert_eq!(dup.code(), Some(3002));

    let short = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "new@example.com", "password": "short" }),
        )
        .await;
    assert_eq!(short.code(), Some(3003));
    assert_eq!(short.field(), Some("password"));

    let bad_email = app
        .post(
            "/api/auth/register",
            None,
            json!({ "email": "not-an-email", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(bad_email.code(), Some(6));
    assert_eq!(bad_email.field(), Some("email"));
}

#[tokio::test]
async fn test_login_failures_are_uniform() {
    let app = TestApp::new().await;
    app.register("guest@example.com").await;

    let wrong_password = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "guest@example.com", "password": "wrong-horse" }),
        )
        .await;
    let unknown = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "nobody@example.com", "password": "correct-horse" }),
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.code(), Some(1002));
    assert_eq!(wrong_password.body, unknown.body);
}

#[tokio::test]
async fn test_disabled_account_cannot_log_in() {
    let app = TestApp::new().await;
    app.register("guest@example.com").await;
    let account = booking_server::db::repository::user::find_by_email(&app.pool, "guest@example.com")
        .await
        .unwrap()
        .unwrap();
    booking_server::db::repository::user::set_active(&app.pool, account.id, false)
        .await
        .unwrap();

    let res = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "guest@example.com", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(res.code(), Some(1007));
}

#[tokio::test]
async fn test_profile_and_password_change() {
    let app = TestApp::new().await;
    let token = app.register("guest@example.com").await;

    let me = app.get("/api/auth/me", Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.body["is_staff"], false);

    let updated = app
        .request(
            Method::PUT,
            "/api/account/profile",
            Some(&token),
            Some(json!({ "postal_code": "100-0001", "address": "Chiyoda" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    assert_eq!(updated.body["postal_code"], "100-0001");
    assert_eq!(updated.body["first_name"], "Hanako");

    let too_long = app
        .request(
            Method::PUT,
            "/api/account/profile",
            Some(&token),
            Some(json!({ "postal_code": "100-00011" })),
        )
        .await;
    assert_eq!(too_long.code(), Some(8));

    let mismatch = app
        .post(
            "/api/account/password",
            Some(&token),
            json!({ "old_password": "wrong-horse", "new_password": "battery-staple" }),
        )
        .await;
    assert_eq!(mismatch.code(), Some(3004));

    let changed = app
        .post(
            "/api/account/password",
            Some(&token),
            json!({ "old_password": "correct-horse", "new_password": "battery-staple" }),
        )
        .await;
    assert_eq!(changed.status, StatusCode::OK);
    assert!(changed.body["token"].is_string());

    let login = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "guest@example.com", "password": "battery-staple" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
}
