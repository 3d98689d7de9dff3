mod common;

use common::{TestApp, at};
use http::{Method, StatusCode};
use serde_json::json;

fn booking(date: &str, time: &str, people: i64) -> serde_json::Value {
    json!({
        "reservation_date": date,
        "reservation_time": time,
        "number_of_people": people
    })
}

#[tokio::test]
async fn test_register_login_book_list_cancel() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    app.register("guest@example.com").await;

    let login = app
        .post(
            "/api/auth/login",
            None,
            json!({ "email": "Guest@Example.com", "password": "correct-horse" }),
        )
        .await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.body["user"]["email"], "guest@example.com");
    assert_eq!(login.body["user"]["display_name"], "Sato Hanako");
    let token = login.body["token"].as_str().unwrap().to_string();

    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);
    let created = app
        .post(&uri, Some(&token), booking("2024-06-02", "19:00", 4))
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    assert_eq!(created.body["status"], "confirmed");
    assert_eq!(created.body["reservation_date"], "2024-06-02");
    assert_eq!(created.body["reservation_time"], "19:00");
    assert_eq!(created.body["number_of_people"], 4);
    let id = created.body["id"].as_i64().unwrap();

    let list = app.get("/api/reservations", Some(&token)).await;
    assert_eq!(list.status, StatusCode::OK);
    let items = list.body.as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["restaurant_name"], "Sushi Kanda");

    let detail = app.get(&format!("/api/reservations/{id}"), Some(&token)).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["id"].as_i64(), Some(id));

    let cancel_uri = format!("/api/reservations/{id}/cancel");
    let cancelled = app.post(&cancel_uri, Some(&token), json!({})).await;
    assert_eq!(cancelled.status, StatusCode::OK);
    assert_eq!(cancelled.body["status"], "cancelled");

    let again = app.post(&cancel_uri, Some(&token), json!({})).await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.code(), Some(4002));
}

#[tokio::test]
async fn test_booking_requires_token() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;

    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);
    let res = app.post(&uri, None, booking("2024-06-02", "19:00", 2)).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.code(), Some(1001));

    let res = app.get("/api/reservations", Some("not-a-jwt")).await;
    assert_eq!(res.status, StatusCode::UNAUTHORIZED);
    assert_eq!(res.code(), Some(1004));
}

#[tokio::test]
async fn test_validation_errors_map_to_codes_and_fields() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let token = app.register("guest@example.com").await;
    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);

    // (body, code, field)
    let cases = [
        (json!({ "reservation_time": "19:00", "number_of_people": 2 }), 4101, "reservation_date"),
        (booking("2024-05-31", "19:00", 2), 4102, "reservation_date"),
        (booking("2024-08-31", "19:00", 2), 4103, "reservation_date"),
        (json!({ "reservation_date": "2024-06-02", "number_of_people": 2 }), 4201, "reservation_time"),
        (booking("2024-06-02", "7pm", 2), 4202, "reservation_time"),
        (booking("2024-06-02", "18:15", 2), 4202, "reservation_time"),
        (booking("2024-06-02", "17:30", 2), 4203, "reservation_time"),
        (booking("2024-06-02", "21:30", 2), 4204, "reservation_time"),
        (booking("2024-06-02", "19:00", 0), 4301, "number_of_people"),
        (booking("2024-06-02", "19:00", 11), 4301, "number_of_people"),
        (json!({ "reservation_date": "2024-06-02", "reservation_time": "19:00" }), 4301, "number_of_people"),
        (booking("06/02/2024", "19:00", 2), 6, "reservation_date"),
        (json!({ "reservation_date": "2024-06-02", "reservation_time": "19:00", "number_of_people": "abc" }), 6, "number_of_people"),
        (json!({ "reservation_date": "2024-06-02", "reservation_time": "19:00", "number_of_people": 2.5 }), 6, "number_of_people"),
        (json!({ "reservation_date": "2024-06-02", "reservation_time": "19:00", "number_of_people": "" }), 4301, "number_of_people"),
        (json!({ "reservation_date": "2024-06-02", "reservation_time": "19:00", "number_of_people": "12" }), 4301, "number_of_people"),
    ];

    for (body, code, field) in cases {
        let res = app.post(&uri, Some(&token), body.clone()).await;
        assert_eq!(res.status, StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(res.code(), Some(code), "{body}");
        assert_eq!(res.field(), Some(field), "{body}");
    }

    // Nothing was persisted
    let list = app.get("/api/reservations", Some(&token)).await;
    assert_eq!(list.body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_party_size_as_form_text() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let token = app.register("guest@example.com").await;
    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);

    let created = app
        .post(
            &uri,
            Some(&token),
            json!({
                "reservation_date": "2024-06-02",
                "reservation_time": "19:00",
                "number_of_people": " 3 "
            }),
        )
        .await;
    assert_eq!(created.status, StatusCode::OK, "{}", created.body);
    assert_eq!(created.body["number_of_people"], 3);
}

#[tokio::test]
async fn test_horizon_boundaries() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let token = app.register("guest@example.com").await;
    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);

    // 2024-06-01 + 90 days
    let last_day = app
        .post(&uri, Some(&token), booking("2024-08-30", "21:00", 10))
        .await;
    assert_eq!(last_day.status, StatusCode::OK, "{}", last_day.body);

    let too_far = app
        .post(&uri, Some(&token), booking("2024-08-31", "18:00", 1))
        .await;
    assert_eq!(too_far.code(), Some(4103));
}

#[tokio::test]
async fn test_same_day_elapsed_slot() {
    let app = TestApp::at(at(2024, 6, 1, 19, 10)).await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let token = app.register("guest@example.com").await;
    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);

    let elapsed = app
        .post(&uri, Some(&token), booking("2024-06-01", "19:00", 2))
        .await;
    assert_eq!(elapsed.code(), Some(4205));
    assert_eq!(elapsed.field(), Some("reservation_time"));

    let later_today = app
        .post(&uri, Some(&token), booking("2024-06-01", "19:30", 2))
        .await;
    assert_eq!(later_today.status, StatusCode::OK);
}

#[tokio::test]
async fn test_unknown_restaurant() {
    let app = TestApp::new().await;
    let token = app.register("guest@example.com").await;

    let res = app
        .post(
            "/api/restaurants/424242/reservations",
            Some(&token),
            booking("2024-06-02", "19:00", 2),
        )
        .await;
    assert_eq!(res.status, StatusCode::NOT_FOUND);
    assert_eq!(res.code(), Some(5001));
}

#[tokio::test]
async fn test_reservations_are_private() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let owner = app.register("owner@example.com").await;
    let other = app.register("other@example.com").await;

    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);
    let created = app
        .post(&uri, Some(&owner), booking("2024-06-03", "20:00", 2))
        .await;
    let id = created.body["id"].as_i64().unwrap();

    let peek = app.get(&format!("/api/reservations/{id}"), Some(&other)).await;
    assert_eq!(peek.status, StatusCode::FORBIDDEN);

    let cancel = app
        .post(&format!("/api/reservations/{id}/cancel"), Some(&other), json!({}))
        .await;
    assert_eq!(cancel.status, StatusCode::FORBIDDEN);

    let missing = app.get("/api/reservations/1", Some(&other)).await;
    assert_eq!(missing.code(), Some(4001));
}

#[tokio::test]
async fn test_mypage_shows_upcoming_and_favorites() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;
    let token = app.register("guest@example.com").await;

    let uri = format!("/api/restaurants/{}/reservations", restaurant.id);
    let kept = app
        .post(&uri, Some(&token), booking("2024-06-10", "18:30", 2))
        .await;
    let dropped = app
        .post(&uri, Some(&token), booking("2024-06-05", "18:30", 2))
        .await;
    let dropped_id = dropped.body["id"].as_i64().unwrap();
    app.post(
        &format!("/api/reservations/{dropped_id}/cancel"),
        Some(&token),
        json!({}),
    )
    .await;

    app.post(
        &format!("/api/restaurants/{}/favorite", restaurant.id),
        Some(&token),
        json!({}),
    )
    .await;

    let page = app.get("/api/account/mypage", Some(&token)).await;
    assert_eq!(page.status, StatusCode::OK);
    assert_eq!(page.body["user"]["email"], "guest@example.com");

    let upcoming = page.body["upcoming_reservations"].as_array().unwrap();
    assert_eq!(upcoming.len(), 1);
    assert_eq!(upcoming[0]["id"], kept.body["id"]);

    let favorites = page.body["favorite_restaurants"].as_array().unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0]["restaurant_name"], "Sushi Kanda");
}

#[tokio::test]
async fn test_booking_options() {
    let app = TestApp::new().await;
    let restaurant = app.seed_restaurant("Sushi Kanda").await;

    let res = app
        .get(&format!("/api/restaurants/{}/time-slots", restaurant.id), None)
        .await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(
        res.body["time_slots"],
        json!(["18:00", "18:30", "19:00", "19:30", "20:00", "20:30", "21:00"])
    );
    assert_eq!(res.body["earliest_date"], "2024-06-01");
    assert_eq!(res.body["latest_date"], "2024-08-30");
    assert_eq!(res.body["max_party_size"], 10);

    let missing = app.request(Method::GET, "/api/restaurants/1/time-slots", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
}
