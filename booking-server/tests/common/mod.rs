//! Helpers for driving the full router in-process

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use chrono::{NaiveDate, NaiveDateTime};
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use sqlx::SqlitePool;
use tower::ServiceExt;

use booking_server::auth::JwtConfig;
use booking_server::db::DbService;
use booking_server::db::repository::{category, restaurant, user};
use booking_server::utils::time::FixedClock;
use booking_server::{Config, ServerState, routes};
use shared::models::{CategoryCreate, Restaurant, RestaurantCreate};

pub const TEST_SECRET: &str = "test-secret-that-is-at-least-32-characters";

/// Saturday 2024-06-01, 10:00 in the business time zone
pub fn default_now() -> NaiveDateTime {
    at(2024, 6, 1, 10, 0)
}

pub fn at(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(hh, mm, 0)
        .unwrap()
}

pub struct TestApp {
    pub app: Router,
    pub pool: SqlitePool,
}

pub struct Response {
    pub status: StatusCode,
    pub body: Value,
}

impl Response {
    /// Error code from an `ApiResponse` error body
    pub fn code(&self) -> Option<u64> {
        self.body["code"].as_u64()
    }

    pub fn field(&self) -> Option<&str> {
        self.body["details"]["field"].as_str()
    }
}

impl TestApp {
    pub async fn new() -> Self {
        Self::at(default_now()).await
    }

    /// App whose clock is frozen at `now`
    pub async fn at(now: NaiveDateTime) -> Self {
        let db = DbService::in_memory().await.unwrap();
        let config = Config::for_work_dir("./target/test-data", JwtConfig::with_secret(TEST_SECRET));
        let state = ServerState::new(config, db.pool.clone(), Arc::new(FixedClock(now)));
        Self {
            app: routes::build_app(state),
            pool: db.pool,
        }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> Response {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        Response { status, body }
    }

    pub async fn get(&self, uri: &str, token: Option<&str>) -> Response {
        self.request(Method::GET, uri, token, None).await
    }

    pub async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> Response {
        self.request(Method::POST, uri, token, Some(body)).await
    }

    /// Register a guest and return its token
    pub async fn register(&self, email: &str) -> String {
        let res = self
            .post(
                "/api/auth/register",
                None,
                json!({
                    "email": email,
                    "password": "correct-horse",
                    "first_name": "Hanako",
                    "last_name": "Sato"
                }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK, "register failed: {}", res.body);
        res.body["token"].as_str().unwrap().to_string()
    }

    /// Register, promote to staff, and log in again for a staff token
    pub async fn staff_token(&self, email: &str) -> String {
        self.register(email).await;
        let account = user::find_by_email(&self.pool, email).await.unwrap().unwrap();
        user::set_staff(&self.pool, account.id, true).await.unwrap();

        let res = self
            .post(
                "/api/auth/login",
                None,
                json!({ "email": email, "password": "correct-horse" }),
            )
            .await;
        assert_eq!(res.status, StatusCode::OK);
        res.body["token"].as_str().unwrap().to_string()
    }

    /// Insert a restaurant directly through the repository
    pub async fn seed_restaurant(&self, name: &str) -> Restaurant {
        let cat = match category::find_by_name(&self.pool, "Sushi").await.unwrap() {
            Some(c) => c,
            None => category::create(
                &self.pool,
                CategoryCreate {
                    name: "Sushi".into(),
                },
            )
            .await
            .unwrap(),
        };
        restaurant::create(
            &self.pool,
            RestaurantCreate {
                name: name.into(),
                description: "Counter seats, omakase only".into(),
                category_id: cat.id,
                address: "1-2-3 Ginza, Chuo-ku".into(),
                phone_number: "03-0000-0000".into(),
                opening_time: "17:30".into(),
                closing_time: "23:00".into(),
                regular_holiday: "Mondays".into(),
                image_url: None,
                website_url: None,
            },
        )
        .await
        .unwrap()
    }
}
