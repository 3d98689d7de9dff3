//! Restaurant Model

use serde::{Deserialize, Serialize};

use crate::reservation::{TIME_SLOTS, TimeSlot};

/// Restaurants returned per listing page
pub const RESTAURANTS_PER_PAGE: i64 = 12;

/// Restaurant entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub address: String,
    pub phone_number: String,
    /// HH:MM
    pub opening_time: String,
    /// HH:MM
    pub closing_time: String,
    pub regular_holiday: String,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Listing row: restaurant joined with its category and review aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantSummary {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub category_id: i64,
    pub category_name: String,
    pub address: String,
    pub opening_time: String,
    pub closing_time: String,
    pub image_url: Option<String>,
    pub average_rating: f64,
    pub review_count: i64,
}

/// Detail view with the bookable slots
#[derive(Debug, Clone, Serialize)]
pub struct RestaurantDetail {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub category_name: String,
    pub average_rating: f64,
    pub review_count: i64,
    pub time_slots: &'static [TimeSlot],
}

impl RestaurantDetail {
    pub fn new(restaurant: Restaurant, category_name: String, ratings: RatingStats) -> Self {
        Self {
            restaurant,
            category_name,
            average_rating: ratings.average(),
            review_count: ratings.count,
            time_slots: &TIME_SLOTS,
        }
    }
}

/// Raw review aggregate for one restaurant
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RatingStats {
    pub count: i64,
    pub mean: Option<f64>,
}

impl RatingStats {
    /// Mean rating rounded to one decimal, 0.0 without reviews
    pub fn average(&self) -> f64 {
        round_rating(self.mean)
    }
}

/// Round an optional mean rating to one decimal place
pub fn round_rating(mean: Option<f64>) -> f64 {
    match mean {
        Some(m) if m.is_finite() => (m * 10.0).round() / 10.0,
        _ => 0.0,
    }
}

/// Listing query (`?page=&q=&category_id=`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantQuery {
    pub page: Option<i64>,
    pub q: Option<String>,
    pub category_id: Option<i64>,
}

impl RestaurantQuery {
    /// Highest page whose offset still fits in an `i64`
    pub const MAX_PAGE: i64 = i64::MAX / RESTAURANTS_PER_PAGE;

    /// 1-based page number, clamped to `1..=MAX_PAGE`
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).clamp(1, Self::MAX_PAGE)
    }

    pub fn offset(&self) -> i64 {
        (self.page() - 1) * RESTAURANTS_PER_PAGE
    }

    /// Trimmed keyword, `None` when blank
    pub fn keyword(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }
}

/// One page of the restaurant listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantPage {
    pub items: Vec<RestaurantSummary>,
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl RestaurantPage {
    pub fn new(items: Vec<RestaurantSummary>, page: i64, total: i64) -> Self {
        let total_pages = (total + RESTAURANTS_PER_PAGE - 1) / RESTAURANTS_PER_PAGE;
        Self {
            items,
            page,
            per_page: RESTAURANTS_PER_PAGE,
            total,
            total_pages,
        }
    }
}

/// Create restaurant payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RestaurantCreate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub category_id: i64,
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
    pub opening_time: String,
    pub closing_time: String,
    #[serde(default)]
    pub regular_holiday: String,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
}

/// Update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category_id: Option<i64>,
    pub address: Option<String>,
    pub phone_number: Option<String>,
    pub opening_time: Option<String>,
    pub closing_time: Option<String>,
    pub regular_holiday: Option<String>,
    pub image_url: Option<String>,
    pub website_url: Option<String>,
}
