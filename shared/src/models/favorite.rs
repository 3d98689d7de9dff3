//! Favorite Model

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Favorite {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub created_at: i64,
}

/// Favorite joined with the restaurant it points to
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct FavoriteRestaurant {
    pub id: i64,
    pub restaurant_id: i64,
    pub restaurant_name: String,
    pub category_name: String,
    pub address: String,
    pub image_url: Option<String>,
    pub created_at: i64,
}

/// Result of a favorite toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoriteToggle {
    pub is_favorite: bool,
}

/// My-page bundle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MyPage {
    pub user: super::UserInfo,
    pub favorite_restaurants: Vec<FavoriteRestaurant>,
    pub upcoming_reservations: Vec<super::ReservationWithRestaurant>,
}
