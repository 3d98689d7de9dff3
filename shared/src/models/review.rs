//! Review Model

use serde::{Deserialize, Serialize};

pub const MIN_RATING: i64 = 1;
pub const MAX_RATING: i64 = 5;
pub const MIN_COMMENT_CHARS: usize = 10;
pub const MAX_COMMENT_CHARS: usize = 1000;

/// Review entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Review {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub rating: i64,
    pub comment: String,
    pub is_approved: bool,
    pub helpful_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Review with author name, for restaurant pages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReviewWithAuthor {
    pub id: i64,
    pub user_id: i64,
    pub restaurant_id: i64,
    pub author_name: String,
    pub rating: i64,
    pub comment: String,
    pub helpful_count: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Create/replace review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewInput {
    pub rating: i64,
    pub comment: String,
}

/// Partial review update
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    pub rating: Option<i64>,
    pub comment: Option<String>,
}

/// Five-star rendering of a rating, e.g. `★★★☆☆`
pub fn star_display(rating: i64) -> String {
    let filled = rating.clamp(0, MAX_RATING) as usize;
    let mut stars = "★".repeat(filled);
    stars.push_str(&"☆".repeat(MAX_RATING as usize - filled));
    stars
}
