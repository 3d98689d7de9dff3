//! Restaurant Repository

use super::{RepoError, RepoResult};
use shared::models::{
    RESTAURANTS_PER_PAGE, RatingStats, Restaurant, RestaurantCreate, RestaurantDetail,
    RestaurantPage, RestaurantQuery, RestaurantSummary, RestaurantUpdate, round_rating,
};
use sqlx::SqlitePool;

const RESTAURANT_SELECT: &str = "SELECT id, name, description, category_id, address, phone_number, opening_time, closing_time, regular_holiday, image_url, website_url, created_at, updated_at FROM restaurant";

// Approved reviews only
const RATING_COLUMNS: &str = "(SELECT AVG(rv.rating) FROM review rv WHERE rv.restaurant_id = r.id AND rv.is_approved = 1) AS mean_rating, (SELECT COUNT(*) FROM review rv WHERE rv.restaurant_id = r.id AND rv.is_approved = 1) AS review_count";

// ?1 keyword pattern (or NULL), ?2 category id (or NULL)
const LISTING_FILTER: &str = "FROM restaurant r JOIN category c ON c.id = r.category_id WHERE (?1 IS NULL OR r.name LIKE ?1 ESCAPE '\\' OR r.description LIKE ?1 ESCAPE '\\' OR r.address LIKE ?1 ESCAPE '\\') AND (?2 IS NULL OR r.category_id = ?2)";

#[derive(sqlx::FromRow)]
struct SummaryRow {
    id: i64,
    name: String,
    description: String,
    category_id: i64,
    category_name: String,
    address: String,
    opening_time: String,
    closing_time: String,
    image_url: Option<String>,
    mean_rating: Option<f64>,
    review_count: i64,
}

impl From<SummaryRow> for RestaurantSummary {
    fn from(row: SummaryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            category_id: row.category_id,
            category_name: row.category_name,
            address: row.address,
            opening_time: row.opening_time,
            closing_time: row.closing_time,
            image_url: row.image_url,
            average_rating: round_rating(row.mean_rating),
            review_count: row.review_count,
        }
    }
}

pub async fn find_by_id(pool: &SqlitePool, id: i64) -> RepoResult<Option<Restaurant>> {
    let sql = format!("{RESTAURANT_SELECT} WHERE id = ?");
    let row = sqlx::query_as::<_, Restaurant>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(row)
}

pub async fn exists(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM restaurant WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(found.is_some())
}

/// Count and mean of approved review ratings
pub async fn rating_stats(pool: &SqlitePool, id: i64) -> RepoResult<RatingStats> {
    let (count, mean): (i64, Option<f64>) = sqlx::query_as(
        "SELECT COUNT(*), AVG(rating) FROM review WHERE restaurant_id = ? AND is_approved = 1",
    )
    .bind(id)
    .fetch_one(pool)
    .await?;
    Ok(RatingStats { count, mean })
}

/// Restaurant with category name, rating aggregate and bookable slots
pub async fn find_detail(pool: &SqlitePool, id: i64) -> RepoResult<Option<RestaurantDetail>> {
    let Some(restaurant) = find_by_id(pool, id).await? else {
        return Ok(None);
    };
    let category_name: String = sqlx::query_scalar("SELECT name FROM category WHERE id = ?")
        .bind(restaurant.category_id)
        .fetch_one(pool)
        .await?;
    let ratings = rating_stats(pool, id).await?;
    Ok(Some(RestaurantDetail::new(restaurant, category_name, ratings)))
}

/// Substring `LIKE` pattern with the keyword's wildcards escaped
fn contains_pattern(keyword: &str) -> String {
    let mut pattern = String::with_capacity(keyword.len() + 2);
    pattern.push('%');
    for c in keyword.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

/// One page of the listing, newest first
pub async fn list(pool: &SqlitePool, query: &RestaurantQuery) -> RepoResult<RestaurantPage> {
    let pattern = query.keyword().map(contains_pattern);

    let total: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) {LISTING_FILTER}"))
        .bind(&pattern)
        .bind(query.category_id)
        .fetch_one(pool)
        .await?;

    let sql = format!(
        "SELECT r.id, r.name, r.description, r.category_id, c.name AS category_name, r.address, r.opening_time, r.closing_time, r.image_url, {RATING_COLUMNS} {LISTING_FILTER} ORDER BY r.created_at DESC, r.id DESC LIMIT ?3 OFFSET ?4"
    );
    let rows = sqlx::query_as::<_, SummaryRow>(&sql)
        .bind(&pattern)
        .bind(query.category_id)
        .bind(RESTAURANTS_PER_PAGE)
        .bind(query.offset())
        .fetch_all(pool)
        .await?;

    Ok(RestaurantPage::new(
        rows.into_iter().map(RestaurantSummary::from).collect(),
        query.page(),
        total,
    ))
}

pub async fn create(pool: &SqlitePool, data: RestaurantCreate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let id = shared::util::snowflake_id();
    sqlx::query(
        "INSERT INTO restaurant (id, name, description, category_id, address, phone_number, opening_time, closing_time, regular_holiday, image_url, website_url, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?12)",
    )
    .bind(id)
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.category_id)
    .bind(&data.address)
    .bind(&data.phone_number)
    .bind(&data.opening_time)
    .bind(&data.closing_time)
    .bind(&data.regular_holiday)
    .bind(&data.image_url)
    .bind(&data.website_url)
    .bind(now)
    .execute(pool)
    .await?;
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::Database("Failed to create restaurant".into()))
}

pub async fn update(pool: &SqlitePool, id: i64, data: RestaurantUpdate) -> RepoResult<Restaurant> {
    let now = shared::util::now_millis();
    let rows = sqlx::query(
        "UPDATE restaurant SET name = COALESCE(?1, name), description = COALESCE(?2, description), category_id = COALESCE(?3, category_id), address = COALESCE(?4, address), phone_number = COALESCE(?5, phone_number), opening_time = COALESCE(?6, opening_time), closing_time = COALESCE(?7, closing_time), regular_holiday = COALESCE(?8, regular_holiday), image_url = COALESCE(?9, image_url), website_url = COALESCE(?10, website_url), updated_at = ?11 WHERE id = ?12",
    )
    .bind(&data.name)
    .bind(&data.description)
    .bind(data.category_id)
    .bind(&data.address)
    .bind(&data.phone_number)
    .bind(&data.opening_time)
    .bind(&data.closing_time)
    .bind(&data.regular_holiday)
    .bind(&data.image_url)
    .bind(&data.website_url)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;
    if rows.rows_affected() == 0 {
        return Err(RepoError::NotFound(format!("Restaurant {id} not found")));
    }
    find_by_id(pool, id)
        .await?
        .ok_or_else(|| RepoError::NotFound(format!("Restaurant {id} not found")))
}

/// Delete a restaurant with its reviews, reservations and favorites
pub async fn delete(pool: &SqlitePool, id: i64) -> RepoResult<bool> {
    let rows = sqlx::query("DELETE FROM restaurant WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(rows.rows_affected() > 0)
}
