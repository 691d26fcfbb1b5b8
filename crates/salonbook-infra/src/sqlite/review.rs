//! SQLite review repository implementation.
//!
//! The UNIQUE (customer_id, salon_id) constraint backs the one-review-per-
//! pair rule; upsert rides on `ON CONFLICT DO UPDATE` so the original row id
//! survives a repost.

use sqlx::Row;

use salonbook_core::repository::review::ReviewRepository;
use salonbook_types::error::RepositoryError;
use salonbook_types::review::Review;
use salonbook_types::salon::SalonId;
use salonbook_types::user::UserId;

use super::pool::DatabasePool;
use super::{format_datetime, parse_datetime, query_err};

/// SQLite-backed implementation of `ReviewRepository`.
pub struct SqliteReviewRepository {
    pool: DatabasePool,
}

impl SqliteReviewRepository {
    pub fn new(pool: DatabasePool) -> Self {
        Self { pool }
    }
}

fn row_to_review(row: &sqlx::sqlite::SqliteRow) -> Result<Review, RepositoryError> {
    let id: String = row.try_get("id").map_err(query_err)?;
    let customer_id: String = row.try_get("customer_id").map_err(query_err)?;
    let salon_id: String = row.try_get("salon_id").map_err(query_err)?;
    let posted_at: String = row.try_get("posted_at").map_err(query_err)?;

    Ok(Review {
        id: id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid review id: {e}")))?,
        customer_id: customer_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid customer id: {e}")))?,
        salon_id: salon_id
            .parse()
            .map_err(|e| RepositoryError::Query(format!("invalid salon id: {e}")))?,
        rating: row.try_get("rating").map_err(query_err)?,
        comment: row.try_get("comment").map_err(query_err)?,
        posted_at: parse_datetime(&posted_at)?,
    })
}

impl ReviewRepository for SqliteReviewRepository {
    async fn upsert(&self, review: &Review) -> Result<Review, RepositoryError> {
        sqlx::query(
            "INSERT INTO reviews (id, customer_id, salon_id, rating, comment, posted_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (customer_id, salon_id)
             DO UPDATE SET rating = excluded.rating, comment = excluded.comment, posted_at = excluded.posted_at",
        )
        .bind(review.id.to_string())
        .bind(review.customer_id.to_string())
        .bind(review.salon_id.to_string())
        .bind(review.rating)
        .bind(&review.comment)
        .bind(format_datetime(&review.posted_at))
        .execute(&self.pool.writer)
        .await
        .map_err(query_err)?;

        // Re-read so a repost returns the surviving row id
        self.find_by_pair(&review.customer_id, &review.salon_id)
            .await?
            .ok_or(RepositoryError::NotFound)
    }

    async fn find_by_pair(
        &self,
        customer_id: &UserId,
        salon_id: &SalonId,
    ) -> Result<Option<Review>, RepositoryError> {
        let row = sqlx::query("SELECT * FROM reviews WHERE customer_id = ? AND salon_id = ?")
            .bind(customer_id.to_string())
            .bind(salon_id.to_string())
            .fetch_optional(&self.pool.reader)
            .await
            .map_err(query_err)?;

        row.as_ref().map(row_to_review).transpose()
    }

    async fn list_for_salon(&self, salon_id: &SalonId) -> Result<Vec<Review>, RepositoryError> {
        let rows = sqlx::query("SELECT * FROM reviews WHERE salon_id = ? ORDER BY posted_at DESC")
            .bind(salon_id.to_string())
            .fetch_all(&self.pool.reader)
            .await
            .map_err(query_err)?;

        rows.iter().map(row_to_review).collect()
    }

    async fn average_rating(&self, salon_id: &SalonId) -> Result<f64, RepositoryError> {
        let row: (Option<f64>,) =
            sqlx::query_as("SELECT AVG(rating) FROM reviews WHERE salon_id = ?")
                .bind(salon_id.to_string())
                .fetch_one(&self.pool.reader)
                .await
                .map_err(query_err)?;

        Ok(row.0.unwrap_or(0.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::pool::testing::test_pool;
    use crate::sqlite::salon::SqliteSalonRepository;
    use chrono::Utc;
    use salonbook_core::repository::salon::SalonRepository;
    use salonbook_types::review::ReviewId;
    use salonbook_types::salon::Salon;

    async fn seeded_salon(pool: &DatabasePool) -> SalonId {
        let now = Utc::now();
        let salon = Salon {
            id: SalonId::new(),
            owner_id: UserId::new(),
            name: "Test Salon".to_string(),
            description: None,
            location: "1 Main St".to_string(),
            phone: None,
            opening_time: None,
            closing_time: None,
            weekly_closing: None,
            created_at: now,
            updated_at: now,
        };
        SqliteSalonRepository::new(pool.clone())
            .create(&salon)
            .await
            .unwrap();
        salon.id
    }

    fn make_review(customer_id: UserId, salon_id: SalonId, rating: i32) -> Review {
        Review {
            id: ReviewId::new(),
            customer_id,
            salon_id,
            rating,
            comment: Some("solid".to_string()),
            posted_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_upsert_replaces_by_pair() {
        let pool = test_pool().await;
        let salon_id = seeded_salon(&pool).await;
        let repo = SqliteReviewRepository::new(pool);
        let customer = UserId::new();

        let first = repo
            .upsert(&make_review(customer, salon_id, 2))
            .await
            .unwrap();
        let second = repo
            .upsert(&make_review(customer, salon_id, 5))
            .await
            .unwrap();

        assert_eq!(second.id, first.id);
        assert_eq!(second.rating, 5);

        let all = repo.list_for_salon(&salon_id).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn test_average_rating() {
        let pool = test_pool().await;
        let salon_id = seeded_salon(&pool).await;
        let repo = SqliteReviewRepository::new(pool);

        assert_eq!(repo.average_rating(&salon_id).await.unwrap(), 0.0);

        repo.upsert(&make_review(UserId::new(), salon_id, 4)).await.unwrap();
        repo.upsert(&make_review(UserId::new(), salon_id, 5)).await.unwrap();

        assert_eq!(repo.average_rating(&salon_id).await.unwrap(), 4.5);
    }

    #[tokio::test]
    async fn test_list_newest_first() {
        let pool = test_pool().await;
        let salon_id = seeded_salon(&pool).await;
        let repo = SqliteReviewRepository::new(pool);

        let mut old = make_review(UserId::new(), salon_id, 3);
        old.posted_at = Utc::now() - chrono::Duration::days(2);
        repo.upsert(&old).await.unwrap();
        let fresh = repo
            .upsert(&make_review(UserId::new(), salon_id, 4))
            .await
            .unwrap();

        let all = repo.list_for_salon(&salon_id).await.unwrap();
        assert_eq!(all[0].id, fresh.id);
    }
}
