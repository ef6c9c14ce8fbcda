//! Review gate: participant-only, at most one review per author and deal.
//!
//! The `UNIQUE (author_id, deal_id)` constraint is what guarantees a single
//! review. The existence check before the insert only turns the common
//! duplicate into a `Conflict` without touching the deal; two concurrent
//! requests that both pass it are still resolved by the constraint.

use escrow_core::access;
use escrow_core::entities::{AuthoredReview, Review};
use escrow_core::ids::PREFIX_REVIEW;
use escrow_core::responses::UserProfileResponse;
use escrow_core::validate::{require_non_empty, validate_rating};

use crate::error::DatabaseError;
use crate::helpers::{format_datetime, normalize_id, now, parse_datetime};
use crate::service::EscrowService;

const REVIEW_COLUMNS: &str = "r.id, r.user_id, r.author_id, r.comment, r.rating, r.deal_id, r.created_at";

fn row_to_review(row: &libsql::Row) -> Result<Review, DatabaseError> {
    let rating = row.get::<i64>(4)?;
    Ok(Review {
        id: row.get::<String>(0)?,
        user: row.get::<String>(1)?,
        author: row.get::<String>(2)?,
        comment: row.get::<String>(3)?,
        rating: u8::try_from(rating)
            .map_err(|e| DatabaseError::Query(format!("Invalid rating {rating}: {e}")))?,
        deal: row.get::<String>(5)?,
        created_at: parse_datetime(&row.get::<String>(6)?)?,
    })
}

fn conflict(author_id: &str, deal_id: &str) -> DatabaseError {
    DatabaseError::Conflict(format!(
        "author {author_id} already reviewed deal {deal_id}"
    ))
}

impl EscrowService {
    /// Leave a review of the counterparty in deal `deal_id`.
    ///
    /// The review's subject is the other participant: a buyer reviews the
    /// seller and vice versa.
    ///
    /// # Errors
    ///
    /// - `InvalidArgument` for a blank comment or a rating outside 1..=5
    /// - `Conflict` if `author_id` already reviewed this deal
    /// - `Forbidden` if the deal does not exist or `author_id` is not its
    ///   seller or buyer
    /// - a storage-kind error otherwise
    pub async fn create_review(
        &self,
        author_id: &str,
        deal_id: &str,
        comment: &str,
        rating: i64,
    ) -> Result<Review, DatabaseError> {
        require_non_empty("comment", comment)?;
        let rating = validate_rating(rating)?;
        let author_id = normalize_id(author_id);

        if self.find_review(&author_id, deal_id).await?.is_some() {
            return Err(conflict(&author_id, deal_id));
        }

        let deal = self
            .find_accessible_deal(&author_id, deal_id)
            .await?
            .ok_or_else(|| {
                DatabaseError::Forbidden(format!(
                    "user {author_id} is not a participant of deal {deal_id}"
                ))
            })?;
        let subject = access::counterparty(&deal, &author_id).ok_or_else(|| {
            DatabaseError::Forbidden(format!(
                "user {author_id} is not a participant of deal {deal_id}"
            ))
        })?;

        let now = now();
        let review = Review {
            id: self.db().generate_id(PREFIX_REVIEW).await?,
            user: subject.to_string(),
            author: author_id.clone(),
            comment: comment.to_string(),
            rating,
            deal: deal.id.clone(),
            created_at: now,
        };

        let inserted = self
            .db()
            .execute(
                "create_review",
                "INSERT INTO reviews (id, user_id, author_id, deal_id, comment, rating, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                libsql::params![
                    review.id.as_str(),
                    review.user.as_str(),
                    review.author.as_str(),
                    review.deal.as_str(),
                    review.comment.as_str(),
                    i64::from(review.rating),
                    format_datetime(&now)
                ],
            )
            .await;

        match inserted {
            Ok(_) => {
                tracing::info!(review_id = %review.id, deal_id, author_id = %review.author, "review created");
                Ok(review)
            }
            Err(e) if e.is_unique_violation() => {
                tracing::warn!(deal_id, author_id = %review.author, "concurrent duplicate review rejected by constraint");
                Err(conflict(&review.author, deal_id))
            }
            Err(e) => Err(e),
        }
    }

    /// The review `author_id` left on `deal_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn find_review(
        &self,
        author_id: &str,
        deal_id: &str,
    ) -> Result<Option<Review>, DatabaseError> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS} FROM reviews r WHERE r.author_id = ?1 AND r.deal_id = ?2"
        );
        self.db()
            .query_opt(
                "find_review",
                &sql,
                libsql::params![normalize_id(author_id), normalize_id(deal_id)],
                row_to_review,
            )
            .await
    }

    /// Reviews about `user_id` with their authors' usernames, newest first.
    ///
    /// # Errors
    ///
    /// Returns a storage-kind `DatabaseError` if the query fails.
    pub async fn reviews_for_user(
        &self,
        user_id: &str,
    ) -> Result<Vec<AuthoredReview>, DatabaseError> {
        let sql = format!(
            "SELECT {REVIEW_COLUMNS}, a.username
             FROM reviews r
             JOIN users a ON a.id = r.author_id
             WHERE r.user_id = ?1
             ORDER BY r.created_at DESC"
        );
        self.db()
            .query_map(
                "reviews_for_user",
                &sql,
                [normalize_id(user_id)],
                |row| {
                    Ok(AuthoredReview {
                        review: row_to_review(row)?,
                        author_username: row.get::<String>(7)?,
                    })
                },
            )
            .await
    }

    /// A user with the reviews written about them and their mean rating.
    ///
    /// # Errors
    ///
    /// `NotFound` for an unknown user.
    pub async fn user_profile(&self, user_id: &str) -> Result<UserProfileResponse, DatabaseError> {
        let user = self.get_user(&normalize_id(user_id)).await?;
        let reviews = self.reviews_for_user(&user.id).await?;
        let average_rating = average_rating(&reviews);
        Ok(UserProfileResponse {
            user,
            reviews,
            average_rating,
        })
    }
}

fn average_rating(reviews: &[AuthoredReview]) -> Option<f64> {
    let count = u32::try_from(reviews.len()).ok().filter(|n| *n > 0)?;
    let total: u32 = reviews.iter().map(|r| u32::from(r.review.rating)).sum();
    Some(f64::from(total) / f64::from(count))
}
