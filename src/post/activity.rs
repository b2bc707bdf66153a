//! Member activity tracking for Talkboard.
//!
//! A member_activities row per (member, reference, type) is the sole source
//! of truth for whether the matching post counter includes that member. Row
//! and counter always change together, inside one transaction.

use super::types::ActivityType;
use crate::db::DbPool;
use crate::{Result, TalkboardError};

/// Outcome of a toggle operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToggleOutcome {
    /// Whether the activity is active after the toggle.
    pub active: bool,
    /// The post counter value after the toggle.
    pub count: i64,
}

/// Repository for like/scrap activity records.
pub struct MemberActivityRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MemberActivityRepository<'a> {
    /// Create a new MemberActivityRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Check whether an activity record exists.
    pub async fn is_active(
        &self,
        member_id: i64,
        ref_id: i64,
        activity: ActivityType,
    ) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM member_activities
             WHERE member_id = ? AND ref_id = ? AND activity_type = ?)",
        )
        .bind(member_id)
        .bind(ref_id)
        .bind(activity.as_str())
        .fetch_one(self.pool)
        .await?;
        Ok(exists.0)
    }

    /// A member's like/scrap state for a post.
    pub async fn post_activity_state(&self, member_id: i64, post_id: i64) -> Result<(bool, bool)> {
        let liked = self.is_active(member_id, post_id, ActivityType::PostLike).await?;
        let scrapped = self.is_active(member_id, post_id, ActivityType::PostScrap).await?;
        Ok((liked, scrapped))
    }

    /// Toggle an activity on a post, adjusting the matching counter.
    ///
    /// Direction is determined by the current presence of the activity row:
    /// absent -> insert + counter +1, present -> delete + counter -1. Record
    /// and counter change in the same transaction, so they cannot diverge.
    /// Fails with NotFound when the post is absent or soft-deleted.
    pub async fn toggle(
        &self,
        member_id: i64,
        post_id: i64,
        activity: ActivityType,
    ) -> Result<ToggleOutcome> {
        let column = activity.counter_column();
        let mut tx = self.pool.begin().await?;

        let post_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM posts WHERE post_id = ? AND deleted = 0)")
                .bind(post_id)
                .fetch_one(&mut *tx)
                .await?;
        if !post_exists.0 {
            return Err(TalkboardError::NotFound("post".to_string()));
        }

        let existing: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM member_activities
             WHERE member_id = ? AND ref_id = ? AND activity_type = ?)",
        )
        .bind(member_id)
        .bind(post_id)
        .bind(activity.as_str())
        .fetch_one(&mut *tx)
        .await?;

        let active = if existing.0 {
            sqlx::query(
                "DELETE FROM member_activities
                 WHERE member_id = ? AND ref_id = ? AND activity_type = ?",
            )
            .bind(member_id)
            .bind(post_id)
            .bind(activity.as_str())
            .execute(&mut *tx)
            .await?;

            sqlx::query(&format!(
                "UPDATE posts SET {column} = {column} - 1 WHERE post_id = ?"
            ))
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
            false
        } else {
            sqlx::query(
                "INSERT INTO member_activities (member_id, ref_id, activity_type)
                 VALUES (?, ?, ?)",
            )
            .bind(member_id)
            .bind(post_id)
            .bind(activity.as_str())
            .execute(&mut *tx)
            .await?;

            sqlx::query(&format!(
                "UPDATE posts SET {column} = {column} + 1 WHERE post_id = ?"
            ))
            .bind(post_id)
            .execute(&mut *tx)
            .await?;
            true
        };

        let count: (i64,) = sqlx::query_as(&format!(
            "SELECT {column} FROM posts WHERE post_id = ?"
        ))
        .bind(post_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(ToggleOutcome {
            active,
            count: count.0,
        })
    }

    /// Number of active records of a type for a reference.
    pub async fn count_for_ref(&self, ref_id: i64, activity: ActivityType) -> Result<i64> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM member_activities WHERE ref_id = ? AND activity_type = ?",
        )
        .bind(ref_id)
        .bind(activity.as_str())
        .fetch_one(self.pool)
        .await?;
        Ok(count.0)
    }
}
