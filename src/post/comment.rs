//! Comment repository for Talkboard.

use super::types::{Comment, NewComment};
use crate::db::DbPool;
use crate::member::Audit;
use crate::{Result, TalkboardError};

/// Repository for post comments.
pub struct CommentRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> CommentRepository<'a> {
    /// Create a new CommentRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a comment.
    ///
    /// A reply's parent must belong to the same post and must itself be a
    /// top-level comment (one level of nesting).
    pub async fn create(&self, new_comment: &NewComment) -> Result<Comment> {
        if let Some(parent_id) = new_comment.parent_id {
            let parent = self
                .get_by_id(parent_id)
                .await?
                .ok_or_else(|| TalkboardError::NotFound("parent comment".to_string()))?;
            if parent.post_id != new_comment.post_id {
                return Err(TalkboardError::Validation(
                    "parent comment belongs to a different post".to_string(),
                ));
            }
            if parent.parent_id.is_some() {
                return Err(TalkboardError::Validation(
                    "replies cannot be nested more than one level".to_string(),
                ));
            }
        }

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO comments (post_id, author_id, parent_id, content, anonymous)
             VALUES (?, ?, ?, ?, ?) RETURNING comment_id",
        )
        .bind(new_comment.post_id)
        .bind(new_comment.author_id)
        .bind(new_comment.parent_id)
        .bind(&new_comment.content)
        .bind(new_comment.anonymous)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| TalkboardError::NotFound("comment".to_string()))
    }

    /// Get a comment by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Comment>> {
        let row: Option<CommentRow> = sqlx::query_as(
            "SELECT comment_id, post_id, author_id, parent_id, content, anonymous,
                    created_at, updated_at
             FROM comments WHERE comment_id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.into_comment()))
    }

    /// List a post's comments, oldest first.
    pub async fn list_by_post(&self, post_id: i64) -> Result<Vec<Comment>> {
        let rows: Vec<CommentRow> = sqlx::query_as(
            "SELECT comment_id, post_id, author_id, parent_id, content, anonymous,
                    created_at, updated_at
             FROM comments WHERE post_id = ? ORDER BY comment_id ASC",
        )
        .bind(post_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_comment()).collect())
    }

    /// Count a post's comments.
    pub async fn count_by_post(&self, post_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM comments WHERE post_id = ?")
            .bind(post_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }
}

/// Internal struct for mapping database rows to Comment.
#[derive(sqlx::FromRow)]
struct CommentRow {
    comment_id: i64,
    post_id: i64,
    author_id: i64,
    parent_id: Option<i64>,
    content: String,
    anonymous: bool,
    created_at: String,
    updated_at: String,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.comment_id,
            post_id: self.post_id,
            author_id: self.author_id,
            parent_id: self.parent_id,
            content: self.content,
            anonymous: self.anonymous,
            audit: Audit {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}
