//! Post repository for Talkboard.

use sqlx::QueryBuilder;

use super::types::{NewPost, Post, PostListItem, PostPreview, PostUpdate};
use crate::db::DbPool;
use crate::member::Audit;
use crate::Result;

/// Repository for post CRUD, counters, and hashtags.
pub struct PostRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PostRepository<'a> {
    /// Create a new PostRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a post and its hashtags in one transaction.
    ///
    /// Returns the new post id.
    pub async fn create(&self, new_post: &NewPost) -> Result<i64> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO posts (board_id, author_id, post_title, post_content, anonymous, commentable)
             VALUES (?, ?, ?, ?, ?, ?) RETURNING post_id",
        )
        .bind(new_post.board_id)
        .bind(new_post.author_id)
        .bind(&new_post.title)
        .bind(&new_post.content)
        .bind(new_post.anonymous)
        .bind(new_post.commentable)
        .fetch_one(&mut *tx)
        .await?;

        for tag in &new_post.hashtags {
            sqlx::query("INSERT INTO post_hashtags (post_id, tag) VALUES (?, ?)")
                .bind(id)
                .bind(tag)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(id)
    }

    /// Get a post by id. Soft-deleted posts are not returned.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Post>> {
        let row: Option<PostRow> = sqlx::query_as(
            "SELECT post_id, board_id, author_id, post_title, post_content, anonymous,
                    commentable, deleted, view_count, like_count, scrap_count,
                    created_at, updated_at
             FROM posts WHERE post_id = ? AND deleted = 0",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.into_post()))
    }

    /// Fetch a post detail, incrementing its view counter atomically.
    ///
    /// The increment and the read share one transaction; anonymous and
    /// authenticated readers go through the same path. Returns None for
    /// absent or soft-deleted posts and for posts living on another board,
    /// leaving no counter change behind in any of those cases.
    pub async fn get_detail_and_increment_view(
        &self,
        board_id: i64,
        id: i64,
    ) -> Result<Option<(Post, Vec<String>)>> {
        let mut tx = self.pool.begin().await?;

        let updated = sqlx::query(
            "UPDATE posts SET view_count = view_count + 1
             WHERE post_id = ? AND board_id = ? AND deleted = 0",
        )
        .bind(id)
        .bind(board_id)
        .execute(&mut *tx)
        .await?;
        if updated.rows_affected() == 0 {
            return Ok(None);
        }

        let row: PostRow = sqlx::query_as(
            "SELECT post_id, board_id, author_id, post_title, post_content, anonymous,
                    commentable, deleted, view_count, like_count, scrap_count,
                    created_at, updated_at
             FROM posts WHERE post_id = ?",
        )
        .bind(id)
        .fetch_one(&mut *tx)
        .await?;

        let hashtags: Vec<(String,)> =
            sqlx::query_as("SELECT tag FROM post_hashtags WHERE post_id = ? ORDER BY hashtag_id")
                .bind(id)
                .fetch_all(&mut *tx)
                .await?;

        tx.commit().await?;
        Ok(Some((
            row.into_post(),
            hashtags.into_iter().map(|(t,)| t).collect(),
        )))
    }

    /// List posts in a board, newest activity first, with comment counts.
    ///
    /// An optional keyword filters on title and content. Soft-deleted posts
    /// are excluded.
    pub async fn list_by_board(
        &self,
        board_id: i64,
        keyword: Option<&str>,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<PostListItem>> {
        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new(
            "SELECT p.post_id, p.board_id, p.author_id, p.post_title, p.post_content,
                    p.anonymous, p.commentable, p.deleted, p.view_count, p.like_count,
                    p.scrap_count, p.created_at, p.updated_at,
                    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.post_id) AS comment_count
             FROM posts p WHERE p.board_id = ",
        );
        query.push_bind(board_id);
        query.push(" AND p.deleted = 0");
        if let Some(keyword) = keyword {
            let pattern = format!("%{keyword}%");
            query.push(" AND (p.post_title LIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR p.post_content LIKE ");
            query.push_bind(pattern);
            query.push(")");
        }
        query.push(" ORDER BY p.updated_at DESC, p.post_id DESC LIMIT ");
        query.push_bind(limit);
        query.push(" OFFSET ");
        query.push_bind(offset);

        let rows: Vec<PostListRow> = query.build_query_as().fetch_all(self.pool).await?;
        Ok(rows.into_iter().map(|r| r.into_list_item()).collect())
    }

    /// Count non-deleted posts in a board, with the same keyword filter as
    /// [`list_by_board`](Self::list_by_board).
    pub async fn count_by_board(&self, board_id: i64, keyword: Option<&str>) -> Result<i64> {
        let mut query: QueryBuilder<sqlx::Sqlite> =
            QueryBuilder::new("SELECT COUNT(*) FROM posts WHERE board_id = ");
        query.push_bind(board_id);
        query.push(" AND deleted = 0");
        if let Some(keyword) = keyword {
            let pattern = format!("%{keyword}%");
            query.push(" AND (post_title LIKE ");
            query.push_bind(pattern.clone());
            query.push(" OR post_content LIKE ");
            query.push_bind(pattern);
            query.push(")");
        }

        let count: (i64,) = query.build_query_as().fetch_one(self.pool).await?;
        Ok(count.0)
    }

    /// Count all posts a board owns, including soft-deleted ones.
    ///
    /// Used by the board deletion guard: a board with any post row, deleted
    /// or not, cannot be removed.
    pub async fn count_all_by_board(&self, board_id: i64) -> Result<i64> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts WHERE board_id = ?")
            .bind(board_id)
            .fetch_one(self.pool)
            .await?;
        Ok(count.0)
    }

    /// Update a post. Only set fields are modified; updated_at is refreshed.
    ///
    /// Returns the updated post, or None when the post is absent or deleted.
    pub async fn update(&self, id: i64, update: &PostUpdate) -> Result<Option<Post>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE posts SET ");
        let mut separated = query.separated(", ");

        if let Some(ref title) = update.title {
            separated.push("post_title = ");
            separated.push_bind_unseparated(title);
        }
        if let Some(ref content) = update.content {
            separated.push("post_content = ");
            separated.push_bind_unseparated(content);
        }
        if let Some(anonymous) = update.anonymous {
            separated.push("anonymous = ");
            separated.push_bind_unseparated(anonymous);
        }
        if let Some(commentable) = update.commentable {
            separated.push("commentable = ");
            separated.push_bind_unseparated(commentable);
        }
        separated.push("updated_at = datetime('now')");

        query.push(" WHERE post_id = ");
        query.push_bind(id);
        query.push(" AND deleted = 0");

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Soft-delete a post.
    ///
    /// Returns true when a post was marked deleted.
    pub async fn soft_delete(&self, id: i64) -> Result<bool> {
        let result =
            sqlx::query("UPDATE posts SET deleted = 1 WHERE post_id = ? AND deleted = 0")
                .bind(id)
                .execute(self.pool)
                .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Compact previews of a board's posts, most viewed first.
    pub async fn previews_by_board(&self, board_id: i64, limit: i64) -> Result<Vec<PostPreview>> {
        let rows: Vec<PostPreviewRow> = sqlx::query_as(
            "SELECT p.post_id, p.post_title, p.view_count, p.like_count,
                    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.post_id) AS comment_count
             FROM posts p WHERE p.board_id = ? AND p.deleted = 0
             ORDER BY p.view_count DESC, p.post_id DESC LIMIT ?",
        )
        .bind(board_id)
        .bind(limit)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_preview()).collect())
    }

    /// Hashtags attached to a post.
    pub async fn hashtags(&self, post_id: i64) -> Result<Vec<String>> {
        let tags: Vec<(String,)> =
            sqlx::query_as("SELECT tag FROM post_hashtags WHERE post_id = ? ORDER BY hashtag_id")
                .bind(post_id)
                .fetch_all(self.pool)
                .await?;
        Ok(tags.into_iter().map(|(t,)| t).collect())
    }
}

/// Internal struct for mapping database rows to Post.
#[derive(sqlx::FromRow)]
struct PostRow {
    post_id: i64,
    board_id: i64,
    author_id: i64,
    post_title: String,
    post_content: String,
    anonymous: bool,
    commentable: bool,
    deleted: bool,
    view_count: i64,
    like_count: i64,
    scrap_count: i64,
    created_at: String,
    updated_at: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            id: self.post_id,
            board_id: self.board_id,
            author_id: self.author_id,
            title: self.post_title,
            content: self.post_content,
            anonymous: self.anonymous,
            commentable: self.commentable,
            deleted: self.deleted,
            view_count: self.view_count,
            like_count: self.like_count,
            scrap_count: self.scrap_count,
            audit: Audit {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostListRow {
    post_id: i64,
    board_id: i64,
    author_id: i64,
    post_title: String,
    post_content: String,
    anonymous: bool,
    commentable: bool,
    deleted: bool,
    view_count: i64,
    like_count: i64,
    scrap_count: i64,
    created_at: String,
    updated_at: String,
    comment_count: i64,
}

impl PostListRow {
    fn into_list_item(self) -> PostListItem {
        PostListItem {
            post: Post {
                id: self.post_id,
                board_id: self.board_id,
                author_id: self.author_id,
                title: self.post_title,
                content: self.post_content,
                anonymous: self.anonymous,
                commentable: self.commentable,
                deleted: self.deleted,
                view_count: self.view_count,
                like_count: self.like_count,
                scrap_count: self.scrap_count,
                audit: Audit {
                    created_at: self.created_at,
                    updated_at: self.updated_at,
                },
            },
            comment_count: self.comment_count,
        }
    }
}

#[derive(sqlx::FromRow)]
struct PostPreviewRow {
    post_id: i64,
    post_title: String,
    view_count: i64,
    like_count: i64,
    comment_count: i64,
}

impl PostPreviewRow {
    fn into_preview(self) -> PostPreview {
        PostPreview {
            post_id: self.post_id,
            title: self.post_title,
            view_count: self.view_count,
            like_count: self.like_count,
            comment_count: self.comment_count,
        }
    }
}
