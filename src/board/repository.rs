//! Board repository for Talkboard.

use super::types::{Board, NewBoard};
use crate::db::DbPool;
use crate::member::Audit;
use crate::{Result, TalkboardError};

/// Repository for board CRUD operations.
pub struct BoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> BoardRepository<'a> {
    /// Create a new BoardRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a new board.
    ///
    /// Returns the created board with the assigned id.
    pub async fn create(&self, new_board: &NewBoard) -> Result<Board> {
        let id: i64 = sqlx::query_scalar(
            "INSERT INTO boards (manager_id, board_name, description, is_default)
             VALUES (?, ?, ?, ?) RETURNING board_id",
        )
        .bind(new_board.manager_id)
        .bind(&new_board.name)
        .bind(&new_board.description)
        .bind(new_board.is_default)
        .fetch_one(self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| TalkboardError::NotFound("board".to_string()))
    }

    /// Get a board by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Board>> {
        let row: Option<BoardRow> = sqlx::query_as(
            "SELECT board_id, manager_id, board_name, description, is_default,
                    created_at, updated_at
             FROM boards WHERE board_id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.into_board()))
    }

    /// Check that a board exists.
    pub async fn exists(&self, id: i64) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM boards WHERE board_id = ?)")
                .bind(id)
                .fetch_one(self.pool)
                .await?;
        Ok(exists.0)
    }

    /// List all boards, oldest first.
    pub async fn list_all(&self) -> Result<Vec<Board>> {
        let rows: Vec<BoardRow> = sqlx::query_as(
            "SELECT board_id, manager_id, board_name, description, is_default,
                    created_at, updated_at
             FROM boards ORDER BY board_id ASC",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_board()).collect())
    }

    /// List ids of default boards, oldest first.
    pub async fn list_default_ids(&self) -> Result<Vec<i64>> {
        let ids: Vec<(i64,)> =
            sqlx::query_as("SELECT board_id FROM boards WHERE is_default = 1 ORDER BY board_id ASC")
                .fetch_all(self.pool)
                .await?;
        Ok(ids.into_iter().map(|(id,)| id).collect())
    }

    /// Delete a board by id.
    ///
    /// Returns true if a board was deleted, false if not found. The caller is
    /// responsible for the board-not-empty guard; pin rows are removed by
    /// cascade.
    pub async fn delete(&self, id: i64) -> Result<bool> {
        let result = sqlx::query("DELETE FROM boards WHERE board_id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

/// Internal struct for mapping database rows to Board.
#[derive(sqlx::FromRow)]
struct BoardRow {
    board_id: i64,
    manager_id: i64,
    board_name: String,
    description: Option<String>,
    is_default: bool,
    created_at: String,
    updated_at: String,
}

impl BoardRow {
    fn into_board(self) -> Board {
        Board {
            id: self.board_id,
            manager_id: self.manager_id,
            name: self.board_name,
            description: self.description,
            is_default: self.is_default,
            audit: Audit {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}
