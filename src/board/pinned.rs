//! Pinned-board state for Talkboard.
//!
//! Each member keeps an ordered set of favorite boards, capped at
//! [`PIN_LIMIT`]. Pin, unpin, and reorder are each a single transaction so a
//! mid-sequence failure leaves no partial state.

use std::collections::HashSet;

use super::types::PinnedBoard;
use crate::db::DbPool;
use crate::{Result, TalkboardError};

/// Maximum number of pinned boards per member.
pub const PIN_LIMIT: usize = 6;

/// Repository for per-member pinned boards.
pub struct PinnedBoardRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> PinnedBoardRepository<'a> {
    /// Create a new PinnedBoardRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// List a member's pinned boards in rank order.
    pub async fn list_by_member(&self, member_id: i64) -> Result<Vec<PinnedBoard>> {
        let rows: Vec<PinnedBoardRow> = sqlx::query_as(
            "SELECT p.pinned_board_id, p.board_id, b.board_name, b.description, p.order_rank
             FROM pinned_boards p JOIN boards b ON b.board_id = p.board_id
             WHERE p.member_id = ? ORDER BY p.order_rank ASC",
        )
        .bind(member_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_pinned_board()).collect())
    }

    /// Count a member's pinned boards.
    pub async fn count_by_member(&self, member_id: i64) -> Result<i64> {
        let count: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM pinned_boards WHERE member_id = ?")
                .bind(member_id)
                .fetch_one(self.pool)
                .await?;
        Ok(count.0)
    }

    /// Check whether a member has pinned a board.
    pub async fn is_pinned(&self, member_id: i64, board_id: i64) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM pinned_boards WHERE member_id = ? AND board_id = ?)",
        )
        .bind(member_id)
        .bind(board_id)
        .fetch_one(self.pool)
        .await?;
        Ok(exists.0)
    }

    /// Apply unpins then pins for a member in one transaction.
    ///
    /// All unpins apply before pins, so a board appearing in both lists ends
    /// up pinned with a fresh rank. Pinning an already-pinned board is a
    /// no-op. Fails with a Validation error (and rolls everything back) when
    /// the resulting pin count would exceed [`PIN_LIMIT`], and with NotFound
    /// when any referenced board doesn't exist.
    pub async fn pin_and_unpin(
        &self,
        member_id: i64,
        pin_board_ids: &[i64],
        unpin_board_ids: &[i64],
    ) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for &board_id in pin_board_ids.iter().chain(unpin_board_ids.iter()) {
            let exists: (bool,) =
                sqlx::query_as("SELECT EXISTS(SELECT 1 FROM boards WHERE board_id = ?)")
                    .bind(board_id)
                    .fetch_one(&mut *tx)
                    .await?;
            if !exists.0 {
                return Err(TalkboardError::NotFound("board".to_string()));
            }
        }

        for &board_id in unpin_board_ids {
            sqlx::query("DELETE FROM pinned_boards WHERE member_id = ? AND board_id = ?")
                .bind(member_id)
                .bind(board_id)
                .execute(&mut *tx)
                .await?;
        }

        for &board_id in pin_board_ids {
            let already: (bool,) = sqlx::query_as(
                "SELECT EXISTS(SELECT 1 FROM pinned_boards WHERE member_id = ? AND board_id = ?)",
            )
            .bind(member_id)
            .bind(board_id)
            .fetch_one(&mut *tx)
            .await?;
            if already.0 {
                continue;
            }

            sqlx::query(
                "INSERT INTO pinned_boards (member_id, board_id, order_rank)
                 SELECT ?, ?, COALESCE(MAX(order_rank), 0) + 1
                 FROM pinned_boards WHERE member_id = ?",
            )
            .bind(member_id)
            .bind(board_id)
            .bind(member_id)
            .execute(&mut *tx)
            .await?;
        }

        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pinned_boards WHERE member_id = ?")
            .bind(member_id)
            .fetch_one(&mut *tx)
            .await?;
        if count.0 as usize > PIN_LIMIT {
            // Dropping the transaction rolls everything back
            return Err(TalkboardError::Validation(format!(
                "cannot pin more than {PIN_LIMIT} boards"
            )));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Pin the given boards for a newly registered member, in order.
    ///
    /// Used for the default board set; assumes the member has no pins yet.
    pub async fn pin_defaults(&self, member_id: i64, board_ids: &[i64]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        for (i, &board_id) in board_ids.iter().take(PIN_LIMIT).enumerate() {
            sqlx::query(
                "INSERT INTO pinned_boards (member_id, board_id, order_rank) VALUES (?, ?, ?)",
            )
            .bind(member_id)
            .bind(board_id)
            .bind((i + 1) as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Rewrite a member's pin ranks to match the given board id order.
    ///
    /// The list must contain exactly the member's currently pinned board ids
    /// (no omissions, no duplicates, no unpinned ids); anything else is a
    /// Validation error and nothing changes.
    pub async fn reorder(&self, member_id: i64, ordered_board_ids: &[i64]) -> Result<()> {
        let mut tx = self.pool.begin().await?;

        let current: Vec<(i64,)> =
            sqlx::query_as("SELECT board_id FROM pinned_boards WHERE member_id = ?")
                .bind(member_id)
                .fetch_all(&mut *tx)
                .await?;
        let current: HashSet<i64> = current.into_iter().map(|(id,)| id).collect();

        let requested: HashSet<i64> = ordered_board_ids.iter().copied().collect();
        if requested.len() != ordered_board_ids.len() {
            return Err(TalkboardError::Validation(
                "duplicate board id in reorder request".to_string(),
            ));
        }
        if requested != current {
            return Err(TalkboardError::Validation(
                "reorder request must list exactly the pinned board ids".to_string(),
            ));
        }

        for (i, &board_id) in ordered_board_ids.iter().enumerate() {
            sqlx::query(
                "UPDATE pinned_boards SET order_rank = ? WHERE member_id = ? AND board_id = ?",
            )
            .bind((i + 1) as i64)
            .bind(member_id)
            .bind(board_id)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Internal struct for mapping database rows to PinnedBoard.
#[derive(sqlx::FromRow)]
struct PinnedBoardRow {
    pinned_board_id: i64,
    board_id: i64,
    board_name: String,
    description: Option<String>,
    order_rank: i64,
}

impl PinnedBoardRow {
    fn into_pinned_board(self) -> PinnedBoard {
        PinnedBoard {
            id: self.pinned_board_id,
            board_id: self.board_id,
            board_name: self.board_name,
            description: self.description,
            order_rank: self.order_rank,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardRepository, NewBoard};
    use crate::member::{MemberRepository, NewMember};
    use crate::Database;

    /// Creates a member (id 1) and `boards` boards (ids 1..=boards).
    async fn setup(boards: usize) -> Database {
        let db = Database::open_in_memory().await.unwrap();
        MemberRepository::new(db.pool())
            .create(&NewMember::new("alice", "Alice", "alice@example.com", "hash"))
            .await
            .unwrap();
        let repo = BoardRepository::new(db.pool());
        for i in 0..boards {
            repo.create(&NewBoard::new(1, format!("board{i}"))).await.unwrap();
        }
        db
    }

    #[tokio::test]
    async fn test_pin_and_list_in_rank_order() {
        let db = setup(3).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_and_unpin(1, &[2, 1, 3], &[]).await.unwrap();

        let pinned = repo.list_by_member(1).await.unwrap();
        let ids: Vec<i64> = pinned.iter().map(|p| p.board_id).collect();
        assert_eq!(ids, vec![2, 1, 3]);
        assert_eq!(pinned[0].order_rank, 1);
        assert_eq!(pinned[2].order_rank, 3);
    }

    #[tokio::test]
    async fn test_pin_already_pinned_is_noop() {
        let db = setup(2).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_and_unpin(1, &[1], &[]).await.unwrap();
        repo.pin_and_unpin(1, &[1, 2], &[]).await.unwrap();

        assert_eq!(repo.count_by_member(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_unpin_applies_before_pin() {
        let db = setup(2).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_and_unpin(1, &[1, 2], &[]).await.unwrap();
        // Same board in both lists: net effect stays pinned, moved to the end
        repo.pin_and_unpin(1, &[1], &[1]).await.unwrap();

        let ids: Vec<i64> = repo
            .list_by_member(1)
            .await
            .unwrap()
            .iter()
            .map(|p| p.board_id)
            .collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[tokio::test]
    async fn test_pin_limit_enforced_and_rolled_back() {
        let db = setup(7).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_and_unpin(1, &[1, 2, 3, 4, 5, 6], &[]).await.unwrap();
        assert_eq!(repo.count_by_member(1).await.unwrap(), 6);

        let result = repo.pin_and_unpin(1, &[7], &[]).await;
        assert!(matches!(result, Err(TalkboardError::Validation(_))));
        // Pinned set unchanged
        assert_eq!(repo.count_by_member(1).await.unwrap(), 6);
        assert!(!repo.is_pinned(1, 7).await.unwrap());
    }

    #[tokio::test]
    async fn test_pin_unknown_board() {
        let db = setup(1).await;
        let repo = PinnedBoardRepository::new(db.pool());

        let result = repo.pin_and_unpin(1, &[99], &[]).await;
        assert!(matches!(result, Err(TalkboardError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_reorder() {
        let db = setup(3).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_and_unpin(1, &[1, 2, 3], &[]).await.unwrap();
        repo.reorder(1, &[3, 1, 2]).await.unwrap();

        let ids: Vec<i64> = repo
            .list_by_member(1)
            .await
            .unwrap()
            .iter()
            .map(|p| p.board_id)
            .collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }

    #[tokio::test]
    async fn test_reorder_rejects_unpinned_id() {
        let db = setup(3).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_and_unpin(1, &[1, 2], &[]).await.unwrap();

        let result = repo.reorder(1, &[1, 3]).await;
        assert!(matches!(result, Err(TalkboardError::Validation(_))));
    }

    #[tokio::test]
    async fn test_reorder_rejects_partial_list() {
        let db = setup(3).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_and_unpin(1, &[1, 2, 3], &[]).await.unwrap();

        assert!(repo.reorder(1, &[1, 2]).await.is_err());
        assert!(repo.reorder(1, &[1, 2, 2]).await.is_err());
    }

    #[tokio::test]
    async fn test_pin_defaults() {
        let db = setup(3).await;
        let repo = PinnedBoardRepository::new(db.pool());

        repo.pin_defaults(1, &[2, 3]).await.unwrap();

        let ids: Vec<i64> = repo
            .list_by_member(1)
            .await
            .unwrap()
            .iter()
            .map(|p| p.board_id)
            .collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
