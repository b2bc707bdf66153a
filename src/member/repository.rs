//! Member repository for Talkboard.
//!
//! CRUD operations for members and their credential records.

use sqlx::QueryBuilder;

use super::types::{Audit, Member, MemberRole, MemberUpdate, NewMember};
use crate::db::DbPool;
use crate::{Result, TalkboardError};

/// Repository for member and credential operations.
pub struct MemberRepository<'a> {
    pool: &'a DbPool,
}

impl<'a> MemberRepository<'a> {
    /// Create a new MemberRepository with the given pool reference.
    pub fn new(pool: &'a DbPool) -> Self {
        Self { pool }
    }

    /// Create a member and its credential record in one transaction.
    pub async fn create(&self, new_member: &NewMember) -> Result<Member> {
        let mut tx = self.pool.begin().await?;

        let id: i64 = sqlx::query_scalar(
            "INSERT INTO members (nickname, member_name, email, phone)
             VALUES (?, ?, ?, ?) RETURNING member_id",
        )
        .bind(&new_member.nickname)
        .bind(&new_member.member_name)
        .bind(&new_member.email)
        .bind(&new_member.phone)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO accounts (member_id, password) VALUES (?, ?)")
            .bind(id)
            .bind(&new_member.password_hash)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| TalkboardError::NotFound("member".to_string()))
    }

    /// Get a member by id.
    pub async fn get_by_id(&self, id: i64) -> Result<Option<Member>> {
        let row: Option<MemberRow> = sqlx::query_as(
            "SELECT member_id, nickname, member_name, email, phone, role, created_at, updated_at
             FROM members WHERE member_id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.into_member()))
    }

    /// Get a member by nickname.
    pub async fn get_by_nickname(&self, nickname: &str) -> Result<Option<Member>> {
        let row: Option<MemberRow> = sqlx::query_as(
            "SELECT member_id, nickname, member_name, email, phone, role, created_at, updated_at
             FROM members WHERE nickname = ?",
        )
        .bind(nickname)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| r.into_member()))
    }

    /// Get a member together with its stored password hash, for login.
    pub async fn get_credential(&self, nickname: &str) -> Result<Option<(Member, String)>> {
        let row: Option<CredentialRow> = sqlx::query_as(
            "SELECT m.member_id, m.nickname, m.member_name, m.email, m.phone, m.role,
                    m.created_at, m.updated_at, a.password
             FROM members m JOIN accounts a ON a.member_id = m.member_id
             WHERE m.nickname = ?",
        )
        .bind(nickname)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|r| {
            let password = r.password.clone();
            (r.into_member(), password)
        }))
    }

    /// Update a member profile. Only set fields are modified.
    ///
    /// Returns the updated member, or None if not found.
    pub async fn update(&self, id: i64, update: &MemberUpdate) -> Result<Option<Member>> {
        if update.is_empty() {
            return self.get_by_id(id).await;
        }

        let mut query: QueryBuilder<sqlx::Sqlite> = QueryBuilder::new("UPDATE members SET ");
        let mut separated = query.separated(", ");

        if let Some(ref name) = update.member_name {
            separated.push("member_name = ");
            separated.push_bind_unseparated(name);
        }
        if let Some(ref email) = update.email {
            separated.push("email = ");
            separated.push_bind_unseparated(email);
        }
        if let Some(ref phone) = update.phone {
            separated.push("phone = ");
            separated.push_bind_unseparated(phone.clone());
        }
        separated.push("updated_at = datetime('now')");

        query.push(" WHERE member_id = ");
        query.push_bind(id);

        let result = query.build().execute(self.pool).await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }

        self.get_by_id(id).await
    }

    /// Check if a nickname is already taken.
    pub async fn nickname_exists(&self, nickname: &str) -> Result<bool> {
        let exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM members WHERE nickname = ?)")
                .bind(nickname)
                .fetch_one(self.pool)
                .await?;
        Ok(exists.0)
    }

    /// Check if an email is already registered.
    pub async fn email_exists(&self, email: &str) -> Result<bool> {
        let exists: (bool,) = sqlx::query_as("SELECT EXISTS(SELECT 1 FROM members WHERE email = ?)")
            .bind(email)
            .fetch_one(self.pool)
            .await?;
        Ok(exists.0)
    }
}

/// Internal struct for mapping database rows to Member.
#[derive(sqlx::FromRow)]
struct MemberRow {
    member_id: i64,
    nickname: String,
    member_name: String,
    email: String,
    phone: Option<String>,
    role: String,
    created_at: String,
    updated_at: String,
}

impl MemberRow {
    fn into_member(self) -> Member {
        Member {
            id: self.member_id,
            nickname: self.nickname,
            member_name: self.member_name,
            email: self.email,
            phone: self.phone,
            role: self.role.parse().unwrap_or(MemberRole::Normal),
            audit: Audit {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct CredentialRow {
    member_id: i64,
    nickname: String,
    member_name: String,
    email: String,
    phone: Option<String>,
    role: String,
    created_at: String,
    updated_at: String,
    password: String,
}

impl CredentialRow {
    fn into_member(self) -> Member {
        Member {
            id: self.member_id,
            nickname: self.nickname,
            member_name: self.member_name,
            email: self.email,
            phone: self.phone,
            role: self.role.parse().unwrap_or(MemberRole::Normal),
            audit: Audit {
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Database;

    async fn setup_db() -> Database {
        Database::open_in_memory().await.unwrap()
    }

    fn sample_member(nickname: &str) -> NewMember {
        NewMember::new(
            nickname,
            "Sample Member",
            format!("{nickname}@example.com"),
            "$argon2id$fakehash",
        )
    }

    #[tokio::test]
    async fn test_create_member() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        let member = repo
            .create(&sample_member("alice").with_phone("010-1234-5678"))
            .await
            .unwrap();

        assert_eq!(member.id, 1);
        assert_eq!(member.nickname, "alice");
        assert_eq!(member.role, MemberRole::Normal);
        assert_eq!(member.phone.as_deref(), Some("010-1234-5678"));
    }

    #[tokio::test]
    async fn test_create_duplicate_nickname() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        repo.create(&sample_member("alice")).await.unwrap();

        let mut dup = sample_member("alice");
        dup.email = "other@example.com".to_string();
        assert!(repo.create(&dup).await.is_err());
    }

    #[tokio::test]
    async fn test_get_by_nickname() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        repo.create(&sample_member("alice")).await.unwrap();

        let found = repo.get_by_nickname("alice").await.unwrap();
        assert!(found.is_some());
        assert!(repo.get_by_nickname("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_credential() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        repo.create(&sample_member("alice")).await.unwrap();

        let (member, hash) = repo.get_credential("alice").await.unwrap().unwrap();
        assert_eq!(member.nickname, "alice");
        assert_eq!(hash, "$argon2id$fakehash");

        assert!(repo.get_credential("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_member() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        let member = repo.create(&sample_member("alice")).await.unwrap();

        let update = MemberUpdate::new()
            .member_name("Renamed")
            .email("renamed@example.com")
            .phone(Some("010-0000-0000".to_string()));
        let updated = repo.update(member.id, &update).await.unwrap().unwrap();

        assert_eq!(updated.member_name, "Renamed");
        assert_eq!(updated.email, "renamed@example.com");
        assert_eq!(updated.phone.as_deref(), Some("010-0000-0000"));
        // Unchanged
        assert_eq!(updated.nickname, "alice");
    }

    #[tokio::test]
    async fn test_update_clear_phone() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        let member = repo
            .create(&sample_member("alice").with_phone("010-1234-5678"))
            .await
            .unwrap();

        let updated = repo
            .update(member.id, &MemberUpdate::new().phone(None))
            .await
            .unwrap()
            .unwrap();
        assert!(updated.phone.is_none());
    }

    #[tokio::test]
    async fn test_update_nonexistent() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        let result = repo
            .update(999, &MemberUpdate::new().member_name("X"))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_exists_checks() {
        let db = setup_db().await;
        let repo = MemberRepository::new(db.pool());

        assert!(!repo.nickname_exists("alice").await.unwrap());
        repo.create(&sample_member("alice")).await.unwrap();
        assert!(repo.nickname_exists("alice").await.unwrap());
        assert!(repo.email_exists("alice@example.com").await.unwrap());
        assert!(!repo.email_exists("bob@example.com").await.unwrap());
    }
}
