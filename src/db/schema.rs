//! Database schema migrations for Talkboard.

/// Ordered list of schema migrations. Each entry is applied once, in a
/// transaction, and recorded in the schema_version table.
pub const MIGRATIONS: &[&str] = &[
    // v1: initial schema
    r#"
    CREATE TABLE members (
        member_id    INTEGER PRIMARY KEY AUTOINCREMENT,
        nickname     TEXT NOT NULL UNIQUE,
        member_name  TEXT NOT NULL,
        email        TEXT NOT NULL UNIQUE,
        phone        TEXT,
        role         TEXT NOT NULL DEFAULT 'NORMAL',
        created_at   TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX idx_members_nickname ON members(nickname);

    CREATE TABLE accounts (
        account_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id    INTEGER NOT NULL UNIQUE REFERENCES members(member_id),
        password     TEXT NOT NULL,
        created_at   TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE boards (
        board_id     INTEGER PRIMARY KEY AUTOINCREMENT,
        manager_id   INTEGER NOT NULL REFERENCES members(member_id),
        board_name   TEXT NOT NULL,
        description  TEXT,
        is_default   INTEGER NOT NULL DEFAULT 0,
        created_at   TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );

    CREATE TABLE pinned_boards (
        pinned_board_id INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id       INTEGER NOT NULL REFERENCES members(member_id),
        board_id        INTEGER NOT NULL REFERENCES boards(board_id) ON DELETE CASCADE,
        order_rank      INTEGER NOT NULL,
        UNIQUE (member_id, board_id)
    );
    CREATE INDEX idx_pinned_boards_member ON pinned_boards(member_id, order_rank);

    CREATE TABLE posts (
        post_id      INTEGER PRIMARY KEY AUTOINCREMENT,
        board_id     INTEGER NOT NULL REFERENCES boards(board_id),
        author_id    INTEGER NOT NULL REFERENCES members(member_id),
        post_title   TEXT NOT NULL,
        post_content TEXT NOT NULL,
        anonymous    INTEGER NOT NULL DEFAULT 0,
        commentable  INTEGER NOT NULL DEFAULT 1,
        deleted      INTEGER NOT NULL DEFAULT 0,
        view_count   INTEGER NOT NULL DEFAULT 0,
        like_count   INTEGER NOT NULL DEFAULT 0,
        scrap_count  INTEGER NOT NULL DEFAULT 0,
        created_at   TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX idx_posts_board ON posts(board_id, updated_at);

    CREATE TABLE comments (
        comment_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id      INTEGER NOT NULL REFERENCES posts(post_id),
        author_id    INTEGER NOT NULL REFERENCES members(member_id),
        parent_id    INTEGER REFERENCES comments(comment_id),
        content      TEXT NOT NULL,
        anonymous    INTEGER NOT NULL DEFAULT 0,
        created_at   TEXT NOT NULL DEFAULT (datetime('now')),
        updated_at   TEXT NOT NULL DEFAULT (datetime('now'))
    );
    CREATE INDEX idx_comments_post ON comments(post_id);

    CREATE TABLE post_hashtags (
        hashtag_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        post_id      INTEGER NOT NULL REFERENCES posts(post_id) ON DELETE CASCADE,
        tag          TEXT NOT NULL
    );
    CREATE INDEX idx_post_hashtags_post ON post_hashtags(post_id);

    CREATE TABLE member_activities (
        activity_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        member_id     INTEGER NOT NULL REFERENCES members(member_id),
        ref_id        INTEGER NOT NULL,
        activity_type TEXT NOT NULL,
        created_at    TEXT NOT NULL DEFAULT (datetime('now')),
        UNIQUE (member_id, ref_id, activity_type)
    );
    CREATE INDEX idx_member_activities_ref ON member_activities(ref_id, activity_type);
    "#,
];
