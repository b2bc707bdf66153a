//! Member domain types.

use std::str::FromStr;

/// Audit timestamps attached to entities by composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audit {
    /// Creation timestamp.
    pub created_at: String,
    /// Last modification timestamp.
    pub updated_at: String,
}

/// Member role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MemberRole {
    /// Regular member.
    #[default]
    Normal,
    /// Administrator.
    Admin,
}

impl MemberRole {
    /// String form stored in the database and embedded in tokens.
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberRole::Normal => "NORMAL",
            MemberRole::Admin => "ADMIN",
        }
    }
}

impl FromStr for MemberRole {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NORMAL" => Ok(MemberRole::Normal),
            "ADMIN" => Ok(MemberRole::Admin),
            _ => Err(()),
        }
    }
}

/// A registered member.
#[derive(Debug, Clone)]
pub struct Member {
    /// Member id.
    pub id: i64,
    /// Unique nickname, used as the login identifier.
    pub nickname: String,
    /// Display name.
    pub member_name: String,
    /// Email address (unique).
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Role.
    pub role: MemberRole,
    /// Audit timestamps.
    pub audit: Audit,
}

/// Data for creating a member and its credential record.
#[derive(Debug, Clone)]
pub struct NewMember {
    /// Unique nickname.
    pub nickname: String,
    /// Display name.
    pub member_name: String,
    /// Email address.
    pub email: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Argon2 PHC hash of the password.
    pub password_hash: String,
}

impl NewMember {
    /// Create a new member record with the required fields.
    pub fn new(
        nickname: impl Into<String>,
        member_name: impl Into<String>,
        email: impl Into<String>,
        password_hash: impl Into<String>,
    ) -> Self {
        Self {
            nickname: nickname.into(),
            member_name: member_name.into(),
            email: email.into(),
            phone: None,
            password_hash: password_hash.into(),
        }
    }

    /// Set the phone number.
    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Partial update of a member profile.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    /// New display name.
    pub member_name: Option<String>,
    /// New email address.
    pub email: Option<String>,
    /// New phone number (Some(None) clears it).
    pub phone: Option<Option<String>>,
}

impl MemberUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the display name.
    pub fn member_name(mut self, name: impl Into<String>) -> Self {
        self.member_name = Some(name.into());
        self
    }

    /// Set the email address.
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Set or clear the phone number.
    pub fn phone(mut self, phone: Option<String>) -> Self {
        self.phone = Some(phone);
        self
    }

    /// Returns true when no fields are set.
    pub fn is_empty(&self) -> bool {
        self.member_name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        assert_eq!("NORMAL".parse::<MemberRole>().unwrap(), MemberRole::Normal);
        assert_eq!("ADMIN".parse::<MemberRole>().unwrap(), MemberRole::Admin);
        assert!("guest".parse::<MemberRole>().is_err());
        assert_eq!(MemberRole::Admin.as_str(), "ADMIN");
    }

    #[test]
    fn test_member_update_builder() {
        let update = MemberUpdate::new().member_name("New Name").phone(None);
        assert!(!update.is_empty());
        assert_eq!(update.member_name.as_deref(), Some("New Name"));
        assert_eq!(update.phone, Some(None));

        assert!(MemberUpdate::new().is_empty());
    }
}
