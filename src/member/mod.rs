//! Member module: profiles, credentials, and roles.

mod repository;
mod types;

pub use repository::MemberRepository;
pub use types::{Audit, Member, MemberRole, MemberUpdate, NewMember};
