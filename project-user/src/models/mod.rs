pub mod member;
pub mod organization;

pub use member::{Member, MemberStatus, NewMember};
pub use organization::{NewOrganization, Organization, OrganizationKind};

/// Current time as Unix epoch milliseconds.
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
