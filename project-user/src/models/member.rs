//! Member model - registered accounts.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Member status codes as stored in `ms_member.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Disabled = 0,
    Normal = 1,
}

impl MemberStatus {
    pub fn code(self) -> i32 {
        self as i32
    }

    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(MemberStatus::Disabled),
            1 => Some(MemberStatus::Normal),
            _ => None,
        }
    }
}

/// Member row. `password` holds the hex SHA-256 digest, never the plaintext.
#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Member {
    pub id: i64,
    pub account: String,
    pub password: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub create_time: i64,
    pub last_login_time: i64,
    pub status: i32,
}

impl Member {
    pub fn status(&self) -> Option<MemberStatus> {
        MemberStatus::from_code(self.status)
    }

    pub fn is_active(&self) -> bool {
        self.status() == Some(MemberStatus::Normal)
    }
}

/// A member that has not been inserted yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMember {
    pub account: String,
    pub password: String,
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub create_time: i64,
    pub last_login_time: i64,
    pub status: MemberStatus,
}

impl NewMember {
    pub fn into_member(self, id: i64) -> Member {
        Member {
            id,
            account: self.account,
            password: self.password,
            name: self.name,
            mobile: self.mobile,
            email: self.email,
            create_time: self.create_time,
            last_login_time: self.last_login_time,
            status: self.status.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_match_storage() {
        assert_eq!(MemberStatus::Normal.code(), 1);
        assert_eq!(MemberStatus::Disabled.code(), 0);
        assert_eq!(MemberStatus::from_code(1), Some(MemberStatus::Normal));
        assert_eq!(MemberStatus::from_code(7), None);
    }

    #[test]
    fn disabled_member_is_not_active() {
        let member = NewMember {
            account: "alice".to_string(),
            password: "digest".to_string(),
            name: "Alice".to_string(),
            mobile: "13800000000".to_string(),
            email: "alice@example.com".to_string(),
            create_time: 1,
            last_login_time: 1,
            status: MemberStatus::Disabled,
        }
        .into_member(9);

        assert_eq!(member.id, 9);
        assert!(!member.is_active());
    }
}
