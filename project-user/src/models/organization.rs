//! Organization model - workspaces owned by members.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrganizationKind {
    Team = 0,
    Personal = 1,
}

impl OrganizationKind {
    pub fn code(self) -> i32 {
        self as i32
    }
}

#[derive(Debug, Clone, FromRow, PartialEq, Eq)]
pub struct Organization {
    pub id: i64,
    pub name: String,
    pub avatar: String,
    pub description: String,
    pub member_id: i64,
    pub create_time: i64,
    pub personal: i32,
}

impl Organization {
    pub fn is_personal(&self) -> bool {
        self.personal == OrganizationKind::Personal.code()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOrganization {
    pub name: String,
    pub avatar: String,
    pub description: String,
    pub member_id: i64,
    pub create_time: i64,
    pub kind: OrganizationKind,
}

impl NewOrganization {
    /// The default workspace created alongside a new member.
    pub fn personal(member_name: &str, member_id: i64, avatar: &str, create_time: i64) -> Self {
        Self {
            name: format!("{}'s personal workspace", member_name),
            avatar: avatar.to_string(),
            description: format!("{}'s personal workspace", member_name),
            member_id,
            create_time,
            kind: OrganizationKind::Personal,
        }
    }

    pub fn into_organization(self, id: i64) -> Organization {
        Organization {
            id,
            name: self.name,
            avatar: self.avatar,
            description: self.description,
            member_id: self.member_id,
            create_time: self.create_time,
            personal: self.kind.code(),
        }
    }
}
