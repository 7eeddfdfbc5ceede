use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard};

use super::{
    MemberRepo, OrganizationRepo, Store, StoreError, Transactor, TxUnit, UnitOfWork,
};
use crate::models::{Member, MemberStatus, NewMember, NewOrganization, Organization};

#[derive(Default)]
struct Tables {
    members: Vec<Member>,
    organizations: Vec<Organization>,
    member_seq: i64,
    organization_seq: i64,
}

impl Tables {
    fn unique_conflict(&self, member: &NewMember, staged: &[Member]) -> Option<&'static str> {
        let all = self.members.iter().chain(staged.iter());
        for existing in all {
            if existing.account == member.account {
                return Some("ms_member_account_key");
            }
            if existing.email == member.email {
                return Some("ms_member_email_key");
            }
            if existing.mobile == member.mobile {
                return Some("ms_member_mobile_key");
            }
        }
        None
    }
}

/// In-process store with the same transactional behaviour as Postgres.
///
/// Writes made through a [`TxUnit`] are staged and only become visible when
/// the unit of work succeeds. Failure switches let tests break the store at a
/// chosen point.
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
    fail_organization_insert: AtomicBool,
    unavailable: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every organization insert, after the member insert has run.
    pub fn set_fail_organization_insert(&self, fail: bool) {
        self.fail_organization_insert.store(fail, Ordering::SeqCst);
    }

    /// Fail every operation as if the database were unreachable.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    pub fn members(&self) -> Vec<Member> {
        self.tables
            .lock()
            .map(|t| t.members.clone())
            .unwrap_or_default()
    }

    pub fn organizations(&self) -> Vec<Organization> {
        self.tables
            .lock()
            .map(|t| t.organizations.clone())
            .unwrap_or_default()
    }

    pub fn set_member_status(&self, member_id: i64, status: MemberStatus) -> Result<(), StoreError> {
        let mut tables = self.lock()?;
        if let Some(member) = tables.members.iter_mut().find(|m| m.id == member_id) {
            member.status = status.code();
        }
        Ok(())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Tables>, StoreError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("memory store disabled".to_string()));
        }
        self.tables
            .lock()
            .map_err(|e| StoreError::Unavailable(format!("memory store mutex poisoned: {}", e)))
    }
}

struct MemoryUnit<'s> {
    store: &'s MemoryStore,
    members: Vec<Member>,
    organizations: Vec<Organization>,
}

#[async_trait]
impl TxUnit for MemoryUnit<'_> {
    async fn insert_member(&mut self, member: &NewMember) -> Result<i64, StoreError> {
        let mut tables = self.store.lock()?;
        if let Some(constraint) = tables.unique_conflict(member, &self.members) {
            return Err(StoreError::UniqueViolation(constraint.to_string()));
        }
        tables.member_seq += 1;
        let id = tables.member_seq;
        drop(tables);

        self.members.push(member.clone().into_member(id));
        Ok(id)
    }

    async fn insert_organization(
        &mut self,
        organization: &NewOrganization,
    ) -> Result<i64, StoreError> {
        if self.store.fail_organization_insert.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected("organization insert disabled".to_string()));
        }

        let mut tables = self.store.lock()?;
        let owner_known = tables
            .members
            .iter()
            .chain(self.members.iter())
            .any(|m| m.id == organization.member_id);
        if !owner_known {
            return Err(StoreError::Rejected(format!(
                "member {} does not exist",
                organization.member_id
            )));
        }
        tables.organization_seq += 1;
        let id = tables.organization_seq;
        drop(tables);

        self.organizations
            .push(organization.clone().into_organization(id));
        Ok(id)
    }
}

#[async_trait]
impl MemberRepo for MemoryStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.members.iter().any(|m| m.email == email))
    }

    async fn account_exists(&self, account: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.members.iter().any(|m| m.account == account))
    }

    async fn mobile_exists(&self, mobile: &str) -> Result<bool, StoreError> {
        Ok(self.lock()?.members.iter().any(|m| m.mobile == mobile))
    }

    async fn find_by_credentials(
        &self,
        account: &str,
        password_hash: &str,
    ) -> Result<Option<Member>, StoreError> {
        Ok(self
            .lock()?
            .members
            .iter()
            .find(|m| m.account == account && m.password == password_hash)
            .cloned())
    }
}

#[async_trait]
impl OrganizationRepo for MemoryStore {
    async fn find_by_member_id(&self, member_id: i64) -> Result<Vec<Organization>, StoreError> {
        Ok(self
            .lock()?
            .organizations
            .iter()
            .filter(|o| o.member_id == member_id)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl Transactor for MemoryStore {
    async fn run_in_transaction(&self, work: UnitOfWork) -> Result<(), StoreError> {
        let mut unit = MemoryUnit {
            store: self,
            members: Vec::new(),
            organizations: Vec::new(),
        };

        work(&mut unit).await?;

        let MemoryUnit {
            members,
            organizations,
            ..
        } = unit;
        let mut tables = self.lock()?;
        tables.members.extend(members);
        tables.organizations.extend(organizations);
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.lock().map(|_| ())
    }
}
