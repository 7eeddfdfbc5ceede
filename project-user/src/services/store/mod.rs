//! Member and organization persistence.
//!
//! Reads go straight through the store; writes happen inside
//! [`Transactor::run_in_transaction`], which commits iff the unit of work
//! returns `Ok` and rolls back otherwise.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PostgresStore;

use async_trait::async_trait;
use futures::future::BoxFuture;
use thiserror::Error;

use crate::models::{Member, NewMember, NewOrganization, Organization};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Insert rejected: {0}")]
    Rejected(String),
}

impl StoreError {
    /// Map a sqlx error, keeping unique violations distinguishable.
    pub(crate) fn classify(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            if db.is_unique_violation() {
                return StoreError::UniqueViolation(
                    db.constraint().unwrap_or("unknown").to_string(),
                );
            }
        }
        StoreError::Database(err)
    }
}

/// Writes available inside a transaction.
#[async_trait]
pub trait TxUnit: Send {
    /// Insert a member and return its assigned id.
    async fn insert_member(&mut self, member: &NewMember) -> Result<i64, StoreError>;
    async fn insert_organization(&mut self, organization: &NewOrganization)
        -> Result<i64, StoreError>;
}

pub type UnitOfWork = Box<
    dyn for<'u> FnOnce(&'u mut dyn TxUnit) -> BoxFuture<'u, Result<(), StoreError>> + Send,
>;

/// Box a closure as a [`UnitOfWork`].
///
/// ```ignore
/// store.run_in_transaction(unit_of_work(move |unit| Box::pin(async move {
///     let id = unit.insert_member(&member).await?;
///     unit.insert_organization(&NewOrganization::personal(&name, id, &avatar, now)).await?;
///     Ok(())
/// }))).await?;
/// ```
pub fn unit_of_work<F>(work: F) -> UnitOfWork
where
    F: for<'u> FnOnce(&'u mut dyn TxUnit) -> BoxFuture<'u, Result<(), StoreError>>
        + Send
        + 'static,
{
    Box::new(work)
}

#[async_trait]
pub trait MemberRepo: Send + Sync {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError>;
    async fn account_exists(&self, account: &str) -> Result<bool, StoreError>;
    async fn mobile_exists(&self, mobile: &str) -> Result<bool, StoreError>;
    async fn find_by_credentials(
        &self,
        account: &str,
        password_hash: &str,
    ) -> Result<Option<Member>, StoreError>;
}

#[async_trait]
pub trait OrganizationRepo: Send + Sync {
    async fn find_by_member_id(&self, member_id: i64) -> Result<Vec<Organization>, StoreError>;
}

#[async_trait]
pub trait Transactor: Send + Sync {
    async fn run_in_transaction(&self, work: UnitOfWork) -> Result<(), StoreError>;
}

/// Everything the login service needs from persistence.
#[async_trait]
pub trait Store: MemberRepo + OrganizationRepo + Transactor {
    async fn health_check(&self) -> Result<(), StoreError>;
}
