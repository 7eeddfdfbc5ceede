use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::{Postgres, Transaction};
use std::time::Duration;

use super::{
    MemberRepo, OrganizationRepo, Store, StoreError, Transactor, TxUnit, UnitOfWork,
};
use crate::config::DatabaseConfig;
use crate::models::{Member, NewMember, NewOrganization, Organization};

#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL...");

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .connect(&config.url)
            .await?;

        tracing::info!("Successfully connected to PostgreSQL");
        Ok(Self { pool })
    }

    pub async fn migrate(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations...");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Database(e.into()))?;
        tracing::info!("Database migrations completed");
        Ok(())
    }

    async fn exists(&self, sql: &str, value: &str) -> Result<bool, StoreError> {
        let exists: bool = sqlx::query_scalar(sql)
            .bind(value)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }
}

#[async_trait]
impl MemberRepo for PostgresStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM ms_member WHERE email = $1)", email)
            .await
    }

    async fn account_exists(&self, account: &str) -> Result<bool, StoreError> {
        self.exists(
            "SELECT EXISTS(SELECT 1 FROM ms_member WHERE account = $1)",
            account,
        )
        .await
    }

    async fn mobile_exists(&self, mobile: &str) -> Result<bool, StoreError> {
        self.exists("SELECT EXISTS(SELECT 1 FROM ms_member WHERE mobile = $1)", mobile)
            .await
    }

    async fn find_by_credentials(
        &self,
        account: &str,
        password_hash: &str,
    ) -> Result<Option<Member>, StoreError> {
        let member = sqlx::query_as::<_, Member>(
            r#"
            SELECT id, account, password, name, mobile, email, create_time, last_login_time, status
            FROM ms_member
            WHERE account = $1 AND password = $2
            "#,
        )
        .bind(account)
        .bind(password_hash)
        .fetch_optional(&self.pool)
        .await?;
        Ok(member)
    }
}

#[async_trait]
impl OrganizationRepo for PostgresStore {
    async fn find_by_member_id(&self, member_id: i64) -> Result<Vec<Organization>, StoreError> {
        let organizations = sqlx::query_as::<_, Organization>(
            r#"
            SELECT id, name, avatar, description, member_id, create_time, personal
            FROM ms_organization
            WHERE member_id = $1
            ORDER BY id
            "#,
        )
        .bind(member_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(organizations)
    }
}

struct PgUnit {
    tx: Transaction<'static, Postgres>,
}

#[async_trait]
impl TxUnit for PgUnit {
    async fn insert_member(&mut self, member: &NewMember) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO ms_member (account, password, name, mobile, email, create_time, last_login_time, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id
            "#,
        )
        .bind(&member.account)
        .bind(&member.password)
        .bind(&member.name)
        .bind(&member.mobile)
        .bind(&member.email)
        .bind(member.create_time)
        .bind(member.last_login_time)
        .bind(member.status.code())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(StoreError::classify)
    }

    async fn insert_organization(
        &mut self,
        organization: &NewOrganization,
    ) -> Result<i64, StoreError> {
        sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO ms_organization (name, avatar, description, member_id, create_time, personal)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(&organization.name)
        .bind(&organization.avatar)
        .bind(&organization.description)
        .bind(organization.member_id)
        .bind(organization.create_time)
        .bind(organization.kind.code())
        .fetch_one(&mut *self.tx)
        .await
        .map_err(StoreError::classify)
    }
}

#[async_trait]
impl Transactor for PostgresStore {
    async fn run_in_transaction(&self, work: UnitOfWork) -> Result<(), StoreError> {
        let tx = self.pool.begin().await?;
        let mut unit = PgUnit { tx };

        match work(&mut unit).await {
            Ok(()) => {
                unit.tx.commit().await?;
                Ok(())
            }
            Err(err) => {
                if let Err(rollback_err) = unit.tx.rollback().await {
                    tracing::error!(error = %rollback_err, "Transaction rollback failed");
                }
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Store for PostgresStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1").execute(&self.pool).await.map_err(|e| {
            tracing::error!("Database health check failed: {}", e);
            StoreError::Database(e)
        })?;
        Ok(())
    }
}
