mod common;

use async_trait::async_trait;
use common::{test_config, TestApp, TEST_CODE, TEST_MOBILE};
use project_common::auth::TokenIssuer;
use project_user::models::{Member, Organization, OrganizationKind};
use project_user::services::store::{
    MemberRepo, OrganizationRepo, Transactor, UnitOfWork,
};
use project_user::services::{
    registration_key, CodeCache, LoginService, LoginSettings, MemoryCache, MemoryStore,
    MockNotifier, RegisterInput, ServiceError, Store, StoreError,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn input(email: &str, name: &str, mobile: &str, captcha: &str) -> RegisterInput {
    RegisterInput {
        email: email.to_string(),
        name: name.to_string(),
        password: "secret-password".to_string(),
        mobile: mobile.to_string(),
        captcha: captcha.to_string(),
    }
}

#[tokio::test]
async fn register_creates_member_and_personal_organization() {
    let app = TestApp::spawn().await;
    app.seed_code(TEST_MOBILE, TEST_CODE).await;

    app.app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await
        .expect("registration should succeed");

    let members = app.store.members();
    assert_eq!(members.len(), 1);
    let member = &members[0];
    assert_eq!(member.account, "alice");
    assert_eq!(member.mobile, TEST_MOBILE);
    assert_ne!(member.password, "secret-password");
    assert_eq!(member.create_time, member.last_login_time);
    assert!(member.is_active());

    let organizations = app.store.organizations();
    assert_eq!(organizations.len(), 1);
    assert_eq!(organizations[0].member_id, member.id);
    assert_eq!(organizations[0].personal, OrganizationKind::Personal.code());
    assert_eq!(organizations[0].name, "alice's personal workspace");
    assert_eq!(organizations[0].avatar, "https://static.test/avatar.png");
}

#[tokio::test]
async fn missing_code_is_rejected_without_writes() {
    let app = TestApp::spawn().await;

    let result = app
        .app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await;

    assert!(matches!(result, Err(ServiceError::CodeNotFound)));
    assert!(app.store.members().is_empty());
}

#[tokio::test]
async fn mismatched_code_is_rejected_without_writes() {
    let app = TestApp::spawn().await;
    app.seed_code(TEST_MOBILE, TEST_CODE).await;

    let result = app
        .app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, "654321"))
        .await;

    assert!(matches!(result, Err(ServiceError::CodeMismatch)));
    assert!(app.store.members().is_empty());
}

#[tokio::test]
async fn used_code_cannot_be_replayed() {
    let app = TestApp::spawn().await;
    app.seed_code(TEST_MOBILE, TEST_CODE).await;

    app.app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await
        .unwrap();

    assert_eq!(
        app.cache.get(&registration_key(TEST_MOBILE)).await.unwrap(),
        None
    );

    let replay = app
        .app_service
        .register(input("bob@example.com", "bob", TEST_MOBILE, TEST_CODE))
        .await;
    assert!(matches!(replay, Err(ServiceError::CodeNotFound)));
}

#[tokio::test]
async fn uniqueness_checks_run_email_then_account_then_mobile() {
    let app = TestApp::spawn().await;
    app.seed_code(TEST_MOBILE, TEST_CODE).await;
    app.app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await
        .unwrap();

    // Every field collides: email wins.
    app.seed_code(TEST_MOBILE, TEST_CODE).await;
    let result = app
        .app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await;
    assert!(matches!(result, Err(ServiceError::EmailExists)));

    // Account and mobile collide: account wins.
    let result = app
        .app_service
        .register(input("new@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await;
    assert!(matches!(result, Err(ServiceError::AccountExists)));

    // Only mobile collides.
    let result = app
        .app_service
        .register(input("new@example.com", "newname", TEST_MOBILE, TEST_CODE))
        .await;
    assert!(matches!(result, Err(ServiceError::MobileExists)));

    assert_eq!(app.store.members().len(), 1);
}

#[tokio::test]
async fn organization_failure_rolls_back_member() {
    let app = TestApp::spawn().await;
    app.seed_code(TEST_MOBILE, TEST_CODE).await;
    app.store.set_fail_organization_insert(true);

    let result = app
        .app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await;

    assert!(matches!(result, Err(ServiceError::Store(_))));
    assert!(app.store.members().is_empty());
    assert!(app.store.organizations().is_empty());

    // The code survives a failed registration.
    assert_eq!(
        app.cache
            .get(&registration_key(TEST_MOBILE))
            .await
            .unwrap()
            .as_deref(),
        Some(TEST_CODE)
    );
}

#[tokio::test]
async fn cache_failure_maps_to_cache_unavailable() {
    let app = TestApp::spawn().await;
    app.cache.set_unavailable(true);

    let result = app
        .app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await;

    assert!(matches!(result, Err(ServiceError::Cache(_))));
}

#[tokio::test]
async fn store_failure_during_checks_is_a_persistence_error() {
    let app = TestApp::spawn().await;
    app.seed_code(TEST_MOBILE, TEST_CODE).await;
    app.store.set_unavailable(true);

    let result = app
        .app_service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await;

    assert!(matches!(result, Err(ServiceError::Store(_))));
}

#[tokio::test]
async fn malformed_email_is_invalid_params() {
    let app = TestApp::spawn().await;
    app.seed_code(TEST_MOBILE, TEST_CODE).await;

    let result = app
        .app_service
        .register(input("not-an-email", "alice", TEST_MOBILE, TEST_CODE))
        .await;

    assert!(matches!(result, Err(ServiceError::InvalidParams(_))));
}

/// Store that records which uniqueness checks were run.
struct CountingStore {
    inner: MemoryStore,
    checks: Mutex<Vec<&'static str>>,
}

impl CountingStore {
    fn new() -> Self {
        Self {
            inner: MemoryStore::new(),
            checks: Mutex::new(Vec::new()),
        }
    }

    fn take_checks(&self) -> Vec<&'static str> {
        std::mem::take(&mut *self.checks.lock().unwrap())
    }

    fn record(&self, check: &'static str) {
        self.checks.lock().unwrap().push(check);
    }
}

#[async_trait]
impl MemberRepo for CountingStore {
    async fn email_exists(&self, email: &str) -> Result<bool, StoreError> {
        self.record("email");
        self.inner.email_exists(email).await
    }

    async fn account_exists(&self, account: &str) -> Result<bool, StoreError> {
        self.record("account");
        self.inner.account_exists(account).await
    }

    async fn mobile_exists(&self, mobile: &str) -> Result<bool, StoreError> {
        self.record("mobile");
        self.inner.mobile_exists(mobile).await
    }

    async fn find_by_credentials(
        &self,
        account: &str,
        password_hash: &str,
    ) -> Result<Option<Member>, StoreError> {
        self.inner.find_by_credentials(account, password_hash).await
    }
}

#[async_trait]
impl OrganizationRepo for CountingStore {
    async fn find_by_member_id(&self, member_id: i64) -> Result<Vec<Organization>, StoreError> {
        self.inner.find_by_member_id(member_id).await
    }
}

#[async_trait]
impl Transactor for CountingStore {
    async fn run_in_transaction(&self, work: UnitOfWork) -> Result<(), StoreError> {
        self.inner.run_in_transaction(work).await
    }
}

#[async_trait]
impl Store for CountingStore {
    async fn health_check(&self) -> Result<(), StoreError> {
        self.inner.health_check().await
    }
}

struct CountingApp {
    service: LoginService,
    cache: Arc<MemoryCache>,
    store: Arc<CountingStore>,
}

impl CountingApp {
    async fn with_alice() -> Self {
        let config = test_config();
        let cache = Arc::new(MemoryCache::new());
        let store = Arc::new(CountingStore::new());
        let service = LoginService::new(
            cache.clone(),
            store.clone(),
            Arc::new(MockNotifier::new()),
            TokenIssuer::new(
                &config.jwt.access_secret,
                chrono::Duration::days(config.jwt.access_exp_days),
                &config.jwt.refresh_secret,
                chrono::Duration::days(config.jwt.refresh_exp_days),
            ),
            LoginSettings::from(&config),
        );

        let app = Self {
            service,
            cache,
            store,
        };
        app.seed_code().await;
        app.service
            .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
            .await
            .unwrap();
        app.store.take_checks();
        app
    }

    async fn seed_code(&self) {
        self.cache
            .put(&registration_key(TEST_MOBILE), TEST_CODE, Duration::from_secs(900))
            .await
            .unwrap();
    }
}

#[tokio::test]
async fn email_collision_skips_later_checks() {
    let app = CountingApp::with_alice().await;
    app.seed_code().await;

    let result = app
        .service
        .register(input("alice@example.com", "alice", TEST_MOBILE, TEST_CODE))
        .await;

    assert!(matches!(result, Err(ServiceError::EmailExists)));
    assert_eq!(app.store.take_checks(), vec!["email"]);
}

#[tokio::test]
async fn account_collision_alone_is_reported() {
    let app = CountingApp::with_alice().await;
    let fresh_mobile = "13900000000";
    app.cache
        .put(&registration_key(fresh_mobile), TEST_CODE, Duration::from_secs(900))
        .await
        .unwrap();

    let result = app
        .service
        .register(input("fresh@example.com", "alice", fresh_mobile, TEST_CODE))
        .await;

    assert!(matches!(result, Err(ServiceError::AccountExists)));
    assert_eq!(app.store.take_checks(), vec!["email", "account"]);
    assert_eq!(app.store.inner.members().len(), 1);
}
