use project_common::auth::{TokenIssuer, TokenPair};
use std::sync::Arc;
use std::time::Duration;
use tracing::Instrument;
use validator::Validate;

use crate::config::UserConfig;
use crate::models::{now_millis, Member, MemberStatus, NewMember, NewOrganization, Organization};
use crate::services::cache::{registration_key, CodeCache};
use crate::services::notifier::CodeNotifier;
use crate::services::store::{unit_of_work, Store};
use crate::services::ServiceError;
use crate::utils::{generate_code, hash_password, is_valid_mobile, Password};

pub const TOKEN_TYPE: &str = "bearer";

/// Knobs for code issuance and registration, taken from [`UserConfig`].
#[derive(Debug, Clone)]
pub struct LoginSettings {
    pub captcha_ttl: Duration,
    pub captcha_cache_timeout: Duration,
    pub fixed_code: Option<String>,
    pub default_avatar: String,
}

impl From<&UserConfig> for LoginSettings {
    fn from(config: &UserConfig) -> Self {
        Self {
            captcha_ttl: Duration::from_secs(config.captcha.ttl_seconds),
            captcha_cache_timeout: Duration::from_millis(config.captcha.cache_timeout_ms),
            fixed_code: config.captcha.fixed_code.clone(),
            default_avatar: config.organization.default_avatar.clone(),
        }
    }
}

#[derive(Clone, Validate)]
pub struct RegisterInput {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1, max = 64))]
    pub name: String,
    #[validate(length(min = 1))]
    pub password: String,
    pub mobile: String,
    #[validate(length(min = 1, max = 16))]
    pub captcha: String,
}

#[derive(Debug, Clone)]
pub struct LoginOutput {
    pub member: Member,
    pub organizations: Vec<Organization>,
    pub tokens: TokenPair,
    pub token_type: &'static str,
}

#[derive(Clone)]
pub struct LoginService {
    cache: Arc<dyn CodeCache>,
    store: Arc<dyn Store>,
    notifier: Arc<dyn CodeNotifier>,
    tokens: TokenIssuer,
    settings: LoginSettings,
}

impl LoginService {
    pub fn new(
        cache: Arc<dyn CodeCache>,
        store: Arc<dyn Store>,
        notifier: Arc<dyn CodeNotifier>,
        tokens: TokenIssuer,
        settings: LoginSettings,
    ) -> Self {
        Self {
            cache,
            store,
            notifier,
            tokens,
            settings,
        }
    }

    /// Issue a registration code for `mobile` and return it.
    ///
    /// Storing and delivering the code happen on a detached task with its own
    /// cache deadline; the caller gets the code without waiting for either.
    #[tracing::instrument(skip(self))]
    pub fn get_captcha(&self, mobile: &str) -> Result<String, ServiceError> {
        if !is_valid_mobile(mobile) {
            return Err(ServiceError::InvalidMobile);
        }

        let code = self
            .settings
            .fixed_code
            .clone()
            .unwrap_or_else(generate_code);

        let cache = Arc::clone(&self.cache);
        let notifier = Arc::clone(&self.notifier);
        let ttl = self.settings.captcha_ttl;
        let deadline = self.settings.captcha_cache_timeout;
        let mobile = mobile.to_string();
        let stored = code.clone();

        tokio::spawn(
            async move {
                let key = registration_key(&mobile);
                match tokio::time::timeout(deadline, cache.put(&key, &stored, ttl)).await {
                    Ok(Ok(())) => {}
                    Ok(Err(e)) => {
                        tracing::error!(error = %e, "Failed to store verification code");
                        return;
                    }
                    Err(_) => {
                        tracing::error!(
                            timeout_ms = deadline.as_millis() as u64,
                            "Timed out storing verification code"
                        );
                        return;
                    }
                }

                if let Err(e) = notifier.notify(&mobile, &stored).await {
                    tracing::warn!(error = %e, "Failed to deliver verification code");
                }
            }
            .instrument(tracing::info_span!("deliver_captcha")),
        );

        Ok(code)
    }

    /// Create a member and its personal organization.
    #[tracing::instrument(skip(self, input), fields(mobile = %input.mobile))]
    pub async fn register(&self, input: RegisterInput) -> Result<(), ServiceError> {
        input
            .validate()
            .map_err(|e| ServiceError::InvalidParams(e.to_string()))?;

        let key = registration_key(&input.mobile);
        let stored = self.cache.get(&key).await?;
        match stored {
            None => return Err(ServiceError::CodeNotFound),
            Some(code) if code != input.captcha => return Err(ServiceError::CodeMismatch),
            Some(_) => {}
        }

        if self.store.email_exists(&input.email).await? {
            return Err(ServiceError::EmailExists);
        }
        if self.store.account_exists(&input.name).await? {
            return Err(ServiceError::AccountExists);
        }
        if self.store.mobile_exists(&input.mobile).await? {
            return Err(ServiceError::MobileExists);
        }

        let now = now_millis();
        let password = hash_password(&Password::new(input.password));
        let member = NewMember {
            account: input.name.clone(),
            password: password.into_string(),
            name: input.name,
            mobile: input.mobile,
            email: input.email,
            create_time: now,
            last_login_time: now,
            status: MemberStatus::Normal,
        };
        let avatar = self.settings.default_avatar.clone();

        self.store
            .run_in_transaction(unit_of_work(move |unit| {
                Box::pin(async move {
                    let member_id = unit.insert_member(&member).await?;
                    let organization =
                        NewOrganization::personal(&member.name, member_id, &avatar, now);
                    unit.insert_organization(&organization).await?;
                    tracing::info!(member_id, "Member registered");
                    Ok(())
                })
            }))
            .await?;

        // Codes are single-use
        if let Err(e) = self.cache.delete(&key).await {
            tracing::warn!(error = %e, "Failed to delete used verification code");
        }

        Ok(())
    }

    /// Authenticate with account and password and mint a session.
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, account: &str, password: &str) -> Result<LoginOutput, ServiceError> {
        let password = hash_password(&Password::new(password.to_string()));

        let member = self
            .store
            .find_by_credentials(account, password.as_str())
            .await?
            .filter(Member::is_active)
            .ok_or(ServiceError::InvalidCredentials)?;

        let organizations = self.store.find_by_member_id(member.id).await?;
        let tokens = self.tokens.issue(&member.id.to_string())?;

        tracing::info!(member_id = member.id, "Member logged in");

        Ok(LoginOutput {
            member,
            organizations,
            tokens,
            token_type: TOKEN_TYPE,
        })
    }
}
