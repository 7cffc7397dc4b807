//! State shared by every handler.

use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::{AdminCredentials, SessionStore};
use crate::config::Config;
use crate::mail::Mailer;
use crate::rate_limit::{RateLimitConfig, RateLimiter};
use crate::site::{SiteSettings, SiteSettingsCache};
use crate::storage::Storage;
use crate::uploads::UploadStore;

/// Handles to everything a request may touch. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database; hold the lock only for synchronous queries.
    pub storage: Arc<Mutex<Storage>>,
    /// Settings rendered into every public page.
    pub site: SiteSettingsCache,
    /// Logged-in admin sessions.
    pub sessions: SessionStore,
    /// The admin login.
    pub credentials: AdminCredentials,
    /// Where uploaded images go.
    pub uploads: UploadStore,
    /// Outgoing mail.
    pub mailer: Arc<dyn Mailer>,
    /// Limiter over every request.
    pub limiter: RateLimiter,
    /// Limiter over settings writes and logo uploads.
    pub settings_limiter: RateLimiter,
    /// Add `Secure` to the session cookie.
    pub secure_cookies: bool,
    /// Sender address, also the fallback owner address.
    pub mail_from: String,
}

impl AppState {
    /// Assemble the state from configuration, an open database and a mailer.
    #[must_use]
    pub fn new(config: &Config, storage: Storage, mailer: Arc<dyn Mailer>) -> Self {
        Self {
            storage: Arc::new(Mutex::new(storage)),
            site: SiteSettingsCache::new(config.settings_ttl()),
            sessions: SessionStore::new(config.session_ttl()),
            credentials: AdminCredentials::from_config(&config.admin),
            uploads: UploadStore::new(&config.server.public_dir, config.uploads.max_bytes),
            mailer,
            limiter: RateLimiter::new("global", RateLimitConfig::global(&config.rate_limit)),
            settings_limiter: RateLimiter::new(
                "settings",
                RateLimitConfig::settings_writes(&config.rate_limit),
            ),
            secure_cookies: config.admin.secure_cookies,
            mail_from: config.mail.from.clone(),
        }
    }

    /// Current site settings from the cache.
    pub async fn site(&self) -> Arc<SiteSettings> {
        self.site.get(&self.storage).await
    }

    /// Address owner notifications are sent to.
    pub async fn owner_email(&self) -> String {
        let site = self.site().await;
        if site.notification_email.is_empty() {
            self.mail_from.clone()
        } else {
            site.notification_email.clone()
        }
    }
}
