//! Admin login: the configured credential pair and in-memory sessions.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use rand::RngCore;
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::AdminConfig;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "soultrip_session";

/// The single admin username and password.
#[derive(Clone)]
pub struct AdminCredentials {
    username: blake3::Hash,
    password: blake3::Hash,
}

impl std::fmt::Debug for AdminCredentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredentials").finish_non_exhaustive()
    }
}

impl AdminCredentials {
    /// Hold digests of the configured pair.
    #[must_use]
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: blake3::hash(username.as_bytes()),
            password: blake3::hash(password.as_bytes()),
        }
    }

    /// Credentials from the `[admin]` config section.
    #[must_use]
    pub fn from_config(config: &AdminConfig) -> Self {
        Self::new(&config.username, &config.password)
    }

    /// Check a submitted pair.
    ///
    /// Both digests are compared every time; `blake3::Hash` equality is
    /// constant-time.
    #[must_use]
    pub fn verify(&self, username: &str, password: &str) -> bool {
        let user_ok = self.username == blake3::hash(username.as_bytes());
        let pass_ok = self.password == blake3::hash(password.as_bytes());
        user_ok & pass_ok
    }
}

#[derive(Debug, Clone)]
struct Session {
    username: String,
    expires_at: Instant,
}

/// Logged-in admin sessions keyed by random token.
#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<String, Session>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions last `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Session lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session and return its token.
    pub async fn create(&self, username: &str) -> String {
        let mut bytes = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        self.sessions.write().await.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                expires_at: Instant::now() + self.ttl,
            },
        );
        info!("Admin session started for {}", username);
        token
    }

    /// Username of a live session, or `None` for unknown or expired tokens.
    pub async fn validate(&self, token: &str) -> Option<String> {
        let sessions = self.sessions.read().await;
        sessions
            .get(token)
            .filter(|s| s.expires_at > Instant::now())
            .map(|s| s.username.clone())
    }

    /// End a session. Returns whether it existed.
    pub async fn destroy(&self, token: &str) -> bool {
        self.sessions.write().await.remove(token).is_some()
    }

    /// Drop expired sessions and return how many were removed.
    pub async fn cleanup(&self) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        before - sessions.len()
    }

    /// Number of stored sessions, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Whether no sessions are stored.
    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn a task that removes expired sessions every `interval`.
pub fn start_session_cleanup(store: SessionStore, interval: Duration) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            let removed = store.cleanup().await;
            if removed > 0 {
                debug!("Removed {} expired admin sessions", removed);
            }
        }
    })
}

/// Find a cookie value in a `Cookie` request header.
#[must_use]
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}

/// `Set-Cookie` value carrying a session token.
#[must_use]
pub fn session_cookie(token: &str, ttl: Duration, secure: bool) -> String {
    let mut cookie = format!(
        "{SESSION_COOKIE}={token}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
        ttl.as_secs()
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
#[must_use]
pub fn clear_session_cookie(secure: bool) -> String {
    let mut cookie = format!("{SESSION_COOKIE}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}
