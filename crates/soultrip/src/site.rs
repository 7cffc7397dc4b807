//! Settings every page renders, and their time-expiring cache.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use crate::storage::Storage;

const WEEKDAYS: [&str; 7] = [
    "monday",
    "tuesday",
    "wednesday",
    "thursday",
    "friday",
    "saturday",
    "sunday",
];

/// Flattened website settings with fallbacks for missing or empty values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiteSettings {
    /// Business name shown in the header and titles.
    pub site_name: String,
    /// Short line under the name.
    pub site_tagline: String,
    /// Logo image path.
    pub site_logo: String,
    /// Favicon path.
    pub site_favicon: String,
    /// Public contact address.
    pub contact_email: String,
    /// Public phone number.
    pub contact_phone: String,
    /// Office address.
    pub contact_address: String,
    /// Facebook page URL; empty hides the link.
    pub social_facebook: String,
    /// Instagram URL.
    pub social_instagram: String,
    /// Twitter URL.
    pub social_twitter: String,
    /// YouTube URL.
    pub social_youtube: String,
    /// Home page hero heading.
    pub hero_title: String,
    /// Highlighted tail of the hero heading.
    pub hero_title_highlight: String,
    /// Text under the hero heading.
    pub hero_subtitle: String,
    /// Hero background image; empty uses the stylesheet default.
    pub hero_background: String,
    /// Heading of the home page about block.
    pub about_title: String,
    /// Body of the home page about block.
    pub about_description: String,
    /// Footer blurb.
    pub footer_description: String,
    /// Copyright line.
    pub footer_copyright: String,
    /// `<meta name="description">` content.
    pub meta_description: String,
    /// `<meta name="keywords">` content.
    pub meta_keywords: String,
    /// Human-readable hours; JSON stored values are flattened.
    pub business_hours: String,
    /// Phone for travellers on tour.
    pub emergency_contact: String,
    /// Where owner notifications go; empty when unset.
    pub notification_email: String,
    /// Subject line of booking notifications.
    pub booking_subject: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self::from_values(&HashMap::new())
    }
}

impl SiteSettings {
    /// Build from raw `setting_key -> setting_value` pairs.
    #[must_use]
    pub fn from_values(values: &HashMap<String, String>) -> Self {
        let get = |key: &str, fallback: &str| -> String {
            values
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        Self {
            site_name: get("site_name", "Soul Trip Tours"),
            site_tagline: get("site_tagline", "Discover Amazing Adventures"),
            site_logo: get("site_logo", "/logo/soul-trip-logo.svg"),
            site_favicon: get("site_favicon", "/favicon.ico"),
            contact_email: get("contact_email", "soultripst@gmail.com"),
            contact_phone: get("contact_phone", "+880 1616-578097"),
            contact_address: get(
                "contact_address",
                "Green City Regency, 26-27 kakrail, Level-11, Dhaka-1000",
            ),
            social_facebook: get("social_facebook", ""),
            social_instagram: get("social_instagram", ""),
            social_twitter: get("social_twitter", ""),
            social_youtube: get("social_youtube", ""),
            hero_title: get("hero_title", "Travel Your"),
            hero_title_highlight: get("hero_title_highlight", "Heart Out"),
            hero_subtitle: get(
                "hero_subtitle",
                "Small group adventures that bring the world closer.",
            ),
            hero_background: get("hero_background", ""),
            about_title: get("about_title", "About Soul Trip Tours"),
            about_description: get(
                "about_description",
                "We are passionate about creating unforgettable travel experiences.",
            ),
            footer_description: get(
                "footer_description",
                "Your trusted partner for unforgettable adventures.",
            ),
            footer_copyright: get(
                "footer_copyright",
                "© 2025 Soul Trip Tours & Travels. All rights reserved.",
            ),
            meta_description: get(
                "meta_description",
                "Discover amazing destinations with Soul Trip Tours.",
            ),
            meta_keywords: get("meta_keywords", "travel, tours, adventures"),
            business_hours: format_business_hours(&get(
                "business_hours",
                "Saturday-Thursday: 9:00 AM - 6:00 PM, Friday: Closed",
            )),
            emergency_contact: get("emergency_contact", "+880 1616-578097"),
            notification_email: get("notification_email", ""),
            booking_subject: get(
                "booking_confirmation_subject",
                "Booking Confirmation - Soul Trip Tours",
            ),
        }
    }

    /// Default `<title>` for pages without their own.
    #[must_use]
    pub fn seo_title(&self) -> String {
        format!("{} - {}", self.site_name, self.site_tagline)
    }

    /// Social links that are set, as (network, url).
    #[must_use]
    pub fn social_links(&self) -> Vec<(&'static str, &str)> {
        [
            ("facebook", self.social_facebook.as_str()),
            ("instagram", self.social_instagram.as_str()),
            ("twitter", self.social_twitter.as_str()),
            ("youtube", self.social_youtube.as_str()),
        ]
        .into_iter()
        .filter(|(_, url)| !url.is_empty())
        .collect()
    }
}

/// Render stored business hours for display.
///
/// A JSON object keyed by weekday becomes `Monday: ...; Tuesday: ...` in
/// weekday order. Anything else is shown as stored.
#[must_use]
pub fn format_business_hours(raw: &str) -> String {
    let Ok(serde_json::Value::Object(days)) = serde_json::from_str::<serde_json::Value>(raw) else {
        return raw.to_string();
    };

    let parts: Vec<String> = WEEKDAYS
        .iter()
        .filter_map(|day| {
            let hours = days.get(*day)?;
            let hours = hours
                .as_str()
                .map_or_else(|| hours.to_string(), ToString::to_string);
            let mut name = day.to_string();
            name[..1].make_ascii_uppercase();
            Some(format!("{name}: {hours}"))
        })
        .collect();

    if parts.is_empty() {
        raw.to_string()
    } else {
        parts.join("; ")
    }
}

const CACHE_KEY: &str = "site";

/// Time-expiring cache of the current [`SiteSettings`].
#[derive(Clone)]
pub struct SiteSettingsCache {
    cache: Cache<&'static str, Arc<SiteSettings>>,
    ttl: Duration,
}

impl std::fmt::Debug for SiteSettingsCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SiteSettingsCache")
            .field("ttl", &self.ttl)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

impl SiteSettingsCache {
    /// Create an empty cache whose entry lives for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let cache = Cache::builder().max_capacity(1).time_to_live(ttl).build();
        Self { cache, ttl }
    }

    /// Current settings, loading them from storage when the cache is cold.
    ///
    /// A storage failure yields the defaults, which are not cached.
    pub async fn get(&self, storage: &Mutex<Storage>) -> Arc<SiteSettings> {
        if let Some(settings) = self.cache.get(&CACHE_KEY).await {
            return settings;
        }

        let loaded = storage.lock().await.setting_values();
        match loaded {
            Ok(values) => {
                debug!("Loaded {} settings into cache", values.len());
                let settings = Arc::new(SiteSettings::from_values(&values));
                self.cache.insert(CACHE_KEY, Arc::clone(&settings)).await;
                settings
            }
            Err(e) => {
                warn!("Failed to load website settings, using defaults: {}", e);
                Arc::new(SiteSettings::default())
            }
        }
    }

    /// Drop the cached entry so the next read goes to storage.
    pub async fn invalidate(&self) {
        self.cache.invalidate(&CACHE_KEY).await;
    }
}
