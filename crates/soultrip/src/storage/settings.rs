//! Website settings queries and the settings the site ships with.

use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

use super::{text_column, Storage};
use crate::error::{Error, Result};
use crate::model::{DefaultSetting, NewSetting, Setting, SettingType};

const fn default(
    key: &'static str,
    value: &'static str,
    kind: SettingType,
    category: &'static str,
    display_name: &'static str,
    description: &'static str,
    sort_order: i64,
) -> DefaultSetting {
    DefaultSetting {
        key,
        value,
        kind,
        category,
        display_name,
        description,
        sort_order,
    }
}

/// Settings installed on a fresh database and restored by `reset_settings`.
pub const DEFAULT_SETTINGS: &[DefaultSetting] = &[
    default("site_name", "Soul Trip Tours & Travels", SettingType::Text, "identity", "Site Name", "Main website name", 1),
    default("site_tagline", "Discover Amazing Adventures", SettingType::Text, "identity", "Site Tagline", "Website tagline/slogan", 2),
    default("site_logo", "/logo/soul-trip-logo.svg", SettingType::Image, "identity", "Site Logo", "Main website logo", 3),
    default("site_favicon", "/favicon.ico", SettingType::Image, "identity", "Site Favicon", "Website favicon", 4),
    default("contact_email", "soultripst@gmail.com", SettingType::Email, "contact", "Contact Email", "Main contact email address", 1),
    default("contact_phone", "+880 1616-578097", SettingType::Phone, "contact", "Contact Phone", "Main contact phone number", 2),
    default("contact_address", "Green City Regency, 26-27 kakrail, Level-11, Dhaka-1000", SettingType::Textarea, "contact", "Contact Address", "Physical business address", 3),
    default("social_facebook", "https://facebook.com/soultriptours", SettingType::Url, "social", "Facebook URL", "Facebook page URL", 1),
    default("social_instagram", "https://instagram.com/soultriptours", SettingType::Url, "social", "Instagram URL", "Instagram profile URL", 2),
    default("social_twitter", "https://twitter.com/soultriptours", SettingType::Url, "social", "Twitter URL", "Twitter profile URL", 3),
    default("social_youtube", "https://youtube.com/soultriptours", SettingType::Url, "social", "YouTube URL", "YouTube channel URL", 4),
    default("hero_title", "Travel Your", SettingType::Text, "homepage", "Hero Title", "Main hero section title", 1),
    default("hero_title_highlight", "Heart Out", SettingType::Text, "homepage", "Hero Title Highlight", "The highlighted part of the hero title", 2),
    default(
        "hero_subtitle",
        "Small group adventures that bring the world closer. Discover breathtaking destinations with expert guides and unforgettable experiences.",
        SettingType::Textarea,
        "homepage",
        "Hero Subtitle",
        "Hero section subtitle/description",
        3,
    ),
    default(
        "hero_background",
        "https://images.unsplash.com/photo-1488646953014-85cb44e25828?ixlib=rb-4.0.3&auto=format&fit=crop&w=2835&q=80",
        SettingType::Image,
        "homepage",
        "Hero Background",
        "Hero section background image",
        4,
    ),
    default("about_title", "Why Travel with Soul Trip", SettingType::Text, "about", "About Section Title", "About section main title", 1),
    default(
        "about_description",
        "We create extraordinary travel experiences that connect you with the world's most amazing destinations.",
        SettingType::Textarea,
        "about",
        "About Description",
        "About section description",
        2,
    ),
    default(
        "footer_description",
        "Your trusted partner for unforgettable adventures around the world. We create memories that last a lifetime.",
        SettingType::Textarea,
        "footer",
        "Footer Description",
        "Footer description text",
        1,
    ),
    default("footer_copyright", "© 2025 Soul Trip Tours & Travels. All rights reserved.", SettingType::Text, "footer", "Copyright Text", "Footer copyright text", 2),
    default(
        "meta_description",
        "Discover amazing destinations with Soul Trip Tours and Travels. Expert guides, small groups, unforgettable experiences.",
        SettingType::Textarea,
        "seo",
        "Meta Description",
        "Default meta description for SEO",
        1,
    ),
    default(
        "meta_keywords",
        "travel, tours, adventures, destinations, guided tours, travel agency",
        SettingType::Textarea,
        "seo",
        "Meta Keywords",
        "Default meta keywords for SEO",
        2,
    ),
    default("business_hours", "Saturday-Thursday: 9:00 AM - 6:00 PM, Friday: Closed", SettingType::Text, "business", "Business Hours", "Weekly business hours", 1),
    default("emergency_contact", "+880 1616-578097", SettingType::Phone, "business", "Emergency Contact", "24/7 emergency contact number", 2),
    default("notification_email", "admin@soultriptours.com", SettingType::Email, "system", "Notification Email", "Email for system notifications", 1),
    default("booking_confirmation_subject", "Booking Confirmation - Soul Trip Tours", SettingType::Text, "system", "Booking Email Subject", "Subject for booking confirmation emails", 2),
];

const SETTING_SELECT: &str = r"
    SELECT setting_key, setting_value, setting_type, category, display_name, description,
           is_editable, sort_order, created_at, updated_at
    FROM website_settings
";

impl Storage {
    /// Every setting, grouped by category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn all_settings(&self) -> Result<Vec<Setting>> {
        self.query_settings("ORDER BY category, sort_order, display_name", [])
    }

    /// Settings of one category.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn settings_by_category(&self, category: &str) -> Result<Vec<Setting>> {
        self.query_settings(
            "WHERE category = ?1 ORDER BY sort_order, display_name",
            [category],
        )
    }

    /// A single setting by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_setting(&self, key: &str) -> Result<Option<Setting>> {
        let sql = format!("{SETTING_SELECT} WHERE setting_key = ?1");
        Ok(self
            .conn
            .query_row(&sql, [key], Self::row_to_setting)
            .optional()?)
    }

    /// Key to raw value for every setting with a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn setting_values(&self) -> Result<HashMap<String, String>> {
        let mut stmt = self.conn.prepare(
            "SELECT setting_key, setting_value FROM website_settings WHERE setting_value IS NOT NULL",
        )?;
        let values = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<HashMap<_, _>, _>>()?;
        Ok(values)
    }

    /// Change a setting's value. Returns `false` when the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn update_setting(&self, key: &str, value: &str) -> Result<bool> {
        let affected = self.conn.execute(
            r"
            UPDATE website_settings
            SET setting_value = ?1, updated_at = datetime('now')
            WHERE setting_key = ?2
            ",
            params![value, key],
        )?;
        debug!("Updated setting {} ({} row)", key, affected);
        Ok(affected > 0)
    }

    /// Create a new setting.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed key or value, a conflict
    /// when the key already exists, or any database error.
    pub fn add_setting(&self, setting: &NewSetting) -> Result<()> {
        setting.validate()?;
        if self.get_setting(&setting.key)?.is_some() {
            return Err(Error::conflict(format!(
                "Setting {} already exists",
                setting.key
            )));
        }

        let next_order: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(sort_order), 0) + 1 FROM website_settings WHERE category = ?1",
            [&setting.category],
            |row| row.get(0),
        )?;

        self.conn.execute(
            r"
            INSERT INTO website_settings
                (setting_key, setting_value, setting_type, category, display_name, description, sort_order)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
            params![
                setting.key,
                setting.value,
                setting.kind.as_str(),
                setting.category,
                setting.display_name,
                setting.description,
                next_order,
            ],
        )?;
        info!("Added setting {} in category {}", setting.key, setting.category);
        Ok(())
    }

    /// Remove a setting. Returns `false` when the key does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_setting(&self, key: &str) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM website_settings WHERE setting_key = ?1", [key])?;
        Ok(affected > 0)
    }

    /// Restore every shipped setting to its default value, re-creating any
    /// that were deleted. Settings added later are left alone.
    ///
    /// Returns the number of settings written.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn reset_settings(&self) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let mut written = 0;

        for setting in DEFAULT_SETTINGS {
            written += tx.execute(
                r"
                INSERT INTO website_settings
                    (setting_key, setting_value, setting_type, category, display_name, description, sort_order)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                ON CONFLICT(setting_key) DO UPDATE SET
                    setting_value = excluded.setting_value,
                    setting_type = excluded.setting_type,
                    category = excluded.category,
                    display_name = excluded.display_name,
                    description = excluded.description,
                    sort_order = excluded.sort_order,
                    updated_at = datetime('now')
                ",
                params![
                    setting.key,
                    setting.value,
                    setting.kind.as_str(),
                    setting.category,
                    setting.display_name,
                    setting.description,
                    setting.sort_order,
                ],
            )?;
        }

        tx.commit()?;
        info!("Reset {} settings to defaults", written);
        Ok(written)
    }

    fn query_settings<P: rusqlite::Params>(&self, tail: &str, params: P) -> Result<Vec<Setting>> {
        let sql = format!("{SETTING_SELECT} {tail}");
        let mut stmt = self.conn.prepare(&sql)?;
        let settings = stmt
            .query_map(params, Self::row_to_setting)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(settings)
    }

    fn row_to_setting(row: &rusqlite::Row<'_>) -> rusqlite::Result<Setting> {
        Ok(Setting {
            key: row.get(0)?,
            value: row.get(1)?,
            kind: text_column(row, 2)?,
            category: row.get(3)?,
            display_name: row.get(4)?,
            description: row.get(5)?,
            is_editable: row.get(6)?,
            sort_order: row.get(7)?,
            created_at: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }
}
