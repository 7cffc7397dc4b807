//! Website settings editable from the admin area.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// How a setting is edited and interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingType {
    /// Single line of text.
    #[default]
    Text,
    /// Multi-line text.
    Textarea,
    /// Link.
    Url,
    /// Image path or URL.
    Image,
    /// Email address.
    Email,
    /// Phone number.
    Phone,
    /// JSON document.
    Json,
}

impl SettingType {
    /// All types.
    pub const ALL: [Self; 7] = [
        Self::Text,
        Self::Textarea,
        Self::Url,
        Self::Image,
        Self::Email,
        Self::Phone,
        Self::Json,
    ];

    /// The value stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Url => "url",
            Self::Image => "image",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Json => "json",
        }
    }
}

impl std::fmt::Display for SettingType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SettingType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Invalid setting type: {s}")))
    }
}

/// A stored setting row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    /// Unique key, e.g. `site_name`.
    #[serde(rename = "setting_key")]
    pub key: String,
    /// Raw stored value.
    pub value: Option<String>,
    /// Editor type.
    #[serde(rename = "type")]
    pub kind: SettingType,
    /// Group shown on the admin settings page.
    pub category: String,
    /// Label for the editor.
    pub display_name: Option<String>,
    /// Help text for the editor.
    pub description: Option<String>,
    /// Whether the admin may change it.
    pub is_editable: bool,
    /// Position within the category.
    pub sort_order: i64,
    /// Creation time.
    pub created_at: String,
    /// Last update time.
    pub updated_at: String,
}

impl Setting {
    /// The value as JSON: parsed for `json` settings, a string otherwise.
    ///
    /// A `json` setting that fails to parse is returned as its raw string.
    #[must_use]
    pub fn parsed_value(&self) -> serde_json::Value {
        let Some(raw) = self.value.as_deref() else {
            return serde_json::Value::Null;
        };
        if self.kind == SettingType::Json {
            if let Ok(value) = serde_json::from_str(raw) {
                return value;
            }
        }
        serde_json::Value::String(raw.to_string())
    }

    /// Label for the editor, falling back to the key.
    #[must_use]
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.key)
    }
}

/// A setting the site ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefaultSetting {
    /// Unique key.
    pub key: &'static str,
    /// Initial value.
    pub value: &'static str,
    /// Editor type.
    pub kind: SettingType,
    /// Group.
    pub category: &'static str,
    /// Label.
    pub display_name: &'static str,
    /// Help text.
    pub description: &'static str,
    /// Position within the group.
    pub sort_order: i64,
}

/// A setting created from the CLI or the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct NewSetting {
    /// Unique key.
    pub key: String,
    /// Initial value.
    pub value: String,
    /// Editor type.
    #[serde(default)]
    pub kind: SettingType,
    /// Group.
    #[serde(default = "default_category")]
    pub category: String,
    /// Label.
    #[serde(default)]
    pub display_name: Option<String>,
    /// Help text.
    #[serde(default)]
    pub description: Option<String>,
}

fn default_category() -> String {
    "general".to_string()
}

impl NewSetting {
    /// Check the key shape and, for `json` settings, the value.
    ///
    /// # Errors
    ///
    /// Returns a validation error for an empty or malformed key, or invalid JSON.
    pub fn validate(&self) -> Result<()> {
        let key_ok = !self.key.is_empty()
            && self
                .key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
        if !key_ok {
            return Err(Error::validation(
                "Setting key must use lowercase letters, digits and underscores",
            ));
        }
        if self.kind == SettingType::Json {
            serde_json::from_str::<serde_json::Value>(&self.value)
                .map_err(|e| Error::validation(format!("Invalid JSON value: {e}")))?;
        }
        Ok(())
    }
}

/// Body of `POST /admin/settings/update`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingUpdate {
    /// Key of the setting to change.
    #[serde(default)]
    pub setting_key: Option<String>,
    /// New value; objects are stored as JSON text.
    #[serde(default)]
    pub value: Option<serde_json::Value>,
}

impl SettingUpdate {
    /// Extract the key and the text to store.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the key or the value is missing.
    pub fn into_parts(self) -> Result<(String, String)> {
        let key = self
            .setting_key
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| Error::validation("Setting key and value are required"))?;
        let value = match self.value {
            None | Some(serde_json::Value::Null) => {
                return Err(Error::validation("Setting key and value are required"))
            }
            Some(serde_json::Value::String(text)) => text,
            Some(other) => other.to_string(),
        };
        Ok((key, value))
    }
}
