//! About page content: text sections, team members, statistics and values.

use serde::{Deserialize, Serialize};

use super::form::{opt_i64, opt_text};
use crate::error::{Error, Result};

/// A keyed block of text on the about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutSection {
    /// Row id.
    pub id: i64,
    /// Key the page template looks up, e.g. `story_content`.
    pub section_key: String,
    /// Admin-facing title.
    pub section_title: String,
    /// Body text.
    pub content: Option<String>,
    /// Optional picture.
    pub image_url: Option<String>,
    /// Sort key.
    pub order_index: i64,
}

/// A member of the team shown on the about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamMember {
    /// Row id.
    pub id: i64,
    /// Full name.
    pub name: String,
    /// Job title.
    pub position: String,
    /// Short biography.
    pub bio: Option<String>,
    /// Portrait.
    pub image_url: Option<String>,
    /// Sort key.
    pub order_index: i64,
}

/// A headline number such as "5000+ Happy Travelers".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutStat {
    /// Row id.
    pub id: i64,
    /// Unique key.
    pub stat_key: String,
    /// Displayed value, kept as text (`4.9`, `100+`).
    pub stat_value: String,
    /// Caption.
    pub stat_label: String,
    /// Sort key.
    pub order_index: i64,
}

/// A core value with an icon class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreValue {
    /// Row id.
    pub id: i64,
    /// Heading.
    pub title: String,
    /// Explanation.
    pub description: Option<String>,
    /// Icon CSS class, e.g. `fas fa-leaf`.
    pub icon: Option<String>,
    /// Sort key.
    pub order_index: i64,
}

/// Everything the about page renders, active rows only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AboutPage {
    /// Text sections.
    pub content: Vec<AboutSection>,
    /// Team members.
    pub team: Vec<TeamMember>,
    /// Headline numbers.
    pub stats: Vec<AboutStat>,
    /// Core values.
    pub values: Vec<CoreValue>,
}

impl AboutPage {
    /// Find a section by key.
    #[must_use]
    pub fn section(&self, key: &str) -> Option<&AboutSection> {
        self.content.iter().find(|s| s.section_key == key)
    }

    /// Section body text, or `fallback` when the section is missing or empty.
    #[must_use]
    pub fn text<'a>(&'a self, key: &str, fallback: &'a str) -> &'a str {
        self.section(key)
            .and_then(|s| s.content.as_deref())
            .filter(|c| !c.trim().is_empty())
            .unwrap_or(fallback)
    }
}

/// Fields for adding or editing a text section.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionInput {
    /// Unique key; only used when adding.
    #[serde(default, deserialize_with = "opt_text")]
    pub section_key: Option<String>,
    /// Admin-facing title.
    #[serde(default, deserialize_with = "opt_text")]
    pub section_title: Option<String>,
    /// Body text.
    #[serde(default)]
    pub content: Option<String>,
    /// Optional picture.
    #[serde(default, deserialize_with = "opt_text")]
    pub image_url: Option<String>,
    /// Sort key, zero when omitted.
    #[serde(default, deserialize_with = "opt_i64")]
    pub order_index: Option<i64>,
}

impl SectionInput {
    /// Require a title, and a key when adding.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the missing field.
    pub fn validate(&self, adding: bool) -> Result<()> {
        if adding && self.section_key.is_none() {
            return Err(Error::validation("Section key is required"));
        }
        if self.section_title.is_none() {
            return Err(Error::validation("Section title is required"));
        }
        Ok(())
    }
}

/// Fields for adding or editing a team member.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TeamMemberInput {
    /// Full name.
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    /// Job title.
    #[serde(default, deserialize_with = "opt_text")]
    pub position: Option<String>,
    /// Short biography.
    #[serde(default, deserialize_with = "opt_text")]
    pub bio: Option<String>,
    /// Portrait URL; replaced by an uploaded file when one is sent.
    #[serde(default, deserialize_with = "opt_text")]
    pub image_url: Option<String>,
    /// Sort key, zero when omitted.
    #[serde(default, deserialize_with = "opt_i64")]
    pub order_index: Option<i64>,
}

impl TeamMemberInput {
    /// Require name and position.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the missing field.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_none() {
            return Err(Error::validation("Name is required"));
        }
        if self.position.is_none() {
            return Err(Error::validation("Position is required"));
        }
        Ok(())
    }
}

/// Fields for adding or editing a statistic.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatInput {
    /// Unique key; only used when adding.
    #[serde(default, deserialize_with = "opt_text")]
    pub stat_key: Option<String>,
    /// Displayed value.
    #[serde(default, deserialize_with = "opt_text")]
    pub stat_value: Option<String>,
    /// Caption.
    #[serde(default, deserialize_with = "opt_text")]
    pub stat_label: Option<String>,
    /// Sort key, zero when omitted.
    #[serde(default, deserialize_with = "opt_i64")]
    pub order_index: Option<i64>,
}

impl StatInput {
    /// Require value and label, and a key when adding.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the missing field.
    pub fn validate(&self, adding: bool) -> Result<()> {
        if adding && self.stat_key.is_none() {
            return Err(Error::validation("Statistic key is required"));
        }
        if self.stat_value.is_none() || self.stat_label.is_none() {
            return Err(Error::validation("Statistic value and label are required"));
        }
        Ok(())
    }
}

/// Fields for adding or editing a core value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueInput {
    /// Heading.
    #[serde(default, deserialize_with = "opt_text")]
    pub title: Option<String>,
    /// Explanation.
    #[serde(default, deserialize_with = "opt_text")]
    pub description: Option<String>,
    /// Icon CSS class.
    #[serde(default, deserialize_with = "opt_text")]
    pub icon: Option<String>,
    /// Sort key, zero when omitted.
    #[serde(default, deserialize_with = "opt_i64")]
    pub order_index: Option<i64>,
}

impl ValueInput {
    /// Require a title.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is missing.
    pub fn validate(&self) -> Result<()> {
        if self.title.is_none() {
            return Err(Error::validation("Title is required"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page() -> AboutPage {
        AboutPage {
            content: vec![
                AboutSection {
                    id: 1,
                    section_key: "story_title".to_string(),
                    section_title: "Our Story Title".to_string(),
                    content: Some("Our Story".to_string()),
                    image_url: None,
                    order_index: 3,
                },
                AboutSection {
                    id: 2,
                    section_key: "mission_content".to_string(),
                    section_title: "Mission Content".to_string(),
                    content: Some("  ".to_string()),
                    image_url: None,
                    order_index: 6,
                },
            ],
            ..AboutPage::default()
        }
    }

    #[test]
    fn test_section_lookup() {
        let page = page();
        assert_eq!(page.section("story_title").unwrap().id, 1);
        assert!(page.section("missing").is_none());
    }

    #[test]
    fn test_text_fallback() {
        let page = page();
        assert_eq!(page.text("story_title", "x"), "Our Story");
        assert_eq!(page.text("mission_content", "Our Mission"), "Our Mission");
        assert_eq!(page.text("values_title", "Our Values"), "Our Values");
    }

    #[test]
    fn test_section_input_requires_key_when_adding() {
        let input = SectionInput {
            section_title: Some("CTA".to_string()),
            ..SectionInput::default()
        };
        assert!(input.validate(true).is_err());
        assert!(input.validate(false).is_ok());
    }

    #[test]
    fn test_team_input_from_form_strings() {
        let input: TeamMemberInput = serde_json::from_str(
            r#"{"name": "Sarah Chen", "position": "Operations Director", "bio": "", "order_index": "2"}"#,
        )
        .unwrap();
        assert!(input.validate().is_ok());
        assert!(input.bio.is_none());
        assert_eq!(input.order_index, Some(2));
    }

    #[test]
    fn test_stat_input_keeps_numeric_text() {
        let input: StatInput = serde_json::from_str(
            r#"{"stat_key": "rating", "stat_value": 4.9, "stat_label": "Average Rating"}"#,
        )
        .unwrap();
        assert_eq!(input.stat_value.as_deref(), Some("4.9"));
        assert!(input.validate(true).is_ok());
    }

    #[test]
    fn test_value_input_requires_title() {
        assert!(ValueInput::default().validate().is_err());
    }
}
