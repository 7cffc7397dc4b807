//! Tour, category and gallery types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::form::{opt_bool, opt_f64, opt_i64, opt_text};
use crate::error::{Error, Result};

/// Whether a tour is shown on the public site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TourStatus {
    /// Listed publicly and bookable.
    #[default]
    Active,
    /// Hidden from the public site; kept for the admin.
    Inactive,
}

impl TourStatus {
    /// The value stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }
}

impl std::fmt::Display for TourStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TourStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Active" => Ok(Self::Active),
            "Inactive" => Ok(Self::Inactive),
            other => Err(Error::validation(format!("Invalid tour status: {other}"))),
        }
    }
}

/// A tour category such as `ADVENTURE`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Row id.
    pub id: i64,
    /// Upper-case category name.
    pub name: String,
    /// Short description.
    pub description: Option<String>,
}

/// A tour as stored, joined with its category name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tour {
    /// Row id.
    pub id: i64,
    /// Display title.
    pub title: String,
    /// Country or region.
    pub destination: String,
    /// Free-form length, e.g. `15 days`.
    pub duration: String,
    /// Price per participant.
    pub price: f64,
    /// Cover image path or URL.
    pub image: String,
    /// Category foreign key.
    pub category_id: i64,
    /// Category name, when the category still exists.
    pub category: Option<String>,
    /// Long description.
    pub description: String,
    /// Start and end of the route.
    pub route: Option<String>,
    /// Highlight phrases.
    pub highlights: Vec<String>,
    /// Visibility.
    pub status: TourStatus,
    /// Featured tours sort first on the public listing.
    pub featured: bool,
    /// Creation time.
    pub created_at: String,
    /// Last update time.
    pub updated_at: String,
}

impl Tour {
    /// Whether the tour is publicly visible.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.status == TourStatus::Active
    }

    /// Price formatted for display, without trailing `.00`.
    #[must_use]
    pub fn display_price(&self) -> String {
        format_money(self.price)
    }
}

/// An extra picture shown on the tour detail page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    /// Row id.
    pub id: i64,
    /// Owning tour.
    pub tour_id: i64,
    /// Image path or URL.
    pub image_url: String,
    /// Alternative text.
    pub alt_text: Option<String>,
    /// Primary images are shown first.
    pub is_primary: bool,
    /// Sort key.
    pub order_index: i64,
}

/// Highlights as sent by the admin form: either a list or one text blob.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum Highlights {
    /// One entry per element.
    List(Vec<String>),
    /// Comma or newline separated.
    Text(String),
}

impl Default for Highlights {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl Highlights {
    /// Normalize into trimmed, non-empty phrases.
    #[must_use]
    pub fn into_vec(self) -> Vec<String> {
        match self {
            Self::List(items) => items.iter().flat_map(|i| split_highlights(i)).collect(),
            Self::Text(text) => split_highlights(&text),
        }
    }
}

/// Split a stored or submitted highlight string into phrases.
#[must_use]
pub fn split_highlights(text: &str) -> Vec<String> {
    text.split([',', '\n'])
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Join highlight phrases for storage.
#[must_use]
pub fn join_highlights(items: &[String]) -> String {
    items.join(",")
}

/// Format an amount with two decimals unless it is whole.
#[must_use]
pub fn format_money(amount: f64) -> String {
    if amount.fract().abs() < f64::EPSILON {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

/// Tour fields submitted by the admin when creating or editing a tour.
///
/// On update, `image`, `route`, `status` and `featured` keep their stored
/// values when omitted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TourInput {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// Price per participant.
    #[serde(default, deserialize_with = "opt_f64")]
    pub price: Option<f64>,
    /// Free-form length.
    #[serde(default)]
    pub duration: String,
    /// Country or region.
    #[serde(default)]
    pub destination: String,
    /// Category foreign key.
    #[serde(default, deserialize_with = "opt_i64")]
    pub category_id: Option<i64>,
    /// Highlight phrases.
    #[serde(default)]
    pub highlights: Highlights,
    /// Cover image path.
    #[serde(default, deserialize_with = "opt_text")]
    pub image: Option<String>,
    /// Route description.
    #[serde(default, deserialize_with = "opt_text")]
    pub route: Option<String>,
    /// Visibility.
    #[serde(default)]
    pub status: Option<TourStatus>,
    /// Featured flag.
    #[serde(default, deserialize_with = "opt_bool")]
    pub featured: Option<bool>,
}

/// A `TourInput` that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidTour {
    /// Display title.
    pub title: String,
    /// Long description.
    pub description: String,
    /// Price per participant.
    pub price: f64,
    /// Free-form length.
    pub duration: String,
    /// Country or region.
    pub destination: String,
    /// Category foreign key.
    pub category_id: i64,
    /// Comma-joined highlights.
    pub highlights: String,
    /// Cover image path.
    pub image: Option<String>,
    /// Route description.
    pub route: Option<String>,
    /// Visibility.
    pub status: Option<TourStatus>,
    /// Featured flag.
    pub featured: Option<bool>,
}

impl TourInput {
    /// Check required fields and normalize the input.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing or invalid field.
    pub fn validate(self) -> Result<ValidTour> {
        let title = required(&self.title, "Title")?;
        let destination = required(&self.destination, "Destination")?;
        let duration = required(&self.duration, "Duration")?;

        let price = self
            .price
            .ok_or_else(|| Error::validation("Price is required"))?;
        if !price.is_finite() || price < 0.0 {
            return Err(Error::validation("Price must be a positive number"));
        }

        let category_id = self
            .category_id
            .ok_or_else(|| Error::validation("Category is required"))?;

        Ok(ValidTour {
            title,
            description: self.description.trim().to_string(),
            price,
            duration,
            destination,
            category_id,
            highlights: join_highlights(&self.highlights.into_vec()),
            image: self.image,
            route: self.route,
            status: self.status,
            featured: self.featured,
        })
    }
}

fn required(value: &str, field: &str) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> TourInput {
        TourInput {
            title: "Himalayan Adventure Trek".to_string(),
            description: "Trek".to_string(),
            price: Some(1899.0),
            duration: "15 days".to_string(),
            destination: "Nepal".to_string(),
            category_id: Some(1),
            ..TourInput::default()
        }
    }

    #[test]
    fn test_split_highlights() {
        assert_eq!(
            split_highlights("Everest Base Camp, Sherpa Culture\nMountain Views,,"),
            vec!["Everest Base Camp", "Sherpa Culture", "Mountain Views"]
        );
        assert!(split_highlights("").is_empty());
    }

    #[test]
    fn test_highlights_list_and_text_agree() {
        let list = Highlights::List(vec![" A ".to_string(), "B,C".to_string(), String::new()]);
        let text = Highlights::Text("A\nB, C".to_string());
        assert_eq!(list.into_vec(), text.into_vec());
    }

    #[test]
    fn test_highlights_deserialize_both_shapes() {
        let from_list: Highlights = serde_json::from_str(r#"["Taj Mahal", "Local Cuisine"]"#).unwrap();
        let from_text: Highlights = serde_json::from_str(r#""Taj Mahal,Local Cuisine""#).unwrap();
        assert_eq!(from_list.into_vec(), from_text.into_vec());
    }

    #[test]
    fn test_tour_status_round_trip() {
        assert_eq!("Active".parse::<TourStatus>().unwrap(), TourStatus::Active);
        assert_eq!(TourStatus::Inactive.to_string(), "Inactive");
        assert!("active".parse::<TourStatus>().is_err());
    }

    #[test]
    fn test_validate_ok() {
        let mut tour = input();
        tour.highlights = Highlights::Text("A, B".to_string());
        let valid = tour.validate().unwrap();
        assert_eq!(valid.highlights, "A,B");
        assert_eq!(valid.price, 1899.0);
    }

    #[test]
    fn test_validate_missing_title() {
        let mut tour = input();
        tour.title = "   ".to_string();
        assert_eq!(tour.validate().unwrap_err().to_string(), "Title is required");
    }

    #[test]
    fn test_validate_negative_price() {
        let mut tour = input();
        tour.price = Some(-1.0);
        assert!(tour.validate().is_err());

        let mut tour = input();
        tour.price = None;
        assert_eq!(tour.validate().unwrap_err().to_string(), "Price is required");
    }

    #[test]
    fn test_validate_missing_category() {
        let mut tour = input();
        tour.category_id = None;
        assert!(tour.validate().is_err());
    }

    #[test]
    fn test_tour_input_from_form_strings() {
        let json = r#"{
            "title": "Safari", "description": "d", "price": "2499.00",
            "duration": "12 days", "destination": "Kenya", "category_id": "3",
            "highlights": "Big Five,Great Migration", "featured": "on"
        }"#;
        let input: TourInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.price, Some(2499.0));
        assert_eq!(input.category_id, Some(3));
        assert_eq!(input.featured, Some(true));
    }

    #[test]
    fn test_format_money() {
        assert_eq!(format_money(1899.0), "1899");
        assert_eq!(format_money(19.5), "19.50");
    }
}
