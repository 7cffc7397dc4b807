//! Booking requests and their admin-side updates.

use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::form::{non_blank, opt_f64, opt_i64, opt_text};
use super::inquiry::is_valid_email;
use crate::error::{Error, Result};

/// Lifecycle of a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BookingStatus {
    /// Submitted by a customer, not yet handled.
    #[default]
    Pending,
    /// Confirmed with the customer.
    Confirmed,
    /// Cancelled by either side.
    Cancelled,
}

impl BookingStatus {
    /// All statuses in display order.
    pub const ALL: [Self; 3] = [Self::Pending, Self::Confirmed, Self::Cancelled];

    /// The value stored in the database.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Confirmed => "Confirmed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| Error::validation(format!("Invalid booking status: {s}")))
    }
}

/// A stored booking joined with its tour title.
///
/// Serialized with the field names the admin scripts expect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    /// Row id.
    pub id: i64,
    /// Booked tour.
    pub tour_id: i64,
    /// Title of the booked tour, if it still exists.
    pub tour_title: Option<String>,
    /// Customer name.
    #[serde(rename = "name")]
    pub customer_name: String,
    /// Customer email.
    #[serde(rename = "email")]
    pub customer_email: String,
    /// Customer phone.
    #[serde(rename = "phone")]
    pub customer_phone: Option<String>,
    /// Preferred travel date, `YYYY-MM-DD`.
    #[serde(rename = "travel_date")]
    pub preferred_date: Option<String>,
    /// Number of travellers.
    pub participants: i64,
    /// Price times participants at booking time.
    #[serde(rename = "total_amount")]
    pub total_cost: Option<f64>,
    /// Lifecycle state.
    pub status: BookingStatus,
    /// Free text from the customer.
    pub special_requests: Option<String>,
    /// Creation time.
    pub created_at: String,
}

/// A booking submitted from the tour detail page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingRequest {
    /// Customer name.
    #[serde(default)]
    pub name: String,
    /// Customer email.
    #[serde(default)]
    pub email: String,
    /// Customer phone.
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    /// Tour being booked.
    #[serde(
        default,
        rename = "tourId",
        alias = "tour_id",
        deserialize_with = "opt_i64"
    )]
    pub tour_id: Option<i64>,
    /// Preferred date; blank means undecided.
    #[serde(default, deserialize_with = "opt_text")]
    pub date: Option<String>,
    /// Number of travellers; defaults to one.
    #[serde(default, deserialize_with = "opt_i64")]
    pub participants: Option<i64>,
    /// Free text from the customer.
    #[serde(
        default,
        rename = "specialRequests",
        alias = "special_requests",
        deserialize_with = "opt_text"
    )]
    pub special_requests: Option<String>,
}

/// A `BookingRequest` that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    /// Tour being booked.
    pub tour_id: i64,
    /// Customer name.
    pub name: String,
    /// Customer email.
    pub email: String,
    /// Customer phone.
    pub phone: Option<String>,
    /// Preferred date, `YYYY-MM-DD`.
    pub date: Option<String>,
    /// Number of travellers, at least one.
    pub participants: i64,
    /// Free text from the customer.
    pub special_requests: Option<String>,
}

impl BookingRequest {
    /// Check required fields and normalize the request.
    ///
    /// # Errors
    ///
    /// Returns a validation error naming the first missing or invalid field.
    pub fn validate(self) -> Result<NewBooking> {
        let name = non_blank(Some(&self.name))
            .ok_or_else(|| Error::validation("Name is required"))?
            .to_string();

        let email = non_blank(Some(&self.email))
            .ok_or_else(|| Error::validation("Email is required"))?
            .to_string();
        if !is_valid_email(&email) {
            return Err(Error::validation("Please provide a valid email address"));
        }

        let tour_id = self
            .tour_id
            .ok_or_else(|| Error::validation("Tour is required"))?;

        let participants = self.participants.unwrap_or(1);
        if participants < 1 {
            return Err(Error::validation("Participants must be at least 1"));
        }

        let date = self.date.map(|d| parse_travel_date(&d)).transpose()?;

        Ok(NewBooking {
            tour_id,
            name,
            email,
            phone: self.phone,
            date,
            participants,
            special_requests: self.special_requests,
        })
    }
}

/// Admin changes to a booking. Omitted fields keep their stored value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookingUpdate {
    /// Customer name.
    #[serde(default, deserialize_with = "opt_text")]
    pub name: Option<String>,
    /// Customer email.
    #[serde(default, deserialize_with = "opt_text")]
    pub email: Option<String>,
    /// Customer phone.
    #[serde(default, deserialize_with = "opt_text")]
    pub phone: Option<String>,
    /// Preferred date.
    #[serde(default, deserialize_with = "opt_text")]
    pub travel_date: Option<String>,
    /// Number of travellers.
    #[serde(default, deserialize_with = "opt_i64")]
    pub participants: Option<i64>,
    /// Total cost override.
    #[serde(default, deserialize_with = "opt_f64")]
    pub total_amount: Option<f64>,
    /// New lifecycle state.
    #[serde(default, deserialize_with = "opt_text")]
    pub status: Option<String>,
    /// Free text.
    #[serde(default, deserialize_with = "opt_text")]
    pub special_requests: Option<String>,
}

/// A `BookingUpdate` that passed validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidBookingUpdate {
    /// Customer name.
    pub name: Option<String>,
    /// Customer email.
    pub email: Option<String>,
    /// Customer phone.
    pub phone: Option<String>,
    /// Preferred date.
    pub travel_date: Option<String>,
    /// Number of travellers.
    pub participants: Option<i64>,
    /// Total cost.
    pub total_amount: Option<f64>,
    /// Lifecycle state.
    pub status: Option<BookingStatus>,
    /// Free text.
    pub special_requests: Option<String>,
}

impl BookingUpdate {
    /// Validate the fields that are present.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a bad email, date, participant count,
    /// amount or status.
    pub fn validate(self) -> Result<ValidBookingUpdate> {
        if let Some(email) = &self.email {
            if !is_valid_email(email) {
                return Err(Error::validation("Please provide a valid email address"));
            }
        }
        if matches!(self.participants, Some(n) if n < 1) {
            return Err(Error::validation("Participants must be at least 1"));
        }
        if matches!(self.total_amount, Some(a) if !a.is_finite() || a < 0.0) {
            return Err(Error::validation("Total amount must be a positive number"));
        }

        Ok(ValidBookingUpdate {
            name: self.name,
            email: self.email,
            phone: self.phone,
            travel_date: self
                .travel_date
                .map(|d| parse_travel_date(&d))
                .transpose()?,
            participants: self.participants,
            total_amount: self.total_amount,
            status: self.status.map(|s| s.parse()).transpose()?,
            special_requests: self.special_requests,
        })
    }
}

/// Check a `YYYY-MM-DD` date and return it normalized.
///
/// # Errors
///
/// Returns a validation error if the date does not parse.
pub fn parse_travel_date(text: &str) -> Result<String> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map(|d| d.format("%Y-%m-%d").to_string())
        .map_err(|_| Error::validation("Travel date must be in YYYY-MM-DD format"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> BookingRequest {
        BookingRequest {
            name: "Rahim".to_string(),
            email: "rahim@example.com".to_string(),
            tour_id: Some(1),
            ..BookingRequest::default()
        }
    }

    #[test]
    fn test_participants_default_to_one() {
        let booking = request().validate().unwrap();
        assert_eq!(booking.participants, 1);
        assert!(booking.date.is_none());
    }

    #[test]
    fn test_zero_participants_rejected() {
        let mut req = request();
        req.participants = Some(0);
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_name_rejected() {
        let mut req = request();
        req.name = "  ".to_string();
        assert_eq!(req.validate().unwrap_err().to_string(), "Name is required");
    }

    #[test]
    fn test_bad_email_rejected() {
        let mut req = request();
        req.email = "not-an-email".to_string();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_missing_tour_rejected() {
        let mut req = request();
        req.tour_id = None;
        assert_eq!(req.validate().unwrap_err().to_string(), "Tour is required");
    }

    #[test]
    fn test_date_format_checked() {
        let mut req = request();
        req.date = Some("2026-02-30".to_string());
        assert!(req.validate().is_err());

        let mut req = request();
        req.date = Some("2026-12-01".to_string());
        assert_eq!(req.validate().unwrap().date.as_deref(), Some("2026-12-01"));
    }

    #[test]
    fn test_request_from_booking_form_json() {
        let json = r#"{
            "name": "Rahim", "email": "rahim@example.com", "phone": "",
            "tourId": "3", "date": "", "participants": "2",
            "specialRequests": "Vegetarian meals"
        }"#;
        let req: BookingRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.tour_id, Some(3));
        assert_eq!(req.participants, Some(2));
        assert!(req.phone.is_none());
        assert!(req.date.is_none());
        assert_eq!(req.special_requests.as_deref(), Some("Vegetarian meals"));
    }

    #[test]
    fn test_request_accepts_snake_case_tour_id() {
        let req: BookingRequest =
            serde_json::from_str(r#"{"name": "A", "email": "a@b.co", "tour_id": 4}"#).unwrap();
        assert_eq!(req.tour_id, Some(4));
    }

    #[test]
    fn test_booking_serializes_admin_field_names() {
        let booking = Booking {
            id: 1,
            tour_id: 2,
            tour_title: Some("Safari".to_string()),
            customer_name: "Rahim".to_string(),
            customer_email: "rahim@example.com".to_string(),
            customer_phone: None,
            preferred_date: Some("2026-12-01".to_string()),
            participants: 2,
            total_cost: Some(4998.0),
            status: BookingStatus::Pending,
            special_requests: None,
            created_at: "2026-10-01 10:00:00".to_string(),
        };
        let value = serde_json::to_value(&booking).unwrap();
        assert_eq!(value["name"], "Rahim");
        assert_eq!(value["travel_date"], "2026-12-01");
        assert_eq!(value["total_amount"], 4998.0);
        assert_eq!(value["status"], "Pending");
    }

    #[test]
    fn test_update_validation() {
        let update = BookingUpdate {
            status: Some("Confirmed".to_string()),
            participants: Some(3),
            ..BookingUpdate::default()
        };
        let valid = update.validate().unwrap();
        assert_eq!(valid.status, Some(BookingStatus::Confirmed));
        assert_eq!(valid.participants, Some(3));

        let update = BookingUpdate {
            status: Some("Done".to_string()),
            ..BookingUpdate::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_booking_status_parse() {
        assert_eq!("Cancelled".parse::<BookingStatus>().unwrap(), BookingStatus::Cancelled);
        assert!("cancelled".parse::<BookingStatus>().is_err());
    }
}
