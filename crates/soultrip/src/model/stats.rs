//! Counts shown on the admin dashboard and analytics page.

use serde::{Deserialize, Serialize};

/// Headline counts for `GET /api/admin/stats`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Overview {
    /// Active tours.
    pub tours: i64,
    /// All bookings.
    pub bookings: i64,
    /// All contact inquiries.
    pub inquiries: i64,
}

/// Counters for the dashboard cards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    /// Tours in any state.
    pub total_tours: i64,
    /// Publicly visible tours.
    pub active_tours: i64,
    /// Featured tours.
    pub featured_tours: i64,
    /// All bookings.
    pub total_bookings: i64,
    /// Bookings awaiting confirmation.
    pub pending_bookings: i64,
    /// Confirmed bookings.
    pub confirmed_bookings: i64,
    /// All inquiries.
    pub total_inquiries: i64,
    /// Unread inquiries.
    pub new_inquiries: i64,
}

/// Bookings made in one month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyCount {
    /// Month number, 1 to 12.
    pub month: u32,
    /// Bookings created that month.
    pub count: i64,
}

impl MonthlyCount {
    /// Short English month name.
    #[must_use]
    pub fn month_name(&self) -> &'static str {
        const NAMES: [&str; 12] = [
            "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
        ];
        self.month
            .checked_sub(1)
            .and_then(|i| NAMES.get(i as usize))
            .copied()
            .unwrap_or("?")
    }
}

/// Data for the analytics page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    /// Tours in any state.
    pub total_tours: i64,
    /// All bookings.
    pub total_bookings: i64,
    /// All inquiries.
    pub total_contacts: i64,
    /// Bookings per month of the current year, months without bookings omitted.
    pub monthly_bookings: Vec<MonthlyCount>,
}

impl Analytics {
    /// Largest monthly count, for scaling the chart.
    #[must_use]
    pub fn busiest_month(&self) -> i64 {
        self.monthly_bookings
            .iter()
            .map(|m| m.count)
            .max()
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_name() {
        assert_eq!(MonthlyCount { month: 1, count: 0 }.month_name(), "Jan");
        assert_eq!(MonthlyCount { month: 12, count: 0 }.month_name(), "Dec");
        assert_eq!(MonthlyCount { month: 0, count: 0 }.month_name(), "?");
        assert_eq!(MonthlyCount { month: 13, count: 0 }.month_name(), "?");
    }

    #[test]
    fn test_analytics_serializes_camel_case() {
        let analytics = Analytics {
            total_tours: 6,
            ..Analytics::default()
        };
        let value = serde_json::to_value(&analytics).unwrap();
        assert_eq!(value["totalTours"], 6);
        assert!(value["monthlyBookings"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_busiest_month() {
        let analytics = Analytics {
            monthly_bookings: vec![
                MonthlyCount { month: 2, count: 4 },
                MonthlyCount { month: 3, count: 9 },
            ],
            ..Analytics::default()
        };
        assert_eq!(analytics.busiest_month(), 9);
        assert_eq!(Analytics::default().busiest_month(), 0);
    }
}
