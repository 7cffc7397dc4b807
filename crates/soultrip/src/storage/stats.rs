//! Aggregate counts for the admin area.

use super::Storage;
use crate::error::Result;
use crate::model::{Analytics, DashboardStats, MonthlyCount, Overview};

impl Storage {
    fn count(&self, sql: &str) -> Result<i64> {
        Ok(self.conn.query_row(sql, [], |row| row.get(0))?)
    }

    /// Active tours, bookings and inquiries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn overview(&self) -> Result<Overview> {
        Ok(Overview {
            tours: self.count("SELECT COUNT(*) FROM tours WHERE status = 'Active'")?,
            bookings: self.count("SELECT COUNT(*) FROM bookings")?,
            inquiries: self.count("SELECT COUNT(*) FROM contact_inquiries")?,
        })
    }

    /// Counters for the dashboard cards.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn dashboard_stats(&self) -> Result<DashboardStats> {
        let (total_tours, active_tours, featured_tours) = self.conn.query_row(
            r"
            SELECT COUNT(*),
                   COALESCE(SUM(status = 'Active'), 0),
                   COALESCE(SUM(featured = 1), 0)
            FROM tours
            ",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        let (total_bookings, pending_bookings, confirmed_bookings) = self.conn.query_row(
            r"
            SELECT COUNT(*),
                   COALESCE(SUM(status = 'Pending'), 0),
                   COALESCE(SUM(status = 'Confirmed'), 0)
            FROM bookings
            ",
            [],
            |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
        )?;
        let (total_inquiries, new_inquiries) = self.conn.query_row(
            "SELECT COUNT(*), COALESCE(SUM(status = 'New'), 0) FROM contact_inquiries",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(DashboardStats {
            total_tours,
            active_tours,
            featured_tours,
            total_bookings,
            pending_bookings,
            confirmed_bookings,
            total_inquiries,
            new_inquiries,
        })
    }

    /// Totals plus bookings per month of the current year.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn analytics(&self) -> Result<Analytics> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT CAST(strftime('%m', created_at) AS INTEGER) AS month, COUNT(*)
            FROM bookings
            WHERE strftime('%Y', created_at) = strftime('%Y', 'now')
            GROUP BY month
            ORDER BY month
            ",
        )?;
        let monthly_bookings = stmt
            .query_map([], |row| {
                Ok(MonthlyCount {
                    month: row.get(0)?,
                    count: row.get(1)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Analytics {
            total_tours: self.count("SELECT COUNT(*) FROM tours")?,
            total_bookings: self.count("SELECT COUNT(*) FROM bookings")?,
            total_contacts: self.count("SELECT COUNT(*) FROM contact_inquiries")?,
            monthly_bookings,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Datelike;

    use super::*;
    use crate::model::{BookingRequest, InquiryStatus, NewInquiry, TourInput, TourStatus};

    fn add_tour(storage: &Storage, status: TourStatus, featured: bool) -> i64 {
        storage
            .create_tour(TourInput {
                title: "Tour".to_string(),
                price: Some(50.0),
                duration: "3 days".to_string(),
                destination: "Sylhet".to_string(),
                category_id: Some(4),
                status: Some(status),
                featured: Some(featured),
                ..TourInput::default()
            })
            .unwrap()
    }

    fn add_booking(storage: &Storage, tour_id: i64) -> i64 {
        storage
            .create_booking(BookingRequest {
                name: "Guest".to_string(),
                email: "guest@example.com".to_string(),
                tour_id: Some(tour_id),
                ..BookingRequest::default()
            })
            .unwrap()
            .id
    }

    fn add_inquiry(storage: &Storage) -> i64 {
        storage
            .create_inquiry(NewInquiry {
                name: "Guest".to_string(),
                email: "guest@example.com".to_string(),
                phone: None,
                subject: None,
                message: "Hello".to_string(),
            })
            .unwrap()
    }

    #[test]
    fn test_empty_counts() {
        let storage = Storage::open_in_memory().unwrap();
        assert_eq!(storage.overview().unwrap(), Overview::default());
        assert_eq!(storage.dashboard_stats().unwrap(), DashboardStats::default());
        assert!(storage.analytics().unwrap().monthly_bookings.is_empty());
    }

    #[test]
    fn test_dashboard_stats() {
        let storage = Storage::open_in_memory().unwrap();
        let active = add_tour(&storage, TourStatus::Active, true);
        add_tour(&storage, TourStatus::Inactive, false);

        let first = add_booking(&storage, active);
        add_booking(&storage, active);
        storage
            .update_booking(
                first,
                crate::model::BookingUpdate {
                    status: Some("Confirmed".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let read = add_inquiry(&storage);
        add_inquiry(&storage);
        storage
            .update_inquiry_status(read, InquiryStatus::Read)
            .unwrap();

        let stats = storage.dashboard_stats().unwrap();
        assert_eq!(stats.total_tours, 2);
        assert_eq!(stats.active_tours, 1);
        assert_eq!(stats.featured_tours, 1);
        assert_eq!(stats.total_bookings, 2);
        assert_eq!(stats.pending_bookings, 1);
        assert_eq!(stats.confirmed_bookings, 1);
        assert_eq!(stats.total_inquiries, 2);
        assert_eq!(stats.new_inquiries, 1);

        let overview = storage.overview().unwrap();
        assert_eq!(overview.tours, 1);
        assert_eq!(overview.bookings, 2);
        assert_eq!(overview.inquiries, 2);
    }

    #[test]
    fn test_analytics_groups_current_year_by_month() {
        let storage = Storage::open_in_memory().unwrap();
        let tour = add_tour(&storage, TourStatus::Active, false);
        add_booking(&storage, tour);
        add_booking(&storage, tour);
        let old = add_booking(&storage, tour);
        storage
            .conn
            .execute(
                "UPDATE bookings SET created_at = '2001-03-01 10:00:00' WHERE id = ?1",
                [old],
            )
            .unwrap();

        let analytics = storage.analytics().unwrap();
        assert_eq!(analytics.total_bookings, 3);
        assert_eq!(analytics.total_tours, 1);
        assert_eq!(
            analytics.monthly_bookings,
            vec![MonthlyCount {
                month: chrono::Utc::now().month(),
                count: 2
            }]
        );
    }
}
