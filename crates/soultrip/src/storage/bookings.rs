//! Booking queries.

use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

use super::{sql_limit, text_column, Storage};
use crate::error::{Error, Result};
use crate::model::{Booking, BookingRequest, BookingUpdate};

const BOOKING_SELECT: &str = r"
    SELECT b.id, b.tour_id, t.title, b.customer_name, b.customer_email, b.customer_phone,
           b.preferred_date, b.participants, b.total_cost, b.status, b.special_requests,
           b.created_at
    FROM bookings b
    LEFT JOIN tours t ON b.tour_id = t.id
";

impl Storage {
    /// Store a booking request for an active tour.
    ///
    /// The total cost is the tour price times the number of participants at
    /// the moment of booking.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, not-found when the tour does
    /// not exist or is inactive, or any database error.
    pub fn create_booking(&self, request: BookingRequest) -> Result<Booking> {
        let booking = request.validate()?;
        let tour = self
            .get_active_tour(booking.tour_id)?
            .ok_or_else(|| Error::not_found("Tour"))?;

        #[allow(clippy::cast_precision_loss)]
        let total_cost = tour.price * booking.participants as f64;

        self.conn.execute(
            r"
            INSERT INTO bookings
                (tour_id, customer_name, customer_email, customer_phone, preferred_date,
                 participants, total_cost, special_requests)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
            params![
                booking.tour_id,
                booking.name,
                booking.email,
                booking.phone,
                booking.date,
                booking.participants,
                total_cost,
                booking.special_requests,
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!(
            "Booking {} created for tour {} ({} participants)",
            id, booking.tour_id, booking.participants
        );
        self.get_booking(id)?
            .ok_or_else(|| Error::internal("booking vanished after insert"))
    }

    /// All bookings, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_bookings(&self) -> Result<Vec<Booking>> {
        self.query_bookings("ORDER BY b.created_at DESC, b.id DESC", [])
    }

    /// The most recent bookings.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn recent_bookings(&self, limit: usize) -> Result<Vec<Booking>> {
        self.query_bookings(
            "ORDER BY b.created_at DESC, b.id DESC LIMIT ?1",
            [sql_limit(limit)],
        )
    }

    /// A booking by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_booking(&self, id: i64) -> Result<Option<Booking>> {
        let sql = format!("{BOOKING_SELECT} WHERE b.id = ?1");
        Ok(self
            .conn
            .query_row(&sql, [id], Self::row_to_booking)
            .optional()?)
    }

    /// Apply the fields present in `update` to a booking.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, not-found for an unknown id,
    /// or any database error.
    pub fn update_booking(&self, id: i64, update: BookingUpdate) -> Result<()> {
        let update = update.validate()?;
        let affected = self.conn.execute(
            r"
            UPDATE bookings SET
                customer_name = COALESCE(?1, customer_name),
                customer_email = COALESCE(?2, customer_email),
                customer_phone = COALESCE(?3, customer_phone),
                preferred_date = COALESCE(?4, preferred_date),
                participants = COALESCE(?5, participants),
                total_cost = COALESCE(?6, total_cost),
                status = COALESCE(?7, status),
                special_requests = COALESCE(?8, special_requests)
            WHERE id = ?9
            ",
            params![
                update.name,
                update.email,
                update.phone,
                update.travel_date,
                update.participants,
                update.total_amount,
                update.status.map(|s| s.as_str()),
                update.special_requests,
                id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::not_found("Booking"));
        }
        debug!("Updated booking {}", id);
        Ok(())
    }

    /// Delete a booking. Returns `false` when no booking had the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_booking(&self, id: i64) -> Result<bool> {
        let affected = self.conn.execute("DELETE FROM bookings WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    fn query_bookings<P: rusqlite::Params>(&self, tail: &str, params: P) -> Result<Vec<Booking>> {
        let sql = format!("{BOOKING_SELECT} {tail}");
        let mut stmt = self.conn.prepare(&sql)?;
        let bookings = stmt
            .query_map(params, Self::row_to_booking)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(bookings)
    }

    fn row_to_booking(row: &rusqlite::Row<'_>) -> rusqlite::Result<Booking> {
        Ok(Booking {
            id: row.get(0)?,
            tour_id: row.get(1)?,
            tour_title: row.get(2)?,
            customer_name: row.get(3)?,
            customer_email: row.get(4)?,
            customer_phone: row.get(5)?,
            preferred_date: row.get(6)?,
            participants: row.get(7)?,
            total_cost: row.get(8)?,
            status: text_column(row, 9)?,
            special_requests: row.get(10)?,
            created_at: row.get(11)?,
        })
    }
}
