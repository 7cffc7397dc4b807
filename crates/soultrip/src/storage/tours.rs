//! Tour, category and gallery queries.

use rusqlite::{params, OptionalExtension};
use tracing::{debug, info};

use super::{sql_limit, text_column, Storage};
use crate::error::{Error, Result};
use crate::model::tour::split_highlights;
use crate::model::{Category, GalleryImage, Tour, TourInput};

const TOUR_SELECT: &str = r"
    SELECT t.id, t.title, t.destination, t.duration, t.price, t.image, t.category_id,
           c.name, t.description, t.route, t.highlights, t.status, t.featured,
           t.created_at, t.updated_at
    FROM tours t
    LEFT JOIN categories c ON t.category_id = c.id
";

impl Storage {
    /// Publicly visible tours, featured first, then newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_active_tours(&self) -> Result<Vec<Tour>> {
        self.query_tours(
            "WHERE t.status = 'Active' ORDER BY t.featured DESC, t.created_at DESC, t.id DESC",
            [],
        )
    }

    /// Publicly visible tours in a category, newest first.
    ///
    /// The category name is matched case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_tours_by_category(&self, category: &str) -> Result<Vec<Tour>> {
        self.query_tours(
            "WHERE t.status = 'Active' AND c.name = ?1 COLLATE NOCASE \
             ORDER BY t.created_at DESC, t.id DESC",
            [category.trim()],
        )
    }

    /// Every tour regardless of status, for the admin.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_all_tours(&self) -> Result<Vec<Tour>> {
        self.query_tours("ORDER BY t.featured DESC, t.created_at DESC, t.id DESC", [])
    }

    /// The first `limit` tours from [`Storage::list_all_tours`].
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_recent_tours(&self, limit: usize) -> Result<Vec<Tour>> {
        self.query_tours(
            "ORDER BY t.featured DESC, t.created_at DESC, t.id DESC LIMIT ?1",
            [sql_limit(limit)],
        )
    }

    /// A publicly visible tour by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_active_tour(&self, id: i64) -> Result<Option<Tour>> {
        let sql = format!("{TOUR_SELECT} WHERE t.id = ?1 AND t.status = 'Active'");
        Ok(self
            .conn
            .query_row(&sql, [id], Self::row_to_tour)
            .optional()?)
    }

    /// A tour by id in any status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn get_tour(&self, id: i64) -> Result<Option<Tour>> {
        let sql = format!("{TOUR_SELECT} WHERE t.id = ?1");
        Ok(self
            .conn
            .query_row(&sql, [id], Self::row_to_tour)
            .optional()?)
    }

    /// Gallery images of a tour, primary first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn tour_gallery(&self, tour_id: i64) -> Result<Vec<GalleryImage>> {
        let mut stmt = self.conn.prepare(
            r"
            SELECT id, tour_id, image_url, alt_text, is_primary, order_index
            FROM tour_gallery WHERE tour_id = ?1
            ORDER BY is_primary DESC, order_index, id
            ",
        )?;
        let images = stmt
            .query_map([tour_id], |row| {
                Ok(GalleryImage {
                    id: row.get(0)?,
                    tour_id: row.get(1)?,
                    image_url: row.get(2)?,
                    alt_text: row.get(3)?,
                    is_primary: row.get(4)?,
                    order_index: row.get(5)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(images)
    }

    /// Attach an image to a tour's gallery.
    ///
    /// # Errors
    ///
    /// Returns an error if the tour does not exist or the insert fails.
    pub fn add_gallery_image(
        &self,
        tour_id: i64,
        image_url: &str,
        alt_text: Option<&str>,
        is_primary: bool,
    ) -> Result<i64> {
        if self.get_tour(tour_id)?.is_none() {
            return Err(Error::not_found("Tour"));
        }
        self.conn.execute(
            r"
            INSERT INTO tour_gallery (tour_id, image_url, alt_text, is_primary, order_index)
            VALUES (?1, ?2, ?3, ?4,
                    (SELECT COALESCE(MAX(order_index), 0) + 1 FROM tour_gallery WHERE tour_id = ?1))
            ",
            params![tour_id, image_url, alt_text, is_primary],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// All tour categories by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, description FROM categories ORDER BY id")?;
        let categories = stmt
            .query_map([], |row| {
                Ok(Category {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    description: row.get(2)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(categories)
    }

    /// Create a tour and return its id.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields, a bad price or an
    /// unknown category; otherwise any database error.
    pub fn create_tour(&self, input: TourInput) -> Result<i64> {
        let tour = input.validate()?;
        self.ensure_category(tour.category_id)?;

        self.conn.execute(
            r"
            INSERT INTO tours
                (title, description, price, duration, destination, category_id,
                 image, highlights, route, status, featured)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            ",
            params![
                tour.title,
                tour.description,
                tour.price,
                tour.duration,
                tour.destination,
                tour.category_id,
                tour.image.unwrap_or_default(),
                tour.highlights,
                tour.route,
                tour.status.unwrap_or_default().as_str(),
                tour.featured.unwrap_or(false),
            ],
        )?;

        let id = self.conn.last_insert_rowid();
        info!("Created tour {} ({})", id, tour.title);
        Ok(id)
    }

    /// Replace a tour's fields.
    ///
    /// Image, route, status and featured keep their stored values when the
    /// input leaves them out.
    ///
    /// # Errors
    ///
    /// Returns a validation error for bad input, not-found for an unknown id,
    /// or any database error.
    pub fn update_tour(&self, id: i64, input: TourInput) -> Result<()> {
        let tour = input.validate()?;
        self.ensure_category(tour.category_id)?;

        let affected = self.conn.execute(
            r"
            UPDATE tours SET
                title = ?1, description = ?2, price = ?3, duration = ?4,
                destination = ?5, category_id = ?6, highlights = ?7,
                image = COALESCE(?8, image),
                route = COALESCE(?9, route),
                status = COALESCE(?10, status),
                featured = COALESCE(?11, featured),
                updated_at = datetime('now')
            WHERE id = ?12
            ",
            params![
                tour.title,
                tour.description,
                tour.price,
                tour.duration,
                tour.destination,
                tour.category_id,
                tour.highlights,
                tour.image,
                tour.route,
                tour.status.map(|s| s.as_str()),
                tour.featured,
                id,
            ],
        )?;

        if affected == 0 {
            return Err(Error::not_found("Tour"));
        }
        debug!("Updated tour {}", id);
        Ok(())
    }

    /// Delete a tour and its gallery.
    ///
    /// Returns `false` when no tour had the id.
    ///
    /// # Errors
    ///
    /// Returns a conflict naming the booking count when bookings reference
    /// the tour; otherwise any database error.
    pub fn delete_tour(&self, id: i64) -> Result<bool> {
        let tx = self.conn.unchecked_transaction()?;

        let bookings: i64 = tx.query_row(
            "SELECT COUNT(*) FROM bookings WHERE tour_id = ?1",
            [id],
            |row| row.get(0),
        )?;
        if bookings > 0 {
            return Err(Error::conflict(format!(
                "Cannot delete tour. There are {bookings} booking(s) associated with this tour."
            )));
        }

        tx.execute("DELETE FROM tour_gallery WHERE tour_id = ?1", [id])?;
        let affected = tx.execute("DELETE FROM tours WHERE id = ?1", [id])?;
        tx.commit()?;

        if affected > 0 {
            info!("Deleted tour {}", id);
        }
        Ok(affected > 0)
    }

    fn ensure_category(&self, category_id: i64) -> Result<()> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM categories WHERE id = ?1)",
            [category_id],
            |row| row.get(0),
        )?;
        if exists {
            Ok(())
        } else {
            Err(Error::validation(format!("Unknown category: {category_id}")))
        }
    }

    fn query_tours<P: rusqlite::Params>(&self, tail: &str, params: P) -> Result<Vec<Tour>> {
        let sql = format!("{TOUR_SELECT} {tail}");
        let mut stmt = self.conn.prepare(&sql)?;
        let tours = stmt
            .query_map(params, Self::row_to_tour)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(tours)
    }

    fn row_to_tour(row: &rusqlite::Row<'_>) -> rusqlite::Result<Tour> {
        let highlights: Option<String> = row.get(10)?;
        Ok(Tour {
            id: row.get(0)?,
            title: row.get(1)?,
            destination: row.get(2)?,
            duration: row.get(3)?,
            price: row.get(4)?,
            image: row.get(5)?,
            category_id: row.get(6)?,
            category: row.get(7)?,
            description: row.get(8)?,
            route: row.get(9)?,
            highlights: highlights.as_deref().map(split_highlights).unwrap_or_default(),
            status: text_column(row, 11)?,
            featured: row.get(12)?,
            created_at: row.get(13)?,
            updated_at: row.get(14)?,
        })
    }
}
