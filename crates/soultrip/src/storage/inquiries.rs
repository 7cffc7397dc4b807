//! Contact inquiry queries.

use rusqlite::params;
use tracing::info;

use super::{sql_limit, text_column, Storage};
use crate::error::{Error, Result};
use crate::model::{Inquiry, InquiryStatus, NewInquiry};

const INQUIRY_SELECT: &str = r"
    SELECT id, name, email, phone, subject, message, status, created_at, updated_at
    FROM contact_inquiries
";

impl Storage {
    /// Store a contact form submission and return the new id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when name, email or message is missing or
    /// the email is malformed; otherwise any database error.
    pub fn create_inquiry(&self, inquiry: NewInquiry) -> Result<i64> {
        let inquiry = inquiry.validate()?;
        self.conn.execute(
            r"
            INSERT INTO contact_inquiries (name, email, phone, subject, message)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                inquiry.name,
                inquiry.email,
                inquiry.phone,
                inquiry.subject,
                inquiry.message,
            ],
        )?;
        let id = self.conn.last_insert_rowid();
        info!("Stored contact inquiry {}", id);
        Ok(id)
    }

    /// All inquiries, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn list_inquiries(&self) -> Result<Vec<Inquiry>> {
        self.query_inquiries("ORDER BY created_at DESC, id DESC", [])
    }

    /// The most recent inquiries.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn recent_inquiries(&self, limit: usize) -> Result<Vec<Inquiry>> {
        self.query_inquiries(
            "ORDER BY created_at DESC, id DESC LIMIT ?1",
            [sql_limit(limit)],
        )
    }

    /// Change an inquiry's status.
    ///
    /// # Errors
    ///
    /// Returns not-found for an unknown id, or any database error.
    pub fn update_inquiry_status(&self, id: i64, status: InquiryStatus) -> Result<()> {
        let affected = self.conn.execute(
            "UPDATE contact_inquiries SET status = ?1, updated_at = datetime('now') WHERE id = ?2",
            params![status.as_str(), id],
        )?;
        if affected == 0 {
            return Err(Error::not_found("Contact inquiry"));
        }
        Ok(())
    }

    /// Delete an inquiry. Returns `false` when no inquiry had the id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn delete_inquiry(&self, id: i64) -> Result<bool> {
        let affected = self
            .conn
            .execute("DELETE FROM contact_inquiries WHERE id = ?1", [id])?;
        Ok(affected > 0)
    }

    fn query_inquiries<P: rusqlite::Params>(&self, tail: &str, params: P) -> Result<Vec<Inquiry>> {
        let sql = format!("{INQUIRY_SELECT} {tail}");
        let mut stmt = self.conn.prepare(&sql)?;
        let inquiries = stmt
            .query_map(params, |row| {
                Ok(Inquiry {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    email: row.get(2)?,
                    phone: row.get(3)?,
                    subject: row.get(4)?,
                    message: row.get(5)?,
                    status: text_column(row, 6)?,
                    created_at: row.get(7)?,
                    updated_at: row.get(8)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(inquiries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Storage {
        Storage::open_in_memory().expect("failed to create test storage")
    }

    fn inquiry(name: &str) -> NewInquiry {
        NewInquiry {
            name: name.to_string(),
            email: "guest@example.com".to_string(),
            phone: Some("+880 1700-000000".to_string()),
            subject: Some("Honeymoon".to_string()),
            message: "Do you run tours in March?".to_string(),
        }
    }

    #[test]
    fn test_create_and_list() {
        let storage = storage();
        let first = storage.create_inquiry(inquiry("First")).unwrap();
        let second = storage.create_inquiry(inquiry("Second")).unwrap();

        let all = storage.list_inquiries().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second);
        assert_eq!(all[1].id, first);
        assert_eq!(all[0].status, InquiryStatus::New);
        assert_eq!(storage.recent_inquiries(1).unwrap().len(), 1);
    }

    #[test]
    fn test_create_rejects_missing_message() {
        let storage = storage();
        let mut bad = inquiry("Guest");
        bad.message = String::new();
        assert!(storage.create_inquiry(bad).is_err());
        assert!(storage.list_inquiries().unwrap().is_empty());
    }

    #[test]
    fn test_update_status() {
        let storage = storage();
        let id = storage.create_inquiry(inquiry("Guest")).unwrap();

        storage
            .update_inquiry_status(id, InquiryStatus::Replied)
            .unwrap();
        assert_eq!(
            storage.list_inquiries().unwrap()[0].status,
            InquiryStatus::Replied
        );
    }

    #[test]
    fn test_update_status_missing() {
        let storage = storage();
        assert!(storage
            .update_inquiry_status(3, InquiryStatus::Read)
            .unwrap_err()
            .is_not_found());
    }

    #[test]
    fn test_delete() {
        let storage = storage();
        let id = storage.create_inquiry(inquiry("Guest")).unwrap();
        assert!(storage.delete_inquiry(id).unwrap());
        assert!(!storage.delete_inquiry(id).unwrap());
    }
}
