//! About page content queries.
//!
//! Removing a row only clears `is_active`; the page reads active rows.

use rusqlite::{params, OptionalExtension};
use tracing::debug;

use super::Storage;
use crate::error::{Error, Result};
use crate::model::{
    AboutPage, AboutSection, AboutStat, CoreValue, SectionInput, StatInput, TeamMember,
    TeamMemberInput, ValueInput,
};

impl Storage {
    /// All active about page rows, each list ordered by `order_index`.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn about_page(&self) -> Result<AboutPage> {
        Ok(AboutPage {
            content: self.active_rows(
                "SELECT id, section_key, section_title, content, image_url, order_index FROM about_content",
                |row| {
                    Ok(AboutSection {
                        id: row.get(0)?,
                        section_key: row.get(1)?,
                        section_title: row.get(2)?,
                        content: row.get(3)?,
                        image_url: row.get(4)?,
                        order_index: row.get(5)?,
                    })
                },
            )?,
            team: self.active_rows(
                "SELECT id, name, position, bio, image_url, order_index FROM about_team",
                |row| {
                    Ok(TeamMember {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        position: row.get(2)?,
                        bio: row.get(3)?,
                        image_url: row.get(4)?,
                        order_index: row.get(5)?,
                    })
                },
            )?,
            stats: self.active_rows(
                "SELECT id, stat_key, stat_value, stat_label, order_index FROM about_stats",
                |row| {
                    Ok(AboutStat {
                        id: row.get(0)?,
                        stat_key: row.get(1)?,
                        stat_value: row.get(2)?,
                        stat_label: row.get(3)?,
                        order_index: row.get(4)?,
                    })
                },
            )?,
            values: self.active_rows(
                "SELECT id, title, description, icon, order_index FROM about_values",
                |row| {
                    Ok(CoreValue {
                        id: row.get(0)?,
                        title: row.get(1)?,
                        description: row.get(2)?,
                        icon: row.get(3)?,
                        order_index: row.get(4)?,
                    })
                },
            )?,
        })
    }

    /// An active section by key.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn section_by_key(&self, key: &str) -> Result<Option<AboutSection>> {
        Ok(self
            .conn
            .query_row(
                r"
                SELECT id, section_key, section_title, content, image_url, order_index
                FROM about_content
                WHERE section_key = ?1 AND is_active = 1
                ",
                [key],
                |row| {
                    Ok(AboutSection {
                        id: row.get(0)?,
                        section_key: row.get(1)?,
                        section_title: row.get(2)?,
                        content: row.get(3)?,
                        image_url: row.get(4)?,
                        order_index: row.get(5)?,
                    })
                },
            )
            .optional()?)
    }

    /// Add a text section and return its id.
    ///
    /// A hidden section with the same key is brought back with the new text.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the key or title is missing or the key
    /// belongs to a visible section, or any database error.
    pub fn add_section(&self, input: &SectionInput) -> Result<i64> {
        input.validate(true)?;
        self.conn
            .query_row(
                r"
                INSERT INTO about_content (section_key, section_title, content, image_url, order_index)
                VALUES (?1, ?2, ?3, ?4, ?5)
                ON CONFLICT(section_key) DO UPDATE SET
                    section_title = excluded.section_title,
                    content = excluded.content,
                    image_url = excluded.image_url,
                    order_index = excluded.order_index,
                    is_active = 1,
                    updated_at = datetime('now')
                WHERE about_content.is_active = 0
                RETURNING id
                ",
                params![
                    input.section_key,
                    input.section_title,
                    input.content,
                    input.image_url,
                    input.order_index.unwrap_or(0),
                ],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::validation("A section with this key already exists"))
    }

    /// Replace a section's title, text, image and position. The key is fixed.
    ///
    /// Returns `false` when no section had the id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is missing, or any database error.
    pub fn update_section(&self, id: i64, input: &SectionInput) -> Result<bool> {
        input.validate(false)?;
        let affected = self.conn.execute(
            r"
            UPDATE about_content
            SET section_title = ?1, content = ?2, image_url = ?3, order_index = ?4,
                updated_at = datetime('now')
            WHERE id = ?5
            ",
            params![
                input.section_title,
                input.content,
                input.image_url,
                input.order_index.unwrap_or(0),
                id,
            ],
        )?;
        Ok(affected > 0)
    }

    /// Hide a section from the page.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn deactivate_section(&self, id: i64) -> Result<bool> {
        self.deactivate("about_content", id)
    }

    /// Add a team member and return the id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when name or position is missing, or any
    /// database error.
    pub fn add_team_member(&self, input: &TeamMemberInput) -> Result<i64> {
        input.validate()?;
        self.conn.execute(
            r"
            INSERT INTO about_team (name, position, bio, image_url, order_index)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ",
            params![
                input.name,
                input.position,
                input.bio,
                input.image_url,
                input.order_index.unwrap_or(0),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replace a team member's details. The portrait is kept when the input
    /// carries none.
    ///
    /// # Errors
    ///
    /// Returns a validation error when name or position is missing, or any
    /// database error.
    pub fn update_team_member(&self, id: i64, input: &TeamMemberInput) -> Result<bool> {
        input.validate()?;
        let affected = self.conn.execute(
            r"
            UPDATE about_team
            SET name = ?1, position = ?2, bio = ?3, image_url = COALESCE(?4, image_url),
                order_index = ?5, updated_at = datetime('now')
            WHERE id = ?6
            ",
            params![
                input.name,
                input.position,
                input.bio,
                input.image_url,
                input.order_index.unwrap_or(0),
                id,
            ],
        )?;
        Ok(affected > 0)
    }

    /// Hide a team member.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn deactivate_team_member(&self, id: i64) -> Result<bool> {
        self.deactivate("about_team", id)
    }

    /// Add a statistic and return the id.
    ///
    /// A hidden statistic with the same key is brought back with the new value.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields or a key already shown,
    /// or any database error.
    pub fn add_stat(&self, input: &StatInput) -> Result<i64> {
        input.validate(true)?;
        self.conn
            .query_row(
                r"
                INSERT INTO about_stats (stat_key, stat_value, stat_label, order_index)
                VALUES (?1, ?2, ?3, ?4)
                ON CONFLICT(stat_key) DO UPDATE SET
                    stat_value = excluded.stat_value,
                    stat_label = excluded.stat_label,
                    order_index = excluded.order_index,
                    is_active = 1,
                    updated_at = datetime('now')
                WHERE about_stats.is_active = 0
                RETURNING id
                ",
                params![
                    input.stat_key,
                    input.stat_value,
                    input.stat_label,
                    input.order_index.unwrap_or(0),
                ],
                |row| row.get(0),
            )
            .optional()?
            .ok_or_else(|| Error::validation("A statistic with this key already exists"))
    }

    /// Replace a statistic's value, label and position.
    ///
    /// # Errors
    ///
    /// Returns a validation error for missing fields, or any database error.
    pub fn update_stat(&self, id: i64, input: &StatInput) -> Result<bool> {
        input.validate(false)?;
        let affected = self.conn.execute(
            r"
            UPDATE about_stats
            SET stat_value = ?1, stat_label = ?2, order_index = ?3, updated_at = datetime('now')
            WHERE id = ?4
            ",
            params![
                input.stat_value,
                input.stat_label,
                input.order_index.unwrap_or(0),
                id,
            ],
        )?;
        Ok(affected > 0)
    }

    /// Hide a statistic.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn deactivate_stat(&self, id: i64) -> Result<bool> {
        self.deactivate("about_stats", id)
    }

    /// Add a core value and return the id.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is missing, or any database error.
    pub fn add_value(&self, input: &ValueInput) -> Result<i64> {
        input.validate()?;
        self.conn.execute(
            r"
            INSERT INTO about_values (title, description, icon, order_index)
            VALUES (?1, ?2, ?3, ?4)
            ",
            params![
                input.title,
                input.description,
                input.icon,
                input.order_index.unwrap_or(0),
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replace a core value.
    ///
    /// # Errors
    ///
    /// Returns a validation error when the title is missing, or any database error.
    pub fn update_value(&self, id: i64, input: &ValueInput) -> Result<bool> {
        input.validate()?;
        let affected = self.conn.execute(
            r"
            UPDATE about_values
            SET title = ?1, description = ?2, icon = ?3, order_index = ?4,
                updated_at = datetime('now')
            WHERE id = ?5
            ",
            params![
                input.title,
                input.description,
                input.icon,
                input.order_index.unwrap_or(0),
                id,
            ],
        )?;
        Ok(affected > 0)
    }

    /// Hide a core value.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    pub fn deactivate_value(&self, id: i64) -> Result<bool> {
        self.deactivate("about_values", id)
    }

    fn active_rows<T, F>(&self, select: &str, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&rusqlite::Row<'_>) -> rusqlite::Result<T>,
    {
        let sql = format!("{select} WHERE is_active = 1 ORDER BY order_index, id");
        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt
            .query_map([], map)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    fn deactivate(&self, table: &str, id: i64) -> Result<bool> {
        let affected = self.conn.execute(
            &format!("UPDATE {table} SET is_active = 0, updated_at = datetime('now') WHERE id = ?1"),
            [id],
        )?;
        debug!("Deactivated {} row {}", table, id);
        Ok(affected > 0)
    }
}
