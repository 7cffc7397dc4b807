//! `SQLite` schema definitions for soultrip.
//!
//! This module contains the SQL statements for creating the website tables.
//! Timestamps are stored as `datetime('now')` text in UTC.

/// SQL statement to create the tour categories table.
pub const CREATE_CATEGORIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE,
    description TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the tours table.
pub const CREATE_TOURS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS tours (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    destination TEXT NOT NULL,
    duration TEXT NOT NULL,
    price REAL NOT NULL,
    image TEXT NOT NULL DEFAULT '',
    category_id INTEGER NOT NULL REFERENCES categories(id),
    description TEXT NOT NULL DEFAULT '',
    route TEXT,
    highlights TEXT,
    status TEXT NOT NULL DEFAULT 'Active' CHECK (status IN ('Active', 'Inactive')),
    featured INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the tour gallery table.
pub const CREATE_TOUR_GALLERY_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS tour_gallery (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tour_id INTEGER NOT NULL REFERENCES tours(id),
    image_url TEXT NOT NULL,
    alt_text TEXT,
    is_primary INTEGER NOT NULL DEFAULT 0,
    order_index INTEGER NOT NULL DEFAULT 0
)
";

/// SQL statement to create the bookings table.
pub const CREATE_BOOKINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS bookings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tour_id INTEGER NOT NULL REFERENCES tours(id),
    customer_name TEXT NOT NULL,
    customer_email TEXT NOT NULL,
    customer_phone TEXT,
    preferred_date TEXT,
    participants INTEGER NOT NULL DEFAULT 1,
    total_cost REAL,
    status TEXT NOT NULL DEFAULT 'Pending' CHECK (status IN ('Pending', 'Confirmed', 'Cancelled')),
    special_requests TEXT,
    created_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the contact inquiries table.
pub const CREATE_INQUIRIES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS contact_inquiries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL,
    phone TEXT,
    subject TEXT,
    message TEXT NOT NULL,
    status TEXT NOT NULL DEFAULT 'New' CHECK (status IN ('New', 'Read', 'Replied', 'Closed')),
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the website settings table.
pub const CREATE_SETTINGS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS website_settings (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    setting_key TEXT NOT NULL UNIQUE,
    setting_value TEXT,
    setting_type TEXT NOT NULL DEFAULT 'text'
        CHECK (setting_type IN ('text', 'textarea', 'url', 'image', 'email', 'phone', 'json')),
    category TEXT NOT NULL DEFAULT 'general',
    display_name TEXT,
    description TEXT,
    is_editable INTEGER NOT NULL DEFAULT 1,
    sort_order INTEGER NOT NULL DEFAULT 0,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the about page sections table.
pub const CREATE_ABOUT_CONTENT_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS about_content (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    section_key TEXT NOT NULL UNIQUE,
    section_title TEXT NOT NULL,
    content TEXT,
    image_url TEXT,
    order_index INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the team members table.
pub const CREATE_ABOUT_TEAM_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS about_team (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    position TEXT NOT NULL,
    bio TEXT,
    image_url TEXT,
    order_index INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the about page statistics table.
pub const CREATE_ABOUT_STATS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS about_stats (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    stat_key TEXT NOT NULL UNIQUE,
    stat_value TEXT NOT NULL,
    stat_label TEXT NOT NULL,
    order_index INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// SQL statement to create the core values table.
pub const CREATE_ABOUT_VALUES_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS about_values (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title TEXT NOT NULL,
    description TEXT,
    icon TEXT,
    order_index INTEGER NOT NULL DEFAULT 0,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL DEFAULT (datetime('now')),
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
)
";

/// Index for the public tour listing.
pub const CREATE_TOURS_STATUS_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_tours_status ON tours(status, featured DESC, created_at DESC)
";

/// Index for the booking count check on tour deletion.
pub const CREATE_BOOKINGS_TOUR_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_bookings_tour ON bookings(tour_id)
";

/// Index for gallery lookups.
pub const CREATE_GALLERY_TOUR_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_gallery_tour ON tour_gallery(tour_id, order_index)
";

/// Index for settings listed by category.
pub const CREATE_SETTINGS_CATEGORY_INDEX: &str = r"
CREATE INDEX IF NOT EXISTS idx_settings_category ON website_settings(category, sort_order)
";

/// SQL statement to create the metadata table for storing key-value pairs.
pub const CREATE_METADATA_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS metadata (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[
    CREATE_CATEGORIES_TABLE,
    CREATE_TOURS_TABLE,
    CREATE_TOUR_GALLERY_TABLE,
    CREATE_BOOKINGS_TABLE,
    CREATE_INQUIRIES_TABLE,
    CREATE_SETTINGS_TABLE,
    CREATE_ABOUT_CONTENT_TABLE,
    CREATE_ABOUT_TEAM_TABLE,
    CREATE_ABOUT_STATS_TABLE,
    CREATE_ABOUT_VALUES_TABLE,
    CREATE_TOURS_STATUS_INDEX,
    CREATE_BOOKINGS_TOUR_INDEX,
    CREATE_GALLERY_TOUR_INDEX,
    CREATE_SETTINGS_CATEGORY_INDEX,
    CREATE_METADATA_TABLE,
];

/// Tables reported by `db status`, in display order.
pub const CONTENT_TABLES: &[&str] = &[
    "categories",
    "tours",
    "tour_gallery",
    "bookings",
    "contact_inquiries",
    "website_settings",
    "about_content",
    "about_team",
    "about_stats",
    "about_values",
];
