//! `soultrip` - The Soul Trip Tours & Travels website
//!
//! This library provides the public tour pages, the booking and contact
//! forms, and the admin back office, all backed by a single SQLite database.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod auth;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mail;
pub mod model;
pub mod rate_limit;
pub mod site;
pub mod storage;
pub mod uploads;
pub mod views;
pub mod web;

pub use config::Config;
pub use error::{Error, Result};
pub use logging::init_logging;
pub use storage::Storage;
