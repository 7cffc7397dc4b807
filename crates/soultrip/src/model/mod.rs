//! Domain types for the website and the admin area.
//!
//! Stored rows, the inputs that create or change them, and their validation.
//! Inputs deserialize from both HTML forms and JSON bodies.

pub mod about;
pub mod booking;
pub mod form;
pub mod inquiry;
pub mod setting;
pub mod stats;
pub mod tour;

pub use about::{
    AboutPage, AboutSection, AboutStat, CoreValue, SectionInput, StatInput, TeamMember,
    TeamMemberInput, ValueInput,
};
pub use booking::{
    Booking, BookingRequest, BookingStatus, BookingUpdate, NewBooking, ValidBookingUpdate,
};
pub use inquiry::{is_valid_email, Inquiry, InquiryStatus, InquiryStatusUpdate, NewInquiry};
pub use setting::{DefaultSetting, NewSetting, Setting, SettingType, SettingUpdate};
pub use stats::{Analytics, DashboardStats, MonthlyCount, Overview};
pub use tour::{Category, GalleryImage, Highlights, Tour, TourInput, TourStatus, ValidTour};
