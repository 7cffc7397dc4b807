//! Back office pages.
//!
//! Forms carry `data-api` attributes; `/js/admin.js` submits them with
//! `fetch` and shows the JSON reply.

use super::{admin_layout, escape, options};
use crate::model::{
    AboutPage, Analytics, Booking, BookingStatus, Category, DashboardStats, Inquiry,
    InquiryStatus, Setting, SettingType, Tour, TourStatus,
};

/// Settings categories in the order the editor shows them, with labels.
pub const SETTINGS_CATEGORIES: [(&str, &str); 8] = [
    ("identity", "Site Identity"),
    ("contact", "Contact Information"),
    ("social", "Social Media"),
    ("homepage", "Homepage"),
    ("about", "About Section"),
    ("footer", "Footer"),
    ("seo", "SEO"),
    ("business", "Business"),
];

/// Message on the login page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginNotice {
    /// An admin page was requested without a session.
    Unauthorized,
    /// The submitted credentials were wrong.
    Invalid,
}

impl LoginNotice {
    /// Parse the `error` query parameter.
    #[must_use]
    pub fn from_query(value: Option<&str>) -> Option<Self> {
        match value? {
            "unauthorized" => Some(Self::Unauthorized),
            "invalid" => Some(Self::Invalid),
            _ => None,
        }
    }

    fn message(self) -> &'static str {
        match self {
            Self::Unauthorized => "Please log in to access the admin area.",
            Self::Invalid => "Invalid username or password.",
        }
    }
}

/// Standalone login page.
#[must_use]
pub fn login(notice: Option<LoginNotice>) -> String {
    let alert = notice
        .map(|n| format!("<div class=\"alert error\">{}</div>", n.message()))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Admin Login</title>
<link rel="stylesheet" href="/css/site.css">
</head>
<body class="admin login">
<form class="login-box" method="post" action="/admin/login">
  <h1>Admin Login</h1>
  {alert}
  <label>Username <input name="username" autocomplete="username" required></label>
  <label>Password <input type="password" name="password" autocomplete="current-password" required></label>
  <button type="submit" class="button">Log In</button>
</form>
</body>
</html>"#
    )
}

fn card(label: &str, value: i64, icon: &str) -> String {
    format!(
        "<div class=\"stat-card\"><i class=\"fas fa-{icon}\"></i><strong>{value}</strong><span>{label}</span></div>"
    )
}

fn booking_badge(status: BookingStatus) -> String {
    format!(
        "<span class=\"status status-{}\">{status}</span>",
        status.as_str().to_ascii_lowercase()
    )
}

fn inquiry_badge(status: InquiryStatus) -> String {
    format!(
        "<span class=\"status status-{}\">{status}</span>",
        status.as_str().to_ascii_lowercase()
    )
}

/// Dashboard with counters and the latest activity.
#[must_use]
pub fn dashboard(
    stats: &DashboardStats,
    bookings: &[Booking],
    inquiries: &[Inquiry],
    tours: &[Tour],
) -> String {
    let cards = [
        card("Total Tours", stats.total_tours, "map"),
        card("Active Tours", stats.active_tours, "check-circle"),
        card("Featured Tours", stats.featured_tours, "star"),
        card("Total Bookings", stats.total_bookings, "calendar"),
        card("Pending Bookings", stats.pending_bookings, "hourglass-half"),
        card("Confirmed Bookings", stats.confirmed_bookings, "calendar-check"),
        card("Inquiries", stats.total_inquiries, "envelope"),
        card("New Inquiries", stats.new_inquiries, "envelope-open"),
    ]
    .concat();

    let booking_rows: String = bookings
        .iter()
        .map(|b| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&b.customer_name),
                escape(b.tour_title.as_deref().unwrap_or("-")),
                escape(&b.created_at),
                booking_badge(b.status)
            )
        })
        .collect();
    let inquiry_rows: String = inquiries
        .iter()
        .map(|i| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&i.name),
                escape(i.subject_or_default()),
                escape(&i.created_at),
                inquiry_badge(i.status)
            )
        })
        .collect();
    let tour_rows: String = tours
        .iter()
        .map(|t| {
            format!(
                "<tr><td><a href=\"/admin/tours/edit/{}\">{}</a></td><td>{}</td><td>${}</td></tr>",
                t.id,
                escape(&t.title),
                t.status,
                t.display_price()
            )
        })
        .collect();

    let body = format!(
        r#"<div class="stat-cards">{cards}</div>
<div class="panels">
  <section class="panel">
    <h2>Recent Bookings</h2>
    <table><thead><tr><th>Customer</th><th>Tour</th><th>Date</th><th>Status</th></tr></thead>
    <tbody>{booking_rows}</tbody></table>
    <a href="/admin/bookings">All bookings</a>
  </section>
  <section class="panel">
    <h2>Recent Inquiries</h2>
    <table><thead><tr><th>Name</th><th>Subject</th><th>Date</th><th>Status</th></tr></thead>
    <tbody>{inquiry_rows}</tbody></table>
    <a href="/admin/contacts">All inquiries</a>
  </section>
  <section class="panel">
    <h2>Recent Tours</h2>
    <table><thead><tr><th>Title</th><th>Status</th><th>Price</th></tr></thead>
    <tbody>{tour_rows}</tbody></table>
    <a href="/admin/tours/add">Add a tour</a>
  </section>
</div>"#
    );
    admin_layout("Dashboard", "dashboard", &body)
}

/// Tour management table.
#[must_use]
pub fn tours(tours: &[Tour]) -> String {
    let rows: String = tours
        .iter()
        .map(|t| {
            let featured = if t.featured { "<i class=\"fas fa-star\"></i>" } else { "" };
            format!(
                r#"<tr>
  <td><img class="thumb" src="{image}" alt=""></td>
  <td>{title} {featured}</td>
  <td>{destination}</td>
  <td>{category}</td>
  <td>${price}</td>
  <td>{status}</td>
  <td class="actions">
    <a href="/admin/tours/edit/{id}">Edit</a>
    <button type="button" data-delete="/api/admin/tours/{id}" data-confirm="Delete this tour?">Delete</button>
  </td>
</tr>"#,
                id = t.id,
                image = escape(&t.image),
                title = escape(&t.title),
                destination = escape(&t.destination),
                category = escape(t.category.as_deref().unwrap_or("-")),
                price = t.display_price(),
                status = t.status,
            )
        })
        .collect();
    let body = format!(
        r#"<p><a class="button" href="/admin/tours/add">Add Tour</a></p>
<table class="data">
<thead><tr><th></th><th>Title</th><th>Destination</th><th>Category</th><th>Price</th><th>Status</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    );
    admin_layout("Tours", "tours", &body)
}

/// Add or edit form; `tour` is `None` when adding.
#[must_use]
pub fn tour_form(tour: Option<&Tour>, categories: &[Category]) -> String {
    let (title, action, method) = match tour {
        Some(t) => ("Edit Tour", format!("/api/admin/tours/{}", t.id), "PUT"),
        None => ("Add Tour", "/api/admin/tours".to_string(), "POST"),
    };
    let field = |get: fn(&Tour) -> String| tour.map(get).unwrap_or_default();

    let category_id = tour.map(|t| t.category_id);
    // Option values are ids, labels are names.
    let category_options: String = categories
        .iter()
        .map(|c| {
            let sel = if Some(c.id) == category_id { " selected" } else { "" };
            format!("<option value=\"{}\"{sel}>{}</option>", c.id, escape(&c.name))
        })
        .collect();

    let status = tour.map_or(TourStatus::Active, |t| t.status);
    let status_options = options(
        [
            (TourStatus::Active.as_str(), "Active"),
            (TourStatus::Inactive.as_str(), "Inactive"),
        ],
        status.as_str(),
    );
    let featured = if tour.is_some_and(|t| t.featured) { " checked" } else { "" };

    let body = format!(
        r#"<form class="admin-form" data-api="{action}" data-method="{method}" data-redirect="/admin/tours">
  <label>Title <input name="title" value="{title_value}" required></label>
  <label>Destination <input name="destination" value="{destination}" required></label>
  <label>Duration <input name="duration" value="{duration}" placeholder="10 days" required></label>
  <label>Price (USD) <input type="number" step="0.01" min="0" name="price" value="{price}" required></label>
  <label>Category <select name="category_id" required>{category_options}</select></label>
  <label>Status <select name="status">{status_options}</select></label>
  <label class="inline"><input type="checkbox" name="featured"{featured}> Featured</label>
  <label>Route <input name="route" value="{route}"></label>
  <label>Highlights <textarea name="highlights" rows="3" placeholder="One per line or comma separated">{highlights}</textarea></label>
  <label>Description <textarea name="description" rows="8">{description}</textarea></label>
  <label>Image <input name="image" id="tour-image" value="{image}"></label>
  <label>Upload image <input type="file" accept="image/*" data-upload="/api/upload-image" data-field="image" data-target="tour-image"></label>
  <button type="submit" class="button">Save Tour</button>
</form>"#,
        title_value = escape(&field(|t| t.title.clone())),
        destination = escape(&field(|t| t.destination.clone())),
        duration = escape(&field(|t| t.duration.clone())),
        price = field(|t| t.price.to_string()),
        route = escape(&field(|t| t.route.clone().unwrap_or_default())),
        highlights = escape(&field(|t| t.highlights.join("\n"))),
        description = escape(&field(|t| t.description.clone())),
        image = escape(&field(|t| t.image.clone())),
    );
    admin_layout(title, "tours", &body)
}

/// Booking table with inline status changes.
#[must_use]
pub fn bookings(bookings: &[Booking]) -> String {
    let rows: String = bookings
        .iter()
        .map(|b| {
            let statuses = options(
                BookingStatus::ALL.iter().map(|s| (s.as_str(), s.as_str())),
                b.status.as_str(),
            );
            format!(
                r#"<tr>
  <td>{id}</td>
  <td>{name}<br><small>{email}</small><br><small>{phone}</small></td>
  <td>{tour}</td>
  <td>{date}</td>
  <td>{participants}</td>
  <td>{total}</td>
  <td><select data-status-url="/api/admin/bookings/{id}">{statuses}</select></td>
  <td>{requests}</td>
  <td><button type="button" data-delete="/api/admin/bookings/{id}" data-confirm="Delete this booking?">Delete</button></td>
</tr>"#,
                id = b.id,
                name = escape(&b.customer_name),
                email = escape(&b.customer_email),
                phone = escape(b.customer_phone.as_deref().unwrap_or("")),
                tour = escape(b.tour_title.as_deref().unwrap_or("-")),
                date = escape(b.preferred_date.as_deref().unwrap_or("Flexible")),
                participants = b.participants,
                total = b
                    .total_cost
                    .map(|t| format!("${}", crate::model::tour::format_money(t)))
                    .unwrap_or_default(),
                requests = escape(b.special_requests.as_deref().unwrap_or("")),
            )
        })
        .collect();
    let body = format!(
        r#"<table class="data">
<thead><tr><th>#</th><th>Customer</th><th>Tour</th><th>Date</th><th>People</th><th>Total</th><th>Status</th><th>Requests</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    );
    admin_layout("Bookings", "bookings", &body)
}

/// Contact inquiries with inline status changes.
#[must_use]
pub fn contacts(inquiries: &[Inquiry]) -> String {
    let rows: String = inquiries
        .iter()
        .map(|i| {
            let statuses = options(
                InquiryStatus::ALL.iter().map(|s| (s.as_str(), s.as_str())),
                i.status.as_str(),
            );
            format!(
                r#"<tr>
  <td>{created}</td>
  <td>{name}<br><small><a href="mailto:{email}">{email}</a></small><br><small>{phone}</small></td>
  <td>{subject}</td>
  <td class="message">{message}</td>
  <td><select data-status-url="/api/admin/contacts/{id}">{statuses}</select></td>
  <td><button type="button" data-delete="/api/admin/contacts/{id}" data-confirm="Delete this inquiry?">Delete</button></td>
</tr>"#,
                id = i.id,
                created = escape(&i.created_at),
                name = escape(&i.name),
                email = escape(&i.email),
                phone = escape(i.phone.as_deref().unwrap_or("")),
                subject = escape(i.subject_or_default()),
                message = super::paragraphs(&i.message),
            )
        })
        .collect();
    let body = format!(
        r#"<table class="data">
<thead><tr><th>Received</th><th>From</th><th>Subject</th><th>Message</th><th>Status</th><th></th></tr></thead>
<tbody>{rows}</tbody>
</table>"#
    );
    admin_layout("Contact Inquiries", "contacts", &body)
}

fn setting_input(setting: &Setting) -> String {
    let value = escape(setting.value.as_deref().unwrap_or(""));
    let readonly = if setting.is_editable { "" } else { " readonly" };
    match setting.kind {
        SettingType::Textarea | SettingType::Json => {
            format!("<textarea name=\"value\" rows=\"4\"{readonly}>{value}</textarea>")
        }
        SettingType::Email => format!("<input type=\"email\" name=\"value\" value=\"{value}\"{readonly}>"),
        SettingType::Phone => format!("<input type=\"tel\" name=\"value\" value=\"{value}\"{readonly}>"),
        SettingType::Url => format!("<input type=\"url\" name=\"value\" value=\"{value}\"{readonly}>"),
        SettingType::Text | SettingType::Image => {
            format!("<input name=\"value\" value=\"{value}\"{readonly}>")
        }
    }
}

fn setting_form(setting: &Setting) -> String {
    let description = setting
        .description
        .as_deref()
        .map(|d| format!("<small>{}</small>", escape(d)))
        .unwrap_or_default();
    let preview = if setting.kind == SettingType::Image {
        setting
            .value
            .as_deref()
            .map(|v| format!("<img class=\"thumb\" src=\"{}\" alt=\"\">", escape(v)))
            .unwrap_or_default()
    } else {
        String::new()
    };
    format!(
        r#"<form class="setting" data-api="/admin/settings/update">
  <input type="hidden" name="setting_key" value="{key}">
  <label>{label} {description}</label>
  {preview}{input}
  <button type="submit">Save</button>
</form>"#,
        key = escape(&setting.key),
        label = escape(setting.label()),
        input = setting_input(setting),
    )
}

/// Settings editor grouped by category.
#[must_use]
pub fn settings(settings: &[Setting]) -> String {
    let known: Vec<&str> = SETTINGS_CATEGORIES.iter().map(|(key, _)| *key).collect();
    let mut groups: Vec<(String, String)> = SETTINGS_CATEGORIES
        .iter()
        .map(|(key, label)| ((*key).to_string(), (*label).to_string()))
        .collect();
    for setting in settings {
        let category = setting.category.as_str();
        if !known.contains(&category) && !groups.iter().any(|(key, _)| key == category) {
            groups.push((category.to_string(), category.to_string()));
        }
    }

    let sections: String = groups
        .iter()
        .filter_map(|(key, label)| {
            let forms: String = settings
                .iter()
                .filter(|s| &s.category == key)
                .map(setting_form)
                .collect();
            if forms.is_empty() {
                return None;
            }
            let logo = if key == "identity" {
                r#"<form class="setting" data-api="/admin/settings/upload-logo" enctype="multipart/form-data">
  <label>Upload new logo</label>
  <input type="file" name="logo" accept="image/*" required>
  <button type="submit">Upload</button>
</form>"#
            } else {
                ""
            };
            Some(format!(
                "<section class=\"panel settings-group\" id=\"settings-{key}\"><h2>{}</h2>{forms}{logo}</section>",
                escape(label),
                key = escape(key),
            ))
        })
        .collect();
    admin_layout("Website Settings", "settings", &sections)
}

fn order_field(value: i64) -> String {
    format!("<label>Order <input type=\"number\" name=\"order_index\" value=\"{value}\"></label>")
}

/// About page editor.
#[must_use]
pub fn about(page: &AboutPage) -> String {
    let sections: String = page
        .content
        .iter()
        .map(|s| {
            format!(
                r#"<form class="admin-form" data-api="/admin/about/content/{id}">
  <h3>{key}</h3>
  <label>Title <input name="section_title" value="{title}"></label>
  <label>Content <textarea name="content" rows="4">{content}</textarea></label>
  <label>Image URL <input name="image_url" value="{image}"></label>
  {order}
  <button type="submit">Save</button>
  <button type="button" data-delete="/admin/about/content/{id}" data-confirm="Remove this section?">Remove</button>
</form>"#,
                id = s.id,
                key = escape(&s.section_key),
                title = escape(&s.section_title),
                content = escape(s.content.as_deref().unwrap_or("")),
                image = escape(s.image_url.as_deref().unwrap_or("")),
                order = order_field(s.order_index),
            )
        })
        .collect();

    let team: String = page
        .team
        .iter()
        .map(|m| {
            format!(
                r#"<form class="admin-form" data-api="/admin/about/team/{id}" enctype="multipart/form-data">
  <label>Name <input name="name" value="{name}" required></label>
  <label>Position <input name="position" value="{position}" required></label>
  <label>Bio <textarea name="bio" rows="3">{bio}</textarea></label>
  {portrait}
  <label>New portrait <input type="file" name="image" accept="image/*"></label>
  {order}
  <button type="submit">Save</button>
  <button type="button" data-delete="/admin/about/team/{id}" data-confirm="Remove this team member?">Remove</button>
</form>"#,
                id = m.id,
                name = escape(&m.name),
                position = escape(&m.position),
                bio = escape(m.bio.as_deref().unwrap_or("")),
                portrait = m
                    .image_url
                    .as_deref()
                    .map(|url| format!("<img class=\"thumb\" src=\"{}\" alt=\"\">", escape(url)))
                    .unwrap_or_default(),
                order = order_field(m.order_index),
            )
        })
        .collect();

    let stats: String = page
        .stats
        .iter()
        .map(|s| {
            format!(
                r#"<form class="admin-form inline" data-api="/admin/about/stats/{id}">
  <strong>{key}</strong>
  <label>Value <input name="stat_value" value="{value}"></label>
  <label>Label <input name="stat_label" value="{label}"></label>
  {order}
  <button type="submit">Save</button>
  <button type="button" data-delete="/admin/about/stats/{id}" data-confirm="Remove this statistic?">Remove</button>
</form>"#,
                id = s.id,
                key = escape(&s.stat_key),
                value = escape(&s.stat_value),
                label = escape(&s.stat_label),
                order = order_field(s.order_index),
            )
        })
        .collect();

    let values: String = page
        .values
        .iter()
        .map(|v| {
            format!(
                r#"<form class="admin-form" data-api="/admin/about/values/{id}">
  <label>Title <input name="title" value="{title}" required></label>
  <label>Description <textarea name="description" rows="2">{description}</textarea></label>
  <label>Icon class <input name="icon" value="{icon}"></label>
  {order}
  <button type="submit">Save</button>
  <button type="button" data-delete="/admin/about/values/{id}" data-confirm="Remove this value?">Remove</button>
</form>"#,
                id = v.id,
                title = escape(&v.title),
                description = escape(v.description.as_deref().unwrap_or("")),
                icon = escape(v.icon.as_deref().unwrap_or("")),
                order = order_field(v.order_index),
            )
        })
        .collect();

    let body = format!(
        r#"<section class="panel">
  <h2>Content Sections</h2>
  {sections}
  <form class="admin-form add" data-api="/admin/about/content">
    <h3>Add section</h3>
    <label>Key <input name="section_key" required></label>
    <label>Title <input name="section_title" required></label>
    <label>Content <textarea name="content" rows="3"></textarea></label>
    {order}
    <button type="submit">Add</button>
  </form>
</section>
<section class="panel">
  <h2>Team Members</h2>
  {team}
  <form class="admin-form add" data-api="/admin/about/team" enctype="multipart/form-data">
    <h3>Add team member</h3>
    <label>Name <input name="name" required></label>
    <label>Position <input name="position" required></label>
    <label>Bio <textarea name="bio" rows="3"></textarea></label>
    <label>Portrait <input type="file" name="image" accept="image/*"></label>
    {order}
    <button type="submit">Add</button>
  </form>
</section>
<section class="panel">
  <h2>Statistics</h2>
  {stats}
  <form class="admin-form add" data-api="/admin/about/stats">
    <h3>Add statistic</h3>
    <label>Key <input name="stat_key" required></label>
    <label>Value <input name="stat_value" required></label>
    <label>Label <input name="stat_label" required></label>
    {order}
    <button type="submit">Add</button>
  </form>
</section>
<section class="panel">
  <h2>Core Values</h2>
  {values}
  <form class="admin-form add" data-api="/admin/about/values">
    <h3>Add value</h3>
    <label>Title <input name="title" required></label>
    <label>Description <textarea name="description" rows="2"></textarea></label>
    <label>Icon class <input name="icon" placeholder="fas fa-heart"></label>
    {order}
    <button type="submit">Add</button>
  </form>
</section>"#,
        order = order_field(0),
    );
    admin_layout("About Page", "about", &body)
}

/// Totals and a bar per month of bookings.
#[must_use]
pub fn analytics(analytics: &Analytics) -> String {
    let busiest = analytics.busiest_month().max(1);
    let bars: String = analytics
        .monthly_bookings
        .iter()
        .map(|m| {
            let width = m.count * 100 / busiest;
            format!(
                "<div class=\"bar-row\"><span>{}</span><div class=\"bar\" style=\"width: {width}%\"></div><span>{}</span></div>",
                m.month_name(),
                m.count
            )
        })
        .collect();
    let chart = if bars.is_empty() {
        "<p class=\"empty\">No bookings this year yet.</p>".to_string()
    } else {
        bars
    };

    let body = format!(
        r#"<div class="stat-cards">{tours}{bookings}{contacts}</div>
<section class="panel">
  <h2>Bookings per Month</h2>
  <div class="bar-chart">{chart}</div>
</section>"#,
        tours = card("Tours", analytics.total_tours, "map"),
        bookings = card("Bookings", analytics.total_bookings, "calendar"),
        contacts = card("Contacts", analytics.total_contacts, "envelope"),
    );
    admin_layout("Analytics", "analytics", &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MonthlyCount;

    fn setting(key: &str, category: &str, kind: SettingType) -> Setting {
        Setting {
            key: key.to_string(),
            value: Some("v<1>".to_string()),
            kind,
            category: category.to_string(),
            display_name: None,
            description: None,
            is_editable: true,
            sort_order: 1,
            created_at: String::new(),
            updated_at: String::new(),
        }
    }

    #[test]
    fn test_login_notice_from_query() {
        assert_eq!(
            LoginNotice::from_query(Some("unauthorized")),
            Some(LoginNotice::Unauthorized)
        );
        assert_eq!(LoginNotice::from_query(Some("invalid")), Some(LoginNotice::Invalid));
        assert_eq!(LoginNotice::from_query(Some("other")), None);
        assert_eq!(LoginNotice::from_query(None), None);
    }

    #[test]
    fn test_login_page_messages() {
        assert!(login(Some(LoginNotice::Invalid)).contains("Invalid username or password."));
        assert!(!login(None).contains("alert"));
    }

    #[test]
    fn test_tour_form_add_and_edit() {
        let categories = vec![Category {
            id: 3,
            name: "WILDLIFE".to_string(),
            description: None,
        }];
        let add = tour_form(None, &categories);
        assert!(add.contains("data-api=\"/api/admin/tours\" data-method=\"POST\""));
        assert!(add.contains("<option value=\"3\">WILDLIFE</option>"));

        let tour = Tour {
            id: 9,
            title: "Safari".to_string(),
            destination: "Kenya".to_string(),
            duration: "12 days".to_string(),
            price: 2499.0,
            image: "/images/kenya.jpg".to_string(),
            category_id: 3,
            category: Some("WILDLIFE".to_string()),
            description: String::new(),
            route: None,
            highlights: vec!["Big Five".to_string(), "Migration".to_string()],
            status: TourStatus::Inactive,
            featured: true,
            created_at: String::new(),
            updated_at: String::new(),
        };
        let edit = tour_form(Some(&tour), &categories);
        assert!(edit.contains("data-api=\"/api/admin/tours/9\" data-method=\"PUT\""));
        assert!(edit.contains("<option value=\"3\" selected>WILDLIFE</option>"));
        assert!(edit.contains("<option value=\"Inactive\" selected>Inactive</option>"));
        assert!(edit.contains("Big Five\nMigration"));
        assert!(edit.contains(" checked>"));
    }

    #[test]
    fn test_settings_grouped_and_escaped() {
        let html = settings(&[
            setting("site_name", "identity", SettingType::Text),
            setting("business_hours", "business", SettingType::Textarea),
            setting("custom_key", "custom", SettingType::Text),
        ]);
        assert!(html.contains("<h2>Site Identity</h2>"));
        assert!(html.contains("upload-logo"));
        assert!(html.contains("<textarea name=\"value\" rows=\"4\">v&lt;1&gt;</textarea>"));
        assert!(html.contains("<h2>custom</h2>"));
        assert!(!html.contains("Social Media"));
    }

    #[test]
    fn test_analytics_bars() {
        let html = analytics(&Analytics {
            total_tours: 6,
            total_bookings: 3,
            total_contacts: 1,
            monthly_bookings: vec![
                MonthlyCount { month: 1, count: 1 },
                MonthlyCount { month: 3, count: 2 },
            ],
        });
        assert!(html.contains("<span>Jan</span><div class=\"bar\" style=\"width: 50%\">"));
        assert!(html.contains("<span>Mar</span><div class=\"bar\" style=\"width: 100%\">"));
    }

    #[test]
    fn test_analytics_empty() {
        assert!(analytics(&Analytics::default()).contains("No bookings this year yet."));
    }
}
