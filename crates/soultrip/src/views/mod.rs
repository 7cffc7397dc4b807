//! Server-rendered HTML.
//!
//! Pages are assembled from strings. Every value that comes from the
//! database, the settings or the request goes through [`escape`].

pub mod admin;
pub mod public;

use crate::model::Tour;
use crate::site::SiteSettings;

/// Escape text for use in HTML element content and quoted attributes.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape and turn newlines into `<br>`.
#[must_use]
pub fn paragraphs(text: &str) -> String {
    escape(text).replace('\n', "<br>")
}

/// Public navigation entries as (key, label, href).
const PUBLIC_NAV: [(&str, &str, &str); 4] = [
    ("home", "Home", "/"),
    ("tours", "Tours", "/tours"),
    ("about", "About", "/about"),
    ("contact", "Contact", "/contact"),
];

/// Admin navigation entries as (key, label, href).
const ADMIN_NAV: [(&str, &str, &str); 7] = [
    ("dashboard", "Dashboard", "/admin/dashboard"),
    ("tours", "Tours", "/admin/tours"),
    ("bookings", "Bookings", "/admin/bookings"),
    ("contacts", "Contacts", "/admin/contacts"),
    ("settings", "Settings", "/admin/settings"),
    ("about", "About Page", "/admin/about"),
    ("analytics", "Analytics", "/admin/analytics"),
];

fn nav_links(entries: &[(&str, &str, &str)], active: &str) -> String {
    entries
        .iter()
        .map(|(key, label, href)| {
            let class = if *key == active { " class=\"active\"" } else { "" };
            format!("<a href=\"{href}\"{class}>{label}</a>")
        })
        .collect()
}

/// Wrap a public page body in the site chrome.
///
/// `title` replaces the default SEO title when given.
#[must_use]
pub fn public_layout(site: &SiteSettings, title: Option<&str>, active: &str, body: &str) -> String {
    let title = title.map_or_else(
        || site.seo_title(),
        |t| format!("{t} - {}", site.site_name),
    );
    let nav = nav_links(&PUBLIC_NAV, active);
    let social: String = site
        .social_links()
        .into_iter()
        .map(|(network, url)| {
            format!(
                "<a href=\"{}\" target=\"_blank\" rel=\"noopener\" aria-label=\"{network}\"><i class=\"fab fa-{network}\"></i></a>",
                escape(url)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{meta_description}">
<meta name="keywords" content="{meta_keywords}">
<link rel="icon" href="{favicon}">
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
<link rel="stylesheet" href="/css/site.css">
</head>
<body>
<header class="site-header">
  <a class="brand" href="/"><img src="{logo}" alt="{name}"><span>{name}</span></a>
  <button id="mobile-menu-btn" class="menu-toggle" aria-label="Menu"><i class="fas fa-bars"></i></button>
  <nav id="mobile-menu" class="site-nav">{nav}</nav>
</header>
<main>
{body}
</main>
<footer class="site-footer">
  <div class="footer-grid">
    <div>
      <h3>{name}</h3>
      <p>{footer_description}</p>
      <div class="social">{social}</div>
    </div>
    <div>
      <h4>Contact</h4>
      <p><i class="fas fa-map-marker-alt"></i> {address}</p>
      <p><i class="fas fa-phone"></i> <a href="tel:{phone}">{phone}</a></p>
      <p><i class="fas fa-envelope"></i> <a href="mailto:{email}">{email}</a></p>
    </div>
    <div>
      <h4>Business Hours</h4>
      <p>{hours}</p>
      <p>Emergency: {emergency}</p>
    </div>
  </div>
  <p class="copyright">{copyright}</p>
</footer>
<script src="/js/main.js"></script>
</body>
</html>"#,
        title = escape(&title),
        meta_description = escape(&site.meta_description),
        meta_keywords = escape(&site.meta_keywords),
        favicon = escape(&site.site_favicon),
        logo = escape(&site.site_logo),
        name = escape(&site.site_name),
        footer_description = escape(&site.footer_description),
        address = escape(&site.contact_address),
        phone = escape(&site.contact_phone),
        email = escape(&site.contact_email),
        hours = escape(&site.business_hours),
        emergency = escape(&site.emergency_contact),
        copyright = escape(&site.footer_copyright),
    )
}

/// Wrap an admin page body in the back office chrome.
#[must_use]
pub fn admin_layout(title: &str, active: &str, body: &str) -> String {
    let nav = nav_links(&ADMIN_NAV, active);
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Admin</title>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.5.1/css/all.min.css">
<link rel="stylesheet" href="/css/site.css">
</head>
<body class="admin">
<aside class="admin-nav">
  <a class="brand" href="/admin/dashboard">Soul Trip Admin</a>
  {nav}
  <a href="/" target="_blank">View Site</a>
  <form method="post" action="/admin/logout"><button type="submit">Log out</button></form>
</aside>
<main class="admin-main">
<h1>{title}</h1>
<div class="form-message" id="admin-message" hidden></div>
{body}
</main>
<script src="/js/admin.js"></script>
</body>
</html>"#,
        title = escape(title),
    )
}

/// Card used on the home and tour listing pages.
#[must_use]
pub fn tour_card(tour: &Tour) -> String {
    let badge = if tour.featured {
        "<span class=\"badge\">Featured</span>"
    } else {
        ""
    };
    format!(
        r#"<article class="tour-card">
  <a href="/tour/{id}"><img src="{image}" alt="{title}" loading="lazy"></a>
  {badge}
  <div class="tour-card-body">
    <p class="muted"><i class="fas fa-map-marker-alt"></i> {destination} &middot; {duration}</p>
    <h3><a href="/tour/{id}">{title}</a></h3>
    <p>{category}</p>
    <p class="price">From ${price}</p>
  </div>
</article>"#,
        id = tour.id,
        image = escape(&tour.image),
        title = escape(&tour.title),
        destination = escape(&tour.destination),
        duration = escape(&tour.duration),
        category = escape(tour.category.as_deref().unwrap_or("")),
        price = tour.display_price(),
    )
}

/// `<option>` list with one value selected.
#[must_use]
pub fn options<'a>(values: impl IntoIterator<Item = (&'a str, &'a str)>, selected: &str) -> String {
    values
        .into_iter()
        .map(|(value, label)| {
            let sel = if value == selected { " selected" } else { "" };
            format!(
                "<option value=\"{}\"{sel}>{}</option>",
                escape(value),
                escape(label)
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
        assert_eq!(escape("plain"), "plain");
    }

    #[test]
    fn test_paragraphs() {
        assert_eq!(paragraphs("a\n<b>"), "a<br>&lt;b&gt;");
    }

    #[test]
    fn test_public_layout_uses_settings() {
        let site = SiteSettings::default();
        let html = public_layout(&site, Some("Contact"), "contact", "<p>body</p>");
        assert!(html.contains("<title>Contact - Soul Trip Tours</title>"));
        assert!(html.contains("<a href=\"/contact\" class=\"active\">Contact</a>"));
        assert!(html.contains("Saturday-Thursday"));
        assert!(html.contains("<p>body</p>"));
    }

    #[test]
    fn test_public_layout_default_title() {
        let site = SiteSettings::default();
        let html = public_layout(&site, None, "home", "");
        assert!(html.contains("<title>Soul Trip Tours - Discover Amazing Adventures</title>"));
    }

    #[test]
    fn test_options_marks_selected() {
        let html = options([("a", "A"), ("b", "B")], "b");
        assert_eq!(
            html,
            "<option value=\"a\">A</option><option value=\"b\" selected>B</option>"
        );
    }
}
