//! Public website pages.

use super::{escape, options, paragraphs, public_layout, tour_card};
use crate::model::{AboutPage, Category, GalleryImage, Tour};
use crate::site::SiteSettings;

/// Banner shown above the contact form after a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactNotice {
    /// The inquiry was stored.
    Success,
    /// The submission was incomplete or could not be stored.
    Error,
}

/// Home page: hero, featured tours and an about teaser.
#[must_use]
pub fn home(site: &SiteSettings, tours: &[Tour]) -> String {
    let cards: String = tours.iter().take(6).map(tour_card).collect();
    let grid = if cards.is_empty() {
        "<p class=\"empty\">New tours are coming soon.</p>".to_string()
    } else {
        format!("<div class=\"tour-grid\">{cards}</div>")
    };

    let body = format!(
        r#"<section class="hero" style="background-image: url('{background}')">
  <div class="hero-content">
    <h1>{title} <span class="highlight">{highlight}</span></h1>
    <p>{subtitle}</p>
    <a class="button" href="/tours">Explore Tours</a>
  </div>
</section>
<section class="section">
  <h2>Popular Tours</h2>
  {grid}
  <p class="center"><a class="button secondary" href="/tours">View All Tours</a></p>
</section>
<section class="section about-teaser">
  <h2>{about_title}</h2>
  <p>{about_description}</p>
  <a class="button secondary" href="/about">Learn More</a>
</section>"#,
        background = escape(&site.hero_background),
        title = escape(&site.hero_title),
        highlight = escape(&site.hero_title_highlight),
        subtitle = escape(&site.hero_subtitle),
        about_title = escape(&site.about_title),
        about_description = paragraphs(&site.about_description),
    );
    public_layout(site, None, "home", &body)
}

/// Tour listing with a category filter.
#[must_use]
pub fn tours(
    site: &SiteSettings,
    tours: &[Tour],
    categories: &[Category],
    selected: Option<&str>,
) -> String {
    let selected = selected.unwrap_or("");
    let choices = std::iter::once(("", "All Categories"))
        .chain(categories.iter().map(|c| (c.name.as_str(), c.name.as_str())));
    let cards: String = tours.iter().map(tour_card).collect();
    let grid = if cards.is_empty() {
        "<p class=\"empty\">No tours found in this category.</p>".to_string()
    } else {
        format!("<div class=\"tour-grid\">{cards}</div>")
    };

    let body = format!(
        r#"<section class="page-header">
  <h1>Our Tours</h1>
  <p>Find the journey that moves you.</p>
</section>
<section class="section">
  <form class="filter" method="get" action="/tours">
    <label for="category">Category</label>
    <select id="category" name="category" onchange="this.form.submit()">{choices}</select>
    <noscript><button type="submit">Filter</button></noscript>
  </form>
  {grid}
</section>"#,
        choices = options(choices, selected),
    );
    public_layout(site, Some("Tours"), "tours", &body)
}

/// Tour detail page with highlights, gallery and the booking form.
#[must_use]
pub fn tour_detail(site: &SiteSettings, tour: &Tour, gallery: &[GalleryImage]) -> String {
    let highlights: String = tour
        .highlights
        .iter()
        .map(|h| format!("<li><i class=\"fas fa-check\"></i> {}</li>", escape(h)))
        .collect();
    let highlights = if highlights.is_empty() {
        String::new()
    } else {
        format!("<h2>Highlights</h2><ul class=\"highlights\">{highlights}</ul>")
    };

    let pictures: String = gallery
        .iter()
        .map(|img| {
            format!(
                "<img src=\"{}\" alt=\"{}\" loading=\"lazy\">",
                escape(&img.image_url),
                escape(img.alt_text.as_deref().unwrap_or(&tour.title))
            )
        })
        .collect();
    let gallery = if pictures.is_empty() {
        String::new()
    } else {
        format!("<h2>Gallery</h2><div class=\"gallery\">{pictures}</div>")
    };

    let route = tour
        .route
        .as_deref()
        .map(|r| format!("<p><i class=\"fas fa-route\"></i> {}</p>", escape(r)))
        .unwrap_or_default();

    let body = format!(
        r#"<section class="tour-hero" style="background-image: url('{image}')">
  <h1>{title}</h1>
  <p><i class="fas fa-map-marker-alt"></i> {destination} &middot; <i class="fas fa-clock"></i> {duration}</p>
</section>
<section class="section tour-detail">
  <div class="tour-info">
    <p class="badge">{category}</p>
    {route}
    <div class="description">{description}</div>
    {highlights}
    {gallery}
  </div>
  <aside class="booking-box">
    <p class="price">${price} <span>per person</span></p>
    <form id="booking-form" data-price="{raw_price}">
      <input type="hidden" name="tourId" value="{id}">
      <label>Full Name <input name="name" required></label>
      <label>Email <input type="email" name="email" required></label>
      <label>Phone <input type="tel" name="phone"></label>
      <label>Preferred Date <input type="date" name="date"></label>
      <label>Participants <input type="number" name="participants" min="1" value="1"></label>
      <label>Special Requests <textarea name="specialRequests" rows="3"></textarea></label>
      <p class="total">Estimated total: $<span id="booking-total">{price}</span></p>
      <button type="submit" class="button">Request Booking</button>
      <div class="form-message" hidden></div>
    </form>
  </aside>
</section>"#,
        id = tour.id,
        image = escape(&tour.image),
        title = escape(&tour.title),
        destination = escape(&tour.destination),
        duration = escape(&tour.duration),
        category = escape(tour.category.as_deref().unwrap_or("Tour")),
        description = paragraphs(&tour.description),
        price = tour.display_price(),
        raw_price = tour.price,
    );
    public_layout(site, Some(&tour.title), "tours", &body)
}

/// About page built from the about tables, with fallbacks for empty sections.
#[must_use]
pub fn about(site: &SiteSettings, page: &AboutPage) -> String {
    let stats: String = page
        .stats
        .iter()
        .map(|s| {
            format!(
                "<div class=\"stat\"><strong>{}</strong><span>{}</span></div>",
                escape(&s.stat_value),
                escape(&s.stat_label)
            )
        })
        .collect();

    let values: String = page
        .values
        .iter()
        .map(|v| {
            format!(
                "<div class=\"value-card\"><i class=\"{}\"></i><h3>{}</h3><p>{}</p></div>",
                escape(v.icon.as_deref().unwrap_or("fas fa-star")),
                escape(&v.title),
                escape(v.description.as_deref().unwrap_or(""))
            )
        })
        .collect();

    let team: String = page
        .team
        .iter()
        .map(|m| {
            let portrait = m
                .image_url
                .as_deref()
                .map(|url| format!("<img src=\"{}\" alt=\"{}\">", escape(url), escape(&m.name)))
                .unwrap_or_else(|| "<div class=\"portrait-placeholder\"><i class=\"fas fa-user\"></i></div>".to_string());
            format!(
                "<div class=\"team-card\">{portrait}<h3>{}</h3><p class=\"muted\">{}</p><p>{}</p></div>",
                escape(&m.name),
                escape(&m.position),
                escape(m.bio.as_deref().unwrap_or(""))
            )
        })
        .collect();

    let body = format!(
        r#"<section class="page-header">
  <h1>{hero_title}</h1>
  <p>{hero_subtitle}</p>
</section>
<section class="section story">
  <h2>{story_title}</h2>
  <p>{story}</p>
</section>
<section class="section stats">{stats}</section>
<section class="section mission">
  <h2>{mission_title}</h2>
  <p>{mission}</p>
</section>
<section class="section">
  <h2>{values_title}</h2>
  <p class="center">{values_subtitle}</p>
  <div class="value-grid">{values}</div>
</section>
<section class="section">
  <h2>Meet Our Team</h2>
  <div class="team-grid">{team}</div>
</section>"#,
        hero_title = escape(page.text("hero_title", "About Soul Trip Tours")),
        hero_subtitle = escape(page.text("hero_subtitle", &site.about_description)),
        story_title = escape(page.text("story_title", "Our Story")),
        story = paragraphs(page.text("story_content", &site.about_description)),
        mission_title = escape(page.text("mission_title", "Our Mission")),
        mission = paragraphs(page.text("mission_content", "")),
        values_title = escape(page.text("values_title", "Our Values")),
        values_subtitle = escape(page.text("values_subtitle", "")),
    );
    public_layout(site, Some("About Us"), "about", &body)
}

/// Contact page with form, details and an optional result banner.
#[must_use]
pub fn contact(site: &SiteSettings, notice: Option<ContactNotice>) -> String {
    let banner = match notice {
        Some(ContactNotice::Success) => {
            "<div class=\"alert success\">Thank you for your message! We will get back to you soon.</div>"
        }
        Some(ContactNotice::Error) => {
            "<div class=\"alert error\">Sorry, there was an error sending your message. Please check the form and try again.</div>"
        }
        None => "",
    };

    let body = format!(
        r#"<section class="page-header">
  <h1>Contact Us</h1>
  <p>Plan your next adventure with us.</p>
</section>
<section class="section contact">
  <div class="contact-details">
    <h2>Get in Touch</h2>
    <p><i class="fas fa-map-marker-alt"></i> {address}</p>
    <p><i class="fas fa-phone"></i> <a href="tel:{phone}">{phone}</a></p>
    <p><i class="fas fa-envelope"></i> <a href="mailto:{email}">{email}</a></p>
    <p><i class="fas fa-clock"></i> {hours}</p>
  </div>
  <form class="contact-form" method="post" action="/contact">
    {banner}
    <label>Name <input name="name" required></label>
    <label>Email <input type="email" name="email" required></label>
    <label>Phone <input type="tel" name="phone"></label>
    <label>Subject <input name="subject"></label>
    <label>Message <textarea name="message" rows="6" required></textarea></label>
    <button type="submit" class="button">Send Message</button>
  </form>
</section>"#,
        address = escape(&site.contact_address),
        phone = escape(&site.contact_phone),
        email = escape(&site.contact_email),
        hours = escape(&site.business_hours),
    );
    public_layout(site, Some("Contact"), "contact", &body)
}

/// 404 page.
#[must_use]
pub fn not_found(site: &SiteSettings) -> String {
    let body = r#"<section class="page-header error-page">
  <h1>404</h1>
  <p>The page you are looking for could not be found.</p>
  <a class="button" href="/">Back to Home</a>
</section>"#;
    public_layout(site, Some("Page Not Found"), "", body)
}

/// Generic error page.
#[must_use]
pub fn error_page(site: &SiteSettings, status: u16, message: &str) -> String {
    let body = format!(
        r#"<section class="page-header error-page">
  <h1>{status}</h1>
  <p>{message}</p>
  <a class="button" href="/">Back to Home</a>
</section>"#,
        message = escape(message),
    );
    public_layout(site, Some("Error"), "", &body)
}
