//! Outgoing mail for contact inquiries and booking requests.
//!
//! Delivery goes through the [`Mailer`] trait: SMTP when a relay is
//! configured, the log otherwise. Callers send after the row is stored and
//! only log failures.

use std::sync::Arc;

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};
use tracing::{info, warn};

use crate::config::MailConfig;
use crate::error::{Error, Result};
use crate::model::{Booking, NewInquiry};
use crate::views::escape;

const BRAND: &str = "Soul Trip Tours & Travels";

/// A rendered HTML email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailMessage {
    /// Recipient address.
    pub to: String,
    /// Address replies should go to, if not the sender.
    pub reply_to: Option<String>,
    /// Subject line.
    pub subject: String,
    /// HTML body.
    pub html: String,
}

/// Something that can deliver a [`MailMessage`].
#[async_trait]
pub trait Mailer: Send + Sync + std::fmt::Debug {
    /// Deliver one message.
    ///
    /// # Errors
    ///
    /// Returns a mail error when the message cannot be built or delivered.
    async fn send(&self, message: MailMessage) -> Result<()>;
}

/// Delivers through an SMTP relay.
pub struct SmtpMailer {
    transport: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
}

impl std::fmt::Debug for SmtpMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmtpMailer")
            .field("from", &self.from.to_string())
            .finish_non_exhaustive()
    }
}

impl SmtpMailer {
    /// Build a transport for `host`.
    ///
    /// # Errors
    ///
    /// Returns a mail error for an invalid sender address or relay host.
    pub fn new(config: &MailConfig, host: &str) -> Result<Self> {
        let from: Mailbox = config
            .from
            .parse()
            .map_err(|e| Error::mail(format!("invalid sender address {}: {e}", config.from)))?;

        let builder = if config.starttls {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(host)
                .map_err(|e| Error::mail(format!("invalid SMTP relay {host}: {e}")))?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::builder_dangerous(host)
        };
        let mut builder = builder.port(config.port);
        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            from,
        })
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        let to: Mailbox = message
            .to
            .parse()
            .map_err(|e| Error::mail(format!("invalid recipient {}: {e}", message.to)))?;

        let mut builder = Message::builder()
            .from(self.from.clone())
            .to(to)
            .subject(message.subject.as_str())
            .header(ContentType::TEXT_HTML);
        if let Some(reply_to) = message.reply_to.as_deref().and_then(|r| r.parse().ok()) {
            builder = builder.reply_to(reply_to);
        }
        let email = builder
            .body(message.html)
            .map_err(|e| Error::mail(e.to_string()))?;

        self.transport
            .send(email)
            .await
            .map_err(|e| Error::mail(e.to_string()))?;
        info!("Sent mail \"{}\" to {}", message.subject, message.to);
        Ok(())
    }
}

/// Writes messages to the log instead of sending them.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, message: MailMessage) -> Result<()> {
        info!(
            "Mail not sent (no SMTP relay configured): \"{}\" to {}",
            message.subject, message.to
        );
        Ok(())
    }
}

/// The mailer the configuration asks for.
///
/// # Errors
///
/// Returns a mail error when the SMTP settings are unusable.
pub fn mailer_from_config(config: &MailConfig) -> Result<Arc<dyn Mailer>> {
    match config.host.as_deref().filter(|h| !h.is_empty()) {
        Some(host) => Ok(Arc::new(SmtpMailer::new(config, host)?)),
        None => Ok(Arc::new(LogMailer)),
    }
}

/// Send and log the outcome; a failed delivery is never an error for the caller.
pub async fn deliver(mailer: &dyn Mailer, message: MailMessage) {
    let subject = message.subject.clone();
    if let Err(e) = mailer.send(message).await {
        warn!("Failed to send \"{}\": {}", subject, e);
    }
}

fn detail_row(label: &str, value: &str) -> String {
    format!(
        "<tr><td style=\"padding:8px 0;color:#475569\"><strong>{label}:</strong></td>\
         <td style=\"padding:8px 0;color:#1e293b\">{}</td></tr>",
        escape(value)
    )
}

fn frame(heading: &str, body: &str) -> String {
    format!(
        "<div style=\"font-family:Arial,sans-serif;max-width:600px;margin:0 auto;border:1px solid #e0e0e0\">\
         <div style=\"background:#0369a1;padding:20px;text-align:center\">\
         <h1 style=\"color:white;margin:0\">{}</h1>\
         <p style=\"color:#e0f2fe;margin:10px 0 0 0\">{heading}</p></div>\
         <div style=\"padding:30px;background:#f8fafc\">{body}</div></div>",
        escape(BRAND)
    )
}

/// Notify the owner about a contact form submission.
#[must_use]
pub fn contact_notification(inquiry: &NewInquiry, owner: &str) -> MailMessage {
    let subject_text = inquiry.subject.as_deref().unwrap_or(crate::model::inquiry::GENERAL_INQUIRY);
    let message = escape(&inquiry.message).replace('\n', "<br>");

    let body = format!(
        "<h2 style=\"color:#1e293b\">Contact Details</h2><table style=\"width:100%\">{}{}{}{}</table>\
         <p><strong>Message:</strong></p>\
         <div style=\"background:#f1f5f9;padding:20px;border-left:4px solid #0ea5e9\">{message}</div>",
        detail_row("Name", &inquiry.name),
        detail_row("Email", &inquiry.email),
        detail_row("Phone", inquiry.phone.as_deref().unwrap_or("Not provided")),
        detail_row("Subject", subject_text),
    );

    MailMessage {
        to: owner.to_string(),
        reply_to: Some(inquiry.email.clone()),
        subject: format!("New Contact Form Submission: {subject_text} - Soul Trip Tours"),
        html: frame("New Contact Form Submission", &body),
    }
}

/// Thank the customer for their inquiry.
#[must_use]
pub fn contact_auto_reply(inquiry: &NewInquiry) -> MailMessage {
    let subject_text = inquiry.subject.as_deref().unwrap_or(crate::model::inquiry::GENERAL_INQUIRY);
    let body = format!(
        "<h2 style=\"color:#1e293b\">Hello {}!</h2>\
         <p style=\"color:#475569;line-height:1.7\">Thank you for contacting <strong>{}</strong>! \
         We have received your inquiry about \"<strong>{}</strong>\" and our team will get back \
         to you within <strong>24 hours</strong>.</p>\
         <p style=\"color:#475569;line-height:1.7\">We're excited to help you plan your next adventure!</p>",
        escape(&inquiry.name),
        escape(BRAND),
        escape(subject_text),
    );

    MailMessage {
        to: inquiry.email.clone(),
        reply_to: None,
        subject: format!("Thank you for contacting {BRAND}"),
        html: frame("Thank you for reaching out!", &body),
    }
}

/// Notify the owner about a booking request.
#[must_use]
pub fn booking_notification(booking: &Booking, owner: &str) -> MailMessage {
    let tour = booking.tour_title.as_deref().unwrap_or("Unknown tour");
    let total = booking
        .total_cost
        .map_or_else(|| "-".to_string(), |t| format!("${}", crate::model::tour::format_money(t)));

    let body = format!(
        "<h2 style=\"color:#1e293b\">New Booking Request</h2><table style=\"width:100%\">{}{}{}{}{}{}{}</table>",
        detail_row("Tour", tour),
        detail_row("Name", &booking.customer_name),
        detail_row("Email", &booking.customer_email),
        detail_row("Phone", booking.customer_phone.as_deref().unwrap_or("Not provided")),
        detail_row("Preferred Date", booking.preferred_date.as_deref().unwrap_or("Flexible")),
        detail_row("Number of Participants", &booking.participants.to_string()),
        detail_row("Total Estimated Cost", &total),
    );
    let body = match booking.special_requests.as_deref() {
        Some(requests) => format!(
            "{body}<p><strong>Special Requests:</strong></p><p>{}</p>",
            escape(requests).replace('\n', "<br>")
        ),
        None => body,
    };

    MailMessage {
        to: owner.to_string(),
        reply_to: Some(booking.customer_email.clone()),
        subject: format!("New Booking Request - {tour}"),
        html: frame("New Booking Request", &body),
    }
}
