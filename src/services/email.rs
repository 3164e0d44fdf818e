//! Email notifications for new enquiries

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox, Message, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    SmtpTransport, Transport,
};
use std::str::FromStr;

use crate::{
    config::EmailConfig,
    error::{AppError, AppResult},
    models::Enquiry,
};

/// Side channel told about every new enquiry after it is stored
#[async_trait]
pub trait EnquiryNotifier: Send + Sync {
    async fn notify_new_enquiry(&self, enquiry: &Enquiry) -> AppResult<()>;
}

#[derive(Clone)]
pub struct EmailService {
    config: EmailConfig,
}

impl EmailService {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Generic email sending function
    async fn send_email(&self, to: &str, subject: &str, text: String, html: String) -> AppResult<()> {
        let from_name = self
            .config
            .smtp_from_name
            .as_deref()
            .unwrap_or("Website Enquiry");
        let from_mailbox = Mailbox::from_str(&format!("{} <{}>", from_name, self.config.smtp_from))
            .map_err(|e| AppError::Internal(format!("Invalid from address: {}", e)))?;

        let to_mailbox = Mailbox::from_str(to)
            .map_err(|e| AppError::Internal(format!("Invalid to address: {}", e)))?;

        let email = Message::builder()
            .from(from_mailbox)
            .to(to_mailbox)
            .subject(subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(text),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(html),
                    ),
            )
            .map_err(|e| AppError::Internal(format!("Failed to build email: {}", e)))?;

        let mailer_builder = if self.config.smtp_use_tls {
            SmtpTransport::starttls_relay(&self.config.smtp_host)
                .map_err(|e| AppError::Internal(format!("Failed to create SMTP transport: {}", e)))?
        } else {
            SmtpTransport::builder_dangerous(&self.config.smtp_host)
        }
        .port(self.config.smtp_port);

        let mailer_builder = if let (Some(username), Some(password)) = (
            &self.config.smtp_username,
            &self.config.smtp_password,
        ) {
            mailer_builder.credentials(Credentials::new(username.clone(), password.clone()))
        } else {
            mailer_builder
        };

        let mailer = mailer_builder.build();

        // SMTP transport is blocking
        tokio::task::spawn_blocking(move || mailer.send(&email))
            .await
            .map_err(|e| AppError::Internal(format!("Email task failed: {}", e)))?
            .map_err(|e| AppError::Internal(format!("Failed to send email: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl EnquiryNotifier for EmailService {
    async fn notify_new_enquiry(&self, enquiry: &Enquiry) -> AppResult<()> {
        if !self.config.enabled {
            tracing::debug!(enquiry_id = %enquiry.id, "Email disabled, skipping enquiry notification");
            return Ok(());
        }

        let (subject, text, html) = render_enquiry(enquiry);
        self.send_email(&self.config.notify_to, &subject, text, html)
            .await?;

        tracing::info!(enquiry_id = %enquiry.id, "Enquiry notification sent");
        Ok(())
    }
}

/// Subject, plain-text body and HTML body for a new-enquiry email
pub fn render_enquiry(enquiry: &Enquiry) -> (String, String, String) {
    let date = |d: Option<chrono::NaiveDate>| d.map(|d| d.to_string()).unwrap_or_else(|| "-".to_string());
    let submitted = enquiry
        .timestamp
        .map(|t| t.format("%d/%m/%Y %H:%M UTC").to_string())
        .unwrap_or_else(|| "-".to_string());

    let fields = [
        ("Name", enquiry.name.clone()),
        ("Email", enquiry.email.clone()),
        ("Phone", enquiry.phone.clone()),
        ("Accommodation", enquiry.accommodation.clone()),
        ("Check-in", date(enquiry.check_in)),
        ("Check-out", date(enquiry.check_out)),
        ("Adults", enquiry.adults.to_string()),
        ("Children", enquiry.children.to_string()),
        ("Total Guests", enquiry.guests.to_string()),
        ("Message", enquiry.message.clone()),
        ("Status", enquiry.status.to_string()),
    ];

    let subject = format!("New Enquiry from {}", enquiry.name);

    let mut text = String::from("New Accommodation Enquiry\n\n");
    let mut html = String::from("<html><body><h3>New Accommodation Enquiry</h3>");
    for (label, value) in &fields {
        text.push_str(&format!("{}: {}\n", label, value));
        html.push_str(&format!(
            "<p><strong>{}:</strong> {}</p>",
            label,
            escape_html(value)
        ));
    }
    text.push_str(&format!("\nSubmitted on: {}\n", submitted));
    html.push_str(&format!("<p><em>Submitted on: {}</em></p></body></html>", submitted));

    (subject, text, html)
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::EnquiryStatus;
    use uuid::Uuid;

    fn enquiry() -> Enquiry {
        Enquiry {
            id: Uuid::new_v4(),
            name: "Ravi <b>".to_string(),
            email: "ravi@example.com".to_string(),
            phone: "9847012345".to_string(),
            message: "Need a quiet room & parking".to_string(),
            accommodation: "2 BHK".to_string(),
            check_in: chrono::NaiveDate::from_ymd_opt(2024, 12, 24),
            check_out: chrono::NaiveDate::from_ymd_opt(2024, 12, 26),
            adults: 4,
            children: 1,
            guests: 5,
            status: EnquiryStatus::New,
            timestamp: None,
        }
    }

    #[test]
    fn renders_all_fields_and_escapes_html() {
        let (subject, text, html) = render_enquiry(&enquiry());
        assert_eq!(subject, "New Enquiry from Ravi <b>");
        assert!(text.contains("Check-in: 2024-12-24"));
        assert!(text.contains("Total Guests: 5"));
        assert!(html.contains("Ravi &lt;b&gt;"));
        assert!(html.contains("quiet room &amp; parking"));
    }

    #[tokio::test]
    async fn disabled_service_is_a_no_op() {
        let service = EmailService::new(EmailConfig::default());
        assert!(service.notify_new_enquiry(&enquiry()).await.is_ok());
    }
}
