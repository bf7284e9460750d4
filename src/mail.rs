//! Transactional email over an HTTP email API (Resend-compatible).

use crate::config::EmailConfig;
use crate::model::{Application, Enquiry};
use crate::store::Document;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected response from email API: {0}")]
    UnexpectedResponse(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct Email {
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
}

#[derive(Serialize)]
struct SendRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    text: &'a str,
}

#[derive(Debug, Clone)]
pub struct Mailer {
    config: EmailConfig,
    public_base_url: String,
    http: Client,
}

impl Mailer {
    pub fn new(config: EmailConfig, public_base_url: impl Into<String>) -> Self {
        if !config.is_enabled() {
            tracing::info!("EMAIL_API_KEY or EMAIL_FROM not set; outgoing mail is disabled");
        }
        Mailer {
            config,
            public_base_url: public_base_url.into(),
            http: Client::new(),
        }
    }

    pub fn disabled() -> Self {
        Mailer {
            config: EmailConfig::default(),
            public_base_url: String::new(),
            http: Client::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.is_enabled()
    }

    /// Send one message. A no-op when mail is disabled.
    pub async fn send(&self, email: &Email) -> Result<(), MailError> {
        let (Some(key), Some(from)) = (self.config.api_key.as_deref(), self.config.from.as_deref()) else {
            tracing::debug!(subject = %email.subject, "mail disabled, skipping");
            return Ok(());
        };
        let response = self
            .http
            .post(&self.config.api_url)
            .bearer_auth(key)
            .json(&SendRequest {
                from,
                to: &email.to,
                subject: &email.subject,
                text: &email.text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(MailError::UnexpectedResponse(format!("status {status}: {text}")));
        }
        Ok(())
    }

    /// Best effort: failures are logged, never returned.
    async fn deliver(&self, email: Email) {
        if let Err(e) = self.send(&email).await {
            tracing::warn!(error = %e, subject = %email.subject, "failed to send notification");
        }
    }

    /// Tell the admin about a new enquiry and confirm receipt to the visitor.
    pub async fn notify_enquiry(&self, doc: &Document, enquiry: &Enquiry, product_title: &str) {
        if let Some(admin) = &self.config.admin_recipient {
            self.deliver(enquiry_admin_email(admin, doc, enquiry, product_title, &self.public_base_url))
                .await;
        }
        self.deliver(enquiry_confirmation_email(enquiry, product_title)).await;
    }

    /// Tell the admin about a new job application and confirm receipt to the applicant.
    pub async fn notify_application(&self, doc: &Document, application: &Application) {
        if let Some(admin) = &self.config.admin_recipient {
            self.deliver(application_admin_email(admin, doc, application)).await;
        }
        self.deliver(Email {
            to: vec![application.email.clone()],
            subject: "We received your application".into(),
            text: format!(
                "Hi {},\n\nThanks for applying for the {} role. We will get back to you soon.",
                application.name,
                application.role.as_str()
            ),
        })
        .await;
    }
}

fn enquiry_admin_email(admin: &str, doc: &Document, e: &Enquiry, product_title: &str, base_url: &str) -> Email {
    let mut text = format!(
        "New enquiry for {product_title}\n\nName: {}\nEmail: {}\nPhone: {}\nAdjustment: {}\n",
        e.name,
        e.email,
        e.phone,
        e.adjustment_type.as_str()
    );
    if let Some(plan) = e.plan {
        text.push_str(&format!("Plan: {}\n", plan.as_str()));
    }
    if let Some(company) = &e.company {
        text.push_str(&format!("Company: {company}\n"));
    }
    if let Some(message) = &e.message {
        text.push_str(&format!("\n{message}\n"));
    }
    text.push_str(&format!("\n{}/admin/enquiries/{}\n", base_url, doc.id));
    Email {
        to: vec![admin.to_string()],
        subject: format!("New enquiry: {product_title}"),
        text,
    }
}

fn enquiry_confirmation_email(e: &Enquiry, product_title: &str) -> Email {
    Email {
        to: vec![e.email.clone()],
        subject: "We received your enquiry".into(),
        text: format!(
            "Hi {},\n\nThanks for your interest in {product_title}. Our team will contact you shortly.",
            e.name
        ),
    }
}

fn application_admin_email(admin: &str, doc: &Document, a: &Application) -> Email {
    let mut text = format!(
        "New application ({})\n\nName: {}\nEmail: {}\nExperience: {}\nResume: {}\n",
        doc.id,
        a.name,
        a.email,
        a.experience.as_str(),
        a.resume
    );
    if let Some(portfolio) = &a.portfolio {
        text.push_str(&format!("Portfolio: {portfolio}\n"));
    }
    text.push_str(&format!("\n{}\n", a.cover_letter));
    Email {
        to: vec![admin.to_string()],
        subject: format!("New application: {}", a.role.as_str()),
        text,
    }
}
