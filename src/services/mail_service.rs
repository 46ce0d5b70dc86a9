//! Contact-form relay. One plain-text email per submission to the support
//! inbox, sent over SMTP with no retry.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::{authentication::Credentials, Error as SmtpError},
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use std::time::Duration;
use thiserror::Error;
use validator::Validate;

use crate::{config::MailConfig, models::ContactRequest, utils::AppError};

/// Covers connection, greeting and socket inactivity
pub const SMTP_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum MailError {
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    #[error("Invalid email address: {0}")]
    InvalidAddress(String),
}

impl From<MailError> for AppError {
    fn from(e: MailError) -> Self {
        AppError::Internal(format!("Mail relay failed: {}", e))
    }
}

/// Outbound mail seam, injected into handlers as `web::Data<dyn MailRelay>`
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send_contact(&self, submission: &ContactRequest) -> Result<(), MailError>;
}

#[derive(Clone)]
pub struct SmtpMailRelay {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from: Mailbox,
    support: Mailbox,
}

impl SmtpMailRelay {
    pub fn new(config: &MailConfig) -> Result<Self, MailError> {
        let credentials = Credentials::new(config.username.clone(), config.password.clone());

        let builder = if uses_implicit_tls(config.smtp_port) {
            AsyncSmtpTransport::<Tokio1Executor>::relay(&config.smtp_host)?
        } else {
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
        };

        let mailer = builder
            .port(config.smtp_port)
            .credentials(credentials)
            .timeout(Some(SMTP_TIMEOUT))
            .build();

        Ok(Self {
            mailer,
            from: parse_mailbox(&format!("Storefront Contact <{}>", config.username))?,
            support: parse_mailbox(&config.support_address)?,
        })
    }
}

#[async_trait]
impl MailRelay for SmtpMailRelay {
    async fn send_contact(&self, submission: &ContactRequest) -> Result<(), MailError> {
        let email = compose_contact_email(&self.from, &self.support, submission)?;
        self.mailer.send(email).await?;

        log::info!("📧 Contact message from {} relayed to {}", submission.email, self.support);
        Ok(())
    }
}

/// 465 is SMTPS (TLS from the first byte); any other port upgrades with STARTTLS
pub fn uses_implicit_tls(port: u16) -> bool {
    port == 465
}

fn parse_mailbox(address: &str) -> Result<Mailbox, MailError> {
    address
        .parse()
        .map_err(|_| MailError::InvalidAddress(address.to_string()))
}

/// Builds the support email; replies go straight to the sender
pub fn compose_contact_email(
    from: &Mailbox,
    support: &Mailbox,
    submission: &ContactRequest,
) -> Result<Message, MailError> {
    let reply_to = parse_mailbox(&submission.email)?;

    let body = format!(
        "New contact form submission\n\nName: {}\nEmail: {}\n\nMessage:\n{}\n",
        submission.name, submission.email, submission.message
    );

    let message = Message::builder()
        .from(from.clone())
        .reply_to(reply_to)
        .to(support.clone())
        .subject(format!("Contact form: {}", submission.name))
        .header(ContentType::TEXT_PLAIN)
        .body(body)?;

    Ok(message)
}

/// POST /api/contactus
pub async fn relay_contact(relay: &dyn MailRelay, submission: ContactRequest) -> Result<(), AppError> {
    submission.validate()?;

    // The email validator is looser than RFC 5322 mailbox parsing
    if parse_mailbox(&submission.email).is_err() {
        return Err(AppError::validation("email: email must be a valid address"));
    }

    relay.send_contact(&submission).await?;
    Ok(())
}
