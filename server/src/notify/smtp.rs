//! SMTP email dispatcher using Lettre.

use async_trait::async_trait;
use lettre::message::header::ContentType;
use lettre::message::{Attachment, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use musebook_core::error::NotifyError;
use musebook_core::notify::{EmailDispatcher, EmailMessage};

/// SMTP dispatcher, suitable for production use.
///
/// Builds a fresh transport per message to avoid connection pooling issues
/// and runs the blocking send on the blocking thread pool.
#[derive(Clone)]
pub struct SmtpEmailDispatcher {
    /// SMTP server address.
    smtp_server: String,

    /// SMTP server port.
    smtp_port: u16,

    /// SMTP credentials.
    credentials: Credentials,

    /// Sender email address.
    from_email: String,

    /// Sender display name.
    from_name: String,
}

impl SmtpEmailDispatcher {
    /// Creates a new SMTP dispatcher.
    #[must_use]
    pub fn new(
        smtp_server: String,
        smtp_port: u16,
        smtp_username: String,
        smtp_password: String,
        from_email: String,
        from_name: String,
    ) -> Self {
        let credentials = Credentials::new(smtp_username, smtp_password);
        Self {
            smtp_server,
            smtp_port,
            credentials,
            from_email,
            from_name,
        }
    }

    /// Build the SMTP transport for one send.
    fn build_transport(&self) -> Result<SmtpTransport, NotifyError> {
        Ok(SmtpTransport::relay(&self.smtp_server)
            .map_err(|e| NotifyError::Send(format!("SMTP relay error: {e}")))?
            .port(self.smtp_port)
            .credentials(self.credentials.clone())
            .build())
    }

    /// The "From" header.
    fn from_header(&self) -> String {
        format!("{} <{}>", self.from_name, self.from_email)
    }
}

#[async_trait]
impl EmailDispatcher for SmtpEmailDispatcher {
    async fn send(&self, message: EmailMessage) -> Result<(), NotifyError> {
        let builder = Message::builder()
            .from(
                self.from_header()
                    .parse()
                    .map_err(|e| NotifyError::Address(format!("invalid from address: {e}")))?,
            )
            .to(message
                .to
                .parse()
                .map_err(|e| NotifyError::Address(format!("invalid to address: {e}")))?)
            .subject(message.subject);

        let html = SinglePart::builder()
            .header(ContentType::TEXT_HTML)
            .body(message.html_body);
        let email = match message.inline_png {
            Some(png) => {
                let content_type = ContentType::parse("image/png")
                    .map_err(|e| NotifyError::Send(format!("invalid logo content type: {e}")))?;
                let logo = Attachment::new_inline("museum_logo".to_string()).body(png, content_type);
                builder.multipart(MultiPart::related().singlepart(html).singlepart(logo))
            }
            None => builder.singlepart(html),
        }
        .map_err(|e| NotifyError::Send(format!("failed to build email: {e}")))?;

        let mailer = self.build_transport()?;
        tokio::task::spawn_blocking(move || {
            mailer
                .send(&email)
                .map_err(|e| NotifyError::Send(format!("failed to send email: {e}")))
        })
        .await
        .map_err(|e| NotifyError::Send(format!("email task failed: {e}")))?
        .map(|_| ())
    }
}
