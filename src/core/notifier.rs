use crate::adapters::smtp::SmtpRelay;
use crate::core::{ConfigProvider, Delivery, ReportEmail, Storage};
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::parse_mailbox;
use lettre::message::{header::ContentType, Message};

pub fn compose_email<C: ConfigProvider>(config: &C, report: String) -> ReportEmail {
    ReportEmail {
        subject: config.mail_subject().to_string(),
        from: config.mail_from().to_string(),
        to: config.mail_to().to_string(),
        body: report,
    }
}

pub fn build_message(email: &ReportEmail) -> Result<Message> {
    let from = parse_mailbox("mail_from", &email.from)?;
    let to = parse_mailbox("mail_to", &email.to)?;

    let message = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject.as_str())
        .header(ContentType::TEXT_PLAIN)
        .body(email.body.clone())?;

    Ok(message)
}

/// Notifier 階段：讀報表、組信、送到 relay
pub async fn run_notify<S, C>(storage: &S, config: &C) -> Result<Delivery>
where
    S: Storage,
    C: ConfigProvider,
{
    let data = storage.read_file(config.report_file()).await?;
    let report = String::from_utf8(data).map_err(|_| ReportError::Encoding {
        path: config.report_file().to_string(),
    })?;

    let email = compose_email(config, report);
    let message = build_message(&email)?;

    let relay = SmtpRelay::plaintext(config.smtp_host(), config.smtp_port());
    tracing::info!("Sending report to {} via {}", email.to, relay.address());
    relay.deliver(message).await
}
