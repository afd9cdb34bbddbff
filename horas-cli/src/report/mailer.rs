//! Emails the results report to the fixed distribution list.
//!
//! Delivery goes through the shared mailbox over STARTTLS. A failure
//! here is reported to the operator but never invalidates the run: the
//! report file already exists on disk by the time this is called.

use anyhow::{Context, Result};
use lettre::message::header::ContentType;
use lettre::message::{Attachment, Mailbox, MultiPart, SinglePart};
use lettre::transport::smtp::authentication::Credentials;
use lettre::{AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor};

use super::writer::DEFAULT_REPORT_FILENAME;
use crate::config::MailConfig;
use crate::upload::types::ReportBatch;

pub const REPORT_SUBJECT: &str = "Relatório de Lançamento de Horas de Treinamento";

const SMTP_PORT: u16 = 587;
const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Send the report workbook to every configured recipient.
pub async fn send_report(
    config: &MailConfig,
    attachment: Vec<u8>,
    batch: &ReportBatch,
    requester_name: &str,
    requester_team: &str,
) -> Result<()> {
    let message = build_message(config, attachment, batch, requester_name, requester_team)?;

    let transport = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)
        .with_context(|| format!("Failed to configure SMTP for {}", config.smtp_host))?
        .port(SMTP_PORT)
        .credentials(Credentials::new(
            config.sender.clone(),
            config.password.clone(),
        ))
        .build();

    transport
        .send(message)
        .await
        .context("Failed to send the report email")?;

    log::info!("report emailed to {} recipient(s)", config.recipients.len());
    Ok(())
}

fn build_message(
    config: &MailConfig,
    attachment: Vec<u8>,
    batch: &ReportBatch,
    requester_name: &str,
    requester_team: &str,
) -> Result<Message> {
    let from: Mailbox = config
        .sender
        .parse()
        .with_context(|| format!("Invalid sender address: {}", config.sender))?;

    let mut builder = Message::builder().from(from).subject(REPORT_SUBJECT);
    for recipient in &config.recipients {
        let to: Mailbox = recipient
            .parse()
            .with_context(|| format!("Invalid recipient address: {recipient}"))?;
        builder = builder.to(to);
    }

    let body = format!(
        "Upload de horas de treinamento realizado por {requester_name} da equipe {requester_team}.\n\
         \n\
         Lançamentos com sucesso: {}\n\
         Lançamentos com erro: {}\n\
         Total de linhas processadas: {}\n\
         \n\
         O relatório completo está em anexo.\n",
        batch.success_count(),
        batch.error_count(),
        batch.len(),
    );

    let xlsx_type =
        ContentType::parse(XLSX_CONTENT_TYPE).context("Invalid attachment content type")?;

    builder
        .multipart(
            MultiPart::mixed()
                .singlepart(
                    SinglePart::builder()
                        .header(ContentType::TEXT_PLAIN)
                        .body(body),
                )
                .singlepart(
                    Attachment::new(DEFAULT_REPORT_FILENAME.to_string())
                        .body(attachment, xlsx_type),
                ),
        )
        .context("Failed to build the report email")
}
