//! The upload pipeline: one token, every row submitted, one report.

use anyhow::{Result, bail};
use colored::*;

use super::UploadArgs;
use crate::api::auth;
use crate::api::client::SharePointClient;
use crate::config::{AppConfig, MailConfig};
use crate::report::{mailer, writer};
use crate::upload::types::RowStatus;
use crate::upload::{reader, runner};

pub async fn handle_upload_command(args: UploadArgs) -> Result<()> {
    let (requester, team) = if args.email {
        let requester = args.requester.clone().unwrap_or_default();
        let team = args.team.clone().unwrap_or_default();
        if requester.is_empty() || team.is_empty() {
            bail!("--email requer --requester e --team");
        }
        (requester, team)
    } else {
        (String::new(), String::new())
    };

    let config = AppConfig::from_env()?;
    // Resolved up front so a missing SMTP variable aborts before any row
    // reaches the site.
    let mail_config = if args.email {
        Some(MailConfig::from_env()?)
    } else {
        None
    };

    let http = reqwest::Client::new();
    let token = auth::acquire_token(&http, &config).await?;

    let rows = reader::read_rows_from_path(&args.file)?;
    if rows.is_empty() {
        println!("{}", "Nenhuma linha de dados encontrada na planilha.".yellow());
    } else {
        println!("Aguarde, estamos lançando os treinamentos...");
    }

    let client = SharePointClient::new(token)?;
    let batch = runner::run_batch(&client, &rows).await;

    for outcome in batch.outcomes() {
        let line = format!(
            "{} | {} | {}",
            outcome.email, outcome.training, outcome.message
        );
        match outcome.status {
            RowStatus::Success => println!("{}", line.green()),
            RowStatus::Error => println!("{}", line.red()),
        }
    }

    println!();
    println!(
        "{}: {}  {}: {}  total: {}",
        "Sucesso".green().bold(),
        batch.success_count(),
        "Erro".red().bold(),
        batch.error_count(),
        batch.len()
    );

    writer::write_report(&batch, &args.out)?;
    println!(
        "Relatório salvo em {}",
        args.out.display().to_string().cyan()
    );

    // Email delivery is best effort. The rows are already on the site and
    // the report is on disk, so a dead SMTP server must not fail the run.
    if let Some(mail_config) = mail_config {
        let attachment = writer::report_to_buffer(&batch)?;
        match mailer::send_report(&mail_config, attachment, &batch, &requester, &team).await {
            Ok(()) => println!("{}", "Relatório enviado por email.".green()),
            Err(err) => {
                log::error!("report email failed: {err:#}");
                eprintln!(
                    "{}",
                    format!("Falha ao enviar o relatório por email: {err:#}").red()
                );
            }
        }
    }

    Ok(())
}
