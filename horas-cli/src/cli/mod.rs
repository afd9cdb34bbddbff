//! Command-line surface.

pub mod check;
pub mod upload;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::report::writer::DEFAULT_REPORT_FILENAME;

#[derive(Parser)]
#[command(
    name = "horas-cli",
    version,
    about = "Lançamento em lote de horas de treinamento no SharePoint"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Envia todas as linhas da planilha para a lista de treinamentos
    Upload(UploadArgs),
    /// Valida a planilha localmente, sem enviar nada
    Check(CheckArgs),
}

#[derive(Args)]
pub struct UploadArgs {
    /// Caminho da planilha .xlsx com os treinamentos
    #[arg(short, long)]
    pub file: PathBuf,

    /// Caminho do relatório de resultados
    #[arg(long, default_value = DEFAULT_REPORT_FILENAME)]
    pub out: PathBuf,

    /// Envia o relatório por email para a lista de destinatários
    #[arg(long)]
    pub email: bool,

    /// Nome de quem está solicitando o upload (vai no corpo do email)
    #[arg(long, requires = "email")]
    pub requester: Option<String>,

    /// Equipe de quem está solicitando o upload
    #[arg(long, requires = "email")]
    pub team: Option<String>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Caminho da planilha .xlsx a validar
    #[arg(short, long)]
    pub file: PathBuf,
}
