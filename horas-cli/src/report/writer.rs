//! Results workbook, one row per processed spreadsheet row.

use anyhow::{Context, Result};
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

use crate::upload::types::ReportBatch;

pub const REPORT_SHEET_NAME: &str = "Resultados";
pub const REPORT_HEADERS: [&str; 4] = ["Email", "Treinamento", "Status", "Mensagem"];
pub const DEFAULT_REPORT_FILENAME: &str = "relatorio_resultados.xlsx";

/// Write the results report to disk.
pub fn write_report<P: AsRef<Path>>(batch: &ReportBatch, path: P) -> Result<()> {
    let path = path.as_ref();
    build_workbook(batch)?
        .save(path)
        .with_context(|| format!("Failed to save report: {}", path.display()))?;
    Ok(())
}

/// Render the results report in memory, for the email attachment.
pub fn report_to_buffer(batch: &ReportBatch) -> Result<Vec<u8>> {
    build_workbook(batch)?
        .save_to_buffer()
        .context("Failed to render report")
}

fn build_workbook(batch: &ReportBatch) -> Result<Workbook> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(REPORT_SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in REPORT_HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, &header_format)?;
    }

    for (idx, outcome) in batch.outcomes().iter().enumerate() {
        let row = (idx + 1) as u32;
        sheet.write_string(row, 0, &outcome.email)?;
        sheet.write_string(row, 1, &outcome.training)?;
        sheet.write_string(row, 2, outcome.status.to_string())?;
        sheet.write_string(row, 3, &outcome.message)?;
    }

    sheet.autofit();
    Ok(workbook)
}
