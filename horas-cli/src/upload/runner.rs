//! Sequential submission of spreadsheet rows to the site.

use log::{debug, info};

use crate::api::client::SiteClient;
use crate::api::models::ListItemPayload;

use super::mapper::map_row;
use super::types::{RawRow, ReportBatch, RowOutcome};

/// Process every row in order, one remote conversation at a time.
///
/// Each row yields exactly one outcome and failures never stop the
/// batch, so the returned report always covers the whole input.
pub async fn run_batch<C: SiteClient + Sync>(client: &C, rows: &[RawRow]) -> ReportBatch {
    let mut batch = ReportBatch::new();
    for row in rows {
        let outcome = process_row(client, row).await;
        debug!(
            "row {}: {} ({})",
            row.row_number, outcome.status, outcome.message
        );
        batch.push(outcome);
    }
    info!(
        "batch finished: {} ok, {} failed",
        batch.success_count(),
        batch.error_count()
    );
    batch
}

async fn process_row<C: SiteClient + Sync>(client: &C, row: &RawRow) -> RowOutcome {
    let training = row.field_text("TREINAMENTO");

    let record = match map_row(row) {
        Ok(record) => record,
        Err(err) => return RowOutcome::error(report_identifier(row), training, err.to_string()),
    };

    let identity = match client.resolve_user(&record.email).await {
        Ok(identity) => identity,
        Err(err) => return RowOutcome::error(record.email, record.training_name, err.to_string()),
    };

    let payload = ListItemPayload::from_record(&record, identity.id);
    match client.add_item(&payload).await {
        Ok(()) => RowOutcome::success(record.email, record.training_name),
        Err(err) => RowOutcome::error(record.email, record.training_name, err.to_string()),
    }
}

/// The row's email when it has one, its worksheet row number otherwise.
/// Keeps unmappable rows identifiable in the report.
fn report_identifier(row: &RawRow) -> String {
    let email = row.field_text("EMAIL");
    if email.is_empty() {
        row.fallback_identifier()
    } else {
        email
    }
}
