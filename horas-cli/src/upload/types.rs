//! Domain types for the upload pipeline: raw spreadsheet rows, mapped
//! training records, per-row errors and the aggregated result batch.

use chrono::NaiveDate;
use serde_json::Value;
use std::collections::HashMap;

/// Message recorded for every successfully submitted row.
pub const SUCCESS_MESSAGE: &str = "Item adicionado com sucesso";

/// One data row of the input spreadsheet, keyed by header name.
///
/// Only non-empty cells are kept. `row_number` is the 1-based worksheet
/// row (the header is row 1), used to identify rows the report cannot
/// name by email.
#[derive(Debug, Clone)]
pub struct RawRow {
    pub row_number: u32,
    pub cells: HashMap<String, Value>,
}

impl RawRow {
    /// Cell content rendered as text, `""` when the cell is empty.
    ///
    /// Numbers are rendered the way they were normalized at read time,
    /// so a whole-number cell comes out without a decimal part.
    pub fn field_text(&self, column: &str) -> String {
        match self.cells.get(column) {
            Some(Value::String(s)) => s.trim().to_string(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            Some(other) => other.to_string(),
            None => String::new(),
        }
    }

    /// Identifier used in the report when the email cell is unusable.
    pub fn fallback_identifier(&self) -> String {
        format!("linha {}", self.row_number)
    }
}

/// A validated training entry, ready for submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub email: String,
    pub unit: String,
    pub training_name: String,
    /// Workload in hours, always carried as text.
    pub hours: String,
    pub training_type: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub category: String,
    pub institution_or_instructor: String,
}

/// Failure scoped to a single row. The batch keeps going; the error's
/// Display text becomes the row's report message.
#[derive(Debug, Clone, PartialEq)]
pub enum RowError {
    /// The row's own data cannot be mapped to a record.
    Invalid { field: String, message: String },
    /// The site did not resolve the email to a user.
    Lookup { email: String, status: u16 },
    /// The list rejected the item.
    Submission { status: u16 },
    /// Transport or decoding failure underneath a remote call.
    Request { message: String },
}

impl RowError {
    pub fn invalid(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Invalid {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn request(err: impl std::fmt::Display) -> Self {
        Self::Request {
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for RowError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowError::Invalid { message, .. } => {
                write!(f, "Erro de validação: {message}")
            }
            RowError::Lookup { email, status } => {
                write!(f, "Erro ao buscar o usuário para o email {email}: {status}")
            }
            RowError::Submission { status } => {
                write!(f, "Erro ao adicionar item: {status}")
            }
            RowError::Request { message } => {
                write!(f, "Erro na requisição: {message}")
            }
        }
    }
}

impl std::error::Error for RowError {}

/// Report status of a processed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStatus {
    Success,
    Error,
}

impl std::fmt::Display for RowStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RowStatus::Success => write!(f, "Sucesso"),
            RowStatus::Error => write!(f, "Erro"),
        }
    }
}

/// Outcome of one row, in report column order.
#[derive(Debug, Clone, PartialEq)]
pub struct RowOutcome {
    pub email: String,
    pub training: String,
    pub status: RowStatus,
    pub message: String,
}

impl RowOutcome {
    pub fn success(email: impl Into<String>, training: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            training: training.into(),
            status: RowStatus::Success,
            message: SUCCESS_MESSAGE.to_string(),
        }
    }

    pub fn error(
        email: impl Into<String>,
        training: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            training: training.into(),
            status: RowStatus::Error,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == RowStatus::Success
    }
}

/// Ordered outcomes of a batch run with running counters.
///
/// Outcomes are appended in input order, exactly one per processed row,
/// so `success_count + error_count` always equals `len`.
#[derive(Debug, Default)]
pub struct ReportBatch {
    outcomes: Vec<RowOutcome>,
    success_count: usize,
    error_count: usize,
}

impl ReportBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, outcome: RowOutcome) {
        match outcome.status {
            RowStatus::Success => self.success_count += 1,
            RowStatus::Error => self.error_count += 1,
        }
        self.outcomes.push(outcome);
    }

    pub fn outcomes(&self) -> &[RowOutcome] {
        &self.outcomes
    }

    pub fn success_count(&self) -> usize {
        self.success_count
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}
