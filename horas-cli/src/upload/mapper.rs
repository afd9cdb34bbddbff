//! Maps raw spreadsheet rows to validated training records.

use chrono::NaiveDate;

use super::types::{RawRow, RowError, TrainingRecord};

/// Input date format, as filled in by the requesting teams.
pub const DATE_INPUT_FORMAT: &str = "%d/%m/%Y";

const START_DATE_COLUMN: &str = "INICIO DO TREINAMENTO";
const END_DATE_COLUMN: &str = "TERMINO DO TREINAMENTO";

/// Validate one row and build its record.
///
/// The email and both dates are mandatory; every other field passes
/// through as text, empty when the cell is blank. Hours are carried as
/// text no matter how the cell was typed.
pub fn map_row(row: &RawRow) -> Result<TrainingRecord, RowError> {
    let email = row.field_text("EMAIL");
    if email.is_empty() {
        return Err(RowError::invalid("EMAIL", "EMAIL ausente ou vazio"));
    }

    let start_date = parse_date_cell(row, START_DATE_COLUMN)?;
    let end_date = parse_date_cell(row, END_DATE_COLUMN)?;

    Ok(TrainingRecord {
        email,
        unit: row.field_text("UNIDADE"),
        training_name: row.field_text("TREINAMENTO"),
        hours: row.field_text("CARGA HORARIA"),
        training_type: row.field_text("TIPO DO TREINAMENTO"),
        start_date,
        end_date,
        category: row.field_text("CATEGORIA"),
        institution_or_instructor: row.field_text("INSTITUIÇÃO/INSTRUTOR"),
    })
}

fn parse_date_cell(row: &RawRow, column: &str) -> Result<NaiveDate, RowError> {
    let value = row.field_text(column);
    if value.is_empty() {
        return Err(RowError::invalid(column, format!("{column}: data ausente")));
    }
    NaiveDate::parse_from_str(&value, DATE_INPUT_FORMAT).map_err(|_| {
        RowError::invalid(
            column,
            format!("{column}: data '{value}' não está no formato dd/mm/aaaa"),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{Value, json};

    fn raw_row(cells: &[(&str, Value)]) -> RawRow {
        RawRow {
            row_number: 2,
            cells: cells
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    fn complete_row() -> RawRow {
        raw_row(&[
            ("EMAIL", json!("maria@example.com")),
            ("UNIDADE", json!("Recife")),
            ("TREINAMENTO", json!("Onboarding")),
            ("CARGA HORARIA", json!(8)),
            ("TIPO DO TREINAMENTO", json!("Interno")),
            ("INICIO DO TREINAMENTO", json!("01/02/2024")),
            ("TERMINO DO TREINAMENTO", json!("02/02/2024")),
            ("CATEGORIA", json!("Obrigatório")),
            ("INSTITUIÇÃO/INSTRUTOR", json!("Equipe Interna")),
        ])
    }

    #[test]
    fn test_maps_complete_row() {
        let record = map_row(&complete_row()).unwrap();

        assert_eq!(record.email, "maria@example.com");
        assert_eq!(record.training_name, "Onboarding");
        assert_eq!(record.hours, "8");
        assert_eq!(record.start_date, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(record.end_date, NaiveDate::from_ymd_opt(2024, 2, 2).unwrap());
    }

    #[test]
    fn test_missing_email_is_invalid() {
        let mut row = complete_row();
        row.cells.remove("EMAIL");

        let err = map_row(&row).unwrap_err();
        assert_eq!(err, RowError::invalid("EMAIL", "EMAIL ausente ou vazio"));
    }

    #[test]
    fn test_iso_date_is_rejected() {
        let mut row = complete_row();
        row.cells
            .insert("INICIO DO TREINAMENTO".to_string(), json!("2024-02-01"));

        let err = map_row(&row).unwrap_err();
        match err {
            RowError::Invalid { field, message } => {
                assert_eq!(field, "INICIO DO TREINAMENTO");
                assert!(message.contains("'2024-02-01'"));
                assert!(message.contains("dd/mm/aaaa"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_impossible_date_is_rejected() {
        let mut row = complete_row();
        row.cells
            .insert("TERMINO DO TREINAMENTO".to_string(), json!("32/01/2024"));

        let err = map_row(&row).unwrap_err();
        match err {
            RowError::Invalid { field, .. } => assert_eq!(field, "TERMINO DO TREINAMENTO"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_numeric_date_cell_is_rejected() {
        let mut row = complete_row();
        row.cells
            .insert("INICIO DO TREINAMENTO".to_string(), json!(45323));

        let err = map_row(&row).unwrap_err();
        match err {
            RowError::Invalid { field, message } => {
                assert_eq!(field, "INICIO DO TREINAMENTO");
                assert!(message.contains("'45323'"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_missing_date_is_invalid() {
        let mut row = complete_row();
        row.cells.remove("TERMINO DO TREINAMENTO");

        let err = map_row(&row).unwrap_err();
        match err {
            RowError::Invalid { field, message } => {
                assert_eq!(field, "TERMINO DO TREINAMENTO");
                assert!(message.contains("data ausente"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_hours_variants_come_out_as_text() {
        let cases = [
            (json!(16), "16"),
            (json!(2.5), "2.5"),
            (json!("8h"), "8h"),
        ];
        for (cell, expected) in cases {
            let mut row = complete_row();
            row.cells.insert("CARGA HORARIA".to_string(), cell);
            let record = map_row(&row).unwrap();
            assert_eq!(record.hours, expected);
        }
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let mut row = complete_row();
        row.cells.remove("UNIDADE");
        row.cells.remove("CATEGORIA");

        let record = map_row(&row).unwrap();
        assert_eq!(record.unit, "");
        assert_eq!(record.category, "");
    }
}
