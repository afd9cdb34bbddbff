//! Reads training rows from the input spreadsheet.
//!
//! The first worksheet is the data sheet: row 1 carries the headers, every
//! following row is one training entry. All nine required columns must be
//! present before any row is produced.

use anyhow::{Context, Result};
use calamine::{Data, Reader, Xlsx};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use super::types::RawRow;

/// Columns the sheet must carry, exactly as written here.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "EMAIL",
    "UNIDADE",
    "TREINAMENTO",
    "CARGA HORARIA",
    "TIPO DO TREINAMENTO",
    "INICIO DO TREINAMENTO",
    "TERMINO DO TREINAMENTO",
    "CATEGORIA",
    "INSTITUIÇÃO/INSTRUTOR",
];

/// Raised when required columns are absent. Lists every missing column at
/// once so the sheet can be fixed in a single pass.
#[derive(Debug, Clone)]
pub struct SchemaError {
    pub missing: Vec<String>,
}

impl SchemaError {
    fn all_missing() -> Self {
        Self {
            missing: REQUIRED_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl std::fmt::Display for SchemaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Colunas obrigatórias ausentes na planilha: {}",
            self.missing.join(", ")
        )
    }
}

impl std::error::Error for SchemaError {}

/// Read all data rows from an .xlsx file on disk.
pub fn read_rows_from_path<P: AsRef<Path>>(path: P) -> Result<Vec<RawRow>> {
    let path = path.as_ref();
    let file = File::open(path)
        .with_context(|| format!("Failed to open spreadsheet: {}", path.display()))?;
    read_rows(BufReader::new(file))
}

/// Read all data rows from an .xlsx byte stream.
///
/// Fully empty rows are skipped; everything else is returned in file order
/// with its worksheet row number.
pub fn read_rows<RS: Read + Seek>(reader: RS) -> Result<Vec<RawRow>> {
    let mut workbook: Xlsx<_> = Xlsx::new(reader).context("Failed to open spreadsheet")?;

    let sheet_names = workbook.sheet_names().to_vec();
    let Some(sheet_name) = sheet_names.first().cloned() else {
        return Err(SchemaError::all_missing().into());
    };

    let range = workbook
        .worksheet_range(&sheet_name)
        .with_context(|| format!("Failed to read sheet: {sheet_name}"))?;

    let rows: Vec<Vec<Data>> = range.rows().map(|r| r.to_vec()).collect();
    let Some(header_row) = rows.first() else {
        return Err(SchemaError::all_missing().into());
    };

    // Header cells that are not text do not name a column.
    let headers: Vec<String> = header_row
        .iter()
        .map(|c| match c {
            Data::String(s) => s.clone(),
            _ => String::new(),
        })
        .collect();

    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(SchemaError { missing }.into());
    }

    let mut out = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let row_number = (idx + 1) as u32;

        let mut cells = HashMap::new();
        for (col_idx, cell) in row.iter().enumerate() {
            let header = headers.get(col_idx).map(String::as_str).unwrap_or("");
            if header.is_empty() {
                continue;
            }
            let value = cell_to_value(cell);
            if value.is_null() {
                continue;
            }
            cells.insert(header.to_string(), value);
        }

        // A row with no content at all is not a record.
        if cells.is_empty() {
            continue;
        }

        out.push(RawRow { row_number, cells });
    }

    Ok(out)
}

/// Convert a spreadsheet cell to a JSON value, normalizing whole floats
/// to integers so "16.0" cells read back as 16.
fn cell_to_value(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Null,
        Data::String(s) if s.trim().is_empty() => Value::Null,
        Data::String(s) => Value::String(s.clone()),
        Data::Int(i) => json!(*i),
        Data::Float(f) => {
            if f.fract() == 0.0 && *f >= i64::MIN as f64 && *f <= i64::MAX as f64 {
                json!(*f as i64)
            } else {
                json!(*f)
            }
        }
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => Value::String(format!("{}", dt)),
        Data::DateTimeIso(s) => Value::String(s.clone()),
        Data::DurationIso(s) => Value::String(s.clone()),
        Data::Error(_) => Value::Null,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_xlsxwriter::Workbook;
    use std::io::Cursor;

    /// Build an in-memory workbook with the given header row and string rows.
    /// An empty cell value leaves the cell unwritten.
    fn workbook_bytes(headers: &[&str], data_rows: &[Vec<&str>]) -> Vec<u8> {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in headers.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        for (row_idx, row) in data_rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                if !value.is_empty() {
                    sheet
                        .write_string((row_idx + 1) as u32, col as u16, *value)
                        .unwrap();
                }
            }
        }
        workbook.save_to_buffer().unwrap()
    }

    fn full_row(email: &str) -> Vec<&str> {
        vec![
            email,
            "Recife",
            "Onboarding",
            "8",
            "Interno",
            "01/02/2024",
            "02/02/2024",
            "Obrigatório",
            "Equipe Interna",
        ]
    }

    #[test]
    fn test_reads_rows_in_file_order() {
        let bytes = workbook_bytes(
            &REQUIRED_COLUMNS,
            &[full_row("a@example.com"), full_row("b@example.com")],
        );
        let rows = read_rows(Cursor::new(bytes)).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[0].field_text("EMAIL"), "a@example.com");
        assert_eq!(rows[1].row_number, 3);
        assert_eq!(rows[1].field_text("EMAIL"), "b@example.com");
    }

    #[test]
    fn test_missing_columns_are_all_listed() {
        let headers = vec![
            "UNIDADE",
            "TREINAMENTO",
            "CARGA HORARIA",
            "TIPO DO TREINAMENTO",
            "INICIO DO TREINAMENTO",
            "TERMINO DO TREINAMENTO",
            "INSTITUIÇÃO/INSTRUTOR",
        ];
        let bytes = workbook_bytes(&headers, &[]);
        let err = read_rows(Cursor::new(bytes)).unwrap_err();

        let schema = err.downcast_ref::<SchemaError>().expect("schema error");
        assert_eq!(schema.missing, vec!["EMAIL", "CATEGORIA"]);
        assert!(schema.to_string().contains("EMAIL, CATEGORIA"));
    }

    #[test]
    fn test_header_only_sheet_yields_no_rows() {
        let bytes = workbook_bytes(&REQUIRED_COLUMNS, &[]);
        let rows = read_rows(Cursor::new(bytes)).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_empty_sheet_reports_every_column() {
        let mut workbook = Workbook::new();
        workbook.add_worksheet();
        let bytes = workbook.save_to_buffer().unwrap();

        let err = read_rows(Cursor::new(bytes)).unwrap_err();
        let schema = err.downcast_ref::<SchemaError>().expect("schema error");
        assert_eq!(schema.missing.len(), REQUIRED_COLUMNS.len());
    }

    #[test]
    fn test_blank_rows_are_skipped_and_numbering_kept() {
        let bytes = workbook_bytes(
            &REQUIRED_COLUMNS,
            &[
                full_row("a@example.com"),
                vec!["", "", "", "", "", "", "", "", ""],
                full_row("b@example.com"),
            ],
        );
        let rows = read_rows(Cursor::new(bytes)).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].row_number, 2);
        assert_eq!(rows[1].row_number, 4);
    }

    #[test]
    fn test_numeric_hours_cell_normalizes_whole_floats() {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        for (col, header) in REQUIRED_COLUMNS.iter().enumerate() {
            sheet.write_string(0, col as u16, *header).unwrap();
        }
        let row = full_row("a@example.com");
        for (col, value) in row.iter().enumerate() {
            if col == 3 {
                sheet.write_number(1, col as u16, 16.0).unwrap();
            } else {
                sheet.write_string(1, col as u16, *value).unwrap();
            }
        }
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = read_rows(Cursor::new(bytes)).unwrap();
        assert_eq!(rows[0].field_text("CARGA HORARIA"), "16");
    }

    #[test]
    fn test_partially_filled_row_is_kept() {
        let row = vec!["", "Recife", "", "", "", "", "", "", ""];
        let bytes = workbook_bytes(&REQUIRED_COLUMNS, &[row]);

        let rows = read_rows(Cursor::new(bytes)).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].field_text("EMAIL"), "");
        assert_eq!(rows[0].field_text("UNIDADE"), "Recife");
    }
}
