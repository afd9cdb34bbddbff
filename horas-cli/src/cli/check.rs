//! Offline validation: parse and map every row without touching the site.

use anyhow::Result;
use colored::*;

use super::CheckArgs;
use crate::upload::{mapper, reader};

pub fn handle_check_command(args: CheckArgs) -> Result<()> {
    let rows = reader::read_rows_from_path(&args.file)?;
    println!("{} linha(s) de dados na planilha", rows.len());
    println!();

    let mut invalid = 0usize;
    for row in &rows {
        match mapper::map_row(row) {
            Ok(record) => {
                let line = format!(
                    "linha {}: {} | {} | {} a {} | carga: {}",
                    row.row_number,
                    record.email,
                    record.training_name,
                    record.start_date.format("%d/%m/%Y"),
                    record.end_date.format("%d/%m/%Y"),
                    record.hours
                );
                println!("{}", line.green());
            }
            Err(err) => {
                invalid += 1;
                println!("{}", format!("linha {}: {}", row.row_number, err).red());
            }
        }
    }

    println!();
    if invalid == 0 {
        println!("{}", "Todas as linhas estão prontas para envio.".green().bold());
    } else {
        println!(
            "{}",
            format!("{invalid} linha(s) com problemas de validação.").red().bold()
        );
    }

    Ok(())
}
