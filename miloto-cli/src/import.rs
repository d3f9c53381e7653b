use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};

use miloto_core::models::{DrawDate, DrawTable, Number, Slot};

use crate::config::LoaderConfig;

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub total_records: u32,
    pub columns: u32,
    pub absent_cells: u32,
    pub invalid_cells: u32,
    pub null_dates: u32,
    pub errors: u32,
}

pub struct Dataset {
    pub table: DrawTable,
    pub dates: Vec<DrawDate>,
    pub summary: ImportSummary,
}

pub fn load_csv(config: &LoaderConfig) -> Result<Dataset> {
    let path = config.csv_path.as_path();
    if !path.exists() {
        bail!("Archivo {:?} no encontrado", path);
    }
    let file = std::fs::File::open(path)
        .with_context(|| format!("Imposible abrir {:?}", path))?;
    let dataset = read_dataset(file, config)?;
    log_summary(path, &dataset.summary);
    Ok(dataset)
}

/// Reads draws from CSV. Rows shorter than the header are padded with
/// absent slots; extra trailing fields are ignored.
pub fn read_dataset<R: Read>(source: R, config: &LoaderConfig) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(config.delimiter_byte()?)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let headers = reader
        .headers()
        .context("Imposible leer la cabecera")?
        .clone();

    let Some(date_idx) = headers.iter().position(|h| h == config.date_column) else {
        bail!("No se encontró la columna '{}'", config.date_column);
    };

    let slot_columns: Vec<(usize, String)> = headers
        .iter()
        .enumerate()
        .filter(|(_, h)| !config.is_skipped(h))
        .map(|(i, h)| (i, h.to_string()))
        .collect();

    let mut summary = ImportSummary {
        columns: slot_columns.len() as u32,
        ..ImportSummary::default()
    };
    let mut draws: Vec<Vec<Slot>> = Vec::new();
    let mut dates: Vec<DrawDate> = Vec::new();

    for record_result in reader.records() {
        summary.total_records += 1;
        let line = summary.total_records;
        let record = match record_result {
            Ok(record) => record,
            Err(e) => {
                warn!("Error de lectura en la línea {}: {}", line, e);
                summary.errors += 1;
                continue;
            }
        };

        let raw_date = record.get(date_idx).unwrap_or_default();
        let date = parse_date(raw_date);
        if date.is_none() {
            summary.null_dates += 1;
            if !raw_date.is_empty() {
                warn!("Fecha inválida en la línea {}: '{}'", line, raw_date);
            }
        }

        let mut draw = Vec::with_capacity(slot_columns.len());
        for (idx, name) in &slot_columns {
            let raw = record.get(*idx).unwrap_or_default();
            let slot = match parse_cell(raw) {
                Ok(slot) => slot,
                Err(e) => {
                    warn!("Línea {}, columna '{}': {}", line, name, e);
                    summary.invalid_cells += 1;
                    None
                }
            };
            if slot.is_none() {
                summary.absent_cells += 1;
            }
            draw.push(slot);
        }

        draws.push(draw);
        dates.push(date);
    }

    let columns = slot_columns.into_iter().map(|(_, name)| name).collect();
    let table = DrawTable::new(columns, draws)?;
    Ok(Dataset { table, dates, summary })
}

/// Empty and `NaN` cells are absent. Whole floats such as `7.0` are accepted.
pub fn parse_cell(raw: &str) -> Result<Slot> {
    let raw = raw.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return Ok(None);
    }
    if let Ok(n) = raw.parse::<Number>() {
        return Ok(Some(n));
    }
    let value: f64 = raw
        .parse()
        .with_context(|| format!("Valor no numérico '{}'", raw))?;
    if value.fract() != 0.0 || value < 0.0 || value > Number::MAX as f64 {
        bail!("Valor fuera de rango '{}'", raw);
    }
    Ok(Some(value as Number))
}

/// Normalizes the supported date layouts; `None` when nothing matches.
pub fn parse_date(raw: &str) -> DrawDate {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|dt| dt.date())
        })
}

fn log_summary(path: &Path, summary: &ImportSummary) {
    info!(
        "{:?}: {} sorteos, {} columnas, {} celdas vacías, {} fechas nulas",
        path, summary.total_records, summary.columns, summary.absent_cells, summary.null_dates
    );
    if summary.errors > 0 || summary.invalid_cells > 0 {
        warn!(
            "{:?}: {} líneas ilegibles, {} celdas inválidas",
            path, summary.errors, summary.invalid_cells
        );
    }
}
