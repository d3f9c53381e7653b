mod chart;
mod config;
mod display;
mod import;

use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use serde_json::json;

use miloto_core::analysis::{
    aggregate_frequency, count_combinations, estimate_probabilities, find_number,
    mine_subcombinations, subset_count, tag_probabilities, DEFAULT_COMBINATION_LIMIT,
};

use crate::chart::monthly_counts;
use crate::config::{load_config, LoaderConfig};
use crate::display::{
    display_combinations, display_frequency, display_import_summary, display_monthly_chart,
    display_number, display_probabilities,
};
use crate::import::{load_csv, Dataset};

/// MiLoto numbers run from 1 to 39.
const MAX_NUMBER: u32 = 39;

/// Above this many subsets for a single draw, mining gets noticeably slow.
const WIDE_DRAW_SUBSETS: u128 = 10_000;

#[derive(Parser)]
#[command(name = "miloto", about = "Analizador de sorteos MiLoto")]
struct Cli {
    /// Archivo CSV con el histórico de sorteos
    #[arg(short, long, global = true, env = "MILOTO_CSV")]
    file: Option<PathBuf>,

    /// Configuración del cargador (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Salida en JSON
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resumen de los datos cargados
    Summary,

    /// Frecuencia de aparición de todos los números
    Frequency {
        /// Mostrar solo los N primeros
        #[arg(short, long)]
        top: Option<usize>,
    },

    /// Frecuencia de un número concreto
    Number {
        #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_NUMBER as i64))]
        num: u32,

        /// Fechas recientes a mostrar
        #[arg(short, long, default_value = "10")]
        recent: usize,
    },

    /// Combinaciones completas más comunes
    Combinations {
        /// Número máximo de combinaciones
        #[arg(short, long, default_value_t = DEFAULT_COMBINATION_LIMIT)]
        limit: usize,
    },

    /// Probabilidad empírica de cada número
    Probabilities,

    /// Subcombinaciones más frecuentes de un tamaño dado (2-5)
    Frequent {
        /// Tamaño de las subcombinaciones
        #[arg(short, long, default_value = "5")]
        size: usize,
    },

    /// Gráfico de barras mensual de un número
    Chart {
        #[arg(value_parser = clap::value_parser!(u32).range(1..=MAX_NUMBER as i64))]
        num: u32,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => LoaderConfig::default(),
    };
    if let Some(file) = cli.file {
        config.csv_path = file;
    }
    debug!("Configuración: {:?}", config);

    let dataset = load_csv(&config)?;
    let json = cli.json;

    match cli.command {
        Command::Summary => {
            display_import_summary(&dataset.summary);
            Ok(())
        }
        Command::Frequency { top } => cmd_frequency(&dataset, top, json),
        Command::Number { num, recent } => cmd_number(&dataset, num, recent, json),
        Command::Combinations { limit } => cmd_combinations(&dataset, limit, json),
        Command::Probabilities => cmd_probabilities(&dataset, json),
        Command::Frequent { size } => cmd_frequent(&dataset, size, json),
        Command::Chart { num } => cmd_chart(&dataset, num, json),
    }
}

fn print_json(value: serde_json::Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

fn cmd_frequency(dataset: &Dataset, top: Option<usize>, json: bool) -> Result<()> {
    let mut records = aggregate_frequency(&dataset.table, &dataset.dates)?;
    if let Some(top) = top {
        records.truncate(top);
    }
    if json {
        return print_json(json!({ "frequency": records }));
    }
    display_frequency(&records, dataset.table.len());
    Ok(())
}

fn cmd_number(dataset: &Dataset, num: u32, recent: usize, json: bool) -> Result<()> {
    let records = aggregate_frequency(&dataset.table, &dataset.dates)?;
    let Some(record) = find_number(&records, num) else {
        let message = format!("El número {} no ha aparecido en ningún sorteo", num);
        if json {
            return print_json(json!({ "message": message }));
        }
        println!("{message}");
        return Ok(());
    };
    if json {
        return print_json(json!({ "number": num, "data": record }));
    }
    display_number(record, recent);
    Ok(())
}

fn cmd_combinations(dataset: &Dataset, limit: usize, json: bool) -> Result<()> {
    let combos = count_combinations(&dataset.table, limit);
    if json {
        return print_json(json!({ "common_combinations": combos }));
    }
    display_combinations(&combos, "Combinaciones más comunes");
    Ok(())
}

fn cmd_probabilities(dataset: &Dataset, json: bool) -> Result<()> {
    let mut probs = estimate_probabilities(&dataset.table)?;
    tag_probabilities(&mut probs);
    if json {
        return print_json(json!({ "probabilities": probs }));
    }
    display_probabilities(&probs);
    Ok(())
}

fn cmd_frequent(dataset: &Dataset, size: usize, json: bool) -> Result<()> {
    let widest = dataset.table.widest_draw();
    let per_draw = subset_count(widest, size);
    if per_draw > WIDE_DRAW_SUBSETS {
        warn!(
            "Sorteos de hasta {} números: {} subcombinaciones de tamaño {} por sorteo",
            widest, per_draw, size
        );
    }

    let combos = mine_subcombinations(&dataset.table, size)?;
    if json {
        return print_json(json!({ "frequent_combinations": combos }));
    }
    display_combinations(&combos, &format!("Subcombinaciones de {} números más frecuentes", size));
    Ok(())
}

fn cmd_chart(dataset: &Dataset, num: u32, json: bool) -> Result<()> {
    let records = aggregate_frequency(&dataset.table, &dataset.dates)?;
    let Some(record) = find_number(&records, num) else {
        bail!("No hay datos para el número {}", num);
    };
    if record.occurrence_dates.is_empty() {
        bail!("No hay fechas disponibles para el número {}", num);
    }

    let months = monthly_counts(&record.occurrence_dates);
    if json {
        return print_json(json!({ "number": num, "months": months }));
    }
    display_monthly_chart(num, &months);
    Ok(())
}
