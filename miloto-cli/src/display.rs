use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};
use textplots::Plot;

use crate::chart::MonthCount;
use crate::import::ImportSummary;
use miloto_core::models::{CombinationCount, NumberFrequency, NumberProbability, ProbabilityTag};

fn new_table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

fn last_seen(record: &NumberFrequency) -> String {
    record
        .occurrence_dates
        .first()
        .map(|d| d.to_string())
        .unwrap_or_else(|| "—".to_string())
}

pub fn display_import_summary(summary: &ImportSummary) {
    println!("Datos cargados :");
    println!("  Sorteos leídos    : {}", summary.total_records);
    println!("  Columnas          : {}", summary.columns);
    println!("  Celdas vacías     : {}", summary.absent_cells);
    println!("  Fechas nulas      : {}", summary.null_dates);
    if summary.invalid_cells > 0 {
        println!("  Celdas inválidas  : {}", summary.invalid_cells);
    }
    if summary.errors > 0 {
        println!("  Errores           : {}", summary.errors);
    }
}

pub fn display_frequency(records: &[NumberFrequency], draws: usize) {
    if records.is_empty() {
        println!("Ningún número observado.");
        return;
    }

    println!("\n📊 Frecuencias sobre {} sorteos\n", draws);

    let mut table = new_table(vec!["Número", "Apariciones", "Porcentaje", "Última vez"]);
    for record in records {
        table.add_row(vec![
            format!("{:2}", record.number),
            record.count.to_string(),
            format!("{:.2} %", record.percentage),
            last_seen(record),
        ]);
    }
    println!("{table}");
}

pub fn display_number(record: &NumberFrequency, recent: usize) {
    println!("\n── Número {} ──", record.number);
    println!("  Apariciones : {}", record.count);
    println!("  Porcentaje  : {:.2} %", record.percentage);
    println!("  Última vez  : {}", last_seen(record));

    if !record.occurrence_dates.is_empty() {
        let shown: Vec<String> = record
            .occurrence_dates
            .iter()
            .take(recent)
            .map(|d| d.to_string())
            .collect();
        println!("  Fechas      : {}", shown.join(", "));
        if record.occurrence_dates.len() > recent {
            println!("                (+{} más)", record.occurrence_dates.len() - recent);
        }
    }
}

pub fn display_combinations(combos: &[CombinationCount], title: &str) {
    println!("\n🔢 {title}\n");
    if combos.is_empty() {
        println!("Ninguna combinación encontrada.");
        return;
    }

    let mut table = new_table(vec!["#", "Combinación", "Apariciones"]);
    for (i, combo) in combos.iter().enumerate() {
        let numbers = combo
            .key
            .numbers()
            .iter()
            .map(|n| format!("{:2}", n))
            .collect::<Vec<_>>()
            .join(" - ");
        table.add_row(vec![(i + 1).to_string(), numbers, combo.count.to_string()]);
    }
    println!("{table}");
}

pub fn display_probabilities(probs: &[NumberProbability]) {
    println!("\n🎯 Probabilidades empíricas\n");

    let mut table = new_table(vec!["Número", "Probabilidad", "Tag"]);
    for prob in probs {
        let color = match prob.tag {
            ProbabilityTag::Hot => Color::Green,
            ProbabilityTag::Cold => Color::Red,
            ProbabilityTag::Normal => Color::White,
        };
        table.add_row(vec![
            Cell::new(format!("{:2}", prob.number)),
            Cell::new(format!("{:.2} %", prob.probability)),
            Cell::new(prob.tag.to_string()).fg(color),
        ]);
    }
    println!("{table}");
}

pub fn display_monthly_chart(number: u32, months: &[MonthCount]) {
    println!("\n📈 Frecuencia del número {} por mes\n", number);

    let max_count = months.iter().map(|m| m.count).max().unwrap_or(0);
    if max_count == 0 {
        println!("  (Sin datos para graficar)");
        return;
    }

    let points: Vec<(f32, f32)> = months
        .iter()
        .enumerate()
        .map(|(i, m)| (i as f32, m.count as f32))
        .collect();
    let x_max = months.len().max(2) as f32;
    let shape = textplots::Shape::Bars(&points);
    let mut chart = textplots::Chart::new_with_y_range(120, 40, 0.0, x_max, 0.0, max_count as f32 + 1.0);
    chart.lineplot(&shape).display();

    let mut table = new_table(vec!["Mes", "Frecuencia", ""]);
    for month in months {
        let bar = "█".repeat((month.count as f64 / max_count as f64 * 30.0).round() as usize);
        table.add_row(vec![month.month.clone(), month.count.to_string(), bar]);
    }
    println!("{table}");
}
