use super::ui;
use crate::core::config::SeriesConfig;
use crate::core::series::{FetchError, Observation, RateProvider, SeriesId};
use anyhow::Result;
use comfy_table::Cell;
use tracing::debug;

struct SeriesRow {
    label: &'static str,
    series: SeriesId,
    result: Result<Observation, FetchError>,
}

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    series: &SeriesConfig,
    year: i32,
) -> Result<()> {
    let pb = ui::new_spinner("Fetching series data...");

    // One sequential request per series
    let mut rows = Vec::new();
    for (label, id) in [
        ("SELIC (accumulated in year)", series.selic()),
        ("TR (accumulated in year)", series.tr()),
    ] {
        let result = provider.fetch_latest(id, year).await;
        if let Err(e) = &result {
            debug!("Fetch error for series {}: {}", id, e);
        }
        rows.push(SeriesRow { label, series: id, result });
    }
    pb.finish_and_clear();

    println!(
        "Banco Central series, reference year {}\n",
        ui::style_text(&year.to_string(), ui::StyleType::Title)
    );
    display_rows(&rows);

    for row in &rows {
        if let Err(e) = &row.result {
            println!(
                "{}",
                ui::style_text(&format!("{}: {}", row.label, e), ui::StyleType::Error)
            );
        }
    }

    Ok(())
}

fn display_rows(rows: &[SeriesRow]) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Series"),
        ui::header_cell("Code"),
        ui::header_cell("Date"),
        ui::header_cell("Value (%)"),
    ]);

    for row in rows {
        let (date_cell, value_cell) = match &row.result {
            Ok(obs) => (
                ui::format_optional_cell(Some(obs.date), |d| d.format("%d/%m/%Y").to_string()),
                ui::format_optional_cell(Some(obs.value), |v| format!("{v:.2}")),
            ),
            Err(_) => (ui::na_cell(true), ui::na_cell(true)),
        };

        table.add_row(vec![
            Cell::new(row.label),
            Cell::new(row.series.to_string()),
            date_cell,
            value_cell,
        ]);
    }

    println!("{table}");
}
