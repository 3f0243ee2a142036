use super::ui;
use crate::core::config::SeriesConfig;
use crate::core::savings::SavingsProjection;
use crate::core::series::RateProvider;
use anyhow::{Context, Result};
use comfy_table::Cell;
use tracing::info;

pub async fn run(
    provider: &(dyn RateProvider + Send + Sync),
    series: &SeriesConfig,
    year: i32,
) -> Result<()> {
    info!("Projecting savings yield for {year}");

    let pb = ui::new_spinner("Fetching series data...");
    let fetched = async {
        // The formula needs both inputs; either failure aborts the command.
        let selic = provider
            .fetch_latest(series.selic(), year)
            .await
            .with_context(|| format!("Failed to fetch SELIC (series {})", series.selic()))?;
        let tr = provider
            .fetch_latest(series.tr(), year)
            .await
            .with_context(|| format!("Failed to fetch TR (series {})", series.tr()))?;
        anyhow::Ok((selic, tr))
    }
    .await;
    pb.finish_and_clear();

    let (selic, tr) = fetched?;
    let projection = SavingsProjection::from_observations(selic, tr);
    display_projection(&projection, year);

    Ok(())
}

fn display_projection(projection: &SavingsProjection, year: i32) {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Rate"),
        ui::header_cell("Date"),
        ui::header_cell("Value (%)"),
    ]);

    for (label, observation) in [
        ("SELIC (accumulated in year)", &projection.selic),
        ("TR (accumulated in year)", &projection.tr),
    ] {
        table.add_row(vec![
            Cell::new(label),
            ui::format_optional_cell(Some(observation.date), |d| {
                d.format("%d/%m/%Y").to_string()
            }),
            ui::format_optional_cell(Some(observation.value), |v| format!("{v:.2}")),
        ]);
    }

    println!(
        "Savings yield projection, reference year {}\n",
        ui::style_text(&year.to_string(), ui::StyleType::Title)
    );
    println!("{table}");
    println!(
        "\n{} {}",
        ui::style_text("Projected annual savings yield:", ui::StyleType::TotalLabel),
        ui::style_text(
            &format!("{:.2}%", projection.projected_yield),
            ui::StyleType::TotalValue
        )
    );
    println!(
        "{}",
        ui::style_text(
            "Computed from the most recent observation of each series within the year.",
            ui::StyleType::Subtle
        )
    );
}
