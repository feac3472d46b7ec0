//! Terminal rendering shared by the wizard and one-shot commands.

use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::{style, StyledObject};

use floodwise_core::wizard::ReviewSection;
use floodwise_types::prediction::{PredictionResult, RiskLevel};

const BAR_WIDTH: usize = 30;

/// Text progress bar, e.g. `[#########---------------------]  30%`.
pub fn progress_bar(progress: f64) -> String {
    let progress = progress.clamp(0.0, 1.0);
    let filled = (progress * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        (progress * 100.0).round() as u32
    )
}

/// Review table: one header row per category followed by its features.
pub fn review_table(sections: &[ReviewSection]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Faktor").fg(Color::White),
        Cell::new("Nilai").fg(Color::White),
    ]);

    for section in sections {
        table.add_row(vec![Cell::new(section.title).fg(Color::Cyan), Cell::new("")]);
        for row in &section.rows {
            let value = match row.value {
                Some(v) => Cell::new(format!("{v:.1}")),
                None => Cell::new("-").fg(Color::DarkGrey),
            };
            table.add_row(vec![
                Cell::new(format!("  {}", row.feature)),
                value.set_alignment(CellAlignment::Right),
            ]);
        }
    }
    table
}

fn risk_style<D>(level: RiskLevel, value: D) -> StyledObject<D> {
    let styled = style(value).bold();
    match level {
        RiskLevel::Low => styled.green(),
        RiskLevel::Moderate => styled.yellow(),
        RiskLevel::High => styled.color256(208),
        RiskLevel::VeryHigh => styled.red(),
    }
}

/// Print the prediction panel.
pub fn print_prediction(result: &PredictionResult) {
    let level = result.risk_level;
    println!();
    println!(
        "  {} {}",
        level.emoji(),
        risk_style(level, format!("Risiko Banjir: {level}"))
    );
    println!();
    println!("  Probabilitas : {}", risk_style(level, result.percent()));
    println!("  Tingkat      : {} ({})", level, result.color);
    println!();
    println!("  {}", style(&result.recommendation).italic());
    println!();
}

/// Heading plus review table of the values a prediction was made from.
pub fn input_details(sections: &[ReviewSection]) -> String {
    format!(
        "  {}\n{}",
        style("Detail Input").cyan().bold(),
        review_table(sections)
    )
}

/// Print a prediction failure without leaving the wizard.
pub fn print_prediction_error(message: &str) {
    println!();
    println!("  {} Prediksi gagal: {}", style("✗").red().bold(), message);
    println!();
}
