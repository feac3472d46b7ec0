//! `floodwise templates` and `floodwise schema`.

use anyhow::Result;
use comfy_table::{presets, Cell, CellAlignment, Color, ContentArrangement, Table};
use console::style;

use floodwise_types::schema::Feature;

use crate::http::handlers::catalog::{schema, templates};

/// Print the shipped templates side by side, one row per feature.
pub fn list_templates(json: bool) -> Result<()> {
    let templates = templates();

    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("Feature").fg(Color::White)];
    header.extend(templates.iter().map(|t| Cell::new(t.name).fg(Color::Cyan)));
    table.set_header(header);

    for feature in Feature::ALL {
        let mut row = vec![Cell::new(feature)];
        row.extend(templates.iter().map(|t| {
            let value = t.values.get(&feature).copied().unwrap_or_default();
            Cell::new(format!("{value:.1}")).set_alignment(CellAlignment::Right)
        }));
        table.add_row(row);
    }

    println!();
    for t in &templates {
        println!("  {} {}", style(t.name).cyan().bold(), style(t.label).dim());
    }
    println!();
    println!("{table}");
    println!();
    Ok(())
}

/// Print categories and their features with descriptions.
pub fn show_schema(json: bool) -> Result<()> {
    let schema = schema();

    if json {
        println!("{}", serde_json::to_string_pretty(&schema)?);
        return Ok(());
    }

    for category in &schema.categories {
        println!();
        println!(
            "  {} {}",
            style(format!("{}.", category.step + 1)).dim(),
            style(category.title).cyan().bold()
        );

        let mut table = Table::new();
        table.load_preset(presets::UTF8_FULL_CONDENSED);
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Feature").fg(Color::White),
            Cell::new("Deskripsi").fg(Color::White),
            Cell::new("Range").fg(Color::White),
        ]);
        for f in &category.features {
            table.add_row(vec![
                Cell::new(f.feature).fg(Color::Cyan),
                Cell::new(f.description),
                Cell::new(format!("{:.0}-{:.0} (step {})", f.min, f.max, f.step))
                    .fg(Color::DarkGrey),
            ]);
        }
        println!("{table}");
    }
    println!();
    Ok(())
}
