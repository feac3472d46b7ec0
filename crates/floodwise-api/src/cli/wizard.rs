//! Interactive terminal wizard (`floodwise wizard`).
//!
//! Drives one `SessionState` through its phases using dialoguer prompts:
//! one step per category with back/next, a review table, and the prediction
//! panel (with the submitted inputs) plus retry and reset. Every transition goes through `WizardExt`, so
//! the terminal and HTTP front ends behave identically.

use std::collections::BTreeMap;

use anyhow::{Context, Result};
use console::style;
use dialoguer::{Input, Select};

use floodwise_core::template::{apply_template, TEMPLATES};
use floodwise_core::wizard::{StepView, WizardExt};
use floodwise_types::schema::{in_range, MAX_SCORE, MIN_SCORE};
use floodwise_types::wizard::{SessionState, WizardPhase};

use crate::cli::render;
use crate::state::AppState;

/// What the user chose to do after a screen.
enum Flow {
    Continue,
    Quit,
}

/// Run the wizard until the user quits.
pub async fn run_wizard(state: &AppState) -> Result<()> {
    let mut session = SessionState::new();

    println!();
    println!(
        "  {} {}",
        style("🌊").bold(),
        style("Prediksi Risiko Banjir").cyan().bold()
    );

    loop {
        let flow = match session.phase {
            WizardPhase::Editing { .. } => editing_screen(&mut session)?,
            WizardPhase::Review => review_screen(&mut session)?,
            WizardPhase::Predicted => result_screen(state, &mut session).await?,
        };
        if let Flow::Quit = flow {
            break;
        }
    }

    println!();
    println!("  {}", style("Sampai jumpa.").dim());
    Ok(())
}

fn print_step_header(view: &StepView) {
    println!();
    println!(
        "  {} {}",
        style(format!("Langkah {}/{}", view.step_index + 1, view.total_steps)).dim(),
        style(view.title).cyan().bold()
    );
    println!("  {}", style(render::progress_bar(view.progress)).dim());
    println!();
    for control in &view.controls {
        println!(
            "  {:<34} {:>4.1}  {}",
            control.feature.as_str(),
            control.value,
            style(control.description).dim()
        );
    }
    println!();
}

fn editing_screen(session: &mut SessionState) -> Result<Flow> {
    let Some(view) = session.step_view() else {
        return Ok(Flow::Continue);
    };
    print_step_header(&view);

    let next = if view.next_label == "review" {
        "Isi nilai lalu tinjau"
    } else {
        "Isi nilai lalu lanjut"
    };
    let mut items = vec![next, "Lanjut dengan nilai di atas"];
    if view.can_go_back {
        items.push("Kembali");
    }
    items.push("Gunakan template");
    items.push("Keluar");

    let selection = Select::new()
        .with_prompt("Pilih aksi")
        .items(&items)
        .default(0)
        .interact()?;

    match items[selection] {
        "Kembali" => {
            session.go_back()?;
        }
        "Gunakan template" => choose_template(session)?,
        "Keluar" => return Ok(Flow::Quit),
        "Lanjut dengan nilai di atas" => submit(session, &BTreeMap::new()),
        _ => {
            let values = prompt_values(&view)?;
            submit(session, &values);
        }
    }
    Ok(Flow::Continue)
}

fn prompt_values(view: &StepView) -> Result<BTreeMap<String, f64>> {
    let mut values = BTreeMap::new();
    for control in &view.controls {
        let value: f64 = Input::new()
            .with_prompt(format!("{} ({})", control.feature, control.description))
            .default(control.value)
            .validate_with(|v: &f64| -> Result<(), String> {
                if in_range(*v) {
                    Ok(())
                } else {
                    Err(format!("Nilai harus antara {MIN_SCORE} dan {MAX_SCORE}"))
                }
            })
            .interact_text()?;
        values.insert(control.feature.as_str().to_string(), value);
    }
    Ok(values)
}

/// Submit a step; a rejected step is reported and the session stays put.
fn submit(session: &mut SessionState, values: &BTreeMap<String, f64>) {
    if let Err(e) = session.submit_step(values) {
        println!("  {} {}", style("✗").red().bold(), e);
    }
}

fn choose_template(session: &mut SessionState) -> Result<()> {
    let mut items: Vec<String> = TEMPLATES
        .iter()
        .map(|t| format!("{} ({})", t.name, t.label))
        .collect();
    items.push("Batal".to_string());

    let selection = Select::new()
        .with_prompt("Template lokasi")
        .items(&items)
        .default(0)
        .interact()?;

    if let Some(template) = TEMPLATES.get(selection) {
        apply_template(session, template.name);
        println!(
            "  {} Template {} diterapkan",
            style("✓").green().bold(),
            style(template.name).cyan()
        );
    }
    Ok(())
}

fn review_screen(session: &mut SessionState) -> Result<Flow> {
    println!();
    println!("  {}", style("Tinjau Data").cyan().bold());
    println!("  {}", style(render::progress_bar(session.progress())).dim());
    println!();
    println!("{}", render::review_table(&session.review()));
    println!();

    let items = ["Prediksi", "Kembali ke langkah 1", "Gunakan template", "Keluar"];
    let selection = Select::new()
        .with_prompt("Pilih aksi")
        .items(&items)
        .default(0)
        .interact()?;

    match selection {
        0 => {
            session.begin_prediction()?;
        }
        1 => {
            session.go_back()?;
        }
        2 => choose_template(session)?,
        _ => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

async fn result_screen(state: &AppState, session: &mut SessionState) -> Result<Flow> {
    let adapter = state.adapter.clone();
    let form = session.form.clone();
    let outcome = tokio::task::spawn_blocking(move || adapter.predict(&form))
        .await
        .context("Prediction task failed")?;

    match &outcome {
        Ok(result) => render::print_prediction(result),
        Err(e) => render::print_prediction_error(&e.to_string()),
    }
    println!("{}", render::input_details(&session.review()));
    println!();

    let items = ["Prediksi baru", "Coba lagi", "Keluar"];
    let selection = Select::new()
        .with_prompt("Pilih aksi")
        .items(&items)
        .default(0)
        .interact()?;

    match selection {
        0 => {
            session.reset();
        }
        1 => {
            session.begin_prediction()?;
        }
        _ => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}
