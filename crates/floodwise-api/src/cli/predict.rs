//! One-shot prediction (`floodwise predict`).
//!
//! Takes either a template name or a JSON file mapping every feature column to
//! a score, runs the values through the same wizard steps the interactive
//! form uses, then scores the completed form.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{bail, Context, Result};
use console::style;
use serde::Serialize;

use floodwise_core::template::{apply_template, TEMPLATES};
use floodwise_core::wizard::WizardExt;
use floodwise_types::prediction::PredictionResult;
use floodwise_types::schema::{Category, Feature};
use floodwise_types::wizard::SessionState;

use crate::cli::render;
use crate::state::AppState;

#[derive(Debug, Serialize)]
struct PredictOutput<'a> {
    source: &'a str,
    percent: String,
    #[serde(flatten)]
    result: &'a PredictionResult,
}

/// Build a review-phase session from a flat feature map.
///
/// Every feature must be present exactly once and no other keys are allowed.
/// Values go through each category's step so range checks match the wizard.
fn session_from_values(values: &BTreeMap<String, f64>) -> Result<SessionState> {
    let unknown: Vec<&str> = values
        .keys()
        .filter(|k| k.parse::<Feature>().is_err())
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        bail!("Unknown feature(s): {}", unknown.join(", "));
    }

    let missing: Vec<&str> = Feature::ALL
        .iter()
        .filter(|f| !values.contains_key(f.as_str()))
        .map(|f| f.as_str())
        .collect();
    if !missing.is_empty() {
        bail!("Missing feature(s): {}", missing.join(", "));
    }

    let mut session = SessionState::new();
    for category in Category::ALL {
        let step: BTreeMap<String, f64> = category
            .features()
            .iter()
            .map(|f| (f.as_str().to_string(), values[f.as_str()]))
            .collect();
        session
            .submit_step(&step)
            .with_context(|| format!("Invalid values for '{}'", category.title()))?;
    }
    Ok(session)
}

async fn read_input(path: &Path) -> Result<BTreeMap<String, f64>> {
    let raw = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&raw)
        .with_context(|| format!("{} is not a JSON object of feature scores", path.display()))
}

/// Run a single prediction and print the panel (or JSON).
pub async fn predict(
    state: &AppState,
    template: Option<&str>,
    input: Option<&Path>,
    json: bool,
) -> Result<()> {
    let (source, mut session) = match (template, input) {
        (Some(name), _) => {
            let mut session = SessionState::new();
            if !apply_template(&mut session, name) {
                let known: Vec<&str> = TEMPLATES.iter().map(|t| t.name).collect();
                bail!("Unknown template '{name}' (available: {})", known.join(", "));
            }
            (name.to_string(), session)
        }
        (None, Some(path)) => {
            let values = read_input(path).await?;
            (path.display().to_string(), session_from_values(&values)?)
        }
        (None, None) => bail!("Pass --template or --input"),
    };

    session.begin_prediction()?;

    let adapter = state.adapter.clone();
    let form = session.form;
    let result = tokio::task::spawn_blocking(move || adapter.predict(&form))
        .await
        .context("Prediction task failed")??;

    if json {
        let output = PredictOutput {
            source: &source,
            percent: result.percent(),
            result: &result,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!();
    println!("  {} {}", style("Sumber:").dim(), style(&source).cyan());
    render::print_prediction(&result);
    Ok(())
}
