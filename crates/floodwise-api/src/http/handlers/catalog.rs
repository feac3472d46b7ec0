//! Read-only catalog handlers: feature schema and templates.

use std::collections::BTreeMap;
use std::time::Instant;

use axum::Json;
use serde::Serialize;

use floodwise_core::template::TEMPLATES;
use floodwise_types::schema::{
    Category, Feature, DEFAULT_SCORE, MAX_SCORE, MIN_SCORE, SCORE_STEP,
};

use crate::http::error::AppError;
use crate::http::response::ApiResponse;

#[derive(Debug, Serialize)]
pub struct FeatureSchema {
    pub feature: Feature,
    pub description: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

#[derive(Debug, Serialize)]
pub struct CategorySchema {
    pub category: Category,
    pub title: &'static str,
    pub step: usize,
    pub features: Vec<FeatureSchema>,
}

#[derive(Debug, Serialize)]
pub struct SchemaResponse {
    pub categories: Vec<CategorySchema>,
    /// Order in which the model consumes features.
    pub canonical_order: Vec<Feature>,
}

#[derive(Debug, Serialize)]
pub struct TemplateSummary {
    pub name: &'static str,
    pub label: &'static str,
    pub values: BTreeMap<Feature, f64>,
}

/// Build the schema description shared by the API and the CLI.
pub fn schema() -> SchemaResponse {
    let categories = Category::ALL
        .iter()
        .map(|category| CategorySchema {
            category: *category,
            title: category.title(),
            step: category.step(),
            features: category
                .features()
                .iter()
                .map(|feature| FeatureSchema {
                    feature: *feature,
                    description: feature.description(),
                    min: MIN_SCORE,
                    max: MAX_SCORE,
                    step: SCORE_STEP,
                    default: DEFAULT_SCORE,
                })
                .collect(),
        })
        .collect();

    SchemaResponse {
        categories,
        canonical_order: Feature::ALL.to_vec(),
    }
}

/// Summaries of every shipped template.
pub fn templates() -> Vec<TemplateSummary> {
    TEMPLATES
        .iter()
        .map(|t| TemplateSummary {
            name: t.name,
            label: t.label,
            values: t.feature_map(),
        })
        .collect()
}

/// GET /api/v1/schema - Categories, features and control bounds.
pub async fn get_schema() -> Result<Json<ApiResponse<SchemaResponse>>, AppError> {
    let start = Instant::now();
    Ok(Json(
        ApiResponse::timed(schema(), start).with_link("self", "/api/v1/schema"),
    ))
}

/// GET /api/v1/templates - Available location templates.
pub async fn list_templates() -> Result<Json<ApiResponse<Vec<TemplateSummary>>>, AppError> {
    let start = Instant::now();
    Ok(Json(
        ApiResponse::timed(templates(), start).with_link("self", "/api/v1/templates"),
    ))
}
