use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

use crate::content::{ExperienceEntry, ProjectEntry};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Serialize)]
pub struct CaseStudyResponse {
    pub key: String,
    pub title: Option<String>,
    pub content: String,
}

/// GET /api/v1/portfolio/experience
pub async fn handle_experience(State(state): State<AppState>) -> Json<Vec<ExperienceEntry>> {
    Json(state.content.experience().to_vec())
}

/// GET /api/v1/portfolio/projects
pub async fn handle_projects(State(state): State<AppState>) -> Json<Vec<ProjectEntry>> {
    Json(state.content.projects().to_vec())
}

/// GET /api/v1/portfolio/case-studies/:key
pub async fn handle_case_study(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<CaseStudyResponse>, AppError> {
    let content = state
        .content
        .case_study(&key)
        .ok_or_else(|| AppError::NotFound(format!("Case study '{key}' not found")))?;

    let title = state
        .content
        .projects()
        .iter()
        .find(|p| p.case_study_key() == Some(key.as_str()))
        .map(|p| p.title.clone());

    Ok(Json(CaseStudyResponse {
        key,
        title,
        content: content.to_string(),
    }))
}
