// Content Store: static, read-only portfolio tables.
// Everything is built once at startup and shared behind an Arc; nothing mutates it afterwards.

pub mod case_studies;
pub mod handlers;
pub mod models;
pub mod portfolio;

use std::collections::HashMap;

pub use models::{ExperienceEntry, ProjectEntry};

/// In-memory content tables consumed by the agent, the matcher and the HTTP surface.
#[derive(Debug, Clone)]
pub struct ContentStore {
    experience: Vec<ExperienceEntry>,
    projects: Vec<ProjectEntry>,
    case_studies: HashMap<String, String>,
}

impl ContentStore {
    pub fn new(
        experience: Vec<ExperienceEntry>,
        projects: Vec<ProjectEntry>,
        case_studies: HashMap<String, String>,
    ) -> Self {
        Self {
            experience,
            projects,
            case_studies,
        }
    }

    /// The store populated with the built-in portfolio.
    pub fn portfolio() -> Self {
        let case_studies = case_studies::CASE_STUDIES
            .iter()
            .map(|(key, text)| (key.to_string(), text.to_string()))
            .collect();
        Self::new(portfolio::experience(), portfolio::projects(), case_studies)
    }

    pub fn experience(&self) -> &[ExperienceEntry] {
        &self.experience
    }

    pub fn projects(&self) -> &[ProjectEntry] {
        &self.projects
    }

    pub fn case_study(&self, key: &str) -> Option<&str> {
        self.case_studies.get(key).map(String::as_str)
    }

    pub fn conversation_starters(&self) -> &'static [&'static str] {
        portfolio::CONVERSATION_STARTERS
    }

    /// Plain-text rendering of the portfolio, appended to remote completion prompts.
    pub fn portfolio_digest(&self) -> String {
        let mut digest = String::from("Experience:\n");
        for job in &self.experience {
            digest.push_str(&format!(
                "- {} at {} ({}), {}. {}\n",
                job.title, job.company, job.location, job.period, job.about_company
            ));
            for achievement in &job.achievements {
                digest.push_str(&format!("  * {achievement}\n"));
            }
        }
        digest.push_str("\nProjects:\n");
        for project in &self.projects {
            digest.push_str(&format!(
                "- {} [{}]: {}\n",
                project.title, project.category, project.description
            ));
        }
        digest.push_str(
            "\nEducation: MS in Business Analytics at Babson College (2023 - 2025); \
             undergraduate degree in Engineering.\nContact: akansha.akg19@gmail.com\n",
        );
        digest
    }
}
