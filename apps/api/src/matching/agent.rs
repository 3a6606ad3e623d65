//! Experience Agent: structured rule engine over the content store.
//!
//! Branches run in a fixed order and the first match wins:
//! relevance gate → education → company → job title → project title →
//! experience summary → project summary → generic background.
//! Pure function over immutable content; no side effects.

use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::content::{ContentStore, ExperienceEntry, ProjectEntry};
use crate::matching::education::{education_answer, is_education_query};

/// Terms that make a query worth handing to the agent at all.
const RELEVANCE_KEYWORDS: &[&str] = &[
    "experience",
    "work",
    "job",
    "career",
    "position",
    "role",
    "company",
    "employment",
    "profession",
    "occupation",
    "industry",
    "worked",
    "working",
    "employer",
    "colleague",
    "team",
    "professional",
    "background",
    "history",
    "resume",
    "cv",
    "responsibility",
    "achievement",
    "accomplishment",
    "skill",
    "project",
    "development",
    "management",
    "lead",
    "analysis",
    "santo remedio",
    "una brands",
    "nxtsuite",
    "infosys",
    "product manager",
    "data analyst",
    "engineer",
    "education",
    "study",
    "degree",
    "college",
    "university",
    "school",
    "student",
    "graduate",
    "undergraduate",
    "masters",
    "mba",
    "phd",
    "certificate",
    "certification",
    "course",
    "major",
    "minor",
    "babson",
    "ms",
    "business analytics",
];

const SUMMARY_PREVIEW_CHARS: usize = 200;
const HIGHLIGHTED_PROJECTS: usize = 3;

static SITUATION_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"## Situation\s+").expect("situation heading must compile"));
static RESULT_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"## Result\s+").expect("result heading must compile"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AnswerKind {
    Experience,
    Project,
    CaseStudy,
    Education,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetadata {
    pub source: String,
    #[serde(rename = "type")]
    pub kind: AnswerKind,
}

/// Outcome of one `process_query` call. Produced fresh per query, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentResult {
    pub is_relevant: bool,
    pub answer: Option<String>,
    /// 0.0 – 1.0
    pub confidence: f32,
    pub metadata: Option<AgentMetadata>,
}

impl AgentResult {
    pub fn irrelevant() -> Self {
        Self {
            is_relevant: false,
            answer: None,
            confidence: 0.0,
            metadata: None,
        }
    }

    fn answered(answer: String, confidence: f32, source: impl Into<String>, kind: AnswerKind) -> Self {
        Self {
            is_relevant: true,
            answer: Some(answer),
            confidence,
            metadata: Some(AgentMetadata {
                source: source.into(),
                kind,
            }),
        }
    }

    /// The answer text, only when the agent claimed the query and produced something.
    pub fn relevant_answer(&self) -> Option<&str> {
        if !self.is_relevant {
            return None;
        }
        self.answer.as_deref().filter(|a| !a.is_empty())
    }
}

#[derive(Debug, Clone)]
pub struct ExperienceAgent {
    content: Arc<ContentStore>,
}

impl ExperienceAgent {
    pub fn new(content: Arc<ContentStore>) -> Self {
        Self { content }
    }

    pub fn content(&self) -> &ContentStore {
        &self.content
    }

    /// Relevance gate: substring test against the fixed keyword list.
    pub fn is_experience_query(&self, query: &str) -> bool {
        let query_lower = query.to_lowercase();
        RELEVANCE_KEYWORDS.iter().any(|k| query_lower.contains(k))
    }

    pub fn process_query(&self, query: &str) -> AgentResult {
        if !self.is_experience_query(query) {
            return AgentResult::irrelevant();
        }
        let query_lower = query.to_lowercase();

        if is_education_query(&query_lower) {
            return AgentResult::answered(
                education_answer(&query_lower),
                0.95,
                "education-info",
                AnswerKind::Education,
            );
        }

        let experience = self.content.experience();

        if let Some(job) = experience
            .iter()
            .find(|job| query_lower.contains(&job.company.to_lowercase()))
        {
            return AgentResult::answered(
                format_experience_answer(job),
                0.9,
                job.company.clone(),
                AnswerKind::Experience,
            );
        }

        if let Some(job) = experience
            .iter()
            .find(|job| query_lower.contains(&job.title.to_lowercase()))
        {
            return AgentResult::answered(
                format_experience_answer(job),
                0.8,
                job.title.clone(),
                AnswerKind::Experience,
            );
        }

        if let Some(project) = self
            .content
            .projects()
            .iter()
            .find(|p| query_lower.contains(&p.title.to_lowercase()))
        {
            return self.project_answer(project);
        }

        if query_lower.contains("experience")
            || query_lower.contains("work history")
            || query_lower.contains("background")
        {
            return AgentResult::answered(
                self.experience_summary(),
                0.75,
                "experience-summary",
                AnswerKind::Experience,
            );
        }

        if query_lower.contains("project")
            || query_lower.contains("portfolio")
            || query_lower.contains("case study")
        {
            return AgentResult::answered(
                self.projects_summary(),
                0.75,
                "projects-summary",
                AnswerKind::Project,
            );
        }

        AgentResult::answered(
            self.generic_background(),
            0.6,
            "generic-experience",
            AnswerKind::Experience,
        )
    }

    fn project_answer(&self, project: &ProjectEntry) -> AgentResult {
        let intro = format!(
            "Here's information about the {} project:\n\n{}",
            project.title, project.description
        );

        let case_study = project
            .case_study_key()
            .and_then(|key| self.content.case_study(key));

        match case_study {
            Some(text) => AgentResult::answered(
                format!(
                    "{intro}\n\nDetailed case study:\n{}",
                    summarize_case_study(text)
                ),
                0.95,
                project.title.clone(),
                AnswerKind::CaseStudy,
            ),
            None => AgentResult::answered(intro, 0.85, project.title.clone(), AnswerKind::Project),
        }
    }

    fn experience_summary(&self) -> String {
        let experience = self.content.experience();
        let roles = experience
            .iter()
            .map(|job| format!("- **{}** at {} ({})", job.title, job.company, job.period))
            .collect::<Vec<_>>()
            .join("\n");

        let mut summary = format!(
            "## Professional Experience\n\nAkansha has a diverse professional background with \
             over 8 years of experience. Her career includes:\n\n{roles}"
        );
        if let Some(latest) = experience.first() {
            summary.push_str(&format!(
                "\n\nHer most recent role was {} at {}, where she led e-commerce integrations and \
                 data analytics initiatives.",
                latest.title, latest.company
            ));
        }
        summary.push_str(" Would you like more details about any specific role?");
        summary
    }

    fn projects_summary(&self) -> String {
        let highlighted = self
            .content
            .projects()
            .iter()
            .take(HIGHLIGHTED_PROJECTS)
            .map(|p| format!("### {}\n\n{}", p.title, p.description))
            .collect::<Vec<_>>()
            .join("\n\n");

        format!(
            "## Notable Projects\n\nAkansha has worked on several notable projects, including:\n\n\
             {highlighted}\n\nWould you like more information about any specific project?"
        )
    }

    fn generic_background(&self) -> String {
        let companies = self
            .content
            .experience()
            .iter()
            .map(|job| format!("- **{}** - {}", job.company, job.title))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "## Akansha's Professional Background\n\nAkansha has over 8 years of experience in \
             product management and data analytics. She has worked at companies like:\n\n\
             {companies}\n\nHer expertise includes e-commerce platform integration, data pipeline \
             development, recommendation systems, and analytics dashboards. She's skilled in tools \
             like Tableau, BigQuery, NetSuite, Celigo, and various project management \
             methodologies.\n\nWould you like to know more about her specific roles, projects, or \
             technical skills?"
        )
    }
}

fn format_experience_answer(job: &ExperienceEntry) -> String {
    let achievements = job
        .achievements
        .iter()
        .map(|a| format!("- {a}"))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "## Experience at {}\n\n**Role:** {}  \n**Period:** {}\n\n### About the company\n{}\n\n\
         ### Key achievements\n{}",
        job.company, job.title, job.period, job.about_company, achievements
    )
}

/// Body of the section introduced by `heading`, up to the next `##` or end of text.
fn section_body<'a>(text: &'a str, heading: &Regex) -> &'a str {
    match heading.find(text) {
        Some(m) => {
            let rest = &text[m.end()..];
            let end = rest.find("##").unwrap_or(rest.len());
            rest[..end].trim()
        }
        None => "",
    }
}

fn preview(text: &str) -> String {
    text.chars().take(SUMMARY_PREVIEW_CHARS).collect()
}

fn summarize_case_study(text: &str) -> String {
    let situation = section_body(text, &SITUATION_HEADING);
    let result = section_body(text, &RESULT_HEADING);

    format!(
        "### Situation\n{}...\n\n### Result\n{}...\n\n*(This is a summary. Ask for more details if needed.)*",
        preview(situation),
        preview(result)
    )
}
