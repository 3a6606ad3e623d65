use serde::{Deserialize, Serialize};

/// One job in the work history. Loaded once at startup, never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub title: String,
    pub company: String,
    pub location: String,
    /// Free text, e.g. "Aug 2022 - Aug 2024 (2 years)".
    pub period: String,
    pub about_company: String,
    pub achievements: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ProjectKind {
    /// `link` is a key into the case-study table.
    CaseStudy,
    /// `link` is a path to an external document.
    ExternalLink,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub title: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub link: String,
    pub kind: ProjectKind,
}

impl ProjectEntry {
    /// The case-study key, if this project has one.
    pub fn case_study_key(&self) -> Option<&str> {
        match self.kind {
            ProjectKind::CaseStudy if !self.link.is_empty() => Some(&self.link),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(kind: ProjectKind, link: &str) -> ProjectEntry {
        ProjectEntry {
            title: "Demo".to_string(),
            description: "A demo project".to_string(),
            category: "Testing".to_string(),
            image: "/demo.png".to_string(),
            link: link.to_string(),
            kind,
        }
    }

    #[test]
    fn test_case_study_key_only_for_case_studies() {
        assert_eq!(
            project(ProjectKind::CaseStudy, "demo-key").case_study_key(),
            Some("demo-key")
        );
        assert_eq!(
            project(ProjectKind::ExternalLink, "/demo.pdf").case_study_key(),
            None
        );
        assert_eq!(project(ProjectKind::CaseStudy, "").case_study_key(), None);
    }

    #[test]
    fn test_project_kind_serde_snake_case() {
        let json = serde_json::to_string(&ProjectKind::ExternalLink).unwrap();
        assert_eq!(json, r#""external_link""#);
        let kind: ProjectKind = serde_json::from_str(r#""case_study""#).unwrap();
        assert_eq!(kind, ProjectKind::CaseStudy);
    }
}
