//! Canned answers served when the completion endpoint is unavailable.
//! Coarser than the intent matcher: keyword groups checked in a fixed priority order.

const EDUCATION_TERMS: &[&str] = &["education", "study", "college", "degree", "university", "babson"];
const EXPERIENCE_TERMS: &[&str] = &["experience", "work"];
const PROJECT_TERMS: &[&str] = &["project", "portfolio"];
const CONTACT_TERMS: &[&str] = &["contact", "email"];
const SKILL_TERMS: &[&str] = &["skill", "tech"];

pub const EDUCATION_FALLBACK: &str = "## Education\n\nAkansha is currently pursuing her **MS in Business Analytics** at Babson College, which she started in 2023. She's focusing on:\n\n- Advanced analytics\n- Data visualization\n- Machine learning\n- Statistical modeling\n\nBefore this, she completed her undergraduate degree in Engineering.";

pub const EXPERIENCE_FALLBACK: &str = "## Professional Experience\n\nAkansha has over **8 years of experience** in product management and data analytics. Her career includes:\n\n- **Product Manager** at Santo Remedio\n- **Senior Data Analyst** at UNA Brands\n- Experience with various technologies including Tableau, BigQuery, and NetSuite";

pub const PROJECT_FALLBACK: &str = "## Notable Projects\n\nAkansha has worked on several impactful projects:\n\n- **E-commerce Marketplace Integration** that generated $2.6M in revenue\n- **Recommendation Engine** that increased Average Order Value\n- **Real-time Analytics Dashboard** that reduced decision-making time from 10 hours to 30 minutes";

pub const CONTACT_FALLBACK: &str = "## Contact Information\n\nYou can reach Akansha at **akansha.akg19@gmail.com** to discuss opportunities or ask questions about her work.";

pub const SKILL_FALLBACK: &str = "## Technical Skills\n\nAkansha's expertise includes:\n\n- **Data Analytics**: SQL, Python, R\n- **Visualization Tools**: Tableau, Power BI\n- **Cloud Platforms**: AWS, GCP\n- **ERP Systems**: NetSuite\n- **Integration Platforms**: Celigo\n- **Project Management**: Agile/Scrum methodologies";

pub const DEFAULT_FALLBACK: &str = "## About Akansha\n\nI'm currently having trouble connecting to my knowledge base. Akansha is a **Product Manager** with experience in:\n\n- Data analytics\n- E-commerce integrations\n- Building recommendation systems\n\nShe's currently pursuing her MS in Business Analytics at Babson College. For more specific information, you can ask about her education, projects, experience, or skills.";

const GROUPS: &[(&[&str], &str)] = &[
    (EDUCATION_TERMS, EDUCATION_FALLBACK),
    (EXPERIENCE_TERMS, EXPERIENCE_FALLBACK),
    (PROJECT_TERMS, PROJECT_FALLBACK),
    (CONTACT_TERMS, CONTACT_FALLBACK),
    (SKILL_TERMS, SKILL_FALLBACK),
];

pub fn fallback_response(prompt: &str) -> &'static str {
    let prompt_lower = prompt.to_lowercase();
    GROUPS
        .iter()
        .find(|(terms, _)| terms.iter().any(|t| prompt_lower.contains(t)))
        .map(|(_, answer)| *answer)
        .unwrap_or(DEFAULT_FALLBACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_group() {
        assert_eq!(fallback_response("Which degree?"), EDUCATION_FALLBACK);
        assert_eq!(fallback_response("Where did she WORK?"), EXPERIENCE_FALLBACK);
        assert_eq!(fallback_response("portfolio highlights"), PROJECT_FALLBACK);
        assert_eq!(fallback_response("email address"), CONTACT_FALLBACK);
        assert_eq!(fallback_response("tech stack"), SKILL_FALLBACK);
    }

    #[test]
    fn test_priority_order() {
        // education outranks experience, experience outranks skills
        assert_eq!(fallback_response("work while studying at college"), EDUCATION_FALLBACK);
        assert_eq!(fallback_response("skills from work"), EXPERIENCE_FALLBACK);
    }

    #[test]
    fn test_default() {
        assert_eq!(fallback_response("What is your favorite color?"), DEFAULT_FALLBACK);
        assert_eq!(fallback_response(""), DEFAULT_FALLBACK);
    }
}
