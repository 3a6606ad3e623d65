//! Education intent classifier and answer synthesis used by the experience agent.

use once_cell::sync::Lazy;
use regex::Regex;

const EDUCATION_KEYWORDS: &[&str] = &[
    "education",
    "study",
    "studying",
    "student",
    "degree",
    "university",
    "college",
    "school",
    "graduate",
    "undergrad",
    "masters",
    "ms",
    "mba",
    "phd",
    "babson",
    "course",
];

static EDUCATION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)where (did|does|is|has) .* study",
        r"(?i)what .* study",
        r"(?i)where .* go to (college|university|school)",
        r"(?i)what (college|university|school) .* attend",
        r"(?i)what .* degree",
        r"(?i)education background",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("education pattern must compile"))
    .collect()
});

const EDUCATION_LEAD: &str =
    "## Education\n\nAkansha is currently pursuing her MS in Business Analytics at Babson College. ";

/// `query_lower` must already be lowercased.
///
/// Keyword hits are plain substring tests, so "ms" also fires inside words like "systems".
pub fn is_education_query(query_lower: &str) -> bool {
    EDUCATION_KEYWORDS.iter().any(|k| query_lower.contains(k))
        || EDUCATION_PATTERNS.iter().any(|p| p.is_match(query_lower))
}

/// Builds the education answer; the detail paragraph depends on the sub-intent.
pub fn education_answer(query_lower: &str) -> String {
    let detail = if query_lower.contains("babson") {
        "Babson College is a private business school in Wellesley, Massachusetts, known for its \
         focus on entrepreneurship education. She chose Babson for its strong analytics program \
         and entrepreneurial focus."
    } else if query_lower.contains("when") || query_lower.contains("year") {
        "She started her master's program in 2023 and is expected to graduate in 2025. Before \
         this, she completed her undergraduate degree in Engineering."
    } else if query_lower.contains("why") || query_lower.contains("reason") {
        "She chose to pursue an MS in Business Analytics to enhance her data-driven product \
         management skills and gain deeper expertise in analytics that she can apply to solve \
         complex business problems."
    } else if query_lower.contains("course") || query_lower.contains("class") {
        "Her coursework includes:\n\n- Data visualization\n- Machine learning\n- Business \
         intelligence\n- Statistical modeling\n- Analytics strategy\n\nShe's particularly \
         interested in applying these skills to solve real-world business problems."
    } else {
        "She's focusing on advanced analytics and data-driven product management. Before this, \
         she completed her undergraduate degree in Engineering, which provided a strong technical \
         foundation for her career."
    };

    format!("{EDUCATION_LEAD}{detail}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_detection() {
        assert!(is_education_query("what degree does she have"));
        assert!(is_education_query("is she a student"));
        assert!(!is_education_query("tell me about santo remedio"));
    }

    #[test]
    fn test_question_patterns() {
        assert!(EDUCATION_PATTERNS[0].is_match("where does akansha study?"));
        assert!(EDUCATION_PATTERNS[2].is_match("where did she go to university"));
        assert!(EDUCATION_PATTERNS[3].is_match("what school did she attend"));
        assert!(!EDUCATION_PATTERNS[4].is_match("degree"));
    }

    #[test]
    fn test_ms_substring_fires_inside_other_words() {
        assert!(is_education_query("which systems did she build"));
    }

    #[test]
    fn test_babson_detail() {
        let answer = education_answer("why babson");
        assert!(answer.starts_with(EDUCATION_LEAD));
        assert!(answer.contains("Wellesley, Massachusetts"));
    }

    #[test]
    fn test_dates_detail() {
        let answer = education_answer("when does she graduate");
        assert!(answer.contains("2023"));
        assert!(answer.contains("2025"));
    }

    #[test]
    fn test_motivation_detail() {
        let answer = education_answer("why an ms degree");
        assert!(answer.contains("data-driven product management skills"));
    }

    #[test]
    fn test_curriculum_detail() {
        let answer = education_answer("which course is she taking");
        assert!(answer.contains("- Statistical modeling"));
    }

    #[test]
    fn test_generic_detail() {
        let answer = education_answer("tell me about her education");
        assert!(answer.contains("undergraduate degree in Engineering"));
    }
}
