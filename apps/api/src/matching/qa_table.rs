/// A canned question/answer pair. Table order is the keyword-score tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QaPair {
    pub keywords: &'static [&'static str],
    pub question: &'static str,
    pub answer: &'static str,
}

pub const QA_TABLE: &[QaPair] = &[
    // Projects
    QaPair {
        keywords: &["marketplace", "integration", "shopify", "amazon", "santo remedio"],
        question: "Tell me about the e-commerce marketplace integration project",
        answer: "I led Santo Remedio's integration with Shopify & Amazon, implementing real-time connections with our NetSuite ERP. This expansion generated $2.6M in additional revenue over two years and increased our customer base by 40%. The project required extensive cross-functional collaboration and technical planning to ensure seamless order processing and inventory management across platforms.",
    },
    QaPair {
        keywords: &["recommendation", "engine", "product", "boost", "aov"],
        question: "What was the recommendation engine project?",
        answer: "I developed a recommendation engine using Association Rule Mining that processed over 500K daily user interactions. This system analyzed co-purchase patterns to suggest relevant products across the customer journey. The implementation increased our Average Order Value from $63 to $64.29 and created a foundation for more sophisticated personalization features.",
    },
    QaPair {
        keywords: &["analytics", "dashboard", "real-time", "tableau", "bigquery"],
        question: "Can you explain the analytics dashboard project?",
        answer: "I built ETL pipelines and a real-time analytics dashboard using BigQuery and Tableau that processed 5GB of daily data from various sources including NetSuite, Shopify, and ad platforms. This centralized view reduced decision-making time from 10 hours to just 30 minutes and empowered teams to make data-driven decisions across marketing, operations, and executive levels.",
    },
    QaPair {
        keywords: &["blue bike", "dashboard", "tableau", "usage"],
        question: "What was the Blue Bike project about?",
        answer: "I created an interactive Tableau dashboard analyzing real-time usage trends for Blue Bikes. This visualization tool helped identify peak usage times, popular routes, and maintenance needs, improving operational efficiency by 29%.",
    },
    // Experience
    QaPair {
        keywords: &["santo remedio", "product manager", "experience"],
        question: "What did you do as a Product Manager at Santo Remedio?",
        answer: "At Santo Remedio, I led e-commerce product strategy and integration with Shopify and Amazon, driving $2.6M in revenue growth. I implemented attribution modeling across 5 marketing channels, reducing CAC from $75 to $63. I also built data infrastructure including ETL pipelines, a recommendation engine, and real-time analytics dashboards that significantly improved decision-making. Additionally, I developed an A/B testing framework that improved conversion rates by 10%.",
    },
    QaPair {
        keywords: &["una brands", "data analyst", "experience"],
        question: "What was your role at UNA Brands?",
        answer: "As Senior Data Analyst at UNA Brands, I directed a team of 5 to build a Unified Data Ecosystem using Celigo and PostgreSQL, reducing onboarding time for acquired brands by over 90%. I defined KPIs and OKRs, facilitated Scrum sprints, wrote PRDs, and implemented Jira for better project management, which improved delivery time by 30%. My work on UAT and data-driven enhancements led to a 24% improvement in product performance.",
    },
    // Skills
    QaPair {
        keywords: &["skills", "technical", "expertise"],
        question: "What are your technical skills?",
        answer: "My technical skills include data analytics (SQL, Python, R), visualization tools (Tableau, Power BI), cloud platforms (AWS, GCP), ERP systems (NetSuite), integration platforms (Celigo), and project management (Jira, Agile/Scrum). I also have experience with machine learning, NLP, and web development.",
    },
    // General
    QaPair {
        keywords: &["contact", "email", "get in touch"],
        question: "How can I contact you?",
        answer: "You can reach me at akansha.akg19@gmail.com. I'm open to discussing new opportunities, collaborations, or answering any questions about my work.",
    },
    QaPair {
        keywords: &["background", "education", "about"],
        question: "What's your background?",
        answer: "I have over 8 years of experience in product management, data analytics, and software engineering. I've worked across industries including e-commerce, wellness, and technology consulting, with a focus on delivering data-driven solutions that drive business growth.",
    },
    // Education
    QaPair {
        keywords: &["education", "study", "degree", "university", "college", "babson"],
        question: "Where does Akansha study?",
        answer: "Akansha is currently pursuing her MS in Business Analytics at Babson College. Babson is a private business school in Wellesley, Massachusetts, known for its focus on entrepreneurship education and business analytics.",
    },
    QaPair {
        keywords: &["ms", "masters", "graduate", "program", "business analytics"],
        question: "What is Akansha studying?",
        answer: "Akansha is currently pursuing a Master of Science (MS) in Business Analytics at Babson College. This program focuses on the intersection of data analysis, business strategy, and decision-making. Her studies include advanced analytics, data visualization, machine learning, and business intelligence.",
    },
    QaPair {
        keywords: &["when", "year", "graduate", "graduation"],
        question: "When did Akansha start studying at Babson?",
        answer: "Akansha began her MS in Business Analytics program at Babson College in 2023 and is expected to graduate in 2025. This educational pursuit complements her extensive professional experience in product management and data analytics.",
    },
    QaPair {
        keywords: &["course", "classes", "subjects", "learning"],
        question: "What courses is Akansha taking?",
        answer: "As part of her MS in Business Analytics at Babson, Akansha's coursework includes data visualization, machine learning algorithms, business intelligence, statistical modeling, and analytics strategy. These technical skills complement her product management background.",
    },
];
