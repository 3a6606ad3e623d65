//! Static portfolio tables: work history and project list.

use crate::content::models::{ExperienceEntry, ProjectEntry, ProjectKind};

struct ExperienceSeed {
    title: &'static str,
    company: &'static str,
    location: &'static str,
    period: &'static str,
    about: &'static str,
    achievements: &'static [&'static str],
}

struct ProjectSeed {
    title: &'static str,
    description: &'static str,
    category: &'static str,
    image: &'static str,
    link: &'static str,
    kind: ProjectKind,
}

const EXPERIENCE: &[ExperienceSeed] = &[
    ExperienceSeed {
        title: "Product Manager",
        company: "Santo Remedio",
        location: "India",
        period: "Aug 2022 - Aug 2024 (2 years)",
        about: "A leading Latin-American wellness brand expanding into DTC digital commerce.",
        achievements: &[
            "Spearheaded cross-functional team of 12 to develop and execute e-commerce product strategy for Shopify and Amazon integration, driving $2.6M in revenue and 35% growth in customer base.",
            "Implemented attribution modeling across 5 marketing channels, lowering CAC from $75 to $63 and improving LTV/CAC from 1.7 to 1.9.",
            "Led ETL pipeline development and built real-time analytics dashboard using BigQuery and Tableau, reducing decision-making time from 10 hours to 30 minutes.",
            "Constructed a recommendation engine using Association Rules, handling 500K+ daily user interactions and increasing AOV from $63 to $64.29.",
            "Developed A/B testing framework and executed 9 tests, launching 4 features and improving conversion by 10% (2.2% to 2.42%).",
        ],
    },
    ExperienceSeed {
        title: "Senior Data Analyst",
        company: "UNA Brands",
        location: "India",
        period: "Sep 2021 - Jul 2022 (1 year)",
        about: "A fast-growing e-commerce aggregator acquiring and scaling DTC brands across Asia.",
        achievements: &[
            "Directed a team of 5 to architect a Unified Data Ecosystem using Celigo and PostgreSQL, reducing onboarding time for acquired brands by over 90%.",
            "Defined KPIs, OKRs, and facilitated weekly sprints within a Scrum framework; authored PRDs to align cross-functional teams.",
            "Deployed Jira for backlog and roadmap visibility, resulting in 30% improvement in project delivery time.",
            "Achieved 24% product performance gain by leading UAT with stakeholders and prioritizing data-driven enhancements.",
        ],
    },
    ExperienceSeed {
        title: "Project Team Lead",
        company: "NxtSuite Technologies",
        location: "India",
        period: "Apr 2020 - Sep 2021 (1.3 years)",
        about: "A cloud consulting firm specializing in ERP and integration solutions for SMEs.",
        achievements: &[
            "Managed 15 clients, leading end-to-end implementation of Order-to-Cash, Procure-to-Pay, and Inventory modules using Celigo and NetSuite ERP.",
            "Led a team of 5 engineers to integrate NetSuite with third-party APIs, boosting operational efficiency by 40% and driving $200K in revenue.",
            "Introduced Power BI-based Project Health Check (PHC) report to improve billing and resource allocation by 15%.",
        ],
    },
    ExperienceSeed {
        title: "Senior Software Engineer",
        company: "Infosys",
        location: "India and China",
        period: "Nov 2016 - Mar 2020 (4 years)",
        about: "A global technology consulting company serving Fortune 500 clients worldwide.",
        achievements: &[
            "Architected SAP-PI solutions to support Lonza's operations in 40+ EMEA and APAC regions.",
            "Presented strategic recommendations to leadership, securing $1M in additional funding for European expansion.",
        ],
    },
];

const PROJECTS: &[ProjectSeed] = &[
    ProjectSeed {
        title: "E-commerce Marketplace Integration",
        description: "Led the Shopify & Amazon integration at Santo Remedio, resulting in $2.6M revenue growth and a 35% increase in the customer base.",
        category: "E-commerce",
        image: "/santo_remedio.png",
        link: "ecommerce-integration",
        kind: ProjectKind::CaseStudy,
    },
    ProjectSeed {
        title: "Recommendation Engine for Product Boost",
        description: "Developed a recommendation engine using Association Rules, processing 500K+ daily user interactions and increasing AOV from $63 to $64.29.",
        category: "E-commerce",
        image: "/medicine.webp",
        link: "recommendation-engine",
        kind: ProjectKind::CaseStudy,
    },
    ProjectSeed {
        title: "Real-time Analytics Dashboard",
        description: "Built ETL pipelines and a BigQuery + Tableau dashboard to process 5GB of daily data, reducing decision-making time from 10 hours to 30 minutes.",
        category: "Data Analytics",
        image: "/data_analytics.jpeg",
        link: "real-time-dashboard",
        kind: ProjectKind::CaseStudy,
    },
    ProjectSeed {
        title: "Blue Bike Usage Dashboard",
        description: "Created an interactive Tableau dashboard analyzing real-time usage trends for Blue Bikes, improving operational efficiency by 29%.",
        category: "Data Visualization",
        image: "/bluebikes.png",
        link: "/bluebikes.pdf",
        kind: ProjectKind::ExternalLink,
    },
    ProjectSeed {
        title: "Neural Network for Loan Prediction",
        description: "Designed a neural network to predict personal loan approvals with 97.2% test accuracy, visualized via confusion matrices and model diagrams.",
        category: "Machine Learning",
        image: "/neural_net.avif",
        link: "loan-prediction",
        kind: ProjectKind::CaseStudy,
    },
    ProjectSeed {
        title: "Clustering Salary & Benefits Data",
        description: "Used k-means and hierarchical clustering for public employee salary analysis; results visualized with Elbow charts, scatterplots, and dendrograms.",
        category: "Machine Learning",
        image: "/clustering.png",
        link: "salary-clustering",
        kind: ProjectKind::CaseStudy,
    },
    ProjectSeed {
        title: "Olist E-commerce Insights Dashboard",
        description: "Built a Tableau dashboard analyzing order volume, payment preferences, and customer satisfaction across Brazil. Revealed regional disparities in delivery delays and helped optimize logistics strategies.",
        category: "Data Visualization",
        image: "/olist.jpeg",
        link: "/olist.pdf",
        kind: ProjectKind::ExternalLink,
    },
    ProjectSeed {
        title: "Champion Customer Segmentation",
        description: "Performed RFM analysis using SAS on 20K+ customers for Champion's DTC channel. Identified 5 segments and proposed targeted retention and marketing strategies based on CLV and engagement.",
        category: "Marketing Analytics",
        image: "/champion.png",
        link: "/behave.pdf",
        kind: ProjectKind::ExternalLink,
    },
    ProjectSeed {
        title: "GoDaddy Predictive Modeling",
        description: "Built a CART model to predict GoDaddy's product likeness using advanced tuning and pruning. Achieved a MAPE of 10.67%, driving actionable insights for pricing and marketing decisions.",
        category: "Machine Learning",
        image: "/godaddy.png",
        link: "/godaddy.pdf",
        kind: ProjectKind::ExternalLink,
    },
    ProjectSeed {
        title: "NYT Topic Modeling with NLP",
        description: "Applied LDA topic modeling and text preprocessing on New York Times comments to identify themes and sentiment trends across reader discussions using Python and NLP techniques.",
        category: "Natural Language Processing",
        image: "/NLP.jpeg",
        link: "/NLP.pdf",
        kind: ProjectKind::ExternalLink,
    },
    ProjectSeed {
        title: "NYT Comment Scraper",
        description: "Developed a Python-based web scraper using BeautifulSoup and Selenium to extract NYT comments for NLP analysis. Managed dynamic content loading and anti-scraping challenges.",
        category: "Web Scraping",
        image: "/beautifulsoup.png",
        link: "/WebScraping.pdf",
        kind: ProjectKind::ExternalLink,
    },
    ProjectSeed {
        title: "Sentiment Analysis Using VADER (Harris vs. Trump)",
        description: "Analyzed tweet sentiment for Kamala Harris and Donald Trump using VADER, BERT, Flair, and TextBlob. Found that negative tweets drove the most engagement across both figures.",
        category: "Sentiment Analysis",
        image: "/sentiment.jpeg",
        link: "/sentiment.pdf",
        kind: ProjectKind::ExternalLink,
    },
];

pub fn experience() -> Vec<ExperienceEntry> {
    EXPERIENCE
        .iter()
        .map(|seed| ExperienceEntry {
            title: seed.title.to_string(),
            company: seed.company.to_string(),
            location: seed.location.to_string(),
            period: seed.period.to_string(),
            about_company: seed.about.to_string(),
            achievements: seed.achievements.iter().map(|a| a.to_string()).collect(),
        })
        .collect()
}

pub fn projects() -> Vec<ProjectEntry> {
    PROJECTS
        .iter()
        .map(|seed| ProjectEntry {
            title: seed.title.to_string(),
            description: seed.description.to_string(),
            category: seed.category.to_string(),
            image: seed.image.to_string(),
            link: seed.link.to_string(),
            kind: seed.kind,
        })
        .collect()
}

/// Suggested questions shown when the chat widget first opens.
pub const CONVERSATION_STARTERS: &[&str] = &[
    "What projects has Akansha worked on?",
    "Tell me about Akansha's experience at Santo Remedio",
    "Where does Akansha study?",
    "What is Akansha's educational background?",
    "What skills does Akansha have?",
    "How can I contact Akansha?",
    "Tell me about the E-commerce Marketplace Integration project",
    "What was Akansha's role at UNA Brands?",
    "What tools is Akansha proficient in?",
    "Tell me about the Real-time Analytics Dashboard project",
    "What was Akansha's biggest achievement?",
    "How many years of experience does Akansha have?",
];
