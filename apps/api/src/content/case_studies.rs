//! Long-form case-study narratives, keyed by project link.
//! Every narrative follows the Situation / Task / Action / Result / Reflection layout.

pub const CASE_STUDIES: &[(&str, &str)] = &[
    ("ecommerce-integration", ECOMMERCE_INTEGRATION),
    ("recommendation-engine", RECOMMENDATION_ENGINE),
    ("real-time-dashboard", REAL_TIME_DASHBOARD),
    ("loan-prediction", LOAN_PREDICTION),
    ("salary-clustering", SALARY_CLUSTERING),
];

const ECOMMERCE_INTEGRATION: &str = r#"# E-commerce Marketplace Integration Case Study

## Situation
Santo Remedio, a leading Latin-American wellness brand, sold mostly through a single storefront and needed to expand its digital footprint with a seamless omnichannel experience across Shopify and Amazon.

## Task
Lead the integration of the Shopify and Amazon marketplaces with the NetSuite ERP so that orders, inventory and customer data stayed consistent across every channel.

## Action
- Implemented a custom Shopify theme with optimized mobile UX
- Created an inventory synchronization system between platforms
- Developed a unified order management workflow
- Integrated customer data for cross-platform retargeting
- Connected the platforms through API integrations, webhooks and custom middleware for real-time data flow

## Result
- **$2.6M revenue growth** over two years of operation
- **35% increase** in customer base
- **28% improvement** in order fulfillment efficiency
- **Seamless inventory management** across platforms

## Reflection
The project highlighted the importance of thorough QA testing when dealing with multi-platform integrations and the critical nature of error handling in e-commerce systems.
"#;

const RECOMMENDATION_ENGINE: &str = r#"# Product Recommendation Engine Case Study

## Situation
The company relied on manual merchandising and was missing cross-selling and upselling opportunities on every order.

## Task
Build a recommendation engine that boosts average order value and improves the customer shopping experience without manual curation.

## Action
- Implemented an Association Rules algorithm processing 500K+ daily user interactions
- Created a real-time recommendation API with <100ms response time
- Built a dashboard for the merchandising team to monitor and tweak recommendations
- Designed an A/B testing framework to measure impact
- Used Python with Pandas for data processing, scikit-learn for rule mining and Flask for serving

## Result
- Increased Average Order Value from **$63 to $64.29**
- Improved product discovery by **22%**
- Reduced cart abandonment rate by **8%**

## Reflection
Next steps include collaborative filtering and neural network-based recommendations to further personalize the shopping experience.
"#;

const REAL_TIME_DASHBOARD: &str = r#"# Real-time Analytics Dashboard Case Study

## Situation
Decision-making was severely delayed due to manual data processing and a lack of real-time insights across NetSuite, Shopify and the ad platforms.

## Task
Centralize 5GB of daily data into a single view that marketing, operations and leadership could trust.

## Action
- Designed automated ETL pipelines using Airflow
- Implemented a data warehouse in BigQuery
- Created an interactive Tableau dashboard with key business metrics
- Set up alert systems for anomaly detection

## Result
- Reduced decision-making time from **10 hours to 30 minutes**
- Improved data accuracy by **97%**
- Enabled real-time monitoring of critical KPIs

## Reflection
The dashboard became the single source of truth for the organization, fundamentally changing how strategic decisions were made across departments.
"#;

const LOAN_PREDICTION: &str = r#"# Neural Network for Loan Prediction Case Study

## Situation
Traditional credit scoring models failed to capture complex patterns in customer financial data, leading to suboptimal loan approvals.

## Task
Design a model that predicts personal loan approvals accurately while staying explainable to reviewers.

## Action
- Developed a multi-layer neural network using TensorFlow and Keras
- Implemented feature engineering to enhance model inputs
- Tuned hyperparameters via grid search and k-fold cross-validation
- Created visualization tools for model explainability

## Result
- Achieved **97.2% test accuracy**
- Reduced false approvals by **34%**
- Improved loan portfolio performance by **12%**

## Reflection
Extensive testing was conducted to ensure the model didn't introduce bias against protected classes, with regular auditing for ongoing fairness evaluation.
"#;

const SALARY_CLUSTERING: &str = r#"# Clustering Salary & Benefits Data Case Study

## Situation
HR departments needed insights on compensation structures across different regions and job categories to inform policy decisions.

## Task
Analyze public employee salary and benefits data to identify natural groupings and anomalies.

## Action
- Implemented k-means and hierarchical clustering algorithms with scikit-learn
- Developed interactive visualizations including Elbow charts and dendrograms
- Created a segmentation framework for compensation analysis
- Built an anomaly detection system

## Result
- Identified **5 distinct compensation clusters**
- Detected **$2.3M in anomalous compensation**
- Provided a data-driven basis for policy reform

## Reflection
Dimensionality reduction was essential for the high-dimensional benefits data, and the analysis led to a restructuring of the compensation framework.
"#;
