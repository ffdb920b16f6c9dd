use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::{DataType, IntakeForm, OversightLevel};

pub const HIGH_RISK_THRESHOLD: f64 = 0.6;
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationPriority {
    High,
    Medium,
    Low,
}

impl ObligationPriority {
    pub const fn label(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for ObligationPriority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObligationStatus {
    Required,
    Recommended,
    Optional,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplianceObligation {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: ObligationPriority,
    pub status: ObligationStatus,
    pub article_reference: String,
}

struct ObligationTemplate {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    priority: ObligationPriority,
    status: ObligationStatus,
    article_reference: &'static str,
}

impl ObligationTemplate {
    fn materialize(&self) -> ComplianceObligation {
        ComplianceObligation {
            id: self.id.to_string(),
            title: self.title.to_string(),
            description: self.description.to_string(),
            priority: self.priority,
            status: self.status,
            article_reference: self.article_reference.to_string(),
        }
    }
}

const fn required_high(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    article_reference: &'static str,
) -> ObligationTemplate {
    ObligationTemplate {
        id,
        title,
        description,
        priority: ObligationPriority::High,
        status: ObligationStatus::Required,
        article_reference,
    }
}

const HIGH_TIER: &[ObligationTemplate] = &[
    required_high(
        "OB-001",
        "Risk Management System",
        "Establish and maintain a risk management system throughout the AI system lifecycle",
        "Article 9",
    ),
    required_high(
        "OB-002",
        "Data Governance",
        "Implement data governance practices for training, validation, and testing data",
        "Article 10",
    ),
    required_high(
        "OB-003",
        "Technical Documentation",
        "Maintain comprehensive technical documentation demonstrating compliance",
        "Article 11",
    ),
    required_high(
        "OB-004",
        "Record-Keeping",
        "Implement automatic logging of events for traceability",
        "Article 12",
    ),
    required_high(
        "OB-005",
        "Transparency",
        "Ensure transparent operation and provide clear information to users",
        "Article 13",
    ),
    required_high(
        "OB-006",
        "Human Oversight",
        "Design system to allow effective human oversight",
        "Article 14",
    ),
    required_high(
        "OB-007",
        "Accuracy & Robustness",
        "Ensure appropriate levels of accuracy, robustness, and cybersecurity",
        "Article 15",
    ),
];

const MEDIUM_TIER: &[ObligationTemplate] = &[
    ObligationTemplate {
        id: "OB-101",
        title: "Transparency Obligations",
        description: "Ensure users are informed when interacting with AI system",
        priority: ObligationPriority::Medium,
        status: ObligationStatus::Required,
        article_reference: "Article 52",
    },
    ObligationTemplate {
        id: "OB-102",
        title: "Documentation Best Practices",
        description: "Maintain model cards and data sheets as best practice",
        priority: ObligationPriority::Medium,
        status: ObligationStatus::Recommended,
        article_reference: "Best Practice",
    },
];

const LOW_TIER: &[ObligationTemplate] = &[ObligationTemplate {
    id: "OB-201",
    title: "Voluntary Code of Conduct",
    description: "Consider adopting voluntary codes of conduct for trustworthy AI",
    priority: ObligationPriority::Low,
    status: ObligationStatus::Optional,
    article_reference: "Article 69",
}];

const BIOMETRIC_PROTECTION: ObligationTemplate = required_high(
    "OB-BIO-001",
    "Biometric Data Protection",
    "Implement enhanced protections for biometric data processing",
    "Article 6 - Annex III",
);

const VULNERABLE_SAFEGUARDS: ObligationTemplate = required_high(
    "OB-VUL-001",
    "Vulnerable Population Safeguards",
    "Implement additional safeguards for vulnerable user populations",
    "Article 9(9)",
);

/// Tiered obligations for `score` plus the data- and population-specific extras.
pub fn generate_obligations(score: f64, form: &IntakeForm) -> Vec<ComplianceObligation> {
    let tier = if score >= HIGH_RISK_THRESHOLD {
        HIGH_TIER
    } else if score >= MEDIUM_RISK_THRESHOLD {
        MEDIUM_TIER
    } else {
        LOW_TIER
    };

    let mut obligations: Vec<ComplianceObligation> =
        tier.iter().map(ObligationTemplate::materialize).collect();

    if form.processes(DataType::Biometrics) {
        obligations.push(BIOMETRIC_PROTECTION.materialize());
    }
    if form.user_types.iter().any(|user| user.is_vulnerable()) {
        obligations.push(VULNERABLE_SAFEGUARDS.materialize());
    }

    obligations
}

/// Human-readable names of documentation artifacts that still need work.
pub fn documentation_gaps(form: &IntakeForm) -> Vec<String> {
    let docs = &form.documentation;
    let core = [
        (docs.data_sheet, "Data Sheet / Data Governance Documentation"),
        (docs.model_card, "Model Card / Technical Documentation"),
        (docs.risk_assessment, "Risk Assessment Documentation"),
        (docs.technical_documentation, "Technical System Documentation"),
    ];

    let mut gaps: Vec<String> = core
        .into_iter()
        .filter(|(status, _)| !status.is_complete())
        .map(|(_, name)| name.to_string())
        .collect();

    if form.data_types.iter().any(|data| data.requires_bias_audit())
        && !docs.bias_audit.is_complete()
    {
        gaps.push("Bias Audit (required for sensitive data)".to_string());
    }

    if form.oversight_level == OversightLevel::FullyAutomated
        && !docs.monitoring_dashboard.is_complete()
    {
        gaps.push("Monitoring Dashboard (required for automated systems)".to_string());
    }

    gaps
}
