use serde::{Deserialize, Serialize};

/// Neutral weight used for values outside the known tables and for empty lists.
pub const NEUTRAL_WEIGHT: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sector {
    Hiring,
    CreditScoring,
    Healthcare,
    Education,
    LawEnforcement,
    CriticalInfrastructure,
    Insurance,
    SocialServices,
    Recommender,
    Marketing,
    CustomerService,
    Manufacturing,
    Logistics,
    Other,
    #[serde(other)]
    Unrecognized,
}

impl Sector {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hiring => "hiring",
            Self::CreditScoring => "credit_scoring",
            Self::Healthcare => "healthcare",
            Self::Education => "education",
            Self::LawEnforcement => "law_enforcement",
            Self::CriticalInfrastructure => "critical_infrastructure",
            Self::Insurance => "insurance",
            Self::SocialServices => "social_services",
            Self::Recommender => "recommender",
            Self::Marketing => "marketing",
            Self::CustomerService => "customer_service",
            Self::Manufacturing => "manufacturing",
            Self::Logistics => "logistics",
            Self::Other => "other",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub const fn risk_weight(self) -> f64 {
        match self {
            Self::LawEnforcement => 0.95,
            Self::CriticalInfrastructure => 0.90,
            Self::Healthcare => 0.85,
            Self::CreditScoring => 0.80,
            Self::Hiring => 0.75,
            Self::SocialServices => 0.75,
            Self::Education => 0.70,
            Self::Insurance => 0.70,
            Self::Recommender => 0.40,
            Self::Manufacturing => 0.35,
            Self::Marketing => 0.30,
            Self::Logistics => 0.30,
            Self::CustomerService => 0.25,
            Self::Other | Self::Unrecognized => NEUTRAL_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserType {
    GeneralPublic,
    Employees,
    Children,
    Elderly,
    VulnerableGroups,
    Professionals,
    Consumers,
    Patients,
    Students,
    #[serde(other)]
    Unrecognized,
}

impl UserType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::GeneralPublic => "general_public",
            Self::Employees => "employees",
            Self::Children => "children",
            Self::Elderly => "elderly",
            Self::VulnerableGroups => "vulnerable_groups",
            Self::Professionals => "professionals",
            Self::Consumers => "consumers",
            Self::Patients => "patients",
            Self::Students => "students",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub const fn risk_weight(self) -> f64 {
        match self {
            Self::Children => 0.90,
            Self::VulnerableGroups => 0.85,
            Self::Patients => 0.80,
            Self::Elderly => 0.75,
            Self::Students => 0.65,
            Self::GeneralPublic => 0.50,
            Self::Employees => 0.45,
            Self::Consumers => 0.40,
            Self::Professionals => 0.30,
            Self::Unrecognized => NEUTRAL_WEIGHT,
        }
    }

    /// Populations that trigger the dedicated safeguards obligation.
    pub const fn is_vulnerable(self) -> bool {
        matches!(self, Self::Children | Self::VulnerableGroups)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Biometrics,
    HealthData,
    FinancialData,
    LocationData,
    BehavioralData,
    PoliticalOpinions,
    ReligiousBeliefs,
    EthnicOrigin,
    SexualOrientation,
    CriminalRecords,
    EmploymentData,
    EducationalRecords,
    GenericPii,
    AnonymousData,
    #[serde(other)]
    Unrecognized,
}

impl DataType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Biometrics => "biometrics",
            Self::HealthData => "health_data",
            Self::FinancialData => "financial_data",
            Self::LocationData => "location_data",
            Self::BehavioralData => "behavioral_data",
            Self::PoliticalOpinions => "political_opinions",
            Self::ReligiousBeliefs => "religious_beliefs",
            Self::EthnicOrigin => "ethnic_origin",
            Self::SexualOrientation => "sexual_orientation",
            Self::CriminalRecords => "criminal_records",
            Self::EmploymentData => "employment_data",
            Self::EducationalRecords => "educational_records",
            Self::GenericPii => "generic_pii",
            Self::AnonymousData => "anonymous_data",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub const fn risk_weight(self) -> f64 {
        match self {
            Self::Biometrics => 0.95,
            Self::HealthData | Self::CriminalRecords => 0.90,
            Self::PoliticalOpinions
            | Self::ReligiousBeliefs
            | Self::EthnicOrigin
            | Self::SexualOrientation => 0.85,
            Self::FinancialData => 0.70,
            Self::LocationData => 0.60,
            Self::BehavioralData => 0.55,
            Self::EmploymentData => 0.50,
            Self::EducationalRecords => 0.45,
            Self::GenericPii => 0.40,
            Self::AnonymousData => 0.10,
            Self::Unrecognized => NEUTRAL_WEIGHT,
        }
    }

    /// Data categories that require a completed bias audit.
    pub const fn requires_bias_audit(self) -> bool {
        matches!(self, Self::Biometrics | Self::HealthData)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionImpact {
    AccessToServices,
    SafetyCritical,
    ContentRanking,
    EmploymentDecisions,
    CreditDecisions,
    LegalDecisions,
    EducationalOutcomes,
    HealthTreatment,
    LawEnforcementActions,
    MigrationDecisions,
    Recommendations,
    OperationalEfficiency,
    #[serde(other)]
    Unrecognized,
}

impl DecisionImpact {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AccessToServices => "access_to_services",
            Self::SafetyCritical => "safety_critical",
            Self::ContentRanking => "content_ranking",
            Self::EmploymentDecisions => "employment_decisions",
            Self::CreditDecisions => "credit_decisions",
            Self::LegalDecisions => "legal_decisions",
            Self::EducationalOutcomes => "educational_outcomes",
            Self::HealthTreatment => "health_treatment",
            Self::LawEnforcementActions => "law_enforcement_actions",
            Self::MigrationDecisions => "migration_decisions",
            Self::Recommendations => "recommendations",
            Self::OperationalEfficiency => "operational_efficiency",
            Self::Unrecognized => "unrecognized",
        }
    }

    pub const fn risk_weight(self) -> f64 {
        match self {
            Self::LawEnforcementActions => 0.95,
            Self::LegalDecisions | Self::MigrationDecisions | Self::SafetyCritical => 0.90,
            Self::HealthTreatment => 0.85,
            Self::CreditDecisions => 0.80,
            Self::EmploymentDecisions => 0.75,
            Self::EducationalOutcomes => 0.70,
            Self::AccessToServices => 0.65,
            Self::ContentRanking => 0.40,
            Self::Recommendations => 0.30,
            Self::OperationalEfficiency => 0.20,
            Self::Unrecognized => NEUTRAL_WEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OversightLevel {
    FullyAutomated,
    HumanInTheLoop,
    HumanOnTheLoop,
    HumanOverridePossible,
    HumanFinalDecision,
    #[serde(other)]
    Unrecognized,
}

impl OversightLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::FullyAutomated => "fully_automated",
            Self::HumanInTheLoop => "human_in_the_loop",
            Self::HumanOnTheLoop => "human_on_the_loop",
            Self::HumanOverridePossible => "human_override_possible",
            Self::HumanFinalDecision => "human_final_decision",
            Self::Unrecognized => "unrecognized",
        }
    }

    /// Multiplier in [0.4, 1.0]; lower means stronger human control.
    pub const fn risk_modifier(self) -> f64 {
        match self {
            Self::FullyAutomated => 1.0,
            Self::HumanOnTheLoop => 0.85,
            Self::HumanInTheLoop => 0.70,
            Self::HumanOverridePossible => 0.60,
            Self::HumanFinalDecision => 0.40,
            Self::Unrecognized => 0.70,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentationStatus {
    #[default]
    NotStarted,
    InProgress,
    Complete,
    NeedsUpdate,
}

impl DocumentationStatus {
    pub const fn is_complete(self) -> bool {
        matches!(self, Self::Complete)
    }
}

/// Status of each compliance artifact; anything omitted is `not_started`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentationArtifacts {
    pub data_sheet: DocumentationStatus,
    pub model_card: DocumentationStatus,
    pub system_logs: DocumentationStatus,
    pub monitoring_dashboard: DocumentationStatus,
    pub risk_assessment: DocumentationStatus,
    pub bias_audit: DocumentationStatus,
    pub technical_documentation: DocumentationStatus,
    pub user_instructions: DocumentationStatus,
}

fn default_system_version() -> String {
    "1.0.0".to_string()
}

/// Structured description of an AI system submitted for triage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeForm {
    pub system_name: String,
    #[serde(default = "default_system_version")]
    pub system_version: String,
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub project_owner: String,
    pub sector: Sector,
    #[serde(default)]
    pub use_case_description: String,
    #[serde(default)]
    pub user_types: Vec<UserType>,
    #[serde(default)]
    pub data_types: Vec<DataType>,
    #[serde(default)]
    pub decision_impacts: Vec<DecisionImpact>,
    pub oversight_level: OversightLevel,
    #[serde(default)]
    pub can_users_opt_out: bool,
    #[serde(default)]
    pub appeal_mechanism: bool,
    #[serde(default)]
    pub documentation: DocumentationArtifacts,
    #[serde(default)]
    pub model_type: Option<String>,
    #[serde(default)]
    pub training_data_size: Option<u64>,
    #[serde(default)]
    pub deployment_environment: Option<String>,
    #[serde(default)]
    pub additional_documentation: Option<String>,
}

impl IntakeForm {
    pub fn processes(&self, data_type: DataType) -> bool {
        self.data_types.contains(&data_type)
    }

    /// Free text handed to the classifier when a model score is requested.
    pub fn classifier_text(&self) -> String {
        match self.additional_documentation.as_deref() {
            Some(extra) if !extra.trim().is_empty() => {
                format!("{} {}", self.use_case_description, extra)
            }
            _ => self.use_case_description.clone(),
        }
    }
}
