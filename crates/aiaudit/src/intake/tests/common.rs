use chrono::{DateTime, TimeZone, Utc};

use crate::intake::domain::{
    DataType, DecisionImpact, DocumentationArtifacts, DocumentationStatus, IntakeForm,
    OversightLevel, Sector, UserType,
};

pub(super) fn fixed_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 14, 9, 30, 0)
        .single()
        .expect("valid timestamp")
}

pub(super) fn base_form(name: &str) -> IntakeForm {
    IntakeForm {
        system_name: name.to_string(),
        system_version: "1.0.0".to_string(),
        team_name: "Platform".to_string(),
        project_owner: "owner@example.com".to_string(),
        sector: Sector::Other,
        use_case_description: "Internal tooling used by operations staff.".to_string(),
        user_types: vec![UserType::Professionals],
        data_types: vec![DataType::GenericPii],
        decision_impacts: vec![DecisionImpact::OperationalEfficiency],
        oversight_level: OversightLevel::HumanInTheLoop,
        can_users_opt_out: false,
        appeal_mechanism: false,
        documentation: DocumentationArtifacts::default(),
        model_type: None,
        training_data_size: None,
        deployment_environment: None,
        additional_documentation: None,
    }
}

/// Route optimizer with strong oversight; scores roughly 0.0425.
pub(super) fn low_risk_form() -> IntakeForm {
    IntakeForm {
        sector: Sector::Logistics,
        user_types: vec![UserType::Employees],
        data_types: vec![DataType::AnonymousData],
        decision_impacts: vec![DecisionImpact::OperationalEfficiency],
        oversight_level: OversightLevel::HumanFinalDecision,
        can_users_opt_out: true,
        appeal_mechanism: true,
        ..base_form("Fleet Route Optimizer")
    }
}

/// Real-time biometric identification for police, fully automated.
pub(super) fn high_risk_form() -> IntakeForm {
    IntakeForm {
        sector: Sector::LawEnforcement,
        user_types: vec![UserType::GeneralPublic, UserType::Children],
        data_types: vec![DataType::Biometrics],
        decision_impacts: vec![DecisionImpact::LawEnforcementActions],
        oversight_level: OversightLevel::FullyAutomated,
        ..base_form("Street Camera Matcher")
    }
}

/// Resume screening with final human decision and appeal; lands just above the medium line.
pub(super) fn hiring_form() -> IntakeForm {
    IntakeForm {
        system_version: "2.1.0".to_string(),
        sector: Sector::Hiring,
        use_case_description: "AI-powered resume screening tool that ranks candidates."
            .to_string(),
        user_types: vec![UserType::Employees, UserType::GeneralPublic],
        data_types: vec![
            DataType::EmploymentData,
            DataType::EducationalRecords,
            DataType::GenericPii,
        ],
        decision_impacts: vec![
            DecisionImpact::EmploymentDecisions,
            DecisionImpact::AccessToServices,
        ],
        oversight_level: OversightLevel::HumanFinalDecision,
        can_users_opt_out: true,
        appeal_mechanism: true,
        documentation: DocumentationArtifacts {
            data_sheet: DocumentationStatus::Complete,
            model_card: DocumentationStatus::InProgress,
            bias_audit: DocumentationStatus::Complete,
            ..DocumentationArtifacts::default()
        },
        ..base_form("Resume Screening Assistant")
    }
}

pub(super) fn approx_eq(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 1e-9
}
