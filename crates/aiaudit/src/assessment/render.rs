use serde::Serialize;

use super::catalog::Urgency;
use super::plan::RemediationPlan;

/// Issue payload ready to post to a tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IssueDraft {
    pub title: String,
    pub body: String,
}

fn urgency_marker(urgency: Urgency) -> &'static str {
    match urgency {
        Urgency::High => "[!!!]",
        Urgency::Medium => "[!!]",
        Urgency::Low => "[!]",
    }
}

fn capitalize(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn to_markdown(plan: &RemediationPlan) -> String {
    let mut lines = vec![
        "# EU AI Act Compliance Assessment".to_string(),
        String::new(),
        "## Summary".to_string(),
        String::new(),
        plan.summary.clone(),
        String::new(),
        format!("**Risk Level:** {}", plan.risk_level.label().to_uppercase()),
        format!("**Confidence:** {:.0}%", plan.confidence * 100.0),
        String::new(),
        "## Remediation Actions".to_string(),
        String::new(),
    ];

    for item in &plan.items {
        lines.push(format!("### {}. {}", item.priority, item.title));
        lines.push(String::new());
        lines.push(format!("**Article:** {} - {}", item.article, item.article_name));
        lines.push(format!(
            "**Urgency:** {} {}",
            urgency_marker(item.urgency),
            capitalize(item.urgency.label())
        ));
        lines.push(format!("**Estimated Effort:** {}", item.estimated_effort));
        lines.push(String::new());
        lines.push(item.description.clone());
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    lines.push(String::new());
    lines.push("## Disclaimer".to_string());
    lines.push(String::new());
    lines.push(format!("_{}_", plan.disclaimer));

    lines.join("\n")
}

pub fn to_github_issue(plan: &RemediationPlan) -> IssueDraft {
    let title = format!(
        "[AI Compliance] {} Risk - {} Remediations Required",
        plan.risk_level.label().to_uppercase(),
        plan.items.len()
    );

    let mut body = vec![
        "## AI Act Compliance Assessment Results".to_string(),
        String::new(),
        plan.summary.clone(),
        String::new(),
        "## Remediation Checklist".to_string(),
        String::new(),
    ];

    for item in &plan.items {
        body.push(format!(
            "- [ ] **[{}]** {} ({}) - {}",
            item.urgency.tracker_tag(),
            item.title,
            item.article,
            item.estimated_effort
        ));
    }

    body.push(String::new());
    body.push("## Details".to_string());
    body.push(String::new());

    for item in &plan.items {
        body.push(format!("### {}", item.title));
        body.push(format!(
            "**Article:** {} | **Urgency:** {} | **Effort:** {}",
            item.article, item.urgency, item.estimated_effort
        ));
        body.push(String::new());
        body.push(item.description.clone());
        body.push(String::new());
    }

    body.push("---".to_string());
    body.push(format!("_Generated by AIAudit Lite. {}_", plan.disclaimer));

    IssueDraft {
        title,
        body: body.join("\n"),
    }
}
