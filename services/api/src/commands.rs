use crate::infra::InMemorySnapshotRepository;
use aiaudit::assessment::{
    article_keywords, to_github_issue, to_markdown, Article, ModelProbabilities, RiskClassifier,
    StaticClassifier,
};
use aiaudit::config::AppConfig;
use aiaudit::error::AppError;
use aiaudit::intake::{assess_intake, IntakeForm};
use aiaudit::service::{RemediationReport, ServiceError};
use aiaudit::AssessmentService;
use clap::{ArgGroup, Args, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    #[default]
    Json,
    Markdown,
    Github,
}

#[derive(Args, Debug)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
pub(crate) struct AssessArgs {
    /// System description to assess
    #[arg(long)]
    pub(crate) text: Option<String>,
    /// Read the system description from a file
    #[arg(long)]
    pub(crate) file: Option<PathBuf>,
    /// Probability that the system is high risk
    #[arg(long, value_parser = parse_probability)]
    pub(crate) high: f64,
    /// Probability that the system is medium risk
    #[arg(long, value_parser = parse_probability)]
    pub(crate) medium: f64,
    /// Probability that the system is low risk
    #[arg(long, value_parser = parse_probability)]
    pub(crate) low: f64,
    /// Actions per article at full relevance (defaults to the configured budget)
    #[arg(long)]
    pub(crate) top_k: Option<usize>,
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    pub(crate) format: OutputFormat,
}

#[derive(Args, Debug)]
pub(crate) struct IntakeArgs {
    /// Intake form as a JSON document
    #[arg(long)]
    pub(crate) form: PathBuf,
    /// Optional classifier risk score to blend with the rule score
    #[arg(long, value_parser = parse_probability)]
    pub(crate) ml_score: Option<f64>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct KeywordsArgs {
    /// Restrict the listing to one article (for example `Article_10`)
    #[arg(long)]
    pub(crate) article: Option<String>,
}

pub(crate) fn run_assess(args: AssessArgs) -> Result<(), AppError> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => fs::read_to_string(path)?,
        (None, None) => {
            return Err(ServiceError::InvalidRequest(
                "provide --text or --file".to_string(),
            )
            .into())
        }
    };

    let config = AppConfig::load()?;
    let probabilities = ModelProbabilities::new(args.high, args.medium, args.low);
    let classifier: Arc<dyn RiskClassifier> = Arc::new(StaticClassifier::new(probabilities));
    let service = AssessmentService::from_config(
        config.assessment,
        Some(classifier),
        Arc::new(InMemorySnapshotRepository::default()),
    )?;

    let report = service.assess_and_remediate(&text, args.top_k, None)?;
    println!("{}", render_report(&report, args.format)?);
    Ok(())
}

pub(crate) fn run_intake(args: IntakeArgs) -> Result<(), AppError> {
    let raw = fs::read_to_string(&args.form)?;
    let form: IntakeForm = serde_json::from_str(&raw)?;
    if form.system_name.trim().is_empty() {
        return Err(ServiceError::InvalidRequest("system_name must not be empty".to_string()).into());
    }

    let result = assess_intake(&form, args.ml_score);
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

pub(crate) fn run_keywords(args: KeywordsArgs) -> Result<(), AppError> {
    let articles = match args.article.as_deref() {
        Some(raw) => vec![Article::from_id(raw).ok_or_else(|| {
            ServiceError::InvalidRequest(format!("unknown article '{raw}'"))
        })?],
        None => Article::ALL.to_vec(),
    };

    print!("{}", render_keywords(&articles));
    Ok(())
}

pub(crate) fn render_report(
    report: &RemediationReport,
    format: OutputFormat,
) -> Result<String, AppError> {
    Ok(match format {
        OutputFormat::Json => serde_json::to_string_pretty(report)?,
        OutputFormat::Markdown => to_markdown(&report.plan),
        OutputFormat::Github => {
            let issue = to_github_issue(&report.plan);
            format!("{}\n\n{}", issue.title, issue.body)
        }
    })
}

pub(crate) fn render_keywords(articles: &[Article]) -> String {
    let mut output = String::new();
    for article in articles {
        output.push_str(&format!("{} ({})\n", article.id(), article.name()));
        for keyword in article_keywords(*article) {
            output.push_str(&format!("  - {keyword}\n"));
        }
    }
    output
}

fn parse_probability(raw: &str) -> Result<f64, String> {
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|err| format!("failed to parse '{raw}' as a probability ({err})"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err("probabilities must lie between 0 and 1".to_string())
    }
}
