use crate::infra::{matching_engine, parse_weight, sample_catalog, sample_profile};
use clap::Args;
use smartintern::catalog::PostingCatalog;
use smartintern::config::AppConfig;
use smartintern::error::AppError;
use smartintern::matching::{
    display_score, MatchingEngine, Profile, RankingOptions, RankingReport, WeightConfig,
};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Drop recommendations scoring below this value
    #[arg(long)]
    pub(crate) min_score: Option<f64>,
    /// Maximum number of recommendations to print
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the audit records as JSON instead of a text breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug)]
pub(crate) struct RankArgs {
    /// Profile JSON file (standing/cgpa, location, department, skills)
    #[arg(long)]
    pub(crate) profile: PathBuf,
    /// Posting catalog as CSV or a JSON array
    #[arg(long)]
    pub(crate) catalog: PathBuf,
    /// Criterion weight override, repeatable (e.g. --weight skills=2)
    #[arg(long = "weight", value_parser = parse_weight)]
    pub(crate) weights: Vec<(String, f64)>,
    /// Drop recommendations scoring below this value
    #[arg(long)]
    pub(crate) min_score: Option<f64>,
    /// Maximum number of recommendations to return
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Report zero-weighted criteria in the breakdown
    #[arg(long)]
    pub(crate) include_zero_weighted: bool,
    /// Print the audit records as JSON instead of a text breakdown
    #[arg(long)]
    pub(crate) json: bool,
}

pub(crate) fn run_rank(args: RankArgs) -> Result<(), AppError> {
    let RankArgs {
        profile,
        catalog,
        weights,
        min_score,
        limit,
        include_zero_weighted,
        json,
    } = args;

    let config = AppConfig::load()?;
    let profile: Profile = serde_json::from_str(&std::fs::read_to_string(profile)?)?;
    let catalog = PostingCatalog::from_path(catalog)?;

    let mut engine = matching_engine(&config.matching);
    if !weights.is_empty() {
        let mut merged: Vec<(String, f64)> = engine
            .weights()
            .iter()
            .map(|(name, weight)| (name.label().to_string(), weight))
            .collect();
        merged.extend(weights);
        engine = engine.with_weights(WeightConfig::from_raw(merged)?);
    }

    let options = RankingOptions {
        min_score,
        limit,
        include_zero_weighted,
    }
    .or(config.matching.ranking);

    let report = engine.rank_with_report(&profile, catalog.postings(), &options)?;
    render_report(&report, json)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        min_score,
        limit,
        json,
    } = args;

    let catalog = sample_catalog()?;
    let profile = sample_profile();
    let options = RankingOptions {
        min_score,
        limit,
        include_zero_weighted: false,
    };

    if !json {
        let summary = catalog.summary();
        println!("SmartIntern matching demo");
        println!(
            "- catalog: {} postings ({} active, {} closed), {} applicants",
            summary.total, summary.active, summary.closed, summary.total_applicants
        );
        println!(
            "- student: CGPA {:.1} | {} | {} | skills: {}",
            profile.standing.unwrap_or_default(),
            profile.location.as_deref().unwrap_or("unknown location"),
            profile.department.as_deref().unwrap_or("unknown department"),
            profile.skills.iter().collect::<Vec<_>>().join(", ")
        );
    }

    let report =
        MatchingEngine::default().rank_with_report(&profile, catalog.postings(), &options)?;
    render_report(&report, json)
}

fn render_report(report: &RankingReport, json: bool) -> Result<(), AppError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&report.records)?);
        return Ok(());
    }

    println!(
        "\nRecommendations ({} returned, {} closed excluded, {} below threshold, {} over limit)",
        report.records.len(),
        report.excluded_inactive,
        report.below_min_score,
        report.truncated
    );

    if report.records.is_empty() {
        println!("- no postings matched");
        return Ok(());
    }

    for (index, record) in report.records.iter().enumerate() {
        println!(
            "{}. {} [{}] {}%",
            index + 1,
            record.title(),
            record.posting_id(),
            record.overall_score()
        );
        let breakdown: Vec<String> = record
            .criteria()
            .iter()
            .map(|result| format!("{} {}%", result.name, display_score(result.sub_score)))
            .collect();
        println!("   {}", breakdown.join(" | "));
        println!("   {}", record.summary());
    }

    Ok(())
}
