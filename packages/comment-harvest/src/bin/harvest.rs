//! Harvest CLI
//!
//! Loads a gradebook report (live over HTTP, or from a saved snapshot),
//! extracts student feedback comments, translates them, and writes the
//! results to the output directory.

use anyhow::{bail, Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use comment_harvest::{
    translator_for, DocumentSource, HarvestConfig, HttpSource, HttpSourceConfig, Language,
    LoginCredentials, OutputFormat, Pipeline, ProviderSettings, RunReport, RunStatus,
    SnapshotSource, TranslationService,
};

#[derive(Parser)]
#[command(name = "harvest")]
#[command(about = "Extract, translate, and save student feedback comments")]
struct Cli {
    /// Gradebook account email (or HARVEST_EMAIL)
    #[arg(long)]
    email: Option<String>,

    /// Gradebook account password (or HARVEST_PASSWORD)
    #[arg(long)]
    password: Option<String>,

    /// Target language code, e.g. vi
    #[arg(long, short = 'l')]
    language: Option<Language>,

    /// Translation provider: google or libre
    #[arg(long)]
    service: Option<TranslationService>,

    /// Provider to try when the primary one fails
    #[arg(long)]
    fallback_service: Option<TranslationService>,

    /// Output format: json, csv, or both
    #[arg(long)]
    format: Option<OutputFormat>,

    /// Directory for the JSON/CSV artifacts
    #[arg(long, short = 'o')]
    output_dir: Option<PathBuf>,

    /// Read a saved report page instead of logging in
    #[arg(long, value_name = "FILE")]
    snapshot: Option<PathBuf>,

    /// Login form URL (or HARVEST_LOGIN_URL)
    #[arg(long)]
    login_url: Option<String>,

    /// Report view URL (or HARVEST_REPORT_URL)
    #[arg(long)]
    report_url: Option<String>,

    /// Comment selector to use instead of the defaults (repeatable)
    #[arg(long = "selector", value_name = "CSS")]
    selectors: Vec<String>,

    /// Drop records repeated by both extraction passes
    #[arg(long)]
    dedupe: bool,

    /// Run the browser session headless
    #[arg(long)]
    headless: bool,

    /// Do not open devtools in the browser session
    #[arg(long)]
    no_devtools: bool,

    /// Print the supported target languages and exit
    #[arg(long)]
    list_languages: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenvy::dotenv();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,comment_harvest=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let cli = Cli::parse();

    if cli.list_languages {
        for language in Language::all() {
            println!("{:<4}{}", language.code(), language.name());
        }
        return Ok(());
    }

    let config = build_config(&cli)?;
    let settings = ProviderSettings::from_env();
    let translator =
        translator_for(&config, &settings).context("Failed to configure translation provider")?;

    let source: Box<dyn DocumentSource> = match &cli.snapshot {
        Some(path) => Box::new(SnapshotSource::new(path)),
        None => Box::new(http_source(&cli, &config)?),
    };

    tracing::info!(
        source = source.name(),
        language = %config.target_language,
        service = %config.translation_service,
        output = %config.output_directory.display(),
        "Starting harvest"
    );

    let pipeline = Pipeline::with_config(translator, config);
    let report = pipeline
        .run(source.as_ref())
        .await
        .context("Failed to load the report")?;

    print_summary(&report);

    match report.status {
        RunStatus::Completed | RunStatus::NoComments => Ok(()),
        RunStatus::ExtractionFailed { reason } => bail!("extraction failed: {}", reason),
        RunStatus::PersistenceFailed { reason, .. } => bail!("saving results failed: {}", reason),
    }
}

/// Environment first, then CLI flags on top.
fn build_config(cli: &Cli) -> Result<HarvestConfig> {
    let mut config = HarvestConfig::from_env().context("Invalid HARVEST_* configuration")?;

    if let Some(language) = cli.language {
        config = config.with_target_language(language);
    }
    if let Some(service) = cli.service {
        config = config.with_translation_service(service);
    }
    if let Some(service) = cli.fallback_service {
        config = config.with_fallback_service(service);
    }
    if let Some(format) = cli.format {
        config = config.with_output_format(format);
    }
    if let Some(dir) = &cli.output_dir {
        config = config.with_output_directory(dir);
    }
    let mut extractor = config.extractor.clone();
    if !cli.selectors.is_empty() {
        extractor = extractor.with_selectors(&cli.selectors);
    }
    if cli.dedupe {
        extractor = extractor.with_deduplicate(true);
    }
    config = config.with_extractor(extractor);
    config.headless = cli.headless;
    config.devtools = !cli.no_devtools;

    Ok(config)
}

fn http_source(cli: &Cli, config: &HarvestConfig) -> Result<HttpSource> {
    let email = flag_or_env(&cli.email, "HARVEST_EMAIL");
    let password = flag_or_env(&cli.password, "HARVEST_PASSWORD");
    let credentials = LoginCredentials::new(email.unwrap_or_default(), password.unwrap_or_default())
        .context("Credentials are required unless --snapshot is given (--email/--password or HARVEST_EMAIL/HARVEST_PASSWORD)")?;

    let login_url = flag_or_env(&cli.login_url, "HARVEST_LOGIN_URL")
        .context("--login-url or HARVEST_LOGIN_URL must be set")?;
    let report_url = flag_or_env(&cli.report_url, "HARVEST_REPORT_URL")
        .context("--report-url or HARVEST_REPORT_URL must be set")?;

    let source_config = HttpSourceConfig::new(&login_url, &report_url, credentials)?
        .with_settle_delay(config.settle_delay);

    Ok(HttpSource::new(source_config))
}

fn flag_or_env(flag: &Option<String>, key: &str) -> Option<String> {
    flag.clone()
        .or_else(|| std::env::var(key).ok())
        .filter(|v| !v.trim().is_empty())
}

fn print_summary(report: &RunReport) {
    println!();
    println!("Comments found: {}", report.comment_count());
    println!(
        "Translated:     {} ({} kept original text)",
        report.translated, report.fallbacks
    );
    for path in &report.artifacts {
        println!("Saved:          {}", path.display());
    }
    if report.status == RunStatus::NoComments {
        println!("No comments found in the report; nothing was saved.");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_and_dedupe_flags_override_extractor() {
        let cli = Cli::parse_from([
            "harvest",
            "--selector",
            ".remark",
            "--selector",
            "td.notes",
            "--dedupe",
            "--language",
            "vi",
        ]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.extractor.comment_selectors, vec![".remark", "td.notes"]);
        assert!(config.extractor.deduplicate);
        assert_eq!(config.target_language, Language::Vi);
        assert!(config.devtools);
    }

    #[test]
    fn test_default_selectors_kept_without_flag() {
        let cli = Cli::parse_from(["harvest", "--no-devtools"]);
        let config = build_config(&cli).unwrap();

        assert_eq!(config.extractor.comment_selectors.len(), 6);
        assert!(!config.devtools);
    }
}
