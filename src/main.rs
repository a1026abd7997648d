use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use corp_vet::orchestrator::InputValidator;
use corp_vet::{
    Budgets, CompanyValidator, LegitimacyReport, RecordedSources, SourceSet, ValidationRequest,
    VetConfig, VetError, render_text,
};

/// Exit code for requests rejected by input validation
const EXIT_INVALID_INPUT: i32 = 2;

/// corp-vet: company legitimacy validation from registry and web evidence
#[derive(Parser, Debug)]
#[command(name = "corp-vet")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a company against recorded source responses
    #[command(name = "validate")]
    Validate {
        #[command(flatten)]
        company: CompanyArgs,

        #[command(flatten)]
        args: ValidateArgs,
    },

    /// Check identifier formats only; no sources are contacted
    #[command(name = "check-input")]
    CheckInput {
        #[command(flatten)]
        company: CompanyArgs,
    },
}

#[derive(Args, Debug)]
struct CompanyArgs {
    /// Registered company name
    #[arg(long)]
    company: String,

    /// Corporate identification number (21 characters)
    #[arg(long)]
    cin: String,

    /// GST identification number (15 characters)
    #[arg(long)]
    gst: String,
}

#[derive(Args, Debug)]
struct ValidateArgs {
    /// YAML or JSON file with one recorded response per source
    #[arg(short, long)]
    sources: PathBuf,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the per-source timeout
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Overall deadline for the whole validation
    #[arg(long)]
    deadline_secs: Option<u64>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Some(Command::Validate { company, args }) => handle_validate_command(company, args).await,
        Some(Command::CheckInput { company }) => handle_check_input_command(company),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            eprintln!(
                "Example: corp-vet validate --company \"Acme Pvt Ltd\" --cin U72900KA2018PTC123456 --gst 29AABCT1332L1ZU --sources responses.yaml"
            );
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // Logs go to stderr so `--json` output stays parseable
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn load_config(args: &ValidateArgs) -> Result<VetConfig> {
    let path = args.config.clone().or_else(VetConfig::default_path);
    debug!("Config path: {:?}", path);

    let mut config = VetConfig::load_or_default(path.as_deref())?;

    // Apply CLI overrides
    if let Some(secs) = args.timeout_secs {
        config.sources.timeout_secs = secs;
        config.sources.overrides.clear();
    }
    if let Some(secs) = args.deadline_secs {
        config.request.deadline_secs = Some(secs);
    }

    Ok(config)
}

async fn handle_validate_command(company: CompanyArgs, args: ValidateArgs) -> Result<()> {
    info!("corp-vet starting");

    let config = load_config(&args)?;
    let budgets = Budgets::from_config(&config);

    let recorded = RecordedSources::from_file(&args.sources)
        .with_context(|| format!("Failed to load recorded sources: {:?}", args.sources))?;
    let validator =
        CompanyValidator::with_budgets(SourceSet::from_shared(Arc::new(recorded)), budgets);

    let report = match config.request.deadline_secs {
        Some(secs) => validator
            .validate_company_within(
                &company.company,
                &company.cin,
                &company.gst,
                Duration::from_secs(secs),
            )
            .await
            .context("Validation did not complete")?,
        None => {
            validator
                .validate_company(&company.company, &company.cin, &company.gst)
                .await
        }
    };

    print_report(&report, args.json)?;

    if report.is_invalid() {
        std::process::exit(EXIT_INVALID_INPUT);
    }

    Ok(())
}

fn handle_check_input_command(company: CompanyArgs) -> Result<()> {
    let request = ValidationRequest::new(&company.company, &company.cin, &company.gst);

    match InputValidator::default().validate(&request) {
        Ok(()) => {
            println!("Input is well-formed");
            Ok(())
        }
        Err(errors) => {
            eprintln!("{}", VetError::InvalidInput { errors });
            std::process::exit(EXIT_INVALID_INPUT);
        }
    }
}

fn print_report(report: &LegitimacyReport, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", out);
    } else {
        print!("{}", render_text(report));
    }
    Ok(())
}
