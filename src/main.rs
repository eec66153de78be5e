//! Binary entry point for coursematch.
//!
//! This binary provides the CLI interface for syllabus tagging and course
//! recommendation.

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(missing_docs)]
// Allow print_stderr in main binary for CLI output
#![allow(clippy::print_stderr)]
#![allow(clippy::print_stdout)]
// Allow needless_pass_by_value for command functions
#![allow(clippy::needless_pass_by_value)]
// Allow multiple crate versions from transitive dependencies
#![allow(clippy::multiple_crate_versions)]

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use coursematch::cli::{ConfigCommand, IndexCommand, RecommendCommand, TagCommand, read_input};
use coursematch::config::CoursematchConfig;
use coursematch::embedding::EmbedderKind;
use coursematch::models::{DatasetKind, Seniority};
use coursematch::observability::{self, LoggingConfig};
use coursematch::rendering::OutputFormat;
use coursematch::{RecommendationRequest, RecommendationService, SyllabusTagger};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

/// Coursematch - syllabus tagging and job-to-course recommendations.
#[derive(Parser)]
#[command(name = "coursematch")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file.
    #[arg(short, long, global = true, env = "COURSEMATCH_CONFIG_PATH")]
    config: Option<PathBuf>,

    /// Course catalog CSV (overrides configuration).
    #[arg(long, global = true)]
    courses_csv: Option<PathBuf>,

    /// MOOC CSV (overrides configuration).
    #[arg(long, global = true)]
    moocs_csv: Option<PathBuf>,

    /// Vector index directory (overrides configuration).
    #[arg(long, global = true)]
    index_dir: Option<PathBuf>,

    /// Embedding backend: hashed or fastembed.
    #[arg(long, global = true, default_value = "hashed")]
    embedder: EmbedderKind,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand)]
enum Commands {
    /// Tag a syllabus.
    Tag {
        /// Syllabus text file (reads stdin when omitted).
        file: Option<PathBuf>,

        /// Print tags as JSON.
        #[arg(long)]
        json: bool,

        /// Print the reasoning behind each tag as JSON.
        #[arg(long)]
        reasoning: bool,
    },

    /// Recommend courses for a job posting.
    Recommend {
        /// Job title.
        #[arg(short, long)]
        title: String,

        /// Job description (reads --description-file or stdin when omitted).
        #[arg(short, long)]
        description: Option<String>,

        /// File containing the job description.
        #[arg(long, conflicts_with = "description")]
        description_file: Option<PathBuf>,

        /// Additional skills (comma-separated).
        #[arg(short, long)]
        skills: Option<String>,

        /// Seniority: Entry-Level, Mid-Level or Senior.
        #[arg(long)]
        seniority: Option<String>,

        /// Keep catalog courses outside the relevant majors.
        #[arg(long)]
        all_majors: bool,

        /// Print recommendations as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Rebuild the vector indexes from the catalog.
    Index {
        /// Only rebuild one dataset: courses or moocs.
        #[arg(long)]
        dataset: Option<DatasetKind>,
    },

    /// Show the resolved configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: Shell,
    },
}

/// Main entry point.
fn main() -> ExitCode {
    // A missing .env file is fine.
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {e:#}");
            return ExitCode::FAILURE;
        },
    };

    if let Err(e) = observability::init_logging(LoggingConfig::from_settings(
        Some(&config.logging),
        cli.verbose,
    )) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    match run_command(cli, config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        },
    }
}

/// Runs the selected command.
fn run_command(cli: Cli, config: CoursematchConfig) -> anyhow::Result<()> {
    match cli.command {
        Commands::Tag {
            file,
            json,
            reasoning,
        } => {
            let text = read_input(file.as_deref())?;
            let tagger = SyllabusTagger::new(Arc::new(config.tagging));
            let output = TagCommand::new()
                .with_json(json)
                .with_reasoning(reasoning)
                .run(&tagger, &text)?;
            print!("{output}");
        },

        Commands::Recommend {
            title,
            description,
            description_file,
            skills,
            seniority,
            all_majors,
            json,
        } => {
            let description = match description {
                Some(description) => description,
                None => read_input(description_file.as_deref())?,
            };
            let mut request =
                RecommendationRequest::new(title, description).with_major_filter(!all_majors);
            if let Some(skills) = skills {
                request = request.with_user_skills(skills);
            }
            if let Some(seniority) = seniority {
                let seniority = Seniority::parse(&seniority)
                    .with_context(|| format!("unknown seniority: {seniority}"))?;
                request = request.with_seniority(seniority);
            }

            let service = build_service(&config, cli.embedder)?;
            let format = if json {
                OutputFormat::Json
            } else {
                OutputFormat::Markdown
            };
            let output = RecommendCommand::new()
                .with_format(format)
                .run(&service, &request)?;
            println!("{output}");
        },

        Commands::Index { dataset } => {
            let service = build_service(&config, cli.embedder)?;
            let output = IndexCommand::new().with_dataset(dataset).run(&service)?;
            print!("{output}");
        },

        Commands::Config => {
            print!("{}", ConfigCommand::new().show(&config));
        },

        Commands::Completions { shell } => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "coursematch",
                &mut std::io::stdout(),
            );
        },
    }
    Ok(())
}

/// Loads configuration, then applies environment and CLI overrides.
fn load_config(cli: &Cli) -> anyhow::Result<CoursematchConfig> {
    let config = match &cli.config {
        Some(path) => CoursematchConfig::load_from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => CoursematchConfig::load_default(),
    };
    let mut config = config.with_env_overrides();

    if let Some(path) = &cli.courses_csv {
        config = config.with_courses_csv(path);
    }
    if let Some(path) = &cli.moocs_csv {
        config = config.with_moocs_csv(path);
    }
    if let Some(dir) = &cli.index_dir {
        config = config.with_index_dir(dir);
    }
    Ok(config)
}

/// Builds the recommendation service for the selected embedder.
fn build_service(
    config: &CoursematchConfig,
    embedder: EmbedderKind,
) -> anyhow::Result<RecommendationService> {
    let embedder = embedder
        .build()
        .with_context(|| format!("creating {embedder} embedder"))?;
    RecommendationService::from_config(config, embedder).context("opening vector indexes")
}
