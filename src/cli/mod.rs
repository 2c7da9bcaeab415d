// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `ui`     — the interactive screening form
//   2. `assess` — score one profile given as flags
//   3. `schema` — validate the artifacts and list the columns
//
// Every command loads both artifacts first. If either is missing
// the command stops there, before anything else is shown.
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod tui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use commands::{AssessArgs, Commands, SchemaArgs, UiArgs};

use crate::application::assess_use_case::AssessUseCase;
use crate::application::context::AssessmentContext;
use crate::application::presenter;
use crate::domain::profile::StudentProfile;
use crate::infra::artifacts::ArtifactStore;

#[derive(Parser, Debug)]
#[command(
    name = "student-risk",
    version = "0.1.0",
    about = "Screen a student profile for depression risk with a pre-trained classifier."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Write logs to this file instead of stderr (recommended with `ui`)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Match on the subcommand and dispatch. Routes only, never computes.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Ui(args)     => run_ui(args),
            Commands::Assess(args) => run_assess(args),
            Commands::Schema(args) => run_schema(args),
        }
    }
}

fn load_context(store: &ArtifactStore) -> Result<AssessmentContext> {
    AssessmentContext::load(store).context("Cannot start the screener")
}

/// Handles the `ui` subcommand.
/// The context is loaded before the terminal is touched, so a missing
/// artifact is reported on a normal screen.
fn run_ui(args: UiArgs) -> Result<()> {
    let ctx = load_context(&ArtifactStore::from(&args.artifacts))?;
    tracing::info!("Opening screening form");
    tui::run(&ctx)
}

/// Handles the `assess` subcommand.
fn run_assess(args: AssessArgs) -> Result<()> {
    let ctx     = load_context(&ArtifactStore::from(&args.artifacts))?;
    let profile = StudentProfile::from(&args);

    let assessment = AssessUseCase::new(&ctx).assess(&profile)?;
    for line in presenter::assessment_report(&assessment) {
        println!("{line}");
    }
    Ok(())
}

/// Handles the `schema` subcommand.
fn run_schema(args: SchemaArgs) -> Result<()> {
    let store  = ArtifactStore::from(&args.artifacts);
    let ctx    = load_context(&store)?;

    println!("Model:   {}", store.model_path().display());
    println!("Columns: {}", store.columns_path().display());
    for line in presenter::schema_report(ctx.schema(), ctx.classifier()) {
        println!("{line}");
    }
    Ok(())
}
