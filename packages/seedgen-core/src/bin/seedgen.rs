//! Seedgen CLI
//!
//! Generate concolic test inputs for the functions in an analysis manifest.
//!
//! # Usage
//!
//! ```bash
//! # Extract predicates from a source tree, write to ./concolic_inputs
//! seedgen -m firness_output.json -s edk2/NetworkPkg
//!
//! # Built-in hints only, z3 backend, JSON report
//! seedgen -m manifest.json --solver z3 --format json
//!
//! # Extraction and hint files, without the built-in table
//! seedgen -m manifest.json -s src --no-builtin-hints --hints team_hints.yaml
//!
//! # Team config with a CLI override
//! seedgen -m manifest.json -s src --config seedgen.yaml -n 20 --parallel
//! ```

use anyhow::Context;
use clap::{Parser, ValueEnum};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use seedgen_core::features::extraction::{FsSourceCorpus, InMemorySourceCorpus, SourceCorpus};
use seedgen_core::features::hints::HintRegistry;
use seedgen_core::features::manifest::{load_manifest, AnalysisManifest};
use seedgen_core::features::solver::SolverKind;
use seedgen_core::{BatchOrchestrator, EngineConfig, Preset};
use seedgen_storage::FsArtifactStore;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser)]
#[command(name = "seedgen")]
#[command(about = "Concolic test-input generation for firmware fuzzing", long_about = None)]
struct Cli {
    /// Analysis manifest (JSON)
    #[arg(short, long)]
    manifest: PathBuf,

    /// Source file or directory to extract predicates from
    #[arg(short, long)]
    source: Option<PathBuf>,

    /// Output directory for generated inputs
    #[arg(short, long, default_value = "concolic_inputs")]
    output_dir: PathBuf,

    /// Path budget per function
    #[arg(short = 'n', long)]
    max_paths: Option<usize>,

    /// YAML configuration file (schema v1)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Base preset: fast, balanced, thorough
    #[arg(long)]
    preset: Option<Preset>,

    /// Hint file (YAML or JSON); may be repeated
    #[arg(long)]
    hints: Vec<PathBuf>,

    /// Do not register the built-in firmware hints
    #[arg(long)]
    no_builtin_hints: bool,

    /// Solver backend: native, z3
    #[arg(long)]
    solver: Option<SolverKind>,

    /// Process functions on a worker pool
    #[arg(long)]
    parallel: bool,

    /// Report format
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,

    /// Debug logging (RUST_LOG still wins)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = EngineConfig::load(cli.config.as_deref(), cli.preset)
        .context("failed to load configuration")?;
    if let Some(max_paths) = cli.max_paths {
        config = config.with_max_paths(max_paths);
    }
    if let Some(solver) = cli.solver {
        config = config.with_solver(solver);
    }
    if cli.parallel {
        config = config.with_parallel(true);
    }
    if cli.no_builtin_hints {
        config = config.with_builtin_hints(false);
    }
    if let Some(provenance) = config.provenance() {
        tracing::debug!("Configuration:\n{}", provenance.summary());
    }

    let manifest = read_manifest(&cli.manifest)
        .with_context(|| format!("failed to load manifest {}", cli.manifest.display()))?;
    let hints = load_hints(config.builtin_hints, &cli.hints).context("failed to load hints")?;
    let corpus = open_corpus(cli.source.as_deref(), &config.source_extensions)
        .context("failed to open source")?;
    let store = FsArtifactStore::open(&cli.output_dir)
        .with_context(|| format!("failed to open output directory {}", cli.output_dir.display()))?;
    let orchestrator = BatchOrchestrator::from_config(config, Arc::new(store))?;

    let report = orchestrator.run(&manifest, corpus.as_ref(), &hints)?;
    match cli.format {
        OutputFormat::Text => println!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json()?),
    }
    Ok(())
}

fn read_manifest(path: &Path) -> seedgen_core::Result<AnalysisManifest> {
    let manifest = load_manifest(path)?;
    info!(functions = manifest.len(), "Manifest loaded");
    Ok(manifest)
}

/// Built-in table first, then each file in order; later entries win
fn load_hints(builtin: bool, paths: &[PathBuf]) -> seedgen_core::Result<HintRegistry> {
    let mut hints = if builtin {
        HintRegistry::with_builtin_hints()
    } else {
        HintRegistry::new()
    };
    for path in paths {
        let added = hints.load_file(path)?;
        info!(path = %path.display(), functions = added, "Hints loaded");
    }
    Ok(hints)
}

/// No source means hints are the only predicate supply
fn open_corpus(
    source: Option<&Path>,
    extensions: &[String],
) -> seedgen_core::Result<Box<dyn SourceCorpus>> {
    let Some(root) = source else {
        return Ok(Box::new(InMemorySourceCorpus::new()));
    };
    let corpus = FsSourceCorpus::open(root, extensions)?;
    info!(root = %root.display(), files = corpus.files().len(), "Source corpus opened");
    Ok(Box::new(corpus))
}
