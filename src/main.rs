//! Command-line entry point.
//!
//! # Startup sequence
//!
//! 1. Parse arguments.
//! 2. Initialise logging (`info`, or `debug` with `--verbose`).
//! 3. Load [`AppConfig`] (defaults when the file does not exist).
//! 4. Open the project, run the workflow, save when changes were applied.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use caption_voice::{
    assets::{AssetLayout, FsAssetLoader},
    caption::LabelFilter,
    config::{AppConfig, AppPaths},
    duration::DurationEstimator,
    timeline::{AutoConfirm, Confirm, ProjectTimeline, PromptConfirm},
    workflow::{Outcome, Resizer, VoiceInserter, WorkflowError},
};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Fit captions to their spoken length and insert recorded voices.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Settings file (defaults to the platform config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Resize selected captions to their estimated spoken duration
    Resize {
        /// Project file
        project: PathBuf,
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Insert voice recordings under matching selected captions
    Insert {
        /// Project file
        project: PathBuf,
        /// Voice directory (defaults to <project dir>/Voice)
        #[arg(long, value_name = "DIR")]
        voice_dir: Option<PathBuf>,
        /// Apply without asking
        #[arg(short, long)]
        yes: bool,
    },

    /// Print the estimated duration of a text
    Estimate {
        #[arg(required = true)]
        text: Vec<String>,
    },

    /// Print the effective settings
    Config {
        /// Write the effective settings to the settings file
        #[arg(long)]
        save: bool,
    },
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter)).init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<WorkflowError>() {
                Some(w) if w.is_configuration() => log::warn!("{w}"),
                _ => log::error!("{e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings_file = cli
        .config
        .clone()
        .unwrap_or_else(|| AppPaths::new().settings_file);
    let config = AppConfig::load_from(&settings_file)
        .with_context(|| format!("loading {}", settings_file.display()))?;

    match cli.command {
        Command::Resize { project, yes } => resize(&config, project, yes),
        Command::Insert {
            project,
            voice_dir,
            yes,
        } => insert(&config, project, voice_dir, yes),
        Command::Estimate { text } => {
            let estimator = DurationEstimator::from_config(&config);
            let text = text.join(" ");
            let estimate = estimator.breakdown(&text);
            println!("{}  ({})", estimate.duration, estimate.transcription);
            Ok(())
        }
        Command::Config { save } => {
            if save {
                config.save_to(&settings_file)?;
                log::info!("settings written to {}", settings_file.display());
            }
            print!("{}", toml::to_string_pretty(&config)?);
            Ok(())
        }
    }
}

fn confirmer(yes: bool) -> Box<dyn Confirm> {
    if yes {
        Box::new(AutoConfirm)
    } else {
        Box::new(PromptConfirm)
    }
}

fn resize(config: &AppConfig, project: PathBuf, yes: bool) -> Result<()> {
    let mut timeline = ProjectTimeline::open(&project)?;
    let estimator = DurationEstimator::from_config(config);
    let labels = LabelFilter::new(config.caption.label_prefix.clone());

    let outcome = Resizer::new(&estimator, &labels).run(&mut timeline, confirmer(yes).as_ref())?;
    if let Outcome::Applied(report) = outcome {
        timeline.save()?;
        println!("{} captions resized", report.resized);
    }
    Ok(())
}

fn insert(
    config: &AppConfig,
    project: PathBuf,
    voice_dir: Option<PathBuf>,
    yes: bool,
) -> Result<()> {
    let mut timeline = ProjectTimeline::open(&project)?;
    let voice_dir = voice_dir.unwrap_or_else(|| {
        timeline
            .project_dir()
            .map(|d| d.join(&config.assets.voice_dir_name))
            .unwrap_or_else(|| PathBuf::from(&config.assets.voice_dir_name))
    });

    let labels = LabelFilter::new(config.caption.label_prefix.clone());
    let layout = AssetLayout::from_config(&config.assets)?;
    let inserter = VoiceInserter::new(
        &labels,
        &layout,
        &FsAssetLoader,
        config.assets.voice_track_name.clone(),
    );

    let outcome = inserter.run(&mut timeline, &voice_dir, confirmer(yes).as_ref())?;
    if let Outcome::Applied(report) = outcome {
        timeline.save()?;
        println!(
            "{} voice files inserted ({} already present)",
            report.inserted, report.skipped
        );
    }
    Ok(())
}
