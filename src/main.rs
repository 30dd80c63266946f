//*** START FILE: src/main.rs ***//
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::collections::HashSet;
use std::path::PathBuf;
use std::process::ExitCode;

use weavelang_lessons::catalog::{progress, LessonCatalogItem, Progress};
use weavelang_lessons::config::{self, Config};
use weavelang_lessons::profile::LearnerProfile;
use weavelang_lessons::profile_io::load_profile_snapshot;
use weavelang_lessons::{
    all_practice_exercises, lesson_names, AssemblyOptions, LearningStyle, LessonLibrary, PurposeTrack, TimeCommitment,
    ValidationEngine,
};

#[derive(Parser, Debug)]
#[command(name = "weavelang", version, about = "Assemble personalised German lessons and validate lesson content")]
struct Cli {
    /// Config file (defaults to ./config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Content directory; overrides the config file and the built-in lessons
    #[arg(long, global = true)]
    content_dir: Option<PathBuf>,

    #[arg(short, long, global = true)]
    verbose: bool,

    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check every lesson x purpose x style combination; exits 1 on any error
    Validate {
        /// Audit content as seen with this time tier (5, 10, 20, 45)
        #[arg(long = "time")]
        time: Option<TimeCommitment>,
        /// Styles to check, comma separated (default: speaking, grammar, balanced)
        #[arg(long = "style", value_delimiter = ',')]
        styles: Vec<LearningStyle>,
    },
    /// Print one assembled lesson as JSON
    Show {
        lesson_id: String,
        #[command(flatten)]
        learner: LearnerArgs,
    },
    /// List every lesson's display title
    Names {
        #[command(flatten)]
        learner: LearnerArgs,
    },
    /// Print the practice pool as JSON
    Practice {
        #[command(flatten)]
        learner: LearnerArgs,
    },
    /// List the catalog, optionally personalised for a purpose
    Catalog {
        #[arg(long)]
        purpose: Option<String>,
    },
    /// Show the next lesson to take
    Current {
        #[command(flatten)]
        learner: LearnerArgs,
        /// Completed lesson ids, comma separated
        #[arg(long, value_delimiter = ',')]
        completed: Vec<String>,
    },
}

#[derive(Args, Debug, Clone, Default)]
struct LearnerArgs {
    /// work, travel, study, relocation, exams, daily (anything else means daily)
    #[arg(long)]
    purpose: Option<String>,
    /// Minutes per session: 5, 10, 20 or 45
    #[arg(long = "time")]
    time: Option<TimeCommitment>,
    /// speaking, grammar, vocab or balanced
    #[arg(long)]
    style: Option<String>,
    /// Learner profile snapshot (JSON); flags above override its values
    #[arg(long)]
    profile: Option<PathBuf>,
}

impl LearnerArgs {
    fn profile(&self) -> anyhow::Result<LearnerProfile> {
        let mut profile = match &self.profile {
            Some(path) => load_profile_snapshot(path)?,
            None => LearnerProfile::new(),
        };
        if let Some(purpose) = &self.purpose {
            profile.purpose = Some(purpose.clone());
        }
        if let Some(time) = self.time {
            profile.time_commitment = Some(time.minutes().to_string());
        }
        if let Some(style) = &self.style {
            style
                .parse::<LearningStyle>()
                .map_err(anyhow::Error::msg)?;
            profile.learning_style = Some(style.clone());
        }
        Ok(profile)
    }
}

fn init_tracing(quiet: bool, verbose: bool, configured: Option<&str>) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        configured.unwrap_or("warn")
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("WEAVELANG_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;
    Ok(())
}

fn load_library(cli: &Cli, config: &Config) -> anyhow::Result<LessonLibrary> {
    let dir = cli.content_dir.clone().or_else(|| config.content_dir().map(PathBuf::from));
    match dir {
        Some(dir) => {
            tracing::info!(dir = %dir.display(), "loading lesson content from directory");
            LessonLibrary::load_dir(&dir).with_context(|| format!("failed to load lesson content from {}", dir.display()))
        }
        None => LessonLibrary::builtin().context("built-in lesson content is invalid"),
    }
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value).context("JSON serialization failed")?);
    Ok(())
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = config::load_config(cli.config.as_deref()).context("failed to load configuration")?;
    init_tracing(cli.quiet, cli.verbose, config.log_level.as_deref())?;
    let library = load_library(&cli, &config)?;

    match &cli.command {
        Command::Validate { time, styles } => {
            let mut engine = ValidationEngine::new(&library).with_time(*time);
            if !styles.is_empty() {
                engine = engine.with_styles(styles.clone());
            }
            let report = engine.run();
            for finding in &report.findings {
                eprintln!("{}", finding);
            }
            println!("{}", report.summary());
            Ok(ExitCode::from(report.exit_code() as u8))
        }
        Command::Show { lesson_id, learner } => {
            let options = learner.profile()?.assembly_options();
            match library.lesson_content(lesson_id, &options) {
                Some(content) => {
                    print_json(&content)?;
                    Ok(ExitCode::SUCCESS)
                }
                None => {
                    eprintln!("Unknown lesson id '{}'", lesson_id);
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Names { learner } => {
            let options = learner.profile()?.assembly_options();
            for name in lesson_names(&library, &options) {
                println!("{}: {}", name.id, name.title);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Practice { learner } => {
            let options = learner.profile()?.assembly_options();
            print_json(&all_practice_exercises(&library, &options))?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Catalog { purpose } => {
            let items: Vec<_> = match purpose {
                Some(raw) => {
                    let track = PurposeTrack::from_intake(raw);
                    println!("Lessons for {}:", library.purposes().flavor(track).label);
                    library.catalog().personalized(track)
                }
                None => library.catalog().items().iter().collect(),
            };
            for item in items {
                let requires = if item.prerequisites.is_empty() {
                    String::new()
                } else {
                    format!(" (requires {})", item.prerequisites.join(", "))
                };
                println!("[{}] phase {} {}: {}{}", item.level, item.phase, item.id, item.title, requires);
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Current { learner, completed } => {
            let profile = learner.profile()?;
            let mut done: HashSet<String> = profile.completed_set();
            done.extend(completed.iter().cloned());
            let options: AssemblyOptions = profile.assembly_options();

            let track: Vec<&LessonCatalogItem> = match options.purpose {
                Some(purpose) => library.catalog().personalized(purpose),
                None => library.catalog().items().iter().collect(),
            };
            match progress(track, &done) {
                Progress::Next(item) => {
                    let title = library
                        .lesson_content(&item.id, &options)
                        .map(|content| content.title)
                        .unwrap_or_else(|| item.title.clone());
                    println!("{}: {}", item.id, title);
                }
                Progress::Locked(waiting) => {
                    println!("No lesson unlocked yet. {} lesson(s) still wait on prerequisites:", waiting.len());
                    for item in waiting {
                        println!("  {} (requires {})", item.id, item.prerequisites.join(", "));
                    }
                }
                Progress::Complete => println!("No lesson available: everything on this track is completed."),
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("Error: {error:#}");
            ExitCode::FAILURE
        }
    }
}
//*** END FILE: src/main.rs ***//
