use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use finam_classifier::cli::commands::{self, classify::ClassifyOptions};
use finam_classifier::cli::init_tracing;

#[derive(Parser)]
#[command(name = "finam-classifier")]
#[command(
    version,
    about = "Classify natural-language questions into Finam Trade API calls"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// TOML configuration file (default: ./finam-classifier.toml if present)
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify every question in the test file and write the submission
    Classify {
        #[arg(long, help = "Questions to classify (uid;question)")]
        test_file: Option<PathBuf>,
        #[arg(long, help = "Submission file to write (uid;type;request)")]
        output_file: Option<PathBuf>,
        #[arg(long, help = "Labelled examples (question;type;request)")]
        train_file: Option<PathBuf>,
        #[arg(long, help = "Classify only the first N questions (0 = all)")]
        limit: Option<usize>,
        #[arg(long, help = "Questions classified concurrently per group")]
        batch_size: Option<usize>,
        #[arg(long, help = "Model identifier, e.g. openai/gpt-4o-mini")]
        model: Option<String>,
        #[arg(long, help = "Log each group's questions and answers")]
        debug: bool,
    },

    /// Print the few-shot system prompt
    Prompt {
        #[arg(long, help = "Labelled examples (question;type;request)")]
        train_file: Option<PathBuf>,
        #[arg(long, help = "Number of examples to include")]
        few_shot_limit: Option<usize>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file path
    Path,
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        // Panics inside classification tasks are recovered by the scheduler
        if std::thread::current().name() != Some("main") {
            tracing::error!("Task panicked: {}", message);
            return;
        }

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mfinam-classifier encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    let log_filter = init_tracing(filter);

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::Classify {
            test_file,
            output_file,
            train_file,
            limit,
            batch_size,
            model,
            debug,
        } => {
            commands::classify::run(
                config_path,
                ClassifyOptions {
                    test_file,
                    output_file,
                    train_file,
                    limit,
                    batch_size,
                    model,
                    debug,
                    show_progress: !cli.quiet && !cli.verbose,
                },
                log_filter,
            )?;
        }
        Commands::Prompt {
            train_file,
            few_shot_limit,
        } => {
            commands::prompt::run(config_path, train_file, few_shot_limit)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                commands::config::show(config_path, &format)?;
            }
            ConfigAction::Path => {
                commands::config::path(config_path)?;
            }
        },
    }

    Ok(())
}
