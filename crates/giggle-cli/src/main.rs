#![forbid(unsafe_code)]

mod cmd;
mod output;

use clap::{CommandFactory, Parser, Subcommand};
use output::OutputMode;
use std::env;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "giggle: a local-first dad-joke collector with votes",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Suppress non-essential output.
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags, environment, and TTY detection.
    fn output_mode(&self) -> OutputMode {
        output::resolve_output_mode(self.json)
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        next_help_heading = "Collect",
        about = "Fetch unique jokes from the source",
        long_about = "Fetch jokes from the configured endpoint, skipping any already collected, and persist them.",
        after_help = "EXAMPLES:\n    # Fetch the configured batch size\n    gg fetch\n\n    # Fetch five jokes\n    gg fetch -n 5\n\n    # Emit machine-readable output\n    gg fetch --json"
    )]
    Fetch(cmd::fetch::FetchArgs),

    #[command(
        next_help_heading = "Read",
        about = "List jokes sorted by votes",
        long_about = "List collected jokes ordered by votes descending, with mood banding.",
        after_help = "EXAMPLES:\n    # Show the whole collection\n    gg list\n\n    # Top three\n    gg list -n 3\n\n    # Emit machine-readable output\n    gg list --json"
    )]
    List(cmd::list::ListArgs),

    #[command(
        next_help_heading = "Vote",
        about = "Upvote a joke",
        after_help = "EXAMPLES:\n    # Upvote by id\n    gg up 1f9ad3\n\n    # Emit machine-readable output\n    gg up 1f9ad3 --json"
    )]
    Up(cmd::vote::UpArgs),

    #[command(
        next_help_heading = "Vote",
        about = "Downvote a joke",
        after_help = "EXAMPLES:\n    # Downvote by id\n    gg down 1f9ad3"
    )]
    Down(cmd::vote::DownArgs),

    #[command(
        next_help_heading = "Vote",
        about = "Apply an arbitrary vote delta",
        after_help = "EXAMPLES:\n    # Add five votes at once\n    gg vote 1f9ad3 --delta 5\n\n    # Take three away\n    gg vote 1f9ad3 --delta -3"
    )]
    Vote(cmd::vote::VoteArgs),

    #[command(
        next_help_heading = "Project Maintenance",
        about = "Generate shell completion scripts",
        long_about = "Generate shell completion scripts for supported shells.",
        after_help = "EXAMPLES:\n    # Generate bash completions\n    gg completions bash\n\n    # Generate zsh completions\n    gg completions zsh"
    )]
    Completions(cmd::completions::CompletionsArgs),
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("GIGGLE_LOG").unwrap_or_else(|_| {
        EnvFilter::new(if env::var("DEBUG").is_ok() {
            "giggle=debug,info"
        } else {
            "giggle=info,warn"
        })
    });

    let format = env::var("GIGGLE_LOG_FORMAT").unwrap_or_else(|_| "compact".to_string());

    let registry = tracing_subscriber::registry().with(filter);

    match format.as_str() {
        "json" => {
            registry.with(fmt::layer().json().with_ansi(false)).init();
        }
        _ => {
            registry.with(fmt::layer().compact()).init();
        }
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    if cli.verbose {
        info!("Verbose mode enabled");
    }

    let output = cli.output_mode();

    let command_result = match cli.command {
        Commands::Fetch(ref args) => cmd::fetch::run_fetch(args, output, cli.quiet),
        Commands::List(ref args) => cmd::list::run_list(args, output),
        Commands::Up(ref args) => cmd::vote::run_up(args, output),
        Commands::Down(ref args) => cmd::vote::run_down(args, output),
        Commands::Vote(ref args) => cmd::vote::run_vote(args, output),
        Commands::Completions(args) => {
            let mut command = Cli::command();
            cmd::completions::run_completions(args.shell, &mut command)
        }
    };

    // Failures leave through one door: machine code and hint included.
    if let Err(err) = command_result {
        output::render_error(output, &output::CliError::from_report(&err))?;
        std::process::exit(1);
    }
    Ok(())
}
