use std::process::ExitCode;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing::debug;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

mod commands;

/// Exit status used when the user interrupts the program with Ctrl-C
const INTERRUPTED: u8 = 130;

#[derive(Parser)]
#[command(
    name = "talkmed-search",
    version,
    about = "Search TalkMED medical courses and live sessions",
    long_about = "A CLI tool that searches the TalkMED platform for medical courses and live \
                  sessions, with an optional interactive mode to explore the results"
)]
struct Cli {
    #[command(flatten)]
    search: commands::search::Search,

    /// Check that the TalkMED API is reachable and exit
    #[arg(long, conflicts_with_all = ["keyword", "interactive"])]
    check: bool,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Base URL of the TalkMED API
    #[arg(long, env = "TALKMED_BASE_URL", global = true)]
    base_url: Option<String>,

    /// HTTP request timeout in seconds
    #[arg(long, env = "TALKMED_TIMEOUT", default_value_t = 10, global = true)]
    timeout: u64,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    tokio::select! {
        result = run(&cli) => match result {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            debug!("Received Ctrl-C");
            eprintln!("\n\nInterrupted, exiting");
            // A pending stdin read would otherwise hold the runtime open on shutdown
            std::process::exit(i32::from(INTERRUPTED));
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode> {
    let client = commands::create_client(cli.base_url.as_deref(), cli.timeout)?;

    if cli.check {
        return commands::check::execute(&client).await;
    }

    if cli.search.keyword.is_none() {
        Cli::command().print_help()?;
        print!("{}", commands::search::USAGE_EXAMPLES);
        return Ok(ExitCode::SUCCESS);
    }

    cli.search.execute(client).await
}
