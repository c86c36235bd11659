//! Daily Papers Digest - Entry Point
//!
//! Fetches today's (or a given day's) papers and prints an LLM summary of them.

use std::path::PathBuf;

use clap::Parser;

use daily_papers::logging::{self, LogFileConfig};
use daily_papers::{Config, DailyPapersClient, OpenAiAgent, Summarizer, TextGenerator};

#[derive(Parser, Debug)]
#[command(name = "daily-papers")]
#[command(about = "Summarize the Hugging Face daily papers feed")]
#[command(version)]
struct Cli {
    /// Feed date as YYYYMMDD (defaults to today)
    #[arg(long)]
    date: Option<String>,

    /// Print the Markdown digest instead of summarizing it
    #[arg(long)]
    digest_only: bool,

    /// OpenAI API key
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Write the agent settings snapshot to this file
    #[arg(long, env = "DAILY_PAPERS_AUTOSAVE")]
    autosave: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", env = "RUST_LOG")]
    log_level: String,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Log file path
    #[arg(long, default_value = logging::DEFAULT_LOG_FILE, env = "DAILY_PAPERS_LOG_FILE")]
    log_file: PathBuf,

    /// Rotate the log file once it exceeds this many bytes
    #[arg(long, default_value_t = logging::DEFAULT_MAX_BYTES)]
    log_max_bytes: u64,

    /// Disable the log file
    #[arg(long)]
    no_log_file: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let log_file = (!cli.no_log_file).then(|| LogFileConfig {
        max_bytes: cli.log_max_bytes,
        ..LogFileConfig::new(&cli.log_file)
    });
    logging::init_tracing(&cli.log_level, cli.json_logs, log_file.as_ref())?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        date = cli.date.as_deref().unwrap_or("today"),
        "Starting daily papers digest"
    );

    let mut config = Config::from_env()?;
    if cli.api_key.is_some() {
        config.api_key = cli.api_key;
    }
    if let Some(path) = cli.autosave {
        config = config.with_autosave(path);
    }

    let client = DailyPapersClient::new(&config)?;

    if cli.digest_only {
        let raw = client.fetch_batch(cli.date.as_deref()).await?;
        match daily_papers::generate_digest(&raw) {
            Some(digest) => println!("{digest}"),
            None => eprintln!("No papers to summarize."),
        }
        return Ok(());
    }

    let agent = OpenAiAgent::new(&config)?;
    tracing::debug!(agent = agent.name(), "Agent ready");

    let summarizer = Summarizer::new(client, agent);
    match summarizer.summarize_date(cli.date.as_deref()).await? {
        Some(summary) => println!("{summary}"),
        None => eprintln!("No papers to summarize."),
    }

    Ok(())
}
