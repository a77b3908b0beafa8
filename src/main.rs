use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use clap::Parser;
use quiz_deck::{
    AirtableSource, CredentialStore, Credentials, FileSource, Quiz, QuizError, RecordSource,
    DEFAULT_API_URL,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Local JSON file with a records payload to load the questions from
    #[arg(short, long)]
    records: Option<PathBuf>,

    /// Airtable base ID
    #[arg(long, env = "QUIZ_DECK_BASE_ID")]
    base_id: Option<String>,

    /// Airtable table name or ID
    #[arg(long, env = "QUIZ_DECK_TABLE")]
    table: Option<String>,

    /// Airtable personal access token
    #[arg(long, env = "QUIZ_DECK_TOKEN", hide_env_values = true)]
    token: Option<String>,

    /// Where saved credentials are kept
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Airtable API base URL
    #[arg(long, default_value = DEFAULT_API_URL, hide = true)]
    api_url: String,

    /// Log file (defaults to the platform data directory)
    #[arg(long)]
    log_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    init_tracing(args.log_file.clone());

    if let Err(e) = run(args).await {
        tracing::error!(error = %e, "quiz exited with an error");
        eprintln!("Error running quiz: {}", e);
        std::process::exit(1);
    }
}

async fn run(args: Args) -> Result<(), QuizError> {
    if let Some(path) = args.records {
        tracing::info!(path = %path.display(), "loading questions from file");
        return run_quiz(FileSource::new(path)).await;
    }

    let mut source = AirtableSource::new(args.api_url);
    match args.credentials.map(CredentialStore::new) {
        Some(store) => source = source.with_store(store),
        None => {
            if let Some(store) = CredentialStore::default_location() {
                source = source.with_store(store);
            }
        }
    }

    if let (Some(token), Some(base_id), Some(table)) = (args.token, args.base_id, args.table) {
        source = source.with_credentials(Credentials::new(token, base_id, table)?);
    }

    run_quiz(source).await
}

async fn run_quiz<S: RecordSource + 'static>(source: S) -> Result<(), QuizError> {
    Quiz::new(source).run().await
}

fn init_tracing(log_file: Option<PathBuf>) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let Some(path) = log_file.or_else(default_log_path) else {
        tracing_subscriber::registry().with(env_filter).init();
        return;
    };

    if let Some(parent) = path.parent() {
        let _ = fs::create_dir_all(parent);
    }

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            tracing_subscriber::registry()
                .with(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
                .with(env_filter)
                .init();
            tracing::info!(path = %path.display(), "logging initialized");
        }
        // Writing logs to stdout/stderr would corrupt the TUI.
        Err(_) => tracing_subscriber::registry().with(env_filter).init(),
    }
}

fn default_log_path() -> Option<PathBuf> {
    dirs::data_local_dir().map(|dir| dir.join("quiz-deck").join("quiz-deck.log"))
}
