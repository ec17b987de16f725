//! Command-line access to the Eureka Clinical API.
//!
//! Opens one session per invocation, runs a single command, prints the result
//! as pretty JSON and always closes the session.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use futures_util::FutureExt;

use eureka_client::config::load_config;
use eureka_client::observability::init_logging;
use eureka_client::{with_session, ClientConfig, Credentials, Job, Record, Session};

#[derive(Parser)]
#[command(name = "eureka")]
#[command(about = "Query and submit jobs to a Eureka Clinical API", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// CAS server URL (overrides the config file)
    #[arg(long)]
    cas_url: Option<String>,

    /// API URL (overrides the config file)
    #[arg(long)]
    api_url: Option<String>,

    /// Skip TLS certificate verification for both endpoints
    #[arg(long)]
    insecure: bool,

    #[arg(short, long, env = "EUREKA_USERNAME")]
    username: String,

    #[arg(short, long, env = "EUREKA_PASSWORD", hide_env_values = true)]
    password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the logged-in user
    Me,
    /// List users, or show one
    Users { id: Option<u64> },
    /// List phenotypes, or show one
    Phenotypes { id: Option<u64> },
    /// List concepts, or show one by key
    Concepts {
        key: Option<String>,
        #[arg(long)]
        summarize: bool,
    },
    /// List jobs, or show one
    Jobs { id: Option<u64> },
    /// Submit a job described by a JSON file
    SubmitJob { file: PathBuf },
}

/// A command with its inputs already read and parsed.
enum Action {
    Me,
    Users(Option<u64>),
    Phenotypes(Option<u64>),
    Concepts(Option<String>, bool),
    Jobs(Option<u64>),
    Submit(Box<Job>),
}

impl Action {
    fn from_command(command: Commands) -> Result<Self, Box<dyn std::error::Error>> {
        Ok(match command {
            Commands::Me => Action::Me,
            Commands::Users { id } => Action::Users(id),
            Commands::Phenotypes { id } => Action::Phenotypes(id),
            Commands::Concepts { key, summarize } => Action::Concepts(key, summarize),
            Commands::Jobs { id } => Action::Jobs(id),
            Commands::SubmitJob { file } => {
                let text = std::fs::read_to_string(&file)?;
                let job: Job = serde_json::from_str(&text)?;
                Action::Submit(Box::new(job))
            }
        })
    }

    async fn run(self, session: &Session) -> eureka_client::Result<Record> {
        match self {
            Action::Me => session.users().me().await,
            Action::Users(Some(id)) => session.users().get(id).await,
            Action::Users(None) => session.users().all().await,
            Action::Phenotypes(Some(id)) => session.phenotypes().get(id).await,
            Action::Phenotypes(None) => session.phenotypes().all().await,
            Action::Concepts(Some(key), summarize) => session.concepts().get(&key, summarize).await,
            Action::Concepts(None, _) => session.concepts().all().await,
            Action::Jobs(Some(id)) => session.jobs().get(id).await,
            Action::Jobs(None) => session.jobs().all().await,
            Action::Submit(job) => {
                let id = session.jobs().submit(&job).await?;
                Ok(Record::from_entries([("id", id)]))
            }
        }
    }
}

fn build_config(cli: &Cli) -> Result<ClientConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ClientConfig::default(),
    };

    if let Some(url) = &cli.cas_url {
        config = config.with_cas_url(url.clone());
    }
    if let Some(url) = &cli.api_url {
        config = config.with_api_url(url.clone());
    }
    if cli.insecure {
        config = config.with_cert_verification(false, false);
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = build_config(&cli)?;
    init_logging(&config.observability);

    tracing::debug!(
        cas_url = %config.cas.url,
        api_url = %config.api.url,
        job_schema = ?config.api.job_schema,
        "Configuration loaded"
    );

    let action = Action::from_command(cli.command)?;
    let credentials = Credentials::new(cli.username, cli.password);

    let record = with_session(&config, credentials, |session| {
        async move { action.run(session).await }.boxed()
    })
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Command failed");
        e
    })?;

    println!("{}", record.to_json_pretty());
    Ok(())
}
