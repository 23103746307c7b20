use anyhow::Result;
use clap::{Parser, Subcommand};
use partner_insight::agent::{self, AgentClient, AgentConfig};
use partner_insight::data::{ingest, DataStore};
use partner_insight::server;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "partner-insight", version, about = "Partner scoring analysis & AI-assisted report generation")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the summary/compare/reload HTTP API
    Serve {
        /// Merged partner dataset CSV
        #[arg(long, default_value = "final_merged_with_questions.csv")]
        data: PathBuf,
        #[arg(long, default_value = "127.0.0.1:7071")]
        addr: String,
    },
    /// Run the full agent analysis pipeline for one partner
    Report {
        #[arg(long)]
        partner_id: i64,
        #[arg(long, default_value = "final_merged_with_questions.csv")]
        data: PathBuf,
        #[arg(long, default_value = "output")]
        output: PathBuf,
    },
    /// Convert a JSON record export into the loader's CSV shape
    Ingest {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    match Cli::parse().command {
        Command::Serve { data, addr } => {
            let store = Arc::new(DataStore::open(data)?);
            info!(
                partners = store.snapshot().partner_ids.len(),
                "dataset loaded from {}",
                store.source_path().display()
            );
            server::run(store, &addr).await
        }
        Command::Report {
            partner_id,
            data,
            output,
        } => {
            let store = DataStore::open(data)?;
            let client = AgentClient::new(AgentConfig::from_env()?);
            let path = agent::run_report(&store, &client, partner_id, &output).await?;
            info!("report written to {}", path.display());
            Ok(())
        }
        Command::Ingest { input, output } => {
            let mut df = ingest::json_records_to_dataframe(&input)?;
            ingest::write_csv(&mut df, &output)?;
            info!(
                rows = df.height(),
                columns = df.width(),
                "converted {} -> {}",
                input.display(),
                output.display()
            );
            Ok(())
        }
    }
}
