use anyhow::Result;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use storynest_core::constants::{DEFAULT_HTTP_TIMEOUT_SECS, DEFAULT_MONTHLY_QUOTA};
use storynest_core::env_config::env_parse_with_default;
use storynest_core::{BillingPeriod, JournalStore, NewMemory};
use storynest_http::{create_router, AppState};
use storynest_llm::ContentGenerator;
use storynest_pdf::PdfClient;
use storynest_service::GenerationService;
use storynest_storage::Storage;
use storynest_themes::ThemeRegistry;

#[derive(Parser)]
#[command(name = "storynest")]
#[command(about = "Family-memory journal with AI storybook generation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve {
        #[arg(short, long, default_value = "8080")]
        port: u16,
        #[arg(short = 'H', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Issue an API token for a user and print it.
    Grant { user_id: String },
    /// Register a child for a user.
    AddChild { user_id: String, name: String },
    /// Record a memory for a child.
    AddMemory {
        child_id: i64,
        #[arg(short, long)]
        note: Option<String>,
        #[arg(short, long)]
        image_path: Option<String>,
        /// RFC 3339 timestamp of when the moment happened.
        #[arg(short, long)]
        taken_at: Option<String>,
    },
    /// Show a user's generation usage for the current month.
    Usage { user_id: String },
}

fn get_db_path() -> PathBuf {
    std::env::var("STORYNEST_DB").map_or_else(
        |_| {
            dirs::data_local_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("storynest")
                .join("journal.db")
        },
        PathBuf::from,
    )
}

fn get_api_key() -> Option<String> {
    std::env::var("STORYNEST_API_KEY").ok().filter(|k| !k.is_empty())
}

fn get_base_url() -> String {
    std::env::var("STORYNEST_API_URL")
        .unwrap_or_else(|_| "https://api.openai.com".to_string())
}

/// The PDF delegate needs both an endpoint and a shared secret; anything
/// less disables it.
fn get_pdf_client(timeout: Duration) -> Result<Option<PdfClient>> {
    let url = std::env::var("STORYNEST_WORKER_URL").ok().filter(|v| !v.is_empty());
    let secret = std::env::var("STORYNEST_WORKER_SECRET").ok().filter(|v| !v.is_empty());
    match (url, secret) {
        (Some(url), Some(secret)) => Ok(Some(PdfClient::new(url, secret, timeout)?)),
        (None, None) => Ok(None),
        _ => {
            tracing::warn!(
                "PDF delegate needs both STORYNEST_WORKER_URL and STORYNEST_WORKER_SECRET; disabled"
            );
            Ok(None)
        },
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let cli = Cli::parse();
    let db_path = get_db_path();

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let storage = Storage::new(&db_path)?;
    let store: Arc<dyn JournalStore> = Arc::new(storage);

    match cli.command {
        Commands::Serve { port, host } => {
            let timeout =
                Duration::from_secs(env_parse_with_default("STORYNEST_LLM_TIMEOUT_SECS", DEFAULT_HTTP_TIMEOUT_SECS));
            let quota = env_parse_with_default("STORYNEST_MONTHLY_QUOTA", DEFAULT_MONTHLY_QUOTA);
            let generator = ContentGenerator::from_credentials(get_api_key(), get_base_url(), timeout)?;
            let pdf = get_pdf_client(timeout)?;
            if generator.is_live() {
                tracing::info!("live content generation enabled");
            }
            if pdf.is_none() {
                tracing::info!("PDF delegate not configured, pdf=true requests render HTML only");
            }

            let generation = GenerationService::new(
                Arc::clone(&store),
                generator,
                ThemeRegistry::new()?,
                pdf,
                quota,
            );
            let state = Arc::new(AppState { store, generation });
            let router = create_router(state);
            let addr = format!("{}:{}", host, port);
            tracing::info!("Starting HTTP server on {}", addr);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            axum::serve(listener, router).await?;
        }
        Commands::Grant { user_id } => {
            let token = uuid::Uuid::new_v4().to_string();
            store.grant_token(&user_id, &token).await?;
            println!("{token}");
        }
        Commands::AddChild { user_id, name } => {
            let child = store.add_child(&user_id, &name).await?;
            println!("{}", serde_json::to_string_pretty(&child)?);
        }
        Commands::AddMemory { child_id, note, image_path, taken_at } => {
            let taken_at = taken_at
                .map(|t| DateTime::parse_from_rfc3339(&t).map(|dt| dt.with_timezone(&Utc)))
                .transpose()?;
            let memory = store
                .add_memory(&NewMemory { child_id, note, image_path, taken_at })
                .await?;
            println!("{}", serde_json::to_string_pretty(&memory)?);
        }
        Commands::Usage { user_id } => {
            let period = BillingPeriod::current();
            let usage = store.get_usage(&user_id, period.start()).await?;
            let calls = usage.map_or(0, |u| u.calls);
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "userId": user_id,
                    "period": period.to_string(),
                    "calls": calls,
                }))?
            );
        }
    }

    Ok(())
}
