use anyhow::Context;
use clap::{Parser, Subcommand};
use hello_backend_api::{build_router, AppState};
use hello_backend_runtime::{shutdown_signal, telemetry, BackendServices};
use hello_config::load as load_config;
use hello_database::{Message, MessageRepository};
use tokio::net::TcpListener;
use tracing::info;

#[derive(Parser)]
#[command(name = "hello-backend")]
#[command(about = "HelloWorld message backend (serves HTTP by default)")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, PartialEq, Eq, Subcommand)]
enum Commands {
    /// Start the HTTP server (default)
    Serve,
    /// Print every stored message
    ListMessages,
    /// Delete every stored message
    ClearMessages,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    telemetry::init_tracing().context("failed to initialise tracing")?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => run_server().await,
        Commands::ListMessages => list_messages().await,
        Commands::ClearMessages => clear_messages().await,
    }
}

async fn open_repository() -> anyhow::Result<MessageRepository> {
    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    Ok(MessageRepository::new(services.db_pool))
}

async fn run_server() -> anyhow::Result<()> {
    info!("starting HelloWorld backend");

    let config = load_config().context("failed to load configuration")?;

    let services = BackendServices::initialise(&config)
        .await
        .context("failed to initialise backend services")?;

    let app = build_router(AppState::new(services.db_pool.clone()));

    let address = config.http.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind http listener on {address}"))?;

    info!(%address, "http server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("http server error")?;

    services.db_pool.close().await;
    info!("backend shut down");
    Ok(())
}

async fn list_messages() -> anyhow::Result<()> {
    let repository = open_repository().await?;

    let messages = repository
        .find_all()
        .await
        .context("failed to fetch messages")?;

    if messages.is_empty() {
        println!("No messages found in database");
        return Ok(());
    }

    println!("Found {} messages:", messages.len());
    println!(
        "{:<5} {:<36} {:<40} {:<25} {:<25}",
        "ID", "External ID", "Content (truncated)", "Added On", "Edited On"
    );
    println!("{}", "-".repeat(135));

    for message in &messages {
        println!("{}", format_row(message));
    }

    Ok(())
}

async fn clear_messages() -> anyhow::Result<()> {
    let repository = open_repository().await?;

    let removed = repository
        .delete_all()
        .await
        .context("failed to delete messages")?;

    println!("Database cleared:");
    println!("- {removed} messages deleted");
    Ok(())
}

fn format_row(message: &Message) -> String {
    let content = if message.content.chars().count() > 40 {
        let head: String = message.content.chars().take(37).collect();
        format!("{head}...")
    } else {
        message.content.clone()
    };

    format!(
        "{:<5} {:<36} {:<40} {:<25} {:<25}",
        message.id,
        message.external_id,
        content,
        message.added_on.to_rfc3339(),
        message
            .edited_on
            .map(|edited_on| edited_on.to_rfc3339())
            .unwrap_or_else(|| "NULL".to_string())
    )
}
