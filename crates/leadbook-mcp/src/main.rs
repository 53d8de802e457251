mod requests;
mod server;

use clap::Parser;
use leadbook_core::{seed::sample_workspace, AiSettings, Workspace};
use rmcp::ServiceExt;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::server::LeadbookServer;

/// MCP server for the Leadbook CRM
#[derive(Parser, Debug)]
#[command(name = "leadbook-mcp")]
#[command(about = "MCP server exposing Leadbook client, project and service tools")]
#[command(version)]
struct Args {
    /// Start from the sample clients, projects and services instead of an empty workspace
    #[arg(long)]
    seed: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env is fine; the environment may already carry the settings.
    let _ = dotenvy::dotenv();

    // Stdout carries the MCP protocol, so logs go to stderr.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::from_default_env()
                .add_directive("leadbook_core=info".parse()?)
                .add_directive("leadbook_suggest=info".parse()?)
                .add_directive("leadbook_mcp=info".parse()?),
        )
        .init();

    let args = Args::parse();

    let workspace = if args.seed {
        sample_workspace()?
    } else {
        Workspace::new()
    };
    let settings = AiSettings::from_env();
    info!(
        clients = workspace.clients().len(),
        projects = workspace.projects().len(),
        services = workspace.services().len(),
        provider = %settings.provider,
        model = %settings.model,
        ai_configured = leadbook_core::ai_configured(&settings),
        "starting leadbook mcp server"
    );

    let service = LeadbookServer::new(workspace, settings)
        .serve(rmcp::transport::io::stdio())
        .await
        .inspect_err(|e| tracing::error!("MCP server error: {}", e))?;
    service.waiting().await?;
    Ok(())
}
