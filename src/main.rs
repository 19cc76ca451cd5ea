use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

use grid_client::config::GridConfig;
use grid_client::distributor::{Distributor, RemoteDistributor};
use grid_client::grid::{NewSessionPayload, NodeDescriptor, NodeId};
use grid_client::utils;

#[derive(Parser)]
#[command(name = "gridctl", version, about = "Command-line client for a grid distributor")]
struct AppCli {
    /// Distributor endpoint, e.g. http://localhost:5553 (skips the config file)
    #[arg(short, long)]
    url: Option<String>,

    /// Config file path
    #[arg(short, long, default_value = "config.json", global = true)]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a session from a capabilities JSON document
    NewSession {
        /// Inline JSON payload
        #[arg(long, conflicts_with = "file")]
        json: Option<String>,
        /// File containing the payload
        #[arg(long)]
        file: Option<String>,
    },
    /// Register a worker node with the distributor
    AddNode {
        /// Base URI the node serves sessions on
        uri: String,
        #[arg(long, default_value_t = 1)]
        max_sessions: u32,
        /// Node id; generated when omitted
        #[arg(long)]
        id: Option<Uuid>,
    },
    /// Deregister a worker node
    RemoveNode { id: Uuid },
}

fn load_config(args: &AppCli) -> Result<GridConfig> {
    match &args.url {
        Some(url) => Ok(GridConfig::new(url.clone())),
        None => GridConfig::from_file(&args.config),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    utils::logging::init();

    let args = AppCli::parse();
    let config = load_config(&args)?;
    info!(distributor_url = %config.distributor_url, "connecting to distributor");
    let distributor = RemoteDistributor::new(config.transport()?);

    match args.command {
        Commands::NewSession { json, file } => {
            let text = match (json, file) {
                (Some(inline), _) => inline,
                (None, Some(path)) => {
                    std::fs::read_to_string(&path).context("reading payload file")?
                }
                (None, None) => r#"{"capabilities":{}}"#.to_string(),
            };
            let payload = NewSessionPayload::from_json(&text).context("parsing payload JSON")?;
            let session = distributor.new_session(&payload).await?;
            println!("{}", serde_json::to_string_pretty(&session)?);
        }
        Commands::AddNode {
            uri,
            max_sessions,
            id,
        } => {
            let mut node = NodeDescriptor::new(uri);
            node.max_sessions = max_sessions;
            if let Some(id) = id {
                node.id = NodeId::from(id);
            }
            distributor.add(&node).await?;
            info!(node_id = %node.id, "node registered");
            println!("{}", serde_json::to_string_pretty(&node)?);
        }
        Commands::RemoveNode { id } => {
            distributor.remove(NodeId::from(id)).await?;
            info!(node_id = %id, "node removed");
        }
    }

    Ok(())
}
