use clap::{Parser, Subcommand};
use genai_gateway::config::Config;
use genai_gateway::envelope::InboundEvent;
use genai_gateway::gateway::{Gateway, UseCase};
use genai_gateway::server::DevServer;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file; defaults plus environment when absent
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve every use-case under /api/<slug>
    Serve {
        /// Override the configured port
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Run one serverless event and print the response envelope
    Invoke {
        /// Use-case slug, e.g. generate-post
        use_case: String,

        /// Event JSON file; stdin when omitted
        #[arg(short, long)]
        event: Option<String>,
    },
}

fn load_config(path: &str) -> anyhow::Result<Config> {
    let config = if Path::new(path).exists() {
        info!("Configuration loaded from {}", path);
        Config::from_file(path)?
    } else {
        Config::default()
    };
    Ok(config.with_env_overrides())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let args = Args::parse();
    let mut config = load_config(&args.config)?;

    match args.command {
        Command::Serve { port } => {
            if let Some(port) = port {
                config.server.port = port;
            }
            let gateway = Arc::new(Gateway::from_config(config)?);
            DevServer::new(gateway).run().await?;
        }
        Command::Invoke { use_case, event } => {
            let use_case: UseCase = use_case.parse()?;
            let raw = match event {
                Some(path) => std::fs::read_to_string(path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let event: InboundEvent = serde_json::from_str(&raw)?;

            let gateway = Gateway::from_config(config)?;
            let envelope = gateway.handle(use_case, &event).await;
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
    }

    Ok(())
}
