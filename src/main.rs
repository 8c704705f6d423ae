//! JSONP gateway demo.
//!
//! Serves a few JSON endpoints behind the JSONP filter:
//!
//! ```text
//! curl 'http://127.0.0.1:8080/action.jsonp?callback=cb'
//! cb({"key":"value"});
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use jsonp_gateway::config::{load_config, GatewayConfig};
use jsonp_gateway::observability::logging;
use jsonp_gateway::{HttpServer, Trigger};

#[derive(Parser)]
#[command(name = "jsonp-gateway")]
#[command(about = "Serve JSON endpoints as JSONP", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the trigger: "extension" or "callback"
    #[arg(short, long)]
    trigger: Option<Trigger>,

    /// Prefix wrapped output with /**/
    #[arg(long)]
    extra_security: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    if let Some(trigger) = cli.trigger {
        config.jsonp.trigger = trigger;
    }
    if cli.extra_security {
        config.jsonp.extra_security = true;
    }

    logging::init(&config.observability.log_level);

    tracing::info!("jsonp-gateway v{} starting", env!("CARGO_PKG_VERSION"));

    let server = HttpServer::new(config);
    let config = server.config();
    tracing::info!(
        bind_address = %config.listener.bind_address,
        trigger = %config.jsonp.trigger,
        extra_security = config.jsonp.extra_security,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
