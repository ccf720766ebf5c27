/// Onion Alias Daemon
///
/// This daemon:
/// - Loads alias -> onion address entries from its config file
/// - Publishes them in the process-wide alias registry
/// - Serves an HTTP API for provisioning and inspecting aliases

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use onionalias_common::{defaults, AliasConfig};
use onionalias_core::get_singleton;
use onionalias_daemon::{logging, ApiServer};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();

    match args.get(1).map(String::as_str) {
        Some("help" | "--help" | "-h") => {
            print_help();
        }
        Some("version" | "--version" | "-v") => {
            println!("Onion Alias Daemon v{}", env!("CARGO_PKG_VERSION"));
        }
        Some("check") => {
            let Some(path) = args.get(2) else {
                eprintln!("Usage: onionalias-daemon check <config>");
                std::process::exit(1);
            };
            check_config(Path::new(path))?;
        }
        Some("serve") => {
            let path = args
                .get(2)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(defaults::CONFIG_FILE));
            run_serve_mode(&path).await?;
        }
        None => {
            run_serve_mode(Path::new(defaults::CONFIG_FILE)).await?;
        }
        Some(other) => {
            eprintln!("Unknown command: {}", other);
            eprintln!("Run with 'help' to see available commands");
            std::process::exit(1);
        }
    }

    Ok(())
}

/// Load configuration, writing defaults if the file does not exist
fn load_or_create_config(path: &Path) -> Result<AliasConfig> {
    if path.exists() {
        return AliasConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()));
    }

    let config = AliasConfig::default();
    // Logging is not up yet, so report through stderr
    if let Err(e) = config.to_file(path) {
        eprintln!("Failed to save default config: {}", e);
    } else {
        eprintln!("Saved default configuration to {}", path.display());
    }
    Ok(config)
}

/// Run the provisioning API with aliases loaded from `path`
async fn run_serve_mode(path: &Path) -> Result<()> {
    let config = load_or_create_config(path)?;
    logging::init(&config.log_level);

    info!("Starting Onion Alias Daemon v{}", env!("CARGO_PKG_VERSION"));
    info!("Using configuration {}", path.display());

    let registry = get_singleton();
    let loaded = registry
        .load(&config.aliases)
        .context("rejecting malformed [aliases] entry")?;
    if loaded == 0 {
        warn!("No aliases configured; registry starts empty");
    }

    let listen_addr = config.listen_addr()?;
    let api_server = ApiServer::new(listen_addr, registry);

    tokio::select! {
        result = api_server.start() => {
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    Ok(())
}

/// Validate a config file without starting the daemon
fn check_config(path: &Path) -> Result<()> {
    let config =
        AliasConfig::from_file(path).with_context(|| format!("loading {}", path.display()))?;
    config.listen_addr()?;

    // Validate against a scratch registry so nothing global is touched
    let scratch = onionalias_core::AliasRegistry::new();
    let count = scratch
        .load(&config.aliases)
        .context("rejecting malformed [aliases] entry")?;

    println!("{}: OK ({} aliases)", path.display(), count);
    Ok(())
}

/// Print help message
fn print_help() {
    println!("Onion Alias Daemon - alias provisioning for onion services");
    println!();
    println!("USAGE:");
    println!("    onionalias-daemon [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    serve [CONFIG]  Load aliases and serve the API (default)");
    println!("    check CONFIG    Validate a config file and exit");
    println!("    help            Show this help message");
    println!("    version         Show version information");
    println!();
    println!("CONFIG ({} by default):", defaults::CONFIG_FILE);
    println!("    log_level = \"info\"");
    println!();
    println!("    [api]");
    println!("    listen_addr = \"{}\"", defaults::API_LISTEN_ADDR);
    println!();
    println!("    [aliases]");
    println!("    \"securedrop.tor.onion\" = \"<56 chars>.onion\"");
    println!();
    println!("EXAMPLES:");
    println!("    curl http://{}/api/aliases", defaults::API_LISTEN_ADDR);
    println!(
        "    curl -X PUT -H 'content-type: application/json' \\\n         -d '{{\"address\":\"abc.onion\"}}' http://{}/api/aliases/bridge1",
        defaults::API_LISTEN_ADDR
    );
}
