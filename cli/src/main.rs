//! toolrouter CLI binary: run the server, or route one query from the command line.
//!
//! Subcommands: `serve` (HTTP + WebSocket server), `query` (one-shot, printed to stdout).

mod logging;
mod query;

use std::path::Path;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "toolrouter")]
#[command(about = "toolrouter: route queries to weather, math or a general model")]
struct Args {
    #[command(subcommand)]
    cmd: Command,

    /// Verbose: debug logs for graph execution, routing and tools
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
    /// Run the HTTP + WebSocket server (default 127.0.0.1:8000 or TOOLROUTER_ADDR)
    Serve(ServeArgs),
    /// Route one query and print tool_used and result
    Query(QueryArgs),
}

#[derive(clap::Args, Debug, Clone)]
struct ServeArgs {
    /// Listen address; overrides TOOLROUTER_ADDR
    #[arg(long, value_name = "ADDR")]
    addr: Option<String>,
}

#[derive(clap::Args, Debug, Clone)]
struct QueryArgs {
    /// Print the result as a JSON object
    #[arg(long)]
    json: bool,

    /// Rule-based routing and mock weather; needs no API key or network
    #[arg(long)]
    offline: bool,

    /// Query text (joined with spaces)
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    text: Vec<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    // Load first: LOG_FILE and RUST_LOG may come from .env or config.toml.
    let loaded = config::load_and_apply("toolrouter", None::<&Path>);
    logging::init(args.verbose)?;
    if let Err(e) = loaded {
        tracing::warn!(error = %e, "config load failed, continuing with process environment");
    }

    match args.cmd {
        Command::Serve(sa) => {
            let mut settings = match config::Settings::from_env() {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("toolrouter: {}", e);
                    std::process::exit(1);
                }
            };
            if let Some(addr) = sa.addr {
                settings.addr = addr;
            }
            if let Err(e) = serve::run_serve(&settings).await {
                eprintln!("serve error: {}", e);
                std::process::exit(1);
            }
        }
        Command::Query(qa) => match query::run(&qa.text, qa.offline, qa.json).await {
            Ok(out) => {
                println!("{}", out);
                let _ = std::io::Write::flush(&mut std::io::stdout());
            }
            Err(e) => {
                eprintln!("toolrouter: {}", e);
                std::process::exit(1);
            }
        },
    }
    Ok(())
}
