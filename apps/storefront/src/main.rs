//! # Harvest Storefront CLI
//!
//! Replays a JSON cart script against a fresh cart and prints one JSON
//! result line per action.
//!
//! ```text
//! harvest-storefront [--config storefront.toml] [--orders orders.jsonl] [SCRIPT]
//!
//!   SCRIPT omitted ──► script read from stdin
//!   stdout ──────────► {"step":1,"action":"add","result":{...}}
//!   stderr ──────────► tracing logs (RUST_LOG)
//!   --orders ────────► accepted orders, one JSON line each
//! ```

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tracing::error;

use harvest_storefront::{init_tracing, run, RunOptions};

#[derive(Debug, Parser)]
#[command(
    name = "harvest-storefront",
    about = "Replay cart scripts through the Harvest pricing engine",
    long_about = None
)]
struct Cli {
    /// Path to storefront.toml
    #[arg(long, env = "HARVEST_CONFIG")]
    config: Option<PathBuf>,

    /// Order outbox file (JSON lines)
    #[arg(long, env = "HARVEST_ORDERS_PATH")]
    orders: Option<PathBuf>,

    /// Script file; read from stdin when omitted
    script: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing();

    let options = RunOptions {
        config_path: cli.config,
        script_path: cli.script,
        orders_path: cli.orders,
    };

    if let Err(e) = run(options) {
        error!(code = ?e.code, "{}", e.message);
        eprintln!("{e}");
        process::exit(1);
    }
}
