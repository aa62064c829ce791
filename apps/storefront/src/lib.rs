//! # Harvest Storefront Library
//!
//! Session layer around `harvest-core`: the cart behind a lock, the
//! commands a storefront client calls, configuration, and a script runner
//! for driving a cart from the command line.
//!
//! ## Module Organization
//! ```text
//! harvest_storefront/
//! ├── lib.rs          ◄─── You are here (logging & run)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── cart.rs     ◄─── Cart state (Arc<Mutex<Cart>>)
//! │   └── config.rs   ◄─── storefront.toml + HARVEST_* env
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── cart.rs     ◄─── Cart manipulation commands
//! │   ├── order.rs    ◄─── Checkout and order handoff
//! │   └── config.rs   ◄─── Configuration retrieval
//! ├── script.rs       ◄─── JSON cart scripts + order outbox sink
//! └── error.rs        ◄─── API error type for commands
//! ```

pub mod commands;
pub mod error;
pub mod script;
pub mod state;

use std::fs::OpenOptions;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::ApiError;
use script::{parse_script, run_script, JsonLinesSink, ScriptSummary};
use state::{CartState, StorefrontConfig};

const ORDERS_FILE_NAME: &str = "orders.jsonl";

/// Inputs for one script run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Config file; the platform config directory when `None`.
    pub config_path: Option<PathBuf>,

    /// Script file; stdin when `None`.
    pub script_path: Option<PathBuf>,

    /// Order outbox; the platform data directory when `None`.
    pub orders_path: Option<PathBuf>,
}

/// Runs a cart script.
///
/// ## Sequence
/// ```text
/// 1. Load config ──────────► storefront.toml, then HARVEST_* overrides
/// 2. Build cart ───────────► empty cart priced with the configured tiers
/// 3. Read script ──────────► file or stdin
/// 4. Open order outbox ────► append-only JSON lines
/// 5. Replay actions ───────► one JSON line per action on stdout
/// ```
pub fn run(options: RunOptions) -> Result<ScriptSummary, ApiError> {
    info!("Starting Harvest storefront script runner");

    let config = StorefrontConfig::load(options.config_path)?;
    let cart = CartState::with_volume_schedule(config.volume_schedule()?);
    info!(store = %config.store.name, "Configuration loaded");

    let input = read_script(options.script_path.as_deref())?;
    let actions = parse_script(&input)?;

    let orders_path = match options.orders_path {
        Some(path) => path,
        None => default_orders_path()?,
    };
    info!(?orders_path, actions = actions.len(), "Replaying script");

    let outbox = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&orders_path)
        .map_err(|e| ApiError::internal(format!("Cannot open order outbox: {}", e)))?;
    let mut sink = JsonLinesSink::new(outbox);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_script(actions, &cart, &config, &mut sink, &mut out)
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr; stdout carries the JSON results.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=harvest=trace` - Show trace for harvest crates only
/// - Default: INFO, DEBUG for harvest crates
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,harvest=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn read_script(path: Option<&Path>) -> Result<String, ApiError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|e| {
            ApiError::not_found("Script", &format!("{} ({})", path.display(), e))
        }),
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .map_err(|e| ApiError::internal(format!("Failed to read stdin: {}", e)))?;
            Ok(input)
        }
    }
}

/// Determines the order outbox path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/com.harvest.storefront/orders.jsonl`
/// - **Windows**: `%APPDATA%\harvest\storefront\data\orders.jsonl`
/// - **Linux**: `~/.local/share/storefront/orders.jsonl`
fn default_orders_path() -> Result<PathBuf, ApiError> {
    let proj_dirs = ProjectDirs::from("com", "harvest", "storefront")
        .ok_or_else(|| ApiError::internal("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .map_err(|e| ApiError::internal(format!("Cannot create data directory: {}", e)))?;

    Ok(data_dir.join(ORDERS_FILE_NAME))
}
