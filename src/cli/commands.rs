//! CLI command implementations
//!
//! Both commands load the JSON configuration, open the in-memory store and
//! load the optional fixture file before doing anything else.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::http_server::{HttpServer, HttpServerConfig};
use crate::ledger::{self, LedgerConfig};
use crate::models::{
    self, City, Guest, Hotel, Invoice, Notification, PenaltyAgreement, Reservation, Room,
    RoomFacilitate, RoomReserved, ServiceLevel, StayTracking,
};
use crate::observability::{self, LogConfig};
use crate::query::{executor, QuerySpec};
use crate::rest_api::AppState;
use crate::store::{Entity, Store};

use super::args::{Command, ListArgs};
use super::errors::{CliError, CliResult};
use super::io::{write_error, write_response};

/// Configuration file structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: HttpServerConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub ledger: LedgerConfig,

    /// JSON fixtures loaded into the store on boot, keyed by table
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from file
    pub fn load(path: &Path) -> CliResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| CliError::config_error(format!("Failed to read config: {}", e)))?;

        let config: Config = serde_json::from_str(&content)
            .map_err(|e| CliError::config_error(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> CliResult<()> {
        if self.server.port == 0 {
            return Err(CliError::config_error("server.port must be > 0"));
        }

        if !self.log.has_known_level() {
            return Err(CliError::config_error(format!(
                "Invalid log.level: '{}'. Must be one of {}.",
                self.log.level,
                observability::LEVELS.join(", ")
            )));
        }

        if self.ledger.enabled && self.ledger.endpoint.is_none() {
            return Err(CliError::config_error(
                "ledger.endpoint is required when ledger.enabled is true",
            ));
        }

        Ok(())
    }

    /// Open the store and load the fixture file, if any
    pub fn open_store(&self) -> CliResult<Store> {
        let store = models::open_store().map_err(|e| CliError::boot_failed(e.to_string()))?;

        if let Some(path) = &self.seed_file {
            let content = fs::read_to_string(path).map_err(|e| {
                CliError::seed_failed(format!("Failed to read {}: {}", path.display(), e))
            })?;
            let fixtures: Value = serde_json::from_str(&content)
                .map_err(|e| CliError::seed_failed(format!("Invalid fixture JSON: {}", e)))?;
            let rows = store
                .seed(&fixtures)
                .map_err(|e| CliError::seed_failed(e.to_string()))?;
            info!(event = "FIXTURES_LOADED", path = %path.display(), rows);
        }

        Ok(store)
    }
}

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
/// This is the only function that main.rs should call.
pub fn run() -> CliResult<()> {
    let cli = super::args::Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve { config, port } => serve(&config, port),
        Command::Query { config, list } => query(&config, &list),
    }
}

/// Start the HTTP API server
pub fn serve(config_path: &Path, port: Option<u16>) -> CliResult<()> {
    let mut config = Config::load(config_path)?;
    if let Some(port) = port {
        config.server.port = port;
        config.validate()?;
    }
    observability::init(&config.log);

    let store = Arc::new(config.open_store()?);
    let lookup = ledger::from_config(&config.ledger)
        .map_err(|e| CliError::boot_failed(format!("Ledger gateway: {}", e)))?;
    info!(
        event = "LEDGER_CONFIGURED",
        enabled = config.ledger.enabled,
        endpoint = config.ledger.endpoint.as_deref().unwrap_or(""),
    );

    let server = HttpServer::with_config(config.server.clone(), AppState::new(store, lookup));

    // Start the async runtime and run the server
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })?;

    Ok(())
}

/// Run one list query and print the result
pub fn query(config_path: &Path, list: &ListArgs) -> CliResult<()> {
    let config = Config::load(config_path)?;
    observability::init(&config.log);
    let store = config.open_store()?;

    match list_table(&store, list) {
        Ok(rows) => write_response(rows),
        Err(e) => {
            write_error(e.code_str(), e.message())?;
            Err(e)
        }
    }
}

fn list_as_json<E: Entity>(store: &Store, spec: &QuerySpec) -> CliResult<Value> {
    let listing = executor::list(store.query_table::<E>(), spec)
        .map_err(|e| CliError::query_failed(e.to_string()))?;
    Ok(serde_json::to_value(listing)?)
}

/// List rows of the table named in `list.entity` as JSON
pub fn list_table(store: &Store, list: &ListArgs) -> CliResult<Value> {
    let spec = QuerySpec::parse(&list.raw_query())
        .map_err(|e| CliError::query_failed(e.to_string()))?;

    match list.entity.as_str() {
        "city" => list_as_json::<City>(store, &spec),
        "hotel" => list_as_json::<Hotel>(store, &spec),
        "guest" => list_as_json::<Guest>(store, &spec),
        "room" => list_as_json::<Room>(store, &spec),
        "reservation" => list_as_json::<Reservation>(store, &spec),
        "room_reserved" => list_as_json::<RoomReserved>(store, &spec),
        "invoice" => list_as_json::<Invoice>(store, &spec),
        "notification" => list_as_json::<Notification>(store, &spec),
        "service_level" => list_as_json::<ServiceLevel>(store, &spec),
        "penalty_agreement" => list_as_json::<PenaltyAgreement>(store, &spec),
        "room_facilitate" => list_as_json::<RoomFacilitate>(store, &spec),
        "stay_tracking" => list_as_json::<StayTracking>(store, &spec),
        other => Err(CliError::unknown_entity(other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_port_zero() {
        let mut config = Config::default();
        config.server.port = 0;
        assert_eq!(config.validate().unwrap_err().code(), &CliErrorCode::ConfigError);
    }

    #[test]
    fn test_validate_rejects_unknown_level() {
        let mut config = Config::default();
        config.log.level = "chatty".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.message().contains("chatty"));
    }

    #[test]
    fn test_validate_rejects_ledger_without_endpoint() {
        let mut config = Config::default();
        config.ledger.enabled = true;
        assert!(config.validate().is_err());

        config.ledger.endpoint = Some("http://127.0.0.1:7050".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_unknown_entity() {
        let store = models::open_store().unwrap();
        let list = ListArgs {
            entity: "spaceship".to_string(),
            ..Default::default()
        };
        let err = list_table(&store, &list).unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::UnknownEntity);
    }
}
