//! Server entry point.
//!
//! Reads configuration once, initializes logging, opens storage and serves.

use std::process::ExitCode;
use supplier_api::{serve, AppState};
use supplier_core::{init_logging, AppConfig, Backend};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("supplier_server: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = init_logging(&config.log_level, config.log_dir.as_deref()) {
        eprintln!("supplier_server: logging setup failed: {err}");
        return ExitCode::FAILURE;
    }

    let backend = Backend::connect(config.storage.clone());
    match serve(AppState::new(backend), config.port).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("event=server_exit module=api status=error error={err}");
            ExitCode::FAILURE
        }
    }
}
