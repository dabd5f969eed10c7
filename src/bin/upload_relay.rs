// SPDX-License-Identifier: MPL-2.0
//! Standalone upload relay.
//!
//! ```text
//! upload-relay [--port <n>] [--staging-dir <dir>] [--config-dir <dir>]
//! ```

use iced_cull::app::{config, paths};
use std::path::PathBuf;

#[rocket::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("iced_cull=info"))
        .init();

    let mut args = pico_args::Arguments::from_env();
    let port: Option<u16> = args.opt_value_from_str("--port").unwrap_or_else(|err| {
        log::warn!("Ignoring invalid --port: {err}");
        None
    });
    let staging_dir: Option<String> = args.opt_value_from_str("--staging-dir").unwrap_or(None);
    let config_dir: Option<String> = args.opt_value_from_str("--config-dir").unwrap_or(None);

    paths::init_cli_overrides(config_dir);
    let (config, warning) = config::load();
    if let Some(key) = warning {
        log::warn!("Using default relay settings ({key})");
    }

    let mut relay = config.relay;
    if let Some(port) = port {
        relay.port = port;
    }
    if let Some(dir) = staging_dir {
        relay.staging_dir = PathBuf::from(dir);
    }

    let rocket = match iced_cull::relay::build(&relay) {
        Ok(rocket) => rocket,
        Err(err) => {
            log::error!("{err}");
            std::process::exit(1);
        }
    };

    log::info!("Upload relay listening on {}:{}", relay.address, relay.port);
    if let Err(err) = rocket.launch().await {
        log::error!("Upload relay stopped: {err}");
        std::process::exit(1);
    }
}
