//! joinflow: gym membership sign-up wizard.
//!
//! The binary wires the `jf-*` crates together and drives the wizard from
//! the terminal.

pub mod bootstrap;
pub mod console;

use tracing::info;

use crate::console::{Console, Outcome};

/// Load config, install tracing, wire dependencies and run the console.
pub async fn run() -> anyhow::Result<()> {
    let config_path = bootstrap::config::config_path();
    let config = bootstrap::resolve_config(config_path.as_deref())?;
    bootstrap::init_tracing_subscriber(&config.data_dir)?;
    info!(
        config = ?config_path,
        data_dir = %config.data_dir.display(),
        mode = ?config.service_mode,
        "joinflow starting"
    );

    let app = bootstrap::build_app(&config)?;
    match Console::stdio(app).run().await? {
        Outcome::Registered(receipt) => {
            info!(user_id = %receipt.user_id, "registration completed");
        }
        Outcome::Quit => info!("exited before submitting"),
    }
    Ok(())
}
